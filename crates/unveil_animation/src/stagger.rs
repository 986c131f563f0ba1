//! Stagger scheduling
//!
//! Cascading reveals give child `i` a start offset of
//! `delay_children + i * stagger_delay`. Offsets are non-decreasing in child
//! index; callers must render children in the order they were scheduled.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use unveil_core::error::{ensure_non_negative, Result};

/// Per-child start offsets, in seconds
pub type Delays = SmallVec<[f32; 16]>;

/// Compute start offsets for `child_count` children.
///
/// Pure and idempotent. Inputs are assumed validated (non-negative); see
/// [`StaggerGroup::new`].
pub fn schedule(child_count: usize, stagger_delay: f32, delay_children: f32) -> Delays {
    (0..child_count)
        .map(|i| delay_children + i as f32 * stagger_delay)
        .collect()
}

/// Stagger configuration shared by the children of one group
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StaggerGroup {
    /// Delay between each child's start, in seconds
    pub stagger_delay: f32,
    /// Delay applied once before the first child, in seconds
    pub delay_children: f32,
}

impl Default for StaggerGroup {
    fn default() -> Self {
        Self {
            stagger_delay: 0.1,
            delay_children: 0.0,
        }
    }
}

impl StaggerGroup {
    pub fn new(stagger_delay: f32, delay_children: f32) -> Result<Self> {
        let group = Self {
            stagger_delay,
            delay_children,
        };
        group.validate()?;
        Ok(group)
    }

    pub fn validate(&self) -> Result<()> {
        ensure_non_negative("stagger_delay", self.stagger_delay)?;
        ensure_non_negative("delay_children", self.delay_children)
    }

    /// Start offset of a single child
    pub fn delay_for_index(&self, index: usize) -> f32 {
        self.delay_children + index as f32 * self.stagger_delay
    }

    pub fn schedule(&self, child_count: usize) -> Delays {
        schedule(child_count, self.stagger_delay, self.delay_children)
    }

    /// Time at which the last child starts
    pub fn total_delay(&self, child_count: usize) -> f32 {
        match child_count {
            0 => 0.0,
            n => self.delay_for_index(n - 1),
        }
    }
}
