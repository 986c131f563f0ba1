//! Per-instance pseudo-random numbers for ambient layouts
//!
//! Each generator call creates its own [`LayoutRng`]; nothing is shared
//! between instances. Fresh generators are seeded from the system clock mixed
//! with a process-wide counter, so two layouts built in the same instant still
//! differ.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

static SEED_COUNTER: AtomicU64 = AtomicU64::new(0);

const GOLDEN_GAMMA: u64 = 0x9E37_79B9_7F4A_7C15;

/// SplitMix64 generator
#[derive(Clone, Debug)]
pub struct LayoutRng {
    state: u64,
}

impl LayoutRng {
    /// Deterministic generator for reproducible layouts
    pub fn seeded(seed: u64) -> Self {
        Self { state: seed }
    }

    /// Generator with a seed that differs on every call
    pub fn fresh() -> Self {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_nanos() as u64)
            .unwrap_or(0);
        let count = SEED_COUNTER.fetch_add(1, Ordering::Relaxed);
        Self::seeded(nanos ^ count.wrapping_mul(GOLDEN_GAMMA).rotate_left(17))
    }

    /// `seed` when given, otherwise [`LayoutRng::fresh`]
    pub fn from_seed(seed: Option<u64>) -> Self {
        seed.map_or_else(Self::fresh, Self::seeded)
    }

    pub fn next_u64(&mut self) -> u64 {
        self.state = self.state.wrapping_add(GOLDEN_GAMMA);
        let mut z = self.state;
        z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
        z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
        z ^ (z >> 31)
    }

    /// Uniform in `[0, 1)`
    pub fn next_f32(&mut self) -> f32 {
        // top 24 bits fill the f32 mantissa exactly
        (self.next_u64() >> 40) as f32 / (1u64 << 24) as f32
    }

    /// Uniform in `[min, max]`; returns `min` when the range is empty
    pub fn range(&mut self, min: f32, max: f32) -> f32 {
        if max <= min {
            return min;
        }
        (min + self.next_f32() * (max - min)).min(max)
    }
}
