//! Visibility observation
//!
//! Turns a stream of intersection ratios into discrete in-view / out-of-view
//! notifications. Each observer owns its own state and only reads the shared
//! viewport signal, so any number of observers can be evaluated per frame
//! without coordination.

use serde::{Deserialize, Serialize};

use crate::error::{ensure_unit, Result};
use crate::viewport::{intersection_ratio, Rect, RootMargin};

/// Options controlling when a region counts as "in view"
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ObserveOptions {
    /// Fraction of the region that must be visible (0.0 to 1.0)
    pub threshold: f32,
    /// Expansion (or contraction) of the viewport test area
    pub root_margin: RootMargin,
    /// Stop reacting after the first time the region comes into view
    pub once: bool,
}

impl Default for ObserveOptions {
    fn default() -> Self {
        Self {
            threshold: 0.1,
            root_margin: RootMargin::ZERO,
            once: true,
        }
    }
}

impl ObserveOptions {
    pub fn new(threshold: f32) -> Self {
        Self {
            threshold,
            ..Self::default()
        }
    }

    pub fn once(mut self, once: bool) -> Self {
        self.once = once;
        self
    }

    pub fn root_margin(mut self, margin: RootMargin) -> Self {
        self.root_margin = margin;
        self
    }

    pub fn validate(&self) -> Result<()> {
        ensure_unit("threshold", self.threshold)
    }
}

/// Notification emitted when the observed region crosses the threshold
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum VisibilityChange {
    Entered,
    Exited,
}

impl VisibilityChange {
    pub fn is_visible(&self) -> bool {
        matches!(self, VisibilityChange::Entered)
    }
}

/// Watches a region against the viewport
#[derive(Clone, Debug)]
pub struct VisibilityObserver {
    options: ObserveOptions,
    is_visible: bool,
    has_triggered: bool,
}

impl VisibilityObserver {
    /// Create an observer, rejecting thresholds outside `[0, 1]`
    pub fn new(options: ObserveOptions) -> Result<Self> {
        options.validate()?;
        Ok(Self {
            options,
            is_visible: false,
            has_triggered: false,
        })
    }

    pub fn options(&self) -> &ObserveOptions {
        &self.options
    }

    pub fn is_visible(&self) -> bool {
        self.is_visible
    }

    pub fn has_triggered(&self) -> bool {
        self.has_triggered
    }

    /// Whether further ratios can still change the visibility
    pub fn is_active(&self) -> bool {
        !(self.options.once && self.has_triggered)
    }

    /// Feed the current intersection ratio.
    ///
    /// Returns a change only when the in-view state actually flips. Once a
    /// `once` observer has triggered it ignores all further input.
    pub fn observe(&mut self, ratio: f32) -> Option<VisibilityChange> {
        if !self.is_active() {
            return None;
        }

        let in_view = self.meets_threshold(ratio);
        if in_view == self.is_visible {
            return None;
        }

        self.is_visible = in_view;
        if in_view {
            self.has_triggered = true;
            tracing::trace!(ratio, once = self.options.once, "region entered viewport");
            Some(VisibilityChange::Entered)
        } else {
            tracing::trace!(ratio, "region left viewport");
            Some(VisibilityChange::Exited)
        }
    }

    /// Compute the ratio from geometry and feed it
    pub fn observe_rect(&mut self, region: &Rect, viewport: &Rect) -> Option<VisibilityChange> {
        let ratio = intersection_ratio(region, viewport, &self.options.root_margin);
        self.observe(ratio)
    }

    fn meets_threshold(&self, ratio: f32) -> bool {
        if !ratio.is_finite() {
            return false;
        }
        if self.options.threshold <= 0.0 {
            ratio > 0.0
        } else {
            ratio >= self.options.threshold
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_bad_threshold() {
        assert!(VisibilityObserver::new(ObserveOptions::new(1.5)).is_err());
        assert!(VisibilityObserver::new(ObserveOptions::new(-0.01)).is_err());
        assert!(VisibilityObserver::new(ObserveOptions::new(0.0)).is_ok());
        assert!(VisibilityObserver::new(ObserveOptions::new(1.0)).is_ok());
    }

    #[test]
    fn test_once_pins_visible() {
        let mut observer = VisibilityObserver::new(ObserveOptions::new(0.3).once(true)).unwrap();

        assert_eq!(observer.observe(0.1), None);
        assert!(!observer.is_visible());

        assert_eq!(observer.observe(0.5), Some(VisibilityChange::Entered));
        assert!(observer.is_visible());
        assert!(observer.has_triggered());

        for ratio in [0.0, 0.2, 0.9, 0.0] {
            assert_eq!(observer.observe(ratio), None);
            assert!(observer.is_visible());
        }
        assert!(!observer.is_active());
    }

    #[test]
    fn test_repeatable_toggles_both_ways() {
        let mut observer = VisibilityObserver::new(ObserveOptions::new(0.5).once(false)).unwrap();

        assert_eq!(observer.observe(0.6), Some(VisibilityChange::Entered));
        assert_eq!(observer.observe(0.7), None);
        assert_eq!(observer.observe(0.4), Some(VisibilityChange::Exited));
        assert!(!observer.is_visible());
        assert_eq!(observer.observe(0.3), None);
        assert_eq!(observer.observe(0.5), Some(VisibilityChange::Entered));
        assert!(observer.is_visible());
    }

    #[test]
    fn test_zero_threshold_needs_some_overlap() {
        let mut observer = VisibilityObserver::new(ObserveOptions::new(0.0).once(false)).unwrap();
        assert_eq!(observer.observe(0.0), None);
        assert_eq!(observer.observe(0.01), Some(VisibilityChange::Entered));
        assert_eq!(observer.observe(0.0), Some(VisibilityChange::Exited));
    }

    #[test]
    fn test_observe_rect() {
        let mut observer = VisibilityObserver::new(ObserveOptions::new(0.5)).unwrap();
        let viewport = Rect::new(0.0, 0.0, 800.0, 600.0);

        assert_eq!(observer.observe_rect(&Rect::new(0.0, 700.0, 100.0, 100.0), &viewport), None);
        assert_eq!(
            observer.observe_rect(&Rect::new(0.0, 500.0, 100.0, 100.0), &viewport),
            Some(VisibilityChange::Entered)
        );
    }

    #[test]
    fn test_nan_ratio_is_out_of_view() {
        let mut observer = VisibilityObserver::new(ObserveOptions::new(0.1).once(false)).unwrap();
        assert_eq!(observer.observe(f32::NAN), None);
        assert!(!observer.is_visible());
    }
}
