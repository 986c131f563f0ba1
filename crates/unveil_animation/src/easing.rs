//! Easing functions for fixed-duration transitions

use serde::{Deserialize, Serialize};
use unveil_core::error::{ensure_unit, Result};

/// Easing function type
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Easing {
    #[default]
    Linear,
    EaseIn,
    EaseOut,
    EaseInOut,
    EaseInQuad,
    EaseOutQuad,
    EaseInOutQuad,
    EaseInCubic,
    EaseOutCubic,
    EaseInOutCubic,
    EaseInQuart,
    EaseOutQuart,
    EaseInOutQuart,
    CubicBezier(f32, f32, f32, f32),
}

impl Easing {
    /// CSS `ease`: `cubic-bezier(0.25, 0.1, 0.25, 1)`, the reveal default
    pub const EASE: Easing = Easing::CubicBezier(0.25, 0.1, 0.25, 1.0);

    /// Apply the easing function to a progress value (0.0 to 1.0).
    ///
    /// Progress outside the unit range is clamped, so every curve maps
    /// `0 -> 0` and `1 -> 1`.
    pub fn apply(&self, t: f32) -> f32 {
        if t.is_nan() || t <= 0.0 {
            return 0.0;
        }
        if t >= 1.0 {
            return 1.0;
        }

        match *self {
            Easing::Linear => t,
            Easing::EaseInQuad => ease_in(t, 2),
            Easing::EaseOutQuad => ease_out(t, 2),
            Easing::EaseInOutQuad => ease_in_out(t, 2),
            Easing::EaseIn | Easing::EaseInCubic => ease_in(t, 3),
            Easing::EaseOut | Easing::EaseOutCubic => ease_out(t, 3),
            Easing::EaseInOut | Easing::EaseInOutCubic => ease_in_out(t, 3),
            Easing::EaseInQuart => ease_in(t, 4),
            Easing::EaseOutQuart => ease_out(t, 4),
            Easing::EaseInOutQuart => ease_in_out(t, 4),
            Easing::CubicBezier(x1, y1, x2, y2) => UnitBezier::new(x1, y1, x2, y2).solve(t),
        }
    }

    /// Check that the curve maps `[0, 1]` monotonically onto `[0, 1]`.
    ///
    /// Bezier control points must be finite and inside the unit square;
    /// `back`-style curves that overshoot are rejected.
    pub fn validate(&self) -> Result<()> {
        if let Easing::CubicBezier(x1, y1, x2, y2) = *self {
            ensure_unit("easing.x1", x1)?;
            ensure_unit("easing.y1", y1)?;
            ensure_unit("easing.x2", x2)?;
            ensure_unit("easing.y2", y2)?;
        }
        Ok(())
    }
}

fn ease_in(t: f32, power: i32) -> f32 {
    t.powi(power)
}

fn ease_out(t: f32, power: i32) -> f32 {
    1.0 - (1.0 - t).powi(power)
}

/// Accelerate through the first half, mirror for the second
fn ease_in_out(t: f32, power: i32) -> f32 {
    if t < 0.5 {
        ease_in(2.0 * t, power) / 2.0
    } else {
        1.0 - ease_in(2.0 - 2.0 * t, power) / 2.0
    }
}

/// CSS `cubic-bezier()` with endpoints fixed at (0, 0) and (1, 1).
///
/// Polynomial coefficients are precomputed in f64 so the solver stays smooth
/// at high frame rates.
struct UnitBezier {
    ax: f64,
    bx: f64,
    cx: f64,
    ay: f64,
    by: f64,
    cy: f64,
}

impl UnitBezier {
    fn new(x1: f32, y1: f32, x2: f32, y2: f32) -> Self {
        // x control points outside [0, 1] would make x(p) non-monotonic
        let (x1, x2) = ((x1 as f64).clamp(0.0, 1.0), (x2 as f64).clamp(0.0, 1.0));
        let (y1, y2) = (y1 as f64, y2 as f64);

        let cx = 3.0 * x1;
        let bx = 3.0 * (x2 - x1) - cx;
        let cy = 3.0 * y1;
        let by = 3.0 * (y2 - y1) - cy;

        Self {
            ax: 1.0 - cx - bx,
            bx,
            cx,
            ay: 1.0 - cy - by,
            by,
            cy,
        }
    }

    fn x(&self, p: f64) -> f64 {
        ((self.ax * p + self.bx) * p + self.cx) * p
    }

    fn y(&self, p: f64) -> f64 {
        ((self.ay * p + self.by) * p + self.cy) * p
    }

    fn dx(&self, p: f64) -> f64 {
        (3.0 * self.ax * p + 2.0 * self.bx) * p + self.cx
    }

    /// Find `p` with `x(p) == x`: a few Newton steps, then bisection
    fn param_for(&self, x: f64) -> f64 {
        const EPSILON: f64 = 1e-7;

        let mut p = x;
        for _ in 0..8 {
            let err = self.x(p) - x;
            if err.abs() < EPSILON {
                return p;
            }
            let slope = self.dx(p);
            if slope.abs() < EPSILON {
                break;
            }
            p -= err / slope;
        }

        let (mut lo, mut hi) = (0.0_f64, 1.0_f64);
        p = x;
        for _ in 0..30 {
            let err = self.x(p) - x;
            if err.abs() < EPSILON {
                break;
            }
            if err < 0.0 {
                lo = p;
            } else {
                hi = p;
            }
            p = 0.5 * (lo + hi);
        }
        p
    }

    fn solve(&self, t: f32) -> f32 {
        self.y(self.param_for(t as f64)) as f32
    }
}
