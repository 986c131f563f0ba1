//! Spring physics
//!
//! Springs are stepped with the closed-form solution of the damped harmonic
//! oscillator, so any frame delta integrates exactly and large hitches
//! cannot destabilise the simulation. Springs at or above critical damping
//! are additionally clamped so they never cross their target.

use serde::{Deserialize, Serialize};
use unveil_core::error::{ensure_positive, ensure_unit, Result};

/// Displacement below which a spring may settle
pub const REST_DELTA: f32 = 0.001;
/// Speed below which a spring may settle
pub const REST_SPEED: f32 = 0.01;

/// Remaining fraction of the initial displacement at the end of a
/// duration-derived spring
const DURATION_ENVELOPE: f64 = 1e-4;

/// Damping ratios this close to 1.0 use the critically damped solution
const CRITICAL_BAND: f64 = 1e-3;

/// Configuration for spring physics
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpringConfig {
    pub stiffness: f32,
    pub damping: f32,
    pub mass: f32,
    /// Settle when closer than this to the target...
    pub rest_delta: f32,
    /// ...and slower than this
    pub rest_speed: f32,
}

impl Default for SpringConfig {
    fn default() -> Self {
        Self::new(100.0, 10.0, 1.0)
    }
}

impl SpringConfig {
    pub const fn new(stiffness: f32, damping: f32, mass: f32) -> Self {
        Self {
            stiffness,
            damping,
            mass,
            rest_delta: REST_DELTA,
            rest_speed: REST_SPEED,
        }
    }

    /// Quick response, slight overshoot
    pub const fn snappy() -> Self {
        Self::new(400.0, 30.0, 1.0)
    }

    /// Slow and soft, no overshoot
    pub const fn gentle() -> Self {
        Self::new(120.0, 21.908_903, 1.0)
    }

    /// Visible bounce
    pub const fn wobbly() -> Self {
        Self::new(180.0, 12.0, 1.0)
    }

    /// Critically damped spring for the given stiffness (unit mass)
    pub fn critical(stiffness: f32) -> Self {
        Self::new(stiffness, 2.0 * stiffness.max(0.0).sqrt(), 1.0)
    }

    /// Derive a spring that visually completes in `duration` seconds.
    ///
    /// `bounce` in `[0, 1]` maps to a damping ratio of `1 - bounce`; zero is
    /// critically damped and never overshoots. The natural frequency is
    /// chosen so the remaining displacement is 0.01% of the initial one
    /// at `duration`.
    pub fn from_duration(duration: f32, bounce: f32) -> Result<Self> {
        ensure_positive("duration", duration)?;
        ensure_unit("bounce", bounce)?;

        let duration = duration as f64;
        let ratio = (1.0 - bounce as f64).max(0.05);

        let omega = if ratio >= 1.0 - CRITICAL_BAND {
            critical_time_constant(DURATION_ENVELOPE) / duration
        } else {
            -DURATION_ENVELOPE.ln() / (ratio * duration)
        };

        let stiffness = omega * omega;
        let damping = 2.0 * ratio * stiffness.sqrt();
        Ok(Self::new(stiffness as f32, damping as f32, 1.0))
    }

    /// Override the settle thresholds
    pub fn with_rest(mut self, rest_delta: f32, rest_speed: f32) -> Self {
        self.rest_delta = rest_delta;
        self.rest_speed = rest_speed;
        self
    }

    pub fn validate(&self) -> Result<()> {
        ensure_positive("stiffness", self.stiffness)?;
        ensure_positive("mass", self.mass)?;
        ensure_positive("rest_delta", self.rest_delta)?;
        ensure_positive("rest_speed", self.rest_speed)?;
        if !(self.damping.is_finite() && self.damping >= 0.0) {
            return Err(unveil_core::UnveilError::config(
                "damping",
                format!("expected a finite value >= 0, got {}", self.damping),
            ));
        }
        Ok(())
    }

    /// `damping / (2 * sqrt(stiffness * mass))`
    pub fn damping_ratio(&self) -> f32 {
        let critical = 2.0 * (self.stiffness * self.mass).max(0.0).sqrt();
        if critical <= 0.0 {
            return f32::INFINITY;
        }
        self.damping / critical
    }

    /// Equivalent bounce: `1 - damping_ratio`, floored at zero
    pub fn bounce(&self) -> f32 {
        (1.0 - self.damping_ratio()).max(0.0)
    }

    /// Critically and over-damped springs approach their target monotonically
    pub fn is_overshoot_free(&self) -> bool {
        self.damping_ratio() as f64 >= 1.0 - CRITICAL_BAND
    }
}

/// Solve `(1 + x) e^-x = envelope` for `x` with Newton's method
fn critical_time_constant(envelope: f64) -> f64 {
    let mut x = 10.0_f64;
    for _ in 0..32 {
        let decay = (-x).exp();
        let f = (1.0 + x) * decay - envelope;
        let slope = -x * decay;
        if slope.abs() < f64::EPSILON {
            break;
        }
        let next = x - f / slope;
        if (next - x).abs() < 1e-9 {
            return next;
        }
        x = next.max(1e-3);
    }
    x
}

/// A spring-driven scalar
#[derive(Clone, Debug, PartialEq)]
pub struct Spring {
    config: SpringConfig,
    value: f32,
    velocity: f32,
    target: f32,
}

impl Spring {
    /// Create a spring resting at `initial`
    pub fn new(config: SpringConfig, initial: f32) -> Self {
        Self {
            config,
            value: initial,
            velocity: 0.0,
            target: initial,
        }
    }

    pub fn config(&self) -> &SpringConfig {
        &self.config
    }

    pub fn value(&self) -> f32 {
        self.value
    }

    pub fn velocity(&self) -> f32 {
        self.velocity
    }

    pub fn target(&self) -> f32 {
        self.target
    }

    /// Redirect toward a new target.
    ///
    /// Position and velocity carry over unchanged, so the value stays
    /// continuous at the instant of redirection.
    pub fn set_target(&mut self, target: f32) {
        if target != self.target {
            tracing::trace!(
                from = self.target,
                to = target,
                value = self.value,
                velocity = self.velocity,
                "spring retargeted"
            );
        }
        self.target = target;
    }

    /// Close enough to the target, and slow enough, to count as done
    pub fn is_settled(&self) -> bool {
        (self.value - self.target).abs() < self.config.rest_delta
            && self.velocity.abs() < self.config.rest_speed
    }

    /// Advance by `dt` seconds. Settled springs ignore the step.
    pub fn step(&mut self, dt: f32) {
        if dt.is_nan() || dt <= 0.0 || dt.is_infinite() {
            return;
        }
        if self.is_settled() {
            self.value = self.target;
            self.velocity = 0.0;
            return;
        }

        let x0 = (self.value - self.target) as f64;
        let v0 = self.velocity as f64;
        let (x, v) = solve(&self.config, x0, v0, dt as f64);

        let crossed = (x0 > 0.0 && x < 0.0) || (x0 < 0.0 && x > 0.0) || (x0 == 0.0 && x != 0.0);
        if crossed && self.config.is_overshoot_free() {
            self.value = self.target;
            self.velocity = 0.0;
            return;
        }

        self.value = self.target + x as f32;
        self.velocity = v as f32;

        if self.is_settled() {
            self.value = self.target;
            self.velocity = 0.0;
        }
    }
}

/// Displacement and velocity after `t` seconds, starting from `(x0, v0)`
/// relative to the target.
fn solve(config: &SpringConfig, x0: f64, v0: f64, t: f64) -> (f64, f64) {
    let k = config.stiffness as f64;
    let c = config.damping as f64;
    let m = config.mass as f64;

    let omega = (k / m).sqrt();
    let zeta = c / (2.0 * (k * m).sqrt());

    if (zeta - 1.0).abs() < CRITICAL_BAND {
        let decay = (-omega * t).exp();
        let b = v0 + omega * x0;
        let x = decay * (x0 + b * t);
        let v = decay * (v0 - omega * b * t);
        (x, v)
    } else if zeta < 1.0 {
        let omega_d = omega * (1.0 - zeta * zeta).sqrt();
        let decay = (-zeta * omega * t).exp();
        let (sin, cos) = (omega_d * t).sin_cos();
        let x = decay * (x0 * cos + (v0 + zeta * omega * x0) / omega_d * sin);
        let v = decay * (v0 * cos - (zeta * omega * v0 + omega * omega * x0) / omega_d * sin);
        (x, v)
    } else {
        let root = (zeta * zeta - 1.0).sqrt();
        let r1 = -omega * (zeta - root);
        let r2 = -omega * (zeta + root);
        let a = (v0 - r2 * x0) / (r1 - r2);
        let b = x0 - a;
        let (e1, e2) = ((r1 * t).exp(), (r2 * t).exp());
        (a * e1 + b * e2, r1 * a * e1 + r2 * b * e2)
    }
}
