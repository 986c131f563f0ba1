//! Count-up numbers
//!
//! A [`CountUp`] waits until its region scrolls into view, then springs from
//! `from` to `to` with no overshoot. Every in-flight value is formatted with
//! [`NumberFormat`], so the renderer only ever sees display strings.

use serde::{Deserialize, Serialize};
use unveil_core::error::{ensure_unit, Result};
use unveil_core::{ObserveOptions, Rect, UnveilError, VisibilityChange, VisibilityObserver};

use crate::spring::{Spring, SpringConfig};

/// Largest supported number of decimal places
pub const MAX_DECIMALS: u32 = 10;

/// Fixed-point display with literal prefix and suffix
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NumberFormat {
    pub prefix: String,
    pub suffix: String,
    pub decimals: u32,
}

impl NumberFormat {
    pub fn new(decimals: u32) -> Self {
        Self {
            decimals,
            ..Default::default()
        }
    }

    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = prefix.into();
        self
    }

    pub fn with_suffix(mut self, suffix: impl Into<String>) -> Self {
        self.suffix = suffix.into();
        self
    }

    pub fn format(&self, value: f32) -> String {
        let decimals = self.decimals.min(MAX_DECIMALS) as usize;
        let mut number = format!("{:.*}", decimals, value);
        // a value that rounds to zero shouldn't print as "-0"
        if number.starts_with('-') && number[1..].bytes().all(|b| b == b'0' || b == b'.') {
            number.remove(0);
        }
        format!("{}{}{}", self.prefix, number, self.suffix)
    }

    /// Smallest change visible at this precision
    pub fn resolution(&self) -> f32 {
        10f32.powi(-(self.decimals.min(MAX_DECIMALS) as i32))
    }
}

/// Count-up options
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CountUpConfig {
    pub from: f32,
    pub to: f32,
    /// Approximate seconds to settle
    pub duration: f32,
    #[serde(flatten)]
    pub format: NumberFormat,
    pub threshold: f32,
    pub once: bool,
    pub bounce: f32,
}

impl Default for CountUpConfig {
    fn default() -> Self {
        Self {
            from: 0.0,
            to: 0.0,
            duration: 2.0,
            format: NumberFormat::default(),
            threshold: 0.3,
            once: true,
            bounce: 0.0,
        }
    }
}

impl CountUpConfig {
    pub fn new(to: f32) -> Self {
        Self {
            to,
            ..Default::default()
        }
    }

    pub fn validate(&self) -> Result<()> {
        if !self.from.is_finite() || !self.to.is_finite() {
            return Err(UnveilError::config("to", "endpoints must be finite"));
        }
        if self.format.decimals > MAX_DECIMALS {
            return Err(UnveilError::config(
                "decimals",
                format!("must be at most {MAX_DECIMALS}, got {}", self.format.decimals),
            ));
        }
        ensure_unit("threshold", self.threshold)?;
        // duration and bounce are checked when the spring is derived
        SpringConfig::from_duration(self.duration, self.bounce).map(|_| ())
    }

    /// Spring tuned to settle within the display precision
    pub fn spring_config(&self) -> Result<SpringConfig> {
        let resolution = self.format.resolution();
        Ok(SpringConfig::from_duration(self.duration, self.bounce)?
            .with_rest(resolution * 0.5, resolution))
    }
}

/// An animated counter that starts the first time it scrolls into view
#[derive(Clone, Debug)]
pub struct CountUp {
    observer: VisibilityObserver,
    spring: Spring,
    format: NumberFormat,
    to: f32,
    started: bool,
}

impl CountUp {
    pub fn new(config: CountUpConfig) -> Result<Self> {
        config.validate()?;

        let observer = VisibilityObserver::new(
            ObserveOptions::new(config.threshold).once(config.once),
        )?;
        let spring = Spring::new(config.spring_config()?, config.from);

        Ok(Self {
            observer,
            spring,
            format: config.format,
            to: config.to,
            started: false,
        })
    }

    /// Feed the current intersection ratio of the counter's region
    pub fn set_intersection(&mut self, ratio: f32) -> bool {
        let entered = self.observer.observe(ratio) == Some(VisibilityChange::Entered);
        if entered {
            self.start();
        }
        entered
    }

    pub fn observe_rect(&mut self, region: &Rect, viewport: &Rect) -> bool {
        let change = self.observer.observe_rect(region, viewport);
        let entered = change == Some(VisibilityChange::Entered);
        if entered {
            self.start();
        }
        entered
    }

    /// Begin counting. Only the first call has an effect; leaving and
    /// re-entering the viewport never restarts the count.
    pub fn start(&mut self) {
        if self.started {
            return;
        }
        self.started = true;
        tracing::debug!(from = self.spring.value(), to = self.to, "count-up started");
        self.spring.set_target(self.to);
    }

    /// Advance by `dt` seconds. Returns whether the counter is still moving.
    pub fn tick(&mut self, dt: f32) -> bool {
        if !self.is_animating() {
            return false;
        }
        self.spring.step(dt);
        self.is_animating()
    }

    pub fn has_started(&self) -> bool {
        self.started
    }

    pub fn is_animating(&self) -> bool {
        self.started && !self.spring.is_settled()
    }

    pub fn is_settled(&self) -> bool {
        self.started && self.spring.is_settled()
    }

    pub fn value(&self) -> f32 {
        self.spring.value()
    }

    pub fn target(&self) -> f32 {
        self.to
    }

    pub fn format(&self) -> &NumberFormat {
        &self.format
    }

    /// Current value as display text
    pub fn display(&self) -> String {
        self.format.format(self.spring.value())
    }
}
