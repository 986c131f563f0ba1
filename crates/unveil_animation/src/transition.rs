//! Transition specifications

use serde::{Deserialize, Serialize};
use unveil_core::error::{ensure_non_negative, ensure_positive, ensure_unit, Result};

use crate::easing::Easing;
use crate::spring::SpringConfig;

/// How a value travels from its start to its target
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum Curve {
    /// Fixed-duration eased curve
    Ease { easing: Easing },
    /// Spring with explicit physical parameters; the duration is ignored
    Spring(SpringConfig),
    /// Spring derived from the transition duration and a bounce amount
    SpringDuration { bounce: f32 },
}

impl Default for Curve {
    fn default() -> Self {
        Curve::Ease {
            easing: Easing::EASE,
        }
    }
}

/// Timing for a single transition
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TransitionSpec {
    /// Duration in seconds
    pub duration: f32,
    /// Delay before the transition starts, in seconds
    pub delay: f32,
    pub curve: Curve,
}

impl Default for TransitionSpec {
    fn default() -> Self {
        Self {
            duration: 0.6,
            delay: 0.0,
            curve: Curve::default(),
        }
    }
}

impl TransitionSpec {
    /// Eased transition
    pub fn ease(duration: f32, easing: Easing) -> Self {
        Self {
            duration,
            delay: 0.0,
            curve: Curve::Ease { easing },
        }
    }

    /// Physical spring
    pub fn spring(config: SpringConfig) -> Self {
        Self {
            duration: 0.5,
            delay: 0.0,
            curve: Curve::Spring(config),
        }
    }

    /// Spring that completes in roughly `duration` seconds
    pub fn spring_duration(duration: f32, bounce: f32) -> Self {
        Self {
            duration,
            delay: 0.0,
            curve: Curve::SpringDuration { bounce },
        }
    }

    /// Set the delay before the transition starts
    pub fn with_delay(mut self, delay: f32) -> Self {
        self.delay = delay;
        self
    }

    /// Set the duration
    pub fn with_duration(mut self, duration: f32) -> Self {
        self.duration = duration;
        self
    }

    pub fn validate(&self) -> Result<()> {
        ensure_positive("duration", self.duration)?;
        ensure_non_negative("delay", self.delay)?;
        match self.curve {
            Curve::Ease { easing } => easing.validate(),
            Curve::Spring(config) => config.validate(),
            Curve::SpringDuration { bounce } => ensure_unit("bounce", bounce),
        }
    }

    /// Spring parameters when the curve is spring-driven
    pub fn spring_config(&self) -> Result<Option<SpringConfig>> {
        match self.curve {
            Curve::Ease { .. } => Ok(None),
            Curve::Spring(config) => Ok(Some(config)),
            Curve::SpringDuration { bounce } => {
                SpringConfig::from_duration(self.duration, bounce).map(Some)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use unveil_core::UnveilError;

    #[test]
    fn test_validate_rejects_negative_timing() {
        assert!(TransitionSpec::default().validate().is_ok());
        assert!(TransitionSpec::ease(0.0, Easing::Linear).validate().is_err());
        assert!(TransitionSpec::ease(-1.0, Easing::Linear).validate().is_err());
        assert!(TransitionSpec::default().with_delay(-0.1).validate().is_err());
        assert!(TransitionSpec::spring_duration(1.0, 2.0).validate().is_err());
    }

    #[test]
    fn test_validate_rejects_invalid_bezier() {
        let overshoot = TransitionSpec::ease(1.0, Easing::CubicBezier(0.5, -0.8, 0.5, 1.8));
        assert!(matches!(
            overshoot.validate(),
            Err(UnveilError::Configuration { field: "easing.y1", .. })
        ));

        let nan = TransitionSpec::ease(1.0, Easing::CubicBezier(f32::NAN, 0.0, 0.58, 1.0));
        assert!(nan.validate().is_err());
        assert!(TransitionSpec::ease(1.0, Easing::EASE).validate().is_ok());
    }

    #[test]
    fn test_spring_config_resolution() {
        assert_eq!(TransitionSpec::default().spring_config().unwrap(), None);

        let explicit = SpringConfig::new(200.0, 12.0, 1.0);
        assert_eq!(
            TransitionSpec::spring(explicit).spring_config().unwrap(),
            Some(explicit)
        );

        let derived = TransitionSpec::spring_duration(2.0, 0.0)
            .spring_config()
            .unwrap()
            .unwrap();
        assert!(derived.is_overshoot_free());
    }
}
