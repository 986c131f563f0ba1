//! Error types

use thiserror::Error;

/// Errors raised while configuring reveal and ambient instances.
///
/// Playback itself never fails: interpolation mismatches and ticks that
/// arrive after teardown are absorbed where they happen. Only configuration
/// is rejected, and it is rejected before an instance starts.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum UnveilError {
    /// A numeric or textual option is outside its valid domain
    #[error("invalid configuration for `{field}`: {reason}")]
    Configuration {
        field: &'static str,
        reason: String,
    },

    /// A configuration document could not be parsed
    #[error("config error: {0}")]
    Config(String),
}

impl UnveilError {
    /// Shorthand for a [`UnveilError::Configuration`] error
    pub fn config(field: &'static str, reason: impl Into<String>) -> Self {
        UnveilError::Configuration {
            field,
            reason: reason.into(),
        }
    }
}

/// Result type for unveil operations
pub type Result<T> = std::result::Result<T, UnveilError>;

/// Reject values outside `[0, 1]` (including NaN)
pub fn ensure_unit(field: &'static str, value: f32) -> Result<()> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(UnveilError::config(
            field,
            format!("expected a value in [0, 1], got {value}"),
        ))
    }
}

/// Reject negative or non-finite values
pub fn ensure_non_negative(field: &'static str, value: f32) -> Result<()> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(UnveilError::config(
            field,
            format!("expected a finite value >= 0, got {value}"),
        ))
    }
}

/// Reject zero, negative or non-finite values
pub fn ensure_positive(field: &'static str, value: f32) -> Result<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(UnveilError::config(
            field,
            format!("expected a finite value > 0, got {value}"),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unit_range() {
        assert!(ensure_unit("threshold", 0.0).is_ok());
        assert!(ensure_unit("threshold", 1.0).is_ok());
        assert!(ensure_unit("threshold", 1.01).is_err());
        assert!(ensure_unit("threshold", -0.1).is_err());
        assert!(ensure_unit("threshold", f32::NAN).is_err());
    }

    #[test]
    fn test_error_message_names_field() {
        let err = ensure_positive("duration", 0.0).unwrap_err();
        assert!(err.to_string().contains("`duration`"));
    }
}
