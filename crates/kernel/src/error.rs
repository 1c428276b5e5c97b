use thiserror::Error;

/// Errors from building gear specs and trains.
///
/// Every failure is a rejected input; nothing is partially constructed.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GearError {
    #[error("invalid parameter `{field}`: {value}")]
    InvalidParameter { field: &'static str, value: f64 },
}

impl GearError {
    pub(crate) fn invalid(field: &'static str, value: f64) -> Self {
        GearError::InvalidParameter { field, value }
    }

    /// Name of the rejected field.
    pub fn field(&self) -> &'static str {
        match self {
            GearError::InvalidParameter { field, .. } => *field,
        }
    }
}

/// Fails unless `value` is finite and strictly positive.
pub(crate) fn require_positive(field: &'static str, value: f64) -> Result<f64, GearError> {
    if value.is_finite() && value > 0.0 {
        Ok(value)
    } else {
        Err(GearError::invalid(field, value))
    }
}

/// Fails unless `value` is finite and not negative.
pub(crate) fn require_non_negative(field: &'static str, value: f64) -> Result<f64, GearError> {
    if value.is_finite() && value >= 0.0 {
        Ok(value)
    } else {
        Err(GearError::invalid(field, value))
    }
}

pub(crate) fn require_finite(field: &'static str, value: f64) -> Result<f64, GearError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(GearError::invalid(field, value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn message_names_field_and_value() {
        let err = GearError::invalid("radius", 0.0);
        assert_eq!(err.to_string(), "invalid parameter `radius`: 0");
        assert_eq!(err.field(), "radius");
    }

    #[test]
    fn positivity_rejects_zero_negative_and_nan() {
        assert!(require_positive("x", 0.0).is_err());
        assert!(require_positive("x", -1.0).is_err());
        assert!(require_positive("x", f64::NAN).is_err());
        assert_eq!(require_positive("x", 0.5), Ok(0.5));
        assert_eq!(require_non_negative("x", 0.0), Ok(0.0));
        assert!(require_finite("x", f64::INFINITY).is_err());
    }
}
