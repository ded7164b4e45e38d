//! Numeric input validation
//!
//! Engine functions take already-parsed `f64`s. The only checks they make
//! are the ones below: finiteness, and the handful of typed failures the
//! calculators can report.

use thiserror::Error;

/// Error type for engine calculations
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CalcError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Division by zero")]
    DivisionByZero,

    #[error("Unknown unit '{unit}' for category {category}")]
    UnknownUnit { unit: String, category: String },

    #[error("Unknown category: {0}")]
    UnknownCategory(String),

    #[error("Unknown operation: {0}")]
    UnknownOperation(String),

    #[error("Unknown scale: {0}")]
    UnknownScale(String),
}

impl CalcError {
    pub fn invalid(details: impl Into<String>) -> Self {
        CalcError::InvalidInput(details.into())
    }
}

/// Reject NaN and infinities, naming the offending argument.
pub fn ensure_finite(value: f64, arg: &str) -> Result<f64, CalcError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(CalcError::invalid(format!("{} must be a finite number, got {}", arg, value)))
    }
}

/// Parse a raw form string into a finite number.
///
/// Accepts surrounding whitespace and a single leading `+`. Thousands
/// separators are not accepted.
pub fn parse_input(raw: &str) -> Result<f64, CalcError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(CalcError::invalid("empty input"));
    }

    let parsed: f64 = trimmed
        .parse()
        .map_err(|_| CalcError::invalid(format!("'{}' is not a number", trimmed)))?;

    // "inf" and "NaN" parse successfully but are not usable inputs
    ensure_finite(parsed, "input")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_plain_numbers() {
        assert_eq!(parse_input("42"), Ok(42.0));
        assert_eq!(parse_input("  -3.5 "), Ok(-3.5));
        assert_eq!(parse_input("+7"), Ok(7.0));
        assert_eq!(parse_input("1.5e2"), Ok(150.0));
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(matches!(parse_input(""), Err(CalcError::InvalidInput(_))));
        assert!(matches!(parse_input("   "), Err(CalcError::InvalidInput(_))));
        assert!(matches!(parse_input("12abc"), Err(CalcError::InvalidInput(_))));
        assert!(matches!(parse_input("1,000"), Err(CalcError::InvalidInput(_))));
    }

    #[test]
    fn test_parse_rejects_non_finite() {
        assert!(parse_input("NaN").is_err());
        assert!(parse_input("inf").is_err());
        assert!(parse_input("-infinity").is_err());
    }

    #[test]
    fn test_ensure_finite() {
        assert_eq!(ensure_finite(0.0, "x"), Ok(0.0));
        let err = ensure_finite(f64::NAN, "value").unwrap_err();
        assert!(err.to_string().contains("value"));
    }
}
