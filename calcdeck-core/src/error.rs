//! Structured errors for tool callers
//!
//! Errors never crash a calculation. They are values returned to the
//! caller with a machine-readable code and, where useful, a suggestion.

use crate::CalcError;
use serde::{Deserialize, Serialize};

/// Standard error codes (machine-readable)
pub mod codes {
    pub const INVALID_INPUT: &str = "INVALID_INPUT";
    pub const DIV_ZERO: &str = "DIV_ZERO";
    pub const UNKNOWN_UNIT: &str = "UNKNOWN_UNIT";
    pub const UNKNOWN_CATEGORY: &str = "UNKNOWN_CATEGORY";
    pub const UNKNOWN_OPERATION: &str = "UNKNOWN_OPERATION";
    pub const UNKNOWN_SCALE: &str = "UNKNOWN_SCALE";
    pub const UNDEFINED_FUNC: &str = "UNDEFINED_FUNC";
    pub const ARG_COUNT: &str = "ARG_COUNT";
    pub const ARG_TYPE: &str = "ARG_TYPE";
    pub const INTERNAL: &str = "INTERNAL";
}

/// Severity level of an error
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Calculation continued with a degraded result
    Warning,
    /// Calculation produced no result
    Error,
    /// The host cannot continue
    Fatal,
}

/// Structured error returned across the plugin boundary
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolError {
    /// Machine-readable error code
    pub code: String,

    /// Human-readable error message
    pub message: String,

    /// Suggestion for fixing the error
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggestion: Option<String>,

    /// Function that produced the error
    #[serde(skip_serializing_if = "Option::is_none")]
    pub function: Option<String>,

    pub severity: Severity,
}

impl ToolError {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            suggestion: None,
            function: None,
            severity: Severity::Error,
        }
    }

    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }

    pub fn in_function(mut self, function: impl Into<String>) -> Self {
        self.function = Some(function.into());
        self
    }

    pub fn with_severity(mut self, severity: Severity) -> Self {
        self.severity = severity;
        self
    }

    // ========== Common Error Constructors ==========

    pub fn invalid_input(details: impl Into<String>) -> Self {
        Self::new(codes::INVALID_INPUT, format!("Invalid input: {}", details.into()))
    }

    pub fn div_zero() -> Self {
        Self::new(codes::DIV_ZERO, "Division by zero")
            .with_suggestion("The divisor must be non-zero")
    }

    pub fn undefined_func(name: &str) -> Self {
        Self::new(codes::UNDEFINED_FUNC, format!("Unknown function: {}", name))
            .with_suggestion("Use list_functions to see what is available")
    }

    pub fn arg_count(func: &str, expected: usize, got: usize) -> Self {
        Self::new(codes::ARG_COUNT,
            format!("{}() expects {} arguments, got {}", func, expected, got))
            .with_suggestion(format!("Use help('{}') for usage", func))
    }

    pub fn arg_type(func: &str, arg: &str, expected: &str, got: &str) -> Self {
        Self::new(codes::ARG_TYPE,
            format!("{}() argument '{}': expected {}, got {}", func, arg, expected, got))
    }
}

impl std::fmt::Display for ToolError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {}", self.code, self.message)?;
        if let Some(ref suggestion) = self.suggestion {
            write!(f, " (suggestion: {})", suggestion)?;
        }
        Ok(())
    }
}

impl std::error::Error for ToolError {}

impl From<CalcError> for ToolError {
    fn from(err: CalcError) -> Self {
        match err {
            CalcError::InvalidInput(s) => Self::invalid_input(s),
            CalcError::DivisionByZero => Self::div_zero(),
            CalcError::UnknownUnit { unit, category } => Self::new(
                codes::UNKNOWN_UNIT,
                format!("Unknown unit '{}' for category {}", unit, category),
            )
            .with_suggestion(format!("Use list_units('{}') to see valid units", category)),
            CalcError::UnknownCategory(c) => Self::new(
                codes::UNKNOWN_CATEGORY,
                format!("Unknown category: {}", c),
            )
            .with_suggestion("Use categories() to see valid categories"),
            CalcError::UnknownOperation(op) => Self::new(
                codes::UNKNOWN_OPERATION,
                format!("Unknown operation: {}", op),
            ),
            CalcError::UnknownScale(s) => Self::new(
                codes::UNKNOWN_SCALE,
                format!("Unknown GPA scale: {}", s),
            )
            .with_suggestion("Use 4, 5 or 10"),
        }
    }
}
