//! Calcdeck Core - Fundamental types
//!
//! This crate provides the core types used throughout Calcdeck:
//! - `Value`: Runtime values (numbers, text, objects, errors)
//! - `CalcError`: Typed failures reported by the calculators
//! - `ToolError`: Structured errors for callers of tool functions

mod input;
mod value;
mod error;

pub use input::{CalcError, ensure_finite, parse_input};
pub use value::Value;
pub use error::{ToolError, Severity, codes};

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::{CalcError, Value, ToolError, Severity};
    pub use crate::error::codes;
}
