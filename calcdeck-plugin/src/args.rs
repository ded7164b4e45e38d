//! Argument extraction shared by function libraries

use calcdeck_core::{ToolError, Value, parse_input};

/// Fail with ARG_COUNT unless at least `expected` arguments were passed
pub fn require_args(args: &[Value], func: &str, expected: usize) -> Result<(), ToolError> {
    if args.len() < expected {
        return Err(ToolError::arg_count(func, expected, args.len()));
    }
    Ok(())
}

/// Extract a finite number. Numeric text is accepted the way a form field
/// would be parsed.
pub fn extract_number(value: &Value, func: &str, arg: &str) -> Result<f64, ToolError> {
    match value {
        Value::Number(n) if n.is_finite() => Ok(*n),
        Value::Number(n) => Err(ToolError::invalid_input(format!(
            "{}() argument '{}' must be finite, got {}", func, arg, n
        ))),
        Value::Text(s) => parse_input(s).map_err(|e| ToolError::from(e).in_function(func)),
        Value::Null => Err(ToolError::arg_type(func, arg, "Number", "Null")),
        Value::Error(e) => Err(e.clone()),
        other => Err(ToolError::arg_type(func, arg, "Number", other.type_name())),
    }
}

pub fn extract_text<'a>(value: &'a Value, func: &str, arg: &str) -> Result<&'a str, ToolError> {
    match value {
        Value::Text(s) => Ok(s),
        Value::Error(e) => Err(e.clone()),
        other => Err(ToolError::arg_type(func, arg, "Text", other.type_name())),
    }
}

/// Optional text argument; missing or null yields `None`
pub fn extract_optional_text<'a>(args: &'a [Value], index: usize, func: &str, arg: &str) -> Result<Option<&'a str>, ToolError> {
    match args.get(index) {
        None | Some(Value::Null) => Ok(None),
        Some(v) => extract_text(v, func, arg).map(Some),
    }
}

/// Optional boolean flag with default
pub fn extract_bool_or_default(args: &[Value], index: usize, default: bool, func: &str, arg: &str) -> Result<bool, ToolError> {
    match args.get(index) {
        None | Some(Value::Null) => Ok(default),
        Some(Value::Bool(b)) => Ok(*b),
        Some(Value::Error(e)) => Err(e.clone()),
        Some(other) => Err(ToolError::arg_type(func, arg, "Bool", other.type_name())),
    }
}

/// Extract numbers from a list value
pub fn extract_numbers_from_list(value: &Value, func: &str, arg: &str) -> Result<Vec<f64>, ToolError> {
    match value {
        Value::List(items) => {
            let mut numbers = Vec::with_capacity(items.len());
            for (i, item) in items.iter().enumerate() {
                numbers.push(extract_number(item, func, &format!("{}[{}]", arg, i))?);
            }
            Ok(numbers)
        }
        Value::Error(e) => Err(e.clone()),
        other => Err(ToolError::arg_type(func, arg, "List<Number>", other.type_name())),
    }
}
