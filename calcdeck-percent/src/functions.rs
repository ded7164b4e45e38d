//! Percentage calculator functions for Calcdeck

use std::collections::HashMap;
use calcdeck_plugin::prelude::*;
use crate::{PercentOp, PercentResult};

impl From<PercentResult> for Value {
    fn from(result: PercentResult) -> Self {
        let mut obj = HashMap::new();
        obj.insert("operation".to_string(), Value::from(result.operation.name()));
        obj.insert("a".to_string(), Value::Number(result.a));
        obj.insert("b".to_string(), Value::Number(result.b));
        obj.insert("result".to_string(), Value::Number(result.result));
        obj.insert("amount".to_string(), Value::Number(result.amount));
        obj.insert("formula".to_string(), Value::Text(result.formula));
        Value::Object(obj)
    }
}

fn run_op(op: PercentOp, args: &[Value], offset: usize, func: &str) -> Result<Value, ToolError> {
    require_args(args, func, offset + 2)?;
    let a = extract_number(&args[offset], func, "a")?;
    let b = extract_number(&args[offset + 1], func, "b")?;
    Ok(crate::calculate(op, a, b)?.into())
}

// ============ one function per operation ============

/// Registers a single operation under its own name
pub struct OpFunction(pub PercentOp);

static OF_ARGS: [ArgMeta; 2] = [
    ArgMeta::required("a", "Number", "Base value"),
    ArgMeta::required("b", "Number", "Percentage to take"),
];

static CHANGE_ARGS: [ArgMeta; 2] = [
    ArgMeta::required("a", "Number", "Original value (must not be zero)"),
    ArgMeta::required("b", "Number", "New value"),
];

static ADJUST_ARGS: [ArgMeta; 2] = [
    ArgMeta::required("a", "Number", "Base amount"),
    ArgMeta::required("b", "Number", "Percentage"),
];

static OF_EXAMPLES: [&str; 1] = ["percentage_of(200, 25) → {result: 50}"];
static CHANGE_EXAMPLES: [&str; 2] = [
    "percentage_change(50, 75) → {result: 50}",
    "percentage_change(0, 10) → #ERROR: DIV_ZERO",
];
static INCREASE_EXAMPLES: [&str; 1] = ["percentage_increase(80, 25) → {result: 100}"];
static DECREASE_EXAMPLES: [&str; 1] = ["percentage_decrease(80, 25) → {result: 60}"];
static TIP_EXAMPLES: [&str; 1] = ["tip(50, 15) → {result: 57.5, amount: 7.5}"];
static DISCOUNT_EXAMPLES: [&str; 1] = ["discount(50, 15) → {result: 42.5, amount: 7.5}"];

static OP_RELATED: [&str; 1] = ["percent"];

impl FunctionPlugin for OpFunction {
    fn meta(&self) -> FunctionMeta {
        let (name, description, usage, args, examples): (_, _, _, &'static [ArgMeta], &'static [&'static str]) = match self.0 {
            PercentOp::PercentageOf => (
                "percentage_of",
                "b% of a: a × b / 100",
                "percentage_of(a, b)",
                &OF_ARGS,
                &OF_EXAMPLES,
            ),
            PercentOp::PercentageChange => (
                "percentage_change",
                "Relative change from a to b in percent: (b - a) / a × 100",
                "percentage_change(a, b)",
                &CHANGE_ARGS,
                &CHANGE_EXAMPLES,
            ),
            PercentOp::PercentageIncrease => (
                "percentage_increase",
                "Increase a by b percent: a + a × b / 100",
                "percentage_increase(a, b)",
                &ADJUST_ARGS,
                &INCREASE_EXAMPLES,
            ),
            PercentOp::PercentageDecrease => (
                "percentage_decrease",
                "Decrease a by b percent: a - a × b / 100",
                "percentage_decrease(a, b)",
                &ADJUST_ARGS,
                &DECREASE_EXAMPLES,
            ),
            PercentOp::Tip => (
                "tip",
                "Bill total with a b percent tip",
                "tip(bill, percent)",
                &ADJUST_ARGS,
                &TIP_EXAMPLES,
            ),
            PercentOp::Discount => (
                "discount",
                "Price after a b percent discount",
                "discount(price, percent)",
                &ADJUST_ARGS,
                &DISCOUNT_EXAMPLES,
            ),
        };

        FunctionMeta {
            name,
            description,
            usage,
            args,
            returns: "Object {operation, a, b, result, amount, formula}",
            examples,
            category: "percent",
            related: &OP_RELATED,
        }
    }

    fn call(&self, args: &[Value], _ctx: &EvalContext) -> Value {
        run_op(self.0, args, 0, self.meta().name).unwrap_or_else(Value::Error)
    }
}

// ============ percent ============

pub struct Percent;

static PERCENT_ARGS: [ArgMeta; 3] = [
    ArgMeta::required("operation", "Text",
        "percentage-of, percentage-change, percentage-increase, percentage-decrease, tip or discount"),
    ArgMeta::required("a", "Number", "First operand"),
    ArgMeta::required("b", "Number", "Second operand"),
];

static PERCENT_EXAMPLES: [&str; 2] = [
    "percent(\"percentage-of\", 200, 25) → {result: 50}",
    "percent(\"tip\", 50, 15) → {result: 57.5}",
];

static PERCENT_RELATED: [&str; 6] = [
    "percentage_of", "percentage_change", "percentage_increase",
    "percentage_decrease", "tip", "discount",
];

impl FunctionPlugin for Percent {
    fn meta(&self) -> FunctionMeta {
        FunctionMeta {
            name: "percent",
            description: "Run a percentage operation selected by name",
            usage: "percent(operation, a, b)",
            args: &PERCENT_ARGS,
            returns: "Object {operation, a, b, result, amount, formula}",
            examples: &PERCENT_EXAMPLES,
            category: "percent",
            related: &PERCENT_RELATED,
        }
    }

    fn call(&self, args: &[Value], _ctx: &EvalContext) -> Value {
        let run = || -> Result<Value, ToolError> {
            require_args(args, "percent", 3)?;
            let op: PercentOp = extract_text(&args[0], "percent", "operation")?.parse()?;
            run_op(op, args, 1, "percent")
        };
        run().unwrap_or_else(Value::Error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    fn ctx() -> EvalContext {
        EvalContext::new(Arc::new(PluginRegistry::new()))
    }

    #[test]
    fn test_each_operation_has_distinct_name() {
        let mut names: Vec<&str> = PercentOp::ALL.iter().map(|op| OpFunction(*op).meta().name).collect();
        names.sort();
        names.dedup();
        assert_eq!(names.len(), 6);
    }

    #[test]
    fn test_percentage_of() {
        let f = OpFunction(PercentOp::PercentageOf);
        let result = f.call(&[Value::from(200), Value::from(25)], &ctx());
        assert_eq!(result.get("result").as_number(), Some(50.0));
        assert_eq!(result.get("operation").as_text(), Some("percentage-of"));
    }

    #[test]
    fn test_tip() {
        let f = OpFunction(PercentOp::Tip);
        let result = f.call(&[Value::from(50), Value::from(15)], &ctx());
        assert_eq!(result.get("result").as_number(), Some(57.5));
        assert_eq!(result.get("amount").as_number(), Some(7.5));
    }

    #[test]
    fn test_change_from_zero_is_div_zero() {
        let f = OpFunction(PercentOp::PercentageChange);
        let result = f.call(&[Value::from(0), Value::from(10)], &ctx());
        assert_eq!(result.as_error().unwrap().code, codes::DIV_ZERO);
    }

    #[test]
    fn test_invalid_input() {
        let f = OpFunction(PercentOp::Discount);
        let result = f.call(&[Value::from("ten"), Value::from(10)], &ctx());
        assert_eq!(result.as_error().unwrap().code, codes::INVALID_INPUT);
        let result = f.call(&[Value::from(10)], &ctx());
        assert_eq!(result.as_error().unwrap().code, codes::ARG_COUNT);
    }

    #[test]
    fn test_percent_dispatch() {
        let args = vec![Value::from("discount"), Value::from(50), Value::from(15)];
        let result = Percent.call(&args, &ctx());
        assert_eq!(result.get("result").as_number(), Some(42.5));

        let args = vec![Value::from("markup"), Value::from(50), Value::from(15)];
        let result = Percent.call(&args, &ctx());
        assert_eq!(result.as_error().unwrap().code, codes::UNKNOWN_OPERATION);
    }
}
