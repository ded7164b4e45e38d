//! Unit conversion functions for Calcdeck

use std::collections::HashMap;
use calcdeck_plugin::prelude::*;
use crate::{Category, ConversionResult, Unit, UnitRegistry, UNITS};

/// Category from an explicit argument, or inferred from a unit key
fn resolve_category(args: &[Value], index: usize, unit_key: &str, func: &str) -> Result<Category, ToolError> {
    match extract_optional_text(args, index, func, "category")? {
        Some(name) => name.parse::<Category>().map_err(ToolError::from),
        None => UNITS.infer_category(unit_key).ok_or_else(|| {
            ToolError::from(CalcError::UnknownUnit {
                unit: unit_key.to_string(),
                category: "any".to_string(),
            })
            .with_suggestion("Pass a category or use list_units(category) to see valid units")
        }),
    }
}

fn unit_to_value(unit: &Unit) -> Value {
    let mut obj = HashMap::new();
    obj.insert("symbol".to_string(), Value::from(unit.symbol));
    obj.insert("name".to_string(), Value::from(unit.name));
    obj.insert("category".to_string(), Value::from(unit.category.name()));
    obj.insert("factor".to_string(), Value::from(unit.factor()));
    Value::Object(obj)
}

impl From<ConversionResult> for Value {
    fn from(result: ConversionResult) -> Self {
        let mut obj = HashMap::new();
        obj.insert("input".to_string(), Value::Number(result.quantity.value));
        obj.insert("from".to_string(), Value::from(result.quantity.unit.symbol));
        obj.insert("to".to_string(), Value::from(result.target.symbol));
        obj.insert("category".to_string(), Value::from(result.target.category.name()));
        obj.insert("value".to_string(), Value::Number(result.value));
        obj.insert("factor".to_string(), Value::from(result.factor));
        obj.insert("formula".to_string(), Value::Text(result.formula));
        Value::Object(obj)
    }
}

// ============ convert ============

pub struct Convert;

static CONVERT_ARGS: [ArgMeta; 4] = [
    ArgMeta::required("value", "Number", "Value to convert"),
    ArgMeta::required("from_unit", "Text", "Source unit (e.g., \"m\")"),
    ArgMeta::required("to_unit", "Text", "Target unit (e.g., \"ft\")"),
    ArgMeta::optional("category", "Text", "length, weight, time, volume, temperature or academic-scale", "inferred from from_unit"),
];

static CONVERT_EXAMPLES: [&str; 3] = [
    "convert(100, \"m\", \"ft\") → {value: 328.084, formula: \"ft = m × 3.2808\"}",
    "convert(32, \"F\", \"C\") → {value: 0, formula: \"°C = (°F - 32) × 5/9\"}",
    "convert(3.5, \"gpa4\", \"gpa10\", \"academic-scale\") → {value: 8.75}",
];

static CONVERT_RELATED: [&str; 2] = ["to_base", "list_units"];

impl FunctionPlugin for Convert {
    fn meta(&self) -> FunctionMeta {
        FunctionMeta {
            name: "convert",
            description: "Convert a value from one unit to another within a category",
            usage: "convert(value, from_unit, to_unit, [category])",
            args: &CONVERT_ARGS,
            returns: "Object {input, from, to, category, value, factor, formula}",
            examples: &CONVERT_EXAMPLES,
            category: "units",
            related: &CONVERT_RELATED,
        }
    }

    fn call(&self, args: &[Value], _ctx: &EvalContext) -> Value {
        let run = || -> Result<Value, ToolError> {
            require_args(args, "convert", 3)?;
            let value = extract_number(&args[0], "convert", "value")?;
            let from = extract_text(&args[1], "convert", "from_unit")?;
            let to = extract_text(&args[2], "convert", "to_unit")?;
            let category = resolve_category(args, 3, from, "convert")?;

            let result = crate::convert(value, from, to, category)?;
            Ok(result.into())
        };
        run().unwrap_or_else(Value::Error)
    }
}

// ============ to_base ============

pub struct ToBase;

static TO_BASE_ARGS: [ArgMeta; 3] = [
    ArgMeta::required("value", "Number", "Value to convert"),
    ArgMeta::required("unit", "Text", "Source unit"),
    ArgMeta::optional("category", "Text", "Unit category", "inferred from unit"),
];

static TO_BASE_EXAMPLES: [&str; 2] = [
    "to_base(5, \"km\") → 5000",
    "to_base(212, \"F\") → 100",
];

static TO_BASE_RELATED: [&str; 2] = ["convert", "list_units"];

impl FunctionPlugin for ToBase {
    fn meta(&self) -> FunctionMeta {
        FunctionMeta {
            name: "to_base",
            description: "Convert a value to its category's base unit (m, kg, s, l, °C, %)",
            usage: "to_base(value, unit, [category])",
            args: &TO_BASE_ARGS,
            returns: "Number",
            examples: &TO_BASE_EXAMPLES,
            category: "units",
            related: &TO_BASE_RELATED,
        }
    }

    fn call(&self, args: &[Value], _ctx: &EvalContext) -> Value {
        let run = || -> Result<Value, ToolError> {
            require_args(args, "to_base", 2)?;
            let value = extract_number(&args[0], "to_base", "value")?;
            let unit = extract_text(&args[1], "to_base", "unit")?;
            let category = resolve_category(args, 2, unit, "to_base")?;
            Ok(Value::Number(crate::to_base(value, unit, category)?))
        };
        run().unwrap_or_else(Value::Error)
    }
}

// ============ list_units ============

pub struct ListUnits;

static LIST_UNITS_ARGS: [ArgMeta; 1] = [
    ArgMeta::required("category", "Text", "Unit category"),
];

static LIST_UNITS_EXAMPLES: [&str; 1] = [
    "list_units(\"temperature\") → [{symbol: \"c\", ...}, {symbol: \"f\", ...}, {symbol: \"k\", ...}]",
];

static LIST_UNITS_RELATED: [&str; 2] = ["categories", "convert"];

impl FunctionPlugin for ListUnits {
    fn meta(&self) -> FunctionMeta {
        FunctionMeta {
            name: "list_units",
            description: "List the units of a category with their base-unit factors",
            usage: "list_units(category)",
            args: &LIST_UNITS_ARGS,
            returns: "List<Object {symbol, name, category, factor}>",
            examples: &LIST_UNITS_EXAMPLES,
            category: "units",
            related: &LIST_UNITS_RELATED,
        }
    }

    fn call(&self, args: &[Value], _ctx: &EvalContext) -> Value {
        let run = || -> Result<Value, ToolError> {
            require_args(args, "list_units", 1)?;
            let category: Category = extract_text(&args[0], "list_units", "category")?.parse()?;
            Ok(Value::List(UnitRegistry::table(category).iter().map(unit_to_value).collect()))
        };
        run().unwrap_or_else(Value::Error)
    }
}

// ============ categories ============

pub struct Categories;

static CATEGORIES_EXAMPLES: [&str; 1] = [
    "categories() → [\"length\", \"weight\", \"time\", \"volume\", \"temperature\", \"academic-scale\"]",
];

static CATEGORIES_RELATED: [&str; 1] = ["list_units"];

impl FunctionPlugin for Categories {
    fn meta(&self) -> FunctionMeta {
        FunctionMeta {
            name: "categories",
            description: "List the conversion categories",
            usage: "categories()",
            args: &[],
            returns: "List<Text>",
            examples: &CATEGORIES_EXAMPLES,
            category: "units",
            related: &CATEGORIES_RELATED,
        }
    }

    fn call(&self, _args: &[Value], _ctx: &EvalContext) -> Value {
        Value::List(Category::ALL.iter().map(|c| Value::from(c.name())).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    fn eval_ctx() -> EvalContext {
        EvalContext::new(Arc::new(PluginRegistry::new()))
    }

    #[test]
    fn test_convert_infers_category() {
        let args = vec![Value::from(1), Value::from("km"), Value::from("m")];
        let result = Convert.call(&args, &eval_ctx());
        assert_eq!(result.get("value").as_number(), Some(1000.0));
        assert_eq!(result.get("category").as_text(), Some("length"));
        assert_eq!(result.get("factor").as_number(), Some(1000.0));
    }

    #[test]
    fn test_convert_temperature() {
        let args = vec![Value::from(100), Value::from("C"), Value::from("F")];
        let result = Convert.call(&args, &eval_ctx());
        assert_eq!(result.get("value").as_number(), Some(212.0));
        assert!(result.get("factor").is_null());
    }

    #[test]
    fn test_convert_explicit_category() {
        let args = vec![
            Value::from(3.0),
            Value::from("gpa4"),
            Value::from("pct"),
            Value::from("academic-scale"),
        ];
        let result = Convert.call(&args, &eval_ctx());
        assert_eq!(result.get("value").as_number(), Some(75.0));
    }

    #[test]
    fn test_convert_accepts_numeric_text() {
        let args = vec![Value::from("2"), Value::from("h"), Value::from("min")];
        let result = Convert.call(&args, &eval_ctx());
        assert_eq!(result.get("value").as_number(), Some(120.0));
    }

    #[test]
    fn test_convert_errors() {
        let ctx = eval_ctx();

        let result = Convert.call(&[Value::from(1)], &ctx);
        assert_eq!(result.as_error().unwrap().code, codes::ARG_COUNT);

        let args = vec![Value::from("abc"), Value::from("m"), Value::from("ft")];
        assert_eq!(Convert.call(&args, &ctx).as_error().unwrap().code, codes::INVALID_INPUT);

        let args = vec![Value::from(1), Value::from("m"), Value::from("kg")];
        assert_eq!(Convert.call(&args, &ctx).as_error().unwrap().code, codes::UNKNOWN_UNIT);

        let args = vec![Value::from(1), Value::from("parsec"), Value::from("m")];
        assert_eq!(Convert.call(&args, &ctx).as_error().unwrap().code, codes::UNKNOWN_UNIT);

        let args = vec![Value::from(1), Value::from("m"), Value::from("ft"), Value::from("speed")];
        assert_eq!(Convert.call(&args, &ctx).as_error().unwrap().code, codes::UNKNOWN_CATEGORY);
    }

    #[test]
    fn test_to_base() {
        let args = vec![Value::from(5), Value::from("km")];
        assert_eq!(ToBase.call(&args, &eval_ctx()).as_number(), Some(5000.0));
    }

    #[test]
    fn test_list_units_and_categories() {
        let result = ListUnits.call(&[Value::from("temperature")], &eval_ctx());
        let units = result.as_list().unwrap();
        assert_eq!(units.len(), 3);
        assert_eq!(units[0].get("symbol").as_text(), Some("c"));
        assert!(units[0].get("factor").is_null());

        let result = Categories.call(&[], &eval_ctx());
        assert_eq!(result.as_list().unwrap().len(), 6);
    }
}
