//! Grade functions for Calcdeck

use std::collections::HashMap;
use calcdeck_core::parse_input;
use calcdeck_plugin::prelude::*;
use crate::{Course, CumulativeGpa, GpaResult, GpaScale};

/// Scale from a number (4, 5, 10) or its text form ("4.0", ...)
fn extract_scale(value: &Value, func: &str) -> Result<GpaScale, ToolError> {
    match value {
        Value::Number(n) => GpaScale::from_max(*n)
            .ok_or_else(|| CalcError::UnknownScale(n.to_string()).into()),
        Value::Text(s) => s.parse::<GpaScale>().map_err(ToolError::from),
        Value::Error(e) => Err(e.clone()),
        other => Err(ToolError::arg_type(func, "scale", "Number", other.type_name())),
    }
}

fn scale_arg(args: &[Value], index: usize, func: &str) -> Result<GpaScale, ToolError> {
    match args.get(index) {
        None | Some(Value::Null) => Ok(GpaScale::Four),
        Some(v) => extract_scale(v, func),
    }
}

impl From<GpaResult> for Value {
    fn from(result: GpaResult) -> Self {
        let mut obj = HashMap::new();
        obj.insert("gpa".to_string(), Value::Number(result.gpa));
        obj.insert("percentage".to_string(), Value::Number(result.percentage));
        obj.insert("scale".to_string(), Value::Number(result.scale.max()));
        obj.insert("grade".to_string(), Value::from(result.grade));
        Value::Object(obj)
    }
}

impl From<CumulativeGpa> for Value {
    fn from(result: CumulativeGpa) -> Self {
        let mut obj = HashMap::new();
        obj.insert("gpa".to_string(), Value::Number(result.gpa));
        obj.insert("total_credits".to_string(), Value::Number(result.total_credits));
        obj.insert("quality_points".to_string(), Value::Number(result.quality_points));
        obj.insert("courses".to_string(), Value::Number(result.courses as f64));
        Value::Object(obj)
    }
}

/// A GPA that is absent, non-numeric text or not finite is "no result"
/// rather than an error; only values of the wrong type are rejected.
fn gpa_or_null(args: &[Value], func: &str, arg: &str) -> Result<Option<f64>, ToolError> {
    match &args[0] {
        Value::Null => Ok(None),
        Value::Number(n) if !n.is_finite() => Ok(None),
        Value::Text(s) => Ok(parse_input(s).ok()),
        other => extract_number(other, func, arg).map(Some),
    }
}

// ============ gpa_to_percentage ============

pub struct GpaToPercentage;

static GPA_TO_PCT_ARGS: [ArgMeta; 2] = [
    ArgMeta::required("gpa", "Number", "GPA value"),
    ArgMeta::optional("scale", "Number", "GPA scale: 4, 5 or 10", "4"),
];

static GPA_TO_PCT_EXAMPLES: [&str; 3] = [
    "gpa_to_percentage(3.5, 4) → {percentage: 87.5, grade: \"A-\"}",
    "gpa_to_percentage(8.5, 10) → {percentage: 85, grade: \"A\"}",
    "gpa_to_percentage(-1, 4) → null",
];

static GPA_TO_PCT_RELATED: [&str; 2] = ["percentage_to_gpa", "letter_grade"];

impl FunctionPlugin for GpaToPercentage {
    fn meta(&self) -> FunctionMeta {
        FunctionMeta {
            name: "gpa_to_percentage",
            description: "Convert a GPA to a percentage (capped at 100) and letter grade; null for negative GPAs",
            usage: "gpa_to_percentage(gpa, [scale])",
            args: &GPA_TO_PCT_ARGS,
            returns: "Object {gpa, percentage, scale, grade} or Null",
            examples: &GPA_TO_PCT_EXAMPLES,
            category: "grades",
            related: &GPA_TO_PCT_RELATED,
        }
    }

    fn call(&self, args: &[Value], _ctx: &EvalContext) -> Value {
        let run = || -> Result<Value, ToolError> {
            require_args(args, "gpa_to_percentage", 1)?;
            let scale = scale_arg(args, 1, "gpa_to_percentage")?;
            let gpa = gpa_or_null(args, "gpa_to_percentage", "gpa")?;
            Ok(gpa.and_then(|g| crate::gpa_to_percentage(g, scale)).into())
        };
        run().unwrap_or_else(Value::Error)
    }
}

// ============ letter_grade ============

pub struct LetterGrade;

static LETTER_GRADE_ARGS: [ArgMeta; 2] = [
    ArgMeta::required("gpa", "Number", "GPA value"),
    ArgMeta::optional("scale", "Number", "GPA scale: 4, 5 or 10", "4"),
];

static LETTER_GRADE_EXAMPLES: [&str; 2] = [
    "letter_grade(3.2) → \"B+\"",
    "letter_grade(9.1, 10) → \"A+\"",
];

static LETTER_GRADE_RELATED: [&str; 1] = ["gpa_to_percentage"];

impl FunctionPlugin for LetterGrade {
    fn meta(&self) -> FunctionMeta {
        FunctionMeta {
            name: "letter_grade",
            description: "Letter grade for a GPA on the given scale",
            usage: "letter_grade(gpa, [scale])",
            args: &LETTER_GRADE_ARGS,
            returns: "Text or Null",
            examples: &LETTER_GRADE_EXAMPLES,
            category: "grades",
            related: &LETTER_GRADE_RELATED,
        }
    }

    fn call(&self, args: &[Value], _ctx: &EvalContext) -> Value {
        let run = || -> Result<Value, ToolError> {
            require_args(args, "letter_grade", 1)?;
            let scale = scale_arg(args, 1, "letter_grade")?;
            let gpa = gpa_or_null(args, "letter_grade", "gpa")?;
            Ok(gpa.and_then(|g| crate::letter_grade(g, scale)).into())
        };
        run().unwrap_or_else(Value::Error)
    }
}

// ============ percentage_to_gpa ============

pub struct PercentageToGpa;

static PCT_TO_GPA_ARGS: [ArgMeta; 2] = [
    ArgMeta::required("percentage", "Number", "Percentage (values above 100 count as 100)"),
    ArgMeta::optional("scale", "Number", "GPA scale: 4, 5 or 10", "4"),
];

static PCT_TO_GPA_EXAMPLES: [&str; 2] = [
    "percentage_to_gpa(87.5) → {gpa: 3.5, grade: \"A-\"}",
    "percentage_to_gpa(72, 10) → {gpa: 7.2, grade: \"B+\"}",
];

static PCT_TO_GPA_RELATED: [&str; 1] = ["gpa_to_percentage"];

impl FunctionPlugin for PercentageToGpa {
    fn meta(&self) -> FunctionMeta {
        FunctionMeta {
            name: "percentage_to_gpa",
            description: "Convert a percentage to a GPA and letter grade on the given scale",
            usage: "percentage_to_gpa(percentage, [scale])",
            args: &PCT_TO_GPA_ARGS,
            returns: "Object {gpa, percentage, scale, grade} or Null",
            examples: &PCT_TO_GPA_EXAMPLES,
            category: "grades",
            related: &PCT_TO_GPA_RELATED,
        }
    }

    fn call(&self, args: &[Value], _ctx: &EvalContext) -> Value {
        let run = || -> Result<Value, ToolError> {
            require_args(args, "percentage_to_gpa", 1)?;
            let scale = scale_arg(args, 1, "percentage_to_gpa")?;
            let pct = gpa_or_null(args, "percentage_to_gpa", "percentage")?;
            Ok(pct.and_then(|p| crate::percentage_to_gpa(p, scale)).into())
        };
        run().unwrap_or_else(Value::Error)
    }
}

// ============ cumulative_gpa ============

pub struct CumulativeGpaFn;

static CUMULATIVE_ARGS: [ArgMeta; 2] = [
    ArgMeta::required("grade_points", "List<Number>", "Grade points earned per course"),
    ArgMeta::required("credits", "List<Number>", "Credit hours per course"),
];

static CUMULATIVE_EXAMPLES: [&str; 1] = [
    "cumulative_gpa([4, 3, 2], [3, 4, 1]) → {gpa: 3.25, total_credits: 8}",
];

static CUMULATIVE_RELATED: [&str; 1] = ["gpa_to_percentage"];

impl FunctionPlugin for CumulativeGpaFn {
    fn meta(&self) -> FunctionMeta {
        FunctionMeta {
            name: "cumulative_gpa",
            description: "Credit-weighted GPA across courses",
            usage: "cumulative_gpa(grade_points, credits)",
            args: &CUMULATIVE_ARGS,
            returns: "Object {gpa, total_credits, quality_points, courses}",
            examples: &CUMULATIVE_EXAMPLES,
            category: "grades",
            related: &CUMULATIVE_RELATED,
        }
    }

    fn call(&self, args: &[Value], _ctx: &EvalContext) -> Value {
        let run = || -> Result<Value, ToolError> {
            require_args(args, "cumulative_gpa", 2)?;
            let points = extract_numbers_from_list(&args[0], "cumulative_gpa", "grade_points")?;
            let credits = extract_numbers_from_list(&args[1], "cumulative_gpa", "credits")?;
            if points.len() != credits.len() {
                return Err(ToolError::invalid_input(format!(
                    "cumulative_gpa(): {} grade points but {} credit entries",
                    points.len(),
                    credits.len()
                )));
            }

            let courses: Vec<Course> = points
                .into_iter()
                .zip(credits)
                .map(|(p, c)| Course::new(p, c))
                .collect();
            Ok(crate::cumulative_gpa(&courses)?.into())
        };
        run().unwrap_or_else(Value::Error)
    }
}
