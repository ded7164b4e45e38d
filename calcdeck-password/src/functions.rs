//! Password functions for Calcdeck

use std::collections::HashMap;
use rand::SeedableRng;
use rand::rngs::StdRng;
use calcdeck_plugin::prelude::*;
use crate::{DEFAULT_LENGTH, PasswordOptions, Strength, estimate_strength, generate};

impl From<Strength> for Value {
    fn from(strength: Strength) -> Self {
        let mut obj = HashMap::new();
        obj.insert("length".to_string(), Value::Number(strength.length as f64));
        obj.insert("pool_size".to_string(), Value::Number(f64::from(strength.pool_size)));
        obj.insert("entropy_bits".to_string(), Value::Number(strength.entropy_bits));
        obj.insert("level".to_string(), Value::from(strength.level.name()));
        Value::Object(obj)
    }
}

fn extract_length(args: &[Value], func: &str) -> Result<usize, ToolError> {
    match args.first() {
        None | Some(Value::Null) => Ok(DEFAULT_LENGTH),
        Some(v) => {
            let n = extract_number(v, func, "length")?;
            if n.fract() != 0.0 || n < 0.0 {
                return Err(ToolError::invalid_input(format!(
                    "{}() length must be a whole number, got {}", func, n
                )));
            }
            Ok(n as usize)
        }
    }
}

// ============ generate_password ============

pub struct GeneratePassword;

static GENERATE_ARGS: [ArgMeta; 7] = [
    ArgMeta::optional("length", "Number", "Password length, 4 to 128", "16"),
    ArgMeta::optional("uppercase", "Bool", "Include A-Z", "true"),
    ArgMeta::optional("lowercase", "Bool", "Include a-z", "true"),
    ArgMeta::optional("numbers", "Bool", "Include 0-9", "true"),
    ArgMeta::optional("symbols", "Bool", "Include punctuation symbols", "true"),
    ArgMeta::optional("exclude_similar", "Bool", "Leave out il1Lo0O", "false"),
    ArgMeta::optional("exclude_ambiguous", "Bool", "Leave out brackets, quotes and similar", "false"),
];

static GENERATE_EXAMPLES: [&str; 3] = [
    "generate_password() → {password: \"k#8Vq...\", level: \"strong\"}",
    "generate_password(12, true, true, true, false)",
    "generate_password(2) → #ERROR: INVALID_INPUT",
];

static GENERATE_RELATED: [&str; 1] = ["password_strength"];

impl FunctionPlugin for GeneratePassword {
    fn meta(&self) -> FunctionMeta {
        FunctionMeta {
            name: "generate_password",
            description: "Random password with at least one character from every enabled class",
            usage: "generate_password([length], [uppercase], [lowercase], [numbers], [symbols], [exclude_similar], [exclude_ambiguous])",
            args: &GENERATE_ARGS,
            returns: "Object {password, length, pool_size, entropy_bits, level}",
            examples: &GENERATE_EXAMPLES,
            category: "password",
            related: &GENERATE_RELATED,
        }
    }

    fn call(&self, args: &[Value], ctx: &EvalContext) -> Value {
        let run = || -> Result<Value, ToolError> {
            let func = "generate_password";
            let options = PasswordOptions::builder()
                .length(extract_length(args, func)?)
                .uppercase(extract_bool_or_default(args, 1, true, func, "uppercase")?)
                .lowercase(extract_bool_or_default(args, 2, true, func, "lowercase")?)
                .numbers(extract_bool_or_default(args, 3, true, func, "numbers")?)
                .symbols(extract_bool_or_default(args, 4, true, func, "symbols")?)
                .exclude_similar(extract_bool_or_default(args, 5, false, func, "exclude_similar")?)
                .exclude_ambiguous(extract_bool_or_default(args, 6, false, func, "exclude_ambiguous")?)
                .build()?;

            let password = match ctx.seed {
                Some(seed) => generate(&options, &mut StdRng::seed_from_u64(seed)),
                None => generate(&options, &mut rand::rng()),
            };

            let mut result = Value::from(estimate_strength(&password));
            if let Value::Object(obj) = &mut result {
                obj.insert("password".to_string(), Value::Text(password));
            }
            Ok(result)
        };
        run().unwrap_or_else(Value::Error)
    }
}

// ============ password_strength ============

pub struct PasswordStrength;

static STRENGTH_ARGS: [ArgMeta; 1] = [
    ArgMeta::required("password", "Text", "Password to rate"),
];

static STRENGTH_EXAMPLES: [&str; 2] = [
    "password_strength(\"abcd\") → {entropy_bits: 18.8, level: \"very-weak\"}",
    "password_strength(\"Abcdef12\") → {entropy_bits: 47.6, level: \"reasonable\"}",
];

static STRENGTH_RELATED: [&str; 1] = ["generate_password"];

impl FunctionPlugin for PasswordStrength {
    fn meta(&self) -> FunctionMeta {
        FunctionMeta {
            name: "password_strength",
            description: "Entropy estimate (length × log2 of the classes' alphabet size) and rating",
            usage: "password_strength(password)",
            args: &STRENGTH_ARGS,
            returns: "Object {length, pool_size, entropy_bits, level}",
            examples: &STRENGTH_EXAMPLES,
            category: "password",
            related: &STRENGTH_RELATED,
        }
    }

    fn call(&self, args: &[Value], _ctx: &EvalContext) -> Value {
        let run = || -> Result<Value, ToolError> {
            require_args(args, "password_strength", 1)?;
            let password = extract_text(&args[0], "password_strength", "password")?;
            Ok(estimate_strength(password).into())
        };
        run().unwrap_or_else(Value::Error)
    }
}
