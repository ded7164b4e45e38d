//! Quantities and the conversion engine

use std::fmt;
use serde::Serialize;
use tracing::debug;
use calcdeck_core::{CalcError, ensure_finite};
use crate::{Category, Scaling, Unit, UNITS};

/// A magnitude with its unit
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Quantity {
    pub value: f64,
    pub unit: &'static Unit,
}

impl Quantity {
    /// Build a quantity, rejecting non-finite magnitudes
    pub fn new(value: f64, unit: &'static Unit) -> Result<Self, CalcError> {
        ensure_finite(value, "value")?;
        Ok(Quantity { value, unit })
    }

    /// Resolve `unit` within `category` and build a quantity
    pub fn parse(value: f64, unit: &str, category: Category) -> Result<Self, CalcError> {
        let unit = UNITS.get(category, unit)?;
        Quantity::new(value, unit)
    }

    pub fn category(&self) -> Category {
        self.unit.category
    }

    /// Convert to another unit of the same category
    pub fn convert_to(&self, target: &'static Unit) -> Result<ConversionResult, CalcError> {
        if target.category != self.unit.category {
            return Err(CalcError::UnknownUnit {
                unit: target.symbol.to_string(),
                category: self.unit.category.to_string(),
            });
        }

        let from = self.unit;
        let (value, factor, formula) = match (from.scaling, target.scaling) {
            (Scaling::Linear { factor: f_from }, Scaling::Linear { factor: f_to }) => {
                let ratio = f_from / f_to;
                let value = if std::ptr::eq(from, target) {
                    self.value
                } else {
                    self.value * f_from / f_to
                };
                let formula = format!("{} = {} × {}", target.symbol, from.symbol, ratio);
                (value, Some(ratio), formula)
            }
            (Scaling::Affine { scale: s_from }, Scaling::Affine { scale: s_to }) => {
                let value = s_to.from_celsius(s_from.to_celsius(self.value));
                (value, None, s_from.formula_to(s_to).to_string())
            }
            // Categories never mix linear and affine units
            _ => {
                return Err(CalcError::UnknownUnit {
                    unit: target.symbol.to_string(),
                    category: self.unit.category.to_string(),
                })
            }
        };

        let value = ensure_finite(value, "result")?;

        debug!(
            category = %from.category,
            from = from.symbol,
            to = target.symbol,
            input = self.value,
            output = value,
            "converted"
        );

        Ok(ConversionResult {
            quantity: self.clone(),
            target,
            value,
            factor,
            formula,
        })
    }

    /// Magnitude expressed in the category's base unit; overflow is an error
    pub fn to_base(&self) -> Result<f64, CalcError> {
        ensure_finite(self.unit.to_base(self.value), "result")
    }
}

impl fmt::Display for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.value, self.unit.symbol)
    }
}

/// Outcome of a single conversion
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConversionResult {
    /// What was converted
    pub quantity: Quantity,
    pub target: &'static Unit,
    /// Magnitude in the target unit, unrounded
    pub value: f64,
    /// `factor(from) / factor(to)`; absent for temperature
    pub factor: Option<f64>,
    pub formula: String,
}

/// Convert `value` from one unit to another within `category`.
///
/// Linear categories go through the base unit factor; temperature pivots
/// through Celsius.
pub fn convert(value: f64, from: &str, to: &str, category: Category) -> Result<ConversionResult, CalcError> {
    let quantity = Quantity::parse(value, from, category)?;
    let target = UNITS.get(category, to)?;
    quantity.convert_to(target)
}

/// Convert `value` in `unit` to the category's base unit
pub fn to_base(value: f64, unit: &str, category: Category) -> Result<f64, CalcError> {
    Quantity::parse(value, unit, category)?.to_base()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_close(actual: f64, expected: f64) {
        let tolerance = 1e-9 * expected.abs().max(1.0);
        assert!((actual - expected).abs() <= tolerance, "expected {}, got {}", expected, actual);
    }

    #[test]
    fn test_metres_to_feet_and_back() {
        let there = convert(100.0, "m", "ft", Category::Length).unwrap();
        assert_close(there.value, 328.0839895013123);
        let back = convert(there.value, "ft", "m", Category::Length).unwrap();
        assert_close(back.value, 100.0);
    }

    #[test]
    fn test_linear_round_trip_every_pair() {
        let values = [0.0, 1.0, -42.5, 1234.5678, 1e-3];
        for category in Category::ALL {
            if category == Category::Temperature {
                continue;
            }
            let table = crate::UnitRegistry::table(category);
            for a in table {
                for b in table {
                    for &v in &values {
                        let there = convert(v, a.symbol, b.symbol, category).unwrap();
                        let back = convert(there.value, b.symbol, a.symbol, category).unwrap();
                        assert_close(back.value, v);
                    }
                }
            }
        }
    }

    #[test]
    fn test_temperature_fixed_points() {
        assert_eq!(convert(0.0, "c", "f", Category::Temperature).unwrap().value, 32.0);
        assert_eq!(convert(100.0, "C", "F", Category::Temperature).unwrap().value, 212.0);
        assert_eq!(convert(32.0, "f", "c", Category::Temperature).unwrap().value, 0.0);
        assert_close(convert(0.0, "k", "c", Category::Temperature).unwrap().value, -273.15);
        assert_close(convert(-40.0, "f", "c", Category::Temperature).unwrap().value, -40.0);

        let f = convert(0.0, "c", "f", Category::Temperature).unwrap();
        let c = convert(f.value, "f", "c", Category::Temperature).unwrap();
        assert_eq!(c.value, 0.0);
    }

    #[test]
    fn test_temperature_has_formula_but_no_factor() {
        let result = convert(212.0, "fahrenheit", "kelvin", Category::Temperature).unwrap();
        assert_eq!(result.factor, None);
        assert_eq!(result.formula, "K = (°F - 32) × 5/9 + 273.15");
        assert_close(result.value, 373.15);
    }

    #[test]
    fn test_linear_formula_and_factor() {
        let result = convert(2.0, "km", "m", Category::Length).unwrap();
        assert_eq!(result.value, 2000.0);
        assert_eq!(result.factor, Some(1000.0));
        assert_eq!(result.formula, "m = km × 1000");
    }

    #[test]
    fn test_negative_and_zero_pass_through() {
        assert_eq!(convert(-5.0, "kg", "g", Category::Weight).unwrap().value, -5000.0);
        assert_eq!(convert(0.0, "h", "min", Category::Time).unwrap().value, 0.0);
    }

    #[test]
    fn test_same_unit_is_identity() {
        let result = convert(0.1, "cup", "cup", Category::Volume).unwrap();
        assert_eq!(result.value, 0.1);
    }

    #[test]
    fn test_academic_scale() {
        assert_close(convert(3.5, "gpa4", "pct", Category::AcademicScale).unwrap().value, 87.5);
        assert_close(convert(3.5, "gpa4", "gpa10", Category::AcademicScale).unwrap().value, 8.75);
    }

    #[test]
    fn test_invalid_input() {
        assert!(matches!(
            convert(f64::NAN, "m", "ft", Category::Length),
            Err(CalcError::InvalidInput(_))
        ));
        assert!(matches!(
            convert(f64::INFINITY, "c", "f", Category::Temperature),
            Err(CalcError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_unit_from_other_category() {
        assert!(matches!(
            convert(1.0, "m", "kg", Category::Length),
            Err(CalcError::UnknownUnit { .. })
        ));
        let kg = UNITS.get(Category::Weight, "kg").unwrap();
        let metre = Quantity::parse(1.0, "m", Category::Length).unwrap();
        assert!(metre.convert_to(kg).is_err());
    }

    #[test]
    fn test_idempotent() {
        let a = convert(12.34, "lb", "oz", Category::Weight).unwrap();
        let b = convert(12.34, "lb", "oz", Category::Weight).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_to_base() {
        assert_eq!(to_base(5.0, "km", Category::Length).unwrap(), 5000.0);
        assert_close(to_base(212.0, "f", Category::Temperature).unwrap(), 100.0);
    }

    #[test]
    fn test_overflow_is_rejected() {
        assert!(matches!(
            convert(1e308, "km", "mm", Category::Length),
            Err(CalcError::InvalidInput(_))
        ));
        assert!(matches!(
            to_base(1e308, "km", Category::Length),
            Err(CalcError::InvalidInput(_))
        ));
        assert!(convert(1e300, "km", "mm", Category::Length).unwrap().value.is_finite());
    }
}
