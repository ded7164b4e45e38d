//! Two-operand percentage operations

use std::fmt;
use std::str::FromStr;
use serde::{Deserialize, Serialize};
use tracing::debug;
use calcdeck_core::{CalcError, ensure_finite};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PercentOp {
    /// `b`% of `a`
    PercentageOf,
    /// Relative change from `a` to `b`, in percent
    PercentageChange,
    PercentageIncrease,
    PercentageDecrease,
    /// Same arithmetic as increase
    Tip,
    /// Same arithmetic as decrease
    Discount,
}

impl PercentOp {
    pub const ALL: [PercentOp; 6] = [
        PercentOp::PercentageOf,
        PercentOp::PercentageChange,
        PercentOp::PercentageIncrease,
        PercentOp::PercentageDecrease,
        PercentOp::Tip,
        PercentOp::Discount,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            PercentOp::PercentageOf => "percentage-of",
            PercentOp::PercentageChange => "percentage-change",
            PercentOp::PercentageIncrease => "percentage-increase",
            PercentOp::PercentageDecrease => "percentage-decrease",
            PercentOp::Tip => "tip",
            PercentOp::Discount => "discount",
        }
    }
}

impl fmt::Display for PercentOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for PercentOp {
    type Err = CalcError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim().to_lowercase().replace(['_', ' '], "-");
        let key = key.strip_prefix("percent-").map_or(key.clone(), |rest| format!("percentage-{}", rest));
        PercentOp::ALL
            .into_iter()
            .find(|op| op.name() == key)
            .ok_or_else(|| CalcError::UnknownOperation(s.to_string()))
    }
}

/// Outcome of one percentage operation
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PercentResult {
    pub operation: PercentOp,
    pub a: f64,
    pub b: f64,
    pub result: f64,
    /// `a * b / 100` for every operation except change, which reports `b - a`
    pub amount: f64,
    pub formula: String,
}

/// Run `op` on `a` and `b`.
///
/// Both operands must be finite, and so must the result. `PercentageChange`
/// with `a == 0` is a division by zero and is reported rather than returned
/// as infinity.
pub fn calculate(op: PercentOp, a: f64, b: f64) -> Result<PercentResult, CalcError> {
    let a = ensure_finite(a, "a")?;
    let b = ensure_finite(b, "b")?;
    let portion = a * b / 100.0;

    let (result, amount, formula) = match op {
        PercentOp::PercentageOf => (portion, portion, format!("{}% of {} = {}", b, a, portion)),
        PercentOp::PercentageChange => {
            if a == 0.0 {
                debug!(b, "percentage change from zero");
                return Err(CalcError::DivisionByZero);
            }
            let change = (b - a) / a * 100.0;
            (change, b - a, format!("({} - {}) / {} × 100 = {}%", b, a, a, change))
        }
        PercentOp::PercentageIncrease => {
            let r = a + portion;
            (r, portion, format!("{} + {}% = {}", a, b, r))
        }
        PercentOp::PercentageDecrease => {
            let r = a - portion;
            (r, portion, format!("{} - {}% = {}", a, b, r))
        }
        PercentOp::Tip => {
            let r = a + portion;
            (r, portion, format!("{} + {}% tip ({}) = {}", a, b, portion, r))
        }
        PercentOp::Discount => {
            let r = a - portion;
            (r, portion, format!("{} - {}% discount ({}) = {}", a, b, portion, r))
        }
    };

    if !result.is_finite() {
        return Err(CalcError::invalid(format!("{} of {} and {} is out of range", op, a, b)));
    }

    debug!(%op, a, b, result, "percentage calculated");
    Ok(PercentResult { operation: op, a, b, result, amount, formula })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(op: PercentOp, a: f64, b: f64) -> f64 {
        calculate(op, a, b).unwrap().result
    }

    #[test]
    fn test_percentage_of() {
        assert_eq!(run(PercentOp::PercentageOf, 200.0, 25.0), 50.0);
        let r = calculate(PercentOp::PercentageOf, 200.0, 25.0).unwrap();
        assert_eq!(r.formula, "25% of 200 = 50");
    }

    #[test]
    fn test_percentage_change() {
        assert_eq!(run(PercentOp::PercentageChange, 50.0, 75.0), 50.0);
        assert_eq!(run(PercentOp::PercentageChange, 80.0, 60.0), -25.0);
        let r = calculate(PercentOp::PercentageChange, 50.0, 75.0).unwrap();
        assert_eq!(r.amount, 25.0);
    }

    #[test]
    fn test_percentage_change_from_zero() {
        assert_eq!(calculate(PercentOp::PercentageChange, 0.0, 10.0), Err(CalcError::DivisionByZero));
        assert_eq!(calculate(PercentOp::PercentageChange, -0.0, 0.0), Err(CalcError::DivisionByZero));
    }

    #[test]
    fn test_increase_and_decrease() {
        assert_eq!(run(PercentOp::PercentageIncrease, 80.0, 25.0), 100.0);
        assert_eq!(run(PercentOp::PercentageDecrease, 80.0, 25.0), 60.0);
        // Not clamped
        assert_eq!(run(PercentOp::PercentageDecrease, 10.0, 150.0), -5.0);
    }

    #[test]
    fn test_tip_and_discount() {
        let tip = calculate(PercentOp::Tip, 50.0, 15.0).unwrap();
        assert_eq!(tip.result, 57.5);
        assert_eq!(tip.result, 50.0 + tip.amount);
        assert_eq!(tip.amount, 7.5);

        let discount = calculate(PercentOp::Discount, 50.0, 15.0).unwrap();
        assert_eq!(discount.result, 42.5);
        assert_eq!(run(PercentOp::Tip, 50.0, 15.0), run(PercentOp::PercentageIncrease, 50.0, 15.0));
    }

    #[test]
    fn test_non_finite_inputs() {
        for op in PercentOp::ALL {
            assert!(matches!(calculate(op, f64::NAN, 1.0), Err(CalcError::InvalidInput(_))));
            assert!(matches!(calculate(op, 1.0, f64::INFINITY), Err(CalcError::InvalidInput(_))));
        }
    }

    #[test]
    fn test_results_are_finite() {
        for op in PercentOp::ALL {
            for (a, b) in [(1e300, 1e300), (-3.0, 7.5), (0.0, 0.0)] {
                if let Ok(r) = calculate(op, a, b) {
                    assert!(r.result.is_finite(), "{} gave {}", op, r.result);
                }
            }
        }
    }

    #[test]
    fn test_overflow_is_rejected() {
        assert!(matches!(
            calculate(PercentOp::PercentageIncrease, 1e300, 1e300),
            Err(CalcError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_op_parsing() {
        assert_eq!("percentage-of".parse::<PercentOp>(), Ok(PercentOp::PercentageOf));
        assert_eq!("Percentage_Change".parse::<PercentOp>(), Ok(PercentOp::PercentageChange));
        assert_eq!("percent increase".parse::<PercentOp>(), Ok(PercentOp::PercentageIncrease));
        assert_eq!("TIP".parse::<PercentOp>(), Ok(PercentOp::Tip));
        assert!(matches!("markup".parse::<PercentOp>(), Err(CalcError::UnknownOperation(_))));
    }

    #[test]
    fn test_idempotent() {
        for op in PercentOp::ALL {
            assert_eq!(calculate(op, 123.4, 5.6), calculate(op, 123.4, 5.6));
        }
    }
}
