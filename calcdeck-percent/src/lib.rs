//! Calcdeck Percent - Percentage calculations
//!
//! Six two-operand operations: percentage-of, percentage change, increase,
//! decrease, tip and discount. Tip and discount share the arithmetic of
//! increase and decrease but report a labelled formula.

mod ops;
mod functions;

pub use ops::{calculate, PercentOp, PercentResult};
pub use functions::{OpFunction, Percent};

use calcdeck_plugin::PluginRegistry;

/// Load percentage functions into registry
pub fn load_percent_library(registry: PluginRegistry) -> PluginRegistry {
    PercentOp::ALL
        .into_iter()
        .fold(registry, |registry, op| registry.with_function(OpFunction(op)))
        .with_function(Percent)
}
