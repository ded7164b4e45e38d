//! Calcdeck Units - Unit Conversion
//!
//! Converts a magnitude between units of the same category. Every linear
//! category stores one factor per unit relative to a base unit, so a
//! conversion is `value * factor(from) / factor(to)`. Temperature is affine
//! and pivots through Celsius instead.
//!
//! Categories:
//! - Length (m, km, ft, mi, etc.)
//! - Weight (kg, g, lb, oz, etc.)
//! - Time (s, min, h, d, etc.)
//! - Volume (l, ml, gal, cup, etc.)
//! - Temperature (c, f, k)
//! - Academic scale (pct, gpa4, gpa5, gpa10)

mod unit;
mod units;
mod quantity;
mod convert;

pub use unit::{Category, Scaling, TemperatureScale, Unit};
pub use units::{UnitRegistry, UNITS};
pub use quantity::{convert, to_base, ConversionResult, Quantity};

use calcdeck_plugin::PluginRegistry;

/// Load unit functions into registry
pub fn load_units_library(registry: PluginRegistry) -> PluginRegistry {
    registry
        .with_function(convert::Convert)
        .with_function(convert::ToBase)
        .with_function(convert::ListUnits)
        .with_function(convert::Categories)
}
