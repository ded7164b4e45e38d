//! Units, categories and the per-unit conversion rule

use std::fmt;
use std::str::FromStr;
use serde::{Serialize, Deserialize};
use calcdeck_core::CalcError;

/// Named group of mutually convertible units
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Category {
    Length,
    Weight,
    Time,
    Volume,
    Temperature,
    AcademicScale,
}

impl Category {
    pub const ALL: [Category; 6] = [
        Category::Length,
        Category::Weight,
        Category::Time,
        Category::Volume,
        Category::Temperature,
        Category::AcademicScale,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Category::Length => "length",
            Category::Weight => "weight",
            Category::Time => "time",
            Category::Volume => "volume",
            Category::Temperature => "temperature",
            Category::AcademicScale => "academic-scale",
        }
    }

    /// Symbol of the reference unit every factor in the category is relative to
    pub fn base_symbol(&self) -> &'static str {
        match self {
            Category::Length => "m",
            Category::Weight => "kg",
            Category::Time => "s",
            Category::Volume => "l",
            Category::Temperature => "c",
            Category::AcademicScale => "pct",
        }
    }

    /// Members of the category, in display order
    pub fn units(&self) -> &'static [Unit] {
        crate::UnitRegistry::table(*self)
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Category {
    type Err = CalcError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace(['_', ' '], "-").as_str() {
            "length" | "distance" => Ok(Category::Length),
            "weight" | "mass" => Ok(Category::Weight),
            "time" | "duration" => Ok(Category::Time),
            "volume" => Ok(Category::Volume),
            "temperature" | "temp" => Ok(Category::Temperature),
            "academic-scale" | "academic" | "gpa" => Ok(Category::AcademicScale),
            _ => Err(CalcError::UnknownCategory(s.to_string())),
        }
    }
}

/// Temperature scales; conversions pivot through Celsius
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TemperatureScale {
    Celsius,
    Fahrenheit,
    Kelvin,
}

impl TemperatureScale {
    pub fn to_celsius(self, value: f64) -> f64 {
        match self {
            TemperatureScale::Celsius => value,
            TemperatureScale::Fahrenheit => (value - 32.0) * 5.0 / 9.0,
            TemperatureScale::Kelvin => value - 273.15,
        }
    }

    pub fn from_celsius(self, celsius: f64) -> f64 {
        match self {
            TemperatureScale::Celsius => celsius,
            TemperatureScale::Fahrenheit => celsius * 9.0 / 5.0 + 32.0,
            TemperatureScale::Kelvin => celsius + 273.15,
        }
    }

    /// Readable form of the affine map from `self` to `target`
    pub fn formula_to(self, target: TemperatureScale) -> &'static str {
        use TemperatureScale::*;
        match (self, target) {
            (Celsius, Fahrenheit) => "°F = °C × 9/5 + 32",
            (Celsius, Kelvin) => "K = °C + 273.15",
            (Fahrenheit, Celsius) => "°C = (°F - 32) × 5/9",
            (Fahrenheit, Kelvin) => "K = (°F - 32) × 5/9 + 273.15",
            (Kelvin, Celsius) => "°C = K - 273.15",
            (Kelvin, Fahrenheit) => "°F = (K - 273.15) × 9/5 + 32",
            (Celsius, Celsius) => "°C = °C",
            (Fahrenheit, Fahrenheit) => "°F = °F",
            (Kelvin, Kelvin) => "K = K",
        }
    }
}

/// How a unit relates to its category's base unit
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Scaling {
    /// `value_base = value * factor`
    Linear { factor: f64 },
    /// Affine temperature scale
    Affine { scale: TemperatureScale },
}

/// A unit of measurement within one category
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Unit {
    /// Canonical key (e.g., "ft", "kg", "gpa4")
    pub symbol: &'static str,
    /// Display name (e.g., "foot")
    pub name: &'static str,
    pub category: Category,
    pub scaling: Scaling,
    /// Additional accepted spellings, lowercase
    #[serde(skip)]
    pub aliases: &'static [&'static str],
}

impl Unit {
    pub const fn linear(
        symbol: &'static str,
        name: &'static str,
        category: Category,
        factor: f64,
        aliases: &'static [&'static str],
    ) -> Self {
        Unit { symbol, name, category, scaling: Scaling::Linear { factor }, aliases }
    }

    pub const fn temperature(
        symbol: &'static str,
        name: &'static str,
        scale: TemperatureScale,
        aliases: &'static [&'static str],
    ) -> Self {
        Unit { symbol, name, category: Category::Temperature, scaling: Scaling::Affine { scale }, aliases }
    }

    /// Factor relative to the base unit, `None` for affine units
    pub fn factor(&self) -> Option<f64> {
        match self.scaling {
            Scaling::Linear { factor } => Some(factor),
            Scaling::Affine { .. } => None,
        }
    }

    pub fn is_base(&self) -> bool {
        self.symbol == self.category.base_symbol()
    }

    /// Whether `key` (already normalised) names this unit
    pub fn matches(&self, key: &str) -> bool {
        self.symbol == key || self.aliases.contains(&key)
    }

    /// Convert a value in this unit to the category's base unit
    pub fn to_base(&self, value: f64) -> f64 {
        match self.scaling {
            Scaling::Linear { factor } => value * factor,
            Scaling::Affine { scale } => scale.to_celsius(value),
        }
    }

    /// Convert a value in the category's base unit to this unit
    pub fn from_base(&self, value: f64) -> f64 {
        match self.scaling {
            Scaling::Linear { factor } => value / factor,
            Scaling::Affine { scale } => scale.from_celsius(value),
        }
    }
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol)
    }
}
