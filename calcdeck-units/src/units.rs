//! Unit definitions organized by category

use std::collections::HashMap;
use std::sync::LazyLock;
use calcdeck_core::CalcError;
use crate::{Category, TemperatureScale, Unit};

/// Global unit registry
pub static UNITS: LazyLock<UnitRegistry> = LazyLock::new(UnitRegistry::new);

static LENGTH_UNITS: [Unit; 10] = [
    Unit::linear("m", "meter", Category::Length, 1.0, &["meter", "meters", "metre", "metres"]),
    Unit::linear("km", "kilometer", Category::Length, 1000.0, &["kilometer", "kilometers", "kilometre", "kilometres"]),
    Unit::linear("cm", "centimeter", Category::Length, 0.01, &["centimeter", "centimeters", "centimetre", "centimetres"]),
    Unit::linear("mm", "millimeter", Category::Length, 0.001, &["millimeter", "millimeters", "millimetre", "millimetres"]),
    Unit::linear("um", "micrometer", Category::Length, 0.000001, &["µm", "micrometer", "micrometers", "micron", "microns"]),
    Unit::linear("in", "inch", Category::Length, 0.0254, &["inch", "inches", "\""]),
    Unit::linear("ft", "foot", Category::Length, 0.3048, &["foot", "feet", "'"]),
    Unit::linear("yd", "yard", Category::Length, 0.9144, &["yard", "yards"]),
    Unit::linear("mi", "mile", Category::Length, 1609.344, &["mile", "miles"]),
    Unit::linear("nmi", "nautical mile", Category::Length, 1852.0, &["nautical mile", "nautical miles"]),
];

static WEIGHT_UNITS: [Unit; 7] = [
    Unit::linear("kg", "kilogram", Category::Weight, 1.0, &["kilogram", "kilograms", "kilo", "kilos"]),
    Unit::linear("g", "gram", Category::Weight, 0.001, &["gram", "grams"]),
    Unit::linear("mg", "milligram", Category::Weight, 0.000001, &["milligram", "milligrams"]),
    Unit::linear("t", "metric ton", Category::Weight, 1000.0, &["tonne", "tonnes", "metric ton", "metric tons"]),
    Unit::linear("lb", "pound", Category::Weight, 0.45359237, &["lbs", "pound", "pounds"]),
    Unit::linear("oz", "ounce", Category::Weight, 0.028349523125, &["ounce", "ounces"]),
    Unit::linear("st", "stone", Category::Weight, 6.35029318, &["stone", "stones"]),
];

static TIME_UNITS: [Unit; 8] = [
    Unit::linear("ms", "millisecond", Category::Time, 0.001, &["millisecond", "milliseconds"]),
    Unit::linear("s", "second", Category::Time, 1.0, &["sec", "secs", "second", "seconds"]),
    Unit::linear("min", "minute", Category::Time, 60.0, &["mins", "minute", "minutes"]),
    Unit::linear("h", "hour", Category::Time, 3600.0, &["hr", "hrs", "hour", "hours"]),
    Unit::linear("d", "day", Category::Time, 86400.0, &["day", "days"]),
    Unit::linear("wk", "week", Category::Time, 604800.0, &["week", "weeks"]),
    // Gregorian averages: 30.436875 and 365.2425 days
    Unit::linear("mo", "month", Category::Time, 2629746.0, &["month", "months"]),
    Unit::linear("yr", "year", Category::Time, 31556952.0, &["y", "year", "years"]),
];

static VOLUME_UNITS: [Unit; 10] = [
    Unit::linear("l", "liter", Category::Volume, 1.0, &["liter", "liters", "litre", "litres"]),
    Unit::linear("ml", "milliliter", Category::Volume, 0.001, &["milliliter", "milliliters", "millilitre", "millilitres"]),
    Unit::linear("m3", "cubic meter", Category::Volume, 1000.0, &["m³", "cubic meter", "cubic meters"]),
    // US customary
    Unit::linear("gal", "gallon", Category::Volume, 3.785411784, &["gallon", "gallons"]),
    Unit::linear("qt", "quart", Category::Volume, 0.946352946, &["quart", "quarts"]),
    Unit::linear("pt", "pint", Category::Volume, 0.473176473, &["pint", "pints"]),
    Unit::linear("cup", "cup", Category::Volume, 0.2365882365, &["cups"]),
    Unit::linear("floz", "fluid ounce", Category::Volume, 0.0295735295625, &["fl oz", "fl_oz", "fluid ounce", "fluid ounces"]),
    Unit::linear("tbsp", "tablespoon", Category::Volume, 0.01478676478125, &["tablespoon", "tablespoons"]),
    Unit::linear("tsp", "teaspoon", Category::Volume, 0.00492892159375, &["teaspoon", "teaspoons"]),
];

static TEMPERATURE_UNITS: [Unit; 3] = [
    Unit::temperature("c", "celsius", TemperatureScale::Celsius, &["°c", "celsius", "centigrade"]),
    Unit::temperature("f", "fahrenheit", TemperatureScale::Fahrenheit, &["°f", "fahrenheit"]),
    Unit::temperature("k", "kelvin", TemperatureScale::Kelvin, &["kelvin"]),
];

// One GPA point expressed in percentage points
static ACADEMIC_UNITS: [Unit; 4] = [
    Unit::linear("pct", "percentage", Category::AcademicScale, 1.0, &["%", "percent", "percentage"]),
    Unit::linear("gpa4", "GPA (4.0 scale)", Category::AcademicScale, 25.0, &["4", "4.0", "gpa4.0"]),
    Unit::linear("gpa5", "GPA (5.0 scale)", Category::AcademicScale, 20.0, &["5", "5.0", "gpa5.0"]),
    Unit::linear("gpa10", "GPA (10.0 scale)", Category::AcademicScale, 10.0, &["10", "10.0", "gpa10.0", "cgpa"]),
];

/// Registry of all known units, indexed per category by symbol and alias
pub struct UnitRegistry {
    index: HashMap<(Category, String), &'static Unit>,
}

impl UnitRegistry {
    pub fn new() -> Self {
        let mut registry = UnitRegistry { index: HashMap::new() };
        for category in Category::ALL {
            for unit in Self::table(category) {
                registry.index.insert((category, unit.symbol.to_string()), unit);
                for alias in unit.aliases {
                    registry.index.insert((category, (*alias).to_string()), unit);
                }
            }
        }
        registry
    }

    /// All units of a category, in display order
    pub fn table(category: Category) -> &'static [Unit] {
        match category {
            Category::Length => &LENGTH_UNITS,
            Category::Weight => &WEIGHT_UNITS,
            Category::Time => &TIME_UNITS,
            Category::Volume => &VOLUME_UNITS,
            Category::Temperature => &TEMPERATURE_UNITS,
            Category::AcademicScale => &ACADEMIC_UNITS,
        }
    }

    /// Look a unit up within one category
    pub fn get(&self, category: Category, key: &str) -> Result<&'static Unit, CalcError> {
        self.index
            .get(&(category, normalize_key(key)))
            .copied()
            .ok_or_else(|| CalcError::UnknownUnit {
                unit: key.to_string(),
                category: category.to_string(),
            })
    }

    /// Find the first category (in `Category::ALL` order) that knows `key`
    pub fn infer_category(&self, key: &str) -> Option<Category> {
        let key = normalize_key(key);
        Category::ALL
            .into_iter()
            .find(|c| self.index.contains_key(&(*c, key.clone())))
    }

    pub fn base_unit(&self, category: Category) -> &'static Unit {
        // Every table lists its base unit
        Self::table(category)
            .iter()
            .find(|u| u.is_base())
            .unwrap_or(&Self::table(category)[0])
    }
}

impl Default for UnitRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// Lowercase, trim and collapse internal whitespace
fn normalize_key(key: &str) -> String {
    key.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}
