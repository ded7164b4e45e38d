//! Grading scales and their letter-grade tables

use std::fmt;
use std::str::FromStr;
use serde::{Deserialize, Serialize};
use calcdeck_core::CalcError;

/// A `(threshold, grade)` breakpoint
pub type Breakpoint = (f64, &'static str);

// Each table is strictly descending. The three scales are independent;
// they do not share letters or cut-offs.
static FOUR_POINT: [Breakpoint; 10] = [
    (3.7, "A"),
    (3.3, "A-"),
    (3.0, "B+"),
    (2.7, "B"),
    (2.3, "B-"),
    (2.0, "C+"),
    (1.7, "C"),
    (1.3, "C-"),
    (1.0, "D+"),
    (0.7, "D"),
];

static FIVE_POINT: [Breakpoint; 7] = [
    (4.5, "A+"),
    (4.0, "A"),
    (3.5, "B+"),
    (3.0, "B"),
    (2.5, "C+"),
    (2.0, "C"),
    (1.0, "D"),
];

static TEN_POINT: [Breakpoint; 7] = [
    (9.0, "A+"),
    (8.0, "A"),
    (7.0, "B+"),
    (6.0, "B"),
    (5.0, "C+"),
    (4.0, "C"),
    (3.0, "D"),
];

/// Academic GPA scale, identified by its maximum
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GpaScale {
    #[serde(rename = "4.0")]
    Four,
    #[serde(rename = "5.0")]
    Five,
    #[serde(rename = "10.0")]
    Ten,
}

impl GpaScale {
    pub const ALL: [GpaScale; 3] = [GpaScale::Four, GpaScale::Five, GpaScale::Ten];

    /// GPA that corresponds to full marks
    pub fn max(&self) -> f64 {
        match self {
            GpaScale::Four => 4.0,
            GpaScale::Five => 5.0,
            GpaScale::Ten => 10.0,
        }
    }

    pub fn from_max(max: f64) -> Option<GpaScale> {
        GpaScale::ALL.into_iter().find(|s| s.max() == max)
    }

    pub fn breakpoints(&self) -> &'static [Breakpoint] {
        match self {
            GpaScale::Four => &FOUR_POINT,
            GpaScale::Five => &FIVE_POINT,
            GpaScale::Ten => &TEN_POINT,
        }
    }

    /// Grade given when no breakpoint is met
    pub fn bottom_grade(&self) -> &'static str {
        "F"
    }

    /// Raw percentage for a GPA on this scale, before saturation
    pub fn raw_percentage(&self, gpa: f64) -> f64 {
        match self {
            GpaScale::Four => gpa / 4.0 * 100.0,
            GpaScale::Five => gpa / 5.0 * 100.0,
            GpaScale::Ten => gpa * 10.0,
        }
    }

    /// First breakpoint the GPA meets or exceeds, scanning high to low
    pub fn grade_for(&self, gpa: f64) -> &'static str {
        lookup(self.breakpoints(), gpa).unwrap_or_else(|| self.bottom_grade())
    }
}

/// Shared breakpoint scan used by every scale
pub fn lookup(table: &[Breakpoint], value: f64) -> Option<&'static str> {
    table
        .iter()
        .find(|(threshold, _)| value >= *threshold)
        .map(|(_, grade)| *grade)
}

impl fmt::Display for GpaScale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.1}", self.max())
    }
}

impl FromStr for GpaScale {
    type Err = CalcError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "4" | "4.0" => Ok(GpaScale::Four),
            "5" | "5.0" => Ok(GpaScale::Five),
            "10" | "10.0" => Ok(GpaScale::Ten),
            other => Err(CalcError::UnknownScale(other.to_string())),
        }
    }
}
