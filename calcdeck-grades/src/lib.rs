//! Calcdeck Grades - GPA, percentage and letter grades
//!
//! Supports the 4.0, 5.0 and 10.0 GPA scales. Each scale owns its own
//! descending `(threshold, grade)` table; one shared scan picks the first
//! threshold met.

mod scale;
mod gpa;
mod functions;

pub use scale::{Breakpoint, GpaScale, lookup};
pub use gpa::{
    Course, CumulativeGpa, GpaResult,
    cumulative_gpa, gpa_to_percentage, letter_grade, percentage_to_gpa,
};

use calcdeck_plugin::PluginRegistry;

/// Load grade functions into registry
pub fn load_grades_library(registry: PluginRegistry) -> PluginRegistry {
    registry
        .with_function(functions::GpaToPercentage)
        .with_function(functions::LetterGrade)
        .with_function(functions::PercentageToGpa)
        .with_function(functions::CumulativeGpaFn)
}
