//! GPA ↔ percentage conversion and grading

use serde::Serialize;
use tracing::debug;
use calcdeck_core::{CalcError, ensure_finite};
use crate::GpaScale;

/// GPA expressed as a percentage and letter grade
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GpaResult {
    /// GPA as given (or as derived, for `percentage_to_gpa`)
    pub gpa: f64,
    /// Saturated at 100
    pub percentage: f64,
    pub scale: GpaScale,
    pub grade: &'static str,
}

/// Map a GPA to a percentage and letter grade.
///
/// Returns `None` for NaN, infinite or negative GPAs. A GPA above the
/// scale's maximum is accepted and its percentage saturates at 100.
pub fn gpa_to_percentage(gpa: f64, scale: GpaScale) -> Option<GpaResult> {
    if !gpa.is_finite() || gpa < 0.0 {
        debug!(gpa, %scale, "gpa rejected");
        return None;
    }

    let percentage = scale.raw_percentage(gpa).min(100.0);
    let grade = scale.grade_for(gpa);
    debug!(gpa, %scale, percentage, grade, "gpa converted");

    Some(GpaResult { gpa, percentage, scale, grade })
}

/// Letter grade alone, with the same validity rules as `gpa_to_percentage`
pub fn letter_grade(gpa: f64, scale: GpaScale) -> Option<&'static str> {
    gpa_to_percentage(gpa, scale).map(|r| r.grade)
}

/// Inverse of `gpa_to_percentage`: percentages above 100 are treated as 100.
pub fn percentage_to_gpa(percentage: f64, scale: GpaScale) -> Option<GpaResult> {
    if !percentage.is_finite() || percentage < 0.0 {
        return None;
    }

    let percentage = percentage.min(100.0);
    let gpa = match scale {
        GpaScale::Ten => percentage / 10.0,
        GpaScale::Four | GpaScale::Five => percentage / 100.0 * scale.max(),
    };

    Some(GpaResult { gpa, percentage, scale, grade: scale.grade_for(gpa) })
}

/// One course in a cumulative GPA calculation
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Course {
    pub grade_points: f64,
    pub credits: f64,
}

impl Course {
    pub fn new(grade_points: f64, credits: f64) -> Self {
        Course { grade_points, credits }
    }
}

/// Credit-weighted GPA across courses
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CumulativeGpa {
    pub gpa: f64,
    pub total_credits: f64,
    /// Sum of `grade_points * credits`
    pub quality_points: f64,
    pub courses: usize,
}

pub fn cumulative_gpa(courses: &[Course]) -> Result<CumulativeGpa, CalcError> {
    if courses.is_empty() {
        return Err(CalcError::invalid("at least one course is required"));
    }

    let mut total_credits = 0.0;
    let mut quality_points = 0.0;
    for (i, course) in courses.iter().enumerate() {
        let points = ensure_finite(course.grade_points, &format!("grade_points[{}]", i))?;
        let credits = ensure_finite(course.credits, &format!("credits[{}]", i))?;
        if points < 0.0 || credits < 0.0 {
            return Err(CalcError::invalid(format!("course {} has negative grade points or credits", i)));
        }
        total_credits += credits;
        quality_points += points * credits;
    }

    if total_credits == 0.0 {
        return Err(CalcError::DivisionByZero);
    }

    let total_credits = ensure_finite(total_credits, "total credits")?;
    let quality_points = ensure_finite(quality_points, "quality points")?;

    Ok(CumulativeGpa {
        gpa: ensure_finite(quality_points / total_credits, "gpa")?,
        total_credits,
        quality_points,
        courses: courses.len(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_marks_is_one_hundred() {
        for scale in GpaScale::ALL {
            let result = gpa_to_percentage(scale.max(), scale).unwrap();
            assert_eq!(result.percentage, 100.0, "{}", scale);
        }
    }

    #[test]
    fn test_percentage_saturates() {
        for scale in GpaScale::ALL {
            let result = gpa_to_percentage(scale.max() * 2.0, scale).unwrap();
            assert_eq!(result.percentage, 100.0, "{}", scale);
            assert_eq!(result.gpa, scale.max() * 2.0);
        }
    }

    #[test]
    fn test_reference_values() {
        let r = gpa_to_percentage(4.0, GpaScale::Four).unwrap();
        assert_eq!((r.percentage, r.grade), (100.0, "A"));

        let r = gpa_to_percentage(3.5, GpaScale::Four).unwrap();
        assert_eq!((r.percentage, r.grade), (87.5, "A-"));

        let r = gpa_to_percentage(8.5, GpaScale::Ten).unwrap();
        assert_eq!((r.percentage, r.grade), (85.0, "A"));

        let r = gpa_to_percentage(4.0, GpaScale::Five).unwrap();
        assert_eq!((r.percentage, r.grade), (80.0, "A"));
    }

    #[test]
    fn test_invalid_gpa_has_no_result() {
        assert_eq!(gpa_to_percentage(f64::NAN, GpaScale::Four), None);
        assert_eq!(gpa_to_percentage(-0.1, GpaScale::Ten), None);
        assert_eq!(gpa_to_percentage(f64::INFINITY, GpaScale::Five), None);
        assert_eq!(letter_grade(-1.0, GpaScale::Four), None);
    }

    #[test]
    fn test_zero_gpa_is_a_result() {
        let r = gpa_to_percentage(0.0, GpaScale::Four).unwrap();
        assert_eq!(r.percentage, 0.0);
        assert_eq!(r.grade, "F");
    }

    #[test]
    fn test_percentage_to_gpa() {
        let r = percentage_to_gpa(87.5, GpaScale::Four).unwrap();
        assert_eq!(r.gpa, 3.5);
        assert_eq!(r.grade, "A-");

        let r = percentage_to_gpa(150.0, GpaScale::Ten).unwrap();
        assert_eq!((r.gpa, r.percentage), (10.0, 100.0));

        assert_eq!(percentage_to_gpa(-5.0, GpaScale::Five), None);
    }

    #[test]
    fn test_cumulative_gpa() {
        let courses = [Course::new(4.0, 3.0), Course::new(3.0, 4.0), Course::new(2.0, 1.0)];
        let result = cumulative_gpa(&courses).unwrap();
        assert_eq!(result.total_credits, 8.0);
        assert_eq!(result.quality_points, 26.0);
        assert_eq!(result.gpa, 3.25);
        assert_eq!(result.courses, 3);
    }

    #[test]
    fn test_cumulative_gpa_errors() {
        assert!(matches!(cumulative_gpa(&[]), Err(CalcError::InvalidInput(_))));
        assert_eq!(cumulative_gpa(&[Course::new(3.0, 0.0)]), Err(CalcError::DivisionByZero));
        assert!(matches!(
            cumulative_gpa(&[Course::new(f64::NAN, 3.0)]),
            Err(CalcError::InvalidInput(_))
        ));
        assert!(matches!(
            cumulative_gpa(&[Course::new(3.0, -1.0)]),
            Err(CalcError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_cumulative_gpa_overflow() {
        let result = cumulative_gpa(&[Course::new(1e308, 10.0)]);
        assert!(matches!(result, Err(CalcError::InvalidInput(_))));
        let result = cumulative_gpa(&[Course::new(4.0, 1e308), Course::new(4.0, 1e308)]);
        assert!(matches!(result, Err(CalcError::InvalidInput(_))));
    }

    #[test]
    fn test_idempotent() {
        assert_eq!(gpa_to_percentage(3.14, GpaScale::Four), gpa_to_percentage(3.14, GpaScale::Four));
    }
}
