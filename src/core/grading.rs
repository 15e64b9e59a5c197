//! Grade banding.
//!
//! Maps a raw score to a letter grade through fixed, descending,
//! inclusive-lower-bound percentage thresholds. The result is a suggestion for
//! marks entry; the stored grade may be overridden.

use crate::entities::Grade;

/// Maximum marks used when the caller supplies a non-positive maximum.
pub const DEFAULT_MAX_MARKS: f64 = 100.0;

/// Lower bounds, best band first. Anything below the last bound is `F`.
const GRADE_THRESHOLDS: [(f64, Grade); 7] = [
    (90.0, Grade::APlus),
    (80.0, Grade::A),
    (70.0, Grade::BPlus),
    (60.0, Grade::B),
    (50.0, Grade::CPlus),
    (40.0, Grade::C),
    (33.0, Grade::D),
];

/// Computes `marks_obtained / max_marks * 100`, substituting
/// [`DEFAULT_MAX_MARKS`] when `max_marks` is zero, negative or not finite.
#[must_use]
pub fn percentage(marks_obtained: f64, max_marks: f64) -> f64 {
    let max = if max_marks.is_finite() && max_marks > 0.0 {
        max_marks
    } else {
        DEFAULT_MAX_MARKS
    };
    marks_obtained / max * 100.0
}

/// Returns the grade band for a percentage.
///
/// Negative and NaN percentages fall through every threshold and band as `F`.
#[must_use]
pub fn grade_for_percentage(percent: f64) -> Grade {
    GRADE_THRESHOLDS
        .iter()
        .find(|(lower, _)| percent >= *lower)
        .map_or(Grade::F, |(_, grade)| *grade)
}

/// Returns the grade band for `marks_obtained` out of `max_marks`.
#[must_use]
pub fn grade_for(marks_obtained: f64, max_marks: f64) -> Grade {
    grade_for_percentage(percentage(marks_obtained, max_marks))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_band_boundaries() {
        assert_eq!(grade_for(90.0, 100.0), Grade::APlus);
        assert_eq!(grade_for(89.999, 100.0), Grade::A);
        assert_eq!(grade_for(80.0, 100.0), Grade::A);
        assert_eq!(grade_for(79.9, 100.0), Grade::BPlus);
        assert_eq!(grade_for(70.0, 100.0), Grade::BPlus);
        assert_eq!(grade_for(60.0, 100.0), Grade::B);
        assert_eq!(grade_for(50.0, 100.0), Grade::CPlus);
        assert_eq!(grade_for(40.0, 100.0), Grade::C);
        assert_eq!(grade_for(33.0, 100.0), Grade::D);
        assert_eq!(grade_for(32.9, 100.0), Grade::F);
        assert_eq!(grade_for(0.0, 100.0), Grade::F);
    }

    #[test]
    fn test_scales_by_max_marks() {
        assert_eq!(grade_for(45.0, 50.0), Grade::APlus);
        assert_eq!(grade_for(195.0, 300.0), Grade::B);
        assert_eq!(grade_for(300.0, 300.0), Grade::APlus);
    }

    #[test]
    fn test_non_positive_max_defaults_to_hundred() {
        assert_eq!(grade_for(95.0, 0.0), Grade::APlus);
        assert_eq!(grade_for(35.0, -10.0), Grade::D);
        assert_eq!(grade_for(85.0, f64::NAN), Grade::A);
    }

    #[test]
    fn test_negative_scores_are_failing() {
        assert_eq!(grade_for(-4.0, 100.0), Grade::F);
        assert_eq!(grade_for_percentage(f64::NAN), Grade::F);
    }

    #[test]
    fn test_grading_is_deterministic() {
        for marks in 0..=100 {
            let marks = f64::from(marks);
            assert_eq!(grade_for(marks, 100.0), grade_for(marks, 100.0));
        }
    }
}
