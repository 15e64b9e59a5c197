//! Parsing and formatting helpers shared by the Discord commands.

use crate::{
    core::{catalogue, cycle::CycleOverview, grading, marks::MarkEntry},
    entities::{class, student_exam_result, weekly_exam},
    errors::{Error, Result},
};
use chrono::{NaiveDate, NaiveTime};
use std::{collections::HashMap, str::FromStr};

/// Parses a `YYYY-MM-DD` date.
pub fn parse_date(input: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(input.trim(), "%Y-%m-%d")
        .map_err(|_| Error::validation(format!("'{input}' is not a date in YYYY-MM-DD format")))
}

/// Parses an `HH:MM` time.
pub fn parse_time(input: &str) -> Result<NaiveTime> {
    NaiveTime::parse_from_str(input.trim(), "%H:%M")
        .map_err(|_| Error::validation(format!("'{input}' is not a time in HH:MM format")))
}

/// Parses one of the label enums (exam type, syllabus type, status, grade).
pub fn parse_label<T>(input: &str) -> Result<T>
where
    T: FromStr<Err = String>,
{
    input.parse().map_err(Error::validation)
}

/// Parses a comma or space separated list of ids.
pub fn parse_ids(input: &str) -> Result<Vec<i64>> {
    input
        .split(|c: char| c == ',' || c.is_whitespace())
        .filter(|part| !part.is_empty())
        .map(|part| {
            part.parse()
                .map_err(|_| Error::validation(format!("'{part}' is not a topic id")))
        })
        .collect()
}

/// Parses `student:marks` pairs such as `12:85, 13:67.5`.
pub fn parse_marks(input: &str) -> Result<Vec<MarkEntry>> {
    input
        .split(|c: char| c == ',' || c.is_whitespace())
        .filter(|part| !part.is_empty())
        .map(|part| {
            let invalid = || Error::validation(format!("'{part}' is not a student:marks pair"));
            let (student, marks) = part.split_once(':').ok_or_else(invalid)?;
            let student_id = student.parse().map_err(|_| invalid())?;
            let marks_obtained = marks.parse().map_err(|_| invalid())?;
            Ok(MarkEntry::new(student_id, marks_obtained))
        })
        .collect()
}

/// One-line summary of a cycle with its progress.
#[must_use]
pub fn format_cycle_line(overview: &CycleOverview) -> String {
    let c = &overview.cycle;
    format!(
        "`#{}` **{} Cycle {}** {} → {} {} {}% | week {} | {} day(s) left{}",
        c.id,
        c.exam_type,
        c.cycle_number,
        c.start_date,
        c.end_date,
        crate::core::cycle::format_progress_bar(overview.progress, Some(10)),
        overview.progress,
        overview.current_week,
        overview.days_remaining,
        if c.is_active { " | 🟢 active" } else { "" }
    )
}

/// One-line summary of an exam.
#[must_use]
pub fn format_exam_line(exam: &weekly_exam::Model, classes: &HashMap<i64, class::Model>) -> String {
    let class = classes
        .get(&exam.class_id)
        .map_or_else(
            || format!("class {}", exam.class_id),
            catalogue::class_label,
        );
    let week = exam
        .week_number
        .map(|w| format!(" | week {w}"))
        .unwrap_or_default();
    format!(
        "`#{}` **{}** ({class}) {} {} | {} min | {} marks{week} | {}",
        exam.id,
        exam.title,
        exam.exam_date,
        exam.exam_time.format("%H:%M"),
        exam.duration_minutes,
        exam.total_marks,
        exam.status
    )
}

/// One ranked line of an exam's submitted results, graded against the exam's
/// total marks.
#[must_use]
pub fn format_result_line(
    rank: usize,
    result: &student_exam_result::Model,
    total_marks: i32,
) -> String {
    format!(
        "{rank}. student `{}`: {} ({}) | {} correct, {} wrong",
        result.student_id,
        result.score,
        grading::grade_for(result.score, f64::from(total_marks)),
        result.correct_answers,
        result.wrong_answers
    )
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::entities::ExamType;

    #[test]
    fn test_parse_helpers() {
        let expected = NaiveDate::from_ymd_opt(2024, 1, 21).unwrap();
        assert_eq!(parse_date("2024-01-21").unwrap(), expected);
        let bad_date = parse_date("21/01/2024");
        assert!(matches!(bad_date, Err(Error::Validation { .. })));
        let expected = NaiveTime::from_hms_opt(9, 30, 0).unwrap();
        assert_eq!(parse_time("09:30").unwrap(), expected);
        assert!(parse_time("9.30am").is_err());
        assert_eq!(parse_label::<ExamType>("neet").unwrap(), ExamType::Neet);
        let bad_label = parse_label::<ExamType>("sat");
        assert!(matches!(bad_label, Err(Error::Validation { .. })));
        assert_eq!(parse_ids("3, 5 8").unwrap(), vec![3, 5, 8]);
        assert!(parse_ids("3,x").is_err());
        assert!(parse_ids("").unwrap().is_empty());
    }

    #[test]
    fn test_parse_marks() {
        let entries = parse_marks("12:85, 13:67.5").unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].student_id, 12);
        assert!((entries[1].marks_obtained - 67.5).abs() < f64::EPSILON);
        assert!(entries.iter().all(|e| e.grade.is_none()));

        let bad_pair = parse_marks("12=85");
        assert!(matches!(bad_pair, Err(Error::Validation { .. })));
        assert!(parse_marks("x:10").is_err());
        assert!(parse_marks("").unwrap().is_empty());
    }

    #[test]
    fn test_format_result_line_grades_against_total() {
        let result = student_exam_result::Model {
            id: 1,
            exam_id: 7,
            student_id: 42,
            score: 270.0,
            correct_answers: 70,
            wrong_answers: 5,
            submitted_at: chrono::Utc::now(),
        };
        assert_eq!(
            format_result_line(1, &result, 300),
            "1. student `42`: 270 (A+) | 70 correct, 5 wrong"
        );
        assert!(format_result_line(2, &result, 600).contains("(C)"));
    }
}
