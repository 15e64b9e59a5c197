//! Per-exam student marks.
//!
//! Marks are saved for a whole exam at once: the exam's previous marks are
//! deleted and the submitted set inserted in one transaction. A grade missing
//! from an entry is derived from the marks and the exam's total; a grade that
//! is present is stored as given.

use crate::{
    core::grading,
    entities::{ExamMark, Grade, WeeklyExam, exam_mark},
    errors::{Error, Result},
};
use sea_orm::{QueryOrder, Set, TransactionTrait, prelude::*};
use std::collections::HashSet;
use tracing::{info, warn};

/// One student's marks as entered by the operator.
#[derive(Debug, Clone, PartialEq)]
pub struct MarkEntry {
    /// Student reference
    pub student_id: i64,
    /// Raw marks; negative values are allowed under negative marking
    pub marks_obtained: f64,
    /// Grade override; derived when `None`
    pub grade: Option<Grade>,
    /// Free-text remarks
    pub remarks: Option<String>,
}

impl MarkEntry {
    /// Entry with a derived grade and no remarks.
    #[must_use]
    pub const fn new(student_id: i64, marks_obtained: f64) -> Self {
        Self {
            student_id,
            marks_obtained,
            grade: None,
            remarks: None,
        }
    }

    /// Overrides the derived grade.
    #[must_use]
    pub fn with_grade(mut self, grade: Grade) -> Self {
        self.grade = Some(grade);
        self
    }

    /// Attaches remarks.
    #[must_use]
    pub fn with_remarks(mut self, remarks: impl Into<String>) -> Self {
        self.remarks = Some(remarks.into());
        self
    }
}

/// Replaces every mark recorded for `exam_id` with `entries`.
///
/// Each student may appear once and marks must be finite. Marks outside
/// `0..=total_marks` are accepted with a warning.
pub async fn save_marks(
    db: &DatabaseConnection,
    exam_id: i64,
    entries: Vec<MarkEntry>,
) -> Result<Vec<exam_mark::Model>> {
    let mut seen = HashSet::new();
    for entry in &entries {
        if !entry.marks_obtained.is_finite() {
            return Err(Error::validation(format!(
                "Marks for student {} must be a number",
                entry.student_id
            )));
        }
        if !seen.insert(entry.student_id) {
            return Err(Error::validation(format!(
                "Student {} appears more than once",
                entry.student_id
            )));
        }
    }

    let txn = db.begin().await?;

    let exam = WeeklyExam::find_by_id(exam_id)
        .one(&txn)
        .await?
        .ok_or(Error::ExamNotFound { id: exam_id })?;
    let max_marks = f64::from(exam.total_marks);

    let removed = delete_marks_for_exam(&txn, exam_id).await?;

    let mut saved = Vec::with_capacity(entries.len());
    for entry in entries {
        if entry.marks_obtained < 0.0 || entry.marks_obtained > max_marks {
            warn!(
                "Student {} scored {} outside 0..={} on exam {exam_id}",
                entry.student_id, entry.marks_obtained, exam.total_marks
            );
        }

        let grade = entry
            .grade
            .unwrap_or_else(|| grading::grade_for(entry.marks_obtained, max_marks));
        let mark = exam_mark::ActiveModel {
            exam_id: Set(exam_id),
            student_id: Set(entry.student_id),
            marks_obtained: Set(entry.marks_obtained),
            grade: Set(grade),
            remarks: Set(entry.remarks),
            ..Default::default()
        };
        saved.push(mark.insert(&txn).await?);
    }

    txn.commit().await?;

    info!(
        "Replaced marks of exam {exam_id}: {removed} removed, {} saved",
        saved.len()
    );
    Ok(saved)
}

/// Removes every mark recorded for an exam. Returns the number removed.
pub async fn delete_marks_for_exam<C>(db: &C, exam_id: i64) -> Result<u64>
where
    C: ConnectionTrait,
{
    let result = ExamMark::delete_many()
        .filter(exam_mark::Column::ExamId.eq(exam_id))
        .exec(db)
        .await?;
    Ok(result.rows_affected)
}

/// Marks recorded for an exam, ordered by student.
pub async fn marks_for_exam(
    db: &DatabaseConnection,
    exam_id: i64,
) -> Result<Vec<exam_mark::Model>> {
    ExamMark::find()
        .filter(exam_mark::Column::ExamId.eq(exam_id))
        .order_by_asc(exam_mark::Column::StudentId)
        .all(db)
        .await
        .map_err(Into::into)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::core::weekly_exam::{self, ExamInput};
    use crate::entities::SyllabusType;
    use crate::test_utils::*;

    #[tokio::test]
    async fn test_save_marks_derives_grades() -> Result<()> {
        let (db, _class, exam) = setup_with_exam().await?;

        let saved = save_marks(
            &db,
            exam.id,
            vec![
                MarkEntry::new(3, 91.0),
                MarkEntry::new(1, 33.0).with_remarks("Needs revision"),
                MarkEntry::new(2, -2.0),
            ],
        )
        .await?;
        assert_eq!(saved.len(), 3);

        let stored = marks_for_exam(&db, exam.id).await?;
        let grades: Vec<(i64, Grade)> = stored.iter().map(|m| (m.student_id, m.grade)).collect();
        let expected = vec![(1, Grade::D), (2, Grade::F), (3, Grade::APlus)];
        assert_eq!(grades, expected);
        assert_eq!(stored[0].remarks.as_deref(), Some("Needs revision"));

        Ok(())
    }

    #[tokio::test]
    async fn test_grades_use_exam_total_marks() -> Result<()> {
        let db = setup_test_db().await?;
        let class = create_test_class(&db, "Class 12", "A").await?;
        let exam_date = chrono::NaiveDate::from_ymd_opt(2024, 1, 8).unwrap();
        let mut input = ExamInput::new(class.id, "Full Mock", exam_date, SyllabusType::Competitive);
        input.total_marks = 300;
        let exam = weekly_exam::create_exam(&db, input).await?;

        let saved = save_marks(&db, exam.id, vec![MarkEntry::new(1, 150.0)]).await?;
        assert_eq!(saved[0].grade, Grade::CPlus);

        Ok(())
    }

    #[tokio::test]
    async fn test_grade_override_is_kept() -> Result<()> {
        let (db, _class, exam) = setup_with_exam().await?;

        let graded = MarkEntry::new(1, 20.0).with_grade(Grade::C);
        let saved = save_marks(&db, exam.id, vec![graded]).await?;
        assert_eq!(saved[0].grade, Grade::C);

        Ok(())
    }

    #[tokio::test]
    async fn test_save_replaces_previous_marks() -> Result<()> {
        let (db, _class, exam) = setup_with_exam().await?;

        let first = vec![MarkEntry::new(1, 50.0), MarkEntry::new(2, 60.0)];
        save_marks(&db, exam.id, first).await?;
        save_marks(&db, exam.id, vec![MarkEntry::new(3, 70.0)]).await?;

        let stored = marks_for_exam(&db, exam.id).await?;
        assert_eq!(stored.len(), 1);
        assert_eq!(stored[0].student_id, 3);

        save_marks(&db, exam.id, Vec::new()).await?;
        assert!(marks_for_exam(&db, exam.id).await?.is_empty());

        Ok(())
    }

    #[tokio::test]
    async fn test_invalid_entries_leave_marks_untouched() -> Result<()> {
        let (db, _class, exam) = setup_with_exam().await?;
        save_marks(&db, exam.id, vec![MarkEntry::new(1, 50.0)]).await?;

        let twice = vec![MarkEntry::new(2, 1.0), MarkEntry::new(2, 2.0)];
        let duplicate = save_marks(&db, exam.id, twice).await;
        assert!(matches!(duplicate, Err(Error::Validation { .. })));

        let not_a_number = save_marks(&db, exam.id, vec![MarkEntry::new(2, f64::NAN)]).await;
        assert!(matches!(not_a_number, Err(Error::Validation { .. })));

        let stored = marks_for_exam(&db, exam.id).await?;
        assert_eq!(stored.len(), 1);
        assert_eq!(stored[0].student_id, 1);

        Ok(())
    }

    #[tokio::test]
    async fn test_save_marks_for_missing_exam() -> Result<()> {
        let db = setup_test_db().await?;
        let result = save_marks(&db, 12, vec![MarkEntry::new(1, 10.0)]).await;
        assert!(matches!(result, Err(Error::ExamNotFound { id: 12 })));
        Ok(())
    }
}
