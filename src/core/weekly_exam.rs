//! Weekly exam business logic - scheduling, editing, status transitions and
//! listing.
//!
//! Exams are created `scheduled` and only move forward one step at a time
//! (`scheduled` → `live` → `completed`) when an operator asks. Edits replace
//! every mutable field but never touch the status.

use crate::{
    core::{catalogue, marks, syllabus},
    entities::{ExamStatus, SyllabusType, WeeklyExam, class, weekly_exam},
    errors::{Error, Result},
};
use chrono::{NaiveDate, NaiveTime, Utc};
use sea_orm::{QueryOrder, QuerySelect, Set, TransactionTrait, prelude::*, sea_query::Expr};
use std::collections::HashMap;
use tracing::{info, warn};

/// Highest week number inside a cycle.
pub const MAX_WEEK_NUMBER: i32 = 3;

/// Operator-supplied fields of a weekly exam, used for create and full update.
#[derive(Debug, Clone, PartialEq)]
pub struct ExamInput {
    /// Class sitting the exam (required)
    pub class_id: Option<i64>,
    /// Syllabus track
    pub syllabus_type: SyllabusType,
    /// Owning cycle; ignored for general exams
    pub cycle_id: Option<i64>,
    /// Week inside the cycle (1-3); ignored for general exams
    pub week_number: Option<i32>,
    /// Title (required)
    pub title: String,
    /// Exam day (required)
    pub exam_date: Option<NaiveDate>,
    /// Start time
    pub exam_time: NaiveTime,
    /// Length in minutes, positive
    pub duration_minutes: i32,
    /// Maximum marks, positive
    pub total_marks: i32,
    /// Whether wrong answers cost marks
    pub negative_marking: bool,
    /// Marks deducted per wrong answer, non-negative
    pub negative_marks_value: f64,
    /// Whether students get a reminder
    pub reminder_enabled: bool,
}

impl ExamInput {
    /// Input for a one-hour, 100-mark exam at 09:00 without negative marking.
    #[must_use]
    pub fn new(
        class_id: i64,
        title: impl Into<String>,
        exam_date: NaiveDate,
        syllabus_type: SyllabusType,
    ) -> Self {
        Self {
            class_id: Some(class_id),
            syllabus_type,
            cycle_id: None,
            week_number: None,
            title: title.into(),
            exam_date: Some(exam_date),
            exam_time: NaiveTime::from_hms_opt(9, 0, 0).unwrap_or(NaiveTime::MIN),
            duration_minutes: 60,
            total_marks: 100,
            negative_marking: false,
            negative_marks_value: 0.0,
            reminder_enabled: true,
        }
    }

    /// Ties the exam to a week of a cycle.
    #[must_use]
    pub fn in_cycle(mut self, cycle_id: i64, week_number: i32) -> Self {
        self.cycle_id = Some(cycle_id);
        self.week_number = Some(week_number);
        self
    }
}

/// Input that passed validation, with cycle fields normalised.
struct ValidExam {
    class_id: i64,
    exam_date: NaiveDate,
    title: String,
    cycle_id: Option<i64>,
    week_number: Option<i32>,
    negative_marks_value: f64,
}

fn validate(input: &ExamInput) -> Result<ValidExam> {
    let class_id = input
        .class_id
        .ok_or_else(|| Error::validation("Class is required"))?;
    let title = input.title.trim();
    if title.is_empty() {
        return Err(Error::validation("Title is required"));
    }
    let exam_date = input
        .exam_date
        .ok_or_else(|| Error::validation("Exam date is required"))?;
    if input.duration_minutes <= 0 {
        return Err(Error::validation(
            "Duration must be a positive number of minutes",
        ));
    }
    if input.total_marks <= 0 {
        return Err(Error::validation("Total marks must be positive"));
    }
    if !input.negative_marks_value.is_finite() || input.negative_marks_value < 0.0 {
        return Err(Error::validation("Negative marks value cannot be negative"));
    }

    let (cycle_id, week_number) = match input.syllabus_type {
        SyllabusType::General => (None, None),
        SyllabusType::Competitive => (input.cycle_id, input.week_number),
    };
    if week_number.is_some_and(|week| !(1..=MAX_WEEK_NUMBER).contains(&week)) {
        return Err(Error::validation(format!(
            "Week number must be between 1 and {MAX_WEEK_NUMBER}"
        )));
    }

    Ok(ValidExam {
        class_id,
        exam_date,
        title: title.to_string(),
        cycle_id,
        week_number,
        negative_marks_value: if input.negative_marking {
            input.negative_marks_value
        } else {
            0.0
        },
    })
}

fn apply(model: &mut weekly_exam::ActiveModel, input: &ExamInput, valid: ValidExam) {
    model.class_id = Set(valid.class_id);
    model.syllabus_type = Set(input.syllabus_type);
    model.cycle_id = Set(valid.cycle_id);
    model.week_number = Set(valid.week_number);
    model.title = Set(valid.title);
    model.exam_date = Set(valid.exam_date);
    model.exam_time = Set(input.exam_time);
    model.duration_minutes = Set(input.duration_minutes);
    model.total_marks = Set(input.total_marks);
    model.negative_marking = Set(input.negative_marking);
    model.negative_marks_value = Set(valid.negative_marks_value);
    model.reminder_enabled = Set(input.reminder_enabled);
}

async fn ensure_class(db: &DatabaseConnection, class_id: i64) -> Result<()> {
    catalogue::get_class_by_id(db, class_id)
        .await?
        .map(|_| ())
        .ok_or(Error::ClassNotFound { id: class_id })
}

/// Schedules a new exam in the `scheduled` state.
///
/// The cycle and week are stored as given; they are not checked against the
/// cycle's date window.
pub async fn create_exam(db: &DatabaseConnection, input: ExamInput) -> Result<weekly_exam::Model> {
    let valid = validate(&input)?;
    ensure_class(db, valid.class_id).await?;

    let now = Utc::now();
    let mut exam = weekly_exam::ActiveModel {
        status: Set(ExamStatus::Scheduled),
        created_at: Set(now),
        updated_at: Set(now),
        ..Default::default()
    };
    apply(&mut exam, &input, valid);

    let created = exam.insert(db).await?;
    info!(
        "Scheduled exam {} '{}' for class {} on {}",
        created.id, created.title, created.class_id, created.exam_date
    );
    Ok(created)
}

/// Replaces every mutable field of an exam. The status is kept.
pub async fn update_exam(
    db: &DatabaseConnection,
    exam_id: i64,
    input: ExamInput,
) -> Result<weekly_exam::Model> {
    let valid = validate(&input)?;

    let existing = get_exam(db, exam_id)
        .await?
        .ok_or(Error::ExamNotFound { id: exam_id })?;
    ensure_class(db, valid.class_id).await?;

    let mut active_model: weekly_exam::ActiveModel = existing.into();
    apply(&mut active_model, &input, valid);
    active_model.updated_at = Set(Utc::now());
    Ok(active_model.update(db).await?)
}

/// Moves an exam to `new_status`, which must be the single next state of its
/// current status.
///
/// The write only applies while the exam still has the status that was
/// checked, so two racing requests cannot both advance it.
pub async fn advance(
    db: &DatabaseConnection,
    exam_id: i64,
    new_status: ExamStatus,
) -> Result<weekly_exam::Model> {
    let existing = get_exam(db, exam_id)
        .await?
        .ok_or(Error::ExamNotFound { id: exam_id })?;
    let from = existing.status;

    if !from.can_transition_to(new_status) {
        warn!("Rejected status change of exam {exam_id} from {from} to {new_status}");
        return Err(Error::InvalidTransition {
            from,
            to: new_status,
        });
    }

    let result = WeeklyExam::update_many()
        .col_expr(weekly_exam::Column::Status, Expr::value(new_status))
        .col_expr(weekly_exam::Column::UpdatedAt, Expr::value(Utc::now()))
        .filter(weekly_exam::Column::Id.eq(exam_id))
        .filter(weekly_exam::Column::Status.eq(from))
        .exec(db)
        .await?;

    let current = get_exam(db, exam_id)
        .await?
        .ok_or(Error::ExamNotFound { id: exam_id })?;
    if result.rows_affected == 0 {
        warn!(
            "Exam {exam_id} changed to {} before it could move to {new_status}",
            current.status
        );
        return Err(Error::InvalidTransition {
            from: current.status,
            to: new_status,
        });
    }

    info!("Exam {exam_id} moved from {from} to {new_status}");
    Ok(current)
}

/// Deletes an exam together with its syllabus links and marks.
/// Returns false if the exam did not exist.
pub async fn delete_exam(db: &DatabaseConnection, exam_id: i64) -> Result<bool> {
    let txn = db.begin().await?;

    let links = syllabus::delete_links_for_exam(&txn, exam_id).await?;
    let marks = marks::delete_marks_for_exam(&txn, exam_id).await?;
    let result = WeeklyExam::delete_by_id(exam_id).exec(&txn).await?;

    txn.commit().await?;

    if result.rows_affected > 0 {
        info!("Deleted exam {exam_id} with {links} syllabus link(s) and {marks} mark(s)");
    }
    Ok(result.rows_affected > 0)
}

/// Finds an exam by id, returning None if it does not exist.
pub async fn get_exam(db: &DatabaseConnection, exam_id: i64) -> Result<Option<weekly_exam::Model>> {
    WeeklyExam::find_by_id(exam_id)
        .one(db)
        .await
        .map_err(Into::into)
}

/// Exams scheduled inside a cycle, ordered by week then date.
pub async fn exams_for_cycle(
    db: &DatabaseConnection,
    cycle_id: i64,
) -> Result<Vec<weekly_exam::Model>> {
    WeeklyExam::find()
        .filter(weekly_exam::Column::CycleId.eq(cycle_id))
        .order_by_asc(weekly_exam::Column::WeekNumber)
        .order_by_asc(weekly_exam::Column::ExamDate)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Number of exams in each cycle, keyed by cycle id. Cycles without exams are
/// absent.
pub async fn exam_counts_by_cycle(db: &DatabaseConnection) -> Result<HashMap<i64, i64>> {
    let counts: Vec<(i64, i64)> = WeeklyExam::find()
        .select_only()
        .column(weekly_exam::Column::CycleId)
        .column_as(weekly_exam::Column::Id.count(), "exam_count")
        .filter(weekly_exam::Column::CycleId.is_not_null())
        .group_by(weekly_exam::Column::CycleId)
        .into_tuple()
        .all(db)
        .await?;
    Ok(counts.into_iter().collect())
}

/// Listing filter. Every set field must match.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExamFilter {
    /// Exact syllabus type
    pub syllabus_type: SyllabusType,
    /// Exact class
    pub class_id: Option<i64>,
    /// Case-insensitive substring of the title or the class label
    pub search_text: Option<String>,
    /// Exact status
    pub status: Option<ExamStatus>,
}

impl ExamFilter {
    /// Filter on syllabus type only.
    #[must_use]
    pub const fn new(syllabus_type: SyllabusType) -> Self {
        Self {
            syllabus_type,
            class_id: None,
            search_text: None,
            status: None,
        }
    }
}

/// Applies `filter` to `exams`, using `classes` for class labels. Order is kept.
#[must_use]
pub fn filter_exams(
    exams: &[weekly_exam::Model],
    classes: &HashMap<i64, class::Model>,
    filter: &ExamFilter,
) -> Vec<weekly_exam::Model> {
    let needle = filter
        .search_text
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_lowercase);

    exams
        .iter()
        .filter(|exam| exam.syllabus_type == filter.syllabus_type)
        .filter(|exam| filter.class_id.is_none_or(|id| exam.class_id == id))
        .filter(|exam| filter.status.is_none_or(|status| exam.status == status))
        .filter(|exam| {
            needle.as_deref().is_none_or(|needle| {
                exam.title.to_lowercase().contains(needle)
                    || classes
                        .get(&exam.class_id)
                        .is_some_and(|c| catalogue::class_label(c).to_lowercase().contains(needle))
            })
        })
        .cloned()
        .collect()
}

/// Lists exams matching `filter`, newest exam date first.
pub async fn list_exams(
    db: &DatabaseConnection,
    filter: &ExamFilter,
) -> Result<Vec<weekly_exam::Model>> {
    let exams = WeeklyExam::find()
        .filter(weekly_exam::Column::SyllabusType.eq(filter.syllabus_type))
        .order_by_desc(weekly_exam::Column::ExamDate)
        .order_by_desc(weekly_exam::Column::ExamTime)
        .all(db)
        .await?;
    let classes = catalogue::class_directory(db).await?;
    Ok(filter_exams(&exams, &classes, filter))
}
