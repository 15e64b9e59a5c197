//! Exam cycle business logic - rotation, activation and time-derived progress.
//!
//! Cycles rotate through [`ROTATION`] and span [`CYCLE_SPAN_DAYS`] days after
//! their start date (three 7-day weeks). Progress and the current week are
//! computed from a caller-supplied `now`; nothing here runs on a clock.

use crate::{
    entities::{ExamCycle, ExamType, exam_cycle},
    errors::{Error, Result},
};
use chrono::{Duration, NaiveDate, NaiveDateTime, NaiveTime, Utc};
use sea_orm::{QueryOrder, Set, TransactionTrait, prelude::*, sea_query::Expr};
use tracing::{debug, info};

/// Fixed order new cycles rotate through.
pub const ROTATION: [ExamType; 3] = [ExamType::Jee, ExamType::Neet, ExamType::Bitsat];

/// Days between a cycle's start and end date.
pub const CYCLE_SPAN_DAYS: i64 = 20;

/// Length of one cycle week in days.
pub const DAYS_PER_WEEK: i64 = 7;

/// Number of weeks in a cycle; later days still count as the last week.
pub const WEEKS_PER_CYCLE: u8 = 3;

/// Fields needed to create or fully replace a cycle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CycleInput {
    /// Exam the cycle prepares for
    pub exam_type: ExamType,
    /// Per-type sequence number, starting at 1
    pub cycle_number: i32,
    /// First day
    pub start_date: NaiveDate,
    /// Last day
    pub end_date: NaiveDate,
}

/// A proposed next cycle. Every field may be overridden before creation.
pub type CycleSuggestion = CycleInput;

/// A cycle together with its progress as of some moment.
#[derive(Debug, Clone)]
pub struct CycleOverview {
    /// The cycle being described
    pub cycle: exam_cycle::Model,
    /// Elapsed share of the cycle window, 0-100
    pub progress: u8,
    /// Week the cycle is in, 0 before it starts, capped at 3
    pub current_week: u8,
    /// Whole days until the end date, never negative
    pub days_remaining: i64,
}

/// Returns the exam type that follows `last` in [`ROTATION`], wrapping around.
/// With no previous type the rotation starts from the beginning.
#[must_use]
pub fn next_type(last: Option<ExamType>) -> ExamType {
    let Some(last) = last else {
        return ROTATION[0];
    };
    let index = ROTATION
        .iter()
        .position(|t| *t == last)
        .unwrap_or(ROTATION.len() - 1);
    ROTATION[(index + 1) % ROTATION.len()]
}

/// Default end date for a cycle starting on `start_date`.
#[must_use]
pub fn default_end_date(start_date: NaiveDate) -> NaiveDate {
    start_date + Duration::days(CYCLE_SPAN_DAYS)
}

/// The most recently created cycle, ordered by creation time then id.
#[must_use]
pub fn most_recent(cycles: &[exam_cycle::Model]) -> Option<&exam_cycle::Model> {
    cycles.iter().max_by_key(|c| (c.created_at, c.id))
}

/// Proposes the next cycle in the rotation from the full list of cycles.
///
/// The type follows the most recent cycle's type. The number continues the
/// most recent cycle's number when the type repeats, otherwise it is one more
/// than the count of existing cycles of that type. The window starts the day
/// after the most recent cycle ends, or `today` when there are no cycles.
#[must_use]
pub fn suggest_next(cycles: &[exam_cycle::Model], today: NaiveDate) -> CycleSuggestion {
    let last = most_recent(cycles);
    let exam_type = next_type(last.map(|c| c.exam_type));

    let cycle_number = match last {
        Some(last) if last.exam_type == exam_type => last.cycle_number + 1,
        _ => {
            let same_type = cycles.iter().filter(|c| c.exam_type == exam_type).count();
            i32::try_from(same_type).unwrap_or(i32::MAX - 1) + 1
        }
    };

    let start_date = last.map_or(today, |c| c.end_date + Duration::days(1));

    CycleSuggestion {
        exam_type,
        cycle_number,
        start_date,
        end_date: default_end_date(start_date),
    }
}

fn validate(input: &CycleInput) -> Result<()> {
    if input.cycle_number < 1 {
        return Err(Error::validation("Cycle number must be at least 1"));
    }
    if input.end_date < input.start_date {
        return Err(Error::validation(
            "Cycle end date cannot be before its start date",
        ));
    }
    Ok(())
}

/// Creates a new, inactive cycle.
pub async fn create_cycle(db: &DatabaseConnection, input: CycleInput) -> Result<exam_cycle::Model> {
    validate(&input)?;

    let now = Utc::now();
    let cycle = exam_cycle::ActiveModel {
        exam_type: Set(input.exam_type),
        cycle_number: Set(input.cycle_number),
        start_date: Set(input.start_date),
        end_date: Set(input.end_date),
        is_active: Set(false),
        created_at: Set(now),
        updated_at: Set(now),
        ..Default::default()
    };

    let created = cycle.insert(db).await?;
    info!(
        "Created {} cycle #{} ({} to {})",
        created.exam_type, created.cycle_number, created.start_date, created.end_date
    );
    Ok(created)
}

/// Creates the cycle [`suggest_next`] proposes for the current set of cycles.
pub async fn create_next_cycle(
    db: &DatabaseConnection,
    today: NaiveDate,
) -> Result<exam_cycle::Model> {
    let cycles = list_cycles(db).await?;
    create_cycle(db, suggest_next(&cycles, today)).await
}

/// Retrieves every cycle, newest first.
pub async fn list_cycles(db: &DatabaseConnection) -> Result<Vec<exam_cycle::Model>> {
    ExamCycle::find()
        .order_by_desc(exam_cycle::Column::CreatedAt)
        .order_by_desc(exam_cycle::Column::Id)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Retrieves every active cycle, at most one per exam type.
pub async fn active_cycles(db: &DatabaseConnection) -> Result<Vec<exam_cycle::Model>> {
    ExamCycle::find()
        .filter(exam_cycle::Column::IsActive.eq(true))
        .order_by_asc(exam_cycle::Column::ExamType)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Finds a cycle by id, returning None if it does not exist.
pub async fn get_cycle(
    db: &DatabaseConnection,
    cycle_id: i64,
) -> Result<Option<exam_cycle::Model>> {
    ExamCycle::find_by_id(cycle_id)
        .one(db)
        .await
        .map_err(Into::into)
}

/// Replaces type, number and dates of a cycle. The active flag is kept, so an
/// active cycle moved to another exam type becomes the only active cycle of
/// that type.
pub async fn update_cycle(
    db: &DatabaseConnection,
    cycle_id: i64,
    input: CycleInput,
) -> Result<exam_cycle::Model> {
    validate(&input)?;

    let txn = db.begin().await?;

    let existing = ExamCycle::find_by_id(cycle_id)
        .one(&txn)
        .await?
        .ok_or(Error::CycleNotFound { id: cycle_id })?;

    let now = Utc::now();
    if existing.is_active && existing.exam_type != input.exam_type {
        let deactivated = deactivate_others(&txn, input.exam_type, cycle_id, now).await?;
        info!(
            "Active cycle {cycle_id} moved from {} to {} (deactivated {deactivated} other)",
            existing.exam_type, input.exam_type
        );
    }

    let mut active_model: exam_cycle::ActiveModel = existing.into();
    active_model.exam_type = Set(input.exam_type);
    active_model.cycle_number = Set(input.cycle_number);
    active_model.start_date = Set(input.start_date);
    active_model.end_date = Set(input.end_date);
    active_model.updated_at = Set(now);
    let updated = active_model.update(&txn).await?;

    txn.commit().await?;
    Ok(updated)
}

/// Deactivates every active cycle of `exam_type` except `keep_id`.
async fn deactivate_others<C>(
    db: &C,
    exam_type: ExamType,
    keep_id: i64,
    now: DateTimeUtc,
) -> Result<u64>
where
    C: ConnectionTrait,
{
    let result = ExamCycle::update_many()
        .col_expr(exam_cycle::Column::IsActive, Expr::value(false))
        .col_expr(exam_cycle::Column::UpdatedAt, Expr::value(now))
        .filter(exam_cycle::Column::ExamType.eq(exam_type))
        .filter(exam_cycle::Column::Id.ne(keep_id))
        .filter(exam_cycle::Column::IsActive.eq(true))
        .exec(db)
        .await?;
    Ok(result.rows_affected)
}

/// Activates a cycle after deactivating every other cycle of the same exam type.
///
/// Cycles of other exam types are left as they are, so one JEE and one NEET
/// cycle may be active at the same time.
pub async fn activate(db: &DatabaseConnection, cycle_id: i64) -> Result<exam_cycle::Model> {
    let txn = db.begin().await?;

    let target = ExamCycle::find_by_id(cycle_id)
        .one(&txn)
        .await?
        .ok_or(Error::CycleNotFound { id: cycle_id })?;

    let now = Utc::now();
    let deactivated = deactivate_others(&txn, target.exam_type, cycle_id, now).await?;

    let mut active_model: exam_cycle::ActiveModel = target.into();
    active_model.is_active = Set(true);
    active_model.updated_at = Set(now);
    let activated = active_model.update(&txn).await?;

    txn.commit().await?;

    info!(
        "Activated {} cycle #{} (deactivated {deactivated} other)",
        activated.exam_type, activated.cycle_number
    );
    Ok(activated)
}

/// Marks a cycle inactive.
pub async fn deactivate(db: &DatabaseConnection, cycle_id: i64) -> Result<exam_cycle::Model> {
    let existing = get_cycle(db, cycle_id)
        .await?
        .ok_or(Error::CycleNotFound { id: cycle_id })?;

    let mut active_model: exam_cycle::ActiveModel = existing.into();
    active_model.is_active = Set(false);
    active_model.updated_at = Set(Utc::now());
    Ok(active_model.update(db).await?)
}

/// Deletes a cycle. Exams that pointed at it keep existing with no cycle.
/// Returns false if the cycle did not exist.
pub async fn delete_cycle(db: &DatabaseConnection, cycle_id: i64) -> Result<bool> {
    let result = ExamCycle::delete_by_id(cycle_id).exec(db).await?;
    debug!("Deleted cycle {cycle_id}: {} row(s)", result.rows_affected);
    Ok(result.rows_affected > 0)
}

fn window(cycle: &exam_cycle::Model) -> (NaiveDateTime, NaiveDateTime) {
    (
        cycle.start_date.and_time(NaiveTime::MIN),
        cycle.end_date.and_time(NaiveTime::MIN),
    )
}

/// Elapsed share of the cycle window at `now`, as a whole percentage.
///
/// 0 up to the start date, 100 from the end date on, linear and rounded in
/// between.
#[must_use]
#[allow(
    clippy::cast_precision_loss,
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss
)] // Second counts stay far below 2^52 and the result is clamped to 0..=100
pub fn progress(cycle: &exam_cycle::Model, now: NaiveDateTime) -> u8 {
    let (start, end) = window(cycle);
    if now <= start {
        return 0;
    }
    if now >= end {
        return 100;
    }

    let ratio = (now - start).num_seconds() as f64 / (end - start).num_seconds() as f64;
    (ratio * 100.0).round().clamp(0.0, 100.0) as u8
}

/// Week of the cycle `now` falls in: 0 before the start, then 7-day buckets
/// numbered from 1, capped at [`WEEKS_PER_CYCLE`].
#[must_use]
pub fn current_week(cycle: &exam_cycle::Model, now: NaiveDateTime) -> u8 {
    let (start, _) = window(cycle);
    if now < start {
        return 0;
    }

    let week = (now - start).num_days() / DAYS_PER_WEEK + 1;
    u8::try_from(week).map_or(WEEKS_PER_CYCLE, |w| w.min(WEEKS_PER_CYCLE))
}

/// Builds the display overview of a cycle as of `now`.
#[must_use]
pub fn cycle_overview(cycle: exam_cycle::Model, now: NaiveDateTime) -> CycleOverview {
    let days_remaining = (cycle.end_date - now.date()).num_days().max(0);
    CycleOverview {
        progress: progress(&cycle, now),
        current_week: current_week(&cycle, now),
        days_remaining,
        cycle,
    }
}

/// Generates a text progress bar like `[████████░░]`.
#[must_use]
pub fn format_progress_bar(percent: u8, bar_length: Option<usize>) -> String {
    let length = bar_length.unwrap_or(10);
    let filled = usize::from(percent.min(100)) * length / 100;
    format!("[{}{}]", "█".repeat(filled), "░".repeat(length - filled))
}
