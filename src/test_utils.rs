//! Shared test utilities for `ExamBuddy`.
//!
//! This module provides common helper functions for setting up test databases
//! and creating test entities with sensible defaults.

use crate::{
    core::{
        catalogue::{self, NewSyllabusTopic},
        cycle::{self, CycleInput},
        weekly_exam::{self, ExamInput},
    },
    entities::{
        ExamType, SyllabusType, class, exam_cycle, syllabus_topic, weekly_exam as exam_entity,
    },
    errors::Result,
};
use chrono::NaiveDate;
use sea_orm::DatabaseConnection;

/// Creates an in-memory `SQLite` database with all tables initialized.
/// This is the standard setup for all integration tests.
pub async fn setup_test_db() -> Result<DatabaseConnection> {
    let db = sea_orm::Database::connect("sqlite::memory:").await?;
    crate::config::database::create_tables(&db).await?;
    Ok(db)
}

/// Creates a class in the class directory.
pub async fn create_test_class(
    db: &DatabaseConnection,
    name: &str,
    section: &str,
) -> Result<class::Model> {
    catalogue::create_class(db, name, section).await
}

/// Creates a syllabus topic with sensible defaults.
///
/// # Defaults
/// * `subject_id`: 1
/// * `chapter_name`: "Chapter 1"
pub async fn create_test_topic(
    db: &DatabaseConnection,
    class_id: i64,
    topic_name: &str,
    syllabus_type: SyllabusType,
    exam_type: Option<ExamType>,
) -> Result<syllabus_topic::Model> {
    catalogue::create_syllabus_topic(
        db,
        NewSyllabusTopic {
            class_id,
            subject_id: 1,
            chapter_name: "Chapter 1".to_string(),
            topic_name: topic_name.to_string(),
            syllabus_type,
            exam_type,
        },
    )
    .await
}

/// Creates an inactive cycle spanning the default 21-day window from `start_date`.
pub async fn create_test_cycle(
    db: &DatabaseConnection,
    exam_type: ExamType,
    cycle_number: i32,
    start_date: NaiveDate,
) -> Result<exam_cycle::Model> {
    cycle::create_cycle(
        db,
        CycleInput {
            exam_type,
            cycle_number,
            start_date,
            end_date: cycle::default_end_date(start_date),
        },
    )
    .await
}

/// Creates a scheduled exam on 2024-01-08 with the [`ExamInput::new`] defaults.
pub async fn create_test_exam(
    db: &DatabaseConnection,
    class_id: i64,
    title: &str,
    syllabus_type: SyllabusType,
) -> Result<exam_entity::Model> {
    let exam_date = NaiveDate::from_ymd_opt(2024, 1, 8).unwrap_or_default();
    let input = ExamInput::new(class_id, title, exam_date, syllabus_type);
    weekly_exam::create_exam(db, input).await
}

/// Sets up a complete test environment with a class and a competitive exam.
/// Returns (db, class, exam) for common test scenarios.
pub async fn setup_with_exam() -> Result<(DatabaseConnection, class::Model, exam_entity::Model)> {
    let db = setup_test_db().await?;
    let class = create_test_class(&db, "Class 11", "A").await?;
    let exam = create_test_exam(&db, class.id, "Weekly Test", SyllabusType::Competitive).await?;
    Ok((db, class, exam))
}
