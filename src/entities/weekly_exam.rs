//! Weekly exam entity - a single scheduled test for one class.
//!
//! Competitive exams may point at a cycle and a week (1-3) inside it. The
//! `cycle_id` reference is nulled when the cycle is deleted.

use super::sea_orm_active_enums::{ExamStatus, SyllabusType};
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Weekly exam database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "weekly_exams")]
pub struct Model {
    /// Unique identifier for the exam
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Class/section sitting the exam
    pub class_id: i64,
    /// Syllabus track the exam belongs to
    pub syllabus_type: SyllabusType,
    /// Owning cycle, only for competitive exams
    pub cycle_id: Option<i64>,
    /// Week inside the cycle (1-3), only meaningful with a cycle
    pub week_number: Option<i32>,
    /// Display title (e.g., "Week1 Physics Test")
    pub title: String,
    /// Calendar day of the exam
    pub exam_date: Date,
    /// Start time of the exam
    pub exam_time: Time,
    /// Length of the exam in minutes
    pub duration_minutes: i32,
    /// Maximum achievable marks
    pub total_marks: i32,
    /// Whether wrong answers cost marks
    pub negative_marking: bool,
    /// Marks deducted per wrong answer when `negative_marking` is set
    pub negative_marks_value: f64,
    /// Whether students get a reminder before the exam
    pub reminder_enabled: bool,
    /// Current lifecycle state
    pub status: ExamStatus,
    /// When the exam was created
    pub created_at: DateTimeUtc,
    /// When the exam was last modified
    pub updated_at: DateTimeUtc,
}

/// Defines relationships between `WeeklyExam` and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Each exam belongs to one class
    #[sea_orm(
        belongs_to = "super::class::Entity",
        from = "Column::ClassId",
        to = "super::class::Column::Id"
    )]
    Class,
    /// Competitive exams may belong to a cycle
    #[sea_orm(
        belongs_to = "super::exam_cycle::Entity",
        from = "Column::CycleId",
        to = "super::exam_cycle::Column::Id",
        on_delete = "SetNull"
    )]
    ExamCycle,
    /// Syllabus coverage links
    #[sea_orm(has_many = "super::exam_syllabus_link::Entity")]
    SyllabusLinks,
    /// Recorded student marks
    #[sea_orm(has_many = "super::exam_mark::Entity")]
    Marks,
}

impl Related<super::class::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Class.def()
    }
}

impl Related<super::exam_cycle::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ExamCycle.def()
    }
}

impl Related<super::exam_syllabus_link::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::SyllabusLinks.def()
    }
}

impl Related<super::exam_mark::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Marks.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
