//! Exam mark entity - one student's marks for one weekly exam.
//!
//! The grade is derived from the marks when saved but stored separately so an
//! operator can override it.

use super::sea_orm_active_enums::Grade;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Exam mark database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "exam_marks")]
pub struct Model {
    /// Unique identifier for the mark row
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Exam the marks were scored in
    pub exam_id: i64,
    /// Student reference, owned by student management
    pub student_id: i64,
    /// Raw marks; may be negative under negative marking
    pub marks_obtained: f64,
    /// Stored grade band
    pub grade: Grade,
    /// Free-text teacher remarks
    pub remarks: Option<String>,
}

/// Defines relationships between `ExamMark` and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Each mark belongs to one exam
    #[sea_orm(
        belongs_to = "super::weekly_exam::Entity",
        from = "Column::ExamId",
        to = "super::weekly_exam::Column::Id",
        on_delete = "Cascade"
    )]
    WeeklyExam,
}

impl Related<super::weekly_exam::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::WeeklyExam.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
