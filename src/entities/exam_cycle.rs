//! Exam cycle entity - one instance of the rotating competitive-exam program.
//!
//! A cycle has a fixed exam type, a per-type sequence number and a date window
//! (nominally three weeks). At most one cycle per exam type is active; that
//! rule lives in `core::cycle`, not in the schema.

use super::sea_orm_active_enums::ExamType;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Exam cycle database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "exam_cycles")]
pub struct Model {
    /// Unique identifier for the cycle
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Which competitive exam this cycle prepares for
    pub exam_type: ExamType,
    /// Sequence number, counted separately for each exam type
    pub cycle_number: i32,
    /// First day of the cycle
    pub start_date: Date,
    /// Last day of the cycle (start + 20 days by default)
    pub end_date: Date,
    /// Whether this is the running cycle for its exam type
    pub is_active: bool,
    /// Creation time, used to find the most recent cycle
    pub created_at: DateTimeUtc,
    /// When the cycle was last modified
    pub updated_at: DateTimeUtc,
}

/// Defines relationships between `ExamCycle` and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// One cycle has many weekly exams
    #[sea_orm(has_many = "super::weekly_exam::Entity")]
    WeeklyExams,
}

impl Related<super::weekly_exam::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::WeeklyExams.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
