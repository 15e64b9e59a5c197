//! Student exam result entity - outcome records produced by the exam-taking
//! pipeline. The scheduler exposes them but never writes them.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Student exam result database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "student_exam_results")]
pub struct Model {
    /// Unique identifier for the result
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Exam the result belongs to
    pub exam_id: i64,
    /// Student reference
    pub student_id: i64,
    /// Final score after negative marking
    pub score: f64,
    /// Number of correctly answered questions
    pub correct_answers: i32,
    /// Number of wrongly answered questions
    pub wrong_answers: i32,
    /// When the student submitted
    pub submitted_at: DateTimeUtc,
}

/// `StudentExamResult` has no relationships with other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
