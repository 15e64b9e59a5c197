//! Question entity - a single question on a question paper (read-only here).

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Question database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "questions")]
pub struct Model {
    /// Unique identifier for the question
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Paper the question appears on
    pub paper_id: i64,
    /// Order on the paper, starting at 1
    pub position: i32,
    /// Question text
    pub question_text: String,
    /// Marks awarded for a correct answer
    pub marks: f64,
}

/// Defines relationships between Question and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Each question belongs to one paper
    #[sea_orm(
        belongs_to = "super::question_paper::Entity",
        from = "Column::PaperId",
        to = "super::question_paper::Column::Id"
    )]
    QuestionPaper,
}

impl Related<super::question_paper::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::QuestionPaper.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
