//! Question paper entity - written by the exam-taking pipeline, read here.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Question paper database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "question_papers")]
pub struct Model {
    /// Unique identifier for the paper
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Exam the paper is set for
    pub exam_id: i64,
    /// Paper title
    pub title: String,
    /// When the pipeline published the paper
    pub created_at: DateTimeUtc,
}

/// Defines relationships between `QuestionPaper` and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// One paper has many questions
    #[sea_orm(has_many = "super::question::Entity")]
    Questions,
}

impl Related<super::question::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Questions.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
