//! Class entity - the class directory consumed by the scheduler.
//!
//! Classes are managed elsewhere; this crate only reads them for display and
//! filtering, and seeds them from `config.toml` on first run.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Class database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "classes")]
pub struct Model {
    /// Unique identifier for the class
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Class name (e.g., "Class 11")
    pub name: String,
    /// Section within the class (e.g., "A")
    pub section: String,
}

/// Defines relationships between Class and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// One class sits many weekly exams
    #[sea_orm(has_many = "super::weekly_exam::Entity")]
    WeeklyExams,
    /// One class has many syllabus topics
    #[sea_orm(has_many = "super::syllabus_topic::Entity")]
    SyllabusTopics,
}

impl Related<super::weekly_exam::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::WeeklyExams.def()
    }
}

impl Related<super::syllabus_topic::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::SyllabusTopics.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
