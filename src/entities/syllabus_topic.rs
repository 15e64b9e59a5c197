//! Syllabus topic entity - one entry of the syllabus catalogue.
//!
//! Topics carrying an `exam_type` are tagged for a competitive exam; the tag is
//! informational and does not restrict which exams may cover the topic.

use super::sea_orm_active_enums::{ExamType, SyllabusType};
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Syllabus topic database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "syllabus_topics")]
pub struct Model {
    /// Unique identifier for the topic
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Class the topic is taught in
    pub class_id: i64,
    /// Subject reference, owned by subject management
    pub subject_id: i64,
    /// Chapter the topic belongs to (e.g., "Mechanics")
    pub chapter_name: String,
    /// Topic name (e.g., "Kinematics")
    pub topic_name: String,
    /// Syllabus track of the topic
    pub syllabus_type: SyllabusType,
    /// Competitive exam the topic is tagged for, if any
    pub exam_type: Option<ExamType>,
}

/// Defines relationships between `SyllabusTopic` and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Each topic belongs to one class
    #[sea_orm(
        belongs_to = "super::class::Entity",
        from = "Column::ClassId",
        to = "super::class::Column::Id"
    )]
    Class,
    /// Exams covering this topic
    #[sea_orm(has_many = "super::exam_syllabus_link::Entity")]
    ExamLinks,
}

impl Related<super::class::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Class.def()
    }
}

impl Related<super::exam_syllabus_link::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ExamLinks.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
