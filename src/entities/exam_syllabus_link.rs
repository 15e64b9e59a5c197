//! Exam-syllabus link entity - many-to-many join between weekly exams and
//! syllabus topics. Rows have no lifecycle of their own.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Exam-syllabus link database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "exam_syllabus_links")]
pub struct Model {
    /// Covering exam
    #[sea_orm(primary_key, auto_increment = false)]
    pub exam_id: i64,
    /// Covered topic
    #[sea_orm(primary_key, auto_increment = false)]
    pub syllabus_id: i64,
}

/// Defines relationships between `ExamSyllabusLink` and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// The exam side of the link
    #[sea_orm(
        belongs_to = "super::weekly_exam::Entity",
        from = "Column::ExamId",
        to = "super::weekly_exam::Column::Id",
        on_delete = "Cascade"
    )]
    WeeklyExam,
    /// The topic side of the link
    #[sea_orm(
        belongs_to = "super::syllabus_topic::Entity",
        from = "Column::SyllabusId",
        to = "super::syllabus_topic::Column::Id",
        on_delete = "Cascade"
    )]
    SyllabusTopic,
}

impl Related<super::weekly_exam::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::WeeklyExam.def()
    }
}

impl Related<super::syllabus_topic::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::SyllabusTopic.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
