//! Entity module - Contains all SeaORM entity definitions for the database.
//! These entities represent the database tables and their relationships.
//! Each entity has a Model struct for data and an Entity struct for operations.

pub mod class;
pub mod exam_cycle;
pub mod exam_mark;
pub mod exam_syllabus_link;
pub mod question;
pub mod question_paper;
pub mod sea_orm_active_enums;
pub mod student_exam_result;
pub mod syllabus_topic;
pub mod weekly_exam;

// Re-export specific types to avoid conflicts
pub use class::{Column as ClassColumn, Entity as Class, Model as ClassModel};
pub use exam_cycle::{Column as ExamCycleColumn, Entity as ExamCycle, Model as ExamCycleModel};
pub use exam_mark::{Column as ExamMarkColumn, Entity as ExamMark, Model as ExamMarkModel};
pub use exam_syllabus_link::{
    Column as ExamSyllabusLinkColumn, Entity as ExamSyllabusLink, Model as ExamSyllabusLinkModel,
};
pub use question::{Column as QuestionColumn, Entity as Question, Model as QuestionModel};
pub use question_paper::{
    Column as QuestionPaperColumn, Entity as QuestionPaper, Model as QuestionPaperModel,
};
pub use sea_orm_active_enums::{ExamStatus, ExamType, Grade, SyllabusType};
pub use student_exam_result::{
    Column as StudentExamResultColumn, Entity as StudentExamResult,
    Model as StudentExamResultModel,
};
pub use syllabus_topic::{
    Column as SyllabusTopicColumn, Entity as SyllabusTopic, Model as SyllabusTopicModel,
};
pub use weekly_exam::{Column as WeeklyExamColumn, Entity as WeeklyExam, Model as WeeklyExamModel};
