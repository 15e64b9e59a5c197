//! Database configuration module for `ExamBuddy`.
//!
//! This module handles `SQLite` database connection and table creation using `SeaORM`.
//! Tables are generated from the entity definitions with
//! `Schema::create_table_from_entity`, so the schema always matches the Rust
//! structs, including the foreign keys declared on the entity relations.

use crate::entities::{
    Class, ExamCycle, ExamMark, ExamSyllabusLink, Question, QuestionPaper, StudentExamResult,
    SyllabusTopic, WeeklyExam,
};
use crate::errors::Result;
use sea_orm::{ConnectionTrait, Database, DatabaseConnection, EntityTrait, Schema};

const DEFAULT_DATABASE_URL: &str = "sqlite://data/exam_buddy.sqlite?mode=rwc";

/// Gets the database URL from the `DATABASE_URL` environment variable,
/// falling back to a local `SQLite` file.
#[must_use]
pub fn get_database_url() -> String {
    std::env::var("DATABASE_URL").unwrap_or_else(|_| DEFAULT_DATABASE_URL.to_string())
}

/// Establishes a connection to the database named by [`get_database_url`].
pub async fn create_connection() -> Result<DatabaseConnection> {
    let database_url = get_database_url();
    tracing::debug!("Connecting to database at {database_url}");
    Database::connect(&database_url).await.map_err(Into::into)
}

async fn create_table<E>(db: &DatabaseConnection, schema: &Schema, entity: E) -> Result<()>
where
    E: EntityTrait,
{
    let builder = db.get_database_backend();
    let mut statement = schema.create_table_from_entity(entity);
    statement.if_not_exists();
    db.execute(builder.build(&statement)).await?;
    Ok(())
}

/// Creates every table the scheduler uses, skipping tables that already exist.
///
/// Referenced tables are created before the tables pointing at them.
pub async fn create_tables(db: &DatabaseConnection) -> Result<()> {
    let schema = Schema::new(db.get_database_backend());

    create_table(db, &schema, Class).await?;
    create_table(db, &schema, SyllabusTopic).await?;
    create_table(db, &schema, ExamCycle).await?;
    create_table(db, &schema, WeeklyExam).await?;
    create_table(db, &schema, ExamSyllabusLink).await?;
    create_table(db, &schema, ExamMark).await?;
    create_table(db, &schema, QuestionPaper).await?;
    create_table(db, &schema, Question).await?;
    create_table(db, &schema, StudentExamResult).await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::{ExamCycleModel, SyllabusTopicModel, WeeklyExamModel};
    use sea_orm::QuerySelect;

    #[tokio::test]
    async fn test_create_tables() -> Result<()> {
        let db = Database::connect("sqlite::memory:").await?;
        create_tables(&db).await?;

        // Test that tables exist by querying them
        let _: Vec<ExamCycleModel> = ExamCycle::find().limit(1).all(&db).await?;
        let _: Vec<WeeklyExamModel> = WeeklyExam::find().limit(1).all(&db).await?;
        let _: Vec<SyllabusTopicModel> = SyllabusTopic::find().limit(1).all(&db).await?;
        let _ = ExamSyllabusLink::find().limit(1).all(&db).await?;
        let _ = ExamMark::find().limit(1).all(&db).await?;
        let _ = StudentExamResult::find().limit(1).all(&db).await?;

        Ok(())
    }

    #[tokio::test]
    async fn test_create_tables_is_idempotent() -> Result<()> {
        let db = Database::connect("sqlite::memory:").await?;
        create_tables(&db).await?;
        create_tables(&db).await?;
        Ok(())
    }
}
