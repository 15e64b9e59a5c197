//! Syllabus coverage of weekly exams.
//!
//! An exam's coverage is a set of catalogue topics stored as link rows. The
//! set is only ever replaced as a whole: [`attach`] deletes the exam's links and
//! inserts the new ones inside one transaction, so a failed insert leaves the
//! previously committed set in place.

use crate::{
    core::catalogue::{self, SyllabusQuery},
    entities::{
        ExamSyllabusLink, SyllabusTopic, WeeklyExam, exam_syllabus_link, syllabus_topic,
        weekly_exam,
    },
    errors::{Error, Result},
};
use sea_orm::{QueryOrder, Set, TransactionTrait, prelude::*};
use std::collections::BTreeSet;
use tracing::info;

/// Replaces the full coverage set of `exam_id` with `syllabus_ids`.
///
/// Duplicate ids are collapsed; an empty set clears the coverage. Returns the
/// ids now linked.
pub async fn attach<I>(
    db: &DatabaseConnection,
    exam_id: i64,
    syllabus_ids: I,
) -> Result<BTreeSet<i64>>
where
    I: IntoIterator<Item = i64>,
{
    let ids: BTreeSet<i64> = syllabus_ids.into_iter().collect();

    let txn = db.begin().await?;

    WeeklyExam::find_by_id(exam_id)
        .one(&txn)
        .await?
        .ok_or(Error::ExamNotFound { id: exam_id })?;

    let removed = delete_links_for_exam(&txn, exam_id).await?;

    if !ids.is_empty() {
        let links = ids.iter().map(|syllabus_id| exam_syllabus_link::ActiveModel {
            exam_id: Set(exam_id),
            syllabus_id: Set(*syllabus_id),
        });
        ExamSyllabusLink::insert_many(links)
            .exec_without_returning(&txn)
            .await?;
    }

    txn.commit().await?;

    info!(
        "Replaced syllabus coverage of exam {exam_id}: {removed} link(s) removed, {} attached",
        ids.len()
    );
    Ok(ids)
}

/// Removes every coverage link of an exam. Returns the number of links removed.
pub async fn delete_links_for_exam<C>(db: &C, exam_id: i64) -> Result<u64>
where
    C: ConnectionTrait,
{
    let result = ExamSyllabusLink::delete_many()
        .filter(exam_syllabus_link::Column::ExamId.eq(exam_id))
        .exec(db)
        .await?;
    Ok(result.rows_affected)
}

/// Ids of the topics an exam covers.
pub async fn linked_ids(db: &DatabaseConnection, exam_id: i64) -> Result<BTreeSet<i64>> {
    Ok(ExamSyllabusLink::find()
        .filter(exam_syllabus_link::Column::ExamId.eq(exam_id))
        .all(db)
        .await?
        .into_iter()
        .map(|link| link.syllabus_id)
        .collect())
}

/// Topics an exam covers, ordered by chapter then topic. Empty for an exam
/// with no coverage or no such exam.
pub async fn linked(db: &DatabaseConnection, exam_id: i64) -> Result<Vec<syllabus_topic::Model>> {
    let ids = linked_ids(db, exam_id).await?;
    if ids.is_empty() {
        return Ok(Vec::new());
    }

    SyllabusTopic::find()
        .filter(syllabus_topic::Column::Id.is_in(ids))
        .order_by_asc(syllabus_topic::Column::ChapterName)
        .order_by_asc(syllabus_topic::Column::TopicName)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Candidate topics for an exam: the catalogue entries of the exam's class
/// and syllabus type. Topics tagged with any exam type are included.
pub async fn available_for_exam(
    db: &DatabaseConnection,
    exam: &weekly_exam::Model,
) -> Result<Vec<syllabus_topic::Model>> {
    catalogue::list_syllabus(
        db,
        &SyllabusQuery {
            class_id: Some(exam.class_id),
            syllabus_type: Some(exam.syllabus_type),
            exam_type: None,
        },
    )
    .await
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::entities::{ExamType, SyllabusType};
    use crate::test_utils::*;

    fn topic_names(topics: &[syllabus_topic::Model]) -> Vec<&str> {
        topics.iter().map(|t| t.topic_name.as_str()).collect()
    }

    #[tokio::test]
    async fn test_attach_replaces_whole_set() -> Result<()> {
        let (db, class, exam) = setup_with_exam().await?;
        let t1 =
            create_test_topic(&db, class.id, "Kinematics", SyllabusType::Competitive, None).await?;
        let t2 =
            create_test_topic(&db, class.id, "Vectors", SyllabusType::Competitive, None).await?;
        let t3 =
            create_test_topic(&db, class.id, "Friction", SyllabusType::Competitive, None).await?;

        attach(&db, exam.id, [t1.id, t2.id]).await?;
        let linked = linked_ids(&db, exam.id).await?;
        assert_eq!(linked, BTreeSet::from([t1.id, t2.id]));

        attach(&db, exam.id, [t3.id]).await?;
        let topics = super::linked(&db, exam.id).await?;
        assert_eq!(topic_names(&topics), vec!["Friction"]);

        Ok(())
    }

    #[tokio::test]
    async fn test_attach_collapses_duplicates_and_clears() -> Result<()> {
        let (db, class, exam) = setup_with_exam().await?;
        let t1 =
            create_test_topic(&db, class.id, "Kinematics", SyllabusType::Competitive, None).await?;

        let stored = attach(&db, exam.id, [t1.id, t1.id, t1.id]).await?;
        assert_eq!(stored.len(), 1);
        assert_eq!(linked(&db, exam.id).await?.len(), 1);

        attach(&db, exam.id, Vec::new()).await?;
        assert!(linked(&db, exam.id).await?.is_empty());

        Ok(())
    }

    #[tokio::test]
    async fn test_attach_to_missing_exam() -> Result<()> {
        let db = setup_test_db().await?;
        let result = attach(&db, 77, [1]).await;
        assert!(matches!(result, Err(Error::ExamNotFound { id: 77 })));
        Ok(())
    }

    #[tokio::test]
    async fn test_failed_attach_keeps_previous_set() -> Result<()> {
        let (db, class, exam) = setup_with_exam().await?;
        let t1 =
            create_test_topic(&db, class.id, "Kinematics", SyllabusType::Competitive, None).await?;
        attach(&db, exam.id, [t1.id]).await?;

        // Unknown topic id violates the link foreign key
        let result = attach(&db, exam.id, [t1.id, 9_999]).await;
        assert!(matches!(result, Err(Error::Database(_))));

        assert_eq!(linked_ids(&db, exam.id).await?, BTreeSet::from([t1.id]));
        Ok(())
    }

    #[tokio::test]
    async fn test_linked_for_unknown_exam_is_empty() -> Result<()> {
        let db = setup_test_db().await?;
        assert!(linked(&db, 5).await?.is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn test_available_for_exam_matches_class_and_type() -> Result<()> {
        let (db, class, exam) = setup_with_exam().await?;
        let other = create_test_class(&db, "Class 12", "B").await?;

        create_test_topic(
            &db,
            class.id,
            "Kinematics",
            SyllabusType::Competitive,
            Some(ExamType::Jee),
        )
        .await?;
        create_test_topic(
            &db,
            class.id,
            "Genetics",
            SyllabusType::Competitive,
            Some(ExamType::Neet),
        )
        .await?;
        create_test_topic(&db, class.id, "Grammar", SyllabusType::General, None).await?;
        create_test_topic(&db, other.id, "Optics", SyllabusType::Competitive, None).await?;

        let available = available_for_exam(&db, &exam).await?;
        assert_eq!(topic_names(&available), vec!["Genetics", "Kinematics"]);

        Ok(())
    }
}
