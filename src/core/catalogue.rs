//! Class directory and syllabus catalogue.
//!
//! Both collections are owned by other parts of the school system. The
//! scheduler reads them for display, filtering and the syllabus candidate
//! pool; the write helpers here exist for first-run seeding.

use crate::{
    config::catalogue::CatalogueConfig,
    entities::{Class, ExamType, SyllabusTopic, SyllabusType, class, syllabus_topic},
    errors::{Error, Result},
};
use sea_orm::{PaginatorTrait, QueryOrder, Set, TransactionTrait, prelude::*};
use std::collections::HashMap;
use tracing::info;

/// Filters for [`list_syllabus`]. Unset fields do not filter.
#[derive(Debug, Clone, Default)]
pub struct SyllabusQuery {
    /// Only topics taught in this class
    pub class_id: Option<i64>,
    /// Only topics on this syllabus track
    pub syllabus_type: Option<SyllabusType>,
    /// Only topics tagged for this exam type
    pub exam_type: Option<ExamType>,
}

/// Fields for a new syllabus topic.
#[derive(Debug, Clone)]
pub struct NewSyllabusTopic {
    /// Class the topic is taught in
    pub class_id: i64,
    /// Subject reference
    pub subject_id: i64,
    /// Chapter name
    pub chapter_name: String,
    /// Topic name
    pub topic_name: String,
    /// Syllabus track
    pub syllabus_type: SyllabusType,
    /// Optional competitive exam tag
    pub exam_type: Option<ExamType>,
}

/// Display label of a class, e.g. `"Class 11 - A"`.
#[must_use]
pub fn class_label(class: &class::Model) -> String {
    format!("{} - {}", class.name, class.section)
}

/// Retrieves every class, ordered by name then section.
pub async fn get_all_classes(db: &DatabaseConnection) -> Result<Vec<class::Model>> {
    Class::find()
        .order_by_asc(class::Column::Name)
        .order_by_asc(class::Column::Section)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Finds a class by id, returning None if it does not exist.
pub async fn get_class_by_id(
    db: &DatabaseConnection,
    class_id: i64,
) -> Result<Option<class::Model>> {
    Class::find_by_id(class_id)
        .one(db)
        .await
        .map_err(Into::into)
}

/// Finds a class by its display label (see [`class_label`]), ignoring case.
pub async fn find_class_by_label(
    db: &DatabaseConnection,
    label: &str,
) -> Result<Option<class::Model>> {
    let wanted = label.trim().to_lowercase();
    Ok(get_all_classes(db)
        .await?
        .into_iter()
        .find(|c| class_label(c).to_lowercase() == wanted))
}

/// Retrieves the class directory keyed by id, for joining labels onto exams.
pub async fn class_directory(db: &DatabaseConnection) -> Result<HashMap<i64, class::Model>> {
    Ok(get_all_classes(db)
        .await?
        .into_iter()
        .map(|c| (c.id, c))
        .collect())
}

/// Creates a class after checking that name and section are non-empty.
pub async fn create_class<C>(db: &C, name: &str, section: &str) -> Result<class::Model>
where
    C: ConnectionTrait,
{
    if name.trim().is_empty() || section.trim().is_empty() {
        return Err(Error::validation("Class name and section are required"));
    }

    let model = class::ActiveModel {
        name: Set(name.trim().to_string()),
        section: Set(section.trim().to_string()),
        ..Default::default()
    };
    Ok(model.insert(db).await?)
}

/// Creates a syllabus topic after checking that chapter and topic are non-empty.
pub async fn create_syllabus_topic<C>(
    db: &C,
    topic: NewSyllabusTopic,
) -> Result<syllabus_topic::Model>
where
    C: ConnectionTrait,
{
    if topic.chapter_name.trim().is_empty() || topic.topic_name.trim().is_empty() {
        return Err(Error::validation("Chapter and topic names are required"));
    }

    let model = syllabus_topic::ActiveModel {
        class_id: Set(topic.class_id),
        subject_id: Set(topic.subject_id),
        chapter_name: Set(topic.chapter_name.trim().to_string()),
        topic_name: Set(topic.topic_name.trim().to_string()),
        syllabus_type: Set(topic.syllabus_type),
        exam_type: Set(topic.exam_type),
        ..Default::default()
    };
    Ok(model.insert(db).await?)
}

/// Lists catalogue topics matching every set field of `query`, ordered by
/// chapter then topic.
pub async fn list_syllabus(
    db: &DatabaseConnection,
    query: &SyllabusQuery,
) -> Result<Vec<syllabus_topic::Model>> {
    let mut select = SyllabusTopic::find();
    if let Some(class_id) = query.class_id {
        select = select.filter(syllabus_topic::Column::ClassId.eq(class_id));
    }
    if let Some(syllabus_type) = query.syllabus_type {
        select = select.filter(syllabus_topic::Column::SyllabusType.eq(syllabus_type));
    }
    if let Some(exam_type) = query.exam_type {
        select = select.filter(syllabus_topic::Column::ExamType.eq(exam_type));
    }

    select
        .order_by_asc(syllabus_topic::Column::ChapterName)
        .order_by_asc(syllabus_topic::Column::TopicName)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Seeds classes and syllabus topics from `config` when the class directory is
/// empty. Returns the number of classes inserted (0 when already seeded).
///
/// Everything is inserted in one transaction; a topic naming an unknown class
/// rejects the whole seed.
pub async fn seed_catalogue(db: &DatabaseConnection, config: &CatalogueConfig) -> Result<usize> {
    if Class::find().count(db).await? > 0 {
        info!("Class directory already populated, skipping catalogue seed");
        return Ok(0);
    }

    let txn = db.begin().await?;
    let mut ids = HashMap::new();
    for entry in &config.classes {
        let created = create_class(&txn, &entry.name, &entry.section).await?;
        ids.insert((created.name.clone(), created.section.clone()), created.id);
    }

    for entry in &config.syllabus {
        let key = (entry.class.trim().to_string(), entry.section.trim().to_string());
        let class_id = *ids.get(&key).ok_or_else(|| Error::Config {
            message: format!(
                "Syllabus topic '{}' refers to unknown class '{} - {}'",
                entry.topic, entry.class, entry.section
            ),
        })?;
        create_syllabus_topic(
            &txn,
            NewSyllabusTopic {
                class_id,
                subject_id: entry.subject_id,
                chapter_name: entry.chapter.clone(),
                topic_name: entry.topic.clone(),
                syllabus_type: entry.syllabus_type,
                exam_type: entry.exam_type,
            },
        )
        .await?;
    }
    txn.commit().await?;

    info!(
        "Seeded {} classes and {} syllabus topics",
        config.classes.len(),
        config.syllabus.len()
    );
    Ok(config.classes.len())
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::config::catalogue::{ClassConfig, SyllabusConfig};
    use crate::test_utils::*;

    fn sample_config() -> CatalogueConfig {
        CatalogueConfig {
            classes: vec![
                ClassConfig {
                    name: "Class 11".to_string(),
                    section: "A".to_string(),
                },
                ClassConfig {
                    name: "Class 12".to_string(),
                    section: "B".to_string(),
                },
            ],
            syllabus: vec![SyllabusConfig {
                class: "Class 12".to_string(),
                section: "B".to_string(),
                subject_id: 1,
                chapter: "Electrostatics".to_string(),
                topic: "Coulomb's Law".to_string(),
                syllabus_type: SyllabusType::Competitive,
                exam_type: Some(ExamType::Jee),
            }],
        }
    }

    #[tokio::test]
    async fn test_create_class_validation() -> Result<()> {
        let db = setup_test_db().await?;
        let result = create_class(&db, "  ", "A").await;
        assert!(matches!(result, Err(Error::Validation { .. })));
        Ok(())
    }

    #[tokio::test]
    async fn test_class_label_lookup() -> Result<()> {
        let db = setup_test_db().await?;
        let class = create_test_class(&db, "Class 11", "A").await?;

        assert_eq!(class_label(&class), "Class 11 - A");
        let found = find_class_by_label(&db, "class 11 - a").await?;
        assert_eq!(found.map(|c| c.id), Some(class.id));
        assert!(find_class_by_label(&db, "Class 9 - Z").await?.is_none());
        assert!(get_class_by_id(&db, 999).await?.is_none());

        Ok(())
    }

    #[tokio::test]
    async fn test_list_syllabus_filters() -> Result<()> {
        let db = setup_test_db().await?;
        let class = create_test_class(&db, "Class 11", "A").await?;
        let other = create_test_class(&db, "Class 12", "A").await?;

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
        create_test_topic(&db, class.id, "Poetry", SyllabusType::General, None).await?;
        create_test_topic(&db, other.id, "Optics", SyllabusType::Competitive, None).await?;

        let all = list_syllabus(&db, &SyllabusQuery::default()).await?;
        assert_eq!(all.len(), 4);

        let competitive = list_syllabus(
            &db,
            &SyllabusQuery {
                class_id: Some(class.id),
                syllabus_type: Some(SyllabusType::Competitive),
                exam_type: None,
            },
        )
        .await?;
        assert_eq!(competitive.len(), 2);

        let neet = list_syllabus(
            &db,
            &SyllabusQuery {
                exam_type: Some(ExamType::Neet),
                ..Default::default()
            },
        )
        .await?;
        assert_eq!(neet.len(), 1);
        assert_eq!(neet[0].topic_name, "Genetics");

        Ok(())
    }

    #[tokio::test]
    async fn test_seed_catalogue_runs_once() -> Result<()> {
        let db = setup_test_db().await?;
        let config = sample_config();

        assert_eq!(seed_catalogue(&db, &config).await?, 2);
        assert_eq!(seed_catalogue(&db, &config).await?, 0);

        let classes = get_all_classes(&db).await?;
        assert_eq!(classes.len(), 2);
        let topics = list_syllabus(&db, &SyllabusQuery::default()).await?;
        assert_eq!(topics.len(), 1);
        let class_12 = find_class_by_label(&db, "Class 12 - B").await?.unwrap();
        assert_eq!(topics[0].class_id, class_12.id);

        Ok(())
    }

    #[tokio::test]
    async fn test_seed_catalogue_rejects_unknown_class() -> Result<()> {
        let db = setup_test_db().await?;
        let mut config = sample_config();
        config.syllabus[0].class = "Class 10".to_string();

        let result = seed_catalogue(&db, &config).await;
        assert!(matches!(result, Err(Error::Config { .. })));
        // The whole seed is rolled back
        assert!(get_all_classes(&db).await?.is_empty());

        Ok(())
    }
}
