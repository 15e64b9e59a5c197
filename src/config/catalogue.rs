//! Catalogue configuration loading from config.toml
//!
//! The class directory and syllabus catalogue are owned by other parts of the
//! school system. For a standalone deployment they are described in a TOML
//! file and used to seed the database on first run.

use crate::entities::{ExamType, SyllabusType};
use crate::errors::{Error, Result};
use serde::Deserialize;
use std::path::Path;

/// Configuration structure representing the entire config.toml file
#[derive(Debug, Deserialize, Default)]
pub struct CatalogueConfig {
    /// Classes to seed
    #[serde(default)]
    pub classes: Vec<ClassConfig>,
    /// Syllabus topics to seed
    #[serde(default)]
    pub syllabus: Vec<SyllabusConfig>,
}

/// Configuration for a single class
#[derive(Debug, Deserialize, Clone)]
pub struct ClassConfig {
    /// Class name (e.g., "Class 11")
    pub name: String,
    /// Section (e.g., "A")
    pub section: String,
}

/// Configuration for a single syllabus topic
#[derive(Debug, Deserialize, Clone)]
pub struct SyllabusConfig {
    /// Name of the class the topic is taught in
    pub class: String,
    /// Section of that class
    pub section: String,
    /// Subject reference
    pub subject_id: i64,
    /// Chapter name
    pub chapter: String,
    /// Topic name
    pub topic: String,
    /// `"general"` or `"competitive"`
    pub syllabus_type: SyllabusType,
    /// Optional competitive exam tag (`"JEE"`, `"NEET"`, `"BITSAT"`)
    #[serde(default)]
    pub exam_type: Option<ExamType>,
}

/// Loads the catalogue configuration from a TOML file.
///
/// # Errors
/// Returns [`Error::Config`] if the file cannot be read or the TOML is invalid.
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<CatalogueConfig> {
    let path_ref = path.as_ref();
    tracing::debug!("Attempting to load catalogue from: {:?}", path_ref);
    let contents = std::fs::read_to_string(path_ref).map_err(|e| Error::Config {
        message: format!("Failed to read config file {path_ref:?}: {e}"),
    })?;

    toml::from_str(&contents).map_err(|e| Error::Config {
        message: format!("Failed to parse {path_ref:?}: {e}"),
    })
}

/// Loads the catalogue from `CATALOGUE_CONFIG`, or `./config.toml` when unset.
pub fn load_default_config() -> Result<CatalogueConfig> {
    let path = std::env::var("CATALOGUE_CONFIG").unwrap_or_else(|_| "config.toml".to_string());
    load_config(path)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;

    #[test]
    fn test_parse_catalogue_config() {
        let toml_str = r#"
            [[classes]]
            name = "Class 11"
            section = "A"

            [[classes]]
            name = "Class 12"
            section = "B"

            [[syllabus]]
            class = "Class 11"
            section = "A"
            subject_id = 1
            chapter = "Mechanics"
            topic = "Kinematics"
            syllabus_type = "competitive"
            exam_type = "JEE"

            [[syllabus]]
            class = "Class 11"
            section = "A"
            subject_id = 2
            chapter = "Cell Biology"
            topic = "Cell Cycle"
            syllabus_type = "general"
        "#;

        let config: CatalogueConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.classes.len(), 2);
        assert_eq!(config.classes[1].section, "B");
        assert_eq!(config.syllabus.len(), 2);
        assert_eq!(config.syllabus[0].syllabus_type, SyllabusType::Competitive);
        assert_eq!(config.syllabus[0].exam_type, Some(ExamType::Jee));
        assert_eq!(config.syllabus[1].syllabus_type, SyllabusType::General);
        assert!(config.syllabus[1].exam_type.is_none());
    }

    #[test]
    fn test_load_missing_file_is_config_error() {
        let result = load_config("definitely/not/here.toml");
        assert!(matches!(result, Err(Error::Config { .. })));
    }
}
