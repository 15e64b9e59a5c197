/// Database configuration and connection management
pub mod database;

/// Class and syllabus catalogue loading from config.toml
pub mod catalogue;
