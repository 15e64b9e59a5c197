//! Unified error type for `ExamBuddy`.
//!
//! Validation failures are raised before any write. Persistence failures are
//! wrapped unmodified in [`Error::Database`] and never retried.

use crate::entities::sea_orm_active_enums::ExamStatus;
use thiserror::Error;

/// Every failure the library and the bot can report.
#[derive(Debug, Error)]
pub enum Error {
    /// Configuration file or environment could not be loaded
    #[error("Configuration error: {message}")]
    Config {
        /// Human-readable reason
        message: String,
    },

    /// Operator input was rejected before touching the database
    #[error("Validation error: {message}")]
    Validation {
        /// Human-readable reason, surfaced verbatim to the operator
        message: String,
    },

    /// No exam cycle with this id
    #[error("Exam cycle not found: {id}")]
    CycleNotFound {
        /// Requested cycle id
        id: i64,
    },

    /// No weekly exam with this id
    #[error("Weekly exam not found: {id}")]
    ExamNotFound {
        /// Requested exam id
        id: i64,
    },

    /// No class with this id in the class directory
    #[error("Class not found: {id}")]
    ClassNotFound {
        /// Requested class id
        id: i64,
    },

    /// Exam status may only move one step forward
    #[error("Cannot move exam from {from} to {to}")]
    InvalidTransition {
        /// Current status
        from: ExamStatus,
        /// Requested status
        to: ExamStatus,
    },

    /// The backing store rejected the operation
    #[error("Database error: {0}")]
    Database(#[from] sea_orm::DbErr),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Environment variable error
    #[error("Environment variable error: {0}")]
    EnvVar(#[from] std::env::VarError),

    /// Writing to a `String` buffer failed
    #[error("Formatting error: {0}")]
    Fmt(#[from] std::fmt::Error),

    /// Serenity/Poise framework error
    #[error("Serenity/Poise framework error: {0}")]
    Framework(Box<poise::serenity_prelude::Error>),
}

impl From<poise::serenity_prelude::Error> for Error {
    fn from(value: poise::serenity_prelude::Error) -> Self {
        Self::Framework(Box::new(value))
    }
}

impl Error {
    /// Shorthand for a [`Error::Validation`] with the given message.
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }
}

/// Convenience `Result` type
pub type Result<T> = std::result::Result<T, Error>;
