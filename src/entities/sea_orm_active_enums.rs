//! Enumerated column types shared by several entities.
//!
//! Each enum is stored as its string value so the database stays readable
//! and new exam types can be added without a schema migration.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

/// Competitive exam a cycle prepares for.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, EnumIter, DeriveActiveEnum, Serialize, Deserialize,
)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::None)")]
#[serde(rename_all = "UPPERCASE")]
pub enum ExamType {
    /// Joint Entrance Examination
    #[sea_orm(string_value = "JEE")]
    Jee,
    /// National Eligibility cum Entrance Test
    #[sea_orm(string_value = "NEET")]
    Neet,
    /// BITS Admission Test
    #[sea_orm(string_value = "BITSAT")]
    Bitsat,
}

impl ExamType {
    /// Database and display label.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Jee => "JEE",
            Self::Neet => "NEET",
            Self::Bitsat => "BITSAT",
        }
    }
}

impl fmt::Display for ExamType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ExamType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "JEE" => Ok(Self::Jee),
            "NEET" => Ok(Self::Neet),
            "BITSAT" => Ok(Self::Bitsat),
            other => Err(format!("unknown exam type '{other}'")),
        }
    }
}

/// Which syllabus track a topic or exam belongs to.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, EnumIter, DeriveActiveEnum, Serialize, Deserialize,
)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::None)")]
#[serde(rename_all = "lowercase")]
pub enum SyllabusType {
    /// Regular school curriculum
    #[sea_orm(string_value = "general")]
    General,
    /// Competitive-exam preparation track
    #[sea_orm(string_value = "competitive")]
    Competitive,
}

impl SyllabusType {
    /// Database and display label.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::General => "general",
            Self::Competitive => "competitive",
        }
    }
}

impl fmt::Display for SyllabusType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SyllabusType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "general" => Ok(Self::General),
            "competitive" => Ok(Self::Competitive),
            other => Err(format!("unknown syllabus type '{other}'")),
        }
    }
}

/// Lifecycle of a weekly exam: `scheduled` → `live` → `completed`.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, EnumIter, DeriveActiveEnum, Serialize, Deserialize,
)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::None)")]
#[serde(rename_all = "lowercase")]
pub enum ExamStatus {
    /// Created, not yet started
    #[sea_orm(string_value = "scheduled")]
    Scheduled,
    /// Currently being taken
    #[sea_orm(string_value = "live")]
    Live,
    /// Finished; terminal
    #[sea_orm(string_value = "completed")]
    Completed,
}

impl ExamStatus {
    /// Database and display label.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Scheduled => "scheduled",
            Self::Live => "live",
            Self::Completed => "completed",
        }
    }

    /// The only status this one may move to, or `None` when terminal.
    #[must_use]
    pub const fn next(self) -> Option<Self> {
        match self {
            Self::Scheduled => Some(Self::Live),
            Self::Live => Some(Self::Completed),
            Self::Completed => None,
        }
    }

    /// Whether `target` is the single legal next step from `self`.
    #[must_use]
    pub fn can_transition_to(self, target: Self) -> bool {
        self.next() == Some(target)
    }
}

impl fmt::Display for ExamStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ExamStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "scheduled" => Ok(Self::Scheduled),
            "live" => Ok(Self::Live),
            "completed" => Ok(Self::Completed),
            other => Err(format!("unknown exam status '{other}'")),
        }
    }
}

/// Letter grade band, best first.
#[allow(missing_docs)]
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, EnumIter, DeriveActiveEnum, Serialize, Deserialize,
)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::None)")]
pub enum Grade {
    #[sea_orm(string_value = "A+")]
    #[serde(rename = "A+")]
    APlus,
    #[sea_orm(string_value = "A")]
    A,
    #[sea_orm(string_value = "B+")]
    #[serde(rename = "B+")]
    BPlus,
    #[sea_orm(string_value = "B")]
    B,
    #[sea_orm(string_value = "C+")]
    #[serde(rename = "C+")]
    CPlus,
    #[sea_orm(string_value = "C")]
    C,
    #[sea_orm(string_value = "D")]
    D,
    #[sea_orm(string_value = "F")]
    F,
}

impl Grade {
    /// Display label, e.g. `"A+"`.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::APlus => "A+",
            Self::A => "A",
            Self::BPlus => "B+",
            Self::B => "B",
            Self::CPlus => "C+",
            Self::C => "C",
            Self::D => "D",
            Self::F => "F",
        }
    }
}

impl fmt::Display for Grade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Grade {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "A+" => Ok(Self::APlus),
            "A" => Ok(Self::A),
            "B+" => Ok(Self::BPlus),
            "B" => Ok(Self::B),
            "C+" => Ok(Self::CPlus),
            "C" => Ok(Self::C),
            "D" => Ok(Self::D),
            "F" => Ok(Self::F),
            other => Err(format!("unknown grade '{other}'")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_only_moves_one_step_forward() {
        assert!(ExamStatus::Scheduled.can_transition_to(ExamStatus::Live));
        assert!(ExamStatus::Live.can_transition_to(ExamStatus::Completed));
        assert!(!ExamStatus::Scheduled.can_transition_to(ExamStatus::Completed));
        assert!(!ExamStatus::Live.can_transition_to(ExamStatus::Scheduled));
        assert!(!ExamStatus::Completed.can_transition_to(ExamStatus::Scheduled));
        assert_eq!(ExamStatus::Completed.next(), None);
    }

    #[test]
    fn test_parse_labels() {
        assert_eq!("jee".parse::<ExamType>(), Ok(ExamType::Jee));
        assert_eq!(" BITSAT ".parse::<ExamType>(), Ok(ExamType::Bitsat));
        assert!("gate".parse::<ExamType>().is_err());
        assert_eq!(
            "Competitive".parse::<SyllabusType>(),
            Ok(SyllabusType::Competitive)
        );
        assert_eq!("live".parse::<ExamStatus>(), Ok(ExamStatus::Live));
        assert_eq!("b+".parse::<Grade>(), Ok(Grade::BPlus));
        assert_eq!(Grade::APlus.to_string(), "A+");
    }
}
