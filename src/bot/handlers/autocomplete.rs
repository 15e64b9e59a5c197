//! Autocomplete handlers for Discord slash command parameters.
//!
//! Suggestions are capped at 25 entries, the Discord limit.

use crate::{
    bot::Context,
    core::{catalogue, cycle},
    entities::{ExamStatus, ExamType, SyllabusType},
};
use sea_orm::Iterable;

const MAX_CHOICES: usize = 25;

fn matching<I>(labels: I, partial: &str) -> Vec<String>
where
    I: IntoIterator<Item = String>,
{
    let partial_lower = partial.to_lowercase();
    labels
        .into_iter()
        .filter(|label| label.to_lowercase().contains(&partial_lower))
        .take(MAX_CHOICES)
        .collect()
}

/// Suggests class labels (e.g. "Class 11 - A") matching the partial input.
pub async fn autocomplete_class_label(ctx: Context<'_>, partial: &str) -> Vec<String> {
    let Ok(classes) = catalogue::get_all_classes(&ctx.data().database).await else {
        return Vec::new();
    };
    matching(classes.iter().map(catalogue::class_label), partial)
}

/// Suggests exam types, in rotation order.
pub async fn autocomplete_exam_type(_ctx: Context<'_>, partial: &str) -> Vec<String> {
    matching(cycle::ROTATION.iter().map(ExamType::to_string), partial)
}

/// Suggests syllabus types.
pub async fn autocomplete_syllabus_type(_ctx: Context<'_>, partial: &str) -> Vec<String> {
    matching(SyllabusType::iter().map(|t| t.to_string()), partial)
}

/// Suggests exam statuses.
pub async fn autocomplete_exam_status(_ctx: Context<'_>, partial: &str) -> Vec<String> {
    matching(ExamStatus::iter().map(|s| s.to_string()), partial)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_matching_is_case_insensitive_and_capped() {
        let labels = (0..40).map(|i| format!("Class {i} - A"));
        assert_eq!(matching(labels, "class").len(), MAX_CHOICES);

        let labels = vec!["JEE".to_string(), "NEET".to_string(), "BITSAT".to_string()];
        assert_eq!(matching(labels, "ee"), vec!["JEE", "NEET"]);
    }
}
