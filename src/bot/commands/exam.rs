//! Weekly exam Discord commands - scheduling, listing, status and coverage.
//!
//! `/exam advance` only ever requests the next status of an exam, so the
//! operator cannot skip or reverse a step from Discord.

// Inner module to suppress missing_docs warnings for poise macro-generated code
mod inner {
    #![allow(missing_docs)]

    use crate::{
        bot::{Context, commands::utils, handlers::autocomplete},
        core::{
            catalogue, marks, results, syllabus,
            weekly_exam::{self, ExamFilter, ExamInput},
        },
        entities::{ExamStatus, SyllabusType},
        errors::{Error, Result},
    };
    use std::fmt::Write;

    /// Parent command for weekly exams.
    #[poise::command(
        slash_command,
        subcommands(
            "exam_schedule",
            "exam_list",
            "exam_advance",
            "exam_attach",
            "exam_coverage",
            "exam_marks",
            "exam_results",
            "exam_delete"
        )
    )]
    pub async fn exam(ctx: Context<'_>) -> Result<()> {
        ctx.say(
            "Use `/exam schedule`, `list`, `advance`, `attach`, `coverage`, `marks`, `results` \
             or `delete`.",
        )
        .await?;
        Ok(())
    }

    /// Schedules a weekly exam for a class.
    #[allow(clippy::too_many_arguments)]
    #[poise::command(slash_command, rename = "schedule")]
    pub async fn exam_schedule(
        ctx: Context<'_>,
        #[description = "Class sitting the exam"]
        #[autocomplete = "autocomplete::autocomplete_class_label"]
        class: String,
        #[description = "Exam title"] title: String,
        #[description = "Exam date (YYYY-MM-DD)"] date: String,
        #[description = "general or competitive"]
        #[autocomplete = "autocomplete::autocomplete_syllabus_type"]
        syllabus_type: String,
        #[description = "Start time (HH:MM), defaults to 09:00"] time: Option<String>,
        #[description = "Duration in minutes, defaults to 60"] duration: Option<i32>,
        #[description = "Total marks, defaults to 100"] total_marks: Option<i32>,
        #[description = "Cycle id (competitive exams only)"] cycle_id: Option<i64>,
        #[description = "Week of the cycle (1-3)"] week: Option<i32>,
        #[description = "Marks deducted per wrong answer"] negative_marks: Option<f64>,
        #[description = "Send a reminder before the exam (default yes)"] reminder: Option<bool>,
    ) -> Result<()> {
        let db = &ctx.data().database;

        let Some(class) = catalogue::find_class_by_label(db, &class).await? else {
            ctx.say(format!("❌ Unknown class '{class}'.")).await?;
            return Ok(());
        };
        let syllabus_type: SyllabusType = utils::parse_label(&syllabus_type)?;

        let mut input = ExamInput::new(class.id, title, utils::parse_date(&date)?, syllabus_type);
        if let Some(time) = time {
            input.exam_time = utils::parse_time(&time)?;
        }
        input.duration_minutes = duration.unwrap_or(input.duration_minutes);
        input.total_marks = total_marks.unwrap_or(input.total_marks);
        input.cycle_id = cycle_id;
        input.week_number = week;
        if let Some(value) = negative_marks {
            input.negative_marking = value > 0.0;
            input.negative_marks_value = value;
        }
        input.reminder_enabled = reminder.unwrap_or(input.reminder_enabled);

        let created = weekly_exam::create_exam(db, input).await?;
        ctx.say(format!(
            "✅ Scheduled **{}** (`#{}`) for {} on {} at {}.",
            created.title,
            created.id,
            catalogue::class_label(&class),
            created.exam_date,
            created.exam_time.format("%H:%M")
        ))
        .await?;
        Ok(())
    }

    /// Lists weekly exams of one syllabus type.
    #[poise::command(slash_command, rename = "list")]
    pub async fn exam_list(
        ctx: Context<'_>,
        #[description = "general or competitive"]
        #[autocomplete = "autocomplete::autocomplete_syllabus_type"]
        syllabus_type: String,
        #[description = "Only this class"]
        #[autocomplete = "autocomplete::autocomplete_class_label"]
        class: Option<String>,
        #[description = "Search title or class"] search: Option<String>,
        #[description = "Only this status"]
        #[autocomplete = "autocomplete::autocomplete_exam_status"]
        status: Option<String>,
    ) -> Result<()> {
        let db = &ctx.data().database;

        let mut filter = ExamFilter::new(utils::parse_label(&syllabus_type)?);
        if let Some(label) = class {
            let Some(class) = catalogue::find_class_by_label(db, &label).await? else {
                ctx.say(format!("❌ Unknown class '{label}'.")).await?;
                return Ok(());
            };
            filter.class_id = Some(class.id);
        }
        filter.search_text = search;
        filter.status = status.as_deref().map(utils::parse_label).transpose()?;

        let exams = weekly_exam::list_exams(db, &filter).await?;
        if exams.is_empty() {
            ctx.say("📝 No exams match.").await?;
            return Ok(());
        }

        let classes = catalogue::class_directory(db).await?;
        let mut response = format!("📝 **{} exams** ({})\n", filter.syllabus_type, exams.len());
        for exam in &exams {
            writeln!(&mut response, "{}", utils::format_exam_line(exam, &classes))?;
        }

        ctx.say(response).await?;
        Ok(())
    }

    /// Moves an exam to its next status (scheduled → live → completed).
    #[poise::command(slash_command, rename = "advance")]
    pub async fn exam_advance(ctx: Context<'_>, #[description = "Exam id"] id: i64) -> Result<()> {
        let db = &ctx.data().database;
        let exam = weekly_exam::get_exam(db, id)
            .await?
            .ok_or(Error::ExamNotFound { id })?;

        let Some(next) = exam.status.next() else {
            ctx.say(format!("ℹ️ **{}** is already {}.", exam.title, exam.status))
                .await?;
            return Ok(());
        };

        let updated = weekly_exam::advance(db, id, next).await?;
        let icon = match updated.status {
            ExamStatus::Live => "🔴",
            ExamStatus::Completed => "🏁",
            ExamStatus::Scheduled => "📅",
        };
        ctx.say(format!(
            "{icon} **{}** is now {}.",
            updated.title, updated.status
        ))
        .await?;
        Ok(())
    }

    /// Sets the syllabus topics an exam covers, replacing the previous set.
    #[poise::command(slash_command, rename = "attach")]
    pub async fn exam_attach(
        ctx: Context<'_>,
        #[description = "Exam id"] id: i64,
        #[description = "Comma-separated topic ids; empty clears coverage"] topics: Option<String>,
    ) -> Result<()> {
        let ids = utils::parse_ids(topics.as_deref().unwrap_or_default())?;
        let stored = syllabus::attach(&ctx.data().database, id, ids).await?;
        ctx.say(format!(
            "📚 Exam `#{id}` now covers {} topic(s).",
            stored.len()
        ))
        .await?;
        Ok(())
    }

    /// Shows the topics an exam covers and the topics it could cover.
    #[poise::command(slash_command, rename = "coverage")]
    pub async fn exam_coverage(ctx: Context<'_>, #[description = "Exam id"] id: i64) -> Result<()> {
        let db = &ctx.data().database;
        let exam = weekly_exam::get_exam(db, id)
            .await?
            .ok_or(Error::ExamNotFound { id })?;

        let covered = syllabus::linked_ids(db, id).await?;
        let available = syllabus::available_for_exam(db, &exam).await?;

        let mut response = format!("📚 **{}** covers {} topic(s)\n", exam.title, covered.len());
        for topic in &available {
            let mark = if covered.contains(&topic.id) {
                "✅"
            } else {
                "▫️"
            };
            let tag = topic
                .exam_type
                .map(|t| format!(" [{t}]"))
                .unwrap_or_default();
            writeln!(
                &mut response,
                "{mark} `{}` {} › {}{tag}",
                topic.id, topic.chapter_name, topic.topic_name
            )?;
        }
        if available.is_empty() {
            response.push_str("_No catalogue topics for this class and syllabus type._\n");
        }

        ctx.say(response).await?;
        Ok(())
    }

    /// Records the marks of an exam, replacing any marks entered before.
    #[poise::command(slash_command, rename = "marks")]
    pub async fn exam_marks(
        ctx: Context<'_>,
        #[description = "Exam id"] id: i64,
        #[description = "student:marks pairs separated by commas"] entries: String,
    ) -> Result<()> {
        let db = &ctx.data().database;
        let stored = marks::save_marks(db, id, utils::parse_marks(&entries)?).await?;

        let mut response = format!("🧾 Saved {} mark(s) for exam `#{id}`\n", stored.len());
        for mark in &stored {
            writeln!(
                &mut response,
                "student `{}`: {} ({})",
                mark.student_id, mark.marks_obtained, mark.grade
            )?;
        }

        ctx.say(response).await?;
        Ok(())
    }

    /// Shows the published question paper and the submitted results of an exam.
    #[poise::command(slash_command, rename = "results")]
    pub async fn exam_results(ctx: Context<'_>, #[description = "Exam id"] id: i64) -> Result<()> {
        let db = &ctx.data().database;
        let exam = weekly_exam::get_exam(db, id)
            .await?
            .ok_or(Error::ExamNotFound { id })?;

        let mut response = format!("📊 **{}** results\n", exam.title);
        if let Some(paper) = results::paper_for_exam(db, id).await? {
            writeln!(
                &mut response,
                "Paper **{}**: {} question(s), {} marks",
                paper.paper.title,
                paper.questions.len(),
                paper.total_marks()
            )?;
        } else {
            response.push_str("_No question paper published._\n");
        }

        let submissions = results::results_for_exam(db, id).await?;
        if submissions.is_empty() {
            response.push_str("_No submissions yet._\n");
        }
        for (rank, result) in submissions.iter().enumerate() {
            let line = utils::format_result_line(rank + 1, result, exam.total_marks);
            writeln!(&mut response, "{line}")?;
        }

        ctx.say(response).await?;
        Ok(())
    }

    /// Deletes an exam with its syllabus links and marks.
    #[poise::command(slash_command, rename = "delete")]
    pub async fn exam_delete(ctx: Context<'_>, #[description = "Exam id"] id: i64) -> Result<()> {
        if weekly_exam::delete_exam(&ctx.data().database, id).await? {
            ctx.say(format!("🗑️ Exam `#{id}` deleted.")).await?;
        } else {
            ctx.say(format!("❌ Exam `#{id}` not found.")).await?;
        }
        Ok(())
    }
}

// Re-export all commands
pub use inner::*;
