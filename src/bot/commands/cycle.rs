//! Exam cycle Discord commands - rotation, listing and activation.

// Inner module to suppress missing_docs warnings for poise macro-generated code
mod inner {
    #![allow(missing_docs)]

    use crate::{
        bot::{Context, commands::utils, handlers::autocomplete},
        core::{
            cycle::{self, CycleInput},
            weekly_exam,
        },
        entities::ExamType,
        errors::Result,
    };
    use chrono::Local;
    use std::fmt::Write;

    /// Parent command for competitive-exam cycles.
    #[poise::command(
        slash_command,
        subcommands(
            "cycle_next",
            "cycle_create",
            "cycle_list",
            "cycle_activate",
            "cycle_deactivate",
            "cycle_delete"
        )
    )]
    pub async fn cycle(ctx: Context<'_>) -> Result<()> {
        ctx.say("Use `/cycle next`, `create`, `list`, `activate`, `deactivate` or `delete`.")
            .await?;
        Ok(())
    }

    /// Creates the next cycle in the JEE → NEET → BITSAT rotation.
    ///
    /// The start date defaults to the day after the latest cycle ends.
    #[poise::command(slash_command, rename = "next")]
    pub async fn cycle_next(
        ctx: Context<'_>,
        #[description = "Override the start date (YYYY-MM-DD)"] start: Option<String>,
    ) -> Result<()> {
        let db = &ctx.data().database;
        let today = Local::now().date_naive();

        let cycles = cycle::list_cycles(db).await?;
        let mut suggestion = cycle::suggest_next(&cycles, today);
        if let Some(start) = start {
            suggestion.start_date = utils::parse_date(&start)?;
            suggestion.end_date = cycle::default_end_date(suggestion.start_date);
        }

        let created = cycle::create_cycle(db, suggestion).await?;
        ctx.say(format!(
            "✅ Created **{} Cycle {}** (`#{id}`), {} to {}. Start it with `/cycle activate {id}`.",
            created.exam_type,
            created.cycle_number,
            created.start_date,
            created.end_date,
            id = created.id,
        ))
        .await?;
        Ok(())
    }

    /// Creates a cycle with every field chosen by hand.
    #[poise::command(slash_command, rename = "create")]
    pub async fn cycle_create(
        ctx: Context<'_>,
        #[description = "Exam type (JEE, NEET, BITSAT)"]
        #[autocomplete = "autocomplete::autocomplete_exam_type"]
        exam_type: String,
        #[description = "Cycle number for this exam type"] cycle_number: i32,
        #[description = "Start date (YYYY-MM-DD)"] start: String,
        #[description = "End date (YYYY-MM-DD), defaults to start + 20 days"] end: Option<String>,
    ) -> Result<()> {
        let exam_type: ExamType = utils::parse_label(&exam_type)?;
        let start_date = utils::parse_date(&start)?;
        let end_date = match end {
            Some(end) => utils::parse_date(&end)?,
            None => cycle::default_end_date(start_date),
        };

        let created = cycle::create_cycle(
            &ctx.data().database,
            CycleInput {
                exam_type,
                cycle_number,
                start_date,
                end_date,
            },
        )
        .await?;

        ctx.say(format!(
            "✅ Created **{} Cycle {}** (`#{}`) from {} to {}.",
            created.exam_type,
            created.cycle_number,
            created.id,
            created.start_date,
            created.end_date
        ))
        .await?;
        Ok(())
    }

    /// Lists every cycle with its progress, newest first.
    #[poise::command(slash_command, rename = "list")]
    pub async fn cycle_list(ctx: Context<'_>) -> Result<()> {
        let db = &ctx.data().database;
        let cycles = cycle::list_cycles(db).await?;

        if cycles.is_empty() {
            ctx.say("📅 No cycles yet. Start the rotation with `/cycle next`.")
                .await?;
            return Ok(());
        }

        let exam_counts = weekly_exam::exam_counts_by_cycle(db).await?;
        let now = Local::now().naive_local();
        let mut response = String::from("📅 **Exam Cycles**\n");
        for c in cycles {
            let exams = exam_counts.get(&c.id).copied().unwrap_or_default();
            let overview = cycle::cycle_overview(c, now);
            writeln!(
                &mut response,
                "{} | {exams} exam(s)",
                utils::format_cycle_line(&overview)
            )?;
        }

        ctx.say(response).await?;
        Ok(())
    }

    /// Activates a cycle; other cycles of the same exam type are deactivated.
    #[poise::command(slash_command, rename = "activate")]
    pub async fn cycle_activate(
        ctx: Context<'_>,
        #[description = "Cycle id"] id: i64,
    ) -> Result<()> {
        let activated = cycle::activate(&ctx.data().database, id).await?;
        ctx.say(format!(
            "🟢 **{} Cycle {}** is now the active {} cycle.",
            activated.exam_type, activated.cycle_number, activated.exam_type
        ))
        .await?;
        Ok(())
    }

    /// Deactivates a cycle.
    #[poise::command(slash_command, rename = "deactivate")]
    pub async fn cycle_deactivate(
        ctx: Context<'_>,
        #[description = "Cycle id"] id: i64,
    ) -> Result<()> {
        let deactivated = cycle::deactivate(&ctx.data().database, id).await?;
        ctx.say(format!(
            "⚪ **{} Cycle {}** deactivated.",
            deactivated.exam_type, deactivated.cycle_number
        ))
        .await?;
        Ok(())
    }

    /// Deletes a cycle. Its exams are kept without a cycle.
    #[poise::command(slash_command, rename = "delete")]
    pub async fn cycle_delete(ctx: Context<'_>, #[description = "Cycle id"] id: i64) -> Result<()> {
        if cycle::delete_cycle(&ctx.data().database, id).await? {
            ctx.say(format!("🗑️ Cycle `#{id}` deleted.")).await?;
        } else {
            ctx.say(format!("❌ Cycle `#{id}` not found.")).await?;
        }
        Ok(())
    }
}

// Re-export all commands
pub use inner::*;
