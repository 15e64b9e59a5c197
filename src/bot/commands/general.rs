//! General Discord commands - ping, help and the grade calculator.
//! These commands don't need the exam tables.

// Inner module to suppress missing_docs warnings for poise macro-generated code
mod inner {
    #![allow(missing_docs)]

    use crate::{
        bot::Context,
        core::grading,
        errors::Result,
    };

    /// Responds with "Pong!" to test bot connectivity.
    #[poise::command(slash_command, prefix_command)]
    pub async fn ping(ctx: Context<'_>) -> Result<()> {
        ctx.say("Pong!").await?;
        Ok(())
    }

    /// Displays help information about available commands.
    #[poise::command(slash_command, prefix_command)]
    pub async fn help(ctx: Context<'_>) -> Result<()> {
        let help_text = "**ExamBuddy Help**\n\
        Competitive-exam cycles (JEE → NEET → BITSAT) and weekly exams.\n\n\
        **Cycles**\n\
        • `/cycle next [start]` - Creates the next cycle in the rotation.\n\
        • `/cycle create <type> <number> <start> [end]` - Creates a cycle by hand.\n\
        • `/cycle list` - Shows cycles with progress and current week.\n\
        • `/cycle activate|deactivate|delete <id>` - Manages a cycle.\n\n\
        **Weekly Exams**\n\
        • `/exam schedule <class> <title> <date> ...` - Schedules an exam.\n\
        • `/exam list <syllabus_type> [class] [search] [status]` - Lists exams.\n\
        • `/exam advance <id>` - Moves an exam to its next status.\n\
        • `/exam attach <id> <topic ids>` - Sets the syllabus an exam covers.\n\
        • `/exam coverage <id>` - Shows covered and available topics.\n\
        • `/exam marks <id> <student:marks, ...>` - Records marks with grades.\n\
        • `/exam results <id>` - Shows the question paper and submitted results.\n\
        • `/exam delete <id>` - Deletes an exam.\n\n\
        **Utility**\n\
        • `/grade <marks> [max]` - Shows the grade band for a score.\n\
        • `/ping` - Checks if the bot is responsive.";

        ctx.say(help_text).await?;
        Ok(())
    }

    /// Shows the grade band for a score.
    #[poise::command(slash_command, prefix_command)]
    pub async fn grade(
        ctx: Context<'_>,
        #[description = "Marks obtained"] marks: f64,
        #[description = "Maximum marks (defaults to 100)"] max_marks: Option<f64>,
    ) -> Result<()> {
        let max = max_marks.unwrap_or(grading::DEFAULT_MAX_MARKS);
        let percent = grading::percentage(marks, max);
        let grade = grading::grade_for_percentage(percent);
        ctx.say(format!("📝 {marks} / {max} = {percent:.1}% → **{grade}**"))
            .await?;
        Ok(())
    }
}

// Re-export all commands
pub use inner::*;
