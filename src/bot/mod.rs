//! Bot layer - Discord-specific interface and command handlers
//!
//! This module provides the Discord interface for the ExamBuddy application,
//! including all slash commands, autocomplete handlers, and bot context management.

/// Discord command implementations (cycle, exam, general)
pub mod commands;
/// Discord interaction handlers (autocomplete, etc.)
pub mod handlers;

use crate::errors::{Error, Result};
use poise::serenity_prelude as serenity;
use sea_orm::DatabaseConnection;
use tracing::{error, info};

/// Shared data available to all bot commands.
/// This structure holds the database connection and any other global state
/// that commands need to access.
pub struct BotData {
    /// Database connection for all database operations
    pub database: DatabaseConnection,
}

impl BotData {
    /// Creates a new `BotData` instance with the given database connection.
    #[must_use]
    pub const fn new(database: DatabaseConnection) -> Self {
        Self { database }
    }
}

/// Poise context used by every command.
pub type Context<'a> = poise::Context<'a, BotData, Error>;

async fn on_error(error: poise::FrameworkError<'_, BotData, Error>) {
    match error {
        poise::FrameworkError::Setup { error, .. } => {
            error!("Failed to start bot: {error}");
        }
        poise::FrameworkError::Command { error, ctx, .. } => {
            error!("Error in command `{}`: {error}", ctx.command().name);
            let message = match &error {
                // Operator mistakes are shown verbatim
                Error::Validation { .. }
                | Error::InvalidTransition { .. }
                | Error::CycleNotFound { .. }
                | Error::ExamNotFound { .. }
                | Error::ClassNotFound { .. } => format!("❌ {error}"),
                _ => "❌ Something went wrong. Please try again.".to_string(),
            };
            if let Err(e) = ctx.say(message).await {
                error!("Failed to send error message: {e}");
            }
        }
        error => {
            if let Err(e) = poise::builtins::on_error(error).await {
                error!("Error while handling error: {e}");
            }
        }
    }
}

/// Registers the slash commands and runs the Discord client until it stops.
pub async fn run_bot(token: String, database: DatabaseConnection) -> Result<()> {
    let framework = poise::Framework::builder()
        .options(poise::FrameworkOptions {
            commands: vec![
                commands::ping(),
                commands::help(),
                commands::grade(),
                commands::cycle(),
                commands::exam(),
            ],
            on_error: |error| Box::pin(on_error(error)),
            ..Default::default()
        })
        .setup(|ctx, ready, framework| {
            Box::pin(async move {
                info!("Logged in as {}", ready.user.name);
                poise::builtins::register_globally(ctx, &framework.options().commands).await?;
                info!(
                    "Registered {} commands globally",
                    framework.options().commands.len()
                );
                Ok(BotData::new(database))
            })
        })
        .build();

    let intents = serenity::GatewayIntents::non_privileged();

    info!("Setting up Serenity client for Poise framework...");
    let mut client = serenity::Client::builder(&token, intents)
        .framework(framework)
        .await?;

    info!("Starting bot client...");
    client.start().await?;
    Ok(())
}
