//! Notification preference commands.

use clap::{Args, Subcommand};

use notifyhub_core::config::ClientConfig;
use notifyhub_core::error::AppError;
use notifyhub_gateway::NotificationGateway;

use crate::output;

use super::Cli;

/// Arguments for preference commands
#[derive(Debug, Args)]
pub struct PrefsArgs {
    /// Preference subcommand
    #[command(subcommand)]
    pub command: PrefsCommand,
}

/// Preference subcommands
#[derive(Debug, Subcommand)]
pub enum PrefsCommand {
    /// Show current preferences
    Show,
    /// Replace preferences with the given JSON object
    Set {
        /// Preference object, e.g. '{"low_stock":{"enabled":false}}'
        json: String,
    },
}

/// Execute preference commands
pub async fn execute(args: &PrefsArgs, cli: &Cli, config: &ClientConfig) -> Result<(), AppError> {
    let gateway = super::build_gateway(cli, config)?;

    match &args.command {
        PrefsCommand::Show => {
            let prefs = gateway.get_preferences().await?;
            output::print_item(&prefs.preferences, cli.format);
        }
        PrefsCommand::Set { json } => {
            let value: serde_json::Value = serde_json::from_str(json)
                .map_err(|e| AppError::validation(format!("Invalid preference JSON: {e}")))?;
            let prefs = gateway.update_preferences(&value).await?;
            output::print_success("Preferences updated");
            output::print_item(&prefs.preferences, cli.format);
        }
    }
    Ok(())
}
