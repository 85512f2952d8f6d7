//! CLI command definitions and dispatch.

pub mod device;
pub mod inbox;
pub mod manage;
pub mod prefs;

use clap::{Parser, Subcommand};

use crate::output::OutputFormat;
use notifyhub_core::config::ClientConfig;
use notifyhub_core::error::AppError;
use notifyhub_gateway::{HttpNotificationGateway, SessionContext};

/// NotifyHub — notification center client
#[derive(Debug, Parser)]
#[command(name = "notifyhub", version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "notifyhub")]
    pub config: String,

    /// API token. Falls back to the NOTIFYHUB_TOKEN environment variable.
    #[arg(short, long)]
    pub token: Option<String>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "table")]
    pub format: OutputFormat,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level commands
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Inbox listing and statistics
    Inbox(inbox::InboxArgs),
    /// Mark notifications read
    Read(manage::ReadArgs),
    /// Delete notifications
    Delete(manage::DeleteArgs),
    /// Archive notifications
    Archive(manage::ArchiveArgs),
    /// Notification preferences
    Prefs(prefs::PrefsArgs),
    /// Push device-token registration
    Device(device::DeviceArgs),
}

impl Cli {
    /// Dispatch the selected command.
    pub async fn execute(&self, config: &ClientConfig) -> Result<(), AppError> {
        match &self.command {
            Commands::Inbox(args) => inbox::execute(args, self, config).await,
            Commands::Read(args) => manage::execute_read(args, self, config).await,
            Commands::Delete(args) => manage::execute_delete(args, self, config).await,
            Commands::Archive(args) => manage::execute_archive(args, self, config).await,
            Commands::Prefs(args) => prefs::execute(args, self, config).await,
            Commands::Device(args) => device::execute(args, self, config).await,
        }
    }
}

/// Build the HTTP gateway from configuration and explicit credentials.
pub(crate) fn build_gateway(
    cli: &Cli,
    config: &ClientConfig,
) -> Result<HttpNotificationGateway, AppError> {
    let token = cli
        .token
        .clone()
        .or_else(|| std::env::var("NOTIFYHUB_TOKEN").ok())
        .ok_or_else(|| {
            AppError::authentication("No API token provided. Pass --token or set NOTIFYHUB_TOKEN")
        })?;
    HttpNotificationGateway::new(&config.gateway, SessionContext::bearer(token))
}
