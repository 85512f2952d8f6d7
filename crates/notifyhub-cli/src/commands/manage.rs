//! Mark-read, delete, and archive commands.

use clap::Args;
use dialoguer::Confirm;

use notifyhub_core::config::ClientConfig;
use notifyhub_core::error::AppError;
use notifyhub_core::types::NotificationId;
use notifyhub_gateway::NotificationGateway;

use crate::output;

use super::Cli;

/// Arguments for the read command
#[derive(Debug, Args)]
pub struct ReadArgs {
    /// Notification ids to mark read
    #[arg(required_unless_present = "all")]
    pub ids: Vec<String>,

    /// Mark every notification read
    #[arg(long, conflicts_with = "ids")]
    pub all: bool,
}

/// Arguments for the delete command
#[derive(Debug, Args)]
pub struct DeleteArgs {
    /// Notification ids to delete
    #[arg(required = true)]
    pub ids: Vec<String>,

    /// Skip the confirmation prompt
    #[arg(short, long)]
    pub yes: bool,
}

/// Arguments for the archive command
#[derive(Debug, Args)]
pub struct ArchiveArgs {
    /// Notification ids to archive
    #[arg(required = true)]
    pub ids: Vec<String>,
}

fn parse_ids(raw: &[String]) -> Result<Vec<NotificationId>, AppError> {
    raw.iter()
        .map(|id| {
            id.parse::<NotificationId>()
                .map_err(|e| AppError::validation(format!("Invalid notification id '{id}': {e}")))
        })
        .collect()
}

/// Execute the read command
pub async fn execute_read(
    args: &ReadArgs,
    cli: &Cli,
    config: &ClientConfig,
) -> Result<(), AppError> {
    let gateway = super::build_gateway(cli, config)?;

    if args.all {
        let count = gateway.mark_all_read().await?;
        output::print_success(&format!("Marked {} notification(s) read", count));
        return Ok(());
    }

    let ids = parse_ids(&args.ids)?;
    if let [id] = ids.as_slice() {
        gateway.mark_read(*id).await?;
        output::print_success(&format!("Marked {} read", id));
    } else {
        let count = gateway.bulk_mark_read(&ids).await?;
        output::print_success(&format!("Marked {} notification(s) read", count));
    }
    Ok(())
}

/// Execute the delete command
pub async fn execute_delete(
    args: &DeleteArgs,
    cli: &Cli,
    config: &ClientConfig,
) -> Result<(), AppError> {
    let ids = parse_ids(&args.ids)?;

    if !args.yes {
        let confirmed = Confirm::new()
            .with_prompt(format!("Delete {} notification(s)?", ids.len()))
            .default(false)
            .interact()
            .map_err(|e| AppError::internal(format!("Prompt failed: {e}")))?;
        if !confirmed {
            output::print_warning("Aborted.");
            return Ok(());
        }
    }

    let gateway = super::build_gateway(cli, config)?;
    if let [id] = ids.as_slice() {
        gateway.delete(*id).await?;
        output::print_success(&format!("Deleted {}", id));
    } else {
        let count = gateway.bulk_delete(&ids).await?;
        output::print_success(&format!("Deleted {} notification(s)", count));
    }
    Ok(())
}

/// Execute the archive command
pub async fn execute_archive(
    args: &ArchiveArgs,
    cli: &Cli,
    config: &ClientConfig,
) -> Result<(), AppError> {
    let ids = parse_ids(&args.ids)?;
    let gateway = super::build_gateway(cli, config)?;

    if let [id] = ids.as_slice() {
        gateway.archive(*id).await?;
        output::print_success(&format!("Archived {}", id));
    } else {
        let count = gateway.bulk_archive(&ids).await?;
        output::print_success(&format!("Archived {} notification(s)", count));
    }
    Ok(())
}
