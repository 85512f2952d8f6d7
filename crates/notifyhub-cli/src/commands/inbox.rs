//! Inbox listing and statistics commands.

use std::sync::Arc;

use clap::{Args, Subcommand};
use serde::Serialize;
use tabled::Tabled;

use notifyhub_core::config::ClientConfig;
use notifyhub_core::error::AppError;
use notifyhub_core::types::PageWindow;
use notifyhub_entity::notification::{Notification, NotificationKind, NotificationPriority};
use notifyhub_gateway::{ListQuery, NotificationGateway};
use notifyhub_store::{InboxTab, NotificationStore};

use crate::output;

use super::Cli;

/// Arguments for inbox commands
#[derive(Debug, Args)]
pub struct InboxArgs {
    /// Inbox subcommand
    #[command(subcommand)]
    pub command: InboxCommand,
}

/// Inbox subcommands
#[derive(Debug, Subcommand)]
pub enum InboxCommand {
    /// List notifications, newest first
    List {
        /// Show only unread notifications
        #[arg(short, long)]
        unread: bool,
        /// Filter by notification type
        #[arg(short, long)]
        kind: Option<String>,
        /// Filter by priority: low, medium, high, critical
        #[arg(short, long)]
        priority: Option<String>,
        /// Number of pages to fetch
        #[arg(long, default_value = "1")]
        pages: u32,
    },
    /// Aggregate counts by type and priority
    Stats,
}

/// One table row per notification
#[derive(Debug, Serialize, Tabled)]
struct NotificationRow {
    /// Notification id
    #[tabled(rename = "ID")]
    id: String,
    /// Kind
    #[tabled(rename = "Type")]
    kind: String,
    /// Priority
    #[tabled(rename = "Priority")]
    priority: String,
    /// Read state
    #[tabled(rename = "Read")]
    read: String,
    /// Creation time
    #[tabled(rename = "Created")]
    created: String,
    /// Title
    #[tabled(rename = "Title")]
    title: String,
}

impl NotificationRow {
    fn from_notification(n: &Notification) -> Self {
        Self {
            id: n.id.to_string(),
            kind: n.kind.as_str().to_string(),
            priority: n.priority.as_str().to_string(),
            read: if n.is_read { "yes" } else { "no" }.to_string(),
            created: n.created_at.format("%Y-%m-%d %H:%M").to_string(),
            title: n.title.clone(),
        }
    }
}

/// Execute inbox commands
pub async fn execute(args: &InboxArgs, cli: &Cli, config: &ClientConfig) -> Result<(), AppError> {
    let gateway = Arc::new(super::build_gateway(cli, config)?);

    match &args.command {
        InboxCommand::List {
            unread,
            kind,
            priority,
            pages,
        } => {
            if kind.is_some() || priority.is_some() {
                // Server-side filters bypass the inbox store.
                let mut query = ListQuery::new(PageWindow::first(config.inbox.page_size))
                    .unread_only(*unread);
                if let Some(kind) = kind {
                    query = query.kind(NotificationKind::from(kind.clone()));
                }
                if let Some(priority) = priority {
                    query = query.priority(NotificationPriority::from_str_value(priority));
                }
                let page = gateway.list(&query).await?;
                let rows: Vec<NotificationRow> = page
                    .notifications
                    .iter()
                    .map(NotificationRow::from_notification)
                    .collect();
                output::print_list(&rows, cli.format);
                output::print_kv("Unread", &page.unread_count.to_string());
                output::print_kv("Total", &page.total.to_string());
                return Ok(());
            }

            let store = NotificationStore::new(
                gateway as Arc<dyn NotificationGateway>,
                config.inbox.clone(),
            );
            if *unread {
                store.switch_tab(InboxTab::Unread).await?;
            } else {
                store.refresh().await?;
            }
            for _ in 1..*pages {
                if !store.snapshot().has_more {
                    break;
                }
                store.load_more().await?;
            }

            let snapshot = store.snapshot();
            let rows: Vec<NotificationRow> = snapshot
                .items
                .iter()
                .map(NotificationRow::from_notification)
                .collect();
            output::print_list(&rows, cli.format);
            output::print_kv("Unread", &snapshot.unread_count.to_string());
            output::print_kv("Total", &snapshot.total.to_string());
            if snapshot.has_more {
                output::print_kv("More", "yes (use --pages to fetch further)");
            }
        }
        InboxCommand::Stats => {
            let stats = gateway.stats().await?;
            output::print_kv("Total", &stats.total.to_string());
            output::print_kv("Unread", &stats.unread.to_string());

            let mut by_type: Vec<_> = stats.by_type.iter().collect();
            by_type.sort_by(|a, b| a.0.cmp(b.0));
            for (kind, count) in by_type {
                output::print_kv(&format!("type/{kind}"), &count.to_string());
            }

            let mut by_priority: Vec<_> = stats.by_priority.iter().collect();
            by_priority.sort_by(|a, b| a.0.cmp(b.0));
            for (priority, count) in by_priority {
                output::print_kv(&format!("priority/{priority}"), &count.to_string());
            }
        }
    }
    Ok(())
}
