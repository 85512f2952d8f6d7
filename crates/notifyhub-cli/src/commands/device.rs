//! Push device-token commands.

use clap::{Args, Subcommand};

use notifyhub_core::config::ClientConfig;
use notifyhub_core::error::AppError;
use notifyhub_entity::device::DevicePlatform;
use notifyhub_gateway::{DeviceRegistration, NotificationGateway};

use crate::output;

use super::Cli;

/// Arguments for device commands
#[derive(Debug, Args)]
pub struct DeviceArgs {
    /// Device subcommand
    #[command(subcommand)]
    pub command: DeviceCommand,
}

/// Device subcommands
#[derive(Debug, Subcommand)]
pub enum DeviceCommand {
    /// Register a push device token
    Register {
        /// Push token issued by the platform
        #[arg(long)]
        token: String,
        /// Platform: ios, android, web
        #[arg(long)]
        platform: String,
        /// Stable device identifier
        #[arg(long)]
        device_id: Option<String>,
    },
    /// Unregister a push device token
    Unregister {
        /// Previously registered push token
        #[arg(long)]
        token: String,
    },
}

/// Execute device commands
pub async fn execute(args: &DeviceArgs, cli: &Cli, config: &ClientConfig) -> Result<(), AppError> {
    let gateway = super::build_gateway(cli, config)?;

    match &args.command {
        DeviceCommand::Register {
            token,
            platform,
            device_id,
        } => {
            let platform: DevicePlatform = platform.parse()?;
            let mut registration = DeviceRegistration::new(token.clone(), platform);
            if let Some(device_id) = device_id {
                registration = registration.with_device_id(device_id.clone());
            }
            let message = gateway.register_device(&registration).await?;
            output::print_success(&message);
        }
        DeviceCommand::Unregister { token } => {
            gateway.unregister_device(token).await?;
            output::print_success("Device token unregistered");
        }
    }
    Ok(())
}
