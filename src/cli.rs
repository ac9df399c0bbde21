use clap::{Parser, Subcommand};
use std::sync::Arc;

use crate::adapters::{PostgresBookingRepository, PostgresOfficeSpaceRepository};
use crate::config::{mask_database_url, mask_secret, Config};
use crate::notifications::NotificationDispatcher;
use crate::use_cases::ApproveBooking;

#[derive(Parser)]
#[command(name = "office-booking")]
#[command(about = "Office space booking service", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the HTTP server (default)
    Serve,

    /// Database management commands
    #[command(subcommand)]
    Db(DbCommands),

    /// Booking management commands
    #[command(subcommand)]
    Booking(BookingCommands),

    /// Configuration validation
    Config,
}

#[derive(Subcommand)]
pub enum DbCommands {
    /// Run database migrations
    Migrate,
}

#[derive(Subcommand)]
pub enum BookingCommands {
    /// Mark a booking as paid and notify the customer
    Approve {
        /// Booking id
        #[arg(value_name = "ID")]
        id: i64,
    },
}

pub async fn handle_db_migrate(config: &Config) -> anyhow::Result<()> {
    let pool = crate::db::create_pool(config).await?;

    tracing::info!("Running database migrations...");
    crate::db::run_migrations(&pool).await?;
    println!("✓ Database migrations completed");

    Ok(())
}

pub async fn handle_booking_approve(config: &Config, id: i64) -> anyhow::Result<()> {
    let pool = crate::db::create_pool(config).await?;
    let approve = ApproveBooking::new(
        Arc::new(PostgresBookingRepository::new(pool.clone())),
        Arc::new(PostgresOfficeSpaceRepository::new(pool)),
        NotificationDispatcher::from_config(config),
    );

    let approval = approve.execute(id).await?;
    if approval.newly_approved {
        println!("✓ Booking {} approved", approval.booking.booking_trx_id);
    } else {
        println!("Booking {} was already approved", approval.booking.booking_trx_id);
    }
    if let Some(outcome) = approval.notification {
        println!("  Notification: {}", serde_json::to_string(&outcome)?);
    }

    Ok(())
}

pub fn handle_config_validate(config: &Config) -> anyhow::Result<()> {
    tracing::info!("Validating configuration...");

    println!("Configuration:");
    println!("  Server Port: {}", config.server_port);
    println!("  Database URL: {}", mask_database_url(&config.database_url));
    println!("  Database Max Connections: {}", config.database_max_connections);
    println!("  Admin API Key: {}", mask_secret(&config.admin_api_key));
    println!("  CORS Origins: {:?}", config.cors_allowed_origins);
    println!("  Log Request Body: {}", config.log_request_body);
    match &config.messaging {
        Some(messaging) => {
            println!("  Twilio Account SID: {}", messaging.account_sid);
            println!("  Twilio Auth Token: {}", mask_secret(&messaging.auth_token));
            println!("  Twilio SMS Sender: {}", messaging.sms_from);
            println!(
                "  Twilio WhatsApp Sender: {}",
                messaging.whatsapp_from.as_deref().unwrap_or("(none, SMS only)")
            );
            println!("  Twilio API Base URL: {}", messaging.api_base_url);
        }
        None => println!("  Notifications: disabled"),
    }

    tracing::info!("Configuration is valid");
    println!("✓ Configuration is valid");

    Ok(())
}
