use clap::Parser;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use office_booking::adapters::{PostgresBookingRepository, PostgresOfficeSpaceRepository};
use office_booking::cli::{BookingCommands, Cli, Commands, DbCommands};
use office_booking::config::Config;
use office_booking::health::{HealthChecker, PostgresChecker};
use office_booking::middleware::auth::AdminApiKey;
use office_booking::middleware::cors::cors_layer;
use office_booking::middleware::request_logger::RequestLogSettings;
use office_booking::notifications::NotificationDispatcher;
use office_booking::{cli, create_app, db, startup, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();

    let cli = Cli::parse();
    let config = Config::from_env()?;

    match cli.command {
        None | Some(Commands::Serve) => serve(config).await,
        Some(Commands::Db(DbCommands::Migrate)) => cli::handle_db_migrate(&config).await,
        Some(Commands::Booking(BookingCommands::Approve { id })) => {
            cli::handle_booking_approve(&config, id).await
        }
        Some(Commands::Config) => cli::handle_config_validate(&config),
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into());
    let json = std::env::var("LOG_FORMAT")
        .map(|format| format.eq_ignore_ascii_case("json"))
        .unwrap_or(false);

    if json {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer())
            .init();
    }
}

async fn serve(config: Config) -> anyhow::Result<()> {
    let pool = db::create_pool(&config).await?;
    db::run_migrations(&pool).await?;

    let report = startup::validate_environment(&config, &pool).await?;
    report.print();
    if !report.is_valid() {
        anyhow::bail!("Startup validation failed: {}", report.errors.join("; "));
    }

    let notifier = NotificationDispatcher::from_config(&config);
    tracing::info!(enabled = notifier.is_enabled(), "Notification dispatcher initialized");

    let state = AppState {
        bookings: Arc::new(PostgresBookingRepository::new(pool.clone())),
        offices: Arc::new(PostgresOfficeSpaceRepository::new(pool.clone())),
        notifier,
        health: HealthChecker::new().with_checker("postgres", Arc::new(PostgresChecker::new(pool))),
        admin_api_key: AdminApiKey::new(&config.admin_api_key),
        request_log: RequestLogSettings {
            log_body: config.log_request_body,
        },
    };

    let app = create_app(state).layer(cors_layer(&config.cors_allowed_origins));

    let addr = SocketAddr::from(([0, 0, 0, 0], config.server_port));
    tracing::info!("listening on {}", addr);

    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
