//! Item service entry point.

use chrono::Utc;
use clap::{Parser, Subcommand, ValueEnum};
use metrics_exporter_prometheus::PrometheusBuilder;
use tokio::net::TcpListener;
use tracing::{error, info};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use item_service::api::{create_router, AppState};
use item_service::config::Config;
use item_service::error::ServiceError;
use item_service::metrics;
use item_service::status::StatusReporter;
use item_service::store::ItemStore;
use item_service::utils::shutdown_signal;

/// Minimal item CRUD backend.
#[derive(Parser, Debug)]
#[command(name = "item-service")]
#[command(about = "In-memory item CRUD API with health, readiness and version endpoints")]
#[command(version)]
struct Args {
    /// Enable verbose logging.
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Log output format.
    #[arg(long, value_enum, default_value_t = LogFormat::Text, global = true)]
    log_format: LogFormat,

    #[command(subcommand)]
    command: Option<Command>,

    /// HTTP listen port (overrides PORT).
    #[arg(short, long)]
    port: Option<u16>,

    /// HTTP listen address (overrides HOST).
    #[arg(long)]
    host: Option<String>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Serve the HTTP API (default).
    Serve,

    /// Check configuration validity.
    CheckConfig,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum LogFormat {
    Text,
    Json,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Parse CLI arguments
    let args = Args::parse();

    // Configuration is read first so a RUST_LOG from .env applies to logging
    let config = Config::load();
    let level = config
        .as_ref()
        .map(|c| c.rust_log.clone())
        .unwrap_or_else(|_| "info".to_string());
    init_logging(args.verbose, args.log_format, &level);

    let mut config = config.map_err(|e| {
        error!("Failed to load configuration: {}", e);
        ServiceError::from(e)
    })?;

    // Override with CLI args if provided
    if let Some(port) = args.port {
        config.port = port;
    }
    if let Some(host) = args.host {
        config.host = host;
    }

    match args.command.unwrap_or(Command::Serve) {
        Command::Serve => cmd_serve(config).await,
        Command::CheckConfig => cmd_check_config(&config),
    }
}

fn init_logging(verbose: bool, format: LogFormat, level: &str) {
    let filter = if verbose {
        EnvFilter::new("item_service=debug,tower_http=debug,info")
    } else {
        EnvFilter::try_new(level).unwrap_or_else(|_| EnvFilter::new("info"))
    };

    match format {
        LogFormat::Text => tracing_subscriber::registry()
            .with(fmt::layer())
            .with(filter)
            .init(),
        LogFormat::Json => tracing_subscriber::registry()
            .with(fmt::layer().json())
            .with(filter)
            .init(),
    }
}

/// Check configuration validity.
fn cmd_check_config(config: &Config) -> anyhow::Result<()> {
    println!("======================================================================");
    println!("ITEM SERVICE - CONFIGURATION CHECK");
    println!("======================================================================");

    print!("Validating configuration... ");
    match config.validate() {
        Ok(()) => println!("OK"),
        Err(e) => {
            println!("FAILED");
            println!("  Error: {}", e);
            return Err(anyhow::anyhow!("Configuration validation failed"));
        }
    }

    let build = config.build_info(Utc::now());

    println!("----------------------------------------------------------------------");
    println!("Configuration Summary:");
    println!("  Listen Address: {}", config.bind_addr());
    println!("  Version: {}", build.version);
    println!(
        "  Build Time: {}{}",
        build.build_time,
        if config.build_time.is_none() { " (startup time)" } else { "" }
    );
    println!("  Commit: {}", build.commit_sha);
    println!("  Environment: {}", build.environment);
    println!("  Log Filter: {}", config.rust_log);
    println!("======================================================================");
    println!("CONFIGURATION CHECK PASSED");
    println!("======================================================================");

    Ok(())
}

/// Serve the HTTP API until a shutdown signal arrives.
async fn cmd_serve(config: Config) -> anyhow::Result<()> {
    if let Err(e) = config.validate() {
        error!("Invalid configuration: {}", e);
        return Err(e.into());
    }

    let reporter = StatusReporter::new(config.build_info(Utc::now()));

    // Initialize metrics
    let prometheus = PrometheusBuilder::new().install_recorder()?;
    metrics::init_metrics();

    let store = ItemStore::seeded();
    metrics::set_items_stored(store.len());

    let state = AppState::new(store, reporter).with_metrics(prometheus);

    // Start HTTP server
    let listener = TcpListener::bind(config.bind_addr())
        .await
        .map_err(ServiceError::from)?;
    let addr = listener.local_addr()?;

    info!("Backend API server running on {}", addr);
    info!("Version: {}", config.version);
    info!("Environment: {}", config.environment_name());

    axum::serve(listener, create_router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("HTTP server closed");
    Ok(())
}
