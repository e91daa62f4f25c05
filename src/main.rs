//!
//! HTTP service for NYC congestion-pricing traffic analytics.
//! Reads configuration from TOML file (~/.config/crz-traffic/config.toml).

use std::path::Path;

use sea_orm_migration::MigratorTrait;
use tracing::{error, info, warn};

use crz_traffic::config::AppConfig;
use crz_traffic::infrastructure::database::migrator::Migrator;
use crz_traffic::infrastructure::ingest;
use crz_traffic::{create_api_router, default_config_path, init_database, AppState, DatabaseConfig};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // ── Load configuration ─────────────────────────────────────
    let config_path = std::env::var("CRZ_CONFIG")
        .map(std::path::PathBuf::from)
        .unwrap_or_else(|_| default_config_path());
    let app_cfg = match AppConfig::load(&config_path) {
        Ok(cfg) => {
            init_tracing(&cfg);
            info!("Configuration loaded from {}", config_path.display());
            cfg
        }
        Err(e) => {
            let cfg = AppConfig::default();
            init_tracing(&cfg);
            warn!("Failed to load config: {}. Using defaults.", e);
            cfg
        }
    };

    info!("Starting CRZ traffic analytics service...");

    // ── Database ───────────────────────────────────────────────
    // The ingest decision is an existence check on the SQLite file, made
    // before connecting (connecting with mode=rwc creates the file).
    let fresh_database = ingest::needs_initial_load(Path::new(&app_cfg.database.path));

    let db_config = DatabaseConfig {
        url: app_cfg.database.connection_url(),
    };
    let db = match init_database(&db_config).await {
        Ok(db) => db,
        Err(e) => {
            error!("Failed to connect to database: {}", e);
            return Err(e.into());
        }
    };

    info!("Running database migrations...");
    if let Err(e) = Migrator::up(&db, None).await {
        error!("Failed to run migrations: {}", e);
        return Err(e.into());
    }
    info!("Migrations completed");

    // ── One-time CSV ingest ────────────────────────────────────
    if fresh_database {
        info!("Database not found. Creating and loading data...");
        let rows = ingest::load_csv(&db, Path::new(&app_cfg.ingest.csv_path)).await?;
        info!("Loaded {} traffic rows", rows);
    } else {
        info!("Database exists. Skipping CSV import.");
    }

    // ── HTTP server ────────────────────────────────────────────
    let state = AppState::new(db.clone());
    let router = create_api_router(state);

    let addr = format!("{}:{}", app_cfg.server.host, app_cfg.server.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("REST API server listening on http://{}", addr);
    info!("Swagger UI available at http://{}/docs/", addr);

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    if let Err(e) = db.close().await {
        warn!("Error closing database connection: {}", e);
    }
    info!("Shutdown complete");
    Ok(())
}

/// Resolve on SIGINT or SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => info!("Received Ctrl+C, shutting down"),
        _ = terminate => info!("Received SIGTERM, shutting down"),
    }
}

/// Initialize tracing (logging) from the application config.
fn init_tracing(config: &AppConfig) {
    use tracing_subscriber::layer::SubscriberExt;
    use tracing_subscriber::util::SubscriberInitExt;

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&config.logging.level));

    match config.logging.format.to_lowercase().as_str() {
        "json" => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(tracing_subscriber::fmt::layer().json())
                .init();
        }
        _ => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(tracing_subscriber::fmt::layer())
                .init();
        }
    }
}
