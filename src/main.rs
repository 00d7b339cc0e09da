use anyhow::Context;
use clap::Parser;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing_subscriber::EnvFilter;

use shopdesk::config;
use shopdesk::database::{DatabaseManager, Domains};
use shopdesk::handlers;
use shopdesk::services::Usecases;

#[derive(Debug, Parser)]
#[command(name = "shopdesk", about = "E-commerce admin API", version)]
struct Args {
    /// Port to listen on (overrides SHOPDESK_PORT / PORT)
    #[arg(long)]
    port: Option<u16>,

    /// Apply database migrations before serving
    #[arg(long)]
    migrate: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present so cargo run picks up DATABASE_URL, JWT_TOKEN_KEY, etc.
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let args = Args::parse();
    let config = config::config();
    config.validate().context("invalid configuration")?;
    tracing::info!("Starting shopdesk in {:?} mode", config.environment);

    let db = DatabaseManager::connect(&config.database)
        .await
        .context("failed to connect to database")?;
    if args.migrate {
        db.migrate().await.context("failed to apply migrations")?;
    }

    let domains = Domains::new(&db);
    let usecases = Usecases::new(&domains, &config.jwt);

    let app = handlers::router(&usecases, &config.api)
        .merge(handlers::health::routes(db.clone()))
        .layer(CorsLayer::permissive());
    let app = if config.api.enable_request_logging {
        app.layer(TraceLayer::new_for_http())
    } else {
        app
    };

    let port = args.port.unwrap_or(config.api.port);
    let bind_addr = format!("0.0.0.0:{}", port);
    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", bind_addr))?;

    tracing::info!("shopdesk listening on http://{}", bind_addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    db.close().await;
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("failed to listen for shutdown signal: {}", e);
    }
}
