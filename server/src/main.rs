// server/src/main.rs

use actix_web::{web as actix_data, App, HttpServer}; // Renamed web to actix_data
use anyhow::Context;
use std::sync::Arc;
use tracing_subscriber::fmt::format::FmtSpan; // For span events in tracing
use tracing_subscriber::EnvFilter;

use storefront::seed_demo_catalog;
use storefront_server::config::{AppConfig, LogFormat};
use storefront_server::state::AppState;
use storefront_server::storage::Storage;
use storefront_server::web::configure_app_routes;

fn init_tracing(format: LogFormat) {
  let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
  let builder = tracing_subscriber::fmt()
    .with_env_filter(filter) // Allow RUST_LOG override
    .with_span_events(FmtSpan::CLOSE); // Log when spans close, showing duration

  match format {
    LogFormat::Json => builder.json().init(),
    LogFormat::Text => builder.init(),
  }
}

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
  let app_config = Arc::new(AppConfig::from_env().context("failed to load application configuration")?);
  init_tracing(app_config.log_format);

  tracing::info!("Starting storefront server...");
  tracing::debug!(config = ?app_config, "Loaded configuration");

  let storage = Storage::open(&app_config)
    .await
    .with_context(|| format!("failed to open database at {}", app_config.database_url))?;
  let repo = storage.repository();

  if app_config.seed_db {
    let created = seed_demo_catalog(repo.clone())
      .await
      .context("failed to seed the demo catalog")?;
    tracing::info!(created, "Database seeding finished.");
  }

  let app_state = AppState::new(repo, app_config.clone());

  let server_address = app_config.bind_address();
  tracing::info!("Attempting to bind server to {}...", server_address);

  let server_result = HttpServer::new(move || {
    App::new()
      .app_data(actix_data::Data::new(app_state.clone())) // Share AppState with handlers
      .wrap(tracing_actix_web::TracingLogger::default()) // Actix middleware for tracing requests
      .configure(configure_app_routes)
  })
  .bind(&server_address)
  .with_context(|| format!("failed to bind {}", server_address))?
  .run()
  .await;

  storage.close().await;
  tracing::info!("Storefront server stopped.");
  server_result.context("HTTP server terminated with an error")
}
