use std::sync::Arc;

use anyhow::Context;
use guidance_engine::catalog::{Catalog, builtin_catalog};
use guidance_engine::config::GuidanceConfig;
use guidance_engine::error::Result;
use guidance_engine::guidance::{GuidanceFacade, GuidanceRouteState, guidance_routes};
use guidance_engine::store::{KeyValueStore, LibSqlStore};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_target(false)
        .init();

    eprintln!("Guidance engine v{}", env!("CARGO_PKG_VERSION"));

    let (config, facade) = start().await.context("failed to start guidance engine")?;
    let facade = Arc::new(facade);
    let app = guidance_routes(GuidanceRouteState {
        facade: Arc::clone(&facade),
    });

    let listener = tokio::net::TcpListener::bind(("0.0.0.0", config.http_port))
        .await
        .with_context(|| format!("failed to bind port {}", config.http_port))?;
    eprintln!("   API: http://0.0.0.0:{}/api/guidance/state", config.http_port);
    tracing::info!(port = config.http_port, "Guidance server started");

    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
        })
        .await
        .context("guidance server failed")?;

    // Drain queued writes before exit
    facade.flush().await;
    tracing::info!(failed_writes = facade.failed_writes(), "Guidance server stopped");
    Ok(())
}

/// Read the environment, load the catalog and open the profile's store.
async fn start() -> Result<(GuidanceConfig, GuidanceFacade)> {
    let config = GuidanceConfig::from_env()?;
    eprintln!("   Profile: {}", config.profile_id);
    eprintln!("   Database: {}", config.db_path.display());

    let catalog = match &config.catalog_path {
        Some(path) => Catalog::load(path)?,
        None => builtin_catalog()?,
    };
    eprintln!(
        "   Catalog: {} hints, {} tutorials",
        catalog.hints().len(),
        catalog.tutorials().len()
    );

    // Creates the parent directory if needed
    let store: Arc<dyn KeyValueStore> =
        Arc::new(LibSqlStore::new_local(&config.db_path, &config.profile_id).await?);

    let facade = GuidanceFacade::new(Arc::new(catalog), store, config.hint_settle_delay).await;
    Ok((config, facade))
}
