//! Server binary: loads config from env (and `.env`), connects the store and cache, serves the API.

use parts_catalog::{app, AppConfig, AppState, ComponentService, PgComponentRepository, RedisCache};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    if dotenvy::dotenv().is_err() {
        eprintln!(".env file not found, using process environment");
    }
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("parts_catalog=info,tower_http=info")),
        )
        .init();

    let config = AppConfig::from_env()?;
    let pool = parts_catalog::store::connect(&config.database).await?;
    let repo = PgComponentRepository::new(pool.clone(), config.database.query_timeout);
    let mut service = ComponentService::new(Arc::new(repo));
    if config.cache.enabled {
        let cache = RedisCache::connect(&config.cache).await?;
        service = service
            .with_cache(Arc::new(cache), config.cache.ttl)
            .with_cache_timeout(config.cache.op_timeout);
        tracing::info!(ttl_secs = config.cache.ttl.as_secs(), "read-through cache enabled");
    } else {
        tracing::info!("cache disabled");
    }

    let router = app(AppState::new(service), &config.server);
    let addr = SocketAddr::from(([0, 0, 0, 0], config.server.port));
    let listener = TcpListener::bind(addr).await?;
    tracing::info!("listening on {}", listener.local_addr()?);
    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    pool.close().await;
    tracing::info!("shut down");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "failed to install Ctrl+C handler");
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
    tracing::info!("shutdown signal received");
}
