//! PostgreSQL pool construction.

use crate::config::DatabaseConfig;
use crate::error::AppError;
use sqlx::postgres::{PgConnectOptions, PgPoolOptions, PgSslMode};
use sqlx::PgPool;
use std::str::FromStr;
use std::time::Duration;

const RETRY_BASE_DELAY: Duration = Duration::from_secs(1);
const RETRY_MAX_DELAY: Duration = Duration::from_secs(30);

pub fn connect_options(config: &DatabaseConfig) -> Result<PgConnectOptions, AppError> {
    let ssl_mode = PgSslMode::from_str(&config.ssl_mode).map_err(AppError::Db)?;
    Ok(PgConnectOptions::new()
        .host(&config.host)
        .port(config.port)
        .username(&config.user)
        .password(&config.password)
        .database(&config.name)
        .ssl_mode(ssl_mode))
}

/// Open the pool and verify it with a round trip, retrying with exponential backoff.
pub async fn connect(config: &DatabaseConfig) -> Result<PgPool, AppError> {
    let options = connect_options(config)?;
    let mut attempt = 0;
    loop {
        match try_connect(config, options.clone()).await {
            Ok(pool) => {
                tracing::info!(
                    host = %config.host,
                    database = %config.name,
                    max_connections = config.max_connections,
                    "connected to PostgreSQL"
                );
                return Ok(pool);
            }
            Err(e) => {
                attempt += 1;
                if attempt > config.connect_retries {
                    tracing::error!(attempts = attempt, error = %e, "giving up connecting to PostgreSQL");
                    return Err(e);
                }
                let delay = retry_delay(attempt);
                tracing::warn!(attempt, error = %e, ?delay, "PostgreSQL connection failed, retrying");
                tokio::time::sleep(delay).await;
            }
        }
    }
}

/// Doubling backoff from `RETRY_BASE_DELAY`, capped at `RETRY_MAX_DELAY`.
fn retry_delay(attempt: u32) -> Duration {
    let factor = 2_u32.saturating_pow(attempt.saturating_sub(1));
    RETRY_BASE_DELAY.saturating_mul(factor).min(RETRY_MAX_DELAY)
}

async fn try_connect(config: &DatabaseConfig, options: PgConnectOptions) -> Result<PgPool, AppError> {
    let pool = PgPoolOptions::new()
        .max_connections(config.max_connections)
        .min_connections(config.min_connections)
        .acquire_timeout(config.query_timeout)
        .connect_with(options)
        .await?;
    sqlx::query("SELECT 1").execute(&pool).await?;
    Ok(pool)
}

/// Readiness check: one trivial round trip.
pub async fn ping(pool: &PgPool) -> bool {
    sqlx::query("SELECT 1").fetch_optional(pool).await.is_ok()
}
