//! Parts catalog: read-only REST API over a PostgreSQL catalog of PC-building components.

pub mod cache;
pub mod config;
pub mod error;
pub mod handlers;
pub mod model;
pub mod repository;
pub mod response;
pub mod routes;
pub mod service;
pub mod sql;
pub mod state;
pub mod store;

pub use cache::{CacheStore, RedisCache};
pub use config::AppConfig;
pub use error::{AppError, ConfigError};
pub use model::{Category, Component};
pub use repository::{ComponentRepository, PgComponentRepository};
pub use response::{success_many, success_one, Envelope};
pub use routes::app;
pub use service::ComponentService;
pub use state::AppState;
