//! ComponentService: what handlers call.

mod components;
pub use components::{CacheStatus, ComponentService, Readiness};
