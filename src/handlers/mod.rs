//! HTTP handlers for component reads and probes.

pub mod components;
pub mod health;
pub use components::*;
pub use health::*;
