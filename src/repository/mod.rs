//! Store access behind a trait so the service can run against fakes.

mod components;
pub use components::{ComponentRepository, PgComponentRepository};
