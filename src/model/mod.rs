//! Catalog data model.

mod category;
mod component;
mod request;

pub use category::Category;
pub use component::{Component, COMPONENTS_TABLE, COMPONENT_COLUMNS};
pub use request::{ComponentPathParams, RequestShape};
