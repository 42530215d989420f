//! Catalog entry as read from the `components` table.

use crate::model::Category;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

pub const COMPONENTS_TABLE: &str = "components";

/// Column order used by every SELECT and by the row decoder.
pub const COMPONENT_COLUMNS: &[&str] = &["id", "category", "brand", "model", "sku", "upc", "specs", "created_at"];

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Component {
    pub id: i64,
    pub category: Category,
    pub brand: String,
    pub model: String,
    pub sku: Option<String>,
    pub upc: Option<String>,
    /// Opaque document, returned as stored.
    pub specs: Value,
    pub created_at: DateTime<Utc>,
}
