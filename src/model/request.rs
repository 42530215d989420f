//! Per-request query shape derived from path parameters.

use std::fmt;

/// Raw path parameters; any of them may be empty.
#[derive(Clone, Debug, Default)]
pub struct ComponentPathParams {
    pub id: String,
    pub category: String,
    pub brand: String,
}

/// Exactly one filter combination per request.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RequestShape {
    ById { id: String },
    ByCategoryAndBrand { category: String, brand: String },
    ByCategory { category: String },
    All,
}

impl RequestShape {
    /// Most specific filter wins: id, then category+brand, then category, then all.
    pub fn resolve(params: ComponentPathParams) -> Self {
        let ComponentPathParams { id, category, brand } = params;
        if !id.is_empty() {
            RequestShape::ById { id }
        } else if !category.is_empty() && !brand.is_empty() {
            RequestShape::ByCategoryAndBrand { category, brand }
        } else if !category.is_empty() {
            RequestShape::ByCategory { category }
        } else {
            RequestShape::All
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            RequestShape::ById { .. } => "by_id",
            RequestShape::ByCategoryAndBrand { .. } => "by_category_and_brand",
            RequestShape::ByCategory { .. } => "by_category",
            RequestShape::All => "all",
        }
    }
}

impl fmt::Display for RequestShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RequestShape::ById { id } => write!(f, "id={}", id),
            RequestShape::ByCategoryAndBrand { category, brand } => {
                write!(f, "category={} brand={}", category, brand)
            }
            RequestShape::ByCategory { category } => write!(f, "category={}", category),
            RequestShape::All => f.write_str("all"),
        }
    }
}
