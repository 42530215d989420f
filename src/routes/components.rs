//! Component read routes. Registered with `any` so non-GET methods reach the handler's method gate
//! and get the enveloped 405. The static `item` segment takes precedence over `:category`.

use crate::handlers::components::{get_by_id, list_all, list_by_category, list_by_category_and_brand};
use crate::state::AppState;
use axum::{routing::any, Router};

pub fn component_routes(state: AppState) -> Router {
    Router::new()
        .route("/components", any(list_all))
        .route("/components/item/:id", any(get_by_id))
        .route("/components/:category", any(list_by_category))
        .route("/components/:category/:brand", any(list_by_category_and_brand))
        .with_state(state)
}
