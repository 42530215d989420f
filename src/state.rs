//! Shared application state for all routes. Built once at startup and passed explicitly.

use crate::service::ComponentService;

#[derive(Clone)]
pub struct AppState {
    pub components: ComponentService,
}

impl AppState {
    pub fn new(components: ComponentService) -> Self {
        Self { components }
    }
}
