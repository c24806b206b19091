//! Shared application state for all routes. Built once at startup and handed to the router.

use crate::gateway::PersonGateway;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub gateway: Arc<dyn PersonGateway>,
}

impl AppState {
    pub fn new(gateway: Arc<dyn PersonGateway>) -> Self {
        AppState { gateway }
    }
}
