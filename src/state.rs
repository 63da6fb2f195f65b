//! Shared application state injected into all handlers.
//!
//! The cache is an explicit dependency threaded through state, never a
//! process-wide singleton; tests build the same shape with fakes.

use std::sync::Arc;

use crate::application::services::{PassengerService, UserService};
use crate::infrastructure::cache::ResourceCache;

#[derive(Clone)]
pub struct AppState {
    pub user_service: Arc<UserService>,
    pub passenger_service: Arc<PassengerService>,
    pub cache: Arc<ResourceCache>,
}

impl AppState {
    pub fn new(
        user_service: Arc<UserService>,
        passenger_service: Arc<PassengerService>,
        cache: Arc<ResourceCache>,
    ) -> Self {
        Self {
            user_service,
            passenger_service,
            cache,
        }
    }
}
