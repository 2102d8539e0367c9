// API layer module (adapters for controllers)
// Follows Hexagonal Architecture - API is an adapter

pub mod errors;
pub mod handlers;
pub mod middleware;

use std::sync::Arc;

use crate::auth::service::AuthService;

/// Shared state handed to every handler
#[derive(Clone)]
pub struct AppState {
    pub auth: Arc<AuthService>,
}
