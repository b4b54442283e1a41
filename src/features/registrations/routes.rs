//! Registration routes

use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};

use crate::features::registrations::handlers;
use crate::features::registrations::services::RegistrationService;

/// Create routes for the registrations feature
///
/// Public: registration is an anonymous form submission.
pub fn routes(service: Arc<RegistrationService>) -> Router {
    Router::new()
        .route("/", get(handlers::root))
        .route("/api/register", post(handlers::register_student))
        .with_state(service)
}
