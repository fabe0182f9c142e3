use std::sync::Arc;

use axum::routing::{get, post};
use axum::Router;

use crate::server::endpoints::{academic, auth, status, students};
use crate::types::PortalState;

mod endpoints;
mod types;

pub use types::ApiErrorType;

/// Creates a router that can be used by `axum`.
///
/// # Parameters
/// - `app_state`: The portal state.
///
/// # Returns
/// The router.
pub fn create_router(app_state: Arc<PortalState>) -> Router {
    let auth_router = Router::new()
        .route("/auth/login", post(auth::post_login))
        .route("/auth/signup", post(auth::post_signup));

    let student_router = Router::new()
        .route(
            "/students/:student_id/registrations",
            get(students::get_registrations),
        )
        .route(
            "/students/:student_id/dashboard",
            get(students::get_dashboard),
        );

    // Pure calculations, no remote or local access
    let academic_router = Router::new()
        .route("/academic/stats", post(academic::post_stats))
        .route("/academic/alerts", post(academic::post_alerts));

    Router::new()
        .route("/health", get(status::get_health))
        .merge(auth_router)
        .merge(student_router)
        .merge(academic_router)
        .with_state(app_state)
}
