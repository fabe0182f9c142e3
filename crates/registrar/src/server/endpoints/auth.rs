//! Login and signup endpoints.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use std::sync::Arc;
use tracing::{info, warn};

use crate::accounts;
use crate::remote::{LoginRequest, SignupRequest};
use crate::server::types::ApiErrorType;
use crate::types::PortalState;

/// POST /auth/login
pub async fn post_login(
    State(s): State<Arc<PortalState>>,
    Json(body): Json<LoginRequest>,
) -> Response {
    info!("POST /auth/login ({})", body.email);

    match accounts::login(&s, &body.email, &body.password).await {
        Ok(profile) => (StatusCode::OK, Json(profile)).into_response(),
        Err(e) => {
            warn!("Login failed for {}: {}", body.email, e);
            ApiErrorType::from(e).into_response()
        }
    }
}

/// POST /auth/signup
pub async fn post_signup(
    State(s): State<Arc<PortalState>>,
    Json(body): Json<SignupRequest>,
) -> Response {
    info!("POST /auth/signup ({})", body.email);

    match accounts::signup(&s, &body).await {
        Ok(profile) => (StatusCode::CREATED, Json(profile)).into_response(),
        Err(e) => {
            warn!("Signup failed for {}: {}", body.email, e);
            ApiErrorType::from(e).into_response()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::academic::AcademicProgressProcessor;
    use crate::local::LocalStore;
    use crate::remote::{RemoteClient, RemoteConfig, UserRole};

    fn offline_state() -> Arc<PortalState> {
        Arc::new(PortalState {
            remote: RemoteClient::new(RemoteConfig::default()).unwrap(),
            local: LocalStore::in_memory().unwrap(),
            processor: AcademicProgressProcessor::default(),
        })
    }

    fn signup_body() -> SignupRequest {
        SignupRequest {
            email: "nour@uni.edu".to_string(),
            password: "pw".to_string(),
            full_name: "Nour".to_string(),
            role: UserRole::Student,
            level: Some(1),
        }
    }

    #[tokio::test]
    async fn test_signup_then_duplicate_conflicts() {
        let state = offline_state();

        let first = post_signup(State(state.clone()), Json(signup_body())).await;
        assert_eq!(first.status(), StatusCode::CREATED);

        let second = post_signup(State(state), Json(signup_body())).await;
        assert_eq!(second.status(), StatusCode::CONFLICT);
    }

    #[tokio::test]
    async fn test_login_bad_credentials_unauthorized() {
        let state = offline_state();

        let response = post_login(
            State(state),
            Json(LoginRequest {
                email: "nobody@uni.edu".to_string(),
                password: "pw".to_string(),
            }),
        )
        .await;
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }
}
