//! Shared helpers for tests that need a live backend.
//!
//! The stub answers the same paths as the hosted auth and REST service, so
//! `RemoteClient` runs its real request and decode path against it.
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::{json, Value};
use tokio::net::TcpListener;

use crate::academic::AcademicProgressProcessor;
use crate::local::LocalStore;
use crate::remote::{RemoteClient, RemoteConfig};
use crate::types::PortalState;

pub(crate) const STUB_USER_ID: &str = "remote-user-1";

async fn stub_token(Json(body): Json<Value>) -> Json<Value> {
    Json(json!({
        "access_token": "stub-token",
        "token_type": "bearer",
        "user": {
            "id": STUB_USER_ID,
            "email": body["email"],
            "user_metadata": { "full_name": "Remote Student", "role": "student", "level": 2 }
        }
    }))
}

async fn stub_signup(Json(body): Json<Value>) -> Json<Value> {
    // unconfirmed signup: bare user, no session
    Json(json!({
        "id": STUB_USER_ID,
        "email": body["email"],
        "user_metadata": body["data"]
    }))
}

async fn stub_registrations() -> Json<Value> {
    Json(json!([
        {
            "id": "r1",
            "course_id": "cs101",
            "student_id": "s1",
            "status": "approved",
            "courses": {
                "code": "CS101",
                "name_ar": null,
                "name_en": "Intro to Programming",
                "credit_hours": 3,
                "level": null,
                "prerequisites": null
            }
        },
        {
            "id": "r2",
            "course_id": "ma201",
            "student_id": "s1",
            "status": "pending",
            "courses": null
        }
    ]))
}

/// Starts the stub backend on an ephemeral port and returns its base URL
pub(crate) async fn spawn_stub_backend() -> String {
    let app = Router::new()
        .route("/auth/v1/token", post(stub_token))
        .route("/auth/v1/signup", post(stub_signup))
        .route("/rest/v1/course_registrations", get(stub_registrations));

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    format!("http://{addr}")
}

/// State whose remote client points at a freshly spawned stub backend
pub(crate) async fn online_state() -> PortalState {
    let base_url = spawn_stub_backend().await;
    PortalState {
        remote: RemoteClient::new(RemoteConfig {
            base_url: Some(base_url),
            api_key: "stub-anon-key".to_string(),
            ..Default::default()
        })
        .unwrap(),
        local: LocalStore::in_memory().unwrap(),
        processor: AcademicProgressProcessor::default(),
    }
}
