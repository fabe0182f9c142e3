//! HTTP client for the hosted backend (auth + REST tables).
//!
//! Every method makes a single request. Failures are surfaced as
//! [`PortalError`] so call sites can decide whether to fall back.

mod types;

pub use types::{LoginRequest, SignupRequest, UserProfile, UserRole};

use reqwest::header::{AUTHORIZATION, CONTENT_TYPE};
use reqwest::{Client, RequestBuilder, Response};
use serde_json::{json, Value};
use std::time::Duration;
use tracing::{debug, info};
use url::Url;

use crate::academic::{decode_registrations, CourseRegistration};
use crate::error::{PortalError, Result};
use types::{RemoteAuthResponse, RemoteUserMetadata};

const AUTH_TOKEN_PATH: &str = "auth/v1/token";
const AUTH_SIGNUP_PATH: &str = "auth/v1/signup";
const REGISTRATIONS_PATH: &str = "rest/v1/course_registrations";

/// Columns requested for the registrations listing, with the joined course.
const REGISTRATION_SELECT: &str =
    "id,course_id,student_id,status,courses(code,name_ar,name_en,credit_hours,level,prerequisites)";

/// Configuration for the remote client.
#[derive(Debug, Clone)]
pub struct RemoteConfig {
    /// Project base URL; `None` runs the portal in local-only mode
    pub base_url: Option<String>,
    /// Public API key sent with every request
    pub api_key: String,
    pub timeout: Duration,
}

impl Default for RemoteConfig {
    fn default() -> Self {
        Self {
            base_url: None,
            api_key: String::new(),
            timeout: Duration::from_secs(30),
        }
    }
}

pub struct RemoteClient {
    client: Client,
    base_url: Option<Url>,
    api_key: String,
}

impl RemoteClient {
    /// Creates a new client from configuration.
    pub fn new(config: RemoteConfig) -> Result<Self> {
        let client = Client::builder()
            .connect_timeout(Duration::from_secs(10))
            .timeout(config.timeout)
            .build()
            .map_err(|e| PortalError::Network {
                message: format!("Failed to build HTTP client: {}", e),
            })?;

        let base_url = config
            .base_url
            .as_deref()
            .map(|raw| {
                // keep a trailing slash so `join` appends instead of replacing
                if raw.ends_with('/') {
                    Url::parse(raw)
                } else {
                    Url::parse(&format!("{}/", raw))
                }
            })
            .transpose()?;

        Ok(Self {
            client,
            base_url,
            api_key: config.api_key,
        })
    }

    /// Returns true if a backend URL is configured.
    pub fn is_configured(&self) -> bool {
        self.base_url.is_some()
    }

    fn endpoint(&self, path: &str) -> Result<Url> {
        let base = self.base_url.as_ref().ok_or(PortalError::RemoteUnavailable)?;
        Ok(base.join(path)?)
    }

    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        request
            .header("apikey", &self.api_key)
            .header(AUTHORIZATION, format!("Bearer {}", self.api_key))
            .header(CONTENT_TYPE, "application/json")
    }

    /// Signs in with email and password.
    pub async fn sign_in(&self, email: &str, password: &str) -> Result<UserProfile> {
        let mut url = self.endpoint(AUTH_TOKEN_PATH)?;
        url.query_pairs_mut().append_pair("grant_type", "password");

        info!(url = %url, "Signing in against remote auth");

        let response = self
            .authorize(self.client.post(url))
            .json(&json!({ "email": email, "password": password }))
            .send()
            .await?;

        let auth: RemoteAuthResponse = check_status(response).await?.json().await?;
        Ok(auth.into_profile(email))
    }

    /// Creates a new account.
    pub async fn sign_up(&self, request: &SignupRequest) -> Result<UserProfile> {
        let url = self.endpoint(AUTH_SIGNUP_PATH)?;

        info!(url = %url, "Signing up against remote auth");

        let metadata = RemoteUserMetadata {
            full_name: Some(request.full_name.clone()),
            role: Some(request.role),
            level: request.level,
        };
        let response = self
            .authorize(self.client.post(url))
            .json(&json!({
                "email": request.email,
                "password": request.password,
                "data": metadata,
            }))
            .send()
            .await?;

        let auth: RemoteAuthResponse = check_status(response).await?.json().await?;
        Ok(auth.into_profile(&request.email))
    }

    /// Lists a student's registrations with embedded course summaries.
    pub async fn list_registrations(&self, student_id: &str) -> Result<Vec<CourseRegistration>> {
        let mut url = self.endpoint(REGISTRATIONS_PATH)?;
        url.query_pairs_mut()
            .append_pair("select", REGISTRATION_SELECT)
            .append_pair("student_id", &format!("eq.{}", student_id));

        debug!(url = %url, "Listing registrations");

        let response = self.authorize(self.client.get(url)).send().await?;
        let body: Value = check_status(response).await?.json().await?;

        let entries = body.as_array().ok_or_else(|| PortalError::Remote {
            status: 200,
            message: "registrations listing is not an array".to_string(),
        })?;

        let registrations = decode_registrations(entries);
        info!(
            student_id = %student_id,
            count = registrations.len(),
            "Fetched registrations from remote"
        );
        Ok(registrations)
    }
}

/// Turns a non-success response into [`PortalError::Remote`].
async fn check_status(response: Response) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let message = response.text().await.unwrap_or_default();
    Err(PortalError::Remote {
        status: status.as_u16(),
        message,
    })
}
