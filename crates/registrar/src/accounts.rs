//! Account and registration flows that prefer the remote backend and fall
//! back to the local store.

use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::academic::{AcademicAlert, AcademicStats, CourseRegistration, Language};
use crate::error::{PortalError, Result};
use crate::fallback::with_fallback;
use crate::local::LocalUser;
use crate::remote::{SignupRequest, UserProfile};
use crate::types::PortalState;

/// Registrations with their computed stats and alerts
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Dashboard {
    pub registrations: Vec<CourseRegistration>,
    pub stats: AcademicStats,
    pub alerts: Vec<AcademicAlert>,
}

/// Signs a user in. A successful remote sign-in refreshes the local copy;
/// a failed refresh is logged and does not affect the result.
pub async fn login(state: &PortalState, email: &str, password: &str) -> Result<UserProfile> {
    with_fallback(
        move || async move {
            let profile = state.remote.sign_in(email, password).await?;
            if let Err(e) = state
                .local
                .upsert_user(LocalUser::new(profile.clone(), password))
            {
                warn!(email = %profile.email, error = %e, "Failed to cache signed-in user");
            }
            Ok::<_, PortalError>(profile)
        },
        || {
            state
                .local
                .find_user(email)?
                .filter(|user| user.password_matches(password))
                .map(|user| user.profile)
                .ok_or(PortalError::InvalidCredentials)
        },
        "login",
    )
    .await
}

/// Creates an account. A successful remote signup is cached locally.
pub async fn signup(state: &PortalState, request: &SignupRequest) -> Result<UserProfile> {
    with_fallback(
        move || async move {
            let profile = state.remote.sign_up(request).await?;
            if let Err(e) = state
                .local
                .upsert_user(LocalUser::new(profile.clone(), &request.password))
            {
                warn!(email = %profile.email, error = %e, "Failed to cache new account");
            }
            Ok::<_, PortalError>(profile)
        },
        || {
            let profile = UserProfile {
                id: generate_local_id(),
                email: request.email.clone(),
                full_name: request.full_name.clone(),
                role: request.role,
                level: request.level,
            };
            state
                .local
                .insert_user_if_absent(LocalUser::new(profile.clone(), &request.password))?;
            info!(email = %profile.email, "Created local account");
            Ok(profile)
        },
        "signup",
    )
    .await
}

/// Lists a student's registrations. A successful remote listing replaces
/// the student's cached registrations.
pub async fn registrations(
    state: &PortalState,
    student_id: &str,
) -> Result<Vec<CourseRegistration>> {
    with_fallback(
        move || async move {
            let registrations = state.remote.list_registrations(student_id).await?;
            if let Err(e) = state.local.replace_registrations(student_id, &registrations) {
                warn!(student_id = %student_id, error = %e, "Failed to cache registrations");
            }
            Ok::<_, PortalError>(registrations)
        },
        || state.local.registrations_for(student_id),
        "registrations",
    )
    .await
}

/// Fetches registrations and derives the stats and alerts shown on a
/// student's dashboard.
pub async fn dashboard(
    state: &PortalState,
    student_id: &str,
    student_level: u8,
    earned_hours: u32,
    language: Language,
) -> Result<Dashboard> {
    let registrations = registrations(state, student_id).await?;
    let stats = state
        .processor
        .compute_stats(&registrations, student_level, earned_hours);
    let alerts = state
        .processor
        .generate_alerts(&registrations, student_level, earned_hours, language);

    Ok(Dashboard {
        registrations,
        stats,
        alerts,
    })
}

fn generate_local_id() -> String {
    let random: u64 = rand::thread_rng().gen();
    format!("local-{:016x}", random)
}
