/// Types for course registrations, progress snapshots and alerts
use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Approval state of a registration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RegistrationStatus {
    Pending,
    Approved,
    Rejected,
}

/// Read-only course data embedded in a registration record.
///
/// Nullable columns decode to their defaults.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CourseSummary {
    #[serde(default, deserialize_with = "null_as_default")]
    pub code: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub name_ar: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub name_en: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub credit_hours: u32,
    #[serde(default)]
    pub level: Option<u8>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub prerequisites: Vec<String>,
}

/// A student's request to enroll in a course.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CourseRegistration {
    pub id: String,
    pub course_id: String,
    #[serde(default)]
    pub student_id: Option<String>,
    pub status: RegistrationStatus,
    /// The hosted backend returns the joined table under `courses`
    #[serde(default, alias = "courses", deserialize_with = "lenient_course")]
    pub course: Option<CourseSummary>,
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// A course summary that can't be decoded is treated as missing, so the
/// registration still counts toward its status.
fn lenient_course<'de, D>(deserializer: D) -> Result<Option<CourseSummary>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<Value>::deserialize(deserializer)?;
    Ok(raw.and_then(|value| serde_json::from_value(value).ok()))
}

impl CourseRegistration {
    /// Credit hours contributed by this registration; 0 when the course
    /// summary is missing.
    pub fn credit_hours(&self) -> u32 {
        self.course.as_ref().map_or(0, |c| c.credit_hours)
    }
}

/// Computed progress snapshot. Never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AcademicStats {
    pub total_approved_courses: usize,
    pub total_pending_courses: usize,
    pub total_rejected_courses: usize,
    pub total_credit_hours: u32,
    pub pending_credit_hours: u32,
    pub level_required_hours: u32,
    pub remaining_credit_hours: u32,
    pub progress_percentage: u32,
    pub total_earned_hours: u32,
}

/// Display language selector.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    Ar,
    En,
}

/// Severity tag carried by an alert.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AlertSeverity {
    Error,
    Warning,
    Success,
    Info,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BilingualText {
    pub ar: String,
    pub en: String,
}

impl BilingualText {
    pub fn new(ar: impl Into<String>, en: impl Into<String>) -> Self {
        Self {
            ar: ar.into(),
            en: en.into(),
        }
    }

    /// Picks the text for the given language.
    pub fn in_language(&self, language: Language) -> &str {
        match language {
            Language::Ar => &self.ar,
            Language::En => &self.en,
        }
    }
}

/// A generated notification describing one noteworthy condition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AcademicAlert {
    pub id: String,
    #[serde(rename = "type")]
    pub severity: AlertSeverity,
    pub title: BilingualText,
    pub message: BilingualText,
    pub timestamp: DateTime<Utc>,
}
