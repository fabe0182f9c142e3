//! Rule checks that turn a registration list into user-facing alerts.
//!
//! Every check is independent and runs in a fixed order. Both language
//! fields of each alert are always populated; the caller picks one when
//! rendering.

use chrono::{DateTime, Utc};
use serde_json::Value;
use tracing::{debug, warn};

use super::processor::AcademicProgressProcessor;
use super::types::*;

/// Progress percentage at which the milestone alert starts firing.
const PROGRESS_MILESTONE: u32 = 75;
/// Share of the program (in percent) that counts as near graduation.
const NEAR_GRADUATION_PERCENT: u64 = 90;

impl AcademicProgressProcessor {
    /// Generates alerts for a registration list
    ///
    /// # Arguments
    /// * `registrations` - Registrations for the current term
    /// * `student_level` - The student's level
    /// * `earned_hours` - Hours earned in prior terms
    /// * `language` - Requested display language; alerts still carry both
    pub fn generate_alerts(
        &self,
        registrations: &[CourseRegistration],
        student_level: u8,
        earned_hours: u32,
        language: Language,
    ) -> Vec<AcademicAlert> {
        let stats = self.compute_stats(registrations, student_level, earned_hours);
        let rules = self.rules();
        let now = Utc::now();
        let mut alerts = Vec::new();

        // Low hours
        if stats.total_credit_hours > 0
            && stats.total_credit_hours < rules.min_credit_hours
            && stats.total_pending_courses == 0
        {
            alerts.push(alert(
                "low-hours".to_string(),
                AlertSeverity::Warning,
                BilingualText::new("ساعات معتمدة منخفضة", "Low Credit Hours"),
                BilingualText::new(
                    format!(
                        "أنت مسجل في {} ساعة معتمدة، وهو أقل من الحد الأدنى {} ساعة.",
                        stats.total_credit_hours, rules.min_credit_hours
                    ),
                    format!(
                        "You are registered for {} credit hours, below the minimum of {}.",
                        stats.total_credit_hours, rules.min_credit_hours
                    ),
                ),
                now,
            ));
        }

        // Exceeded hours
        if stats.total_credit_hours > rules.max_credit_hours {
            alerts.push(alert(
                "exceeded-hours".to_string(),
                AlertSeverity::Error,
                BilingualText::new("تجاوز الحد الأقصى للساعات", "Credit Hour Limit Exceeded"),
                BilingualText::new(
                    format!(
                        "أنت مسجل في {} ساعة معتمدة، وهو أكثر من الحد الأقصى {} ساعة.",
                        stats.total_credit_hours, rules.max_credit_hours
                    ),
                    format!(
                        "You are registered for {} credit hours, above the maximum of {}.",
                        stats.total_credit_hours, rules.max_credit_hours
                    ),
                ),
                now,
            ));
        }

        // Rejected courses, one per registration
        for reg in registrations
            .iter()
            .filter(|r| r.status == RegistrationStatus::Rejected)
        {
            let (name_ar, name_en) = course_names(reg);
            alerts.push(alert(
                format!("rejected-{}", reg.course_id),
                AlertSeverity::Error,
                BilingualText::new("تم رفض المقرر", "Course Rejected"),
                BilingualText::new(
                    format!("تم رفض تسجيلك في مقرر {}.", name_ar),
                    format!("Your registration for {} was rejected.", name_en),
                ),
                now,
            ));
        }

        // Pending courses
        if stats.total_pending_courses > 0 {
            alerts.push(alert(
                "pending-courses".to_string(),
                AlertSeverity::Info,
                BilingualText::new("بانتظار الموافقة", "Pending Approval"),
                BilingualText::new(
                    format!(
                        "{} مقرر بإجمالي {} ساعة معتمدة بانتظار موافقة المشرف.",
                        stats.total_pending_courses, stats.pending_credit_hours
                    ),
                    format!(
                        "{} course(s) totaling {} credit hours are awaiting supervisor approval.",
                        stats.total_pending_courses, stats.pending_credit_hours
                    ),
                ),
                now,
            ));
        }

        // Progress milestone
        if (PROGRESS_MILESTONE..100).contains(&stats.progress_percentage) {
            alerts.push(alert(
                "progress-milestone".to_string(),
                AlertSeverity::Success,
                BilingualText::new("تقدم ممتاز", "Great Progress"),
                BilingualText::new(
                    format!(
                        "لقد أكملت {}% من الساعات المطلوبة لهذا المستوى.",
                        stats.progress_percentage
                    ),
                    format!(
                        "You have completed {}% of this level's required hours.",
                        stats.progress_percentage
                    ),
                ),
                now,
            ));
        }

        // Level complete
        if stats.total_credit_hours >= stats.level_required_hours {
            alerts.push(alert(
                "level-complete".to_string(),
                AlertSeverity::Success,
                BilingualText::new("اكتملت متطلبات المستوى", "Level Requirements Met"),
                BilingualText::new(
                    format!(
                        "ساعاتك المعتمدة تغطي {} ساعة المطلوبة للمستوى {}.",
                        stats.level_required_hours, student_level
                    ),
                    format!(
                        "Your approved hours cover the {} hours required for level {}.",
                        stats.level_required_hours, student_level
                    ),
                ),
                now,
            ));
        }

        // Near graduation; a zero-hour program has no meaningful share
        if rules.total_program_hours > 0
            && u64::from(stats.total_earned_hours) * 100
                >= u64::from(rules.total_program_hours) * NEAR_GRADUATION_PERCENT
        {
            alerts.push(alert(
                "near-graduation".to_string(),
                AlertSeverity::Success,
                BilingualText::new("اقتربت من التخرج", "Approaching Graduation"),
                BilingualText::new(
                    format!(
                        "لقد أنجزت {} من أصل {} ساعة في البرنامج.",
                        stats.total_earned_hours, rules.total_program_hours
                    ),
                    format!(
                        "You have earned {} of {} program hours.",
                        stats.total_earned_hours, rules.total_program_hours
                    ),
                ),
                now,
            ));
        }

        // No registrations
        if registrations.is_empty() {
            alerts.push(alert(
                "no-registrations".to_string(),
                AlertSeverity::Warning,
                BilingualText::new("لا توجد تسجيلات", "No Registrations"),
                BilingualText::new(
                    "لم تسجل في أي مقرر هذا الفصل.",
                    "You have not registered for any courses this term.",
                ),
                now,
            ));
        }

        debug!(
            language = ?language,
            registrations = registrations.len(),
            alerts = alerts.len(),
            "Generated academic alerts"
        );

        alerts
    }

    /// Generates alerts from an untyped JSON registration list.
    ///
    /// Returns no alerts when `registrations` is not an array. Array entries
    /// that don't decode as registrations are skipped.
    pub fn generate_alerts_from_value(
        &self,
        registrations: &Value,
        student_level: u8,
        earned_hours: u32,
        language: Language,
    ) -> Vec<AcademicAlert> {
        let Some(entries) = registrations.as_array() else {
            warn!("Registrations payload is not a list, returning no alerts");
            return Vec::new();
        };

        let parsed = decode_registrations(entries);
        self.generate_alerts(&parsed, student_level, earned_hours, language)
    }
}

/// Decodes registration entries, dropping any that are malformed.
pub(crate) fn decode_registrations(entries: &[Value]) -> Vec<CourseRegistration> {
    entries
        .iter()
        .filter_map(|entry| match serde_json::from_value(entry.clone()) {
            Ok(reg) => Some(reg),
            Err(e) => {
                warn!(error = %e, "Skipping malformed registration entry");
                None
            }
        })
        .collect()
}

fn alert(
    id: String,
    severity: AlertSeverity,
    title: BilingualText,
    message: BilingualText,
    timestamp: DateTime<Utc>,
) -> AcademicAlert {
    AcademicAlert {
        id,
        severity,
        title,
        message,
        timestamp,
    }
}

/// Best display names for a registration's course, falling back to the
/// course code and then the course id.
fn course_names(reg: &CourseRegistration) -> (String, String) {
    let fallback = reg
        .course
        .as_ref()
        .map(|c| c.code.clone())
        .filter(|code| !code.is_empty())
        .unwrap_or_else(|| reg.course_id.clone());

    let pick = |name: Option<&String>| {
        name.filter(|n| !n.is_empty())
            .cloned()
            .unwrap_or_else(|| fallback.clone())
    };

    let course = reg.course.as_ref();
    (
        pick(course.map(|c| &c.name_ar)),
        pick(course.map(|c| &c.name_en)),
    )
}

/// Generates alerts using the built-in rule table.
pub fn generate_academic_alerts(
    registrations: &[CourseRegistration],
    student_level: u8,
    earned_hours: u32,
    language: Language,
) -> Vec<AcademicAlert> {
    AcademicProgressProcessor::default().generate_alerts(
        registrations,
        student_level,
        earned_hours,
        language,
    )
}

/// Generates alerts from untyped JSON using the built-in rule table.
pub fn generate_academic_alerts_from_value(
    registrations: &Value,
    student_level: u8,
    earned_hours: u32,
    language: Language,
) -> Vec<AcademicAlert> {
    AcademicProgressProcessor::default().generate_alerts_from_value(
        registrations,
        student_level,
        earned_hours,
        language,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::academic::AcademicRules;
    use serde_json::json;

    fn reg(course_id: &str, status: RegistrationStatus, hours: u32) -> CourseRegistration {
        CourseRegistration {
            id: format!("reg-{course_id}"),
            course_id: course_id.to_string(),
            student_id: None,
            status,
            course: Some(CourseSummary {
                code: course_id.to_uppercase(),
                name_ar: format!("مقرر {course_id}"),
                name_en: format!("Course {course_id}"),
                credit_hours: hours,
                ..Default::default()
            }),
        }
    }

    fn ids(alerts: &[AcademicAlert]) -> Vec<&str> {
        alerts.iter().map(|a| a.id.as_str()).collect()
    }

    #[test]
    fn test_empty_list_yields_no_registrations() {
        let alerts = generate_academic_alerts(&[], 1, 0, Language::Ar);

        assert_eq!(ids(&alerts), vec!["no-registrations"]);
        assert_eq!(alerts[0].severity, AlertSeverity::Warning);
        assert!(!alerts[0].title.ar.is_empty());
        assert!(!alerts[0].title.en.is_empty());
    }

    #[test]
    fn test_single_rejection_keyed_by_course() {
        let regs = vec![reg("cs201", RegistrationStatus::Rejected, 3)];
        let alerts = generate_academic_alerts(&regs, 2, 0, Language::En);

        let rejected: Vec<_> = alerts
            .iter()
            .filter(|a| a.id.starts_with("rejected-"))
            .collect();
        assert_eq!(rejected.len(), 1);
        assert_eq!(rejected[0].id, "rejected-cs201");
        assert_eq!(rejected[0].severity, AlertSeverity::Error);
        assert!(rejected[0].message.en.contains("Course cs201"));
    }

    #[test]
    fn test_low_hours_requires_no_pending() {
        let approved = vec![reg("a", RegistrationStatus::Approved, 6)];
        let alerts = generate_academic_alerts(&approved, 1, 0, Language::En);
        assert_eq!(ids(&alerts), vec!["low-hours"]);

        let with_pending = vec![
            reg("a", RegistrationStatus::Approved, 6),
            reg("b", RegistrationStatus::Pending, 3),
        ];
        let alerts = generate_academic_alerts(&with_pending, 1, 0, Language::En);
        assert_eq!(ids(&alerts), vec!["pending-courses"]);
        assert!(alerts[0].message.en.contains("1 course(s) totaling 3"));
    }

    #[test]
    fn test_exceeded_hours_and_level_complete() {
        let regs = vec![
            reg("a", RegistrationStatus::Approved, 12),
            reg("b", RegistrationStatus::Approved, 10),
        ];
        let alerts = generate_academic_alerts(&regs, 1, 0, Language::En);

        assert_eq!(ids(&alerts), vec!["exceeded-hours", "level-complete"]);
    }

    #[test]
    fn test_progress_milestone_coexists_with_pending() {
        // 12 / 15 = 80%
        let regs = vec![
            reg("a", RegistrationStatus::Approved, 12),
            reg("b", RegistrationStatus::Pending, 3),
        ];
        let alerts = generate_academic_alerts(&regs, 1, 0, Language::Ar);

        assert_eq!(ids(&alerts), vec!["pending-courses", "progress-milestone"]);
    }

    #[test]
    fn test_near_graduation_uses_cumulative_hours() {
        let regs = vec![reg("a", RegistrationStatus::Approved, 3)];

        // 116 + 3 = 119 / 132 = 90.2%
        let alerts = generate_academic_alerts(&regs, 8, 116, Language::En);
        assert!(ids(&alerts).contains(&"near-graduation"));

        // 115 + 3 = 118 / 132 = 89.4%
        let alerts = generate_academic_alerts(&regs, 8, 115, Language::En);
        assert!(!ids(&alerts).contains(&"near-graduation"));
    }

    #[test]
    fn test_language_does_not_filter_fields() {
        let ar = generate_academic_alerts(&[], 1, 0, Language::Ar);
        let en = generate_academic_alerts(&[], 1, 0, Language::En);

        assert_eq!(ar[0].title, en[0].title);
        assert_eq!(ar[0].message, en[0].message);
        assert_eq!(en[0].title.in_language(Language::En), "No Registrations");
    }

    #[test]
    fn test_non_list_payload_yields_nothing() {
        let payload = json!({ "id": "r1", "status": "approved" });
        assert!(generate_academic_alerts_from_value(&payload, 1, 0, Language::Ar).is_empty());
        assert!(generate_academic_alerts_from_value(&Value::Null, 1, 0, Language::Ar).is_empty());
    }

    #[test]
    fn test_value_payload_matches_typed_path() {
        let payload = json!([
            { "id": "r1", "course_id": "math101", "status": "rejected" },
            { "id": "r2", "course_id": "cs101", "status": "approved",
              "courses": { "code": "CS101", "credit_hours": 3 } },
            "not a registration"
        ]);
        let alerts = generate_academic_alerts_from_value(&payload, 1, 0, Language::En);

        assert_eq!(ids(&alerts), vec!["low-hours", "rejected-math101"]);
        // no course summary: message falls back to the course id
        assert!(alerts[1].message.en.contains("math101"));
    }

    #[test]
    fn test_null_course_columns_still_count() {
        let payload = json!([
            { "id": "r1", "course_id": "cs101", "status": "approved",
              "courses": { "credit_hours": 3, "name_ar": null, "prerequisites": null } }
        ]);
        let alerts = generate_academic_alerts_from_value(&payload, 1, 0, Language::En);

        assert_eq!(ids(&alerts), vec!["low-hours"]);
    }

    #[test]
    fn test_zero_hour_program_never_near_graduation() {
        let processor = AcademicProgressProcessor::new(AcademicRules {
            total_program_hours: 0,
            ..Default::default()
        });
        let regs = vec![reg("a", RegistrationStatus::Approved, 3)];

        let alerts = processor.generate_alerts(&regs, 1, 0, Language::En);
        assert!(!ids(&alerts).contains(&"near-graduation"));
    }
}
