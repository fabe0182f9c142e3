/// Academic progress processing: registration lists to stats snapshots
use super::rules::AcademicRules;
use super::types::*;

/// Computes progress snapshots and alerts against a rule set
#[derive(Debug, Clone, Default)]
pub struct AcademicProgressProcessor {
    rules: AcademicRules,
}

impl AcademicProgressProcessor {
    /// Creates a new processor with the given rules
    pub fn new(rules: AcademicRules) -> Self {
        Self { rules }
    }

    /// Computes the stats snapshot for a registration list
    ///
    /// # Arguments
    /// * `registrations` - Registrations for the current term, may be empty
    /// * `student_level` - The student's level (1-8 in the default table)
    /// * `earned_hours` - Hours earned in prior terms
    pub fn compute_stats(
        &self,
        registrations: &[CourseRegistration],
        student_level: u8,
        earned_hours: u32,
    ) -> AcademicStats {
        let mut stats = AcademicStats {
            total_approved_courses: 0,
            total_pending_courses: 0,
            total_rejected_courses: 0,
            total_credit_hours: 0,
            pending_credit_hours: 0,
            level_required_hours: self.rules.required_hours(student_level),
            remaining_credit_hours: 0,
            progress_percentage: 0,
            total_earned_hours: 0,
        };

        for reg in registrations {
            match reg.status {
                RegistrationStatus::Approved => {
                    stats.total_approved_courses += 1;
                    stats.total_credit_hours =
                        stats.total_credit_hours.saturating_add(reg.credit_hours());
                }
                RegistrationStatus::Pending => {
                    stats.total_pending_courses += 1;
                    stats.pending_credit_hours =
                        stats.pending_credit_hours.saturating_add(reg.credit_hours());
                }
                RegistrationStatus::Rejected => {
                    stats.total_rejected_courses += 1;
                }
            }
        }

        stats.remaining_credit_hours = stats
            .level_required_hours
            .saturating_sub(stats.total_credit_hours);
        stats.progress_percentage =
            progress_percentage(stats.total_credit_hours, stats.level_required_hours);
        stats.total_earned_hours = earned_hours.saturating_add(stats.total_credit_hours);

        stats
    }

    /// Gets the rule set
    pub fn rules(&self) -> &AcademicRules {
        &self.rules
    }
}

/// Rounded percentage of `required` covered by `completed`, capped at 100.
///
/// A zero requirement counts as fully met.
fn progress_percentage(completed: u32, required: u32) -> u32 {
    if required == 0 {
        return 100;
    }

    // round-half-up of completed / required * 100, kept in integers
    let completed = u64::from(completed);
    let required = u64::from(required);
    let rounded = (200 * completed + required) / (2 * required);
    rounded.min(100) as u32
}

/// Computes the stats snapshot using the built-in rule table.
pub fn calculate_academic_stats(
    registrations: &[CourseRegistration],
    student_level: u8,
    earned_hours: u32,
) -> AcademicStats {
    AcademicProgressProcessor::default().compute_stats(registrations, student_level, earned_hours)
}
