/// Academic progress tracking: stats snapshots and alert generation
mod alerts;
mod processor;
mod rules;
mod types;

pub use alerts::{generate_academic_alerts, generate_academic_alerts_from_value};
pub(crate) use alerts::decode_registrations;
pub use processor::{calculate_academic_stats, AcademicProgressProcessor};
pub use rules::*;
pub use types::*;
