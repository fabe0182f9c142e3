/// Static credit-hour rules: level requirements and load limits
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use crate::error::{PortalError, Result};

/// Minimum credit hours a student should carry in a term.
pub const MIN_CREDIT_HOURS: u32 = 12;
/// Maximum credit hours a student may carry in a term.
pub const MAX_CREDIT_HOURS: u32 = 21;
/// Credit hours required to complete the whole program.
pub const TOTAL_PROGRAM_HOURS: u32 = 132;
/// Required hours used for levels missing from the table.
pub const DEFAULT_LEVEL_HOURS: u32 = 18;

/// Required credit hours per academic level.
pub const LEVEL_REQUIREMENTS: [(u8, u32); 8] = [
    (1, 15),
    (2, 15),
    (3, 18),
    (4, 18),
    (5, 18),
    (6, 18),
    (7, 15),
    (8, 12),
];

/// Rule set consulted by the stats calculator and alert generator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AcademicRules {
    #[serde(default = "default_level_requirements")]
    pub level_requirements: BTreeMap<u8, u32>,
    #[serde(default = "default_min_hours")]
    pub min_credit_hours: u32,
    #[serde(default = "default_max_hours")]
    pub max_credit_hours: u32,
    #[serde(default = "default_program_hours")]
    pub total_program_hours: u32,
}

fn default_level_requirements() -> BTreeMap<u8, u32> {
    LEVEL_REQUIREMENTS.into_iter().collect()
}

fn default_min_hours() -> u32 {
    MIN_CREDIT_HOURS
}

fn default_max_hours() -> u32 {
    MAX_CREDIT_HOURS
}

fn default_program_hours() -> u32 {
    TOTAL_PROGRAM_HOURS
}

impl AcademicRules {
    /// Loads a rule set from a JSON file. Fields absent from the file keep
    /// their built-in values.
    ///
    /// # Arguments
    /// * `path` - Path to the JSON rules file
    ///
    /// # Returns
    /// * `Ok(AcademicRules)` - The merged rule set
    /// * `Err` - If the file can't be read or parsed
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| PortalError::Config {
            message: format!("Failed to read rules file {}: {}", path.display(), e),
        })?;

        serde_json::from_str(&content).map_err(|e| PortalError::Config {
            message: format!("Failed to parse rules file {}: {}", path.display(), e),
        })
    }

    /// Required hours for a level, falling back to 18 for unknown levels.
    pub fn required_hours(&self, level: u8) -> u32 {
        self.level_requirements
            .get(&level)
            .copied()
            .unwrap_or(DEFAULT_LEVEL_HOURS)
    }
}

impl Default for AcademicRules {
    fn default() -> Self {
        Self {
            level_requirements: default_level_requirements(),
            min_credit_hours: MIN_CREDIT_HOURS,
            max_credit_hours: MAX_CREDIT_HOURS,
            total_program_hours: TOTAL_PROGRAM_HOURS,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_table_covers_all_levels() {
        let rules = AcademicRules::default();
        for level in 1..=8 {
            let hours = rules.required_hours(level);
            assert!((12..=18).contains(&hours), "level {level} -> {hours}");
        }
        assert_eq!(rules.required_hours(1), 15);
        assert_eq!(rules.required_hours(3), 18);
    }

    #[test]
    fn test_unknown_level_falls_back() {
        let rules = AcademicRules::default();
        assert_eq!(rules.required_hours(0), DEFAULT_LEVEL_HOURS);
        assert_eq!(rules.required_hours(9), DEFAULT_LEVEL_HOURS);
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let rules: AcademicRules =
            serde_json::from_str(r#"{ "level_requirements": { "1": 10 } }"#).unwrap();
        assert_eq!(rules.required_hours(1), 10);
        assert_eq!(rules.required_hours(2), DEFAULT_LEVEL_HOURS);
        assert_eq!(rules.max_credit_hours, MAX_CREDIT_HOURS);
    }

    #[test]
    fn test_load_missing_file_is_config_error() {
        let err = AcademicRules::load_from_file(Path::new("/nonexistent/rules.json")).unwrap_err();
        assert!(matches!(err, PortalError::Config { .. }));
    }
}
