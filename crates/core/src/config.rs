//! Core runtime configuration.
//!
//! Configuration is resolved once at process startup and passed into core services, so nothing
//! reads process-wide environment variables during request handling. The `*_from_env_value`
//! helpers take the raw (optional) environment values and apply defaults and parsing;
//! [`core_config_from_env`] combines them and is called once by each binary.

use crate::constants::{
    DEFAULT_HISTORY_RETENTION_DAYS, DEFAULT_STATS_WINDOW_DAYS, DEFAULT_TRIAGE_DATA_DIR,
    HISTORY_DIR_NAME, TRIAGE_DIR_NAME,
};
use crate::{TriageError, TriageResult};
use std::path::{Path, PathBuf};
use triage_classifier::{Classifier, CriticalPolicy, RuleTable};

/// Core configuration resolved at startup.
#[derive(Clone, Debug)]
pub struct CoreConfig {
    triage_data_dir: PathBuf,
    rules: RuleTable,
    history_retention_days: u32,
    stats_window_days: u32,
}

impl CoreConfig {
    /// Create a new `CoreConfig`.
    ///
    /// The data directory is not required to exist yet; services report
    /// [`TriageError::StorageUnavailable`] per call while it is missing.
    ///
    /// # Errors
    ///
    /// Returns an error if the rule table fails validation or either day count is zero.
    pub fn new(
        triage_data_dir: PathBuf,
        rules: RuleTable,
        history_retention_days: u32,
        stats_window_days: u32,
    ) -> TriageResult<Self> {
        rules.validate()?;

        if history_retention_days == 0 {
            return Err(TriageError::InvalidInput(
                "history retention must be at least one day".into(),
            ));
        }
        if stats_window_days == 0 {
            return Err(TriageError::InvalidInput(
                "statistics window must be at least one day".into(),
            ));
        }

        Ok(Self {
            triage_data_dir,
            rules,
            history_retention_days,
            stats_window_days,
        })
    }

    /// Configuration with the standard rules and default windows.
    pub fn with_defaults(triage_data_dir: PathBuf) -> TriageResult<Self> {
        Self::new(
            triage_data_dir,
            RuleTable::standard(),
            DEFAULT_HISTORY_RETENTION_DAYS,
            DEFAULT_STATS_WINDOW_DAYS,
        )
    }

    pub fn triage_data_dir(&self) -> &Path {
        &self.triage_data_dir
    }

    pub fn triages_dir(&self) -> PathBuf {
        self.triage_data_dir.join(TRIAGE_DIR_NAME)
    }

    pub fn history_dir(&self) -> PathBuf {
        self.triage_data_dir.join(HISTORY_DIR_NAME)
    }

    pub fn rules(&self) -> &RuleTable {
        &self.rules
    }

    /// A classifier bound to the configured rule table.
    pub fn classifier(&self) -> Classifier {
        Classifier::new(self.rules.clone())
    }

    pub fn history_retention_days(&self) -> u32 {
        self.history_retention_days
    }

    pub fn stats_window_days(&self) -> u32 {
        self.stats_window_days
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Resolve the data directory, falling back to [`DEFAULT_TRIAGE_DATA_DIR`].
pub fn triage_data_dir_from_env_value(value: Option<String>) -> PathBuf {
    non_blank(value)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_TRIAGE_DATA_DIR))
}

/// Resolve the rule table from the preset name, an optional YAML file and an optional
/// critical-factor policy.
///
/// A rule file takes precedence over the preset. The policy, when given, overrides whatever
/// the preset or file specifies.
pub fn rule_table_from_env_values(
    ruleset: Option<String>,
    rules_file: Option<String>,
    critical_policy: Option<String>,
) -> TriageResult<RuleTable> {
    let table = match non_blank(rules_file) {
        Some(path) => RuleTable::from_yaml_file(Path::new(&path))?,
        None => match non_blank(ruleset).as_deref() {
            None | Some("standard") => RuleTable::standard(),
            Some("basic") => RuleTable::basic(),
            Some(other) => {
                return Err(TriageError::InvalidInput(format!(
                    "unknown ruleset '{}' (expected 'standard' or 'basic')",
                    other
                )))
            }
        },
    };

    match non_blank(critical_policy) {
        Some(policy) => {
            let policy = policy
                .parse::<CriticalPolicy>()
                .map_err(TriageError::InvalidInput)?;
            Ok(table.with_policy(policy))
        }
        None => Ok(table),
    }
}

/// Resolve the full configuration from the `TRIAGE_*` environment variables.
///
/// Read once at process startup by the binaries.
pub fn core_config_from_env() -> TriageResult<CoreConfig> {
    let var = |name: &str| std::env::var(name).ok();

    CoreConfig::new(
        triage_data_dir_from_env_value(var("TRIAGE_DATA_DIR")),
        rule_table_from_env_values(
            var("TRIAGE_RULESET"),
            var("TRIAGE_RULES_FILE"),
            var("TRIAGE_CRITICAL_POLICY"),
        )?,
        days_from_env_value(
            "TRIAGE_HISTORY_RETENTION_DAYS",
            var("TRIAGE_HISTORY_RETENTION_DAYS"),
            DEFAULT_HISTORY_RETENTION_DAYS,
        )?,
        days_from_env_value(
            "TRIAGE_STATS_WINDOW_DAYS",
            var("TRIAGE_STATS_WINDOW_DAYS"),
            DEFAULT_STATS_WINDOW_DAYS,
        )?,
    )
}

/// Parse a positive day count, falling back to `default` when unset.
pub fn days_from_env_value(name: &str, value: Option<String>, default: u32) -> TriageResult<u32> {
    match non_blank(value) {
        None => Ok(default),
        Some(v) => match v.parse::<u32>() {
            Ok(days) if days > 0 => Ok(days),
            _ => Err(TriageError::InvalidInput(format!(
                "{} must be a positive whole number of days, got '{}'",
                name, v
            ))),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;
    use triage_classifier::Priority;

    #[test]
    fn test_data_dir_defaults() {
        assert_eq!(
            triage_data_dir_from_env_value(None),
            PathBuf::from("triage_data")
        );
        assert_eq!(
            triage_data_dir_from_env_value(Some("  ".into())),
            PathBuf::from("triage_data")
        );
        assert_eq!(
            triage_data_dir_from_env_value(Some("/srv/triage".into())),
            PathBuf::from("/srv/triage")
        );
    }

    #[test]
    fn test_rule_table_presets_and_policy() {
        let standard = rule_table_from_env_values(None, None, None).unwrap();
        assert_eq!(standard, RuleTable::standard());

        let basic = rule_table_from_env_values(Some("basic".into()), None, None).unwrap();
        assert_eq!(basic, RuleTable::basic());

        let graduated =
            rule_table_from_env_values(None, None, Some("graduated".into())).unwrap();
        assert_eq!(graduated.thresholds.policy, CriticalPolicy::Graduated);
        assert_eq!(graduated.thresholds.resolve(0, 1), Priority::VeryUrgent);
    }

    #[test]
    fn test_rule_table_rejects_unknown_values() {
        assert!(matches!(
            rule_table_from_env_values(Some("extended".into()), None, None),
            Err(TriageError::InvalidInput(_))
        ));
        assert!(matches!(
            rule_table_from_env_values(None, None, Some("strict".into())),
            Err(TriageError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_rule_table_from_file_takes_precedence() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("rules.yaml");
        fs::write(&path, RuleTable::basic().to_yaml().unwrap()).unwrap();

        let table = rule_table_from_env_values(
            Some("standard".into()),
            Some(path.display().to_string()),
            None,
        )
        .unwrap();

        assert_eq!(table, RuleTable::basic());
    }

    #[test]
    fn test_rule_table_file_errors_surface() {
        let result =
            rule_table_from_env_values(None, Some("/nonexistent/rules.yaml".into()), None);
        assert!(matches!(result, Err(TriageError::Rules(_))));
    }

    #[test]
    fn test_days_from_env_value() {
        assert_eq!(days_from_env_value("X", None, 30).unwrap(), 30);
        assert_eq!(days_from_env_value("X", Some("7".into()), 30).unwrap(), 7);
        assert!(days_from_env_value("X", Some("0".into()), 30).is_err());
        assert!(days_from_env_value("X", Some("week".into()), 30).is_err());
    }

    #[test]
    fn test_core_config_paths() {
        let cfg = CoreConfig::with_defaults(PathBuf::from("/data")).unwrap();
        assert_eq!(cfg.triages_dir(), PathBuf::from("/data/triages"));
        assert_eq!(cfg.history_dir(), PathBuf::from("/data/history"));
        assert_eq!(cfg.history_retention_days(), 365);
        assert_eq!(cfg.stats_window_days(), 30);
    }

    #[test]
    fn test_core_config_rejects_zero_windows() {
        let result = CoreConfig::new(PathBuf::from("/data"), RuleTable::standard(), 0, 30);
        assert!(result.is_err());
    }
}
