//! Priority labels and the threshold resolver.
//!
//! Each [`Priority`] carries its display metadata (target response window, recommendation
//! text, colour) so consumers such as the queue display need no lookup table of their own.

use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

/// Ordinal urgency band. Ordering follows severity: `NonUrgent < … < Emergency`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Priority {
    NonUrgent,
    SlightlyUrgent,
    Urgent,
    VeryUrgent,
    Emergency,
}

impl Priority {
    /// All priorities, most urgent first.
    pub const ALL: [Priority; 5] = [
        Priority::Emergency,
        Priority::VeryUrgent,
        Priority::Urgent,
        Priority::SlightlyUrgent,
        Priority::NonUrgent,
    ];

    /// Wire label, e.g. `VERY_URGENT`.
    pub fn as_str(self) -> &'static str {
        match self {
            Priority::Emergency => "EMERGENCY",
            Priority::VeryUrgent => "VERY_URGENT",
            Priority::Urgent => "URGENT",
            Priority::SlightlyUrgent => "SLIGHTLY_URGENT",
            Priority::NonUrgent => "NON_URGENT",
        }
    }

    /// Queue weight: 5 for emergency down to 1 for non-urgent.
    pub fn rank(self) -> u8 {
        match self {
            Priority::Emergency => 5,
            Priority::VeryUrgent => 4,
            Priority::Urgent => 3,
            Priority::SlightlyUrgent => 2,
            Priority::NonUrgent => 1,
        }
    }

    /// Maximum wait before the patient should be seen, in minutes. `0` means immediately.
    pub fn target_minutes(self) -> u32 {
        match self {
            Priority::Emergency => 0,
            Priority::VeryUrgent => 10,
            Priority::Urgent => 60,
            Priority::SlightlyUrgent => 120,
            Priority::NonUrgent => 240,
        }
    }

    pub fn target_window(self) -> &'static str {
        match self {
            Priority::Emergency => "Immediate care",
            Priority::VeryUrgent => "Within 10 minutes",
            Priority::Urgent => "Within 60 minutes",
            Priority::SlightlyUrgent => "Within 120 minutes",
            Priority::NonUrgent => "Within 240 minutes",
        }
    }

    pub fn recommendation(self) -> &'static str {
        match self {
            Priority::Emergency => {
                "CRITICAL: immediate medical attention required. Vital signs indicate imminent risk to life."
            }
            Priority::VeryUrgent => {
                "SEVERE: patient in serious condition. Prioritise specialist medical care immediately."
            }
            Priority::Urgent => {
                "MODERATE: medical assessment needed; patient may wait under continuous monitoring."
            }
            Priority::SlightlyUrgent => {
                "STABLE: patient relatively stable. May wait or be referred to other services."
            }
            Priority::NonUrgent => {
                "ROUTINE: vital signs within normal limits. Routine care without urgency."
            }
        }
    }

    pub fn colour(self) -> &'static str {
        match self {
            Priority::Emergency => "red",
            Priority::VeryUrgent => "orange",
            Priority::Urgent => "yellow",
            Priority::SlightlyUrgent => "green",
            Priority::NonUrgent => "blue",
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Priority {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Priority::ALL
            .into_iter()
            .find(|p| p.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("unknown priority: '{}'", s))
    }
}

/// How the number of critical factors escalates the priority.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CriticalPolicy {
    /// Any critical factor forces `EMERGENCY`.
    #[default]
    AnyCritical,
    /// Two or more critical factors force `EMERGENCY`; exactly one forces at least `VERY_URGENT`.
    Graduated,
}

impl FromStr for CriticalPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "any-critical" => Ok(CriticalPolicy::AnyCritical),
            "graduated" => Ok(CriticalPolicy::Graduated),
            other => Err(format!(
                "unknown critical policy '{}' (expected 'any-critical' or 'graduated')",
                other
            )),
        }
    }
}

/// Score cut-offs for each band, checked from the most urgent down.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriorityThresholds {
    pub emergency: u32,
    pub very_urgent: u32,
    pub urgent: u32,
    pub slightly_urgent: u32,
    #[serde(default)]
    pub policy: CriticalPolicy,
}

impl Default for PriorityThresholds {
    fn default() -> Self {
        Self {
            emergency: 120,
            very_urgent: 80,
            urgent: 50,
            slightly_urgent: 25,
            policy: CriticalPolicy::AnyCritical,
        }
    }
}

impl PriorityThresholds {
    /// Reduce a total score and critical-factor count to a priority. First match wins.
    pub fn resolve(&self, score: u32, critical_count: usize) -> Priority {
        let (forces_emergency, forces_very_urgent) = match self.policy {
            CriticalPolicy::AnyCritical => (critical_count > 0, false),
            CriticalPolicy::Graduated => (critical_count >= 2, critical_count == 1),
        };

        if score >= self.emergency || forces_emergency {
            Priority::Emergency
        } else if score >= self.very_urgent || forces_very_urgent {
            Priority::VeryUrgent
        } else if score >= self.urgent {
            Priority::Urgent
        } else if score >= self.slightly_urgent {
            Priority::SlightlyUrgent
        } else {
            Priority::NonUrgent
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_score_boundaries() {
        let thresholds = PriorityThresholds::default();

        assert_eq!(thresholds.resolve(0, 0), Priority::NonUrgent);
        assert_eq!(thresholds.resolve(24, 0), Priority::NonUrgent);
        assert_eq!(thresholds.resolve(25, 0), Priority::SlightlyUrgent);
        assert_eq!(thresholds.resolve(50, 0), Priority::Urgent);
        assert_eq!(thresholds.resolve(79, 0), Priority::Urgent);
        assert_eq!(thresholds.resolve(80, 0), Priority::VeryUrgent);
        assert_eq!(thresholds.resolve(120, 0), Priority::Emergency);
    }

    #[test]
    fn test_any_critical_forces_emergency() {
        let thresholds = PriorityThresholds::default();
        assert_eq!(thresholds.resolve(0, 1), Priority::Emergency);
    }

    #[test]
    fn test_graduated_policy() {
        let thresholds = PriorityThresholds {
            policy: CriticalPolicy::Graduated,
            ..PriorityThresholds::default()
        };

        assert_eq!(thresholds.resolve(30, 1), Priority::VeryUrgent);
        assert_eq!(thresholds.resolve(30, 2), Priority::Emergency);
        assert_eq!(thresholds.resolve(130, 0), Priority::Emergency);
        assert_eq!(thresholds.resolve(30, 0), Priority::SlightlyUrgent);
    }

    #[test]
    fn test_priority_metadata() {
        assert_eq!(Priority::Emergency.target_minutes(), 0);
        assert_eq!(Priority::VeryUrgent.target_minutes(), 10);
        assert_eq!(Priority::NonUrgent.target_minutes(), 240);
        assert!(Priority::Emergency > Priority::VeryUrgent);
        assert_eq!(Priority::SlightlyUrgent.rank(), 2);
    }

    #[test]
    fn test_priority_parse_and_wire_form() {
        assert_eq!("very_urgent".parse::<Priority>(), Ok(Priority::VeryUrgent));
        assert!("CRITICAL".parse::<Priority>().is_err());
        assert_eq!(
            serde_json::to_string(&Priority::SlightlyUrgent).unwrap(),
            "\"SLIGHTLY_URGENT\""
        );
    }

    #[test]
    fn test_policy_parse() {
        assert_eq!(
            "graduated".parse::<CriticalPolicy>(),
            Ok(CriticalPolicy::Graduated)
        );
        assert!("strict".parse::<CriticalPolicy>().is_err());
    }
}
