//! # Triage Classifier
//!
//! Deterministic priority classification for clinical intake.
//!
//! A [`PatientObservation`] (vital signs, consciousness, pain, symptoms, history) is scored
//! against a [`RuleTable`]; the total score and the number of critical findings are then reduced
//! to one of five [`Priority`] labels.
//!
//! This crate is pure: no I/O apart from optionally reading a YAML rule file, no shared mutable
//! state. Persistence, validation of input ranges and the HTTP surface live in `triage-core` and
//! `api-rest`.
//!
//! ```
//! use triage_classifier::{classify, PatientObservation, Priority};
//!
//! let observation: PatientObservation = serde_json::from_value(serde_json::json!({
//!     "name": "Jo Bloggs",
//!     "age": 35,
//!     "gender": "male",
//!     "heart_rate": 80,
//!     "respiratory_rate": 16,
//!     "temperature": 36.5,
//!     "systolic_pressure": 120,
//!     "diastolic_pressure": 80,
//!     "oxygen_saturation": 98,
//!     "consciousness": "alert",
//!     "chief_complaint": "Sprained ankle",
//!     "symptom_onset": "over-3d"
//! }))
//! .unwrap();
//!
//! let result = classify(&observation);
//! assert_eq!(result.priority, Priority::NonUrgent);
//! ```

pub mod observation;
pub mod priority;
pub mod rules;
pub mod scorer;

pub use observation::{
    humanize_code, ConsciousnessLevel, Disease, Gender, OnsetDuration, Orientation,
    PatientObservation, Pregnancy, Symptom,
};
pub use priority::{CriticalPolicy, Priority, PriorityThresholds};
pub use rules::{RuleTable, RulesError, RulesResult, Severity};
pub use scorer::{body_mass_index, classify, ClassificationResult, Classifier};
