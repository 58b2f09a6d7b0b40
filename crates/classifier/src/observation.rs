//! Patient observation model.
//!
//! A [`PatientObservation`] is the structured intake form: demographics, vital signs,
//! consciousness, pain, symptoms and history. Every coded field is a closed enum whose wire form
//! is a short kebab-case code (for example `shortness-of-breath`).
//!
//! Range checks on the numeric vitals happen at the storage/API boundary, not here; the
//! classifier only branches on clinical thresholds.

use serde::{Deserialize, Serialize};
use triage_types::NonEmptyText;

/// Replaces every hyphen in a code with a space (`shortness-of-breath` -> `shortness of breath`).
pub fn humanize_code(code: &str) -> String {
    code.replace('-', " ")
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "kebab-case")]
pub enum Gender {
    Male,
    Female,
    Other,
}

impl Gender {
    pub fn code(self) -> &'static str {
        match self {
            Gender::Male => "male",
            Gender::Female => "female",
            Gender::Other => "other",
        }
    }
}

/// AVPU-style level of consciousness.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "kebab-case")]
pub enum ConsciousnessLevel {
    Alert,
    VerbalResponse,
    PainResponse,
    Unconscious,
}

/// Orientation; only meaningful when the patient is alert.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "kebab-case")]
pub enum Orientation {
    Oriented,
    Disoriented,
    NotApplicable,
}

/// How long ago the symptoms started.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub enum OnsetDuration {
    #[serde(rename = "under-1h")]
    UnderOneHour,
    #[serde(rename = "1-6h")]
    OneToSixHours,
    #[serde(rename = "6-24h")]
    SixToTwentyFourHours,
    #[serde(rename = "1-3d")]
    OneToThreeDays,
    #[serde(rename = "over-3d")]
    OverThreeDays,
}

impl OnsetDuration {
    pub fn code(self) -> &'static str {
        match self {
            OnsetDuration::UnderOneHour => "under-1h",
            OnsetDuration::OneToSixHours => "1-6h",
            OnsetDuration::SixToTwentyFourHours => "6-24h",
            OnsetDuration::OneToThreeDays => "1-3d",
            OnsetDuration::OverThreeDays => "over-3d",
        }
    }
}

/// Associated symptom reported at intake.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "kebab-case")]
pub enum Symptom {
    Seizure,
    Bleeding,
    ShortnessOfBreath,
    Palpitation,
    Sweating,
    Nausea,
    Vomiting,
    Fever,
    Dizziness,
    Headache,
    Cough,
    Diarrhea,
    Fainting,
    ChestPain,
}

impl Symptom {
    pub fn code(self) -> &'static str {
        match self {
            Symptom::Seizure => "seizure",
            Symptom::Bleeding => "bleeding",
            Symptom::ShortnessOfBreath => "shortness-of-breath",
            Symptom::Palpitation => "palpitation",
            Symptom::Sweating => "sweating",
            Symptom::Nausea => "nausea",
            Symptom::Vomiting => "vomiting",
            Symptom::Fever => "fever",
            Symptom::Dizziness => "dizziness",
            Symptom::Headache => "headache",
            Symptom::Cough => "cough",
            Symptom::Diarrhea => "diarrhea",
            Symptom::Fainting => "fainting",
            Symptom::ChestPain => "chest-pain",
        }
    }
}

/// Pre-existing condition. `None` is an explicit "no known disease" answer and never scores.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "kebab-case")]
pub enum Disease {
    Cardiac,
    Diabetes,
    Renal,
    Respiratory,
    Hypertension,
    Epilepsy,
    Cancer,
    None,
}

impl Disease {
    pub fn code(self) -> &'static str {
        match self {
            Disease::Cardiac => "cardiac",
            Disease::Diabetes => "diabetes",
            Disease::Renal => "renal",
            Disease::Respiratory => "respiratory",
            Disease::Hypertension => "hypertension",
            Disease::Epilepsy => "epilepsy",
            Disease::Cancer => "cancer",
            Disease::None => "none",
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "kebab-case")]
pub enum Pregnancy {
    Yes,
    No,
    #[default]
    NotApplicable,
}

/// Structured intake record handed to the classifier.
///
/// `name`, `allergies` and `notes` are carried for display and are never scored.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct PatientObservation {
    #[cfg_attr(feature = "openapi", schema(value_type = String))]
    pub name: NonEmptyText,
    /// Age in whole years.
    pub age: u32,
    pub gender: Gender,
    #[serde(default)]
    pub weight_kg: Option<f64>,
    #[serde(default)]
    pub height_cm: Option<f64>,

    /// Beats per minute.
    pub heart_rate: u32,
    /// Breaths per minute.
    pub respiratory_rate: u32,
    /// Degrees Celsius.
    pub temperature: f64,
    /// mmHg.
    pub systolic_pressure: u32,
    /// mmHg.
    pub diastolic_pressure: u32,
    /// Percent.
    pub oxygen_saturation: u32,

    pub consciousness: ConsciousnessLevel,
    #[serde(default)]
    pub orientation: Option<Orientation>,

    /// 0 (none) to 10 (worst imaginable).
    #[serde(default)]
    pub pain_intensity: u8,
    #[serde(default)]
    pub pain_location: Option<String>,
    #[serde(default)]
    pub pain_character: Option<String>,

    #[cfg_attr(feature = "openapi", schema(value_type = String))]
    pub chief_complaint: NonEmptyText,
    pub symptom_onset: OnsetDuration,
    #[serde(default)]
    pub symptoms: Vec<Symptom>,
    #[serde(default)]
    pub diseases: Vec<Disease>,

    /// Free text; scanned for known drug classes.
    #[serde(default)]
    pub medications: Option<String>,
    #[serde(default)]
    pub allergies: Option<String>,
    #[serde(default)]
    pub pregnancy: Pregnancy,
    #[serde(default)]
    pub recent_surgery: bool,
    #[serde(default)]
    pub notes: Option<String>,
}

impl PatientObservation {
    /// Systolic minus diastolic pressure. Negative when the inputs are inconsistent.
    pub fn pulse_pressure(&self) -> i64 {
        i64::from(self.systolic_pressure) - i64::from(self.diastolic_pressure)
    }

    /// True when the patient is alert but disoriented.
    pub fn is_disoriented(&self) -> bool {
        self.consciousness == ConsciousnessLevel::Alert
            && self.orientation == Some(Orientation::Disoriented)
    }
}
