//! The rule table.
//!
//! Every threshold, point value and factor label the scorer uses lives in a [`RuleTable`]. Two
//! presets ship with the crate:
//!
//! - [`RuleTable::standard`]: the full protocol, including the finer-grained tiers, age-banded
//!   normal ranges and medication checks. This is the default.
//! - [`RuleTable::basic`]: the reduced protocol, with the finer tiers left out.
//!
//! A table can also be loaded from YAML ([`RuleTable::from_yaml_str`]) so that a deployment can
//! tune thresholds without a rebuild. Loaded tables are validated before use.
//!
//! Labels may contain placeholders that the scorer fills in:
//! `{value}` (the measured value, one decimal place), `{code}` (a humanized symptom or disease
//! code), and `{character}` / `{location}` for the pain-location rule.

use crate::observation::{Disease, Symptom};
use crate::priority::{CriticalPolicy, PriorityThresholds};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, thiserror::Error)]
pub enum RulesError {
    #[error("failed to read rule file {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("rule table schema mismatch at {path}: {message}")]
    Parse { path: String, message: String },
    #[error("failed to serialise rule table: {0}")]
    Serialize(serde_yaml::Error),
    #[error("invalid rule table: {0}")]
    Invalid(String),
}

pub type RulesResult<T> = std::result::Result<T, RulesError>;

/// Which list a factor is reported in.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Severity {
    #[default]
    Risk,
    Critical,
}

/// A fixed score contribution with its factor label.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Contribution {
    pub points: u32,
    #[serde(default)]
    pub severity: Severity,
    pub label: String,
}

impl Contribution {
    pub fn risk(points: u32, label: &str) -> Self {
        Self {
            points,
            severity: Severity::Risk,
            label: label.to_owned(),
        }
    }

    pub fn critical(points: u32, label: &str) -> Self {
        Self {
            points,
            severity: Severity::Critical,
            label: label.to_owned(),
        }
    }
}

/// One threshold band. Matches when the value is strictly below `below` or strictly above
/// `above`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Band {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub below: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub above: Option<f64>,
    pub points: u32,
    #[serde(default)]
    pub severity: Severity,
    pub label: String,
}

impl Band {
    fn outside(below: f64, above: f64, contribution: Contribution) -> Self {
        Self {
            below: Some(below),
            above: Some(above),
            points: contribution.points,
            severity: contribution.severity,
            label: contribution.label,
        }
    }

    fn below(below: f64, contribution: Contribution) -> Self {
        Self {
            below: Some(below),
            above: None,
            points: contribution.points,
            severity: contribution.severity,
            label: contribution.label,
        }
    }

    fn above(above: f64, contribution: Contribution) -> Self {
        Self {
            below: None,
            above: Some(above),
            points: contribution.points,
            severity: contribution.severity,
            label: contribution.label,
        }
    }

    pub fn matches(&self, value: f64) -> bool {
        self.below.is_some_and(|limit| value < limit)
            || self.above.is_some_and(|limit| value > limit)
    }
}

/// Ordered bands for one measurement; the first matching band is the only one that scores.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BandRule {
    pub bands: Vec<Band>,
}

impl BandRule {
    pub fn new(bands: Vec<Band>) -> Self {
        Self { bands }
    }

    pub fn evaluate(&self, value: f64) -> Option<&Band> {
        self.bands.iter().find(|band| band.matches(value))
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ConsciousnessRule {
    #[serde(default)]
    pub unconscious: Option<Contribution>,
    #[serde(default)]
    pub pain_response: Option<Contribution>,
    #[serde(default)]
    pub verbal_response: Option<Contribution>,
    #[serde(default)]
    pub alert_disoriented: Option<Contribution>,
}

/// Extra score for intense pain in a sensitive body region.
///
/// The label may use `{character}` (falls back to `default_character`) and `{location}`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PainLocationRule {
    pub min_intensity: u8,
    /// Matched case-insensitively as substrings of the free-text location.
    pub keywords: Vec<String>,
    pub points: u32,
    pub label: String,
    pub default_character: String,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct OnsetRule {
    /// Symptoms that turn an under-one-hour onset into a critical finding.
    pub trigger_symptoms: Vec<Symptom>,
    pub acute_with_trigger: Contribution,
    pub acute: Contribution,
    #[serde(default)]
    pub recent: Option<Contribution>,
}

/// A group of codes that share a score. `label` may contain `{code}`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CodeTier<C> {
    pub codes: Vec<C>,
    pub points: u32,
    #[serde(default)]
    pub severity: Severity,
    pub label: String,
}

/// Per-item scoring for a list of codes: each item scores once, in the first tier that lists
/// it, or with `fallback` when no tier does.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CodeRule<C> {
    pub tiers: Vec<CodeTier<C>>,
    #[serde(default)]
    pub fallback: Option<Contribution>,
}

impl<C> Default for CodeRule<C> {
    fn default() -> Self {
        Self {
            tiers: Vec::new(),
            fallback: None,
        }
    }
}

impl<C: PartialEq> CodeRule<C> {
    /// Returns the points, severity and label template that apply to `code`.
    pub fn lookup(&self, code: &C) -> Option<(u32, Severity, &str)> {
        self.tiers
            .iter()
            .find(|tier| tier.codes.contains(code))
            .map(|tier| (tier.points, tier.severity, tier.label.as_str()))
            .or_else(|| {
                self.fallback
                    .as_ref()
                    .map(|c| (c.points, c.severity, c.label.as_str()))
            })
    }
}

/// Inclusive normal range.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct NormalRange {
    pub min: f64,
    pub max: f64,
}

impl NormalRange {
    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    pub fn contains(&self, value: f64) -> bool {
        value >= self.min && value <= self.max
    }
}

/// Normal vitals for patients younger than `below_age` (or any age when `None`).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AgeGroup {
    pub name: String,
    #[serde(default)]
    pub below_age: Option<u32>,
    pub heart_rate: NormalRange,
    pub respiratory_rate: NormalRange,
    pub systolic_pressure: NormalRange,
    /// Overrides `systolic_pressure` for female patients.
    #[serde(default)]
    pub female_systolic_pressure: Option<NormalRange>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AgeRangeRule {
    /// Points per violation.
    pub points: u32,
    /// Youngest group first; the last group should have no upper age.
    pub groups: Vec<AgeGroup>,
    #[serde(default)]
    pub pulse_pressure: Option<NormalRange>,
}

impl AgeRangeRule {
    pub fn group_for(&self, age: u32) -> Option<&AgeGroup> {
        self.groups
            .iter()
            .find(|group| group.below_age.map_or(true, |limit| age < limit))
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MedicationClass {
    pub name: String,
    /// Matched case-insensitively as substrings of the medication text.
    pub keywords: Vec<String>,
    pub effects: Vec<String>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MedicationRule {
    /// Points per matched class.
    pub points: u32,
    pub classes: Vec<MedicationClass>,
}

/// Complete configuration of the scorer.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RuleTable {
    pub consciousness: ConsciousnessRule,
    pub oxygen_saturation: BandRule,
    pub respiratory_rate: BandRule,
    pub heart_rate: BandRule,
    pub systolic_pressure: BandRule,
    #[serde(default)]
    pub diastolic_pressure: BandRule,
    pub temperature: BandRule,
    pub pain_intensity: BandRule,
    #[serde(default)]
    pub pain_location: Option<PainLocationRule>,
    #[serde(default)]
    pub symptom_onset: Option<OnsetRule>,
    pub symptoms: CodeRule<Symptom>,
    #[serde(default)]
    pub diseases: CodeRule<Disease>,
    pub age: BandRule,
    #[serde(default)]
    pub pregnancy: Option<Contribution>,
    #[serde(default)]
    pub recent_surgery: Option<Contribution>,
    #[serde(default)]
    pub body_mass_index: BandRule,
    #[serde(default)]
    pub age_ranges: Option<AgeRangeRule>,
    #[serde(default)]
    pub medications: Option<MedicationRule>,
    #[serde(default)]
    pub thresholds: PriorityThresholds,
}

impl Default for RuleTable {
    fn default() -> Self {
        Self::standard()
    }
}

impl RuleTable {
    /// The full protocol.
    pub fn standard() -> Self {
        Self {
            consciousness: ConsciousnessRule {
                unconscious: Some(Contribution::critical(150, "Unconscious patient")),
                pain_response: Some(Contribution::critical(120, "Responds to pain only")),
                verbal_response: Some(Contribution::risk(80, "Responds to voice only")),
                alert_disoriented: Some(Contribution::risk(40, "Alert but disoriented")),
            },
            oxygen_saturation: BandRule::new(vec![
                Band::below(
                    85.0,
                    Contribution::critical(120, "Critically low oxygen saturation"),
                ),
                Band::below(90.0, Contribution::risk(90, "Low oxygen saturation")),
                Band::below(95.0, Contribution::risk(50, "Reduced oxygen saturation")),
            ]),
            respiratory_rate: BandRule::new(vec![
                Band::outside(
                    8.0,
                    35.0,
                    Contribution::critical(100, "Critical respiratory rate"),
                ),
                Band::outside(12.0, 28.0, Contribution::risk(60, "Abnormal respiratory rate")),
                Band::outside(
                    14.0,
                    24.0,
                    Contribution::risk(30, "Slightly abnormal respiratory rate"),
                ),
            ]),
            heart_rate: BandRule::new(vec![
                Band::outside(40.0, 150.0, Contribution::critical(90, "Critical heart rate")),
                Band::outside(50.0, 120.0, Contribution::risk(60, "Abnormal heart rate")),
                Band::outside(
                    60.0,
                    100.0,
                    Contribution::risk(30, "Slightly abnormal heart rate"),
                ),
            ]),
            systolic_pressure: BandRule::new(vec![
                Band::outside(
                    70.0,
                    220.0,
                    Contribution::critical(80, "Critical blood pressure"),
                ),
                Band::outside(
                    80.0,
                    200.0,
                    Contribution::risk(60, "Severely abnormal blood pressure"),
                ),
                Band::outside(90.0, 180.0, Contribution::risk(40, "Abnormal blood pressure")),
            ]),
            diastolic_pressure: BandRule::new(vec![
                Band::outside(
                    40.0,
                    130.0,
                    Contribution::critical(70, "Critical diastolic pressure"),
                ),
                Band::outside(
                    50.0,
                    110.0,
                    Contribution::risk(50, "Abnormal diastolic pressure"),
                ),
            ]),
            temperature: BandRule::new(vec![
                Band::outside(
                    34.5,
                    41.0,
                    Contribution::critical(80, "Critical body temperature"),
                ),
                Band::outside(35.0, 39.5, Contribution::risk(50, "High fever or hypothermia")),
                Band::outside(35.5, 38.5, Contribution::risk(25, "Moderate fever")),
            ]),
            pain_intensity: BandRule::new(vec![
                Band::above(8.0, Contribution::risk(70, "Unbearable severe pain")),
                Band::above(6.0, Contribution::risk(50, "Severe pain")),
                Band::above(4.0, Contribution::risk(30, "Moderate pain")),
                Band::above(2.0, Contribution::risk(15, "Mild pain")),
            ]),
            pain_location: Some(PainLocationRule {
                min_intensity: 5,
                keywords: ["chest", "thorax", "heart", "abdomen", "head", "skull"]
                    .into_iter()
                    .map(String::from)
                    .collect(),
                points: 40,
                label: "Pain ({character}) in {location}".into(),
                default_character: "intense".into(),
            }),
            symptom_onset: Some(OnsetRule {
                trigger_symptoms: vec![Symptom::Seizure, Symptom::Bleeding],
                acute_with_trigger: Contribution::critical(80, "Acute onset of critical symptoms"),
                acute: Contribution::risk(30, "Acute symptom onset"),
                recent: Some(Contribution::risk(20, "Recent symptom onset")),
            }),
            symptoms: CodeRule {
                tiers: vec![
                    CodeTier {
                        codes: vec![
                            Symptom::Seizure,
                            Symptom::Bleeding,
                            Symptom::ShortnessOfBreath,
                        ],
                        points: 60,
                        severity: Severity::Critical,
                        label: "Critical symptom: {code}".into(),
                    },
                    CodeTier {
                        codes: vec![Symptom::Palpitation, Symptom::Sweating, Symptom::Nausea],
                        points: 30,
                        severity: Severity::Risk,
                        label: "Serious symptom: {code}".into(),
                    },
                ],
                fallback: Some(Contribution::risk(10, "Symptom: {code}")),
            },
            diseases: CodeRule {
                tiers: vec![
                    CodeTier {
                        codes: vec![
                            Disease::Cardiac,
                            Disease::Diabetes,
                            Disease::Renal,
                            Disease::Respiratory,
                        ],
                        points: 25,
                        severity: Severity::Risk,
                        label: "Pre-existing disease: {code}".into(),
                    },
                    CodeTier {
                        codes: vec![Disease::Hypertension, Disease::Epilepsy],
                        points: 15,
                        severity: Severity::Risk,
                        label: "Pre-existing disease: {code}".into(),
                    },
                    CodeTier {
                        codes: vec![Disease::Cancer],
                        points: 35,
                        severity: Severity::Risk,
                        label: "History of cancer".into(),
                    },
                ],
                fallback: None,
            },
            age: BandRule::new(vec![
                Band::above(80.0, Contribution::risk(25, "Very advanced age")),
                Band::above(65.0, Contribution::risk(15, "Advanced age")),
                Band::below(1.0, Contribution::critical(30, "Newborn")),
                Band::below(5.0, Contribution::risk(20, "Critical paediatric age")),
                Band::below(12.0, Contribution::risk(10, "Paediatric patient")),
            ]),
            pregnancy: Some(Contribution::risk(20, "Pregnant")),
            recent_surgery: Some(Contribution::risk(30, "Recent surgery (last 30 days)")),
            body_mass_index: BandRule::new(vec![
                Band::outside(16.0, 40.0, Contribution::risk(20, "Critical BMI: {value}")),
                Band::outside(18.5, 35.0, Contribution::risk(10, "Abnormal BMI: {value}")),
            ]),
            age_ranges: Some(standard_age_ranges()),
            medications: Some(standard_medications()),
            thresholds: PriorityThresholds::default(),
        }
    }

    /// The reduced protocol: only the coarse tiers of each measurement, no diastolic, onset,
    /// disease, pregnancy, surgery, age-range or medication rules.
    pub fn basic() -> Self {
        let standard = Self::standard();
        let keep = |rule: &BandRule, count: usize| BandRule::new(rule.bands[..count].to_vec());
        let pick = |rule: &BandRule, indices: &[usize]| {
            BandRule::new(indices.iter().map(|&i| rule.bands[i].clone()).collect())
        };

        Self {
            oxygen_saturation: standard.oxygen_saturation.clone(),
            respiratory_rate: keep(&standard.respiratory_rate, 2),
            heart_rate: keep(&standard.heart_rate, 2),
            // critical band plus the >180 / <90 band
            systolic_pressure: pick(&standard.systolic_pressure, &[0, 2]),
            diastolic_pressure: BandRule::default(),
            temperature: keep(&standard.temperature, 2),
            pain_intensity: keep(&standard.pain_intensity, 3),
            pain_location: None,
            symptom_onset: None,
            symptoms: CodeRule {
                tiers: standard.symptoms.tiers[..1].to_vec(),
                fallback: standard.symptoms.fallback.clone(),
            },
            diseases: CodeRule::default(),
            // very advanced age and newborn only
            age: pick(&standard.age, &[0, 2]),
            pregnancy: None,
            recent_surgery: None,
            body_mass_index: keep(&standard.body_mass_index, 1),
            age_ranges: None,
            medications: None,
            consciousness: standard.consciousness,
            thresholds: standard.thresholds,
        }
    }

    /// Returns the table with its critical-factor policy replaced.
    pub fn with_policy(mut self, policy: CriticalPolicy) -> Self {
        self.thresholds.policy = policy;
        self
    }

    /// Parse and validate a rule table from YAML text.
    ///
    /// Uses `serde_path_to_error` so a schema mismatch names the failing field
    /// (e.g. `heart_rate[1].points`).
    ///
    /// # Errors
    ///
    /// Returns [`RulesError::Parse`] when the YAML does not match the schema, or
    /// [`RulesError::Invalid`] when it parses but fails [`RuleTable::validate`].
    pub fn from_yaml_str(yaml_text: &str) -> RulesResult<Self> {
        let deserializer = serde_yaml::Deserializer::from_str(yaml_text);
        let table: RuleTable = match serde_path_to_error::deserialize(deserializer) {
            Ok(parsed) => parsed,
            Err(err) => {
                let path = err.path().to_string();
                let path = if path.is_empty() {
                    "<root>".to_owned()
                } else {
                    path
                };
                return Err(RulesError::Parse {
                    path,
                    message: err.into_inner().to_string(),
                });
            }
        };

        table.validate()?;
        Ok(table)
    }

    pub fn from_yaml_file(path: &Path) -> RulesResult<Self> {
        let text = std::fs::read_to_string(path).map_err(|source| RulesError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_yaml_str(&text)
    }

    pub fn to_yaml(&self) -> RulesResult<String> {
        serde_yaml::to_string(self).map_err(RulesError::Serialize)
    }

    /// Check internal consistency: descending thresholds, usable bands, ordered age groups and
    /// a non-blank label on every rule that can add points.
    pub fn validate(&self) -> RulesResult<()> {
        let t = &self.thresholds;
        if !(t.emergency > t.very_urgent && t.very_urgent > t.urgent && t.urgent > t.slightly_urgent)
        {
            return Err(RulesError::Invalid(format!(
                "thresholds must be strictly descending, got {}/{}/{}/{}",
                t.emergency, t.very_urgent, t.urgent, t.slightly_urgent
            )));
        }

        let band_rules = [
            ("oxygen_saturation", &self.oxygen_saturation),
            ("respiratory_rate", &self.respiratory_rate),
            ("heart_rate", &self.heart_rate),
            ("systolic_pressure", &self.systolic_pressure),
            ("diastolic_pressure", &self.diastolic_pressure),
            ("temperature", &self.temperature),
            ("pain_intensity", &self.pain_intensity),
            ("age", &self.age),
            ("body_mass_index", &self.body_mass_index),
        ];
        for (name, rule) in band_rules {
            for (index, band) in rule.bands.iter().enumerate() {
                if band.below.is_none() && band.above.is_none() {
                    return Err(RulesError::Invalid(format!(
                        "{name}[{index}] needs 'below' or 'above'"
                    )));
                }
                require_label(&format!("{name}[{index}]"), &band.label)?;
            }
        }

        let consciousness = [
            &self.consciousness.unconscious,
            &self.consciousness.pain_response,
            &self.consciousness.verbal_response,
            &self.consciousness.alert_disoriented,
        ];
        for contribution in consciousness.into_iter().flatten() {
            require_label("consciousness", &contribution.label)?;
        }

        for tier in &self.symptoms.tiers {
            require_label("symptoms", &tier.label)?;
        }
        for tier in &self.diseases.tiers {
            require_label("diseases", &tier.label)?;
        }

        let mut contributions = vec![
            ("symptoms.fallback", self.symptoms.fallback.as_ref()),
            ("diseases.fallback", self.diseases.fallback.as_ref()),
            ("pregnancy", self.pregnancy.as_ref()),
            ("recent_surgery", self.recent_surgery.as_ref()),
        ];
        if let Some(onset) = &self.symptom_onset {
            contributions.extend([
                ("symptom_onset.acute_with_trigger", Some(&onset.acute_with_trigger)),
                ("symptom_onset.acute", Some(&onset.acute)),
                ("symptom_onset.recent", onset.recent.as_ref()),
            ]);
        }
        for (name, contribution) in contributions {
            if let Some(contribution) = contribution {
                require_label(name, &contribution.label)?;
            }
        }

        if let Some(pain_location) = &self.pain_location {
            require_label("pain_location", &pain_location.label)?;
        }

        if let Some(ranges) = &self.age_ranges {
            let mut previous: Option<u32> = None;
            for (index, group) in ranges.groups.iter().enumerate() {
                let last = index + 1 == ranges.groups.len();
                match (group.below_age, previous) {
                    (None, _) if !last => {
                        return Err(RulesError::Invalid(format!(
                            "age group '{}' has no upper age but is not the last group",
                            group.name
                        )));
                    }
                    (Some(limit), Some(prev)) if limit <= prev => {
                        return Err(RulesError::Invalid(format!(
                            "age group '{}' must have an upper age above {}",
                            group.name, prev
                        )));
                    }
                    _ => {}
                }
                previous = group.below_age;
            }
        }

        Ok(())
    }
}

fn require_label(rule: &str, label: &str) -> RulesResult<()> {
    if label.trim().is_empty() {
        return Err(RulesError::Invalid(format!("{rule} has an empty label")));
    }
    Ok(())
}

fn standard_age_ranges() -> AgeRangeRule {
    let group = |name: &str,
                 below_age: Option<u32>,
                 heart_rate: (f64, f64),
                 respiratory_rate: (f64, f64),
                 systolic: (f64, f64)| AgeGroup {
        name: name.into(),
        below_age,
        heart_rate: NormalRange::new(heart_rate.0, heart_rate.1),
        respiratory_rate: NormalRange::new(respiratory_rate.0, respiratory_rate.1),
        systolic_pressure: NormalRange::new(systolic.0, systolic.1),
        female_systolic_pressure: None,
    };

    let mut adult = group("adult", None, (60.0, 100.0), (12.0, 20.0), (100.0, 130.0));
    adult.female_systolic_pressure = Some(NormalRange::new(90.0, 120.0));

    AgeRangeRule {
        points: 15,
        groups: vec![
            group("newborn", Some(1), (100.0, 190.0), (30.0, 60.0), (60.0, 90.0)),
            group("infant", Some(2), (80.0, 150.0), (24.0, 40.0), (70.0, 100.0)),
            group("preschool child", Some(5), (70.0, 140.0), (22.0, 34.0), (80.0, 110.0)),
            group("school-age child", Some(12), (60.0, 120.0), (18.0, 30.0), (90.0, 120.0)),
            group("adolescent", Some(18), (50.0, 100.0), (12.0, 20.0), (100.0, 130.0)),
            adult,
        ],
        pulse_pressure: Some(NormalRange::new(30.0, 50.0)),
    }
}

fn standard_medications() -> MedicationRule {
    let class = |name: &str, keywords: &[&str], effects: &[&str]| MedicationClass {
        name: name.into(),
        keywords: keywords.iter().map(|k| k.to_string()).collect(),
        effects: effects.iter().map(|e| e.to_string()).collect(),
    };

    MedicationRule {
        points: 10,
        classes: vec![
            class(
                "beta-blocker",
                &["beta-blocker", "beta blocker", "betablocker"],
                &["Lowers heart rate", "Lowers blood pressure"],
            ),
            class(
                "calcium-antagonist",
                &["calcium-antagonist", "calcium antagonist", "calcium channel blocker"],
                &["Lowers blood pressure", "May alter heart rate"],
            ),
            class(
                "diuretic",
                &["diuretic"],
                &["Lowers blood pressure", "May alter electrolytes"],
            ),
            class(
                "vasodilator",
                &["vasodilator"],
                &["Lowers blood pressure", "Raises heart rate"],
            ),
        ],
    }
}
