//! The scorer: applies a [`RuleTable`] to a [`PatientObservation`].

use crate::observation::{
    humanize_code, ConsciousnessLevel, Gender, OnsetDuration, PatientObservation, Pregnancy,
};
use crate::priority::Priority;
use crate::rules::{BandRule, Contribution, RuleTable, Severity};
use serde::{Deserialize, Serialize};

/// Outcome of one classification. Replaces any previous result for the same record.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct ClassificationResult {
    pub score: u32,
    pub risk_factors: Vec<String>,
    pub critical_factors: Vec<String>,
    pub priority: Priority,
    /// kg/m², unrounded. `None` unless both weight and height were supplied.
    pub body_mass_index: Option<f64>,
}

/// `weight / (height in metres)²`, when both are present and positive.
pub fn body_mass_index(weight_kg: Option<f64>, height_cm: Option<f64>) -> Option<f64> {
    match (weight_kg, height_cm) {
        (Some(weight), Some(height)) if weight > 0.0 && height > 0.0 => {
            let metres = height / 100.0;
            Some(weight / (metres * metres))
        }
        _ => None,
    }
}

/// Classify with the standard rule table.
pub fn classify(observation: &PatientObservation) -> ClassificationResult {
    Classifier::default().classify(observation)
}

/// A scorer bound to one rule table. Cheap to share behind an `Arc`; holds no mutable state.
#[derive(Clone, Debug, Default)]
pub struct Classifier {
    rules: RuleTable,
}

#[derive(Default)]
struct Tally {
    score: u32,
    risk_factors: Vec<String>,
    critical_factors: Vec<String>,
}

impl Tally {
    fn add(&mut self, points: u32, severity: Severity, label: String) {
        self.score = self.score.saturating_add(points);
        match severity {
            Severity::Risk => self.risk_factors.push(label),
            Severity::Critical => self.critical_factors.push(label),
        }
    }

    fn add_contribution(&mut self, contribution: &Contribution) {
        self.add(
            contribution.points,
            contribution.severity,
            contribution.label.clone(),
        );
    }

    fn add_band(&mut self, rule: &BandRule, value: f64) {
        if let Some(band) = rule.evaluate(value) {
            let label = band.label.replace("{value}", &format!("{value:.1}"));
            self.add(band.points, band.severity, label);
        }
    }
}

impl Classifier {
    pub fn new(rules: RuleTable) -> Self {
        Self { rules }
    }

    pub fn rules(&self) -> &RuleTable {
        &self.rules
    }

    /// Score an observation. Never fails; bounds are checked before data reaches here.
    pub fn classify(&self, obs: &PatientObservation) -> ClassificationResult {
        let rules = &self.rules;
        let mut tally = Tally::default();

        let consciousness = match obs.consciousness {
            ConsciousnessLevel::Unconscious => rules.consciousness.unconscious.as_ref(),
            ConsciousnessLevel::PainResponse => rules.consciousness.pain_response.as_ref(),
            ConsciousnessLevel::VerbalResponse => rules.consciousness.verbal_response.as_ref(),
            ConsciousnessLevel::Alert if obs.is_disoriented() => {
                rules.consciousness.alert_disoriented.as_ref()
            }
            ConsciousnessLevel::Alert => None,
        };
        if let Some(contribution) = consciousness {
            tally.add_contribution(contribution);
        }

        tally.add_band(&rules.oxygen_saturation, f64::from(obs.oxygen_saturation));
        tally.add_band(&rules.respiratory_rate, f64::from(obs.respiratory_rate));
        tally.add_band(&rules.heart_rate, f64::from(obs.heart_rate));
        tally.add_band(&rules.systolic_pressure, f64::from(obs.systolic_pressure));
        tally.add_band(&rules.diastolic_pressure, f64::from(obs.diastolic_pressure));
        tally.add_band(&rules.temperature, obs.temperature);
        tally.add_band(&rules.pain_intensity, f64::from(obs.pain_intensity));

        self.score_pain_location(obs, &mut tally);
        self.score_onset(obs, &mut tally);

        for symptom in &obs.symptoms {
            if let Some((points, severity, label)) = rules.symptoms.lookup(symptom) {
                tally.add(
                    points,
                    severity,
                    label.replace("{code}", &humanize_code(symptom.code())),
                );
            }
        }
        for disease in &obs.diseases {
            if let Some((points, severity, label)) = rules.diseases.lookup(disease) {
                tally.add(
                    points,
                    severity,
                    label.replace("{code}", &humanize_code(disease.code())),
                );
            }
        }

        tally.add_band(&rules.age, f64::from(obs.age));

        if obs.pregnancy == Pregnancy::Yes {
            if let Some(contribution) = &rules.pregnancy {
                tally.add_contribution(contribution);
            }
        }
        if obs.recent_surgery {
            if let Some(contribution) = &rules.recent_surgery {
                tally.add_contribution(contribution);
            }
        }

        let bmi = body_mass_index(obs.weight_kg, obs.height_cm);
        if let Some(value) = bmi {
            tally.add_band(&rules.body_mass_index, value);
        }

        self.score_age_ranges(obs, &mut tally);
        self.score_medications(obs, &mut tally);

        tally.risk_factors.retain(|f| !f.trim().is_empty());
        tally.critical_factors.retain(|f| !f.trim().is_empty());

        let priority = rules
            .thresholds
            .resolve(tally.score, tally.critical_factors.len());

        tracing::debug!(
            score = tally.score,
            critical = tally.critical_factors.len(),
            risk = tally.risk_factors.len(),
            %priority,
            "observation classified"
        );

        ClassificationResult {
            score: tally.score,
            risk_factors: tally.risk_factors,
            critical_factors: tally.critical_factors,
            priority,
            body_mass_index: bmi,
        }
    }

    fn score_pain_location(&self, obs: &PatientObservation, tally: &mut Tally) {
        let Some(rule) = &self.rules.pain_location else {
            return;
        };
        let Some(location) = obs.pain_location.as_deref().map(str::trim) else {
            return;
        };
        if location.is_empty() || obs.pain_intensity < rule.min_intensity {
            return;
        }

        let lowered = location.to_lowercase();
        if rule
            .keywords
            .iter()
            .any(|keyword| lowered.contains(&keyword.to_lowercase()))
        {
            let character = obs
                .pain_character
                .as_deref()
                .map(str::trim)
                .filter(|c| !c.is_empty())
                .unwrap_or(&rule.default_character);
            let label = rule
                .label
                .replace("{character}", character)
                .replace("{location}", location);
            tally.add(rule.points, Severity::Risk, label);
        }
    }

    fn score_onset(&self, obs: &PatientObservation, tally: &mut Tally) {
        let Some(rule) = &self.rules.symptom_onset else {
            return;
        };

        match obs.symptom_onset {
            OnsetDuration::UnderOneHour => {
                let triggered = obs
                    .symptoms
                    .iter()
                    .any(|s| rule.trigger_symptoms.contains(s));
                if triggered {
                    tally.add_contribution(&rule.acute_with_trigger);
                } else {
                    tally.add_contribution(&rule.acute);
                }
            }
            OnsetDuration::OneToSixHours => {
                if let Some(recent) = &rule.recent {
                    tally.add_contribution(recent);
                }
            }
            _ => {}
        }
    }

    fn score_age_ranges(&self, obs: &PatientObservation, tally: &mut Tally) {
        let Some(rule) = &self.rules.age_ranges else {
            return;
        };
        let Some(group) = rule.group_for(obs.age) else {
            return;
        };

        let heart_rate = f64::from(obs.heart_rate);
        if !group.heart_rate.contains(heart_rate) {
            tally.add(
                rule.points,
                Severity::Risk,
                format!(
                    "Heart rate outside normal range for {} ({}-{} bpm)",
                    group.name, group.heart_rate.min, group.heart_rate.max
                ),
            );
        }

        let respiratory_rate = f64::from(obs.respiratory_rate);
        if !group.respiratory_rate.contains(respiratory_rate) {
            tally.add(
                rule.points,
                Severity::Risk,
                format!(
                    "Respiratory rate outside normal range for {} ({}-{} rpm)",
                    group.name, group.respiratory_rate.min, group.respiratory_rate.max
                ),
            );
        }

        if let Some(range) = rule.pulse_pressure {
            let pulse_pressure = obs.pulse_pressure();
            if !range.contains(pulse_pressure as f64) {
                tally.add(
                    rule.points,
                    Severity::Risk,
                    format!(
                        "Abnormal pulse pressure ({} mmHg). Normal: {}-{} mmHg",
                        pulse_pressure, range.min, range.max
                    ),
                );
            }
        }

        let (systolic_range, group_label) = match (obs.gender, group.female_systolic_pressure) {
            (Gender::Female, Some(range)) => (range, format!("{} female", group.name)),
            _ => (group.systolic_pressure, group.name.clone()),
        };
        if !systolic_range.contains(f64::from(obs.systolic_pressure)) {
            tally.add(
                rule.points,
                Severity::Risk,
                format!(
                    "Systolic pressure outside normal range for {} ({}-{} mmHg)",
                    group_label, systolic_range.min, systolic_range.max
                ),
            );
        }
    }

    fn score_medications(&self, obs: &PatientObservation, tally: &mut Tally) {
        let Some(rule) = &self.rules.medications else {
            return;
        };
        let Some(text) = obs.medications.as_deref() else {
            return;
        };

        let lowered = text.to_lowercase();
        for class in &rule.classes {
            if class
                .keywords
                .iter()
                .any(|keyword| lowered.contains(&keyword.to_lowercase()))
            {
                tally.add(
                    rule.points,
                    Severity::Risk,
                    format!("Patient taking {}: {}", class.name, class.effects.join(", ")),
                );
            }
        }
    }
}
