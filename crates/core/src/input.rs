//! Create/update payload for triage records.
//!
//! [`ObservationInput`] mirrors [`PatientObservation`] with every field optional. On create the
//! required fields must be present; on update each present field overrides the stored value and
//! each absent field keeps it. Presence is explicit: `0`, `false` and `""` are values, not
//! "unset". A present but blank optional text field clears it.

use crate::{TriageError, TriageResult};
use serde::{Deserialize, Serialize};
use triage_classifier::{
    ConsciousnessLevel, Disease, Gender, OnsetDuration, Orientation, PatientObservation,
    Pregnancy, Symptom,
};
use triage_types::{trimmed_or_none, NonEmptyText};
use utoipa::ToSchema;

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ObservationInput {
    pub name: Option<String>,
    pub age: Option<u32>,
    pub gender: Option<Gender>,
    pub weight_kg: Option<f64>,
    pub height_cm: Option<f64>,
    pub heart_rate: Option<u32>,
    pub respiratory_rate: Option<u32>,
    pub temperature: Option<f64>,
    pub systolic_pressure: Option<u32>,
    pub diastolic_pressure: Option<u32>,
    pub oxygen_saturation: Option<u32>,
    pub consciousness: Option<ConsciousnessLevel>,
    pub orientation: Option<Orientation>,
    pub pain_intensity: Option<u8>,
    pub pain_location: Option<String>,
    pub pain_character: Option<String>,
    pub chief_complaint: Option<String>,
    pub symptom_onset: Option<OnsetDuration>,
    pub symptoms: Option<Vec<Symptom>>,
    pub diseases: Option<Vec<Disease>>,
    pub medications: Option<String>,
    pub allergies: Option<String>,
    pub pregnancy: Option<Pregnancy>,
    pub recent_surgery: Option<bool>,
    pub notes: Option<String>,
}

fn required<T>(value: Option<T>, field: &'static str) -> TriageResult<T> {
    value.ok_or(TriageError::MissingField(field))
}

fn non_empty(value: String, field: &'static str) -> TriageResult<NonEmptyText> {
    NonEmptyText::new(value)
        .map_err(|_| TriageError::InvalidInput(format!("{} must not be empty", field)))
}

/// Removes repeated codes, keeping first occurrence order.
fn dedup<T: PartialEq + Copy>(items: Vec<T>) -> Vec<T> {
    let mut unique = Vec::with_capacity(items.len());
    for item in items {
        if !unique.contains(&item) {
            unique.push(item);
        }
    }
    unique
}

impl ObservationInput {
    /// Build a complete observation for a new record.
    ///
    /// # Errors
    ///
    /// - [`TriageError::MissingField`] if a required field is absent.
    /// - [`TriageError::InvalidInput`] if the name or chief complaint is blank.
    pub fn into_observation(self) -> TriageResult<PatientObservation> {
        Ok(PatientObservation {
            name: non_empty(required(self.name, "name")?, "name")?,
            age: required(self.age, "age")?,
            gender: required(self.gender, "gender")?,
            weight_kg: self.weight_kg,
            height_cm: self.height_cm,
            heart_rate: required(self.heart_rate, "heart_rate")?,
            respiratory_rate: required(self.respiratory_rate, "respiratory_rate")?,
            temperature: required(self.temperature, "temperature")?,
            systolic_pressure: required(self.systolic_pressure, "systolic_pressure")?,
            diastolic_pressure: required(self.diastolic_pressure, "diastolic_pressure")?,
            oxygen_saturation: required(self.oxygen_saturation, "oxygen_saturation")?,
            consciousness: required(self.consciousness, "consciousness")?,
            orientation: self.orientation,
            pain_intensity: self.pain_intensity.unwrap_or(0),
            pain_location: trimmed_or_none(self.pain_location),
            pain_character: trimmed_or_none(self.pain_character),
            chief_complaint: non_empty(
                required(self.chief_complaint, "chief_complaint")?,
                "chief_complaint",
            )?,
            symptom_onset: required(self.symptom_onset, "symptom_onset")?,
            symptoms: dedup(self.symptoms.unwrap_or_default()),
            diseases: dedup(self.diseases.unwrap_or_default()),
            medications: trimmed_or_none(self.medications),
            allergies: trimmed_or_none(self.allergies),
            pregnancy: self.pregnancy.unwrap_or_default(),
            recent_surgery: self.recent_surgery.unwrap_or(false),
            notes: trimmed_or_none(self.notes),
        })
    }

    /// Apply the present fields on top of `existing`.
    ///
    /// # Errors
    ///
    /// Returns [`TriageError::InvalidInput`] if a present name or chief complaint is blank.
    pub fn merge_onto(self, existing: &PatientObservation) -> TriageResult<PatientObservation> {
        let mut merged = existing.clone();

        if let Some(name) = self.name {
            merged.name = non_empty(name, "name")?;
        }
        if let Some(complaint) = self.chief_complaint {
            merged.chief_complaint = non_empty(complaint, "chief_complaint")?;
        }

        if let Some(age) = self.age {
            merged.age = age;
        }
        if let Some(gender) = self.gender {
            merged.gender = gender;
        }
        if let Some(heart_rate) = self.heart_rate {
            merged.heart_rate = heart_rate;
        }
        if let Some(respiratory_rate) = self.respiratory_rate {
            merged.respiratory_rate = respiratory_rate;
        }
        if let Some(temperature) = self.temperature {
            merged.temperature = temperature;
        }
        if let Some(systolic_pressure) = self.systolic_pressure {
            merged.systolic_pressure = systolic_pressure;
        }
        if let Some(diastolic_pressure) = self.diastolic_pressure {
            merged.diastolic_pressure = diastolic_pressure;
        }
        if let Some(oxygen_saturation) = self.oxygen_saturation {
            merged.oxygen_saturation = oxygen_saturation;
        }
        if let Some(consciousness) = self.consciousness {
            merged.consciousness = consciousness;
        }
        if let Some(pain_intensity) = self.pain_intensity {
            merged.pain_intensity = pain_intensity;
        }
        if let Some(symptom_onset) = self.symptom_onset {
            merged.symptom_onset = symptom_onset;
        }
        if let Some(pregnancy) = self.pregnancy {
            merged.pregnancy = pregnancy;
        }
        if let Some(recent_surgery) = self.recent_surgery {
            merged.recent_surgery = recent_surgery;
        }

        if self.weight_kg.is_some() {
            merged.weight_kg = self.weight_kg;
        }
        if self.height_cm.is_some() {
            merged.height_cm = self.height_cm;
        }
        if self.orientation.is_some() {
            merged.orientation = self.orientation;
        }
        if let Some(symptoms) = self.symptoms {
            merged.symptoms = dedup(symptoms);
        }
        if let Some(diseases) = self.diseases {
            merged.diseases = dedup(diseases);
        }

        if self.pain_location.is_some() {
            merged.pain_location = trimmed_or_none(self.pain_location);
        }
        if self.pain_character.is_some() {
            merged.pain_character = trimmed_or_none(self.pain_character);
        }
        if self.medications.is_some() {
            merged.medications = trimmed_or_none(self.medications);
        }
        if self.allergies.is_some() {
            merged.allergies = trimmed_or_none(self.allergies);
        }
        if self.notes.is_some() {
            merged.notes = trimmed_or_none(self.notes);
        }

        Ok(merged)
    }
}
