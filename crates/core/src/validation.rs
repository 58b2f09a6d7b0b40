//! Boundary validation of observations.
//!
//! The classifier assumes physiologically plausible values. Every observation passes through
//! [`validate_observation`] before it is classified or stored, on both create and update.

use crate::{TriageError, TriageResult};
use triage_classifier::PatientObservation;

/// Inclusive plausibility range for one field.
#[derive(Clone, Copy, Debug)]
pub struct FieldRange {
    pub field: &'static str,
    pub min: f64,
    pub max: f64,
}

pub const AGE: FieldRange = FieldRange {
    field: "age",
    min: 0.0,
    max: 150.0,
};
pub const WEIGHT: FieldRange = FieldRange {
    field: "weight_kg",
    min: 0.0,
    max: 500.0,
};
pub const HEIGHT: FieldRange = FieldRange {
    field: "height_cm",
    min: 30.0,
    max: 250.0,
};
pub const HEART_RATE: FieldRange = FieldRange {
    field: "heart_rate",
    min: 20.0,
    max: 300.0,
};
pub const RESPIRATORY_RATE: FieldRange = FieldRange {
    field: "respiratory_rate",
    min: 5.0,
    max: 60.0,
};
pub const TEMPERATURE: FieldRange = FieldRange {
    field: "temperature",
    min: 30.0,
    max: 45.0,
};
pub const SYSTOLIC: FieldRange = FieldRange {
    field: "systolic_pressure",
    min: 50.0,
    max: 300.0,
};
pub const DIASTOLIC: FieldRange = FieldRange {
    field: "diastolic_pressure",
    min: 30.0,
    max: 200.0,
};
pub const OXYGEN_SATURATION: FieldRange = FieldRange {
    field: "oxygen_saturation",
    min: 0.0,
    max: 100.0,
};
pub const PAIN_INTENSITY: FieldRange = FieldRange {
    field: "pain_intensity",
    min: 0.0,
    max: 10.0,
};

impl FieldRange {
    /// Checks `value` against the range. NaN is always rejected.
    pub fn check(&self, value: f64) -> TriageResult<()> {
        if value >= self.min && value <= self.max {
            Ok(())
        } else {
            Err(TriageError::OutOfRange {
                field: self.field,
                value,
                min: self.min,
                max: self.max,
            })
        }
    }
}

/// Checks every numeric field of `obs` against its plausibility range.
///
/// # Errors
///
/// Returns [`TriageError::OutOfRange`] for the first field outside its range.
pub fn validate_observation(obs: &PatientObservation) -> TriageResult<()> {
    AGE.check(f64::from(obs.age))?;
    if let Some(weight) = obs.weight_kg {
        WEIGHT.check(weight)?;
    }
    if let Some(height) = obs.height_cm {
        HEIGHT.check(height)?;
    }
    HEART_RATE.check(f64::from(obs.heart_rate))?;
    RESPIRATORY_RATE.check(f64::from(obs.respiratory_rate))?;
    TEMPERATURE.check(obs.temperature)?;
    SYSTOLIC.check(f64::from(obs.systolic_pressure))?;
    DIASTOLIC.check(f64::from(obs.diastolic_pressure))?;
    OXYGEN_SATURATION.check(f64::from(obs.oxygen_saturation))?;
    PAIN_INTENSITY.check(f64::from(obs.pain_intensity))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::tests::sample_input;

    #[test]
    fn test_sample_observation_is_valid() {
        let obs = sample_input().into_observation().unwrap();
        validate_observation(&obs).unwrap();
    }

    #[test]
    fn test_range_bounds_are_inclusive() {
        assert!(OXYGEN_SATURATION.check(0.0).is_ok());
        assert!(OXYGEN_SATURATION.check(100.0).is_ok());
        assert!(OXYGEN_SATURATION.check(100.5).is_err());
        assert!(TEMPERATURE.check(f64::NAN).is_err());
    }

    #[test]
    fn test_out_of_range_reports_field() {
        let mut obs = sample_input().into_observation().unwrap();
        obs.heart_rate = 350;

        match validate_observation(&obs) {
            Err(TriageError::OutOfRange { field, value, .. }) => {
                assert_eq!(field, "heart_rate");
                assert_eq!(value, 350.0);
            }
            other => panic!("expected OutOfRange, got {other:?}"),
        }
    }

    #[test]
    fn test_optional_measures_checked_when_present() {
        let mut obs = sample_input().into_observation().unwrap();
        obs.height_cm = Some(10.0);
        assert!(validate_observation(&obs).is_err());

        obs.height_cm = None;
        obs.weight_kg = Some(0.0);
        assert!(validate_observation(&obs).is_ok());
    }
}
