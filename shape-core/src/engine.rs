//! Metrics engine: pure functions from a `Profile` to a `HealthReport`. No I/O, no state.

use crate::protocol::{Gender, HealthReport, ImcStatus, Nutrients, Profile};

/// Energy density of carbohydrates, kcal per gram.
pub const KCAL_PER_GRAM_CARBOHYDRATES: f64 = 4.0;
/// Energy density of proteins, kcal per gram.
pub const KCAL_PER_GRAM_PROTEINS: f64 = 4.0;
/// Energy density of fats, kcal per gram.
pub const KCAL_PER_GRAM_FATS: f64 = 9.0;

/// Upper bounds (exclusive) of each BMI class except the last, in `ImcStatus::ALL` order.
pub const IMC_THRESHOLDS: [f64; 5] = [18.5, 25.0, 30.0, 35.0, 40.0];

/// Arithmetic fault while deriving metrics. Fatal for the request.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ComputationError {
    #[error("height must be positive, got {0}")]
    NonPositiveHeight(f64),
    #[error("{metric} is not a finite number")]
    NonFinite { metric: &'static str },
}

/// Body mass index: weight / height².
pub fn imc(profile: &Profile) -> f64 {
    profile.weight / (profile.height * profile.height)
}

/// Classify a BMI value. Lower bounds inclusive, upper bounds exclusive.
pub fn imc_status(imc: f64) -> ImcStatus {
    IMC_THRESHOLDS
        .iter()
        .position(|upper| imc < *upper)
        .map(|i| ImcStatus::ALL[i])
        .unwrap_or(ImcStatus::ObesityGrade3)
}

/// Basal metabolic rate (Mifflin-St Jeor), kcal/day. Height is converted to centimeters.
pub fn bmr(profile: &Profile) -> f64 {
    let base = 10.0 * profile.weight + 6.25 * (profile.height * 100.0)
        - 5.0 * f64::from(profile.age);
    match profile.gender {
        Gender::Male => base + 5.0,
        Gender::Female => base - 161.0,
    }
}

/// Daily calorie intake: BMR times the raw activity level.
pub fn calorie_intake(bmr: f64, activity_level: i32) -> f64 {
    bmr * f64::from(activity_level)
}

/// Daily macronutrient targets in grams, proportional to body weight.
pub fn nutrients(weight: f64) -> Nutrients {
    Nutrients {
        carbohydrates: weight * 3.0,
        proteins: weight * 1.0,
        fats: weight * 0.7,
    }
}

fn finite(metric: &'static str, value: f64) -> Result<f64, ComputationError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(ComputationError::NonFinite { metric })
    }
}

/// Derive every metric for one profile.
pub fn compute(profile: &Profile) -> Result<HealthReport, ComputationError> {
    if profile.height.is_nan() || profile.height <= 0.0 {
        return Err(ComputationError::NonPositiveHeight(profile.height));
    }
    let imc = finite("imc", imc(profile))?;
    let bmr = finite("bmr", bmr(profile))?;
    let calorie_intake = finite("calorieIntake", calorie_intake(bmr, profile.activity_level))?;
    let nutrients = nutrients(profile.weight);
    finite("nutrients", nutrients.carbohydrates)?;
    Ok(HealthReport {
        imc,
        imc_status: imc_status(imc),
        bmr,
        calorie_intake,
        nutrients,
    })
}
