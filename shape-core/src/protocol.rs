//! Shape of Us wire protocol: request and response types.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Default server address shared by server and client.
pub const DEFAULT_ADDR: &str = "127.0.0.1:9999";

/// Biological sex used by the BMR formula. Encoded as "M" / "F"; decoded case-insensitively.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Gender {
    Male,
    Female,
}

impl Gender {
    pub fn as_str(&self) -> &'static str {
        match self {
            Gender::Male => "M",
            Gender::Female => "F",
        }
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Token is not "m" or "f" (any case).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("expected M or F, got {0:?}")]
pub struct UnknownGender(pub String);

impl FromStr for Gender {
    type Err = UnknownGender;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.eq_ignore_ascii_case("m") {
            Ok(Gender::Male)
        } else if s.eq_ignore_ascii_case("f") {
            Ok(Gender::Female)
        } else {
            Err(UnknownGender(s.to_string()))
        }
    }
}

impl Serialize for Gender {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Gender {
    fn deserialize<D: Deserializer<'de>>(d: D) -> Result<Self, D::Error> {
        let s: String = Deserialize::deserialize(d)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// Integer fields travel as JSON numbers; `3` and `3.0` both decode to 3 (truncated toward zero).
/// Numbers outside the `i32` range are rejected.
mod integral {
    use serde::de::Error;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(v: &i32, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_i32(*v)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<i32, D::Error> {
        let n = f64::deserialize(d)?.trunc();
        if n >= f64::from(i32::MIN) && n <= f64::from(i32::MAX) {
            Ok(n as i32)
        } else {
            Err(D::Error::custom(format!("integer out of range: {n}")))
        }
    }
}

/// Anthropometric profile sent by the client. Request payload.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct Profile {
    /// Meters.
    pub height: f64,
    /// Kilograms.
    pub weight: f64,
    pub gender: Gender,
    /// Nominally 1 (sedentary) to 4 (very active); used as a direct multiplier on BMR.
    #[serde(with = "integral")]
    pub activity_level: i32,
    /// Years.
    #[serde(with = "integral")]
    pub age: i32,
}

/// BMI classification. Serialized with the human-readable labels clients display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ImcStatus {
    #[serde(rename = "Underweight")]
    Underweight,
    #[serde(rename = "Normal weight")]
    NormalWeight,
    #[serde(rename = "Overweight")]
    Overweight,
    #[serde(rename = "Obesity Grade 1")]
    ObesityGrade1,
    #[serde(rename = "Obesity Grade 2")]
    ObesityGrade2,
    #[serde(rename = "Obesity Grade 3")]
    ObesityGrade3,
}

impl ImcStatus {
    pub const ALL: [ImcStatus; 6] = [
        ImcStatus::Underweight,
        ImcStatus::NormalWeight,
        ImcStatus::Overweight,
        ImcStatus::ObesityGrade1,
        ImcStatus::ObesityGrade2,
        ImcStatus::ObesityGrade3,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            ImcStatus::Underweight => "Underweight",
            ImcStatus::NormalWeight => "Normal weight",
            ImcStatus::Overweight => "Overweight",
            ImcStatus::ObesityGrade1 => "Obesity Grade 1",
            ImcStatus::ObesityGrade2 => "Obesity Grade 2",
            ImcStatus::ObesityGrade3 => "Obesity Grade 3",
        }
    }
}

impl fmt::Display for ImcStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Daily macronutrient targets in grams.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Nutrients {
    pub carbohydrates: f64,
    pub proteins: f64,
    pub fats: f64,
}

/// Metrics derived from one profile. Response payload.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct HealthReport {
    pub imc: f64,
    pub imc_status: ImcStatus,
    /// kcal/day.
    pub bmr: f64,
    /// kcal/day.
    pub calorie_intake: f64,
    pub nutrients: Nutrients,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gender_parses_any_case() {
        assert_eq!("m".parse::<Gender>().unwrap(), Gender::Male);
        assert_eq!("F".parse::<Gender>().unwrap(), Gender::Female);
        assert!("x".parse::<Gender>().is_err());
        assert!("male".parse::<Gender>().is_err());
    }

    #[test]
    fn profile_uses_camel_case_keys() {
        let p = Profile {
            height: 1.7,
            weight: 70.0,
            gender: Gender::Male,
            activity_level: 3,
            age: 20,
        };
        let v = serde_json::to_value(p).unwrap();
        assert_eq!(v["activityLevel"], 3);
        assert_eq!(v["gender"], "M");
        assert!(v.get("activity_level").is_none());
    }

    #[test]
    fn integral_fields_accept_floats() {
        let json = r#"{"height":1.7,"weight":70.0,"gender":"f","activityLevel":3.0,"age":20.9}"#;
        let p: Profile = serde_json::from_str(json).unwrap();
        assert_eq!(p.gender, Gender::Female);
        assert_eq!(p.activity_level, 3);
        assert_eq!(p.age, 20);
    }

    #[test]
    fn integral_fields_reject_out_of_range() {
        let json = r#"{"height":1.7,"weight":70.0,"gender":"m","activityLevel":1e20,"age":20}"#;
        assert!(serde_json::from_str::<Profile>(json).is_err());
        let json = r#"{"height":1.7,"weight":70.0,"gender":"m","activityLevel":3,"age":-3e9}"#;
        assert!(serde_json::from_str::<Profile>(json).is_err());
    }

    #[test]
    fn status_uses_display_labels() {
        let v = serde_json::to_value(ImcStatus::ObesityGrade2).unwrap();
        assert_eq!(v, "Obesity Grade 2");
        let s: ImcStatus = serde_json::from_str("\"Normal weight\"").unwrap();
        assert_eq!(s, ImcStatus::NormalWeight);
        for status in ImcStatus::ALL {
            assert_eq!(serde_json::to_value(status).unwrap(), status.label());
        }
    }
}
