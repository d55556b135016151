//! Profile parsing: whitespace tokens in fixed order -> typed `Profile`.

use crate::protocol::{Gender, Profile};

/// Number of fields in a profile line.
pub const FIELD_COUNT: usize = 5;

/// Profile field, in input order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Height,
    Weight,
    Gender,
    ActivityLevel,
    Age,
}

impl Field {
    pub fn name(&self) -> &'static str {
        match self {
            Field::Height => "height",
            Field::Weight => "weight",
            Field::Gender => "gender",
            Field::ActivityLevel => "activityLevel",
            Field::Age => "age",
        }
    }
}

/// Why a line could not become a profile. Every variant is recoverable by asking again.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ProfileError {
    #[error("expected 5 values, got {found}")]
    MissingField { found: usize },
    #[error("invalid number for {}: {token:?}", .field.name())]
    InvalidNumber { field: Field, token: String },
    #[error("invalid gender: {token:?}")]
    InvalidGender { token: String },
    /// A token past the fifth that is neither a number nor a gender marker.
    #[error("unexpected value {token:?} after the last field")]
    TrailingToken { token: String },
}

fn parse_real(field: Field, token: &str) -> Result<f64, ProfileError> {
    token.parse().map_err(|_| ProfileError::InvalidNumber {
        field,
        token: token.to_string(),
    })
}

/// Parsed as a real and truncated toward zero. Values outside the `i32` range are rejected.
fn parse_integer(field: Field, token: &str) -> Result<i32, ProfileError> {
    let n = parse_real(field, token)?.trunc();
    if n >= f64::from(i32::MIN) && n <= f64::from(i32::MAX) {
        Ok(n as i32)
    } else {
        Err(ProfileError::InvalidNumber {
            field,
            token: token.to_string(),
        })
    }
}

fn parse_gender(token: &str) -> Result<Gender, ProfileError> {
    token.parse().map_err(|_| ProfileError::InvalidGender {
        token: token.to_string(),
    })
}

fn check_trailing(token: &str) -> Result<(), ProfileError> {
    if token.parse::<f64>().is_ok() || token.parse::<Gender>().is_ok() {
        Ok(())
    } else {
        Err(ProfileError::TrailingToken {
            token: token.to_string(),
        })
    }
}

/// Parse a raw input line. Blank tokens are dropped before positional assignment.
/// No range checks are applied.
pub fn parse_line(line: &str) -> Result<Profile, ProfileError> {
    parse_profile(line.split_whitespace())
}

/// Parse tokens in the order height, weight, gender, activity level, age.
///
/// Every present token is checked left to right before the count, so a malformed token
/// wins over a short line. Tokens past the fifth must still be numbers or gender markers
/// but are otherwise ignored.
pub fn parse_profile<'a, I>(tokens: I) -> Result<Profile, ProfileError>
where
    I: IntoIterator<Item = &'a str>,
{
    let tokens: Vec<&str> = tokens
        .into_iter()
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .collect();
    let mut it = tokens.iter().copied();

    let height = it.next().map(|t| parse_real(Field::Height, t)).transpose()?;
    let weight = it.next().map(|t| parse_real(Field::Weight, t)).transpose()?;
    let gender = it.next().map(parse_gender).transpose()?;
    let activity_level = it
        .next()
        .map(|t| parse_integer(Field::ActivityLevel, t))
        .transpose()?;
    let age = it.next().map(|t| parse_integer(Field::Age, t)).transpose()?;
    it.try_for_each(check_trailing)?;

    match (height, weight, gender, activity_level, age) {
        (Some(height), Some(weight), Some(gender), Some(activity_level), Some(age)) => Ok(Profile {
            height,
            weight,
            gender,
            activity_level,
            age,
        }),
        _ => Err(ProfileError::MissingField {
            found: tokens.len(),
        }),
    }
}
