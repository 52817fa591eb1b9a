//! Name validation performed before any compute request is issued.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Minimum number of characters a trimmed name must have.
pub const MIN_NAME_LENGTH: usize = 2;

/// Which input field an error belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum NameField {
    First,
    Second,
}

/// A single per-field validation failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FieldError {
    Missing(NameField),
    TooShort,
    NotDistinct,
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldError::Missing(NameField::First) => write!(f, "Please enter the first name"),
            FieldError::Missing(NameField::Second) => write!(f, "Please enter the second name"),
            FieldError::TooShort => {
                write!(f, "Name must be at least {MIN_NAME_LENGTH} characters")
            }
            FieldError::NotDistinct => write!(f, "Names must be different"),
        }
    }
}

/// Errors for both fields. At least one is set when returned from [`validate`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationErrors {
    pub name_one: Option<FieldError>,
    pub name_two: Option<FieldError>,
}

impl ValidationErrors {
    pub fn is_empty(&self) -> bool {
        self.name_one.is_none() && self.name_two.is_none()
    }

    pub fn get(&self, field: NameField) -> Option<FieldError> {
        match field {
            NameField::First => self.name_one,
            NameField::Second => self.name_two,
        }
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let messages: Vec<String> = [self.name_one, self.name_two]
            .into_iter()
            .flatten()
            .map(|e| e.to_string())
            .collect();
        write!(f, "{}", messages.join("; "))
    }
}

/// Trimmed names that passed validation and may be sent to the service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedNames {
    pub name_one: String,
    pub name_two: String,
}

fn check_single(name: &str, field: NameField) -> Option<FieldError> {
    if name.is_empty() {
        Some(FieldError::Missing(field))
    } else if name.chars().count() < MIN_NAME_LENGTH {
        Some(FieldError::TooShort)
    } else {
        None
    }
}

/// Validates both names.
///
/// Every rule is evaluated, so both fields can report errors at once. The
/// distinctness check only runs when both names are non-empty and always
/// lands on the second field, replacing a length error there.
pub fn validate(name_one: &str, name_two: &str) -> Result<ValidatedNames, ValidationErrors> {
    let one = name_one.trim();
    let two = name_two.trim();

    let mut errors = ValidationErrors {
        name_one: check_single(one, NameField::First),
        name_two: check_single(two, NameField::Second),
    };

    if !one.is_empty() && !two.is_empty() && one.to_lowercase() == two.to_lowercase() {
        errors.name_two = Some(FieldError::NotDistinct);
    }

    if errors.is_empty() {
        Ok(ValidatedNames {
            name_one: one.to_string(),
            name_two: two.to_string(),
        })
    } else {
        Err(errors)
    }
}
