//! People registry records.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Validation errors for person identifiers and new-person input.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PersonValidationError {
    /// Identifier was empty.
    #[error("person id must not be empty")]
    EmptyId,
    /// Identifier carried leading or trailing whitespace.
    #[error("person id must not contain surrounding whitespace")]
    PaddedId,
    /// Name was blank.
    #[error("name must not be empty")]
    EmptyName,
}

/// Server-assigned person identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct PersonId(String);

impl PersonId {
    /// Validate and construct a [`PersonId`].
    ///
    /// # Errors
    ///
    /// Rejects blank identifiers and identifiers with surrounding whitespace.
    pub fn new(id: impl Into<String>) -> Result<Self, PersonValidationError> {
        let raw: String = id.into();
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(PersonValidationError::EmptyId);
        }
        if trimmed != raw {
            return Err(PersonValidationError::PaddedId);
        }
        Ok(Self(raw))
    }
}

impl AsRef<str> for PersonId {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for PersonId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<PersonId> for String {
    fn from(value: PersonId) -> Self {
        value.0
    }
}

impl TryFrom<String> for PersonId {
    type Error = PersonValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// A person as listed by the gateway.
#[derive(Debug, Clone, PartialEq)]
pub struct Person {
    /// Server-assigned identifier.
    pub id: PersonId,
    /// Display name.
    pub name: String,
    /// Age in whole years.
    pub age: u32,
    /// Creation instant.
    pub created_at: DateTime<Utc>,
    /// Last update instant.
    pub updated_at: DateTime<Utc>,
}

/// Validated input for the create-person call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewPerson {
    name: String,
    age: u32,
}

impl NewPerson {
    /// Construct create-person input, trimming the name.
    ///
    /// # Errors
    ///
    /// Returns [`PersonValidationError::EmptyName`] for blank names.
    pub fn new(name: impl AsRef<str>, age: u32) -> Result<Self, PersonValidationError> {
        let trimmed = name.as_ref().trim();
        if trimmed.is_empty() {
            return Err(PersonValidationError::EmptyName);
        }
        Ok(Self {
            name: trimmed.to_owned(),
            age,
        })
    }

    /// Name to register.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Age to register.
    #[must_use]
    pub const fn age(&self) -> u32 {
        self.age
    }
}
