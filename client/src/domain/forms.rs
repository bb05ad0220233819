//! Raw form input and its validation.
//!
//! Forms hold exactly what the user typed. Validation happens in one pass
//! before any gateway call and yields either the typed create input or a
//! [`FormError`] naming every field that needs attention.

use serde_json::json;

use super::error::DomainError;
use super::person::{NewPerson, PersonId, PersonValidationError};
use super::transaction::{NewTransaction, TransactionKind, TransactionValidationError};

/// Why a form was rejected.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum FormError {
    /// Required fields were blank.
    #[error("fill in all fields: {}", .fields.join(", "))]
    MissingFields {
        /// Names of the blank fields, in form order.
        fields: Vec<&'static str>,
    },
    /// Age was not a non-negative whole number.
    #[error("age must be a whole number of years, got '{raw}'")]
    InvalidAge {
        /// The rejected input.
        raw: String,
    },
    /// Amount was not a number.
    #[error("amount must be a number, got '{raw}'")]
    NonNumericAmount {
        /// The rejected input.
        raw: String,
    },
    /// Person rules rejected the input.
    #[error(transparent)]
    Person(#[from] PersonValidationError),
    /// Transaction rules rejected the input.
    #[error(transparent)]
    Transaction(#[from] TransactionValidationError),
}

impl FormError {
    /// Convert into the domain error reported by the screens.
    #[must_use]
    pub fn into_domain(self) -> DomainError {
        let error = DomainError::invalid_request(self.to_string());
        match self {
            Self::MissingFields { fields } => error.with_details(json!({ "fields": fields })),
            _ => error,
        }
    }
}

fn missing_fields<const N: usize>(fields: [(&'static str, &str); N]) -> Result<(), FormError> {
    let missing: Vec<&'static str> = fields
        .into_iter()
        .filter(|(_, value)| value.trim().is_empty())
        .map(|(name, _)| name)
        .collect();
    if missing.is_empty() {
        Ok(())
    } else {
        Err(FormError::MissingFields { fields: missing })
    }
}

/// Person registration form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PersonForm {
    /// Name as typed.
    pub name: String,
    /// Age as typed.
    pub age: String,
}

impl PersonForm {
    /// Build a form from typed values.
    #[must_use]
    pub fn new(name: impl Into<String>, age: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            age: age.into(),
        }
    }

    /// Validate the form into create-person input.
    ///
    /// # Errors
    ///
    /// Returns [`FormError::MissingFields`] when any field is blank and
    /// [`FormError::InvalidAge`] when the age is not a non-negative integer.
    ///
    /// # Examples
    /// ```
    /// use ledger_client::domain::{FormError, PersonForm};
    ///
    /// let error = PersonForm::new("Ana", "").validate().expect_err("age missing");
    /// assert_eq!(error, FormError::MissingFields { fields: vec!["age"] });
    /// ```
    pub fn validate(&self) -> Result<NewPerson, FormError> {
        missing_fields([("name", self.name.as_str()), ("age", self.age.as_str())])?;
        let raw_age = self.age.trim();
        let age = raw_age.parse::<u32>().map_err(|_| FormError::InvalidAge {
            raw: raw_age.to_owned(),
        })?;
        Ok(NewPerson::new(&self.name, age)?)
    }
}

/// Transaction entry form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TransactionForm {
    /// Selected person identifier.
    pub person_id: String,
    /// Selected kind (`income`/`expense`, or `RECEITA`/`DESPESA`).
    pub kind: String,
    /// Description as typed.
    pub description: String,
    /// Amount as typed.
    pub amount: String,
}

impl TransactionForm {
    /// Validate the form into create-transaction input.
    ///
    /// # Errors
    ///
    /// Returns [`FormError::MissingFields`] when any field is blank,
    /// [`FormError::NonNumericAmount`] when the amount does not parse, and
    /// the transaction rule failures for unknown kinds and non-positive or
    /// non-finite amounts.
    pub fn validate(&self) -> Result<NewTransaction, FormError> {
        missing_fields([
            ("person", self.person_id.as_str()),
            ("type", self.kind.as_str()),
            ("description", self.description.as_str()),
            ("amount", self.amount.as_str()),
        ])?;
        let person_id = PersonId::new(self.person_id.trim())?;
        let kind = self.kind.parse::<TransactionKind>()?;
        let raw_amount = self.amount.trim();
        let amount = raw_amount
            .parse::<f64>()
            .map_err(|_| FormError::NonNumericAmount {
                raw: raw_amount.to_owned(),
            })?;
        Ok(NewTransaction::new(
            person_id,
            kind,
            &self.description,
            amount,
        )?)
    }
}
