//! Ledger transaction records.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};

use super::person::PersonId;

/// Validation errors for transaction identifiers, kinds and new-transaction
/// input.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum TransactionValidationError {
    /// Identifier was empty.
    #[error("transaction id must not be empty")]
    EmptyId,
    /// Kind was neither income nor expense.
    #[error("transaction type must be INCOME or EXPENSE, got '{raw}'")]
    UnknownKind {
        /// The rejected input.
        raw: String,
    },
    /// Description was blank.
    #[error("description must not be empty")]
    EmptyDescription,
    /// Amount was NaN, infinite, zero or negative.
    #[error("amount must be a finite number greater than zero, got {amount}")]
    InvalidAmount {
        /// The rejected amount.
        amount: f64,
    },
}

/// Server-assigned transaction identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TransactionId(String);

impl TransactionId {
    /// Validate and construct a [`TransactionId`].
    ///
    /// # Errors
    ///
    /// Returns [`TransactionValidationError::EmptyId`] for blank identifiers.
    pub fn new(id: impl Into<String>) -> Result<Self, TransactionValidationError> {
        let raw: String = id.into();
        if raw.trim().is_empty() {
            return Err(TransactionValidationError::EmptyId);
        }
        Ok(Self(raw))
    }
}

impl AsRef<str> for TransactionId {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for TransactionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Direction of money movement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TransactionKind {
    /// Money received.
    Income,
    /// Money spent.
    Expense,
}

impl TransactionKind {
    /// Stable upper-case label used in tables.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Income => "INCOME",
            Self::Expense => "EXPENSE",
        }
    }
}

impl fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TransactionKind {
    type Err = TransactionValidationError;

    /// Accepts `income`/`expense` in any case, plus the gateway's
    /// `RECEITA`/`DESPESA` literals.
    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw.trim().to_ascii_uppercase().as_str() {
            "INCOME" | "RECEITA" => Ok(Self::Income),
            "EXPENSE" | "DESPESA" => Ok(Self::Expense),
            _ => Err(TransactionValidationError::UnknownKind {
                raw: raw.to_owned(),
            }),
        }
    }
}

/// A transaction as listed by the gateway.
#[derive(Debug, Clone, PartialEq)]
pub struct Transaction {
    /// Server-assigned identifier.
    pub id: TransactionId,
    /// Owning person; integrity is enforced by the gateway only.
    pub person_id: PersonId,
    /// Income or expense.
    pub kind: TransactionKind,
    /// Free-text description.
    pub description: String,
    /// Monetary amount.
    pub amount: f64,
    /// Creation instant.
    pub created_at: DateTime<Utc>,
    /// Last update instant.
    pub updated_at: DateTime<Utc>,
}

/// Validated input for the create-transaction call.
#[derive(Debug, Clone, PartialEq)]
pub struct NewTransaction {
    person_id: PersonId,
    kind: TransactionKind,
    description: String,
    amount: f64,
}

impl NewTransaction {
    /// Construct create-transaction input.
    ///
    /// # Errors
    ///
    /// Rejects blank descriptions and amounts that are not finite and
    /// strictly positive.
    pub fn new(
        person_id: PersonId,
        kind: TransactionKind,
        description: impl AsRef<str>,
        amount: f64,
    ) -> Result<Self, TransactionValidationError> {
        let trimmed = description.as_ref().trim();
        if trimmed.is_empty() {
            return Err(TransactionValidationError::EmptyDescription);
        }
        if !amount.is_finite() || amount <= 0.0 {
            return Err(TransactionValidationError::InvalidAmount { amount });
        }
        Ok(Self {
            person_id,
            kind,
            description: trimmed.to_owned(),
            amount,
        })
    }

    /// Owning person.
    #[must_use]
    pub const fn person_id(&self) -> &PersonId {
        &self.person_id
    }

    /// Income or expense.
    #[must_use]
    pub const fn kind(&self) -> TransactionKind {
        self.kind
    }

    /// Trimmed description.
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Positive amount.
    #[must_use]
    pub const fn amount(&self) -> f64 {
        self.amount
    }
}
