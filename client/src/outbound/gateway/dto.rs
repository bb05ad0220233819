//! Wire DTOs for the gateway's JSON payloads.
//!
//! Responses decode into these shapes first and then map into domain records
//! in one pass, so wire literals such as `RECEITA` never leak past the
//! adapter.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::{
    AggregateTotals, NewPerson, NewTransaction, Person, PersonId, PersonTotals, Transaction,
    TransactionId, TransactionKind,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
pub(super) enum TransactionKindDto {
    #[serde(rename = "RECEITA")]
    Income,
    #[serde(rename = "DESPESA")]
    Expense,
}

impl From<TransactionKind> for TransactionKindDto {
    fn from(kind: TransactionKind) -> Self {
        match kind {
            TransactionKind::Income => Self::Income,
            TransactionKind::Expense => Self::Expense,
        }
    }
}

impl From<TransactionKindDto> for TransactionKind {
    fn from(kind: TransactionKindDto) -> Self {
        match kind {
            TransactionKindDto::Income => Self::Income,
            TransactionKindDto::Expense => Self::Expense,
        }
    }
}

#[derive(Debug, Deserialize)]
pub(super) struct PersonDto {
    pub(super) id: String,
    pub(super) name: String,
    pub(super) age: u32,
    pub(super) created_at: DateTime<Utc>,
    pub(super) updated_at: DateTime<Utc>,
}

impl PersonDto {
    pub(super) fn into_domain(self) -> Result<Person, String> {
        let id = PersonId::new(self.id).map_err(|error| format!("person id: {error}"))?;
        Ok(Person {
            id,
            name: self.name,
            age: self.age,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}

#[derive(Debug, Deserialize)]
pub(super) struct TransactionDto {
    pub(super) id: String,
    pub(super) person_id: String,
    #[serde(rename = "type")]
    pub(super) kind: TransactionKindDto,
    pub(super) description: String,
    pub(super) amount: f64,
    pub(super) created_at: DateTime<Utc>,
    pub(super) updated_at: DateTime<Utc>,
}

impl TransactionDto {
    pub(super) fn into_domain(self) -> Result<Transaction, String> {
        let id =
            TransactionId::new(self.id).map_err(|error| format!("transaction id: {error}"))?;
        let person_id = PersonId::new(self.person_id).map_err(|error| {
            format!("transaction {id} person id: {error}")
        })?;
        if !self.amount.is_finite() {
            return Err(format!("transaction {id} has a non-finite amount"));
        }
        Ok(Transaction {
            id,
            person_id,
            kind: self.kind.into(),
            description: self.description,
            amount: self.amount,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}

#[derive(Debug, Deserialize)]
pub(super) struct PersonTotalsDto {
    pub(super) person_id: String,
    pub(super) person_name: String,
    pub(super) person_income: f64,
    pub(super) person_expense: f64,
    pub(super) person_total_amount: f64,
}

#[derive(Debug, Deserialize)]
pub(super) struct TotalsDto {
    #[serde(default)]
    pub(super) people_total: Vec<PersonTotalsDto>,
    pub(super) total_income: f64,
    pub(super) total_expense: f64,
    pub(super) total_amount: f64,
}

impl TotalsDto {
    pub(super) fn into_domain(self) -> Result<AggregateTotals, String> {
        let people = self
            .people_total
            .into_iter()
            .map(|row| {
                let person_id = PersonId::new(row.person_id)
                    .map_err(|error| format!("totals person id: {error}"))?;
                Ok(PersonTotals {
                    person_id,
                    person_name: row.person_name,
                    income: row.person_income,
                    expense: row.person_expense,
                    balance: row.person_total_amount,
                })
            })
            .collect::<Result<Vec<_>, String>>()?;
        Ok(AggregateTotals {
            people,
            total_income: self.total_income,
            total_expense: self.total_expense,
            total_balance: self.total_amount,
        })
    }
}

#[derive(Debug, Serialize)]
pub(super) struct CreatePersonRequest<'a> {
    pub(super) name: &'a str,
    pub(super) age: u32,
}

impl<'a> From<&'a NewPerson> for CreatePersonRequest<'a> {
    fn from(person: &'a NewPerson) -> Self {
        Self {
            name: person.name(),
            age: person.age(),
        }
    }
}

#[derive(Debug, Serialize)]
pub(super) struct CreateTransactionRequest<'a> {
    pub(super) person_id: &'a str,
    #[serde(rename = "type")]
    pub(super) kind: TransactionKindDto,
    pub(super) description: &'a str,
    pub(super) amount: f64,
}

impl<'a> From<&'a NewTransaction> for CreateTransactionRequest<'a> {
    fn from(transaction: &'a NewTransaction) -> Self {
        Self {
            person_id: transaction.person_id().as_ref(),
            kind: transaction.kind().into(),
            description: transaction.description(),
            amount: transaction.amount(),
        }
    }
}
