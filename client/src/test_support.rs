//! Test doubles shared by unit tests (in `src/`) and integration tests (in
//! `tests/`).
//!
//! Compiled for tests and behind the `test-support` feature.

use std::collections::{HashMap, VecDeque};
use std::sync::{Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;
use chrono::{DateTime, TimeDelta, Utc};

use crate::domain::ports::{GatewayError, LedgerGateway, Notification, Notifier};
use crate::domain::{
    AggregateTotals, NewPerson, NewTransaction, Person, PersonId, PersonTotals, Transaction,
    TransactionId, TransactionKind,
};

// 2024-05-01T12:00:00Z
const EPOCH_SECONDS: i64 = 1_714_564_800;

/// Gateway operations, as recorded by [`InMemoryLedgerGateway`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GatewayCall {
    /// `list_people`
    ListPeople,
    /// `create_person`
    CreatePerson,
    /// `delete_person`
    DeletePerson,
    /// `list_transactions`
    ListTransactions,
    /// `create_transaction`
    CreateTransaction,
    /// `fetch_totals`
    FetchTotals,
}

#[derive(Default)]
struct LedgerState {
    people: Vec<Person>,
    transactions: Vec<Transaction>,
    next_id: u32,
    calls: Vec<GatewayCall>,
    failures: HashMap<GatewayCall, VecDeque<GatewayError>>,
}

impl LedgerState {
    fn next_stamp(&mut self) -> (u32, DateTime<Utc>) {
        self.next_id += 1;
        let base = DateTime::<Utc>::from_timestamp(EPOCH_SECONDS, 0)
            .unwrap_or(DateTime::<Utc>::UNIX_EPOCH);
        (self.next_id, base + TimeDelta::minutes(i64::from(self.next_id)))
    }

    fn take_failure(&mut self, call: GatewayCall) -> Result<(), GatewayError> {
        self.calls.push(call);
        match self.failures.get_mut(&call).and_then(VecDeque::pop_front) {
            Some(error) => Err(error),
            None => Ok(()),
        }
    }

    #[expect(clippy::float_arithmetic, reason = "in-memory totals are summed from stored amounts")]
    fn totals(&self) -> AggregateTotals {
        let people: Vec<PersonTotals> = self
            .people
            .iter()
            .map(|person| {
                let (income, expense) = self
                    .transactions
                    .iter()
                    .filter(|transaction| transaction.person_id == person.id)
                    .fold((0.0, 0.0), |(income, expense), transaction| {
                        match transaction.kind {
                            TransactionKind::Income => (income + transaction.amount, expense),
                            TransactionKind::Expense => (income, expense + transaction.amount),
                        }
                    });
                PersonTotals {
                    person_id: person.id.clone(),
                    person_name: person.name.clone(),
                    income,
                    expense,
                    balance: income - expense,
                }
            })
            .collect();
        let total_income = people.iter().map(|row| row.income).sum::<f64>();
        let total_expense = people.iter().map(|row| row.expense).sum::<f64>();
        AggregateTotals {
            people,
            total_income,
            total_expense,
            total_balance: total_income - total_expense,
        }
    }
}

/// Gateway keeping people and transactions in memory.
///
/// Identifiers are `p<n>` and `t<n>` from one shared counter. Totals are
/// computed from the stored records. Failures can be queued per operation
/// with [`Self::fail_next`].
#[derive(Default)]
pub struct InMemoryLedgerGateway {
    state: Mutex<LedgerState>,
}

impl InMemoryLedgerGateway {
    /// Empty gateway.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, LedgerState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Store a person directly, bypassing the call log.
    pub fn seed_person(&self, name: &str, age: u32) -> PersonId {
        let mut state = self.lock();
        let (n, at) = state.next_stamp();
        let id = person_id(n);
        state.people.push(Person {
            id: id.clone(),
            name: name.to_owned(),
            age,
            created_at: at,
            updated_at: at,
        });
        id
    }

    /// Store a transaction directly, bypassing the call log.
    pub fn seed_transaction(
        &self,
        person_id: &PersonId,
        kind: TransactionKind,
        description: &str,
        amount: f64,
    ) -> TransactionId {
        let mut state = self.lock();
        let (n, at) = state.next_stamp();
        let id = transaction_id(n);
        state.transactions.push(Transaction {
            id: id.clone(),
            person_id: person_id.clone(),
            kind,
            description: description.to_owned(),
            amount,
            created_at: at,
            updated_at: at,
        });
        id
    }

    /// Make the next `call` fail with `error`. Queued failures are consumed
    /// in order.
    pub fn fail_next(&self, call: GatewayCall, error: GatewayError) {
        self.lock()
            .failures
            .entry(call)
            .or_default()
            .push_back(error);
    }

    /// Every call received so far, in order.
    #[must_use]
    pub fn calls(&self) -> Vec<GatewayCall> {
        self.lock().calls.clone()
    }

    /// Number of calls of one kind received so far.
    #[must_use]
    pub fn call_count(&self, call: GatewayCall) -> usize {
        self.lock().calls.iter().filter(|seen| **seen == call).count()
    }

    /// Stored people.
    #[must_use]
    pub fn people(&self) -> Vec<Person> {
        self.lock().people.clone()
    }
}

fn person_id(n: u32) -> PersonId {
    match PersonId::new(format!("p{n}")) {
        Ok(id) => id,
        Err(error) => panic!("generated person id p{n} rejected: {error}"),
    }
}

fn transaction_id(n: u32) -> TransactionId {
    match TransactionId::new(format!("t{n}")) {
        Ok(id) => id,
        Err(error) => panic!("generated transaction id t{n} rejected: {error}"),
    }
}

#[async_trait]
impl LedgerGateway for InMemoryLedgerGateway {
    async fn list_people(&self) -> Result<Vec<Person>, GatewayError> {
        let mut state = self.lock();
        state.take_failure(GatewayCall::ListPeople)?;
        Ok(state.people.clone())
    }

    async fn create_person(&self, person: &NewPerson) -> Result<(), GatewayError> {
        let mut state = self.lock();
        state.take_failure(GatewayCall::CreatePerson)?;
        let (n, at) = state.next_stamp();
        state.people.push(Person {
            id: person_id(n),
            name: person.name().to_owned(),
            age: person.age(),
            created_at: at,
            updated_at: at,
        });
        Ok(())
    }

    async fn delete_person(&self, id: &PersonId) -> Result<(), GatewayError> {
        let mut state = self.lock();
        state.take_failure(GatewayCall::DeletePerson)?;
        let before = state.people.len();
        state.people.retain(|person| &person.id != id);
        if state.people.len() == before {
            return Err(GatewayError::not_found(format!("person {id}")));
        }
        state
            .transactions
            .retain(|transaction| &transaction.person_id != id);
        Ok(())
    }

    async fn list_transactions(&self) -> Result<Vec<Transaction>, GatewayError> {
        let mut state = self.lock();
        state.take_failure(GatewayCall::ListTransactions)?;
        Ok(state.transactions.clone())
    }

    async fn create_transaction(&self, transaction: &NewTransaction) -> Result<(), GatewayError> {
        let mut state = self.lock();
        state.take_failure(GatewayCall::CreateTransaction)?;
        let (n, at) = state.next_stamp();
        state.transactions.push(Transaction {
            id: transaction_id(n),
            person_id: transaction.person_id().clone(),
            kind: transaction.kind(),
            description: transaction.description().to_owned(),
            amount: transaction.amount(),
            created_at: at,
            updated_at: at,
        });
        Ok(())
    }

    async fn fetch_totals(&self) -> Result<AggregateTotals, GatewayError> {
        let mut state = self.lock();
        state.take_failure(GatewayCall::FetchTotals)?;
        Ok(state.totals())
    }
}

/// Notifier keeping every notification for later inspection.
#[derive(Default)]
pub struct RecordingNotifier {
    notifications: Mutex<Vec<Notification>>,
}

impl RecordingNotifier {
    /// Notifier with nothing recorded.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Everything recorded so far, in order.
    #[must_use]
    pub fn notifications(&self) -> Vec<Notification> {
        self.notifications
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Number of validation notices recorded.
    #[must_use]
    pub fn validation_count(&self) -> usize {
        self.notifications()
            .iter()
            .filter(|notification| matches!(notification, Notification::Validation { .. }))
            .count()
    }

    /// Number of failure notices recorded.
    #[must_use]
    pub fn failure_count(&self) -> usize {
        self.notifications()
            .iter()
            .filter(|notification| matches!(notification, Notification::Failure { .. }))
            .count()
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, notification: Notification) {
        self.notifications
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(notification);
    }
}
