//! Per-screen view state.
//!
//! Each screen owns one container. Snapshots are only ever replaced whole;
//! there are no partial update methods.

use super::error::DomainError;
use super::person::Person;
use super::totals::AggregateTotals;
use super::transaction::Transaction;

/// Where a screen is in its synchronization cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SyncPhase {
    /// No gateway call in flight.
    #[default]
    Idle,
    /// Fetching snapshots.
    Loading,
    /// Sending a mutation.
    Submitting,
}

/// Phase plus the most recent surfaced failure.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SyncStatus {
    phase: SyncPhase,
    last_failure: Option<DomainError>,
}

impl SyncStatus {
    /// Current phase.
    #[must_use]
    pub const fn phase(&self) -> SyncPhase {
        self.phase
    }

    /// Failure of the latest operation, if it failed.
    #[must_use]
    pub const fn last_failure(&self) -> Option<&DomainError> {
        self.last_failure.as_ref()
    }

    pub(crate) fn begin(&mut self, phase: SyncPhase) {
        self.phase = phase;
    }

    pub(crate) fn succeed(&mut self) {
        self.phase = SyncPhase::Idle;
        self.last_failure = None;
    }

    pub(crate) fn fail(&mut self, error: DomainError) {
        self.phase = SyncPhase::Idle;
        self.last_failure = Some(error);
    }
}

/// View state of the People screen.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PeopleView {
    people: Vec<Person>,
    status: SyncStatus,
}

impl PeopleView {
    /// People in gateway order.
    #[must_use]
    pub fn people(&self) -> &[Person] {
        &self.people
    }

    /// Synchronization status.
    #[must_use]
    pub const fn status(&self) -> &SyncStatus {
        &self.status
    }

    pub(crate) const fn status_mut(&mut self) -> &mut SyncStatus {
        &mut self.status
    }

    pub(crate) fn replace_people(&mut self, people: Vec<Person>) {
        self.people = people;
    }
}

/// View state of the Transactions screen.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct LedgerView {
    people: Vec<Person>,
    transactions: Vec<Transaction>,
    totals: Option<AggregateTotals>,
    status: SyncStatus,
}

impl LedgerView {
    /// People in gateway order.
    #[must_use]
    pub fn people(&self) -> &[Person] {
        &self.people
    }

    /// Transactions in gateway order.
    #[must_use]
    pub fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }

    /// Latest totals, absent until the first successful fetch.
    #[must_use]
    pub const fn totals(&self) -> Option<&AggregateTotals> {
        self.totals.as_ref()
    }

    /// Synchronization status.
    #[must_use]
    pub const fn status(&self) -> &SyncStatus {
        &self.status
    }

    pub(crate) const fn status_mut(&mut self) -> &mut SyncStatus {
        &mut self.status
    }

    pub(crate) fn replace_people(&mut self, people: Vec<Person>) {
        self.people = people;
    }

    pub(crate) fn replace_transactions(&mut self, transactions: Vec<Transaction>) {
        self.transactions = transactions;
    }

    pub(crate) fn replace_totals(&mut self, totals: AggregateTotals) {
        self.totals = Some(totals);
    }

    pub(crate) fn replace_all(
        &mut self,
        people: Vec<Person>,
        transactions: Vec<Transaction>,
        totals: AggregateTotals,
    ) {
        self.people = people;
        self.transactions = transactions;
        self.totals = Some(totals);
    }
}
