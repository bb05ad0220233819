//! Domain primitives, ports and screen synchronization services.
//!
//! Purpose: describe the people registry and transactions ledger as the
//! client sees them, independent of HTTP or terminal concerns. Snapshots
//! held by the view state are transient copies of gateway data; every
//! successful fetch replaces them wholesale.
//!
//! Public surface:
//! - DomainError / ErrorCode: transport-agnostic failure reported by the screens.
//! - Person, Transaction, AggregateTotals: gateway records.
//! - PersonForm, TransactionForm: raw form input validated before any call.
//! - PeopleScreen, TransactionsScreen: synchronization controllers.

pub mod error;
pub mod forms;
pub mod person;
pub mod ports;
pub mod totals;
pub mod transaction;
pub mod view_state;

mod people_screen;
mod sync;
mod transactions_screen;

pub use self::error::{DomainError, DomainErrorValidationError, ErrorCode};
pub use self::forms::{FormError, PersonForm, TransactionForm};
pub use self::people_screen::PeopleScreen;
pub use self::person::{NewPerson, Person, PersonId, PersonValidationError};
pub use self::totals::{AggregateTotals, PersonTotals, TOTALS_TOLERANCE, TotalsInconsistency};
pub use self::transaction::{
    NewTransaction, Transaction, TransactionId, TransactionKind, TransactionValidationError,
};
pub use self::transactions_screen::TransactionsScreen;
pub use self::view_state::{LedgerView, PeopleView, SyncPhase, SyncStatus};

/// Result alias used by the screen services.
pub type SyncResult<T = ()> = Result<T, DomainError>;
