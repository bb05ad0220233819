//! Client for the household people registry and transactions ledger.
//!
//! The crate is laid out hexagonally:
//!
//! - [`domain`] owns the entities, the gateway and notifier ports, the
//!   per-screen view state and the synchronization services that keep the
//!   view state in step with the remote gateway.
//! - [`outbound`] implements the gateway port over HTTP/JSON.
//! - [`inbound`] drives the screens from the command line and renders their
//!   view state as text tables.
//!
//! [`config`] resolves where the gateway lives and [`telemetry`] decides
//! which structured logs reach stderr.
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//!
//! use ledger_client::domain::ports::FixtureLedgerGateway;
//! use ledger_client::domain::PeopleScreen;
//! use ledger_client::inbound::TerminalNotifier;
//!
//! # tokio::runtime::Builder::new_current_thread().build().map(|rt| rt.block_on(async {
//! let mut screen = PeopleScreen::new(
//!     Arc::new(FixtureLedgerGateway),
//!     Arc::new(TerminalNotifier::new(std::io::sink())),
//! );
//! screen.mount().await.expect("fixture gateway never fails");
//! assert!(screen.view().people().is_empty());
//! # })).expect("runtime");
//! ```

pub mod config;
pub mod domain;
pub mod inbound;
pub mod outbound;
pub mod telemetry;
#[cfg(any(test, feature = "test-support"))]
pub mod test_support;
