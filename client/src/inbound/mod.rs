//! Inbound adapters: the command-line front end and its text rendering.
//!
//! Nothing here touches the outbound gateway directly; the binary injects a
//! `LedgerGateway` implementation.

pub mod cli;
mod notifier;
pub mod render;

pub use notifier::TerminalNotifier;
