//! Domain ports for the hexagonal boundary.

mod macros;
pub(crate) use macros::define_port_error;

mod gateway;
mod notifier;

#[cfg(test)]
pub use gateway::MockLedgerGateway;
pub use gateway::{FixtureLedgerGateway, GatewayError, LedgerGateway};
#[cfg(test)]
pub use notifier::MockNotifier;
pub use notifier::{Notification, Notifier};
