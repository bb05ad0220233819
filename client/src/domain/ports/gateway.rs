//! Driven port for the remote people and transactions gateway.
//!
//! The domain owns the record shapes; adapters own the wire format. Create
//! calls return nothing because every successful mutation is followed by a
//! full re-fetch.

use async_trait::async_trait;

use super::define_port_error;
use crate::domain::{AggregateTotals, NewPerson, NewTransaction, Person, PersonId, Transaction};

define_port_error! {
    /// Errors surfaced while calling the gateway.
    pub enum GatewayError {
        /// Network transport failed before a response arrived.
        Transport {
            /// Detail from the adapter.
            message: String,
        } =>
            "gateway transport failed: {message}",
        /// The call exceeded its timeout.
        Timeout {
            /// Detail from the adapter.
            message: String,
        } =>
            "gateway timeout: {message}",
        /// The gateway asked the client to slow down.
        RateLimited {
            /// Detail from the adapter.
            message: String,
        } =>
            "gateway rate limited request: {message}",
        /// The gateway does not know the addressed record.
        NotFound {
            /// Detail from the adapter.
            message: String,
        } =>
            "gateway record not found: {message}",
        /// The gateway rejected the request as invalid.
        Rejected {
            /// Detail from the adapter.
            message: String,
        } =>
            "gateway rejected request: {message}",
        /// The gateway failed internally.
        Server {
            /// Detail from the adapter.
            message: String,
        } =>
            "gateway server error: {message}",
        /// The response body could not be decoded.
        Decode {
            /// Detail from the adapter.
            message: String,
        } =>
            "gateway response decode failed: {message}",
        /// The adapter refused to build the request.
        InvalidRequest {
            /// Detail from the adapter.
            message: String,
        } =>
            "gateway request invalid: {message}",
    }
}

impl GatewayError {
    /// Return whether retrying this error is expected to help.
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        matches!(
            self,
            Self::Transport { .. }
                | Self::Timeout { .. }
                | Self::RateLimited { .. }
                | Self::Server { .. }
        )
    }
}

/// Port for listing and mutating gateway records.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LedgerGateway: Send + Sync {
    /// List every person in gateway order.
    ///
    /// # Examples
    ///
    /// ```rust,ignore
    /// use ledger_client::domain::ports::{FixtureLedgerGateway, LedgerGateway};
    ///
    /// let people = FixtureLedgerGateway.list_people().await?;
    /// assert!(people.is_empty());
    /// # Ok::<(), ledger_client::domain::ports::GatewayError>(())
    /// ```
    async fn list_people(&self) -> Result<Vec<Person>, GatewayError>;

    /// Register a person.
    async fn create_person(&self, person: &NewPerson) -> Result<(), GatewayError>;

    /// Delete a person by identifier.
    async fn delete_person(&self, id: &PersonId) -> Result<(), GatewayError>;

    /// List every transaction in gateway order.
    async fn list_transactions(&self) -> Result<Vec<Transaction>, GatewayError>;

    /// Record a transaction.
    async fn create_transaction(&self, transaction: &NewTransaction) -> Result<(), GatewayError>;

    /// Fetch the gateway-computed totals.
    async fn fetch_totals(&self) -> Result<AggregateTotals, GatewayError>;
}

/// Fixture implementation with no records that accepts every mutation.
#[derive(Debug, Clone, Copy, Default)]
pub struct FixtureLedgerGateway;

#[async_trait]
impl LedgerGateway for FixtureLedgerGateway {
    async fn list_people(&self) -> Result<Vec<Person>, GatewayError> {
        Ok(Vec::new())
    }

    async fn create_person(&self, _person: &NewPerson) -> Result<(), GatewayError> {
        Ok(())
    }

    async fn delete_person(&self, _id: &PersonId) -> Result<(), GatewayError> {
        Ok(())
    }

    async fn list_transactions(&self) -> Result<Vec<Transaction>, GatewayError> {
        Ok(Vec::new())
    }

    async fn create_transaction(&self, _transaction: &NewTransaction) -> Result<(), GatewayError> {
        Ok(())
    }

    async fn fetch_totals(&self) -> Result<AggregateTotals, GatewayError> {
        Ok(AggregateTotals::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case::transport(GatewayError::transport("reset"), true)]
    #[case::timeout(GatewayError::timeout("slow"), true)]
    #[case::rate_limited(GatewayError::rate_limited("429"), true)]
    #[case::server(GatewayError::server("500"), true)]
    #[case::not_found(GatewayError::not_found("404"), false)]
    #[case::rejected(GatewayError::rejected("400"), false)]
    #[case::decode(GatewayError::decode("bad json"), false)]
    #[case::invalid(GatewayError::invalid_request("bad url"), false)]
    fn retryability_follows_failure_kind(#[case] error: GatewayError, #[case] retryable: bool) {
        assert_eq!(error.is_retryable(), retryable);
    }

    #[tokio::test]
    async fn fixture_gateway_is_empty() {
        let gateway = FixtureLedgerGateway;
        assert!(gateway.list_people().await.expect("people").is_empty());
        assert!(gateway.list_transactions().await.expect("transactions").is_empty());
        assert_eq!(
            gateway.fetch_totals().await.expect("totals"),
            AggregateTotals::default()
        );
    }
}
