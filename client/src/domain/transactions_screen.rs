//! Synchronization service for the Transactions screen.
//!
//! The screen shows three collections: people (for the name join and the
//! person picker), transactions and the gateway's totals. A refresh fetches
//! all three concurrently and swaps them in together once every fetch has
//! succeeded, so the view never mixes old totals with new transactions.

use std::sync::Arc;

use tracing::{debug, info};

use super::SyncResult;
use super::forms::TransactionForm;
use super::ports::{LedgerGateway, Notifier};
use super::sync::{audit_totals, reject_form, surface_gateway_failure};
use super::view_state::{LedgerView, SyncPhase};

/// Keeps the transactions ledger view in step with the gateway.
pub struct TransactionsScreen<G, N> {
    gateway: Arc<G>,
    notifier: Arc<N>,
    view: LedgerView,
}

impl<G, N> TransactionsScreen<G, N> {
    /// Create a screen with empty view state.
    #[must_use]
    pub fn new(gateway: Arc<G>, notifier: Arc<N>) -> Self {
        Self {
            gateway,
            notifier,
            view: LedgerView::default(),
        }
    }

    /// Current view state.
    #[must_use]
    pub const fn view(&self) -> &LedgerView {
        &self.view
    }
}

impl<G, N> TransactionsScreen<G, N>
where
    G: LedgerGateway,
    N: Notifier,
{
    /// Initial load performed when the screen opens.
    ///
    /// # Errors
    ///
    /// Same as [`Self::refresh`].
    pub async fn mount(&mut self) -> SyncResult {
        self.refresh().await
    }

    /// Fetch people, transactions and totals concurrently and replace all
    /// three snapshots at once.
    ///
    /// When any fetch fails nothing is replaced, one failure notification is
    /// issued and the first failure (in people, transactions, totals order)
    /// is returned.
    ///
    /// # Errors
    ///
    /// Returns the surfaced gateway failure.
    pub async fn refresh(&mut self) -> SyncResult {
        self.view.status_mut().begin(SyncPhase::Loading);
        let gateway = self.gateway.as_ref();
        let (people, transactions, totals) = tokio::join!(
            gateway.list_people(),
            gateway.list_transactions(),
            gateway.fetch_totals(),
        );

        match (people, transactions, totals) {
            (Ok(people), Ok(transactions), Ok(totals)) => {
                audit_totals(&totals);
                debug!(
                    people = people.len(),
                    transactions = transactions.len(),
                    "ledger snapshots replaced"
                );
                self.view.replace_all(people, transactions, totals);
                self.view.status_mut().succeed();
                Ok(())
            }
            (Err(failure), _, _) | (_, Err(failure), _) | (_, _, Err(failure)) => {
                let error = surface_gateway_failure(self.notifier.as_ref(), "refresh ledger", failure);
                self.view.status_mut().fail(error.clone());
                Err(error)
            }
        }
    }

    /// Replace only the people snapshot.
    ///
    /// # Errors
    ///
    /// Returns the surfaced gateway failure; the view keeps its snapshot.
    pub async fn load_people(&mut self) -> SyncResult {
        self.view.status_mut().begin(SyncPhase::Loading);
        match self.gateway.list_people().await {
            Ok(people) => {
                self.view.replace_people(people);
                self.view.status_mut().succeed();
                Ok(())
            }
            Err(failure) => {
                let error = surface_gateway_failure(self.notifier.as_ref(), "load people", failure);
                self.view.status_mut().fail(error.clone());
                Err(error)
            }
        }
    }

    /// Replace only the transactions snapshot.
    ///
    /// # Errors
    ///
    /// Returns the surfaced gateway failure; the view keeps its snapshot.
    pub async fn load_transactions(&mut self) -> SyncResult {
        self.view.status_mut().begin(SyncPhase::Loading);
        match self.gateway.list_transactions().await {
            Ok(transactions) => {
                self.view.replace_transactions(transactions);
                self.view.status_mut().succeed();
                Ok(())
            }
            Err(failure) => {
                let error =
                    surface_gateway_failure(self.notifier.as_ref(), "load transactions", failure);
                self.view.status_mut().fail(error.clone());
                Err(error)
            }
        }
    }

    /// Replace only the totals snapshot.
    ///
    /// # Errors
    ///
    /// Returns the surfaced gateway failure; the view keeps its snapshot.
    pub async fn load_totals(&mut self) -> SyncResult {
        self.view.status_mut().begin(SyncPhase::Loading);
        match self.gateway.fetch_totals().await {
            Ok(totals) => {
                audit_totals(&totals);
                self.view.replace_totals(totals);
                self.view.status_mut().succeed();
                Ok(())
            }
            Err(failure) => {
                let error = surface_gateway_failure(self.notifier.as_ref(), "load totals", failure);
                self.view.status_mut().fail(error.clone());
                Err(error)
            }
        }
    }

    /// Validate and record a transaction, then refresh every snapshot.
    ///
    /// The person reference is not checked against the loaded people; the
    /// gateway owns referential integrity.
    ///
    /// # Errors
    ///
    /// Returns an `InvalidRequest` error for rejected forms, or the surfaced
    /// gateway failure of the create call or the refresh.
    pub async fn submit_transaction(&mut self, form: &TransactionForm) -> SyncResult {
        let transaction = match form.validate() {
            Ok(transaction) => transaction,
            Err(failure) => {
                let error = reject_form(self.notifier.as_ref(), failure);
                self.view.status_mut().fail(error.clone());
                return Err(error);
            }
        };

        self.view.status_mut().begin(SyncPhase::Submitting);
        if let Err(failure) = self.gateway.create_transaction(&transaction).await {
            let error =
                surface_gateway_failure(self.notifier.as_ref(), "save transaction", failure);
            self.view.status_mut().fail(error.clone());
            return Err(error);
        }
        info!(
            person_id = %transaction.person_id(),
            kind = %transaction.kind(),
            amount = transaction.amount(),
            "transaction created"
        );
        self.refresh().await
    }
}
