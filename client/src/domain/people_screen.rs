//! Synchronization service for the People screen.

use std::sync::Arc;

use tracing::{debug, info};

use super::SyncResult;
use super::forms::PersonForm;
use super::person::PersonId;
use super::ports::{LedgerGateway, Notifier};
use super::sync::{reject_form, surface_gateway_failure};
use super::view_state::{PeopleView, SyncPhase};

/// Keeps the people registry view in step with the gateway.
///
/// Every successful mutation is followed by a reload of the people list;
/// the view is never patched locally.
pub struct PeopleScreen<G, N> {
    gateway: Arc<G>,
    notifier: Arc<N>,
    view: PeopleView,
}

impl<G, N> PeopleScreen<G, N> {
    /// Create a screen with empty view state.
    #[must_use]
    pub fn new(gateway: Arc<G>, notifier: Arc<N>) -> Self {
        Self {
            gateway,
            notifier,
            view: PeopleView::default(),
        }
    }

    /// Current view state.
    #[must_use]
    pub const fn view(&self) -> &PeopleView {
        &self.view
    }
}

impl<G, N> PeopleScreen<G, N>
where
    G: LedgerGateway,
    N: Notifier,
{
    /// Initial load performed when the screen opens.
    ///
    /// # Errors
    ///
    /// Returns the surfaced gateway failure; the view keeps its snapshot.
    pub async fn mount(&mut self) -> SyncResult {
        self.refresh().await
    }

    /// Re-fetch everything the screen shows.
    ///
    /// # Errors
    ///
    /// Returns the surfaced gateway failure; the view keeps its snapshot.
    pub async fn refresh(&mut self) -> SyncResult {
        self.load_people().await
    }

    /// Replace the people snapshot with the gateway's list.
    ///
    /// # Errors
    ///
    /// Returns the surfaced gateway failure; the view keeps its snapshot.
    pub async fn load_people(&mut self) -> SyncResult {
        self.view.status_mut().begin(SyncPhase::Loading);
        match self.gateway.list_people().await {
            Ok(people) => {
                debug!(count = people.len(), "people snapshot replaced");
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

    /// Validate and register a person, then reload the list.
    ///
    /// Invalid input produces one validation notification and no gateway
    /// call.
    ///
    /// # Errors
    ///
    /// Returns an `InvalidRequest` error for rejected forms, or the surfaced
    /// gateway failure of the create call or the reload.
    pub async fn submit_person(&mut self, form: &PersonForm) -> SyncResult {
        let person = match form.validate() {
            Ok(person) => person,
            Err(failure) => {
                let error = reject_form(self.notifier.as_ref(), failure);
                self.view.status_mut().fail(error.clone());
                return Err(error);
            }
        };

        self.view.status_mut().begin(SyncPhase::Submitting);
        if let Err(failure) = self.gateway.create_person(&person).await {
            let error = surface_gateway_failure(self.notifier.as_ref(), "save person", failure);
            self.view.status_mut().fail(error.clone());
            return Err(error);
        }
        info!(name = person.name(), age = person.age(), "person created");
        self.refresh().await
    }

    /// Delete a person, then reload the list.
    ///
    /// # Errors
    ///
    /// Returns the surfaced gateway failure of the delete call or the reload.
    pub async fn delete_person(&mut self, id: &PersonId) -> SyncResult {
        self.view.status_mut().begin(SyncPhase::Submitting);
        if let Err(failure) = self.gateway.delete_person(id).await {
            let error = surface_gateway_failure(self.notifier.as_ref(), "delete person", failure);
            self.view.status_mut().fail(error.clone());
            return Err(error);
        }
        info!(%id, "person deleted");
        self.refresh().await
    }
}
