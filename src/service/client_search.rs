use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use thiserror::Error;
use tokio::time::sleep;
use tracing::{debug, warn};

use crate::error::Result;
use crate::models::client::{ClientRecord, PetRecord};

pub const MIN_QUERY_CHARS: usize = 2;
pub const SEARCH_FAILED_MESSAGE: &str = "Error al buscar clientes";
pub const NO_CLIENTS_MESSAGE: &str = "No se encontraron clientes";
pub const NO_PETS_MESSAGE: &str = "Este cliente no tiene mascotas registradas";

#[async_trait]
pub trait ClientSearchApi: Send + Sync {
    async fn search_clients(&self, query: &str) -> Result<Vec<ClientRecord>>;
    /// The client with its current active pets.
    async fn client_pets(&self, client_id: u64) -> Result<ClientRecord>;
}

/// Display lines for one search result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientCard {
    pub client: ClientRecord,
    pub title: String,
    pub contact_line: String,
    pub pets_badge: String,
}

impl ClientCard {
    pub fn from_record(client: ClientRecord) -> Self {
        let pets = client.mascotas.len();
        let noun = if pets == 1 { "mascota" } else { "mascotas" };
        Self {
            title: client.nombre_completo.clone(),
            contact_line: format!("{} | {}", client.email, client.telefono),
            pets_badge: format!("{} {}", pets, noun),
            client,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchOutcome {
    /// Query too short; results area is emptied.
    Cleared,
    /// A newer keystroke took over; leave the results area alone.
    Superseded,
    NoResults,
    Results(Vec<ClientCard>),
    Failed(String),
}

/// Debounced search where only the most recent input may publish results.
pub struct ClientSearch {
    api: Arc<dyn ClientSearchApi>,
    debounce: Duration,
    latest: AtomicU64,
}

impl ClientSearch {
    pub fn new(api: Arc<dyn ClientSearchApi>, debounce: Duration) -> Self {
        Self {
            api,
            debounce,
            latest: AtomicU64::new(0),
        }
    }

    fn is_current(&self, seq: u64) -> bool {
        self.latest.load(Ordering::SeqCst) == seq
    }

    pub async fn on_input(&self, raw: &str) -> SearchOutcome {
        let seq = self.latest.fetch_add(1, Ordering::SeqCst) + 1;
        let query = raw.trim();
        if query.chars().count() < MIN_QUERY_CHARS {
            return SearchOutcome::Cleared;
        }

        sleep(self.debounce).await;
        if !self.is_current(seq) {
            return SearchOutcome::Superseded;
        }

        let response = self.api.search_clients(query).await;
        if !self.is_current(seq) {
            debug!(seq, query, "Dropping stale client search response");
            return SearchOutcome::Superseded;
        }

        match response {
            Ok(clients) if clients.is_empty() => SearchOutcome::NoResults,
            Ok(clients) => {
                SearchOutcome::Results(clients.into_iter().map(ClientCard::from_record).collect())
            }
            Err(err) => {
                warn!(query, error = %err, "Client search failed");
                SearchOutcome::Failed(SEARCH_FAILED_MESSAGE.to_string())
            }
        }
    }

    /// Invalidates any pending search, as clearing the box does.
    pub fn clear(&self) {
        self.latest.fetch_add(1, Ordering::SeqCst);
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BookingStage {
    SearchingClient,
    ChoosingPet,
    FillingForm,
}

#[derive(Error, Debug, PartialEq, Eq)]
pub enum SelectionError {
    #[error("No client selected")]
    NoClient,
    #[error("Pet {0} does not belong to the selected client")]
    UnknownPet(u64),
}

/// Client and pet picked for a manual booking; feeds the hidden form fields.
#[derive(Debug, Clone, Default)]
pub struct ManualBookingSelection {
    client: Option<ClientRecord>,
    pet_id: Option<u64>,
}

impl ManualBookingSelection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn stage(&self) -> BookingStage {
        match (&self.client, self.pet_id) {
            (None, _) => BookingStage::SearchingClient,
            (Some(_), None) => BookingStage::ChoosingPet,
            (Some(_), Some(_)) => BookingStage::FillingForm,
        }
    }

    pub fn client(&self) -> Option<&ClientRecord> {
        self.client.as_ref()
    }

    pub fn pet(&self) -> Option<&PetRecord> {
        let client = self.client.as_ref()?;
        client.pet(self.pet_id?)
    }

    pub fn has_pets(&self) -> bool {
        self.client
            .as_ref()
            .is_some_and(|client| !client.mascotas.is_empty())
    }

    pub fn select_client(&mut self, client: ClientRecord) {
        self.client = Some(client);
        self.pet_id = None;
    }

    pub fn select_pet(&mut self, pet_id: u64) -> std::result::Result<&PetRecord, SelectionError> {
        let client = self.client.as_ref().ok_or(SelectionError::NoClient)?;
        let pet = client.pet(pet_id).ok_or(SelectionError::UnknownPet(pet_id))?;
        self.pet_id = Some(pet_id);
        Ok(pet)
    }

    pub fn change_client(&mut self) {
        self.client = None;
        self.pet_id = None;
    }

    /// `(cliente_id, mascota_id)` once both are chosen.
    pub fn hidden_fields(&self) -> Option<(u64, u64)> {
        let client = self.client.as_ref()?;
        Some((client.id, self.pet_id?))
    }

    /// Refetches the selected client's pets, dropping a pet that is gone.
    pub async fn reload_pets(&mut self, api: &dyn ClientSearchApi) -> Result<()> {
        let Some(current) = self.client.as_ref() else {
            return Ok(());
        };
        let refreshed = api.client_pets(current.id).await?;
        if let Some(pet_id) = self.pet_id {
            if refreshed.pet(pet_id).is_none() {
                self.pet_id = None;
            }
        }
        self.client = Some(refreshed);
        Ok(())
    }
}
