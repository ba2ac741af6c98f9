use async_trait::async_trait;
use reqwest::{StatusCode, Url};
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::config::parse_base_url;
use crate::error::{BookingError, Result};
use crate::models::breed::Breed;
use crate::models::calendar_event::CalendarEvent;
use crate::models::client::{ClientPetsResponse, ClientRecord, ClientSearchResponse};
use crate::service::breed_service::BreedApi;
use crate::service::calendar_feed::CalendarFeedApi;
use crate::service::client_search::ClientSearchApi;

const CLIENT_SEARCH_PATH: &str = "turnos/api/buscar-clientes/";
const BREEDS_PATH: &str = "mascotas/ajax/cargar-razas/";

/// Read-only HTTP access to the booking server's JSON endpoints.
#[derive(Debug, Clone)]
pub struct BookingClient {
    http: reqwest::Client,
    base_url: Url,
}

impl BookingClient {
    pub fn new(base_url: &str) -> Result<Self> {
        Self::with_client(reqwest::Client::new(), base_url)
    }

    pub fn with_client(http: reqwest::Client, base_url: &str) -> Result<Self> {
        let base_url = parse_base_url(base_url)?;
        Ok(Self { http, base_url })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    // Paths are relative to the base, which always ends with '/'.
    fn endpoint(&self, path: &str) -> Result<Url> {
        self.base_url
            .join(path)
            .map_err(|e| BookingError::InvalidUrl(e.to_string()))
    }

    async fn get_json<T: DeserializeOwned>(&self, url: Url) -> Result<T> {
        debug!(url = %url, "GET");
        let response = self.http.get(url).send().await?;
        let status = response.status();
        let text = response.text().await?;
        if !status.is_success() {
            debug!(status = status.as_u16(), body = %text, "Booking server rejected request");
            return Err(BookingError::Status(status.as_u16()));
        }
        Ok(serde_json::from_str(&text)?)
    }
}

#[async_trait]
impl ClientSearchApi for BookingClient {
    async fn search_clients(&self, query: &str) -> Result<Vec<ClientRecord>> {
        let mut url = self.endpoint(CLIENT_SEARCH_PATH)?;
        url.query_pairs_mut().append_pair("q", query);
        let parsed: ClientSearchResponse = self.get_json(url).await?;
        Ok(parsed.clientes)
    }

    async fn client_pets(&self, client_id: u64) -> Result<ClientRecord> {
        let url = self.endpoint(&format!("turnos/api/cliente/{}/mascotas/", client_id))?;
        debug!(url = %url, "GET");
        let response = self.http.get(url).send().await?;
        let status = response.status();
        let text = response.text().await?;
        if status == StatusCode::NOT_FOUND {
            let message = serde_json::from_str::<ClientPetsResponse>(&text)
                .ok()
                .and_then(|body| body.error)
                .unwrap_or_else(|| format!("Cliente {} no encontrado", client_id));
            return Err(BookingError::NotFound(message));
        }
        if !status.is_success() {
            return Err(BookingError::Status(status.as_u16()));
        }
        let parsed: ClientPetsResponse = serde_json::from_str(&text)?;
        match (parsed.success, parsed.cliente) {
            (true, Some(mut cliente)) => {
                cliente.mascotas = parsed.mascotas;
                Ok(cliente)
            }
            _ => Err(BookingError::NotFound(
                parsed
                    .error
                    .unwrap_or_else(|| format!("Cliente {} no encontrado", client_id)),
            )),
        }
    }
}

#[async_trait]
impl CalendarFeedApi for BookingClient {
    async fn fetch_events(&self, url: &Url) -> Result<Vec<CalendarEvent>> {
        self.get_json(url.clone()).await
    }
}

#[async_trait]
impl BreedApi for BookingClient {
    async fn breeds_for_species(&self, especie_id: &str) -> Result<Vec<Breed>> {
        let mut url = self.endpoint(BREEDS_PATH)?;
        url.query_pairs_mut().append_pair("especie_id", especie_id);
        self.get_json(url).await
    }
}
