use std::sync::Arc;

use async_trait::async_trait;
use reqwest::Url;
use tracing::warn;

use crate::config::parse_base_url;
use crate::error::{BookingError, Result};
use crate::models::calendar_event::CalendarEvent;

#[async_trait]
pub trait CalendarFeedApi: Send + Sync {
    async fn fetch_events(&self, url: &Url) -> Result<Vec<CalendarEvent>>;
}

/// Which agenda is rendered: a veterinarian's own or the whole clinic's.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AgendaScope {
    Veterinarian,
    Clinic,
}

impl AgendaScope {
    pub fn feed_path(&self) -> &'static str {
        match self {
            AgendaScope::Veterinarian => "turnos/api/turnos-json/",
            AgendaScope::Clinic => "turnos/api/turnos-clinica-json/",
        }
    }

    /// Page an event click navigates to.
    pub fn detail_path(&self, event_id: u64) -> String {
        match self {
            AgendaScope::Veterinarian => format!("/mascotas/turno/{}/detalle/", event_id),
            AgendaScope::Clinic => format!("/mascotas/turno/{}/detalle-admin/", event_id),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CalendarFilter {
    pub veterinario: Option<String>,
    pub estado: Option<String>,
}

impl CalendarFilter {
    pub fn query_pairs(&self) -> Vec<(&'static str, &str)> {
        let mut pairs = Vec::new();
        if let Some(vet) = non_blank(&self.veterinario) {
            pairs.push(("veterinario", vet));
        }
        if let Some(estado) = non_blank(&self.estado) {
            pairs.push(("estado", estado));
        }
        pairs
    }
}

fn non_blank(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

pub fn feed_url(base_url: &str, scope: AgendaScope, filter: &CalendarFilter) -> Result<Url> {
    let mut url = parse_base_url(base_url)?
        .join(scope.feed_path())
        .map_err(|e| BookingError::InvalidUrl(e.to_string()))?;
    let pairs = filter.query_pairs();
    // Leave the URL without a trailing '?' when nothing is filtered.
    if !pairs.is_empty() {
        url.query_pairs_mut().extend_pairs(pairs);
    }
    Ok(url)
}

pub struct CalendarFeed {
    api: Arc<dyn CalendarFeedApi>,
    base_url: String,
    scope: AgendaScope,
}

impl CalendarFeed {
    pub fn new(
        api: Arc<dyn CalendarFeedApi>,
        base_url: impl Into<String>,
        scope: AgendaScope,
    ) -> Self {
        Self {
            api,
            base_url: base_url.into(),
            scope,
        }
    }

    pub fn scope(&self) -> AgendaScope {
        self.scope
    }

    pub async fn load(&self, filter: &CalendarFilter) -> Result<Vec<CalendarEvent>> {
        let url = feed_url(&self.base_url, self.scope, filter)?;
        self.api.fetch_events(&url).await.inspect_err(|err| {
            warn!(url = %url, error = %err, "Calendar feed failed");
        })
    }

    pub fn detail_path(&self, event: &CalendarEvent) -> String {
        self.scope.detail_path(event.id)
    }
}
