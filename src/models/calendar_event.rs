use chrono::{DateTime, NaiveDateTime, TimeZone};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EventDetails {
    #[serde(default)]
    pub estado: String,
    #[serde(default)]
    pub reservado: bool,
    #[serde(default)]
    pub mascota: String,
    #[serde(default)]
    pub cliente: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub veterinario: Option<String>,
}

/// One booked appointment as served by the calendar JSON feeds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalendarEvent {
    pub id: u64,
    pub title: String,
    pub start: String,
    pub end: String,
    #[serde(default)]
    pub color: Option<String>,
    #[serde(default, rename = "extendedProps")]
    pub extended_props: EventDetails,
}

impl CalendarEvent {
    pub fn starts_at(&self, tz: &Tz) -> Option<DateTime<Tz>> {
        parse_event_time(&self.start, tz)
    }

    pub fn ends_at(&self, tz: &Tz) -> Option<DateTime<Tz>> {
        parse_event_time(&self.end, tz)
    }

    /// `HH:MM - HH:MM` in the clinic's wall-clock time.
    pub fn time_label(&self, tz: &Tz) -> Option<String> {
        let start = self.starts_at(tz)?;
        let end = self.ends_at(tz)?;
        Some(format!("{} - {}", start.format("%H:%M"), end.format("%H:%M")))
    }
}

// The veterinarian feed sends naive local times, the clinic feed offset-aware ones.
fn parse_event_time(raw: &str, tz: &Tz) -> Option<DateTime<Tz>> {
    if let Ok(aware) = DateTime::parse_from_rfc3339(raw) {
        return Some(aware.with_timezone(tz));
    }
    let naive = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S")
        .or_else(|_| NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M"))
        .ok()?;
    tz.from_local_datetime(&naive).earliest()
}
