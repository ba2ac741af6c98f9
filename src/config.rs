use std::collections::HashMap;
use std::env;
use std::fs;
use std::time::Duration;

use chrono_tz::Tz;
use reqwest::Url;

use crate::error::{BookingError, Result};

pub const DEFAULT_BASE_URL: &str = "http://localhost:8000";
pub const DEFAULT_TIMEZONE: &str = "America/Argentina/Buenos_Aires";
pub const DEFAULT_DEBOUNCE_MS: u64 = 300;

/// Parses the server base URL so relative endpoint paths resolve beneath it,
/// keeping any mount prefix such as `/vet/`.
pub fn parse_base_url(raw: &str) -> Result<Url> {
    let mut url = Url::parse(raw.trim())
        .map_err(|e| BookingError::InvalidUrl(format!("{}: {}", raw, e)))?;
    if url.cannot_be_a_base() {
        return Err(BookingError::InvalidUrl(format!("{}: not a base URL", raw)));
    }
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    Ok(url)
}

#[derive(Debug, Default, Clone)]
pub struct AppConfig {
    values: HashMap<String, String>,
}

impl AppConfig {
    pub fn from_file(path: &str) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| BookingError::Config(e.to_string()))?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> Result<Self> {
        let mut values = HashMap::new();
        for (idx, line) in content.lines().enumerate() {
            let trimmed = line.trim();
            if trimmed.is_empty() || trimmed.starts_with('#') {
                continue;
            }
            let trimmed = trimmed.strip_prefix("export ").unwrap_or(trimmed);
            let Some((key, value)) = trimmed.split_once('=') else {
                return Err(BookingError::Config(format!(
                    "Invalid config line {}: {}",
                    idx + 1,
                    line
                )));
            };
            let key = key.trim();
            let mut value = value.trim().to_string();
            if value.len() >= 2
                && ((value.starts_with('"') && value.ends_with('"'))
                    || (value.starts_with('\'') && value.ends_with('\'')))
            {
                value = value[1..value.len() - 1].to_string();
            }
            values.insert(key.to_string(), value);
        }
        Ok(Self { values })
    }

    /// File value first, then the process environment.
    pub fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned().or_else(|| env::var(key).ok())
    }

    pub fn base_url(&self) -> String {
        self.get("BOOKING_BASE_URL")
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string())
    }

    pub fn clinic_timezone(&self) -> Result<Tz> {
        let name = self
            .get("CLINIC_TIMEZONE")
            .unwrap_or_else(|| DEFAULT_TIMEZONE.to_string());
        name.parse::<Tz>()
            .map_err(|_| BookingError::Config(format!("Unknown time zone {}", name)))
    }

    pub fn search_debounce(&self) -> Result<Duration> {
        match self.get("SEARCH_DEBOUNCE_MS") {
            Some(raw) => raw
                .trim()
                .parse::<u64>()
                .map(Duration::from_millis)
                .map_err(|_| {
                    BookingError::Config(format!("Invalid SEARCH_DEBOUNCE_MS {}", raw))
                }),
            None => Ok(Duration::from_millis(DEFAULT_DEBOUNCE_MS)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_handles_comments_exports_and_quotes() {
        let config = AppConfig::parse(
            concat!(
                "# booking server\n",
                "export BOOKING_BASE_URL=\"https://turnos.example\"\n",
                "\n",
                "SEARCH_DEBOUNCE_MS='150'\n",
            ),
        )
        .unwrap();
        assert_eq!(config.base_url(), "https://turnos.example");
        assert_eq!(config.search_debounce().unwrap(), Duration::from_millis(150));
    }

    #[test]
    fn parse_rejects_lines_without_separator() {
        let err = AppConfig::parse("BOOKING_BASE_URL").unwrap_err();
        assert!(err.to_string().contains("Invalid config line 1"));
    }

    #[test]
    fn base_url_keeps_mount_prefix() {
        let url = parse_base_url("https://clinic.example/vet").unwrap();
        assert_eq!(url.as_str(), "https://clinic.example/vet/");
        let url = parse_base_url("https://clinic.example/vet/").unwrap();
        assert_eq!(
            url.join("turnos/api/turnos-json/").unwrap().as_str(),
            "https://clinic.example/vet/turnos/api/turnos-json/"
        );
        let url = parse_base_url("http://localhost:8000").unwrap();
        assert_eq!(url.as_str(), "http://localhost:8000/");
    }

    #[test]
    fn base_url_rejects_non_base_urls() {
        for raw in ["mailto:vet@example.com", "not a url"] {
            assert!(matches!(parse_base_url(raw), Err(BookingError::InvalidUrl(_))));
        }
    }

    #[test]
    fn clinic_timezone_rejects_unknown_names() {
        let config = AppConfig::parse("CLINIC_TIMEZONE=Mars/Olympus").unwrap();
        assert!(config.clinic_timezone().is_err());
        let config = AppConfig::parse("CLINIC_TIMEZONE=Europe/Madrid").unwrap();
        assert_eq!(config.clinic_timezone().unwrap(), chrono_tz::Europe::Madrid);
    }
}
