//! Configuration for the form relay service.

use std::env;

/// Form relay configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// HTTP server port.
    pub port: u16,
    /// Row holding the canonical header names that answers are matched against.
    pub header_row: usize,
    /// Row holding the display labels used in notifications.
    pub localized_header_row: usize,
    /// Path to the service account JSON key.
    pub credentials_path: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: env::var("FORM_RELAY_PORT")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(12345),
            header_row: env::var("HEADER_ROW")
                .ok()
                .and_then(|s| s.parse().ok())
                .filter(|row| *row > 0)
                .unwrap_or(1),
            localized_header_row: env::var("LOCALIZED_HEADER_ROW")
                .ok()
                .and_then(|s| s.parse().ok())
                .filter(|row| *row > 0)
                .unwrap_or(2),
            credentials_path: env::var("GOOGLE_CREDENTIALS_PATH")
                .ok()
                .filter(|s| !s.is_empty())
                .unwrap_or_else(|| "Keys.json".to_string()),
        }
    }
}

/// Which sheet rows carry headers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HeaderRows {
    pub canonical: usize,
    pub localized: usize,
}

impl Config {
    #[must_use]
    pub fn header_rows(&self) -> HeaderRows {
        HeaderRows {
            canonical: self.header_row,
            localized: self.localized_header_row,
        }
    }
}
