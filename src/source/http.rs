// src/source/http.rs
use reqwest::blocking::Client;
use std::time::Duration;

use crate::domain::Listing;
use crate::errors::SourceError;
use crate::source::ListingSource;

/// Fetches active listings from the bot backend API.
pub struct HttpSource {
    url: String,
    client: Client,
}

impl HttpSource {
    pub fn new(url: impl Into<String>) -> Result<Self, SourceError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(15))
            .build()
            .map_err(|e| SourceError::Http(e.to_string()))?;

        Ok(Self {
            url: url.into(),
            client,
        })
    }
}

impl ListingSource for HttpSource {
    fn fetch(&self) -> Result<Vec<Listing>, SourceError> {
        let response = self
            .client
            .get(&self.url)
            .header("Accept", "application/json")
            .send()
            .map_err(|e| SourceError::Http(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().unwrap_or_else(|_| "(no body)".to_string());
            return Err(SourceError::Http(format!("{status} - {text}")));
        }

        let body = response
            .text()
            .map_err(|e| SourceError::Http(e.to_string()))?;
        Ok(serde_json::from_str(&body)?)
    }

    fn describe(&self) -> String {
        format!("http {}", self.url)
    }
}
