// src/bridge/http.rs
use reqwest::blocking::Client;
use std::time::Duration;

use crate::bridge::{Delivery, DetailRequest, HostBridge, HostSession};
use crate::errors::BridgeError;

/// Posts detail requests to the bot backend, which relays them to the chat.
///
/// The page's Telegram init data travels along so the bot can tell which
/// user the request belongs to. Without it the request falls back to the
/// client-side `sendData` path.
pub struct HttpBridge {
    endpoint: String,
    client: Client,
}

impl HttpBridge {
    pub fn new(endpoint: impl Into<String>) -> Result<Self, BridgeError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(10))
            .build()
            .map_err(|e| BridgeError::Request(e.to_string()))?;

        Ok(Self {
            endpoint: endpoint.into(),
            client,
        })
    }
}

impl HostBridge for HttpBridge {
    fn send(&self, request: &DetailRequest, host: &HostSession) -> Result<Delivery, BridgeError> {
        let Some(init_data) = host.init_data() else {
            tracing::debug!(listing_id = request.listing_id, "no init data, leaving delivery to the page");
            return Ok(Delivery::Forward {
                payload: request.to_json()?,
            });
        };

        let response = self
            .client
            .post(&self.endpoint)
            .header(HostSession::INIT_DATA_HEADER, init_data)
            .json(request)
            .send()
            .map_err(|e| BridgeError::Request(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().unwrap_or_else(|_| "(no body)".to_string());
            tracing::warn!(listing_id = request.listing_id, %status, "host bridge rejected detail request");
            return Err(BridgeError::Rejected {
                status: status.as_u16(),
                body,
            });
        }

        tracing::info!(listing_id = request.listing_id, endpoint = %self.endpoint, "detail request sent to host");
        Ok(Delivery::Sent {
            listing_id: request.listing_id,
        })
    }
}
