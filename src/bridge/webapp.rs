use crate::bridge::{Delivery, DetailRequest, HostBridge, HostSession};
use crate::errors::BridgeError;

/// Default bridge: the page itself calls `Telegram.WebApp.sendData` with
/// the payload rendered into the response.
#[derive(Debug, Default, Clone, Copy)]
pub struct WebAppBridge;

impl HostBridge for WebAppBridge {
    fn send(&self, request: &DetailRequest, _host: &HostSession) -> Result<Delivery, BridgeError> {
        tracing::info!(listing_id = request.listing_id, "forwarding detail request to WebApp.sendData");
        Ok(Delivery::Forward {
            payload: request.to_json()?,
        })
    }
}
