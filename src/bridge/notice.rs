use crate::bridge::{Delivery, DetailRequest, HostBridge, HostSession};
use crate::errors::BridgeError;

/// Stand-in used outside Telegram: nothing is sent, the user just sees
/// which listing was requested.
#[derive(Debug, Default, Clone, Copy)]
pub struct LocalNoticeBridge;

impl HostBridge for LocalNoticeBridge {
    fn send(&self, request: &DetailRequest, _host: &HostSession) -> Result<Delivery, BridgeError> {
        tracing::info!(listing_id = request.listing_id, "no host bridge, showing local notice");
        Ok(Delivery::Notice(format!(
            "Batafsil ma'lumot so'raldi: Elon ID {}",
            request.listing_id
        )))
    }
}
