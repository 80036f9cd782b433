// src/bridge/mod.rs
use serde::Serialize;

use crate::errors::BridgeError;

pub mod http;
pub mod notice;
pub mod webapp;

pub use http::HttpBridge;
pub use notice::LocalNoticeBridge;
pub use webapp::WebAppBridge;

/// Payload sent to the host client when the user asks for more details.
///
/// Serializes to `{"action":"listing_details","listing_id":<id>}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DetailRequest {
    action: &'static str,
    pub listing_id: i64,
}

impl DetailRequest {
    pub const ACTION: &'static str = "listing_details";

    pub fn new(listing_id: i64) -> Self {
        Self {
            action: Self::ACTION,
            listing_id,
        }
    }

    pub fn action(&self) -> &'static str {
        self.action
    }

    pub fn to_json(&self) -> Result<String, BridgeError> {
        Ok(serde_json::to_string(self)?)
    }
}

/// What the page told us about its host, taken from request headers set by
/// `static/map.js`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HostSession {
    platform: Option<String>,
    init_data: Option<String>,
}

impl HostSession {
    pub const PLATFORM_HEADER: &'static str = "x-telegram-platform";
    pub const INIT_DATA_HEADER: &'static str = "x-telegram-init-data";

    pub fn new(platform: Option<&str>, init_data: Option<&str>) -> Self {
        let non_empty = |v: Option<&str>| v.map(str::trim).filter(|v| !v.is_empty()).map(str::to_string);
        Self {
            platform: non_empty(platform),
            init_data: non_empty(init_data),
        }
    }

    /// Outside Telegram the WebApp script reports platform `unknown`.
    pub fn in_telegram(&self) -> bool {
        matches!(self.platform.as_deref(), Some(p) if p != "unknown")
    }

    /// Signed launch parameters, needed by the bot to route a message.
    pub fn init_data(&self) -> Option<&str> {
        self.init_data.as_deref()
    }
}

/// What happened to a detail request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Delivery {
    /// The page must hand this JSON to `Telegram.WebApp.sendData`.
    Forward { payload: String },
    /// Relayed to the bot backend by the server.
    Sent { listing_id: i64 },
    /// No host available; the message should be shown to the user instead.
    Notice(String),
}

/// Channel back to the chat client hosting the Mini App.
pub trait HostBridge: Send + Sync {
    fn send(&self, request: &DetailRequest, host: &HostSession) -> Result<Delivery, BridgeError>;
}
