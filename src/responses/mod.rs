pub mod html;
pub mod json;

pub use crate::errors::ResultResp;

// Normal HTML response
pub use html::{asset_response, html_response};
pub use json::{json_error_response, json_response};
