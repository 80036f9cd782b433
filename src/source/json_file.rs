use std::fs;
use std::path::PathBuf;

use crate::domain::Listing;
use crate::errors::SourceError;
use crate::source::ListingSource;

/// Reads a JSON array of listings, e.g. an export dropped by the bot.
pub struct JsonFileSource {
    path: PathBuf,
}

impl JsonFileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl ListingSource for JsonFileSource {
    fn fetch(&self) -> Result<Vec<Listing>, SourceError> {
        let raw = fs::read_to_string(&self.path)?;
        Ok(serde_json::from_str(&raw)?)
    }

    fn describe(&self) -> String {
        format!("json file {}", self.path.display())
    }
}
