// src/source/mod.rs
use crate::domain::Listing;
use crate::errors::SourceError;

pub mod fixture;
pub mod http;
pub mod json_file;
pub mod sqlite;

pub use fixture::FixtureSource;
pub use http::HttpSource;
pub use json_file::JsonFileSource;
pub use sqlite::SqliteSource;

/// Where the map gets its listings from.
///
/// Implementations return records in the order they should be drawn.
pub trait ListingSource: Send + Sync {
    fn fetch(&self) -> Result<Vec<Listing>, SourceError>;

    /// Short human-readable name used in logs.
    fn describe(&self) -> String;
}
