use crate::db::connection::Database;
use crate::db::listings::get_active_listings;
use crate::domain::Listing;
use crate::errors::{ServerError, SourceError};
use crate::source::ListingSource;

/// Reads active listings straight from the bot's SQLite database.
pub struct SqliteSource {
    db: Database,
}

impl SqliteSource {
    pub fn new(db: Database) -> Self {
        Self { db }
    }
}

impl ListingSource for SqliteSource {
    fn fetch(&self) -> Result<Vec<Listing>, SourceError> {
        get_active_listings(&self.db).map_err(|e| match e {
            ServerError::DbError(msg) => SourceError::Db(msg),
            other => SourceError::Db(other.to_string()),
        })
    }

    fn describe(&self) -> String {
        format!("sqlite {}", self.db.path())
    }
}
