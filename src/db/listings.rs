use rusqlite::params;

use crate::db::connection::Database;
use crate::domain::{Category, Listing};
use crate::errors::ServerError;

const SQL_ACTIVE_LISTINGS: &str = r#"
    SELECT id, title, category, price, currency, floor, rooms, location
    FROM listings
    WHERE is_active = 1
    ORDER BY id
"#;

pub fn get_active_listings(db: &Database) -> Result<Vec<Listing>, ServerError> {
    db.with_conn(|conn| {
        let mut stmt = conn
            .prepare(SQL_ACTIVE_LISTINGS)
            .map_err(|e| ServerError::DbError(e.to_string()))?;

        let rows = stmt
            .query_map([], |row| {
                Ok(Listing {
                    id: row.get(0)?,
                    title: row.get(1)?,
                    category: Category::from(row.get::<_, String>(2)?),
                    price: row.get(3)?,
                    currency: row.get(4)?,
                    floor: row.get(5)?,
                    rooms: row.get(6)?,
                    location: row.get(7)?,
                })
            })
            .map_err(|e| ServerError::DbError(e.to_string()))?;

        let mut out = Vec::new();
        for r in rows {
            out.push(r.map_err(|e| ServerError::DbError(e.to_string()))?);
        }
        Ok(out)
    })
}

#[cfg(test)]
pub fn insert_listing(db: &Database, listing: &Listing, is_active: bool) -> Result<(), ServerError> {
    db.with_conn(|conn| {
        conn.execute(
            r#"
            INSERT INTO listings (id, title, category, price, currency, floor, rooms, location, is_active)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)
            ON CONFLICT(id) DO UPDATE SET
                title = excluded.title,
                category = excluded.category,
                price = excluded.price,
                currency = excluded.currency,
                floor = excluded.floor,
                rooms = excluded.rooms,
                location = excluded.location,
                is_active = excluded.is_active
            "#,
            params![
                listing.id,
                listing.title,
                listing.category.label(),
                listing.price,
                listing.currency,
                listing.floor,
                listing.rooms,
                listing.location,
                is_active,
            ],
        )
        .map_err(|e| ServerError::DbError(e.to_string()))?;
        Ok(())
    })
}
