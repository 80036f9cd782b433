// src/domain/listing.rs
use serde::{Deserialize, Deserializer, Serialize};

use crate::domain::category::Category;
use crate::domain::location::{parse_location, Coordinates};

/// A property listing as published by the bot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Listing {
    pub id: i64,
    pub title: String,
    pub category: Category,
    pub price: String,
    pub currency: String,
    #[serde(deserialize_with = "int_or_numeric_string")]
    pub floor: i64,
    #[serde(deserialize_with = "int_or_numeric_string")]
    pub rooms: i64,
    /// Raw `"lat, lng"` text. Parsed lazily when markers are built.
    #[serde(default)]
    pub location: Option<String>,
}

impl Listing {
    /// `None` when the location is missing or malformed.
    pub fn coordinates(&self) -> Option<Coordinates> {
        self.location.as_deref().and_then(parse_location)
    }

    /// Price with its currency tag, e.g. `500,000 so'm`.
    pub fn price_label(&self) -> String {
        format!("{} {}", self.price, self.currency)
    }
}

// Bot exports carry floor/rooms as either numbers or numeric strings.
fn int_or_numeric_string<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Int(i64),
        Text(String),
    }

    match Raw::deserialize(deserializer)? {
        Raw::Int(n) => Ok(n),
        Raw::Text(s) => s
            .trim()
            .parse::<i64>()
            .map_err(|_| serde::de::Error::custom(format!("expected an integer, got {s:?}"))),
    }
}
