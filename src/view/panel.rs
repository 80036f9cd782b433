use serde::Serialize;

use crate::domain::Listing;

/// Text shown in the detail panel for the selected listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DetailPanel {
    pub listing_id: i64,
    pub title: String,
    pub category: String,
    pub price: String,
    pub floor: String,
    pub rooms: String,
}

impl DetailPanel {
    pub fn for_listing(listing: &Listing) -> Self {
        Self {
            listing_id: listing.id,
            title: listing.title.clone(),
            category: listing.category.label().to_string(),
            price: listing.price_label(),
            floor: format!("{}-qavat", listing.floor),
            rooms: format!("{} xona", listing.rooms),
        }
    }
}
