// src/map/marker.rs
use serde::Serialize;

use crate::domain::{Coordinates, Listing};
use crate::templates::components::marker_popup;

const ICON_SIZE: [u32; 2] = [30, 30];
const ICON_ANCHOR: [u32; 2] = [15, 15];

/// `L.divIcon` options for one marker.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MarkerIcon {
    pub class_name: String,
    pub html: String,
    pub size: [u32; 2],
    pub anchor: [u32; 2],
}

/// A listing placed on the map, ready for the browser to draw.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Marker {
    pub listing_id: i64,
    pub position: Coordinates,
    pub icon: MarkerIcon,
    /// Pre-rendered popup body (escaped by maud).
    pub popup_html: String,
}

impl Marker {
    pub fn for_listing(listing: &Listing, position: Coordinates) -> Self {
        let category = &listing.category;

        Self {
            listing_id: listing.id,
            position,
            icon: MarkerIcon {
                class_name: format!("custom-marker {}", category.style_class()),
                html: format!("<div>{}</div>", category.glyph()),
                size: ICON_SIZE,
                anchor: ICON_ANCHOR,
            },
            popup_html: marker_popup(listing).into_string(),
        }
    }
}
