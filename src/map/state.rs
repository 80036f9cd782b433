// src/map/state.rs
use serde::Serialize;

use crate::domain::{Coordinates, Listing};
use crate::map::marker::Marker;

/// Initial camera position.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Viewport {
    pub center: Coordinates,
    pub zoom: u8,
}

impl Default for Viewport {
    fn default() -> Self {
        // Tashkent
        Self {
            center: Coordinates::new(41.3110, 69.2797),
            zoom: 10,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TileLayer {
    pub url_template: String,
    pub attribution: String,
}

impl Default for TileLayer {
    fn default() -> Self {
        Self {
            url_template: "https://{s}.tile.openstreetmap.org/{z}/{x}/{y}.png".to_string(),
            attribution: "&copy; <a href=\"https://www.openstreetmap.org/copyright\">OpenStreetMap</a> contributors".to_string(),
        }
    }
}

/// Options handed to `L.markerClusterGroup`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClusterOptions {
    pub chunked_loading: bool,
    pub max_cluster_radius: u32,
}

impl Default for ClusterOptions {
    fn default() -> Self {
        Self {
            chunked_loading: true,
            max_cluster_radius: 80,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SkipReason {
    MissingLocation,
    MalformedLocation,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SkippedListing {
    pub listing_id: i64,
    pub reason: SkipReason,
}

/// Outcome of one render pass.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RenderReport {
    pub placed: usize,
    pub skipped: Vec<SkippedListing>,
}

/// The marker layer plus the static map settings it is drawn with.
///
/// Owned by the view; every render replaces the marker set wholesale.
#[derive(Debug, Clone, Default, Serialize)]
pub struct MapState {
    pub viewport: Viewport,
    pub tiles: TileLayer,
    pub cluster: ClusterOptions,
    markers: Vec<Marker>,
}

impl MapState {
    pub fn markers(&self) -> &[Marker] {
        &self.markers
    }

    pub fn marker(&self, listing_id: i64) -> Option<&Marker> {
        self.markers.iter().find(|m| m.listing_id == listing_id)
    }

    pub fn clear(&mut self) {
        self.markers.clear();
    }

    /// Clear the layer and build one marker per listing with a usable location.
    pub fn render(&mut self, listings: &[Listing]) -> RenderReport {
        self.clear();

        let mut report = RenderReport::default();

        for listing in listings {
            let Some(text) = listing.location.as_deref() else {
                tracing::warn!(listing_id = listing.id, "listing has no location, not plotted");
                report.skipped.push(SkippedListing {
                    listing_id: listing.id,
                    reason: SkipReason::MissingLocation,
                });
                continue;
            };

            match listing.coordinates() {
                Some(position) => {
                    self.markers.push(Marker::for_listing(listing, position));
                    report.placed += 1;
                }
                None => {
                    tracing::warn!(
                        listing_id = listing.id,
                        location = text,
                        "malformed listing location, not plotted"
                    );
                    report.skipped.push(SkippedListing {
                        listing_id: listing.id,
                        reason: SkipReason::MalformedLocation,
                    });
                }
            }
        }

        report
    }
}
