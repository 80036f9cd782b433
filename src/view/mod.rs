// src/view/mod.rs
//! The listing map view: loads listings, keeps the marker layer in sync,
//! builds detail panels and forwards detail requests to the host.
//!
//! Selection belongs to the client: the panel markup carries the id its
//! "show more" control posts back, so one view can serve many users.

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::sync::Arc;

use crate::bridge::{Delivery, DetailRequest, HostBridge, HostSession, LocalNoticeBridge};
use crate::domain::Listing;
use crate::errors::{ServerError, SourceError};
use crate::map::{MapState, RenderReport};
use crate::source::ListingSource;

pub mod panel;

pub use panel::DetailPanel;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "state", content = "message", rename_all = "snake_case")]
pub enum Phase {
    Idle,
    Loading,
    Loaded,
    /// Last load failed; markers from the previous successful load stay up.
    Failed(String),
}

/// Identifies one fetch. Only the newest ticket may apply its result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadTicket {
    generation: u64,
}

#[derive(Debug, Clone, PartialEq)]
pub enum LoadOutcome {
    Applied(RenderReport),
    Failed(String),
    /// A newer load started after this one; the result was dropped.
    Stale,
}

/// A detail request checked against the plotted listings, ready to send
/// once the view is no longer borrowed.
pub struct PendingDetails {
    request: DetailRequest,
    bridge: Arc<dyn HostBridge>,
}

impl PendingDetails {
    pub fn request(&self) -> &DetailRequest {
        &self.request
    }

    pub fn send(self, host: &HostSession) -> Result<Delivery, ServerError> {
        Ok(self.bridge.send(&self.request, host)?)
    }
}

pub struct ListingMapView {
    source: Arc<dyn ListingSource>,
    /// Used when the page runs inside Telegram.
    bridge: Arc<dyn HostBridge>,
    map: MapState,
    listings: Vec<Listing>,
    phase: Phase,
    generation: u64,
    last_report: RenderReport,
    loaded_at: Option<DateTime<Utc>>,
}

impl ListingMapView {
    pub fn new(source: Arc<dyn ListingSource>, bridge: Arc<dyn HostBridge>, map: MapState) -> Self {
        Self {
            source,
            bridge,
            map,
            listings: Vec::new(),
            phase: Phase::Idle,
            generation: 0,
            last_report: RenderReport::default(),
            loaded_at: None,
        }
    }

    pub fn phase(&self) -> &Phase {
        &self.phase
    }

    /// Whether the loading indicator should be visible.
    pub fn is_loading(&self) -> bool {
        self.phase == Phase::Loading
    }

    pub fn map(&self) -> &MapState {
        &self.map
    }

    pub fn listings(&self) -> &[Listing] {
        &self.listings
    }

    pub fn last_report(&self) -> &RenderReport {
        &self.last_report
    }

    pub fn loaded_at(&self) -> Option<DateTime<Utc>> {
        self.loaded_at
    }

    pub fn source(&self) -> Arc<dyn ListingSource> {
        Arc::clone(&self.source)
    }

    /// Fetch and render in one go.
    pub fn load(&mut self) -> LoadOutcome {
        let ticket = self.begin_load();
        let result = self.source.fetch();
        self.finish_load(ticket, result)
    }

    /// Enter the loading state and hand out a ticket for the fetch.
    pub fn begin_load(&mut self) -> LoadTicket {
        self.generation += 1;
        self.phase = Phase::Loading;
        tracing::debug!(generation = self.generation, source = %self.source.describe(), "loading listings");
        LoadTicket {
            generation: self.generation,
        }
    }

    /// Apply a fetch result unless a newer load has started since.
    pub fn finish_load(
        &mut self,
        ticket: LoadTicket,
        result: Result<Vec<Listing>, SourceError>,
    ) -> LoadOutcome {
        if ticket.generation != self.generation {
            tracing::debug!(
                stale = ticket.generation,
                current = self.generation,
                "ignoring stale listings result"
            );
            return LoadOutcome::Stale;
        }

        match result {
            Ok(listings) => {
                let report = self.render(listings);
                self.phase = Phase::Loaded;
                self.loaded_at = Some(Utc::now());
                tracing::info!(
                    placed = report.placed,
                    skipped = report.skipped.len(),
                    "listings loaded"
                );
                LoadOutcome::Applied(report)
            }
            Err(err) => {
                let message = err.to_string();
                tracing::error!(error = %message, "failed to load listings, keeping previous markers");
                self.phase = Phase::Failed(message.clone());
                LoadOutcome::Failed(message)
            }
        }
    }

    /// Replace the listing set and rebuild every marker.
    pub fn render(&mut self, listings: Vec<Listing>) -> RenderReport {
        let report = self.map.render(&listings);
        self.listings = listings;
        self.last_report = report.clone();
        report
    }

    /// Detail panel for a listing. The panel records the id its
    /// "show more" control requests.
    pub fn on_marker_selected(&self, listing: &Listing) -> DetailPanel {
        DetailPanel::for_listing(listing)
    }

    /// Marker click by id. Only plotted listings can be selected.
    pub fn select(&self, listing_id: i64) -> Result<DetailPanel, ServerError> {
        let listing = self.plotted_listing(listing_id).ok_or(ServerError::NotFound)?;
        Ok(self.on_marker_selected(listing))
    }

    /// Check a detail request and pick the bridge for this client: the host
    /// bridge inside Telegram, a local notice anywhere else.
    pub fn prepare_details(
        &self,
        listing_id: i64,
        host: &HostSession,
    ) -> Result<PendingDetails, ServerError> {
        if self.plotted_listing(listing_id).is_none() {
            return Err(ServerError::NotFound);
        }

        let bridge: Arc<dyn HostBridge> = if host.in_telegram() {
            Arc::clone(&self.bridge)
        } else {
            Arc::new(LocalNoticeBridge)
        };

        Ok(PendingDetails {
            request: DetailRequest::new(listing_id),
            bridge,
        })
    }

    fn plotted_listing(&self, listing_id: i64) -> Option<&Listing> {
        self.map.marker(listing_id)?;
        self.listings.iter().find(|l| l.id == listing_id)
    }
}
