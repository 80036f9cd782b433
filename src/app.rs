// src/app.rs
use serde::Serialize;
use std::sync::{Arc, Mutex, MutexGuard};

use chrono::{DateTime, Utc};

use crate::bridge::{HostBridge, HttpBridge, WebAppBridge};
use crate::config::{AppConfig, SourceConfig};
use crate::db::connection::{init_db, Database};
use crate::errors::ServerError;
use crate::map::{MapState, SkippedListing};
use crate::source::{FixtureSource, HttpSource, JsonFileSource, ListingSource, SqliteSource};
use crate::templates::components::map_status;
use crate::view::{LoadOutcome, ListingMapView, Phase};

/// Shared state handed to every request handler.
pub struct AppState {
    view: Mutex<ListingMapView>,
    pub expand_on_launch: bool,
}

/// Map state as sent to the browser script.
#[derive(Serialize)]
pub struct MapSnapshot<'a> {
    pub phase: &'a Phase,
    pub loading: bool,
    pub map: &'a MapState,
    pub skipped: &'a [SkippedListing],
    pub loaded_at: Option<DateTime<Utc>>,
    /// Pre-rendered empty/failed banner, empty string otherwise.
    pub status_html: String,
}

impl AppState {
    pub fn new(view: ListingMapView, expand_on_launch: bool) -> Self {
        Self {
            view: Mutex::new(view),
            expand_on_launch,
        }
    }

    pub fn from_config(cfg: &AppConfig) -> Result<Self, ServerError> {
        let source = build_source(cfg)?;
        let bridge = build_bridge(cfg)?;

        tracing::info!(
            source = %source.describe(),
            host_bridge = cfg.host_bridge_url.as_deref().unwrap_or("webapp sendData"),
            "listing map configured"
        );

        let view = ListingMapView::new(source, bridge, MapState::default());
        Ok(Self::new(view, cfg.expand_on_launch))
    }

    pub fn view(&self) -> Result<MutexGuard<'_, ListingMapView>, ServerError> {
        self.view.lock().map_err(|_| {
            tracing::error!("listing map view lock poisoned");
            ServerError::InternalError
        })
    }

    /// Fetch without holding the view lock; a newer reload wins.
    pub fn reload(&self) -> Result<LoadOutcome, ServerError> {
        let (ticket, source) = {
            let mut view = self.view()?;
            (view.begin_load(), view.source())
        };

        let result = source.fetch();
        Ok(self.view()?.finish_load(ticket, result))
    }

    /// Kick off the first load if nothing has been loaded yet.
    pub fn ensure_loaded(&self) -> Result<(), ServerError> {
        let idle = *self.view()?.phase() == Phase::Idle;
        if idle {
            self.reload()?;
        }
        Ok(())
    }
}

impl<'a> MapSnapshot<'a> {
    pub fn of(view: &'a ListingMapView) -> Self {
        let map = view.map();
        Self {
            phase: view.phase(),
            loading: view.is_loading(),
            map,
            skipped: &view.last_report().skipped,
            loaded_at: view.loaded_at(),
            status_html: map_status(view.phase(), map.markers().len()).into_string(),
        }
    }
}

fn build_source(cfg: &AppConfig) -> Result<Arc<dyn ListingSource>, ServerError> {
    let source: Arc<dyn ListingSource> = match &cfg.source {
        SourceConfig::Fixture => Arc::new(FixtureSource::new(cfg.fixture_delay)),
        SourceConfig::JsonFile(path) => Arc::new(JsonFileSource::new(path)),
        SourceConfig::Sqlite(path) => {
            let db = Database::new(path.to_string_lossy().into_owned());
            init_db(&db, &cfg.schema_path)?;
            Arc::new(SqliteSource::new(db))
        }
        SourceConfig::Http(url) => Arc::new(HttpSource::new(url.as_str())?),
    };
    Ok(source)
}

/// Bridge used for clients inside Telegram. Without a bot backend the page
/// hands the payload to `Telegram.WebApp.sendData` itself.
fn build_bridge(cfg: &AppConfig) -> Result<Arc<dyn HostBridge>, ServerError> {
    match &cfg.host_bridge_url {
        Some(url) => Ok(Arc::new(HttpBridge::new(url.as_str())?)),
        None => Ok(Arc::new(WebAppBridge)),
    }
}

/// Fixtures, no latency, default bridge.
#[cfg(test)]
pub fn standalone_state() -> AppState {
    let view = ListingMapView::new(
        Arc::new(FixtureSource::new(std::time::Duration::ZERO)),
        Arc::new(WebAppBridge),
        MapState::default(),
    );
    AppState::new(view, true)
}
