// src/tests/router_tests/map_tests.rs

use crate::app::AppState;
use crate::bridge::WebAppBridge;
use crate::errors::SourceError;
use crate::domain::Listing;
use crate::map::MapState;
use crate::source::{FixtureSource, JsonFileSource, ListingSource};
use crate::tests::utils::{call, init_test_state};
use crate::view::ListingMapView;
use http::Method;
use serde_json::Value;
use std::io::Write;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

#[test]
fn home_page_renders_fixed_elements() {
    let state = init_test_state();
    let (status, body) = call(&state, Method::GET, "/");

    assert_eq!(status, 200);
    for id in ["map", "loader", "listing-details", "close-details", "show-more"] {
        assert!(body.contains(&format!(r#"id="{id}""#)), "page is missing #{id}");
    }
    assert!(body.contains("/static/map.js"));
}

#[test]
fn first_map_request_loads_fixture_markers() {
    let state = init_test_state();
    let (status, body) = call(&state, Method::GET, "/api/map");
    assert_eq!(status, 200);

    let json: Value = serde_json::from_str(&body).unwrap();
    assert_eq!(json["phase"]["state"], "loaded");
    assert_eq!(json["loading"], false);
    assert_eq!(json["map"]["viewport"]["zoom"], 10);
    assert_eq!(json["map"]["cluster"]["max_cluster_radius"], 80);

    let markers = json["map"]["markers"].as_array().unwrap();
    assert_eq!(markers.len(), 3);

    let girls = markers.iter().find(|m| m["listing_id"] == 2).unwrap();
    assert_eq!(girls["position"]["lat"], 41.3150);
    assert_eq!(girls["position"]["lng"], 69.2850);
    assert_eq!(girls["icon"]["class_name"], "custom-marker girls-listing");
}

#[test]
fn reload_does_not_duplicate_markers() {
    let state = init_test_state();
    call(&state, Method::GET, "/api/map");
    call(&state, Method::POST, "/api/reload");
    let (_, body) = call(&state, Method::POST, "/api/reload");

    let json: Value = serde_json::from_str(&body).unwrap();
    assert_eq!(json["map"]["markers"].as_array().unwrap().len(), 3);
}

#[test]
fn malformed_locations_are_reported_as_skipped() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(
        file,
        r#"[
            {{"id": 1, "title": "Ok", "category": "Oilaga", "price": "1", "currency": "$",
              "floor": 1, "rooms": 1, "location": "41.3110, 69.2797"}},
            {{"id": 2, "title": "Bad", "category": "Oilaga", "price": "1", "currency": "$",
              "floor": 1, "rooms": 1, "location": "Chilonzor"}}
        ]"#
    )
    .unwrap();

    let view = ListingMapView::new(
        Arc::new(JsonFileSource::new(file.path())),
        Arc::new(WebAppBridge),
        MapState::default(),
    );
    let state = AppState::new(view, false);

    let (_, body) = call(&state, Method::GET, "/api/map");
    let json: Value = serde_json::from_str(&body).unwrap();

    assert_eq!(json["map"]["markers"].as_array().unwrap().len(), 1);
    assert_eq!(json["skipped"][0]["listing_id"], 2);
    assert_eq!(json["skipped"][0]["reason"], "malformed_location");

    let (_, listings) = call(&state, Method::GET, "/api/listings");
    let listings: Vec<Listing> = serde_json::from_str(&listings).unwrap();
    assert_eq!(listings.len(), 2);
}

/// Succeeds once, then fails every time.
struct FlakySource {
    served: AtomicBool,
}

impl ListingSource for FlakySource {
    fn fetch(&self) -> Result<Vec<Listing>, SourceError> {
        if self.served.swap(true, Ordering::SeqCst) {
            Err(SourceError::Http("502 Bad Gateway".into()))
        } else {
            Ok(FixtureSource::listings())
        }
    }

    fn describe(&self) -> String {
        "flaky".into()
    }
}

#[test]
fn failed_reload_keeps_markers_and_offers_retry() {
    let view = ListingMapView::new(
        Arc::new(FlakySource {
            served: AtomicBool::new(false),
        }),
        Arc::new(WebAppBridge),
        MapState::default(),
    );
    let state = AppState::new(view, true);

    call(&state, Method::GET, "/api/map");
    let (status, body) = call(&state, Method::POST, "/api/reload");
    assert_eq!(status, 200);

    let json: Value = serde_json::from_str(&body).unwrap();
    assert_eq!(json["phase"]["state"], "failed");
    assert!(json["phase"]["message"].as_str().unwrap().contains("502"));
    assert_eq!(json["map"]["markers"].as_array().unwrap().len(), 3);
    assert!(json["status_html"].as_str().unwrap().contains("retry-load"));
}

#[test]
fn empty_source_shows_empty_state() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(file, "[]").unwrap();

    let view = ListingMapView::new(
        Arc::new(JsonFileSource::new(file.path())),
        Arc::new(WebAppBridge),
        MapState::default(),
    );
    let state = AppState::new(view, true);

    let (_, body) = call(&state, Method::GET, "/api/map");
    let json: Value = serde_json::from_str(&body).unwrap();
    assert_eq!(json["phase"]["state"], "loaded");
    assert!(json["status_html"].as_str().unwrap().contains("map-status empty"));
}

#[test]
fn static_assets_and_unknown_routes() {
    let state = init_test_state();

    let (status, body) = call(&state, Method::GET, "/static/map.js");
    assert_eq!(status, 200);
    assert!(body.contains("/api/map"));

    let (status, _) = call(&state, Method::GET, "/static/main.css");
    assert_eq!(status, 200);

    let (status, _) = call(&state, Method::GET, "/nope");
    assert_eq!(status, 404);

    let (status, body) = call(&state, Method::GET, "/health");
    assert_eq!(status, 200);
    assert!(body.contains("ok"));
}

#[test]
fn page_script_reports_failed_responses() {
    let state = init_test_state();
    let (_, script) = call(&state, Method::GET, "/static/map.js");

    assert!(script.contains("if (r.ok)"));
    assert!(script.contains("body.error"));
    assert!(script.contains("text.textContent = message"));
}

/// Source that always fails, with the backend's reason in the message.
struct DownSource;

impl ListingSource for DownSource {
    fn fetch(&self) -> Result<Vec<Listing>, SourceError> {
        Err(SourceError::Http("503 - maintenance".into()))
    }

    fn describe(&self) -> String {
        "down".into()
    }
}

#[test]
fn api_errors_are_json_with_their_status() {
    let state = init_test_state();

    let (status, body) = call(&state, Method::GET, "/api/nope");
    assert_eq!(status, 404);
    let json: Value = serde_json::from_str(&body).unwrap();
    assert_eq!(json["error"], "Not Found");

    // Pages keep their HTML error.
    let (status, body) = call(&state, Method::GET, "/listings/99/other");
    assert_eq!(status, 404);
    assert!(body.contains("<h1>Error 404</h1>"));

    // A failing source is still a 200 map snapshot, carrying the reason.
    let view = ListingMapView::new(
        Arc::new(DownSource),
        Arc::new(WebAppBridge),
        MapState::default(),
    );
    let state = AppState::new(view, true);
    let (status, body) = call(&state, Method::POST, "/api/reload");
    assert_eq!(status, 200);
    let json: Value = serde_json::from_str(&body).unwrap();
    assert!(json["phase"]["message"].as_str().unwrap().contains("maintenance"));
}
