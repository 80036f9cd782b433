// src/tests/router_tests/details_tests.rs

use crate::app::AppState;
use crate::bridge::{Delivery, DetailRequest, HostBridge, HostSession};
use crate::config::AppConfig;
use crate::errors::BridgeError;
use crate::map::MapState;
use crate::source::FixtureSource;
use crate::tests::utils::{call, init_test_state, request, send, telegram_request};
use crate::view::ListingMapView;
use http::Method;
use std::sync::mpsc::{self, Receiver, Sender};
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::Duration;

#[derive(Default, Clone)]
struct RecordingBridge {
    sent: Arc<Mutex<Vec<(serde_json::Value, Option<String>)>>>,
}

impl HostBridge for RecordingBridge {
    fn send(&self, request: &DetailRequest, host: &HostSession) -> Result<Delivery, BridgeError> {
        self.sent.lock().unwrap().push((
            serde_json::to_value(request).unwrap(),
            host.init_data().map(str::to_string),
        ));
        Ok(Delivery::Sent {
            listing_id: request.listing_id,
        })
    }
}

struct RejectingBridge;

impl HostBridge for RejectingBridge {
    fn send(&self, _request: &DetailRequest, _host: &HostSession) -> Result<Delivery, BridgeError> {
        Err(BridgeError::Rejected {
            status: 400,
            body: "WEBAPP_DATA_INVALID".into(),
        })
    }
}

/// Blocks inside `send` until released, like a slow bot backend.
struct StalledBridge {
    entered: Mutex<Sender<()>>,
    release: Mutex<Receiver<()>>,
}

impl HostBridge for StalledBridge {
    fn send(&self, request: &DetailRequest, _host: &HostSession) -> Result<Delivery, BridgeError> {
        self.entered.lock().unwrap().send(()).unwrap();
        self.release
            .lock()
            .unwrap()
            .recv_timeout(Duration::from_secs(10))
            .unwrap();
        Ok(Delivery::Sent {
            listing_id: request.listing_id,
        })
    }
}

fn state_with(bridge: Arc<dyn HostBridge>) -> AppState {
    let view = ListingMapView::new(
        Arc::new(FixtureSource::default()),
        bridge,
        MapState::default(),
    );
    AppState::new(view, true)
}

fn post_details(state: &AppState, id: i64, init_data: Option<&str>) -> (u16, String) {
    send(
        state,
        telegram_request(Method::POST, &format!("/listings/{id}/details"), init_data),
    )
}

/// The `hx-post` target of the panel's show-more button.
fn show_more_target(panel_html: &str) -> String {
    let start = panel_html
        .find(r#"id="show-more""#)
        .expect("panel has a show-more button");
    let rest = &panel_html[start..];
    let attr = r#"hx-post=""#;
    let from = rest.find(attr).expect("show-more posts somewhere") + attr.len();
    let to = rest[from..].find('"').unwrap();
    rest[from..from + to].to_string()
}

#[test]
fn selecting_marker_fills_panel() {
    let state = init_test_state();
    call(&state, Method::GET, "/api/map");

    let (status, body) = call(&state, Method::GET, "/listings/2");
    assert_eq!(status, 200);
    assert!(body.contains(r#"<h3 id="listing-title">Qizlar uchun kvartira</h3>"#));
    assert!(body.contains(r#"<dd id="listing-category">Qizlarga</dd>"#));
    assert!(body.contains("450,000 so"));
    assert!(body.contains(r#"<dd id="listing-floor">5-qavat</dd>"#));
    assert!(body.contains(r#"<dd id="listing-rooms">2 xona</dd>"#));
    assert!(body.contains(r#"data-listing-id="2""#));
    assert_eq!(show_more_target(&body), "/listings/2/details");

    // Another client's fresh page load starts with an empty panel.
    let (_, page) = call(&state, Method::GET, "/");
    assert!(page.contains(r#"class="details-panel hidden""#));
}

#[test]
fn inside_telegram_default_config_hands_payload_to_send_data() {
    let cfg = AppConfig {
        fixture_delay: Duration::ZERO,
        ..AppConfig::default()
    };
    let state = AppState::from_config(&cfg).unwrap();
    call(&state, Method::GET, "/api/map");

    let (status, body) = post_details(&state, 2, None);
    assert_eq!(status, 200);
    assert!(body.contains(r#"id="host-payload""#));
    assert!(body.contains(
        r#"data-payload="{&quot;action&quot;:&quot;listing_details&quot;,&quot;listing_id&quot;:2}""#
    ));
    assert!(!body.contains("<dialog"));

    let (_, script) = call(&state, Method::GET, "/static/map.js");
    assert!(script.contains("tg.sendData(payload)"));
    assert!(script.contains("X-Telegram-Platform"));
    assert!(script.contains("X-Telegram-Init-Data"));
}

#[test]
fn show_more_sends_listing_to_host_with_init_data() {
    let bridge = RecordingBridge::default();
    let state = state_with(Arc::new(bridge.clone()));
    call(&state, Method::GET, "/api/map");
    let (_, panel) = call(&state, Method::GET, "/listings/2");

    let target = show_more_target(&panel);
    let (status, body) = send(
        &state,
        telegram_request(Method::POST, &target, Some("query_id=AA&hash=ff")),
    );
    assert_eq!(status, 200);
    assert!(body.contains("So&#39;rov yuborildi") || body.contains("So'rov yuborildi"));

    let sent = bridge.sent.lock().unwrap();
    assert_eq!(
        sent.as_slice(),
        &[(
            serde_json::json!({ "action": "listing_details", "listing_id": 2 }),
            Some("query_id=AA&hash=ff".to_string())
        )]
    );
}

#[test]
fn concurrent_clients_keep_their_own_selection() {
    let bridge = RecordingBridge::default();
    let state = state_with(Arc::new(bridge.clone()));
    call(&state, Method::GET, "/api/map");

    // Client A opens listing 1, then client B opens listing 2.
    let (_, panel_a) = call(&state, Method::GET, "/listings/1");
    let (_, panel_b) = call(&state, Method::GET, "/listings/2");

    // A's "show more" still asks for listing 1.
    let (status, _) = send(
        &state,
        telegram_request(Method::POST, &show_more_target(&panel_a), None),
    );
    assert_eq!(status, 200);

    // B closing their panel does not affect A.
    let (status, body) = call(&state, Method::POST, "/details/close");
    assert_eq!(status, 200);
    assert!(body.contains(r#"class="details-panel hidden""#));

    let (status, _) = send(
        &state,
        telegram_request(Method::POST, &show_more_target(&panel_b), None),
    );
    assert_eq!(status, 200);

    let ids: Vec<_> = bridge
        .sent
        .lock()
        .unwrap()
        .iter()
        .map(|(payload, _)| payload["listing_id"].clone())
        .collect();
    assert_eq!(ids, vec![serde_json::json!(1), serde_json::json!(2)]);
}

#[test]
fn slow_host_does_not_block_other_requests() {
    let (entered_tx, entered_rx) = mpsc::channel();
    let (release_tx, release_rx) = mpsc::channel();
    let state = Arc::new(state_with(Arc::new(StalledBridge {
        entered: Mutex::new(entered_tx),
        release: Mutex::new(release_rx),
    })));
    call(&state, Method::GET, "/api/map");

    let relaying = {
        let state = Arc::clone(&state);
        thread::spawn(move || post_details(&state, 1, Some("hash=ab")))
    };
    entered_rx
        .recv_timeout(Duration::from_secs(5))
        .expect("bridge send started");

    // With the relay still in flight, selection and map data stay available.
    let (done_tx, done_rx) = mpsc::channel();
    {
        let state = Arc::clone(&state);
        thread::spawn(move || {
            let panel = call(&state, Method::GET, "/listings/2");
            let map = call(&state, Method::GET, "/api/map");
            done_tx.send((panel, map)).unwrap();
        });
    }
    let ((panel_status, _), (map_status, _)) = done_rx
        .recv_timeout(Duration::from_secs(5))
        .expect("requests finished while the host was busy");
    assert_eq!(panel_status, 200);
    assert_eq!(map_status, 200);

    release_tx.send(()).unwrap();
    let (status, _) = relaying.join().unwrap();
    assert_eq!(status, 200);
}

#[test]
fn popup_button_sends_its_listing() {
    let bridge = RecordingBridge::default();
    let state = state_with(Arc::new(bridge.clone()));
    call(&state, Method::GET, "/api/map");

    let (status, _) = post_details(&state, 3, None);
    assert_eq!(status, 200);
    assert_eq!(bridge.sent.lock().unwrap()[0].0["listing_id"], 3);
}

#[test]
fn standalone_details_show_local_notice() {
    let bridge = RecordingBridge::default();
    let state = state_with(Arc::new(bridge.clone()));
    call(&state, Method::GET, "/api/map");

    let (status, body) = call(&state, Method::POST, "/listings/1/details");
    assert_eq!(status, 200);
    assert!(body.contains("<dialog"));
    assert!(body.contains("Elon ID 1"));

    // A browser tab reports platform "unknown".
    let mut req = request(Method::POST, "/listings/1/details");
    req.headers_mut()
        .insert(HostSession::PLATFORM_HEADER, "unknown".parse().unwrap());
    let (_, body) = send(&state, req);
    assert!(body.contains("<dialog"));

    assert!(bridge.sent.lock().unwrap().is_empty());
}

#[test]
fn unknown_or_invalid_ids_are_rejected() {
    let state = init_test_state();
    call(&state, Method::GET, "/api/map");

    assert_eq!(call(&state, Method::GET, "/listings/99").0, 404);
    assert_eq!(post_details(&state, 99, None).0, 404);
    assert_eq!(call(&state, Method::GET, "/listings/two").0, 400);
}

#[test]
fn host_rejection_is_a_bad_gateway() {
    let state = state_with(Arc::new(RejectingBridge));
    call(&state, Method::GET, "/api/map");

    let (status, body) = post_details(&state, 2, Some("hash=ab"));
    assert_eq!(status, 502);
    assert!(body.contains("WEBAPP_DATA_INVALID"));
}
