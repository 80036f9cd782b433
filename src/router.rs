use crate::app::{AppState, MapSnapshot};
use crate::bridge::HostSession;
use crate::errors::ServerError;
use crate::responses::{
    asset_response, html_response, json_error_response, json_response, ResultResp,
};
use crate::templates::components::delivery_result;
use crate::templates::pages::{map_page, MapPageVm};
use crate::templates::{detail_panel, html_error_response};
use astra::{Request, Response};
use serde_json::json;

const MAP_JS: &str = include_str!("../static/map.js");
const MAIN_CSS: &str = include_str!("../static/main.css");

/// Route a request; errors become JSON under `/api/` and an HTML page elsewhere.
pub fn respond(req: Request, state: &AppState) -> Response {
    let api = req.uri().path().starts_with("/api/");

    match handle(req, state) {
        Ok(resp) => resp,
        Err(err) if api => json_error_response(err),
        Err(err) => html_error_response(err),
    }
}

fn host_session(req: &Request) -> HostSession {
    let header = |name: &str| req.headers().get(name).and_then(|v| v.to_str().ok());
    HostSession::new(
        header(HostSession::PLATFORM_HEADER),
        header(HostSession::INIT_DATA_HEADER),
    )
}

pub fn handle(req: Request, state: &AppState) -> ResultResp {
    let method = req.method().as_str();
    let path = req.uri().path();

    tracing::debug!(method, path, "request");

    match (method, path) {
        ("GET", "/") => {
            let vm = {
                let view = state.view()?;
                MapPageVm {
                    phase: view.phase().clone(),
                    marker_count: view.map().markers().len(),
                    expand_on_launch: state.expand_on_launch,
                }
            };
            html_response(map_page(&vm))
        }
        ("GET", "/health") => json_response(&json!({ "status": "ok" })),
        ("GET", "/static/map.js") => {
            asset_response(MAP_JS, mime::APPLICATION_JAVASCRIPT_UTF_8.as_ref())
        }
        ("GET", "/static/main.css") => asset_response(MAIN_CSS, mime::TEXT_CSS_UTF_8.as_ref()),

        // Map data
        ("GET", "/api/map") => {
            state.ensure_loaded()?;
            let view = state.view()?;
            let snapshot = MapSnapshot::of(&view);
            json_response(&snapshot)
        }
        ("POST", "/api/reload") => {
            state.reload()?;
            let view = state.view()?;
            let snapshot = MapSnapshot::of(&view);
            json_response(&snapshot)
        }
        ("GET", "/api/listings") => {
            let view = state.view()?;
            let listings = view.listings();
            json_response(&listings)
        }

        // Detail panel. Selection lives in the client's panel markup.
        ("POST", "/details/close") => html_response(detail_panel(None)),
        ("GET", p) if p.starts_with("/listings/") => {
            let id = parse_listing_path(p, None)?;
            let panel = state.view()?.select(id)?;
            html_response(detail_panel(Some(&panel)))
        }
        ("POST", p) if p.starts_with("/listings/") => {
            let id = parse_listing_path(p, Some("details"))?;
            let host = host_session(&req);
            let pending = state.view()?.prepare_details(id, &host)?;
            // The view lock is released; relaying may block on the bot backend.
            let delivery = pending.send(&host)?;
            html_response(delivery_result(Some(&delivery)))
        }
        _ => Err(ServerError::NotFound),
    }
}

/// `/listings/{id}` or `/listings/{id}/{action}`.
fn parse_listing_path(path: &str, action: Option<&str>) -> Result<i64, ServerError> {
    let rest = path
        .strip_prefix("/listings/")
        .ok_or(ServerError::NotFound)?;

    let (raw_id, tail) = match rest.split_once('/') {
        Some((id, tail)) => (id, Some(tail)),
        None => (rest, None),
    };

    if tail != action {
        return Err(ServerError::NotFound);
    }

    raw_id
        .parse::<i64>()
        .map_err(|_| ServerError::BadRequest(format!("invalid listing id: {raw_id:?}")))
}
