use crate::app::AppState;
use crate::config::AppConfig;
use crate::router::respond;
use astra::Server;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod app;
mod bridge;
mod config;
mod db;
mod domain;
mod errors;
mod map;
mod responses;
mod router;
mod source;
mod templates;
mod view;


fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,listing_map=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_target(true))
        .init();

    // 1️⃣ Read configuration
    let cfg = match AppConfig::from_env() {
        Ok(cfg) => cfg,
        Err(e) => {
            tracing::error!(error = %e, "❌ configuration error");
            std::process::exit(1);
        }
    };

    // 2️⃣ Wire the data source and host bridge into the view
    let state = match AppState::from_config(&cfg) {
        Ok(state) => state,
        Err(e) => {
            tracing::error!(error = %e, "❌ startup failed");
            std::process::exit(1);
        }
    };

    // 3️⃣ Start the server
    tracing::info!(addr = %cfg.addr, workers = cfg.workers, "starting server at http://{}", cfg.addr);

    let server = Server::bind(&cfg.addr).max_workers(cfg.workers);

    let result = server.serve(move |req, _info| respond(req, &state));

    if let Err(e) = result {
        tracing::error!(error = %e, "server ended with error");
    }

    tracing::info!("server shut down cleanly");
}
