/// playground-nn Studio
///
/// A JSON/SSE driver around a single playground session, meant to back a
/// browser front end. Served by a synchronous tiny_http server.
///
/// Run with:
///   cargo run --bin studio --release [config.json]
/// Then talk to http://127.0.0.1:7878
///
/// Endpoints:
///   GET  /state /network /data /config
///   POST /config /reset /regenerate /step /play /pause
///   GET  /train/events   (Server-Sent Events, one `step` event per iteration)

mod handlers;
mod routes;
mod state;
mod util;

use std::sync::{Arc, Mutex};
use tiny_http::Server;

use playground_nn::{Playground, PlaygroundConfig};
use state::StudioState;

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = match std::env::args().nth(1) {
        Some(path) => match PlaygroundConfig::load_json(&path) {
            Ok(config) => config,
            Err(e) => {
                log::error!("failed to load {path}: {e}");
                std::process::exit(1);
            }
        },
        None => PlaygroundConfig::default(),
    };

    let playground = match Playground::new(config) {
        Ok(p) => p,
        Err(e) => {
            log::error!("invalid configuration: {e}");
            std::process::exit(1);
        }
    };

    let addr = "127.0.0.1:7878";
    let server = match Server::http(addr) {
        Ok(server) => server,
        Err(e) => {
            log::error!("failed to bind {addr}: {e}");
            std::process::exit(1);
        }
    };
    log::info!("playground studio listening on http://{addr}");

    let shared_state = Arc::new(Mutex::new(StudioState::new(playground)));

    // Each request is dispatched on its own thread so the SSE handler
    // (which blocks for as long as the client listens) does not stall
    // regular requests.
    for request in server.incoming_requests() {
        let state_clone = shared_state.clone();
        std::thread::spawn(move || {
            routes::dispatch(request, state_clone);
        });
    }
}
