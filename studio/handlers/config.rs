use std::io::{Cursor, Read};
use tiny_http::{Request, Response};

use playground_nn::PlaygroundConfig;

use crate::routes::{error_response, json_ok};
use crate::state::{lock, SharedState};

/// Largest accepted configuration body.
const MAX_CONFIG_BYTES: u64 = 64 * 1024;

// ---------------------------------------------------------------------------
// POST /config
// ---------------------------------------------------------------------------

/// Replaces the configuration with the JSON body. Missing fields take their
/// defaults. Regenerates the data when needed and always rebuilds the
/// network; broadcasts the iteration-0 losses.
pub fn handle_post(request: &mut Request, state: SharedState) -> Response<Cursor<Vec<u8>>> {
    let mut body = String::new();
    if let Err(e) = request.as_reader().take(MAX_CONFIG_BYTES).read_to_string(&mut body) {
        return error_response(400, &format!("could not read body: {e}"));
    }

    let config: PlaygroundConfig = match serde_json::from_str(&body) {
        Ok(c) => c,
        Err(e) => return error_response(400, &format!("invalid configuration JSON: {e}")),
    };

    let mut st = lock(&state);
    if let Err(e) = st.playground.set_config(config) {
        return error_response(400, &e.to_string());
    }
    let stats = st.playground.state().stats(0);
    st.broadcast(&stats);
    json_ok(st.playground.config())
}

// ---------------------------------------------------------------------------
// POST /reset
// ---------------------------------------------------------------------------

pub fn handle_reset(state: SharedState) -> Response<Cursor<Vec<u8>>> {
    let mut st = lock(&state);
    if let Err(e) = st.playground.reset() {
        return error_response(400, &e.to_string());
    }
    let stats = st.playground.state().stats(0);
    st.broadcast(&stats);
    json_ok(&stats)
}

// ---------------------------------------------------------------------------
// POST /regenerate
// ---------------------------------------------------------------------------

pub fn handle_regenerate(state: SharedState) -> Response<Cursor<Vec<u8>>> {
    let mut st = lock(&state);
    if let Err(e) = st.playground.regenerate() {
        return error_response(400, &e.to_string());
    }
    let stats = st.playground.state().stats(0);
    st.broadcast(&stats);
    json_ok(&stats)
}
