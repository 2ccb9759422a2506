use std::io::Cursor;
use tiny_http::Response;

use crate::routes::json_ok;
use crate::state::{lock, SharedState};

// ---------------------------------------------------------------------------
// GET /state
// ---------------------------------------------------------------------------

/// Iteration, losses, player status and the recent loss history.
pub fn handle_state(state: SharedState) -> Response<Cursor<Vec<u8>>> {
    let st = lock(&state);
    let pg = &st.playground;
    let training = pg.state();
    let body = serde_json::json!({
        "iter":        training.iter,
        "lossTrain":   training.loss_train,
        "lossTest":    training.loss_test,
        "playing":     st.is_playing(),
        "shape":       training.network.shape(),
        "deadLinks":   training.network.num_dead_links(),
        "history":     pg.history().iter().collect::<Vec<_>>(),
    });
    drop(st);
    json_ok(&body)
}

// ---------------------------------------------------------------------------
// GET /network
// ---------------------------------------------------------------------------

/// Snapshot of the whole network: nodes, links and layers.
pub fn handle_network(state: SharedState) -> Response<Cursor<Vec<u8>>> {
    let snapshot = lock(&state).playground.snapshot();
    json_ok(&snapshot)
}

// ---------------------------------------------------------------------------
// GET /data
// ---------------------------------------------------------------------------

pub fn handle_data(state: SharedState) -> Response<Cursor<Vec<u8>>> {
    let data = lock(&state).playground.data().clone();
    json_ok(&data)
}

// ---------------------------------------------------------------------------
// GET /config
// ---------------------------------------------------------------------------

pub fn handle_config(state: SharedState) -> Response<Cursor<Vec<u8>>> {
    let config = lock(&state).playground.config().clone();
    json_ok(&config)
}
