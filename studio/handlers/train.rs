use std::io::Cursor;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::Duration;
use tiny_http::Response;

use playground_nn::{play_loop, PlayConfig};

use crate::routes::{error_response, json_ok};
use crate::state::{lock, PlayerStatus, SharedState};

/// Pause between two steps of the player.
const PLAY_INTERVAL: Duration = Duration::from_millis(100);

// ---------------------------------------------------------------------------
// POST /step
// ---------------------------------------------------------------------------

/// Runs one training step. Refused while the player is running.
pub fn handle_step(state: SharedState) -> Response<Cursor<Vec<u8>>> {
    let mut st = lock(&state);
    if st.is_playing() {
        return error_response(409, "pause the player before stepping");
    }
    match st.step() {
        Ok(stats) => json_ok(&stats),
        Err(e) => error_response(500, &e.to_string()),
    }
}

// ---------------------------------------------------------------------------
// POST /play
// ---------------------------------------------------------------------------

/// Starts a background thread stepping the playground until paused.
pub fn handle_play(state: SharedState) -> Response<Cursor<Vec<u8>>> {
    let stop_flag = Arc::new(AtomicBool::new(false));
    {
        let mut st = lock(&state);
        if st.is_playing() {
            return json_ok(&serde_json::json!({ "playing": true }));
        }
        st.player = PlayerStatus::Playing { stop_flag: Arc::clone(&stop_flag) };
    }

    let thread_state = Arc::clone(&state);
    let thread_flag = Arc::clone(&stop_flag);
    thread::spawn(move || {
        let config = PlayConfig {
            iterations: None,
            interval: PLAY_INTERVAL,
            progress_tx: None,
            stop_flag: Some(Arc::clone(&thread_flag)),
        };
        // The lock is held for one step only, so readers see every iteration.
        let result = play_loop(|| lock(&thread_state).step_unless_stopped(&thread_flag), &config);
        match result {
            Ok(last) => log::info!(
                "player stopped at iteration {}",
                last.map(|s| s.iter).unwrap_or_default()
            ),
            Err(e) => log::error!("player stopped on error: {e}"),
        }

        let mut st = lock(&thread_state);
        if let PlayerStatus::Playing { stop_flag } = &st.player {
            if Arc::ptr_eq(stop_flag, &thread_flag) {
                st.player = PlayerStatus::Paused;
            }
        }
    });

    log::info!("player started");
    json_ok(&serde_json::json!({ "playing": true }))
}

// ---------------------------------------------------------------------------
// POST /pause
// ---------------------------------------------------------------------------

pub fn handle_pause(state: SharedState) -> Response<Cursor<Vec<u8>>> {
    let mut st = lock(&state);
    if let PlayerStatus::Playing { stop_flag } = &st.player {
        stop_flag.store(true, Ordering::Relaxed);
    }
    st.player = PlayerStatus::Paused;
    let iter = st.playground.iter();
    json_ok(&serde_json::json!({ "playing": false, "iter": iter }))
}
