use std::sync::mpsc::RecvTimeoutError;
use std::time::Duration;
use tiny_http::Request;

use crate::state::{lock, SharedState};
use crate::util::sse::{format_sse_event, write_sse, SSE_HEADER, SSE_KEEPALIVE};

/// `GET /train/events`: Server-Sent Events stream of step statistics.
///
/// Takes ownership of `request` so it can write to the raw connection. On
/// connect the current loss history is replayed as `step` events; afterwards
/// every step taken by any client (manual step, player, reset) is forwarded.
/// A `: ping` comment is sent after 500 ms without a step. The loop ends when
/// a write fails, which is how a closed browser tab shows up.
pub fn handle(request: Request, state: SharedState) {
    let mut writer = request.into_writer();
    if write_sse(&mut writer, SSE_HEADER).is_err() {
        return;
    }

    let (rx, replay) = {
        let mut st = lock(&state);
        let replay: Vec<_> = st.playground.history().iter().cloned().collect();
        (st.subscribe(), replay)
    };
    log::debug!("SSE client connected, replaying {} entries", replay.len());

    for stats in &replay {
        match format_sse_event("step", stats) {
            Ok(frame) => {
                if write_sse(&mut writer, &frame).is_err() {
                    return;
                }
            }
            Err(e) => log::warn!("could not encode step stats: {e}"),
        }
    }

    loop {
        let frame = match rx.recv_timeout(Duration::from_millis(500)) {
            Ok(stats) => match format_sse_event("step", &stats) {
                Ok(frame) => frame,
                Err(e) => {
                    log::warn!("could not encode step stats: {e}");
                    continue;
                }
            },
            Err(RecvTimeoutError::Timeout) => SSE_KEEPALIVE.to_owned(),
            Err(RecvTimeoutError::Disconnected) => return,
        };
        if write_sse(&mut writer, &frame).is_err() {
            log::debug!("SSE client disconnected");
            return;
        }
    }
}
