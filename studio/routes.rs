use std::io::Cursor;
use tiny_http::{Header, Method, Request, Response, StatusCode};

use crate::handlers;
use crate::state::SharedState;

// ---------------------------------------------------------------------------
// Response helpers
// ---------------------------------------------------------------------------

pub fn json_response(status: u16, body: String) -> Response<Cursor<Vec<u8>>> {
    let bytes = body.into_bytes();
    let len = bytes.len();
    Response::new(
        StatusCode(status),
        vec![Header::from_bytes(b"Content-Type", b"application/json").unwrap()],
        Cursor::new(bytes),
        Some(len),
        None,
    )
}

pub fn json_ok<T: serde::Serialize>(value: &T) -> Response<Cursor<Vec<u8>>> {
    match serde_json::to_string(value) {
        Ok(body) => json_response(200, body),
        Err(e) => error_response(500, &e.to_string()),
    }
}

pub fn error_response(status: u16, message: &str) -> Response<Cursor<Vec<u8>>> {
    json_response(status, serde_json::json!({ "error": message }).to_string())
}

pub fn not_found() -> Response<Cursor<Vec<u8>>> {
    error_response(404, "not found")
}

// ---------------------------------------------------------------------------
// Request dispatcher
// ---------------------------------------------------------------------------

/// Dispatches incoming requests to the appropriate handler.
///
/// All handlers (except SSE) receive a `&mut Request` or nothing so that the
/// dispatcher retains ownership and can call `request.respond(response)` at
/// the end. The SSE handler takes ownership to perform long-lived streaming.
pub fn dispatch(mut request: Request, state: SharedState) {
    let method = request.method().clone();
    let url = request.url().to_owned();
    let path = url.split('?').next().unwrap_or("").to_owned();
    log::debug!("{} {}", method, path);

    // SSE is long-lived; the handler takes ownership and drives the stream loop.
    if method == Method::Get && path == "/train/events" {
        handlers::train_sse::handle(request, state);
        return;
    }

    let response = match (method, path.as_str()) {
        // ── Session views ────────────────────────────────────────────────
        (Method::Get, "/state")   => handlers::session::handle_state(state),
        (Method::Get, "/network") => handlers::session::handle_network(state),
        (Method::Get, "/data")    => handlers::session::handle_data(state),
        (Method::Get, "/config")  => handlers::session::handle_config(state),

        // ── Configuration ────────────────────────────────────────────────
        (Method::Post, "/config")     => handlers::config::handle_post(&mut request, state),
        (Method::Post, "/reset")      => handlers::config::handle_reset(state),
        (Method::Post, "/regenerate") => handlers::config::handle_regenerate(state),

        // ── Training ─────────────────────────────────────────────────────
        (Method::Post, "/step")  => handlers::train::handle_step(state),
        (Method::Post, "/play")  => handlers::train::handle_play(state),
        (Method::Post, "/pause") => handlers::train::handle_pause(state),

        // ── 404 ──────────────────────────────────────────────────────────
        _ => not_found(),
    };

    let _ = request.respond(response);
}
