use std::io::{self, Write};

use serde::Serialize;

/// Status line and headers of an SSE stream, written before any event.
pub const SSE_HEADER: &str = "HTTP/1.1 200 OK\r\n\
                              Content-Type: text/event-stream\r\n\
                              Cache-Control: no-cache\r\n\
                              Connection: keep-alive\r\n\
                              X-Accel-Buffering: no\r\n\
                              \r\n";

/// Keep-alive comment. EventSource clients ignore it, but it stops idle
/// connections from timing out.
pub const SSE_KEEPALIVE: &str = ": ping\n\n";

/// Formats a named SSE event with a JSON data payload:
///
/// ```text
/// event: <name>
/// data: <json>
///
/// ```
pub fn format_sse_event<T: Serialize>(event_name: &str, value: &T) -> serde_json::Result<String> {
    Ok(format!("event: {}\ndata: {}\n\n", event_name, serde_json::to_string(value)?))
}

/// Writes one SSE frame and flushes it. An error means the client went away.
pub fn write_sse<W: Write>(writer: &mut W, msg: &str) -> io::Result<()> {
    writer.write_all(msg.as_bytes())?;
    writer.flush()
}
