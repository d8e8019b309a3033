//! Encoding of the outgoing stream and decoding of click-event lines.
//!
//! Both directions use "open-array framing": an opening `[` is sent once
//! and never closed, and every element after the first is introduced (or
//! terminated) by a `,`.

use super::types::{ClickEvent, Header, Segment};
use crate::error::BarResult;

/// Token that opens the endless array.
pub const OPEN_ARRAY: &str = "[";

/// Element separator inside the endless array.
pub const SEPARATOR: char = ',';

/// Encode the handshake header as one line.
pub fn encode_header(header: &Header) -> BarResult<String> {
    let mut line = serde_json::to_string(header)?;
    line.push('\n');
    Ok(line)
}

/// Encode the token that starts the status stream.
pub fn encode_stream_start() -> String {
    format!("{OPEN_ARRAY}\n")
}

/// Encode one status update followed by the element separator.
pub fn encode_status(segments: &[Segment]) -> BarResult<String> {
    let mut line = serde_json::to_string(segments)?;
    line.push(SEPARATOR);
    line.push('\n');
    Ok(line)
}

/// Result of decoding a single input line.
#[derive(Debug)]
pub enum InputLine {
    /// Framing only (the array-open token or a blank line).
    Framing,
    Click(ClickEvent),
    Malformed(serde_json::Error),
}

/// Decode one line of the click-event stream.
pub fn decode_line(line: &str) -> InputLine {
    let line = line.trim();
    if line.is_empty() || line == OPEN_ARRAY {
        return InputLine::Framing;
    }

    let body = line.strip_prefix(SEPARATOR).unwrap_or(line);
    match serde_json::from_str::<ClickEvent>(body) {
        Ok(event) => InputLine::Click(event),
        Err(e) => InputLine::Malformed(e),
    }
}
