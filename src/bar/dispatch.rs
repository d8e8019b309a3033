//! Click-event input loop.

use std::collections::HashMap;

use tokio::io::{AsyncBufReadExt, AsyncRead, BufReader};
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

use super::supervise::contain;
use super::Registered;
use crate::ident::ModuleId;
use crate::protocol::{decode_line, InputLine};

/// How the input loop ended.
#[derive(Debug)]
pub(crate) enum InputEnd {
    EndOfInput,
    Cancelled,
}

/// Read click events until end of input or cancellation.
///
/// Malformed lines and events for unknown modules are dropped.
pub(crate) async fn dispatch_input<R>(
    input: R,
    modules: &HashMap<ModuleId, Registered>,
    cancel: &CancellationToken,
) -> InputEnd
where
    R: AsyncRead + Unpin,
{
    let mut reader = BufReader::new(input);
    let mut buf = Vec::new();

    loop {
        buf.clear();
        let read = tokio::select! {
            _ = cancel.cancelled() => return InputEnd::Cancelled,
            read = reader.read_until(b'\n', &mut buf) => read,
        };

        match read {
            Ok(0) => return InputEnd::EndOfInput,
            Ok(_) => match std::str::from_utf8(&buf) {
                Ok(line) => dispatch_line(line, modules).await,
                Err(e) => debug!(error = %e, "discarding non-UTF-8 input line"),
            },
            Err(e) => {
                warn!(error = %e, "click event stream failed");
                return InputEnd::EndOfInput;
            }
        }
    }
}

/// Decode one line and deliver it to its module.
pub(crate) async fn dispatch_line(line: &str, modules: &HashMap<ModuleId, Registered>) {
    let event = match decode_line(line) {
        InputLine::Framing => return,
        InputLine::Malformed(e) => {
            debug!(error = %e, line = line.trim(), "discarding malformed click event");
            return;
        }
        InputLine::Click(event) => event,
    };

    let Some(entry) = modules.get(&event.name) else {
        debug!(id = %event.name, "click event for unknown module");
        return;
    };

    debug!(module = %entry.handle.name(), button = event.button, "dispatching click event");
    if let Err(e) = contain(entry.module.mouse_event(&entry.handle, event)).await {
        entry.handle.fail(&format!("{e:#}"));
    }
}
