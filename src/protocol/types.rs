//! Wire types of the swaybar/i3bar protocol.

use serde::{Deserialize, Serialize};

use crate::ident::ModuleId;

/// Protocol version announced in the header.
pub const PROTOCOL_VERSION: u32 = 1;

/// Handshake object written once before the status stream.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Header {
    pub version: u32,
    pub click_events: bool,
    pub stop_signal: i32,
    pub cont_signal: i32,
}

impl Header {
    pub fn new(click_events: bool, stop_signal: i32, cont_signal: i32) -> Self {
        Self {
            version: PROTOCOL_VERSION,
            click_events,
            stop_signal,
            cont_signal,
        }
    }
}

/// One rendered block of a status line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Segment {
    pub full_text: String,
    pub urgent: bool,
    /// Owning module, echoed back by the host on click.
    pub name: ModuleId,
    /// Position within a multi-segment output.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub instance: Option<String>,
}

/// A click on a previously rendered segment.
///
/// Unknown fields sent by the host are ignored.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ClickEvent {
    /// Identifier of the module that rendered the clicked segment.
    pub name: ModuleId,
    #[serde(default)]
    pub instance: Option<String>,
    #[serde(default)]
    pub x: f64,
    #[serde(default)]
    pub y: f64,
    pub button: u32,
    /// Raw input event code (e.g. `BTN_LEFT` = 272).
    #[serde(default)]
    pub event: u32,
    #[serde(default)]
    pub relative_x: f64,
    #[serde(default)]
    pub relative_y: f64,
    #[serde(default)]
    pub width: f64,
    #[serde(default)]
    pub height: f64,
    #[serde(default)]
    pub modifiers: Vec<String>,
    #[serde(default)]
    pub scale: Option<f64>,
}

/// Conventional X11 button numbers.
pub mod button {
    pub const LEFT: u32 = 1;
    pub const MIDDLE: u32 = 2;
    pub const RIGHT: u32 = 3;
    pub const SCROLL_UP: u32 = 4;
    pub const SCROLL_DOWN: u32 = 5;
}
