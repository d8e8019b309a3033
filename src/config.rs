//! Runtime configuration.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::ident::DEFAULT_ID_LEN;

/// SIGINT.
pub const DEFAULT_STOP_SIGNAL: i32 = 2;
/// SIGCONT.
pub const DEFAULT_CONT_SIGNAL: i32 = 18;
pub const DEFAULT_SHUTDOWN_GRACE_MS: u64 = 1000;

/// Settings for one bar instance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BarConfig {
    /// Length of generated module identifiers.
    pub id_len: usize,
    /// Signal the host sends to request termination.
    pub stop_signal: i32,
    /// Signal announced to the host as the continue signal.
    pub cont_signal: i32,
    /// Whether the host should send click events.
    pub click_events: bool,
    /// Time allowed for shutdown hooks and task cancellation.
    pub shutdown_grace_ms: u64,
}

impl Default for BarConfig {
    fn default() -> Self {
        Self {
            id_len: DEFAULT_ID_LEN,
            stop_signal: DEFAULT_STOP_SIGNAL,
            cont_signal: DEFAULT_CONT_SIGNAL,
            click_events: true,
            shutdown_grace_ms: DEFAULT_SHUTDOWN_GRACE_MS,
        }
    }
}

impl BarConfig {
    pub fn shutdown_grace(&self) -> Duration {
        Duration::from_millis(self.shutdown_grace_ms)
    }

    pub fn with_id_len(mut self, id_len: usize) -> Self {
        self.id_len = id_len;
        self
    }

    pub fn with_shutdown_grace(mut self, grace: Duration) -> Self {
        self.shutdown_grace_ms = u64::try_from(grace.as_millis()).unwrap_or(u64::MAX);
        self
    }
}
