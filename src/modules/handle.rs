//! The bar operations a module may call.

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use tokio_util::sync::CancellationToken;
use tracing::{error, warn};

use crate::bar::{Output, StatusBoard};
use crate::error::BarResult;
use crate::ident::ModuleId;

/// A module's view of the bar.
///
/// Every handle is bound to one identifier, so a module can only ever
/// change its own slot.
#[derive(Clone)]
pub struct ModuleHandle {
    id: ModuleId,
    name: Arc<str>,
    board: Arc<StatusBoard>,
    cancel: CancellationToken,
}

impl ModuleHandle {
    pub(crate) fn new(
        id: ModuleId,
        name: &str,
        board: Arc<StatusBoard>,
        cancel: CancellationToken,
    ) -> Self {
        Self {
            id,
            name: Arc::from(name),
            board,
            cancel,
        }
    }

    /// Identifier the host echoes back in click events.
    pub fn id(&self) -> &ModuleId {
        &self.id
    }

    /// Module name used in diagnostics and logs.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Set this module's output; with `sync` the whole status is flushed now.
    pub fn print(&self, value: impl Into<Output>, sync: bool) -> BarResult<()> {
        self.board.set(&self.id, value.into(), false);
        if sync {
            self.board.flush()?;
        }
        Ok(())
    }

    /// Like [`print`](Self::print), but marks the segments urgent.
    pub fn print_urgent(&self, value: impl Into<Output>, sync: bool) -> BarResult<()> {
        self.board.set(&self.id, value.into(), true);
        if sync {
            self.board.flush()?;
        }
        Ok(())
    }

    /// Remove this module from the status line. Hiding twice is a no-op.
    pub fn hide(&self, sync: bool) -> BarResult<()> {
        self.board.remove(&self.id);
        if sync {
            self.board.flush()?;
        }
        Ok(())
    }

    /// The value this module currently shows, if any.
    pub fn current(&self) -> Option<Output> {
        self.board.get(&self.id)
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancel.is_cancelled()
    }

    /// Resolves once the bar starts shutting down.
    pub async fn cancelled(&self) {
        self.cancel.cancelled().await;
    }

    /// Sleep for `duration`; returns `false` if the bar shut down meanwhile.
    pub async fn sleep(&self, duration: Duration) -> bool {
        tokio::select! {
            _ = self.cancel.cancelled() => false,
            _ = tokio::time::sleep(duration) => true,
        }
    }

    pub fn token(&self) -> &CancellationToken {
        &self.cancel
    }

    /// Replace this module's output with an urgent diagnostic.
    pub(crate) fn fail(&self, fault: &dyn fmt::Display) {
        warn!(module = %self.name, id = %self.id, error = %fault, "module fault");
        if let Err(e) = self.print_urgent(format!("{}: {}", self.name, fault), true) {
            error!(module = %self.name, error = %e, "failed to render module fault");
        }
    }
}

impl fmt::Debug for ModuleHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ModuleHandle")
            .field("id", &self.id)
            .field("name", &self.name)
            .finish()
    }
}
