//! Per-module task boundary: faults raised by module code stop here.

use std::any::Any;
use std::future::Future;
use std::panic::AssertUnwindSafe;

use futures::FutureExt;
use tracing::debug;

use super::Registered;
use crate::error::ModuleError;

/// Await module code, turning a panic into an error.
pub(crate) async fn contain<F>(fut: F) -> anyhow::Result<()>
where
    F: Future<Output = anyhow::Result<()>>,
{
    match AssertUnwindSafe(fut).catch_unwind().await {
        Ok(result) => result,
        Err(payload) => Err(ModuleError::Panicked(panic_message(payload.as_ref())).into()),
    }
}

pub(crate) fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    }
}

/// Body of a module task.
///
/// Runs the module until it returns or the bar cancels it. A fault is
/// rendered in the module's own slot and ends only this task.
pub(crate) async fn run_module(entry: Registered) {
    let Registered { module, handle } = entry;
    let run = contain(module.run(handle.clone()));

    tokio::select! {
        _ = handle.cancelled() => {
            debug!(module = %handle.name(), id = %handle.id(), "module task cancelled");
        }
        result = run => match result {
            Ok(()) => debug!(module = %handle.name(), id = %handle.id(), "module finished"),
            Err(e) => handle.fail(&format!("{e:#}")),
        },
    }
}
