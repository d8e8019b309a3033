//! Termination signal listening.

use std::future::Future;

use crate::error::{BarError, BarResult};

/// Install a listener for `signum` and return a future that resolves when
/// the signal arrives.
///
/// The handler is installed immediately, so a signal delivered before the
/// future is first polled is not lost.
#[cfg(unix)]
pub fn stop_signal(signum: i32) -> BarResult<impl Future<Output = ()> + Send + 'static> {
    use tokio::signal::unix::{signal, SignalKind};

    if !(1..=64).contains(&signum) {
        return Err(BarError::UnknownSignal(signum));
    }
    let mut stream = signal(SignalKind::from_raw(signum)).map_err(|e| {
        tracing::error!(signum, error = %e, "failed to install signal handler");
        BarError::UnknownSignal(signum)
    })?;

    Ok(async move {
        stream.recv().await;
        tracing::info!(signum, "stop signal received");
    })
}

/// Without Unix signals only Ctrl-C can stop the bar.
#[cfg(not(unix))]
pub fn stop_signal(signum: i32) -> BarResult<impl Future<Output = ()> + Send + 'static> {
    if signum != crate::config::DEFAULT_STOP_SIGNAL {
        return Err(BarError::UnknownSignal(signum));
    }
    Ok(async move {
        let _ = tokio::signal::ctrl_c().await;
    })
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_rejects_out_of_range_signal() {
        assert!(matches!(stop_signal(0), Err(BarError::UnknownSignal(0))));
        assert!(matches!(stop_signal(1000), Err(BarError::UnknownSignal(1000))));
    }

    #[tokio::test]
    async fn test_forbidden_signal_is_an_error() {
        // SIGKILL cannot be handled.
        assert!(matches!(stop_signal(9), Err(BarError::UnknownSignal(9))));
    }
}
