//! Base module trait.

use std::sync::Arc;

use async_trait::async_trait;

use super::ModuleHandle;
use crate::error::ModuleError;
use crate::protocol::ClickEvent;

/// A pluggable unit of status.
///
/// The bar calls [`run`](Module::run) exactly once, on its own task. Click
/// events are delivered from a different task, so implementations keep
/// mutable state behind interior mutability.
#[async_trait]
pub trait Module: Send + Sync {
    /// Name shown in diagnostics and logs.
    fn name(&self) -> &str {
        let full = std::any::type_name::<Self>();
        full.rsplit("::").next().unwrap_or(full)
    }

    /// Produce output until done or until the bar shuts down.
    ///
    /// Every module is expected to override this. The default fails, so a
    /// forgotten implementation shows up on the bar instead of rendering
    /// nothing.
    async fn run(&self, bar: ModuleHandle) -> anyhow::Result<()> {
        let _ = bar;
        Err(ModuleError::Unimplemented(self.name().to_string()).into())
    }

    /// React to a click on one of this module's segments.
    async fn mouse_event(&self, bar: &ModuleHandle, event: ClickEvent) -> anyhow::Result<()> {
        let _ = (bar, event);
        Ok(())
    }

    /// Clean up before the process exits. Runs under the shutdown grace period.
    async fn on_shutdown(&self, bar: &ModuleHandle) -> anyhow::Result<()> {
        let _ = bar;
        Ok(())
    }
}

/// Shared module for dynamic dispatch.
pub type ArcModule = Arc<dyn Module>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modules::handle::tests::handle_with_sink;

    struct Lazy;

    #[async_trait]
    impl Module for Lazy {}

    struct Named;

    #[async_trait]
    impl Module for Named {
        fn name(&self) -> &str {
            "named"
        }

        async fn run(&self, bar: ModuleHandle) -> anyhow::Result<()> {
            bar.print("ok", false)?;
            Ok(())
        }
    }

    #[test]
    fn test_default_name_is_type_name() {
        assert_eq!(Lazy.name(), "Lazy");
        assert_eq!(Named.name(), "named");
    }

    #[tokio::test]
    async fn test_default_run_fails_loudly() {
        let (handle, _sink) = handle_with_sink("aa");
        let err = Lazy.run(handle).await.unwrap_err();
        let err = err.downcast::<ModuleError>().unwrap();
        assert!(matches!(err, ModuleError::Unimplemented(ref name) if name == "Lazy"));
    }

    #[tokio::test]
    async fn test_default_hooks_are_noops() {
        let (handle, sink) = handle_with_sink("aa");
        let event: ClickEvent = serde_json::from_str(r#"{"name":"aa","button":1}"#).unwrap();
        Lazy.mouse_event(&handle, event).await.unwrap();
        Lazy.on_shutdown(&handle).await.unwrap();
        assert!(sink.contents().is_empty());
    }

    #[tokio::test]
    async fn test_overridden_run() {
        let (handle, _sink) = handle_with_sink("aa");
        Named.run(handle.clone()).await.unwrap();
        assert!(handle.current().is_some());
    }
}
