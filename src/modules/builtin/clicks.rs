//! Counts clicks per segment. Mostly useful for checking a bar setup.

use std::sync::atomic::{AtomicU64, Ordering};

use async_trait::async_trait;

use crate::modules::{Module, ModuleHandle};
use crate::protocol::ClickEvent;

const LABELS: [&str; 2] = ["L", "R"];

#[derive(Default)]
pub struct ClickCounter {
    counts: [AtomicU64; 2],
}

impl ClickCounter {
    pub fn new() -> Self {
        Self::default()
    }

    fn segments(&self) -> Vec<String> {
        LABELS
            .iter()
            .zip(&self.counts)
            .map(|(label, count)| format!("{label} {}", count.load(Ordering::Relaxed)))
            .collect()
    }
}

#[async_trait]
impl Module for ClickCounter {
    fn name(&self) -> &str {
        "clicks"
    }

    async fn run(&self, bar: ModuleHandle) -> anyhow::Result<()> {
        bar.print(self.segments(), true)?;
        bar.cancelled().await;
        Ok(())
    }

    async fn mouse_event(&self, bar: &ModuleHandle, event: ClickEvent) -> anyhow::Result<()> {
        let slot = event
            .instance
            .as_deref()
            .and_then(|s| s.parse::<usize>().ok())
            .and_then(|i| self.counts.get(i));
        if let Some(count) = slot {
            count.fetch_add(1, Ordering::Relaxed);
            bar.print(self.segments(), true)?;
        }
        Ok(())
    }
}
