//! Wall clock. A left click toggles between time and date.

use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use chrono::Local;

use crate::modules::{Module, ModuleHandle};
use crate::protocol::{button, ClickEvent};

pub const DEFAULT_TIME_FORMAT: &str = "%H:%M:%S";
pub const DEFAULT_DATE_FORMAT: &str = "%a %Y-%m-%d";

const TICK: Duration = Duration::from_secs(1);

pub struct Clock {
    time_format: String,
    date_format: String,
    show_date: AtomicBool,
}

impl Default for Clock {
    fn default() -> Self {
        Self::new(DEFAULT_TIME_FORMAT)
    }
}

impl Clock {
    pub fn new(time_format: impl Into<String>) -> Self {
        Self {
            time_format: time_format.into(),
            date_format: DEFAULT_DATE_FORMAT.to_string(),
            show_date: AtomicBool::new(false),
        }
    }

    fn text(&self) -> String {
        let format = if self.show_date.load(Ordering::Relaxed) {
            &self.date_format
        } else {
            &self.time_format
        };
        Local::now().format(format).to_string()
    }
}

#[async_trait]
impl Module for Clock {
    fn name(&self) -> &str {
        "clock"
    }

    async fn run(&self, bar: ModuleHandle) -> anyhow::Result<()> {
        loop {
            bar.print(self.text(), true)?;
            if !bar.sleep(TICK).await {
                return Ok(());
            }
        }
    }

    async fn mouse_event(&self, bar: &ModuleHandle, event: ClickEvent) -> anyhow::Result<()> {
        if event.button == button::LEFT {
            self.show_date.fetch_xor(true, Ordering::Relaxed);
            bar.print(self.text(), true)?;
        }
        Ok(())
    }
}
