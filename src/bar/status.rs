//! Shared status state: the output map plus the sink it is flushed to.

use std::io::Write;
use std::sync::{Mutex, MutexGuard, PoisonError};

use super::output::{Output, OutputMap};
use crate::error::BarResult;
use crate::ident::ModuleId;
use crate::protocol::{encode_status, Segment};

/// Destination of the protocol stream.
pub type Sink = Box<dyn Write + Send>;

pub(crate) fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Output map and sink, shared by the bar and every module handle.
///
/// Neither lock is held across an await point.
pub struct StatusBoard {
    output: Mutex<OutputMap>,
    sink: Mutex<Sink>,
}

impl StatusBoard {
    pub fn new(sink: Sink) -> Self {
        Self {
            output: Mutex::new(OutputMap::new()),
            sink: Mutex::new(sink),
        }
    }

    pub fn add_slot(&self, id: ModuleId) {
        lock(&self.output).add_slot(id);
    }

    pub fn set(&self, id: &ModuleId, value: Output, urgent: bool) {
        lock(&self.output).set(id, value, urgent);
    }

    pub fn remove(&self, id: &ModuleId) -> bool {
        lock(&self.output).remove(id)
    }

    pub fn get(&self, id: &ModuleId) -> Option<Output> {
        lock(&self.output).get(id).cloned()
    }

    pub fn clear(&self) {
        lock(&self.output).clear();
    }

    /// Consistent snapshot of all segments.
    pub fn segments(&self) -> Vec<Segment> {
        lock(&self.output).segments()
    }

    /// Encode the current status line.
    pub fn render(&self) -> BarResult<String> {
        encode_status(&self.segments())
    }

    /// Write raw protocol text and flush it.
    pub fn write(&self, text: &str) -> BarResult<()> {
        let mut sink = lock(&self.sink);
        sink.write_all(text.as_bytes())?;
        sink.flush()?;
        Ok(())
    }

    /// Render and write the full current status.
    ///
    /// The sink lock is taken before the snapshot, so lines reach the sink
    /// in the order their snapshots were taken.
    pub fn flush(&self) -> BarResult<()> {
        let mut sink = lock(&self.sink);
        let line = self.render()?;
        sink.write_all(line.as_bytes())?;
        sink.flush()?;
        Ok(())
    }
}
