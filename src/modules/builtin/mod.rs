//! Built-in modules.

mod clicks;
mod clock;

pub use clicks::ClickCounter;
pub use clock::{Clock, DEFAULT_DATE_FORMAT, DEFAULT_TIME_FORMAT};
