//! Bar lifecycle state machine: `Idle → Running → Draining → Terminated`.

use std::fmt;
use std::sync::atomic::{AtomicU8, Ordering};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LifecycleState {
    Idle,
    Running,
    Draining,
    Terminated,
}

impl LifecycleState {
    const fn as_u8(self) -> u8 {
        match self {
            Self::Idle => 0,
            Self::Running => 1,
            Self::Draining => 2,
            Self::Terminated => 3,
        }
    }

    const fn from_u8(value: u8) -> Self {
        match value {
            1 => Self::Running,
            2 => Self::Draining,
            3 => Self::Terminated,
            _ => Self::Idle,
        }
    }
}

impl fmt::Display for LifecycleState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Idle => "idle",
            Self::Running => "running",
            Self::Draining => "draining",
            Self::Terminated => "terminated",
        };
        f.write_str(name)
    }
}

/// Why the bar stopped running.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShutdownReason {
    /// The stop signal (or the caller's stop future) fired.
    Signal,
    /// The host closed the click-event stream.
    EndOfInput,
}

/// Atomic holder of the current [`LifecycleState`].
#[derive(Debug)]
pub struct Lifecycle {
    state: AtomicU8,
}

impl Default for Lifecycle {
    fn default() -> Self {
        Self::new()
    }
}

impl Lifecycle {
    pub const fn new() -> Self {
        Self {
            state: AtomicU8::new(LifecycleState::Idle.as_u8()),
        }
    }

    pub fn get(&self) -> LifecycleState {
        LifecycleState::from_u8(self.state.load(Ordering::Acquire))
    }

    /// Move from `from` to `to`; fails if the current state is not `from`.
    pub fn advance(&self, from: LifecycleState, to: LifecycleState) -> bool {
        let moved = self
            .state
            .compare_exchange(from.as_u8(), to.as_u8(), Ordering::AcqRel, Ordering::Acquire)
            .is_ok();
        if moved {
            tracing::info!(%from, %to, "bar lifecycle transition");
        }
        moved
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_starts_idle() {
        assert_eq!(Lifecycle::new().get(), LifecycleState::Idle);
    }

    #[test]
    fn test_full_transition_chain() {
        let lifecycle = Lifecycle::new();
        assert!(lifecycle.advance(LifecycleState::Idle, LifecycleState::Running));
        assert!(lifecycle.advance(LifecycleState::Running, LifecycleState::Draining));
        assert!(lifecycle.advance(LifecycleState::Draining, LifecycleState::Terminated));
        assert_eq!(lifecycle.get(), LifecycleState::Terminated);
    }

    #[test]
    fn test_cannot_start_twice() {
        let lifecycle = Lifecycle::new();
        assert!(lifecycle.advance(LifecycleState::Idle, LifecycleState::Running));
        assert!(!lifecycle.advance(LifecycleState::Idle, LifecycleState::Running));
        assert_eq!(lifecycle.get(), LifecycleState::Running);
    }

    #[test]
    fn test_state_display() {
        assert_eq!(LifecycleState::Draining.to_string(), "draining");
    }
}
