//! Swaystatus Library
//!
//! Runtime for status-bar programs speaking the swaybar/i3bar protocol.
//! Independent [`Module`]s each render a piece of text; the [`Bar`] merges
//! their output into one endless JSON stream on stdout and routes click
//! events read from stdin back to the module that was clicked.
//!
//! ## Main Components
//!
//! - [`bar`] - Module registry, status rendering, event loop and shutdown
//! - [`modules`] - The `Module` trait, `ModuleHandle` and built-in modules
//! - [`protocol`] - Header, segment and click-event wire types and framing
//! - [`ident`] - Short collision-free module identifiers
//! - [`config`] - Runtime configuration
//!
//! ## Quick Start
//!
//! ```ignore
//! use swaystatus::{Bar, BarConfig, Module, ModuleHandle};
//!
//! struct Hello;
//!
//! #[async_trait::async_trait]
//! impl Module for Hello {
//!     async fn run(&self, bar: ModuleHandle) -> anyhow::Result<()> {
//!         bar.print("hello", true)?;
//!         bar.cancelled().await;
//!         Ok(())
//!     }
//! }
//!
//! let bar = Bar::stdout(BarConfig::default());
//! bar.register(Hello)?;
//! bar.run(tokio::io::stdin(), swaystatus::bar::stop_signal(2)?).await?;
//! ```

pub mod bar;
pub mod config;
pub mod error;
pub mod ident;
pub mod modules;
pub mod protocol;

pub use bar::{Bar, LifecycleState, Output, ShutdownReason};
pub use config::BarConfig;
pub use error::{BarError, BarResult, ModuleError};
pub use ident::{IdAllocator, ModuleId, RandomSource};
pub use modules::{ArcModule, Module, ModuleHandle};
pub use protocol::{ClickEvent, Header, Segment};
