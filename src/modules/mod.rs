//! Module contract and built-in modules.
//!
//! A module implements [`Module`] and talks to the bar only through the
//! [`ModuleHandle`] it is given.

mod base;
pub mod builtin;
mod handle;

pub use base::{ArcModule, Module};
pub use handle::ModuleHandle;
