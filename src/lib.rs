//! Fieldglance library crate: hover tooltips showing how long crops, trees
//! and machines have left.
//!
//! The binary (`main.rs`) is a headless demo that feeds a farm snapshot and
//! prints tooltips as JSON lines. This library crate exposes the same modules
//! so that `tests/` integration tests and a host game can use the plugins
//! directly.

pub mod shared;
pub mod config;
pub mod content;
pub mod data;
pub mod inspect;
