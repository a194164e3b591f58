//! HomeSentry firmware library.
//!
//! Exposes the pure-logic modules for integration testing and external
//! inspection.  All ESP-IDF-specific code is guarded by
//! `#[cfg(target_os = "espidf")]` within each module.

#![deny(unused_must_use)]

pub mod app;
pub mod config;
pub mod control;

mod error;
pub mod pins;

pub use error::{Error, Result, StoreError};

// Re-export the hardware-facing modules; the real implementations are
// guarded by cfg attributes inside, with host simulation fallbacks.
pub mod adapters;
pub mod drivers;
pub mod sensors;
