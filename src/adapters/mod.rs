//! Adapters — the outer ring.
//!
//! Everything that touches real hardware, the network, or the serial
//! console lives here, behind the port traits in
//! [`crate::app::ports`].  Each adapter carries a host-target simulation
//! path so the whole system runs under `cargo test` without an ESP32.

pub mod console;
pub mod hardware;
pub mod log_sink;
pub mod store;
pub mod time;
pub mod wifi;
