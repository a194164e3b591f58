//! Control logic — threshold evaluation, actuator ramps, and the two
//! stateful controllers (window safety, garage reconciliation).
//!
//! Everything in here is pure or port-driven; no module touches hardware
//! directly.

pub mod garage;
pub mod lighting;
pub mod ramp;
pub mod threshold;
pub mod window;
