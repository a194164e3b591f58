//! Application core — pure domain logic, zero I/O.
//!
//! This module contains the business rules for the HomeSentry controller:
//! the poll cycle, window safety response, and garage command
//! reconciliation.  All interaction with hardware, the remote store, and
//! the serial console happens through **port traits** defined in [`ports`],
//! keeping this layer fully testable without real peripherals or network.

pub mod commands;
pub mod events;
pub mod ports;
pub mod service;
