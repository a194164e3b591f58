//! Outbound application events.
//!
//! The [`AppService`](super::service::AppService) and the controllers emit
//! these through the [`EventSink`](super::ports::EventSink) port.  Adapters
//! on the other side decide what to do with them — today that is the serial
//! log; nothing consumes them back into the control flow.

use super::commands::{CommandSource, GarageAction};
use crate::control::threshold::HazardState;

/// Structured events emitted by the application core.
#[derive(Debug, Clone)]
pub enum AppEvent {
    /// The controller finished startup and entered the poll loop.
    Started,

    /// Coarse-cycle sensor snapshot narration.
    Telemetry(TelemetryData),

    /// The window safety controller completed an opening ramp.
    WindowOpened,

    /// The window safety controller completed a closing ramp.
    WindowClosed,

    /// The garage reconciler completed a motion ramp.
    GarageMoved {
        action: GarageAction,
        source: CommandSource,
    },

    /// A command repeated the last applied action — no motion performed.
    GarageAlreadyApplied {
        action: GarageAction,
        source: CommandSource,
    },

    /// A remote store operation failed this cycle; the value was skipped.
    StoreUnavailable { path: &'static str },
}

/// A point-in-time snapshot suitable for logging or transmission.
#[derive(Debug, Clone)]
pub struct TelemetryData {
    pub temperature_c: f32,
    pub humidity_pct: f32,
    pub gas_level: u16,
    pub hazard: HazardState,
    pub motion_detected: bool,
    pub window_open: bool,
    /// Last committed garage angle, -1 if the door has never moved.
    pub garage_position: i16,
}
