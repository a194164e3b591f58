//! Log-based event sink adapter.
//!
//! Implements [`EventSink`] by writing structured application events to
//! the logger (UART in production).  An MQTT or display adapter would
//! implement the same trait.

use log::{info, warn};

use crate::app::events::AppEvent;
use crate::app::ports::EventSink;
use crate::control::threshold::HazardState;

/// Adapter that logs every [`AppEvent`] to the serial console.
pub struct LogEventSink;

impl LogEventSink {
    pub fn new() -> Self {
        Self
    }
}

impl EventSink for LogEventSink {
    fn emit(&mut self, event: &AppEvent) {
        match event {
            AppEvent::Started => {
                info!("START | controller entering poll loop");
            }
            AppEvent::Telemetry(t) => {
                info!(
                    "TELEM | T={:.2}\u{00b0}C | H={:.1}% | gas={} ({}) | motion={} | \
                     window={} | garage_pos={}",
                    t.temperature_c,
                    t.humidity_pct,
                    t.gas_level,
                    if t.hazard == HazardState::Hazard {
                        "HAZARD"
                    } else {
                        "normal"
                    },
                    u8::from(t.motion_detected),
                    if t.window_open { "open" } else { "closed" },
                    t.garage_position,
                );
            }
            AppEvent::WindowOpened => {
                warn!("WINDOW | opened (gas hazard response)");
            }
            AppEvent::WindowClosed => {
                info!("WINDOW | closed (gas level normal)");
            }
            AppEvent::GarageMoved { action, source } => {
                info!("GARAGE | [{}] {} completed", source, action.as_str());
            }
            AppEvent::GarageAlreadyApplied { action, source } => {
                info!("GARAGE | [{}] {} already applied", source, action.as_str());
            }
            AppEvent::StoreUnavailable { path } => {
                warn!("STORE | {} unavailable this cycle", path);
            }
        }
    }
}
