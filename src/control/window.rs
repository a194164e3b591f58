//! Window safety controller.
//!
//! Autonomous two-state machine coupling the gas threshold monitor to the
//! window servo.  Its state is the persistent memory of "is the window
//! currently open because of gas" — it is never re-derived from the
//! sensor, only transitioned on threshold crossings.
//!
//! A transition blocks the entire control loop for the full ramp
//! duration: physical safety actuation takes priority over the
//! responsiveness of everything else during that interval.  Actuation is
//! open-loop — there is no window position feedback sensor, and this
//! controller must not assume one.

use log::{info, warn};

use crate::app::events::AppEvent;
use crate::app::ports::{ActuatorPort, ClockPort, EventSink, ServoId};
use crate::config::SystemConfig;
use crate::control::ramp::Ramp;
use crate::control::threshold::HazardState;

/// The two committed window positions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WindowState {
    Closed,
    Open,
}

pub struct WindowController {
    state: WindowState,
    closed_deg: u8,
    open_deg: u8,
    step_delay_ms: u32,
    hold_ms: u32,
}

impl WindowController {
    /// Construct with the window closed at its closed angle.  The caller
    /// is responsible for having commanded the servo there at boot.
    pub fn new(config: &SystemConfig) -> Self {
        Self {
            state: WindowState::Closed,
            closed_deg: config.window_closed_deg,
            open_deg: config.window_open_deg,
            step_delay_ms: config.window_step_delay_ms,
            hold_ms: config.window_hold_ms,
        }
    }

    pub fn state(&self) -> WindowState {
        self.state
    }

    pub fn is_open(&self) -> bool {
        self.state == WindowState::Open
    }

    /// Evaluate the hazard reading against the current state.
    ///
    /// Exactly one ramp per state change: a hazard that persists across
    /// many cycles opens the window once, and a normal reading closes it
    /// once.  When state and hazard already agree this is a no-op.
    pub fn evaluate(
        &mut self,
        hazard: HazardState,
        hw: &mut impl ActuatorPort,
        clock: &impl ClockPort,
        sink: &mut impl EventSink,
    ) {
        match (self.state, hazard) {
            (WindowState::Closed, HazardState::Hazard) => {
                warn!("gas hazard detected — opening window");
                hw.set_buzzer(true);
                self.ramp(self.closed_deg, self.open_deg, hw, clock);
                // Cool-down hold: the next evaluation only becomes
                // effective after this interval.
                clock.delay_ms(self.hold_ms);
                hw.set_buzzer(false);
                self.state = WindowState::Open;
                sink.emit(&AppEvent::WindowOpened);
            }
            (WindowState::Open, HazardState::Normal) => {
                info!("gas level back to normal — closing window");
                hw.set_buzzer(false);
                self.ramp(self.open_deg, self.closed_deg, hw, clock);
                self.state = WindowState::Closed;
                sink.emit(&AppEvent::WindowClosed);
            }
            // State already consistent with the reading.
            _ => {}
        }
    }

    fn ramp(&self, from: u8, to: u8, hw: &mut impl ActuatorPort, clock: &impl ClockPort) {
        for angle in Ramp::new(from, to) {
            hw.set_servo(ServoId::Window, angle);
            clock.delay_ms(self.step_delay_ms);
        }
    }
}
