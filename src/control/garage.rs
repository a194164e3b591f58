//! Garage command reconciler.
//!
//! Two independent, asynchronous command sources — the remote store poll
//! and the local serial console — converge here.  They may repeat or
//! contradict each other; the reconciler resolves them into at most one
//! physical motion per logical change.
//!
//! The debounce policy is a single global "last action wins regardless of
//! origin": there is no per-source state, only the memory of the last
//! applied action.  A `remote:open` followed by a `serial:open` is one
//! ramp and one "already applied" log line.  Source labels are carried
//! for diagnostics only.

use log::info;

use crate::app::commands::{GarageAction, GarageCommand};
use crate::app::events::AppEvent;
use crate::app::ports::{ActuatorPort, ClockPort, EventSink, ServoId};
use crate::config::SystemConfig;
use crate::control::ramp::Ramp;

/// Sentinel for "the door has never been moved since boot".
pub const POSITION_UNKNOWN: i16 = -1;

pub struct GarageReconciler {
    /// Last action committed, across ALL sources.  `None` until the
    /// first command is applied.
    last_applied: Option<GarageAction>,
    /// Last committed servo angle, or [`POSITION_UNKNOWN`].  Mutated
    /// only when a motion ramp completes (or the position-match edge
    /// case commits without motion).
    last_position: i16,
    closed_deg: u8,
    open_deg: u8,
    step_delay_ms: u32,
}

impl GarageReconciler {
    pub fn new(config: &SystemConfig) -> Self {
        Self {
            last_applied: None,
            last_position: POSITION_UNKNOWN,
            closed_deg: config.garage_closed_deg,
            open_deg: config.garage_open_deg,
            step_delay_ms: config.garage_step_delay_ms,
        }
    }

    pub fn last_applied(&self) -> Option<GarageAction> {
        self.last_applied
    }

    /// Last committed angle; [`POSITION_UNKNOWN`] before the first motion.
    pub fn last_position(&self) -> i16 {
        self.last_position
    }

    /// Apply one candidate command.  Called once per source per tick.
    ///
    /// Idempotent on the action, not the source: if the action matches
    /// the last applied one, nothing happens — even when the repeat comes
    /// from a different source.  When the action differs, the door ramps
    /// between its fixed endpoints with the buzzer asserted, unless the
    /// committed position already equals the target (then the action is
    /// recorded without motion, so it is not reprocessed next tick).
    pub fn reconcile(
        &mut self,
        cmd: GarageCommand,
        hw: &mut impl ActuatorPort,
        clock: &impl ClockPort,
        sink: &mut impl EventSink,
    ) {
        let action = cmd.action();

        if self.last_applied == Some(action) {
            info!("[{}] garage {}: already applied", cmd.source, action.as_str());
            sink.emit(&AppEvent::GarageAlreadyApplied {
                action,
                source: cmd.source,
            });
            return;
        }

        let (from, to) = match action {
            GarageAction::Open => (self.closed_deg, self.open_deg),
            GarageAction::Close => (self.open_deg, self.closed_deg),
        };

        if self.last_position == i16::from(to) {
            // Position already matches the target endpoint.  Commit the
            // action without motion so the command is not reprocessed.
            info!(
                "[{}] garage {}: position already at {} degrees",
                cmd.source,
                action.as_str(),
                to
            );
            self.last_applied = Some(action);
            sink.emit(&AppEvent::GarageAlreadyApplied {
                action,
                source: cmd.source,
            });
            return;
        }

        info!("[{}] garage {}: moving {} -> {}", cmd.source, action.as_str(), from, to);
        hw.set_buzzer(true);
        for angle in Ramp::new(from, to) {
            hw.set_servo(ServoId::Garage, angle);
            clock.delay_ms(self.step_delay_ms);
        }
        hw.set_buzzer(false);

        self.last_applied = Some(action);
        self.last_position = i16::from(to);
        sink.emit(&AppEvent::GarageMoved {
            action,
            source: cmd.source,
        });
    }
}
