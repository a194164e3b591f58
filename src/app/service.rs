//! Application service — the poll cycle scheduler.
//!
//! [`AppService`] owns the window safety controller, the garage command
//! reconciler, and the coarse-cycle bookkeeping.  The main loop calls
//! [`run_iteration`](AppService::run_iteration) once per pass; everything
//! the system does happens inside that single sequential call.
//!
//! ```text
//!  SensorPort  ──▶ ┌──────────────────────────────┐ ──▶ EventSink
//!  StorePort  ◀──▶ │          AppService           │
//!  ConsolePort ──▶ │  threshold · window · garage  │
//!                  │          · lighting           │
//!  ActuatorPort ◀──└──────────────────────────────┘
//! ```
//!
//! Concurrency model: none.  The two command sources are interleaved by
//! being polled in sequence within one iteration; ramp delays block
//! everything, including reading newly arrived commands.

use log::{info, warn};

use crate::config::SystemConfig;
use crate::control::garage::GarageReconciler;
use crate::control::lighting;
use crate::control::threshold;
use crate::control::window::WindowController;

use super::commands::{parse_console_command, CommandSource, GarageCommand};
use super::events::{AppEvent, TelemetryData};
use super::ports::{
    ActuatorPort, ClockPort, ConsolePort, EventSink, SensorPort, ServoId, StorePort,
};

// Remote store paths published each coarse cycle.
pub const PATH_TEMP: &str = "globalData/temp";
pub const PATH_HUMIDITY: &str = "globalData/hum";
pub const PATH_GAS: &str = "globalData/gaz";
pub const PATH_MOTION: &str = "globalData/motion";
/// Remote garage command path (bool: true = open).
pub const PATH_GARAGE_DOOR: &str = "garage/garageDoor";

/// The application service orchestrates all domain logic.
pub struct AppService {
    config: SystemConfig,
    window: WindowController,
    garage: GarageReconciler,
    /// Uptime at which the last coarse cycle ran; 0 before the first.
    last_publish_ms: u64,
    coarse_cycles: u64,
}

impl AppService {
    pub fn new(config: SystemConfig) -> Self {
        let window = WindowController::new(&config);
        let garage = GarageReconciler::new(&config);
        Self {
            config,
            window,
            garage,
            last_publish_ms: 0,
            coarse_cycles: 0,
        }
    }

    // ── Lifecycle ─────────────────────────────────────────────

    /// Command the actuators to their boot positions and announce start.
    ///
    /// The garage reconciler still reports its position as unknown after
    /// this: the boot write is not a committed command.
    pub fn start(&mut self, hw: &mut impl ActuatorPort, sink: &mut impl EventSink) {
        hw.set_servo(ServoId::Window, self.config.window_closed_deg);
        hw.set_servo(ServoId::Garage, self.config.garage_closed_deg);
        hw.set_buzzer(false);
        hw.set_presence_indicators(false);
        sink.emit(&AppEvent::Started);
        info!("AppService started (window closed, garage position unknown)");
    }

    // ── Per-iteration orchestration ───────────────────────────

    /// One pass of the control loop.
    ///
    /// Every iteration: clear transient indicators, drain one console
    /// command, re-apply lighting.  When the coarse interval has elapsed:
    /// read sensors, publish, evaluate the hazard, and poll the remote
    /// garage command.  The caller sleeps `loop_idle_ms` afterwards.
    pub fn run_iteration(
        &mut self,
        hw: &mut (impl SensorPort + ActuatorPort),
        store: &mut impl StorePort,
        console: &mut impl ConsolePort,
        clock: &impl ClockPort,
        sink: &mut impl EventSink,
    ) {
        // Transient outputs default inactive; the coarse cycle re-asserts
        // them while motion is reported.
        hw.set_presence_indicators(false);

        let now = clock.uptime_ms();
        if now.saturating_sub(self.last_publish_ms) > u64::from(self.config.publish_interval_ms) {
            self.last_publish_ms = now;
            self.coarse_cycle(hw, store, clock, sink);
        }

        // Local console command — serviced every iteration, not just on
        // the coarse cadence.
        if let Some(line) = console.read_line() {
            if let Some(desired_open) = parse_console_command(&line) {
                self.garage.reconcile(
                    GarageCommand::new(desired_open, CommandSource::Console),
                    hw,
                    clock,
                    sink,
                );
            }
            // Anything unparseable is silently ignored.
        }

        // Lighting — re-applied from the latest remote values every pass.
        lighting::apply_lighting(store, hw);
    }

    /// The coarse cycle: sensor read → publish → hazard → remote garage.
    fn coarse_cycle(
        &mut self,
        hw: &mut (impl SensorPort + ActuatorPort),
        store: &mut impl StorePort,
        clock: &impl ClockPort,
        sink: &mut impl EventSink,
    ) {
        self.coarse_cycles += 1;
        let reading = hw.read_all();
        let hazard = threshold::evaluate(reading.gas_level, self.config.gas_threshold);

        sink.emit(&AppEvent::Telemetry(TelemetryData {
            temperature_c: reading.temperature_c,
            humidity_pct: reading.humidity_pct,
            gas_level: reading.gas_level,
            hazard,
            motion_detected: reading.motion_detected,
            window_open: self.window.is_open(),
            garage_position: self.garage.last_position(),
        }));

        // Publish sensor values.  A failed write is logged and the value
        // is simply stale on the remote side until the next cycle.
        self.publish_float(store, PATH_TEMP, reading.temperature_c, sink);
        self.publish_float(store, PATH_HUMIDITY, reading.humidity_pct, sink);
        self.publish_int(store, PATH_GAS, hazard.as_flag(), sink);
        self.publish_int(
            store,
            PATH_MOTION,
            i32::from(reading.motion_detected),
            sink,
        );

        // Presence indication holds until the next iteration clears it.
        if reading.motion_detected {
            hw.set_presence_indicators(true);
        }

        // Autonomous safety response.  May block for a full ramp.
        self.window.evaluate(hazard, hw, clock, sink);

        // Remote garage command.  An absent value means nobody has ever
        // written the path — skip, don't synthesize a "close".
        match store.read_bool(PATH_GARAGE_DOOR) {
            Ok(Some(desired_open)) => {
                self.garage.reconcile(
                    GarageCommand::new(desired_open, CommandSource::Remote),
                    hw,
                    clock,
                    sink,
                );
            }
            Ok(None) => {}
            Err(e) => {
                warn!("remote garage command read failed: {}", e);
                sink.emit(&AppEvent::StoreUnavailable {
                    path: PATH_GARAGE_DOOR,
                });
            }
        }
    }

    fn publish_float(
        &self,
        store: &mut impl StorePort,
        path: &'static str,
        value: f32,
        sink: &mut impl EventSink,
    ) {
        if let Err(e) = store.write_float(path, value) {
            warn!("publish {} failed: {}", path, e);
            sink.emit(&AppEvent::StoreUnavailable { path });
        }
    }

    fn publish_int(
        &self,
        store: &mut impl StorePort,
        path: &'static str,
        value: i32,
        sink: &mut impl EventSink,
    ) {
        if let Err(e) = store.write_int(path, value) {
            warn!("publish {} failed: {}", path, e);
            sink.emit(&AppEvent::StoreUnavailable { path });
        }
    }

    // ── Queries ───────────────────────────────────────────────

    /// Whether the window is currently open because of gas.
    pub fn window_open(&self) -> bool {
        self.window.is_open()
    }

    /// Last committed garage angle (-1 = never moved).
    pub fn garage_position(&self) -> i16 {
        self.garage.last_position()
    }

    /// Number of coarse cycles completed since startup.
    pub fn coarse_cycles(&self) -> u64 {
        self.coarse_cycles
    }

    /// Idle sleep between iterations, for the main loop.
    pub fn loop_idle_ms(&self) -> u32 {
        self.config.loop_idle_ms
    }
}
