//! Integration tests: AppService → controllers → actuators.
//!
//! Drives full loop iterations against mock hardware, the in-memory store
//! simulation, and the injectable console, with a fake clock that advances
//! on every delay instead of sleeping.

#![cfg(not(target_os = "espidf"))]

use std::cell::Cell;
use std::collections::HashMap;

use serde_json::json;

use homesentry::adapters::console::SerialConsole;
use homesentry::adapters::store::RtdbStoreAdapter;
use homesentry::app::commands::{CommandSource, GarageAction, GarageCommand};
use homesentry::app::events::AppEvent;
use homesentry::app::ports::{
    ActuatorPort, ClockPort, EventSink, Room, SensorPort, SensorReading, ServoId,
};
use homesentry::app::service::{self, AppService};
use homesentry::config::SystemConfig;
use homesentry::control::garage::{GarageReconciler, POSITION_UNKNOWN};

// ── Mock implementations ──────────────────────────────────────

#[derive(Debug, Clone, PartialEq)]
enum ActCall {
    Servo { servo: ServoId, angle: u8 },
    Buzzer(bool),
    Indicators(bool),
    RoomDuty { room: Room, duty: u8 },
}

struct MockHw {
    calls: Vec<ActCall>,
    reading: SensorReading,
    duties: HashMap<Room, u8>,
}

impl MockHw {
    fn new() -> Self {
        Self {
            calls: Vec::new(),
            reading: SensorReading {
                temperature_c: 22.5,
                humidity_pct: 40.0,
                gas_level: 300,
                motion_detected: false,
            },
            duties: HashMap::new(),
        }
    }

    fn duty(&self, room: Room) -> Option<u8> {
        self.duties.get(&room).copied()
    }
}

impl SensorPort for MockHw {
    fn read_all(&mut self) -> SensorReading {
        self.reading
    }
}

impl ActuatorPort for MockHw {
    fn set_servo(&mut self, servo: ServoId, angle: u8) {
        self.calls.push(ActCall::Servo { servo, angle });
    }
    fn set_buzzer(&mut self, on: bool) {
        self.calls.push(ActCall::Buzzer(on));
    }
    fn set_presence_indicators(&mut self, on: bool) {
        self.calls.push(ActCall::Indicators(on));
    }
    fn set_room_duty(&mut self, room: Room, duty: u8) {
        self.duties.insert(room, duty);
        self.calls.push(ActCall::RoomDuty { room, duty });
    }
}

/// Fake clock: delays advance uptime instead of sleeping.
struct FakeClock {
    now: Cell<u64>,
}

impl FakeClock {
    fn new(start_ms: u64) -> Self {
        Self {
            now: Cell::new(start_ms),
        }
    }

    fn set(&self, ms: u64) {
        self.now.set(ms);
    }
}

impl ClockPort for FakeClock {
    fn uptime_ms(&self) -> u64 {
        self.now.get()
    }
    fn delay_ms(&self, ms: u32) {
        self.now.set(self.now.get() + u64::from(ms));
    }
}

struct RecordingSink {
    events: Vec<AppEvent>,
}

impl RecordingSink {
    fn new() -> Self {
        Self { events: Vec::new() }
    }

    fn count(&self, pred: impl Fn(&AppEvent) -> bool) -> usize {
        self.events.iter().filter(|e| pred(e)).count()
    }

    fn garage_moves(&self) -> usize {
        self.count(|e| matches!(e, AppEvent::GarageMoved { .. }))
    }
}

impl EventSink for RecordingSink {
    fn emit(&mut self, e: &AppEvent) {
        self.events.push(e.clone());
    }
}

struct Rig {
    app: AppService,
    hw: MockHw,
    store: RtdbStoreAdapter,
    console: SerialConsole,
    clock: FakeClock,
    sink: RecordingSink,
}

impl Rig {
    /// Started app with a connected sim store and the clock just past the
    /// first coarse interval (so the next iteration runs a coarse cycle).
    fn new() -> Self {
        let config = SystemConfig::default();
        let interval = u64::from(config.publish_interval_ms);
        let mut store = RtdbStoreAdapter::new("https://example.test", "key");
        store.connect().unwrap();

        let mut rig = Self {
            app: AppService::new(config),
            hw: MockHw::new(),
            store,
            console: SerialConsole::new().unwrap(),
            clock: FakeClock::new(interval + 1),
            sink: RecordingSink::new(),
        };
        rig.app.start(&mut rig.hw, &mut rig.sink);
        rig
    }

    fn iterate(&mut self) {
        self.app.run_iteration(
            &mut self.hw,
            &mut self.store,
            &mut self.console,
            &self.clock,
            &mut self.sink,
        );
    }

    /// Advance uptime past the coarse interval and run one iteration.
    fn iterate_coarse(&mut self) {
        let interval = 5_001;
        self.clock.set(self.clock.uptime_ms() + interval);
        self.iterate();
    }
}

// ── Startup ───────────────────────────────────────────────────

#[test]
fn start_commands_boot_positions() {
    let rig = Rig::new();
    assert!(rig.hw.calls.contains(&ActCall::Servo {
        servo: ServoId::Window,
        angle: 5
    }));
    assert!(rig.hw.calls.contains(&ActCall::Servo {
        servo: ServoId::Garage,
        angle: 0
    }));
    assert!(rig.hw.calls.contains(&ActCall::Buzzer(false)));
    assert!(rig.hw.calls.contains(&ActCall::Indicators(false)));
    assert_eq!(
        rig.app.garage_position(),
        POSITION_UNKNOWN,
        "boot write must not count as a committed garage command"
    );
    assert_eq!(rig.sink.count(|e| matches!(e, AppEvent::Started)), 1);
}

// ── Coarse cycle cadence and publishing ───────────────────────

#[test]
fn coarse_cycle_waits_for_interval() {
    let mut rig = Rig::new();
    rig.clock.set(1_000); // inside the first interval
    rig.iterate();
    assert_eq!(rig.app.coarse_cycles(), 0);
    assert_eq!(rig.store.sim_value(service::PATH_TEMP), None);

    rig.clock.set(5_001); // strictly past it
    rig.iterate();
    assert_eq!(rig.app.coarse_cycles(), 1);
}

#[test]
fn coarse_cycle_publishes_sensor_snapshot() {
    let mut rig = Rig::new();
    rig.hw.reading = SensorReading {
        temperature_c: 24.5,
        humidity_pct: 55.0,
        gas_level: 800,
        motion_detected: true,
    };
    rig.iterate();

    assert_eq!(rig.store.sim_value(service::PATH_TEMP), Some(&json!(24.5)));
    assert_eq!(
        rig.store.sim_value(service::PATH_HUMIDITY),
        Some(&json!(55.0))
    );
    assert_eq!(rig.store.sim_value(service::PATH_GAS), Some(&json!(0)));
    assert_eq!(rig.store.sim_value(service::PATH_MOTION), Some(&json!(1)));
    assert_eq!(rig.sink.count(|e| matches!(e, AppEvent::Telemetry(_))), 1);

    // Motion lights the indicators until the next iteration clears them.
    assert_eq!(rig.hw.calls.last(), Some(&ActCall::Indicators(true)));
}

#[test]
fn hazard_flag_published_as_one() {
    let mut rig = Rig::new();
    rig.hw.reading.gas_level = 2_500;
    rig.iterate();
    assert_eq!(rig.store.sim_value(service::PATH_GAS), Some(&json!(1)));
}

// ── Window safety response ────────────────────────────────────

#[test]
fn persistent_hazard_opens_window_exactly_once() {
    let mut rig = Rig::new();
    rig.hw.reading.gas_level = 2_500;

    for _ in 0..3 {
        rig.iterate_coarse();
    }
    assert_eq!(rig.sink.count(|e| matches!(e, AppEvent::WindowOpened)), 1);
    assert!(rig.app.window_open());

    // Back to normal closes it once, and stays closed.
    rig.hw.reading.gas_level = 300;
    for _ in 0..3 {
        rig.iterate_coarse();
    }
    assert_eq!(rig.sink.count(|e| matches!(e, AppEvent::WindowClosed)), 1);
    assert!(!rig.app.window_open());
}

#[test]
fn window_ramp_sweeps_full_range_with_buzzer() {
    let mut rig = Rig::new();
    rig.hw.calls.clear();
    rig.hw.reading.gas_level = 2_500;
    let before = rig.clock.uptime_ms();
    rig.iterate();

    let window_angles: Vec<u8> = rig
        .hw
        .calls
        .iter()
        .filter_map(|c| match c {
            ActCall::Servo {
                servo: ServoId::Window,
                angle,
            } => Some(*angle),
            _ => None,
        })
        .collect();
    assert_eq!(window_angles.first(), Some(&5));
    assert_eq!(window_angles.last(), Some(&170));
    assert_eq!(window_angles.len(), 166, "one step per degree, inclusive");

    // Buzzer asserted before the ramp, deasserted after the hold.
    let on = rig
        .hw
        .calls
        .iter()
        .position(|c| *c == ActCall::Buzzer(true))
        .unwrap();
    let off = rig
        .hw
        .calls
        .iter()
        .rposition(|c| *c == ActCall::Buzzer(false))
        .unwrap();
    let last_step = rig
        .hw
        .calls
        .iter()
        .rposition(|c| {
            matches!(
                c,
                ActCall::Servo {
                    servo: ServoId::Window,
                    ..
                }
            )
        })
        .unwrap();
    assert!(on < last_step && last_step < off);

    // 166 steps at 10 ms plus the 3 s hold.
    assert!(rig.clock.uptime_ms() - before >= 166 * 10 + 3_000);
}

// ── Garage reconciliation ─────────────────────────────────────

#[test]
fn repeated_console_open_moves_once() {
    let mut rig = Rig::new();
    for _ in 0..3 {
        rig.console.inject_line("open");
        rig.iterate();
    }
    assert_eq!(rig.sink.garage_moves(), 1);
    assert_eq!(
        rig.sink
            .count(|e| matches!(e, AppEvent::GarageAlreadyApplied { .. })),
        2
    );
    assert_eq!(rig.app.garage_position(), 90);
}

#[test]
fn remote_then_console_open_is_one_motion() {
    let mut rig = Rig::new();
    rig.store
        .sim_insert(service::PATH_GARAGE_DOOR, json!(true));
    rig.console.inject_line("open");
    rig.iterate(); // coarse cycle (remote) runs before the console drain

    assert_eq!(rig.sink.garage_moves(), 1);
    assert_eq!(
        rig.sink.count(|e| matches!(
            e,
            AppEvent::GarageMoved {
                source: CommandSource::Remote,
                ..
            }
        )),
        1
    );
    assert_eq!(
        rig.sink.count(|e| matches!(
            e,
            AppEvent::GarageAlreadyApplied {
                source: CommandSource::Console,
                ..
            }
        )),
        1
    );
}

#[test]
fn alternating_commands_each_move() {
    let mut rig = Rig::new();
    for line in ["open", "close", "close", "open"] {
        rig.console.inject_line(line);
        rig.iterate();
    }
    // open, close, (dup), open — three motions.
    assert_eq!(rig.sink.garage_moves(), 3);
    assert_eq!(rig.app.garage_position(), 90);
}

#[test]
fn absent_remote_garage_path_is_not_a_close() {
    let mut rig = Rig::new();
    rig.iterate(); // coarse cycle with nothing at garage/garageDoor
    assert_eq!(rig.sink.garage_moves(), 0);
    assert_eq!(rig.app.garage_position(), POSITION_UNKNOWN);
}

#[test]
fn numeric_console_forms_work() {
    let mut rig = Rig::new();
    rig.console.inject_line("1");
    rig.iterate();
    assert_eq!(rig.app.garage_position(), 90);
    rig.console.inject_line("0");
    rig.iterate();
    assert_eq!(rig.app.garage_position(), 0);
}

#[test]
fn garbage_console_line_is_ignored() {
    let mut rig = Rig::new();
    rig.console.inject_line("banana");
    rig.iterate();
    assert_eq!(rig.sink.garage_moves(), 0);
    assert_eq!(
        rig.sink
            .count(|e| matches!(e, AppEvent::GarageAlreadyApplied { .. })),
        0
    );
}

#[test]
fn position_match_commits_without_motion() {
    // Degenerate geometry where both endpoints coincide: the second
    // (differing) action finds the door already at its target and must
    // commit without a ramp.
    let config = SystemConfig {
        garage_closed_deg: 45,
        garage_open_deg: 45,
        ..Default::default()
    };
    let mut garage = GarageReconciler::new(&config);
    let mut hw = MockHw::new();
    let clock = FakeClock::new(0);
    let mut sink = RecordingSink::new();

    garage.reconcile(
        GarageCommand::new(true, CommandSource::Console),
        &mut hw,
        &clock,
        &mut sink,
    );
    assert_eq!(garage.last_position(), 45);
    hw.calls.clear();

    garage.reconcile(
        GarageCommand::new(false, CommandSource::Console),
        &mut hw,
        &clock,
        &mut sink,
    );
    assert!(hw.calls.is_empty(), "no motion when position matches target");
    assert_eq!(garage.last_applied(), Some(GarageAction::Close));
}

// ── Lighting ──────────────────────────────────────────────────

#[test]
fn lighting_applies_remote_intensity() {
    let mut rig = Rig::new();
    rig.store.sim_insert("kitchen/led", json!(50));
    rig.store.sim_insert("garage/led", json!(100));
    rig.iterate();
    assert_eq!(rig.hw.duty(Room::Kitchen), Some(127));
    assert_eq!(rig.hw.duty(Room::Garage), Some(255));
}

#[test]
fn absent_lighting_path_leaves_duty_alone() {
    let mut rig = Rig::new();
    rig.store.sim_insert("kitchen/led", json!(80));
    rig.iterate();
    let set = rig.hw.duty(Room::Kitchen);
    assert_eq!(set, Some(204));

    rig.store.sim_remove("kitchen/led");
    rig.iterate();
    assert_eq!(rig.hw.duty(Room::Kitchen), set, "absent value must not zero the light");
}

// ── Store outage behaviour ────────────────────────────────────

#[test]
fn store_outage_degrades_without_stopping() {
    let mut rig = Rig::new();
    rig.store.sim_set_offline(true);
    rig.hw.reading.gas_level = 2_500;
    rig.iterate();

    // Publishes failed and were reported, but the safety response and the
    // cycle count still happened.
    assert!(
        rig.sink
            .count(|e| matches!(e, AppEvent::StoreUnavailable { .. }))
            >= 4
    );
    assert_eq!(rig.app.coarse_cycles(), 1);
    assert!(rig.app.window_open());

    // Recovery: the next coarse cycle publishes again.
    rig.store.sim_set_offline(false);
    rig.iterate_coarse();
    assert!(rig.store.sim_value(service::PATH_GAS).is_some());
}
