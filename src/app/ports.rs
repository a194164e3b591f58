//! Port traits — the hexagonal boundary between domain logic and the outside world.
//!
//! ```text
//!   Adapter ──▶ Port trait ──▶ AppService (domain)
//! ```
//!
//! Driven adapters (sensors, actuators, the remote store, the serial
//! console, the clock) implement these traits.  The
//! [`AppService`](super::service::AppService) consumes them via generics,
//! so the domain core never touches hardware or the network directly.

pub use crate::error::StoreError;

// ───────────────────────────────────────────────────────────────
// Sensor data
// ───────────────────────────────────────────────────────────────

/// One fresh snapshot of every local sensor, produced per coarse cycle.
/// Not retained between cycles.
#[derive(Debug, Clone, Copy, Default)]
pub struct SensorReading {
    /// Ambient temperature in degrees Celsius (DHT11).
    pub temperature_c: f32,
    /// Relative humidity in percent (DHT11).
    pub humidity_pct: f32,
    /// Raw gas sensor ADC value (0–4095).
    pub gas_level: u16,
    /// Whether the IR sensor currently reports presence.
    pub motion_detected: bool,
}

// ───────────────────────────────────────────────────────────────
// Addressing
// ───────────────────────────────────────────────────────────────

/// The two position servos on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ServoId {
    Window,
    Garage,
}

/// Logical lighting channels, one per room.
///
/// The living room has two physical LED strings behind its single
/// logical channel; that fan-out is the hardware adapter's business.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Room {
    LivingRoom,
    Bathroom,
    Kitchen,
    BoysRoom,
    GirlsRoom,
    Garage,
}

impl Room {
    /// Every room, in lighting-apply order.
    pub const ALL: [Room; 6] = [
        Room::LivingRoom,
        Room::Bathroom,
        Room::Kitchen,
        Room::BoysRoom,
        Room::GirlsRoom,
        Room::Garage,
    ];

    /// Remote store path carrying this room's requested intensity (0–100).
    pub fn led_path(self) -> &'static str {
        match self {
            Room::LivingRoom => "livingRoom/led",
            Room::Bathroom => "bathroom/led",
            Room::Kitchen => "kitchen/led",
            Room::BoysRoom => "boysRoom/led",
            Room::GirlsRoom => "girlsRoom/led",
            Room::Garage => "garage/led",
        }
    }
}

// ───────────────────────────────────────────────────────────────
// Sensor port (driven adapter: hardware → domain)
// ───────────────────────────────────────────────────────────────

/// Read-side port: the domain calls this to obtain sensor data.
pub trait SensorPort {
    /// Read every sensor and return a unified snapshot.
    fn read_all(&mut self) -> SensorReading;
}

// ───────────────────────────────────────────────────────────────
// Actuator port (driven adapter: domain → hardware)
// ───────────────────────────────────────────────────────────────

/// Write-side port: the domain calls this to command actuators.
///
/// All commands are fire-and-forget — no actuator on this board has a
/// position feedback sensor, so nothing here can fail back into the
/// domain.  An adapter that loses a channel logs it and carries on.
pub trait ActuatorPort {
    /// Command a servo to the given angle (degrees).  One ramp step.
    fn set_servo(&mut self, servo: ServoId, angle: u8);

    /// Assert or deassert the warning buzzer.
    fn set_buzzer(&mut self, on: bool);

    /// Light or clear the presence indicator LEDs.
    fn set_presence_indicators(&mut self, on: bool);

    /// Write an 8-bit duty cycle to a room's lighting channel.
    fn set_room_duty(&mut self, room: Room, duty: u8);
}

// ───────────────────────────────────────────────────────────────
// Remote store port (driven adapter: domain ↔ key-value store)
// ───────────────────────────────────────────────────────────────

/// Gateway to the remote hierarchical key-value store.
///
/// `Ok(None)` from a read means the path holds no value — the caller
/// treats that as "skip this update", never as zero.  `Err` means the
/// store could not be reached this cycle; callers log and move on.
pub trait StorePort {
    /// Read an integer scalar at `path`.
    fn read_int(&mut self, path: &str) -> Result<Option<i32>, StoreError>;

    /// Read a boolean scalar at `path`.
    fn read_bool(&mut self, path: &str) -> Result<Option<bool>, StoreError>;

    /// Write a float scalar at `path`.
    fn write_float(&mut self, path: &str, value: f32) -> Result<(), StoreError>;

    /// Write an integer scalar at `path`.
    fn write_int(&mut self, path: &str, value: i32) -> Result<(), StoreError>;
}

// ───────────────────────────────────────────────────────────────
// Console port (driven adapter: serial input → domain)
// ───────────────────────────────────────────────────────────────

/// Maximum accepted console line length; longer input is truncated.
pub type ConsoleLine = heapless::String<32>;

/// Local serial console.  Polled, never blocking.
pub trait ConsolePort {
    /// Return the next complete newline-delimited line, if one has
    /// arrived since the last call.  Trimmed of surrounding whitespace.
    fn read_line(&mut self) -> Option<ConsoleLine>;
}

// ───────────────────────────────────────────────────────────────
// Clock port (driven adapter: domain → time source)
// ───────────────────────────────────────────────────────────────

/// Monotonic time and blocking delays.
///
/// Delays are genuine blocking waits — they are the system's only
/// suspension points and nothing else runs while one is in progress.
pub trait ClockPort {
    /// Milliseconds since boot (monotonic).
    fn uptime_ms(&self) -> u64;

    /// Block the calling thread for `ms` milliseconds.
    fn delay_ms(&self, ms: u32);
}

// ───────────────────────────────────────────────────────────────
// Event sink port (driven adapter: domain → logging / telemetry)
// ───────────────────────────────────────────────────────────────

/// The domain emits structured [`AppEvent`](super::events::AppEvent)s
/// through this port.  Adapters decide where they go (serial log today;
/// an MQTT or display adapter would implement the same trait).
pub trait EventSink {
    fn emit(&mut self, event: &super::events::AppEvent);
}
