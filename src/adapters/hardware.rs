//! Hardware adapter — bridges real peripherals to domain port traits.
//!
//! Owns the [`SensorHub`] and all actuator drivers, exposing them through
//! [`SensorPort`] and [`ActuatorPort`].  This is the only module in the
//! system that maps logical rooms onto physical lighting channels — the
//! living room's single logical channel fans out to two LED strings here.

use crate::app::ports::{ActuatorPort, Room, SensorPort, SensorReading, ServoId};
use crate::drivers::buzzer::Buzzer;
use crate::drivers::led_bank::LedBank;
use crate::drivers::servo::ServoDriver;
use crate::sensors::SensorHub;

/// Concrete adapter that combines all hardware behind port traits.
pub struct HardwareAdapter {
    sensor_hub: SensorHub,
    window_servo: ServoDriver,
    garage_servo: ServoDriver,
    buzzer: Buzzer,
    leds: LedBank,
}

impl HardwareAdapter {
    pub fn new(
        sensor_hub: SensorHub,
        window_servo: ServoDriver,
        garage_servo: ServoDriver,
        buzzer: Buzzer,
        leds: LedBank,
    ) -> Self {
        Self {
            sensor_hub,
            window_servo,
            garage_servo,
            buzzer,
            leds,
        }
    }

    /// Physical lighting channels behind a room's logical channel
    /// (indices into the [`LedBank`]).
    fn room_channels(room: Room) -> &'static [usize] {
        match room {
            Room::LivingRoom => &[0, 1],
            Room::Bathroom => &[2],
            Room::Kitchen => &[3],
            Room::BoysRoom => &[4],
            Room::GirlsRoom => &[5],
            Room::Garage => &[6],
        }
    }

    /// Current duty of a room's (first) physical channel — introspection
    /// for telemetry and host tests.
    pub fn room_duty(&self, room: Room) -> u8 {
        self.leds.duty(Self::room_channels(room)[0])
    }

    pub fn buzzer_on(&self) -> bool {
        self.buzzer.is_on()
    }
}

// ── SensorPort implementation ─────────────────────────────────

impl SensorPort for HardwareAdapter {
    fn read_all(&mut self) -> SensorReading {
        self.sensor_hub.read_all()
    }
}

// ── ActuatorPort implementation ───────────────────────────────

impl ActuatorPort for HardwareAdapter {
    fn set_servo(&mut self, servo: ServoId, angle: u8) {
        match servo {
            ServoId::Window => self.window_servo.set_angle(angle),
            ServoId::Garage => self.garage_servo.set_angle(angle),
        }
    }

    fn set_buzzer(&mut self, on: bool) {
        self.buzzer.set(on);
    }

    fn set_presence_indicators(&mut self, on: bool) {
        self.leds.set_indicators(on);
    }

    fn set_room_duty(&mut self, room: Room, duty: u8) {
        for &channel in Self::room_channels(room) {
            self.leds.set_duty(channel, duty);
        }
    }
}
