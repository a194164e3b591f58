//! Position servo driver (50 Hz LEDC channel).
//!
//! Converts a target angle to a pulse width between
//! [`SERVO_PULSE_MIN_US`](crate::pins::SERVO_PULSE_MIN_US) (0°) and
//! [`SERVO_PULSE_MAX_US`](crate::pins::SERVO_PULSE_MAX_US) (180°) and
//! writes it as a 14-bit duty value.  Open-loop: the tracked angle is the
//! last angle *commanded*, not measured — there is no feedback.
//!
//! ## Dual-target design
//!
//! On ESP-IDF: drives a real LEDC channel via hw_init.
//! On host/test: tracks state in-memory only.

use crate::drivers::hw_init::{self, LedcChannel};
use crate::pins;

/// 50 Hz frame period in microseconds.
const FRAME_US: u32 = 20_000;

pub struct ServoDriver {
    channel: LedcChannel,
    angle: u8,
}

impl ServoDriver {
    /// Construct without moving the servo; the first `set_angle` call
    /// commands a position.
    pub fn new(channel: LedcChannel) -> Self {
        Self { channel, angle: 0 }
    }

    /// Command the servo to `angle` degrees (clamped to 180).
    pub fn set_angle(&mut self, angle: u8) {
        let angle = angle.min(180);
        hw_init::ledc_set(self.channel, Self::angle_to_duty(angle));
        self.angle = angle;
    }

    /// Last commanded angle.
    pub fn angle(&self) -> u8 {
        self.angle
    }

    fn angle_to_duty(angle: u8) -> u32 {
        let span = pins::SERVO_PULSE_MAX_US - pins::SERVO_PULSE_MIN_US;
        let pulse_us = pins::SERVO_PULSE_MIN_US + span * u32::from(angle) / 180;
        let duty_max = (1u32 << pins::SERVO_PWM_RESOLUTION_BITS) - 1;
        pulse_us * duty_max / FRAME_US
    }
}
