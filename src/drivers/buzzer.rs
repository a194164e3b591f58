//! Piezo buzzer driver — plain GPIO, active HIGH.
//!
//! Asserted by the window controller and the garage reconciler for the
//! duration of a ramp.  Dumb actuator: no policy, no timing.
//!
//! ## Dual-target design
//!
//! On ESP-IDF: drives the GPIO via hw_init.
//! On host/test: tracks state in-memory only.

use crate::drivers::hw_init;
use crate::pins;

pub struct Buzzer {
    on: bool,
}

impl Buzzer {
    pub fn new() -> Self {
        Self { on: false }
    }

    pub fn set(&mut self, on: bool) {
        hw_init::gpio_write(pins::BUZZER_GPIO, on);
        self.on = on;
    }

    pub fn is_on(&self) -> bool {
        self.on
    }
}
