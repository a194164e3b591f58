//! IR presence sensor — digital input, active LOW (obstacle detected).
//!
//! ## Dual-target design
//!
//! On ESP-IDF: reads the GPIO level via hw_init.  On host/test: reads a
//! static AtomicBool for injection.

#[cfg(not(target_os = "espidf"))]
use core::sync::atomic::{AtomicBool, Ordering};

#[cfg(target_os = "espidf")]
use crate::drivers::hw_init;

#[cfg(not(target_os = "espidf"))]
static SIM_PRESENCE: AtomicBool = AtomicBool::new(false);

/// Inject simulated presence (host targets only).
#[cfg(not(target_os = "espidf"))]
pub fn sim_set_presence(detected: bool) {
    SIM_PRESENCE.store(detected, Ordering::Relaxed);
}

pub struct PresenceSensor {
    gpio: i32,
}

impl PresenceSensor {
    pub fn new(gpio: i32) -> Self {
        Self { gpio }
    }

    /// True while the sensor reports presence.
    #[cfg(target_os = "espidf")]
    pub fn read(&self) -> bool {
        // Active LOW: the module pulls the line down on detection.
        !hw_init::gpio_read(self.gpio)
    }

    #[cfg(not(target_os = "espidf"))]
    pub fn read(&self) -> bool {
        let _ = self.gpio;
        SIM_PRESENCE.load(Ordering::Relaxed)
    }
}
