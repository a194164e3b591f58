//! ESP32 clock adapter.
//!
//! Implements [`ClockPort`] — monotonic uptime plus the blocking delays
//! that pace actuator ramps and the idle sleep.
//!
//! - **`target_os = "espidf"`** — wraps `esp_timer_get_time()` (µs
//!   precision, monotonic); delays go through FreeRTOS via
//!   `std::thread::sleep`.
//! - **`not(target_os = "espidf")`** — uses `std::time::Instant` for
//!   host-side runs.  Tests use their own fake clock instead.

use crate::app::ports::ClockPort;

pub struct Esp32Clock {
    #[cfg(not(target_os = "espidf"))]
    start: std::time::Instant,
}

impl Default for Esp32Clock {
    fn default() -> Self {
        Self::new()
    }
}

impl Esp32Clock {
    pub fn new() -> Self {
        Self {
            #[cfg(not(target_os = "espidf"))]
            start: std::time::Instant::now(),
        }
    }

    /// Block until SNTP reports wall-clock sync.  TLS certificate
    /// validation needs a sane clock, so this runs before the first
    /// store request.  Holds the SNTP service alive afterwards.
    #[cfg(target_os = "espidf")]
    pub fn wait_for_time_sync(
        &self,
    ) -> Result<esp_idf_svc::sntp::EspSntp<'static>, crate::error::Error> {
        use esp_idf_svc::sntp::{EspSntp, SyncStatus};

        let sntp =
            EspSntp::new_default().map_err(|_| crate::error::Error::Init("SNTP service init"))?;
        log::info!("waiting for SNTP time sync...");
        while sntp.get_sync_status() != SyncStatus::Completed {
            self.delay_ms(100);
        }
        log::info!("wall clock synchronized");
        Ok(sntp)
    }
}

impl ClockPort for Esp32Clock {
    #[cfg(target_os = "espidf")]
    fn uptime_ms(&self) -> u64 {
        (unsafe { esp_idf_svc::sys::esp_timer_get_time() }) as u64 / 1_000
    }

    #[cfg(not(target_os = "espidf"))]
    fn uptime_ms(&self) -> u64 {
        self.start.elapsed().as_millis() as u64
    }

    fn delay_ms(&self, ms: u32) {
        std::thread::sleep(std::time::Duration::from_millis(u64::from(ms)));
    }
}
