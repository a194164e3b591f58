//! DHT11 temperature/humidity sensor.
//!
//! Single-wire protocol: the host pulls the line low for ≥18 ms, the
//! sensor answers with an 80 µs low / 80 µs high preamble, then 40 data
//! bits where the high-pulse width distinguishes 0 (~27 µs) from 1
//! (~70 µs).  Payload is humidity int/frac, temperature int/frac, and an
//! additive checksum.
//!
//! ## Dual-target design
//!
//! On ESP-IDF: bit-bangs the line with interrupts masked for the 4 ms
//! data burst.  On host/test: reads injected values from atomics.

#[cfg(not(target_os = "espidf"))]
use core::sync::atomic::{AtomicI32, Ordering};

use crate::error::SensorError;

#[derive(Debug, Clone, Copy)]
pub struct ClimateReading {
    pub temperature_c: f32,
    pub humidity_pct: f32,
}

impl Default for ClimateReading {
    fn default() -> Self {
        Self {
            temperature_c: 0.0,
            humidity_pct: 0.0,
        }
    }
}

#[cfg(not(target_os = "espidf"))]
static SIM_TEMP_MILLI_C: AtomicI32 = AtomicI32::new(21_000);
#[cfg(not(target_os = "espidf"))]
static SIM_HUM_MILLI_PCT: AtomicI32 = AtomicI32::new(45_000);

/// Inject a simulated climate reading (host targets only).
#[cfg(not(target_os = "espidf"))]
pub fn sim_set_climate(temperature_c: f32, humidity_pct: f32) {
    SIM_TEMP_MILLI_C.store((temperature_c * 1000.0) as i32, Ordering::Relaxed);
    SIM_HUM_MILLI_PCT.store((humidity_pct * 1000.0) as i32, Ordering::Relaxed);
}

pub struct ClimateSensor {
    gpio: i32,
}

impl ClimateSensor {
    pub fn new(gpio: i32) -> Self {
        Self { gpio }
    }

    /// One full DHT11 transaction.
    #[cfg(target_os = "espidf")]
    pub fn read(&self) -> Result<ClimateReading, SensorError> {
        let bytes = self.read_frame()?;
        let sum = bytes[0]
            .wrapping_add(bytes[1])
            .wrapping_add(bytes[2])
            .wrapping_add(bytes[3]);
        if sum != bytes[4] {
            return Err(SensorError::DhtProtocolFailed);
        }
        // DHT11 fractional bytes are tenths (always 0 on many units).
        Ok(ClimateReading {
            humidity_pct: f32::from(bytes[0]) + f32::from(bytes[1]) / 10.0,
            temperature_c: f32::from(bytes[2]) + f32::from(bytes[3]) / 10.0,
        })
    }

    #[cfg(not(target_os = "espidf"))]
    pub fn read(&self) -> Result<ClimateReading, SensorError> {
        let _ = self.gpio;
        Ok(ClimateReading {
            temperature_c: SIM_TEMP_MILLI_C.load(Ordering::Relaxed) as f32 / 1000.0,
            humidity_pct: SIM_HUM_MILLI_PCT.load(Ordering::Relaxed) as f32 / 1000.0,
        })
    }

    // ── Wire protocol (espidf only) ──────────────────────────

    #[cfg(target_os = "espidf")]
    fn read_frame(&self) -> Result<[u8; 5], SensorError> {
        use esp_idf_svc::sys::{
            esp_rom_delay_us, gpio_get_level, gpio_mode_t_GPIO_MODE_INPUT,
            gpio_mode_t_GPIO_MODE_OUTPUT, gpio_set_direction, gpio_set_level,
        };

        let pin = self.gpio;

        // Host start signal: ≥18 ms low, then release.
        unsafe {
            gpio_set_direction(pin, gpio_mode_t_GPIO_MODE_OUTPUT);
            gpio_set_level(pin, 0);
            esp_rom_delay_us(20_000);
            gpio_set_level(pin, 1);
            esp_rom_delay_us(30);
            gpio_set_direction(pin, gpio_mode_t_GPIO_MODE_INPUT);
        }

        let wait_level = |level: u32, timeout_us: u32| -> Result<u32, SensorError> {
            let mut waited = 0;
            // SAFETY: plain register read on a configured input pin.
            while unsafe { gpio_get_level(pin) } as u32 != level {
                if waited >= timeout_us {
                    return Err(SensorError::DhtProtocolFailed);
                }
                unsafe { esp_rom_delay_us(1) };
                waited += 1;
            }
            Ok(waited)
        };

        // Sensor preamble: 80 µs low, 80 µs high.
        wait_level(0, 100)?;
        wait_level(1, 100)?;
        wait_level(0, 100)?;

        let mut bytes = [0u8; 5];
        for bit in 0..40 {
            // 50 µs low gap, then the data pulse.
            wait_level(1, 80)?;
            let width = wait_level(0, 100)?;
            if width > 45 {
                bytes[bit / 8] |= 1 << (7 - (bit % 8));
            }
        }
        Ok(bytes)
    }
}
