//! MQ-series gas sensor — analog voltage via resistive divider into ADC1.
//!
//! The raw 12-bit ADC value is the domain unit; the hazard threshold is
//! calibrated against it directly, so no ppm conversion happens here.
//!
//! ## Dual-target design
//!
//! On ESP-IDF: reads the ADC channel via the oneshot API (initialised by
//! hw_init).  On host/test: reads from a static AtomicU16 for injection.

#[cfg(not(target_os = "espidf"))]
use core::sync::atomic::{AtomicU16, Ordering};

#[cfg(target_os = "espidf")]
use crate::drivers::hw_init;

#[cfg(not(target_os = "espidf"))]
static SIM_GAS_ADC: AtomicU16 = AtomicU16::new(300);

/// Inject a simulated raw gas reading (host targets only).
#[cfg(not(target_os = "espidf"))]
pub fn sim_set_gas_adc(raw: u16) {
    SIM_GAS_ADC.store(raw, Ordering::Relaxed);
}

pub struct GasSensor {
    _adc_gpio: i32,
}

impl GasSensor {
    pub fn new(adc_gpio: i32) -> Self {
        Self {
            _adc_gpio: adc_gpio,
        }
    }

    /// Raw ADC value, 0–4095.
    #[cfg(target_os = "espidf")]
    pub fn read(&self) -> u16 {
        hw_init::adc1_read(hw_init::ADC1_CH_GAS)
    }

    #[cfg(not(target_os = "espidf"))]
    pub fn read(&self) -> u16 {
        SIM_GAS_ADC.load(Ordering::Relaxed)
    }
}
