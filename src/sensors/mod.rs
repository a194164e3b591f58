//! Sensor subsystem — individual drivers and the aggregating [`SensorHub`].
//!
//! The hub owns every sensor driver and produces one
//! [`SensorReading`](crate::app::ports::SensorReading) per coarse cycle.

pub mod climate;
pub mod gas;
pub mod presence;

use log::warn;

use crate::app::ports::SensorReading;
use climate::{ClimateReading, ClimateSensor};
use gas::GasSensor;
use presence::PresenceSensor;

/// Aggregates all sensor drivers and produces a unified snapshot.
pub struct SensorHub {
    climate: ClimateSensor,
    gas: GasSensor,
    presence: PresenceSensor,
    /// Last successful DHT11 read, substituted when the single-wire
    /// transaction fails (the DHT11 misses a beat every so often).
    last_climate: ClimateReading,
}

impl SensorHub {
    /// Construct a new hub.  Pass in pre-built drivers (built in main
    /// where pin ownership is established).
    pub fn new(climate: ClimateSensor, gas: GasSensor, presence: PresenceSensor) -> Self {
        Self {
            climate,
            gas,
            presence,
            last_climate: ClimateReading::default(),
        }
    }

    /// Read every sensor.  Never fails: a climate protocol error falls
    /// back to the previous good reading.
    pub fn read_all(&mut self) -> SensorReading {
        match self.climate.read() {
            Ok(r) => self.last_climate = r,
            Err(e) => warn!("climate read failed ({}), reusing last value", e),
        }

        SensorReading {
            temperature_c: self.last_climate.temperature_c,
            humidity_pct: self.last_climate.humidity_pct,
            gas_level: self.gas.read(),
            motion_detected: self.presence.read(),
        }
    }
}
