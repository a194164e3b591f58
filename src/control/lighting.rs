//! Room lighting mapper.
//!
//! Stateless translation of a 0–100 intensity value from the remote store
//! into an 8-bit hardware duty cycle, applied independently per room every
//! loop iteration.  Intensities are never cached: a room with no readable
//! value this cycle keeps whatever duty was last written to its channel.

use log::warn;

use crate::app::ports::{ActuatorPort, Room, StorePort};

/// Linearly rescale intensity [0, 100] to duty [0, 255].
///
/// Inputs are not validated — out-of-range intensities pass through the
/// linear map and are clamped only here, at the 8-bit register boundary
/// where larger values are physically unrepresentable.  Integer floor
/// division: `50 → 127`.
pub fn intensity_to_duty(intensity: i32) -> u8 {
    (intensity.saturating_mul(255) / 100).clamp(0, 255) as u8
}

/// One lighting pass: read each room's requested intensity and write its
/// duty.  Absent values skip the room; store failures are logged and the
/// room keeps its last duty until the next natural poll.
pub fn apply_lighting(store: &mut impl StorePort, hw: &mut impl ActuatorPort) {
    for room in Room::ALL {
        match store.read_int(room.led_path()) {
            Ok(Some(intensity)) => {
                hw.set_room_duty(room, intensity_to_duty(intensity));
            }
            Ok(None) => {} // no change requested this cycle
            Err(e) => {
                warn!("lighting read failed for {}: {}", room.led_path(), e);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoints() {
        assert_eq!(intensity_to_duty(0), 0);
        assert_eq!(intensity_to_duty(100), 255);
    }

    #[test]
    fn midpoint_rounds_down() {
        assert_eq!(intensity_to_duty(50), 127);
    }

    #[test]
    fn out_of_range_clamps_at_register_boundary() {
        assert_eq!(intensity_to_duty(-5), 0);
        assert_eq!(intensity_to_duty(101), 255);
        assert_eq!(intensity_to_duty(i32::MAX), 255);
    }

    #[test]
    fn monotonic_over_domain() {
        let mut last = 0;
        for v in 0..=100 {
            let duty = intensity_to_duty(v);
            assert!(duty >= last);
            last = duty;
        }
    }
}
