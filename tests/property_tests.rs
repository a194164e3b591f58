//! Property tests for the pure control-layer functions.
//!
//! Runs on host (x86_64) only — proptest is not available for ESP32 targets.
//! On ESP32, these tests are compiled out.

#![cfg(not(target_os = "espidf"))]

use proptest::prelude::*;

use homesentry::control::lighting::intensity_to_duty;
use homesentry::control::ramp::Ramp;
use homesentry::control::threshold::{self, HazardState};

// ── Gas threshold ─────────────────────────────────────────────

proptest! {
    /// Hazard iff the reading is strictly above the threshold — no
    /// hysteresis, no other inputs.
    #[test]
    fn hazard_iff_strictly_above_threshold(gas in 0u16..=4095, threshold in 0u16..=4095) {
        let state = threshold::evaluate(gas, threshold);
        prop_assert_eq!(state == HazardState::Hazard, gas > threshold);
    }

    /// Evaluation is pure: the same inputs always produce the same state.
    #[test]
    fn threshold_evaluation_is_pure(gas in 0u16..=4095, threshold in 0u16..=4095) {
        prop_assert_eq!(
            threshold::evaluate(gas, threshold),
            threshold::evaluate(gas, threshold)
        );
    }
}

// ── Lighting intensity mapping ────────────────────────────────

proptest! {
    /// Any input, including out-of-range garbage from the remote store,
    /// maps into a valid 8-bit duty without panicking.
    #[test]
    fn duty_never_panics_and_saturates(intensity in i32::MIN..=i32::MAX) {
        let _ = intensity_to_duty(intensity);
    }

    /// On the documented 0–100 domain the mapping is monotonic.
    #[test]
    fn duty_monotonic_on_percent_domain(a in 0i32..=100, b in 0i32..=100) {
        if a <= b {
            prop_assert!(intensity_to_duty(a) <= intensity_to_duty(b));
        }
    }

    /// Values past the ends of the percent scale clamp to the rails.
    #[test]
    fn duty_clamps_outside_percent_domain(over in 101i32..=10_000, under in -10_000i32..=-1) {
        prop_assert_eq!(intensity_to_duty(over), 255);
        prop_assert_eq!(intensity_to_duty(under), 0);
    }
}

// ── Servo ramps ───────────────────────────────────────────────

proptest! {
    /// Every ramp is finite, starts at `from`, ends at `to`, and moves in
    /// unit steps — for both directions and all angle pairs.
    #[test]
    fn ramp_is_finite_and_unit_stepped(from in 0u8..=180, to in 0u8..=180) {
        let steps: Vec<u8> = Ramp::new(from, to).collect();

        prop_assert!(!steps.is_empty());
        prop_assert_eq!(*steps.first().unwrap(), from);
        prop_assert_eq!(*steps.last().unwrap(), to);
        prop_assert_eq!(steps.len(), usize::from(from.abs_diff(to)) + 1);

        for pair in steps.windows(2) {
            prop_assert_eq!(pair[0].abs_diff(pair[1]), 1);
        }
    }

    /// The reported length matches the number of yielded steps.
    #[test]
    fn ramp_len_is_exact(from in 0u8..=180, to in 0u8..=180) {
        let ramp = Ramp::new(from, to);
        let expected = ramp.len();
        prop_assert_eq!(ramp.count(), expected);
    }
}
