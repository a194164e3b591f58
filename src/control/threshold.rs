//! Gas threshold monitor.
//!
//! A pure function of the current reading and a fixed threshold — no
//! internal state, no error conditions.  There is no hysteresis band:
//! a reading oscillating around the threshold flips the hazard state
//! every cycle, and each flip costs a full window ramp.

/// Binary gas hazard classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HazardState {
    Normal,
    Hazard,
}

impl HazardState {
    /// 0/1 encoding used when publishing to the remote store.
    pub fn as_flag(self) -> i32 {
        match self {
            Self::Normal => 0,
            Self::Hazard => 1,
        }
    }
}

/// Classify a raw gas ADC reading.  `Hazard` iff strictly above threshold.
pub fn evaluate(gas_level: u16, threshold: u16) -> HazardState {
    if gas_level > threshold {
        HazardState::Hazard
    } else {
        HazardState::Normal
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hazard_iff_strictly_above_threshold() {
        assert_eq!(evaluate(2001, 2000), HazardState::Hazard);
        assert_eq!(evaluate(2000, 2000), HazardState::Normal);
        assert_eq!(evaluate(1999, 2000), HazardState::Normal);
    }

    #[test]
    fn extremes() {
        assert_eq!(evaluate(0, 2000), HazardState::Normal);
        assert_eq!(evaluate(u16::MAX, 2000), HazardState::Hazard);
        assert_eq!(evaluate(1, 0), HazardState::Hazard);
    }

    #[test]
    fn flag_encoding() {
        assert_eq!(HazardState::Normal.as_flag(), 0);
        assert_eq!(HazardState::Hazard.as_flag(), 1);
    }
}
