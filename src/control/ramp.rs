//! Fixed-step actuator ramp.
//!
//! A [`Ramp`] is a lazy, finite sequence of angle values stepping
//! monotonically from a start angle to a target, one degree at a time.
//! The driving controller writes each yielded angle to the servo and
//! blocks for its per-step delay, so a ramp always runs to completion
//! before anything else happens — it is not restartable mid-motion and
//! there is no cancellation.

/// Monotonic 1-degree-per-step angle sequence, endpoints inclusive.
#[derive(Debug, Clone)]
pub struct Ramp {
    next: i16,
    target: i16,
    step: i16,
    done: bool,
}

impl Ramp {
    /// Ramp from `from` to `to` (either direction).  When the angles are
    /// equal the ramp yields the single shared endpoint once.
    pub fn new(from: u8, to: u8) -> Self {
        let step = if to >= from { 1 } else { -1 };
        Self {
            next: i16::from(from),
            target: i16::from(to),
            step,
            done: false,
        }
    }

    /// Number of steps remaining, including the target endpoint.
    pub fn remaining(&self) -> u16 {
        if self.done {
            0
        } else {
            self.target.abs_diff(self.next) + 1
        }
    }
}

impl Iterator for Ramp {
    type Item = u8;

    fn next(&mut self) -> Option<u8> {
        if self.done {
            return None;
        }
        let angle = self.next;
        if angle == self.target {
            self.done = true;
        } else {
            self.next += self.step;
        }
        Some(angle as u8)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let n = self.remaining() as usize;
        (n, Some(n))
    }
}

impl ExactSizeIterator for Ramp {}
