//! Lighting channel bank + presence indicator LEDs.
//!
//! Seven 8-bit LEDC lighting channels (see
//! [`LEDC_CH_ROOM_LEDS`](crate::drivers::hw_init::LEDC_CH_ROOM_LEDS)) and
//! three plain-GPIO presence indicators.  Channel indices are positional;
//! the hardware adapter owns the room → channel mapping.
//!
//! ## Dual-target design
//!
//! On ESP-IDF: drives LEDC/GPIO via hw_init.
//! On host/test: tracks state in-memory only.

use crate::drivers::hw_init;
use crate::pins;

/// Number of physical lighting channels.
pub const CHANNEL_COUNT: usize = hw_init::LEDC_CH_ROOM_LEDS.len();

pub struct LedBank {
    duties: [u8; CHANNEL_COUNT],
    indicators_on: bool,
}

impl LedBank {
    pub fn new() -> Self {
        Self {
            duties: [0; CHANNEL_COUNT],
            indicators_on: false,
        }
    }

    /// Write an 8-bit duty to one lighting channel.  Out-of-range
    /// indices are ignored (no such channel on this board).
    pub fn set_duty(&mut self, channel: usize, duty: u8) {
        let Some(slot) = self.duties.get_mut(channel) else {
            log::warn!("led_bank: no channel {}", channel);
            return;
        };
        hw_init::ledc_set(hw_init::LEDC_CH_ROOM_LEDS[channel], u32::from(duty));
        *slot = duty;
    }

    /// Last duty written to a channel (0 for unknown channels).
    pub fn duty(&self, channel: usize) -> u8 {
        self.duties.get(channel).copied().unwrap_or(0)
    }

    /// Light or clear all three presence indicator LEDs together.
    pub fn set_indicators(&mut self, on: bool) {
        for gpio in pins::IR_LED_GPIOS {
            hw_init::gpio_write(gpio, on);
        }
        self.indicators_on = on;
    }

    pub fn indicators_on(&self) -> bool {
        self.indicators_on
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tracks_duties_per_channel() {
        let mut bank = LedBank::new();
        bank.set_duty(0, 255);
        bank.set_duty(3, 127);
        assert_eq!(bank.duty(0), 255);
        assert_eq!(bank.duty(3), 127);
        assert_eq!(bank.duty(1), 0);
    }

    #[test]
    fn unknown_channel_is_ignored() {
        let mut bank = LedBank::new();
        bank.set_duty(CHANNEL_COUNT + 5, 10);
        assert_eq!(bank.duty(CHANNEL_COUNT + 5), 0);
    }

    #[test]
    fn indicator_state_tracks() {
        let mut bank = LedBank::new();
        assert!(!bank.indicators_on());
        bank.set_indicators(true);
        assert!(bank.indicators_on());
        bank.set_indicators(false);
        assert!(!bank.indicators_on());
    }
}
