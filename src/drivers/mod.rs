//! Actuator drivers — dumb hardware wrappers with no policy.
//!
//! Safety and debounce decisions live in `control`; these modules only
//! translate committed commands into register writes (or in-memory state
//! on host targets).

pub mod buzzer;
pub mod hw_init;
pub mod led_bank;
pub mod servo;
