//! GPIO / peripheral pin assignments for the HomeSentry main board.
//!
//! Single source of truth — every driver references this module rather than
//! hard-coding pin numbers.  Change a pin here and it propagates everywhere.

// ---------------------------------------------------------------------------
// Sensors
// ---------------------------------------------------------------------------

/// DHT11 temperature/humidity sensor — single-wire data line.
pub const DHT_GPIO: i32 = 18;

/// MQ-series gas sensor — analog voltage into ADC1 channel 6 (GPIO 34).
pub const GAS_ADC_GPIO: i32 = 34;

/// IR presence sensor — digital input, active LOW (obstacle detected).
pub const IR_GPIO: i32 = 32;

// ---------------------------------------------------------------------------
// Servos (50 Hz LEDC)
// ---------------------------------------------------------------------------

/// Window servo — continuous-rotation position servo, [5, 170] degrees.
pub const SERVO_WINDOW_GPIO: i32 = 26;
/// Garage door servo — [0, 90] degrees.
pub const SERVO_GARAGE_GPIO: i32 = 27;

// ---------------------------------------------------------------------------
// Indicators
// ---------------------------------------------------------------------------

/// Piezo buzzer — digital output, active HIGH.
pub const BUZZER_GPIO: i32 = 15;

/// Presence indicator LEDs, lit while the IR sensor reports motion.
pub const IR_LED_GPIOS: [i32; 3] = [16, 17, 5];

// ---------------------------------------------------------------------------
// Room lighting channels (8-bit LEDC PWM)
// ---------------------------------------------------------------------------

/// The living room has two physical LED strings on one logical channel.
pub const LED_LIVING_ROOM_1_GPIO: i32 = 4;
pub const LED_LIVING_ROOM_2_GPIO: i32 = 12;
pub const LED_BATHROOM_GPIO: i32 = 0;
pub const LED_KITCHEN_GPIO: i32 = 2;
pub const LED_BOYS_ROOM_GPIO: i32 = 22;
pub const LED_GIRLS_ROOM_GPIO: i32 = 23;
pub const LED_GARAGE_GPIO: i32 = 25;

// ---------------------------------------------------------------------------
// PWM configuration
// ---------------------------------------------------------------------------

/// LEDC resolution for lighting channels (8-bit → 0–255 duty levels).
pub const LED_PWM_RESOLUTION_BITS: u32 = 8;
/// LEDC base frequency for lighting channels (1 kHz).
pub const LED_PWM_FREQ_HZ: u32 = 1_000;

/// LEDC resolution for servo channels (14-bit — fine pulse-width steps).
pub const SERVO_PWM_RESOLUTION_BITS: u32 = 14;
/// Standard hobby-servo frame rate.
pub const SERVO_PWM_FREQ_HZ: u32 = 50;
/// Servo pulse width at 0 degrees (microseconds).
pub const SERVO_PULSE_MIN_US: u32 = 500;
/// Servo pulse width at 180 degrees (microseconds).
pub const SERVO_PULSE_MAX_US: u32 = 2_500;
