//! One-shot hardware peripheral initialization.
//!
//! Configures the ADC channel, GPIO directions, and LEDC timers/channels
//! using raw ESP-IDF sys calls.  Called once from `main()` before the
//! control loop starts.

#[cfg(target_os = "espidf")]
use esp_idf_svc::sys::*;

#[cfg(target_os = "espidf")]
use log::info;

use crate::pins;

// ── Error type ────────────────────────────────────────────────

/// Errors during one-shot peripheral initialization.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HwInitError {
    AdcInitFailed(i32),
    GpioConfigFailed(i32),
    LedcInitFailed,
}

impl core::fmt::Display for HwInitError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::AdcInitFailed(rc) => write!(f, "ADC1 init failed (rc={})", rc),
            Self::GpioConfigFailed(rc) => write!(f, "GPIO config failed (rc={})", rc),
            Self::LedcInitFailed => write!(f, "LEDC timer/channel config failed"),
        }
    }
}

// ── LEDC channel map ──────────────────────────────────────────

/// A LEDC channel handle: speed mode + channel number.
///
/// Servos sit on the high-speed block (timer 0, 14-bit @ 50 Hz); room
/// lighting channels sit on the low-speed block (timer 0, 8-bit @ 1 kHz).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LedcChannel {
    pub high_speed: bool,
    pub channel: u32,
}

pub const LEDC_CH_SERVO_WINDOW: LedcChannel = LedcChannel {
    high_speed: true,
    channel: 0,
};
pub const LEDC_CH_SERVO_GARAGE: LedcChannel = LedcChannel {
    high_speed: true,
    channel: 1,
};

/// Lighting channels in [`pins`] order: livingRoom1, livingRoom2,
/// bathroom, kitchen, boysRoom, girlsRoom, garage.
pub const LEDC_CH_ROOM_LEDS: [LedcChannel; 7] = [
    LedcChannel { high_speed: false, channel: 0 },
    LedcChannel { high_speed: false, channel: 1 },
    LedcChannel { high_speed: false, channel: 2 },
    LedcChannel { high_speed: false, channel: 3 },
    LedcChannel { high_speed: false, channel: 4 },
    LedcChannel { high_speed: false, channel: 5 },
    LedcChannel { high_speed: false, channel: 6 },
];

/// GPIOs backing [`LEDC_CH_ROOM_LEDS`], same order.
pub const ROOM_LED_GPIOS: [i32; 7] = [
    pins::LED_LIVING_ROOM_1_GPIO,
    pins::LED_LIVING_ROOM_2_GPIO,
    pins::LED_BATHROOM_GPIO,
    pins::LED_KITCHEN_GPIO,
    pins::LED_BOYS_ROOM_GPIO,
    pins::LED_GIRLS_ROOM_GPIO,
    pins::LED_GARAGE_GPIO,
];

/// ADC1 channel for the gas sensor (GPIO 34 on classic ESP32).
pub const ADC1_CH_GAS: u32 = 6;

// ── Init entry point ──────────────────────────────────────────

#[cfg(target_os = "espidf")]
pub fn init_peripherals() -> Result<(), HwInitError> {
    // SAFETY: Called once from main() before the control loop; single-threaded.
    unsafe {
        init_adc()?;
        init_gpio()?;
        init_ledc()?;
    }
    info!("hw_init: all peripherals configured");
    Ok(())
}

#[cfg(not(target_os = "espidf"))]
pub fn init_peripherals() -> Result<(), HwInitError> {
    log::info!("hw_init(sim): peripheral init skipped");
    Ok(())
}

// ── ADC (oneshot) ─────────────────────────────────────────────

#[cfg(target_os = "espidf")]
static mut ADC1_HANDLE: adc_oneshot_unit_handle_t = core::ptr::null_mut();

/// SAFETY: ADC1_HANDLE is written once by `init_adc()` before the control
/// loop starts; all later access is from the single main-loop thread.
#[cfg(target_os = "espidf")]
unsafe fn adc1_handle() -> adc_oneshot_unit_handle_t {
    unsafe { ADC1_HANDLE }
}

#[cfg(target_os = "espidf")]
unsafe fn init_adc() -> Result<(), HwInitError> {
    let init_cfg = adc_oneshot_unit_init_cfg_t {
        unit_id: adc_unit_t_ADC_UNIT_1,
        ulp_mode: adc_ulp_mode_t_ADC_ULP_MODE_DISABLE,
        ..Default::default()
    };
    // SAFETY: ADC1_HANDLE is only written here, once at boot.
    let ret = unsafe { adc_oneshot_new_unit(&init_cfg, &raw mut ADC1_HANDLE) };
    if ret != ESP_OK as i32 {
        return Err(HwInitError::AdcInitFailed(ret));
    }

    let chan_cfg = adc_oneshot_chan_cfg_t {
        atten: adc_atten_t_ADC_ATTEN_DB_12,
        bitwidth: adc_bitwidth_t_ADC_BITWIDTH_12,
    };
    let ret = unsafe { adc_oneshot_config_channel(adc1_handle(), ADC1_CH_GAS, &chan_cfg) };
    if ret != ESP_OK as i32 {
        return Err(HwInitError::AdcInitFailed(ret));
    }

    info!("hw_init: ADC1 configured (CH{}=gas)", ADC1_CH_GAS);
    Ok(())
}

#[cfg(target_os = "espidf")]
pub fn adc1_read(channel: u32) -> u16 {
    let mut raw: i32 = 0;
    // SAFETY: adc1_handle() contract — single-threaded main-loop access only.
    let ret = unsafe { adc_oneshot_read(adc1_handle(), channel, &mut raw) };
    if ret != ESP_OK as i32 {
        return 0;
    }
    raw.max(0) as u16
}

#[cfg(not(target_os = "espidf"))]
pub fn adc1_read(_channel: u32) -> u16 {
    0
}

// ── GPIO ──────────────────────────────────────────────────────

#[cfg(target_os = "espidf")]
unsafe fn init_gpio() -> Result<(), HwInitError> {
    let input_cfg = gpio_config_t {
        pin_bit_mask: 1u64 << pins::IR_GPIO,
        mode: gpio_mode_t_GPIO_MODE_INPUT,
        pull_up_en: gpio_pullup_t_GPIO_PULLUP_ENABLE,
        pull_down_en: gpio_pulldown_t_GPIO_PULLDOWN_DISABLE,
        intr_type: gpio_int_type_t_GPIO_INTR_DISABLE,
    };
    let ret = unsafe { gpio_config(&input_cfg) };
    if ret != ESP_OK as i32 {
        return Err(HwInitError::GpioConfigFailed(ret));
    }

    let mut output_mask = 1u64 << pins::BUZZER_GPIO;
    for gpio in pins::IR_LED_GPIOS {
        output_mask |= 1u64 << gpio;
    }
    let output_cfg = gpio_config_t {
        pin_bit_mask: output_mask,
        mode: gpio_mode_t_GPIO_MODE_OUTPUT,
        pull_up_en: gpio_pullup_t_GPIO_PULLUP_DISABLE,
        pull_down_en: gpio_pulldown_t_GPIO_PULLDOWN_DISABLE,
        intr_type: gpio_int_type_t_GPIO_INTR_DISABLE,
    };
    let ret = unsafe { gpio_config(&output_cfg) };
    if ret != ESP_OK as i32 {
        return Err(HwInitError::GpioConfigFailed(ret));
    }

    // Everything transient starts inactive.
    gpio_write(pins::BUZZER_GPIO, false);
    for gpio in pins::IR_LED_GPIOS {
        gpio_write(gpio, false);
    }

    info!("hw_init: GPIO configured");
    Ok(())
}

#[cfg(target_os = "espidf")]
pub fn gpio_write(pin: i32, high: bool) {
    // SAFETY: pin was configured as output during init_gpio().
    unsafe {
        gpio_set_level(pin, u32::from(high));
    }
}

#[cfg(not(target_os = "espidf"))]
pub fn gpio_write(_pin: i32, _high: bool) {}

#[cfg(target_os = "espidf")]
pub fn gpio_read(pin: i32) -> bool {
    // SAFETY: pin was configured as input during init_gpio().
    unsafe { gpio_get_level(pin) != 0 }
}

#[cfg(not(target_os = "espidf"))]
pub fn gpio_read(_pin: i32) -> bool {
    false
}

// ── LEDC (PWM) ────────────────────────────────────────────────

#[cfg(target_os = "espidf")]
fn speed_mode(ch: LedcChannel) -> ledc_mode_t {
    if ch.high_speed {
        ledc_mode_t_LEDC_HIGH_SPEED_MODE
    } else {
        ledc_mode_t_LEDC_LOW_SPEED_MODE
    }
}

#[cfg(target_os = "espidf")]
unsafe fn init_ledc() -> Result<(), HwInitError> {
    // Servo timer: high-speed, 14-bit @ 50 Hz.
    let servo_timer = ledc_timer_config_t {
        speed_mode: ledc_mode_t_LEDC_HIGH_SPEED_MODE,
        timer_num: ledc_timer_t_LEDC_TIMER_0,
        freq_hz: pins::SERVO_PWM_FREQ_HZ,
        clk_cfg: ledc_clk_cfg_t_LEDC_AUTO_CLK,
        __bindgen_anon_1: ledc_timer_config_t__bindgen_ty_1 {
            duty_resolution: pins::SERVO_PWM_RESOLUTION_BITS,
        },
        ..Default::default()
    };
    if unsafe { ledc_timer_config(&servo_timer) } != ESP_OK as i32 {
        return Err(HwInitError::LedcInitFailed);
    }

    // Lighting timer: low-speed, 8-bit @ 1 kHz.
    let led_timer = ledc_timer_config_t {
        speed_mode: ledc_mode_t_LEDC_LOW_SPEED_MODE,
        timer_num: ledc_timer_t_LEDC_TIMER_0,
        freq_hz: pins::LED_PWM_FREQ_HZ,
        clk_cfg: ledc_clk_cfg_t_LEDC_AUTO_CLK,
        __bindgen_anon_1: ledc_timer_config_t__bindgen_ty_1 {
            duty_resolution: pins::LED_PWM_RESOLUTION_BITS,
        },
        ..Default::default()
    };
    if unsafe { ledc_timer_config(&led_timer) } != ESP_OK as i32 {
        return Err(HwInitError::LedcInitFailed);
    }

    let servo_channels = [
        (LEDC_CH_SERVO_WINDOW, pins::SERVO_WINDOW_GPIO),
        (LEDC_CH_SERVO_GARAGE, pins::SERVO_GARAGE_GPIO),
    ];
    for (ch, gpio) in servo_channels {
        unsafe { config_channel(ch, gpio)? };
    }
    for (ch, gpio) in LEDC_CH_ROOM_LEDS.iter().zip(ROOM_LED_GPIOS) {
        unsafe { config_channel(*ch, gpio)? };
    }

    info!("hw_init: LEDC configured (2 servo + 7 lighting channels)");
    Ok(())
}

#[cfg(target_os = "espidf")]
unsafe fn config_channel(ch: LedcChannel, gpio: i32) -> Result<(), HwInitError> {
    let cfg = ledc_channel_config_t {
        gpio_num: gpio,
        speed_mode: speed_mode(ch),
        channel: ch.channel,
        intr_type: ledc_intr_type_t_LEDC_INTR_DISABLE,
        timer_sel: ledc_timer_t_LEDC_TIMER_0,
        duty: 0,
        hpoint: 0,
        ..Default::default()
    };
    if unsafe { ledc_channel_config(&cfg) } != ESP_OK as i32 {
        return Err(HwInitError::LedcInitFailed);
    }
    Ok(())
}

/// Write a raw duty value to a LEDC channel.
#[cfg(target_os = "espidf")]
pub fn ledc_set(ch: LedcChannel, duty: u32) {
    // SAFETY: channel was configured during init_ledc(); single-threaded.
    unsafe {
        ledc_set_duty(speed_mode(ch), ch.channel, duty);
        ledc_update_duty(speed_mode(ch), ch.channel);
    }
}

#[cfg(not(target_os = "espidf"))]
pub fn ledc_set(_ch: LedcChannel, _duty: u32) {}
