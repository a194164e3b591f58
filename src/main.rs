//! HomeSentry Firmware — Main Entry Point
//!
//! Hexagonal architecture around a single sequential control loop.
//!
//! ```text
//! ┌────────────────────────────────────────────────────────────────┐
//! │                      Adapters (outer ring)                     │
//! │                                                                │
//! │  HardwareAdapter   RtdbStoreAdapter   SerialConsole            │
//! │  (Sensor+Actuator) (StorePort)        (ConsolePort)            │
//! │  WifiAdapter       Esp32Clock         LogEventSink             │
//! │  (startup only)    (ClockPort)        (EventSink)              │
//! │                                                                │
//! │  ──────────────── Port Trait Boundary ───────────────────      │
//! │                                                                │
//! │  ┌────────────────────────────────────────────────────────┐    │
//! │  │              AppService (pure logic)                   │    │
//! │  │  threshold · window · garage · lighting                │    │
//! │  └────────────────────────────────────────────────────────┘    │
//! └────────────────────────────────────────────────────────────────┘
//! ```
//!
//! One thread, no executor: every iteration polls in sequence and the
//! blocking servo ramps preempt nothing because there is nothing else.

#![deny(unused_must_use)]

use anyhow::Result;
use log::{info, warn};

use homesentry::adapters::console::SerialConsole;
use homesentry::adapters::hardware::HardwareAdapter;
use homesentry::adapters::log_sink::LogEventSink;
use homesentry::adapters::store::RtdbStoreAdapter;
use homesentry::adapters::time::Esp32Clock;
use homesentry::adapters::wifi::WifiAdapter;
use homesentry::app::ports::ClockPort;
use homesentry::app::service::AppService;
use homesentry::config::{self, SystemConfig};
use homesentry::drivers::buzzer::Buzzer;
use homesentry::drivers::hw_init;
use homesentry::drivers::led_bank::LedBank;
use homesentry::drivers::servo::ServoDriver;
use homesentry::pins;
use homesentry::sensors::climate::ClimateSensor;
use homesentry::sensors::gas::GasSensor;
use homesentry::sensors::presence::PresenceSensor;
use homesentry::sensors::SensorHub;

/// Retry cadence for the startup bootstrap loops (Wi-Fi, store session).
/// Deliberately constant — no backoff, no giving up.
const BOOTSTRAP_RETRY_MS: u32 = 500;

fn main() -> Result<()> {
    // ── 1. ESP-IDF bootstrap ──────────────────────────────────
    #[cfg(target_os = "espidf")]
    {
        esp_idf_svc::sys::link_patches();
        esp_idf_logger::init()?;
    }

    info!("HomeSentry v{} booting", env!("CARGO_PKG_VERSION"));

    // ── 2. Peripherals ────────────────────────────────────────
    if let Err(e) = hw_init::init_peripherals() {
        // Peripheral init failure is critical — log and halt.
        log::error!("HAL init failed: {} — halting", e);
        #[allow(clippy::empty_loop)]
        loop {}
    }

    let sensor_hub = SensorHub::new(
        ClimateSensor::new(pins::DHT_GPIO),
        GasSensor::new(pins::GAS_ADC_GPIO),
        PresenceSensor::new(pins::IR_GPIO),
    );
    let mut hw = HardwareAdapter::new(
        sensor_hub,
        ServoDriver::new(hw_init::LEDC_CH_SERVO_WINDOW),
        ServoDriver::new(hw_init::LEDC_CH_SERVO_GARAGE),
        Buzzer::new(),
        LedBank::new(),
    );
    let mut console = SerialConsole::new().map_err(|e| anyhow::anyhow!("{e}"))?;
    let clock = Esp32Clock::new();
    let mut sink = LogEventSink::new();

    // ── 3. Connectivity — block until up, retry forever ───────
    let mut wifi = WifiAdapter::new(config::WIFI_SSID, config::WIFI_PASSWORD);
    while let Err(e) = wifi.connect() {
        warn!("WiFi connect failed ({}), retrying", e);
        clock.delay_ms(BOOTSTRAP_RETRY_MS);
    }

    // TLS needs a sane wall clock before the first store request.
    #[cfg(target_os = "espidf")]
    let _sntp = clock.wait_for_time_sync().map_err(|e| anyhow::anyhow!("{e}"))?;

    let mut store = RtdbStoreAdapter::new(config::STORE_DATABASE_URL, config::STORE_API_KEY);
    while let Err(e) = store.connect() {
        warn!("store sign-in failed ({}), retrying", e);
        clock.delay_ms(BOOTSTRAP_RETRY_MS);
    }

    // ── 4. Control loop ───────────────────────────────────────
    let system_config = SystemConfig::default();
    let idle_ms = system_config.loop_idle_ms;
    let mut app = AppService::new(system_config);
    app.start(&mut hw, &mut sink);

    info!("System ready. Entering poll loop.");

    loop {
        app.run_iteration(&mut hw, &mut store, &mut console, &clock, &mut sink);
        clock.delay_ms(idle_ms);
    }
}
