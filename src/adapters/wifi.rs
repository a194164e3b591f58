//! WiFi station-mode adapter.
//!
//! Joins the compiled-in access point with compiled-in credentials.
//! There is no provisioning flow and no reconnection backoff: startup
//! policy is retry-forever at a fixed cadence (the caller loops), and a
//! mid-run drop simply makes store operations fail until the radio
//! recovers on its own.
//!
//! ## cfg gating
//!
//! - **`target_os = "espidf"`**: real ESP-IDF WiFi driver via
//!   `esp_idf_svc::wifi::BlockingWifi`.
//! - **all other targets**: simulation stub for host-side tests.

use core::fmt;
use log::info;

// ───────────────────────────────────────────────────────────────
// Error type
// ───────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WifiError {
    /// Driver or event-loop initialisation failed.
    InitFailed,
    /// SSID/password rejected by the driver.
    BadCredentials,
    /// Association or DHCP did not complete.
    ConnectFailed,
}

impl fmt::Display for WifiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InitFailed => write!(f, "WiFi driver init failed"),
            Self::BadCredentials => write!(f, "WiFi credentials rejected"),
            Self::ConnectFailed => write!(f, "WiFi connection failed"),
        }
    }
}

// ───────────────────────────────────────────────────────────────
// Adapter
// ───────────────────────────────────────────────────────────────

pub struct WifiAdapter {
    ssid: &'static str,
    password: &'static str,
    connected: bool,
    #[cfg(target_os = "espidf")]
    driver: Option<
        esp_idf_svc::wifi::BlockingWifi<esp_idf_svc::wifi::EspWifi<'static>>,
    >,
}

impl WifiAdapter {
    pub fn new(ssid: &'static str, password: &'static str) -> Self {
        Self {
            ssid,
            password,
            connected: false,
            #[cfg(target_os = "espidf")]
            driver: None,
        }
    }

    pub fn is_connected(&self) -> bool {
        self.connected
    }

    /// One connection attempt: init the driver (first call only), set
    /// the client configuration, start, associate, and wait for DHCP.
    #[cfg(target_os = "espidf")]
    pub fn connect(&mut self) -> Result<(), WifiError> {
        use esp_idf_svc::eventloop::EspSystemEventLoop;
        use esp_idf_svc::hal::peripherals::Peripherals;
        use esp_idf_svc::nvs::EspDefaultNvsPartition;
        use esp_idf_svc::wifi::{
            AuthMethod, BlockingWifi, ClientConfiguration, Configuration, EspWifi,
        };

        if self.driver.is_none() {
            let sysloop = EspSystemEventLoop::take().map_err(|_| WifiError::InitFailed)?;
            let nvs = EspDefaultNvsPartition::take().map_err(|_| WifiError::InitFailed)?;
            let peripherals = Peripherals::take().map_err(|_| WifiError::InitFailed)?;
            let esp_wifi = EspWifi::new(peripherals.modem, sysloop.clone(), Some(nvs))
                .map_err(|_| WifiError::InitFailed)?;
            let wifi =
                BlockingWifi::wrap(esp_wifi, sysloop).map_err(|_| WifiError::InitFailed)?;
            self.driver = Some(wifi);
        }

        let wifi = self.driver.as_mut().ok_or(WifiError::InitFailed)?;
        let config = Configuration::Client(ClientConfiguration {
            ssid: self.ssid.try_into().map_err(|_| WifiError::BadCredentials)?,
            password: self
                .password
                .try_into()
                .map_err(|_| WifiError::BadCredentials)?,
            auth_method: AuthMethod::WPA2Personal,
            ..Default::default()
        });
        wifi.set_configuration(&config)
            .map_err(|_| WifiError::BadCredentials)?;

        wifi.start().map_err(|_| WifiError::ConnectFailed)?;
        wifi.connect().map_err(|_| WifiError::ConnectFailed)?;
        wifi.wait_netif_up().map_err(|_| WifiError::ConnectFailed)?;

        self.connected = true;
        info!("WiFi connected to '{}'", self.ssid);
        Ok(())
    }

    #[cfg(not(target_os = "espidf"))]
    pub fn connect(&mut self) -> Result<(), WifiError> {
        let _ = self.password;
        self.connected = true;
        info!("WiFi(sim) connected to '{}'", self.ssid);
        Ok(())
    }
}
