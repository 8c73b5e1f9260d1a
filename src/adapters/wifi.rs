//! WiFi station-mode adapter.
//!
//! The link layer under the MQTT transport.  [`MqttTransport`] calls
//! [`WifiAdapter::connect`] whenever the station is down before it tries
//! the broker.
//!
//! ## cfg gating
//!
//! - **`target_os = "espidf"`**: `BlockingWifi<EspWifi>` from `esp_idf_svc::wifi`.
//! - **all other targets**: simulation with scripted failures for host tests.
//!
//! [`MqttTransport`]: super::mqtt::MqttTransport

use core::fmt;
use log::{error, info};

#[cfg(target_os = "espidf")]
use esp_idf_svc::wifi::{AuthMethod, BlockingWifi, ClientConfiguration, Configuration, EspWifi};

// ───────────────────────────────────────────────────────────────
// Errors
// ───────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectivityError {
    NoCredentials,
    InvalidSsid,
    InvalidPassword,
    ConnectionFailed,
}

impl fmt::Display for ConnectivityError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoCredentials => write!(f, "no WiFi credentials configured"),
            Self::InvalidSsid => write!(f, "SSID invalid (must be 1-32 printable ASCII bytes)"),
            Self::InvalidPassword => write!(f, "password invalid (must be 8-64 bytes for WPA2, or empty for open)"),
            Self::ConnectionFailed => write!(f, "WiFi connection failed"),
        }
    }
}

impl From<ConnectivityError> for crate::error::Error {
    fn from(e: ConnectivityError) -> Self {
        use crate::error::CommsError;
        match e {
            ConnectivityError::NoCredentials
            | ConnectivityError::InvalidSsid
            | ConnectivityError::InvalidPassword => Self::Config("wifi credentials"),
            ConnectivityError::ConnectionFailed => Self::Comms(CommsError::WifiConnectFailed),
        }
    }
}

// ───────────────────────────────────────────────────────────────
// Validation
// ───────────────────────────────────────────────────────────────

fn is_printable_ascii(s: &str) -> bool {
    s.bytes().all(|b| (0x20..=0x7E).contains(&b))
}

fn validate_ssid(ssid: &str) -> Result<(), ConnectivityError> {
    if ssid.is_empty() || ssid.len() > 32 || !is_printable_ascii(ssid) {
        return Err(ConnectivityError::InvalidSsid);
    }
    Ok(())
}

fn validate_password(password: &str) -> Result<(), ConnectivityError> {
    if password.is_empty() {
        return Ok(());
    }
    if password.len() < 8 || password.len() > 64 {
        return Err(ConnectivityError::InvalidPassword);
    }
    Ok(())
}

// ───────────────────────────────────────────────────────────────
// WiFi adapter
// ───────────────────────────────────────────────────────────────

pub struct WifiAdapter {
    ssid: heapless::String<32>,
    password: heapless::String<64>,
    connects: u32,
    #[cfg(target_os = "espidf")]
    wifi: BlockingWifi<EspWifi<'static>>,
    #[cfg(not(target_os = "espidf"))]
    sim_up: bool,
    #[cfg(not(target_os = "espidf"))]
    sim_failures_left: u32,
}

impl WifiAdapter {
    #[cfg(target_os = "espidf")]
    pub fn new(wifi: BlockingWifi<EspWifi<'static>>) -> Self {
        Self {
            ssid: heapless::String::new(),
            password: heapless::String::new(),
            connects: 0,
            wifi,
        }
    }

    #[cfg(not(target_os = "espidf"))]
    pub fn new() -> Self {
        Self {
            ssid: heapless::String::new(),
            password: heapless::String::new(),
            connects: 0,
            sim_up: false,
            sim_failures_left: 0,
        }
    }

    pub fn set_credentials(&mut self, ssid: &str, password: &str) -> Result<(), ConnectivityError> {
        validate_ssid(ssid)?;
        validate_password(password)?;
        self.ssid.clear();
        self.ssid.push_str(ssid).map_err(|()| ConnectivityError::InvalidSsid)?;
        self.password.clear();
        self.password
            .push_str(password)
            .map_err(|()| ConnectivityError::InvalidPassword)?;
        info!("WiFi: credentials set (SSID='{}')", self.ssid);
        Ok(())
    }

    /// Bring the station up.  No-op if already associated.
    pub fn connect(&mut self) -> Result<(), ConnectivityError> {
        if self.ssid.is_empty() {
            return Err(ConnectivityError::NoCredentials);
        }
        if self.is_connected() {
            return Ok(());
        }

        info!("WiFi: connecting to '{}'", self.ssid);
        match self.platform_connect() {
            Ok(()) => {
                self.connects = self.connects.saturating_add(1);
                info!("WiFi: connected");
                Ok(())
            }
            Err(e) => {
                error!("WiFi: connection failed: {}", e);
                Err(e)
            }
        }
    }

    /// Successful associations since boot.
    pub fn connects(&self) -> u32 {
        self.connects
    }

    // ── Platform-specific ─────────────────────────────────────

    #[cfg(target_os = "espidf")]
    fn platform_connect(&mut self) -> Result<(), ConnectivityError> {
        let auth_method = if self.password.is_empty() {
            AuthMethod::None
        } else {
            AuthMethod::WPA2Personal
        };
        let config = Configuration::Client(ClientConfiguration {
            ssid: self.ssid.clone(),
            password: self.password.clone(),
            auth_method,
            ..Default::default()
        });

        let step = |r: Result<(), esp_idf_svc::sys::EspError>, what: &str| {
            r.map_err(|e| {
                error!("WiFi: {} failed: {:?}", what, e);
                ConnectivityError::ConnectionFailed
            })
        };

        step(self.wifi.set_configuration(&config), "set_configuration")?;
        if !self.wifi.is_started().unwrap_or(false) {
            step(self.wifi.start(), "start")?;
        }
        step(self.wifi.connect(), "connect")?;
        step(self.wifi.wait_netif_up(), "wait_netif_up")?;

        if let Ok(ip_info) = self.wifi.wifi().sta_netif().get_ip_info() {
            info!("WiFi: IP {}", ip_info.ip);
        }
        Ok(())
    }

    #[cfg(target_os = "espidf")]
    pub fn is_connected(&self) -> bool {
        self.wifi.is_connected().unwrap_or(false)
    }

    #[cfg(not(target_os = "espidf"))]
    fn platform_connect(&mut self) -> Result<(), ConnectivityError> {
        if self.sim_failures_left > 0 {
            self.sim_failures_left -= 1;
            return Err(ConnectivityError::ConnectionFailed);
        }
        self.sim_up = true;
        Ok(())
    }

    #[cfg(not(target_os = "espidf"))]
    pub fn is_connected(&self) -> bool {
        self.sim_up
    }

    /// Make the next `n` association attempts fail.
    #[cfg(not(target_os = "espidf"))]
    pub fn sim_fail_next(&mut self, n: u32) {
        self.sim_failures_left = n;
    }

    /// Drop the simulated association (AP went away).
    #[cfg(not(target_os = "espidf"))]
    pub fn sim_drop_link(&mut self) {
        self.sim_up = false;
    }
}

#[cfg(not(target_os = "espidf"))]
impl Default for WifiAdapter {
    fn default() -> Self {
        Self::new()
    }
}

// ───────────────────────────────────────────────────────────────
// Tests
// ───────────────────────────────────────────────────────────────
