//! Device configuration
//!
//! `device.toml` is compiled into the binary and already checked by
//! `build.rs`; parsing here turns it into typed settings and repeats the
//! checks that the core relies on.

use serde::Deserialize;
use thiserror::Error;

use screencap_core::capture::MAX_WIDTH;
use screencap_core::config::GaugeConfig;
use screencap_core::wifi::{Credentials, ReconnectPolicy, MAX_TRIALS};
use screencap_core::LoopConfig;

/// Embedded default configuration
/// Edit device.toml and rebuild to customize
pub const EMBEDDED_CONFIG: &str = include_str!("../device.toml");

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("device.toml: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("device.toml: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, Deserialize)]
pub struct WifiSection {
    pub ssid: String,
    pub passphrase: String,
    #[serde(default)]
    pub reconnect: ReconnectPolicy,
}

#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(default)]
pub struct HttpSection {
    pub port: u16,
    /// Per-connection limit (ms)
    pub timeout_ms: u64,
}

impl Default for HttpSection {
    fn default() -> Self {
        Self {
            port: 80,
            timeout_ms: 2000,
        }
    }
}

#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(default)]
pub struct DisplaySection {
    pub width: u16,
    pub height: u16,
    pub brightness: u8,
}

impl Default for DisplaySection {
    fn default() -> Self {
        Self {
            width: 320,
            height: 240,
            brightness: 100,
        }
    }
}

#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(default)]
pub struct LoopSection {
    /// Sleep at the end of each tick (ms)
    pub delay_ms: u32,
}

impl Default for LoopSection {
    fn default() -> Self {
        Self { delay_ms: 20 }
    }
}

/// Contents of `device.toml`
#[derive(Debug, Clone, Deserialize)]
pub struct DeviceConfig {
    pub wifi: WifiSection,
    #[serde(default)]
    pub http: HttpSection,
    #[serde(default)]
    pub gauge: GaugeConfig,
    #[serde(default)]
    pub display: DisplaySection,
    #[serde(rename = "loop", default)]
    pub event_loop: LoopSection,
}

impl DeviceConfig {
    /// Parse and validate a configuration document
    pub fn parse(input: &str) -> Result<Self, ConfigError> {
        let config: DeviceConfig = toml::from_str(input)?;
        config.validate()?;
        Ok(config)
    }

    /// The configuration compiled into this binary
    pub fn embedded() -> Result<Self, ConfigError> {
        Self::parse(EMBEDDED_CONFIG)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        let invalid = |msg: &str| Err(ConfigError::Invalid(msg.to_string()));

        if self.wifi.ssid.is_empty() {
            return invalid("[wifi] ssid must not be empty");
        }
        if usize::from(self.wifi.reconnect.trials) > MAX_TRIALS {
            return Err(ConfigError::Invalid(format!(
                "[wifi.reconnect] trials must be at most {}",
                MAX_TRIALS
            )));
        }
        if self.http.port == 0 {
            return invalid("[http] port must not be 0");
        }
        if self.http.timeout_ms == 0 {
            return invalid("[http] timeout_ms must not be 0");
        }
        if self.display.width == 0 || self.display.height == 0 {
            return invalid("[display] width and height must not be 0");
        }
        if usize::from(self.display.width) > MAX_WIDTH {
            return Err(ConfigError::Invalid(format!(
                "[display] width must be at most {}",
                MAX_WIDTH
            )));
        }
        if self.gauge.tick_ms == 0 {
            return invalid("[gauge] tick_ms must not be 0");
        }
        if self.gauge.reference > 100.0 || self.gauge.reference.is_nan() {
            return invalid("[gauge] reference must be at most 100 (negative hides it)");
        }
        Ok(())
    }

    pub fn credentials(&self) -> Credentials<'_> {
        Credentials {
            ssid: &self.wifi.ssid,
            passphrase: &self.wifi.passphrase,
        }
    }

    /// Settings handed to the event loop
    pub fn loop_config(&self) -> LoopConfig {
        LoopConfig {
            gauge: self.gauge,
            http_timeout_ms: self.http.timeout_ms,
            delay_ms: self.event_loop.delay_ms,
            brightness: self.display.brightness,
            reconnect: self.wifi.reconnect,
        }
    }
}
