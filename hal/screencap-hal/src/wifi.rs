//! WiFi station link abstraction
//!
//! Association is done by the radio firmware in the background; callers
//! start it with [`WifiLink::begin`] and poll [`WifiLink::status`].

/// Station link state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LinkStatus {
    /// Radio idle, no association in progress
    Idle,
    /// Configured SSID not found
    NoSsidAvailable,
    /// Network scan finished
    ScanCompleted,
    /// Associated and addressed
    Connected,
    /// Association failed (bad passphrase, rejected)
    ConnectFailed,
    /// Association dropped
    ConnectionLost,
    /// Not associated
    Disconnected,
}

impl LinkStatus {
    /// Whether the link carries traffic
    pub fn is_connected(self) -> bool {
        matches!(self, LinkStatus::Connected)
    }

    /// Whether the status indicates a failure rather than progress
    pub fn is_error(self) -> bool {
        matches!(
            self,
            LinkStatus::NoSsidAvailable | LinkStatus::ConnectFailed | LinkStatus::ConnectionLost
        )
    }
}

/// Station-mode WiFi link
pub trait WifiLink {
    /// Current link state
    fn status(&mut self) -> LinkStatus;

    /// Start associating with `ssid` (non-blocking)
    fn begin(&mut self, ssid: &str, passphrase: &str);

    /// Drop any current association
    fn disconnect(&mut self);

    /// IPv4 address while connected
    fn local_ip(&self) -> Option<[u8; 4]>;
}
