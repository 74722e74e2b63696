//! Host network link
//!
//! The host is already on a network; "associating" just flips the
//! reported status. The address shown on the boot screen is the one the
//! host would use for outbound traffic.

use std::net::{IpAddr, Ipv4Addr, UdpSocket};

use screencap_hal::{LinkStatus, WifiLink};

/// Network link of the host machine
#[derive(Debug, Clone)]
pub struct HostLink {
    status: LinkStatus,
    ip: Ipv4Addr,
}

impl HostLink {
    /// Link reporting `ip` once started
    pub fn new(ip: Ipv4Addr) -> Self {
        Self {
            status: LinkStatus::Idle,
            ip,
        }
    }

    /// Link reporting the host's primary IPv4 address
    pub fn detect() -> Self {
        Self::new(primary_ipv4().unwrap_or(Ipv4Addr::LOCALHOST))
    }
}

/// Address of the interface holding the default route
///
/// Connecting a UDP socket sends nothing; it only selects a route.
fn primary_ipv4() -> Option<Ipv4Addr> {
    let socket = UdpSocket::bind((Ipv4Addr::UNSPECIFIED, 0)).ok()?;
    socket.connect((Ipv4Addr::new(192, 0, 2, 1), 80)).ok()?;
    match socket.local_addr().ok()?.ip() {
        IpAddr::V4(ip) if !ip.is_unspecified() => Some(ip),
        _ => None,
    }
}

impl WifiLink for HostLink {
    fn status(&mut self) -> LinkStatus {
        self.status
    }

    fn begin(&mut self, ssid: &str, _passphrase: &str) {
        tracing::debug!("joining {:?} (host network)", ssid);
        self.status = LinkStatus::Connected;
    }

    fn disconnect(&mut self) {
        self.status = LinkStatus::Disconnected;
    }

    fn local_ip(&self) -> Option<[u8; 4]> {
        self.status.is_connected().then(|| self.ip.octets())
    }
}
