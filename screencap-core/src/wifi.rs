//! WiFi reconnect policy
//!
//! The link is checked once per tick. When it is down the loop blocks for
//! a bounded time trying to bring it back: drop the association, let the
//! radio settle, start over and poll until connected or out of trials.

use heapless::Vec;
use screencap_hal::{Clock, LinkStatus, WifiLink};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Upper bound on recorded trials per attempt
pub const MAX_TRIALS: usize = 32;

/// Network credentials
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Credentials<'a> {
    pub ssid: &'a str,
    pub passphrase: &'a str,
}

/// Timing of one reconnect attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ReconnectPolicy {
    /// Pause between disconnect and begin (ms)
    pub settle_ms: u32,
    /// Number of status polls; capped at [`MAX_TRIALS`]
    pub trials: u8,
    /// Pause after each poll (ms)
    pub interval_ms: u32,
}

impl Default for ReconnectPolicy {
    fn default() -> Self {
        Self {
            settle_ms: 1500,
            trials: 20,
            interval_ms: 500,
        }
    }
}

/// What happened during one reconnect attempt
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct WifiOutcome {
    /// Status seen at each trial, in order
    pub statuses: Vec<LinkStatus, MAX_TRIALS>,
    pub connected: bool,
}

/// Tear the link down and bring it back up, blocking for a bounded time
pub fn reconnect<W, C>(
    link: &mut W,
    clock: &mut C,
    credentials: &Credentials<'_>,
    policy: &ReconnectPolicy,
) -> WifiOutcome
where
    W: WifiLink + ?Sized,
    C: Clock + ?Sized,
{
    link.disconnect();
    clock.delay_ms(policy.settle_ms);
    link.begin(credentials.ssid, credentials.passphrase);

    let trials = usize::from(policy.trials).min(MAX_TRIALS);
    let mut statuses = Vec::new();
    let mut status = link.status();
    while !status.is_connected() && statuses.len() < trials {
        status = link.status();
        // Cannot fail: bounded by `trials`
        let _ = statuses.push(status);
        clock.delay_ms(policy.interval_ms);
    }

    WifiOutcome {
        statuses,
        connected: status.is_connected(),
    }
}

/// Reconnect only if the link is down
pub fn ensure_connected<W, C>(
    link: &mut W,
    clock: &mut C,
    credentials: &Credentials<'_>,
    policy: &ReconnectPolicy,
) -> Option<WifiOutcome>
where
    W: WifiLink + ?Sized,
    C: Clock + ?Sized,
{
    if link.status().is_connected() {
        None
    } else {
        Some(reconnect(link, clock, credentials, policy))
    }
}
