//! Animation cadence

/// Fires once `period_ms` has strictly passed since it was last armed
///
/// Re-arming always measures from the time passed in, so a late poll does
/// not cause a burst of catch-up ticks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Cadence {
    period_ms: u64,
    next_ms: u64,
}

impl Cadence {
    /// First tick after `hold_ms`, then every `period_ms`
    pub const fn new(now_ms: u64, hold_ms: u64, period_ms: u64) -> Self {
        Self {
            period_ms,
            next_ms: now_ms.saturating_add(hold_ms),
        }
    }

    /// Push the next tick a full period past `now_ms`
    pub fn restart(&mut self, now_ms: u64) {
        self.next_ms = now_ms.saturating_add(self.period_ms);
    }

    /// True if due; a due cadence re-arms itself from `now_ms`
    pub fn after(&mut self, now_ms: u64) -> bool {
        if now_ms > self.next_ms {
            self.restart(now_ms);
            true
        } else {
            false
        }
    }

    pub fn next_ms(&self) -> u64 {
        self.next_ms
    }
}
