//! Time base abstraction

/// Monotonic millisecond clock
///
/// `now_ms` is 64 bits wide so deadline arithmetic never has to deal with
/// wrap-around during the lifetime of the device.
pub trait Clock {
    /// Milliseconds since boot
    fn now_ms(&self) -> u64;

    /// Block the caller for `ms` milliseconds
    fn delay_ms(&mut self, ms: u32);
}
