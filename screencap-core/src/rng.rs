//! Small PRNG for the gauge random walk

/// xorshift32; plenty for wobbling a needle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Rng {
    state: u32,
}

impl Rng {
    /// Seed the generator; a zero seed is replaced since xorshift sticks at 0
    pub const fn new(seed: u32) -> Self {
        Self {
            state: if seed == 0 { 0x9E37_79B9 } else { seed },
        }
    }

    pub fn next_u32(&mut self) -> u32 {
        let mut x = self.state;
        x ^= x << 13;
        x ^= x >> 17;
        x ^= x << 5;
        self.state = x;
        x
    }

    /// Uniform integer in `-step..=step`
    pub fn step(&mut self, step: u8) -> i16 {
        let span = 2 * u32::from(step) + 1;
        (self.next_u32() % span) as i16 - i16::from(step)
    }
}
