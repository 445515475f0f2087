//! System services shared by the game and the board: time and randomness

/// Monotonic millisecond clock. The counter may wrap around.
pub trait Clock {
    fn now_ms(&self) -> u32;
}

/// Milliseconds from `since` to `now`, correct across counter wraparound
#[inline]
pub fn elapsed_ms(now: u32, since: u32) -> u32 {
    now.wrapping_sub(since)
}

/// Source of random integers
pub trait RandomSource {
    fn next_u32(&mut self) -> u32;

    /// Uniform-ish value in `[low, high)`. Returns `low` for an empty range.
    fn in_range(&mut self, low: u32, high: u32) -> u32 {
        if high <= low {
            return low;
        }
        low + self.next_u32() % (high - low)
    }
}

/// xorshift32 generator
pub struct XorShift32 {
    state: u32,
}

impl XorShift32 {
    const FALLBACK_SEED: u32 = 0x2545_F491;

    /// A zero seed would lock the generator at zero, so it is replaced
    pub const fn new(seed: u32) -> Self {
        Self {
            state: if seed == 0 { Self::FALLBACK_SEED } else { seed },
        }
    }
}

impl RandomSource for XorShift32 {
    fn next_u32(&mut self) -> u32 {
        let mut x = self.state;
        x ^= x << 13;
        x ^= x >> 17;
        x ^= x << 5;
        self.state = x;
        x
    }
}

/// Mix one noisy ADC reading into a seed. Only the low bits carry noise.
#[inline]
pub fn fold_entropy(seed: u32, sample: u16) -> u32 {
    seed.rotate_left(3) ^ u32::from(sample & 0x0F)
}
