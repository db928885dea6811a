//! Seeded pseudo-random stream used to keep card layouts reproducible.

/// State used in place of a zero seed.
const ZERO_SEED_REPLACEMENT: u64 = 0x9E37_79B9_7F4A_7C15;

const MULTIPLIER: u64 = 2_862_933_555_777_941_757;
const INCREMENT: u64 = 3_037_000_493;

/// 64-bit linear congruential generator.
///
/// The transition is `state = state * 2862933555777941757 + 3037000493 (mod 2^64)` and every call
/// returns the new state. Arithmetic wraps, so the sequence is identical on every platform.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Lcg64 {
    state: u64,
}

impl Lcg64 {
    pub fn new(seed: u64) -> Self {
        let state = if seed == 0 {
            ZERO_SEED_REPLACEMENT
        } else {
            seed
        };
        Self { state }
    }

    /// Seed derived from a card/context index: `0xD1E5C0DE ^ (index * 1315423911)`.
    pub fn for_index(index: u64) -> Self {
        Self::new(seed_for_index(index))
    }

    /// Current raw state; lets callers check seeding and checkpoint a stream.
    pub fn state(&self) -> u64 {
        self.state
    }

    pub fn next_u64(&mut self) -> u64 {
        self.state = self
            .state
            .wrapping_mul(MULTIPLIER)
            .wrapping_add(INCREMENT);
        self.state
    }

    /// Maps to `[0, 1)` with 53 bits of precision.
    pub fn next_f64_unit(&mut self) -> f64 {
        let u = self.next_u64() >> 11;
        (u as f64) / ((1u64 << 53) as f64)
    }

    /// Uniform angle in `[0, 2π)`.
    pub fn next_angle(&mut self) -> f64 {
        self.next_f64_unit() * std::f64::consts::TAU
    }

    pub fn next_usize(&mut self, upper: usize) -> usize {
        if upper <= 1 {
            return 0;
        }
        // `floor(unit * upper)` rather than `% upper`: the low bits of an LCG have short periods.
        let v = self.next_f64_unit();
        let idx = (v * (upper as f64)).floor() as usize;
        idx.min(upper - 1)
    }

    /// Fisher-Yates shuffle driven by [`Lcg64::next_usize`].
    pub fn shuffle<T>(&mut self, items: &mut [T]) {
        for i in (1..items.len()).rev() {
            let j = self.next_usize(i + 1);
            items.swap(i, j);
        }
    }
}

pub fn seed_for_index(index: u64) -> u64 {
    0xD1E5_C0DE_u64 ^ index.wrapping_mul(1_315_423_911)
}
