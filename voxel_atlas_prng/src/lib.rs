// Seeded pseudo-random number generator for world generation.
//
// xoshiro256++ (Blackman & Vigna, 2019), state expanded from a single `u64`
// seed with SplitMix64. Galaxy layout, star colors, and the random
// warp/route targets of the galaxy controller all draw from one
// `WorldRng`, so a seed plus a command script fully reproduces a session.
//
// The generator is kept in its own crate so the CLI and benches can seed
// worlds without depending on the generation internals.
//
// **Critical constraint: determinism.** The integer core must produce the
// same stream on every platform. Float helpers only scale integer bits;
// they never feed floating-point results back into the state.

use serde::{Deserialize, Serialize};

/// Xoshiro256++ state. Cloning forks the stream.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorldRng {
    s: [u64; 4],
}

impl WorldRng {
    /// Seed a new generator. Equal seeds yield equal streams.
    pub fn new(seed: u64) -> Self {
        let mut sm = seed;
        Self {
            s: [
                splitmix64(&mut sm),
                splitmix64(&mut sm),
                splitmix64(&mut sm),
                splitmix64(&mut sm),
            ],
        }
    }

    pub fn next_u64(&mut self) -> u64 {
        let result = (self.s[0].wrapping_add(self.s[3]))
            .rotate_left(23)
            .wrapping_add(self.s[0]);

        let t = self.s[1] << 17;

        self.s[2] ^= self.s[0];
        self.s[3] ^= self.s[1];
        self.s[1] ^= self.s[2];
        self.s[0] ^= self.s[3];

        self.s[2] ^= t;
        self.s[3] = self.s[3].rotate_left(45);

        result
    }

    /// Uniform `f32` in [0, 1), built from the top 24 bits.
    pub fn next_f32(&mut self) -> f32 {
        (self.next_u64() >> 40) as f32 / (1u64 << 24) as f32
    }

    /// Uniform value in `[low, high)`. Panics if `low >= high`.
    pub fn range_f32(&mut self, low: f32, high: f32) -> f32 {
        assert!(low < high, "range_f32: low must be less than high");
        // Rounding can land exactly on `high` for wide ranges; fold it back.
        let v = low + self.next_f32() * (high - low);
        if v >= high { low } else { v }
    }

    /// Uniform index in `[low, high)`, rejection-sampled to avoid modulo
    /// bias. Panics if `low >= high`.
    pub fn range_usize(&mut self, low: usize, high: usize) -> usize {
        assert!(low < high, "range_usize: low must be less than high");
        let range = (high - low) as u64;
        if range.is_power_of_two() {
            return low + (self.next_u64() & (range - 1)) as usize;
        }
        let threshold = range.wrapping_neg() % range;
        loop {
            let r = self.next_u64();
            if r >= threshold {
                return low + (r % range) as usize;
            }
        }
    }

    /// Uniform index in `[0, len)` that differs from `exclude`.
    ///
    /// Re-rolls on collision. Returns `None` when no other index exists
    /// (`len <= 1` with `exclude` inside the range).
    pub fn index_other_than(&mut self, len: usize, exclude: usize) -> Option<usize> {
        if len == 0 || (len == 1 && exclude == 0) {
            return None;
        }
        loop {
            let candidate = self.range_usize(0, len);
            if candidate != exclude {
                return Some(candidate);
            }
        }
    }
}

/// SplitMix64 step, used only to expand the seed.
fn splitmix64(state: &mut u64) -> u64 {
    *state = state.wrapping_add(0x9e37_79b9_7f4a_7c15);
    let mut z = *state;
    z = (z ^ (z >> 30)).wrapping_mul(0xbf58_476d_1ce4_e5b9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94d0_49bb_1331_11eb);
    z ^ (z >> 31)
}
