//! 64-bit Mersenne Twister (MT19937-64).
//!
//! Seeding follows `init_genrand64` from the reference C implementation by Matsumoto and
//! Nishimura, so a given seed yields the same stream as `std::mt19937_64` and the other
//! conforming ports. Programs depend on this bit-for-bit: the opcode stream of a program is
//! nothing but the low bits of these values.

use rand::{RngCore, SeedableRng};

const NN: usize = 312;
const MM: usize = 156;
const MATRIX_A: u64 = 0xB502_6F5A_A966_19E9;
/// Most significant 33 bits.
const UPPER_MASK: u64 = 0xFFFF_FFFF_8000_0000;
/// Least significant 31 bits.
const LOWER_MASK: u64 = 0x7FFF_FFFF;

const INIT_MULTIPLIER: u64 = 6_364_136_223_846_793_005;

/// Seed used by the reference implementation when none is given.
pub const DEFAULT_SEED: u64 = 5489;

#[derive(Clone, PartialEq, Eq)]
pub struct Mt64 {
    state: Box<[u64; NN]>,
    index: usize,
}

impl Mt64 {
    pub fn new(seed: u64) -> Self {
        let mut state = Box::new([0u64; NN]);
        state[0] = seed;
        for i in 1..NN {
            let prev = state[i - 1];
            state[i] = INIT_MULTIPLIER
                .wrapping_mul(prev ^ (prev >> 62))
                .wrapping_add(i as u64);
        }
        Self { state, index: NN }
    }

    #[inline]
    pub fn next_u64(&mut self) -> u64 {
        if self.index >= NN {
            self.twist();
        }

        let mut x = self.state[self.index];
        self.index += 1;

        x ^= (x >> 29) & 0x5555_5555_5555_5555;
        x ^= (x << 17) & 0x71D6_7FFF_EDA6_0000;
        x ^= (x << 37) & 0xFFF7_EEE0_0000_0000;
        x ^= x >> 43;
        x
    }

    fn twist(&mut self) {
        let mt = &mut *self.state;
        for i in 0..NN {
            let x = (mt[i] & UPPER_MASK) | (mt[(i + 1) % NN] & LOWER_MASK);
            let mut x_a = x >> 1;
            if x & 1 != 0 {
                x_a ^= MATRIX_A;
            }
            mt[i] = mt[(i + MM) % NN] ^ x_a;
        }
        self.index = 0;
    }
}

impl Default for Mt64 {
    fn default() -> Self {
        Self::new(DEFAULT_SEED)
    }
}

impl std::fmt::Debug for Mt64 {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // The 312-word state is noise in logs; the index is enough to tell instances apart.
        f.debug_struct("Mt64").field("index", &self.index).finish_non_exhaustive()
    }
}

impl RngCore for Mt64 {
    fn next_u32(&mut self) -> u32 {
        (Mt64::next_u64(self) >> 32) as u32
    }

    fn next_u64(&mut self) -> u64 {
        Mt64::next_u64(self)
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        for chunk in dest.chunks_mut(8) {
            let bytes = Mt64::next_u64(self).to_le_bytes();
            chunk.copy_from_slice(&bytes[..chunk.len()]);
        }
    }

    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), rand::Error> {
        self.fill_bytes(dest);
        Ok(())
    }
}

impl SeedableRng for Mt64 {
    type Seed = [u8; 8];

    fn from_seed(seed: Self::Seed) -> Self {
        Self::new(u64::from_le_bytes(seed))
    }

    /// Seeds directly with `init_genrand64`, unlike the default which scrambles `state` first.
    fn seed_from_u64(state: u64) -> Self {
        Self::new(state)
    }
}
