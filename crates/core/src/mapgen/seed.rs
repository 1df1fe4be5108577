//! Seeded random stream threaded through every random choice of a generation pass.

use std::process;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

use rand_chacha::ChaCha8Rng;
use rand_chacha::rand_core::{Rng, SeedableRng};

pub struct MapRng {
    rng: ChaCha8Rng,
}

impl MapRng {
    pub fn from_seed(seed: u64) -> Self {
        Self { rng: ChaCha8Rng::seed_from_u64(seed) }
    }

    /// Uniform draw from `min..=max`.
    pub fn range_inclusive(&mut self, min: i32, max: i32) -> i32 {
        debug_assert!(min <= max);
        let span = (i64::from(max) - i64::from(min) + 1) as u64;
        min + (self.rng.next_u64() % span) as i32
    }

    pub fn index(&mut self, len: usize) -> usize {
        debug_assert!(len > 0);
        self.rng.next_u64() as usize % len
    }

    pub fn coin(&mut self) -> bool {
        self.rng.next_u64() & 1 == 0
    }

    /// Uniform draw from `[0, 1)`.
    pub fn unit(&mut self) -> f64 {
        (self.rng.next_u64() >> 11) as f64 / (1_u64 << 53) as f64
    }
}

static GENERATED_SEED_COUNTER: AtomicU64 = AtomicU64::new(0);

pub fn generate_runtime_seed() -> u64 {
    let now_nanos =
        SystemTime::now().duration_since(UNIX_EPOCH).map_or(0_u128, |duration| duration.as_nanos());
    let pid = u64::from(process::id());
    let counter = GENERATED_SEED_COUNTER.fetch_add(1, Ordering::Relaxed);

    let entropy = (now_nanos as u64)
        ^ ((now_nanos >> 64) as u64)
        ^ pid.rotate_left(17)
        ^ counter.rotate_left(7);

    mix_seed(entropy)
}

pub(super) fn mix_seed(mut value: u64) -> u64 {
    value ^= value >> 30;
    value = value.wrapping_mul(0xBF58_476D_1CE4_E5B9);
    value ^= value >> 27;
    value = value.wrapping_mul(0x94D0_49BB_1331_11EB);
    value ^ (value >> 31)
}

/// Seed for one level of a run, so every level of a run differs but replays identically.
pub fn derive_level_seed(run_seed: u64, level: u32) -> u64 {
    let level_mix = u64::from(level).wrapping_mul(0xD6E8_FD9A_5B89_7A4D);
    mix_seed(run_seed ^ 0x9E37_79B9_7F4A_7C15 ^ level_mix)
}
