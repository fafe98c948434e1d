//! Deterministic random streams.
//!
//! Every purpose (structure, decoration, spawning, wandering) owns its own
//! stream so that drawing from one never perturbs another.

use rand_chacha::ChaCha8Rng;
use rand_chacha::rand_core::{Rng, SeedableRng};

use crate::config::LevelSeeds;

pub const STRUCTURE_STREAM: u64 = 1;
pub const DECORATION_STREAM: u64 = 2;
pub const SPAWN_STREAM: u64 = 3;
pub const WANDER_STREAM: u64 = 4;

pub(crate) fn mix_seed_stream(seed: u64, stream: u64) -> u64 {
    let mut mixed = seed ^ stream.wrapping_mul(0xD6E8_FD9A_5B89_7A4D);
    mixed ^= mixed >> 33;
    mixed = mixed.wrapping_mul(0xFF51_AFD7_ED55_8CCD);
    mixed ^= mixed >> 33;
    mixed = mixed.wrapping_mul(0xC4CE_B9FE_1A85_EC53);
    mixed ^ (mixed >> 33)
}

#[derive(Clone, Debug)]
pub struct SeededRandom {
    rng: ChaCha8Rng,
}

impl SeededRandom {
    pub fn new(seed: u32) -> Self {
        Self::for_stream(seed, 0)
    }

    pub fn for_stream(seed: u32, stream: u64) -> Self {
        Self { rng: ChaCha8Rng::seed_from_u64(mix_seed_stream(u64::from(seed), stream)) }
    }

    /// Uniform float in `[0, 1)`.
    pub fn next_f64(&mut self) -> f64 {
        (self.rng.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    /// Uniform integer in `[min, max)`. An empty range yields `min`.
    pub fn next_int(&mut self, min: i32, max: i32) -> i32 {
        if max <= min {
            return min;
        }
        let span = i64::from(max) - i64::from(min);
        let offset = (self.next_f64() * span as f64).floor() as i64;
        (i64::from(min) + offset.min(span - 1)) as i32
    }

    /// Uniform index in `[0, len)`; `len` must be non-zero.
    pub fn next_index(&mut self, len: usize) -> usize {
        debug_assert!(len > 0);
        ((self.next_f64() * len as f64) as usize).min(len.saturating_sub(1))
    }

    pub fn next_bool(&mut self, probability: f64) -> bool {
        self.next_f64() < probability
    }

    /// Fisher-Yates, walking from the back.
    pub fn shuffle<T>(&mut self, items: &mut [T]) {
        for i in (1..items.len()).rev() {
            let j = self.next_index(i + 1);
            items.swap(i, j);
        }
    }

    /// Roulette selection over integer weights. Falls back to index 0.
    pub fn pick_weighted(&mut self, weights: &[u32]) -> usize {
        let total: u64 = weights.iter().map(|w| u64::from(*w)).sum();
        let mut roll = self.next_f64() * total as f64;
        for (index, weight) in weights.iter().enumerate() {
            roll -= f64::from(*weight);
            if roll <= 0.0 {
                return index;
            }
        }
        0
    }
}

/// The three generation streams of one level.
#[derive(Clone, Debug)]
pub struct DungeonRng {
    pub structure: SeededRandom,
    pub decoration: SeededRandom,
    pub spawn: SeededRandom,
}

impl DungeonRng {
    pub fn from_seeds(seeds: LevelSeeds) -> Self {
        Self {
            structure: SeededRandom::for_stream(seeds.structure, STRUCTURE_STREAM),
            decoration: SeededRandom::for_stream(seeds.decoration, DECORATION_STREAM),
            spawn: SeededRandom::for_stream(seeds.spawn, SPAWN_STREAM),
        }
    }

    /// Stream used by wandering enemies while the level is played.
    pub fn wander(seeds: LevelSeeds) -> SeededRandom {
        SeededRandom::for_stream(seeds.spawn, WANDER_STREAM)
    }
}
