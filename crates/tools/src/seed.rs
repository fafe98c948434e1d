use std::process;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

use dungeon_core::LevelSeeds;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SeedChoice {
    Cli(u32),
    Generated(u32),
}

impl SeedChoice {
    pub fn value(self) -> u32 {
        match self {
            Self::Cli(seed) | Self::Generated(seed) => seed,
        }
    }

    pub fn resolve(cli: Option<u32>, generated: impl FnOnce() -> u32) -> Self {
        match cli {
            Some(seed) => Self::Cli(seed),
            None => Self::Generated(generated()),
        }
    }
}

static GENERATED_SEED_COUNTER: AtomicU64 = AtomicU64::new(0);

pub fn generate_runtime_seed() -> u32 {
    let now_nanos =
        SystemTime::now().duration_since(UNIX_EPOCH).map_or(0_u128, |duration| duration.as_nanos());
    let pid = u64::from(process::id());
    let counter = GENERATED_SEED_COUNTER.fetch_add(1, Ordering::Relaxed);

    let entropy = (now_nanos as u64)
        ^ ((now_nanos >> 64) as u64)
        ^ pid.rotate_left(17)
        ^ counter.rotate_left(7);

    let mixed = mix_seed(entropy);
    (mixed ^ (mixed >> 32)) as u32
}

/// Fills every seed the command line left out with a fresh runtime seed.
pub fn resolve_level_seeds(
    structure: Option<u32>,
    decoration: Option<u32>,
    spawn: Option<u32>,
) -> (LevelSeeds, [SeedChoice; 3]) {
    let choices = [
        SeedChoice::resolve(structure, generate_runtime_seed),
        SeedChoice::resolve(decoration, generate_runtime_seed),
        SeedChoice::resolve(spawn, generate_runtime_seed),
    ];
    let seeds = LevelSeeds {
        structure: choices[0].value(),
        decoration: choices[1].value(),
        spawn: choices[2].value(),
    };
    (seeds, choices)
}

fn mix_seed(mut value: u64) -> u64 {
    value ^= value >> 30;
    value = value.wrapping_mul(0xBF58_476D_1CE4_E5B9);
    value ^= value >> 27;
    value = value.wrapping_mul(0x94D0_49BB_1331_11EB);
    value ^ (value >> 31)
}
