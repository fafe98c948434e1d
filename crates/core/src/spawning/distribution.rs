//! Enemy level sampling.

use std::f64::consts::PI;

use crate::rng::SeededRandom;

pub const COMBAT_LEVEL_MEAN: f64 = 8.0;
pub const COMBAT_LEVEL_STD_DEV: f64 = 1.5;
/// Extra spread per ELO point for normal rooms.
pub const NORMAL_LEVEL_STD_DEV_SLOPE: f64 = 0.5;
const HARD_LEVEL_WEIGHTS: [(u8, u32); 3] = [(8, 5), (9, 3), (10, 2)];

/// Box-Muller over two draws from `rng`.
pub fn random_normal(mean: f64, std_dev: f64, rng: &mut SeededRandom) -> f64 {
    // `next_f64` can return 0.0; flipping keeps the logarithm finite.
    let u1 = 1.0 - rng.next_f64();
    let u2 = rng.next_f64();
    let z0 = (-2.0 * u1.ln()).sqrt() * (2.0 * PI * u2).cos();
    z0 * std_dev + mean
}

/// Level 1..=6 centred on the player's skill for `elo` in 1..=10.
pub fn normal_room_level(elo: f64, rng: &mut SeededRandom) -> u8 {
    let target = 1.0 + (elo - 1.0) * (5.0 / 9.0);
    let std_dev = 1.0 + (elo / 10.0) * NORMAL_LEVEL_STD_DEV_SLOPE;
    random_normal(target, std_dev, rng).round().clamp(1.0, 6.0) as u8
}

/// Level 6..=10, or 8..=10 biased toward 8 when `guarantee_hard` is set.
pub fn combat_room_level(guarantee_hard: bool, rng: &mut SeededRandom) -> u8 {
    if guarantee_hard {
        let weights = HARD_LEVEL_WEIGHTS.map(|(_, weight)| weight);
        return HARD_LEVEL_WEIGHTS[rng.pick_weighted(&weights)].0;
    }
    random_normal(COMBAT_LEVEL_MEAN, COMBAT_LEVEL_STD_DEV, rng).round().clamp(6.0, 10.0) as u8
}
