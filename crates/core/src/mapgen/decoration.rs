//! Cosmetic per-tile variants drawn from the decoration stream.

use serde::{Deserialize, Serialize};

use crate::rng::SeededRandom;

pub const FLOOR_VARIANT_WEIGHTS: [u32; 5] = [200, 50, 30, 2, 1];
pub const WALL_VARIANT_WEIGHTS: [u32; 5] = [20, 15, 15, 15, 1];
const RENDER_SEED_LIMIT: i32 = 1_000_000;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TileVariant {
    pub floor: u8,
    pub wall: u8,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Decoration {
    /// Row-major, one entry per tile.
    pub variants: Vec<TileVariant>,
    /// Handed to the external tilemap renderer.
    pub render_seed: u32,
}

pub(super) fn decorate(width: usize, height: usize, rng: &mut SeededRandom) -> Decoration {
    let variants = (0..width * height)
        .map(|_| {
            let floor = rng.pick_weighted(&FLOOR_VARIANT_WEIGHTS) as u8;
            let wall = rng.pick_weighted(&WALL_VARIANT_WEIGHTS) as u8;
            TileVariant { floor, wall }
        })
        .collect();
    let render_seed = rng.next_int(0, RENDER_SEED_LIMIT) as u32;
    Decoration { variants, render_seed }
}

impl Decoration {
    /// `None` outside the `width`-wide grid the variants were drawn for.
    pub fn variant_at(&self, width: usize, x: usize, y: usize) -> Option<TileVariant> {
        if x >= width {
            return None;
        }
        self.variants.get(y * width + x).copied()
    }
}
