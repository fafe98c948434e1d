//! Binary space partitioning of the dungeon interior into room-sized leaves.

use super::grid::{RoomMap, TileGrid};
use super::model::Room;
use crate::rng::SeededRandom;
use crate::types::{Pos, RoomCell, RoomKind, TileKind};

const EARLY_STOP_CHANCE: f64 = 0.25;
const ASPECT_BIAS: f64 = 1.25;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(super) struct Region {
    pub(super) x: usize,
    pub(super) y: usize,
    pub(super) width: usize,
    pub(super) height: usize,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Split {
    /// Wall row at `y + offset`.
    Horizontal(usize),
    /// Wall column at `x + offset`.
    Vertical(usize),
}

#[derive(Debug)]
pub(super) struct BspNode {
    region: Region,
    split: Option<(Split, Box<BspNode>, Box<BspNode>)>,
}

#[derive(Clone, Copy, Debug)]
pub(super) struct RoomSizes {
    pub(super) min: usize,
    pub(super) max: usize,
}

impl BspNode {
    pub(super) fn partition(region: Region, sizes: RoomSizes, rng: &mut SeededRandom) -> Self {
        let mut node = Self { region, split: None };
        node.split(sizes, rng);
        node
    }

    fn split(&mut self, sizes: RoomSizes, rng: &mut SeededRandom) {
        let min = sizes.min.max(1);
        let splittable = 2 * min + 1;
        let Region { x, y, width, height } = self.region;
        if width < splittable || height < splittable {
            return;
        }
        if width <= sizes.max && height <= sizes.max && rng.next_bool(EARLY_STOP_CHANCE) {
            return;
        }

        let horizontal = if height as f64 > width as f64 * ASPECT_BIAS {
            true
        } else if width as f64 > height as f64 * ASPECT_BIAS {
            false
        } else {
            rng.next_bool(0.5)
        };

        let (split, first, second) = if horizontal {
            let at = next_split(min, height, rng);
            (
                Split::Horizontal(at),
                Region { x, y, width, height: at },
                Region { x, y: y + at + 1, width, height: height - at - 1 },
            )
        } else {
            let at = next_split(min, width, rng);
            (
                Split::Vertical(at),
                Region { x, y, width: at, height },
                Region { x: x + at + 1, y, width: width - at - 1, height },
            )
        };

        let mut first = Box::new(Self { region: first, split: None });
        let mut second = Box::new(Self { region: second, split: None });
        first.split(sizes, rng);
        second.split(sizes, rng);
        self.split = Some((split, first, second));
    }

    pub(super) fn leaf_count(&self) -> usize {
        match &self.split {
            None => 1,
            Some((_, first, second)) => first.leaf_count() + second.leaf_count(),
        }
    }

    /// Writes leaves as floor rooms and split lines as walls. Leaves are numbered depth-first,
    /// and each leaf draws its kind from `rng` in that same order.
    pub(super) fn carve(
        &self,
        tiles: &mut TileGrid,
        room_map: &mut RoomMap,
        rooms: &mut Vec<Room>,
        rng: &mut SeededRandom,
    ) {
        let Region { x, y, width, height } = self.region;
        match &self.split {
            None => {
                if width == 0 || height == 0 {
                    return;
                }
                let id = rooms.len();
                rooms.push(Room::new(id, x, y, width, height, roll_room_kind(rng)));
                for ty in y..y + height {
                    for tx in x..x + width {
                        let pos = Pos { y: ty as i32, x: tx as i32 };
                        tiles.set_tile(pos, TileKind::Floor);
                        room_map.set_cell(pos, RoomCell::Room(id));
                    }
                }
            }
            Some((split, first, second)) => {
                first.carve(tiles, room_map, rooms, rng);
                second.carve(tiles, room_map, rooms, rng);
                let line: Vec<Pos> = match *split {
                    Split::Horizontal(at) => {
                        (x..x + width).map(|tx| Pos { y: (y + at) as i32, x: tx as i32 }).collect()
                    }
                    Split::Vertical(at) => {
                        (y..y + height).map(|ty| Pos { y: ty as i32, x: (x + at) as i32 }).collect()
                    }
                };
                for pos in line {
                    tiles.set_tile(pos, TileKind::Wall);
                    room_map.set_cell(pos, RoomCell::Void);
                }
            }
        }
    }
}

fn next_split(min: usize, size: usize, rng: &mut SeededRandom) -> usize {
    let low = min as i32;
    let high = (size - min - 1) as i32;
    rng.next_int(low, high + 1) as usize
}

fn roll_room_kind(rng: &mut SeededRandom) -> RoomKind {
    let roll = rng.next_f64() * 10.0;
    if roll < 2.0 {
        RoomKind::Treasure
    } else if roll < 3.0 {
        RoomKind::Combat
    } else {
        RoomKind::Empty
    }
}

/// Turns every `Empty` tile on the grid border into `Wall`.
pub(super) fn close_perimeter(tiles: &mut TileGrid) {
    let (width, height) = (tiles.width() as i32, tiles.height() as i32);
    let border = tiles
        .positions()
        .filter(|pos| pos.x == 0 || pos.y == 0 || pos.x == width - 1 || pos.y == height - 1)
        .collect::<Vec<_>>();
    for pos in border {
        if tiles.tile_at(pos) == TileKind::Empty {
            tiles.set_tile(pos, TileKind::Wall);
        }
    }
}
