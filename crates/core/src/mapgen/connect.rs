//! Door placement: a spanning set of doors chosen with union-find, plus a few loop doors.

use std::cmp::Ordering;

use super::grid::{RoomMap, TileGrid};
use super::model::Room;
use crate::rng::SeededRandom;
use crate::types::{Pos, RoomCell, RoomId, TileKind};

const LOOP_DOOR_CHANCE: f64 = 0.02;

struct UnionFind {
    parent: Vec<usize>,
    rank: Vec<u8>,
}

impl UnionFind {
    fn new(size: usize) -> Self {
        Self { parent: (0..size).collect(), rank: vec![0; size] }
    }

    fn find(&mut self, item: usize) -> usize {
        let mut root = item;
        while self.parent[root] != root {
            root = self.parent[root];
        }
        let mut current = item;
        while self.parent[current] != root {
            let next = self.parent[current];
            self.parent[current] = root;
            current = next;
        }
        root
    }

    /// Returns false when both items already share a component.
    fn union(&mut self, a: usize, b: usize) -> bool {
        let (root_a, root_b) = (self.find(a), self.find(b));
        if root_a == root_b {
            return false;
        }
        match self.rank[root_a].cmp(&self.rank[root_b]) {
            Ordering::Less => self.parent[root_a] = root_b,
            Ordering::Greater => self.parent[root_b] = root_a,
            Ordering::Equal => {
                self.parent[root_b] = root_a;
                self.rank[root_a] += 1;
            }
        }
        true
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(super) struct DoorCandidate {
    pub(super) pos: Pos,
    pub(super) first: RoomId,
    pub(super) second: RoomId,
}

/// Rooms on either side of `pos` when it separates two different rooms, vertical pair first.
pub(super) fn separated_rooms(room_map: &RoomMap, pos: Pos) -> Option<(RoomId, RoomId)> {
    let pairs = [(pos.offset(0, -1), pos.offset(0, 1)), (pos.offset(-1, 0), pos.offset(1, 0))];
    pairs.into_iter().find_map(|(a, b)| match (room_map.room_at(a), room_map.room_at(b)) {
        (Some(first), Some(second)) if first != second => Some((first, second)),
        _ => None,
    })
}

pub(super) fn door_candidates(tiles: &TileGrid, room_map: &RoomMap) -> Vec<DoorCandidate> {
    tiles
        .positions()
        .filter(|pos| tiles.tile_at(*pos) == TileKind::Wall)
        .filter_map(|pos| {
            let (first, second) = separated_rooms(room_map, pos)?;
            Some(DoorCandidate { pos, first, second })
        })
        .collect()
}

/// Places doors until every room is reachable, then sprinkles loop doors. Returns door tiles
/// in placement order.
pub(super) fn connect_rooms(
    tiles: &mut TileGrid,
    room_map: &mut RoomMap,
    rooms: &mut [Room],
    rng: &mut SeededRandom,
) -> Vec<Pos> {
    let mut candidates = door_candidates(tiles, room_map);
    rng.shuffle(&mut candidates);

    let mut components = UnionFind::new(rooms.len());
    let mut doors = Vec::new();
    let mut leftovers = Vec::new();
    for candidate in candidates {
        if components.union(candidate.first, candidate.second) {
            place_door(tiles, room_map, rooms, candidate);
            doors.push(candidate.pos);
        } else {
            leftovers.push(candidate);
        }
    }

    for candidate in leftovers {
        if tiles.tile_at(candidate.pos) == TileKind::Door {
            continue;
        }
        if rng.next_bool(LOOP_DOOR_CHANCE) {
            place_door(tiles, room_map, rooms, candidate);
            doors.push(candidate.pos);
        }
    }

    log::debug!("placed {} doors between {} rooms", doors.len(), rooms.len());
    doors
}

fn place_door(
    tiles: &mut TileGrid,
    room_map: &mut RoomMap,
    rooms: &mut [Room],
    candidate: DoorCandidate,
) {
    tiles.set_tile(candidate.pos, TileKind::Door);
    room_map.set_cell(candidate.pos, RoomCell::Door);
    rooms[candidate.first].add_neighbor(candidate.second);
    rooms[candidate.second].add_neighbor(candidate.first);
}
