//! Shared fixtures for unit tests.
//! This module exists so hand-drawn layouts do not repeat room bookkeeping in every test.
//! It does not own production generation logic.

use std::collections::VecDeque;

use crate::mapgen::{DungeonLayout, Room, RoomMap, TileGrid};
use crate::types::{Pos, RoomCell, RoomKind, TileKind};

/// Builds a layout from ASCII rows. Each 4-connected floor region becomes a room, numbered in
/// row-major order of its first tile; doors link the rooms on either side.
pub(crate) fn layout_from_rows(rows: &[&str]) -> DungeonLayout {
    let tiles = TileGrid::from_rows(rows);
    let mut room_map = RoomMap::new(tiles.width(), tiles.height());
    let mut rooms: Vec<Room> = Vec::new();

    for origin in tiles.positions() {
        if tiles.tile_at(origin) != TileKind::Floor || room_map.cell_at(origin) != RoomCell::Void {
            continue;
        }
        let id = rooms.len();
        let (mut min, mut max) = (origin, origin);
        let mut open = VecDeque::from([origin]);
        room_map.set_cell(origin, RoomCell::Room(id));
        while let Some(pos) = open.pop_front() {
            min = Pos { y: min.y.min(pos.y), x: min.x.min(pos.x) };
            max = Pos { y: max.y.max(pos.y), x: max.x.max(pos.x) };
            for next in pos.orthogonal_neighbors() {
                let unclaimed = room_map.cell_at(next) == RoomCell::Void;
                if tiles.tile_at(next) == TileKind::Floor && unclaimed {
                    room_map.set_cell(next, RoomCell::Room(id));
                    open.push_back(next);
                }
            }
        }
        let width = (max.x - min.x + 1) as usize;
        let height = (max.y - min.y + 1) as usize;
        rooms.push(Room::new(id, min.x as usize, min.y as usize, width, height, RoomKind::Empty));
    }

    let mut doors = Vec::new();
    for pos in tiles.positions() {
        if tiles.tile_at(pos) != TileKind::Door {
            continue;
        }
        room_map.set_cell(pos, RoomCell::Door);
        doors.push(pos);
        let pairs = [(pos.offset(0, -1), pos.offset(0, 1)), (pos.offset(-1, 0), pos.offset(1, 0))];
        for (a, b) in pairs {
            if let (Some(first), Some(second)) = (room_map.room_at(a), room_map.room_at(b))
                && first != second
            {
                rooms[first].add_neighbor(second);
                rooms[second].add_neighbor(first);
            }
        }
    }

    for room in &mut rooms {
        room.spatial_neighbors = room.neighbors.clone();
        room.spatial_neighbors.sort_unstable();
    }

    DungeonLayout { tiles, room_map, rooms, doors }
}

/// Same as [`layout_from_rows`] with extra wall-separated spatial links.
pub(crate) fn with_spatial_links(
    mut layout: DungeonLayout,
    links: &[(usize, usize)],
) -> DungeonLayout {
    for (a, b) in links {
        for (from, to) in [(*a, *b), (*b, *a)] {
            if !layout.rooms[from].spatial_neighbors.contains(&to) {
                layout.rooms[from].spatial_neighbors.push(to);
                layout.rooms[from].spatial_neighbors.sort_unstable();
            }
        }
    }
    layout
}
