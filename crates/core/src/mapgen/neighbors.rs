//! Rooms that share a one-tile wall, used by lighting and never by pathfinding.

use std::collections::BTreeSet;

use super::connect::separated_rooms;
use super::grid::{RoomMap, TileGrid};
use super::model::Room;
use crate::types::TileKind;

/// Fills `spatial_neighbors` for every room. Door tiles count as wall here so the result always
/// includes every pair of rooms joined by a door.
pub(super) fn assign_spatial_neighbors(tiles: &TileGrid, room_map: &RoomMap, rooms: &mut [Room]) {
    let mut adjacency: Vec<BTreeSet<usize>> = vec![BTreeSet::new(); rooms.len()];
    for pos in tiles.positions() {
        if !matches!(tiles.tile_at(pos), TileKind::Wall | TileKind::Door) {
            continue;
        }
        let pairs = [(pos.offset(0, -1), pos.offset(0, 1)), (pos.offset(-1, 0), pos.offset(1, 0))];
        for (a, b) in pairs {
            if let (Some(first), Some(second)) = (room_map.room_at(a), room_map.room_at(b))
                && first != second
            {
                adjacency[first].insert(second);
                adjacency[second].insert(first);
            }
        }
    }
    for (room, neighbors) in rooms.iter_mut().zip(adjacency) {
        room.spatial_neighbors = neighbors.into_iter().collect();
    }
}
