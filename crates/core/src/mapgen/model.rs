//! Public data models for generated levels.

use serde::{Deserialize, Serialize};

use super::decoration::Decoration;
use super::grid::{RoomMap, TileGrid};
use crate::config::{DungeonConfig, LevelSeeds};
use crate::spawning::SpawnPlan;
use crate::types::{Pos, RoomCell, RoomId, RoomKind, TileKind};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Room {
    pub id: RoomId,
    pub x: usize,
    pub y: usize,
    pub width: usize,
    pub height: usize,
    pub kind: RoomKind,
    /// Rooms reachable through a door, in the order doors were placed.
    pub neighbors: Vec<RoomId>,
    /// Rooms sharing a one-tile wall, ascending.
    pub spatial_neighbors: Vec<RoomId>,
    visible: bool,
}

impl Room {
    pub fn new(
        id: RoomId,
        x: usize,
        y: usize,
        width: usize,
        height: usize,
        kind: RoomKind,
    ) -> Self {
        Self {
            id,
            x,
            y,
            width,
            height,
            kind,
            neighbors: Vec::new(),
            spatial_neighbors: Vec::new(),
            visible: false,
        }
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// Returns true when the room was hidden until now. Rooms never hide again.
    pub(crate) fn reveal(&mut self) -> bool {
        let newly = !self.visible;
        self.visible = true;
        newly
    }

    pub fn contains(&self, pos: Pos) -> bool {
        pos.x >= self.x as i32
            && pos.y >= self.y as i32
            && pos.x < (self.x + self.width) as i32
            && pos.y < (self.y + self.height) as i32
    }

    pub(crate) fn add_neighbor(&mut self, other: RoomId) {
        if !self.neighbors.contains(&other) {
            self.neighbors.push(other);
        }
    }
}

/// Structural output of generation: tiles, room ownership, rooms and door tiles.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DungeonLayout {
    pub tiles: TileGrid,
    pub room_map: RoomMap,
    pub rooms: Vec<Room>,
    /// Door tiles in placement order.
    pub doors: Vec<Pos>,
}

impl DungeonLayout {
    pub fn width(&self) -> usize {
        self.tiles.width()
    }

    pub fn height(&self) -> usize {
        self.tiles.height()
    }

    pub fn tile_at(&self, pos: Pos) -> TileKind {
        self.tiles.tile_at(pos)
    }

    pub fn room_at(&self, pos: Pos) -> Option<RoomId> {
        self.room_map.room_at(pos)
    }

    pub fn room(&self, id: RoomId) -> Option<&Room> {
        self.rooms.get(id)
    }

    /// Floor tiles owned by `room`, row-major.
    pub fn floor_tiles(&self, room: RoomId) -> Vec<Pos> {
        let Some(room) = self.rooms.get(room) else {
            return Vec::new();
        };
        let mut tiles = Vec::new();
        for y in room.y..room.y + room.height {
            for x in room.x..room.x + room.width {
                let pos = Pos { y: y as i32, x: x as i32 };
                if self.tiles.tile_at(pos) == TileKind::Floor
                    && self.room_map.cell_at(pos) == RoomCell::Room(room.id)
                {
                    tiles.push(pos);
                }
            }
        }
        tiles
    }

    pub fn all_floor_tiles(&self) -> Vec<Pos> {
        self.tiles.positions().filter(|pos| self.tiles.tile_at(*pos) == TileKind::Floor).collect()
    }

    pub(crate) fn reveal_room(&mut self, id: RoomId) -> bool {
        self.rooms.get_mut(id).is_some_and(Room::reveal)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct GeneratedDungeon {
    pub config: DungeonConfig,
    pub seeds: LevelSeeds,
    pub layout: DungeonLayout,
    pub decoration: Decoration,
    pub spawns: SpawnPlan,
}

impl GeneratedDungeon {
    pub fn canonical_bytes(&self) -> Vec<u8> {
        let layout = &self.layout;
        let mut bytes = Vec::new();
        bytes.extend((layout.width() as u32).to_le_bytes());
        bytes.extend((layout.height() as u32).to_le_bytes());
        for tile in layout.tiles.tiles() {
            bytes.push(match tile {
                TileKind::Empty => 0,
                TileKind::Floor => 1,
                TileKind::Wall => 2,
                TileKind::Door => 3,
                TileKind::Corner => 4,
            });
        }
        for cell in layout.room_map.cells() {
            bytes.extend(cell.raw().to_le_bytes());
        }

        bytes.extend((layout.rooms.len() as u32).to_le_bytes());
        for room in &layout.rooms {
            for value in [room.x, room.y, room.width, room.height] {
                bytes.extend((value as u32).to_le_bytes());
            }
            bytes.push(match room.kind {
                RoomKind::Empty => 0,
                RoomKind::Treasure => 1,
                RoomKind::Combat => 2,
            });
            bytes.push(u8::from(room.is_visible()));
            bytes.extend((room.neighbors.len() as u32).to_le_bytes());
            for neighbor in &room.neighbors {
                bytes.extend((*neighbor as u32).to_le_bytes());
            }
            bytes.extend((room.spatial_neighbors.len() as u32).to_le_bytes());
            for neighbor in &room.spatial_neighbors {
                bytes.extend((*neighbor as u32).to_le_bytes());
            }
        }

        for variant in &self.decoration.variants {
            bytes.push(variant.floor);
            bytes.push(variant.wall);
        }
        bytes.extend(self.decoration.render_seed.to_le_bytes());

        let spawns = &self.spawns;
        match spawns.player_spawn {
            Some(pos) => {
                bytes.push(1);
                bytes.extend(pos.y.to_le_bytes());
                bytes.extend(pos.x.to_le_bytes());
            }
            None => bytes.push(0),
        }
        bytes.extend((spawns.enemies.len() as u32).to_le_bytes());
        for enemy in &spawns.enemies {
            bytes.extend(enemy.pos.y.to_le_bytes());
            bytes.extend(enemy.pos.x.to_le_bytes());
            bytes.extend((enemy.room as u32).to_le_bytes());
            bytes.push(enemy.level);
            bytes.extend(enemy.subject.as_bytes());
            bytes.push(0);
        }
        bytes.extend((spawns.treasures.len() as u32).to_le_bytes());
        for pos in &spawns.treasures {
            bytes.extend(pos.y.to_le_bytes());
            bytes.extend(pos.x.to_le_bytes());
        }

        bytes
    }

    pub fn tile_at(&self, pos: Pos) -> TileKind {
        self.layout.tile_at(pos)
    }
}
