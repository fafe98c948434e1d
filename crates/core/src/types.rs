use serde::{Deserialize, Serialize};
use slotmap::new_key_type;

new_key_type! {
    pub struct EnemyId;
}

/// Dense room index; rooms are numbered in the order the partition emits leaves.
pub type RoomId = usize;

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Pos {
    pub y: i32,
    pub x: i32,
}

impl Pos {
    pub fn offset(self, dx: i32, dy: i32) -> Self {
        Self { y: self.y + dy, x: self.x + dx }
    }

    /// Up, down, left, right. Door retargeting and push-off both rely on this order.
    pub fn orthogonal_neighbors(self) -> [Pos; 4] {
        ORTHOGONAL_OFFSETS.map(|(dx, dy)| self.offset(dx, dy))
    }

    pub fn surrounding(self) -> impl Iterator<Item = Pos> {
        (-1..=1).flat_map(move |dy| {
            (-1..=1).filter(move |dx| !(*dx == 0 && dy == 0)).map(move |dx| self.offset(dx, dy))
        })
    }
}

pub(crate) const ORTHOGONAL_OFFSETS: [(i32, i32); 4] = [(0, -1), (0, 1), (-1, 0), (1, 0)];

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum TileKind {
    Empty,
    Floor,
    Wall,
    Door,
    Corner,
}

impl TileKind {
    pub fn is_wall_like(self) -> bool {
        matches!(self, TileKind::Wall | TileKind::Door | TileKind::Corner)
    }
}

/// One entry of the room map. Lookups outside the grid yield `Void`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RoomCell {
    Void,
    Door,
    Room(RoomId),
}

impl RoomCell {
    /// Integer encoding shared with renderers: `-1` void, `-2` door, otherwise the room index.
    pub fn raw(self) -> i32 {
        match self {
            RoomCell::Void => -1,
            RoomCell::Door => -2,
            RoomCell::Room(id) => id as i32,
        }
    }

    pub fn from_raw(raw: i32) -> Self {
        match raw {
            -2 => RoomCell::Door,
            id if id >= 0 => RoomCell::Room(id as RoomId),
            _ => RoomCell::Void,
        }
    }

    pub fn room(self) -> Option<RoomId> {
        match self {
            RoomCell::Room(id) => Some(id),
            _ => None,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RoomKind {
    Empty,
    Treasure,
    Combat,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Direction {
    Up,
    #[default]
    Down,
    Left,
    Right,
}

impl Direction {
    /// Facing for a movement delta; the horizontal axis wins ties.
    pub fn from_delta(dx: f32, dy: f32) -> Self {
        if dx.abs() >= dy.abs() {
            if dx > 0.0 { Direction::Right } else { Direction::Left }
        } else if dy > 0.0 {
            Direction::Down
        } else {
            Direction::Up
        }
    }
}

/// Continuous position in tile units. The entity covers the unit box whose top-left is `(x, y)`.
#[derive(Clone, Copy, Debug, PartialEq, Default, Serialize, Deserialize)]
pub struct WorldPos {
    pub x: f32,
    pub y: f32,
}

impl WorldPos {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn at_tile(pos: Pos) -> Self {
        Self { x: pos.x as f32, y: pos.y as f32 }
    }

    pub fn tile(self) -> Pos {
        Pos { y: (self.y + 0.5).floor() as i32, x: (self.x + 0.5).floor() as i32 }
    }

    pub fn distance_to(self, other: WorldPos) -> f32 {
        (other.x - self.x).hypot(other.y - self.y)
    }
}
