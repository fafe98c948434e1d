//! Hitbox collision and axis-separated stepping shared by the player and enemies.

use crate::doors::DoorStates;
use crate::mapgen::TileGrid;
use crate::types::{Direction, Pos, TileKind, WorldPos};

/// Hitbox edge length in tiles, centred in the entity's unit box.
pub const HITBOX_SIZE: f32 = 0.5;
/// Distance at which a waypoint or path node counts as reached (5 px at 64 px per tile).
pub const WAYPOINT_THRESHOLD: f32 = 5.0 / 64.0;
/// Longest move checked against the grid at once, in tiles. Under half a hitbox.
pub const MAX_SUBSTEP: f32 = 0.25;
const MAX_SUBSTEPS: f32 = 4096.0;

/// Floor, or a door that is currently open.
pub fn is_passable(tiles: &TileGrid, doors: &DoorStates, pos: Pos) -> bool {
    match tiles.tile_at(pos) {
        TileKind::Floor => true,
        TileKind::Door => doors.is_open(pos),
        TileKind::Empty | TileKind::Wall | TileKind::Corner => false,
    }
}

/// True when any corner of the hitbox at `position` lies on a blocking tile.
pub fn collides(tiles: &TileGrid, doors: &DoorStates, position: WorldPos) -> bool {
    let margin = (1.0 - HITBOX_SIZE) / 2.0;
    let left = position.x + margin;
    let top = position.y + margin;
    let right = left + HITBOX_SIZE;
    let bottom = top + HITBOX_SIZE;
    [(left, top), (right, top), (left, bottom), (right, bottom)].into_iter().any(|(x, y)| {
        let pos = Pos { y: y.floor() as i32, x: x.floor() as i32 };
        !is_passable(tiles, doors, pos)
    })
}

/// Moves `position` by `delta`, one axis at a time so entities slide along walls. Long moves
/// are split into [`MAX_SUBSTEP`] pieces, so a slow frame cannot carry a hitbox past a wall.
pub fn step(
    tiles: &TileGrid,
    doors: &DoorStates,
    position: WorldPos,
    dx: f32,
    dy: f32,
) -> WorldPos {
    let pieces = (dx.abs().max(dy.abs()) / MAX_SUBSTEP).ceil().clamp(1.0, MAX_SUBSTEPS) as u32;
    let (part_x, part_y) = (dx / pieces as f32, dy / pieces as f32);
    (0..pieces).fold(position, |at, _| step_once(tiles, doors, at, part_x, part_y))
}

fn step_once(
    tiles: &TileGrid,
    doors: &DoorStates,
    position: WorldPos,
    dx: f32,
    dy: f32,
) -> WorldPos {
    let mut next = position;
    let moved_x = WorldPos { x: next.x + dx, ..next };
    if !collides(tiles, doors, moved_x) {
        next = moved_x;
    }
    let moved_y = WorldPos { y: next.y + dy, ..next };
    if !collides(tiles, doors, moved_y) {
        next = moved_y;
    }
    next
}

/// Result of a bounded move toward a target.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Stride {
    pub position: WorldPos,
    pub direction: Direction,
}

/// Walks up to `speed * dt` tiles toward `target` without overshooting it. Facing follows the
/// intended direction even when blocked.
pub fn stride_towards(
    tiles: &TileGrid,
    doors: &DoorStates,
    position: WorldPos,
    target: WorldPos,
    speed: f32,
    dt: f32,
) -> Option<Stride> {
    let dx = target.x - position.x;
    let dy = target.y - position.y;
    let distance = dx.hypot(dy);
    if distance <= 0.0 {
        return None;
    }
    let travel = (speed * dt).min(distance);
    let next = step(tiles, doors, position, dx / distance * travel, dy / distance * travel);
    Some(Stride { position: next, direction: Direction::from_delta(dx, dy) })
}
