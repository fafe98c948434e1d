use crate::doors::DoorStates;
use crate::mapgen::{DungeonLayout, TileGrid};
use crate::movement::step;
use crate::types::{Direction, Pos, TileKind, WorldPos};

/// Tiles per second.
pub const PLAYER_SPEED: f32 = 6.0;

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct PlayerView {
    pub position: WorldPos,
    pub direction: Direction,
    pub moving: bool,
}

impl PlayerView {
    pub fn at_tile(pos: Pos) -> Self {
        Self { position: WorldPos::at_tile(pos), ..Self::default() }
    }

    pub fn tile(&self) -> Pos {
        self.position.tile()
    }

    /// Applies one frame of axis input. Input longer than 1 is scaled down so diagonals are
    /// not faster; shorter analog input walks proportionally slower.
    pub(super) fn walk(
        &mut self,
        tiles: &TileGrid,
        doors: &DoorStates,
        move_x: f32,
        move_y: f32,
        dt: f32,
    ) {
        let length = move_x.hypot(move_y);
        if length <= f32::EPSILON {
            self.moving = false;
            return;
        }
        let travel = PLAYER_SPEED * dt / length.max(1.0);
        self.position = step(tiles, doors, self.position, move_x * travel, move_y * travel);
        self.direction = Direction::from_delta(move_x, move_y);
        self.moving = true;
    }
}

/// First door next to `tile`, checked up, down, left, right.
pub(super) fn adjacent_door(doors: &DoorStates, tile: Pos) -> Option<Pos> {
    tile.orthogonal_neighbors().into_iter().find(|pos| doors.contains(*pos))
}

/// Where an entity standing in a door that just closed gets pushed: the first neighbor that is
/// floor or an open door.
pub(super) fn free_tile_near(layout: &DungeonLayout, doors: &DoorStates, door: Pos) -> Option<Pos> {
    door.orthogonal_neighbors().into_iter().find(|pos| match layout.tile_at(*pos) {
        TileKind::Floor => true,
        TileKind::Door => doors.is_open(*pos),
        TileKind::Empty | TileKind::Wall | TileKind::Corner => false,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::layout_from_rows;

    #[test]
    fn diagonal_input_keeps_player_speed() {
        let tiles = TileGrid::new(20, 20, TileKind::Floor);
        let mut player = PlayerView::at_tile(Pos { y: 5, x: 5 });
        player.walk(&tiles, &DoorStates::default(), 1.0, 1.0, 0.1);
        let travelled = player.position.distance_to(WorldPos::new(5.0, 5.0));
        assert!((travelled - PLAYER_SPEED * 0.1).abs() < 1e-4);
        assert!(player.moving);
        assert_eq!(player.direction, Direction::Right);

        player.walk(&tiles, &DoorStates::default(), 0.0, 0.0, 0.1);
        assert!(!player.moving);
    }

    #[test]
    fn partial_stick_walks_slower() {
        let tiles = TileGrid::new(20, 20, TileKind::Floor);
        let mut player = PlayerView::at_tile(Pos { y: 5, x: 5 });
        player.walk(&tiles, &DoorStates::default(), 0.0, -0.5, 0.1);
        assert!((player.position.y - (5.0 - PLAYER_SPEED * 0.05)).abs() < 1e-4);
        assert!((player.position.x - 5.0).abs() < 1e-6);
        assert_eq!(player.direction, Direction::Up);
    }

    #[test]
    fn push_off_prefers_up_down_left_right() {
        let layout = layout_from_rows(&["#####", "#.+.#", "#####"]);
        let door = Pos { y: 1, x: 2 };
        let doors = DoorStates::all_closed(&[door]);
        assert_eq!(free_tile_near(&layout, &doors, door), Some(Pos { y: 1, x: 1 }));
        assert_eq!(adjacent_door(&doors, Pos { y: 1, x: 3 }), Some(door));
        assert_eq!(adjacent_door(&doors, Pos { y: 1, x: 2 }), None);
    }
}
