//! Fog of war and lighting derived from room state.
//! This module exists so renderers can ask per-tile questions without knowing room rules.
//! It does not own enemies or the player; callers pass in what it needs.

use std::collections::BTreeSet;

use crate::enemy::Enemy;
use crate::mapgen::DungeonLayout;
use crate::types::{Pos, RoomCell, RoomId, TileKind};

/// Room tiles follow their room; walls and doors show once any surrounding room is visible.
pub fn is_tile_visible(layout: &DungeonLayout, pos: Pos) -> bool {
    if let Some(room) = layout.room_at(pos) {
        return layout.room(room).is_some_and(|room| room.is_visible());
    }
    pos.surrounding().any(|near| {
        layout.room_at(near).and_then(|id| layout.room(id)).is_some_and(|room| room.is_visible())
    })
}

/// Rooms the player counts as standing in: the tile's room, or every orthogonally adjacent
/// room when the tile has none (doorways).
pub fn player_rooms(layout: &DungeonLayout, player_tile: Pos) -> BTreeSet<RoomId> {
    if !layout.tiles.in_bounds(player_tile) {
        return BTreeSet::new();
    }
    if let Some(room) = layout.room_at(player_tile) {
        return BTreeSet::from([room]);
    }
    orthogonal_rooms(layout, player_tile)
}

fn orthogonal_rooms(layout: &DungeonLayout, pos: Pos) -> BTreeSet<RoomId> {
    pos.orthogonal_neighbors().into_iter().filter_map(|near| layout.room_at(near)).collect()
}

pub fn should_dim(layout: &DungeonLayout, pos: Pos, player_rooms: &BTreeSet<RoomId>) -> bool {
    if let Some(room) = layout.room_at(pos) {
        return !player_rooms.contains(&room);
    }
    !pos.surrounding()
        .any(|near| layout.room_at(near).is_some_and(|room| player_rooms.contains(&room)))
}

pub fn rooms_with_living_enemies<'a>(
    enemies: impl IntoIterator<Item = &'a Enemy>,
) -> BTreeSet<RoomId> {
    enemies.into_iter().filter(|enemy| enemy.alive).map(|enemy| enemy.room).collect()
}

/// A room is cleared when neither it nor any spatial neighbor holds a living enemy.
pub fn is_room_cleared(layout: &DungeonLayout, room: RoomId, occupied: &BTreeSet<RoomId>) -> bool {
    let Some(room) = layout.room(room) else {
        return false;
    };
    !occupied.contains(&room.id)
        && room.spatial_neighbors.iter().all(|near| !occupied.contains(near))
}

pub fn cleared_rooms(layout: &DungeonLayout, occupied: &BTreeSet<RoomId>) -> Vec<bool> {
    layout.rooms.iter().map(|room| is_room_cleared(layout, room.id, occupied)).collect()
}

/// Whether the lit tileset applies. `cleared` is indexed by room id.
pub fn is_lit(layout: &DungeonLayout, pos: Pos, cleared: &[bool]) -> bool {
    let room_cleared = |id: RoomId| cleared.get(id).copied().unwrap_or(false);
    match layout.tile_at(pos) {
        TileKind::Floor => match layout.room_map.cell_at(pos) {
            RoomCell::Room(id) => room_cleared(id),
            _ => orthogonal_rooms(layout, pos).into_iter().any(room_cleared),
        },
        TileKind::Wall | TileKind::Door | TileKind::Corner => {
            orthogonal_rooms(layout, pos).into_iter().any(room_cleared)
        }
        TileKind::Empty => false,
    }
}

/// Marks the room under the player visible. Returns the room when it was hidden before.
pub fn reveal_player_room(layout: &mut DungeonLayout, player_tile: Pos) -> Option<RoomId> {
    let room = layout.room_at(player_tile)?;
    layout.reveal_room(room).then_some(room)
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TileView {
    pub visible: bool,
    pub lit: bool,
    pub dimmed: bool,
}

/// Per-tile render flags for one frame, row-major.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FogFrame {
    pub width: usize,
    pub height: usize,
    pub tiles: Vec<TileView>,
}

impl FogFrame {
    pub fn compute<'a>(
        layout: &DungeonLayout,
        enemies: impl IntoIterator<Item = &'a Enemy>,
        player_tile: Pos,
    ) -> Self {
        let occupied = rooms_with_living_enemies(enemies);
        let cleared = cleared_rooms(layout, &occupied);
        let standing_in = player_rooms(layout, player_tile);
        let tiles = layout
            .tiles
            .positions()
            .map(|pos| TileView {
                visible: is_tile_visible(layout, pos),
                lit: is_lit(layout, pos, &cleared),
                dimmed: should_dim(layout, pos, &standing_in),
            })
            .collect();
        Self { width: layout.width(), height: layout.height(), tiles }
    }

    pub fn at(&self, pos: Pos) -> Option<TileView> {
        if pos.x < 0 || pos.y < 0 || pos.x as usize >= self.width || pos.y as usize >= self.height {
            return None;
        }
        self.tiles.get(pos.y as usize * self.width + pos.x as usize).copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{layout_from_rows, with_spatial_links};
    use crate::types::WorldPos;

    /// Rooms 0 and 1 joined by a door, room 2 behind a plain wall from room 1.
    fn three_rooms() -> DungeonLayout {
        let layout = layout_from_rows(&[
            "###########",
            "#...+...#.#",
            "#...#...#.#",
            "###########",
        ]);
        with_spatial_links(layout, &[(1, 2)])
    }

    fn enemy_in(room: RoomId, alive: bool) -> Enemy {
        let mut enemy = Enemy::new(WorldPos::default(), room, 3, "math");
        enemy.alive = alive;
        enemy
    }

    #[test]
    fn walls_show_when_any_surrounding_room_is_visible() {
        let mut layout = three_rooms();
        assert!(!is_tile_visible(&layout, Pos { y: 1, x: 4 }));
        layout.reveal_room(0);
        assert!(is_tile_visible(&layout, Pos { y: 1, x: 2 }));
        assert!(is_tile_visible(&layout, Pos { y: 1, x: 4 }));
        assert!(is_tile_visible(&layout, Pos { y: 0, x: 0 }));
        assert!(!is_tile_visible(&layout, Pos { y: 1, x: 6 }));
        assert!(!is_tile_visible(&layout, Pos { y: 1, x: 8 }));
    }

    #[test]
    fn fog_latch_never_reverts() {
        let mut layout = three_rooms();
        assert_eq!(reveal_player_room(&mut layout, Pos { y: 1, x: 6 }), Some(1));
        assert_eq!(reveal_player_room(&mut layout, Pos { y: 1, x: 6 }), None);
        assert_eq!(reveal_player_room(&mut layout, Pos { y: 1, x: 4 }), None);
        reveal_player_room(&mut layout, Pos { y: 1, x: 2 });
        assert!(layout.rooms[1].is_visible());
        assert!(layout.rooms[0].is_visible());
        assert!(!layout.rooms[2].is_visible());
    }

    #[test]
    fn doorway_counts_as_both_rooms() {
        let layout = three_rooms();
        assert_eq!(player_rooms(&layout, Pos { y: 1, x: 4 }), BTreeSet::from([0, 1]));
        assert_eq!(player_rooms(&layout, Pos { y: 2, x: 2 }), BTreeSet::from([0]));
        assert!(player_rooms(&layout, Pos { y: -3, x: 2 }).is_empty());
    }

    #[test]
    fn dimming_follows_player_rooms() {
        let layout = three_rooms();
        let standing_in = player_rooms(&layout, Pos { y: 1, x: 1 });
        assert!(!should_dim(&layout, Pos { y: 2, x: 3 }, &standing_in));
        assert!(should_dim(&layout, Pos { y: 2, x: 6 }, &standing_in));
        assert!(!should_dim(&layout, Pos { y: 1, x: 4 }, &standing_in));
        assert!(should_dim(&layout, Pos { y: 1, x: 8 }, &standing_in));
    }

    #[test]
    fn living_enemy_darkens_its_room_and_spatial_neighbors() {
        let layout = three_rooms();
        let enemies = [enemy_in(2, true), enemy_in(0, false)];
        let occupied = rooms_with_living_enemies(&enemies);
        assert!(is_room_cleared(&layout, 0, &occupied));
        assert!(!is_room_cleared(&layout, 1, &occupied));
        assert!(!is_room_cleared(&layout, 2, &occupied));
        assert!(!is_room_cleared(&layout, 99, &occupied));
    }

    #[test]
    fn lit_tiles_follow_cleared_rooms() {
        let layout = three_rooms();
        let occupied = rooms_with_living_enemies(&[enemy_in(2, true)]);
        let cleared = cleared_rooms(&layout, &occupied);
        assert!(is_lit(&layout, Pos { y: 1, x: 2 }, &cleared));
        assert!(!is_lit(&layout, Pos { y: 1, x: 6 }, &cleared));
        // The door touches cleared room 0 and dark room 1.
        assert!(is_lit(&layout, Pos { y: 1, x: 4 }, &cleared));
        assert!(!is_lit(&layout, Pos { y: 1, x: 8 }, &cleared));
    }

    #[test]
    fn frame_snapshot_matches_per_tile_queries() {
        let mut layout = three_rooms();
        layout.reveal_room(1);
        let enemies = [enemy_in(0, true)];
        let frame = FogFrame::compute(&layout, &enemies, Pos { y: 2, x: 6 });
        assert_eq!(frame.tiles.len(), layout.width() * layout.height());
        let door = frame.at(Pos { y: 1, x: 4 }).expect("door inside frame");
        assert!(door.visible);
        assert!(!door.lit);
        assert!(!door.dimmed);
        let far = frame.at(Pos { y: 1, x: 9 }).expect("tile inside frame");
        assert!(!far.visible);
        assert!(far.dimmed);
        assert!(frame.at(Pos { y: 9, x: 0 }).is_none());
    }
}
