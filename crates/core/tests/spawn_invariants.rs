use std::collections::{BTreeSet, VecDeque};

use dungeon_core::{
    DungeonConfig, GeneratedDungeon, LevelSeeds, RoomCell, RoomKind, SkillProfile, TileKind,
    generate_dungeon,
};
use proptest::prelude::*;

fn generate(seeds: LevelSeeds, width: usize, height: usize) -> GeneratedDungeon {
    let config = DungeonConfig { width, height, ..DungeonConfig::default() };
    let profile = SkillProfile::new(["math", "history"]).with_rating("history", 8.0);
    generate_dungeon(&config, seeds, &profile)
}

fn seeds_strategy() -> impl Strategy<Value = LevelSeeds> {
    (any::<u32>(), any::<u32>(), any::<u32>())
        .prop_map(|(structure, decoration, spawn)| LevelSeeds { structure, decoration, spawn })
}

fn reachable_rooms(dungeon: &GeneratedDungeon) -> usize {
    let rooms = &dungeon.layout.rooms;
    if rooms.is_empty() {
        return 0;
    }
    let mut seen = BTreeSet::from([0_usize]);
    let mut open = VecDeque::from([0_usize]);
    while let Some(room) = open.pop_front() {
        for next in &rooms[room].neighbors {
            if seen.insert(*next) {
                open.push_back(*next);
            }
        }
    }
    seen.len()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(128))]
    #[test]
    fn every_room_is_reachable_through_doors(
        seeds in seeds_strategy(),
        width in 8_usize..80,
        height in 8_usize..80,
    ) {
        let dungeon = generate(seeds, width, height);
        prop_assert_eq!(reachable_rooms(&dungeon), dungeon.layout.rooms.len());
        for pos in dungeon.layout.tiles.positions() {
            match dungeon.tile_at(pos) {
                TileKind::Floor => prop_assert!(dungeon.layout.room_at(pos).is_some()),
                TileKind::Door => {
                    prop_assert_eq!(dungeon.layout.room_map.cell_at(pos), RoomCell::Door);
                }
                _ => {}
            }
        }
    }

    #[test]
    fn spawns_respect_room_kinds(
        seeds in seeds_strategy(),
        width in 20_usize..70,
        height in 20_usize..70,
    ) {
        let dungeon = generate(seeds, width, height);
        let layout = &dungeon.layout;
        let start_room = dungeon.spawns.player_spawn.and_then(|pos| layout.room_at(pos));

        let visible: Vec<usize> =
            layout.rooms.iter().filter(|room| room.is_visible()).map(|room| room.id).collect();
        prop_assert_eq!(visible, start_room.into_iter().collect::<Vec<_>>());

        for enemy in &dungeon.spawns.enemies {
            prop_assert!((1..=10).contains(&enemy.level));
            prop_assert_eq!(layout.room_at(enemy.pos), Some(enemy.room));
            prop_assert_ne!(Some(enemy.room), start_room);
        }
        for room in &layout.rooms {
            let levels: Vec<u8> = dungeon
                .spawns
                .enemies
                .iter()
                .filter(|enemy| enemy.room == room.id)
                .map(|enemy| enemy.level)
                .collect();
            if Some(room.id) == start_room {
                continue;
            }
            match room.kind {
                RoomKind::Treasure => prop_assert!(levels.is_empty()),
                RoomKind::Combat => {
                    prop_assert!((1..=3).contains(&levels.len()));
                    prop_assert!(levels.iter().any(|level| *level >= 8));
                    prop_assert!(levels.iter().all(|level| (6..=10).contains(level)));
                }
                RoomKind::Empty => {
                    prop_assert_eq!(levels.len(), 1);
                    prop_assert!(levels[0] <= 6);
                }
            }
        }
        for treasure in &dungeon.spawns.treasures {
            let room = layout.room_at(*treasure).and_then(|id| layout.room(id));
            prop_assert_eq!(room.map(|room| room.kind), Some(RoomKind::Treasure));
        }
    }
}
