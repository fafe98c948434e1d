//! Plain-text views of a generated level for terminals and snapshot files.

use std::collections::BTreeMap;
use std::fmt::Write;

use dungeon_core::{GeneratedDungeon, Pos, RoomKind, TileKind};
use xxhash_rust::xxh3::xxh3_64;

pub fn fingerprint(dungeon: &GeneratedDungeon) -> u64 {
    xxh3_64(&dungeon.canonical_bytes())
}

fn tile_glyph(tile: TileKind) -> char {
    match tile {
        TileKind::Empty => ' ',
        TileKind::Floor => '.',
        TileKind::Wall => '#',
        TileKind::Door => '+',
        TileKind::Corner => 'c',
    }
}

/// Enemy levels 1 to 9 print as digits and 10 as `X`.
fn enemy_glyph(level: u8) -> char {
    char::from_digit(u32::from(level), 10).unwrap_or('X')
}

/// One line per row. `@` marks the player spawn and `$` treasure.
pub fn ascii_map(dungeon: &GeneratedDungeon) -> String {
    let layout = &dungeon.layout;
    let mut overlay = BTreeMap::new();
    for pos in &dungeon.spawns.treasures {
        overlay.insert(*pos, '$');
    }
    for enemy in &dungeon.spawns.enemies {
        overlay.insert(enemy.pos, enemy_glyph(enemy.level));
    }
    if let Some(pos) = dungeon.spawns.player_spawn {
        overlay.insert(pos, '@');
    }

    let mut out = String::with_capacity((layout.width() + 1) * layout.height());
    for y in 0..layout.height() {
        for x in 0..layout.width() {
            let pos = Pos { y: y as i32, x: x as i32 };
            let glyph = overlay.get(&pos).copied();
            out.push(glyph.unwrap_or_else(|| tile_glyph(layout.tile_at(pos))));
        }
        out.push('\n');
    }
    out
}

pub fn summary(dungeon: &GeneratedDungeon) -> String {
    let layout = &dungeon.layout;
    let count_kind = |kind: RoomKind| layout.rooms.iter().filter(|room| room.kind == kind).count();
    let mut out = String::new();
    let _ = writeln!(out, "size: {}x{}", layout.width(), layout.height());
    let _ = writeln!(
        out,
        "rooms: {} ({} treasure, {} combat)",
        layout.rooms.len(),
        count_kind(RoomKind::Treasure),
        count_kind(RoomKind::Combat)
    );
    let _ = writeln!(out, "doors: {}", layout.doors.len());
    let _ = writeln!(out, "enemies: {}", dungeon.spawns.enemies.len());
    let _ = writeln!(out, "treasures: {}", dungeon.spawns.treasures.len());
    let _ = writeln!(out, "render seed: {}", dungeon.decoration.render_seed);
    let _ = writeln!(out, "fingerprint: {:016x}", fingerprint(dungeon));
    out
}
