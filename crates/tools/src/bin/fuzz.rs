use anyhow::{Result, bail};
use clap::Parser;
use dungeon_core::{
    DungeonConfig, DungeonEvent, DungeonSession, FrameInput, LevelSeeds, SkillProfile, TileKind,
};
use rand_chacha::{
    ChaCha8Rng,
    rand_core::{Rng, SeedableRng},
};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    #[arg(short, long, default_value_t = 42)]
    seed: u64,
    /// Levels to generate and play
    #[arg(short, long, default_value_t = 20)]
    levels: u32,
    /// Frames per level at 60 frames per second
    #[arg(short, long, default_value_t = 3600)]
    frames: u32,
    #[arg(long, default_value_t = 64)]
    width: usize,
    #[arg(long, default_value_t = 48)]
    height: usize,
}

fn choose<T: Clone>(rng: &mut ChaCha8Rng, slice: &[T]) -> T {
    let p = rng.next_u64() as usize % slice.len();
    slice[p].clone()
}

#[derive(Default)]
struct Totals {
    combats: u32,
    defeated: u32,
    doors_toggled: u32,
    rooms_revealed: u32,
    treasures: u32,
}

fn play_level(
    seeds: LevelSeeds,
    args: &Args,
    rng: &mut ChaCha8Rng,
    totals: &mut Totals,
) -> Result<()> {
    let config =
        DungeonConfig { width: args.width, height: args.height, ..DungeonConfig::default() };
    let profile = SkillProfile::new(["math", "history", "chemistry"]).with_rating("math", 7.5);
    let mut session = DungeonSession::generate(&config, seeds, &profile);
    let axes = [-1.0_f32, 0.0, 1.0];
    let mut input = FrameInput { dt: 1.0 / 60.0, ..FrameInput::default() };
    let mut visible_rooms = 0;

    for frame in 0..args.frames {
        // Hold a direction for a while so the walk covers ground.
        if frame % 20 == 0 {
            input.move_x = choose(rng, &axes);
            input.move_y = choose(rng, &axes);
        }
        input.door_key = rng.next_u64() % 30 == 0;
        let outcome = session.advance_frame(&input);

        for event in &outcome.events {
            match event {
                DungeonEvent::DoorToggled { .. } => totals.doors_toggled += 1,
                DungeonEvent::RoomRevealed { .. } => totals.rooms_revealed += 1,
                DungeonEvent::TreasureCollected { .. } => totals.treasures += 1,
                DungeonEvent::CombatStarted { .. } => totals.combats += 1,
                _ => {}
            }
        }

        if let Some(enemy) = session.combat() {
            // Bias toward winning so levels get cleared.
            let damage = choose(rng, &[0, 15, 30, 60]);
            if damage == 0 {
                session.end_combat();
            } else if session.damage_enemy(enemy, damage)? {
                totals.defeated += 1;
            }
        }

        // Assert invariants
        let layout = session.layout();
        let now_visible = layout.rooms.iter().filter(|room| room.is_visible()).count();
        if now_visible < visible_rooms {
            bail!("Invariant failed: fog reverted at frame {frame} for {seeds:?}");
        }
        visible_rooms = now_visible;

        let player_tile = session.player().tile();
        if !matches!(layout.tile_at(player_tile), TileKind::Floor | TileKind::Door) {
            bail!("Invariant failed: player inside wall at frame {frame} for {seeds:?}");
        }
        for (_, enemy) in session.enemies() {
            if enemy.hp > enemy.max_hp || !(1..=10).contains(&enemy.level) {
                bail!("Invariant failed: enemy stats out of range for {seeds:?}");
            }
            if !matches!(layout.tile_at(enemy.tile()), TileKind::Floor | TileKind::Door) {
                bail!("Invariant failed: enemy inside wall at frame {frame} for {seeds:?}");
            }
        }
    }
    Ok(())
}

fn main() -> Result<()> {
    let args = Args::parse();

    println!(
        "Starting Fuzz harness on seed {} for {} levels of {} frames...",
        args.seed, args.levels, args.frames
    );
    let mut rng = ChaCha8Rng::seed_from_u64(args.seed);
    let mut totals = Totals::default();

    for _ in 0..args.levels {
        let seeds = LevelSeeds {
            structure: rng.next_u32(),
            decoration: rng.next_u32(),
            spawn: rng.next_u32(),
        };
        play_level(seeds, &args, &mut rng, &mut totals)?;
    }

    println!("Fuzzing complete. All invariants held.");
    println!(
        "combats: {}, defeated: {}, doors toggled: {}, rooms revealed: {}, treasures: {}",
        totals.combats,
        totals.defeated,
        totals.doors_toggled,
        totals.rooms_revealed,
        totals.treasures
    );
    Ok(())
}
