use anyhow::{Context, Result, bail};
use clap::{Args, Parser, Subcommand};
use dungeon_core::{
    DungeonConfig, GeneratedDungeon, LevelDescriptor, SkillProfile, generate_dungeon,
};
use std::fs;
use std::path::{Path, PathBuf};

use tools::level_file::LevelFile;
use tools::render::{ascii_map, fingerprint, summary};
use tools::seed::{SeedChoice, resolve_level_seeds};

/// Generate, save and reload seeded dungeon levels
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Generate a level and print it
    Generate(GenerateArgs),
    /// Generate a level and save its descriptor as JSON
    Save {
        #[command(flatten)]
        level: GenerateArgs,
        /// Where to write the level file
        #[arg(short, long)]
        out: PathBuf,
    },
    /// Rebuild a level from a saved descriptor
    Load {
        /// Level file written by `save`
        path: PathBuf,
        #[command(flatten)]
        options: LoadOptions,
    },
}

#[derive(Args)]
struct GenerateArgs {
    #[arg(long)]
    structure: Option<u32>,
    #[arg(long)]
    decoration: Option<u32>,
    #[arg(long)]
    spawn: Option<u32>,
    #[arg(long)]
    width: Option<usize>,
    #[arg(long)]
    height: Option<usize>,
    #[command(flatten)]
    options: LoadOptions,
}

#[derive(Args)]
struct LoadOptions {
    /// TOML file with generation settings
    #[arg(short, long)]
    config: Option<PathBuf>,
    /// Comma separated subjects enemies may quiz on
    #[arg(long, value_delimiter = ',', default_value = "general")]
    subjects: Vec<String>,
    /// Print only the summary
    #[arg(long)]
    no_map: bool,
}

fn load_config(path: Option<&Path>) -> Result<DungeonConfig> {
    let Some(path) = path else {
        return Ok(DungeonConfig::default());
    };
    let text = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;
    let config: DungeonConfig = toml::from_str(&text)
        .with_context(|| format!("Failed to parse config file: {}", path.display()))?;
    Ok(config)
}

fn build(level: &LevelDescriptor, options: &LoadOptions) -> Result<GeneratedDungeon> {
    let config = level.config(&load_config(options.config.as_deref())?);
    if let Err(err) = config.validate() {
        eprintln!("warning: {err}; generating anyway");
    }
    let profile = SkillProfile::new(options.subjects.iter().cloned());
    Ok(generate_dungeon(&config, level.seeds, &profile))
}

fn describe_seed(name: &str, choice: SeedChoice) {
    match choice {
        SeedChoice::Cli(seed) => println!("{name} seed: {seed}"),
        SeedChoice::Generated(seed) => println!("{name} seed: {seed} (generated)"),
    }
}

fn print_level(dungeon: &GeneratedDungeon, options: &LoadOptions) {
    if !options.no_map {
        print!("{}", ascii_map(dungeon));
    }
    print!("{}", summary(dungeon));
}

fn resolve_descriptor(args: &GenerateArgs) -> Result<LevelDescriptor> {
    let base = load_config(args.options.config.as_deref())?;
    let (seeds, choices) = resolve_level_seeds(args.structure, args.decoration, args.spawn);
    for (name, choice) in ["structure", "decoration", "spawn"].into_iter().zip(choices) {
        describe_seed(name, choice);
    }
    let config = DungeonConfig {
        width: args.width.unwrap_or(base.width),
        height: args.height.unwrap_or(base.height),
        ..base
    };
    Ok(LevelDescriptor::new(seeds, &config))
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Command::Generate(args) => {
            let level = resolve_descriptor(&args)?;
            let dungeon = build(&level, &args.options)?;
            print_level(&dungeon, &args.options);
        }
        Command::Save { level: args, out } => {
            let level = resolve_descriptor(&args)?;
            let dungeon = build(&level, &args.options)?;
            LevelFile::new(level, fingerprint(&dungeon))
                .write_atomic(&out)
                .with_context(|| format!("Failed to write level file: {}", out.display()))?;
            print_level(&dungeon, &args.options);
            println!("saved to {}", out.display());
        }
        Command::Load { path, options } => {
            let file = LevelFile::load(&path)
                .with_context(|| format!("Failed to load level file: {}", path.display()))?;
            let dungeon = build(&file.level, &options)?;
            print_level(&dungeon, &options);
            if let Some(expected) = file.fingerprint
                && expected != fingerprint(&dungeon)
            {
                bail!(
                    "level fingerprint mismatch: file has {expected:016x}, rebuilt {:016x}",
                    fingerprint(&dungeon)
                );
            }
        }
    }

    Ok(())
}
