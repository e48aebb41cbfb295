//! keystone: generate a lock-and-key dungeon from the command line
//!
//! Prints the generated dungeon as a room list with a small map, or as JSON.

use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use strum::{Display, EnumString};
use thiserror::Error;

use ks_core::dungeon::{Coord, Dungeon, Room, Symbol};
use ks_core::{ConfigError, DungeonGenerator, GenerationError, GeneratorConfig, GridConstraints};

/// Output formats
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString)]
#[strum(serialize_all = "lowercase")]
enum OutputFormat {
    Text,
    Json,
}

/// Lock-and-key dungeon generator
#[derive(Parser, Debug)]
#[command(name = "keystone")]
#[command(author, version, about = "Generate a lock-and-key dungeon", long_about = None)]
struct Args {
    /// Random seed (overrides the config file)
    #[arg(short = 's', long = "seed")]
    seed: Option<u64>,

    /// Grid width in room slots
    #[arg(long = "width", default_value_t = 8)]
    width: u32,

    /// Grid height in room slots
    #[arg(long = "height", default_value_t = 8)]
    height: u32,

    /// Number of rooms to generate
    #[arg(short = 'r', long = "rooms", default_value_t = 25)]
    rooms: usize,

    /// Number of keys
    #[arg(short = 'k', long = "keys", default_value_t = 3)]
    keys: usize,

    /// Number of switches (0 or 1)
    #[arg(long = "switches", default_value_t = 0)]
    switches: usize,

    /// Do not put a goal room behind the boss
    #[arg(long = "no-goal")]
    no_goal: bool,

    /// Do not reserve the last key for the boss door
    #[arg(long = "unlocked-boss")]
    unlocked_boss: bool,

    /// Full restarts allowed before giving up (overrides the config file)
    #[arg(long = "retries")]
    retries: Option<u32>,

    /// Probability of adding a shortcut between neighbouring rooms
    #[arg(long = "graphify")]
    graphify: Option<f64>,

    /// Generator configuration as JSON
    #[arg(short = 'c', long = "config")]
    config: Option<PathBuf>,

    /// Output format (text, json)
    #[arg(short = 'f', long = "format", default_value_t = OutputFormat::Text)]
    format: OutputFormat,

    /// Verbose logging (repeat for more)
    #[arg(short = 'v', long = "verbose", action = clap::ArgAction::Count)]
    verbose: u8,
}

#[derive(Debug, Error)]
enum CliError {
    #[error("cannot read {path}: {source}")]
    ReadConfig {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("invalid config {path}: {source}")]
    ParseConfig {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error(transparent)]
    Layout(#[from] ConfigError),

    #[error(transparent)]
    Generation(#[from] GenerationError),

    #[error("cannot encode dungeon: {0}")]
    Encode(#[from] serde_json::Error),
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    // RUST_LOG wins over -v
    env_logger::Builder::new()
        .parse_filters(level)
        .parse_default_env()
        .init();
}

/// Config file first, then command-line overrides
fn load_config(args: &Args) -> Result<GeneratorConfig, CliError> {
    let mut config = match &args.config {
        Some(path) => {
            let text = fs::read_to_string(path).map_err(|source| CliError::ReadConfig {
                path: path.clone(),
                source,
            })?;
            serde_json::from_str(&text).map_err(|source| CliError::ParseConfig {
                path: path.clone(),
                source,
            })?
        }
        None => GeneratorConfig::default(),
    };

    if let Some(seed) = args.seed {
        config.seed = seed;
    }
    if let Some(retries) = args.retries {
        config.max_retries = retries;
    }
    if args.no_goal {
        config.generate_goal = false;
    }
    if args.unlocked_boss {
        config.boss_room_locked = false;
    }
    Ok(config)
}

fn build_grid(args: &Args) -> Result<GridConstraints, CliError> {
    let mut grid =
        GridConstraints::new(args.width, args.height, args.rooms, args.keys, args.switches)?;
    if let Some(p) = args.graphify {
        grid = grid.with_graphify_probability(p)?;
    }
    Ok(grid)
}

/// Single character shown on the map for a room
fn map_glyph(room: &Room) -> char {
    match room.item() {
        None => '.',
        Some(Symbol::Start) => '@',
        Some(Symbol::Boss) => 'B',
        Some(Symbol::Goal) => 'G',
        Some(Symbol::Switch) => '*',
        Some(Symbol::Key(level)) if level < 26 => (b'a' + level as u8) as char,
        Some(Symbol::Key(_)) => 'k',
        Some(Symbol::SwitchOn | Symbol::SwitchOff) => '?',
    }
}

fn render_map(dungeon: &Dungeon) -> Vec<String> {
    let Some(bounds) = dungeon.bounds() else {
        return Vec::new();
    };
    let mut rows = Vec::new();
    for y in bounds.top..=bounds.bottom {
        let mut row = String::new();
        for x in bounds.left..=bounds.right {
            let here = Coord::new(x, y);
            let glyph = dungeon
                .rooms()
                .find(|r| r.coords.contains(&here))
                .map_or(' ', map_glyph);
            row.push(glyph);
        }
        rows.push(row.trim_end().to_string());
    }
    rows
}

fn describe_room(room: &Room) -> String {
    let (cx, cy) = room.center();
    let center = format!("({:.1}, {:.1})", cx, cy);
    let item = room.item().map_or_else(|| "-".to_string(), |s| s.to_string());
    let edges = room
        .edges()
        .map(|e| match e.lock {
            Some(lock) => format!("{}[{}]", e.target, lock),
            None => e.target.to_string(),
        })
        .collect::<Vec<_>>()
        .join(", ");
    format!(
        "{:>5} {:<10} needs {:<12} item {:<6} intensity {:.2}  -> {}",
        room.id.to_string(),
        center,
        room.precondition().to_string(),
        item,
        room.intensity(),
        edges
    )
}

fn render_text(dungeon: &Dungeon, config: &GeneratorConfig, attempts: u32) -> String {
    let mut out = Vec::new();
    out.push(format!(
        "seed {}: {} rooms after {} attempt(s)",
        config.seed,
        dungeon.room_count(),
        attempts
    ));
    out.push(String::new());
    out.extend(render_map(dungeon));
    out.push(String::new());
    out.extend(dungeon.rooms().map(describe_room));
    out.join("\n")
}

fn run(args: &Args) -> Result<(), CliError> {
    let config = load_config(args)?;
    let grid = build_grid(args)?;
    log::info!(
        "generating {} rooms on a {}x{} grid, seed {}",
        args.rooms,
        args.width,
        args.height,
        config.seed
    );

    let mut generator = DungeonGenerator::new(grid, config);
    generator.generate()?;
    let dungeon = generator.dungeon().cloned().unwrap_or_default();

    match args.format {
        OutputFormat::Text => {
            let text = render_text(&dungeon, generator.config(), generator.attempts());
            println!("{}", text);
        }
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&dungeon)?),
    }
    Ok(())
}

fn main() -> ExitCode {
    let args = Args::parse();
    init_logging(args.verbose);

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("keystone: {}", err);
            ExitCode::FAILURE
        }
    }
}
