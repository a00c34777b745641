//! burrow-headless: run the movement simulation without a front end.
//!
//! Usage:
//!   burrow-headless synthetic --width 128 --height 48 --seed 7 --output cave.map
//!   burrow-headless run --map cave.map --ticks 600 --spawn 40,320 --every

use std::path::{Path, PathBuf};
use std::process;

use glam::IVec2;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use burrow_core::config::WorldConfig;
use burrow_core::types::TileKind;
use burrow_sim::{BodySpec, SimConfig, SimulationEngine};
use burrow_terrain::{load_map, spawn_point, synthetic_map, write_map, TileGrid};

fn main() {
    init_tracing();
    let args: Vec<String> = std::env::args().collect();

    if args.len() < 2 {
        print_usage();
        process::exit(1);
    }

    match args[1].as_str() {
        "synthetic" => cmd_synthetic(&args[2..]),
        "run" => cmd_run(&args[2..]),
        "help" | "--help" | "-h" => print_usage(),
        other => {
            eprintln!("Unknown command: {other}");
            print_usage();
            process::exit(1);
        }
    }
}

/// Logs go to stderr so stdout stays clean JSON.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .compact()
        .init();
}

fn print_usage() {
    eprintln!(
        "burrow-headless: headless burrow movement simulation\n\
         \n\
         Commands:\n\
         \n\
         synthetic Generate a seeded map file\n\
         \n\
           --width <N>        Width in tiles (default: 128)\n\
           --height <N>       Height in tiles (default: 48)\n\
           --seed <N>         RNG seed (default: 0)\n\
           --output <path>    Output map path (default: synthetic.map)\n\
         \n\
         run       Simulate a player dropped onto a map\n\
         \n\
           --map <path>       Map file to load\n\
           --config <path>    World config JSON (optional)\n\
           --ticks <N>        Ticks to simulate (default: 300)\n\
           --spawn <x,y>      Player position in pixels (default: above column 0)\n\
           --every            Print a snapshot for every tick, not only the last\n\
         \n\
         Snapshots are printed to stdout as one JSON object per line.\n\
         Set RUST_LOG=debug for contact and landing logs.\n"
    );
}

fn flag_value<'a>(args: &'a [String], name: &str) -> Option<&'a str> {
    for i in 0..args.len() {
        if args[i] == name && i + 1 < args.len() {
            return Some(args[i + 1].as_str());
        }
    }
    None
}

fn has_flag(args: &[String], name: &str) -> bool {
    args.iter().any(|a| a == name)
}

fn parse_number<T: std::str::FromStr>(args: &[String], name: &str, default: T) -> T {
    match flag_value(args, name) {
        Some(raw) => match raw.parse() {
            Ok(n) => n,
            Err(_) => {
                eprintln!("Error: {name} expects a number, got {raw:?}");
                process::exit(1);
            }
        },
        None => default,
    }
}

fn parse_spawn(args: &[String]) -> Option<IVec2> {
    let raw = flag_value(args, "--spawn")?;
    let (x, y) = raw.split_once(',')?;
    Some(IVec2::new(x.trim().parse().ok()?, y.trim().parse().ok()?))
}

// --- Synthetic map command ---

fn cmd_synthetic(args: &[String]) {
    let width: i32 = parse_number(args, "--width", 128);
    let height: i32 = parse_number(args, "--height", 48);
    let seed: u64 = parse_number(args, "--seed", 0);
    let output = flag_value(args, "--output")
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("synthetic.map"));

    if width <= 0 || height <= 0 {
        eprintln!("Error: map must be at least 1x1 tiles");
        process::exit(1);
    }

    let config = WorldConfig::default();
    let grid = synthetic_map(width, height, config.tile_width, config.tile_height, seed);
    info!(
        width,
        height,
        seed,
        solid = grid.count(TileKind::Solid),
        platforms = grid.count(TileKind::Platform),
        "generated map"
    );

    if let Err(e) = write_map(&output, &grid) {
        eprintln!("Error writing map: {e}");
        process::exit(1);
    }
    info!(path = %output.display(), "map written");
}

// --- Run command ---

fn cmd_run(args: &[String]) {
    let map_path = match flag_value(args, "--map") {
        Some(p) => PathBuf::from(p),
        None => {
            eprintln!("Error: --map <path> is required");
            process::exit(1);
        }
    };

    let config = match flag_value(args, "--config") {
        Some(path) => match WorldConfig::load(Path::new(path)) {
            Ok(c) => c,
            Err(e) => {
                eprintln!("Error loading config: {e}");
                process::exit(1);
            }
        },
        None => WorldConfig::default(),
    };

    let ticks: u64 = parse_number(args, "--ticks", 300);
    let every = has_flag(args, "--every");

    let terrain: TileGrid = match load_map(&map_path, config.tile_width, config.tile_height) {
        Ok(grid) => grid,
        Err(e) => {
            eprintln!("Error loading map: {e}");
            process::exit(1);
        }
    };

    let start = match flag_value(args, "--spawn") {
        Some(raw) => parse_spawn(args).unwrap_or_else(|| {
            eprintln!("Error: --spawn expects x,y in pixels, got {raw:?}");
            process::exit(1);
        }),
        None => spawn_point(&terrain),
    };

    let mut engine = match SimulationEngine::new(SimConfig { world: config }, terrain) {
        Ok(engine) => engine,
        Err(e) => {
            eprintln!("Error: {e}");
            process::exit(1);
        }
    };

    let player = match engine.spawn_body(BodySpec::player(start)) {
        Ok(id) => id,
        Err(e) => {
            eprintln!("Error spawning player: {e}");
            process::exit(1);
        }
    };
    info!(player, x = start.x, y = start.y, ticks, "running");

    let mut last = engine.snapshot();
    for tick in 0..ticks {
        last = engine.tick();
        if every || tick + 1 == ticks {
            print_snapshot(&last);
        }
    }

    match last.bodies.iter().find(|b| b.id == player) {
        Some(body) => info!(
            x = body.x,
            y = body.y,
            on_ground = body.on_ground,
            health = ?body.health,
            "finished"
        ),
        None => warn!(player, "player missing at end of run"),
    }
}

fn print_snapshot(snapshot: &burrow_core::state::WorldSnapshot) {
    match serde_json::to_string(snapshot) {
        Ok(line) => println!("{line}"),
        Err(e) => {
            eprintln!("Error serializing snapshot: {e}");
            process::exit(1);
        }
    }
}
