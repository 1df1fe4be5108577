use anyhow::{Context, Result, ensure};
use clap::Parser;
use log::info;
use std::path::PathBuf;

use dungeon_core::mapgen::progression::{BASE_MAP_HEIGHT, BASE_MAP_WIDTH, BASE_SPLIT_ITERATION};
use dungeon_core::{GeneratedMap, generate_level_with_config, generate_with_config};

mod config_file;
mod map_file;

use config_file::load_config;
use map_file::MapFile;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Map width in tiles
    #[arg(long)]
    width: Option<usize>,
    /// Map height in tiles
    #[arg(long)]
    height: Option<usize>,
    /// Number of tree-wide splitting passes
    #[arg(short, long)]
    splits: Option<u32>,
    /// Generate the populated map for this level instead of explicit dimensions
    #[arg(short, long, conflicts_with_all = ["width", "height", "splits"])]
    level: Option<u32>,
    /// Seed to generate from; a runtime seed is drawn when omitted
    #[arg(long)]
    seed: Option<u64>,
    /// TOML file with generator tuning
    #[arg(short, long)]
    config: Option<PathBuf>,
    /// Write the map as JSON to this path
    #[arg(long)]
    json: Option<PathBuf>,
    /// Skip printing the ASCII map
    #[arg(short, long)]
    quiet: bool,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();
    let config = load_config(args.config.as_deref())?;

    let (map, file) = match args.level {
        Some(level) => {
            let level_map = generate_level_with_config(&config, level, args.seed)
                .with_context(|| format!("Failed to generate level {level}"))?;
            let file = MapFile::from_level(&level_map);
            (level_map.map, file)
        }
        None => {
            let width = args.width.unwrap_or(BASE_MAP_WIDTH);
            let height = args.height.unwrap_or(BASE_MAP_HEIGHT);
            let splits = args.splits.unwrap_or(BASE_SPLIT_ITERATION);
            let map = generate_with_config(&config, width, height, splits, args.seed)
                .with_context(|| format!("Failed to generate a {width}x{height} map"))?;
            let file = MapFile::from_map(&map);
            (map, file)
        }
    };

    if !args.quiet {
        print!("{}", map.grid.render_ascii());
    }
    print_summary(&map);

    if let Some(path) = &args.json {
        file.write_atomic(path)
            .with_context(|| format!("Failed to write map file: {}", path.display()))?;
        let written = MapFile::load(path)
            .with_context(|| format!("Failed to read back map file: {}", path.display()))?;
        ensure!(written == file, "map file {} does not read back intact", path.display());
        info!("wrote {}", path.display());
    }

    Ok(())
}

fn print_summary(map: &GeneratedMap) {
    let shape = map.shape();
    println!("Size: {}x{}", shape.width, shape.height);
    println!("Seed: {}", map.seed);
    println!("Split passes: {}", map.split_count);
    println!("Leaves: {}", map.tree.leaves().len());
    println!("Rooms: {}", map.rooms.len());
    println!("Hallways: {}", map.hallways.len());
    println!("Fingerprint: {:016x}", map.fingerprint());
}
