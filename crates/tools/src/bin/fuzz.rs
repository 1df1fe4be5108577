use anyhow::{Result, bail};
use clap::Parser;
use dungeon_core::{GeneratedMap, Pos, TileKind, generate};
use rand_chacha::{
    ChaCha8Rng,
    rand_core::{Rng, SeedableRng},
};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    #[arg(short, long, default_value_t = 42)]
    seed: u64,
    #[arg(short, long, default_value_t = 1000)]
    runs: u32,
}

fn pick(rng: &mut ChaCha8Rng, min: u64, max: u64) -> u64 {
    min + rng.next_u64() % (max - min + 1)
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    println!("Starting generation fuzz on seed {} for {} maps...", args.seed, args.runs);
    let mut rng = ChaCha8Rng::seed_from_u64(args.seed);

    let mut total_rooms = 0_usize;
    let mut roomless_maps = 0_u32;
    for run in 0..args.runs {
        let width = pick(&mut rng, 6, 150) as usize;
        let height = pick(&mut rng, 6, 100) as usize;
        let splits = pick(&mut rng, 1, 25) as u32;
        let map_seed = rng.next_u64();

        let map = generate(width, height, splits, Some(map_seed))?;
        if let Err(failure) = check_invariants(&map) {
            bail!("run {run} ({width}x{height}, splits={splits}, seed={map_seed}): {failure}");
        }
        total_rooms += map.rooms.len();
        roomless_maps += u32::from(map.rooms.is_empty());
    }

    println!(
        "Fuzzing completed successfully: {} rooms total, {} roomless maps.",
        total_rooms, roomless_maps
    );
    Ok(())
}

fn check_invariants(map: &GeneratedMap) -> Result<(), String> {
    let width = map.grid.width() as i32;
    let height = map.grid.height() as i32;
    for y in 0..height {
        for x in 0..width {
            let on_border = x == 0 || y == 0 || x == width - 1 || y == height - 1;
            if on_border && map.tile_at(Pos { y, x }) == TileKind::Floor {
                return Err(format!("floor on border at ({x}, {y})"));
            }
        }
    }

    for id in map.tree.leaves() {
        let node = map.tree.node(id);
        if let Some(room) = node.room
            && !node.bounds.expanded(-1).contains_rect(&room)
        {
            return Err(format!("room {room:?} escapes leaf {:?}", node.bounds));
        }
    }

    let Some(entry) = map.entry_room() else {
        return Ok(());
    };
    let region = map.grid.walkable_region(entry.center());
    for room in &map.rooms {
        let center = room.center();
        if !region[(center.y * width + center.x) as usize] {
            return Err(format!("room {room:?} is not reachable from the entry room"));
        }
    }
    Ok(())
}
