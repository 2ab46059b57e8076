use std::collections::BTreeSet;

use anyhow::{Context, Result, ensure};
use clap::Parser;
use rand_chacha::{
    ChaCha8Rng,
    rand_core::{Rng, SeedableRng},
};
use roomgen::collaborators::{
    CatalogItemGenerator, Collaborators, FloorLabel, Party, PlayerResources, ShopStall, TurnQueue,
};
use roomgen::{Blueprint, GeneratedRoom, GeneratorConfig, HolderKind, MapGenerator, RoomKind};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    #[arg(short, long, default_value_t = 42)]
    seed: u64,
    /// Independent runs, each with its own seed and settings
    #[arg(short, long, default_value_t = 200)]
    runs: u32,
    #[arg(long, default_value_t = 20)]
    rooms: u32,
}

fn choose<T: Clone>(rng: &mut ChaCha8Rng, slice: &[T]) -> T {
    let p = rng.next_u64() as usize % slice.len();
    slice[p].clone()
}

fn main() -> Result<()> {
    let args = Args::parse();

    println!(
        "Starting fuzz harness on seed {} for {} runs of {} rooms...",
        args.seed, args.runs, args.rooms
    );
    let mut rng = ChaCha8Rng::seed_from_u64(args.seed);

    for run in 0..args.runs {
        let run_seed = rng.next_u64();
        let mut config = GeneratorConfig::default();
        config.settings.ground_tiles = choose(&mut rng, &[true, false]);
        config.settings.terrain_number = choose(&mut rng, &[0, 1, 2]);
        config.settings.map_difficulty = choose(&mut rng, &[0, 2, 5, 40]);
        config.settings.enemy_difficulty = choose(&mut rng, &[0, 3, 8, 30]);
        let party_size = choose(&mut rng, &[1, 3, 5]);

        fuzz_run(run_seed, config, party_size, args.rooms)
            .with_context(|| format!("run {run} (seed {run_seed})"))?;
    }

    println!("Fuzzing completed successfully.");
    Ok(())
}

fn fuzz_run(run_seed: u64, config: GeneratorConfig, party_size: usize, rooms: u32) -> Result<()> {
    let mut generator = MapGenerator::new(run_seed, config, Blueprint::demo_set())
        .context("generator rejected its setup")?;

    let mut turn_queue = TurnQueue::default();
    let mut shop = ShopStall::default();
    let mut items = CatalogItemGenerator::default();
    let resources = PlayerResources {
        action_points: 0,
        action_points_start: 5,
        mana_points: 0,
        mana_points_cap: 7,
    };
    let mut party = Party::new(party_size, resources);
    let mut label = FloorLabel::default();
    let mut collaborators = Collaborators {
        turn_order: &mut turn_queue,
        shop: &mut shop,
        items: &mut items,
        roster: &mut party,
        display: &mut label,
    };

    let room = generator.start(&mut collaborators);
    check_room(&room, &generator, party_size).context("opening room")?;

    for step in 0..rooms {
        generator.request_regeneration();
        let room = generator
            .update(&mut collaborators)
            .with_context(|| format!("step {step} did not regenerate"))?;
        check_room(&room, &generator, party_size).with_context(|| format!("step {step}"))?;
    }
    Ok(())
}

fn check_room(room: &GeneratedRoom, generator: &MapGenerator, party_size: usize) -> Result<()> {
    let config = generator.config();
    let catalog = &config.catalog;
    let progression = generator.progression();
    let holders = generator.holders();

    // Every decoded cell holds at most one non-ground placement.
    let mut occupied = BTreeSet::new();
    for placement in &room.placements {
        if placement.archetype.starts_with("ground_") {
            continue;
        }
        ensure!(
            occupied.insert(placement.pos),
            "two placements share {:?} ({})",
            placement.pos,
            placement.archetype
        );
    }

    let max_value = catalog
        .enemy_tiers
        .iter()
        .flat_map(|tier| tier.enemies.iter().map(|enemy| enemy.value))
        .max()
        .unwrap_or(0);
    ensure!(
        room.enemy_value_spent < progression.enemy_difficulty + max_value,
        "enemy value {} overshot budget {}",
        room.enemy_value_spent,
        progression.enemy_difficulty
    );

    let hazard = &catalog.dangerous_terrains[config.settings.terrain_number];
    let hazards = room.count_of(hazard);
    ensure!(hazards as u32 <= progression.map_difficulty, "{hazards} hazards exceed map difficulty");

    let holder_total: usize = HolderKind::ALL.iter().map(|&kind| holders.child_count(kind)).sum();
    ensure!(
        holder_total == room.placements.len() + room.items.len(),
        "holders own {holder_total} entities but the room reports {}",
        room.placements.len() + room.items.len()
    );

    if room.room_kind == RoomKind::Shop {
        ensure!(room.map_index == 0, "shop room built from blueprint {}", room.map_index);
        ensure!(room.room_index == 0, "shop room at index {}", room.room_index);
    }
    ensure!(room.unplaced_characters <= party_size, "more unplaced characters than the party");
    Ok(())
}
