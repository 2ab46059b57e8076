use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use log::info;
use roomgen::collaborators::{
    CatalogItemGenerator, Collaborators, FloorLabel, Party, PlayerResources, ShopStall, TurnQueue,
};
use roomgen::{
    Blueprint, GeneratedRoom, GeneratorConfig, HolderKind, MapGenerator, OwnershipHolders,
};
use serde::Serialize;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Generator config JSON; the built-in catalog is used when omitted
    #[arg(short, long)]
    config: Option<PathBuf>,
    /// Blueprint PNGs, shop room first; the demo set is used when omitted
    #[arg(short, long)]
    blueprint: Vec<PathBuf>,
    #[arg(short, long, default_value_t = 42)]
    seed: u64,
    /// Rooms to generate after the opening shop
    #[arg(short, long, default_value_t = 6)]
    rooms: u32,
    #[arg(short, long, default_value_t = 3)]
    party: usize,
    /// Print one JSON object per room instead of text
    #[arg(long)]
    json: bool,
    /// Write the effective config to this path and exit
    #[arg(long)]
    write_config: Option<PathBuf>,
}

#[derive(Serialize)]
struct RoomSummary<'a> {
    label: &'a str,
    floor: u32,
    room: i32,
    map_index: usize,
    flip_x: bool,
    flip_y: bool,
    borders: usize,
    terrain: usize,
    enemies: usize,
    objects: usize,
    enemy_value: u32,
    unplaced_characters: usize,
    fingerprint: u64,
    holders_hash: u64,
}

impl<'a> RoomSummary<'a> {
    fn new(room: &'a GeneratedRoom, holders: &OwnershipHolders) -> Self {
        Self {
            label: &room.label,
            floor: room.floor_index,
            room: room.room_index,
            map_index: room.map_index,
            flip_x: room.mirror.flip_x,
            flip_y: room.mirror.flip_y,
            borders: holders.child_count(HolderKind::Borders),
            terrain: holders.child_count(HolderKind::Terrain),
            enemies: holders.child_count(HolderKind::Enemies),
            objects: holders.child_count(HolderKind::Objects),
            enemy_value: room.enemy_value_spent,
            unplaced_characters: room.unplaced_characters,
            fingerprint: room.fingerprint(),
            holders_hash: holders.snapshot_hash(),
        }
    }
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let config = match &args.config {
        Some(path) => GeneratorConfig::load(path)
            .with_context(|| format!("Failed to load config: {}", path.display()))?,
        None => GeneratorConfig::default(),
    };

    if let Some(path) = &args.write_config {
        config
            .write_atomic(path)
            .with_context(|| format!("Failed to write config: {}", path.display()))?;
        println!("Config written to {}", path.display());
        return Ok(());
    }

    let blueprints = if args.blueprint.is_empty() {
        Blueprint::demo_set()
    } else {
        args.blueprint
            .iter()
            .map(|path| {
                Blueprint::load_png(path)
                    .with_context(|| format!("Failed to load blueprint: {}", path.display()))
            })
            .collect::<Result<Vec<_>>>()?
    };
    info!("loaded {} blueprints", blueprints.len());

    let mut generator = MapGenerator::new(args.seed, config, blueprints)
        .context("Generator setup rejected the config")?;

    let mut turn_queue = TurnQueue::default();
    let mut shop = ShopStall::default();
    let mut items = CatalogItemGenerator::default();
    let resources = PlayerResources {
        action_points: 6,
        action_points_start: 6,
        mana_points: 0,
        mana_points_cap: 10,
    };
    let mut party = Party::new(args.party, resources);
    let mut label = FloorLabel::default();
    let mut collaborators = Collaborators {
        turn_order: &mut turn_queue,
        shop: &mut shop,
        items: &mut items,
        roster: &mut party,
        display: &mut label,
    };

    let room = generator.start(&mut collaborators);
    report(&room, generator.holders(), args.json)?;
    for _ in 0..args.rooms {
        generator.request_regeneration();
        if let Some(room) = generator.update(&mut collaborators) {
            report(&room, generator.holders(), args.json)?;
        }
    }

    Ok(())
}

fn report(room: &GeneratedRoom, holders: &OwnershipHolders, json: bool) -> Result<()> {
    let summary = RoomSummary::new(room, holders);
    if json {
        println!("{}", serde_json::to_string(&summary).context("Failed to encode room summary")?);
        return Ok(());
    }

    let label = if summary.label.is_empty() { "(opening shop)" } else { summary.label };
    println!(
        "{label:<14} map {} flip ({}, {}) | borders {} terrain {} enemies {} objects {} | enemy value {} | hash {:016x}/{:016x}",
        summary.map_index,
        summary.flip_x,
        summary.flip_y,
        summary.borders,
        summary.terrain,
        summary.enemies,
        summary.objects,
        summary.enemy_value,
        summary.fingerprint,
        summary.holders_hash
    );
    if summary.unplaced_characters > 0 {
        println!("  {} characters had no player spawn point", summary.unplaced_characters);
    }
    Ok(())
}
