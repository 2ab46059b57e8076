//! Ordered placement phases that populate a decoded room.

use log::{debug, warn};
use rand_chacha::rand_core::Rng;

use crate::collaborators::Collaborators;
use crate::config::GeneratorSettings;
use crate::content::ContentCatalog;
use crate::holders::OwnershipHolders;
use crate::types::RoomKind;

use super::super::model::{ItemRequest, Placement};
use super::super::pool::SpawnPool;
use super::super::progression::ProgressionState;
use super::super::spawns::{ObjectPlan, allocate_enemies, plan_objects, plan_players};
use super::terrain::{plan_borders, plan_dangerous_terrain, plan_ground, plan_ordinary_terrain};

pub(super) struct PipelineContext<'a> {
    pub(super) catalog: &'a ContentCatalog,
    pub(super) settings: &'a GeneratorSettings,
    pub(super) progression: &'a mut ProgressionState,
    pub(super) holders: &'a mut OwnershipHolders,
}

#[derive(Debug, Default)]
pub(super) struct PipelineOutcome {
    pub(super) placements: Vec<Placement>,
    pub(super) items: Vec<ItemRequest>,
    pub(super) enemy_value_spent: u32,
    pub(super) unplaced_characters: usize,
}

impl PipelineOutcome {
    fn materialize_all(&mut self, holders: &mut OwnershipHolders, placements: Vec<Placement>) {
        for placement in placements {
            holders.materialize(&placement);
            self.placements.push(placement);
        }
    }
}

pub(super) fn run_pipeline<R: Rng + ?Sized>(
    context: &mut PipelineContext<'_>,
    pool: &mut SpawnPool,
    collaborators: &mut Collaborators<'_>,
    rng: &mut R,
) -> (RoomKind, PipelineOutcome) {
    let mut outcome = PipelineOutcome::default();
    let terrain_number = context.settings.terrain_number;

    let borders = plan_borders(pool, context.catalog, rng);
    debug!("border phase: {} placements", borders.len());
    outcome.materialize_all(context.holders, borders);

    let hazards = plan_dangerous_terrain(
        pool,
        context.catalog,
        terrain_number,
        context.progression.map_difficulty,
        rng,
    );
    debug!(
        "dangerous terrain phase: {} of {} requested",
        hazards.len(),
        context.progression.map_difficulty
    );
    outcome.materialize_all(context.holders, hazards);

    let ordinary = plan_ordinary_terrain(pool, context.catalog, terrain_number);
    debug!("ordinary terrain phase: {} placements", ordinary.len());
    outcome.materialize_all(context.holders, ordinary);

    place_enemies(context, pool, collaborators, rng, &mut outcome);

    let room_kind = context.progression.room_kind();
    let plan = plan_objects(pool, context.catalog, room_kind, context.progression.floor_index, rng);
    place_objects(context, collaborators, plan, &mut outcome);
    if room_kind == RoomKind::FirstRoom {
        context.progression.first_spawn = false;
    }

    let ground = plan_ground(pool, context.catalog, context.settings.ground_tiles, rng);
    debug!("ground phase: {} tiles", ground.len());
    outcome.materialize_all(context.holders, ground);

    let character_count = collaborators.roster.character_count();
    let moves = plan_players(pool, character_count, rng);
    for &(index, pos) in &moves {
        collaborators.roster.move_character(index, pos);
    }
    outcome.unplaced_characters = character_count - moves.len();
    if outcome.unplaced_characters > 0 {
        warn!(
            "player pool exhausted: {} of {} characters kept their previous position",
            outcome.unplaced_characters, character_count
        );
    }

    collaborators.roster.resources_mut().restore_after_room();
    collaborators.roster.refresh_display();

    (room_kind, outcome)
}

fn place_enemies<R: Rng + ?Sized>(
    context: &mut PipelineContext<'_>,
    pool: &mut SpawnPool,
    collaborators: &mut Collaborators<'_>,
    rng: &mut R,
    outcome: &mut PipelineOutcome,
) {
    collaborators.turn_order.reset_enemies();
    let tiers = &context.catalog.enemy_tiers;
    let tier = context.progression.enemy_tier(tiers.len());
    let allocation =
        allocate_enemies(pool, tiers, tier, context.progression.enemy_difficulty, rng);
    debug!(
        "enemy phase: {} enemies worth {} of {} (tier {} -> {})",
        allocation.placements.len(),
        allocation.spent,
        context.progression.enemy_difficulty,
        tier,
        allocation.final_tier
    );

    for placement in allocation.placements {
        let enemy = context.holders.materialize(&placement);
        collaborators.turn_order.register_enemy(enemy);
        outcome.placements.push(placement);
    }
    outcome.enemy_value_spent = allocation.spent;
}

fn place_objects(
    context: &mut PipelineContext<'_>,
    collaborators: &mut Collaborators<'_>,
    plan: ObjectPlan,
    outcome: &mut PipelineOutcome,
) {
    match plan {
        ObjectPlan::FirstRoom { shop, prize } => {
            open_shop(context, collaborators, shop, outcome);
            outcome.materialize_all(context.holders, prize.into_iter().collect());
        }
        ObjectPlan::Shop { shop, prizes } => {
            open_shop(context, collaborators, shop, outcome);
            debug!("shop phase: {} high-value objects", prizes.len());
            outcome.materialize_all(context.holders, prizes);
        }
        ObjectPlan::Regular { items } => {
            for item in &items {
                collaborators.items.generate_item(
                    context.holders,
                    item.pos,
                    &[],
                    item.rarity_roll,
                    false,
                );
            }
            debug!("object phase: {} generated items", items.len());
            outcome.items = items;
        }
    }
}

fn open_shop(
    context: &mut PipelineContext<'_>,
    collaborators: &mut Collaborators<'_>,
    shop: Option<Placement>,
    outcome: &mut PipelineOutcome,
) {
    let Some(shop) = shop else {
        warn!("no object point left for the shop anchor; shop content not generated");
        return;
    };
    let anchor = context.holders.materialize(&shop);
    collaborators.shop.set_spawn_anchor(anchor);
    collaborators.shop.generate();
    outcome.placements.push(shop);
}
