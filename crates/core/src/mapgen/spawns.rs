//! Enemy, object and player spawn selection against the shared spawn pool.

use rand_chacha::rand_core::Rng;

use crate::content::{ContentCatalog, EnemyTier};
use crate::types::{Category, HolderKind, Pos, RoomKind};

use super::model::{ItemRequest, Placement};
use super::pool::SpawnPool;
use super::rng::{pick, random_index};

/// Items a regular room asks the item generator for.
pub const REGULAR_ROOM_ITEMS: usize = 2;
/// Rarity rolls are drawn from `0..ITEM_RARITY_ROLLS`.
pub const ITEM_RARITY_ROLLS: usize = 4;

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct EnemyAllocation {
    pub placements: Vec<Placement>,
    pub spent: u32,
    /// Tier in effect when the loop ended, after any demotions.
    pub final_tier: usize,
}

/// Spends `budget` points on enemies from `tiers[tier]`, one spawn point each.
///
/// When the next pick would overshoot, the tier drops by one (for the rest of
/// the room) and both the archetype and the point are re-rolled once. Tier 0
/// cannot drop, so its picks may overshoot by at most one archetype.
pub fn allocate_enemies<R: Rng + ?Sized>(
    pool: &mut SpawnPool,
    tiers: &[EnemyTier],
    tier: usize,
    budget: u32,
    rng: &mut R,
) -> EnemyAllocation {
    let mut allocation = EnemyAllocation { final_tier: tier, ..EnemyAllocation::default() };
    if tiers.is_empty() {
        return allocation;
    }
    let mut tier = tier.min(tiers.len() - 1);

    while allocation.spent < budget && !pool.is_empty(Category::Enemy) {
        let mut archetype = pick(rng, &tiers[tier].enemies);
        let mut slot = random_index(rng, pool.count(Category::Enemy));
        if allocation.spent.saturating_add(archetype.value) > budget && tier != 0 {
            tier -= 1;
            archetype = pick(rng, &tiers[tier].enemies);
            slot = random_index(rng, pool.count(Category::Enemy));
        }
        let Some(pos) = pool.remove_at(Category::Enemy, slot) else {
            break;
        };
        allocation.placements.push(Placement::new(&archetype.id, pos, HolderKind::Enemies));
        allocation.spent = allocation.spent.saturating_add(archetype.value);
    }

    allocation.final_tier = tier;
    allocation
}

/// Object-phase decisions for one room.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ObjectPlan {
    FirstRoom { shop: Option<Placement>, prize: Option<Placement> },
    Shop { shop: Option<Placement>, prizes: Vec<Placement> },
    Regular { items: Vec<ItemRequest> },
}

impl ObjectPlan {
    pub fn room_kind(&self) -> RoomKind {
        match self {
            ObjectPlan::FirstRoom { .. } => RoomKind::FirstRoom,
            ObjectPlan::Shop { .. } => RoomKind::Shop,
            ObjectPlan::Regular { .. } => RoomKind::Regular,
        }
    }
}

pub fn plan_objects<R: Rng + ?Sized>(
    pool: &mut SpawnPool,
    catalog: &ContentCatalog,
    room_kind: RoomKind,
    floor_index: u32,
    rng: &mut R,
) -> ObjectPlan {
    match room_kind {
        RoomKind::FirstRoom => {
            let shop = plan_shop(pool, catalog, rng);
            let prize = plan_prize(pool, catalog, rng);
            ObjectPlan::FirstRoom { shop, prize }
        }
        RoomKind::Shop => {
            let shop = plan_shop(pool, catalog, rng);
            let prizes = (0..floor_index).map_while(|_| plan_prize(pool, catalog, rng)).collect();
            ObjectPlan::Shop { shop, prizes }
        }
        RoomKind::Regular => {
            let items = (0..REGULAR_ROOM_ITEMS)
                .map_while(|_| {
                    let pos = pool.draw(Category::Object, rng)?;
                    let rarity_roll = random_index(rng, ITEM_RARITY_ROLLS) as u32;
                    Some(ItemRequest { pos, rarity_roll })
                })
                .collect();
            ObjectPlan::Regular { items }
        }
    }
}

fn plan_shop<R: Rng + ?Sized>(
    pool: &mut SpawnPool,
    catalog: &ContentCatalog,
    rng: &mut R,
) -> Option<Placement> {
    let pos = pool.draw(Category::Object, rng)?;
    Some(Placement::new(&catalog.shop, pos, HolderKind::Enemies))
}

fn plan_prize<R: Rng + ?Sized>(
    pool: &mut SpawnPool,
    catalog: &ContentCatalog,
    rng: &mut R,
) -> Option<Placement> {
    let pos = pool.draw(Category::Object, rng)?;
    Some(Placement::new(pick(rng, &catalog.objects).as_str(), pos, HolderKind::Enemies))
}

/// Player moves for `character_count` characters, without replacement. The
/// result is shorter than `character_count` once the Player pool runs dry.
pub fn plan_players<R: Rng + ?Sized>(
    pool: &mut SpawnPool,
    character_count: usize,
    rng: &mut R,
) -> Vec<(usize, Pos)> {
    (0..character_count)
        .map_while(|index| pool.draw(Category::Player, rng).map(|pos| (index, pos)))
        .collect()
}
