//! Blueprint-driven room generation split into coherent submodules.

pub mod model;
pub mod progression;

mod decode;
mod generator;
mod mirror;
mod pool;
mod rng;
mod spawns;

pub use decode::{DecodedBlueprint, classify, decode, overlays_ground};
pub use generator::MapGenerator;
pub use mirror::OrientationMirror;
pub use model::{GeneratedRoom, ItemRequest, Placement};
pub use pool::{CategoryCounts, SpawnPool};
pub use progression::{MapRequest, ProgressionState, STARTING_FLOOR_INDEX, select_map};
pub use spawns::{
    EnemyAllocation, ITEM_RARITY_ROLLS, ObjectPlan, REGULAR_ROOM_ITEMS, allocate_enemies,
    plan_objects, plan_players,
};

use rand_chacha::rand_core::Rng;

use crate::blueprint::Blueprint;

/// Rolls a fresh orientation and decodes `blueprint` with it.
pub fn decode_blueprint<R: Rng + ?Sized>(blueprint: &Blueprint, rng: &mut R) -> DecodedBlueprint {
    decode(blueprint, OrientationMirror::roll(rng))
}
