//! Public data models for placement decisions and generated-room reports.

use serde::{Deserialize, Serialize};
use xxhash_rust::xxh3::xxh3_64;

use crate::types::{Category, CollisionLayer, HolderKind, Pos, RoomKind};

use super::mirror::OrientationMirror;
use super::pool::CategoryCounts;

/// One decided placement: what to instantiate, where, and which holder owns it.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Placement {
    pub archetype: String,
    pub pos: Pos,
    pub holder: HolderKind,
    pub layer: CollisionLayer,
}

impl Placement {
    pub fn new(archetype: &str, pos: Pos, holder: HolderKind) -> Self {
        Self { archetype: archetype.to_string(), pos, holder, layer: CollisionLayer::Default }
    }
}

/// A spot handed to the item generator together with its rarity roll.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemRequest {
    pub pos: Pos,
    pub rarity_roll: u32,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GeneratedRoom {
    pub map_index: usize,
    pub mirror: OrientationMirror,
    pub label: String,
    pub floor_index: u32,
    pub room_index: i32,
    pub room_kind: RoomKind,
    pub decoded_counts: CategoryCounts,
    /// Every placement materialized by the core, in materialization order.
    pub placements: Vec<Placement>,
    pub items: Vec<ItemRequest>,
    pub enemy_value_spent: u32,
    pub unplaced_characters: usize,
}

impl GeneratedRoom {
    pub fn placements_in(&self, holder: HolderKind) -> impl Iterator<Item = &Placement> + '_ {
        self.placements.iter().filter(move |placement| placement.holder == holder)
    }

    pub fn count_of(&self, archetype: &str) -> usize {
        self.placements.iter().filter(|placement| placement.archetype == archetype).count()
    }

    pub fn fingerprint(&self) -> u64 {
        xxh3_64(&self.canonical_bytes())
    }

    pub fn canonical_bytes(&self) -> Vec<u8> {
        let mut bytes = Vec::new();
        bytes.extend((self.map_index as u32).to_le_bytes());
        bytes.push(u8::from(self.mirror.flip_x));
        bytes.push(u8::from(self.mirror.flip_y));
        bytes.extend(self.floor_index.to_le_bytes());
        bytes.extend(self.room_index.to_le_bytes());
        bytes.push(match self.room_kind {
            RoomKind::FirstRoom => 0,
            RoomKind::Shop => 1,
            RoomKind::Regular => 2,
        });
        for (category, count) in self.decoded_counts.iter() {
            bytes.push(category_code(category));
            bytes.extend((count as u32).to_le_bytes());
        }

        bytes.extend((self.placements.len() as u32).to_le_bytes());
        for placement in &self.placements {
            bytes.extend((placement.archetype.len() as u32).to_le_bytes());
            bytes.extend(placement.archetype.as_bytes());
            bytes.extend(placement.pos.y.to_le_bytes());
            bytes.extend(placement.pos.x.to_le_bytes());
            bytes.push(match placement.holder {
                HolderKind::Borders => 0,
                HolderKind::Terrain => 1,
                HolderKind::Enemies => 2,
                HolderKind::Objects => 3,
            });
            bytes.push(match placement.layer {
                CollisionLayer::Default => 0,
                CollisionLayer::Boundary => 1,
            });
        }

        bytes.extend((self.items.len() as u32).to_le_bytes());
        for item in &self.items {
            bytes.extend(item.pos.y.to_le_bytes());
            bytes.extend(item.pos.x.to_le_bytes());
            bytes.extend(item.rarity_roll.to_le_bytes());
        }
        bytes.extend(self.enemy_value_spent.to_le_bytes());
        bytes.extend((self.unplaced_characters as u32).to_le_bytes());
        bytes
    }
}

fn category_code(category: Category) -> u8 {
    match category {
        Category::Wall => 0,
        Category::Boundary => 1,
        Category::Terrain => 2,
        Category::Enemy => 3,
        Category::Object => 4,
        Category::Player => 5,
        Category::Exit => 6,
        Category::Ground => 7,
        Category::Empty => 8,
    }
}
