//! Ownership arenas for materialized room content.
//! This module exists so regeneration can release everything one room created in one sweep.
//! It does not decide what gets placed; placements arrive from `mapgen`.

use std::hash::Hasher;
use std::mem;

use slotmap::SlotMap;
use xxhash_rust::xxh3::Xxh3;

use crate::mapgen::Placement;
use crate::types::{CollisionLayer, EntityId, HolderKind, Pos};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Entity {
    pub archetype: String,
    pub name: String,
    pub pos: Pos,
    pub layer: CollisionLayer,
    pub holder: HolderKind,
}

/// Borders, terrain, enemies and objects. Every entity lives in one shared
/// arena so an `EntityId` names exactly one entity; each holder keeps its own
/// materialization order and is emptied wholesale before the next room.
#[derive(Default)]
pub struct OwnershipHolders {
    entities: SlotMap<EntityId, Entity>,
    borders: Vec<EntityId>,
    terrain: Vec<EntityId>,
    enemies: Vec<EntityId>,
    objects: Vec<EntityId>,
}

impl OwnershipHolders {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn materialize(&mut self, placement: &Placement) -> EntityId {
        let id = self.entities.insert(Entity {
            archetype: placement.archetype.clone(),
            name: placement.archetype.clone(),
            pos: placement.pos,
            layer: placement.layer,
            holder: placement.holder,
        });
        self.order_mut(placement.holder).push(id);
        id
    }

    pub fn get(&self, id: EntityId) -> Option<&Entity> {
        self.entities.get(id)
    }

    pub fn child_count(&self, kind: HolderKind) -> usize {
        self.order(kind).len()
    }

    pub fn total_children(&self) -> usize {
        HolderKind::ALL.iter().map(|&kind| self.child_count(kind)).sum()
    }

    /// Children of one holder in the order they were materialized.
    pub fn children(&self, kind: HolderKind) -> impl Iterator<Item = &Entity> + '_ {
        self.order(kind).iter().filter_map(|&id| self.entities.get(id))
    }

    /// Stable hash over every holder's children in materialization order.
    pub fn snapshot_hash(&self) -> u64 {
        let mut hasher = Xxh3::new();
        for kind in HolderKind::ALL {
            hasher.write_usize(self.child_count(kind));
            for entity in self.children(kind) {
                hasher.write(entity.name.as_bytes());
                hasher.write_u8(0xff);
                hasher.write_i32(entity.pos.x);
                hasher.write_i32(entity.pos.y);
                hasher.write_u8(match entity.layer {
                    CollisionLayer::Default => 0,
                    CollisionLayer::Boundary => 1,
                });
            }
        }
        hasher.finish()
    }

    /// Releases every child, newest first, and returns how many were removed.
    pub fn clear_all(&mut self) -> usize {
        [HolderKind::Borders, HolderKind::Objects, HolderKind::Enemies, HolderKind::Terrain]
            .into_iter()
            .map(|kind| self.clear(kind))
            .sum()
    }

    fn clear(&mut self, kind: HolderKind) -> usize {
        let mut order = mem::take(self.order_mut(kind));
        let mut released = 0;
        while let Some(id) = order.pop() {
            if self.entities.remove(id).is_some() {
                released += 1;
            }
        }
        released
    }

    fn order(&self, kind: HolderKind) -> &Vec<EntityId> {
        match kind {
            HolderKind::Borders => &self.borders,
            HolderKind::Terrain => &self.terrain,
            HolderKind::Enemies => &self.enemies,
            HolderKind::Objects => &self.objects,
        }
    }

    fn order_mut(&mut self, kind: HolderKind) -> &mut Vec<EntityId> {
        match kind {
            HolderKind::Borders => &mut self.borders,
            HolderKind::Terrain => &mut self.terrain,
            HolderKind::Enemies => &mut self.enemies,
            HolderKind::Objects => &mut self.objects,
        }
    }
}
