//! Seams to the systems a generated room hands content to, plus headless stand-ins.
//! This module exists so the pipeline can be driven without a game engine attached.
//! It does not own turn order, shop stock, item rolls or the party itself.

use crate::holders::OwnershipHolders;
use crate::mapgen::Placement;
use crate::types::{CollisionLayer, EntityId, HolderKind, Pos};

pub trait TurnOrder {
    /// Drops the previous room's enemy list.
    fn reset_enemies(&mut self);
    fn register_enemy(&mut self, enemy: EntityId);
}

pub trait ShopContent {
    fn set_spawn_anchor(&mut self, anchor: EntityId);
    fn generate(&mut self);
}

pub trait ItemGeneration {
    /// Creates one item at `pos`, materializing it into `holders`.
    fn generate_item(
        &mut self,
        holders: &mut OwnershipHolders,
        pos: Pos,
        constraints: &[u32],
        rarity_roll: u32,
        premium: bool,
    ) -> EntityId;
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PlayerResources {
    pub action_points: u32,
    pub action_points_start: u32,
    pub mana_points: u32,
    pub mana_points_cap: u32,
}

impl PlayerResources {
    /// Refills action points and gives back half the mana cap, rounded up.
    pub fn restore_after_room(&mut self) {
        self.action_points = self.action_points_start;
        self.mana_points = (self.mana_points + self.mana_points_cap.div_ceil(2))
            .min(self.mana_points_cap);
    }
}

pub trait PlayerRoster {
    fn character_count(&self) -> usize;
    fn move_character(&mut self, index: usize, pos: Pos);
    fn resources_mut(&mut self) -> &mut PlayerResources;
    fn refresh_display(&mut self);
}

pub trait ProgressDisplay {
    fn show_floor_label(&mut self, label: &str);
}

/// Everything one generation pass talks to.
pub struct Collaborators<'a> {
    pub turn_order: &'a mut dyn TurnOrder,
    pub shop: &'a mut dyn ShopContent,
    pub items: &'a mut dyn ItemGeneration,
    pub roster: &'a mut dyn PlayerRoster,
    pub display: &'a mut dyn ProgressDisplay,
}

#[derive(Debug, Default)]
pub struct TurnQueue {
    pub enemies: Vec<EntityId>,
}

impl TurnOrder for TurnQueue {
    fn reset_enemies(&mut self) {
        self.enemies.clear();
    }

    fn register_enemy(&mut self, enemy: EntityId) {
        self.enemies.push(enemy);
    }
}

#[derive(Debug, Default)]
pub struct ShopStall {
    pub anchor: Option<EntityId>,
    pub restocks: u32,
}

impl ShopContent for ShopStall {
    fn set_spawn_anchor(&mut self, anchor: EntityId) {
        self.anchor = Some(anchor);
    }

    fn generate(&mut self) {
        self.restocks += 1;
    }
}

/// Materializes `item_r{rarity}` archetypes into the objects holder.
#[derive(Debug, Default)]
pub struct CatalogItemGenerator {
    pub generated: Vec<EntityId>,
}

impl ItemGeneration for CatalogItemGenerator {
    fn generate_item(
        &mut self,
        holders: &mut OwnershipHolders,
        pos: Pos,
        _constraints: &[u32],
        rarity_roll: u32,
        premium: bool,
    ) -> EntityId {
        let prefix = if premium { "premium_item" } else { "item" };
        let id = holders.materialize(&Placement {
            archetype: format!("{prefix}_r{rarity_roll}"),
            pos,
            holder: HolderKind::Objects,
            layer: CollisionLayer::Default,
        });
        self.generated.push(id);
        id
    }
}

#[derive(Debug)]
pub struct Party {
    pub positions: Vec<Pos>,
    pub resources: PlayerResources,
    pub display_refreshes: u32,
}

impl Party {
    pub fn new(size: usize, resources: PlayerResources) -> Self {
        Self { positions: vec![Pos { y: 0, x: 0 }; size], resources, display_refreshes: 0 }
    }
}

impl PlayerRoster for Party {
    fn character_count(&self) -> usize {
        self.positions.len()
    }

    fn move_character(&mut self, index: usize, pos: Pos) {
        self.positions[index] = pos;
    }

    fn resources_mut(&mut self) -> &mut PlayerResources {
        &mut self.resources
    }

    fn refresh_display(&mut self) {
        self.display_refreshes += 1;
    }
}

#[derive(Debug, Default)]
pub struct FloorLabel {
    pub text: String,
}

impl ProgressDisplay for FloorLabel {
    fn show_floor_label(&mut self, label: &str) {
        self.text = label.to_string();
    }
}
