//! Content catalog of placeable archetypes and its validation.

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub mod keys {
    pub const WALL_STONE: &str = "wall_stone";
    pub const WALL_MOSSY: &str = "wall_mossy";
    pub const WALL_CRACKED: &str = "wall_cracked";

    pub const BOUNDARY_CHASM: &str = "boundary_chasm";
    pub const BOUNDARY_RUBBLE: &str = "boundary_rubble";

    pub const GROUND_DIRT_PLAIN: &str = "ground_dirt_plain";
    pub const GROUND_DIRT_PEBBLES: &str = "ground_dirt_pebbles";
    pub const GROUND_DIRT_ROOTS: &str = "ground_dirt_roots";
    pub const GROUND_TILE_CLEAN: &str = "ground_tile_clean";
    pub const GROUND_TILE_WORN: &str = "ground_tile_worn";
    pub const GROUND_BLANK: &str = "ground_blank";

    pub const TERRAIN_GRASS: &str = "terrain_grass";
    pub const TERRAIN_PUDDLE: &str = "terrain_puddle";
    pub const TERRAIN_EMBERS: &str = "terrain_embers";
    pub const DANGER_THORNS: &str = "danger_thorns";
    pub const DANGER_ACID: &str = "danger_acid";
    pub const DANGER_LAVA: &str = "danger_lava";

    pub const ENEMY_RAT: &str = "enemy_rat";
    pub const ENEMY_SLIME: &str = "enemy_slime";
    pub const ENEMY_SKELETON: &str = "enemy_skeleton";
    pub const ENEMY_CULTIST: &str = "enemy_cultist";
    pub const ENEMY_GOLEM: &str = "enemy_golem";
    pub const ENEMY_WRAITH: &str = "enemy_wraith";
    pub const ENEMY_DEMON: &str = "enemy_demon";

    pub const OBJECT_GOLDEN_CHEST: &str = "object_golden_chest";
    pub const OBJECT_RELIC: &str = "object_relic";
    pub const OBJECT_SPELLBOOK: &str = "object_spellbook";

    pub const SHOP: &str = "shop_counter";
    pub const FLOOR_EXIT: &str = "floor_exit";
}

/// A room's ground theme is drawn from the first this-many groups.
pub const GROUND_THEME_CHOICES: usize = 2;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroundGroup {
    pub group: String,
    pub tiles: Vec<String>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnemyArchetype {
    pub id: String,
    /// Point cost charged against the room's enemy difficulty budget.
    pub value: u32,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnemyTier {
    pub tier: String,
    pub enemies: Vec<EnemyArchetype>,
}

/// Everything the placement phases can instantiate. Repeating an id in a list
/// raises its odds of being picked.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentCatalog {
    pub walls: Vec<String>,
    pub boundaries: Vec<String>,
    pub ground_groups: Vec<GroundGroup>,
    pub blank_ground: String,
    pub terrains: Vec<String>,
    pub dangerous_terrains: Vec<String>,
    pub enemy_tiers: Vec<EnemyTier>,
    pub objects: Vec<String>,
    pub shop: String,
    pub floor_exit: String,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CatalogError {
    #[error("catalog has no {0}")]
    Empty(&'static str),
    #[error("terrain number {terrain_number} has no matching entry in {list}")]
    TerrainNumberOutOfRange { terrain_number: usize, list: &'static str },
    #[error("enemy tier {0} has no archetypes")]
    EmptyTier(usize),
    #[error("ground decoration needs {needed} ground groups, found {found}")]
    TooFewGroundGroups { needed: usize, found: usize },
    #[error("ground group '{0}' has no tiles")]
    EmptyGroundGroup(String),
}

impl ContentCatalog {
    pub fn build_default() -> Self {
        let owned = |ids: &[&str]| ids.iter().map(|id| (*id).to_string()).collect::<Vec<_>>();
        let enemy = |id: &str, value: u32| EnemyArchetype { id: id.to_string(), value };
        Self {
            walls: owned(&[keys::WALL_STONE, keys::WALL_STONE, keys::WALL_MOSSY, keys::WALL_CRACKED]),
            boundaries: owned(&[keys::BOUNDARY_CHASM, keys::BOUNDARY_RUBBLE]),
            ground_groups: vec![
                GroundGroup {
                    group: "dirt".to_string(),
                    tiles: owned(&[
                        keys::GROUND_DIRT_PLAIN,
                        keys::GROUND_DIRT_PLAIN,
                        keys::GROUND_DIRT_PEBBLES,
                        keys::GROUND_DIRT_ROOTS,
                    ]),
                },
                GroundGroup {
                    group: "tiles".to_string(),
                    tiles: owned(&[keys::GROUND_TILE_CLEAN, keys::GROUND_TILE_WORN]),
                },
            ],
            blank_ground: keys::GROUND_BLANK.to_string(),
            terrains: owned(&[keys::TERRAIN_GRASS, keys::TERRAIN_PUDDLE, keys::TERRAIN_EMBERS]),
            dangerous_terrains: owned(&[keys::DANGER_THORNS, keys::DANGER_ACID, keys::DANGER_LAVA]),
            enemy_tiers: vec![
                EnemyTier {
                    tier: "Tier 1".to_string(),
                    enemies: vec![enemy(keys::ENEMY_RAT, 1), enemy(keys::ENEMY_SLIME, 2)],
                },
                EnemyTier {
                    tier: "Tier 2".to_string(),
                    enemies: vec![enemy(keys::ENEMY_SKELETON, 3), enemy(keys::ENEMY_CULTIST, 3)],
                },
                EnemyTier {
                    tier: "Tier 3".to_string(),
                    enemies: vec![enemy(keys::ENEMY_GOLEM, 5), enemy(keys::ENEMY_WRAITH, 4)],
                },
                EnemyTier { tier: "Tier 4".to_string(), enemies: vec![enemy(keys::ENEMY_DEMON, 7)] },
            ],
            objects: owned(&[keys::OBJECT_GOLDEN_CHEST, keys::OBJECT_RELIC, keys::OBJECT_SPELLBOOK]),
            shop: keys::SHOP.to_string(),
            floor_exit: keys::FLOOR_EXIT.to_string(),
        }
    }

    /// Checks the entries every placement phase relies on. The phases index
    /// these lists without further checks.
    pub fn validate(&self, terrain_number: usize, ground_tiles: bool) -> Result<(), CatalogError> {
        if self.walls.is_empty() {
            return Err(CatalogError::Empty("walls"));
        }
        if self.boundaries.is_empty() {
            return Err(CatalogError::Empty("boundaries"));
        }
        if self.objects.is_empty() {
            return Err(CatalogError::Empty("high-value objects"));
        }
        if terrain_number >= self.terrains.len() {
            return Err(CatalogError::TerrainNumberOutOfRange { terrain_number, list: "terrains" });
        }
        if terrain_number >= self.dangerous_terrains.len() {
            return Err(CatalogError::TerrainNumberOutOfRange {
                terrain_number,
                list: "dangerous terrains",
            });
        }
        if self.enemy_tiers.is_empty() {
            return Err(CatalogError::Empty("enemy tiers"));
        }
        if let Some(index) = self.enemy_tiers.iter().position(|tier| tier.enemies.is_empty()) {
            return Err(CatalogError::EmptyTier(index));
        }
        if ground_tiles {
            if self.ground_groups.len() < GROUND_THEME_CHOICES {
                return Err(CatalogError::TooFewGroundGroups {
                    needed: GROUND_THEME_CHOICES,
                    found: self.ground_groups.len(),
                });
            }
            let themes = &self.ground_groups[..GROUND_THEME_CHOICES];
            if let Some(group) = themes.iter().find(|group| group.tiles.is_empty()) {
                return Err(CatalogError::EmptyGroundGroup(group.group.clone()));
            }
        }
        Ok(())
    }
}

impl Default for ContentCatalog {
    fn default() -> Self {
        Self::build_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_catalog_is_valid_for_every_terrain_pair() {
        let catalog = ContentCatalog::build_default();
        for terrain_number in 0..catalog.terrains.len() {
            assert_eq!(catalog.validate(terrain_number, true), Ok(()));
        }
    }

    #[test]
    fn terrain_number_past_dangerous_list_is_rejected() {
        let mut catalog = ContentCatalog::build_default();
        catalog.dangerous_terrains.truncate(1);
        assert_eq!(
            catalog.validate(2, false),
            Err(CatalogError::TerrainNumberOutOfRange {
                terrain_number: 2,
                list: "dangerous terrains"
            })
        );
    }

    #[test]
    fn empty_tier_is_reported_by_index() {
        let mut catalog = ContentCatalog::build_default();
        catalog.enemy_tiers[1].enemies.clear();
        assert_eq!(catalog.validate(0, true), Err(CatalogError::EmptyTier(1)));
    }

    #[test]
    fn ground_groups_only_matter_when_decoration_is_enabled() {
        let mut catalog = ContentCatalog::build_default();
        catalog.ground_groups.truncate(1);
        assert_eq!(catalog.validate(0, false), Ok(()));
        assert_eq!(
            catalog.validate(0, true),
            Err(CatalogError::TooFewGroundGroups { needed: 2, found: 1 })
        );
    }

    #[test]
    fn empty_ground_theme_is_named() {
        let mut catalog = ContentCatalog::build_default();
        catalog.ground_groups[1].tiles.clear();
        assert_eq!(
            catalog.validate(0, true),
            Err(CatalogError::EmptyGroundGroup("tiles".to_string()))
        );
    }
}
