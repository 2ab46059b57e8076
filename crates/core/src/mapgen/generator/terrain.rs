//! Border, terrain and ground placement rules for generated rooms.

use rand_chacha::rand_core::Rng;

use crate::content::{ContentCatalog, GROUND_THEME_CHOICES};
use crate::types::{Category, CollisionLayer, HolderKind};

use super::super::model::Placement;
use super::super::pool::SpawnPool;
use super::super::rng::{pick, random_index};

/// Walls then boundaries, each point getting a random catalog entry.
pub(super) fn plan_borders<R: Rng + ?Sized>(
    pool: &mut SpawnPool,
    catalog: &ContentCatalog,
    rng: &mut R,
) -> Vec<Placement> {
    let walls = pool.take_all(Category::Wall);
    let boundaries = pool.take_all(Category::Boundary);
    let mut placements = Vec::with_capacity(walls.len() + boundaries.len());
    for pos in walls {
        let wall = pick(rng, &catalog.walls);
        placements.push(Placement::new(wall, pos, HolderKind::Borders));
    }
    for pos in boundaries {
        placements.push(Placement {
            layer: CollisionLayer::Boundary,
            ..Placement::new(pick(rng, &catalog.boundaries).as_str(), pos, HolderKind::Borders)
        });
    }
    placements
}

/// Up to `map_difficulty` hazards on random Terrain points.
pub(super) fn plan_dangerous_terrain<R: Rng + ?Sized>(
    pool: &mut SpawnPool,
    catalog: &ContentCatalog,
    terrain_number: usize,
    map_difficulty: u32,
    rng: &mut R,
) -> Vec<Placement> {
    let archetype = &catalog.dangerous_terrains[terrain_number];
    (0..map_difficulty)
        .map_while(|_| pool.draw(Category::Terrain, rng))
        .map(|pos| Placement::new(archetype, pos, HolderKind::Terrain))
        .collect()
}

/// The matching normal terrain on every Terrain point the hazards left.
pub(super) fn plan_ordinary_terrain(
    pool: &mut SpawnPool,
    catalog: &ContentCatalog,
    terrain_number: usize,
) -> Vec<Placement> {
    let archetype = &catalog.terrains[terrain_number];
    pool.take_all(Category::Terrain)
        .into_iter()
        .map(|pos| Placement::new(archetype, pos, HolderKind::Terrain))
        .collect()
}

/// One ground theme for the whole room. The theme is rolled even when
/// decoration is off so the stream stays aligned either way.
pub(super) fn plan_ground<R: Rng + ?Sized>(
    pool: &mut SpawnPool,
    catalog: &ContentCatalog,
    ground_tiles: bool,
    rng: &mut R,
) -> Vec<Placement> {
    let theme = random_index(rng, GROUND_THEME_CHOICES);
    let points = pool.take_all(Category::Ground);
    if !ground_tiles {
        return points
            .into_iter()
            .map(|pos| Placement::new(&catalog.blank_ground, pos, HolderKind::Borders))
            .collect();
    }
    let tiles = &catalog.ground_groups[theme].tiles;
    points
        .into_iter()
        .map(|pos| Placement::new(pick(rng, tiles).as_str(), pos, HolderKind::Borders))
        .collect()
}

#[cfg(test)]
mod tests {
    use rand_chacha::{ChaCha8Rng, rand_core::SeedableRng};

    use super::*;
    use crate::content::keys;
    use crate::types::Pos;

    fn pool_with(category: Category, count: i32) -> SpawnPool {
        let mut pool = SpawnPool::new();
        for x in 0..count {
            pool.push(category, Pos { y: 0, x });
        }
        pool
    }

    #[test]
    fn boundaries_carry_the_boundary_layer() {
        let catalog = ContentCatalog::build_default();
        let mut pool = pool_with(Category::Wall, 3);
        pool.push(Category::Boundary, Pos { y: 4, x: 4 });
        let mut rng = ChaCha8Rng::seed_from_u64(1);

        let placements = plan_borders(&mut pool, &catalog, &mut rng);

        assert_eq!(placements.len(), 4);
        assert!(placements[..3].iter().all(|p| p.layer == CollisionLayer::Default));
        assert!(placements[..3].iter().all(|p| catalog.walls.contains(&p.archetype)));
        assert_eq!(placements[3].layer, CollisionLayer::Boundary);
        assert!(catalog.boundaries.contains(&placements[3].archetype));
        assert!(placements.iter().all(|p| p.holder == HolderKind::Borders));
        assert!(pool.is_empty(Category::Wall));
    }

    #[test]
    fn hazard_count_is_capped_by_terrain_points() {
        let catalog = ContentCatalog::build_default();
        let mut rng = ChaCha8Rng::seed_from_u64(2);

        let mut plenty = pool_with(Category::Terrain, 10);
        assert_eq!(plan_dangerous_terrain(&mut plenty, &catalog, 1, 4, &mut rng).len(), 4);
        assert_eq!(plenty.count(Category::Terrain), 6);

        let mut scarce = pool_with(Category::Terrain, 2);
        let hazards = plan_dangerous_terrain(&mut scarce, &catalog, 1, 4, &mut rng);
        assert_eq!(hazards.len(), 2);
        assert!(hazards.iter().all(|p| p.archetype == keys::DANGER_ACID));
    }

    #[test]
    fn ordinary_terrain_fills_the_remainder_with_the_matching_pair() {
        let catalog = ContentCatalog::build_default();
        let mut pool = pool_with(Category::Terrain, 7);
        let mut rng = ChaCha8Rng::seed_from_u64(3);

        let hazards = plan_dangerous_terrain(&mut pool, &catalog, 2, 3, &mut rng);
        let ordinary = plan_ordinary_terrain(&mut pool, &catalog, 2);

        assert_eq!(hazards.len(), 3);
        assert_eq!(ordinary.len(), 4);
        assert!(hazards.iter().all(|p| p.archetype == keys::DANGER_LAVA));
        assert!(ordinary.iter().all(|p| p.archetype == keys::TERRAIN_EMBERS));
        assert!(hazards.iter().all(|h| ordinary.iter().all(|o| o.pos != h.pos)));
    }

    #[test]
    fn ground_uses_a_single_theme_per_room() {
        let catalog = ContentCatalog::build_default();
        let mut pool = pool_with(Category::Ground, 30);
        let mut rng = ChaCha8Rng::seed_from_u64(4);

        let placements = plan_ground(&mut pool, &catalog, true, &mut rng);

        assert_eq!(placements.len(), 30);
        let theme = catalog
            .ground_groups
            .iter()
            .find(|group| group.tiles.contains(&placements[0].archetype))
            .unwrap();
        assert!(placements.iter().all(|p| theme.tiles.contains(&p.archetype)));
    }

    #[test]
    fn disabled_decoration_uses_the_blank_placeholder() {
        let catalog = ContentCatalog::build_default();
        let mut pool = pool_with(Category::Ground, 5);
        let mut rng = ChaCha8Rng::seed_from_u64(5);

        let placements = plan_ground(&mut pool, &catalog, false, &mut rng);

        assert!(placements.iter().all(|p| p.archetype == keys::GROUND_BLANK));
        assert!(placements.iter().all(|p| p.holder == HolderKind::Borders));
    }
}
