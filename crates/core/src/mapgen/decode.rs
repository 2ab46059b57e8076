//! Pixel classification and blueprint decoding into spawn pools.

use crate::blueprint::{Blueprint, Rgba};
use crate::types::{Category, Pos};

use super::mirror::OrientationMirror;
use super::pool::SpawnPool;

/// Spawn points pooled for the pipeline plus the exits placed while decoding.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DecodedBlueprint {
    pub pool: SpawnPool,
    pub exits: Vec<Pos>,
}

/// Primary category of one colour. Exact palette matches win; any other fully
/// transparent colour is bare ground and everything else is void.
pub fn classify(color: Rgba) -> Category {
    match color {
        Rgba::BLACK => Category::Wall,
        Rgba::MAGENTA => Category::Boundary,
        Rgba::WHITE => Category::Terrain,
        Rgba::RED => Category::Enemy,
        Rgba::BLUE => Category::Object,
        Rgba::GREEN => Category::Player,
        Rgba::YELLOW => Category::Exit,
        Rgba { a: 0, .. } => Category::Ground,
        _ => Category::Empty,
    }
}

/// Walkable decoration categories that also get a ground tile underneath.
pub fn overlays_ground(category: Category) -> bool {
    matches!(
        category,
        Category::Terrain | Category::Enemy | Category::Object | Category::Player
    )
}

/// Buffer index sampled for a cell. Rows advance by `height`, not `width`, so
/// non-square blueprints sample skewed cells; reads past the buffer are void.
fn sample_index(blueprint: &Blueprint, row: usize, column: usize) -> usize {
    row * blueprint.height() + column
}

pub fn decode(blueprint: &Blueprint, mirror: OrientationMirror) -> DecodedBlueprint {
    let mut decoded = DecodedBlueprint::default();
    for row in 0..blueprint.height() {
        for column in 0..blueprint.width() {
            let Some(color) = blueprint.pixel_at_index(sample_index(blueprint, row, column))
            else {
                continue;
            };
            let pos = mirror.apply(column, row);
            match classify(color) {
                Category::Exit => decoded.exits.push(pos),
                Category::Empty => {}
                category => {
                    decoded.pool.push(category, pos);
                    if overlays_ground(category) {
                        decoded.pool.push(Category::Ground, pos);
                    }
                }
            }
        }
    }
    decoded
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use proptest::prelude::*;

    use super::*;

    fn palette() -> Vec<Rgba> {
        vec![
            Rgba::BLACK,
            Rgba::MAGENTA,
            Rgba::WHITE,
            Rgba::RED,
            Rgba::BLUE,
            Rgba::GREEN,
            Rgba::YELLOW,
            Rgba::CLEAR,
            Rgba { r: 90, g: 10, b: 10, a: 0 },
            Rgba::opaque(128, 128, 128),
            Rgba { r: 255, g: 0, b: 0, a: 254 },
        ]
    }

    fn pooled_union(decoded: &DecodedBlueprint) -> BTreeSet<Pos> {
        Category::POOLED
            .into_iter()
            .flat_map(|category| decoded.pool.all(category).iter().copied())
            .collect()
    }

    #[test]
    fn palette_classification_matches_layout_language() {
        assert_eq!(classify(Rgba::BLACK), Category::Wall);
        assert_eq!(classify(Rgba::MAGENTA), Category::Boundary);
        assert_eq!(classify(Rgba::WHITE), Category::Terrain);
        assert_eq!(classify(Rgba::RED), Category::Enemy);
        assert_eq!(classify(Rgba::BLUE), Category::Object);
        assert_eq!(classify(Rgba::GREEN), Category::Player);
        assert_eq!(classify(Rgba::YELLOW), Category::Exit);
        assert_eq!(classify(Rgba { r: 10, g: 20, b: 30, a: 0 }), Category::Ground);
        assert_eq!(classify(Rgba::opaque(1, 2, 3)), Category::Empty);
    }

    #[test]
    fn translucent_palette_colors_are_void() {
        assert_eq!(classify(Rgba { r: 255, g: 0, b: 0, a: 128 }), Category::Empty);
    }

    #[test]
    fn decorated_cells_also_land_in_ground() {
        let blueprint = Blueprint::from_glyphs(&["#we", "op.", "M?X"]).unwrap();
        let decoded = decode(&blueprint, OrientationMirror::IDENTITY);

        assert_eq!(decoded.pool.all(Category::Wall), &[Pos { y: 2, x: 0 }]);
        assert_eq!(decoded.pool.all(Category::Boundary), &[Pos { y: 0, x: 0 }]);
        assert_eq!(decoded.pool.all(Category::Terrain), &[Pos { y: 2, x: 1 }]);
        assert_eq!(decoded.exits, vec![Pos { y: 0, x: 2 }]);
        assert_eq!(decoded.pool.count(Category::Ground), 5);
        assert!(!pooled_union(&decoded).contains(&Pos { y: 0, x: 1 }));
    }

    #[test]
    fn mirror_is_applied_to_every_point() {
        let blueprint = Blueprint::from_glyphs(&["..", ".p"]).unwrap();
        let mirror = OrientationMirror { flip_x: true, flip_y: true };
        let decoded = decode(&blueprint, mirror);
        assert_eq!(decoded.pool.all(Category::Player), &[Pos { y: 0, x: -1 }]);
        assert!(decoded.pool.all(Category::Ground).contains(&Pos { y: -1, x: -1 }));
    }

    #[test]
    fn wide_blueprint_samples_with_height_stride() {
        // 3 wide, 2 tall: row 1 samples buffer cells 2..5, starting on row 0's last cell.
        let mut blueprint = Blueprint::filled(3, 2, Rgba::opaque(9, 9, 9)).unwrap();
        blueprint.set(2, 0, Rgba::RED);
        let decoded = decode(&blueprint, OrientationMirror::IDENTITY);
        assert_eq!(
            decoded.pool.all(Category::Enemy),
            &[Pos { y: 0, x: 2 }, Pos { y: 1, x: 0 }]
        );
    }

    #[test]
    fn tall_blueprint_drops_cells_past_the_buffer() {
        // 2 wide, 4 tall: rows 2 and 3 sample past the end of the 8 cell buffer.
        let blueprint = Blueprint::filled(2, 4, Rgba::BLACK).unwrap();
        let decoded = decode(&blueprint, OrientationMirror::IDENTITY);
        assert!(decoded.pool.all(Category::Wall).iter().all(|pos| pos.y < 2));
        assert_eq!(decoded.pool.count(Category::Wall), 4);
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(256))]
        #[test]
        fn decoded_pools_follow_the_palette(
            size in 1_usize..9,
            cells in prop::collection::vec(0_usize..11, 64),
            flip_x in any::<bool>(),
            flip_y in any::<bool>(),
        ) {
            let palette = palette();
            let pixels: Vec<Rgba> = (0..size * size).map(|i| palette[cells[i % cells.len()]]).collect();
            let blueprint = Blueprint::new(size, size, pixels).unwrap();
            let mirror = OrientationMirror { flip_x, flip_y };
            let decoded = decode(&blueprint, mirror);

            let mut recognized = BTreeSet::new();
            let mut exits = BTreeSet::new();
            let mut expected_ground = BTreeSet::new();
            for row in 0..size {
                for column in 0..size {
                    let pos = mirror.apply(column, row);
                    let category = classify(blueprint.pixels()[row * size + column]);
                    match category {
                        Category::Exit => { exits.insert(pos); }
                        Category::Empty => {}
                        other => {
                            recognized.insert(pos);
                            if other == Category::Ground || overlays_ground(other) {
                                expected_ground.insert(pos);
                            }
                        }
                    }
                }
            }

            prop_assert_eq!(pooled_union(&decoded), recognized);
            prop_assert_eq!(decoded.exits.iter().copied().collect::<BTreeSet<_>>(), exits);

            let ground: BTreeSet<Pos> = decoded.pool.all(Category::Ground).iter().copied().collect();
            prop_assert_eq!(&ground, &expected_ground);
            for category in [Category::Terrain, Category::Enemy, Category::Object, Category::Player] {
                for pos in decoded.pool.all(category) {
                    prop_assert!(ground.contains(pos));
                }
            }

            for category in Category::POOLED {
                let points = decoded.pool.all(category);
                let unique: BTreeSet<&Pos> = points.iter().collect();
                prop_assert_eq!(unique.len(), points.len());
            }
        }
    }
}
