use serde::{Deserialize, Serialize};
use slotmap::new_key_type;

new_key_type! {
    pub struct EntityId;
}

/// Grid coordinate after the orientation mirror has been applied.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Pos {
    pub y: i32,
    pub x: i32,
}

/// Spawn classification of a blueprint pixel.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Category {
    Wall,
    Boundary,
    Terrain,
    Enemy,
    Object,
    Player,
    Exit,
    Ground,
    Empty,
}

impl Category {
    /// Categories that are pooled for later placement. `Exit` is placed while
    /// decoding and `Empty` never holds points.
    pub const POOLED: [Category; 7] = [
        Category::Wall,
        Category::Boundary,
        Category::Terrain,
        Category::Enemy,
        Category::Object,
        Category::Player,
        Category::Ground,
    ];

    pub(crate) fn pool_slot(self) -> Option<usize> {
        match self {
            Category::Wall => Some(0),
            Category::Boundary => Some(1),
            Category::Terrain => Some(2),
            Category::Enemy => Some(3),
            Category::Object => Some(4),
            Category::Player => Some(5),
            Category::Ground => Some(6),
            Category::Exit | Category::Empty => None,
        }
    }
}

/// The four containers that own materialized content between regenerations.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum HolderKind {
    Borders,
    Terrain,
    Enemies,
    Objects,
}

impl HolderKind {
    pub const ALL: [HolderKind; 4] =
        [HolderKind::Borders, HolderKind::Terrain, HolderKind::Enemies, HolderKind::Objects];
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CollisionLayer {
    #[default]
    Default,
    Boundary,
}

/// Which of the three object-phase branches a room took.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RoomKind {
    FirstRoom,
    Shop,
    Regular,
}
