//! Floor/room progression and the difficulty counters it drives.

use rand_chacha::rand_core::Rng;
use serde::{Deserialize, Serialize};

use crate::types::RoomKind;

use super::rng::random_range;

/// Blueprint index reserved for the shop room.
pub const SHOP_MAP_INDEX: usize = 0;
pub const STARTING_FLOOR_INDEX: u32 = 1;
/// Room index a fresh floor starts from; the first transition lands on 0 (the shop).
pub const FLOOR_START_ROOM_INDEX: i32 = -1;
/// The room a floor wraps from back to its shop.
pub const SHOP_TRIGGER_ROOM_INDEX: i32 = 5;
pub const LAST_REGULAR_ROOM_INDEX: i32 = 4;
pub const DIFFICULTY_STEP: u32 = 3;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum MapRequest {
    /// Use the shop blueprint, as the very first generation does.
    Shop,
    /// Any non-shop blueprint; progression may still force the shop.
    Random,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProgressionState {
    pub floor_index: u32,
    pub room_index: i32,
    pub map_difficulty: u32,
    pub enemy_difficulty: u32,
    /// Set until the run's first room has been populated.
    pub first_spawn: bool,
}

impl Default for ProgressionState {
    fn default() -> Self {
        Self::new(0, 0)
    }
}

impl ProgressionState {
    pub fn new(map_difficulty: u32, enemy_difficulty: u32) -> Self {
        Self {
            floor_index: STARTING_FLOOR_INDEX,
            room_index: FLOOR_START_ROOM_INDEX,
            map_difficulty,
            enemy_difficulty,
            first_spawn: true,
        }
    }

    /// Moves to the next room and returns the blueprint index to build.
    pub fn advance(&mut self, selected_map: usize) -> usize {
        let mut map_index = selected_map;
        if self.room_index == SHOP_TRIGGER_ROOM_INDEX {
            map_index = SHOP_MAP_INDEX;
            self.floor_index += 1;
            self.room_index = FLOOR_START_ROOM_INDEX;
        }
        if self.room_index == LAST_REGULAR_ROOM_INDEX {
            self.map_difficulty += DIFFICULTY_STEP;
            self.enemy_difficulty += DIFFICULTY_STEP;
        }
        self.room_index += 1;
        map_index
    }

    pub fn room_kind(&self) -> RoomKind {
        if self.first_spawn {
            RoomKind::FirstRoom
        } else if self.room_index > 0 {
            RoomKind::Regular
        } else {
            RoomKind::Shop
        }
    }

    /// Enemy tier for this floor, clamped into the catalog's tier list.
    pub fn enemy_tier(&self, tier_count: usize) -> usize {
        let tier = self.floor_index.saturating_sub(STARTING_FLOOR_INDEX) as usize;
        tier.min(tier_count.saturating_sub(1))
    }

    /// HUD text for the current room. The run's opening shop is unlabeled.
    pub fn label(&self) -> String {
        match (self.floor_index, self.room_index) {
            (STARTING_FLOOR_INDEX, 0) => String::new(),
            (floor, 0) => format!("{floor}:Shop"),
            (floor, room) => format!("{floor} : {room}"),
        }
    }
}

/// Resolves a request to a blueprint index before progression rules apply.
/// Random draws skip the shop at index 0; with a single blueprint the shop is
/// the only choice.
pub fn select_map<R: Rng + ?Sized>(request: MapRequest, map_count: usize, rng: &mut R) -> usize {
    match request {
        MapRequest::Random if map_count > SHOP_MAP_INDEX + 1 => {
            random_range(rng, SHOP_MAP_INDEX + 1, map_count)
        }
        _ => SHOP_MAP_INDEX,
    }
}

#[cfg(test)]
mod tests {
    use rand_chacha::{ChaCha8Rng, rand_core::SeedableRng};

    use super::*;

    #[test]
    fn room_five_wraps_to_next_floor_shop() {
        let mut state = ProgressionState { room_index: 5, ..ProgressionState::new(6, 6) };

        let map_index = state.advance(3);

        assert_eq!(map_index, SHOP_MAP_INDEX);
        assert_eq!(state.floor_index, 2);
        assert_eq!(state.room_index, 0);
        assert_eq!(state.map_difficulty, 6);
    }

    #[test]
    fn last_regular_room_raises_both_difficulties() {
        let mut state = ProgressionState { room_index: 4, ..ProgressionState::new(1, 2) };

        assert_eq!(state.advance(2), 2);

        assert_eq!(state.map_difficulty, 4);
        assert_eq!(state.enemy_difficulty, 5);
        assert_eq!(state.room_index, 5);
    }

    #[test]
    fn full_floor_cycle_raises_difficulty_once() {
        let mut state = ProgressionState::new(0, 3);
        let mut difficulty_history = Vec::new();
        for _ in 0..7 {
            state.advance(1);
            difficulty_history.push((state.room_index, state.map_difficulty));
        }
        assert_eq!(
            difficulty_history,
            vec![(0, 0), (1, 0), (2, 0), (3, 0), (4, 0), (5, 3), (0, 3)]
        );
        assert_eq!(state.floor_index, 2);
        assert_eq!(state.enemy_difficulty, 6);
    }

    #[test]
    fn labels_follow_floor_and_room() {
        let mut state = ProgressionState::new(0, 0);
        state.room_index = 0;
        assert_eq!(state.label(), "");
        state.room_index = 3;
        assert_eq!(state.label(), "1 : 3");
        state.floor_index = 2;
        state.room_index = 0;
        assert_eq!(state.label(), "2:Shop");
    }

    #[test]
    fn room_kind_prefers_first_spawn() {
        let mut state = ProgressionState { room_index: 0, ..ProgressionState::new(0, 0) };
        assert_eq!(state.room_kind(), RoomKind::FirstRoom);
        state.first_spawn = false;
        assert_eq!(state.room_kind(), RoomKind::Shop);
        state.room_index = 2;
        assert_eq!(state.room_kind(), RoomKind::Regular);
    }

    #[test]
    fn enemy_tier_is_clamped_to_catalog() {
        let mut state = ProgressionState::new(0, 0);
        assert_eq!(state.enemy_tier(4), 0);
        state.floor_index = 3;
        assert_eq!(state.enemy_tier(4), 2);
        state.floor_index = 9;
        assert_eq!(state.enemy_tier(4), 3);
    }

    #[test]
    fn random_selection_never_picks_the_shop() {
        let mut rng = ChaCha8Rng::seed_from_u64(5);
        for _ in 0..100 {
            let index = select_map(MapRequest::Random, 4, &mut rng);
            assert!((1..4).contains(&index));
        }
        assert_eq!(select_map(MapRequest::Random, 1, &mut rng), SHOP_MAP_INDEX);
        assert_eq!(select_map(MapRequest::Shop, 4, &mut rng), SHOP_MAP_INDEX);
    }
}
