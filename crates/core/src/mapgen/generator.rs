//! Room generation facade that drives progression, decoding and placement.

mod pipeline;
mod terrain;

use log::{debug, info};
use rand_chacha::{ChaCha8Rng, rand_core::SeedableRng};

use crate::blueprint::Blueprint;
use crate::collaborators::Collaborators;
use crate::config::{ConfigError, GeneratorConfig};
use crate::holders::OwnershipHolders;
use crate::types::HolderKind;

use super::decode::decode;
use super::mirror::OrientationMirror;
use super::model::{GeneratedRoom, Placement};
use super::progression::{MapRequest, ProgressionState, select_map};
use pipeline::{PipelineContext, run_pipeline};

pub struct MapGenerator {
    config: GeneratorConfig,
    blueprints: Vec<Blueprint>,
    progression: ProgressionState,
    holders: OwnershipHolders,
    rng: ChaCha8Rng,
    regenerate_requested: bool,
}

impl MapGenerator {
    /// Validates the catalog against the settings once; generation itself
    /// never fails afterwards. Blueprint 0 is the shop room.
    pub fn new(
        run_seed: u64,
        config: GeneratorConfig,
        blueprints: Vec<Blueprint>,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        if blueprints.is_empty() {
            return Err(ConfigError::NoBlueprints);
        }
        let settings = &config.settings;
        let progression = ProgressionState {
            floor_index: settings.floor_index,
            room_index: settings.room_index,
            ..ProgressionState::new(settings.map_difficulty, settings.enemy_difficulty)
        };
        Ok(Self {
            config,
            blueprints,
            progression,
            holders: OwnershipHolders::new(),
            rng: ChaCha8Rng::seed_from_u64(run_seed),
            regenerate_requested: false,
        })
    }

    pub fn progression(&self) -> &ProgressionState {
        &self.progression
    }

    pub fn holders(&self) -> &OwnershipHolders {
        &self.holders
    }

    pub fn blueprint_count(&self) -> usize {
        self.blueprints.len()
    }

    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    /// First room of the run, always built from the shop blueprint.
    pub fn start(&mut self, collaborators: &mut Collaborators<'_>) -> GeneratedRoom {
        self.generate_map(MapRequest::Shop, collaborators)
    }

    /// Releases everything the previous room owned, then builds the next one.
    pub fn destroy_map(&mut self, collaborators: &mut Collaborators<'_>) -> GeneratedRoom {
        self.release_map();
        self.generate_map(MapRequest::Random, collaborators)
    }

    pub fn release_map(&mut self) -> usize {
        let released = self.holders.clear_all();
        debug!("released {released} entities from the previous room");
        released
    }

    pub fn request_regeneration(&mut self) {
        self.regenerate_requested = true;
    }

    pub fn regeneration_pending(&self) -> bool {
        self.regenerate_requested
    }

    /// Per-tick trigger check. Runs at most one regeneration per call.
    pub fn update(&mut self, collaborators: &mut Collaborators<'_>) -> Option<GeneratedRoom> {
        if !self.regenerate_requested {
            return None;
        }
        self.regenerate_requested = false;
        Some(self.destroy_map(collaborators))
    }

    pub fn generate_map(
        &mut self,
        request: MapRequest,
        collaborators: &mut Collaborators<'_>,
    ) -> GeneratedRoom {
        let selected = select_map(request, self.blueprints.len(), &mut self.rng);
        let map_index = self.progression.advance(selected);
        let label = self.progression.label();
        collaborators.display.show_floor_label(&label);

        let mirror = OrientationMirror::roll(&mut self.rng);
        let mut decoded = decode(&self.blueprints[map_index], mirror);
        let decoded_counts = decoded.pool.counts();

        let mut placements = Vec::with_capacity(decoded.exits.len());
        for &pos in &decoded.exits {
            let exit = Placement::new(&self.config.catalog.floor_exit, pos, HolderKind::Terrain);
            self.holders.materialize(&exit);
            placements.push(exit);
        }

        let mut context = PipelineContext {
            catalog: &self.config.catalog,
            settings: &self.config.settings,
            progression: &mut self.progression,
            holders: &mut self.holders,
        };
        let (room_kind, outcome) =
            run_pipeline(&mut context, &mut decoded.pool, collaborators, &mut self.rng);
        placements.extend(outcome.placements);

        info!(
            "generated room '{label}' from blueprint {map_index} (flip_x={}, flip_y={}): {} placements, {} enemy value",
            mirror.flip_x,
            mirror.flip_y,
            placements.len(),
            outcome.enemy_value_spent
        );

        GeneratedRoom {
            map_index,
            mirror,
            label,
            floor_index: self.progression.floor_index,
            room_index: self.progression.room_index,
            room_kind,
            decoded_counts,
            placements,
            items: outcome.items,
            enemy_value_spent: outcome.enemy_value_spent,
            unplaced_characters: outcome.unplaced_characters,
        }
    }
}
