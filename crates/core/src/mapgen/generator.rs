//! Level generation orchestration that composes config lookup, placement, and spawns.

use log::debug;

use super::model::{EnemySpawn, GeneratedLevel};
use super::passage::ensure_passage;
use super::placement::{PlacementEngine, PlacementError};
use super::progression::{LevelConfig, level_config};
use crate::config::WorldTuning;
use crate::content::EnemyArchetype;
use crate::rng::WorldRng;

pub struct LevelGenerator {
    tuning: WorldTuning,
    engine: PlacementEngine,
}

impl LevelGenerator {
    pub fn new(tuning: WorldTuning) -> Self {
        let engine = PlacementEngine::new(&tuning);
        Self { tuning, engine }
    }

    pub fn tuning(&self) -> &WorldTuning {
        &self.tuning
    }

    pub fn generate(
        &self,
        level_index: u32,
        rng: &mut WorldRng,
    ) -> Result<GeneratedLevel, PlacementError> {
        let config = level_config(level_index, rng);
        self.generate_with_config(level_index, config, rng)
    }

    pub fn generate_with_config(
        &self,
        level_index: u32,
        config: LevelConfig,
        rng: &mut WorldRng,
    ) -> Result<GeneratedLevel, PlacementError> {
        let request = config.placement_request(self.tuning.grid_size);
        let mut layout = self.engine.generate(rng, &request)?;

        if self.tuning.passage_guarantee {
            let removed = ensure_passage(
                &mut layout,
                self.tuning.passage_clearance,
                self.tuning.passage_tries,
                rng,
            );
            if removed > 0 {
                debug!("level {level_index}: removed {removed} obstacles to open a passage");
            }
        }

        let enemy_spawns = layout
            .enemy_starts
            .iter()
            .map(|&cell| {
                let archetype =
                    rng.choose(&config.enemy_roster).copied().unwrap_or(EnemyArchetype::Basic);
                EnemySpawn { archetype, cell, stats: archetype.stats() }
            })
            .collect();

        Ok(GeneratedLevel { level_index, config, layout, enemy_spawns })
    }
}
