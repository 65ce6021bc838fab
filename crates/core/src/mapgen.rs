//! Procedural level generation split into coherent submodules.

pub mod model;
pub mod placement;
pub mod progression;

mod generator;
mod grid;
mod passage;
mod seed;

pub use generator::LevelGenerator;
pub use model::{EnemySpawn, GeneratedLayout, GeneratedLevel, LayoutViolation, PlacementRequest};
pub use passage::ensure_passage;
pub use placement::{PlacementEngine, PlacementError};
pub use progression::{FIXED_LEVEL_COUNT, LevelConfig, MAX_ENEMIES, level_config};

use crate::config::WorldTuning;
use crate::rng::WorldRng;

/// Generates one level of a run. Each level draws from its own seed, so any level
/// can be rebuilt without replaying the ones before it.
pub fn generate_level(
    run_seed: u64,
    level_index: u32,
    tuning: &WorldTuning,
) -> Result<GeneratedLevel, PlacementError> {
    let mut rng = WorldRng::seed_from_u64(seed::derive_level_seed(run_seed, level_index));
    LevelGenerator::new(tuning.clone()).generate(level_index, &mut rng)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generate_level_matches_level_generator_output() {
        let seed = 123_u64;
        let level_index = 2_u32;
        let tuning = WorldTuning::default();

        let from_helper = generate_level(seed, level_index, &tuning).expect("helper");
        let mut rng = WorldRng::seed_from_u64(seed::derive_level_seed(seed, level_index));
        let from_generator =
            LevelGenerator::new(tuning).generate(level_index, &mut rng).expect("generator");

        assert_eq!(from_helper, from_generator);
    }
}
