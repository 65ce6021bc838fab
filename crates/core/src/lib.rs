pub mod config;
pub mod content;
pub mod mapgen;
pub mod nav;
pub mod rng;
pub mod state;
pub mod types;

pub use config::{ConfigError, WorldTuning};
pub use content::{EnemyArchetype, EnemyStats, RewardCard};
pub use mapgen::{
    GeneratedLayout, GeneratedLevel, LevelConfig, LevelGenerator, PlacementEngine, PlacementError,
    generate_level, level_config,
};
pub use nav::{PathCost, PathOutcome, TraversalGraph, astar_search, build_graph, find_path};
pub use rng::WorldRng;
pub use state::{CollectOutcome, DamageOutcome, LevelState};
pub use types::*;
