//! Level progression: hand-tuned opening levels, then proportional scaling.

use serde::{Deserialize, Serialize};

use super::model::PlacementRequest;
use crate::content::{EnemyArchetype, REWARD_POOL, RewardCard};
use crate::rng::WorldRng;

pub const FIXED_LEVEL_COUNT: u32 = 2;
pub const MAX_ENEMIES: usize = 5;

const SCALED_OBSTACLE_BASE: usize = 20;
const SCALED_ITEM_COUNT: usize = 5;
const GATE_HP_BASE: f64 = 10.0;
const GATE_HP_GROWTH: f64 = 1.2;
const ROSTER_CYCLE: [EnemyArchetype; 3] =
    [EnemyArchetype::Basic, EnemyArchetype::Strong, EnemyArchetype::Fire];

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LevelConfig {
    pub obstacle_count: usize,
    pub item_count: usize,
    pub enemy_count: usize,
    /// Hit points of the obstacle sealing the primary item.
    pub gate_hit_points: i32,
    pub enemy_roster: Vec<EnemyArchetype>,
    pub reward: RewardCard,
}

impl LevelConfig {
    pub fn placement_request(&self, grid_size: usize) -> PlacementRequest {
        PlacementRequest {
            grid_size,
            obstacle_count: self.obstacle_count,
            item_count: self.item_count,
            enemy_count: self.enemy_count,
            goal_hit_points: self.gate_hit_points,
        }
    }
}

/// Generation parameters for `level_index`. Only levels past the fixed table draw
/// from `rng`, once, for the reward card.
pub fn level_config(level_index: u32, rng: &mut WorldRng) -> LevelConfig {
    if let Some(config) = fixed_level(level_index) {
        return config;
    }

    let steps_past_table = level_index - FIXED_LEVEL_COUNT + 1;
    let reward = rng.choose(&REWARD_POOL).copied().unwrap_or(RewardCard::ZombieFast);
    LevelConfig {
        obstacle_count: SCALED_OBSTACLE_BASE + level_index as usize,
        item_count: SCALED_ITEM_COUNT,
        enemy_count: MAX_ENEMIES.min(1 + level_index as usize / 3),
        gate_hit_points: gate_hit_points(steps_past_table),
        enemy_roster: ROSTER_CYCLE[level_index as usize % ROSTER_CYCLE.len()..].to_vec(),
        reward,
    }
}

fn fixed_level(level_index: u32) -> Option<LevelConfig> {
    match level_index {
        0 => Some(LevelConfig {
            obstacle_count: 15,
            item_count: 3,
            enemy_count: 1,
            gate_hit_points: 10,
            enemy_roster: vec![EnemyArchetype::Basic],
            reward: RewardCard::ZombieFast,
        }),
        1 => Some(LevelConfig {
            obstacle_count: 18,
            item_count: 4,
            enemy_count: 2,
            gate_hit_points: 15,
            enemy_roster: vec![EnemyArchetype::Basic, EnemyArchetype::Strong],
            reward: RewardCard::ZombieStrong,
        }),
        _ => None,
    }
}

fn gate_hit_points(steps_past_table: u32) -> i32 {
    let exponent = steps_past_table.min(i32::MAX as u32) as i32;
    // Float-to-int casts saturate, so deep levels clamp at i32::MAX.
    (GATE_HP_BASE * GATE_HP_GROWTH.powi(exponent)) as i32
}
