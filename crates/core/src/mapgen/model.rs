//! Public data models for generated layouts and levels.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use xxhash_rust::xxh3::xxh3_64;

use super::grid::is_corner;
use super::progression::LevelConfig;
use crate::content::{EnemyArchetype, EnemyStats};
use crate::types::{GridCell, Item, Obstacle, ObstacleKind, ObstacleMap};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlacementRequest {
    pub grid_size: usize,
    pub obstacle_count: usize,
    pub item_count: usize,
    pub enemy_count: usize,
    pub goal_hit_points: i32,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GeneratedLayout {
    pub grid_size: usize,
    pub obstacles: ObstacleMap,
    /// Secondary items first, primary item last.
    pub items: Vec<Item>,
    pub player_start: GridCell,
    pub enemy_starts: Vec<GridCell>,
    pub goal_cell: GridCell,
    /// Minimum player-to-enemy distance actually enforced, after any relaxation.
    pub enemy_distance: u32,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnemySpawn {
    pub archetype: EnemyArchetype,
    pub cell: GridCell,
    pub stats: EnemyStats,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GeneratedLevel {
    pub level_index: u32,
    pub config: LevelConfig,
    pub layout: GeneratedLayout,
    pub enemy_spawns: Vec<EnemySpawn>,
}

#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum LayoutViolation {
    #[error("{cell:?} is a reserved corner but holds {what}")]
    CornerOccupied { cell: GridCell, what: &'static str },
    #[error("{cell:?} is occupied twice ({what})")]
    Overlap { cell: GridCell, what: &'static str },
    #[error("enemy at {enemy:?} is {distance} cells from the player, below {required}")]
    EnemyTooClose { enemy: GridCell, distance: u32, required: u32 },
    #[error("expected exactly one goal guard, found {0}")]
    GoalGuardCount(usize),
    #[error("expected exactly one primary item, found {0}")]
    PrimaryItemCount(usize),
    #[error("goal guard and primary item are not both on the goal cell {0:?}")]
    GoalMismatch(GridCell),
    #[error("{cell:?} lies outside the {grid_size}x{grid_size} grid")]
    OutOfBounds { cell: GridCell, grid_size: usize },
}

impl GeneratedLayout {
    pub fn goal_guard(&self) -> Option<&Obstacle> {
        self.obstacles.get(&self.goal_cell).filter(|o| o.is_goal_guard)
    }

    pub fn primary_item(&self) -> Option<&Item> {
        self.items.iter().find(|item| item.is_primary)
    }

    pub fn destructible_count(&self) -> usize {
        self.obstacles.values().filter(|o| o.kind == ObstacleKind::Destructible).count()
    }

    /// Checks the placement guarantees: no reserved corner is used, nothing overlaps
    /// except the goal guard with the primary item, every enemy keeps its distance,
    /// and exactly one goal guard sits on exactly one primary item.
    pub fn check_invariants(&self) -> Result<(), LayoutViolation> {
        let mut occupied = BTreeSet::new();
        let mut claim = |cell: GridCell, what: &'static str| {
            if !cell.in_bounds(self.grid_size) {
                return Err(LayoutViolation::OutOfBounds { cell, grid_size: self.grid_size });
            }
            if is_corner(cell, self.grid_size) {
                return Err(LayoutViolation::CornerOccupied { cell, what });
            }
            if !occupied.insert(cell) {
                return Err(LayoutViolation::Overlap { cell, what });
            }
            Ok(())
        };

        claim(self.player_start, "player start")?;
        for &enemy in &self.enemy_starts {
            claim(enemy, "enemy start")?;
        }
        for (&cell, obstacle) in &self.obstacles {
            if cell != obstacle.cell {
                return Err(LayoutViolation::Overlap { cell, what: "obstacle keyed off its cell" });
            }
            claim(cell, "obstacle")?;
        }
        for item in &self.items {
            if item.is_primary {
                continue;
            }
            claim(item.cell, "item")?;
        }

        for &enemy in &self.enemy_starts {
            let distance = enemy.manhattan(self.player_start);
            if distance < self.enemy_distance {
                return Err(LayoutViolation::EnemyTooClose {
                    enemy,
                    distance,
                    required: self.enemy_distance,
                });
            }
        }

        let guards: Vec<_> = self.obstacles.values().filter(|o| o.is_goal_guard).collect();
        if guards.len() != 1 {
            return Err(LayoutViolation::GoalGuardCount(guards.len()));
        }
        let primaries: Vec<_> = self.items.iter().filter(|i| i.is_primary).collect();
        if primaries.len() != 1 {
            return Err(LayoutViolation::PrimaryItemCount(primaries.len()));
        }
        if guards[0].cell != self.goal_cell
            || primaries[0].cell != self.goal_cell
            || !guards[0].is_destructible()
        {
            return Err(LayoutViolation::GoalMismatch(self.goal_cell));
        }
        Ok(())
    }

    pub fn canonical_bytes(&self) -> Vec<u8> {
        let mut bytes = Vec::new();
        bytes.extend((self.grid_size as u32).to_le_bytes());
        push_cell(&mut bytes, self.player_start);
        bytes.extend((self.enemy_starts.len() as u32).to_le_bytes());
        for &enemy in &self.enemy_starts {
            push_cell(&mut bytes, enemy);
        }
        push_cell(&mut bytes, self.goal_cell);
        bytes.extend(self.enemy_distance.to_le_bytes());

        bytes.extend((self.obstacles.len() as u32).to_le_bytes());
        for obstacle in self.obstacles.values() {
            push_cell(&mut bytes, obstacle.cell);
            bytes.push(match obstacle.kind {
                ObstacleKind::Destructible => 0,
                ObstacleKind::Indestructible => 1,
            });
            bytes.extend(obstacle.health.to_le_bytes());
            bytes.push(u8::from(obstacle.is_goal_guard));
        }

        bytes.extend((self.items.len() as u32).to_le_bytes());
        for item in &self.items {
            push_cell(&mut bytes, item.cell);
            bytes.push(u8::from(item.is_primary));
        }
        bytes
    }

    pub fn fingerprint(&self) -> u64 {
        xxh3_64(&self.canonical_bytes())
    }
}

fn push_cell(bytes: &mut Vec<u8>, cell: GridCell) {
    bytes.extend(cell.x.to_le_bytes());
    bytes.extend(cell.y.to_le_bytes());
}
