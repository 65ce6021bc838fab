//! Constrained random placement of starts, the gated goal, obstacles, and items.
//!
//! Placement runs in a fixed order: reserve the corners, draw the player and enemy
//! starts together, seal the goal behind a destructible guard on an interior cell,
//! scatter the remaining obstacles, then drop secondary items on whatever is left.
//! Shortfalls in obstacle or item space are clamped; only the start draw can fail.

use std::collections::BTreeSet;

use log::{debug, warn};
use thiserror::Error;

use super::grid::{all_cells, corners, is_outer_ring};
use super::model::{GeneratedLayout, PlacementRequest};
use crate::config::WorldTuning;
use crate::rng::WorldRng;
use crate::types::{GridCell, Item, Obstacle, ObstacleMap};

#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum PlacementError {
    #[error("grid size {grid_size} is too small, at least 3 cells per side are required")]
    GridTooSmall { grid_size: usize },
    #[error(
        "could not place {enemy_count} enemies at distance >= {min_distance} from the player after {attempts} attempts"
    )]
    Infeasible { enemy_count: usize, min_distance: u32, attempts: u32 },
    #[error("no free interior cell is left for the goal item")]
    NoGoalCell,
}

#[derive(Clone, Debug)]
pub struct PlacementEngine {
    min_enemy_distance: u32,
    enemy_distance_floor: u32,
    max_attempts: u32,
    destructible_ratio: f64,
    obstacle_health: i32,
}

struct StartCells {
    player: GridCell,
    enemies: Vec<GridCell>,
    distance: u32,
}

impl PlacementEngine {
    pub fn new(tuning: &WorldTuning) -> Self {
        Self {
            min_enemy_distance: tuning.min_enemy_distance,
            enemy_distance_floor: tuning.enemy_distance_floor.min(tuning.min_enemy_distance),
            max_attempts: tuning.max_placement_attempts.max(1),
            destructible_ratio: tuning.destructible_ratio.clamp(0.0, 1.0),
            obstacle_health: tuning.obstacle_health,
        }
    }

    pub fn generate(
        &self,
        rng: &mut WorldRng,
        request: &PlacementRequest,
    ) -> Result<GeneratedLayout, PlacementError> {
        let grid_size = request.grid_size;
        if grid_size < 3 {
            return Err(PlacementError::GridTooSmall { grid_size });
        }

        let mut forbidden: BTreeSet<GridCell> = corners(grid_size).into_iter().collect();
        let starts = self.pick_starts(rng, grid_size, &forbidden, request.enemy_count)?;
        forbidden.insert(starts.player);
        forbidden.extend(starts.enemies.iter().copied());

        let goal_candidates: Vec<GridCell> = all_cells(grid_size)
            .filter(|cell| !forbidden.contains(cell) && !is_outer_ring(*cell, grid_size))
            .collect();
        let goal_cell = *rng.choose(&goal_candidates).ok_or(PlacementError::NoGoalCell)?;
        forbidden.insert(goal_cell);

        let mut obstacles = ObstacleMap::new();
        obstacles.insert(goal_cell, Obstacle::goal_guard(goal_cell, request.goal_hit_points));
        self.scatter_obstacles(rng, grid_size, &forbidden, request.obstacle_count, &mut obstacles);
        forbidden.extend(obstacles.keys().copied());

        let mut items = scatter_items(rng, grid_size, &forbidden, request.item_count);
        items.push(Item { cell: goal_cell, is_primary: true });

        Ok(GeneratedLayout {
            grid_size,
            obstacles,
            items,
            player_start: starts.player,
            enemy_starts: starts.enemies,
            goal_cell,
            enemy_distance: starts.distance,
        })
    }

    /// Bounded rejection sampling: whole batches are redrawn until every enemy keeps
    /// its distance and an interior cell is left for the goal, relaxing the distance
    /// one step at a time down to the floor.
    fn pick_starts(
        &self,
        rng: &mut WorldRng,
        grid_size: usize,
        forbidden: &BTreeSet<GridCell>,
        enemy_count: usize,
    ) -> Result<StartCells, PlacementError> {
        let mut pool: Vec<GridCell> =
            all_cells(grid_size).filter(|cell| !forbidden.contains(cell)).collect();
        if pool.len() < enemy_count + 1 {
            warn!(
                "only {} free cells for a player and {enemy_count} enemies on a {grid_size} grid",
                pool.len()
            );
            return Err(PlacementError::Infeasible {
                enemy_count,
                min_distance: self.min_enemy_distance,
                attempts: 0,
            });
        }

        let interior = pool.iter().filter(|cell| !is_outer_ring(**cell, grid_size)).count();
        let mut distance = self.min_enemy_distance;
        let mut attempts = 0_u32;
        loop {
            for _ in 0..self.max_attempts {
                attempts += 1;
                let picks = rng.sample_prefix(&mut pool, enemy_count + 1);
                let player = picks[0];
                let enemies = &picks[1..];
                let interior_taken =
                    picks.iter().filter(|cell| !is_outer_ring(**cell, grid_size)).count();
                if interior_taken < interior
                    && enemies.iter().all(|enemy| enemy.manhattan(player) >= distance)
                {
                    return Ok(StartCells { player, enemies: enemies.to_vec(), distance });
                }
            }
            if distance <= self.enemy_distance_floor {
                warn!(
                    "giving up on {enemy_count} enemies at distance {distance} after {attempts} attempts"
                );
                return Err(PlacementError::Infeasible {
                    enemy_count,
                    min_distance: distance,
                    attempts,
                });
            }
            distance -= 1;
            warn!("relaxing enemy start distance to {distance} after {attempts} attempts");
        }
    }

    fn scatter_obstacles(
        &self,
        rng: &mut WorldRng,
        grid_size: usize,
        forbidden: &BTreeSet<GridCell>,
        obstacle_count: usize,
        obstacles: &mut ObstacleMap,
    ) {
        let requested = obstacle_count.saturating_sub(1);
        let mut candidates: Vec<GridCell> =
            all_cells(grid_size).filter(|cell| !forbidden.contains(cell)).collect();
        if requested > candidates.len() {
            debug!("clamping extra obstacles from {requested} to {}", candidates.len());
        }

        let chosen = rng.sample_prefix(&mut candidates, requested);
        let destructible = (requested as f64 * self.destructible_ratio).floor() as usize;
        for (placed, &cell) in chosen.iter().enumerate() {
            let obstacle = if placed < destructible {
                Obstacle::destructible(cell, self.obstacle_health)
            } else {
                Obstacle::indestructible(cell)
            };
            obstacles.insert(cell, obstacle);
        }
    }
}

fn scatter_items(
    rng: &mut WorldRng,
    grid_size: usize,
    forbidden: &BTreeSet<GridCell>,
    item_count: usize,
) -> Vec<Item> {
    let requested = item_count.saturating_sub(1);
    let mut candidates: Vec<GridCell> =
        all_cells(grid_size).filter(|cell| !forbidden.contains(cell)).collect();
    if requested > candidates.len() {
        debug!("clamping secondary items from {requested} to {}", candidates.len());
    }
    rng.sample_prefix(&mut candidates, requested)
        .iter()
        .map(|&cell| Item { cell, is_primary: false })
        .collect()
}
