//! Live level state: the single owner of obstacles and items during play.

use log::debug;
use slotmap::SlotMap;

use crate::config::WorldTuning;
use crate::mapgen::GeneratedLayout;
use crate::nav::{PathOutcome, TraversalGraph, build_graph, find_path};
use crate::types::*;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DamageOutcome {
    NoObstacle,
    Indestructible,
    Damaged { remaining: i32 },
    Destroyed { was_goal_guard: bool },
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CollectOutcome {
    Collected(Item),
    /// The primary item stays sealed while its goal guard stands.
    GuardedByGate,
    Nothing,
}

pub struct LevelState {
    grid_size: usize,
    enemy_attack: i32,
    goal_cell: GridCell,
    obstacles: ObstacleMap,
    items: SlotMap<ItemId, Item>,
    graph: Option<TraversalGraph>,
}

impl LevelState {
    pub fn new(layout: GeneratedLayout, tuning: &WorldTuning) -> Self {
        let mut items = SlotMap::with_key();
        for item in layout.items {
            items.insert(item);
        }
        Self {
            grid_size: layout.grid_size,
            enemy_attack: tuning.enemy_attack,
            goal_cell: layout.goal_cell,
            obstacles: layout.obstacles,
            items,
            graph: None,
        }
    }

    pub fn grid_size(&self) -> usize {
        self.grid_size
    }

    pub fn goal_cell(&self) -> GridCell {
        self.goal_cell
    }

    pub fn obstacle_at(&self, cell: GridCell) -> Option<&Obstacle> {
        self.obstacles.get(&cell)
    }

    pub fn obstacles(&self) -> &ObstacleMap {
        &self.obstacles
    }

    pub fn destructible_count(&self) -> usize {
        self.obstacles.values().filter(|o| o.is_destructible()).count()
    }

    /// Health changes only touch live costs; the graph is invalidated once the
    /// obstacle is gone.
    pub fn damage_obstacle(&mut self, cell: GridCell, amount: i32) -> DamageOutcome {
        let Some(obstacle) = self.obstacles.get_mut(&cell) else {
            return DamageOutcome::NoObstacle;
        };
        if !obstacle.is_destructible() {
            return DamageOutcome::Indestructible;
        }
        obstacle.health = obstacle.health.saturating_sub(amount.max(0));
        if !obstacle.is_destroyed() {
            return DamageOutcome::Damaged { remaining: obstacle.health };
        }
        let was_goal_guard = obstacle.is_goal_guard;
        self.remove_obstacle(cell);
        DamageOutcome::Destroyed { was_goal_guard }
    }

    /// Removes a destructible obstacle outright. Indestructible ones stay put.
    pub fn destroy_obstacle(&mut self, cell: GridCell) -> bool {
        match self.obstacles.get(&cell) {
            Some(obstacle) if obstacle.is_destructible() => {
                self.remove_obstacle(cell);
                true
            }
            _ => false,
        }
    }

    fn remove_obstacle(&mut self, cell: GridCell) {
        self.obstacles.remove(&cell);
        self.graph = None;
        debug!("obstacle at {cell:?} destroyed, traversal graph invalidated");
    }

    pub fn gate_open(&self) -> bool {
        self.obstacles.get(&self.goal_cell).is_none_or(|o| !o.is_goal_guard)
    }

    pub fn items(&self) -> impl Iterator<Item = (ItemId, &Item)> {
        self.items.iter()
    }

    pub fn collect_item_at(&mut self, cell: GridCell) -> CollectOutcome {
        let Some(id) = self.items.iter().find(|(_, item)| item.cell == cell).map(|(id, _)| id)
        else {
            return CollectOutcome::Nothing;
        };
        if self.items[id].is_primary && !self.gate_open() {
            return CollectOutcome::GuardedByGate;
        }
        match self.items.remove(id) {
            Some(item) => CollectOutcome::Collected(item),
            None => CollectOutcome::Nothing,
        }
    }

    /// The level is won once every item, primary included, has been collected.
    pub fn is_cleared(&self) -> bool {
        self.items.is_empty()
    }

    pub fn graph(&mut self) -> &TraversalGraph {
        cached_graph(&mut self.graph, self.grid_size, &self.obstacles)
    }

    pub fn plan_path(&mut self, from: GridCell, to: GridCell) -> PathOutcome {
        let graph = cached_graph(&mut self.graph, self.grid_size, &self.obstacles);
        find_path(graph, from, to, &self.obstacles, self.enemy_attack)
    }
}

fn cached_graph<'a>(
    slot: &'a mut Option<TraversalGraph>,
    grid_size: usize,
    obstacles: &ObstacleMap,
) -> &'a TraversalGraph {
    slot.get_or_insert_with(|| {
        debug!("rebuilding traversal graph for {} obstacles", obstacles.len());
        build_graph(grid_size, obstacles)
    })
}
