//! A* over the traversal graph with obstacle costs read from the live layout.
//!
//! The graph only knows which cells are holes and what an edge weighed when it was
//! built. Each query re-reads the current obstacle state for every candidate cell: an
//! indestructible obstacle is skipped even if the graph still lists an edge to it, and
//! a destructible obstacle costs one step plus a tenth per attack tick needed to clear
//! it. Everything else uses the graph's static weight.

use std::collections::{BTreeMap, BTreeSet};

use log::trace;

use super::cost::{PathCost, destructible_step_cost};
use super::graph::TraversalGraph;
use crate::types::{GridCell, ObstacleKind, ObstacleMap};

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
struct OpenNode {
    f: u32,
    h: u32,
    x: i32,
    y: i32,
}

/// Search tree of a single query: best known predecessor and cost per visited cell.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SearchResult {
    came_from: BTreeMap<GridCell, GridCell>,
    cost_so_far: BTreeMap<GridCell, PathCost>,
    expanded: usize,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PathOutcome {
    /// Least-cost route, both endpoints included.
    Found { path: Vec<GridCell>, cost: PathCost },
    Unreachable,
    TrivialAtStart,
}

impl PathOutcome {
    /// First cell to move into, if any progress is possible.
    pub fn next_step(&self) -> Option<GridCell> {
        match self {
            PathOutcome::Found { path, .. } => path.get(1).copied(),
            PathOutcome::Unreachable | PathOutcome::TrivialAtStart => None,
        }
    }

    pub fn path(&self) -> Option<&[GridCell]> {
        match self {
            PathOutcome::Found { path, .. } => Some(path),
            PathOutcome::Unreachable | PathOutcome::TrivialAtStart => None,
        }
    }

    pub fn cost(&self) -> Option<PathCost> {
        match self {
            PathOutcome::Found { cost, .. } => Some(*cost),
            PathOutcome::TrivialAtStart => Some(PathCost::ZERO),
            PathOutcome::Unreachable => None,
        }
    }
}

impl SearchResult {
    pub fn came_from(&self, cell: GridCell) -> Option<GridCell> {
        self.came_from.get(&cell).copied()
    }

    pub fn cost_to(&self, cell: GridCell) -> Option<PathCost> {
        self.cost_so_far.get(&cell).copied()
    }

    pub fn visited(&self) -> impl Iterator<Item = GridCell> + '_ {
        self.cost_so_far.keys().copied()
    }

    pub fn expanded(&self) -> usize {
        self.expanded
    }

    /// Route from `start` to `goal`. Falls back to `[start]` when the goal was never
    /// reached; use [`SearchResult::outcome`] to tell that apart from `start == goal`.
    pub fn reconstruct_path(&self, start: GridCell, goal: GridCell) -> Vec<GridCell> {
        if !self.cost_so_far.contains_key(&goal) {
            return vec![start];
        }
        let mut current = goal;
        let mut path = vec![current];
        while current != start {
            let Some(previous) = self.came_from(current) else {
                return vec![start];
            };
            current = previous;
            path.push(current);
        }
        path.reverse();
        path
    }

    pub fn outcome(&self, start: GridCell, goal: GridCell) -> PathOutcome {
        if start == goal {
            return PathOutcome::TrivialAtStart;
        }
        let Some(cost) = self.cost_to(goal) else {
            return PathOutcome::Unreachable;
        };
        PathOutcome::Found { path: self.reconstruct_path(start, goal), cost }
    }
}

pub fn astar_search(
    graph: &TraversalGraph,
    start: GridCell,
    goal: GridCell,
    obstacles: &ObstacleMap,
    enemy_attack: i32,
) -> SearchResult {
    let mut result = SearchResult::default();
    let mut open_set = BTreeSet::new();

    let h = heuristic(start, goal);
    open_set.insert(OpenNode { f: h, h, x: start.x, y: start.y });
    result.cost_so_far.insert(start, PathCost::ZERO);

    while let Some(curr) = open_set.pop_first() {
        let current = GridCell::new(curr.x, curr.y);
        if current == goal {
            break;
        }
        let Some(current_cost) = result.cost_to(current) else {
            continue;
        };
        if curr.f - curr.h > current_cost.tenths() {
            // Superseded by a cheaper entry for the same cell.
            continue;
        }
        result.expanded += 1;

        for &next in graph.neighbors(current) {
            let step = match obstacles.get(&next) {
                Some(obstacle) if obstacle.kind == ObstacleKind::Indestructible => continue,
                Some(obstacle) => destructible_step_cost(obstacle.health, enemy_attack),
                None => match graph.cost(current, next) {
                    Some(weight) => weight,
                    None => continue,
                },
            };
            let new_cost = current_cost + step;
            if result.cost_to(next).is_none_or(|known| new_cost < known) {
                result.cost_so_far.insert(next, new_cost);
                result.came_from.insert(next, current);
                let h = heuristic(next, goal);
                open_set.insert(OpenNode { f: new_cost.tenths() + h, h, x: next.x, y: next.y });
            }
        }
    }

    trace!(
        "astar {start:?} -> {goal:?}: expanded {} cells, visited {}",
        result.expanded,
        result.cost_so_far.len()
    );
    result
}

/// Runs a query and folds it straight into a [`PathOutcome`].
pub fn find_path(
    graph: &TraversalGraph,
    start: GridCell,
    goal: GridCell,
    obstacles: &ObstacleMap,
    enemy_attack: i32,
) -> PathOutcome {
    astar_search(graph, start, goal, obstacles, enemy_attack).outcome(start, goal)
}

/// Manhattan distance in tenths; every step costs at least one full step.
fn heuristic(a: GridCell, b: GridCell) -> u32 {
    a.manhattan(b) * PathCost::STEP.tenths()
}
