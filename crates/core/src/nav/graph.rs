//! Weighted four-directional adjacency over the grid.
//! Indestructible cells are holes: they never appear as a source or a destination.

use std::collections::BTreeMap;

use log::debug;

use super::cost::PathCost;
use crate::types::{GridCell, ObstacleKind, ObstacleMap};

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TraversalGraph {
    grid_size: usize,
    edges: BTreeMap<GridCell, Vec<GridCell>>,
    weights: BTreeMap<(GridCell, GridCell), PathCost>,
}

impl TraversalGraph {
    /// Full rebuild from a static snapshot of the obstacle layout.
    pub fn build(grid_size: usize, obstacles: &ObstacleMap) -> Self {
        let is_hole = |cell: &GridCell| {
            obstacles.get(cell).is_some_and(|o| o.kind == ObstacleKind::Indestructible)
        };

        let mut edges = BTreeMap::new();
        let mut weights = BTreeMap::new();
        for x in 0..grid_size as i32 {
            for y in 0..grid_size as i32 {
                let cell = GridCell::new(x, y);
                if is_hole(&cell) {
                    continue;
                }
                let mut reachable = Vec::with_capacity(4);
                for next in cell.neighbors() {
                    if !next.in_bounds(grid_size) || is_hole(&next) {
                        continue;
                    }
                    let weight = if obstacles.contains_key(&next) {
                        PathCost::DESTRUCTIBLE_EDGE
                    } else {
                        PathCost::STEP
                    };
                    reachable.push(next);
                    weights.insert((cell, next), weight);
                }
                edges.insert(cell, reachable);
            }
        }

        debug!(
            "built traversal graph: {} nodes, {} edges, grid {grid_size}",
            edges.len(),
            weights.len()
        );
        Self { grid_size, edges, weights }
    }

    pub fn grid_size(&self) -> usize {
        self.grid_size
    }

    pub fn contains(&self, cell: GridCell) -> bool {
        self.edges.contains_key(&cell)
    }

    pub fn neighbors(&self, cell: GridCell) -> &[GridCell] {
        self.edges.get(&cell).map_or(&[], Vec::as_slice)
    }

    pub fn cost(&self, from: GridCell, to: GridCell) -> Option<PathCost> {
        self.weights.get(&(from, to)).copied()
    }

    pub fn node_count(&self) -> usize {
        self.edges.len()
    }

    pub fn edge_count(&self) -> usize {
        self.weights.len()
    }

    pub fn edges(&self) -> impl Iterator<Item = (GridCell, GridCell, PathCost)> + '_ {
        self.weights.iter().map(|(&(from, to), &weight)| (from, to, weight))
    }
}

pub fn build_graph(grid_size: usize, obstacles: &ObstacleMap) -> TraversalGraph {
    TraversalGraph::build(grid_size, obstacles)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Obstacle;

    fn obstacle_map(entries: &[Obstacle]) -> ObstacleMap {
        entries.iter().map(|o| (o.cell, o.clone())).collect()
    }

    #[test]
    fn open_grid_has_every_orthogonal_edge() {
        let graph = build_graph(3, &ObstacleMap::new());
        assert_eq!(graph.node_count(), 9);
        // 12 undirected adjacencies in a 3x3 grid, stored in both directions.
        assert_eq!(graph.edge_count(), 24);
        assert_eq!(graph.neighbors(GridCell::new(1, 1)).len(), 4);
        assert_eq!(graph.neighbors(GridCell::new(0, 0)).len(), 2);
    }

    #[test]
    fn indestructible_cells_are_holes() {
        let wall = GridCell::new(1, 1);
        let graph = build_graph(3, &obstacle_map(&[Obstacle::indestructible(wall)]));
        assert!(!graph.contains(wall));
        assert!(graph.neighbors(wall).is_empty());
        assert!(graph.edges().all(|(from, to, _)| from != wall && to != wall));
        assert_eq!(graph.neighbors(GridCell::new(1, 0)).len(), 2);
    }

    #[test]
    fn edges_into_destructible_cells_are_heavy() {
        let crate_cell = GridCell::new(1, 1);
        let graph = build_graph(3, &obstacle_map(&[Obstacle::destructible(crate_cell, 20)]));
        assert_eq!(graph.cost(GridCell::new(1, 0), crate_cell), Some(PathCost::DESTRUCTIBLE_EDGE));
        assert_eq!(graph.cost(crate_cell, GridCell::new(1, 0)), Some(PathCost::STEP));
        assert_eq!(graph.cost(GridCell::new(0, 0), GridCell::new(2, 2)), None);
    }

    #[test]
    fn out_of_bounds_cells_have_no_neighbors() {
        let graph = build_graph(4, &ObstacleMap::new());
        assert!(graph.neighbors(GridCell::new(-1, 0)).is_empty());
        assert!(graph.neighbors(GridCell::new(4, 4)).is_empty());
    }
}
