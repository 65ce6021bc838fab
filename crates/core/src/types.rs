use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use slotmap::new_key_type;

new_key_type! {
    pub struct ItemId;
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct GridCell {
    pub x: i32,
    pub y: i32,
}

impl GridCell {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    pub fn manhattan(self, other: GridCell) -> u32 {
        self.x.abs_diff(other.x) + self.y.abs_diff(other.y)
    }

    /// Four-directional neighbors, possibly out of bounds.
    pub fn neighbors(self) -> [GridCell; 4] {
        [
            GridCell { x: self.x - 1, y: self.y },
            GridCell { x: self.x + 1, y: self.y },
            GridCell { x: self.x, y: self.y - 1 },
            GridCell { x: self.x, y: self.y + 1 },
        ]
    }

    pub fn in_bounds(self, grid_size: usize) -> bool {
        self.x >= 0 && self.y >= 0 && (self.x as usize) < grid_size && (self.y as usize) < grid_size
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ObstacleKind {
    Destructible,
    Indestructible,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Obstacle {
    pub cell: GridCell,
    pub kind: ObstacleKind,
    /// Remaining hit points. Always zero for indestructible obstacles.
    pub health: i32,
    /// Set on the single obstacle sealing the primary item.
    pub is_goal_guard: bool,
}

impl Obstacle {
    pub fn destructible(cell: GridCell, health: i32) -> Self {
        Self { cell, kind: ObstacleKind::Destructible, health, is_goal_guard: false }
    }

    pub fn indestructible(cell: GridCell) -> Self {
        Self { cell, kind: ObstacleKind::Indestructible, health: 0, is_goal_guard: false }
    }

    pub fn goal_guard(cell: GridCell, health: i32) -> Self {
        Self { cell, kind: ObstacleKind::Destructible, health, is_goal_guard: true }
    }

    pub fn is_destructible(&self) -> bool {
        self.kind == ObstacleKind::Destructible
    }

    pub fn is_destroyed(&self) -> bool {
        self.is_destructible() && self.health <= 0
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    pub cell: GridCell,
    pub is_primary: bool,
}

/// Authoritative obstacle layout keyed by cell; at most one obstacle per cell.
pub type ObstacleMap = BTreeMap<GridCell, Obstacle>;
