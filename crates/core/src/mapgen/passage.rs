//! Opens an escape route from the player start to the grid border.

use std::collections::VecDeque;

use log::debug;

use super::grid::{index, is_outer_ring};
use super::model::GeneratedLayout;
use crate::rng::WorldRng;
use crate::types::GridCell;

/// Removes random non-guard destructible obstacles until the player start can walk
/// to the outer ring, or `tries` removals have been made. Returns how many were removed.
pub fn ensure_passage(
    layout: &mut GeneratedLayout,
    clearance: u32,
    tries: usize,
    rng: &mut WorldRng,
) -> usize {
    let mut removed = 0;
    while !reaches_outer_ring(layout, clearance) {
        if removed >= tries {
            debug!("passage still blocked after removing {removed} obstacles");
            break;
        }
        let candidates: Vec<GridCell> = layout
            .obstacles
            .values()
            .filter(|o| o.is_destructible() && !o.is_goal_guard)
            .map(|o| o.cell)
            .collect();
        let Some(&cell) = rng.choose(&candidates) else {
            debug!("passage blocked and no removable obstacle is left");
            break;
        };
        layout.obstacles.remove(&cell);
        removed += 1;
        debug!("removed obstacle at {cell:?} to open a passage");
    }
    removed
}

fn blocked_mask(layout: &GeneratedLayout, clearance: u32) -> Vec<bool> {
    let size = layout.grid_size;
    let mut blocked = vec![false; size * size];
    let reach = clearance as i32;
    for &cell in layout.obstacles.keys() {
        for dx in -reach..=reach {
            let spare = reach - dx.abs();
            for dy in -spare..=spare {
                let covered = GridCell::new(cell.x + dx, cell.y + dy);
                if covered.in_bounds(size) {
                    blocked[index(covered, size)] = true;
                }
            }
        }
    }
    blocked
}

fn reaches_outer_ring(layout: &GeneratedLayout, clearance: u32) -> bool {
    let size = layout.grid_size;
    let start = layout.player_start;
    let blocked = blocked_mask(layout, clearance);

    let mut seen = vec![false; size * size];
    let mut queue = VecDeque::from([start]);
    seen[index(start, size)] = true;

    while let Some(cell) = queue.pop_front() {
        if is_outer_ring(cell, size) {
            return true;
        }
        for next in cell.neighbors() {
            if !next.in_bounds(size) {
                continue;
            }
            let at = index(next, size);
            if seen[at] || blocked[at] {
                continue;
            }
            seen[at] = true;
            queue.push_back(next);
        }
    }
    false
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Item, Obstacle, ObstacleMap};

    fn boxed_in_layout(breakable: bool) -> GeneratedLayout {
        let start = GridCell::new(3, 3);
        let goal = GridCell::new(1, 1);
        let mut obstacles = ObstacleMap::new();
        obstacles.insert(goal, Obstacle::goal_guard(goal, 10));
        for cell in start.neighbors() {
            let obstacle = if breakable {
                Obstacle::destructible(cell, 20)
            } else {
                Obstacle::indestructible(cell)
            };
            obstacles.insert(cell, obstacle);
        }
        GeneratedLayout {
            grid_size: 7,
            obstacles,
            items: vec![Item { cell: goal, is_primary: true }],
            player_start: start,
            enemy_starts: Vec::new(),
            goal_cell: goal,
            enemy_distance: 5,
        }
    }

    #[test]
    fn open_layout_is_left_alone() {
        let mut layout = boxed_in_layout(true);
        layout.obstacles.retain(|_, o| o.is_goal_guard);
        let mut rng = WorldRng::seed_from_u64(1);
        assert_eq!(ensure_passage(&mut layout, 0, 8, &mut rng), 0);
        assert_eq!(layout.obstacles.len(), 1);
    }

    #[test]
    fn one_removal_frees_a_boxed_in_start() {
        let mut layout = boxed_in_layout(true);
        let mut rng = WorldRng::seed_from_u64(2);
        assert_eq!(ensure_passage(&mut layout, 0, 8, &mut rng), 1);
        assert_eq!(layout.obstacles.len(), 4);
        assert!(reaches_outer_ring(&layout, 0));
    }

    #[test]
    fn indestructible_walls_and_the_guard_are_never_removed() {
        let mut layout = boxed_in_layout(false);
        let before = layout.obstacles.clone();
        let mut rng = WorldRng::seed_from_u64(3);
        assert_eq!(ensure_passage(&mut layout, 0, 8, &mut rng), 0);
        assert_eq!(layout.obstacles, before);
    }

    #[test]
    fn removal_budget_is_respected() {
        let mut layout = boxed_in_layout(true);
        let mut rng = WorldRng::seed_from_u64(4);
        // A clearance of two smothers the whole interior, so no single removal helps.
        assert_eq!(ensure_passage(&mut layout, 2, 2, &mut rng), 2);
        assert_eq!(layout.obstacles.len(), 3);
    }

    #[test]
    fn start_on_the_border_always_passes() {
        let mut layout = boxed_in_layout(true);
        layout.player_start = GridCell::new(0, 3);
        assert!(reaches_outer_ring(&layout, 3));
    }
}
