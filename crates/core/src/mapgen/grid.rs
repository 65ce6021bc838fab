//! Grid-space primitives used by placement and the passage check.

use crate::types::GridCell;

pub(super) fn corners(grid_size: usize) -> [GridCell; 4] {
    let last = grid_size as i32 - 1;
    [GridCell::new(0, 0), GridCell::new(0, last), GridCell::new(last, 0), GridCell::new(last, last)]
}

pub(super) fn is_corner(cell: GridCell, grid_size: usize) -> bool {
    corners(grid_size).contains(&cell)
}

pub(super) fn is_outer_ring(cell: GridCell, grid_size: usize) -> bool {
    let last = grid_size as i32 - 1;
    cell.x == 0 || cell.y == 0 || cell.x == last || cell.y == last
}

/// Every cell, column by column.
pub(super) fn all_cells(grid_size: usize) -> impl Iterator<Item = GridCell> {
    let size = grid_size as i32;
    (0..size).flat_map(move |x| (0..size).map(move |y| GridCell::new(x, y)))
}

pub(super) fn index(cell: GridCell, grid_size: usize) -> usize {
    (cell.y as usize) * grid_size + (cell.x as usize)
}
