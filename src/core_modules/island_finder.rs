// THEORY:
// The `IslandFinder` is the engine of the crate. It partitions the foreground
// cells of a `Grid` into maximal 4-connected components and, while doing so,
// decides which cells of each component lie on its perimeter.
//
// Key architectural principles & algorithm steps:
// 1.  **Raster Seeding**: It scans the grid row by row, left to right. The first
//     unvisited foreground cell it meets seeds a new island, so the Nth island in
//     the output is always the one whose raster-first cell is met Nth. This is the
//     sole source of output ordering.
// 2.  **Iterative Region Growing**: Each island is grown from its seed with an
//     explicit stack instead of recursion, so very large islands cannot overflow
//     the call stack. The stack is deduplicated on pop, not on push: a cell may be
//     pushed more than once and is skipped if already visited when popped.
// 3.  **Perimeter Classification**: When a cell is popped, its four neighbours are
//     examined once. Falling off the grid, or an unvisited neighbour whose value
//     differs from the seed's, marks the cell as perimeter. Unvisited neighbours
//     with the seed's value are pushed instead. Already visited neighbours are
//     ignored entirely, so a cell bordering an *earlier* island of a different
//     foreground value is not marked on that side.
// 4.  **Explicit Traversal State**: The `VisitedSet` is owned by `find_islands` and
//     lent to each traversal. Nothing outlives the call.
// 5.  **Stateless Utility**: Given the same grid it always returns the same islands
//     in the same order.

use crate::core_modules::grid::{Cell, Direction, FOREGROUND_CEILING, Grid, Intensity, is_foreground};
use crate::core_modules::island::Island;
use crate::core_modules::visited::VisitedSet;
use crate::error::Result;

pub mod island_finder {
    use super::*;
    use log::debug;

    /// Finds every island in `grid`, ordered by raster position of each island's first cell.
    pub fn find_islands(grid: &Grid) -> Vec<Island> {
        let mut visited = VisitedSet::for_grid(grid);
        let mut islands: Vec<Island> = Vec::new();

        for cell in grid.raster() {
            if visited.contains(cell) || !is_foreground(grid[cell]) {
                continue;
            }

            let island = trace_island(grid, cell, &mut visited);
            debug!(
                "island {} seeded at ({}, {}): {} pixels, {} on perimeter",
                islands.len() + 1,
                cell.row,
                cell.col,
                island.len(),
                island.perimeter.len()
            );
            islands.push(island);
        }

        islands
    }

    /// Builds a grid from `rows` and finds its islands.
    /// Fails with `InvalidGrid` if the rows are not all the same length.
    pub fn try_find_islands<R: AsRef<[Intensity]>>(rows: &[R]) -> Result<Vec<Island>> {
        let grid = Grid::from_rows(rows)?;
        Ok(find_islands(&grid))
    }

    /// Grows one island from `seed`, marking every cell it claims in `visited`.
    fn trace_island(grid: &Grid, seed: Cell, visited: &mut VisitedSet) -> Island {
        let seed_value = grid[seed];
        let mut pixels: Vec<Cell> = Vec::new();
        let mut perimeter: Vec<Cell> = Vec::new();
        let mut stack: Vec<Cell> = vec![seed];

        while let Some(current) = stack.pop() {
            if !visited.insert(current) {
                continue;
            }
            pixels.push(current);

            let mut is_perimeter = false;
            for direction in Direction::ALL {
                let Some(next) = grid.neighbor(current, direction) else {
                    is_perimeter = true;
                    continue;
                };
                if visited.contains(next) {
                    continue;
                }

                let value = grid[next];
                if value != seed_value || value >= FOREGROUND_CEILING {
                    is_perimeter = true;
                } else {
                    stack.push(next);
                }
            }

            if is_perimeter {
                perimeter.push(current);
            }
        }

        Island { pixels, perimeter }
    }
}

#[cfg(test)]
mod tests {
    use super::island_finder::*;
    use super::*;
    use crate::error::IslandError;
    use std::collections::BTreeSet;

    fn cells(list: &[(usize, usize)]) -> BTreeSet<Cell> {
        list.iter().map(|&c| Cell::from(c)).collect()
    }

    fn set(list: &[Cell]) -> BTreeSet<Cell> {
        list.iter().copied().collect()
    }

    #[test]
    fn isolated_center_cell() {
        let islands = try_find_islands(&[[5, 5, 5], [5, 0, 5], [5, 5, 5]]).unwrap();
        assert_eq!(islands.len(), 1);
        assert_eq!(set(&islands[0].pixels), cells(&[(1, 1)]));
        assert_eq!(set(&islands[0].perimeter), cells(&[(1, 1)]));
    }

    #[test]
    fn full_block_is_all_perimeter() {
        let islands = try_find_islands(&[[0, 0], [0, 0]]).unwrap();
        assert_eq!(islands.len(), 1);
        let all = cells(&[(0, 0), (0, 1), (1, 0), (1, 1)]);
        assert_eq!(set(&islands[0].pixels), all);
        assert_eq!(set(&islands[0].perimeter), all);
    }

    #[test]
    fn two_islands_in_one_row() {
        let islands = try_find_islands(&[[0, 1, 1, 0, 0]]).unwrap();
        assert_eq!(islands.len(), 2);
        assert_eq!(set(&islands[0].pixels), cells(&[(0, 0)]));
        assert_eq!(set(&islands[0].perimeter), cells(&[(0, 0)]));
        assert_eq!(set(&islands[1].pixels), cells(&[(0, 3), (0, 4)]));
        assert_eq!(set(&islands[1].perimeter), cells(&[(0, 3), (0, 4)]));
    }

    #[test]
    fn interior_cells_are_not_perimeter() {
        let islands = try_find_islands(&[
            [9, 9, 9, 9, 9],
            [9, 0, 0, 0, 9],
            [9, 0, 0, 0, 9],
            [9, 0, 0, 0, 9],
            [9, 9, 9, 9, 9],
        ])
        .unwrap();
        assert_eq!(islands.len(), 1);
        assert_eq!(islands[0].len(), 9);
        assert_eq!(islands[0].perimeter.len(), 8);
        assert!(!islands[0].is_perimeter(Cell::new(2, 2)));
    }

    #[test]
    fn diagonal_cells_are_separate_islands() {
        let islands = try_find_islands(&[[0, 1], [1, 0]]).unwrap();
        assert_eq!(islands.len(), 2);
        assert_eq!(islands[0].seed(), Some(Cell::new(0, 0)));
        assert_eq!(islands[1].seed(), Some(Cell::new(1, 1)));
    }

    #[test]
    fn empty_and_background_grids_have_no_islands() {
        let empty: Vec<Vec<Intensity>> = Vec::new();
        assert!(try_find_islands(&empty).unwrap().is_empty());
        assert!(find_islands(&Grid::filled(4, 3, 200)).is_empty());
        assert!(find_islands(&Grid::filled(0, 3, 0)).is_empty());
    }

    #[test]
    fn ragged_rows_fail_fast() {
        let rows: Vec<Vec<Intensity>> = vec![vec![0, 0], vec![0]];
        assert!(matches!(
            try_find_islands(&rows),
            Err(IslandError::InvalidGrid { row: 1, .. })
        ));
    }

    #[test]
    fn visited_neighbour_of_earlier_island_is_not_a_boundary() {
        // The -1 ring is seeded first. When the 0 centre is traced all four of its
        // neighbours are already visited, so it is never classified as perimeter.
        let islands = try_find_islands(&[
            [5, 5, 5, 5, 5],
            [5, -1, -1, -1, 5],
            [5, -1, 0, -1, 5],
            [5, -1, -1, -1, 5],
            [5, 5, 5, 5, 5],
        ])
        .unwrap();

        assert_eq!(islands.len(), 2);
        assert_eq!(islands[0].len(), 8);
        assert_eq!(islands[0].perimeter.len(), 8);
        assert_eq!(set(&islands[1].pixels), cells(&[(2, 2)]));
        assert!(islands[1].perimeter.is_empty());
    }

    #[test]
    fn later_island_is_boundary_for_earlier_one() {
        // Mirror of the case above: the 0 cell is seeded first and sees the
        // unvisited -1 arm as a differing value.
        let islands = try_find_islands(&[[5, 5, 5, 5], [5, 0, -1, 5], [5, 5, -1, 5]]).unwrap();
        assert_eq!(islands.len(), 2);
        assert_eq!(set(&islands[0].perimeter), cells(&[(1, 1)]));
        // (1, 2) borders the already visited 0 cell on its left but still meets 5s.
        assert_eq!(set(&islands[1].perimeter), cells(&[(1, 2), (2, 2)]));
    }
}
