// THEORY:
// An `Island` is the output record of the spatial analysis: one maximal,
// 4-connected group of foreground cells that share a value, plus the subset of
// those cells that sit on the island's boundary.
//
// Key architectural principles:
// 1.  **Dumb data container**: like a detected blob, an `Island` is produced once by
//     the finder and never changes afterwards. Derived properties (size, bounding
//     box) are computed on demand from `pixels`.
// 2.  **Order is incidental**: `pixels` keeps traversal discovery order and
//     `perimeter` keeps classification order. Only membership is meaningful, so
//     consumers should compare them as sets.
// 3.  **Seed first**: the first entry of `pixels` is always the raster-first cell of
//     the island, because the raster scan is what seeds each traversal.

use crate::core_modules::grid::Cell;

/// One maximal 4-connected foreground component.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Island {
    /// Every cell of the component, in discovery order.
    pub pixels: Vec<Cell>,
    /// The cells of `pixels` that touch the grid border or a differing value.
    pub perimeter: Vec<Cell>,
}

impl Island {
    /// Number of cells in the island.
    pub fn len(&self) -> usize {
        self.pixels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pixels.is_empty()
    }

    /// The raster-first cell, which seeded the traversal.
    pub fn seed(&self) -> Option<Cell> {
        self.pixels.first().copied()
    }

    pub fn contains(&self, cell: Cell) -> bool {
        self.pixels.contains(&cell)
    }

    pub fn is_perimeter(&self, cell: Cell) -> bool {
        self.perimeter.contains(&cell)
    }

    /// Top-left and bottom-right corners of the smallest box enclosing the island.
    pub fn bounding_box(&self) -> Option<(Cell, Cell)> {
        let first = self.seed()?;
        let (mut min, mut max) = (first, first);
        for cell in &self.pixels {
            min.row = min.row.min(cell.row);
            min.col = min.col.min(cell.col);
            max.row = max.row.max(cell.row);
            max.col = max.col.max(cell.col);
        }
        Some((min, max))
    }
}
