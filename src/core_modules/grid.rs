// THEORY:
// The `Grid` is the passive input of the island finder: a rectangular block of
// integer intensities stored flat in row-major order. It knows nothing about
// islands. Its only jobs are to guarantee the rectangular invariant at
// construction time and to answer bounds-checked questions about cells and their
// four axis-aligned neighbours.
//
// Key architectural principles:
// 1.  **Rectangular by construction**: `from_rows` rejects ragged input with
//     `InvalidGrid`, so every later bounds check can rely on a single width.
// 2.  **Value agnostic**: cells are plain `Intensity` values. Images supply 0-255,
//     but any integer is accepted; "foreground" is decided by `is_foreground`.
// 3.  **Read-only**: once built, a grid is never mutated, so it can be shared
//     freely between threads.

use crate::error::{IslandError, Result};
use image::GrayImage;
use serde::Serialize;
use std::ops::Index;

/// The value stored in a single grid cell.
pub type Intensity = i32;

/// Cells with a value strictly below this ceiling are foreground.
/// For 8-bit images that means exactly the value 0.
pub const FOREGROUND_CEILING: Intensity = 1;

/// Returns true if a cell with this value can belong to an island.
#[inline]
pub fn is_foreground(value: Intensity) -> bool {
    value < FOREGROUND_CEILING
}

/// A `(row, col)` coordinate on the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct Cell {
    pub row: usize,
    pub col: usize,
}

impl Cell {
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }
}

impl From<(usize, usize)> for Cell {
    fn from((row, col): (usize, usize)) -> Self {
        Cell { row, col }
    }
}

/// The four axis-aligned neighbour directions. Diagonals are never considered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// Neighbour examination order used by the traversal.
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];

    fn offset(self) -> (isize, isize) {
        match self {
            Direction::Up => (-1, 0),
            Direction::Down => (1, 0),
            Direction::Left => (0, -1),
            Direction::Right => (0, 1),
        }
    }
}

/// A rectangular, immutable 2-D block of intensities.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    width: usize,
    height: usize,
    /// Row-major cell values, `width * height` long.
    cells: Vec<Intensity>,
}

impl Grid {
    /// Builds a grid from a slice of rows. Every row must have the length of the first.
    pub fn from_rows<R: AsRef<[Intensity]>>(rows: &[R]) -> Result<Self> {
        let height = rows.len();
        let width = rows.first().map_or(0, |row| row.as_ref().len());
        let mut cells = Vec::with_capacity(width * height);

        for (row, values) in rows.iter().enumerate() {
            let values = values.as_ref();
            if values.len() != width {
                return Err(IslandError::InvalidGrid {
                    row,
                    expected: width,
                    found: values.len(),
                });
            }
            cells.extend_from_slice(values);
        }

        Ok(Self {
            width,
            height,
            cells,
        })
    }

    /// Creates a `width` x `height` grid where every cell holds `value`.
    pub fn filled(width: usize, height: usize, value: Intensity) -> Self {
        Self {
            width,
            height,
            cells: vec![value; width * height],
        }
    }

    /// Converts an 8-bit grayscale image into a grid. Image `y` becomes the row.
    pub fn from_luma(image: &GrayImage) -> Self {
        Self {
            width: image.width() as usize,
            height: image.height() as usize,
            cells: image.as_raw().iter().map(|&v| Intensity::from(v)).collect(),
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn contains(&self, cell: Cell) -> bool {
        cell.row < self.height && cell.col < self.width
    }

    /// Bounds-checked access to a cell value.
    pub fn get(&self, cell: Cell) -> Option<Intensity> {
        if self.contains(cell) {
            Some(self.cells[self.index_of(cell)])
        } else {
            None
        }
    }

    /// The neighbour of `cell` in `direction`, or `None` when it falls off the grid.
    pub fn neighbor(&self, cell: Cell, direction: Direction) -> Option<Cell> {
        let (dr, dc) = direction.offset();
        let row = cell.row.checked_add_signed(dr)?;
        let col = cell.col.checked_add_signed(dc)?;
        let next = Cell { row, col };
        self.contains(next).then_some(next)
    }

    /// Every cell in raster order: row by row, left to right.
    pub fn raster(&self) -> impl Iterator<Item = Cell> + '_ {
        (0..self.height).flat_map(move |row| (0..self.width).map(move |col| Cell { row, col }))
    }

    pub(crate) fn index_of(&self, cell: Cell) -> usize {
        cell.row * self.width + cell.col
    }
}

impl Index<Cell> for Grid {
    type Output = Intensity;

    fn index(&self, cell: Cell) -> &Intensity {
        assert!(self.contains(cell), "cell {cell:?} outside {}x{} grid", self.width, self.height);
        &self.cells[self.index_of(cell)]
    }
}
