use crate::core_modules::grid::{Cell, Grid};

/// Tracks which cells have already been assigned to an island during one scan.
/// A cell moves from unvisited to visited exactly once and never back.
pub(crate) struct VisitedSet {
    width: usize,
    height: usize,
    flags: Vec<bool>,
}

impl VisitedSet {
    /// An empty set sized for `grid`.
    pub(crate) fn for_grid(grid: &Grid) -> Self {
        Self {
            width: grid.width(),
            height: grid.height(),
            flags: vec![false; grid.width() * grid.height()],
        }
    }

    pub(crate) fn contains(&self, cell: Cell) -> bool {
        self.flags[self.index_of(cell)]
    }

    /// Marks `cell` as visited. Returns false if it already was.
    pub(crate) fn insert(&mut self, cell: Cell) -> bool {
        let index = self.index_of(cell);
        !std::mem::replace(&mut self.flags[index], true)
    }

    fn index_of(&self, cell: Cell) -> usize {
        // A column past the width would otherwise alias a cell on the next row.
        assert!(
            cell.row < self.height && cell.col < self.width,
            "cell {cell:?} outside {}x{} visited set",
            self.width,
            self.height
        );
        cell.row * self.width + cell.col
    }
}

#[cfg(test)]
impl VisitedSet {
    fn len(&self) -> usize {
        self.flags.iter().filter(|&&f| f).count()
    }
}
