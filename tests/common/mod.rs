// Shared helpers for the integration tests.

#![allow(dead_code)]

use pixel_islands::{Cell, Grid, Intensity};
use std::collections::BTreeSet;
use std::path::PathBuf;

/// Deterministic pseudo-random grid with values drawn from `palette`.
pub fn noise_grid(width: usize, height: usize, palette: &[Intensity], seed: u64) -> Grid {
    let mut state = seed.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407);
    let rows: Vec<Vec<Intensity>> = (0..height)
        .map(|_| {
            (0..width)
                .map(|_| {
                    state = state.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407);
                    palette[((state >> 33) as usize) % palette.len()]
                })
                .collect()
        })
        .collect();
    Grid::from_rows(&rows).expect("noise rows are rectangular")
}

pub fn cell_set(cells: &[Cell]) -> BTreeSet<Cell> {
    cells.iter().copied().collect()
}

/// A unique scratch directory under the system temp dir.
pub fn scratch_dir(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("pixel_islands_{}_{name}", std::process::id()));
    std::fs::create_dir_all(&dir).expect("create scratch dir");
    dir
}
