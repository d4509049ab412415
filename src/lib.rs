// THEORY:
// This file is the entry point for the `pixel_islands` library crate. The public
// API is the `pipeline` (one image file in, highlighted image and report out) and
// its concurrent sibling `parallel_pipeline`. The island finding engine lives in
// `core_modules` and can also be driven directly with an in-memory `Grid`.

pub mod cli;
pub mod core_modules;
pub mod error;
pub mod parallel_pipeline;
pub mod pipeline;

pub use core_modules::grid::{Cell, Grid, Intensity};
pub use core_modules::island::Island;
pub use core_modules::island_finder::island_finder::{find_islands, try_find_islands};
pub use error::IslandError;
