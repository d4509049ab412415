pub mod grid;
pub mod island;
pub mod island_finder;
pub mod report;
pub mod utils;
pub(crate) mod visited;
