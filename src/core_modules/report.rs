// THEORY:
// The report is the tabular half of the tool's output: one row per island with
// its 1-based number, its size and the coordinate listings of its pixels and its
// perimeter. CSV is the default because any spreadsheet opens it; JSON carries the
// same data plus each island's bounding box for programmatic consumers.

use crate::core_modules::grid::Cell;
use crate::core_modules::island::Island;
use crate::error::{IslandError, Result};
use clap::ValueEnum;
use serde::Serialize;
use std::fmt::Write as _;
use std::path::Path;

const CSV_HEADER: &str = "Island Number,Number of Pixels,Pixel Coordinates,Perimeter Coordinates";

/// Supported report encodings.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum ReportFormat {
    #[default]
    Csv,
    Json,
}

impl ReportFormat {
    /// File extension used for reports of this format.
    pub fn extension(self) -> &'static str {
        match self {
            ReportFormat::Csv => "csv",
            ReportFormat::Json => "json",
        }
    }
}

#[derive(Debug, Serialize)]
struct IslandRecord<'a> {
    island_number: usize,
    pixel_count: usize,
    bounding_box: Option<(Cell, Cell)>,
    pixels: &'a [Cell],
    perimeter: &'a [Cell],
}

/// Formats a coordinate listing as `(r, c); (r, c); ...`.
pub fn format_cells(cells: &[Cell]) -> String {
    let mut out = String::new();
    for (i, cell) in cells.iter().enumerate() {
        if i > 0 {
            out.push_str("; ");
        }
        let _ = write!(out, "({}, {})", cell.row, cell.col);
    }
    out
}

/// Renders the islands as CSV text, header included.
pub fn render_csv(islands: &[Island]) -> String {
    let mut csv = String::from(CSV_HEADER);
    csv.push('\n');
    for (idx, island) in islands.iter().enumerate() {
        // Listings contain commas, so they are always quoted.
        let _ = writeln!(
            csv,
            "{},{},\"{}\",\"{}\"",
            idx + 1,
            island.len(),
            format_cells(&island.pixels),
            format_cells(&island.perimeter)
        );
    }
    csv
}

/// Renders the islands as a pretty-printed JSON array.
pub fn render_json(islands: &[Island]) -> Result<String> {
    let records: Vec<IslandRecord> = islands
        .iter()
        .enumerate()
        .map(|(idx, island)| IslandRecord {
            island_number: idx + 1,
            pixel_count: island.len(),
            bounding_box: island.bounding_box(),
            pixels: &island.pixels,
            perimeter: &island.perimeter,
        })
        .collect();
    Ok(serde_json::to_string_pretty(&records)?)
}

/// Writes the report for `islands` to `path` in the requested format.
pub fn write_report(islands: &[Island], format: ReportFormat, path: &Path) -> Result<()> {
    let body = match format {
        ReportFormat::Csv => render_csv(islands),
        ReportFormat::Json => render_json(islands)?,
    };
    std::fs::write(path, body).map_err(|err| IslandError::io(path, err))
}
