// THEORY:
// The `pipeline` module is the top-level API of the crate. It wires the stages
// together for one input file: decode the image into a grid, find the islands,
// paint them onto a copy of the image and write the report. Callers get back a
// `Summary` describing what was found and where it was written.

use crate::core_modules::grid::Grid;
use crate::core_modules::island_finder::island_finder;
use crate::core_modules::report::write_report;
use crate::core_modules::utils::image_helper::image_helper;
use crate::error::Result;
use image::Rgb;
use log::info;
use std::path::{Path, PathBuf};

// Re-export key data structures for the public API.
pub use crate::core_modules::grid::Cell;
pub use crate::core_modules::island::Island;
pub use crate::core_modules::report::ReportFormat;

const OUTPUT_SUFFIX: &str = "_islands";
const IMAGE_EXTENSION: &str = "png";

/// Configuration for the IslandPipeline.
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    /// Directory the highlighted image and the report are written to.
    pub output_dir: PathBuf,
    pub report_format: ReportFormat,
    /// Colour used to paint island pixels in the output image.
    pub highlight: Rgb<u8>,
    /// Overwrite existing outputs without asking.
    pub assume_yes: bool,
    /// Maximum number of inputs processed at once by the parallel pipeline.
    pub jobs: usize,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("."),
            report_format: ReportFormat::default(),
            highlight: image_helper::DEFAULT_HIGHLIGHT,
            assume_yes: false,
            jobs: num_cpus::get(),
        }
    }
}

/// Where the outputs for one input file go.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputPaths {
    pub image: PathBuf,
    pub report: PathBuf,
}

impl OutputPaths {
    /// `<output_dir>/<stem>_islands.png` and `<output_dir>/<stem>_islands.<report ext>`.
    pub fn derive(input: &Path, config: &PipelineConfig) -> Self {
        let stem = input
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();
        let base = format!("{stem}{OUTPUT_SUFFIX}");

        Self {
            image: config.output_dir.join(format!("{base}.{IMAGE_EXTENSION}")),
            report: config
                .output_dir
                .join(format!("{base}.{}", config.report_format.extension())),
        }
    }

    /// The output paths that already exist on disk.
    pub fn existing(&self) -> Vec<PathBuf> {
        [&self.image, &self.report]
            .into_iter()
            .filter(|path| path.exists())
            .cloned()
            .collect()
    }
}

/// The result of running the pipeline on one input.
#[derive(Debug, Clone)]
pub struct Summary {
    pub input: PathBuf,
    pub islands: Vec<Island>,
    pub outputs: OutputPaths,
}

impl Summary {
    pub fn island_count(&self) -> usize {
        self.islands.len()
    }
}

/// Runs load, find, render and report for single input files.
pub struct IslandPipeline {
    config: PipelineConfig,
}

impl IslandPipeline {
    pub fn new(config: PipelineConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    pub fn outputs_for(&self, input: &Path) -> OutputPaths {
        OutputPaths::derive(input, &self.config)
    }

    /// Finds the islands of an already loaded grid. No I/O is performed.
    pub fn analyze(&self, grid: &Grid) -> Vec<Island> {
        island_finder::find_islands(grid)
    }

    /// Processes one image file end to end.
    pub fn process(&self, input: &Path) -> Result<Summary> {
        let outputs = self.outputs_for(input);

        // Stage 1: Decode
        let (image, grid) = image_helper::load_grid(input)?;

        // Stage 2: Island finding
        let islands = self.analyze(&grid);
        info!("{}: found {} islands", input.display(), islands.len());

        // Stage 3: Highlighted copy
        let canvas = image_helper::render_islands(&image, &islands, self.config.highlight);
        image_helper::save_png(&canvas, &outputs.image)?;

        // Stage 4: Report
        write_report(&islands, self.config.report_format, &outputs.report)?;
        info!(
            "{}: wrote {} and {}",
            input.display(),
            outputs.image.display(),
            outputs.report.display()
        );

        Ok(Summary {
            input: input.to_path_buf(),
            islands,
            outputs,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn output_paths_use_the_input_stem() {
        let config = PipelineConfig {
            output_dir: PathBuf::from("out"),
            ..Default::default()
        };
        let paths = OutputPaths::derive(Path::new("/data/scans/wafer.tiff"), &config);
        assert_eq!(paths.image, Path::new("out/wafer_islands.png"));
        assert_eq!(paths.report, Path::new("out/wafer_islands.csv"));
    }

    #[test]
    fn report_extension_follows_format() {
        let config = PipelineConfig {
            report_format: ReportFormat::Json,
            ..Default::default()
        };
        let paths = OutputPaths::derive(Path::new("a.b.bmp"), &config);
        assert_eq!(paths.image, Path::new("./a.b_islands.png"));
        assert_eq!(paths.report, Path::new("./a.b_islands.json"));
    }

    #[test]
    fn missing_outputs_are_not_existing() {
        let config = PipelineConfig {
            output_dir: std::env::temp_dir().join("pixel_islands_never_created"),
            ..Default::default()
        };
        assert!(OutputPaths::derive(Path::new("x.png"), &config).existing().is_empty());
    }

    #[test]
    fn default_config_is_usable() {
        let config = PipelineConfig::default();
        assert!(config.jobs >= 1);
        assert_eq!(config.highlight, Rgb([255, 0, 0]));
        assert!(!config.assume_yes);
    }
}
