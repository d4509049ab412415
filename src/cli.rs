use crate::core_modules::report::ReportFormat;
use crate::error::{IslandError, Result};
use crate::pipeline::PipelineConfig;
use clap::Parser;
use image::Rgb;
use std::collections::HashSet;
use std::io::{BufRead, Write};
use std::path::{Path, PathBuf};

/// Find pixel islands in image files (BMP, TIFF, PNG, JPEG, ...).
#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Image files to scan.
    #[arg(required = true)]
    pub inputs: Vec<PathBuf>,

    /// Directory for the highlighted image and the report.
    #[arg(short, long, default_value = ".")]
    pub output_dir: PathBuf,

    /// Report encoding.
    #[arg(short, long, value_enum, default_value_t = ReportFormat::Csv)]
    pub format: ReportFormat,

    /// Highlight colour as R,G,B.
    #[arg(long, value_parser = parse_color, default_value = "255,0,0")]
    pub highlight: Rgb<u8>,

    /// Overwrite existing output files without asking.
    #[arg(short = 'y', long, default_value_t = false)]
    pub yes: bool,

    /// Number of files processed at once. Defaults to the number of CPUs.
    #[arg(short, long)]
    pub jobs: Option<usize>,

    /// Log each island as it is found.
    #[arg(short, long, default_value_t = false)]
    pub verbose: bool,
}

impl Cli {
    pub fn pipeline_config(&self) -> PipelineConfig {
        PipelineConfig {
            output_dir: self.output_dir.clone(),
            report_format: self.format,
            highlight: self.highlight,
            assume_yes: self.yes,
            jobs: self.jobs.unwrap_or_else(num_cpus::get),
        }
    }
}

/// Parses `R,G,B` with each channel in 0..=255.
pub fn parse_color(text: &str) -> std::result::Result<Rgb<u8>, String> {
    let channels: Vec<&str> = text.split(',').map(str::trim).collect();
    let [r, g, b] = channels[..] else {
        return Err(format!("expected R,G,B but got `{text}`"));
    };
    let channel = |c: &str| {
        c.parse::<u8>()
            .map_err(|err| format!("bad colour channel `{c}`: {err}"))
    };
    Ok(Rgb([channel(r)?, channel(g)?, channel(b)?]))
}

/// Asks whether `path` may be overwritten. Only `y` or `Y` counts as yes.
pub fn confirm_overwrite<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
    path: &Path,
) -> Result<bool> {
    write!(
        output,
        "{} already exists. Do you want to overwrite it? (y/n): ",
        path.display()
    )
    .and_then(|_| output.flush())
    .map_err(|err| IslandError::io("<stdout>", err))?;

    let mut answer = String::new();
    input
        .read_line(&mut answer)
        .map_err(|err| IslandError::io("<stdin>", err))?;
    Ok(answer.trim().eq_ignore_ascii_case("y"))
}

/// Confirms every distinct path in turn, stopping at the first refusal.
pub fn confirm_outputs<R: BufRead, W: Write>(
    paths: &[PathBuf],
    input: &mut R,
    output: &mut W,
) -> Result<()> {
    let mut asked: HashSet<&Path> = HashSet::new();
    for path in paths {
        if !asked.insert(path.as_path()) {
            continue;
        }
        if !confirm_overwrite(input, output, path)? {
            return Err(IslandError::OverwriteDeclined(path.clone()));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn colour_parsing() {
        assert_eq!(parse_color("0, 128,255"), Ok(Rgb([0, 128, 255])));
        assert!(parse_color("1,2").is_err());
        assert!(parse_color("1,2,300").is_err());
    }

    #[test]
    fn only_y_confirms() {
        let path = Path::new("scan_islands.png");
        for (answer, expected) in [("y\n", true), ("Y\n", true), ("n\n", false), ("yes\n", false), ("", false)] {
            let mut input = Cursor::new(answer.as_bytes());
            let mut output = Vec::new();
            assert_eq!(confirm_overwrite(&mut input, &mut output, path).unwrap(), expected);
            let prompt = String::from_utf8(output).unwrap();
            assert!(prompt.starts_with("scan_islands.png already exists."));
        }
    }

    #[test]
    fn first_refusal_stops_confirmation() {
        let paths = vec![PathBuf::from("a_islands.png"), PathBuf::from("a_islands.csv")];
        let mut input = Cursor::new(b"n\ny\n".as_slice());
        let mut output = Vec::new();
        match confirm_outputs(&paths, &mut input, &mut output) {
            Err(IslandError::OverwriteDeclined(path)) => assert_eq!(path, paths[0]),
            other => panic!("expected OverwriteDeclined, got {other:?}"),
        }
    }

    #[test]
    fn repeated_paths_are_asked_once() {
        let paths = vec![PathBuf::from("scan_islands.png"), PathBuf::from("scan_islands.png")];
        let mut input = Cursor::new(b"y\n".as_slice());
        let mut output = Vec::new();
        confirm_outputs(&paths, &mut input, &mut output).unwrap();
        let prompts = String::from_utf8(output).unwrap();
        assert_eq!(prompts.matches("already exists").count(), 1);
    }

    #[test]
    fn cli_maps_to_config() {
        let cli = Cli::parse_from(["pixel_islands", "a.png", "b.bmp", "-f", "json", "-j", "3", "--highlight", "0,255,0", "-y"]);
        let config = cli.pipeline_config();
        assert_eq!(cli.inputs.len(), 2);
        assert_eq!(config.report_format, ReportFormat::Json);
        assert_eq!(config.jobs, 3);
        assert_eq!(config.highlight, Rgb([0, 255, 0]));
        assert!(config.assume_yes);
    }
}
