use anyhow::{Context, bail};
use clap::Parser;
use log::{error, info};
use pixel_islands::IslandError;
use pixel_islands::cli::{Cli, confirm_outputs};
use pixel_islands::parallel_pipeline::ParallelPipeline;
use pixel_islands::pipeline::OutputPaths;
use std::io;
use std::path::PathBuf;

fn init_log(verbose: bool) {
    let my_code_level = if verbose {
        log::LevelFilter::Debug
    } else if cfg!(debug_assertions) {
        log::LevelFilter::Info
    } else {
        log::LevelFilter::Warn
    };

    env_logger::Builder::new()
        .filter(None, log::LevelFilter::Warn)
        .filter(Some("pixel_islands"), my_code_level)
        .parse_default_env()
        .init();
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_log(cli.verbose);

    let pipeline = ParallelPipeline::new(cli.pipeline_config());

    // Two inputs sharing a stem would write the same files; refuse before any work.
    let planned = pipeline
        .check_outputs(&cli.inputs)
        .context("inputs would overwrite each other's outputs")?;

    // Ask about every existing file up front so no work is done if the user backs out.
    if !pipeline.config().assume_yes {
        let existing: Vec<PathBuf> = planned.iter().flat_map(OutputPaths::existing).collect();

        match confirm_outputs(&existing, &mut io::stdin().lock(), &mut io::stdout()) {
            Ok(()) => {}
            Err(IslandError::OverwriteDeclined(path)) => {
                info!("overwrite of {} declined", path.display());
                println!("Operation cancelled.");
                return Ok(());
            }
            Err(err) => return Err(err).context("failed to confirm overwrite"),
        }
    }

    let results = pipeline.process_all(&cli.inputs).await;

    let mut failures = 0;
    for (input, result) in cli.inputs.iter().zip(results) {
        match result {
            Ok(summary) => {
                if cli.inputs.len() > 1 {
                    println!("{}:", input.display());
                }
                println!("Found {} islands", summary.island_count());
                println!("Output image saved to {}", summary.outputs.image.display());
                println!("Output report saved to {}", summary.outputs.report.display());
            }
            Err(err) => {
                error!("{}: {err}", input.display());
                failures += 1;
            }
        }
    }

    if failures > 0 {
        bail!("{failures} of {} inputs failed", cli.inputs.len());
    }
    Ok(())
}
