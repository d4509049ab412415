use crate::error::{IslandError, Result};
use crate::pipeline::{IslandPipeline, OutputPaths, PipelineConfig, Summary};
use futures::future::join_all;
use log::debug;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::Semaphore;

/// Processes several input files concurrently.
///
/// Each input is handled start to finish by one blocking worker, so a single
/// island search never runs on more than one thread. At most `jobs` inputs are in
/// flight at once, and results come back in input order. An input whose output
/// files were already claimed by an earlier input fails with `OutputCollision`
/// instead of overwriting them.
pub struct ParallelPipeline {
    pipeline: Arc<IslandPipeline>,
    permits: Arc<Semaphore>,
}

impl ParallelPipeline {
    pub fn new(config: PipelineConfig) -> Self {
        let jobs = config.jobs.max(1);
        Self {
            pipeline: Arc::new(IslandPipeline::new(config)),
            permits: Arc::new(Semaphore::new(jobs)),
        }
    }

    pub fn config(&self) -> &PipelineConfig {
        self.pipeline.config()
    }

    pub fn outputs_for(&self, input: &Path) -> OutputPaths {
        self.pipeline.outputs_for(input)
    }

    /// Output paths for every input, in order. Fails on the first input whose
    /// outputs clash with an earlier one.
    pub fn check_outputs(&self, inputs: &[PathBuf]) -> Result<Vec<OutputPaths>> {
        self.assign_outputs(inputs).into_iter().collect()
    }

    fn assign_outputs(&self, inputs: &[PathBuf]) -> Vec<Result<OutputPaths>> {
        let mut claimed: HashMap<PathBuf, PathBuf> = HashMap::new();
        inputs
            .iter()
            .map(|input| {
                let outputs = self.outputs_for(input);
                for path in [&outputs.image, &outputs.report] {
                    if let Some(earlier) = claimed.get(path) {
                        return Err(IslandError::OutputCollision {
                            input: input.clone(),
                            earlier: earlier.clone(),
                            path: path.clone(),
                        });
                    }
                }
                claimed.insert(outputs.image.clone(), input.clone());
                claimed.insert(outputs.report.clone(), input.clone());
                Ok(outputs)
            })
            .collect()
    }

    pub async fn process_all(&self, inputs: &[PathBuf]) -> Vec<Result<Summary>> {
        let assigned = self.assign_outputs(inputs);
        let tasks = inputs.iter().cloned().zip(assigned).enumerate().map(|(task_idx, (input, outputs))| {
            let pipeline = Arc::clone(&self.pipeline);
            let permits = Arc::clone(&self.permits);

            tokio::spawn(async move {
                outputs?;
                let _permit = permits
                    .acquire_owned()
                    .await
                    .map_err(|err| IslandError::WorkerFailed(err.to_string()))?;
                debug!("task {task_idx} picked up {}", input.display());

                tokio::task::spawn_blocking(move || pipeline.process(&input))
                    .await
                    .map_err(|err| IslandError::WorkerFailed(err.to_string()))?
            })
        });

        join_all(tasks)
            .await
            .into_iter()
            .map(|joined| joined.unwrap_or_else(|err| Err(IslandError::WorkerFailed(err.to_string()))))
            .collect()
    }
}
