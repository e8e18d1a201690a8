//! Parallel, reproducible generation of environment batches.
//!
//! Environment `i` of a batch is always built with seed `base_seed + i`. The index range is split
//! into contiguous chunks ([`crate::batch::partition::partition`]), each handled by one scoped
//! worker thread that writes only its own slots of a pre-sized result vector. All workers are
//! joined before any slot is read, so results do not depend on worker count or scheduling.
use std::num::NonZeroUsize;

use tracing::{debug, info, warn};

use crate::batch::events::{BatchEvent, EventSink};
use crate::batch::partition::{chunk_size, partition, seed_for_index};
use crate::environment::descriptor::EnvironmentDescriptor;
use crate::environment::EnvironmentConfig;
use crate::error::{Error, Result};

/// Configuration for generating a batch of environments.
#[non_exhaustive]
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct BatchConfig {
    /// Parameters shared by every environment in the batch.
    pub environment: EnvironmentConfig,
    /// Seed of environment 0; environment `i` uses `base_seed + i`.
    pub base_seed: u64,
    /// Number of environments to generate.
    pub count: usize,
    /// Worker threads; `None` uses the available hardware parallelism.
    pub workers: Option<usize>,
    /// Compute each occupancy raster inside the worker instead of on first access.
    pub materialize_grids: bool,
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            environment: EnvironmentConfig::default(),
            base_seed: 1337,
            count: 100,
            workers: None,
            materialize_grids: true,
        }
    }
}

impl BatchConfig {
    /// Creates a new [`BatchConfig`] for the given environment parameters.
    pub fn new(environment: EnvironmentConfig) -> Self {
        Self {
            environment,
            ..Default::default()
        }
    }

    /// Sets the base seed.
    pub fn with_base_seed(mut self, base_seed: u64) -> Self {
        self.base_seed = base_seed;
        self
    }

    /// Sets the number of environments.
    pub fn with_count(mut self, count: usize) -> Self {
        self.count = count;
        self
    }

    /// Sets an explicit worker count.
    pub fn with_workers(mut self, workers: usize) -> Self {
        self.workers = Some(workers);
        self
    }

    /// Sets whether workers compute rasters eagerly.
    pub fn with_materialize_grids(mut self, materialize_grids: bool) -> Self {
        self.materialize_grids = materialize_grids;
        self
    }

    /// Worker count to use: the explicit setting, or the hardware parallelism (at least 1).
    pub fn resolved_workers(&self) -> usize {
        self.workers.unwrap_or_else(|| {
            std::thread::available_parallelism()
                .map(NonZeroUsize::get)
                .unwrap_or(1)
        })
    }

    /// Validates the configuration, returning an error if invalid.
    pub fn validate(&self) -> Result<()> {
        self.environment.validate()?;
        self.validate_layout()
    }

    /// Checks `count` and `workers` only; environment parameters are left to fail per index.
    pub fn validate_layout(&self) -> Result<()> {
        if self.count == 0 {
            return Err(Error::InvalidParameter("count must be >= 1".into()));
        }
        if self.workers == Some(0) {
            return Err(Error::InvalidParameter("workers must be >= 1".into()));
        }
        Ok(())
    }
}

/// Consumer of generated environments, e.g. an image renderer writing one file per index.
pub trait EnvironmentWriter {
    fn write(&mut self, index: usize, env: &EnvironmentDescriptor) -> Result<()>;
}

impl<F> EnvironmentWriter for F
where
    F: FnMut(usize, &EnvironmentDescriptor) -> Result<()>,
{
    fn write(&mut self, index: usize, env: &EnvironmentDescriptor) -> Result<()> {
        self(index, env)
    }
}

/// Per-index outcome of a batch run, in index order.
///
/// Every slot holds either an environment or the error that prevented building it; a failed
/// index never shows up as an empty or default environment.
#[derive(Debug)]
pub struct BatchOutput {
    slots: Vec<Result<EnvironmentDescriptor>>,
}

impl BatchOutput {
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Outcome for `index`, or `None` past the end of the batch.
    pub fn get(&self, index: usize) -> Option<std::result::Result<&EnvironmentDescriptor, &Error>> {
        self.slots.get(index).map(|s| s.as_ref())
    }

    pub fn iter(
        &self,
    ) -> impl Iterator<Item = (usize, std::result::Result<&EnvironmentDescriptor, &Error>)> + '_
    {
        self.slots.iter().map(|s| s.as_ref()).enumerate()
    }

    /// Successfully generated environments with their batch index.
    pub fn environments(&self) -> impl Iterator<Item = (usize, &EnvironmentDescriptor)> + '_ {
        self.slots
            .iter()
            .enumerate()
            .filter_map(|(i, s)| s.as_ref().ok().map(|env| (i, env)))
    }

    /// Failed indices with their errors.
    pub fn failures(&self) -> impl Iterator<Item = (usize, &Error)> + '_ {
        self.slots
            .iter()
            .enumerate()
            .filter_map(|(i, s)| s.as_ref().err().map(|e| (i, e)))
    }

    pub fn succeeded(&self) -> usize {
        self.slots.iter().filter(|s| s.is_ok()).count()
    }

    pub fn failed(&self) -> usize {
        self.len() - self.succeeded()
    }

    /// True if every index produced an environment.
    pub fn is_complete(&self) -> bool {
        self.slots.iter().all(Result::is_ok)
    }

    /// All environments, or the first failure in index order.
    pub fn into_environments(self) -> Result<Vec<EnvironmentDescriptor>> {
        self.slots.into_iter().collect()
    }

    pub fn into_results(self) -> Vec<Result<EnvironmentDescriptor>> {
        self.slots
    }

    /// Hands every successful environment, in index order, to `writer`. Returns the indices the
    /// writer failed on; generation failures are not repeated here.
    pub fn write_all<W>(&self, writer: &mut W) -> Vec<(usize, Error)>
    where
        W: EnvironmentWriter + ?Sized,
    {
        let mut failed = Vec::new();
        for (index, env) in self.environments() {
            if let Err(e) = writer.write(index, env) {
                warn!("Writing environment {} failed: {}.", index, e);
                failed.push((index, Error::at_index(index, e)));
            }
        }
        failed
    }
}

/// Builds batches of [`EnvironmentDescriptor`]s on a fixed pool of scoped worker threads.
#[derive(Debug, Clone)]
pub struct BatchGenerator {
    config: BatchConfig,
}

impl BatchGenerator {
    /// Validates `config` up front.
    pub fn try_new(config: BatchConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    /// Validates only the batch layout (`count`, `workers`); invalid environment parameters then
    /// fail at every index.
    pub fn new(config: BatchConfig) -> Result<Self> {
        config.validate_layout()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &BatchConfig {
        &self.config
    }

    /// Generates the batch.
    pub fn generate(&self) -> BatchOutput {
        self.generate_with_events(&mut ())
    }

    /// Generates the batch, reporting progress to `sink` on the calling thread.
    pub fn generate_with_events(&self, sink: &mut dyn EventSink) -> BatchOutput {
        let environment = &self.config.environment;
        let base_seed = self.config.base_seed;
        let materialize = self.config.materialize_grids;
        self.run(sink, |index| {
            build_environment(environment, base_seed, index, materialize)
        })
    }

    fn run<F>(&self, sink: &mut dyn EventSink, build: F) -> BatchOutput
    where
        F: Fn(usize) -> Result<EnvironmentDescriptor> + Sync,
    {
        let count = self.config.count;
        let base_seed = self.config.base_seed;
        let requested = self.config.resolved_workers();
        let chunk = chunk_size(count, requested);
        let ranges = partition(count, requested);
        let workers = ranges.len();

        info!(
            "Generating {} environments on {} workers ({} per worker), base seed {}.",
            count, workers, chunk, base_seed
        );
        sink.send(BatchEvent::BatchStarted {
            count,
            workers,
            chunk_size: chunk,
            base_seed,
        });

        let mut slots: Vec<Option<Result<EnvironmentDescriptor>>> =
            (0..count).map(|_| None).collect();
        let build = &build;

        std::thread::scope(|s| {
            let mut rest = slots.as_mut_slice();
            let mut handles = Vec::with_capacity(workers);
            for range in ranges {
                let (own, tail) = std::mem::take(&mut rest).split_at_mut(range.len());
                rest = tail;
                handles.push(s.spawn(move || build_chunk(range.start, own, build)));
            }

            for (worker, handle) in handles.into_iter().enumerate() {
                if handle.join().is_err() {
                    warn!("Worker {} panicked; its unfinished slots are marked lost.", worker);
                }
            }
        });

        let output = BatchOutput {
            slots: finish_slots(slots),
        };

        for (index, outcome) in output.iter() {
            match outcome {
                Ok(env) => sink.send(BatchEvent::EnvironmentGenerated {
                    index,
                    seed: env.seed(),
                    occupied_cells: env
                        .is_grid_ready()
                        .then(|| env.grid().occupied_count()),
                }),
                Err(e) => {
                    warn!("Environment {} failed: {}.", index, e);
                    sink.send(BatchEvent::EnvironmentFailed {
                        index,
                        message: e.to_string(),
                    });
                }
            }
        }

        let succeeded = output.succeeded();
        let failed = output.failed();
        info!("Batch finished: {} generated, {} failed.", succeeded, failed);
        sink.send(BatchEvent::BatchFinished { succeeded, failed });

        output
    }
}

fn build_chunk<F>(start: usize, slots: &mut [Option<Result<EnvironmentDescriptor>>], build: &F)
where
    F: Fn(usize) -> Result<EnvironmentDescriptor>,
{
    debug!(
        "Worker building environments {}..{}.",
        start,
        start + slots.len()
    );
    for (offset, slot) in slots.iter_mut().enumerate() {
        let index = start + offset;
        *slot = Some(build(index).map_err(|e| Error::at_index(index, e)));
    }
}

fn build_environment(
    environment: &EnvironmentConfig,
    base_seed: u64,
    index: usize,
    materialize: bool,
) -> Result<EnvironmentDescriptor> {
    let seed = seed_for_index(base_seed, index)?;
    let env = EnvironmentDescriptor::new(environment.clone(), Some(seed))?;
    if materialize {
        env.grid();
    }
    Ok(env)
}

/// Turns slots a worker never reached into explicit [`Error::WorkerLost`] entries.
fn finish_slots(
    slots: Vec<Option<Result<EnvironmentDescriptor>>>,
) -> Vec<Result<EnvironmentDescriptor>> {
    slots
        .into_iter()
        .enumerate()
        .map(|(index, slot)| slot.unwrap_or(Err(Error::WorkerLost { index })))
        .collect()
}
