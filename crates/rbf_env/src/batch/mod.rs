//! Batch generation of independent environments from a base seed.
//!
//! - [`partition`]: index chunking and `base_seed + index` seed derivation
//! - [`generator`]: [`generator::BatchGenerator`] and its per-index [`generator::BatchOutput`]
//! - [`events`]: observation hooks for batch runs
pub mod events;
pub mod generator;
pub mod partition;

pub use generator::{BatchConfig, BatchGenerator, BatchOutput, EnvironmentWriter};
