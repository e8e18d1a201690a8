#![forbid(unsafe_code)]
//! rbf_env: Seeded RBF obstacle fields and occupancy-grid environments for motion-planning benchmarks.
//!
//! Modules:
//! - field: Gaussian radial kernels and the seeded obstacle field summing them
//! - environment: domain parameters, point classification, and the cached occupancy raster
//! - batch: reproducible parallel generation of many environments from a base seed
//!
//! Rendering and file output are left to callers; see the `rbf_env_cli` crate.
pub mod batch;
pub mod environment;
pub mod error;
pub mod field;

/// Convenient re-exports for common types. Import with `use rbf_env::prelude::*;`.
pub mod prelude {
    pub use crate::batch::events::{BatchEvent, EventSink, FnSink, VecSink};
    pub use crate::batch::generator::{
        BatchConfig, BatchGenerator, BatchOutput, EnvironmentWriter,
    };
    pub use crate::batch::partition::{partition, seed_for_index};
    pub use crate::environment::descriptor::EnvironmentDescriptor;
    pub use crate::environment::grid::OccupancyGrid;
    pub use crate::environment::{AxisRange, EnvironmentConfig, PointCategory};
    pub use crate::error::{Error, Result};
    pub use crate::field::kernel::RadialKernel;
    pub use crate::field::obstacle::ObstacleField;
}
