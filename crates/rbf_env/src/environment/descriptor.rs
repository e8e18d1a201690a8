//! Environment descriptor: classifies points and materializes the occupancy raster.
use std::sync::OnceLock;

use glam::DVec2;
use tracing::{debug, trace};

use crate::environment::grid::OccupancyGrid;
use crate::environment::{AxisRange, EnvironmentConfig, PointCategory};
use crate::error::{Error, Result};
use crate::field::obstacle::ObstacleField;

/// One generated environment: immutable parameters, its obstacle field, and a lazily computed
/// occupancy raster.
///
/// The raster is computed at most once, on first call to [`EnvironmentDescriptor::grid`], and is
/// safe to request from several threads at the same time.
#[derive(Debug)]
pub struct EnvironmentDescriptor {
    config: EnvironmentConfig,
    field: ObstacleField,
    grid: OnceLock<OccupancyGrid>,
}

impl EnvironmentDescriptor {
    /// Validates `config` and builds the obstacle field from `seed` (`None` = entropy).
    pub fn new(config: EnvironmentConfig, seed: Option<u64>) -> Result<Self> {
        config.validate()?;
        let field = ObstacleField::new(
            config.obstacle_count,
            config.obstacle_range,
            seed,
            config.gamma,
        )?;
        debug!(
            "Environment: seed {}, resolution {}, eta {}.",
            field.seed(),
            config.grid_resolution,
            config.eta
        );
        Ok(Self {
            config,
            field,
            grid: OnceLock::new(),
        })
    }

    /// Classifies `point`. First match wins: start, end, out of range, obstacle, free.
    pub fn classify(&self, point: DVec2) -> PointCategory {
        let cfg = &self.config;
        if point == cfg.start_point {
            PointCategory::Start
        } else if point == cfg.end_point {
            PointCategory::End
        } else if !cfg.domain_range.contains(point.x) || !cfg.domain_range.contains(point.y) {
            PointCategory::OutOfRange
        } else if self.field.potential(point) > cfg.eta {
            PointCategory::Obstacle
        } else {
            PointCategory::Free
        }
    }

    /// Occupancy raster, computed on first access and reused thereafter.
    pub fn grid(&self) -> &OccupancyGrid {
        self.grid.get_or_init(|| self.rasterize())
    }

    /// Whether the raster has already been computed.
    pub fn is_grid_ready(&self) -> bool {
        self.grid.get().is_some()
    }

    fn rasterize(&self) -> OccupancyGrid {
        let n = self.config.grid_resolution;
        let xs = self.config.domain_range.linspace(n);
        let ys = self.config.domain_range.linspace(n);

        let mut data = Vec::with_capacity(n * n);
        for &y in &ys {
            for &x in &xs {
                data.push(self.classify(DVec2::new(x, y)).occupancy());
            }
        }

        let grid = OccupancyGrid::from_cells(n, data);
        trace!(
            "Rasterized {}x{} grid, {} occupied cells.",
            n,
            n,
            grid.occupied_count()
        );
        grid
    }

    /// Occupancy potential of the underlying field at `point`.
    pub fn potential(&self, point: DVec2) -> f64 {
        self.field.potential(point)
    }

    pub fn start_point(&self) -> DVec2 {
        self.config.start_point
    }

    pub fn end_point(&self) -> DVec2 {
        self.config.end_point
    }

    pub fn domain_range(&self) -> AxisRange {
        self.config.domain_range
    }

    pub fn config(&self) -> &EnvironmentConfig {
        &self.config
    }

    pub fn obstacle_field(&self) -> &ObstacleField {
        &self.field
    }

    /// Effective seed of the obstacle field.
    pub fn seed(&self) -> u64 {
        self.field.seed()
    }
}

impl TryFrom<(EnvironmentConfig, u64)> for EnvironmentDescriptor {
    type Error = Error;

    fn try_from((config, seed): (EnvironmentConfig, u64)) -> Result<Self> {
        Self::new(config, Some(seed))
    }
}
