//! Environment parameters, point categories, and the environment descriptor.
//!
//! An environment is a square domain `domain_range × domain_range` with a start point, an end
//! point, and an [`crate::field::ObstacleField`] thresholded at `eta`. See
//! [`descriptor::EnvironmentDescriptor`] for classification and rasterization.
use glam::DVec2;

use crate::error::{Error, Result};

pub mod descriptor;
pub mod grid;

pub use descriptor::EnvironmentDescriptor;
pub use grid::OccupancyGrid;

/// Closed interval `[min, max]` shared by both axes of a square domain.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AxisRange {
    pub min: f64,
    pub max: f64,
}

impl AxisRange {
    pub fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    /// Inclusive containment.
    #[inline]
    pub fn contains(&self, v: f64) -> bool {
        v >= self.min && v <= self.max
    }

    pub fn span(&self) -> f64 {
        self.max - self.min
    }

    /// `n` evenly spaced samples from `min` to `max`, both endpoints included exactly.
    pub fn linspace(&self, n: usize) -> Vec<f64> {
        match n {
            0 => Vec::new(),
            1 => vec![self.min],
            _ => {
                let step = self.span() / (n - 1) as f64;
                let mut out: Vec<f64> = (0..n).map(|i| i as f64 * step + self.min).collect();
                out[n - 1] = self.max;
                out
            }
        }
    }

    /// Requires finite bounds with `min < max`.
    pub fn validate(&self, name: &str) -> Result<()> {
        if !self.min.is_finite() || !self.max.is_finite() {
            return Err(Error::InvalidParameter(format!(
                "{name} bounds must be finite, got ({}, {})",
                self.min, self.max
            )));
        }
        if self.min >= self.max {
            return Err(Error::InvalidParameter(format!(
                "{name} requires min < max, got ({}, {})",
                self.min, self.max
            )));
        }
        Ok(())
    }
}

impl From<(f64, f64)> for AxisRange {
    fn from((min, max): (f64, f64)) -> Self {
        Self::new(min, max)
    }
}

/// Classification of a point against one environment.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PointCategory {
    Free,
    Obstacle,
    Start,
    End,
    OutOfRange,
}

impl PointCategory {
    pub fn is_obstacle(self) -> bool {
        matches!(self, PointCategory::Obstacle)
    }

    /// Raster value: 1 for obstacles, 0 for everything else.
    #[inline]
    pub fn occupancy(self) -> u8 {
        match self {
            PointCategory::Obstacle => 1,
            PointCategory::Free
            | PointCategory::Start
            | PointCategory::End
            | PointCategory::OutOfRange => 0,
        }
    }
}

/// Parameters shared by every environment generated from them.
#[non_exhaustive]
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct EnvironmentConfig {
    /// Square domain bounds for both axes.
    pub domain_range: AxisRange,
    /// Sub-range kernel centers are drawn from.
    pub obstacle_range: AxisRange,
    /// Start point; always classifies as [`PointCategory::Start`].
    pub start_point: DVec2,
    /// End point; always classifies as [`PointCategory::End`].
    pub end_point: DVec2,
    /// Number of RBF kernels in the obstacle field.
    pub obstacle_count: usize,
    /// Occupancy threshold; potential strictly above it is an obstacle.
    pub eta: f64,
    /// Raster samples per axis.
    pub grid_resolution: usize,
    /// RBF spatial decay shared by all kernels.
    pub gamma: f64,
}

impl Default for EnvironmentConfig {
    fn default() -> Self {
        Self {
            domain_range: AxisRange::new(-1.2, 1.2),
            obstacle_range: AxisRange::new(-0.7, 0.7),
            start_point: DVec2::new(-1.0, -1.0),
            end_point: DVec2::new(1.0, 1.0),
            obstacle_count: 15,
            eta: 0.9,
            grid_resolution: 500,
            gamma: 25.0,
        }
    }
}

impl EnvironmentConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the domain bounds.
    pub fn with_domain_range(mut self, range: impl Into<AxisRange>) -> Self {
        self.domain_range = range.into();
        self
    }

    /// Sets the range kernel centers are drawn from.
    pub fn with_obstacle_range(mut self, range: impl Into<AxisRange>) -> Self {
        self.obstacle_range = range.into();
        self
    }

    /// Sets the start and end points.
    pub fn with_endpoints(mut self, start_point: DVec2, end_point: DVec2) -> Self {
        self.start_point = start_point;
        self.end_point = end_point;
        self
    }

    /// Sets the number of kernels.
    pub fn with_obstacle_count(mut self, obstacle_count: usize) -> Self {
        self.obstacle_count = obstacle_count;
        self
    }

    /// Sets the occupancy threshold.
    pub fn with_eta(mut self, eta: f64) -> Self {
        self.eta = eta;
        self
    }

    /// Sets the raster samples per axis.
    pub fn with_grid_resolution(mut self, grid_resolution: usize) -> Self {
        self.grid_resolution = grid_resolution;
        self
    }

    /// Sets the kernel decay parameter.
    pub fn with_gamma(mut self, gamma: f64) -> Self {
        self.gamma = gamma;
        self
    }

    /// Validates the configuration, returning an error if invalid.
    pub fn validate(&self) -> Result<()> {
        self.domain_range.validate("domain_range")?;
        self.obstacle_range.validate("obstacle_range")?;
        if !self.eta.is_finite() || self.eta <= 0.0 {
            return Err(Error::InvalidParameter(format!(
                "eta must be finite and > 0, got {}",
                self.eta
            )));
        }
        if !self.gamma.is_finite() || self.gamma <= 0.0 {
            return Err(Error::InvalidParameter(format!(
                "gamma must be finite and > 0, got {}",
                self.gamma
            )));
        }
        if self.grid_resolution < 2 {
            return Err(Error::InvalidParameter(format!(
                "grid_resolution must be >= 2, got {}",
                self.grid_resolution
            )));
        }
        if !self.start_point.is_finite() || !self.end_point.is_finite() {
            return Err(Error::InvalidParameter(
                "start_point and end_point must be finite".into(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn linspace_includes_both_endpoints() {
        let xs = AxisRange::new(-1.2, 1.2).linspace(5);
        assert_eq!(xs.len(), 5);
        assert_eq!(xs[0], -1.2);
        assert_eq!(xs[4], 1.2);
        assert!((xs[2] - 0.0).abs() < 1e-12);
        assert!(xs.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn linspace_degenerate_counts() {
        let r = AxisRange::new(0.0, 1.0);
        assert!(r.linspace(0).is_empty());
        assert_eq!(r.linspace(1), vec![0.0]);
        assert_eq!(r.linspace(2), vec![0.0, 1.0]);
    }

    #[test]
    fn contains_is_inclusive() {
        let r = AxisRange::new(-1.0, 1.0);
        assert!(r.contains(-1.0));
        assert!(r.contains(1.0));
        assert!(!r.contains(1.000_001));
        assert!(!r.contains(f64::NAN));
    }

    #[test]
    fn occupancy_only_marks_obstacles() {
        assert_eq!(PointCategory::Obstacle.occupancy(), 1);
        for c in [
            PointCategory::Free,
            PointCategory::Start,
            PointCategory::End,
            PointCategory::OutOfRange,
        ] {
            assert_eq!(c.occupancy(), 0);
            assert!(!c.is_obstacle());
        }
    }

    #[test]
    fn default_config_is_valid() {
        let cfg = EnvironmentConfig::default();
        assert!(cfg.validate().is_ok());
        assert_eq!(cfg.obstacle_count, 15);
        assert_eq!(cfg.grid_resolution, 500);
    }

    #[test]
    fn validate_rejects_each_bad_parameter() {
        let base = EnvironmentConfig::default();
        let bad = [
            base.clone().with_eta(0.0),
            base.clone().with_eta(-1.0),
            base.clone().with_gamma(0.0),
            base.clone().with_grid_resolution(1),
            base.clone().with_domain_range((1.0, 1.0)),
            base.clone().with_domain_range((2.0, -2.0)),
            base.clone().with_obstacle_range((0.5, 0.1)),
            base.clone()
                .with_endpoints(DVec2::new(f64::INFINITY, 0.0), DVec2::ZERO),
        ];
        for cfg in bad {
            assert!(
                matches!(cfg.validate(), Err(Error::InvalidParameter(_))),
                "expected rejection for {cfg:?}"
            );
        }
    }
}
