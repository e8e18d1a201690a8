//! Seeded obstacle field: a fixed set of Gaussian kernels with random centers.
use glam::DVec2;
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::{debug, trace};

use crate::environment::AxisRange;
use crate::error::{Error, Result};
use crate::field::kernel::RadialKernel;
use crate::field::{entropy_seed, rand01};

/// Sum of `count` Gaussian kernels whose centers are drawn uniformly from `range × range`.
///
/// Each field seeds its own [`StdRng`] exactly once, so fields built concurrently never share
/// generator state. Centers are drawn x then y, per kernel, in index order.
#[derive(Clone, Debug)]
pub struct ObstacleField {
    kernels: Vec<RadialKernel>,
    gamma: f64,
    range: AxisRange,
    seed: u64,
}

impl ObstacleField {
    /// Build a field of `count` kernels. `seed = None` draws a non-reproducible seed from entropy.
    pub fn new(count: usize, range: AxisRange, seed: Option<u64>, gamma: f64) -> Result<Self> {
        if !gamma.is_finite() || gamma <= 0.0 {
            return Err(Error::InvalidParameter(format!(
                "gamma must be finite and > 0, got {gamma}"
            )));
        }
        range.validate("obstacle_range")?;

        let seed = seed.unwrap_or_else(entropy_seed);
        let mut rng = StdRng::seed_from_u64(seed);

        let span = range.span();
        let mut kernels = Vec::with_capacity(count);
        for _ in 0..count {
            let x = range.min + rand01(&mut rng) * span;
            let y = range.min + rand01(&mut rng) * span;
            let kernel = RadialKernel::new(gamma, DVec2::new(x, y));
            trace!("{kernel}");
            kernels.push(kernel);
        }

        debug!(
            "Obstacle field: {} kernels in [{}, {}], gamma {}, seed {}.",
            count, range.min, range.max, gamma, seed
        );

        Ok(Self {
            kernels,
            gamma,
            range,
            seed,
        })
    }

    /// Occupancy potential at `point`: the sum of all kernel values.
    pub fn potential(&self, point: DVec2) -> f64 {
        self.kernels.iter().map(|k| k.value(point)).sum()
    }

    pub fn kernels(&self) -> &[RadialKernel] {
        &self.kernels
    }

    pub fn gamma(&self) -> f64 {
        self.gamma
    }

    /// Range kernel centers were drawn from, shared by both axes.
    pub fn range(&self) -> AxisRange {
        self.range
    }

    /// Seed the field's generator was initialized with (drawn from entropy if none was given).
    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn len(&self) -> usize {
        self.kernels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.kernels.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn range() -> AxisRange {
        AxisRange::new(-0.7, 0.7)
    }

    #[test]
    fn same_seed_yields_identical_fields() {
        let a = ObstacleField::new(15, range(), Some(1337), 25.0).unwrap();
        let b = ObstacleField::new(15, range(), Some(1337), 25.0).unwrap();
        assert_eq!(a.kernels(), b.kernels());

        for p in [
            DVec2::ZERO,
            DVec2::new(0.25, -0.4),
            DVec2::new(-1.0, 1.0),
        ] {
            assert_eq!(a.potential(p).to_bits(), b.potential(p).to_bits());
        }
    }

    #[test]
    fn different_seeds_move_centers() {
        let a = ObstacleField::new(8, range(), Some(1), 25.0).unwrap();
        let b = ObstacleField::new(8, range(), Some(2), 25.0).unwrap();
        assert_ne!(a.kernels(), b.kernels());
    }

    #[test]
    fn centers_stay_inside_range_and_share_gamma() {
        let field = ObstacleField::new(200, range(), Some(7), 12.5).unwrap();
        assert_eq!(field.len(), 200);
        for k in field.kernels() {
            assert!(range().contains(k.origin.x));
            assert!(range().contains(k.origin.y));
            assert_eq!(k.gamma, 12.5);
        }
    }

    #[test]
    fn kernel_prefix_is_stable_across_counts() {
        let short = ObstacleField::new(3, range(), Some(99), 25.0).unwrap();
        let long = ObstacleField::new(10, range(), Some(99), 25.0).unwrap();
        assert_eq!(short.kernels(), &long.kernels()[..3]);
    }

    #[test]
    fn potential_matches_brute_force_sum() {
        let field = ObstacleField::new(6, range(), Some(42), 3.0).unwrap();
        let p = DVec2::new(0.1, 0.2);
        let expected: f64 = field
            .kernels()
            .iter()
            .map(|k| (-3.0 * ((k.origin.x - p.x).powi(2) + (k.origin.y - p.y).powi(2))).exp())
            .sum();
        assert!((field.potential(p) - expected).abs() < 1e-12);
        assert!(field.potential(p) <= field.len() as f64);
    }

    #[test]
    fn empty_field_has_zero_potential() {
        let field = ObstacleField::new(0, range(), Some(5), 25.0).unwrap();
        assert!(field.is_empty());
        assert_eq!(field.potential(DVec2::ZERO), 0.0);
    }

    #[test]
    fn unseeded_field_records_its_seed() {
        let field = ObstacleField::new(4, range(), None, 25.0).unwrap();
        let replay = ObstacleField::new(4, range(), Some(field.seed()), 25.0).unwrap();
        assert_eq!(field.kernels(), replay.kernels());
    }

    #[test]
    fn rejects_invalid_gamma_and_range() {
        assert!(matches!(
            ObstacleField::new(1, range(), Some(1), 0.0),
            Err(Error::InvalidParameter(_))
        ));
        assert!(matches!(
            ObstacleField::new(1, range(), Some(1), f64::NAN),
            Err(Error::InvalidParameter(_))
        ));
        assert!(matches!(
            ObstacleField::new(1, AxisRange::new(1.0, 1.0), Some(1), 1.0),
            Err(Error::InvalidParameter(_))
        ));
    }
}
