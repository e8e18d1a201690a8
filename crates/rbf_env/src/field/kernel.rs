//! Gaussian radial basis function kernel.
use std::fmt;

use glam::DVec2;

/// A Gaussian RBF `exp(-gamma * d²)` centered at `origin`.
///
/// Larger `gamma` narrows the kernel's influence. `gamma` is not validated here;
/// [`crate::field::ObstacleField`] rejects non-positive values before building kernels.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RadialKernel {
    /// Spatial decay parameter.
    pub gamma: f64,
    /// Kernel center in domain coordinates.
    pub origin: DVec2,
}

impl RadialKernel {
    pub fn new(gamma: f64, origin: DVec2) -> Self {
        Self { gamma, origin }
    }

    /// Kernel value at `point`, in (0, 1] for finite inputs and positive `gamma`.
    #[inline]
    pub fn value(&self, point: DVec2) -> f64 {
        (-self.gamma * self.origin.distance_squared(point)).exp()
    }
}

impl fmt::Display for RadialKernel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "RadialKernel(gamma={}, origin=({}, {}))",
            self.gamma, self.origin.x, self.origin.y
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn value_is_one_at_origin() {
        let k = RadialKernel::new(1.0, DVec2::ZERO);
        assert_eq!(k.value(DVec2::ZERO), 1.0);
    }

    #[test]
    fn value_matches_gaussian_at_unit_distance() {
        let k = RadialKernel::new(1.0, DVec2::ZERO);
        let v = k.value(DVec2::new(1.0, 0.0));
        assert!((v - (-1.0f64).exp()).abs() < 1e-15);
        assert!((v - 0.3679).abs() < 1e-4);
    }

    #[test]
    fn larger_gamma_narrows_influence() {
        let p = DVec2::new(0.3, -0.2);
        let wide = RadialKernel::new(1.0, DVec2::new(0.1, 0.1));
        let narrow = RadialKernel::new(25.0, DVec2::new(0.1, 0.1));
        assert!(narrow.value(p) < wide.value(p));
    }

    #[test]
    fn display_lists_parameters() {
        let k = RadialKernel::new(25.0, DVec2::new(0.5, -0.25));
        assert_eq!(k.to_string(), "RadialKernel(gamma=25, origin=(0.5, -0.25))");
    }
}
