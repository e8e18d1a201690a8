//! Obstacle fields built from Gaussian radial basis function kernels.
//!
//! [`kernel::RadialKernel`] evaluates a single kernel; [`obstacle::ObstacleField`] owns a seeded
//! set of kernels and exposes their summed occupancy potential.
use rand::Rng;

pub mod kernel;
pub mod obstacle;

pub use kernel::RadialKernel;
pub use obstacle::ObstacleField;

/// Generate a random double in the range [0, 1) from the top 53 bits of a `u64` draw.
#[inline]
pub(crate) fn rand01<R: Rng + ?Sized>(rng: &mut R) -> f64 {
    (rng.next_u64() >> 11) as f64 * (1.0 / (1u64 << 53) as f64)
}

/// Draw a fresh, non-reproducible seed from the thread-local entropy source.
pub(crate) fn entropy_seed() -> u64 {
    rand::rng().next_u64()
}
