#![allow(dead_code)]

use std::time::Duration;

use criterion::{Criterion, Throughput};
use glam::DVec2;
use rbf_env::prelude::*;

pub const BENCH_SEED: u64 = 0xF1E1D;

pub fn default_criterion() -> Criterion {
    Criterion::default()
        .configure_from_args()
        .sample_size(20)
        .warm_up_time(Duration::from_secs(1))
        .measurement_time(Duration::from_secs(2))
}

/// Default environment parameters at `resolution` samples per axis.
pub fn bench_environment(resolution: usize) -> EnvironmentConfig {
    EnvironmentConfig::default().with_grid_resolution(resolution)
}

/// `n` points on the anti-diagonal of the default domain, crossing the obstacle range.
pub fn diagonal_points(n: usize) -> Vec<DVec2> {
    EnvironmentConfig::default()
        .domain_range
        .linspace(n)
        .into_iter()
        .map(|v| DVec2::new(v, -v))
        .collect()
}

/// One element per classified raster cell.
pub fn cells_throughput(resolution: usize) -> Throughput {
    Throughput::Elements((resolution * resolution).max(1) as u64)
}

pub fn environments_throughput(count: usize) -> Throughput {
    Throughput::Elements(count.max(1) as u64)
}
