//! Command-line options and batch configuration loading.
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use rbf_env::prelude::*;

#[derive(Parser, Debug)]
#[command(name = "rbf-env")]
#[command(about = "Generate RBF obstacle environments and render them as PNG", long_about = None)]
pub struct Cli {
    /// RON file holding a BatchConfig; flags below override its fields
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Number of environments to generate
    #[arg(long)]
    pub count: Option<usize>,

    /// Base seed; environment i uses seed + i
    #[arg(long)]
    pub seed: Option<u64>,

    /// Worker threads (defaults to available parallelism)
    #[arg(long)]
    pub workers: Option<usize>,

    /// Raster samples per axis
    #[arg(long)]
    pub resolution: Option<usize>,

    /// Number of RBF kernels per environment
    #[arg(long)]
    pub obstacles: Option<usize>,

    /// Occupancy threshold
    #[arg(long)]
    pub eta: Option<f64>,

    /// RBF spatial decay
    #[arg(long)]
    pub gamma: Option<f64>,

    /// Output directory for rendered images
    #[arg(long, default_value = "out")]
    pub out_dir: PathBuf,

    /// Pixels per raster cell
    #[arg(long, default_value_t = 1, value_parser = clap::value_parser!(u32).range(1..))]
    pub scale: u32,

    /// Generate without writing images
    #[arg(long, default_value = "false")]
    pub no_render: bool,
}

impl Cli {
    /// Loads the config file, if any, and applies flag overrides on top.
    pub fn batch_config(&self) -> anyhow::Result<BatchConfig> {
        let mut config = match &self.config {
            Some(path) => {
                let text = std::fs::read_to_string(path)
                    .with_context(|| format!("reading {}", path.display()))?;
                parse_batch_config(&text).with_context(|| format!("parsing {}", path.display()))?
            }
            None => BatchConfig::default(),
        };

        if let Some(count) = self.count {
            config.count = count;
        }
        if let Some(seed) = self.seed {
            config.base_seed = seed;
        }
        if let Some(workers) = self.workers {
            config.workers = Some(workers);
        }
        let env = &mut config.environment;
        if let Some(resolution) = self.resolution {
            env.grid_resolution = resolution;
        }
        if let Some(obstacles) = self.obstacles {
            env.obstacle_count = obstacles;
        }
        if let Some(eta) = self.eta {
            env.eta = eta;
        }
        if let Some(gamma) = self.gamma {
            env.gamma = gamma;
        }

        config.validate()?;
        Ok(config)
    }
}

/// Parses a RON-encoded [`BatchConfig`]; omitted fields keep their defaults.
pub fn parse_batch_config(text: &str) -> anyhow::Result<BatchConfig> {
    Ok(ron::from_str(text)?)
}
