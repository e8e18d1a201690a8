use anyhow::bail;
use clap::Parser;
use rbf_env::prelude::*;
use rbf_env_cli::{init_tracing, Cli, PngWriter, RenderConfig};
use tracing::{error, info};

fn main() -> anyhow::Result<()> {
    init_tracing();
    let cli = Cli::parse();
    let config = cli.batch_config()?;
    let count = config.count;
    let render = RenderConfig::default().with_scale(cli.scale);
    if !cli.no_render {
        render.image_side(config.environment.grid_resolution)?;
    }

    let generator = BatchGenerator::try_new(config)?;
    let output = generator.generate();

    let mut failed: Vec<usize> = output.failures().map(|(index, _)| index).collect();

    if cli.no_render {
        info!("Rendering skipped.");
    } else {
        let mut writer = PngWriter::create(&cli.out_dir, render)?;
        let total = output.succeeded();
        let mut progress = |index: usize, env: &EnvironmentDescriptor| -> Result<()> {
            writer.write(index, env)?;
            info!("[{}/{}] {}", writer.written(), total, writer.path_for_index(index).display());
            Ok(())
        };
        failed.extend(output.write_all(&mut progress).into_iter().map(|(index, _)| index));
        info!(
            "Wrote {} images to {}.",
            writer.written(),
            cli.out_dir.display()
        );
    }

    for (index, err) in output.failures() {
        error!("Environment {} failed: {}", index, err);
    }

    if !failed.is_empty() {
        failed.sort_unstable();
        bail!(
            "{} of {} environments failed: indices {:?}",
            failed.len(),
            count,
            failed
        );
    }

    Ok(())
}
