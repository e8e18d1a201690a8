//! PNG rendering of generated environments.
//!
//! Free cells are white, obstacle cells black, row 0 of the raster is drawn at the bottom of the
//! image. The start point is marked with a green disk and the end point with a red star, both
//! placed using the environment's domain range as the axis extent.
use std::path::PathBuf;

use glam::DVec2;
use image::{Rgb, RgbImage};
use rbf_env::prelude::*;
use tracing::debug;
use tracing_subscriber::EnvFilter;

/// Largest image side in pixels the renderer will allocate.
pub const MAX_IMAGE_SIDE: u32 = 16_384;

/// Installs a fmt subscriber honoring `RUST_LOG`, defaulting to `info`.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}

/// Image styling.
#[derive(Clone, Debug)]
pub struct RenderConfig {
    /// Pixels per raster cell along each axis.
    pub scale: u32,
    pub free: [u8; 3],
    pub obstacle: [u8; 3],
    pub start: [u8; 3],
    pub end: [u8; 3],
    /// Marker radius in pixels; `None` derives it from the image size.
    pub marker_radius: Option<u32>,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            scale: 1,
            free: [255, 255, 255],
            obstacle: [0, 0, 0],
            start: [0, 160, 0],
            end: [220, 20, 20],
            marker_radius: None,
        }
    }
}

impl RenderConfig {
    pub fn with_scale(mut self, scale: u32) -> Self {
        self.scale = scale.max(1);
        self
    }

    pub fn with_marker_radius(mut self, radius: u32) -> Self {
        self.marker_radius = Some(radius);
        self
    }

    /// Image side in pixels for a raster of `resolution` cells per axis, or an error if it does
    /// not fit [`MAX_IMAGE_SIDE`].
    pub fn image_side(&self, resolution: usize) -> Result<u32> {
        u32::try_from(resolution)
            .ok()
            .and_then(|n| n.checked_mul(self.scale.max(1)))
            .filter(|&side| side <= MAX_IMAGE_SIDE)
            .ok_or_else(|| {
                Error::InvalidParameter(format!(
                    "image of {} cells at scale {} exceeds {} pixels per side",
                    resolution, self.scale, MAX_IMAGE_SIDE
                ))
            })
    }
}

/// Rasterizes `env` into an RGB image of `resolution * scale` pixels per side.
pub fn render_environment(env: &EnvironmentDescriptor, rc: &RenderConfig) -> Result<RgbImage> {
    let side = rc.image_side(env.config().grid_resolution)?;
    let grid = env.grid();
    let scale = rc.scale.max(1);
    let n = side / scale;
    let mut img = RgbImage::from_pixel(side, side, Rgb(rc.free));

    for (row, cells) in grid.rows().enumerate() {
        let top = (n - 1 - row as u32) * scale;
        for (col, &cell) in cells.iter().enumerate() {
            if cell == 0 {
                continue;
            }
            let left = col as u32 * scale;
            for py in top..top + scale {
                for px in left..left + scale {
                    img.put_pixel(px, py, Rgb(rc.obstacle));
                }
            }
        }
    }

    let radius = rc.marker_radius.unwrap_or((side / 50).max(3)) as f64;
    let start = domain_to_pixel(env.start_point(), env.domain_range(), n, scale);
    let end = domain_to_pixel(env.end_point(), env.domain_range(), n, scale);
    fill_where(&mut img, start, radius, Rgb(rc.start), |d| {
        d.length_squared() <= radius * radius
    });
    let star = star_vertices(radius * 1.4);
    fill_where(&mut img, end, radius * 1.4, Rgb(rc.end), |d| in_star(d, &star));

    Ok(img)
}

/// Output file name for batch index `index` (numbered from 1).
pub fn file_name_for_index(index: usize) -> String {
    format!("env-{}.png", index + 1)
}

/// [`EnvironmentWriter`] that renders each environment to `<out_dir>/env-<index + 1>.png`.
pub struct PngWriter {
    out_dir: PathBuf,
    config: RenderConfig,
    written: usize,
}

impl PngWriter {
    /// Creates the output directory if it does not exist.
    pub fn create(out_dir: impl Into<PathBuf>, config: RenderConfig) -> Result<Self> {
        let out_dir = out_dir.into();
        std::fs::create_dir_all(&out_dir)?;
        Ok(Self {
            out_dir,
            config,
            written: 0,
        })
    }

    pub fn path_for_index(&self, index: usize) -> PathBuf {
        self.out_dir.join(file_name_for_index(index))
    }

    /// Number of files written so far.
    pub fn written(&self) -> usize {
        self.written
    }
}

impl EnvironmentWriter for PngWriter {
    fn write(&mut self, index: usize, env: &EnvironmentDescriptor) -> Result<()> {
        let path = self.path_for_index(index);
        render_environment(env, &self.config)?
            .save(&path)
            .map_err(|e| Error::Io(std::io::Error::other(e)))?;
        self.written += 1;
        debug!("Wrote {}.", path.display());
        Ok(())
    }
}

/// Pixel center of a domain point, matching the raster's cell-centered sampling with y flipped.
fn domain_to_pixel(p: DVec2, range: AxisRange, n: u32, scale: u32) -> DVec2 {
    let step = range.span() / (n.max(2) - 1) as f64;
    let half = scale as f64 / 2.0;
    let col = (p.x - range.min) / step;
    let row = (p.y - range.min) / step;
    let side = (n * scale) as f64;
    DVec2::new(col * scale as f64 + half, side - (row * scale as f64 + half))
}

fn fill_where(
    img: &mut RgbImage,
    center: DVec2,
    extent: f64,
    color: Rgb<u8>,
    inside: impl Fn(DVec2) -> bool,
) {
    let (w, h) = img.dimensions();
    let x0 = (center.x - extent).floor().max(0.0) as u32;
    let y0 = (center.y - extent).floor().max(0.0) as u32;
    let x1 = ((center.x + extent).ceil().max(0.0) as u32).min(w);
    let y1 = ((center.y + extent).ceil().max(0.0) as u32).min(h);
    for y in y0..y1 {
        for x in x0..x1 {
            let d = DVec2::new(x as f64 + 0.5, y as f64 + 0.5) - center;
            if inside(d) {
                img.put_pixel(x, y, color);
            }
        }
    }
}

/// Outline of a five-pointed star with outer radius `r`, point up in image coordinates.
fn star_vertices(r: f64) -> [DVec2; 10] {
    std::array::from_fn(|i| {
        let radius = if i % 2 == 0 { r } else { r * 0.4 };
        let angle = -std::f64::consts::FRAC_PI_2 + i as f64 * std::f64::consts::PI / 5.0;
        DVec2::new(angle.cos(), angle.sin()) * radius
    })
}

/// Ray-casting point-in-polygon test against a star outline.
fn in_star(d: DVec2, vertices: &[DVec2; 10]) -> bool {
    let mut inside = false;
    let mut j = vertices.len() - 1;
    for i in 0..vertices.len() {
        let (a, b) = (vertices[i], vertices[j]);
        if (a.y > d.y) != (b.y > d.y) && d.x < (b.x - a.x) * (d.y - a.y) / (b.y - a.y) + a.x {
            inside = !inside;
        }
        j = i;
    }
    inside
}
