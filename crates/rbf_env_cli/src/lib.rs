#![forbid(unsafe_code)]

mod options;
mod rendering;

pub use options::{parse_batch_config, Cli};
pub use rendering::{
    file_name_for_index, init_tracing, render_environment, PngWriter, RenderConfig, MAX_IMAGE_SIDE,
};
