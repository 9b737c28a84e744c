//! Media inspection: input classification and ffprobe-based probing.

mod classify;
mod probe;

pub use classify::{
    correct_output_path, default_output_name, MediaKind, IMAGE_EXTENSIONS,
};
pub use probe::{probe_file, ProbeError, ProbeResult};
