//! Packs vertex (`.vs`) and fragment (`.fs`) shader sources into C headers.
//!
//! Each shader `name.ext` in the input directory becomes `name.ext.h` in the
//! output directory, holding the source in a comment and a string constant
//! `name_ext` for inclusion in a native build.

pub mod error;
pub mod escape;
pub mod header;
pub mod packer;
pub mod shader;

use std::path::PathBuf;

pub use error::{PackError, Result};
pub use escape::EscapeMode;
pub use header::Encoding;
pub use packer::{PackOptions, PackReport, PackedShader, Packer, SkippedFile};
pub use shader::{ShaderFile, ShaderKind};

/// Pack `input_dir` into `output_dir` with default options, printing progress to stdout.
pub fn run(input_dir: impl Into<PathBuf>, output_dir: impl Into<PathBuf>) -> Result<PackReport> {
    Packer::new(PackOptions::new(input_dir, output_dir)).run()
}
