//! Error types for shader packing

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while packing shaders
#[derive(Debug, Error)]
pub enum PackError {
    /// A filesystem operation failed on the given path
    #[error("I/O error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Progress output could not be written
    #[error("Failed to write progress output: {0}")]
    Progress(#[source] std::io::Error),

    /// The input directory does not exist or is not a directory
    #[error("Input directory not found: {}", .0.display())]
    MissingInputDir(PathBuf),

    /// The output directory does not exist and creating it was not requested
    #[error("Output directory not found: {} (create it first or enable create_output)", .0.display())]
    MissingOutputDir(PathBuf),

    /// File name has no `.` at all
    #[error("Invalid shader file name {0:?}: missing extension")]
    MissingExtension(String),

    /// File name has an extension that is not a known shader kind
    #[error("Invalid shader file name {0:?}: unknown extension (expected .fs or .vs)")]
    UnknownExtension(String),

    /// File name is only an extension, e.g. `.fs`
    #[error("Invalid shader file name {0:?}: empty name")]
    EmptyName(String),

    /// Shader contents are not valid UTF-8 and cannot be embedded line by line
    #[error("Shader {} is not valid UTF-8 (use the bytes encoding)", .0.display())]
    NotUtf8(PathBuf),
}

impl PackError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// True for errors that only concern a single file's name.
    pub fn is_file_name_error(&self) -> bool {
        matches!(
            self,
            Self::MissingExtension(_) | Self::UnknownExtension(_) | Self::EmptyName(_)
        )
    }
}

pub type Result<T> = std::result::Result<T, PackError>;
