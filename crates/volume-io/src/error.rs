//! Volume I/O Error Types

use std::path::PathBuf;
use thiserror::Error;

/// Errors while loading, thresholding, or masking volumes
#[derive(Debug, Error)]
pub enum VolumeError {
    /// Container file could not be opened or read
    #[error("Failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Container is not a readable NPZ archive, or an entry is corrupt
    #[error("Corrupt array container: {0}")]
    Npz(String),

    /// Named array is absent from the container
    #[error("Array '{name}' not found in {path}")]
    MissingArray { name: String, path: PathBuf },

    /// Stored element type cannot be cast to i32
    #[error("Array '{name}' has an unsupported element type")]
    UnsupportedElementType { name: String },

    /// Array has the wrong dimensionality or no elements
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Volume and mask shapes differ
    #[error("Shape mismatch: volume {volume:?} vs mask {mask:?}")]
    ShapeMismatch { volume: Vec<usize>, mask: Vec<usize> },
}

impl VolumeError {
    /// Whether this error came from reading the container (IOError class)
    pub fn is_io(&self) -> bool {
        matches!(
            self,
            VolumeError::Io { .. }
                | VolumeError::Npz(_)
                | VolumeError::MissingArray { .. }
                | VolumeError::UnsupportedElementType { .. }
        )
    }

    /// Whether this error came from malformed input arrays (InvalidInputError class)
    pub fn is_invalid_input(&self) -> bool {
        matches!(
            self,
            VolumeError::InvalidInput(_) | VolumeError::ShapeMismatch { .. }
        )
    }
}
