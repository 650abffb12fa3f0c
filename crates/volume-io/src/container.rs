//! Named Array Containers
//!
//! A container maps array names to n-dimensional integer arrays. Volumes are
//! shipped as NumPy `.npz` archives holding one entry per array.

use crate::error::VolumeError;
use ndarray::{ArrayD, IxDyn, OwnedRepr};
use ndarray_npy::{NpzReader, ReadNpyError, ReadNpzError};
use std::collections::HashMap;
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Source of named integer arrays
pub trait ArrayContainer {
    /// Read the array stored under `name`, cast to `i32`
    fn read_array(&mut self, name: &str) -> Result<ArrayD<i32>, VolumeError>;
}

/// NumPy `.npz` archive on disk
pub struct NpzContainer {
    reader: NpzReader<BufReader<File>>,
    path: PathBuf,
}

impl NpzContainer {
    /// Open an archive for reading
    pub fn open(path: impl AsRef<Path>) -> Result<Self, VolumeError> {
        let path = path.as_ref().to_path_buf();
        let file = File::open(&path).map_err(|source| VolumeError::Io {
            path: path.clone(),
            source,
        })?;
        let reader = NpzReader::new(BufReader::new(file))
            .map_err(|e| VolumeError::Npz(format!("{}: {}", path.display(), e)))?;
        Ok(Self { reader, path })
    }

    /// Path this container was opened from
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Names of all entries in the archive
    pub fn names(&mut self) -> Result<Vec<String>, VolumeError> {
        self.reader
            .names()
            .map_err(|e| VolumeError::Npz(e.to_string()))
    }

    /// Resolve `name` to the archive entry, which NumPy suffixes with `.npy`
    fn entry_for(&mut self, name: &str) -> Result<String, VolumeError> {
        let suffixed = format!("{name}.npy");
        self.names()?
            .into_iter()
            .find(|entry| entry == name || *entry == suffixed)
            .ok_or_else(|| VolumeError::MissingArray {
                name: name.to_string(),
                path: self.path.clone(),
            })
    }
}

// Tries one stored element type; a descriptor mismatch falls through to the next.
macro_rules! read_as {
    ($reader:expr, $entry:expr, $ty:ty, $cast:expr) => {
        match $reader.by_name::<OwnedRepr<$ty>, IxDyn>($entry) {
            Ok(arr) => return Ok(arr.mapv($cast)),
            Err(ReadNpzError::Npy(ReadNpyError::WrongDescriptor(_))) => {}
            Err(e) => return Err(VolumeError::Npz(e.to_string())),
        }
    };
}

impl ArrayContainer for NpzContainer {
    fn read_array(&mut self, name: &str) -> Result<ArrayD<i32>, VolumeError> {
        let entry = self.entry_for(name)?;
        debug!(path = %self.path.display(), entry = %entry, "Reading array");

        let reader = &mut self.reader;
        read_as!(reader, &entry, i32, |v| v);
        read_as!(reader, &entry, i64, |v| v as i32);
        read_as!(reader, &entry, i16, |v| v as i32);
        read_as!(reader, &entry, i8, |v| v as i32);
        read_as!(reader, &entry, u8, |v| v as i32);
        read_as!(reader, &entry, u16, |v| v as i32);
        read_as!(reader, &entry, u32, |v| v as i32);
        read_as!(reader, &entry, f32, |v| v as i32);
        read_as!(reader, &entry, f64, |v| v as i32);
        read_as!(reader, &entry, bool, |v| v as i32);

        Err(VolumeError::UnsupportedElementType {
            name: name.to_string(),
        })
    }
}

/// In-memory container, for callers that already hold the arrays
#[derive(Debug, Clone, Default)]
pub struct InMemoryContainer {
    arrays: HashMap<String, ArrayD<i32>>,
}

impl InMemoryContainer {
    /// Create an empty container
    pub fn new() -> Self {
        Self::default()
    }

    /// Store an array under `name`, replacing any previous entry
    pub fn insert(&mut self, name: impl Into<String>, array: ArrayD<i32>) {
        self.arrays.insert(name.into(), array);
    }

    /// Builder-style insert
    pub fn with_array(mut self, name: impl Into<String>, array: ArrayD<i32>) -> Self {
        self.insert(name, array);
        self
    }
}

impl ArrayContainer for InMemoryContainer {
    fn read_array(&mut self, name: &str) -> Result<ArrayD<i32>, VolumeError> {
        self.arrays
            .get(name)
            .cloned()
            .ok_or_else(|| VolumeError::MissingArray {
                name: name.to_string(),
                path: PathBuf::from("<memory>"),
            })
    }
}
