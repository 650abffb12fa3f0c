//! Volume Loader
//!
//! Reads structure ("S") and mask ("M") arrays and optionally binarizes the
//! structure volume with the adaptive threshold.

use crate::container::{ArrayContainer, NpzContainer};
use crate::error::VolumeError;
use crate::threshold::{binarize, estimate_threshold};
use ndarray::{Array3, ArrayD, Ix3};
use std::path::Path;
use tracing::debug;

/// Array name of the structure (intensity) volume
pub const STRUCTURE_ARRAY: &str = "S";
/// Array name of the mask volume
pub const MASK_ARRAY: &str = "M";

/// A volume as returned by the loader
#[derive(Debug, Clone, PartialEq)]
pub enum LoadedVolume {
    /// Raw intensities
    Intensity(Array3<i32>),
    /// Thresholded structure
    Binary(Array3<bool>),
}

impl LoadedVolume {
    /// Shape as (x, y, z)
    pub fn shape(&self) -> &[usize] {
        match self {
            LoadedVolume::Intensity(arr) => arr.shape(),
            LoadedVolume::Binary(arr) => arr.shape(),
        }
    }

    /// Intensity view; binary voxels become 0/1
    pub fn into_intensity(self) -> Array3<i32> {
        match self {
            LoadedVolume::Intensity(arr) => arr,
            LoadedVolume::Binary(arr) => arr.mapv(i32::from),
        }
    }

    /// Whether the volume was thresholded
    pub fn is_binary(&self) -> bool {
        matches!(self, LoadedVolume::Binary(_))
    }
}

/// Loads named volumes from containers
pub struct VolumeLoader<C> {
    container: C,
}

impl VolumeLoader<NpzContainer> {
    /// Open an `.npz` container on disk
    pub fn open(path: impl AsRef<Path>) -> Result<Self, VolumeError> {
        Ok(Self::new(NpzContainer::open(path)?))
    }
}

impl<C: ArrayContainer> VolumeLoader<C> {
    /// Wrap an existing container
    pub fn new(container: C) -> Self {
        Self { container }
    }

    /// Load `name`, binarizing the structure array unless `greyscale` is set
    pub fn load(&mut self, name: &str, greyscale: bool) -> Result<LoadedVolume, VolumeError> {
        let arr = to_volume(self.container.read_array(name)?)?;
        debug!(array = name, shape = ?arr.shape(), greyscale, "Loaded array");

        if greyscale || name != STRUCTURE_ARRAY {
            return Ok(LoadedVolume::Intensity(arr));
        }

        let threshold = estimate_threshold(&arr)?;
        let binary = binarize(&arr, threshold);
        let white = binary.iter().filter(|&&v| v).count();
        debug!(threshold, white_voxels = white, "Binarized structure volume");

        Ok(LoadedVolume::Binary(binary))
    }

    /// Consume the loader, returning its container
    pub fn into_inner(self) -> C {
        self.container
    }
}

/// Load the array `name` from the `.npz` container at `path`
pub fn load_array(
    name: &str,
    path: impl AsRef<Path>,
    greyscale: bool,
) -> Result<LoadedVolume, VolumeError> {
    VolumeLoader::open(path)?.load(name, greyscale)
}

fn to_volume(arr: ArrayD<i32>) -> Result<Array3<i32>, VolumeError> {
    let ndim = arr.ndim();
    arr.into_dimensionality::<Ix3>().map_err(|_| {
        VolumeError::InvalidInput(format!(
            "expected a 3-dimensional array, got {ndim} dimensions"
        ))
    })
}
