//! Volume Ingestion
//!
//! Loads structure and mask volumes from named-array containers, estimates
//! adaptive binarization thresholds, and restricts volumes to a region of
//! interest.

mod container;
mod error;
mod loader;
mod mask;
mod threshold;

pub use container::{ArrayContainer, InMemoryContainer, NpzContainer};
pub use error::VolumeError;
pub use loader::{load_array, LoadedVolume, VolumeLoader, MASK_ARRAY, STRUCTURE_ARRAY};
pub use mask::{apply_mask, apply_mask_in_place, check_shapes};
pub use threshold::{binarize, estimate_threshold, MASS_FRACTION};
