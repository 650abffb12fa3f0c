//! Region-of-Interest Masking

use crate::error::VolumeError;
use ndarray::{Array3, Zip};
use tracing::debug;

/// Zero every voxel whose mask entry is not positive: `volume * (mask > 0)`
pub fn apply_mask(volume: &Array3<i32>, mask: &Array3<i32>) -> Result<Array3<i32>, VolumeError> {
    let mut masked = volume.clone();
    apply_mask_in_place(&mut masked, mask)?;
    Ok(masked)
}

/// In-place variant of [`apply_mask`]
pub fn apply_mask_in_place(
    volume: &mut Array3<i32>,
    mask: &Array3<i32>,
) -> Result<(), VolumeError> {
    check_shapes(volume, mask)?;

    Zip::from(volume.view_mut())
        .and(mask)
        .for_each(|v, &m| {
            if m <= 0 {
                *v = 0;
            }
        });

    debug!(
        region_voxels = mask.iter().filter(|&&m| m > 0).count(),
        total_voxels = mask.len(),
        "Applied mask"
    );
    Ok(())
}

/// Fail with [`VolumeError::ShapeMismatch`] unless both arrays have the same shape
pub fn check_shapes(volume: &Array3<i32>, mask: &Array3<i32>) -> Result<(), VolumeError> {
    if volume.shape() != mask.shape() {
        return Err(VolumeError::ShapeMismatch {
            volume: volume.shape().to_vec(),
            mask: mask.shape().to_vec(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::Array;
    use proptest::prelude::*;

    #[test]
    fn test_full_mask_keeps_volume() {
        let volume = Array3::from_elem((4, 4, 4), 10);
        let mask = Array3::ones((4, 4, 4));
        assert_eq!(apply_mask(&volume, &mask).unwrap(), volume);
    }

    #[test]
    fn test_zero_mask_clears_volume() {
        let volume = Array::from_shape_vec((2, 2, 2), (1..=8).collect()).unwrap();
        let mask = Array3::zeros((2, 2, 2));
        assert!(apply_mask(&volume, &mask).unwrap().iter().all(|&v| v == 0));
    }

    #[test]
    fn test_negative_mask_entries_exclude() {
        let volume = Array3::from_elem((1, 1, 3), 5);
        let mask = Array::from_shape_vec((1, 1, 3), vec![-1, 0, 2]).unwrap();
        let masked = apply_mask(&volume, &mask).unwrap();
        assert_eq!(masked.iter().copied().collect::<Vec<_>>(), vec![0, 0, 5]);
    }

    #[test]
    fn test_shape_mismatch() {
        let volume = Array3::<i32>::zeros((4, 4, 4));
        let mask = Array3::<i32>::ones((4, 4, 3));
        let err = apply_mask(&volume, &mask).unwrap_err();
        assert!(matches!(err, VolumeError::ShapeMismatch { .. }));
    }

    proptest! {
        #[test]
        fn prop_masking_idempotent(
            values in proptest::collection::vec(-50i32..50, 27),
            mask_bits in proptest::collection::vec(-1i32..2, 27),
        ) {
            let volume = Array::from_shape_vec((3, 3, 3), values).unwrap();
            let mask = Array::from_shape_vec((3, 3, 3), mask_bits).unwrap();
            let once = apply_mask(&volume, &mask).unwrap();
            let twice = apply_mask(&once, &mask).unwrap();
            prop_assert_eq!(once, twice);
        }
    }
}
