//! 3D Gaussian Kernel Generation

use ndarray::Array3;

/// Spread parameter used for a kernel whose first dimension is `size_x`
pub fn sigma_for_size(size_x: usize) -> f32 {
    let mut sigma = 2.0;
    if size_x <= 3 {
        sigma = 1.5;
    }
    if size_x == 5 {
        sigma = 2.5;
    }
    sigma
}

/// Normalized 3D kernel with weights `exp(x² + y² + z²)`.
///
/// The `2σ²` denominator is not applied to the exponent, so the shape only
/// depends on the grid extent. Weights are normalized to sum to 1.
pub fn gaussian_kernel_3d(size_x: usize, size_y: usize, size_z: usize) -> Array3<f32> {
    build_kernel(size_x, size_y, size_z, |r2| r2)
}

/// Normalized 3D Gaussian with weights `exp(-(x² + y² + z²) / 2σ²)`
pub fn gaussian_kernel_3d_scaled(size_x: usize, size_y: usize, size_z: usize) -> Array3<f32> {
    let sigma = f64::from(sigma_for_size(size_x));
    let b = 2.0 * sigma * sigma;
    build_kernel(size_x, size_y, size_z, |r2| -r2 / b)
}

/// Grid coordinates `-(n-1)/2, -(n-1)/2 + 1, ...` with `n` entries
fn centered_coords(n: usize) -> Vec<f64> {
    let start = -((n as f64) - 1.0) / 2.0;
    (0..n).map(|i| start + i as f64).collect()
}

fn build_kernel<F>(size_x: usize, size_y: usize, size_z: usize, exponent: F) -> Array3<f32>
where
    F: Fn(f64) -> f64,
{
    let (cx, cy, cz) = (
        centered_coords(size_x),
        centered_coords(size_y),
        centered_coords(size_z),
    );

    let exponents = Array3::from_shape_fn((size_x, size_y, size_z), |(i, j, k)| {
        exponent(cx[i] * cx[i] + cy[j] * cy[j] + cz[k] * cz[k])
    });

    // Shift by the largest exponent; the shift cancels in the normalization
    // and keeps corner weights of large kernels finite.
    let peak = exponents.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
    let weights = exponents.mapv(|e| (e - peak).exp());
    let total = weights.sum();

    weights.mapv(|w| (w / total) as f32)
}
