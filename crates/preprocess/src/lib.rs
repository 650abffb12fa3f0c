//! Volume Preprocessing
//!
//! Convolution kernels and the differential transforms (gradient magnitude,
//! Laplacian) applied to masked volumes before multifractal analysis.

mod gradient;
mod kernel;
mod laplacian;

pub use gradient::{gradient_magnitude, partial_derivative};
pub use kernel::{gaussian_kernel_3d, gaussian_kernel_3d_scaled, sigma_for_size};
pub use laplacian::laplacian;
