//! Gradient Magnitude Transform

use ndarray::{Array3, ArrayView1, ArrayViewMut1, Axis, Zip};

/// First derivative along one lane.
///
/// Central differences inside, one-sided differences at both ends. Lanes
/// shorter than two samples have zero derivative.
fn derivative(src: ArrayView1<f64>, mut dst: ArrayViewMut1<f64>) {
    let n = src.len();
    if n < 2 {
        dst.fill(0.0);
        return;
    }
    dst[0] = src[1] - src[0];
    dst[n - 1] = src[n - 1] - src[n - 2];
    for i in 1..n - 1 {
        dst[i] = (src[i + 1] - src[i - 1]) / 2.0;
    }
}

/// Partial derivative of `volume` along `axis`
pub fn partial_derivative(volume: &Array3<f64>, axis: usize) -> Array3<f64> {
    let mut out = Array3::<f64>::zeros(volume.raw_dim());
    for (src, dst) in volume
        .lanes(Axis(axis))
        .into_iter()
        .zip(out.lanes_mut(Axis(axis)))
    {
        derivative(src, dst);
    }
    out
}

/// Euclidean norm of the three partial derivatives at every voxel
pub fn gradient_magnitude(volume: &Array3<f64>) -> Array3<f64> {
    let gx = partial_derivative(volume, 0);
    let gy = partial_derivative(volume, 1);
    let gz = partial_derivative(volume, 2);

    Zip::from(&gx)
        .and(&gy)
        .and(&gz)
        .map_collect(|&x, &y, &z| (x * x + y * y + z * z).sqrt())
}
