//! Discrete Laplacian Transform

use ndarray::{Array3, ArrayView1, ArrayViewMut1, Axis};

/// Add the second difference of `src` to `acc`, reflecting at the borders
fn add_second_difference(src: ArrayView1<f64>, mut acc: ArrayViewMut1<f64>) {
    let n = src.len();
    for i in 0..n {
        let prev = if i == 0 { src[0] } else { src[i - 1] };
        let next = if i + 1 == n { src[n - 1] } else { src[i + 1] };
        acc[i] += prev - 2.0 * src[i] + next;
    }
}

/// Sum of second differences along all three axes (6-neighbour stencil)
pub fn laplacian(volume: &Array3<f64>) -> Array3<f64> {
    let mut out = Array3::<f64>::zeros(volume.raw_dim());
    for axis in 0..3 {
        for (src, acc) in volume
            .lanes(Axis(axis))
            .into_iter()
            .zip(out.lanes_mut(Axis(axis)))
        {
            add_second_difference(src, acc);
        }
    }
    out
}
