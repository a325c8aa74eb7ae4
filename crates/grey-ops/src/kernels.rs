//! Pointwise 3x3 kernels.
//!
//! Each kernel maps one [`Window`] to one output sample. Weights are
//! listed in window order (see [`crate::filter::WINDOW_OFFSETS`]) and are
//! applied position by position, so a weight at index 4 multiplies the
//! top-right neighbour and index 5 the center.

use crate::filter::Window;
use std::cmp::Ordering;

/// Laplacian edge weights.
pub const LAPLACIAN: Window = [0.0, 1.0, 0.0, 1.0, -4.0, 1.0, 0.0, 1.0, 0.0];
/// Gaussian blur weights, divided by [`GAUSSIAN_NORM`].
pub const GAUSSIAN: Window = [1.0, 2.0, 1.0, 2.0, 4.0, 2.0, 1.0, 2.0, 1.0];
/// Sum of [`GAUSSIAN`].
pub const GAUSSIAN_NORM: f32 = 16.0;
/// Sharpen weights.
pub const SHARPEN: Window = [0.0, -1.0, 0.0, -1.0, 5.0, -1.0, 0.0, -1.0, 0.0];
/// Sobel X gradient weights.
pub const SOBEL_X: Window = [1.0, 2.0, 1.0, 0.0, 0.0, 0.0, -1.0, -2.0, -1.0];
/// Sobel Y gradient weights.
pub const SOBEL_Y: Window = [1.0, 0.0, -1.0, 2.0, 0.0, -2.0, 1.0, 0.0, -1.0];
/// Prewitt X gradient weights.
pub const PREWITT_X: Window = [1.0, 0.0, -1.0, 1.0, 0.0, -1.0, 1.0, 0.0, -1.0];
/// Prewitt Y gradient weights.
pub const PREWITT_Y: Window = [1.0, 1.0, 1.0, 0.0, 0.0, 0.0, -1.0, -1.0, -1.0];

/// Dot product of samples and weights.
#[inline]
pub fn weighted_sum(window: &Window, weights: &Window) -> f32 {
    window.iter().zip(weights).map(|(s, w)| s * w).sum()
}

/// Middle value of the nine samples.
pub fn median(window: &Window) -> f32 {
    let mut sorted = *window;
    sorted.sort_unstable_by(|a, b| a.partial_cmp(b).unwrap_or(Ordering::Equal));
    sorted[4]
}

/// Laplacian edge response.
pub fn laplacian(window: &Window) -> f32 {
    weighted_sum(window, &LAPLACIAN)
}

/// `|gx| + |gy|` over samples 1..9 of the window.
///
/// The gradient weights are read against the window shifted left by one
/// sample, with zero filling the last slot. Output therefore differs from
/// a textbook Sobel, and a constant window `c` yields `2 * |c|`.
pub fn sobel(window: &Window) -> f32 {
    let shifted = [
        window[1], window[2], window[3], window[4], window[5], window[6], window[7], window[8], 0.0,
    ];
    weighted_sum(&shifted, &SOBEL_X).abs() + weighted_sum(&shifted, &SOBEL_Y).abs()
}

/// `|gx| + |gy|` with the Prewitt weights.
pub fn prewitt(window: &Window) -> f32 {
    weighted_sum(window, &PREWITT_X).abs() + weighted_sum(window, &PREWITT_Y).abs()
}

/// Mean of the nine samples.
pub fn box_blur(window: &Window) -> f32 {
    window.iter().sum::<f32>() / 9.0
}

/// Weighted 1-2-1 blur.
pub fn gaussian_blur(window: &Window) -> f32 {
    weighted_sum(window, &GAUSSIAN) / GAUSSIAN_NORM
}

/// Sharpen response.
pub fn sharpen(window: &Window) -> f32 {
    weighted_sum(window, &SHARPEN)
}
