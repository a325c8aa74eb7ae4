//! Two-image blending and threshold segmentation.
//!
//! # Example
//!
//! ```rust
//! use grey_core::GreyImage;
//! use grey_ops::composite::{blend, segment};
//!
//! let a = GreyImage::filled(2, 2, 100.0);
//! let b = GreyImage::filled(2, 2, 40.0);
//!
//! // a + (1 - 0.75) * b
//! let mixed = blend(&a, &b, 0.75)?;
//! assert_eq!(mixed.get(0, 0)?, 110.0);
//!
//! let mask = segment(&mixed, 128.0);
//! assert_eq!(mask.get(1, 1)?, 0.0);
//! # Ok::<(), grey_core::Error>(())
//! ```

use grey_core::{Error, GreyImage, Result};

#[allow(unused_imports)]
use tracing::{debug, trace};

/// Value written for samples above the segmentation threshold.
pub const FOREGROUND: f32 = 255.0;
/// Value written for samples below the segmentation threshold.
pub const BACKGROUND: f32 = 0.0;

/// Adds `(1 - ratio) * b` to `a`, sample by sample.
///
/// `a` is kept at full weight for every `ratio`, so the result is not a
/// convex mix: `blend(a, a, 1.0)` equals `a`, while `blend(a, b, 0.0)`
/// is `a + b`.
///
/// # Errors
///
/// [`Error::DimensionMismatch`] if `a` and `b` differ in size.
pub fn blend(a: &GreyImage, b: &GreyImage, ratio: f32) -> Result<GreyImage> {
    if a.dimensions() != b.dimensions() {
        return Err(Error::dimension_mismatch(a.dimensions(), b.dimensions()));
    }
    let (width, height) = a.dimensions();
    trace!(width, height, ratio, "composite::blend");

    let weight = 1.0 - ratio;
    let data: Vec<f32> = a
        .data()
        .iter()
        .zip(b.data())
        .map(|(&pa, &pb)| pa + weight * pb)
        .collect();
    GreyImage::from_vec(data, width, height)
}

/// Binary threshold.
///
/// Samples below `threshold` become [`BACKGROUND`], samples above become
/// [`FOREGROUND`]. A sample exactly equal to `threshold` keeps its value.
pub fn segment(image: &GreyImage, threshold: f32) -> GreyImage {
    trace!(width = image.width(), height = image.height(), threshold, "composite::segment");
    image.map(|v| threshold_sample(v, threshold))
}

/// In-place variant of [`segment`].
pub fn segment_in_place(image: &mut GreyImage, threshold: f32) {
    debug!(threshold, "Segmenting {}x{} image", image.width(), image.height());
    image.map_in_place(|v| threshold_sample(v, threshold));
}

#[inline]
fn threshold_sample(v: f32, threshold: f32) -> f32 {
    if v < threshold {
        BACKGROUND
    } else if v > threshold {
        FOREGROUND
    } else {
        v
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use grey_core::ErrorKind;

    #[test]
    fn test_blend_full_ratio_keeps_a() {
        let a = GreyImage::from_slice(&[1.0, 2.0, 3.0, 4.0], 2, 2).unwrap();
        assert_eq!(blend(&a, &a, 1.0).unwrap(), a);
    }

    #[test]
    fn test_blend_zero_ratio_adds() {
        let a = GreyImage::from_slice(&[1.0, 2.0, 3.0, 4.0], 2, 2).unwrap();
        let b = GreyImage::from_slice(&[10.0, 20.0, 30.0, 40.0], 2, 2).unwrap();
        let out = blend(&a, &b, 0.0).unwrap();
        assert_eq!(out.data(), &[11.0, 22.0, 33.0, 44.0]);
    }

    #[test]
    fn test_blend_half() {
        let a = GreyImage::filled(3, 1, 10.0);
        let b = GreyImage::filled(3, 1, 4.0);
        for &v in blend(&a, &b, 0.5).unwrap().data() {
            assert_relative_eq!(v, 12.0);
        }
    }

    #[test]
    fn test_blend_dimension_mismatch() {
        let a = GreyImage::new(2, 2);
        let b = GreyImage::new(2, 3);
        let err = blend(&a, &b, 0.5).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::DimensionMismatch);
    }

    #[test]
    fn test_blend_empty() {
        let out = blend(&GreyImage::empty(), &GreyImage::empty(), 0.3).unwrap();
        assert!(out.is_empty());
    }

    #[test]
    fn test_segment() {
        let img = GreyImage::from_slice(&[10.0, 128.0, 200.0, 127.9], 2, 2).unwrap();
        let out = segment(&img, 128.0);
        assert_eq!(out.data(), &[0.0, 128.0, 255.0, 0.0]);
        // source untouched
        assert_eq!(img.get(0, 0).unwrap(), 10.0);
    }

    #[test]
    fn test_threshold_sample() {
        assert_eq!(threshold_sample(-1.0, 0.5), BACKGROUND);
        assert_eq!(threshold_sample(0.5, 0.5), 0.5);
        assert_eq!(threshold_sample(0.6, 0.5), FOREGROUND);
    }

    #[test]
    fn test_segment_in_place_matches() {
        let mut img = GreyImage::from_slice(&[-5.0, 0.0, 5.0], 3, 1).unwrap();
        let expected = segment(&img, 0.0);
        segment_in_place(&mut img, 0.0);
        assert_eq!(img, expected);
        assert_eq!(img.data(), &[0.0, 0.0, 255.0]);
    }
}
