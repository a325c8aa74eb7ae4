//! Statistics over [`GreyImage`] samples.
//!
//! Sums are accumulated in `f64` and narrowed to `f32` on return. Every
//! statistic that is undefined for zero samples reports
//! [`Error::EmptyImage`] instead of producing `NaN`.

use std::num::NonZeroUsize;

use crate::arith::DIVISION_EPSILON;
use crate::{Error, GreyImage, Result};

impl GreyImage {
    /// Returns the smallest sample.
    pub fn min(&self) -> Result<f32> {
        self.min_max().map(|(min, _)| min)
    }

    /// Returns the largest sample.
    pub fn max(&self) -> Result<f32> {
        self.min_max().map(|(_, max)| max)
    }

    /// Returns `(min, max)` in a single pass.
    ///
    /// # Errors
    ///
    /// [`Error::EmptyImage`] when the image has no samples.
    pub fn min_max(&self) -> Result<(f32, f32)> {
        let (&first, rest) = self.data().split_first().ok_or(Error::EmptyImage)?;
        Ok(rest
            .iter()
            .fold((first, first), |(lo, hi), &v| (lo.min(v), hi.max(v))))
    }

    fn mean_f64(&self) -> Result<f64> {
        if self.is_empty() {
            return Err(Error::EmptyImage);
        }
        let sum: f64 = self.data().iter().map(|&v| v as f64).sum();
        Ok(sum / self.len() as f64)
    }

    fn variance_f64(&self) -> Result<f64> {
        let mean = self.mean_f64()?;
        let sq: f64 = self
            .data()
            .iter()
            .map(|&v| {
                let d = v as f64 - mean;
                d * d
            })
            .sum();
        Ok(sq / self.len() as f64)
    }

    /// Arithmetic mean of all samples.
    pub fn mean(&self) -> Result<f32> {
        self.mean_f64().map(|m| m as f32)
    }

    /// Population variance: mean of squared deviations from the mean.
    pub fn variance(&self) -> Result<f32> {
        self.variance_f64().map(|v| v as f32)
    }

    /// Population standard deviation.
    pub fn std_dev(&self) -> Result<f32> {
        self.variance_f64().map(|v| v.sqrt() as f32)
    }

    fn ensure_same_size(&self, other: &GreyImage) -> Result<()> {
        if self.dimensions() != other.dimensions() {
            return Err(Error::dimension_mismatch(
                self.dimensions(),
                other.dimensions(),
            ));
        }
        Ok(())
    }

    /// Sum of absolute differences between corresponding samples.
    ///
    /// # Errors
    ///
    /// [`Error::DimensionMismatch`] unless both images have equal size.
    pub fn sum_abs_error(&self, other: &GreyImage) -> Result<f32> {
        self.ensure_same_size(other)?;
        let sum: f64 = self
            .data()
            .iter()
            .zip(other.data())
            .map(|(&a, &b)| (a as f64 - b as f64).abs())
            .sum();
        Ok(sum as f32)
    }

    /// Normalized cross-correlation as a percentage.
    ///
    /// `100 * Σ (a - mean_a)(b - mean_b) / (std_a * std_b) / N`. Identical
    /// non-constant images score 100, an image against its inversion -100.
    ///
    /// # Errors
    ///
    /// - [`Error::DimensionMismatch`] unless both images have equal size
    /// - [`Error::EmptyImage`] for zero-sample images
    /// - [`Error::DivisionByZero`] if either standard deviation is below `1e-6`
    pub fn normalized_cross_correlation(&self, other: &GreyImage) -> Result<f32> {
        self.ensure_same_size(other)?;
        let mean_a = self.mean_f64()?;
        let mean_b = other.mean_f64()?;
        let std_a = self.variance_f64()?.sqrt();
        let std_b = other.variance_f64()?.sqrt();
        let eps = DIVISION_EPSILON as f64;
        if std_a < eps || std_b < eps {
            return Err(Error::DivisionByZero("normalized_cross_correlation"));
        }

        let cross: f64 = self
            .data()
            .iter()
            .zip(other.data())
            .map(|(&a, &b)| (a as f64 - mean_a) * (b as f64 - mean_b))
            .sum();
        let ncc = cross / (std_a * std_b) / self.len() as f64;
        Ok((ncc * 100.0) as f32)
    }

    /// Bins all samples into `bins` equal-width buckets spanning
    /// `[min, max]`.
    ///
    /// Bin `k` counts samples with `floor(bins * (v - min) / (max - min)) == k`;
    /// a sample equal to `max` lands in the last bin. For a constant image
    /// every sample lands in bin 0.
    ///
    /// ```rust
    /// use std::num::NonZeroUsize;
    /// use grey_core::GreyImage;
    ///
    /// let img = GreyImage::from_slice(&[0.0, 1.0, 2.0, 3.0], 4, 1)?;
    /// let hist = img.histogram(NonZeroUsize::new(2).unwrap())?;
    /// assert_eq!(hist.bins(), &[2, 2]);
    /// # Ok::<(), grey_core::Error>(())
    /// ```
    ///
    /// # Errors
    ///
    /// [`Error::EmptyImage`] when the image has no samples.
    pub fn histogram(&self, bins: NonZeroUsize) -> Result<Histogram> {
        let (min, max) = self.min_max()?;
        let n = bins.get();
        let mut counts = vec![0u32; n];
        let range = max as f64 - min as f64;

        for &v in self.data() {
            let k = if range > 0.0 {
                let pos = n as f64 * ((v as f64 - min as f64) / range);
                (pos as usize).min(n - 1)
            } else {
                0
            };
            counts[k] += 1;
        }

        Ok(Histogram {
            bins: counts,
            min,
            max,
        })
    }
}

/// Equal-width bin counts over an image's value range.
#[derive(Debug, Clone, PartialEq)]
pub struct Histogram {
    bins: Vec<u32>,
    min: f32,
    max: f32,
}

impl Histogram {
    /// Per-bin sample counts.
    #[inline]
    pub fn bins(&self) -> &[u32] {
        &self.bins
    }

    /// Number of bins.
    #[inline]
    pub fn len(&self) -> usize {
        self.bins.len()
    }

    /// Always `false`; a histogram has at least one bin.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.bins.is_empty()
    }

    /// Smallest sample of the source image.
    #[inline]
    pub fn min(&self) -> f32 {
        self.min
    }

    /// Largest sample of the source image.
    #[inline]
    pub fn max(&self) -> f32 {
        self.max
    }

    /// Width of one bin in sample units.
    pub fn bin_width(&self) -> f32 {
        (self.max - self.min) / self.bins.len() as f32
    }

    /// Lower edge of bin `k`.
    pub fn bin_floor(&self, k: usize) -> f32 {
        self.min + k as f32 * self.bin_width()
    }

    /// Total number of counted samples.
    pub fn total(&self) -> u64 {
        self.bins.iter().map(|&c| c as u64).sum()
    }

    /// Iterates `(bin_floor, count)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (f32, u32)> + '_ {
        self.bins
            .iter()
            .enumerate()
            .map(|(k, &count)| (self.bin_floor(k), count))
    }
}
