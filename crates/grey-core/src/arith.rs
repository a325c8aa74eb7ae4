//! Elementwise arithmetic on [`GreyImage`].
//!
//! Image-with-image `+` and `-` combine the top-left-aligned intersection
//! of both operands, so `a + b` is `min(wa, wb) x min(ha, hb)`. Scalar
//! `+`, `-` and `*` touch every sample. Division and inversion can fail
//! and therefore return [`Result`]:
//!
//! ```rust
//! use grey_core::GreyImage;
//!
//! let img = GreyImage::from_slice(&[10.0, 20.0, 30.0, 40.0], 2, 2)?;
//! let out = &img * 2.0 + 5.0;
//! assert_eq!(out.data(), &[25.0, 45.0, 65.0, 85.0]);
//!
//! let halved = (&out / 5.0)?;
//! assert_eq!(halved.get(0, 0)?, 5.0);
//! assert!((&out / 0.0).is_err());
//! # Ok::<(), grey_core::Error>(())
//! ```

use std::ops::{Add, AddAssign, Div, Mul, MulAssign, Not, Sub, SubAssign};

use crate::{Error, GreyImage, Result};

/// Divisors and ranges with magnitude below this are treated as zero.
pub const DIVISION_EPSILON: f32 = 1.0e-6;

impl GreyImage {
    /// Combines the overlapping top-left region of two images sample by
    /// sample.
    fn zip_intersection<F>(&self, other: &GreyImage, op: F) -> GreyImage
    where
        F: Fn(f32, f32) -> f32,
    {
        let width = self.width().min(other.width());
        let height = self.height().min(other.height());
        let mut out = self.roi(0, 0, width, height);

        for y in 0..height {
            if let (Some(dst), Some(src)) = (out.row_mut(y), other.row(y)) {
                for (d, &s) in dst.iter_mut().zip(src) {
                    *d = op(*d, s);
                }
            }
        }
        out
    }

    /// Divides every sample by `divisor`.
    ///
    /// # Errors
    ///
    /// [`Error::DivisionByZero`] when `|divisor| < 1e-6`.
    pub fn checked_div(&self, divisor: f32) -> Result<GreyImage> {
        let mut out = self.clone();
        out.checked_div_assign(divisor)?;
        Ok(out)
    }

    /// Divides every sample by `divisor` in place.
    ///
    /// The image is left untouched on error.
    pub fn checked_div_assign(&mut self, divisor: f32) -> Result<()> {
        if divisor.abs() < DIVISION_EPSILON {
            return Err(Error::DivisionByZero("scalar division"));
        }
        self.map_in_place(|v| v / divisor);
        Ok(())
    }

    /// Mirrors every sample within the image's own value range.
    ///
    /// Each sample `v` becomes `min + range * (1 - (v - min) / range)`,
    /// so the darkest pixel becomes the brightest and vice versa.
    ///
    /// # Errors
    ///
    /// - [`Error::EmptyImage`] for an image without samples
    /// - [`Error::DivisionByZero`] when `max - min < 1e-6`
    pub fn invert(&self) -> Result<GreyImage> {
        let (min, max) = self.min_max()?;
        let range = max - min;
        if range < DIVISION_EPSILON {
            return Err(Error::DivisionByZero("invert"));
        }
        Ok(self.map(|v| min + range * (1.0 - (v - min) / range)))
    }

    /// In place `v := (v + shift) * scale` on every sample.
    pub fn shift_scale(&mut self, shift: f32, scale: f32) {
        self.map_in_place(|v| (v + shift) * scale);
    }

    /// Rescales samples so the minimum maps to 0 and the maximum to 1.
    ///
    /// # Errors
    ///
    /// - [`Error::EmptyImage`] for an image without samples
    /// - [`Error::DivisionByZero`] for a constant image
    pub fn normalize(&mut self) -> Result<()> {
        let (min, max) = self.min_max()?;
        if (max - min).abs() < DIVISION_EPSILON {
            return Err(Error::DivisionByZero("normalize"));
        }
        self.shift_scale(-min, 1.0 / (max - min));
        Ok(())
    }
}

// ============================================================================
// Image with image
// ============================================================================

macro_rules! image_op {
    ($trait:ident, $method:ident, $assign_trait:ident, $assign_method:ident, $op:tt) => {
        impl $trait<&GreyImage> for &GreyImage {
            type Output = GreyImage;

            fn $method(self, rhs: &GreyImage) -> GreyImage {
                self.zip_intersection(rhs, |a, b| a $op b)
            }
        }

        impl $trait<&GreyImage> for GreyImage {
            type Output = GreyImage;

            fn $method(self, rhs: &GreyImage) -> GreyImage {
                &self $op rhs
            }
        }

        impl $trait<GreyImage> for GreyImage {
            type Output = GreyImage;

            fn $method(self, rhs: GreyImage) -> GreyImage {
                &self $op &rhs
            }
        }

        impl $assign_trait<&GreyImage> for GreyImage {
            fn $assign_method(&mut self, rhs: &GreyImage) {
                *self = &*self $op rhs;
            }
        }

        impl $assign_trait<GreyImage> for GreyImage {
            fn $assign_method(&mut self, rhs: GreyImage) {
                *self = &*self $op &rhs;
            }
        }
    };
}

image_op!(Add, add, AddAssign, add_assign, +);
image_op!(Sub, sub, SubAssign, sub_assign, -);

// ============================================================================
// Image with scalar
// ============================================================================

macro_rules! scalar_op {
    ($trait:ident, $method:ident, $assign_trait:ident, $assign_method:ident, $op:tt) => {
        impl $trait<f32> for &GreyImage {
            type Output = GreyImage;

            fn $method(self, rhs: f32) -> GreyImage {
                self.map(|v| v $op rhs)
            }
        }

        impl $trait<f32> for GreyImage {
            type Output = GreyImage;

            fn $method(mut self, rhs: f32) -> GreyImage {
                self.map_in_place(|v| v $op rhs);
                self
            }
        }

        impl $assign_trait<f32> for GreyImage {
            fn $assign_method(&mut self, rhs: f32) {
                self.map_in_place(|v| v $op rhs);
            }
        }
    };
}

scalar_op!(Add, add, AddAssign, add_assign, +);
scalar_op!(Sub, sub, SubAssign, sub_assign, -);
scalar_op!(Mul, mul, MulAssign, mul_assign, *);

impl Div<f32> for &GreyImage {
    type Output = Result<GreyImage>;

    fn div(self, rhs: f32) -> Result<GreyImage> {
        self.checked_div(rhs)
    }
}

impl Div<f32> for GreyImage {
    type Output = Result<GreyImage>;

    fn div(mut self, rhs: f32) -> Result<GreyImage> {
        self.checked_div_assign(rhs)?;
        Ok(self)
    }
}

impl Not for &GreyImage {
    type Output = Result<GreyImage>;

    fn not(self) -> Result<GreyImage> {
        self.invert()
    }
}

impl Not for GreyImage {
    type Output = Result<GreyImage>;

    fn not(self) -> Result<GreyImage> {
        self.invert()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ErrorKind;
    use approx::assert_relative_eq;

    fn ramp(width: u32, height: u32) -> GreyImage {
        let data: Vec<f32> = (0..width * height).map(|i| i as f32).collect();
        GreyImage::from_vec(data, width, height).unwrap()
    }

    #[test]
    fn test_scalar_chain() {
        let img = GreyImage::from_slice(&[10.0, 20.0, 30.0, 40.0], 2, 2).unwrap();
        let out = &img * 2.0 + 5.0;
        assert_eq!(out.data(), &[25.0, 45.0, 65.0, 85.0]);
        assert_eq!(out.dimensions(), (2, 2));
    }

    #[test]
    fn test_scalar_assign() {
        let mut img = GreyImage::filled(3, 1, 4.0);
        img += 1.0;
        img *= 3.0;
        img -= 5.0;
        assert!(img.data().iter().all(|&v| v == 10.0));
    }

    #[test]
    fn test_self_subtraction_is_zero() {
        let a = ramp(4, 3);
        let diff = &a - &a;
        assert_eq!(diff.dimensions(), (4, 3));
        assert!(diff.data().iter().all(|&v| v == 0.0));
    }

    #[test]
    fn test_add_intersection() {
        let a = ramp(3, 2);
        let b = GreyImage::filled(2, 4, 100.0);
        let sum = &a + &b;
        assert_eq!(sum.dimensions(), (2, 2));
        assert_eq!(sum.data(), &[100.0, 101.0, 103.0, 104.0]);

        let owned = a.clone() + b.clone();
        assert_eq!(owned, sum);
    }

    #[test]
    fn test_add_assign_resizes_to_intersection() {
        let mut a = ramp(3, 3);
        a -= GreyImage::filled(1, 2, 1.0);
        assert_eq!(a.dimensions(), (1, 2));
        assert_eq!(a.data(), &[-1.0, 2.0]);
    }

    #[test]
    fn test_division() {
        let img = GreyImage::filled(2, 2, 9.0);
        let out = (&img / 3.0).unwrap();
        assert!(out.data().iter().all(|&v| v == 3.0));

        assert_eq!((&img / 0.0).unwrap_err().kind(), ErrorKind::DivisionByZero);
        assert_eq!((&img / 1.0e-7).unwrap_err().kind(), ErrorKind::DivisionByZero);

        let mut same = img.clone();
        assert!(same.checked_div_assign(-5.0e-7).is_err());
        assert_eq!(same, img);
    }

    #[test]
    fn test_invert() {
        let img = GreyImage::from_slice(&[0.0, 64.0, 255.0], 3, 1).unwrap();
        let inv = (!&img).unwrap();
        assert_relative_eq!(inv.data()[0], 255.0, epsilon = 1e-3);
        assert_relative_eq!(inv.data()[1], 191.0, epsilon = 1e-3);
        assert_relative_eq!(inv.data()[2], 0.0, epsilon = 1e-3);
    }

    #[test]
    fn test_invert_errors() {
        let flat = GreyImage::filled(2, 2, 7.0);
        assert_eq!(flat.invert().unwrap_err().kind(), ErrorKind::DivisionByZero);
        assert_eq!(
            GreyImage::empty().invert().unwrap_err().kind(),
            ErrorKind::EmptyImage
        );
    }

    #[test]
    fn test_normalize() {
        let mut img = GreyImage::from_slice(&[-3.0, 1.0, 5.0, 2.5], 2, 2).unwrap();
        img.normalize().unwrap();
        let (min, max) = img.min_max().unwrap();
        assert_relative_eq!(min, 0.0, epsilon = 1e-6);
        assert_relative_eq!(max, 1.0, epsilon = 1e-6);
        assert_relative_eq!(img.data()[1], 0.5, epsilon = 1e-6);
    }

    #[test]
    fn test_normalize_constant_fails() {
        let mut img = GreyImage::filled(3, 3, 2.0);
        assert_eq!(img.normalize().unwrap_err().kind(), ErrorKind::DivisionByZero);
    }

    #[test]
    fn test_shift_scale() {
        let mut img = GreyImage::filled(1, 1, 2.0);
        img.shift_scale(3.0, 2.0);
        assert_eq!(img.get(0, 0).unwrap(), 10.0);
    }
}
