//! Greyscale image buffer.
//!
//! [`GreyImage`] owns a single contiguous `Vec<f32>` of intensities laid
//! out row-major, top-to-bottom:
//!
//! ```text
//! index = y * width + x
//!
//! Memory: [s00 s10 s20 ...]  <- Row 0
//!         [s01 s11 s21 ...]  <- Row 1
//! ```
//!
//! The buffer is never shared: [`Clone`] performs a deep copy, and every
//! operation that produces a new image allocates fresh storage. Pixel
//! access goes through bounds-checked [`GreyImage::get`] and
//! [`GreyImage::set`]; slice access ([`GreyImage::data`],
//! [`GreyImage::row`]) borrows from the image and cannot outlive it.
//!
//! # Usage
//!
//! ```rust
//! use grey_core::GreyImage;
//!
//! let mut img = GreyImage::new(4, 3);
//! img.set(1, 2, 42.0)?;
//! assert_eq!(img.get(1, 2)?, 42.0);
//! assert!(img.get(4, 0).is_err());
//! # Ok::<(), grey_core::Error>(())
//! ```
//!
//! # Used By
//!
//! - `grey-io` - codecs decode into and encode from `GreyImage`
//! - `grey-ops` - filters and compositing

use crate::{Error, Rect, Result};

/// Two samples closer than this compare equal in `==`.
pub const SAMPLE_EPSILON: f32 = 1.0e-6;

/// Owned single-channel image with `f32` samples.
///
/// # Invariants
///
/// - `data.len() == width * height`
/// - an image with `width == 0` or `height == 0` holds no samples and is
///   the canonical empty state
///
/// # Example
///
/// ```rust
/// use grey_core::GreyImage;
///
/// let img = GreyImage::from_slice(&[10.0, 20.0, 30.0, 40.0], 2, 2)?;
/// assert_eq!(img.get(1, 1)?, 40.0);
/// # Ok::<(), grey_core::Error>(())
/// ```
#[derive(Clone, Default)]
pub struct GreyImage {
    data: Vec<f32>,
    width: u32,
    height: u32,
}

/// Number of samples held by a `width x height` image.
#[inline]
pub(crate) fn sample_count(width: u32, height: u32) -> usize {
    width as usize * height as usize
}

impl GreyImage {
    /// Creates an empty (0x0) image.
    #[inline]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Creates a zero-filled image.
    ///
    /// ```rust
    /// use grey_core::GreyImage;
    ///
    /// let img = GreyImage::new(640, 480);
    /// assert_eq!(img.len(), 640 * 480);
    /// ```
    pub fn new(width: u32, height: u32) -> Self {
        Self::filled(width, height, 0.0)
    }

    /// Creates an image where every sample is `value`.
    pub fn filled(width: u32, height: u32, value: f32) -> Self {
        Self {
            data: vec![value; sample_count(width, height)],
            width,
            height,
        }
    }

    /// Creates an image by copying `data`.
    ///
    /// # Errors
    ///
    /// [`Error::SizeMismatch`] if `data.len() != width * height`.
    pub fn from_slice(data: &[f32], width: u32, height: u32) -> Result<Self> {
        Self::check_len(data.len(), width, height)?;
        Ok(Self {
            data: data.to_vec(),
            width,
            height,
        })
    }

    /// Creates an image that takes ownership of `data`.
    ///
    /// # Errors
    ///
    /// [`Error::SizeMismatch`] if `data.len() != width * height`.
    pub fn from_vec(data: Vec<f32>, width: u32, height: u32) -> Result<Self> {
        Self::check_len(data.len(), width, height)?;
        Ok(Self {
            data,
            width,
            height,
        })
    }

    fn check_len(len: usize, width: u32, height: u32) -> Result<()> {
        let expected = sample_count(width, height);
        if len != expected {
            return Err(Error::SizeMismatch {
                expected: expected as u64,
                actual: len as u64,
            });
        }
        Ok(())
    }

    /// Returns the image width in pixels.
    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Returns the image height in pixels.
    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Returns `(width, height)`.
    #[inline]
    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Returns the number of samples.
    #[inline]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Returns `true` if the image holds no samples.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Returns a rectangle covering the entire image.
    #[inline]
    pub fn bounds(&self) -> Rect {
        Rect::from_size(self.width, self.height)
    }

    /// Returns `width / height`.
    ///
    /// # Errors
    ///
    /// [`Error::DivisionByZero`] for a zero-height image.
    pub fn aspect_ratio(&self) -> Result<f32> {
        if self.height == 0 {
            return Err(Error::DivisionByZero("aspect_ratio"));
        }
        Ok(self.width as f32 / self.height as f32)
    }

    #[inline]
    fn offset(&self, x: u32, y: u32) -> Result<usize> {
        if x >= self.width || y >= self.height {
            return Err(Error::out_of_bounds(x, y, self.width, self.height));
        }
        Ok(y as usize * self.width as usize + x as usize)
    }

    /// Returns the sample at (x, y).
    ///
    /// # Errors
    ///
    /// [`Error::OutOfBounds`] if `x >= width` or `y >= height`.
    #[inline]
    pub fn get(&self, x: u32, y: u32) -> Result<f32> {
        let offset = self.offset(x, y)?;
        Ok(self.data[offset])
    }

    /// Sets the sample at (x, y).
    ///
    /// # Errors
    ///
    /// [`Error::OutOfBounds`] if `x >= width` or `y >= height`.
    #[inline]
    pub fn set(&mut self, x: u32, y: u32, value: f32) -> Result<()> {
        let offset = self.offset(x, y)?;
        self.data[offset] = value;
        Ok(())
    }

    /// Returns all samples in row-major order.
    #[inline]
    pub fn data(&self) -> &[f32] {
        &self.data
    }

    /// Returns all samples mutably in row-major order.
    #[inline]
    pub fn data_mut(&mut self) -> &mut [f32] {
        &mut self.data
    }

    /// Consumes the image and returns its sample vector.
    #[inline]
    pub fn into_vec(self) -> Vec<f32> {
        self.data
    }

    /// Returns row `y`, or `None` past the last row.
    pub fn row(&self, y: u32) -> Option<&[f32]> {
        if y >= self.height {
            return None;
        }
        let start = y as usize * self.width as usize;
        Some(&self.data[start..start + self.width as usize])
    }

    /// Returns row `y` mutably, or `None` past the last row.
    pub fn row_mut(&mut self, y: u32) -> Option<&mut [f32]> {
        if y >= self.height {
            return None;
        }
        let start = y as usize * self.width as usize;
        let end = start + self.width as usize;
        Some(&mut self.data[start..end])
    }

    /// Sets every sample to `value`.
    pub fn fill(&mut self, value: f32) {
        self.data.fill(value);
    }

    /// Returns a new image with `f` applied to every sample.
    pub fn map<F>(&self, f: F) -> Self
    where
        F: Fn(f32) -> f32,
    {
        Self {
            data: self.data.iter().map(|&v| f(v)).collect(),
            width: self.width,
            height: self.height,
        }
    }

    /// Applies `f` to every sample in place.
    pub fn map_in_place<F>(&mut self, f: F)
    where
        F: Fn(f32) -> f32,
    {
        for v in &mut self.data {
            *v = f(*v);
        }
    }

    /// Iterates `(x, y, sample)` row by row.
    pub fn pixels(&self) -> impl Iterator<Item = (u32, u32, f32)> + '_ {
        let width = self.width.max(1) as usize;
        self.data
            .iter()
            .enumerate()
            .map(move |(i, &v)| ((i % width) as u32, (i / width) as u32, v))
    }

    /// Extracts a `width x height` region starting at (x, y).
    ///
    /// Cells of the region that fall outside this image stay zero, so the
    /// result always has exactly the requested size.
    ///
    /// ```rust
    /// use grey_core::GreyImage;
    ///
    /// let img = GreyImage::from_slice(&[1.0, 2.0, 3.0, 4.0], 2, 2)?;
    /// let roi = img.roi(1, 0, 2, 2);
    /// assert_eq!(roi.data(), &[2.0, 0.0, 4.0, 0.0]);
    /// # Ok::<(), grey_core::Error>(())
    /// ```
    pub fn roi(&self, x: u32, y: u32, width: u32, height: u32) -> Self {
        let mut out = Self::new(width, height);
        let Some(src) = Rect::new(x, y, width, height).clamp_to(self.width, self.height) else {
            return out;
        };

        let span = src.width as usize;
        for sy in src.y..src.bottom() {
            let src_start = sy as usize * self.width as usize + src.x as usize;
            let dst_start = (sy - y) as usize * width as usize + (src.x - x) as usize;
            out.data[dst_start..dst_start + span]
                .copy_from_slice(&self.data[src_start..src_start + span]);
        }
        out
    }
}

impl PartialEq for GreyImage {
    /// Equal when dimensions match and every sample pair differs by at
    /// most [`SAMPLE_EPSILON`].
    fn eq(&self, other: &Self) -> bool {
        self.width == other.width
            && self.height == other.height
            && self
                .data
                .iter()
                .zip(&other.data)
                .all(|(a, b)| (a - b).abs() <= SAMPLE_EPSILON)
    }
}

impl std::fmt::Debug for GreyImage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GreyImage")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("samples", &self.data.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ErrorKind;

    #[test]
    fn test_image_new() {
        let img = GreyImage::new(100, 50);
        assert_eq!(img.width(), 100);
        assert_eq!(img.height(), 50);
        assert_eq!(img.len(), 5000);
        assert!(img.data().iter().all(|&v| v == 0.0));
    }

    #[test]
    fn test_empty_states() {
        assert!(GreyImage::empty().is_empty());
        assert!(GreyImage::new(7, 0).is_empty());
        assert!(GreyImage::new(0, 7).is_empty());
        assert_eq!(GreyImage::new(0, 7).len(), 0);
    }

    #[test]
    fn test_set_get_roundtrip() {
        let mut img = GreyImage::new(5, 4);
        for (x, y) in img.bounds().iter_coords().collect::<Vec<_>>() {
            let v = (x * 10 + y) as f32 + 0.25;
            img.set(x, y, v).unwrap();
            assert_eq!(img.get(x, y).unwrap(), v);
        }
        // (4, 1) lives at 1 * 5 + 4
        assert_eq!(img.data()[9], 41.25);
    }

    #[test]
    fn test_out_of_bounds_every_size() {
        for (w, h) in [(1, 1), (3, 2), (2, 3)] {
            let mut img = GreyImage::new(w, h);
            assert_eq!(img.get(w, 0).unwrap_err().kind(), ErrorKind::OutOfBounds);
            assert_eq!(img.get(0, h).unwrap_err().kind(), ErrorKind::OutOfBounds);
            assert_eq!(img.set(w, 0, 1.0).unwrap_err().kind(), ErrorKind::OutOfBounds);
            assert_eq!(img.set(0, h, 1.0).unwrap_err().kind(), ErrorKind::OutOfBounds);
        }
        assert!(GreyImage::empty().get(0, 0).is_err());
    }

    #[test]
    fn test_from_slice_wrong_size() {
        let err = GreyImage::from_slice(&[1.0; 5], 2, 2).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::SizeMismatch);
    }

    #[test]
    fn test_clone_is_deep() {
        let a = GreyImage::filled(3, 3, 1.0);
        let mut b = a.clone();
        b.set(0, 0, 9.0).unwrap();
        assert_eq!(a.get(0, 0).unwrap(), 1.0);
        assert_eq!(b.get(0, 0).unwrap(), 9.0);
    }

    #[test]
    fn test_aspect_ratio() {
        assert_eq!(GreyImage::new(4, 2).aspect_ratio().unwrap(), 2.0);
        let err = GreyImage::new(4, 0).aspect_ratio().unwrap_err();
        assert_eq!(err.kind(), ErrorKind::DivisionByZero);
    }

    #[test]
    fn test_equality_tolerance() {
        let a = GreyImage::from_slice(&[1.0, 2.0], 2, 1).unwrap();
        let b = GreyImage::from_slice(&[1.0 + 5.0e-7, 2.0], 2, 1).unwrap();
        let c = GreyImage::from_slice(&[1.1, 2.0], 2, 1).unwrap();
        let d = GreyImage::from_slice(&[1.0, 2.0], 1, 2).unwrap();
        assert_eq!(a, b);
        assert_ne!(a, c);
        assert_ne!(a, d);
    }

    #[test]
    fn test_roi_inside_and_overhanging() {
        let img = GreyImage::from_slice(&[1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0, 9.0], 3, 3)
            .unwrap();

        let inner = img.roi(1, 1, 2, 2);
        assert_eq!(inner.data(), &[5.0, 6.0, 8.0, 9.0]);

        let over = img.roi(2, 2, 2, 2);
        assert_eq!(over.dimensions(), (2, 2));
        assert_eq!(over.data(), &[9.0, 0.0, 0.0, 0.0]);

        let outside = img.roi(10, 10, 2, 1);
        assert_eq!(outside.data(), &[0.0, 0.0]);
    }

    #[test]
    fn test_rows_and_pixels() {
        let img = GreyImage::from_slice(&[1.0, 2.0, 3.0, 4.0, 5.0, 6.0], 3, 2).unwrap();
        assert_eq!(img.row(1), Some(&[4.0, 5.0, 6.0][..]));
        assert_eq!(img.row(2), None);

        let px: Vec<_> = img.pixels().collect();
        assert_eq!(px[4], (1, 1, 5.0));
    }

    #[test]
    fn test_map() {
        let mut img = GreyImage::filled(2, 2, 0.5);
        let doubled = img.map(|v| v * 2.0);
        img.map_in_place(|v| v + 1.0);
        assert!(doubled.data().iter().all(|&v| v == 1.0));
        assert!(img.data().iter().all(|&v| v == 1.5));
    }

    #[test]
    fn test_fill_keeps_dimensions() {
        let mut img = GreyImage::from_slice(&[1.0, 2.0, 3.0, 4.0, 5.0, 6.0], 3, 2).unwrap();
        img.fill(-0.5);
        assert_eq!(img.dimensions(), (3, 2));
        assert!(img.data().iter().all(|&v| v == -0.5));
    }

    #[test]
    fn test_into_vec_is_row_major() {
        let mut img = GreyImage::new(2, 2);
        img.set(1, 0, 7.0).unwrap();
        img.set(0, 1, 9.0).unwrap();
        assert_eq!(img.into_vec(), vec![0.0, 7.0, 9.0, 0.0]);
        assert!(GreyImage::empty().into_vec().is_empty());
    }
}
