//! 3x3 neighbourhood filters.
//!
//! Every output pixel is computed from the 3x3 [`Window`] around the
//! matching input pixel. Windows are gathered in a fixed order shared by
//! all pixels, interior and border alike:
//!
//! ```text
//! index:  0   1   2   3   4   5   6   7   8
//! (dx,dy) TL  L   BL  T   TR  C   R   B   BR
//! ```
//!
//! Neighbours outside the image are resolved by a [`BorderPolicy`]. The
//! default, [`BorderPolicy::ReplicateCenter`], substitutes the center
//! pixel; [`BorderPolicy::Clamp`] uses the nearest edge pixel instead.
//!
//! # Filters
//!
//! | Id | [`Filter`] | Kernel |
//! |----|------------|--------|
//! | 0 | Median | [`kernels::median`] |
//! | 1 | Laplacian | [`kernels::laplacian`] |
//! | 2 | GaussianBlur | [`kernels::gaussian_blur`] |
//! | 3 | BoxBlur | [`kernels::box_blur`] |
//! | 4 | Sharpen | [`kernels::sharpen`] |
//! | 5 | Prewitt | [`kernels::prewitt`] |
//! | 6 | Sobel | [`kernels::sobel`] |
//!
//! # Example
//!
//! ```rust
//! use grey_core::GreyImage;
//! use grey_ops::filter::{apply_filter, Filter};
//!
//! let img = GreyImage::filled(8, 8, 0.5);
//! let blurred = apply_filter(&img, Filter::BoxBlur);
//! assert_eq!(blurred.dimensions(), (8, 8));
//! ```

use crate::kernels;
use grey_core::{Error, GreyImage, Result};
use std::fmt;
use std::str::FromStr;

#[allow(unused_imports)]
use tracing::{debug, trace};

/// Nine samples around a pixel, in [`WINDOW_OFFSETS`] order.
pub type Window = [f32; 9];

/// `(dx, dy)` of each window slot relative to the center pixel.
pub const WINDOW_OFFSETS: [(i32, i32); 9] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (1, -1),
    (0, 0),
    (1, 0),
    (0, 1),
    (1, 1),
];

/// Window slot holding the center pixel.
pub const CENTER: usize = 5;

/// How neighbours outside the image are sampled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum BorderPolicy {
    /// Use the center pixel for every missing neighbour.
    #[default]
    ReplicateCenter,
    /// Use the nearest in-bounds pixel (edge extension).
    Clamp,
}

impl BorderPolicy {
    /// Maps neighbour `(x + dx, y + dy)` of an in-bounds pixel to the
    /// coordinate actually sampled in a `width x height` image.
    ///
    /// ```rust
    /// use grey_ops::filter::BorderPolicy;
    ///
    /// assert_eq!(BorderPolicy::ReplicateCenter.resolve(0, 0, -1, 1, 4, 4), (0, 0));
    /// assert_eq!(BorderPolicy::Clamp.resolve(0, 0, -1, 1, 4, 4), (0, 1));
    /// assert_eq!(BorderPolicy::Clamp.resolve(1, 1, 1, 1, 4, 4), (2, 2));
    /// ```
    #[inline]
    pub fn resolve(self, x: u32, y: u32, dx: i32, dy: i32, width: u32, height: u32) -> (u32, u32) {
        let nx = x as i64 + dx as i64;
        let ny = y as i64 + dy as i64;
        let (w, h) = (width as i64, height as i64);

        if (0..w).contains(&nx) && (0..h).contains(&ny) {
            return (nx as u32, ny as u32);
        }
        match self {
            BorderPolicy::ReplicateCenter => (x, y),
            BorderPolicy::Clamp => (nx.clamp(0, w - 1) as u32, ny.clamp(0, h - 1) as u32),
        }
    }
}

/// Options for [`apply_filter_with`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FilterOptions {
    /// Border sampling. Default: [`BorderPolicy::ReplicateCenter`].
    pub border: BorderPolicy,
}

/// Available 3x3 filters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Filter {
    /// Median of the window.
    Median,
    /// Laplacian edge detector.
    Laplacian,
    /// 1-2-1 weighted blur.
    GaussianBlur,
    /// Unweighted mean.
    BoxBlur,
    /// Center-boosted sharpen.
    Sharpen,
    /// Prewitt gradient magnitude (`|gx| + |gy|`).
    Prewitt,
    /// Sobel gradient magnitude (`|gx| + |gy|`).
    Sobel,
}

impl Filter {
    /// All filters in id order.
    pub const ALL: [Filter; 7] = [
        Filter::Median,
        Filter::Laplacian,
        Filter::GaussianBlur,
        Filter::BoxBlur,
        Filter::Sharpen,
        Filter::Prewitt,
        Filter::Sobel,
    ];

    /// Looks up a filter by numeric id (0..=6).
    ///
    /// # Errors
    ///
    /// [`Error::UnknownFilter`] for any other id.
    pub fn from_id(id: i32) -> Result<Self> {
        usize::try_from(id)
            .ok()
            .and_then(|i| Self::ALL.get(i).copied())
            .ok_or_else(|| Error::UnknownFilter(id.to_string()))
    }

    /// Numeric id of this filter.
    pub fn id(self) -> i32 {
        match self {
            Filter::Median => 0,
            Filter::Laplacian => 1,
            Filter::GaussianBlur => 2,
            Filter::BoxBlur => 3,
            Filter::Sharpen => 4,
            Filter::Prewitt => 5,
            Filter::Sobel => 6,
        }
    }

    /// Lowercase name, as accepted by [`FromStr`].
    pub fn name(self) -> &'static str {
        match self {
            Filter::Median => "median",
            Filter::Laplacian => "laplacian",
            Filter::GaussianBlur => "gaussian_blur",
            Filter::BoxBlur => "box_blur",
            Filter::Sharpen => "sharpen",
            Filter::Prewitt => "prewitt",
            Filter::Sobel => "sobel",
        }
    }

    /// Pointwise kernel for this filter.
    pub fn kernel(self) -> fn(&Window) -> f32 {
        match self {
            Filter::Median => kernels::median,
            Filter::Laplacian => kernels::laplacian,
            Filter::GaussianBlur => kernels::gaussian_blur,
            Filter::BoxBlur => kernels::box_blur,
            Filter::Sharpen => kernels::sharpen,
            Filter::Prewitt => kernels::prewitt,
            Filter::Sobel => kernels::sobel,
        }
    }
}

impl TryFrom<i32> for Filter {
    type Error = Error;

    fn try_from(id: i32) -> Result<Self> {
        Self::from_id(id)
    }
}

impl FromStr for Filter {
    type Err = Error;

    /// Parses a name such as `"box_blur"`; `-` and case are ignored.
    fn from_str(s: &str) -> Result<Self> {
        let wanted = s.trim().to_ascii_lowercase().replace('-', "_");
        Self::ALL
            .into_iter()
            .find(|f| f.name() == wanted)
            .ok_or_else(|| Error::UnknownFilter(s.to_string()))
    }
}

impl fmt::Display for Filter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Gathers the window of an in-bounds pixel.
#[inline]
fn gather(src: &[f32], width: u32, height: u32, x: u32, y: u32, border: BorderPolicy) -> Window {
    let mut window = [0.0; 9];
    for (slot, &(dx, dy)) in window.iter_mut().zip(WINDOW_OFFSETS.iter()) {
        let (sx, sy) = border.resolve(x, y, dx, dy, width, height);
        *slot = src[sy as usize * width as usize + sx as usize];
    }
    window
}

/// Returns the 3x3 window around `(x, y)`.
///
/// # Errors
///
/// [`Error::OutOfBounds`] if `(x, y)` is not inside the image.
pub fn window_at(image: &GreyImage, x: u32, y: u32, border: BorderPolicy) -> Result<Window> {
    let (width, height) = image.dimensions();
    if x >= width || y >= height {
        return Err(Error::out_of_bounds(x, y, width, height));
    }
    Ok(gather(image.data(), width, height, x, y, border))
}

/// Applies `filter` to every pixel with default options.
///
/// The result has the same dimensions as `image`.
pub fn apply_filter(image: &GreyImage, filter: Filter) -> GreyImage {
    apply_filter_with(image, filter, &FilterOptions::default())
}

/// Applies `filter` to every pixel with the given border policy.
pub fn apply_filter_with(image: &GreyImage, filter: Filter, options: &FilterOptions) -> GreyImage {
    let (width, height) = image.dimensions();
    trace!(width, height, filter = filter.name(), border = ?options.border, "apply_filter");
    debug!(width, height, "Applying {} filter", filter);

    let kernel = filter.kernel();
    let src = image.data();
    let mut out = GreyImage::new(width, height);
    let dst = out.data_mut();

    for y in 0..height {
        for x in 0..width {
            let window = gather(src, width, height, x, y, options.border);
            dst[y as usize * width as usize + x as usize] = kernel(&window);
        }
    }
    out
}

/// Applies the filter with numeric id `id` (see [`Filter::from_id`]).
///
/// # Errors
///
/// [`Error::UnknownFilter`] for an id outside 0..=6; no pixel is
/// processed in that case.
pub fn apply_filter_id(image: &GreyImage, id: i32) -> Result<GreyImage> {
    let filter = Filter::from_id(id)?;
    Ok(apply_filter(image, filter))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use grey_core::ErrorKind;

    /// 1 2 3 / 4 5 6 / 7 8 9
    fn grid() -> GreyImage {
        let data: Vec<f32> = (1..=9).map(|v| v as f32).collect();
        GreyImage::from_vec(data, 3, 3).unwrap()
    }

    fn window(x: u32, y: u32, border: BorderPolicy) -> Window {
        window_at(&grid(), x, y, border).unwrap()
    }

    #[test]
    fn test_window_interior() {
        let expected = [1.0, 4.0, 7.0, 2.0, 3.0, 5.0, 6.0, 8.0, 9.0];
        assert_eq!(window(1, 1, BorderPolicy::ReplicateCenter), expected);
        assert_eq!(window(1, 1, BorderPolicy::Clamp), expected);
    }

    #[test]
    fn test_window_corners_replicate_center() {
        let p = BorderPolicy::ReplicateCenter;
        assert_eq!(window(0, 0, p), [1.0, 1.0, 1.0, 1.0, 1.0, 1.0, 2.0, 4.0, 5.0]);
        assert_eq!(window(2, 0, p), [3.0, 2.0, 5.0, 3.0, 3.0, 3.0, 3.0, 6.0, 3.0]);
        assert_eq!(window(0, 2, p), [7.0, 7.0, 7.0, 4.0, 5.0, 7.0, 8.0, 7.0, 7.0]);
        assert_eq!(window(2, 2, p), [5.0, 8.0, 9.0, 6.0, 9.0, 9.0, 9.0, 9.0, 9.0]);
    }

    #[test]
    fn test_window_edges_replicate_center() {
        let p = BorderPolicy::ReplicateCenter;
        assert_eq!(window(1, 0, p), [2.0, 1.0, 4.0, 2.0, 2.0, 2.0, 3.0, 5.0, 6.0]);
        assert_eq!(window(0, 1, p), [4.0, 4.0, 4.0, 1.0, 2.0, 4.0, 5.0, 7.0, 8.0]);
        assert_eq!(window(2, 1, p), [2.0, 5.0, 8.0, 3.0, 6.0, 6.0, 6.0, 9.0, 6.0]);
        assert_eq!(window(1, 2, p), [4.0, 7.0, 8.0, 5.0, 6.0, 8.0, 9.0, 8.0, 8.0]);
    }

    #[test]
    fn test_window_clamp() {
        let p = BorderPolicy::Clamp;
        assert_eq!(window(0, 0, p), [1.0, 1.0, 4.0, 1.0, 2.0, 1.0, 2.0, 4.0, 5.0]);
        assert_eq!(window(2, 2, p), [5.0, 8.0, 8.0, 6.0, 6.0, 9.0, 9.0, 9.0, 9.0]);
    }

    #[test]
    fn test_window_single_pixel() {
        let img = GreyImage::filled(1, 1, 3.5);
        for border in [BorderPolicy::ReplicateCenter, BorderPolicy::Clamp] {
            assert_eq!(window_at(&img, 0, 0, border).unwrap(), [3.5; 9]);
        }
    }

    #[test]
    fn test_window_out_of_bounds() {
        let err = window_at(&grid(), 3, 0, BorderPolicy::default()).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::OutOfBounds);
    }

    #[test]
    fn test_center_slot() {
        for (x, y) in grid().bounds().iter_coords() {
            let w = window(x, y, BorderPolicy::ReplicateCenter);
            assert_eq!(w[CENTER], grid().get(x, y).unwrap());
        }
    }

    #[test]
    fn test_every_filter_keeps_dimensions() {
        let img = grid();
        for filter in Filter::ALL {
            let out = apply_filter(&img, filter);
            assert_eq!(out.dimensions(), (3, 3), "{filter}");
        }
        let empty = GreyImage::new(0, 4);
        assert_eq!(apply_filter(&empty, Filter::Median).dimensions(), (0, 4));
    }

    #[test]
    fn test_box_blur_constant() {
        let img = GreyImage::filled(5, 4, 42.0);
        for border in [BorderPolicy::ReplicateCenter, BorderPolicy::Clamp] {
            let out = apply_filter_with(&img, Filter::BoxBlur, &FilterOptions { border });
            for &v in out.data() {
                assert_relative_eq!(v, 42.0, epsilon = 1e-4);
            }
        }
    }

    #[test]
    fn test_median_removes_spike() {
        let mut img = GreyImage::filled(5, 5, 0.5);
        img.set(2, 2, 10.0).unwrap();
        let out = apply_filter(&img, Filter::Median);
        assert_eq!(out.get(2, 2).unwrap(), 0.5);
    }

    #[test]
    fn test_filter_matches_kernel_on_window() {
        let img = grid();
        for filter in Filter::ALL {
            let out = apply_filter(&img, filter);
            for (x, y) in img.bounds().iter_coords() {
                let w = window(x, y, BorderPolicy::ReplicateCenter);
                assert_eq!(out.get(x, y).unwrap(), filter.kernel()(&w));
            }
        }
    }

    #[test]
    fn test_filter_ids() {
        for (i, filter) in Filter::ALL.iter().enumerate() {
            assert_eq!(filter.id(), i as i32);
            assert_eq!(Filter::from_id(i as i32).unwrap(), *filter);
            assert_eq!(Filter::try_from(i as i32).unwrap(), *filter);
        }
        assert_eq!(Filter::from_id(2).unwrap(), Filter::GaussianBlur);
        assert_eq!(Filter::from_id(6).unwrap(), Filter::Sobel);
    }

    #[test]
    fn test_unknown_filter_id() {
        for id in [-1, 7, 100] {
            let err = apply_filter_id(&grid(), id).unwrap_err();
            assert_eq!(err.kind(), ErrorKind::UnknownFilter);
        }
    }

    #[test]
    fn test_filter_names() {
        for filter in Filter::ALL {
            assert_eq!(filter.name().parse::<Filter>().unwrap(), filter);
        }
        assert_eq!("Box-Blur".parse::<Filter>().unwrap(), Filter::BoxBlur);
        assert_eq!(
            "emboss".parse::<Filter>().unwrap_err().kind(),
            ErrorKind::UnknownFilter
        );
    }
}
