//! # grey-core
//!
//! Core types for greyscale image processing.
//!
//! This crate provides the foundational types used throughout the grey-rs workspace:
//!
//! - [`GreyImage`] - Owned single-channel `f32` image buffer
//! - [`Rect`] - Region of interest type
//! - [`Histogram`] - Equal-width bin counts over an image's value range
//! - [`Error`], [`ErrorKind`] - The closed error set shared by every crate
//!
//! Arithmetic operators (`+`, `-`, `*`, `/`, `!`) and statistics (`min`,
//! `mean`, `std_dev`, `normalized_cross_correlation`, ...) are inherent to
//! [`GreyImage`] and live in the `arith` and `stats` modules.
//!
//! ```rust
//! use grey_core::GreyImage;
//!
//! let mut img = GreyImage::from_slice(&[0.0, 1.0, 2.0, 4.0], 2, 2)?;
//! img.normalize()?;
//! assert_eq!(img.max()?, 1.0);
//! # Ok::<(), grey_core::Error>(())
//! ```
//!
//! ## Crate Structure
//!
//! This crate has no internal dependencies. The other crates build on it:
//!
//! ```text
//! grey-core (this crate)
//!    ^
//!    |
//!    +-- grey-io (PGM, raw and ASCII codecs)
//!    +-- grey-ops (3x3 filters, compositing)
//! ```

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod arith;
pub mod error;
pub mod image;
pub mod rect;
pub mod stats;

// Re-exports for convenience
pub use arith::DIVISION_EPSILON;
pub use error::*;
pub use image::*;
pub use rect::*;
pub use stats::Histogram;

/// Prelude module for convenient imports.
///
/// # Usage
///
/// ```
/// use grey_core::prelude::*;
/// ```
pub mod prelude {
    pub use crate::error::{Error, ErrorKind, Result};
    pub use crate::image::GreyImage;
    pub use crate::rect::Rect;
    pub use crate::stats::Histogram;
}
