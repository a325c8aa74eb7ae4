//! # grey-ops
//!
//! Processing operations on [`GreyImage`](grey_core::GreyImage).
//!
//! # Modules
//!
//! - [`filter`] - 3x3 neighbourhood filters with a selectable border policy
//! - [`kernels`] - the pointwise kernels behind each filter
//! - [`composite`] - two-image blend and threshold segmentation
//!
//! # Example
//!
//! ```rust
//! use grey_core::GreyImage;
//! use grey_ops::{apply_filter_id, segment, Filter};
//!
//! let mut img = GreyImage::filled(4, 4, 10.0);
//! img.set(1, 1, 200.0)?;
//!
//! // Filter id 0 is the median.
//! let clean = apply_filter_id(&img, 0)?;
//! assert_eq!(clean.get(1, 1)?, 10.0);
//!
//! let edges = grey_ops::apply_filter(&img, Filter::Sobel);
//! let mask = segment(&edges, 100.0);
//! assert_eq!(mask.dimensions(), (4, 4));
//! # Ok::<(), grey_core::Error>(())
//! ```
//!
//! # Dependencies
//!
//! - [`grey-core`] - image and error types
//! - [`tracing`] - debug/trace events
//!
//! # Used By
//!
//! - `grey-tests` - end-to-end pipelines

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod composite;
pub mod filter;
pub mod kernels;

pub use composite::{blend, segment, segment_in_place};
pub use filter::{
    apply_filter, apply_filter_id, apply_filter_with, window_at, BorderPolicy, Filter,
    FilterOptions, Window,
};
pub use grey_core::{Error, ErrorKind, Result};
