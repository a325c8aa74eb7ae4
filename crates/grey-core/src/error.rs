//! Error types for grey-core operations.
//!
//! Every fallible operation in the workspace (buffer access, arithmetic,
//! statistics, codecs, filters) reports failures through the single
//! closed [`Error`] enum defined here. Callers that need to branch on the
//! failure class should match on [`Error::kind`] rather than on the
//! message text.
//!
//! # Usage
//!
//! ```rust
//! use grey_core::{Error, ErrorKind, Result};
//!
//! fn check(x: u32, y: u32, width: u32, height: u32) -> Result<()> {
//!     if x >= width || y >= height {
//!         return Err(Error::out_of_bounds(x, y, width, height));
//!     }
//!     Ok(())
//! }
//!
//! let err = check(4, 0, 4, 4).unwrap_err();
//! assert_eq!(err.kind(), ErrorKind::OutOfBounds);
//! ```
//!
//! # Dependencies
//!
//! - [`thiserror`] - derive for `Display` and `std::error::Error`
//!
//! # Used By
//!
//! - [`crate::image::GreyImage`] - bounds checks, arithmetic, statistics
//! - `grey-io` - codec failures
//! - `grey-ops` - filter selection, compositing

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias using [`Error`] as the error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Discriminant of an [`Error`], for matching on the failure class only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Pixel indices outside the buffer.
    OutOfBounds,
    /// Statistic requested on a zero-sample buffer.
    EmptyImage,
    /// Divisor, range or deviation too close to zero.
    DivisionByZero,
    /// Two buffers were expected to have equal sizes.
    DimensionMismatch,
    /// File to load does not exist.
    FileNotFound,
    /// File could not be opened or created.
    FileOpen,
    /// File content is unparseable or inconsistent.
    MalformedFile,
    /// Data length disagrees with the requested dimensions.
    SizeMismatch,
    /// Filter selector does not name a known filter.
    UnknownFilter,
    /// File extension or format is not handled.
    UnsupportedFormat,
    /// Read/write failure after the file was opened.
    Io,
}

/// Errors that can occur while handling greyscale images.
///
/// # Categories
///
/// - **Access**: [`OutOfBounds`](Error::OutOfBounds)
/// - **Numeric**: [`EmptyImage`](Error::EmptyImage), [`DivisionByZero`](Error::DivisionByZero)
/// - **Shape**: [`DimensionMismatch`](Error::DimensionMismatch)
/// - **Files**: [`FileNotFound`](Error::FileNotFound), [`FileOpen`](Error::FileOpen),
///   [`MalformedFile`](Error::MalformedFile), [`SizeMismatch`](Error::SizeMismatch),
///   [`UnsupportedFormat`](Error::UnsupportedFormat), [`Io`](Error::Io)
/// - **Filters**: [`UnknownFilter`](Error::UnknownFilter)
#[derive(Debug, Error)]
pub enum Error {
    /// Pixel coordinates are outside image bounds.
    ///
    /// # Example
    ///
    /// ```rust
    /// use grey_core::Error;
    ///
    /// let err = Error::out_of_bounds(100, 50, 80, 60);
    /// assert!(err.to_string().contains("100"));
    /// ```
    #[error("pixel ({x}, {y}) out of bounds for image {width}x{height}")]
    OutOfBounds {
        /// X coordinate that was out of bounds
        x: u32,
        /// Y coordinate that was out of bounds
        y: u32,
        /// Image width
        width: u32,
        /// Image height
        height: u32,
    },

    /// The image holds no samples.
    #[error("empty image")]
    EmptyImage,

    /// A divisor was within `1e-6` of zero.
    ///
    /// The payload names the operation that would have divided.
    #[error("division by zero in {0}")]
    DivisionByZero(&'static str),

    /// Image dimensions don't match for the operation.
    #[error("dimension mismatch: {a_width}x{a_height} vs {b_width}x{b_height}")]
    DimensionMismatch {
        /// First image width
        a_width: u32,
        /// First image height
        a_height: u32,
        /// Second image width
        b_width: u32,
        /// Second image height
        b_height: u32,
    },

    /// The file to read does not exist.
    #[error("cannot open \"{}\": file does not exist", path.display())]
    FileNotFound {
        /// Requested path
        path: PathBuf,
        /// Underlying open error
        #[source]
        source: std::io::Error,
    },

    /// The file could not be opened for reading or created for writing.
    #[error("cannot open \"{}\": {source}", path.display())]
    FileOpen {
        /// Requested path
        path: PathBuf,
        /// Underlying open error
        #[source]
        source: std::io::Error,
    },

    /// The content could not be parsed or is internally inconsistent.
    #[error("malformed file: {0}")]
    MalformedFile(String),

    /// Data length does not match the requested dimensions.
    ///
    /// Counted in bytes for raw files and in samples for in-memory
    /// buffers.
    #[error("size mismatch: expected {expected}, got {actual}")]
    SizeMismatch {
        /// Expected length
        expected: u64,
        /// Actual length
        actual: u64,
    },

    /// Filter selector (numeric id or name) does not map to a known filter.
    #[error("unknown filter: {0}")]
    UnknownFilter(String),

    /// Format cannot be handled by this operation.
    #[error("unsupported format: {0}")]
    UnsupportedFormat(String),

    /// I/O error while reading or writing an already opened stream.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Creates an [`Error::OutOfBounds`] error.
    #[inline]
    pub fn out_of_bounds(x: u32, y: u32, width: u32, height: u32) -> Self {
        Self::OutOfBounds {
            x,
            y,
            width,
            height,
        }
    }

    /// Creates an [`Error::DimensionMismatch`] error.
    #[inline]
    pub fn dimension_mismatch(a: (u32, u32), b: (u32, u32)) -> Self {
        Self::DimensionMismatch {
            a_width: a.0,
            a_height: a.1,
            b_width: b.0,
            b_height: b.1,
        }
    }

    /// Creates an [`Error::MalformedFile`] error.
    #[inline]
    pub fn malformed(reason: impl Into<String>) -> Self {
        Self::MalformedFile(reason.into())
    }

    /// Classifies a failure to open `path` for reading.
    ///
    /// A missing file becomes [`Error::FileNotFound`], anything else
    /// [`Error::FileOpen`].
    pub fn open_for_read(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        let path = path.into();
        if source.kind() == std::io::ErrorKind::NotFound {
            Self::FileNotFound { path, source }
        } else {
            Self::FileOpen { path, source }
        }
    }

    /// Wraps a failure to create `path` for writing.
    #[inline]
    pub fn open_for_write(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::FileOpen {
            path: path.into(),
            source,
        }
    }

    /// Returns the failure class of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::OutOfBounds { .. } => ErrorKind::OutOfBounds,
            Self::EmptyImage => ErrorKind::EmptyImage,
            Self::DivisionByZero(_) => ErrorKind::DivisionByZero,
            Self::DimensionMismatch { .. } => ErrorKind::DimensionMismatch,
            Self::FileNotFound { .. } => ErrorKind::FileNotFound,
            Self::FileOpen { .. } => ErrorKind::FileOpen,
            Self::MalformedFile(_) => ErrorKind::MalformedFile,
            Self::SizeMismatch { .. } => ErrorKind::SizeMismatch,
            Self::UnknownFilter(_) => ErrorKind::UnknownFilter,
            Self::UnsupportedFormat(_) => ErrorKind::UnsupportedFormat,
            Self::Io(_) => ErrorKind::Io,
        }
    }

    /// Returns `true` if this is a bounds-related error.
    #[inline]
    pub fn is_bounds_error(&self) -> bool {
        matches!(self, Self::OutOfBounds { .. })
    }

    /// Returns `true` if the error came from the filesystem.
    #[inline]
    pub fn is_io_error(&self) -> bool {
        matches!(
            self,
            Self::Io(_) | Self::FileNotFound { .. } | Self::FileOpen { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_out_of_bounds() {
        let err = Error::out_of_bounds(100, 50, 80, 60);
        let msg = err.to_string();
        assert!(msg.contains("100"));
        assert!(msg.contains("50"));
        assert!(msg.contains("80x60"));
        assert!(err.is_bounds_error());
        assert_eq!(err.kind(), ErrorKind::OutOfBounds);
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::UnexpectedEof, "short read");
        let err: Error = io_err.into();
        assert!(err.is_io_error());
        assert_eq!(err.kind(), ErrorKind::Io);
    }

    #[test]
    fn test_open_for_read_classification() {
        let missing = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        let err = Error::open_for_read("a.pgm", missing);
        assert_eq!(err.kind(), ErrorKind::FileNotFound);
        assert!(err.to_string().contains("a.pgm"));

        let denied = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "no");
        assert_eq!(Error::open_for_read("a.pgm", denied).kind(), ErrorKind::FileOpen);
    }

    #[test]
    fn test_dimension_mismatch() {
        let err = Error::dimension_mismatch((100, 100), (200, 50));
        let msg = err.to_string();
        assert!(msg.contains("100x100"));
        assert!(msg.contains("200x50"));
        assert_eq!(err.kind(), ErrorKind::DimensionMismatch);
    }

    #[test]
    fn test_unknown_filter() {
        let err = Error::UnknownFilter("7".into());
        assert_eq!(err.to_string(), "unknown filter: 7");
        assert_eq!(err.kind(), ErrorKind::UnknownFilter);
    }

    #[test]
    fn test_division_by_zero_names_operation() {
        let err = Error::DivisionByZero("normalize");
        assert!(err.to_string().contains("normalize"));
    }
}
