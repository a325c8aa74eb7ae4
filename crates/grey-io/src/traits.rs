//! I/O traits for format readers and writers.
//!
//! Every codec exposes a reader and a writer struct that carry their
//! options and implement these traits, plus free `read`/`write`
//! convenience functions that use default options.

use crate::Result;
use grey_core::GreyImage;
use std::path::Path;

/// Trait for format readers configured by options `O`.
///
/// # Example
///
/// ```rust
/// use grey_io::FormatReader;
/// use grey_io::pgm::PgmReader;
///
/// let reader = PgmReader::default();
/// let img = reader.read_from_memory(b"P2\n2 1\n255\n7 9")?;
/// assert_eq!(img.data(), &[7.0, 9.0]);
/// # Ok::<(), grey_io::Error>(())
/// ```
pub trait FormatReader<O>: Sized {
    /// Human-readable format name.
    fn format_name(&self) -> &'static str;

    /// File extensions handled by this reader, lowercase, without dot.
    fn extensions(&self) -> &'static [&'static str];

    /// Returns `true` if `header` starts with this format's magic.
    ///
    /// Formats without a magic number always return `false`.
    fn can_read(&self, header: &[u8]) -> bool;

    /// Reads an image from a file path.
    fn read<P: AsRef<Path>>(&self, path: P) -> Result<GreyImage>;

    /// Reads an image from an in-memory file image.
    fn read_from_memory(&self, data: &[u8]) -> Result<GreyImage>;

    /// Creates a reader with the given options.
    fn with_options(options: O) -> Self;
}

/// Trait for format writers configured by options `O`.
pub trait FormatWriter<O>: Sized {
    /// Human-readable format name.
    fn format_name(&self) -> &'static str;

    /// File extensions handled by this writer, lowercase, without dot.
    fn extensions(&self) -> &'static [&'static str];

    /// Writes an image to a file path, creating or truncating it.
    fn write<P: AsRef<Path>>(&self, path: P, image: &GreyImage) -> Result<()>;

    /// Encodes an image into a byte vector.
    fn write_to_memory(&self, image: &GreyImage) -> Result<Vec<u8>>;

    /// Creates a writer with the given options.
    fn with_options(options: O) -> Self;
}
