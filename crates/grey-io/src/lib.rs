//! # grey-io
//!
//! File codecs for [`GreyImage`].
//!
//! - **PGM** - Netpbm greymap, ASCII (`P2`) and binary (`P5`)
//! - **Raw** - headerless little-endian `f32` samples
//! - **ASCII** - whitespace-separated float table, one row per line
//! - **Histogram** - two-column bin table (write only)
//!
//! # Architecture
//!
//! - [`FormatReader`] / [`FormatWriter`] - traits implemented by each codec's
//!   reader and writer struct
//! - [`read`] / [`write`] - high-level functions with format detection
//! - [`ImageFile`] - `load_*` / `save_*` methods on [`GreyImage`]
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use grey_io::{read, write};
//!
//! let image = read("input.pgm")?;
//! write("output.txt", &image)?;
//! # Ok::<(), grey_io::Error>(())
//! ```
//!
//! # Supported Formats
//!
//! | Format | Read | Write | Extensions | Detection |
//! |--------|------|-------|------------|-----------|
//! | PGM | Yes | Yes | pgm, pnm | magic `P2` / `P5` |
//! | Raw | Yes (size required) | Yes | raw, f32 | extension |
//! | ASCII | Yes | Yes | txt, dat, asc | extension |
//!
//! # Errors
//!
//! All functions return [`grey_core::Result`]. Opening a missing file yields
//! [`Error::FileNotFound`], other open or create failures
//! [`Error::FileOpen`], and undecodable content [`Error::MalformedFile`]
//! or [`Error::SizeMismatch`].
//!
//! # Dependencies
//!
//! - [`grey-core`] - image and error types
//! - [`byteorder`] - endian-aware `f32`/`u16` sample access
//! - [`tracing`] - debug/trace events
//!
//! # Feature Flags
//!
//! - `pgm` - PGM support (default)
//! - `raw` - raw `f32` support (default)
//! - `ascii` - ASCII table support (default)

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

mod detect;
mod ext;
pub mod histogram;
mod traits;

#[cfg(feature = "pgm")]
pub mod pgm;

#[cfg(feature = "raw")]
pub mod raw;

#[cfg(feature = "ascii")]
pub mod ascii;

pub use detect::Format;
pub use ext::ImageFile;
pub use grey_core::{Error, ErrorKind, GreyImage, Result};
pub use histogram::write_histogram;
pub use traits::{FormatReader, FormatWriter};

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

/// Opens `path` for buffered reading, classifying open failures.
pub(crate) fn open_file(path: &Path) -> Result<BufReader<File>> {
    let file = File::open(path).map_err(|e| Error::open_for_read(path, e))?;
    Ok(BufReader::new(file))
}

/// Creates or truncates `path` for writing.
pub(crate) fn create_file(path: &Path) -> Result<File> {
    File::create(path).map_err(|e| Error::open_for_write(path, e))
}

fn unsupported(path: &Path, reason: &str) -> Error {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("unknown");
    Error::UnsupportedFormat(format!("{ext}: {reason}"))
}

/// Reads an image from a file, auto-detecting the format.
///
/// PGM is recognized by its magic bytes, ASCII tables by extension.
/// Raw dumps carry no dimensions; use [`raw::read`] for them.
///
/// # Errors
///
/// - [`Error::FileNotFound`] / [`Error::FileOpen`] if the file cannot be opened
/// - [`Error::UnsupportedFormat`] for raw or unrecognized files
/// - any decode error of the detected codec
pub fn read<P: AsRef<Path>>(path: P) -> Result<GreyImage> {
    let path = path.as_ref();
    let format = Format::detect(path)?;

    match format {
        #[cfg(feature = "pgm")]
        Format::Pgm => pgm::read(path),

        #[cfg(feature = "ascii")]
        Format::Ascii => ascii::read(path),

        Format::Raw => Err(unsupported(path, "raw files need explicit dimensions")),

        #[allow(unreachable_patterns)]
        _ => Err(unsupported(path, "no reader for this format")),
    }
}

/// Writes an image to a file, choosing the format from the extension.
///
/// PGM files are written as ASCII (`P2`).
///
/// # Errors
///
/// - [`Error::UnsupportedFormat`] for an unrecognized extension
/// - [`Error::FileOpen`] if the file cannot be created
pub fn write<P: AsRef<Path>>(path: P, image: &GreyImage) -> Result<()> {
    let path = path.as_ref();
    let format = Format::from_extension(path);

    match format {
        #[cfg(feature = "pgm")]
        Format::Pgm => pgm::write(path, image),

        #[cfg(feature = "raw")]
        Format::Raw => raw::write(path, image),

        #[cfg(feature = "ascii")]
        Format::Ascii => ascii::write(path, image),

        #[allow(unreachable_patterns)]
        _ => Err(unsupported(path, "no writer for this format")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = read(dir.path().join("nope.pgm")).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::FileNotFound);
    }

    #[test]
    fn test_write_unknown_extension() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("image.png");
        let err = write(&path, &GreyImage::new(2, 2)).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::UnsupportedFormat);
        assert!(!path.exists());
    }

    #[test]
    fn test_write_into_missing_directory() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("no_such_dir").join("image.pgm");
        let err = write(&path, &GreyImage::new(2, 2)).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::FileOpen);
    }

    #[cfg(all(feature = "pgm", feature = "raw"))]
    #[test]
    fn test_dispatch_by_extension() {
        let dir = tempfile::tempdir().unwrap();
        let img = GreyImage::from_slice(&[1.0, 2.0, 3.0, 4.0], 2, 2).unwrap();

        let pgm_path = dir.path().join("a.pgm");
        write(&pgm_path, &img).unwrap();
        assert_eq!(read(&pgm_path).unwrap(), img);

        let raw_path = dir.path().join("a.raw");
        write(&raw_path, &img).unwrap();
        assert_eq!(read(&raw_path).unwrap_err().kind(), ErrorKind::UnsupportedFormat);
        assert_eq!(raw::read(&raw_path, 2, 2).unwrap(), img);
    }

    #[cfg(feature = "pgm")]
    #[test]
    fn test_magic_beats_extension() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("mislabelled.txt");
        std::fs::write(&path, b"P2\n1 1\n255\n42").unwrap();
        assert_eq!(read(&path).unwrap().data(), &[42.0]);
    }
}
