//! Load/save methods on [`GreyImage`].
//!
//! [`ImageFile`] lets an existing image be reloaded in place:
//!
//! ```rust,no_run
//! use grey_core::GreyImage;
//! use grey_io::ImageFile;
//!
//! let mut img = GreyImage::empty();
//! img.load_pgm("lena.pgm")?;
//! img.save_raw("lena.raw")?;
//! # Ok::<(), grey_io::Error>(())
//! ```
//!
//! Every `load_*` replaces the receiver only after the whole file decoded
//! successfully; on error the receiver keeps its previous contents.

use crate::Result;
use grey_core::GreyImage;
use std::num::NonZeroUsize;
use std::path::Path;

/// File load/save operations for [`GreyImage`].
pub trait ImageFile {
    /// Replaces `self` with the contents of a `P2` or `P5` file.
    #[cfg(feature = "pgm")]
    fn load_pgm<P: AsRef<Path>>(&mut self, path: P) -> Result<()>;

    /// Writes `self` as ASCII PGM (`P2`).
    #[cfg(feature = "pgm")]
    fn save_pgm<P: AsRef<Path>>(&self, path: P) -> Result<()>;

    /// Replaces `self` with a `width x height` raw `f32` dump.
    #[cfg(feature = "raw")]
    fn load_raw<P: AsRef<Path>>(&mut self, path: P, width: u32, height: u32) -> Result<()>;

    /// Writes `self` as a raw little-endian `f32` dump.
    #[cfg(feature = "raw")]
    fn save_raw<P: AsRef<Path>>(&self, path: P) -> Result<()>;

    /// Replaces `self` with the contents of an ASCII float table.
    #[cfg(feature = "ascii")]
    fn load_ascii<P: AsRef<Path>>(&mut self, path: P) -> Result<()>;

    /// Writes `self` as an ASCII float table.
    #[cfg(feature = "ascii")]
    fn save_ascii<P: AsRef<Path>>(&self, path: P) -> Result<()>;

    /// Writes the histogram of `self` as a two-column table.
    fn write_histogram<P: AsRef<Path>>(&self, path: P, bins: NonZeroUsize) -> Result<()>;
}

impl ImageFile for GreyImage {
    #[cfg(feature = "pgm")]
    fn load_pgm<P: AsRef<Path>>(&mut self, path: P) -> Result<()> {
        *self = crate::pgm::read(path)?;
        Ok(())
    }

    #[cfg(feature = "pgm")]
    fn save_pgm<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        crate::pgm::write(path, self)
    }

    #[cfg(feature = "raw")]
    fn load_raw<P: AsRef<Path>>(&mut self, path: P, width: u32, height: u32) -> Result<()> {
        *self = crate::raw::read(path, width, height)?;
        Ok(())
    }

    #[cfg(feature = "raw")]
    fn save_raw<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        crate::raw::write(path, self)
    }

    #[cfg(feature = "ascii")]
    fn load_ascii<P: AsRef<Path>>(&mut self, path: P) -> Result<()> {
        *self = crate::ascii::read(path)?;
        Ok(())
    }

    #[cfg(feature = "ascii")]
    fn save_ascii<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        crate::ascii::write(path, self)
    }

    fn write_histogram<P: AsRef<Path>>(&self, path: P, bins: NonZeroUsize) -> Result<()> {
        crate::histogram::write_histogram(path, self, bins)
    }
}
