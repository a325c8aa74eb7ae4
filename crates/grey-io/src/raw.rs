//! Raw `f32` dump support.
//!
//! A raw file has no header: it is exactly `width * height` IEEE-754
//! single-precision samples, little-endian, row-major. The caller must
//! know the dimensions to read one back.
//!
//! ```rust,no_run
//! use grey_io::raw;
//! # let image = grey_core::GreyImage::new(512, 512);
//!
//! raw::write("median.raw", &image)?;
//! let back = raw::read("median.raw", 512, 512)?;
//! # Ok::<(), grey_io::Error>(())
//! ```

use crate::{Error, FormatReader, FormatWriter, Result};
use byteorder::{LittleEndian, ReadBytesExt, WriteBytesExt};
use grey_core::GreyImage;
use std::io::{BufWriter, Read, Write};
use std::path::Path;

#[allow(unused_imports)]
use tracing::{debug, trace};

/// Bytes per stored sample.
pub const BYTES_PER_SAMPLE: u64 = 4;

/// Dimensions expected by [`RawReader`].
///
/// Ignored by [`RawWriter`], which takes the size from the image.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RawOptions {
    /// Image width in pixels.
    pub width: u32,
    /// Image height in pixels.
    pub height: u32,
}

impl RawOptions {
    /// Creates options for a `width x height` image.
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    fn expected_len(&self) -> u64 {
        self.width as u64 * self.height as u64 * BYTES_PER_SAMPLE
    }
}

// === RawReader ===

/// Raw format reader.
#[derive(Debug, Clone, Default)]
pub struct RawReader {
    options: RawOptions,
}

impl RawReader {
    /// Creates a reader for a `width x height` image.
    pub fn new(width: u32, height: u32) -> Self {
        Self::with_options(RawOptions::new(width, height))
    }

    fn check_len(&self, actual: u64) -> Result<()> {
        let expected = self.options.expected_len();
        if actual != expected {
            return Err(Error::SizeMismatch { expected, actual });
        }
        Ok(())
    }

    fn decode<R: Read>(&self, reader: &mut R) -> Result<GreyImage> {
        let RawOptions { width, height } = self.options;
        debug!(width, height, "Reading raw f32");

        let mut samples = vec![0.0f32; width as usize * height as usize];
        reader.read_f32_into::<LittleEndian>(&mut samples)?;
        GreyImage::from_vec(samples, width, height)
    }
}

impl FormatReader<RawOptions> for RawReader {
    fn format_name(&self) -> &'static str {
        "Raw"
    }

    fn extensions(&self) -> &'static [&'static str] {
        &["raw", "f32"]
    }

    fn can_read(&self, _header: &[u8]) -> bool {
        false
    }

    fn read<P: AsRef<Path>>(&self, path: P) -> Result<GreyImage> {
        let mut reader = crate::open_file(path.as_ref())?;
        self.check_len(reader.get_ref().metadata()?.len())?;
        self.decode(&mut reader)
    }

    fn read_from_memory(&self, data: &[u8]) -> Result<GreyImage> {
        self.check_len(data.len() as u64)?;
        let mut cursor = data;
        self.decode(&mut cursor)
    }

    fn with_options(options: RawOptions) -> Self {
        Self { options }
    }
}

// === RawWriter ===

/// Raw format writer.
#[derive(Debug, Clone, Copy, Default)]
pub struct RawWriter;

impl RawWriter {
    /// Creates a new writer.
    pub fn new() -> Self {
        Self
    }

    fn write_to<W: Write>(&self, writer: &mut W, image: &GreyImage) -> Result<()> {
        trace!(width = image.width(), height = image.height(), "raw::write");
        for &v in image.data() {
            writer.write_f32::<LittleEndian>(v)?;
        }
        Ok(())
    }
}

impl FormatWriter<RawOptions> for RawWriter {
    fn format_name(&self) -> &'static str {
        "Raw"
    }

    fn extensions(&self) -> &'static [&'static str] {
        &["raw", "f32"]
    }

    fn write<P: AsRef<Path>>(&self, path: P, image: &GreyImage) -> Result<()> {
        let file = crate::create_file(path.as_ref())?;
        let mut writer = BufWriter::new(file);
        self.write_to(&mut writer, image)?;
        writer.flush()?;
        Ok(())
    }

    fn write_to_memory(&self, image: &GreyImage) -> Result<Vec<u8>> {
        let mut buffer = Vec::with_capacity(image.len() * BYTES_PER_SAMPLE as usize);
        self.write_to(&mut buffer, image)?;
        Ok(buffer)
    }

    fn with_options(_options: RawOptions) -> Self {
        Self
    }
}

// === Convenience Functions ===

/// Reads a `width x height` raw dump.
///
/// # Errors
///
/// - [`Error::FileNotFound`] / [`Error::FileOpen`] if the file cannot be opened
/// - [`Error::SizeMismatch`] unless the file is exactly `width * height * 4` bytes
pub fn read<P: AsRef<Path>>(path: P, width: u32, height: u32) -> Result<GreyImage> {
    RawReader::new(width, height).read(path)
}

/// Writes all samples as little-endian `f32`.
pub fn write<P: AsRef<Path>>(path: P, image: &GreyImage) -> Result<()> {
    RawWriter::default().write(path, image)
}
