//! Format detection utilities.
//!
//! Detects file formats from extensions and magic bytes. Only PGM carries
//! a magic number; raw dumps and ASCII tables are recognized by extension
//! alone.

use crate::{Error, FormatReader, Result};
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// Supported file formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    /// Netpbm greymap, ASCII (P2) or binary (P5).
    Pgm,
    /// Headerless little-endian `f32` samples.
    Raw,
    /// Whitespace-separated float table, one image row per line.
    Ascii,
    /// Unknown/unsupported format.
    Unknown,
}

impl Format {
    /// Detects format from file path (magic bytes, then extension).
    ///
    /// # Errors
    ///
    /// Open failures are reported as [`Error::FileNotFound`] or
    /// [`Error::FileOpen`].
    pub fn detect<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        let format = Self::from_magic_bytes(path)?;
        if format != Format::Unknown {
            return Ok(format);
        }

        Ok(Self::from_extension(path))
    }

    /// Detects format from file extension only.
    ///
    /// The extension is matched case-insensitively against
    /// [`FormatReader::extensions`] of every enabled codec; formats whose
    /// feature is disabled come back as [`Format::Unknown`].
    pub fn from_extension<P: AsRef<Path>>(path: P) -> Self {
        let Some(ext) = path
            .as_ref()
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_lowercase())
        else {
            return Format::Unknown;
        };

        codec_extensions()
            .into_iter()
            .find(|(_, exts)| exts.iter().any(|e| *e == ext))
            .map_or(Format::Unknown, |(format, _)| format)
    }

    /// Detects format from the first bytes of a file.
    pub fn from_magic_bytes<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let mut file = File::open(path).map_err(|e| Error::open_for_read(path, e))?;
        let mut header = [0u8; 3];
        let bytes_read = file.read(&mut header)?;
        Ok(Self::from_bytes(&header[..bytes_read]))
    }

    /// Detects format from raw bytes (magic number check).
    ///
    /// `P2` or `P5` followed by whitespace identifies a PGM.
    pub fn from_bytes(bytes: &[u8]) -> Self {
        match bytes {
            [b'P', b'2' | b'5', sep, ..] if sep.is_ascii_whitespace() => Format::Pgm,
            _ => Format::Unknown,
        }
    }

    /// Returns the canonical file extension for this format.
    pub fn extension(&self) -> &'static str {
        match self {
            Format::Pgm => "pgm",
            Format::Raw => "raw",
            Format::Ascii => "txt",
            Format::Unknown => "",
        }
    }
}

/// Extensions claimed by each enabled codec reader.
#[allow(unused_mut)]
fn codec_extensions() -> Vec<(Format, &'static [&'static str])> {
    let mut table = Vec::new();
    #[cfg(feature = "pgm")]
    table.push((Format::Pgm, crate::pgm::PgmReader::new().extensions()));
    #[cfg(feature = "raw")]
    table.push((Format::Raw, crate::raw::RawReader::default().extensions()));
    #[cfg(feature = "ascii")]
    table.push((Format::Ascii, crate::ascii::AsciiReader::new().extensions()));
    table
}

#[cfg(test)]
mod tests {
    use super::*;

    #[cfg(all(feature = "pgm", feature = "raw", feature = "ascii"))]
    #[test]
    fn test_from_extension() {
        assert_eq!(Format::from_extension("lena.pgm"), Format::Pgm);
        assert_eq!(Format::from_extension("LENA.PGM"), Format::Pgm);
        assert_eq!(Format::from_extension("out.raw"), Format::Raw);
        assert_eq!(Format::from_extension("dump.txt"), Format::Ascii);
        assert_eq!(Format::from_extension("photo.png"), Format::Unknown);
        assert_eq!(Format::from_extension("noext"), Format::Unknown);
        assert_eq!(Format::from_extension("image.PNM"), Format::Pgm);
        assert_eq!(Format::from_extension("samples.f32"), Format::Raw);
        assert_eq!(Format::from_extension("table.Asc"), Format::Ascii);
        assert_eq!(Format::from_extension("table.dat"), Format::Ascii);
    }

    #[cfg(all(feature = "pgm", feature = "raw", feature = "ascii"))]
    #[test]
    fn test_every_codec_extension_detected() {
        for (format, exts) in codec_extensions() {
            assert!(!exts.is_empty());
            for ext in exts {
                assert_eq!(Format::from_extension(format!("a.{ext}")), format);
            }
        }
    }

    #[test]
    fn test_from_bytes() {
        assert_eq!(Format::from_bytes(b"P2\n3 2\n"), Format::Pgm);
        assert_eq!(Format::from_bytes(b"P5 3 2 255 "), Format::Pgm);
        assert_eq!(Format::from_bytes(b"P6\n"), Format::Unknown);
        assert_eq!(Format::from_bytes(b"P2"), Format::Unknown);
        assert_eq!(Format::from_bytes(b"P22"), Format::Unknown);
        assert_eq!(Format::from_bytes(&[]), Format::Unknown);
    }

    #[cfg(all(feature = "pgm", feature = "raw", feature = "ascii"))]
    #[test]
    fn test_extension_roundtrip() {
        for format in [Format::Pgm, Format::Raw, Format::Ascii] {
            let name = format!("image.{}", format.extension());
            assert_eq!(Format::from_extension(&name), format);
        }
    }
}
