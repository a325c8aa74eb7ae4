//! ASCII float table support.
//!
//! One image row per line, samples separated by whitespace:
//!
//! ```text
//! 0 0.5 1
//! 2 2.5 3
//! ```
//!
//! The width is the number of values on the first non-blank line and the
//! height is the number of non-blank lines; every row must have the same
//! width. A row of a different length is rejected even when the total
//! value count happens to equal `width * height`, so a table whose count
//! is off is always rejected too. The writer emits each sample in its shortest round-trip decimal
//! form unless a fixed precision is requested, and leaves no newline
//! after the last row.

use crate::{Error, FormatReader, FormatWriter, Result};
use grey_core::GreyImage;
use std::io::{BufWriter, Read, Write};
use std::path::Path;

#[allow(unused_imports)]
use tracing::{debug, trace};

/// Options for writing ASCII tables.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AsciiWriterOptions {
    /// Fixed number of decimals. `None` writes the shortest text that
    /// parses back to the same `f32`. Default: `None`.
    pub precision: Option<usize>,
}

// === AsciiReader ===

/// ASCII table reader.
#[derive(Debug, Clone, Copy, Default)]
pub struct AsciiReader;

impl AsciiReader {
    /// Creates a new reader.
    pub fn new() -> Self {
        Self
    }

    fn read_from<R: Read>(&self, reader: &mut R) -> Result<GreyImage> {
        let mut data = Vec::new();
        reader.read_to_end(&mut data)?;
        self.decode(&data)
    }

    fn decode(&self, data: &[u8]) -> Result<GreyImage> {
        let text = std::str::from_utf8(data)
            .map_err(|e| Error::malformed(format!("ASCII table: not UTF-8 ({e})")))?;

        let mut samples = Vec::new();
        let mut width = None;
        let mut height = 0u32;

        for line in text.lines().filter(|l| !l.trim().is_empty()) {
            let before = samples.len();
            for token in line.split_whitespace() {
                let v: f32 = token.parse().map_err(|_| {
                    Error::malformed(format!("ASCII table: invalid sample {token:?}"))
                })?;
                samples.push(v);
            }
            let columns = samples.len() - before;
            match width {
                None => width = Some(columns),
                Some(w) if w != columns => {
                    return Err(Error::malformed(format!(
                        "ASCII table: row {} has {columns} values, expected {w}",
                        height + 1
                    )));
                }
                Some(_) => {}
            }
            height += 1;
        }

        let width = u32::try_from(width.unwrap_or(0))
            .map_err(|_| Error::malformed("ASCII table: row too long"))?;
        debug!(width, height, "Reading ASCII table");
        GreyImage::from_vec(samples, width, height)
    }
}

impl FormatReader<()> for AsciiReader {
    fn format_name(&self) -> &'static str {
        "ASCII"
    }

    fn extensions(&self) -> &'static [&'static str] {
        &["txt", "dat", "asc"]
    }

    fn can_read(&self, _header: &[u8]) -> bool {
        false
    }

    fn read<P: AsRef<Path>>(&self, path: P) -> Result<GreyImage> {
        let mut reader = crate::open_file(path.as_ref())?;
        self.read_from(&mut reader)
    }

    fn read_from_memory(&self, data: &[u8]) -> Result<GreyImage> {
        self.decode(data)
    }

    fn with_options(_options: ()) -> Self {
        Self
    }
}

// === AsciiWriter ===

/// ASCII table writer.
#[derive(Debug, Clone, Copy, Default)]
pub struct AsciiWriter {
    options: AsciiWriterOptions,
}

impl AsciiWriter {
    /// Creates a new writer with shortest round-trip formatting.
    pub fn new() -> Self {
        Self::default()
    }

    fn write_to<W: Write>(&self, writer: &mut W, image: &GreyImage) -> Result<()> {
        trace!(width = image.width(), height = image.height(), "ascii::write");
        if image.is_empty() {
            return Ok(());
        }

        for y in 0..image.height() {
            let Some(row) = image.row(y) else { break };
            if y > 0 {
                writer.write_all(b"\n")?;
            }
            for (x, &v) in row.iter().enumerate() {
                if x > 0 {
                    writer.write_all(b" ")?;
                }
                match self.options.precision {
                    Some(p) => write!(writer, "{v:.p$}")?,
                    None => write!(writer, "{v}")?,
                }
            }
        }
        Ok(())
    }
}

impl FormatWriter<AsciiWriterOptions> for AsciiWriter {
    fn format_name(&self) -> &'static str {
        "ASCII"
    }

    fn extensions(&self) -> &'static [&'static str] {
        &["txt", "dat", "asc"]
    }

    fn write<P: AsRef<Path>>(&self, path: P, image: &GreyImage) -> Result<()> {
        let file = crate::create_file(path.as_ref())?;
        let mut writer = BufWriter::new(file);
        self.write_to(&mut writer, image)?;
        writer.flush()?;
        Ok(())
    }

    fn write_to_memory(&self, image: &GreyImage) -> Result<Vec<u8>> {
        let mut buffer = Vec::new();
        self.write_to(&mut buffer, image)?;
        Ok(buffer)
    }

    fn with_options(options: AsciiWriterOptions) -> Self {
        Self { options }
    }
}

// === Convenience Functions ===

/// Reads an ASCII table.
///
/// # Errors
///
/// - [`Error::FileNotFound`] / [`Error::FileOpen`] if the file cannot be opened
/// - [`Error::MalformedFile`] for a non-numeric token or ragged rows
pub fn read<P: AsRef<Path>>(path: P) -> Result<GreyImage> {
    AsciiReader.read(path)
}

/// Writes an ASCII table with shortest round-trip formatting.
pub fn write<P: AsRef<Path>>(path: P, image: &GreyImage) -> Result<()> {
    AsciiWriter::default().write(path, image)
}

#[cfg(test)]
mod tests {
    use super::*;
    use grey_core::ErrorKind;

    fn decode(text: &str) -> Result<GreyImage> {
        AsciiReader.read_from_memory(text.as_bytes())
    }

    #[test]
    fn test_read_table() {
        let img = decode("0 0.5 1\n2 2.5 3\n").unwrap();
        assert_eq!(img.dimensions(), (3, 2));
        assert_eq!(img.data(), &[0.0, 0.5, 1.0, 2.0, 2.5, 3.0]);
    }

    #[test]
    fn test_read_skips_blank_lines() {
        let img = decode("\n1\t2\n   \n3  4\n\n").unwrap();
        assert_eq!(img.dimensions(), (2, 2));
        assert_eq!(img.get(1, 1).unwrap(), 4.0);
    }

    #[test]
    fn test_read_ragged_rows() {
        let err = decode("1 2 3\n4 5\n").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MalformedFile);

        // Totals that happen to match still fail row by row.
        let err = decode("1 2\n3\n4 5 6\n").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MalformedFile);
    }

    #[test]
    fn test_read_invalid_token() {
        let err = decode("1 2\n3 four\n").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MalformedFile);
        assert!(err.to_string().contains("four"));
    }

    #[test]
    fn test_read_empty() {
        assert!(decode("").unwrap().is_empty());
        assert!(decode("\n \n").unwrap().is_empty());
    }

    #[test]
    fn test_write_layout() {
        let img = GreyImage::from_slice(&[1.0, 0.1, -2.5, 3.0], 2, 2).unwrap();
        let bytes = AsciiWriter::new().write_to_memory(&img).unwrap();
        assert_eq!(String::from_utf8(bytes).unwrap(), "1 0.1\n-2.5 3");
    }

    #[test]
    fn test_write_precision() {
        let img = GreyImage::from_slice(&[1.0, 0.126], 2, 1).unwrap();
        let writer = AsciiWriter::with_options(AsciiWriterOptions { precision: Some(2) });
        let bytes = writer.write_to_memory(&img).unwrap();
        assert_eq!(String::from_utf8(bytes).unwrap(), "1.00 0.13");
    }

    #[test]
    fn test_roundtrip_bit_exact() {
        let data: Vec<f32> = (0..9).map(|i| (i as f32).sqrt() / 3.0 - 0.4).collect();
        let img = GreyImage::from_vec(data, 3, 3).unwrap();
        let bytes = AsciiWriter::new().write_to_memory(&img).unwrap();
        let back = AsciiReader.read_from_memory(&bytes).unwrap();
        assert_eq!(back.data(), img.data());
    }

    #[test]
    fn test_format_identity() {
        assert_eq!(AsciiReader.format_name(), "ASCII");
        assert_eq!(AsciiWriter::new().format_name(), "ASCII");
        assert_eq!(AsciiReader.extensions(), &["txt", "dat", "asc"]);
        assert_eq!(AsciiWriter::new().extensions(), AsciiReader.extensions());
    }

    #[test]
    fn test_ragged_rows_with_matching_total() {
        // six values, but row 2 is short and row 3 long
        let err = decode("1 2\n3\n4 5 6\n").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MalformedFile);
        assert!(err.to_string().contains("row 2"));
    }
}
