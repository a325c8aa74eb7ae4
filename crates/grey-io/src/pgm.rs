//! PGM (Netpbm greymap) format support.
//!
//! Reads and writes both PGM flavours:
//!
//! | Magic | Encoding | Samples |
//! |-------|----------|---------|
//! | `P2`  | ASCII    | whitespace-separated decimal integers |
//! | `P5`  | Binary   | 1 byte each, or 2 big-endian bytes when max-value > 255 |
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use grey_io::pgm;
//!
//! let image = pgm::read("lena.pgm")?;
//! pgm::write("copy.pgm", &image)?;
//! # Ok::<(), grey_io::Error>(())
//! ```
//!
//! # With Options
//!
//! ```rust,no_run
//! use grey_io::FormatWriter;
//! use grey_io::pgm::{PgmEncoding, PgmWriter, PgmWriterOptions};
//! # let image = grey_core::GreyImage::new(4, 4);
//!
//! let writer = PgmWriter::with_options(PgmWriterOptions {
//!     encoding: PgmEncoding::Binary,
//!     comment: Some("created by grey-io".to_string()),
//! });
//! writer.write("output.pgm", &image)?;
//! # Ok::<(), grey_io::Error>(())
//! ```
//!
//! # Header
//!
//! The header is a sequence of whitespace-separated tokens: magic, width,
//! height, max-value. Tokens may share a line or be split across lines,
//! and `#` starts a comment running to the end of the line anywhere
//! before the pixel data. A binary file has exactly one whitespace byte
//! between the max-value and the first sample. CRLF line endings are not
//! special-cased there: in `255\r\n` the `\r` is the separator and the
//! `\n` is read as the first sample.
//!
//! # Writing
//!
//! Samples are truncated toward zero and clamped to `[0, 255]`. The ASCII
//! writer records `max(255, trunc(max))` as max-value, one image row per
//! line, and no newline after the last row. The binary writer always
//! records 255.

use crate::{Error, FormatReader, FormatWriter, Result};
use byteorder::{BigEndian, ReadBytesExt};
use grey_core::GreyImage;
use std::io::{BufWriter, Read, Write};
use std::path::Path;

#[allow(unused_imports)]
use tracing::{debug, trace};

// === Constants ===

/// ASCII greymap magic.
pub const MAGIC_ASCII: &[u8; 2] = b"P2";
/// Binary greymap magic.
pub const MAGIC_BINARY: &[u8; 2] = b"P5";
/// Largest max-value the format allows.
pub const MAX_VALUE_LIMIT: u32 = 65535;

// === Encoding ===

/// PGM sample encoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PgmEncoding {
    /// `P2`: decimal integers.
    #[default]
    Ascii,
    /// `P5`: raw bytes.
    Binary,
}

impl PgmEncoding {
    /// Returns the two-byte magic for this encoding.
    pub fn magic(&self) -> &'static [u8; 2] {
        match self {
            PgmEncoding::Ascii => MAGIC_ASCII,
            PgmEncoding::Binary => MAGIC_BINARY,
        }
    }

    fn from_magic(magic: &[u8]) -> Option<Self> {
        match magic {
            b"P2" => Some(PgmEncoding::Ascii),
            b"P5" => Some(PgmEncoding::Binary),
            _ => None,
        }
    }
}

// === Options ===

/// Options for reading PGM files.
#[derive(Debug, Clone, Default)]
pub struct PgmReaderOptions {
    /// Reject files with trailing samples beyond `width * height` or with
    /// samples above the declared max-value. Default: off.
    pub strict: bool,
}

/// Options for writing PGM files.
///
/// # Example
///
/// ```rust
/// use grey_io::pgm::{PgmEncoding, PgmWriterOptions};
///
/// let options = PgmWriterOptions {
///     encoding: PgmEncoding::Ascii,
///     comment: Some("edge map".to_string()),
/// };
/// ```
#[derive(Debug, Clone, Default)]
pub struct PgmWriterOptions {
    /// Sample encoding. Default: ASCII (`P2`).
    pub encoding: PgmEncoding,
    /// Comment written after the magic, one `#` line per text line.
    pub comment: Option<String>,
}

// === Header ===

/// Parsed PGM header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct PgmHeader {
    encoding: PgmEncoding,
    width: u32,
    height: u32,
    max_value: u32,
}

/// Whitespace/comment aware tokenizer over a PGM byte stream.
struct Tokens<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> Tokens<'a> {
    fn new(data: &'a [u8], pos: usize) -> Self {
        Self { data, pos }
    }

    fn remaining(&self) -> usize {
        self.data.len().saturating_sub(self.pos)
    }

    fn skip_blank(&mut self) {
        loop {
            while self.pos < self.data.len() && self.data[self.pos].is_ascii_whitespace() {
                self.pos += 1;
            }
            if self.data.get(self.pos) != Some(&b'#') {
                break;
            }
            while self.pos < self.data.len() && self.data[self.pos] != b'\n' {
                self.pos += 1;
            }
        }
    }

    fn next_token(&mut self) -> Option<&'a [u8]> {
        self.skip_blank();
        let data = self.data;
        let start = self.pos;
        while self.pos < data.len() && !data[self.pos].is_ascii_whitespace() && data[self.pos] != b'#'
        {
            self.pos += 1;
        }
        if self.pos > start {
            Some(&data[start..self.pos])
        } else {
            None
        }
    }

    fn next_number<T: std::str::FromStr>(&mut self, what: &str) -> Result<T> {
        let token = self
            .next_token()
            .ok_or_else(|| Error::malformed(format!("PGM: missing {what}")))?;
        parse_number(token, what)
    }
}

fn parse_number<T: std::str::FromStr>(token: &[u8], what: &str) -> Result<T> {
    std::str::from_utf8(token)
        .ok()
        .and_then(|s| s.parse().ok())
        .ok_or_else(|| {
            Error::malformed(format!(
                "PGM: invalid {what} {:?}",
                String::from_utf8_lossy(token)
            ))
        })
}

impl PgmHeader {
    /// Parses the header and returns it with the offset of the first
    /// sample.
    fn parse(data: &[u8]) -> Result<(Self, usize)> {
        let encoding = data
            .get(..2)
            .and_then(PgmEncoding::from_magic)
            .ok_or_else(|| Error::malformed("PGM: expected magic P2 or P5"))?;

        let mut tokens = Tokens::new(data, 2);
        if tokens.remaining() > 0 && !data[2].is_ascii_whitespace() && data[2] != b'#' {
            return Err(Error::malformed("PGM: expected magic P2 or P5"));
        }

        let width: u32 = tokens.next_number("width")?;
        let height: u32 = tokens.next_number("height")?;
        let max_value: u32 = tokens.next_number("max value")?;
        if max_value == 0 || max_value > MAX_VALUE_LIMIT {
            return Err(Error::malformed(format!(
                "PGM: max value {max_value} outside 1..={MAX_VALUE_LIMIT}"
            )));
        }

        let mut offset = tokens.pos;
        if encoding == PgmEncoding::Binary {
            match data.get(offset) {
                Some(b) if b.is_ascii_whitespace() => offset += 1,
                _ => return Err(Error::malformed("PGM: missing separator before binary data")),
            }
        }

        Ok((
            Self {
                encoding,
                width,
                height,
                max_value,
            },
            offset,
        ))
    }

    fn sample_count(&self) -> usize {
        self.width as usize * self.height as usize
    }
}

// === PgmReader ===

/// PGM format reader.
///
/// Accepts both `P2` and `P5` files; the encoding is taken from the
/// magic.
#[derive(Debug, Clone, Default)]
pub struct PgmReader {
    options: PgmReaderOptions,
}

impl PgmReader {
    /// Creates a new reader with default options.
    pub fn new() -> Self {
        Self::default()
    }

    fn read_from<R: Read>(&self, reader: &mut R) -> Result<GreyImage> {
        let mut data = Vec::new();
        reader.read_to_end(&mut data)?;
        self.decode(&data)
    }

    fn decode(&self, data: &[u8]) -> Result<GreyImage> {
        let (header, offset) = PgmHeader::parse(data)?;
        debug!(
            width = header.width,
            height = header.height,
            max_value = header.max_value,
            encoding = ?header.encoding,
            "Reading PGM"
        );

        let samples = match header.encoding {
            PgmEncoding::Ascii => self.decode_ascii(&header, data, offset)?,
            PgmEncoding::Binary => self.decode_binary(&header, data, offset)?,
        };
        GreyImage::from_vec(samples, header.width, header.height)
    }

    fn decode_ascii(&self, header: &PgmHeader, data: &[u8], offset: usize) -> Result<Vec<f32>> {
        let count = header.sample_count();
        let mut tokens = Tokens::new(data, offset);

        // Every sample needs at least one byte.
        if count > tokens.remaining() {
            return Err(Error::malformed(format!(
                "PGM: {count} samples declared but only {} bytes follow the header",
                tokens.remaining()
            )));
        }

        let mut samples = Vec::with_capacity(count);
        for found in 0..count {
            let token = tokens.next_token().ok_or_else(|| short_data(count, found))?;
            let value: i32 = parse_number(token, "sample")?;
            self.check_range(value as i64, header.max_value)?;
            samples.push(value as f32);
        }

        if self.options.strict && tokens.next_token().is_some() {
            return Err(Error::malformed("PGM: trailing samples after pixel data"));
        }
        Ok(samples)
    }

    fn decode_binary(&self, header: &PgmHeader, data: &[u8], offset: usize) -> Result<Vec<f32>> {
        let count = header.sample_count();
        let bytes_per_sample = if header.max_value < 256 { 1 } else { 2 };
        let available = data.len().saturating_sub(offset);
        let needed = count.saturating_mul(bytes_per_sample);
        if available < needed {
            return Err(Error::malformed(format!(
                "PGM: expected {needed} bytes of pixel data, found {available}"
            )));
        }

        let pixels = &data[offset..offset + needed];
        let mut samples = Vec::with_capacity(count);
        if bytes_per_sample == 1 {
            for &b in pixels {
                self.check_range(b as i64, header.max_value)?;
                samples.push(b as f32);
            }
        } else {
            let mut rdr = pixels;
            for _ in 0..count {
                let v = rdr.read_u16::<BigEndian>()?;
                self.check_range(v as i64, header.max_value)?;
                samples.push(v as f32);
            }
        }

        if self.options.strict && available > needed {
            return Err(Error::malformed("PGM: trailing bytes after pixel data"));
        }
        Ok(samples)
    }

    fn check_range(&self, value: i64, max_value: u32) -> Result<()> {
        if self.options.strict && (value < 0 || value > max_value as i64) {
            return Err(Error::malformed(format!(
                "PGM: sample {value} outside 0..={max_value}"
            )));
        }
        Ok(())
    }
}

fn short_data(expected: usize, found: usize) -> Error {
    Error::malformed(format!("PGM: expected {expected} samples, found {found}"))
}

impl FormatReader<PgmReaderOptions> for PgmReader {
    fn format_name(&self) -> &'static str {
        "PGM"
    }

    fn extensions(&self) -> &'static [&'static str] {
        &["pgm", "pnm"]
    }

    fn can_read(&self, header: &[u8]) -> bool {
        header.len() >= 2 && PgmEncoding::from_magic(&header[..2]).is_some()
    }

    fn read<P: AsRef<Path>>(&self, path: P) -> Result<GreyImage> {
        let mut reader = crate::open_file(path.as_ref())?;
        self.read_from(&mut reader)
    }

    fn read_from_memory(&self, data: &[u8]) -> Result<GreyImage> {
        self.decode(data)
    }

    fn with_options(options: PgmReaderOptions) -> Self {
        Self { options }
    }
}

// === PgmWriter ===

/// PGM format writer.
///
/// Writes `P2` by default; see [`PgmWriterOptions`].
#[derive(Debug, Clone, Default)]
pub struct PgmWriter {
    options: PgmWriterOptions,
}

impl PgmWriter {
    /// Creates a new writer with default options.
    pub fn new() -> Self {
        Self::default()
    }

    fn write_to<W: Write>(&self, writer: &mut W, image: &GreyImage) -> Result<()> {
        let (width, height) = image.dimensions();
        let encoding = self.options.encoding;
        trace!(width, height, encoding = ?encoding, "pgm::write");

        writer.write_all(encoding.magic())?;
        writer.write_all(b"\n")?;
        if let Some(comment) = &self.options.comment {
            for line in comment.lines() {
                writeln!(writer, "# {line}")?;
            }
        }
        writeln!(writer, "{width} {height}")?;

        match encoding {
            PgmEncoding::Ascii => {
                let max_value = image.max().map(|m| (m as i32).max(255)).unwrap_or(255);
                writeln!(writer, "{max_value}")?;
                for y in 0..height {
                    let Some(row) = image.row(y) else { break };
                    if y > 0 {
                        writer.write_all(b"\n")?;
                    }
                    for (x, &v) in row.iter().enumerate() {
                        if x > 0 {
                            writer.write_all(b" ")?;
                        }
                        write!(writer, "{}", to_byte(v))?;
                    }
                }
            }
            PgmEncoding::Binary => {
                writeln!(writer, "255")?;
                let bytes: Vec<u8> = image.data().iter().map(|&v| to_byte(v)).collect();
                writer.write_all(&bytes)?;
            }
        }
        Ok(())
    }
}

/// Truncates toward zero and clamps to `[0, 255]`.
#[inline]
fn to_byte(v: f32) -> u8 {
    (v as i32).clamp(0, 255) as u8
}

impl FormatWriter<PgmWriterOptions> for PgmWriter {
    fn format_name(&self) -> &'static str {
        "PGM"
    }

    fn extensions(&self) -> &'static [&'static str] {
        &["pgm", "pnm"]
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

    fn with_options(options: PgmWriterOptions) -> Self {
        Self { options }
    }
}

// === Convenience Functions ===

/// Reads a PGM file (`P2` or `P5`) from the given path.
///
/// # Errors
///
/// - [`Error::FileNotFound`] / [`Error::FileOpen`] if the file cannot be opened
/// - [`Error::MalformedFile`] for a bad magic, header or short pixel data
pub fn read<P: AsRef<Path>>(path: P) -> Result<GreyImage> {
    PgmReader::default().read(path)
}

/// Writes an image as ASCII PGM (`P2`).
///
/// For binary output use [`PgmWriter`] with [`PgmEncoding::Binary`].
pub fn write<P: AsRef<Path>>(path: P, image: &GreyImage) -> Result<()> {
    PgmWriter::default().write(path, image)
}
