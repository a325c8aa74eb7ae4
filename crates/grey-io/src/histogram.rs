//! Histogram table output.
//!
//! Writes a two-column text table, one line per bin, suitable for
//! plotting tools:
//!
//! ```text
//! "Min bin value" "Count"
//! 0 12
//! 63.75 40
//! ```

use crate::Result;
use grey_core::{GreyImage, Histogram};
use std::io::{BufWriter, Write};
use std::num::NonZeroUsize;
use std::path::Path;

#[allow(unused_imports)]
use tracing::{debug, trace};

/// Column header line of a histogram table.
pub const HEADER: &str = "\"Min bin value\" \"Count\"";

/// Writes `histogram` as a table to `writer`.
///
/// Every line, the last included, ends with a newline.
pub fn write_histogram_to<W: Write>(writer: &mut W, histogram: &Histogram) -> Result<()> {
    writeln!(writer, "{HEADER}")?;
    for (floor, count) in histogram.iter() {
        writeln!(writer, "{floor} {count}")?;
    }
    Ok(())
}

/// Bins `image` into `bins` buckets and writes the table to `path`.
///
/// # Errors
///
/// - [`grey_core::Error::EmptyImage`] for an image without samples
/// - [`grey_core::Error::FileOpen`] if the file cannot be created
pub fn write_histogram<P: AsRef<Path>>(path: P, image: &GreyImage, bins: NonZeroUsize) -> Result<()> {
    let histogram = image.histogram(bins)?;
    debug!(bins = bins.get(), min = histogram.min(), max = histogram.max(), "Writing histogram");

    let file = crate::create_file(path.as_ref())?;
    let mut writer = BufWriter::new(file);
    write_histogram_to(&mut writer, &histogram)?;
    writer.flush()?;
    Ok(())
}
