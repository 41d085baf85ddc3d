//! Tab-separated export of paired series.
//!
//! Purpose
//! -------
//! Persist `(x, y)` pairs — sampled signals, recovered spectra over their
//! τ-grid — as plain two-column text that gnuplot and spreadsheet tools
//! read directly.
//!
//! Conventions
//! -----------
//! - One `x<TAB>y` pair per line, both printed with six decimal places.
//! - Length mismatches are rejected before a single byte is written, so a
//!   failed call never leaves a partial file behind for that reason.
use std::fmt;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use ndarray::Array1;

/// Failure while exporting a series pair.
#[derive(Debug)]
pub enum ExportError {
    /// The two series differ in length.
    LengthMismatch { expected: usize, found: usize },
    /// The underlying writer failed.
    Io(io::Error),
}

impl fmt::Display for ExportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExportError::LengthMismatch { expected, found } => {
                write!(f, "Cannot export series pair: x has {expected} entries but y has {found}")
            }
            ExportError::Io(err) => write!(f, "Export failed: {err}"),
        }
    }
}

impl std::error::Error for ExportError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ExportError::Io(err) => Some(err),
            ExportError::LengthMismatch { .. } => None,
        }
    }
}

impl From<io::Error> for ExportError {
    fn from(err: io::Error) -> Self {
        ExportError::Io(err)
    }
}

/// Write the pair to any [`Write`] sink, one `x<TAB>y` line per sample.
///
/// # Errors
/// [`ExportError::LengthMismatch`] before any write; [`ExportError::Io`]
/// on sink failure.
pub fn write_xy<W: Write>(
    writer: &mut W, x: &Array1<f64>, y: &Array1<f64>,
) -> Result<(), ExportError> {
    if x.len() != y.len() {
        return Err(ExportError::LengthMismatch { expected: x.len(), found: y.len() });
    }
    for (xi, yi) in x.iter().zip(y.iter()) {
        writeln!(writer, "{xi:.6}\t{yi:.6}")?;
    }
    Ok(())
}

/// Write the pair to a file at `path`, buffered, creating or truncating it.
///
/// # Errors
/// Same as [`write_xy`], plus file creation failures.
pub fn save_xy<P: AsRef<Path>>(
    path: P, x: &Array1<f64>, y: &Array1<f64>,
) -> Result<(), ExportError> {
    // Validate before touching the filesystem.
    if x.len() != y.len() {
        return Err(ExportError::LengthMismatch { expected: x.len(), found: y.len() });
    }
    let mut writer = BufWriter::new(File::create(path)?);
    write_xy(&mut writer, x, y)?;
    writer.flush()?;
    Ok(())
}
