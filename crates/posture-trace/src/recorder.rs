// ─────────────────────────────────────────────────────────────────────
// Structural Posture Engine — CSV Writer
// ─────────────────────────────────────────────────────────────────────

use std::fs::File;
use std::path::Path;

use posture_types::{PostureError, PostureResult};

/// Thin wrapper over a CSV writer with the error mapping the rest of
/// the workspace expects.
#[derive(Debug)]
pub struct TraceWriter {
    inner: csv::Writer<File>,
}

impl TraceWriter {
    pub fn create(path: &Path) -> PostureResult<Self> {
        let inner = csv::Writer::from_path(path)
            .map_err(|e| PostureError::Trace(format!("cannot create {}: {e}", path.display())))?;
        Ok(Self { inner })
    }

    pub fn header(&mut self, columns: &[&str]) -> PostureResult<()> {
        self.inner
            .write_record(columns)
            .map_err(|e| PostureError::Trace(format!("header write failed: {e}")))
    }

    pub fn row(&mut self, cells: &[String]) -> PostureResult<()> {
        self.inner
            .write_record(cells)
            .map_err(|e| PostureError::Trace(format!("row write failed: {e}")))
    }

    pub fn finish(mut self) -> PostureResult<()> {
        self.inner
            .flush()
            .map_err(|e| PostureError::Trace(format!("flush failed: {e}")))
    }
}

/// Write one complete trace file: header, then every row, then flush.
pub fn write_trace<I>(path: &Path, columns: &[&str], rows: I) -> PostureResult<()>
where
    I: IntoIterator<Item = Vec<String>>,
{
    let mut writer = TraceWriter::create(path)?;
    writer.header(columns)?;
    for row in rows {
        writer.row(&row)?;
    }
    writer.finish()
}

/// Scientific-notation cell with fixed precision; non-finite values
/// render as their display text (`NaN`, `inf`, `-inf`).
pub fn sci(v: f64, prec: usize) -> String {
    if v.is_finite() {
        format!("{v:.prec$e}")
    } else {
        v.to_string()
    }
}

/// Fixed-point cell with fixed precision; non-finite values render as
/// their display text.
pub fn fixed(v: f64, prec: usize) -> String {
    if v.is_finite() {
        format!("{v:.prec$}")
    } else {
        v.to_string()
    }
}
