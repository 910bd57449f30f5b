// ─────────────────────────────────────────────────────────────────────
// Structural Posture Engine — Trace Recorder
// (C) 1998-2026 Miroslav Sotek. All rights reserved.
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
#![deny(unsafe_code)]
//! CSV persistence for step records: one header row, one row per
//! scored step, one file per probe/path variant. All variants share
//! the ordered prefix (index, input, raw measurement, alignment,
//! strain, log-ratio, status); quadrature and limit-path variants add
//! their extra columns.

pub mod recorder;
pub mod schema;

pub use recorder::{write_trace, TraceWriter};
