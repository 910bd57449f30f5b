// ─────────────────────────────────────────────────────────────────────
// Structural Posture Engine — Trace Schemas
// ─────────────────────────────────────────────────────────────────────
//! Column layouts and row builders for each trace variant. Every
//! layout keeps the shared prefix order (index, input, raw, a, s,
//! log-ratio, status); the variants differ only in their extra
//! columns and in the historical 0- vs 1-based step numbering.

use posture_types::StepRecord;

use crate::recorder::{fixed, sci};

fn flip_cell(rec: &StepRecord) -> String {
    (if rec.flip { "1" } else { "0" }).to_string()
}

/// Derivative-refinement layout; `with_flip` adds the sign-flip column
/// for the variants that penalize it.
pub fn slope_columns(with_flip: bool) -> Vec<&'static str> {
    if with_flip {
        vec!["k", "h", "m_slope", "a", "s", "log_ratio", "sign_flip", "status"]
    } else {
        vec!["k", "h", "m_slope", "a", "s", "log_ratio", "status"]
    }
}

pub fn slope_row(rec: &StepRecord, with_flip: bool) -> Vec<String> {
    let mut row = vec![
        rec.index.to_string(),
        sci(rec.input, 3),
        sci(rec.m_raw, 16),
        fixed(rec.alignment, 8),
        fixed(rec.strain, 8),
        fixed(rec.log_ratio, 8),
    ];
    if with_flip {
        row.push(flip_cell(rec));
    }
    row.push(rec.status.to_string());
    row
}

/// Boundary-layer layout: the slope layout with the constant layer
/// width recorded on every row.
pub fn slope_eps_columns() -> Vec<&'static str> {
    vec!["k", "h", "eps_scale", "m_slope", "a", "s", "log_ratio", "status"]
}

pub fn slope_eps_row(rec: &StepRecord, eps_scale: f64) -> Vec<String> {
    vec![
        rec.index.to_string(),
        sci(rec.input, 3),
        sci(eps_scale, 3),
        sci(rec.m_raw, 16),
        fixed(rec.alignment, 8),
        fixed(rec.strain, 8),
        fixed(rec.log_ratio, 8),
        rec.status.to_string(),
    ]
}

/// Forward-vs-central comparison layout: both geometries share one
/// file, labeled per row.
pub fn geometry_columns() -> Vec<&'static str> {
    vec!["geometry", "k", "h", "m_slope", "a", "s", "log_ratio", "status"]
}

pub fn geometry_row(label: &str, rec: &StepRecord) -> Vec<String> {
    vec![
        label.to_string(),
        rec.index.to_string(),
        sci(rec.input, 3),
        sci(rec.m_raw, 16),
        fixed(rec.alignment, 8),
        fixed(rec.strain, 8),
        fixed(rec.log_ratio, 8),
        rec.status.to_string(),
    ]
}

/// Limit-path layout: 1-based point numbering, effective measurement
/// and sign flip included.
pub fn path_columns() -> Vec<&'static str> {
    vec!["n", "x_n", "m_raw", "m_eff", "a", "s", "log_ratio", "sign_flip", "status"]
}

pub fn path_row(rec: &StepRecord) -> Vec<String> {
    vec![
        (rec.index + 1).to_string(),
        sci(rec.input, 16),
        sci(rec.m_raw, 16),
        sci(rec.m_eff, 16),
        fixed(rec.alignment, 8),
        fixed(rec.strain, 8),
        fixed(rec.log_ratio, 8),
        flip_cell(rec),
        rec.status.to_string(),
    ]
}

/// Full quadrature layout: 1-based step numbering, interval width,
/// raw and effective increments, running total, sign flip.
pub fn quadrature_columns() -> Vec<&'static str> {
    vec![
        "step", "x", "dx", "dm", "dm_eff", "m_accum", "a", "s", "log_ratio", "sign_flip",
        "status",
    ]
}

pub fn quadrature_row(rec: &StepRecord) -> Vec<String> {
    vec![
        (rec.index + 1).to_string(),
        fixed(rec.input, 6),
        fixed(rec.dx.unwrap_or(f64::NAN), 10),
        sci(rec.m_raw, 12),
        sci(rec.m_eff, 12),
        sci(rec.m_accum.unwrap_or(f64::NAN), 12),
        fixed(rec.alignment, 8),
        fixed(rec.strain, 8),
        fixed(rec.log_ratio, 8),
        flip_cell(rec),
        rec.status.to_string(),
    ]
}

/// Reduced quadrature layout for the equal-area study: no effective
/// column, no flip column.
pub fn equal_area_columns() -> Vec<&'static str> {
    vec!["step", "x", "dm", "m_accum", "a", "s", "log_ratio", "status"]
}

pub fn equal_area_row(rec: &StepRecord) -> Vec<String> {
    vec![
        (rec.index + 1).to_string(),
        fixed(rec.input, 6),
        fixed(rec.m_raw, 8),
        fixed(rec.m_accum.unwrap_or(f64::NAN), 8),
        fixed(rec.alignment, 6),
        fixed(rec.strain, 6),
        fixed(rec.log_ratio, 6),
        rec.status.to_string(),
    ]
}

#[cfg(test)]
mod tests {
    use posture_types::Status;

    use super::*;

    fn record() -> StepRecord {
        StepRecord {
            index: 2,
            input: 1e-3,
            m_raw: 0.015811,
            m_eff: 0.015811,
            alignment: 0.93,
            strain: 0.05,
            log_ratio: 0.02,
            flip: true,
            status: Status::Allow,
            dx: Some(0.001),
            m_accum: Some(0.25),
        }
    }

    #[test]
    fn test_slope_row_matches_columns() {
        let rec = record();
        for with_flip in [false, true] {
            assert_eq!(
                slope_row(&rec, with_flip).len(),
                slope_columns(with_flip).len()
            );
        }
    }

    #[test]
    fn test_slope_flip_cell_toggle() {
        let rec = record();
        let row = slope_row(&rec, true);
        assert_eq!(row[6], "1");
        let row = slope_row(&StepRecord { flip: false, ..rec }, true);
        assert_eq!(row[6], "0");
    }

    #[test]
    fn test_slope_eps_row_matches_columns() {
        assert_eq!(
            slope_eps_row(&record(), 1e-6).len(),
            slope_eps_columns().len()
        );
    }

    #[test]
    fn test_geometry_row_labeled() {
        let row = geometry_row("central", &record());
        assert_eq!(row.len(), geometry_columns().len());
        assert_eq!(row[0], "central");
    }

    #[test]
    fn test_path_row_one_based() {
        let row = path_row(&record());
        assert_eq!(row.len(), path_columns().len());
        assert_eq!(row[0], "3");
    }

    #[test]
    fn test_quadrature_row_matches_columns() {
        let row = quadrature_row(&record());
        assert_eq!(row.len(), quadrature_columns().len());
        assert_eq!(row[0], "3");
        assert_eq!(row[1], "0.001000");
    }

    #[test]
    fn test_equal_area_row_matches_columns() {
        assert_eq!(equal_area_row(&record()).len(), equal_area_columns().len());
    }

    #[test]
    fn test_status_cell_text() {
        let rec = StepRecord {
            status: Status::Deny,
            ..record()
        };
        assert_eq!(slope_row(&rec, false).last().unwrap(), "DENY");
    }
}
