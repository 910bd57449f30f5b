// ─────────────────────────────────────────────────────────────────────
// Structural Posture Engine — Step Records and Status
// ─────────────────────────────────────────────────────────────────────

use std::fmt;

use serde::{Deserialize, Serialize};

/// Half-open lane margin: alignment is clamped into (-1+ε, 1-ε].
const LANE_EPS: f64 = 1e-12;

/// Clamp an alignment score into the lane `(-1+ε, 1-ε]` with ε = 1e-12.
///
/// Non-finite input passes through unchanged; the decision gate treats
/// a non-finite alignment as DENY, so the value must survive the clamp.
#[inline]
pub fn clamp_lane(a: f64) -> f64 {
    if !a.is_finite() {
        log::warn!("clamp_lane: non-finite alignment {a}");
        return a;
    }
    a.clamp(-1.0 + LANE_EPS, 1.0 - LANE_EPS)
}

/// Per-step governance verdict.
///
/// `Allow` is non-terminal; `Deny` and `Abstain` end the run at the
/// step that emits them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Status {
    /// Step accepted; the run continues.
    Allow,
    /// Alignment or strain criterion violated; the run stops here.
    Deny,
    /// Raw measurement was not finite; the run stops without scoring.
    Abstain,
}

impl Status {
    pub fn as_str(self) -> &'static str {
        match self {
            Status::Allow => "ALLOW",
            Status::Deny => "DENY",
            Status::Abstain => "ABSTAIN",
        }
    }

    /// True for the run-ending verdicts.
    pub fn is_terminal(self) -> bool {
        matches!(self, Status::Deny | Status::Abstain)
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Strict fixed-shape posture snapshot: the scored measurement, the
/// alignment it produced, and the strain total after the step.
///
/// Accessors are pure and total; there is no failure path in reading
/// a posture back out of a record.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PostureState {
    pub measurement: f64,
    pub alignment: f64,
    pub strain: f64,
}

impl PostureState {
    pub fn measurement(&self) -> f64 {
        self.measurement
    }

    pub fn alignment(&self) -> f64 {
        self.alignment
    }

    pub fn strain(&self) -> f64 {
        self.strain
    }
}

/// The atomic unit handed to the trace recorder: one fully scored step.
///
/// `dx` and `m_accum` are populated by quadrature runs only; direct
/// probe runs leave them `None`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StepRecord {
    /// 0-based step index within the run.
    pub index: usize,
    /// Probe input consumed at this step (step size, grid point).
    pub input: f64,
    /// Raw measurement as produced by the probe; may be non-finite.
    pub m_raw: f64,
    /// Measurement after zero-tolerance clamping.
    pub m_eff: f64,
    /// Alignment score, clamped into the lane; NaN on ABSTAIN.
    pub alignment: f64,
    /// Strain total after this step's increments.
    pub strain: f64,
    /// Log-ratio against the previous effective measurement; NaN on ABSTAIN.
    pub log_ratio: f64,
    /// Sign flip against the previous effective measurement.
    pub flip: bool,
    /// Verdict for this step.
    pub status: Status,
    /// Interval width, for quadrature runs.
    pub dx: Option<f64>,
    /// Running accumulated total, for quadrature runs.
    pub m_accum: Option<f64>,
}

impl StepRecord {
    /// Project the strict posture snapshot out of this record.
    pub fn posture(&self) -> PostureState {
        PostureState {
            measurement: self.m_raw,
            alignment: self.alignment,
            strain: self.strain,
        }
    }
}

/// Outcome of one complete run over a probe sequence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunSummary {
    /// Status of the last recorded step.
    pub final_status: Status,
    /// Number of step records emitted (terminal step included).
    pub steps_recorded: usize,
    /// Probe input of the first DENY step, if any occurred.
    pub first_deny_input: Option<f64>,
    /// Final accumulated total, for quadrature runs.
    pub m_accum: Option<f64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clamp_upper_lane() {
        assert_eq!(clamp_lane(1.0), 1.0 - 1e-12);
        assert_eq!(clamp_lane(2.5), 1.0 - 1e-12);
    }

    #[test]
    fn test_clamp_lower_lane() {
        assert_eq!(clamp_lane(-1.0), -1.0 + 1e-12);
        assert_eq!(clamp_lane(-7.0), -1.0 + 1e-12);
    }

    #[test]
    fn test_clamp_interior_untouched() {
        assert_eq!(clamp_lane(0.42), 0.42);
    }

    #[test]
    fn test_clamp_nan_passthrough() {
        assert!(clamp_lane(f64::NAN).is_nan());
    }

    #[test]
    fn test_clamp_inf_passthrough() {
        assert!(clamp_lane(f64::INFINITY).is_infinite());
    }

    #[test]
    fn test_status_terminality() {
        assert!(!Status::Allow.is_terminal());
        assert!(Status::Deny.is_terminal());
        assert!(Status::Abstain.is_terminal());
    }

    #[test]
    fn test_status_display() {
        assert_eq!(Status::Allow.to_string(), "ALLOW");
        assert_eq!(Status::Deny.to_string(), "DENY");
        assert_eq!(Status::Abstain.to_string(), "ABSTAIN");
    }

    #[test]
    fn test_posture_projection_is_total() {
        let rec = StepRecord {
            index: 3,
            input: 1e-4,
            m_raw: f64::NAN,
            m_eff: f64::NAN,
            alignment: f64::NAN,
            strain: 0.25,
            log_ratio: f64::NAN,
            flip: false,
            status: Status::Abstain,
            dx: None,
            m_accum: None,
        };
        // Projection never fails, even on an ABSTAIN record.
        let p = rec.posture();
        assert!(p.measurement().is_nan());
        assert_eq!(p.strain(), 0.25);
    }
}
