// ─────────────────────────────────────────────────────────────────────
// Structural Posture Engine — Decision Gate
// ─────────────────────────────────────────────────────────────────────
//! Per-step ALLOW/DENY/ABSTAIN state machine.
//!
//! The gate owns the per-run thresholds and evaluates one step at a
//! time against an explicit [`RunState`] value that is passed in and
//! returned updated; no mutable state lives outside it.

use serde::{Deserialize, Serialize};

use posture_types::{PostureConfig, Status, StepRecord};

use crate::normalizer::effective;
use crate::posture::posture_step;

/// Single finiteness predicate for raw measurements. Every numeric
/// validity decision in the gate goes through here.
#[inline]
fn is_scoreable(m_raw: f64) -> bool {
    m_raw.is_finite()
}

/// Explicit run-lifetime state: previous effective measurement, strain
/// total, step cursor, and the terminal latch.
///
/// Created fresh per run, threaded through [`DecisionGate::step`], and
/// discarded when the sequence is exhausted or a terminal status lands.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RunState {
    prev_eff: Option<f64>,
    strain: f64,
    next_index: usize,
    terminated: bool,
}

impl RunState {
    /// Fresh state: no previous measurement, zero strain.
    pub fn new() -> Self {
        Self {
            prev_eff: None,
            strain: 0.0,
            next_index: 0,
            terminated: false,
        }
    }

    /// Strain accumulated so far.
    pub fn strain(&self) -> f64 {
        self.strain
    }

    /// Index the next step will carry.
    pub fn next_index(&self) -> usize {
        self.next_index
    }

    /// True once a DENY or ABSTAIN has been emitted.
    pub fn is_terminated(&self) -> bool {
        self.terminated
    }
}

impl Default for RunState {
    fn default() -> Self {
        Self::new()
    }
}

/// The decision gate: classifies each step from the alignment score,
/// the strain total, and the finiteness of the raw measurement.
#[derive(Debug, Clone)]
pub struct DecisionGate {
    cfg: PostureConfig,
}

impl DecisionGate {
    /// Thresholds are fixed for the gate's lifetime. Callers validate
    /// the configuration before the run starts.
    pub fn new(cfg: PostureConfig) -> Self {
        Self { cfg }
    }

    pub fn config(&self) -> &PostureConfig {
        &self.cfg
    }

    /// Evaluate one step: consume the state, return the successor state
    /// and the fully scored record.
    ///
    /// Must not be called on a terminated state; the run loop stops at
    /// the first terminal status.
    pub fn step(&self, state: RunState, input: f64, m_raw: f64) -> (RunState, StepRecord) {
        debug_assert!(!state.terminated, "gate stepped past a terminal status");
        let index = state.next_index;

        // Finiteness screen runs first; no scoring on non-finite input.
        if !is_scoreable(m_raw) {
            let record = StepRecord {
                index,
                input,
                m_raw,
                m_eff: m_raw,
                alignment: f64::NAN,
                strain: state.strain,
                log_ratio: f64::NAN,
                flip: false,
                status: Status::Abstain,
                dx: None,
                m_accum: None,
            };
            let next = RunState {
                terminated: true,
                next_index: index + 1,
                ..state
            };
            return (next, record);
        }

        let m_eff = effective(m_raw, self.cfg.zero_tol);

        let (alignment, log_ratio, flip, strain, status) = match state.prev_eff {
            // First step of a run: unconditional ALLOW baseline.
            None => (1.0, 0.0, false, state.strain, Status::Allow),
            Some(prev_eff) => {
                let out = posture_step(prev_eff, m_eff, self.cfg.beta_flip);

                // Both increments apply independently and unconditionally.
                let mut strain = state.strain;
                if out.log_ratio > self.cfg.r_safe {
                    strain += out.log_ratio - self.cfg.r_safe;
                }
                if out.flip {
                    strain += self.cfg.gamma_flip;
                }

                let status = if !out.alignment.is_finite()
                    || out.alignment < self.cfg.a_min
                    || strain > self.cfg.s_max
                {
                    Status::Deny
                } else {
                    Status::Allow
                };

                (out.alignment, out.log_ratio, out.flip, strain, status)
            }
        };

        if status == Status::Deny {
            log::error!(
                "POSTURE DENY at step {index}: a={alignment:.6} (floor {}), s={strain:.6} (ceiling {})",
                self.cfg.a_min,
                self.cfg.s_max
            );
        }

        let record = StepRecord {
            index,
            input,
            m_raw,
            m_eff,
            alignment,
            strain,
            log_ratio,
            flip,
            status,
            dx: None,
            m_accum: None,
        };

        let next = RunState {
            prev_eff: Some(m_eff),
            strain,
            next_index: index + 1,
            terminated: status.is_terminal(),
        };

        (next, record)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gate() -> DecisionGate {
        DecisionGate::new(PostureConfig::default())
    }

    #[test]
    fn test_first_step_baseline() {
        let (state, rec) = gate().step(RunState::new(), 0.1, 3.0);
        assert_eq!(rec.alignment, 1.0);
        assert_eq!(rec.log_ratio, 0.0);
        assert_eq!(rec.strain, 0.0);
        assert!(!rec.flip);
        assert_eq!(rec.status, Status::Allow);
        assert!(!state.is_terminated());
    }

    #[test]
    fn test_first_step_non_finite_abstains() {
        let (state, rec) = gate().step(RunState::new(), 0.1, f64::NAN);
        assert_eq!(rec.status, Status::Abstain);
        assert!(rec.alignment.is_nan());
        assert!(rec.log_ratio.is_nan());
        assert_eq!(rec.strain, 0.0);
        assert!(state.is_terminated());
    }

    #[test]
    fn test_infinite_measurement_abstains() {
        let g = gate();
        let (state, _) = g.step(RunState::new(), 0.1, 1.0);
        let (state, rec) = g.step(state, 0.05, f64::INFINITY);
        assert_eq!(rec.status, Status::Abstain);
        assert!(state.is_terminated());
    }

    #[test]
    fn test_stable_sequence_allows() {
        let g = gate();
        let mut state = RunState::new();
        for (i, m) in [1.0, 1.01, 0.99, 1.0].iter().enumerate() {
            let (next, rec) = g.step(state, 0.1 / (i + 1) as f64, *m);
            assert_eq!(rec.status, Status::Allow, "step {i}");
            state = next;
        }
        assert!(!state.is_terminated());
    }

    #[test]
    fn test_large_jump_denies_on_alignment() {
        let g = gate();
        let (state, _) = g.step(RunState::new(), 0.1, 1.0);
        // lr = ln(100) ~ 4.6 so a ~ 0.178 < 0.70.
        let (state, rec) = g.step(state, 0.05, 100.0);
        assert_eq!(rec.status, Status::Deny);
        assert!(rec.alignment < 0.70);
        assert!(state.is_terminated());
    }

    #[test]
    fn test_strain_accumulates_across_steps() {
        let g = gate();
        // Ratio e^0.2 per step: lr = 0.2, excess 0.1 each step.
        let ratio = (0.2f64).exp();
        let mut state = RunState::new();
        let mut m = 1.0;
        let (next, _) = g.step(state, 1.0, m);
        state = next;
        for k in 1..=3 {
            m *= ratio;
            let (next, rec) = g.step(state, 1.0 / (k as f64), m);
            assert!((rec.strain - 0.1 * k as f64).abs() < 1e-9);
            state = next;
        }
    }

    #[test]
    fn test_strain_ceiling_denies() {
        let cfg = PostureConfig {
            s_max: 0.15,
            ..PostureConfig::default()
        };
        let g = DecisionGate::new(cfg);
        let ratio = (0.2f64).exp();
        let (state, _) = g.step(RunState::new(), 1.0, 1.0);
        // First scored step: s = 0.1 <= 0.15, alignment fine.
        let (state, rec) = g.step(state, 0.5, ratio);
        assert_eq!(rec.status, Status::Allow);
        // Second: s = 0.2 > 0.15.
        let (_, rec) = g.step(state, 0.25, ratio * ratio);
        assert_eq!(rec.status, Status::Deny);
    }

    #[test]
    fn test_flip_adds_gamma_and_both_increments_stack() {
        let cfg = PostureConfig {
            a_min: 0.0,
            s_max: 100.0,
            ..PostureConfig::default()
        };
        let g = DecisionGate::new(cfg);
        let (state, _) = g.step(RunState::new(), 1.0, 1.0);
        // Magnitude ratio e (lr = 1.0) AND sign flip: strain gets the
        // excess 0.9 plus gamma 0.2, not one or the other.
        let (_, rec) = g.step(state, 0.5, -std::f64::consts::E);
        assert!(rec.flip);
        assert!((rec.strain - (0.9 + 0.2)).abs() < 1e-9);
    }

    #[test]
    fn test_zero_tol_suppresses_noise_flip() {
        let cfg = PostureConfig {
            zero_tol: 1e-12,
            ..PostureConfig::default()
        };
        let g = DecisionGate::new(cfg);
        let (state, _) = g.step(RunState::new(), 1.0, 1e-14);
        // Previous clamps to zero, so the sign change is not a flip.
        let (_, rec) = g.step(state, 0.5, -1e-14);
        assert!(!rec.flip);
        assert_eq!(rec.m_eff, 0.0);
        assert_eq!(rec.log_ratio, 0.0);
    }

    #[test]
    fn test_strain_never_decreases() {
        let g = gate();
        let mut state = RunState::new();
        let mut prev_strain = 0.0;
        let measurements = [1.0, 2.0, 0.5, -0.5, 0.5, 10.0];
        for (i, m) in measurements.iter().enumerate() {
            if state.is_terminated() {
                break;
            }
            let (next, rec) = g.step(state, 1.0 / (i + 1) as f64, *m);
            assert!(rec.strain >= prev_strain, "strain dropped at step {i}");
            prev_strain = rec.strain;
            state = next;
        }
    }

    #[test]
    fn test_record_index_advances() {
        let g = gate();
        let (state, rec0) = g.step(RunState::new(), 1.0, 1.0);
        let (_, rec1) = g.step(state, 0.5, 1.0);
        assert_eq!(rec0.index, 0);
        assert_eq!(rec1.index, 1);
    }
}
