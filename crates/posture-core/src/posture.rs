// ─────────────────────────────────────────────────────────────────────
// Structural Posture Engine — Posture Scoring
// ─────────────────────────────────────────────────────────────────────
//! Consecutive-step scoring: the log-ratio of effective magnitudes,
//! the sign-flip indicator, and the alignment score they induce.

use serde::{Deserialize, Serialize};

use posture_types::clamp_lane;

/// Regularizing constant for the log-ratio. Magnitudes at or below
/// this are treated as structurally zero.
pub const EPS: f64 = 1e-15;

/// Scored comparison of two consecutive effective measurements.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PostureOutcome {
    /// Alignment score, clamped into the lane. Always positive here:
    /// the raw value 1/(1 + lr + beta*flip) is bounded by (0, 1].
    pub alignment: f64,
    /// Non-negative relative-magnitude jump.
    pub log_ratio: f64,
    /// Sign reversal between the effective values.
    pub flip: bool,
}

/// Log-ratio of effective magnitudes `p_abs` (previous) and `c_abs`
/// (current), both non-negative.
///
/// The sub-EPS arms keep the ratio finite when either side is
/// structurally zero; a zero-to-zero transition is a zero jump.
pub fn log_ratio(p_abs: f64, c_abs: f64) -> f64 {
    if p_abs <= EPS && c_abs <= EPS {
        0.0
    } else if p_abs <= EPS {
        ((c_abs + EPS) / EPS).ln().abs()
    } else if c_abs <= EPS {
        (EPS / (p_abs + EPS)).ln().abs()
    } else {
        ((c_abs + EPS) / (p_abs + EPS)).ln().abs()
    }
}

/// Score the transition from `prev_eff` to `cur_eff`.
///
/// Both inputs are effective (zero-clamped) measurements with sign.
/// `beta_flip = 0` disables the flip term in the alignment, reducing
/// to the sign-free variant `a = 1/(1+lr)`.
///
/// The lane clamp is applied unconditionally even though the raw
/// score cannot leave (0, 1] in this formula; other scoring formulas
/// in the family share the lane bounds.
pub fn posture_step(prev_eff: f64, cur_eff: f64, beta_flip: f64) -> PostureOutcome {
    let lr = log_ratio(prev_eff.abs(), cur_eff.abs());
    // A zero operand never counts as opposite in sign to anything.
    let flip = prev_eff * cur_eff < 0.0;
    let a = 1.0 / (1.0 + lr + if flip { beta_flip } else { 0.0 });
    PostureOutcome {
        alignment: clamp_lane(a),
        log_ratio: lr,
        flip,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_equal_magnitudes_zero_ratio() {
        // P == C above EPS gives lr == 0 exactly: the ratio is 1.
        assert_eq!(log_ratio(0.5, 0.5), 0.0);
        let out = posture_step(2.0, 2.0, 0.5);
        assert_eq!(out.log_ratio, 0.0);
        assert!(!out.flip);
        assert_eq!(out.alignment, clamp_lane(1.0));
    }

    #[test]
    fn test_both_below_eps_zero_ratio() {
        assert_eq!(log_ratio(0.0, 0.0), 0.0);
        assert_eq!(log_ratio(1e-16, 1e-16), 0.0);
    }

    #[test]
    fn test_zero_to_value_ratio() {
        let lr = log_ratio(0.0, 1.0);
        assert!((lr - ((1.0 + EPS) / EPS).ln()).abs() < 1e-12);
    }

    #[test]
    fn test_value_to_zero_ratio() {
        let lr = log_ratio(1.0, 0.0);
        assert!((lr - (EPS / (1.0 + EPS)).ln().abs()).abs() < 1e-12);
    }

    #[test]
    fn test_ratio_symmetry() {
        // |ln(C/P)| is symmetric in P and C.
        let up = log_ratio(0.1, 10.0);
        let down = log_ratio(10.0, 0.1);
        assert!((up - down).abs() < 1e-12);
    }

    #[test]
    fn test_flip_detected() {
        let out = posture_step(2.0, -3.0, 0.5);
        assert!(out.flip);
    }

    #[test]
    fn test_same_sign_no_flip() {
        let out = posture_step(2.0, 3.0, 0.5);
        assert!(!out.flip);
    }

    #[test]
    fn test_zero_operand_never_flips() {
        assert!(!posture_step(0.0, -3.0, 0.5).flip);
        assert!(!posture_step(0.0, 3.0, 0.5).flip);
        assert!(!posture_step(-3.0, 0.0, 0.5).flip);
    }

    #[test]
    fn test_flip_penalty_lowers_alignment() {
        let with_flip = posture_step(2.0, -2.0, 0.5);
        let without = posture_step(2.0, 2.0, 0.5);
        assert!(with_flip.alignment < without.alignment);
        // Equal magnitudes, so the whole gap is the flip term.
        assert!((with_flip.alignment - 1.0 / 1.5).abs() < 1e-12);
    }

    #[test]
    fn test_beta_zero_ignores_flip_in_alignment() {
        let out = posture_step(2.0, -2.0, 0.0);
        assert!(out.flip);
        assert_eq!(out.alignment, clamp_lane(1.0));
    }

    #[test]
    fn test_alignment_in_lane() {
        for (p, c) in [(1.0, 1e6), (1e6, 1.0), (0.0, 5.0), (5.0, 0.0), (1.0, -1.0)] {
            let out = posture_step(p, c, 0.5);
            assert!(out.alignment > 0.0);
            assert!(out.alignment <= 1.0 - 1e-12);
        }
    }

    #[test]
    fn test_log_ratio_always_non_negative() {
        for (p, c) in [(0.5, 0.5), (0.1, 10.0), (0.0, 1.0), (1.0, 0.0)] {
            assert!(log_ratio(p, c) >= 0.0);
        }
    }
}
