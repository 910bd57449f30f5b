// ─────────────────────────────────────────────────────────────────────
// Structural Posture Engine — Configuration
// ─────────────────────────────────────────────────────────────────────

use serde::{Deserialize, Serialize};

use crate::error::{PostureError, PostureResult};

/// Per-run thresholds for the posture engine and decision gate.
///
/// All values are constants for the lifetime of a run; the gate never
/// mutates them. Sequence parameters (grid bounds, step counts) live
/// with the sequence generators, not here.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostureConfig {
    /// Alignment floor: a step is DENIED when alignment drops below.
    /// Default: 0.70.
    pub a_min: f64,

    /// Strain ceiling: a step is DENIED once accumulated strain exceeds.
    /// Default: 1.00.
    pub s_max: f64,

    /// Safe log-ratio band: only the excess over this adds strain.
    /// Default: 0.10.
    pub r_safe: f64,

    /// Alignment penalty weight for a sign flip. 0 disables the flip
    /// term entirely (the reduced variant for sign-free probes).
    /// Default: 0.50.
    pub beta_flip: f64,

    /// Fixed strain added per sign flip.
    /// Default: 0.20 (the cancellation driver overrides to 0.05).
    pub gamma_flip: f64,

    /// Magnitudes at or below this clamp to an effective value of
    /// exactly zero before scoring. Also accepted as `dm_zero_tol`,
    /// the spelling the quadrature traces historically used.
    /// Default: 1e-12.
    #[serde(alias = "dm_zero_tol")]
    pub zero_tol: f64,
}

impl Default for PostureConfig {
    fn default() -> Self {
        Self {
            a_min: 0.70,
            s_max: 1.00,
            r_safe: 0.10,
            beta_flip: 0.50,
            gamma_flip: 0.20,
            zero_tol: 1e-12,
        }
    }
}

impl PostureConfig {
    /// Validate thresholds before a run starts.
    pub fn validate(&self) -> PostureResult<()> {
        if !self.a_min.is_finite() || !(0.0..1.0).contains(&self.a_min) {
            return Err(PostureError::Config(format!(
                "a_min must be in [0, 1), got {}",
                self.a_min
            )));
        }
        if !self.s_max.is_finite() || self.s_max <= 0.0 {
            return Err(PostureError::Config(format!(
                "s_max must be > 0, got {}",
                self.s_max
            )));
        }
        if !self.r_safe.is_finite() || self.r_safe < 0.0 {
            return Err(PostureError::Config(format!(
                "r_safe must be >= 0, got {}",
                self.r_safe
            )));
        }
        if !self.beta_flip.is_finite() || self.beta_flip < 0.0 {
            return Err(PostureError::Config(format!(
                "beta_flip must be >= 0, got {}",
                self.beta_flip
            )));
        }
        if !self.gamma_flip.is_finite() || self.gamma_flip < 0.0 {
            return Err(PostureError::Config(format!(
                "gamma_flip must be >= 0, got {}",
                self.gamma_flip
            )));
        }
        if !self.zero_tol.is_finite() || self.zero_tol < 0.0 {
            return Err(PostureError::Config(format!(
                "zero_tol must be >= 0, got {}",
                self.zero_tol
            )));
        }
        Ok(())
    }

    /// Load from JSON string.
    pub fn from_json(json: &str) -> PostureResult<Self> {
        serde_json::from_str(json)
            .map_err(|e| PostureError::Config(format!("JSON parse error: {e}")))
    }

    /// Reduced variant: no flip penalty in either the alignment or the
    /// strain update. Used by probes where sign changes carry no
    /// information (non-negative integrands, monotone slopes).
    pub fn without_flip_terms(mut self) -> Self {
        self.beta_flip = 0.0;
        self.gamma_flip = 0.0;
        self
    }
}
