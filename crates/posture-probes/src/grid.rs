// ─────────────────────────────────────────────────────────────────────
// Structural Posture Engine — Sequence Generators
// ─────────────────────────────────────────────────────────────────────

use serde::{Deserialize, Serialize};

use posture_types::{PostureError, PostureResult};

/// Log-spaced refinement values from `h_max` down to `h_min`, both
/// endpoints included: linear interpolation in log10 space, strictly
/// decreasing.
///
/// Constraints: `0 < h_min < h_max`, `steps >= 3`. Violations are
/// configuration errors, raised before any step executes.
pub fn refinement_grid(h_max: f64, h_min: f64, steps: usize) -> PostureResult<Vec<f64>> {
    if !(h_max > 0.0 && h_min > 0.0 && h_min < h_max) {
        return Err(PostureError::Config(format!(
            "require 0 < h_min < h_max, got h_min={h_min}, h_max={h_max}"
        )));
    }
    if steps < 3 {
        return Err(PostureError::Config(format!(
            "require steps >= 3 for a refinement grid, got {steps}"
        )));
    }

    let log_max = h_max.log10();
    let log_min = h_min.log10();
    let last = (steps - 1) as f64;

    Ok((0..steps)
        .map(|k| {
            let t = k as f64 / last;
            10f64.powf(log_max + (log_min - log_max) * t)
        })
        .collect())
}

/// Uniform grid of `steps + 1` points on `[0, 1]`, consumed by the
/// quadrature runner as `steps` intervals. Requires `steps >= 5`.
pub fn uniform_grid(steps: usize) -> PostureResult<Vec<f64>> {
    if steps < 5 {
        return Err(PostureError::Config(format!(
            "require steps >= 5 for a quadrature grid, got {steps}"
        )));
    }
    let n = steps as f64;
    Ok((0..=steps).map(|i| i as f64 / n).collect())
}

/// Which path a limit-probe sequence takes toward zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LimitPath {
    /// `x_n = 1/(n*pi)`: the probe lands on zeros of sin(1/x).
    Calm,
    /// `x_n = 1/(n*pi + pi/2)`: the probe lands on extrema.
    Oscillatory,
}

impl LimitPath {
    pub fn as_str(self) -> &'static str {
        match self {
            LimitPath::Calm => "calm",
            LimitPath::Oscillatory => "oscillatory",
        }
    }
}

/// Point sequence converging to zero along the chosen path, for
/// `n = 1..=steps`. Requires `steps >= 5`.
pub fn limit_path(path: LimitPath, steps: usize) -> PostureResult<Vec<f64>> {
    if steps < 5 {
        return Err(PostureError::Config(format!(
            "require steps >= 5 for a limit path, got {steps}"
        )));
    }
    let pi = std::f64::consts::PI;
    Ok((1..=steps)
        .map(|n| match path {
            LimitPath::Calm => 1.0 / (n as f64 * pi),
            LimitPath::Oscillatory => 1.0 / (n as f64 * pi + pi / 2.0),
        })
        .collect())
}
