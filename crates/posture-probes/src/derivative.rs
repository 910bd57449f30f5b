// ─────────────────────────────────────────────────────────────────────
// Structural Posture Engine — Derivative Probes
// ─────────────────────────────────────────────────────────────────────
//! Difference quotients and the reference probe functions whose
//! derivative behavior at zero exercises the gate: a genuine
//! singularity (sqrt), a damped oscillation (x^2 sin(1/x)), a smooth
//! zero-derivative case (1 - cos), and a boundary-layer regime.

use posture_types::{PostureError, PostureResult};

/// Forward difference quotient `(f(h) - f(0)) / h`; NaN for `h <= 0`.
pub fn forward_quotient<F>(f: F, h: f64) -> f64
where
    F: Fn(f64) -> f64,
{
    if h <= 0.0 {
        return f64::NAN;
    }
    (f(h) - f(0.0)) / h
}

/// Central difference quotient `(f(h) - f(-h)) / (2h)`; NaN for `h <= 0`.
pub fn central_quotient<F>(f: F, h: f64) -> f64
where
    F: Fn(f64) -> f64,
{
    if h <= 0.0 {
        return f64::NAN;
    }
    (f(h) - f(-h)) / (2.0 * h)
}

/// `sqrt(x)`; NaN on the negative axis. The forward quotient at zero
/// is `1/sqrt(h)`, unbounded under refinement.
pub fn sqrt_probe(x: f64) -> f64 {
    if x < 0.0 {
        return f64::NAN;
    }
    x.sqrt()
}

/// `x^2 sin(1/x)` extended by `f(0) = 0`. Classically differentiable
/// at zero with derivative 0, but the quotient oscillates in sign.
pub fn osc_quadratic(x: f64) -> f64 {
    if x == 0.0 {
        return 0.0;
    }
    x * x * (1.0 / x).sin()
}

/// `x sin(1/x)` extended by `f(0) = 0`. The limit-path probe: sampled
/// directly (not through a quotient) along paths converging to zero.
pub fn osc_linear(x: f64) -> f64 {
    if x == 0.0 {
        return 0.0;
    }
    x * (1.0 / x).sin()
}

/// `1 - cos(x)`: smooth, `f'(0) = 0`; the quotient decays linearly
/// under refinement, bleeding strain without a singularity.
pub fn one_minus_cos(x: f64) -> f64 {
    1.0 - x.cos()
}

/// Boundary-layer probe `f(x) = eps * (1 - exp(-x/eps))` with
/// `f(x) = 0` for `x <= 0`. Classical derivative at zero is 1, but the
/// quotient transitions sharply once `h` crosses the layer width.
///
/// For very negative exponents the IEEE-754 underflow to zero is
/// exact, so no special casing is needed deep inside the layer.
pub fn boundary_layer(x: f64, eps_scale: f64) -> f64 {
    if x <= 0.0 {
        return 0.0;
    }
    eps_scale * (1.0 - (-x / eps_scale).exp())
}

/// Fail-fast check for the boundary-layer width.
pub fn validate_eps_scale(eps_scale: f64) -> PostureResult<()> {
    if !eps_scale.is_finite() || eps_scale <= 0.0 {
        return Err(PostureError::Config(format!(
            "require eps_scale > 0, got {eps_scale}"
        )));
    }
    Ok(())
}
