// ─────────────────────────────────────────────────────────────────────
// Structural Posture Engine — Quadrature Integrands
// ─────────────────────────────────────────────────────────────────────
//! Test integrands over `[0, 1]` and the helpers the equal-area and
//! cancellation experiments need: a left-endpoint grid sum and an
//! even-block alternating square wave.

use posture_types::{PostureError, PostureResult};

/// Identically zero: the calm reference for the cancellation study.
pub fn zero(_x: f64) -> f64 {
    0.0
}

/// Constant one: the smooth reference for the equal-area study.
pub fn unit(_x: f64) -> f64 {
    1.0
}

/// `1/sqrt(x + eps)`: integrable spike at the left endpoint.
pub fn spiky(x: f64, eps: f64) -> f64 {
    1.0 / (x + eps).sqrt()
}

/// Alternating `+1/-1` square wave over `[0, 1]` in `blocks` equal
/// blocks; the final block absorbs the right endpoint.
///
/// With an even block count the classical integral is exactly zero,
/// the same value the zero integrand reaches without any sign churn.
pub fn alternating_blocks(x: f64, blocks: usize) -> f64 {
    let k = ((x * blocks as f64).floor() as usize).min(blocks - 1);
    if k % 2 == 0 {
        1.0
    } else {
        -1.0
    }
}

/// Fail-fast check for the block count: even, at least 2.
pub fn validate_blocks(blocks: usize) -> PostureResult<()> {
    if blocks < 2 || blocks % 2 != 0 {
        return Err(PostureError::Config(format!(
            "require an even block count >= 2, got {blocks}"
        )));
    }
    Ok(())
}

/// Left-endpoint grid sum of `f` over the intervals of `grid`; the
/// same rule the quadrature runner applies, used to normalize an
/// integrand to unit area over that grid.
pub fn grid_quadrature<F>(f: F, grid: &[f64]) -> f64
where
    F: Fn(f64) -> f64,
{
    grid.windows(2)
        .map(|pair| f(pair[0]) * (pair[1] - pair[0]))
        .sum()
}
