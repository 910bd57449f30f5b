// ─────────────────────────────────────────────────────────────────────
// Structural Posture Engine — Probe Library
// (C) 1998-2026 Miroslav Sotek. All rights reserved.
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
#![deny(unsafe_code)]
//! Sequence generators and probe functions feeding the posture engine:
//! log-spaced refinement grids, uniform quadrature grids, limit paths,
//! difference quotients, and the test integrands.
//!
//! Everything here is a pure function of its arguments; the engine
//! treats probes as interchangeable measurement sources.

pub mod derivative;
pub mod grid;
pub mod integrand;

pub use derivative::{central_quotient, forward_quotient};
pub use grid::{limit_path, refinement_grid, uniform_grid, LimitPath};
