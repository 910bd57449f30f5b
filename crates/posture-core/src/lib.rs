// ─────────────────────────────────────────────────────────────────────
// Structural Posture Engine — Core Engine
// (C) 1998-2026 Miroslav Sotek. All rights reserved.
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
#![deny(unsafe_code)]
//! Scoring engine and decision gate for numerical probe sequences:
//! one synchronous pass, one ALLOW/DENY/ABSTAIN verdict per step.
//!
//! # Gate Invariants
//!
//! 1. **Strain is monotone**: the strain total never decreases within a
//!    run. Increments (excess log-ratio, flip penalty) apply
//!    independently and unconditionally each scored step; there is no
//!    reset and no rollback, even on DENY.
//!
//! 2. **Non-finite measurements never reach the scorer**: a single
//!    finiteness predicate at the top of the gate routes NaN/Inf raw
//!    measurements to a terminal ABSTAIN before any alignment or
//!    strain arithmetic runs.
//!
//! 3. **Terminal means terminal**: once a step emits DENY or ABSTAIN,
//!    no further probe input is consumed or recorded for that run.
//!
//! 4. **Deterministic**: no clocks, no randomness, no ambient state.
//!    Identical configuration and inputs yield identical step records.

pub mod gate;
pub mod normalizer;
pub mod posture;
pub mod runner;

pub use gate::{DecisionGate, RunState};
pub use normalizer::effective;
pub use posture::{posture_step, PostureOutcome, EPS};
pub use runner::{run_quadrature, run_sequence, RunReport};
