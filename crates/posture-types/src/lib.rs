// ─────────────────────────────────────────────────────────────────────
// Structural Posture Engine — Types
// (C) 1998-2026 Miroslav Sotek. All rights reserved.
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
#![deny(unsafe_code)]
//! Type definitions, configuration, and error hierarchy for the
//! Structural Posture Engine — the step-by-step ALLOW/DENY/ABSTAIN
//! gate over numerical probe sequences.

pub mod config;
pub mod error;
pub mod record;

pub use config::PostureConfig;
pub use error::{PostureError, PostureResult};
pub use record::{clamp_lane, PostureState, RunSummary, Status, StepRecord};
