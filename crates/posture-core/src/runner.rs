// ─────────────────────────────────────────────────────────────────────
// Structural Posture Engine — Run Loop
// ─────────────────────────────────────────────────────────────────────
//! One synchronous pass over one finite probe sequence.
//!
//! Two entry points share the gate: direct runs score the probe's
//! measurement itself; quadrature runs score the per-interval
//! increment while carrying the running total alongside. The engine
//! never scores the accumulated integral.

use posture_types::{PostureConfig, PostureError, PostureResult, RunSummary, Status, StepRecord};

use crate::gate::{DecisionGate, RunState};

/// Ordered step records plus the run summary.
#[derive(Debug, Clone, PartialEq)]
pub struct RunReport {
    pub records: Vec<StepRecord>,
    pub summary: RunSummary,
}

fn summarize(records: &[StepRecord], first_deny: Option<f64>, m_accum: Option<f64>) -> RunSummary {
    let final_status = records
        .last()
        .map_or(Status::Allow, |r| r.status);
    RunSummary {
        final_status,
        steps_recorded: records.len(),
        first_deny_input: first_deny,
        m_accum,
    }
}

/// Evaluate a direct probe sequence: one measurement per input.
///
/// Fails fast on invalid thresholds or an empty sequence; stops at the
/// first terminal status.
pub fn run_sequence<F>(cfg: &PostureConfig, inputs: &[f64], probe: F) -> PostureResult<RunReport>
where
    F: Fn(f64) -> f64,
{
    cfg.validate()?;
    if inputs.is_empty() {
        return Err(PostureError::Config("empty probe sequence".into()));
    }

    let gate = DecisionGate::new(cfg.clone());
    let mut state = RunState::new();
    let mut records = Vec::with_capacity(inputs.len());
    let mut first_deny = None;

    for &input in inputs {
        let (next, record) = gate.step(state, input, probe(input));
        state = next;

        if record.status == Status::Deny && first_deny.is_none() {
            first_deny = Some(input);
        }
        let terminal = record.status.is_terminal();
        records.push(record);
        if terminal {
            break;
        }
    }

    let summary = summarize(&records, first_deny, None);
    Ok(RunReport { records, summary })
}

/// Evaluate a quadrature run over a monotone grid of `n+1` points,
/// consumed as `n` intervals.
///
/// Each step scores the increment `f(x_k) * dx`; the running total is
/// recorded alongside but only committed on ALLOW steps, so a terminal
/// step never contaminates the reported accumulator.
pub fn run_quadrature<F>(cfg: &PostureConfig, grid: &[f64], integrand: F) -> PostureResult<RunReport>
where
    F: Fn(f64) -> f64,
{
    cfg.validate()?;
    if grid.len() < 2 {
        return Err(PostureError::Config(format!(
            "quadrature grid needs at least 2 points, got {}",
            grid.len()
        )));
    }

    let gate = DecisionGate::new(cfg.clone());
    let mut state = RunState::new();
    let mut records = Vec::with_capacity(grid.len() - 1);
    let mut first_deny = None;
    let mut m_accum = 0.0;

    for pair in grid.windows(2) {
        let (x0, x1) = (pair[0], pair[1]);
        let dx = x1 - x0;
        let dm = integrand(x0) * dx;
        let m_new = m_accum + dm;

        let (next, mut record) = gate.step(state, x0, dm);
        state = next;
        record.dx = Some(dx);
        record.m_accum = Some(m_new);

        if record.status == Status::Deny && first_deny.is_none() {
            first_deny = Some(x0);
        }
        let terminal = record.status.is_terminal();
        if !terminal {
            m_accum = m_new;
        }
        records.push(record);
        if terminal {
            break;
        }
    }

    let summary = summarize(&records, first_deny, Some(m_accum));
    Ok(RunReport { records, summary })
}
