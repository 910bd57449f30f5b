// ─────────────────────────────────────────────────────────────────────
// Structural Posture Engine — Experiment Drivers
// (C) 1998-2026 Miroslav Sotek. All rights reserved.
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
#![deny(unsafe_code)]
//! One subcommand per experiment: each validates its configuration,
//! builds a probe sequence, runs the posture engine, writes the trace
//! CSV(s), and reports the run summary.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{Args, Parser, Subcommand};

use posture_core::{run_quadrature, run_sequence, RunReport};
use posture_probes::derivative::{
    boundary_layer, central_quotient, forward_quotient, one_minus_cos, osc_linear, osc_quadratic,
    sqrt_probe, validate_eps_scale,
};
use posture_probes::integrand::{
    alternating_blocks, grid_quadrature, spiky, unit, validate_blocks, zero,
};
use posture_probes::{limit_path, refinement_grid, uniform_grid, LimitPath};
use posture_trace::{schema, write_trace};
use posture_types::{PostureConfig, RunSummary};

#[derive(Parser)]
#[command(
    author,
    version,
    about = "Structural posture evaluation of numerical probe sequences"
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Forward derivative of sqrt(x) at 0: an unbounded quotient
    SqrtSlope(SqrtSlopeArgs),
    /// Forward derivative of x^2 sin(1/x) at 0: sign-churning quotient
    OscSlope(OscSlopeArgs),
    /// Forward derivative of 1 - cos(x) at 0: refinement fatigue
    FatigueSlope(FatigueSlopeArgs),
    /// Boundary-layer probe eps*(1 - exp(-x/eps)): stiffness regime
    StiffSlope(StiffSlopeArgs),
    /// Forward vs central differencing of 1 - cos(x)
    SlopeGeometry(SlopeGeometryArgs),
    /// x sin(1/x) along calm and oscillatory paths toward 0
    #[command(name = "limit-path")]
    LimitPathCmd(LimitPathArgs),
    /// Quadrature of constant-1 vs a normalized spiky integrand
    EqualArea(EqualAreaArgs),
    /// Quadrature of constant-0 vs alternating +/-1 blocks
    Cancellation(CancellationArgs),
}

/// Gate thresholds shared by every driver.
#[derive(Args, Debug)]
struct ThresholdArgs {
    /// Alignment floor: a step is denied below this
    #[arg(long, default_value_t = 0.70)]
    a_min: f64,

    /// Strain ceiling: a step is denied above this
    #[arg(long, default_value_t = 1.00)]
    s_max: f64,

    /// Safe log-ratio band; only the excess accumulates strain
    #[arg(long, default_value_t = 0.10)]
    r_safe: f64,
}

impl ThresholdArgs {
    fn config(&self) -> PostureConfig {
        PostureConfig {
            a_min: self.a_min,
            s_max: self.s_max,
            r_safe: self.r_safe,
            ..PostureConfig::default()
        }
    }
}

#[derive(Args, Debug)]
struct SqrtSlopeArgs {
    #[command(flatten)]
    thresholds: ThresholdArgs,

    #[arg(long, default_value = "out_sqrt_slope")]
    out_dir: PathBuf,

    /// Coarsest step size
    #[arg(long, default_value_t = 1e-1)]
    h_max: f64,

    /// Finest step size
    #[arg(long, default_value_t = 1e-15)]
    h_min: f64,

    #[arg(long, default_value_t = 15)]
    steps: usize,
}

#[derive(Args, Debug)]
struct OscSlopeArgs {
    #[command(flatten)]
    thresholds: ThresholdArgs,

    #[arg(long, default_value = "out_osc_slope")]
    out_dir: PathBuf,

    #[arg(long, default_value_t = 1e-1)]
    h_max: f64,

    #[arg(long, default_value_t = 1e-15)]
    h_min: f64,

    #[arg(long, default_value_t = 200)]
    steps: usize,

    /// Alignment penalty weight per sign flip
    #[arg(long, default_value_t = 0.50)]
    beta_flip: f64,

    /// Strain added per sign flip
    #[arg(long, default_value_t = 0.20)]
    gamma_flip: f64,
}

#[derive(Args, Debug)]
struct FatigueSlopeArgs {
    #[command(flatten)]
    thresholds: ThresholdArgs,

    #[arg(long, default_value = "out_fatigue_slope")]
    out_dir: PathBuf,

    #[arg(long, default_value_t = 1e-1)]
    h_max: f64,

    #[arg(long, default_value_t = 1e-18)]
    h_min: f64,

    #[arg(long, default_value_t = 200)]
    steps: usize,

    #[arg(long, default_value_t = 0.50)]
    beta_flip: f64,

    #[arg(long, default_value_t = 0.20)]
    gamma_flip: f64,
}

#[derive(Args, Debug)]
struct StiffSlopeArgs {
    #[command(flatten)]
    thresholds: ThresholdArgs,

    #[arg(long, default_value = "out_stiff_slope")]
    out_dir: PathBuf,

    #[arg(long, default_value_t = 1e-1)]
    h_max: f64,

    #[arg(long, default_value_t = 1e-18)]
    h_min: f64,

    #[arg(long, default_value_t = 240)]
    steps: usize,

    /// Boundary-layer width
    #[arg(long, default_value_t = 1e-6)]
    eps_scale: f64,
}

#[derive(Args, Debug)]
struct SlopeGeometryArgs {
    #[command(flatten)]
    thresholds: ThresholdArgs,

    #[arg(long, default_value = "out_slope_geometry")]
    out_dir: PathBuf,

    #[arg(long, default_value_t = 1e-1)]
    h_max: f64,

    #[arg(long, default_value_t = 1e-18)]
    h_min: f64,

    #[arg(long, default_value_t = 200)]
    steps: usize,
}

#[derive(Args, Debug)]
struct LimitPathArgs {
    #[command(flatten)]
    thresholds: ThresholdArgs,

    #[arg(long, default_value = "out_limit_path")]
    out_dir: PathBuf,

    #[arg(long, default_value_t = 200)]
    steps: usize,

    #[arg(long, default_value_t = 0.50)]
    beta_flip: f64,

    #[arg(long, default_value_t = 0.20)]
    gamma_flip: f64,

    /// Magnitudes at or below this clamp to an effective zero
    #[arg(long, default_value_t = 1e-12)]
    zero_tol: f64,
}

#[derive(Args, Debug)]
struct EqualAreaArgs {
    #[command(flatten)]
    thresholds: ThresholdArgs,

    #[arg(long, default_value = "out_equal_area")]
    out_dir: PathBuf,

    #[arg(long, default_value_t = 500)]
    steps: usize,

    /// Spike regularization in 1/sqrt(x + eps)
    #[arg(long, default_value_t = 1e-6)]
    eps: f64,
}

#[derive(Args, Debug)]
struct CancellationArgs {
    #[command(flatten)]
    thresholds: ThresholdArgs,

    #[arg(long, default_value = "out_cancellation")]
    out_dir: PathBuf,

    #[arg(long, default_value_t = 1000)]
    steps: usize,

    /// Even number of alternating +/-1 blocks over [0, 1]
    #[arg(long, default_value_t = 200)]
    blocks: usize,

    #[arg(long, default_value_t = 0.50)]
    beta_flip: f64,

    #[arg(long, default_value_t = 0.05)]
    gamma_flip: f64,

    #[arg(long, default_value_t = 1e-15)]
    zero_tol: f64,
}

fn prepare_out_dir(dir: &Path) -> anyhow::Result<()> {
    fs::create_dir_all(dir).with_context(|| format!("cannot create {}", dir.display()))
}

fn print_summary(label: &str, summary: &RunSummary) {
    println!(
        "{label}: final status {} after {} steps",
        summary.final_status, summary.steps_recorded
    );
    if let Some(x) = summary.first_deny_input {
        println!("{label}: first DENY at input ~= {x:.3e}");
    }
    if let Some(m) = summary.m_accum {
        println!("{label}: accumulated total ~= {m:.6e}");
    }
}

fn run_sqrt_slope(args: &SqrtSlopeArgs) -> anyhow::Result<()> {
    let cfg = PostureConfig {
        zero_tol: 0.0,
        ..args.thresholds.config()
    }
    .without_flip_terms();
    let hs = refinement_grid(args.h_max, args.h_min, args.steps)?;

    let report = run_sequence(&cfg, &hs, |h| forward_quotient(sqrt_probe, h))?;

    prepare_out_dir(&args.out_dir)?;
    let out = args.out_dir.join("trace_sqrt_slope.csv");
    write_trace(
        &out,
        &schema::slope_columns(false),
        report.records.iter().map(|r| schema::slope_row(r, false)),
    )?;

    println!("sqrt slope refinement complete");
    println!("Output: {}", out.display());
    print_summary("sqrt", &report.summary);
    Ok(())
}

fn run_osc_slope(args: &OscSlopeArgs) -> anyhow::Result<()> {
    let cfg = PostureConfig {
        beta_flip: args.beta_flip,
        gamma_flip: args.gamma_flip,
        zero_tol: 0.0,
        ..args.thresholds.config()
    };
    let hs = refinement_grid(args.h_max, args.h_min, args.steps)?;

    let report = run_sequence(&cfg, &hs, |h| forward_quotient(osc_quadratic, h))?;

    prepare_out_dir(&args.out_dir)?;
    let out = args.out_dir.join("trace_osc_slope.csv");
    write_trace(
        &out,
        &schema::slope_columns(true),
        report.records.iter().map(|r| schema::slope_row(r, true)),
    )?;

    println!("oscillatory slope refinement complete (classical derivative = 0)");
    println!("Output: {}", out.display());
    print_summary("osc", &report.summary);
    Ok(())
}

fn run_fatigue_slope(args: &FatigueSlopeArgs) -> anyhow::Result<()> {
    let cfg = PostureConfig {
        beta_flip: args.beta_flip,
        gamma_flip: args.gamma_flip,
        zero_tol: 0.0,
        ..args.thresholds.config()
    };
    let hs = refinement_grid(args.h_max, args.h_min, args.steps)?;

    let report = run_sequence(&cfg, &hs, |h| forward_quotient(one_minus_cos, h))?;

    prepare_out_dir(&args.out_dir)?;
    let out = args.out_dir.join("trace_fatigue_slope.csv");
    write_trace(
        &out,
        &schema::slope_columns(true),
        report.records.iter().map(|r| schema::slope_row(r, true)),
    )?;

    println!("refinement fatigue complete (classical derivative = 0)");
    println!("Output: {}", out.display());
    print_summary("fatigue", &report.summary);
    Ok(())
}

fn run_stiff_slope(args: &StiffSlopeArgs) -> anyhow::Result<()> {
    validate_eps_scale(args.eps_scale)?;
    let cfg = PostureConfig {
        zero_tol: 0.0,
        ..args.thresholds.config()
    }
    .without_flip_terms();
    let hs = refinement_grid(args.h_max, args.h_min, args.steps)?;

    let eps = args.eps_scale;
    let report = run_sequence(&cfg, &hs, |h| {
        forward_quotient(|x| boundary_layer(x, eps), h)
    })?;

    prepare_out_dir(&args.out_dir)?;
    let out = args.out_dir.join("trace_stiff_slope.csv");
    write_trace(
        &out,
        &schema::slope_eps_columns(),
        report.records.iter().map(|r| schema::slope_eps_row(r, eps)),
    )?;

    println!("stiffness regime complete (classical derivative = 1)");
    println!("Output: {}", out.display());
    print_summary("stiff", &report.summary);
    Ok(())
}

fn run_slope_geometry(args: &SlopeGeometryArgs) -> anyhow::Result<()> {
    let cfg = PostureConfig {
        zero_tol: 0.0,
        ..args.thresholds.config()
    }
    .without_flip_terms();
    let hs = refinement_grid(args.h_max, args.h_min, args.steps)?;

    let forward = run_sequence(&cfg, &hs, |h| forward_quotient(one_minus_cos, h))?;
    let central = run_sequence(&cfg, &hs, |h| central_quotient(one_minus_cos, h))?;

    prepare_out_dir(&args.out_dir)?;
    let out = args.out_dir.join("trace_slope_geometry.csv");
    let rows = forward
        .records
        .iter()
        .map(|r| schema::geometry_row("forward", r))
        .chain(
            central
                .records
                .iter()
                .map(|r| schema::geometry_row("central", r)),
        );
    write_trace(&out, &schema::geometry_columns(), rows)?;

    println!("geometry comparison complete (forward vs central)");
    println!("Output: {}", out.display());
    print_summary("forward", &forward.summary);
    print_summary("central", &central.summary);
    Ok(())
}

fn run_limit_path(args: &LimitPathArgs) -> anyhow::Result<()> {
    let cfg = PostureConfig {
        beta_flip: args.beta_flip,
        gamma_flip: args.gamma_flip,
        zero_tol: args.zero_tol,
        ..args.thresholds.config()
    };

    let mut reports: Vec<(LimitPath, RunReport)> = Vec::with_capacity(2);
    for path in [LimitPath::Calm, LimitPath::Oscillatory] {
        let xs = limit_path(path, args.steps)?;
        let report = run_sequence(&cfg, &xs, osc_linear)?;
        reports.push((path, report));
    }

    prepare_out_dir(&args.out_dir)?;
    println!("limit-path comparison complete for x sin(1/x) as x -> 0");
    for (path, report) in &reports {
        let out = args
            .out_dir
            .join(format!("trace_limit_path_{}.csv", path.as_str()));
        write_trace(
            &out,
            &schema::path_columns(),
            report.records.iter().map(schema::path_row),
        )?;
        println!("Output ({}): {}", path.as_str(), out.display());
        print_summary(path.as_str(), &report.summary);
    }
    Ok(())
}

fn run_equal_area(args: &EqualAreaArgs) -> anyhow::Result<()> {
    validate_eps_scale(args.eps)?;
    let cfg = PostureConfig {
        zero_tol: 0.0,
        ..args.thresholds.config()
    }
    .without_flip_terms();
    let xs = uniform_grid(args.steps)?;

    let smooth = run_quadrature(&cfg, &xs, unit)?;

    // Normalize the spike to the same unit area over this exact grid.
    let eps = args.eps;
    let area = grid_quadrature(|x| spiky(x, eps), &xs);
    let spiky_norm = run_quadrature(&cfg, &xs, |x| spiky(x, eps) / area)?;

    prepare_out_dir(&args.out_dir)?;
    let out_smooth = args.out_dir.join("trace_equal_area_smooth.csv");
    let out_spiky = args.out_dir.join("trace_equal_area_spiky.csv");
    write_trace(
        &out_smooth,
        &schema::equal_area_columns(),
        smooth.records.iter().map(schema::equal_area_row),
    )?;
    write_trace(
        &out_spiky,
        &schema::equal_area_columns(),
        spiky_norm.records.iter().map(schema::equal_area_row),
    )?;

    println!("equal-area quadrature complete (same classical integral)");
    println!("Output (smooth): {}", out_smooth.display());
    println!("Output (spiky): {}", out_spiky.display());
    print_summary("smooth", &smooth.summary);
    print_summary("spiky", &spiky_norm.summary);
    Ok(())
}

fn run_cancellation(args: &CancellationArgs) -> anyhow::Result<()> {
    validate_blocks(args.blocks)?;
    let cfg = PostureConfig {
        beta_flip: args.beta_flip,
        gamma_flip: args.gamma_flip,
        zero_tol: args.zero_tol,
        ..args.thresholds.config()
    };
    let xs = uniform_grid(args.steps)?;

    let calm = run_quadrature(&cfg, &xs, zero)?;
    let blocks = args.blocks;
    let churned = run_quadrature(&cfg, &xs, |x| alternating_blocks(x, blocks))?;

    prepare_out_dir(&args.out_dir)?;
    let out_zero = args.out_dir.join("trace_cancellation_zero.csv");
    let out_alt = args.out_dir.join("trace_cancellation_alternating.csv");
    write_trace(
        &out_zero,
        &schema::quadrature_columns(),
        calm.records.iter().map(schema::quadrature_row),
    )?;
    write_trace(
        &out_alt,
        &schema::quadrature_columns(),
        churned.records.iter().map(schema::quadrature_row),
    )?;

    println!("cancellation quadrature complete (same classical value, different strain)");
    println!("Output (zero): {}", out_zero.display());
    println!("Output (alternating): {}", out_alt.display());
    print_summary("zero", &calm.summary);
    print_summary("alternating", &churned.summary);
    Ok(())
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();
    match &cli.command {
        Command::SqrtSlope(args) => run_sqrt_slope(args),
        Command::OscSlope(args) => run_osc_slope(args),
        Command::FatigueSlope(args) => run_fatigue_slope(args),
        Command::StiffSlope(args) => run_stiff_slope(args),
        Command::SlopeGeometry(args) => run_slope_geometry(args),
        Command::LimitPathCmd(args) => run_limit_path(args),
        Command::EqualArea(args) => run_equal_area(args),
        Command::Cancellation(args) => run_cancellation(args),
    }
}
