use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::Parser;
use rs_tcp_calibration::calibration_job::CalibrationJob;
use rs_tcp_calibration::tool_calibration::RobotToolCalibration;
use rs_tcp_calibration::utils::format_vector;

/// Calibrates the tool center point from robot poses touching the same point.
#[derive(Parser, Debug)]
#[clap(name = env!("CARGO_BIN_NAME"), version)]
struct Opt {
    /// Path to the YAML calibration job.
    #[clap(value_parser)]
    job: PathBuf,
    /// Maximal number of iterations, overrides the job settings.
    #[clap(long)]
    iterations: Option<usize>,
    /// Required precision in millimeters, overrides the job settings.
    #[clap(long)]
    precision: Option<f64>,
    /// Step of numeric derivatives in millimeters, overrides the job settings.
    #[clap(long)]
    delta: Option<f64>,
    /// Fraction of the Newton step to apply, overrides the job settings.
    #[clap(long)]
    damping: Option<f64>,
    /// Only check the joint positions against the axis limits.
    #[clap(long)]
    check_only: bool,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "rs_tcp_calibration=info".to_owned()),
        )
        .init();

    let opt = Opt::parse();
    let mut job = CalibrationJob::from_yaml_file(&opt.job)
        .with_context(|| format!("Failed to load calibration job {}", opt.job.display()))?;

    if let Some(iterations) = opt.iterations {
        job.settings.iterations = iterations;
    }
    if let Some(precision) = opt.precision {
        job.settings.precision = precision;
    }
    if let Some(delta) = opt.delta {
        job.settings.delta = delta;
    }
    if let Some(damping) = opt.damping {
        job.settings.damping = damping;
    }
    if !job.settings.is_valid() {
        bail!("Invalid calibration settings: {:?}", job.settings);
    }

    let mut calibration = job.into_calibration();
    let warnings = calibration.check_joint_positions_axis_limits();
    for warning in &warnings {
        println!("{}", warning);
    }
    if opt.check_only {
        if warnings.is_empty() {
            println!("All {} joint positions are within the axis limits.",
                     calibration.robot_joint_positions().len());
        }
        return Ok(());
    }

    calibration.calculate();
    report(&calibration);
    Ok(())
}

fn report(calibration: &RobotToolCalibration) {
    println!("{}", calibration);
    println!("TCP: {}", format_vector(&calibration.tcp()));
    if calibration.converged() {
        println!("Converged after {} iterations", calibration.iterations_used());
    } else {
        println!("Not converged after {} iterations", calibration.iterations_used());
    }
    println!("Maximum error: {}", format_vector(&calibration.maximum_error()));
    println!("Mean error: {}", format_vector(&calibration.mean_error()));

    println!("{:>5} {:>10} {:>10} {:>10}", "pose", "x", "y", "z");
    for (i, ((x, y), z)) in calibration.errors_x().iter()
        .zip(calibration.errors_y())
        .zip(calibration.errors_z())
        .enumerate() {
        println!("{:>5} {:>10.4} {:>10.4} {:>10.4}", i, x, y, z);
    }
}
