//! X-gait footstep planner CLI.
//!
//! Provides four modes of operation:
//! - `plan`: Print one cycle planned from rest (and optionally its continuation)
//! - `walk`: Drive a step horizon from a simulated fixed-rate control loop
//! - `check`: Validate a gait settings file
//! - `info`: Print crate versions

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Args, Parser, Subcommand};
use nalgebra::{Point3, Rotation2};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::filter::LevelFilter;
use xgait_core::prelude::*;
use xgait_planner::{STEPS_PER_CYCLE, StepHorizon, XGaitPlanner};

// ---------------------------------------------------------------------------
// CLI
// ---------------------------------------------------------------------------

/// Real-time footstep planner for quadruped X-gaits.
#[derive(Parser)]
#[command(version, about)]
struct Cli {
    /// Gait settings TOML file (defaults are used when omitted).
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Increase log verbosity (-v debug, -vv trace).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Option<Commands>,
}

/// Velocity command shared by `plan` and `walk`.
#[derive(Args, Clone, Copy)]
struct CommandArgs {
    /// Forward velocity (m/s).
    #[arg(long, default_value_t = 0.5, allow_negative_numbers = true)]
    forward: f64,

    /// Lateral velocity, positive to the left (m/s).
    #[arg(long, default_value_t = 0.0, allow_negative_numbers = true)]
    lateral: f64,

    /// Yaw rate (rad/s).
    #[arg(long, default_value_t = 0.0, allow_negative_numbers = true)]
    yaw_rate: f64,

    /// Leg that lifts off first.
    #[arg(long, default_value = "hind_right")]
    start: RobotQuadrant,
}

impl CommandArgs {
    const fn velocity(&self) -> PlanarVelocity {
        PlanarVelocity::new(self.forward, self.lateral, self.yaw_rate)
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Plan one cycle from rest and print it.
    Plan {
        #[command(flatten)]
        command: CommandArgs,

        /// Time of the first liftoff (s).
        #[arg(long, default_value_t = 0.0)]
        time: f64,

        /// Body yaw (rad).
        #[arg(long, default_value_t = 0.0, allow_negative_numbers = true)]
        yaw: f64,

        /// Also print the continuation planned once the first step is ongoing.
        #[arg(long)]
        continued: bool,
    },

    /// Run a simulated control loop and print step transitions.
    Walk {
        #[command(flatten)]
        command: CommandArgs,

        /// Simulated duration (s).
        #[arg(short, long, default_value_t = 2.0)]
        duration: f64,

        /// Control loop rate (Hz).
        #[arg(short, long, default_value_t = 1000.0, value_parser = parse_rate)]
        rate: f64,
    },

    /// Validate a gait settings file and print the effective settings.
    Check {
        /// Settings file to validate.
        path: PathBuf,
    },

    /// Print crate information.
    Info,
}

fn parse_rate(s: &str) -> Result<f64, String> {
    let rate: f64 = s.parse().map_err(|e| format!("{e}"))?;
    if rate.is_finite() && rate > 0.0 {
        Ok(rate)
    } else {
        Err(format!("rate must be a positive number of Hz, got {s}"))
    }
}

// ---------------------------------------------------------------------------
// Mode implementations
// ---------------------------------------------------------------------------

fn load_settings(path: Option<&Path>) -> Result<GaitSettings, XGaitError> {
    match path {
        Some(path) => {
            let settings = GaitSettings::from_file(path)?;
            info!(path = %path.display(), "loaded gait settings");
            Ok(settings)
        }
        None => Ok(GaitSettings::default()),
    }
}

fn run_plan(
    settings: &GaitSettings,
    command: &CommandArgs,
    time: f64,
    yaw: f64,
    continued: bool,
) -> Result<(), XGaitError> {
    let planner = XGaitPlanner::new();
    let velocity = command.velocity();

    let mut steps = [TimedStep::default(); STEPS_PER_CYCLE];
    planner.compute_initial_plan(
        &mut steps,
        &velocity,
        command.start,
        &Point3::origin(),
        time,
        yaw,
        settings,
    )?;
    println!("plan from rest:");
    for step in &steps {
        println!("  {step}");
    }

    if continued {
        let ongoing = steps[0];
        let mut rest = [TimedStep::default(); STEPS_PER_CYCLE - 1];
        planner.compute_mid_step_plan(
            &mut rest,
            &ongoing,
            &velocity,
            ongoing.liftoff_time(),
            yaw,
            settings,
        )?;
        println!("\ncontinued from {}:", ongoing.quadrant);
        for step in &rest {
            println!("  {step}");
        }
    }
    Ok(())
}

fn run_walk(
    settings: &GaitSettings,
    command: &CommandArgs,
    duration: f64,
    rate: f64,
) -> Result<(), XGaitError> {
    let velocity = command.velocity();
    let mut horizon = StepHorizon::new(*settings).map_err(PlanError::from)?;
    let mut clock = ControlClock::from_rate_hz(rate);
    let dt = clock.period_secs();

    let mut yaw = 0.0;
    let mut centroid = Point3::origin();
    horizon.start(&velocity, command.start, centroid, clock.secs_f64(), yaw)?;

    let mut committed = 0usize;
    while clock.secs_f64() < duration {
        let now = clock.secs_f64();
        let events = horizon.update(&velocity, now, yaw)?;
        for step in events.completed() {
            println!("[{clock}] touchdown {}", step.quadrant);
        }
        for step in events.committed() {
            committed += 1;
            println!(
                "[{clock}] liftoff   {step}  body=({:+.3}, {:+.3}) yaw={:+.3}",
                centroid.x, centroid.y, yaw
            );
        }

        // Integrate the command the way an external estimator would report it.
        let world_velocity = Rotation2::new(yaw) * velocity.linear();
        centroid.x += world_velocity.x * dt;
        centroid.y += world_velocity.y * dt;
        yaw += velocity.yaw_rate * dt;
        clock.tick();
    }

    debug!(ticks = clock.ticks(), committed, "walk finished");
    println!(
        "\ntotal: ticks={}, steps={committed}, body=({:+.3}, {:+.3}) yaw={:+.3}",
        clock.ticks(),
        centroid.x,
        centroid.y,
        yaw
    );
    Ok(())
}

fn run_check(path: &Path) -> Result<(), XGaitError> {
    let settings = GaitSettings::from_file(path)?;
    println!("{} is valid", path.display());
    println!(
        "  stance:          {:.3} x {:.3} m",
        settings.stance_length, settings.stance_width
    );
    println!("  clearance:       {:.3} m", settings.step_ground_clearance);
    println!("  step duration:   {:.3} s", settings.step_duration);
    println!(
        "  double support:  {:.3} s",
        settings.end_double_support_duration
    );
    println!("  phase shift:     {:.1} deg", settings.end_phase_shift);
    println!("  cycle duration:  {:.3} s", settings.cycle_duration());
    Ok(())
}

fn run_info() {
    println!("xgait v{}", env!("CARGO_PKG_VERSION"));
    println!();
    println!("crates:");
    println!("  xgait-core     {}", env!("CARGO_PKG_VERSION"));
    println!("  xgait-planner  {}", env!("CARGO_PKG_VERSION"));
    println!();
    println!("edition: 2024");
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => LevelFilter::WARN,
        1 => LevelFilter::DEBUG,
        _ => LevelFilter::TRACE,
    };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive(level.into()))
        .with_writer(std::io::stderr)
        .init();
}

// ---------------------------------------------------------------------------
// main
// ---------------------------------------------------------------------------

fn run(cli: Cli) -> Result<(), XGaitError> {
    match cli.command {
        Some(Commands::Check { path }) => run_check(&path),
        Some(Commands::Info) => {
            run_info();
            Ok(())
        }
        Some(Commands::Plan {
            command,
            time,
            yaw,
            continued,
        }) => {
            let settings = load_settings(cli.config.as_deref())?;
            run_plan(&settings, &command, time, yaw, continued)
        }
        Some(Commands::Walk {
            command,
            duration,
            rate,
        }) => {
            let settings = load_settings(cli.config.as_deref())?;
            run_walk(&settings, &command, duration, rate)
        }
        None => {
            // Default: plan the reference forward trot.
            let settings = load_settings(cli.config.as_deref())?;
            let command = CommandArgs {
                forward: 1.0,
                lateral: 0.0,
                yaw_rate: 0.0,
                start: RobotQuadrant::HindRight,
            };
            run_plan(&settings, &command, 0.0, 0.0, true)
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}
