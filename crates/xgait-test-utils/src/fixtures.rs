//! The reference forward-trot scenario.
//!
//! Settings: stance 1.0 x 0.25 m, clearance 0.1 m, 0.25 s steps, no end
//! double support, 90 degree phase shift. Command: 1 m/s forward from the
//! origin at t = 0, yaw 0, starting with the hind right leg.

use nalgebra::Point3;
use xgait_core::{GaitSettings, RobotQuadrant, TimeInterval, TimedStep};

pub fn reference_settings() -> GaitSettings {
    GaitSettings {
        stance_length: 1.0,
        stance_width: 0.25,
        step_ground_clearance: 0.1,
        step_duration: 0.25,
        end_double_support_duration: 0.0,
        end_phase_shift: 90.0,
    }
}

fn step(quadrant: RobotQuadrant, x: f64, y: f64, start: f64, end: f64) -> TimedStep {
    TimedStep::new(
        quadrant,
        Point3::new(x, y, 0.0),
        0.1,
        TimeInterval::new(start, end),
    )
}

/// Expected plan-from-rest output for the reference scenario.
pub fn reference_steps() -> [TimedStep; 4] {
    [
        step(RobotQuadrant::HindRight, -0.25, -0.125, 0.0, 0.25),
        step(RobotQuadrant::FrontRight, 0.875, -0.125, 0.125, 0.375),
        step(RobotQuadrant::HindLeft, 0.0, 0.125, 0.25, 0.5),
        step(RobotQuadrant::FrontLeft, 1.125, 0.125, 0.375, 0.625),
    ]
}

/// Expected continuation after the reference hind right step is committed.
pub fn reference_continuation_steps() -> [TimedStep; 3] {
    let [_, fr, hl, fl] = reference_steps();
    [fr, hl, fl]
}
