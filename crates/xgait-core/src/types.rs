use std::fmt;
use std::str::FromStr;

use nalgebra::{Point3, Vector2};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::error::PlanError;

// ---------------------------------------------------------------------------
// RobotQuadrant
// ---------------------------------------------------------------------------

/// One of the four legs of a quadruped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RobotQuadrant {
    #[default]
    FrontLeft,
    FrontRight,
    HindLeft,
    HindRight,
}

impl RobotQuadrant {
    /// All quadrants in index order.
    pub const ALL: [Self; 4] = [
        Self::FrontLeft,
        Self::FrontRight,
        Self::HindLeft,
        Self::HindRight,
    ];

    /// Stable index into per-leg arrays (FL=0, FR=1, HL=2, HR=3).
    pub const fn index(self) -> usize {
        match self {
            Self::FrontLeft => 0,
            Self::FrontRight => 1,
            Self::HindLeft => 2,
            Self::HindRight => 3,
        }
    }

    pub const fn is_front(self) -> bool {
        matches!(self, Self::FrontLeft | Self::FrontRight)
    }

    pub const fn is_hind(self) -> bool {
        !self.is_front()
    }

    pub const fn is_left(self) -> bool {
        matches!(self, Self::FrontLeft | Self::HindLeft)
    }

    pub const fn is_right(self) -> bool {
        !self.is_left()
    }

    /// Diagonal partner (FL<->HR, FR<->HL).
    pub const fn diagonal(self) -> Self {
        match self {
            Self::FrontLeft => Self::HindRight,
            Self::FrontRight => Self::HindLeft,
            Self::HindLeft => Self::FrontRight,
            Self::HindRight => Self::FrontLeft,
        }
    }

    /// Leg at the same end on the other side of the body.
    pub const fn across_body(self) -> Self {
        match self {
            Self::FrontLeft => Self::FrontRight,
            Self::FrontRight => Self::FrontLeft,
            Self::HindLeft => Self::HindRight,
            Self::HindRight => Self::HindLeft,
        }
    }

    /// Leg on the same side at the other end of the body.
    pub const fn same_side(self) -> Self {
        match self {
            Self::FrontLeft => Self::HindLeft,
            Self::FrontRight => Self::HindRight,
            Self::HindLeft => Self::FrontLeft,
            Self::HindRight => Self::FrontRight,
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            Self::FrontLeft => "front_left",
            Self::FrontRight => "front_right",
            Self::HindLeft => "hind_left",
            Self::HindRight => "hind_right",
        }
    }
}

impl fmt::Display for RobotQuadrant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.name())
    }
}

/// Unrecognised quadrant name.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unknown quadrant: {0} (expected front_left, front_right, hind_left, hind_right)")]
pub struct ParseQuadrantError(pub String);

impl FromStr for RobotQuadrant {
    type Err = ParseQuadrantError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().replace('-', "_").as_str() {
            "front_left" | "fl" => Ok(Self::FrontLeft),
            "front_right" | "fr" => Ok(Self::FrontRight),
            "hind_left" | "hl" => Ok(Self::HindLeft),
            "hind_right" | "hr" => Ok(Self::HindRight),
            _ => Err(ParseQuadrantError(s.to_owned())),
        }
    }
}

// ---------------------------------------------------------------------------
// TimeInterval
// ---------------------------------------------------------------------------

/// Half-open time window `[start, end)` in seconds.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct TimeInterval {
    pub start: f64,
    pub end: f64,
}

impl TimeInterval {
    /// Build an interval without checking ordering.
    pub const fn new(start: f64, end: f64) -> Self {
        Self { start, end }
    }

    /// Build an interval, rejecting empty, reversed or non-finite bounds.
    pub fn try_new(start: f64, end: f64) -> Result<Self, PlanError> {
        if !start.is_finite() || !end.is_finite() || end <= start {
            return Err(PlanError::InvalidInterval { start, end });
        }
        Ok(Self { start, end })
    }

    pub fn duration(&self) -> f64 {
        self.end - self.start
    }

    /// True if `t` lies in `[start, end)`.
    pub fn contains(&self, t: f64) -> bool {
        t >= self.start && t < self.end
    }

    #[must_use]
    pub fn shifted(&self, dt: f64) -> Self {
        Self {
            start: self.start + dt,
            end: self.end + dt,
        }
    }

    pub fn epsilon_equals(&self, other: &Self, epsilon: f64) -> bool {
        (self.start - other.start).abs() < epsilon && (self.end - other.end).abs() < epsilon
    }
}

// ---------------------------------------------------------------------------
// TimedStep
// ---------------------------------------------------------------------------

/// One planned footstep: which leg, where it lands, how high it swings and when.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TimedStep {
    pub quadrant: RobotQuadrant,
    /// Touchdown position in world frame (meters).
    pub goal_position: Point3<f64>,
    /// Swing apex height above the straight liftoff-touchdown line (meters).
    pub ground_clearance: f64,
    /// Swing window: liftoff at `start`, touchdown at `end`.
    pub time_interval: TimeInterval,
}

impl Default for TimedStep {
    fn default() -> Self {
        Self {
            quadrant: RobotQuadrant::default(),
            goal_position: Point3::origin(),
            ground_clearance: 0.0,
            time_interval: TimeInterval::default(),
        }
    }
}

impl TimedStep {
    pub const fn new(
        quadrant: RobotQuadrant,
        goal_position: Point3<f64>,
        ground_clearance: f64,
        time_interval: TimeInterval,
    ) -> Self {
        Self {
            quadrant,
            goal_position,
            ground_clearance,
            time_interval,
        }
    }

    pub const fn liftoff_time(&self) -> f64 {
        self.time_interval.start
    }

    pub const fn touchdown_time(&self) -> f64 {
        self.time_interval.end
    }

    /// Copy of this step with the goal raised by `dz` (terrain height bias).
    #[must_use]
    pub fn with_height_offset(mut self, dz: f64) -> Self {
        self.goal_position.z += dz;
        self
    }

    /// Quadrant matches and every position, clearance and time bound is within `epsilon`.
    pub fn epsilon_equals(&self, other: &Self, epsilon: f64) -> bool {
        self.quadrant == other.quadrant
            && (self.ground_clearance - other.ground_clearance).abs() < epsilon
            && (self.goal_position - other.goal_position)
                .iter()
                .all(|d| d.abs() < epsilon)
            && self.time_interval.epsilon_equals(&other.time_interval, epsilon)
    }
}

impl fmt::Display for TimedStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:<11} goal=({:+.3}, {:+.3}, {:+.3}) clearance={:.3} t=[{:.3}, {:.3})",
            self.quadrant,
            self.goal_position.x,
            self.goal_position.y,
            self.goal_position.z,
            self.ground_clearance,
            self.time_interval.start,
            self.time_interval.end,
        )
    }
}

// ---------------------------------------------------------------------------
// PlanarVelocity
// ---------------------------------------------------------------------------

/// Body-frame velocity command.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct PlanarVelocity {
    /// Forward velocity (m/s).
    pub forward: f64,
    /// Lateral velocity, positive to the left (m/s).
    pub lateral: f64,
    /// Yaw rate (rad/s). Integrated by the caller, not by the planner.
    #[serde(default)]
    pub yaw_rate: f64,
}

impl PlanarVelocity {
    pub const fn new(forward: f64, lateral: f64, yaw_rate: f64) -> Self {
        Self {
            forward,
            lateral,
            yaw_rate,
        }
    }

    pub const fn zero() -> Self {
        Self::new(0.0, 0.0, 0.0)
    }

    /// Translational part as a body-frame vector.
    pub fn linear(&self) -> Vector2<f64> {
        Vector2::new(self.forward, self.lateral)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
