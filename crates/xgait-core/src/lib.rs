// xgait-core: Quadrants, timed steps, gait settings, errors and clock for the X-gait planner.

pub mod config;
pub mod error;
pub mod time;
pub mod types;

pub use config::GaitSettings;
pub use error::{ConfigError, PlanError, SettingsError, XGaitError};
pub use time::ControlClock;
pub use types::{ParseQuadrantError, PlanarVelocity, RobotQuadrant, TimeInterval, TimedStep};

// ---------------------------------------------------------------------------
// Prelude
// ---------------------------------------------------------------------------

pub mod prelude {
    pub use crate::{
        config::GaitSettings,
        error::{ConfigError, PlanError, SettingsError, XGaitError},
        time::ControlClock,
        types::{PlanarVelocity, RobotQuadrant, TimeInterval, TimedStep},
    };
}
