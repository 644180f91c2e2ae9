use thiserror::Error;

/// Top-level error type for the X-gait planner.
#[derive(Debug, Error)]
pub enum XGaitError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Planning error: {0}")]
    Plan(#[from] PlanError),
}

/// Errors raised while loading gait settings from disk or text.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Invalid gait settings: {0}")]
    Settings(#[from] SettingsError),
}

/// Gait settings rejected by validation.
///
/// Copy + static field names so the planner can re-check settings on entry
/// without allocating.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum SettingsError {
    #[error("{field} must be finite")]
    NonFinite { field: &'static str },

    #[error("{field} must be >= 0, got {value}")]
    Negative { field: &'static str, value: f64 },

    #[error("step_duration must be > 0, got {0}")]
    NonPositiveStepDuration(f64),

    #[error("end_phase_shift must lie in (0, 180) or (180, 360) degrees, got {0}")]
    PhaseShiftOutOfRange(f64),
}

/// Contract violations detected by a planning call.
///
/// A call that returns one of these leaves the output buffer untouched.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum PlanError {
    #[error("Horizon capacity mismatch: expected {expected} steps, got {actual}")]
    HorizonCapacity { expected: usize, actual: usize },

    #[error("Step horizon updated before it was started")]
    NotStarted,

    #[error("Step is not ongoing at t={time}: liftoff is at t={liftoff}")]
    StepNotOngoing { time: f64, liftoff: f64 },

    #[error("Invalid time interval [{start}, {end})")]
    InvalidInterval { start: f64, end: f64 },

    #[error("Invalid gait settings: {0}")]
    Settings(#[from] SettingsError),
}
