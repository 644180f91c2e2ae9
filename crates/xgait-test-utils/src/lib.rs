//! Shared test fixtures and utilities for X-gait crates.
//!
//! Provides the reference trot scenario, step-matching assertions, and
//! deterministic RNG helpers for randomized planner properties.

pub mod assert;
pub mod fixtures;
pub mod rng;

// ---------------------------------------------------------------------------
// Re-exports for convenience
// ---------------------------------------------------------------------------

pub use assert::{STEP_EPSILON, assert_steps_match};
pub use fixtures::{reference_continuation_steps, reference_settings, reference_steps};
pub use rng::{random_settings, random_velocity, seeded_rng};
