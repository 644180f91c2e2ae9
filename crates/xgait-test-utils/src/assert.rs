//! Step comparison helpers.

use xgait_core::TimedStep;

/// Tolerance used by the planner regression tests.
pub const STEP_EPSILON: f64 = 1e-5;

/// Assert that two step sequences have the same length and match pairwise
/// within `epsilon`.
#[track_caller]
pub fn assert_steps_match(actual: &[TimedStep], expected: &[TimedStep], epsilon: f64) {
    assert_eq!(
        actual.len(),
        expected.len(),
        "step count mismatch: got {}, expected {}",
        actual.len(),
        expected.len()
    );
    for (i, (a, e)) in actual.iter().zip(expected).enumerate() {
        assert!(
            a.epsilon_equals(e, epsilon),
            "planned step {i} does not match nominal step\n  planned: {a}\n  nominal: {e}"
        );
    }
}
