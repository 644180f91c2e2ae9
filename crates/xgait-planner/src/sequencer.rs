//! Stepping order and liftoff cadence of the X-gait.
//!
//! With `H = step_duration + end_double_support_duration` and the full cycle
//! `2H`, each front leg lifts off `end_phase_shift / 360 · 2H` after its
//! same-side hind leg, and the two sides run half a cycle apart. Sorting the
//! four liftoffs gives the stepping order:
//!
//! ```text
//! phase shift in (0, 180):   HR → FR → HL → FL → HR …
//! phase shift in (180, 360): HR → FL → HL → FR → HR …
//! ```
//!
//! A hind leg is followed after `(φ mod 180) / 360 · 2H` and a front leg
//! after the rest of the half cycle, so consecutive hind liftoffs are always
//! exactly `H` apart.

use xgait_core::{GaitSettings, RobotQuadrant};

/// Steps in one full gait cycle (every leg once).
pub const STEPS_PER_CYCLE: usize = 4;

/// The leg that lifts off after another, and the delay between the two liftoffs.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StepTransition {
    pub quadrant: RobotQuadrant,
    /// Seconds from the previous leg's liftoff to this leg's liftoff.
    pub liftoff_offset: f64,
}

/// True when front legs trail their same-side hind leg by less than half a cycle.
fn front_follows_same_side(settings: &GaitSettings) -> bool {
    settings.end_phase_shift < 180.0
}

/// Phase shift folded into `[0, 180)`: the hind-to-front share of a half cycle.
fn pair_phase_shift(settings: &GaitSettings) -> f64 {
    settings.end_phase_shift % 180.0
}

/// Successor of `quadrant` in the stepping order.
pub fn next_quadrant(quadrant: RobotQuadrant, settings: &GaitSettings) -> RobotQuadrant {
    let same_side_next = if quadrant.is_hind() {
        front_follows_same_side(settings)
    } else {
        !front_follows_same_side(settings)
    };
    if same_side_next {
        quadrant.same_side()
    } else {
        quadrant.diagonal()
    }
}

/// Delay from `quadrant`'s liftoff to its successor's liftoff.
///
/// Strictly positive for settings that pass [`GaitSettings::validate`].
pub fn liftoff_offset(quadrant: RobotQuadrant, settings: &GaitSettings) -> f64 {
    let cycle = settings.cycle_duration();
    let pair = pair_phase_shift(settings);
    if quadrant.is_hind() {
        pair / 360.0 * cycle
    } else {
        (180.0 - pair) / 360.0 * cycle
    }
}

/// Next leg to lift off after `quadrant`, with its liftoff delay.
pub fn next_step(quadrant: RobotQuadrant, settings: &GaitSettings) -> StepTransition {
    StepTransition {
        quadrant: next_quadrant(quadrant, settings),
        liftoff_offset: liftoff_offset(quadrant, settings),
    }
}

/// The four quadrants of one cycle starting at `start`.
pub fn cycle_order(
    start: RobotQuadrant,
    settings: &GaitSettings,
) -> [RobotQuadrant; STEPS_PER_CYCLE] {
    let mut order = [start; STEPS_PER_CYCLE];
    for i in 1..STEPS_PER_CYCLE {
        order[i] = next_quadrant(order[i - 1], settings);
    }
    order
}

/// Liftoff times of one cycle starting at `start`, relative to its first liftoff.
pub fn liftoff_offsets(start: RobotQuadrant, settings: &GaitSettings) -> [f64; STEPS_PER_CYCLE] {
    let mut offsets = [0.0; STEPS_PER_CYCLE];
    let mut quadrant = start;
    for i in 1..STEPS_PER_CYCLE {
        let transition = next_step(quadrant, settings);
        offsets[i] = offsets[i - 1] + transition.liftoff_offset;
        quadrant = transition.quadrant;
    }
    offsets
}
