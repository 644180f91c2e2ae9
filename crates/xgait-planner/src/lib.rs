//! Real-time footstep planner for quadruped X-gaits.
//!
//! Given a commanded planar velocity and a periodic gait pattern, the planner
//! fills a caller-owned buffer with the next timed footsteps of the cycle:
//!
//! 1. **Nominal stance**: zero-velocity foot offsets from the body centroid
//! 2. **Sequencer**: which leg lifts off next and how long after the previous one
//! 3. **Planner**: plan-from-rest and plan-from-ongoing-step entry points that
//!    integrate the commanded velocity into absolute touchdown positions
//! 4. **Step horizon**: caller-side PLANNED → ONGOING → COMPLETED bookkeeping
//!    for a fixed-rate control loop
//!
//! # Continuity
//!
//! Every step is timed and placed against a single absolute time origin. A plan
//! continued from a committed step reproduces the plan that would have been
//! computed from rest for the same interval, so replanning never moves a
//! committed step and never introduces a jump at the commit boundary.

pub mod horizon;
pub mod planner;
pub mod sequencer;
pub mod stance;

pub use horizon::{HorizonEvents, StepHorizon, StepStatus};
pub use planner::XGaitPlanner;
pub use sequencer::{
    STEPS_PER_CYCLE, StepTransition, cycle_order, liftoff_offsets, next_quadrant, next_step,
};
pub use stance::{nominal_offset, nominal_offset_world};

// ---------------------------------------------------------------------------
// Prelude
// ---------------------------------------------------------------------------

pub mod prelude {
    pub use crate::{
        HorizonEvents, STEPS_PER_CYCLE, StepHorizon, StepStatus, XGaitPlanner, next_step,
        nominal_offset,
    };
    pub use xgait_core::prelude::*;
}
