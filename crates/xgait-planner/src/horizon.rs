//! Caller-side step lifecycle for a fixed-rate control loop.
//!
//! Each horizon slot moves PLANNED → ONGOING → COMPLETED:
//!
//! - **Planned**: future step, rewritten by every [`StepHorizon::update`].
//! - **Ongoing**: liftoff time reached. The step is copied out of the planned
//!   slots and never rewritten again; it anchors all later continuation plans.
//! - **Completed**: touchdown time reached. The step is dropped and reported
//!   once through [`HorizonEvents`].
//!
//! All storage is fixed-capacity so a tick never allocates.

use heapless::Vec as StackVec;
use nalgebra::Point3;
use tracing::{debug, warn};
use xgait_core::{
    GaitSettings, PlanError, PlanarVelocity, RobotQuadrant, SettingsError, TimedStep,
};

use crate::planner::XGaitPlanner;
use crate::sequencer::STEPS_PER_CYCLE;

/// Upper bound on steps in flight at once. Valid settings stay well below it.
const MAX_ONGOING: usize = 2 * STEPS_PER_CYCLE;

/// Lifecycle state of a leg's step within the horizon.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepStatus {
    Planned,
    Ongoing,
}

/// Transitions that happened during one [`StepHorizon::update`].
#[derive(Debug, Clone, Default)]
pub struct HorizonEvents {
    committed: StackVec<TimedStep, STEPS_PER_CYCLE>,
    completed: StackVec<TimedStep, MAX_ONGOING>,
}

impl HorizonEvents {
    /// Steps that lifted off during this update, in liftoff order.
    pub fn committed(&self) -> &[TimedStep] {
        &self.committed
    }

    /// Steps that touched down during this update, in liftoff order.
    pub fn completed(&self) -> &[TimedStep] {
        &self.completed
    }

    pub fn is_empty(&self) -> bool {
        self.committed.is_empty() && self.completed.is_empty()
    }
}

#[derive(Debug, Clone, Copy)]
struct StartState {
    quadrant: RobotQuadrant,
    centroid: Point3<f64>,
    time: f64,
}

/// Rolling horizon of timed steps driven by an [`XGaitPlanner`].
///
/// Before the first liftoff, the horizon holds a full cycle planned from rest.
/// Afterwards it holds the ongoing steps plus `STEPS_PER_CYCLE - 1` planned
/// steps continued from the most recently committed one.
#[derive(Debug, Clone)]
pub struct StepHorizon {
    planner: XGaitPlanner,
    settings: GaitSettings,
    start: Option<StartState>,
    /// Most recently committed step. Outlives its touchdown as the plan anchor.
    anchor: Option<TimedStep>,
    ongoing: StackVec<TimedStep, MAX_ONGOING>,
    planned: [TimedStep; STEPS_PER_CYCLE],
    planned_len: usize,
}

impl StepHorizon {
    /// Create an idle horizon. Settings are validated once here.
    pub fn new(settings: GaitSettings) -> Result<Self, SettingsError> {
        settings.validate()?;
        Ok(Self {
            planner: XGaitPlanner::new(),
            settings,
            start: None,
            anchor: None,
            ongoing: StackVec::new(),
            planned: [TimedStep::default(); STEPS_PER_CYCLE],
            planned_len: 0,
        })
    }

    pub const fn settings(&self) -> &GaitSettings {
        &self.settings
    }

    /// Begin walking: plan a full cycle from rest with `initial_quadrant`
    /// lifting off at `time`.
    ///
    /// Discards any previous plan, including ongoing steps.
    pub fn start(
        &mut self,
        velocity: &PlanarVelocity,
        initial_quadrant: RobotQuadrant,
        support_centroid: Point3<f64>,
        time: f64,
        yaw: f64,
    ) -> Result<(), PlanError> {
        self.planner.compute_initial_plan(
            &mut self.planned,
            velocity,
            initial_quadrant,
            &support_centroid,
            time,
            yaw,
            &self.settings,
        )?;
        self.start = Some(StartState {
            quadrant: initial_quadrant,
            centroid: support_centroid,
            time,
        });
        self.anchor = None;
        self.ongoing.clear();
        self.planned_len = STEPS_PER_CYCLE;
        debug!(quadrant = %initial_quadrant, time, "step horizon started");
        Ok(())
    }

    /// Advance the horizon to `time` with the latest command and yaw.
    ///
    /// Commits every planned step whose liftoff is due (at most one cycle per
    /// call), replans the remaining slots, then retires ongoing steps whose
    /// touchdown has passed. Fails with [`PlanError::NotStarted`] before
    /// [`start`](Self::start) or after [`reset`](Self::reset).
    pub fn update(
        &mut self,
        velocity: &PlanarVelocity,
        time: f64,
        yaw: f64,
    ) -> Result<HorizonEvents, PlanError> {
        let Some(start) = self.start else {
            warn!(time, "step horizon updated before start");
            return Err(PlanError::NotStarted);
        };
        let mut events = HorizonEvents::default();

        self.replan(&start, velocity, time, yaw)?;
        for _ in 0..STEPS_PER_CYCLE {
            let next = self.planned[0];
            if next.liftoff_time() > time {
                break;
            }
            self.commit(next, &mut events);
            self.replan(&start, velocity, time, yaw)?;
        }

        let mut i = 0;
        while i < self.ongoing.len() {
            if self.ongoing[i].touchdown_time() <= time {
                let done = self.ongoing.remove(i);
                debug!(quadrant = %done.quadrant, time, "step completed");
                if events.completed.push(done).is_err() {
                    warn!(quadrant = %done.quadrant, "completion event dropped");
                }
            } else {
                i += 1;
            }
        }

        Ok(events)
    }

    /// Forget all steps and return to idle.
    pub fn reset(&mut self) {
        self.start = None;
        self.anchor = None;
        self.ongoing.clear();
        self.planned_len = 0;
    }

    pub const fn is_started(&self) -> bool {
        self.start.is_some()
    }

    /// Steps in flight, in liftoff order. Read-only.
    pub fn ongoing(&self) -> &[TimedStep] {
        &self.ongoing
    }

    /// Upcoming steps, in liftoff order.
    pub fn planned(&self) -> &[TimedStep] {
        &self.planned[..self.planned_len]
    }

    /// Next step to lift off, if any.
    pub fn next_planned(&self) -> Option<&TimedStep> {
        self.planned().first()
    }

    /// Status of the earliest step in the horizon for `quadrant`.
    pub fn status_of(&self, quadrant: RobotQuadrant) -> Option<StepStatus> {
        if self.ongoing.iter().any(|s| s.quadrant == quadrant) {
            Some(StepStatus::Ongoing)
        } else if self.planned().iter().any(|s| s.quadrant == quadrant) {
            Some(StepStatus::Planned)
        } else {
            None
        }
    }

    fn replan(
        &mut self,
        start: &StartState,
        velocity: &PlanarVelocity,
        time: f64,
        yaw: f64,
    ) -> Result<(), PlanError> {
        match self.anchor {
            None => {
                self.planner.compute_initial_plan(
                    &mut self.planned,
                    velocity,
                    start.quadrant,
                    &start.centroid,
                    start.time,
                    yaw,
                    &self.settings,
                )?;
                self.planned_len = STEPS_PER_CYCLE;
            }
            Some(anchor) => {
                self.planner.compute_mid_step_plan(
                    &mut self.planned[..STEPS_PER_CYCLE - 1],
                    &anchor,
                    velocity,
                    time,
                    yaw,
                    &self.settings,
                )?;
                self.planned_len = STEPS_PER_CYCLE - 1;
            }
        }
        Ok(())
    }

    fn commit(&mut self, step: TimedStep, events: &mut HorizonEvents) {
        debug!(
            quadrant = %step.quadrant,
            liftoff = step.liftoff_time(),
            touchdown = step.touchdown_time(),
            "step committed"
        );
        if self.ongoing.push(step).is_err() {
            // Only reachable if updates stall for several cycles.
            warn!(quadrant = %step.quadrant, "ongoing buffer full, dropping oldest step");
            self.ongoing.remove(0);
            let _ = self.ongoing.push(step);
        }
        let _ = events.committed.push(step);
        self.anchor = Some(step);
    }
}
