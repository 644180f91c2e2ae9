//! X-gait timed-step planner.
//!
//! Both entry points write one step per buffer slot using the same formulas:
//!
//! ```text
//! touchdown[i] = liftoff[i] + step_duration
//! goal[i]      = c_ref + R(yaw) · nominal(q[i]) + R(yaw) · v · (touchdown[i] - t_ref)
//! ```
//!
//! where `(c_ref, t_ref)` is the support centroid at a reference instant. From
//! rest it is the caller's centroid at `time_at_start`; from an ongoing step it
//! is the centroid implied by that step's goal at its touchdown. Both describe
//! the same body trajectory, which is what keeps continued plans identical to
//! plans computed from rest.

use nalgebra::{Point3, Rotation2, Vector2};
use tracing::{trace, warn};
use xgait_core::{
    GaitSettings, PlanError, PlanarVelocity, RobotQuadrant, TimeInterval, TimedStep,
};

use crate::sequencer::{STEPS_PER_CYCLE, next_step};
use crate::stance::nominal_offset;

/// Stateless X-gait footstep planner.
///
/// Holds no data: every call is a pure function of its arguments and the
/// caller-owned output buffer is fully overwritten on success.
#[derive(Debug, Clone, Copy, Default)]
pub struct XGaitPlanner;

impl XGaitPlanner {
    pub const fn new() -> Self {
        Self
    }

    /// Plan one full cycle from rest.
    ///
    /// `out` must hold exactly [`STEPS_PER_CYCLE`] steps. `initial_quadrant`
    /// lifts off at `time_at_start`; the remaining legs follow the sequencer.
    /// Goals extrapolate `support_centroid` along the commanded velocity
    /// (body frame, rotated by `yaw_at_start`) to each step's touchdown.
    #[allow(clippy::too_many_arguments)]
    pub fn compute_initial_plan(
        &self,
        out: &mut [TimedStep],
        velocity: &PlanarVelocity,
        initial_quadrant: RobotQuadrant,
        support_centroid: &Point3<f64>,
        time_at_start: f64,
        yaw_at_start: f64,
        settings: &GaitSettings,
    ) -> Result<(), PlanError> {
        check_capacity(out, STEPS_PER_CYCLE)?;
        settings.validate()?;

        fill_steps(
            out,
            initial_quadrant,
            time_at_start,
            support_centroid,
            time_at_start,
            velocity,
            yaw_at_start,
            settings,
        );
        Ok(())
    }

    /// Plan the rest of the cycle after a committed, in-flight step.
    ///
    /// `out` must hold exactly `STEPS_PER_CYCLE - 1` steps. The first planned
    /// leg is the sequencer's successor of `ongoing_step.quadrant` and its
    /// liftoff continues the ongoing step's cadence. `time_at_start` is the
    /// caller's current time and must not precede the ongoing liftoff.
    /// `ongoing_step` itself is never modified.
    pub fn compute_mid_step_plan(
        &self,
        out: &mut [TimedStep],
        ongoing_step: &TimedStep,
        velocity: &PlanarVelocity,
        time_at_start: f64,
        yaw_at_start: f64,
        settings: &GaitSettings,
    ) -> Result<(), PlanError> {
        check_capacity(out, STEPS_PER_CYCLE - 1)?;
        settings.validate()?;
        let interval = TimeInterval::try_new(
            ongoing_step.time_interval.start,
            ongoing_step.time_interval.end,
        )?;
        if time_at_start < interval.start {
            warn!(
                quadrant = %ongoing_step.quadrant,
                time = time_at_start,
                liftoff = interval.start,
                "continuation requested for a step that has not lifted off"
            );
            return Err(PlanError::StepNotOngoing {
                time: time_at_start,
                liftoff: interval.start,
            });
        }

        let rotation = Rotation2::new(yaw_at_start);
        let offset = rotation * nominal_offset(ongoing_step.quadrant, settings);
        let centroid_at_touchdown = ongoing_step.goal_position - offset.push(0.0);

        let transition = next_step(ongoing_step.quadrant, settings);
        fill_steps(
            out,
            transition.quadrant,
            interval.start + transition.liftoff_offset,
            &centroid_at_touchdown,
            interval.end,
            velocity,
            yaw_at_start,
            settings,
        );
        Ok(())
    }
}

fn check_capacity(out: &[TimedStep], expected: usize) -> Result<(), PlanError> {
    if out.len() == expected {
        return Ok(());
    }
    warn!(expected, actual = out.len(), "planning buffer has the wrong size");
    Err(PlanError::HorizonCapacity {
        expected,
        actual: out.len(),
    })
}

/// Write consecutive steps starting with `first_quadrant` lifting off at
/// `first_liftoff`, placing goals along the body trajectory through
/// `reference_centroid` at `reference_time`.
#[allow(clippy::too_many_arguments)]
fn fill_steps(
    out: &mut [TimedStep],
    first_quadrant: RobotQuadrant,
    first_liftoff: f64,
    reference_centroid: &Point3<f64>,
    reference_time: f64,
    velocity: &PlanarVelocity,
    yaw: f64,
    settings: &GaitSettings,
) {
    let rotation = Rotation2::new(yaw);
    let world_velocity: Vector2<f64> = rotation * velocity.linear();

    let mut quadrant = first_quadrant;
    let mut liftoff = first_liftoff;
    for step in out.iter_mut() {
        let touchdown = liftoff + settings.step_duration;
        let planar = rotation * nominal_offset(quadrant, settings)
            + world_velocity * (touchdown - reference_time);

        *step = TimedStep::new(
            quadrant,
            reference_centroid + planar.push(0.0),
            settings.step_ground_clearance,
            TimeInterval::new(liftoff, touchdown),
        );
        trace!(
            quadrant = %quadrant,
            liftoff,
            touchdown,
            x = step.goal_position.x,
            y = step.goal_position.y,
            "planned step"
        );

        let transition = next_step(quadrant, settings);
        quadrant = transition.quadrant;
        liftoff += transition.liftoff_offset;
    }
}

#[cfg(test)]
mod tests {
    use std::f64::consts::FRAC_PI_2;

    use super::*;

    fn trot() -> GaitSettings {
        GaitSettings {
            stance_length: 1.0,
            stance_width: 0.25,
            step_ground_clearance: 0.1,
            step_duration: 0.25,
            end_double_support_duration: 0.0,
            end_phase_shift: 90.0,
        }
    }

    fn initial(velocity: PlanarVelocity, yaw: f64) -> [TimedStep; STEPS_PER_CYCLE] {
        let mut steps = [TimedStep::default(); STEPS_PER_CYCLE];
        XGaitPlanner::new()
            .compute_initial_plan(
                &mut steps,
                &velocity,
                RobotQuadrant::HindRight,
                &Point3::origin(),
                0.0,
                yaw,
                &trot(),
            )
            .unwrap();
        steps
    }

    #[test]
    fn initial_plan_forward_velocity() {
        let steps = initial(PlanarVelocity::new(1.0, 0.0, 0.0), 0.0);
        let expected = [
            (RobotQuadrant::HindRight, [-0.25, -0.125], [0.0, 0.25]),
            (RobotQuadrant::FrontRight, [0.875, -0.125], [0.125, 0.375]),
            (RobotQuadrant::HindLeft, [0.0, 0.125], [0.25, 0.5]),
            (RobotQuadrant::FrontLeft, [1.125, 0.125], [0.375, 0.625]),
        ];
        for (step, (q, xy, t)) in steps.iter().zip(expected) {
            let nominal = TimedStep::new(
                q,
                Point3::new(xy[0], xy[1], 0.0),
                0.1,
                TimeInterval::new(t[0], t[1]),
            );
            assert!(step.epsilon_equals(&nominal, 1e-5), "{step} != {nominal}");
        }
    }

    #[test]
    fn initial_plan_intervals_have_step_duration() {
        let steps = initial(PlanarVelocity::new(0.3, 0.1, 0.0), 0.4);
        for pair in steps.windows(2) {
            assert!(pair[1].liftoff_time() > pair[0].liftoff_time());
        }
        for step in &steps {
            assert!((step.time_interval.duration() - 0.25).abs() < 1e-12);
        }
    }

    #[test]
    fn initial_plan_rotates_velocity_with_yaw() {
        // Facing world +y, forward velocity moves goals along +y.
        let steps = initial(PlanarVelocity::new(1.0, 0.0, 0.0), FRAC_PI_2);
        // HR nominal (-0.5, -0.125) rotated → (0.125, -0.5); plus 0.25 m along +y.
        assert!((steps[0].goal_position.x - 0.125).abs() < 1e-9);
        assert!((steps[0].goal_position.y - (-0.25)).abs() < 1e-9);
    }

    #[test]
    fn initial_plan_keeps_centroid_height() {
        let mut steps = [TimedStep::default(); STEPS_PER_CYCLE];
        XGaitPlanner::new()
            .compute_initial_plan(
                &mut steps,
                &PlanarVelocity::zero(),
                RobotQuadrant::FrontLeft,
                &Point3::new(2.0, -1.0, 0.3),
                5.0,
                0.0,
                &trot(),
            )
            .unwrap();
        assert!(steps.iter().all(|s| (s.goal_position.z - 0.3).abs() < 1e-12));
        assert!((steps[0].liftoff_time() - 5.0).abs() < 1e-12);
        assert_eq!(steps[0].quadrant, RobotQuadrant::FrontLeft);
        assert_eq!(steps[1].quadrant, RobotQuadrant::HindRight);
    }

    #[test]
    fn initial_plan_rejects_wrong_capacity() {
        let mut steps = [TimedStep::default(); 3];
        let err = XGaitPlanner::new()
            .compute_initial_plan(
                &mut steps,
                &PlanarVelocity::zero(),
                RobotQuadrant::HindRight,
                &Point3::origin(),
                0.0,
                0.0,
                &trot(),
            )
            .unwrap_err();
        assert_eq!(
            err,
            PlanError::HorizonCapacity {
                expected: 4,
                actual: 3
            }
        );
        // Untouched on failure.
        assert!(steps.iter().all(|s| *s == TimedStep::default()));
    }

    #[test]
    fn initial_plan_rejects_invalid_settings() {
        let mut steps = [TimedStep::default(); STEPS_PER_CYCLE];
        let settings = GaitSettings {
            end_phase_shift: 0.0,
            ..trot()
        };
        let err = XGaitPlanner::new()
            .compute_initial_plan(
                &mut steps,
                &PlanarVelocity::zero(),
                RobotQuadrant::HindRight,
                &Point3::origin(),
                0.0,
                0.0,
                &settings,
            )
            .unwrap_err();
        assert!(matches!(err, PlanError::Settings(_)));
    }

    #[test]
    fn mid_step_plan_continues_cadence() {
        let ongoing = initial(PlanarVelocity::new(1.0, 0.0, 0.0), 0.0)[0];
        let mut steps = [TimedStep::default(); STEPS_PER_CYCLE - 1];
        XGaitPlanner::new()
            .compute_mid_step_plan(
                &mut steps,
                &ongoing,
                &PlanarVelocity::new(1.0, 0.0, 0.0),
                0.125,
                0.0,
                &trot(),
            )
            .unwrap();
        assert_eq!(steps[0].quadrant, RobotQuadrant::FrontRight);
        assert!((steps[0].liftoff_time() - 0.125).abs() < 1e-12);
        assert!((steps[0].goal_position.x - 0.875).abs() < 1e-9);
        assert!((steps[2].goal_position.x - 1.125).abs() < 1e-9);
    }

    #[test]
    fn mid_step_plan_rejects_step_not_yet_lifted() {
        let ongoing = initial(PlanarVelocity::zero(), 0.0)[1];
        let mut steps = [TimedStep::default(); STEPS_PER_CYCLE - 1];
        let err = XGaitPlanner::new()
            .compute_mid_step_plan(
                &mut steps,
                &ongoing,
                &PlanarVelocity::zero(),
                0.0,
                0.0,
                &trot(),
            )
            .unwrap_err();
        assert_eq!(
            err,
            PlanError::StepNotOngoing {
                time: 0.0,
                liftoff: 0.125
            }
        );
    }

    #[test]
    fn mid_step_plan_rejects_wrong_capacity() {
        let ongoing = initial(PlanarVelocity::zero(), 0.0)[0];
        let mut steps = [TimedStep::default(); STEPS_PER_CYCLE];
        let err = XGaitPlanner::new()
            .compute_mid_step_plan(
                &mut steps,
                &ongoing,
                &PlanarVelocity::zero(),
                0.1,
                0.0,
                &trot(),
            )
            .unwrap_err();
        assert_eq!(
            err,
            PlanError::HorizonCapacity {
                expected: 3,
                actual: 4
            }
        );
    }

    #[test]
    fn mid_step_plan_rejects_empty_interval() {
        let mut ongoing = initial(PlanarVelocity::zero(), 0.0)[0];
        ongoing.time_interval = TimeInterval::new(0.25, 0.25);
        let mut steps = [TimedStep::default(); STEPS_PER_CYCLE - 1];
        let err = XGaitPlanner::new()
            .compute_mid_step_plan(
                &mut steps,
                &ongoing,
                &PlanarVelocity::zero(),
                0.3,
                0.0,
                &trot(),
            )
            .unwrap_err();
        assert!(matches!(err, PlanError::InvalidInterval { .. }));
    }
}
