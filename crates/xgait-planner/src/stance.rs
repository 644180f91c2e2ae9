//! Nominal (zero-velocity) foot offsets from the body centroid.

use nalgebra::{Rotation2, Vector2};
use xgait_core::{GaitSettings, RobotQuadrant};

/// Body-frame offset of `quadrant`'s nominal foothold from the support centroid.
///
/// Front legs sit at `+stance_length / 2`, hind legs at `-stance_length / 2`;
/// left legs at `+stance_width / 2`, right legs at `-stance_width / 2`.
pub fn nominal_offset(quadrant: RobotQuadrant, settings: &GaitSettings) -> Vector2<f64> {
    let half_length = 0.5 * settings.stance_length;
    let half_width = 0.5 * settings.stance_width;
    Vector2::new(
        if quadrant.is_front() { half_length } else { -half_length },
        if quadrant.is_left() { half_width } else { -half_width },
    )
}

/// [`nominal_offset`] rotated into the world frame by the body yaw.
pub fn nominal_offset_world(
    quadrant: RobotQuadrant,
    settings: &GaitSettings,
    yaw: f64,
) -> Vector2<f64> {
    Rotation2::new(yaw) * nominal_offset(quadrant, settings)
}
