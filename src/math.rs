use glam::{Mat3A, Quat, Vec3A};
use std::f32::consts::FRAC_PI_4;

const ANGULAR_MOTION_THRESHOLD: f32 = FRAC_PI_4;

/// Linear blend from `a` to `b`, `alpha` is not clamped
#[inline]
#[must_use]
pub fn lerp(a: f32, b: f32, alpha: f32) -> f32 {
    a + (b - a) * alpha
}

/// Frame-rate independent exponential approach of `current` towards `target`.
///
/// `current` keeps `exp(-rate * dt)` of its remaining distance, so the result
/// always lies between `current` and `target` and never overshoots.
#[inline]
#[must_use]
pub fn exp_interp_to(current: f32, target: f32, dt: f32, rate: f32) -> f32 {
    if dt <= 0.0 {
        return current;
    }

    target - (target - current) * (-rate * dt).exp()
}

/// Principal moments of inertia of a solid box with full extents `size`
#[must_use]
pub fn box_local_inertia(size: Vec3A, mass: f32) -> Vec3A {
    let sq = size * size;
    mass / 12.0 * Vec3A::new(sq.y + sq.z, sq.x + sq.z, sq.x + sq.y)
}

#[must_use]
pub fn world_inv_inertia(world_mat: Mat3A, inv_inertia_local: Vec3A) -> Mat3A {
    let mut scaled_mat = world_mat.transpose();
    scaled_mat.x_axis *= inv_inertia_local;
    scaled_mat.y_axis *= inv_inertia_local;
    scaled_mat.z_axis *= inv_inertia_local;

    world_mat * scaled_mat
}

/// Rotates `basis` by `ang_vel` over `time_step`, limiting a single step to 45 degrees
#[must_use]
pub fn integrate_rotation(basis: Mat3A, ang_vel: Vec3A, time_step: f32) -> Mat3A {
    let mut angle = ang_vel.length();

    if angle * time_step > ANGULAR_MOTION_THRESHOLD {
        angle = ANGULAR_MOTION_THRESHOLD / time_step;
    }

    let axis = if angle < 0.001 {
        ang_vel * (0.5 * time_step - time_step * time_step * time_step * 0.020833334 * angle * angle)
    } else {
        ang_vel * ((0.5 * angle * time_step).sin() / angle)
    };

    let dorn = Quat::from_xyzw(axis.x, axis.y, axis.z, (angle * time_step * 0.5).cos());
    let orn0 = Quat::from_mat3a(&basis);

    Mat3A::from_quat((dorn * orn0).normalize())
}
