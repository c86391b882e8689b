use crate::{
    consts,
    math::{box_local_inertia, integrate_rotation, world_inv_inertia},
    sim::{BodyId, RigidBody},
};
use glam::{Affine3A, Mat3A, Vec3A};

pub struct SandboxBodyConstructionInfo {
    pub id: BodyId,
    pub mass: f32,
    /// Full size of the box used for inertia
    pub size: Vec3A,
    pub start_world_transform: Affine3A,
    pub gravity: Vec3A,
    pub linear_damping: f32,
    pub angular_damping: f32,
}

impl SandboxBodyConstructionInfo {
    #[must_use]
    pub const fn new(id: BodyId) -> Self {
        Self {
            id,
            mass: consts::CHASSIS_MASS,
            size: consts::CHASSIS_SIZE,
            start_world_transform: Affine3A::IDENTITY,
            gravity: Vec3A::new(0.0, 0.0, consts::GRAVITY_Z),
            linear_damping: 0.0,
            angular_damping: 0.0,
        }
    }
}

/// Free box body that accumulates forces and integrates them with a fixed step.
///
/// The chassis frame is the body origin, the center of mass sits at
/// `com_offset` in that frame and all torque is taken about it.
pub struct SandboxBody {
    id: BodyId,
    mass: f32,
    inverse_mass: f32,
    inv_inertia_local: Vec3A,
    world_transform: Affine3A,
    com_offset: Vec3A,
    pub linear_velocity: Vec3A,
    pub angular_velocity: Vec3A,
    pub gravity: Vec3A,
    pub linear_damping: f32,
    pub angular_damping: f32,
    total_force: Vec3A,
    total_torque: Vec3A,
}

impl SandboxBody {
    #[must_use]
    pub fn new(info: SandboxBodyConstructionInfo) -> Self {
        let inverse_mass = if info.mass > 0.0 { 1.0 / info.mass } else { 0.0 };

        let local_inertia = box_local_inertia(info.size, info.mass);
        let inv_inertia_local = Vec3A::select(
            local_inertia.cmpeq(Vec3A::ZERO),
            Vec3A::ZERO,
            1.0 / local_inertia,
        );

        Self {
            id: info.id,
            mass: info.mass,
            inverse_mass,
            inv_inertia_local,
            world_transform: info.start_world_transform,
            com_offset: Vec3A::ZERO,
            linear_velocity: Vec3A::ZERO,
            angular_velocity: Vec3A::ZERO,
            gravity: info.gravity,
            linear_damping: info.linear_damping.clamp(0.0, 1.0),
            angular_damping: info.angular_damping.clamp(0.0, 1.0),
            total_force: Vec3A::ZERO,
            total_torque: Vec3A::ZERO,
        }
    }

    #[must_use]
    pub const fn total_force(&self) -> Vec3A {
        self.total_force
    }

    #[must_use]
    pub const fn total_torque(&self) -> Vec3A {
        self.total_torque
    }

    #[must_use]
    pub const fn center_of_mass_offset(&self) -> Vec3A {
        self.com_offset
    }

    #[must_use]
    pub fn center_of_mass_world(&self) -> Vec3A {
        self.world_transform.transform_point3a(self.com_offset)
    }

    pub fn set_world_transform(&mut self, trans: Affine3A) {
        debug_assert!(trans.is_finite());
        self.world_transform = trans;
    }

    pub fn clear_forces(&mut self) {
        self.total_force = Vec3A::ZERO;
        self.total_torque = Vec3A::ZERO;
    }

    fn inv_inertia_world(&self) -> Mat3A {
        world_inv_inertia(self.world_transform.matrix3, self.inv_inertia_local)
    }

    /// Integrates the accumulated forces over `time_step` and clears them
    pub fn step(&mut self, time_step: f32) {
        if self.inverse_mass == 0.0 || time_step <= 0.0 {
            self.clear_forces();
            return;
        }

        self.linear_velocity += (self.total_force * self.inverse_mass + self.gravity) * time_step;
        self.angular_velocity += self.inv_inertia_world() * self.total_torque * time_step;

        self.linear_velocity *= (1.0 - self.linear_damping).powf(time_step);
        self.angular_velocity *= (1.0 - self.angular_damping).powf(time_step);

        // rotate about the center of mass, then put the frame origin back around it
        let com_world = self.center_of_mass_world() + self.linear_velocity * time_step;
        let matrix3 = integrate_rotation(
            self.world_transform.matrix3,
            self.angular_velocity,
            time_step,
        );

        self.world_transform = Affine3A {
            matrix3,
            translation: com_world - matrix3 * self.com_offset,
        };

        self.clear_forces();
    }
}

impl RigidBody for SandboxBody {
    fn id(&self) -> BodyId {
        self.id
    }

    fn mass(&self) -> f32 {
        self.mass
    }

    fn world_transform(&self) -> Affine3A {
        self.world_transform
    }

    fn add_force_at_point(&mut self, force: Vec3A, point: Vec3A) {
        debug_assert!(!force.is_nan());

        let rel_pos = point - self.center_of_mass_world();
        self.total_force += force;
        self.total_torque += rel_pos.cross(force);
    }

    fn set_center_of_mass_offset(&mut self, offset: Vec3A) {
        self.com_offset = offset;
    }
}
