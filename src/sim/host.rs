//! Interfaces to the collaborators that live outside the controller: the
//! collision engine, the rigid body of the chassis and the input layer.

use ahash::AHashSet;
use glam::{Affine3A, Vec3A};

/// Opaque handle of a body in the host's physics world
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BodyId(pub u32);

/// Trace channels a collision query can run on
#[repr(u32)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum CollisionChannel {
    #[default]
    Visibility = 1 << 0,
    Camera = 1 << 1,
    WorldStatic = 1 << 2,
    WorldDynamic = 1 << 3,
}

impl CollisionChannel {
    pub const ALL_MASK: u32 = u32::MAX;

    #[must_use]
    pub const fn mask(self) -> u32 {
        self as u32
    }
}

/// First contact along a queried segment
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RayHit {
    /// Distance from the segment's origin to `hit_point`
    pub distance: f32,
    pub hit_point: Vec3A,
    /// False for overlap-only (non-solid) contacts
    pub blocking: bool,
}

pub trait CollisionQuery {
    /// Closest contact on the segment `origin -> end` against anything that
    /// responds to `channel`, skipping every body in `ignore`.
    fn query_ray(
        &self,
        origin: Vec3A,
        end: Vec3A,
        channel: CollisionChannel,
        ignore: &AHashSet<BodyId>,
    ) -> Option<RayHit>;
}

/// The chassis body as seen by the controller.
///
/// Forces accumulate until the host integrates them, the controller never
/// reads velocities back.
pub trait RigidBody {
    fn id(&self) -> BodyId;

    fn mass(&self) -> f32;

    /// World pose of the chassis frame
    fn world_transform(&self) -> Affine3A;

    fn add_force_at_point(&mut self, force: Vec3A, point: Vec3A);

    /// Replaces the chassis-space center of mass offset
    fn set_center_of_mass_offset(&mut self, offset: Vec3A);

    fn forward_vector(&self) -> Vec3A {
        self.world_transform().matrix3.x_axis
    }

    fn world_position(&self) -> Vec3A {
        self.world_transform().translation
    }
}

/// The only action the controller listens to
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum InputAction {
    Accelerate,
}

impl InputAction {
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Accelerate => "accelerate",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum InputPhase {
    Started,
    Ongoing,
    Triggered,
    Completed,
    Canceled,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct InputEvent {
    pub action: InputAction,
    pub phase: InputPhase,
    /// Normalized axis value, e.g. +1 forward and -1 reverse, 0 on release
    pub value: f32,
}

impl InputEvent {
    #[must_use]
    pub const fn accelerate(phase: InputPhase, value: f32) -> Self {
        Self {
            action: InputAction::Accelerate,
            phase,
            value,
        }
    }
}

/// Registration side of the host's input layer
pub trait InputBinding {
    /// Requests that `action` events in any of `phases` be delivered to the controller
    fn bind_action(&mut self, action: InputAction, phases: &[InputPhase]);
}
