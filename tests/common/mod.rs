use glam::{Affine3A, Vec3A};
use std::cell::RefCell;
use steersim::{
    ahash::AHashSet,
    sim::{BodyId, CollisionChannel, CollisionQuery, RayHit, RigidBody},
};

pub const DT: f32 = 1.0 / 60.0;

#[derive(Clone, Debug)]
pub struct RayQuery {
    pub origin: Vec3A,
    pub end: Vec3A,
    pub channel: CollisionChannel,
    pub ignore: Vec<BodyId>,
}

/// Answers every ray with a fixed script and records what was asked
pub struct ScriptedWorld {
    script: Box<dyn Fn(Vec3A, Vec3A) -> Option<RayHit>>,
    pub queries: RefCell<Vec<RayQuery>>,
}

impl ScriptedWorld {
    pub fn new(script: impl Fn(Vec3A, Vec3A) -> Option<RayHit> + 'static) -> Self {
        Self {
            script: Box::new(script),
            queries: RefCell::new(Vec::new()),
        }
    }

    /// Nothing to hit anywhere
    pub fn empty() -> Self {
        Self::new(|_, _| None)
    }

    /// Every ray blocks at `distance`
    pub fn flat(distance: f32) -> Self {
        Self::new(move |origin, _| Some(blocking_hit(origin, distance)))
    }

    pub fn num_queries(&self) -> usize {
        self.queries.borrow().len()
    }
}

impl CollisionQuery for ScriptedWorld {
    fn query_ray(
        &self,
        origin: Vec3A,
        end: Vec3A,
        channel: CollisionChannel,
        ignore: &AHashSet<BodyId>,
    ) -> Option<RayHit> {
        self.queries.borrow_mut().push(RayQuery {
            origin,
            end,
            channel,
            ignore: ignore.iter().copied().collect(),
        });

        (self.script)(origin, end)
    }
}

pub fn blocking_hit(origin: Vec3A, distance: f32) -> RayHit {
    RayHit {
        distance,
        hit_point: origin - Vec3A::Z * distance,
        blocking: true,
    }
}

/// Keeps every force and center of mass write instead of integrating them
pub struct RecordingBody {
    pub id: BodyId,
    pub mass: f32,
    pub transform: Affine3A,
    pub forces: Vec<(Vec3A, Vec3A)>,
    pub com_writes: Vec<Vec3A>,
}

impl RecordingBody {
    pub fn new(mass: f32) -> Self {
        Self::with_transform(mass, Affine3A::IDENTITY)
    }

    pub fn with_transform(mass: f32, transform: Affine3A) -> Self {
        Self {
            id: BodyId(42),
            mass,
            transform,
            forces: Vec::new(),
            com_writes: Vec::new(),
        }
    }

    pub fn total_force(&self) -> Vec3A {
        self.forces.iter().map(|(force, _)| *force).sum()
    }
}

impl RigidBody for RecordingBody {
    fn id(&self) -> BodyId {
        self.id
    }

    fn mass(&self) -> f32 {
        self.mass
    }

    fn world_transform(&self) -> Affine3A {
        self.transform
    }

    fn add_force_at_point(&mut self, force: Vec3A, point: Vec3A) {
        self.forces.push((force, point));
    }

    fn set_center_of_mass_offset(&mut self, offset: Vec3A) {
        self.com_writes.push(offset);
    }
}
