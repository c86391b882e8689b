use crate::sim::{BodyId, CollisionChannel, CollisionQuery, RayHit};
use ahash::AHashSet;
use glam::Vec3A;

/// Infinite static plane, the points `p` with `normal.dot(p) == constant`
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GroundPlane {
    pub normal: Vec3A,
    pub constant: f32,
    /// Channels this plane responds to
    pub channel_mask: u32,
    /// Non-blocking planes report overlaps only
    pub blocking: bool,
    /// Set when the plane belongs to a body that queries may ignore
    pub owner: Option<BodyId>,
}

impl GroundPlane {
    /// Horizontal, blocking floor at height `z`
    #[must_use]
    pub const fn floor(z: f32) -> Self {
        Self {
            normal: Vec3A::Z,
            constant: z,
            channel_mask: CollisionChannel::ALL_MASK,
            blocking: true,
            owner: None,
        }
    }

    #[must_use]
    pub fn new(normal: Vec3A, constant: f32) -> Self {
        debug_assert!(normal.is_normalized());

        Self {
            normal,
            constant,
            ..Self::floor(0.0)
        }
    }

    #[must_use]
    pub const fn with_channel_mask(mut self, channel_mask: u32) -> Self {
        self.channel_mask = channel_mask;
        self
    }

    #[must_use]
    pub const fn non_blocking(mut self) -> Self {
        self.blocking = false;
        self
    }

    #[must_use]
    pub const fn owned_by(mut self, owner: BodyId) -> Self {
        self.owner = Some(owner);
        self
    }

    /// Distance along the segment where it crosses the plane
    #[must_use]
    pub fn ray_test(&self, ray_source: Vec3A, ray_target: Vec3A) -> Option<f32> {
        let delta = ray_target - ray_source;
        let dist = delta.length();
        if dist < f32::EPSILON {
            return None;
        }

        let ray_direction = delta / dist;
        let dir_align = self.normal.dot(ray_direction);
        if dir_align.abs() < f32::EPSILON {
            return None;
        }

        let t = (self.constant - self.normal.dot(ray_source)) / dir_align;
        if t < 0.0 || t > dist {
            return None;
        }

        Some(t)
    }
}

#[derive(Clone, Debug, Default)]
pub struct SandboxWorld {
    pub planes: Vec<GroundPlane>,
}

impl SandboxWorld {
    #[must_use]
    pub fn with_floor(z: f32) -> Self {
        Self {
            planes: vec![GroundPlane::floor(z)],
        }
    }

    pub fn add_plane(&mut self, plane: GroundPlane) {
        self.planes.push(plane);
    }
}

impl CollisionQuery for SandboxWorld {
    fn query_ray(
        &self,
        origin: Vec3A,
        end: Vec3A,
        channel: CollisionChannel,
        ignore: &AHashSet<BodyId>,
    ) -> Option<RayHit> {
        let direction = (end - origin).normalize_or_zero();

        let hits = self
            .planes
            .iter()
            .filter(|plane| plane.channel_mask & channel.mask() != 0)
            .filter(|plane| plane.owner.is_none_or(|owner| !ignore.contains(&owner)))
            .filter_map(|plane| {
                plane.ray_test(origin, end).map(|distance| RayHit {
                    distance,
                    hit_point: origin + direction * distance,
                    blocking: plane.blocking,
                })
            });

        // overlaps never stop the trace, only report one if nothing solid is on the segment
        let (blocking, overlaps): (Vec<_>, Vec<_>) = hits.partition(|hit| hit.blocking);
        blocking
            .into_iter()
            .min_by(|a, b| a.distance.total_cmp(&b.distance))
            .or_else(|| {
                overlaps
                    .into_iter()
                    .min_by(|a, b| a.distance.total_cmp(&b.distance))
            })
    }
}
