use super::{BodyId, CollisionChannel, CollisionQuery, ForceCommand};
use ahash::AHashSet;
use glam::Vec3A;

/// Result of one probe, one per mount point per tick
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SuspensionReading {
    pub mount_index: usize,
    /// Blocking ground found within the probe length
    pub hit: bool,
    /// Distance to the ground, only meaningful when `hit`
    pub distance: f32,
    /// Compression in [0, 1], 0 when airborne or fully extended
    pub ratio: f32,
    pub ray_start: Vec3A,
    pub ray_end: Vec3A,
}

impl SuspensionReading {
    #[must_use]
    pub const fn airborne(mount_index: usize, ray_start: Vec3A, ray_end: Vec3A) -> Self {
        Self {
            mount_index,
            hit: false,
            distance: 0.0,
            ratio: 0.0,
            ray_start,
            ray_end,
        }
    }
}

/// Downward ray per mount point and a one-sided linear spring.
///
/// No damping and no travel limit: the force only depends on how far into
/// the probe the ground sits.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SuspensionProbe {
    probe_length: f32,
    force_scale: f32,
    channel: CollisionChannel,
}

impl SuspensionProbe {
    #[must_use]
    pub const fn new(probe_length: f32, force_scale: f32, channel: CollisionChannel) -> Self {
        Self {
            probe_length,
            force_scale,
            channel,
        }
    }

    #[must_use]
    pub const fn probe_length(&self) -> f32 {
        self.probe_length
    }

    /// `1 - distance / probe_length`, clamped to [0, 1]
    #[must_use]
    pub fn compression_ratio(&self, distance: f32) -> f32 {
        (1.0 - distance / self.probe_length).clamp(0.0, 1.0)
    }

    /// Casts from `origin` along `down` and reads the first blocking contact
    pub fn cast<W: CollisionQuery + ?Sized>(
        &self,
        mount_index: usize,
        origin: Vec3A,
        down: Vec3A,
        world: &W,
        ignore: &AHashSet<BodyId>,
    ) -> SuspensionReading {
        let end = origin + down * self.probe_length;

        let Some(hit) = world
            .query_ray(origin, end, self.channel, ignore)
            .filter(|hit| hit.blocking)
        else {
            log::trace!("wheel {mount_index}: probe {origin} -> {end} found no ground");
            return SuspensionReading::airborne(mount_index, origin, end);
        };

        if !hit.distance.is_finite() {
            log::debug!(
                "wheel {mount_index}: dropping contact with bad distance {}",
                hit.distance
            );
            return SuspensionReading::airborne(mount_index, origin, end);
        }

        let distance = hit.distance.max(0.0);
        let ratio = self.compression_ratio(distance);
        log::trace!(
            "wheel {mount_index}: probe {origin} -> {end} hit at {distance} (ratio {ratio})"
        );

        SuspensionReading {
            mount_index,
            hit: true,
            distance,
            ratio,
            ray_start: origin,
            ray_end: end,
        }
    }

    /// Upward force for `reading`, applied at the mount point.
    ///
    /// `None` when the wheel is airborne.
    #[must_use]
    pub fn force_for(&self, reading: &SuspensionReading) -> Option<ForceCommand> {
        if !reading.hit {
            return None;
        }

        Some(ForceCommand {
            world_position: reading.ray_start,
            force: Vec3A::Z * (reading.ratio * self.force_scale),
        })
    }
}
