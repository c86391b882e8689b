use super::CollisionChannel;
use crate::consts::{self, NUM_WHEELS};
use glam::Vec3A;
use std::{error::Error, fmt};

/// Chassis-space attachment of a suspension probe
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MountPoint {
    /// 0 and 1 are front, even indices are on the left
    pub index: usize,
    pub local_pos: Vec3A,
}

impl MountPoint {
    #[must_use]
    pub const fn new(index: usize, local_pos: Vec3A) -> Self {
        Self { index, local_pos }
    }

    /// Default 4-wheel layout, front pair first, left wheel of each pair first
    #[must_use]
    pub const fn default_layout() -> [Self; NUM_WHEELS] {
        let [x, y, z] = consts::FRONT_MOUNT_OFFSET;
        let [bx, by, bz] = consts::BACK_MOUNT_OFFSET;

        [
            Self::new(0, Vec3A::new(x, -y, z)),
            Self::new(1, Vec3A::new(x, y, z)),
            Self::new(2, Vec3A::new(bx, -by, bz)),
            Self::new(3, Vec3A::new(bx, by, bz)),
        ]
    }
}

/// A tunable that failed validation
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct InvalidTunable {
    pub name: &'static str,
    pub value: f32,
}

impl fmt::Display for InvalidTunable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid vehicle tunable `{}` = {}", self.name, self.value)
    }
}

impl Error for InvalidTunable {}

/// Read-only vehicle tuning, fixed once a controller is built
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct VehicleConfig {
    /// Propulsion magnitude at full input
    pub max_acceleration: f32,
    /// Smoothing rate while a direction is held
    pub accel_interp_speed: f32,
    /// Smoothing rate while coasting (target of 0)
    pub decel_interp_speed: f32,
    pub force_scale: f32,
    pub probe_length: f32,
    /// Upward force of one wheel at full compression
    pub suspension_force_scale: f32,
    pub ground_check_channel: CollisionChannel,
    pub com_forward_offset: f32,
    /// Vertical center of mass shift per unit of smoothed input
    pub com_vertical_shift: f32,
    pub mount_points: [MountPoint; NUM_WHEELS],
}

impl Default for VehicleConfig {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl VehicleConfig {
    pub const DEFAULT: Self = Self {
        max_acceleration: consts::MAX_ACCELERATION,
        accel_interp_speed: consts::ACCEL_INTERP_SPEED,
        decel_interp_speed: consts::DECEL_INTERP_SPEED,
        force_scale: consts::FORCE_SCALE,
        probe_length: consts::PROBE_LENGTH,
        suspension_force_scale: consts::SUSPENSION_FORCE_SCALE,
        ground_check_channel: CollisionChannel::Visibility,
        com_forward_offset: consts::COM_FORWARD_OFFSET,
        com_vertical_shift: consts::COM_VERTICAL_SHIFT,
        mount_points: MountPoint::default_layout(),
    };

    /// Rejects rates, scales and lengths that are not finite and positive,
    /// and mount points that are not finite or out of order.
    pub fn validate(&self) -> Result<(), InvalidTunable> {
        let positive = [
            ("max_acceleration", self.max_acceleration),
            ("accel_interp_speed", self.accel_interp_speed),
            ("decel_interp_speed", self.decel_interp_speed),
            ("force_scale", self.force_scale),
            ("probe_length", self.probe_length),
            ("suspension_force_scale", self.suspension_force_scale),
        ];

        if let Some(&(name, value)) = positive
            .iter()
            .find(|(_, value)| !value.is_finite() || *value <= 0.0)
        {
            return Err(InvalidTunable { name, value });
        }

        for (name, value) in [
            ("com_forward_offset", self.com_forward_offset),
            ("com_vertical_shift", self.com_vertical_shift),
        ] {
            if !value.is_finite() {
                return Err(InvalidTunable { name, value });
            }
        }

        for (i, mount) in self.mount_points.iter().enumerate() {
            if mount.index != i {
                return Err(InvalidTunable {
                    name: "mount_points.index",
                    value: mount.index as f32,
                });
            }

            if !mount.local_pos.is_finite() {
                return Err(InvalidTunable {
                    name: "mount_points.local_pos",
                    value: f32::NAN,
                });
            }
        }

        Ok(())
    }
}
