use glam::Vec3A;

/// Mount points per chassis, front pair first
pub const NUM_WHEELS: usize = 4;

/// Length of the downward suspension probe (uu)
pub const PROBE_LENGTH: f32 = 60.0;
/// Upward force at full compression
pub const SUSPENSION_FORCE_SCALE: f32 = 90_000.0;

pub const MAX_ACCELERATION: f32 = 15_000.0;
pub const ACCEL_INTERP_SPEED: f32 = 0.5;
pub const DECEL_INTERP_SPEED: f32 = 0.3;
pub const FORCE_SCALE: f32 = 1_000.0;

/// Center of mass sits this far ahead of the chassis origin
pub const COM_FORWARD_OFFSET: f32 = 50.0;
/// Center of mass height per unit of smoothed input (negative is down)
pub const COM_VERTICAL_SHIFT: f32 = -20.0;

/// Floor for interpolation rates that reach the smoother unvalidated
pub const MIN_INTERP_RATE: f32 = 1e-4;

/// NOTE: Y should ALWAYS be positive. It is negated for the left wheel of each pair.
pub const FRONT_MOUNT_OFFSET: [f32; 3] = [60.0, 45.0, 0.0];
/// NOTE: Y should ALWAYS be positive. It is negated for the left wheel of each pair.
pub const BACK_MOUNT_OFFSET: [f32; 3] = [-60.0, 45.0, 0.0];

pub const CHASSIS_MASS: f32 = 1_000.0;
pub const CHASSIS_SIZE: Vec3A = Vec3A::new(180.0, 100.0, 40.0);
pub const GRAVITY_Z: f32 = -980.0;
