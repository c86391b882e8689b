use crate::{consts::MIN_INTERP_RATE, math::exp_interp_to};

/// Eases the raw -1/0/+1 command into a continuous signal.
///
/// Holding a direction moves at `accel_rate`, releasing (target of 0)
/// coasts back at `decel_rate`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct InputSmoother {
    accel_rate: f32,
    decel_rate: f32,
}

impl InputSmoother {
    /// Rates that are not positive (or NaN) are raised to `MIN_INTERP_RATE`
    #[must_use]
    pub fn new(accel_rate: f32, decel_rate: f32) -> Self {
        Self {
            accel_rate: sanitize_rate(accel_rate),
            decel_rate: sanitize_rate(decel_rate),
        }
    }

    #[must_use]
    pub const fn accel_rate(&self) -> f32 {
        self.accel_rate
    }

    #[must_use]
    pub const fn decel_rate(&self) -> f32 {
        self.decel_rate
    }

    #[must_use]
    pub fn rate_for(&self, target: f32) -> f32 {
        if target == 0.0 {
            self.decel_rate
        } else {
            self.accel_rate
        }
    }

    /// Moves `current` towards `target` over `dt` seconds.
    ///
    /// A `dt` of zero (or less) returns `current` unchanged.
    #[must_use]
    pub fn advance(&self, current: f32, target: f32, dt: f32) -> f32 {
        exp_interp_to(current, target, dt, self.rate_for(target))
    }
}

fn sanitize_rate(rate: f32) -> f32 {
    if rate > MIN_INTERP_RATE {
        rate
    } else {
        MIN_INTERP_RATE
    }
}
