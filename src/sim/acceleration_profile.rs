use crate::math::lerp;

/// Maps smoothed input to a signed propulsion magnitude.
///
/// The magnitude grows linearly with `|input|` up to `max_acceleration`
/// and takes the sign of the input, so the result is `input * max_acceleration`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AccelerationProfile {
    max_acceleration: f32,
}

impl AccelerationProfile {
    #[must_use]
    pub const fn new(max_acceleration: f32) -> Self {
        Self { max_acceleration }
    }

    #[must_use]
    pub const fn max_acceleration(&self) -> f32 {
        self.max_acceleration
    }

    /// `smoothed_input` is clamped to [-1, 1]
    #[must_use]
    pub fn evaluate(&self, smoothed_input: f32) -> f32 {
        let input = smoothed_input.clamp(-1.0, 1.0);
        let magnitude = lerp(0.0, self.max_acceleration, input.abs());

        magnitude.copysign(input)
    }
}
