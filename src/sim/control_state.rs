#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ControlState {
    /// Last command from the input layer, in [-1, 1]
    pub target_input: f32,
    /// Input after smoothing, lags behind `target_input`
    pub smoothed_input: f32,
    /// Signed propulsion magnitude derived from `smoothed_input`
    pub current_acceleration: f32,
}

impl Default for ControlState {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl ControlState {
    pub const DEFAULT: Self = Self {
        target_input: 0.0,
        smoothed_input: 0.0,
        current_acceleration: 0.0,
    };

    /// Overwrites the target, last write wins.
    ///
    /// Returns false and keeps the previous target if `value` is NaN.
    pub fn set_target(&mut self, value: f32) -> bool {
        if value.is_nan() {
            return false;
        }

        self.target_input = value.clamp(-1.0, 1.0);
        true
    }
}
