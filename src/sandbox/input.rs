use crate::sim::{InputAction, InputBinding, InputEvent, InputPhase};
use arrayvec::ArrayVec;

/// Remembers bindings and turns key presses into the events the host would deliver
#[derive(Clone, Debug, Default)]
pub struct RecordingBinding {
    bound: Vec<(InputAction, ArrayVec<InputPhase, 5>)>,
}

impl RecordingBinding {
    #[must_use]
    pub fn is_bound(&self, action: InputAction, phase: InputPhase) -> bool {
        self.bound
            .iter()
            .any(|(bound, phases)| *bound == action && phases.contains(&phase))
    }

    #[must_use]
    pub fn num_bindings(&self) -> usize {
        self.bound.len()
    }

    /// Held key, e.g. +1 for forward and -1 for reverse
    #[must_use]
    pub const fn hold(value: f32) -> InputEvent {
        InputEvent::accelerate(InputPhase::Triggered, value)
    }

    /// Key released, the axis drops back to 0
    #[must_use]
    pub const fn release() -> InputEvent {
        InputEvent::accelerate(InputPhase::Completed, 0.0)
    }
}

impl InputBinding for RecordingBinding {
    fn bind_action(&mut self, action: InputAction, phases: &[InputPhase]) {
        let phases = phases.iter().copied().take(5).collect();
        self.bound.push((action, phases));
    }
}
