use super::RigidBody;
use glam::Vec3A;

/// A world-space force for the rigid body to accumulate this tick
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ForceCommand {
    pub world_position: Vec3A,
    pub force: Vec3A,
}

/// Pushes force commands and the center of mass shift into the body
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ForceApplicator {
    com_forward_offset: f32,
    com_vertical_shift: f32,
}

impl ForceApplicator {
    #[must_use]
    pub const fn new(com_forward_offset: f32, com_vertical_shift: f32) -> Self {
        Self {
            com_forward_offset,
            com_vertical_shift,
        }
    }

    /// Chassis-space center of mass for the given smoothed input
    #[must_use]
    pub fn com_offset(&self, smoothed_input: f32) -> Vec3A {
        Vec3A::new(
            self.com_forward_offset,
            0.0,
            smoothed_input * self.com_vertical_shift,
        )
    }

    /// Adds every command to the body's accumulators, returns how many were applied
    pub fn submit<B: RigidBody + ?Sized>(&self, forces: &[ForceCommand], body: &mut B) -> usize {
        let mut num_applied = 0;
        for cmd in forces {
            if !cmd.force.is_finite() || !cmd.world_position.is_finite() {
                log::debug!("dropping non-finite force {cmd:?}");
                continue;
            }

            body.add_force_at_point(cmd.force, cmd.world_position);
            num_applied += 1;
        }

        num_applied
    }

    /// Submits `forces`, then overwrites the center of mass offset once
    pub fn apply<B: RigidBody + ?Sized>(
        &self,
        forces: &[ForceCommand],
        com_offset: Vec3A,
        body: &mut B,
    ) -> usize {
        let num_applied = self.submit(forces, body);
        body.set_center_of_mass_offset(com_offset);

        num_applied
    }
}
