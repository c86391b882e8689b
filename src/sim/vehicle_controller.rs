use super::{
    AccelerationProfile, BodyId, CollisionQuery, ControlState, ForceApplicator, ForceCommand,
    InputAction, InputBinding, InputEvent, InputPhase, InputSmoother, RigidBody,
    SuspensionProbe, SuspensionReading, VehicleConfig,
};
use crate::consts::NUM_WHEELS;
use ahash::AHashSet;
use anyhow::Context;
use arrayvec::ArrayVec;
use glam::{Affine3A, Vec3A};

/// Phases of the accelerate action that carry a new target value
const CONSUMED_PHASES: [InputPhase; 2] = [InputPhase::Triggered, InputPhase::Completed];

/// What a single `update` did to the body
#[derive(Clone, Debug, PartialEq)]
pub struct TickReport {
    /// One entry per mount point when the chassis pose was available
    pub readings: ArrayVec<SuspensionReading, NUM_WHEELS>,
    pub suspension_forces: ArrayVec<ForceCommand, NUM_WHEELS>,
    pub propulsion_forces: ArrayVec<ForceCommand, NUM_WHEELS>,
    /// Forces that actually reached the body
    pub forces_applied: usize,
    /// Center of mass offset written this tick, if any
    pub com_offset: Option<Vec3A>,
    pub suspension_skipped: bool,
    pub propulsion_skipped: bool,
    /// Control state after this tick
    pub control: ControlState,
}

impl TickReport {
    fn new(control: ControlState) -> Self {
        Self {
            readings: ArrayVec::new(),
            suspension_forces: ArrayVec::new(),
            propulsion_forces: ArrayVec::new(),
            forces_applied: 0,
            com_offset: None,
            suspension_skipped: false,
            propulsion_skipped: false,
            control,
        }
    }

    /// Sum of every force this tick produced
    #[must_use]
    pub fn total_force(&self) -> Vec3A {
        self.suspension_forces
            .iter()
            .chain(&self.propulsion_forces)
            .map(|cmd| cmd.force)
            .sum()
    }

    #[must_use]
    pub fn num_wheels_with_contact(&self) -> usize {
        self.readings.iter().filter(|reading| reading.hit).count()
    }
}

/// Drives one chassis: probes the ground under every mount point, smooths
/// the throttle and pushes suspension and propulsion forces into the body.
///
/// Missing collaborators never fail a tick, the dependent step is skipped
/// and the next tick starts over from the stored control state.
pub struct VehicleController {
    config: VehicleConfig,
    smoother: InputSmoother,
    profile: AccelerationProfile,
    probe: SuspensionProbe,
    applicator: ForceApplicator,
    state: ControlState,
    ignore: AHashSet<BodyId>,
    initialized: bool,
}

impl VehicleController {
    /// Fails if any tunable in `config` is not usable
    pub fn new(config: VehicleConfig) -> anyhow::Result<Self> {
        config
            .validate()
            .context("refusing to build a vehicle controller")?;

        Ok(Self {
            smoother: InputSmoother::new(config.accel_interp_speed, config.decel_interp_speed),
            profile: AccelerationProfile::new(config.max_acceleration),
            probe: SuspensionProbe::new(
                config.probe_length,
                config.suspension_force_scale,
                config.ground_check_channel,
            ),
            applicator: ForceApplicator::new(config.com_forward_offset, config.com_vertical_shift),
            config,
            state: ControlState::DEFAULT,
            ignore: AHashSet::with_capacity(1),
            initialized: false,
        })
    }

    /// Registers the accelerate action with the host's input layer
    pub fn initialize<I: InputBinding + ?Sized>(&mut self, binding: &mut I) {
        if self.initialized {
            log::warn!("VehicleController::initialize() called again, ignoring...");
            return;
        }

        binding.bind_action(InputAction::Accelerate, &CONSUMED_PHASES);
        self.initialized = true;

        log::info!(
            "Vehicle controller bound to \"{}\" with {} mount points",
            InputAction::Accelerate.name(),
            self.config.mount_points.len()
        );
    }

    #[must_use]
    pub const fn is_initialized(&self) -> bool {
        self.initialized
    }

    #[must_use]
    pub const fn config(&self) -> &VehicleConfig {
        &self.config
    }

    #[must_use]
    pub const fn state(&self) -> ControlState {
        self.state
    }

    /// Overwrites the target input, picked up by the next `update`
    pub fn set_target_input(&mut self, value: f32) {
        if !self.state.set_target(value) {
            log::warn!("ignoring NaN accelerate input");
        }
    }

    /// Returns true if the event was consumed as a new target input
    pub fn on_input_event(&mut self, event: InputEvent) -> bool {
        if event.action != InputAction::Accelerate || !CONSUMED_PHASES.contains(&event.phase) {
            return false;
        }

        self.set_target_input(event.value);
        !event.value.is_nan()
    }

    /// Runs one simulation tick of `dt` seconds
    pub fn update<W, B>(&mut self, dt: f32, world: Option<&W>, mut body: Option<&mut B>) -> TickReport
    where
        W: CollisionQuery + ?Sized,
        B: RigidBody + ?Sized,
    {
        let mut report = TickReport::new(self.state);

        if !dt.is_finite() || dt < 0.0 {
            log::warn!("skipping vehicle tick with invalid dt {dt}");
            report.suspension_skipped = true;
            report.propulsion_skipped = true;
            return report;
        }

        let chassis_trans = body
            .as_deref()
            .map(|body| body.world_transform())
            .filter(Affine3A::is_finite);

        match (body.as_deref_mut(), chassis_trans) {
            (Some(body), Some(trans)) => self.update_suspension(&trans, world, body, &mut report),
            _ => {
                log::debug!("no usable chassis body, skipping suspension");
                report.suspension_skipped = true;
            }
        }

        self.update_acceleration(dt);
        report.control = self.state;

        let Some(body) = body else {
            log::debug!("no chassis body, skipping propulsion");
            report.propulsion_skipped = true;
            return report;
        };

        match chassis_trans {
            Some(trans) => self.build_propulsion(&trans, dt, body, &mut report),
            None => report.propulsion_skipped = true,
        }

        let com_offset = self.applicator.com_offset(self.state.smoothed_input);
        report.forces_applied += self
            .applicator
            .apply(&report.propulsion_forces, com_offset, body);
        report.com_offset = Some(com_offset);

        report
    }

    fn update_suspension<W, B>(
        &mut self,
        chassis_trans: &Affine3A,
        world: Option<&W>,
        body: &mut B,
        report: &mut TickReport,
    ) where
        W: CollisionQuery + ?Sized,
        B: RigidBody + ?Sized,
    {
        self.ignore.clear();
        self.ignore.insert(body.id());

        let down = Vec3A::NEG_Z;
        for mount in &self.config.mount_points {
            let origin = chassis_trans.transform_point3a(mount.local_pos);
            let reading = match world {
                Some(world) => self.probe.cast(mount.index, origin, down, world, &self.ignore),
                None => SuspensionReading::airborne(
                    mount.index,
                    origin,
                    origin + down * self.probe.probe_length(),
                ),
            };

            if let Some(cmd) = self.probe.force_for(&reading) {
                report.suspension_forces.push(cmd);
            }
            report.readings.push(reading);
        }

        if world.is_none() {
            log::debug!("no collision world, every wheel reads as airborne");
            report.suspension_skipped = true;
        }

        report.forces_applied += self.applicator.submit(&report.suspension_forces, body);
    }

    fn update_acceleration(&mut self, dt: f32) {
        self.state.smoothed_input =
            self.smoother
                .advance(self.state.smoothed_input, self.state.target_input, dt);
        self.state.current_acceleration = self.profile.evaluate(self.state.smoothed_input);
    }

    fn build_propulsion<B: RigidBody + ?Sized>(
        &self,
        chassis_trans: &Affine3A,
        dt: f32,
        body: &B,
        report: &mut TickReport,
    ) {
        let forward = body.forward_vector();
        if !forward.is_finite() || forward == Vec3A::ZERO {
            log::debug!("degenerate chassis forward {forward}, skipping propulsion");
            report.propulsion_skipped = true;
            return;
        }

        let mass = body.mass();
        if !mass.is_finite() {
            log::debug!("chassis mass {mass} is not finite, skipping propulsion");
            report.propulsion_skipped = true;
            return;
        }

        let force = forward * (self.state.current_acceleration * self.config.force_scale * mass * dt);

        for mount in &self.config.mount_points {
            report.propulsion_forces.push(ForceCommand {
                world_position: chassis_trans.transform_point3a(mount.local_pos),
                force,
            });
        }
    }
}
