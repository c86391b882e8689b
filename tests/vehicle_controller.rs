mod common;

use approx::{assert_abs_diff_eq, assert_relative_eq};
use common::{DT, RecordingBody, ScriptedWorld, blocking_hit};
use glam::{Affine3A, Mat3A, Vec3A};
use std::f32::consts::FRAC_PI_2;
use steersim::{
    consts::{MAX_ACCELERATION, NUM_WHEELS},
    sandbox::RecordingBinding,
    sim::{
        ForceApplicator, ForceCommand, InputAction, InputEvent, InputPhase, InvalidTunable,
        MountPoint, VehicleConfig, VehicleController,
    },
};

fn controller() -> VehicleController {
    VehicleController::new(VehicleConfig::DEFAULT).unwrap()
}

#[test]
fn default_config_is_valid() {
    assert!(VehicleConfig::DEFAULT.validate().is_ok());
}

#[test]
fn rejects_bad_tunables() {
    let cases = [
        VehicleConfig {
            max_acceleration: -1.0,
            ..VehicleConfig::DEFAULT
        },
        VehicleConfig {
            accel_interp_speed: 0.0,
            ..VehicleConfig::DEFAULT
        },
        VehicleConfig {
            decel_interp_speed: f32::NAN,
            ..VehicleConfig::DEFAULT
        },
        VehicleConfig {
            force_scale: f32::INFINITY,
            ..VehicleConfig::DEFAULT
        },
        VehicleConfig {
            probe_length: 0.0,
            ..VehicleConfig::DEFAULT
        },
    ];

    let expected = [
        "max_acceleration",
        "accel_interp_speed",
        "decel_interp_speed",
        "force_scale",
        "probe_length",
    ];

    for (config, name) in cases.into_iter().zip(expected) {
        let Err(err) = VehicleController::new(config) else {
            panic!("{name} should have been rejected");
        };

        let tunable = err.downcast_ref::<InvalidTunable>().unwrap();
        assert_eq!(tunable.name, name);
    }
}

#[test]
fn rejects_shuffled_mount_points() {
    let mut config = VehicleConfig::DEFAULT;
    config.mount_points.swap(0, 1);

    let tunable = config.validate().unwrap_err();
    assert_eq!(tunable.name, "mount_points.index");
}

#[test]
fn initialize_binds_accelerate_once() {
    let mut binding = RecordingBinding::default();
    let mut controller = controller();

    controller.initialize(&mut binding);
    controller.initialize(&mut binding);

    assert!(controller.is_initialized());
    assert_eq!(binding.num_bindings(), 1);
    assert!(binding.is_bound(InputAction::Accelerate, InputPhase::Triggered));
    assert!(binding.is_bound(InputAction::Accelerate, InputPhase::Completed));
    assert!(!binding.is_bound(InputAction::Accelerate, InputPhase::Started));
}

#[test]
fn input_events_overwrite_target() {
    let mut controller = controller();

    assert!(controller.on_input_event(RecordingBinding::hold(1.0)));
    assert_eq!(controller.state().target_input, 1.0);

    assert!(controller.on_input_event(RecordingBinding::hold(-1.0)));
    assert_eq!(controller.state().target_input, -1.0);

    assert!(controller.on_input_event(RecordingBinding::release()));
    assert_eq!(controller.state().target_input, 0.0);

    assert!(!controller.on_input_event(InputEvent::accelerate(InputPhase::Started, 1.0)));
    assert!(!controller.on_input_event(InputEvent::accelerate(InputPhase::Canceled, 1.0)));
    assert_eq!(controller.state().target_input, 0.0);

    assert!(!controller.on_input_event(RecordingBinding::hold(f32::NAN)));
    assert_eq!(controller.state().target_input, 0.0);

    assert!(controller.on_input_event(RecordingBinding::hold(4.0)));
    assert_eq!(controller.state().target_input, 1.0);
}

#[test]
fn target_is_only_consumed_on_update() {
    let mut controller = controller();

    controller.on_input_event(RecordingBinding::hold(1.0));
    assert_eq!(controller.state().smoothed_input, 0.0);

    let mut body = RecordingBody::new(1.0);
    controller.update(1.0, Some(&ScriptedWorld::empty()), Some(&mut body));

    assert_abs_diff_eq!(controller.state().smoothed_input, 0.393_469_34, epsilon = 1e-6);
    assert_abs_diff_eq!(
        controller.state().current_acceleration,
        0.393_469_34 * MAX_ACCELERATION,
        epsilon = 0.1
    );
}

#[test]
fn two_front_wheels_on_ground() {
    // front mounts sit at +x, only they find ground 30 below
    let world = ScriptedWorld::new(|origin, _| (origin.x > 0.0).then(|| blocking_hit(origin, 30.0)));
    let mut body = RecordingBody::new(1000.0);
    let mut controller = controller();

    let report = controller.update(DT, Some(&world), Some(&mut body));

    assert_eq!(world.num_queries(), NUM_WHEELS);
    assert_eq!(report.readings.len(), NUM_WHEELS);
    assert_eq!(report.num_wheels_with_contact(), 2);
    assert!(!report.suspension_skipped);

    assert_eq!(report.suspension_forces.len(), 2);
    for cmd in &report.suspension_forces {
        assert_eq!(cmd.force, Vec3A::new(0.0, 0.0, 45_000.0));
        assert!(cmd.world_position.x > 0.0);
    }

    // no throttle yet, so propulsion adds nothing
    assert_eq!(report.total_force(), Vec3A::new(0.0, 0.0, 90_000.0));
    assert_eq!(body.total_force(), Vec3A::new(0.0, 0.0, 90_000.0));
    assert_eq!(report.forces_applied, 2 + NUM_WHEELS);

    let mut points = body
        .forces
        .iter()
        .filter(|(force, _)| force.z != 0.0)
        .map(|(_, point)| *point)
        .collect::<Vec<_>>();
    points.sort_by(|a, b| a.y.total_cmp(&b.y));
    assert_eq!(
        points,
        vec![
            VehicleConfig::DEFAULT.mount_points[0].local_pos,
            VehicleConfig::DEFAULT.mount_points[1].local_pos,
        ]
    );
}

#[test]
fn probes_ignore_own_body() {
    let world = ScriptedWorld::empty();
    let mut body = RecordingBody::new(1.0);

    controller().update(DT, Some(&world), Some(&mut body));

    for query in world.queries.borrow().iter() {
        assert_eq!(query.ignore, vec![body.id]);
    }
}

#[test]
fn missing_body_skips_every_force() {
    let world = ScriptedWorld::flat(10.0);
    let mut controller = controller();
    controller.set_target_input(1.0);

    let report = controller.update::<ScriptedWorld, RecordingBody>(DT, Some(&world), None);

    assert_eq!(world.num_queries(), 0);
    assert!(report.readings.is_empty());
    assert_eq!(report.forces_applied, 0);
    assert_eq!(report.com_offset, None);
    assert!(report.suspension_skipped);
    assert!(report.propulsion_skipped);

    // the smoother still runs, the next tick with a body picks up from here
    assert!(controller.state().smoothed_input > 0.0);
}

#[test]
fn missing_world_still_propels() {
    let mut body = RecordingBody::new(1.0);
    let mut controller = controller();
    controller.set_target_input(1.0);

    let report = controller.update::<ScriptedWorld, _>(DT, None, Some(&mut body));

    assert!(report.suspension_skipped);
    assert!(!report.propulsion_skipped);
    assert_eq!(report.readings.len(), NUM_WHEELS);
    assert_eq!(report.num_wheels_with_contact(), 0);
    assert!(report.suspension_forces.is_empty());
    assert_eq!(report.propulsion_forces.len(), NUM_WHEELS);
    assert_eq!(body.forces.len(), NUM_WHEELS);
    assert_eq!(body.com_writes.len(), 1);
}

#[test]
fn invalid_dt_skips_tick() {
    let world = ScriptedWorld::flat(10.0);
    let mut body = RecordingBody::new(1.0);
    let mut controller = controller();
    controller.set_target_input(1.0);

    for dt in [f32::NAN, -DT, f32::INFINITY] {
        let report = controller.update(dt, Some(&world), Some(&mut body));
        assert!(report.suspension_skipped && report.propulsion_skipped);
    }

    assert_eq!(controller.state().smoothed_input, 0.0);
    assert_eq!(world.num_queries(), 0);
    assert!(body.forces.is_empty());
    assert!(body.com_writes.is_empty());
}

#[test]
fn broken_chassis_pose_only_moves_center_of_mass() {
    let world = ScriptedWorld::flat(10.0);
    let mut body = RecordingBody::with_transform(
        1.0,
        Affine3A {
            matrix3: Mat3A::IDENTITY,
            translation: Vec3A::new(f32::NAN, 0.0, 0.0),
        },
    );
    let mut controller = controller();

    let report = controller.update(DT, Some(&world), Some(&mut body));

    assert!(report.suspension_skipped && report.propulsion_skipped);
    assert_eq!(world.num_queries(), 0);
    assert!(body.forces.is_empty());
    assert_eq!(body.com_writes.len(), 1);
}

#[test]
fn non_finite_mass_skips_propulsion() {
    let world = ScriptedWorld::flat(30.0);
    let mut body = RecordingBody::new(f32::NAN);
    let mut controller = controller();
    controller.set_target_input(1.0);

    let report = controller.update(DT, Some(&world), Some(&mut body));

    assert!(report.propulsion_skipped);
    assert!(!report.suspension_skipped);
    assert!(report.propulsion_forces.is_empty());
    assert_eq!(report.forces_applied, NUM_WHEELS);
    assert!(report.total_force().is_finite());
    assert_eq!(body.forces.len(), NUM_WHEELS);
    assert_eq!(body.com_writes.len(), 1);
}

#[test]
fn applicator_drops_non_finite_forces() {
    let applicator = ForceApplicator::new(50.0, -20.0);
    let mut body = RecordingBody::new(1.0);
    let forces = [
        ForceCommand {
            world_position: Vec3A::ZERO,
            force: Vec3A::new(f32::NAN, 0.0, 0.0),
        },
        ForceCommand {
            world_position: Vec3A::new(f32::INFINITY, 0.0, 0.0),
            force: Vec3A::Z,
        },
        ForceCommand {
            world_position: Vec3A::X,
            force: Vec3A::Z * 10.0,
        },
    ];

    let num_applied = applicator.apply(&forces, applicator.com_offset(1.0), &mut body);

    assert_eq!(num_applied, 1);
    assert_eq!(body.forces, vec![(Vec3A::Z * 10.0, Vec3A::X)]);
    assert_eq!(body.com_writes, vec![Vec3A::new(50.0, 0.0, -20.0)]);
}

#[test]
fn propulsion_scales_with_mass_and_dt() {
    let mass = 2.0;
    let dt = 0.5;
    let mut body = RecordingBody::new(mass);
    let mut controller = controller();
    controller.set_target_input(1.0);

    let report = controller.update(dt, Some(&ScriptedWorld::empty()), Some(&mut body));

    let smoothed = 1.0 - (-0.5f32 * dt).exp();
    let expected = MAX_ACCELERATION * smoothed * VehicleConfig::DEFAULT.force_scale * mass * dt;

    assert_eq!(report.propulsion_forces.len(), NUM_WHEELS);
    for (cmd, mount) in report.propulsion_forces.iter().zip(&VehicleConfig::DEFAULT.mount_points) {
        assert_relative_eq!(cmd.force.x, expected, max_relative = 1e-5);
        assert_eq!(cmd.force.y, 0.0);
        assert_eq!(cmd.force.z, 0.0);
        assert_eq!(cmd.world_position, mount.local_pos);
    }
}

#[test]
fn reverse_pushes_backwards() {
    let mut body = RecordingBody::new(1.0);
    let mut controller = controller();
    controller.on_input_event(RecordingBinding::hold(-1.0));

    let report = controller.update(DT, Some(&ScriptedWorld::empty()), Some(&mut body));

    assert!(report.control.current_acceleration < 0.0);
    assert!(report.propulsion_forces.iter().all(|cmd| cmd.force.x < 0.0));
}

#[test]
fn forces_follow_chassis_pose() {
    let transform = Affine3A {
        matrix3: Mat3A::from_rotation_z(FRAC_PI_2),
        translation: Vec3A::new(100.0, 200.0, 50.0),
    };
    let mut body = RecordingBody::with_transform(1.0, transform);
    let world = ScriptedWorld::flat(30.0);
    let mut controller = controller();
    controller.set_target_input(1.0);

    let report = controller.update(DT, Some(&world), Some(&mut body));

    for (reading, mount) in report.readings.iter().zip(&VehicleConfig::DEFAULT.mount_points) {
        let expected = transform.transform_point3a(mount.local_pos);
        assert!(reading.ray_start.abs_diff_eq(expected, 1e-3));
    }

    // suspension stays vertical, propulsion turns with the chassis
    for cmd in &report.suspension_forces {
        assert_eq!(cmd.force.x, 0.0);
        assert_eq!(cmd.force.y, 0.0);
    }
    for cmd in &report.propulsion_forces {
        assert!(cmd.force.y > 0.0);
        assert!(cmd.force.x.abs() < cmd.force.y * 1e-5);
    }
}

#[test]
fn center_of_mass_written_once_per_tick() {
    let mut body = RecordingBody::new(1.0);
    let world = ScriptedWorld::flat(20.0);
    let mut controller = controller();
    controller.set_target_input(1.0);

    for tick in 1..=10 {
        let report = controller.update(DT, Some(&world), Some(&mut body));
        assert_eq!(body.com_writes.len(), tick);

        let smoothed = report.control.smoothed_input;
        let expected = Vec3A::new(50.0, 0.0, smoothed * -20.0);
        assert_eq!(report.com_offset, Some(expected));
        assert_eq!(*body.com_writes.last().unwrap(), expected);
    }

    // accelerating forward drops the center of mass
    assert!(body.com_writes.last().unwrap().z < 0.0);
}

#[test]
fn identical_runs_match_exactly() {
    let run = || {
        let world = ScriptedWorld::flat(25.0);
        let mut body = RecordingBody::new(1000.0);
        let mut controller = controller();

        (0..180)
            .map(|tick| {
                match tick {
                    0 => controller.set_target_input(1.0),
                    90 => controller.set_target_input(0.0),
                    _ => {}
                }

                let report = controller.update(DT, Some(&world), Some(&mut body));
                (report.control, report.total_force())
            })
            .collect::<Vec<_>>()
    };

    assert_eq!(run(), run());
}

#[test]
fn custom_mount_layout() {
    let mut config = VehicleConfig::DEFAULT;
    config.mount_points = [
        MountPoint::new(0, Vec3A::new(10.0, -5.0, -1.0)),
        MountPoint::new(1, Vec3A::new(10.0, 5.0, -1.0)),
        MountPoint::new(2, Vec3A::new(-10.0, -5.0, -1.0)),
        MountPoint::new(3, Vec3A::new(-10.0, 5.0, -1.0)),
    ];

    let world = ScriptedWorld::empty();
    let mut body = RecordingBody::new(1.0);
    let mut controller = VehicleController::new(config).unwrap();

    let report = controller.update(DT, Some(&world), Some(&mut body));

    for (reading, mount) in report.readings.iter().zip(&config.mount_points) {
        assert_eq!(reading.mount_index, mount.index);
        assert_eq!(reading.ray_start, mount.local_pos);
    }
}
