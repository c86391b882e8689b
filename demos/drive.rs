use glam::{Affine3A, Mat3A, Vec3A};
use steersim::{
    init_logging,
    sandbox::{RecordingBinding, SandboxBody, SandboxBodyConstructionInfo, SandboxWorld},
    sim::{BodyId, RigidBody, VehicleConfig, VehicleController},
};
use std::time::Instant;

const TICK_RATE: f32 = 60.0;

fn main() -> anyhow::Result<()> {
    init_logging();

    let world = SandboxWorld::with_floor(0.0);

    let mut info = SandboxBodyConstructionInfo::new(BodyId(1));
    info.start_world_transform = Affine3A {
        matrix3: Mat3A::IDENTITY,
        translation: Vec3A::new(0.0, 0.0, 40.0),
    };
    // no contact solver in the sandbox, keep the chassis from sinking through the floor
    info.gravity = Vec3A::ZERO;
    let mut body = SandboxBody::new(info);

    let mut binding = RecordingBinding::default();
    let mut controller = VehicleController::new(VehicleConfig::DEFAULT)?;
    controller.initialize(&mut binding);

    let dt = 1.0 / TICK_RATE;
    let start = Instant::now();

    for tick in 0..(TICK_RATE as u32 * 4) {
        match tick {
            0 => {
                controller.on_input_event(RecordingBinding::hold(1.0));
            }
            120 => {
                controller.on_input_event(RecordingBinding::release());
            }
            _ => {}
        }

        let report = controller.update(dt, Some(&world), Some(&mut body));
        body.step(dt);

        if tick % 30 == 0 {
            log::info!(
                "tick {tick}: input {:.3}, accel {:.1}, wheels on ground {}, pos {:.1}",
                report.control.smoothed_input,
                report.control.current_acceleration,
                report.num_wheels_with_contact(),
                body.world_position(),
            );
        }
    }

    let elapsed = Instant::now().duration_since(start).as_secs_f32();
    println!("Simulated {} ticks in {elapsed}s", TICK_RATE as u32 * 4);

    Ok(())
}
