//! Headless skirmish demo
//!
//! Spawns a hunter and an intruder on opposite teams, lets the hunter sense,
//! face, and shoot, and logs the outcome.

use ink_ai::{BehaviorTask, PerceptionConfig};
use ink_combat::{AimProfile, PaintSurface, Team, WeaponConfig};
use ink_math::Vec3;
use ink_physics::ColliderDesc;
use ink_sim::tasks::{FaceActorTask, SenseEnemiesTask, ShootAtTargetTask};
use ink_sim::{AgentDesc, SimWorld};

fn main() {
    env_logger::init();

    let mut world = SimWorld::new(7);

    // Arena: ground plus a paintable back wall
    world.scene.add(ColliderDesc::from_center_half_extents(
        Vec3::new(0.0, 0.0, -0.5),
        Vec3::new(50.0, 50.0, 0.5),
    ));
    let wall = world.scene.add(ColliderDesc::from_center_half_extents(
        Vec3::new(14.0, 0.0, 2.0),
        Vec3::new(0.5, 10.0, 2.0),
    ));
    world.surfaces.register(wall, PaintSurface::new(128));

    let hunter = world.spawn_agent(
        AgentDesc::new(Vec3::ZERO, Team::Red)
            .with_weapon(
                WeaponConfig::default()
                    .with_magazine(12)
                    .with_refire_interval(0.25)
                    .full_auto(),
            )
            .with_aim(AimProfile {
                variance_half_angle_deg: 2.0,
                ..AimProfile::default()
            }),
    );
    let intruder = world.spawn_agent(
        AgentDesc::new(Vec3::new(10.0, 0.0, 0.0), Team::Blue)
            .with_forward(Vec3::NEG_X)
            .with_hp(100.0),
    );

    // The sequencer would drive these; here they are entered by hand.
    let mut sense = SenseEnemiesTask {
        agent: hunter,
        config: PerceptionConfig::default(),
    };
    sense.enter(&mut world);

    // The intruder makes itself known
    if let Some(stimulus) = world.agent_stimulus(intruder, 1.0) {
        world.notify_stimulus(hunter, &stimulus);
    }

    let mut combat_tasks: Option<(FaceActorTask, ShootAtTargetTask)> = None;
    let dt = 1.0 / 60.0;
    for _ in 0..600 {
        if combat_tasks.is_none() {
            if let Some(target) = world.sense_state(hunter).and_then(|s| s.target_actor()) {
                log::info!("hunter locked target {:#x}", target);
                let mut face = FaceActorTask {
                    agent: hunter,
                    target,
                };
                let mut shoot = ShootAtTargetTask {
                    agent: hunter,
                    target,
                };
                face.enter(&mut world);
                shoot.enter(&mut world);
                combat_tasks = Some((face, shoot));
            }
        }
        world.tick(dt);
        if !world.agents.contains(intruder) {
            break;
        }
    }

    if let Some((mut face, mut shoot)) = combat_tasks {
        shoot.exit(&mut world);
        face.exit(&mut world);
    }
    sense.exit(&mut world);

    let painted = world.surfaces.get(wall).map_or(0, |s| s.painted_count());
    log::info!(
        "skirmish over at t={:.2}s: blue falls={}, wall texels painted={}",
        world.time(),
        world.scoreboard.falls(Team::Blue),
        painted
    );
}
