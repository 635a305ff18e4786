//! Cross-component scenarios: perception into fire control into impacts

use ink_ai::{BehaviorTask, PerceptionConfig};
use ink_combat::{AimProfile, PaintSurface, ProjectilePhase, Team, WeaponConfig};
use ink_math::Vec3;
use ink_physics::{ColliderDesc, Mobility};
use ink_sim::tasks::{
    FaceLocationTask, HasInvestigateCondition, HasTargetCondition, LineOfSightCondition,
    SenseEnemiesTask,
};
use ink_sim::{AgentDesc, SimWorld};
use ink_ai::BehaviorCondition;

const DT: f32 = 1.0 / 60.0;

fn steady_aim() -> AimProfile {
    AimProfile {
        variance_half_angle_deg: 0.0,
        offset_z_low: 0.0,
        offset_z_high: 0.0,
        ..AimProfile::default()
    }
}

fn rifle() -> WeaponConfig {
    let mut config = WeaponConfig::default()
        .with_refire_interval(0.2)
        .full_auto();
    config.aim_variance = 0.0;
    config
}

fn run(world: &mut SimWorld, seconds: f32) {
    let steps = (seconds / DT).ceil() as u32;
    for _ in 0..steps {
        world.tick(DT);
    }
}

#[test]
fn hunter_locks_target_and_wins_the_exchange() {
    let mut world = SimWorld::new(11);
    world.scene.add(ColliderDesc::from_center_half_extents(
        Vec3::new(0.0, 0.0, -0.5),
        Vec3::new(50.0, 50.0, 0.5),
    ));

    let hunter = world.spawn_agent(
        AgentDesc::new(Vec3::ZERO, Team::Red)
            .with_weapon(rifle())
            .with_aim(steady_aim()),
    );
    let intruder = world.spawn_agent(
        AgentDesc::new(Vec3::new(10.0, 0.0, 0.0), Team::Blue)
            .with_forward(Vec3::NEG_X)
            .with_hp(100.0)
            .with_destruction_delay(0.5),
    );
    let intruder_bits = intruder.to_bits();

    world.bind_sense(hunter, PerceptionConfig::default());
    let stimulus = world.agent_stimulus(intruder, 1.0).unwrap();
    world.notify_stimulus(hunter, &stimulus);

    // Direct sighting locked the target
    let state = world.sense_state(hunter).unwrap();
    assert_eq!(state.target_actor(), Some(intruder_bits));
    assert!(!state.has_investigate_location());

    world.start_shooting(hunter, intruder_bits);
    run(&mut world, 3.0);

    // The intruder fell, was scored, and was destroyed after its delay
    assert_eq!(world.scoreboard.falls(Team::Blue), 1);
    assert_eq!(world.scoreboard.falls(Team::Red), 0);
    assert!(!world.agents.contains(intruder));

    // Stale-handle operations are silent no-ops
    world.move_agent(intruder, Vec3::ZERO);
    world.start_shooting(intruder, hunter.to_bits());
    run(&mut world, 0.5);

    // Forgetting the (now destroyed) target clears the hunter's state
    world.forget_stimulus(hunter, intruder_bits);
    let state = world.sense_state(hunter).unwrap();
    assert!(!state.has_target());
}

#[test]
fn shot_noise_becomes_an_investigate_lead_behind_cover() {
    let mut world = SimWorld::new(12);
    // Tall wall between shooter and listener
    world.scene.add(ColliderDesc::from_center_half_extents(
        Vec3::new(15.0, 0.0, 0.0),
        Vec3::new(0.5, 10.0, 5.0),
    ));

    let shooter = world.spawn_agent(
        AgentDesc::new(Vec3::ZERO, Team::Red)
            .with_weapon(WeaponConfig::default())
            .with_aim(steady_aim()),
    );
    let listener = world.spawn_agent(
        AgentDesc::new(Vec3::new(20.0, 0.0, 0.0), Team::Blue).with_forward(Vec3::NEG_X),
    );

    world.bind_sense(listener, PerceptionConfig::default());

    // One shot; its report carries through the wall as a noise stimulus
    world.start_shooting(shooter, 0);
    world.stop_shooting(shooter);

    let state = world.sense_state(listener).unwrap();
    assert!(!state.has_target(), "occluded shooter must not be locked");
    assert!(state.has_investigate_location());
    assert_eq!(state.investigate_location(), Some(Vec3::ZERO));
    assert_eq!(state.last_stimulus_strength(), 3.0);

    // The sequencer conditions read the same state
    assert!(HasInvestigateCondition { agent: listener }.test(&world));
    assert!(!HasTargetCondition { agent: listener }.test(&world));

    // And the wall fails the line-of-sight gate both ways
    let sight = LineOfSightCondition {
        observer: listener,
        target: shooter.to_bits(),
        cone_half_angle_deg: 35.0,
        vertical_samples: 5,
        require_sight: true,
    };
    assert!(!sight.test(&world));
    let hidden = LineOfSightCondition {
        require_sight: false,
        ..sight
    };
    assert!(hidden.test(&world));
}

#[test]
fn face_location_task_turns_the_agent() {
    let mut world = SimWorld::new(18);
    let watcher = world.spawn_agent(AgentDesc::new(Vec3::ZERO, Team::Red));

    let mut face = FaceLocationTask {
        agent: watcher,
        location: Vec3::new(0.0, 5.0, 0.0),
    };
    face.enter(&mut world);
    world.tick(DT);
    assert!(world.agents.get(watcher).unwrap().forward.y > 0.9);

    face.exit(&mut world);
    assert!(!world.focus(watcher).unwrap().has_focus());
}

#[test]
fn projectile_attaches_to_wall_and_paints_it() {
    let mut world = SimWorld::new(13);
    let wall = world.scene.add(ColliderDesc::from_center_half_extents(
        Vec3::new(10.0, 0.0, 2.0),
        Vec3::new(0.5, 10.0, 2.0),
    ));
    world.surfaces.register(wall, PaintSurface::new(128));

    let shooter = world.spawn_agent(
        AgentDesc::new(Vec3::ZERO, Team::Red)
            .with_weapon(rifle())
            .with_aim(steady_aim()),
    );

    // No aim target: the shooter fires along its facing direction
    world.start_shooting(shooter, 0);
    world.stop_shooting(shooter);
    run(&mut world, 1.0);

    let attached: Vec<_> = world
        .projectiles
        .iter()
        .filter(|(_, p)| p.attached_to == Some(wall))
        .collect();
    assert_eq!(attached.len(), 1);
    let (_, projectile) = attached[0];
    assert_eq!(projectile.phase(), ProjectilePhase::PendingDestruction);
    assert_eq!(projectile.velocity, Vec3::ZERO);

    let surface = world.surfaces.get(wall).unwrap();
    assert!(surface.painted_count() > 0, "impact must leave a team stamp");
}

#[test]
fn projectile_hands_off_to_physics_on_movable_prop() {
    let mut world = SimWorld::new(14);
    let prop = world.scene.add(
        ColliderDesc::from_center_half_extents(Vec3::new(8.0, 0.0, 1.0), Vec3::ONE)
            .with_mobility(Mobility::Movable)
            .with_simulated_physics(),
    );

    let shooter = world.spawn_agent(
        AgentDesc::new(Vec3::ZERO, Team::Blue)
            .with_weapon(rifle())
            .with_aim(steady_aim()),
    );

    world.start_shooting(shooter, 0);
    world.stop_shooting(shooter);
    run(&mut world, 1.0);

    let handed_off: Vec<_> = world
        .projectiles
        .iter()
        .filter(|(_, p)| p.simulating)
        .collect();
    assert_eq!(handed_off.len(), 1);
    assert!(world.scene.get(prop).unwrap().accumulated_impulse.x > 0.0);
}

#[test]
fn destroying_a_firing_agent_cancels_its_cadence() {
    let mut world = SimWorld::new(15);
    let hunter = world.spawn_agent(
        AgentDesc::new(Vec3::ZERO, Team::Red)
            .with_weapon(rifle())
            .with_aim(steady_aim()),
    );

    world.start_shooting(hunter, 0);
    run(&mut world, 0.1); // mid-burst, a refire timer is pending

    world.destroy_agent(hunter);
    assert!(world.weapons.is_empty());
    assert!(!world.agents.contains(hunter));

    // Whatever timers were left fire against stale handles without effect
    run(&mut world, 2.0);
    assert!(world.agents.is_empty());
}

#[test]
fn sense_task_binds_and_unbinds_the_arbitrator() {
    let mut world = SimWorld::new(16);
    let watcher = world.spawn_agent(AgentDesc::new(Vec3::ZERO, Team::Red));
    let other = world.spawn_agent(
        AgentDesc::new(Vec3::new(5.0, 0.0, 0.0), Team::Blue).with_forward(Vec3::NEG_X),
    );

    let mut sense = SenseEnemiesTask {
        agent: watcher,
        config: PerceptionConfig::default(),
    };

    sense.enter(&mut world);
    assert!(world.is_sensing(watcher));
    let stimulus = world.agent_stimulus(other, 1.0).unwrap();
    world.notify_stimulus(watcher, &stimulus);
    assert!(world.sense_state(watcher).unwrap().has_target());

    sense.exit(&mut world);
    assert!(!world.is_sensing(watcher));
    assert!(world.sense_state(watcher).is_none());

    // Stimuli delivered after exit mutate nothing
    let stimulus = world.agent_stimulus(other, 5.0).unwrap();
    world.notify_stimulus(watcher, &stimulus);
    assert!(world.sense_state(watcher).is_none());
}

#[test]
fn dead_agents_stop_shooting_and_ignore_triggers() {
    let mut world = SimWorld::new(17);
    world.scene.add(ColliderDesc::from_center_half_extents(
        Vec3::new(0.0, 0.0, -0.5),
        Vec3::new(50.0, 50.0, 0.5),
    ));

    let hunter = world.spawn_agent(
        AgentDesc::new(Vec3::ZERO, Team::Red)
            .with_weapon(rifle())
            .with_aim(steady_aim()),
    );
    let victim = world.spawn_agent(
        AgentDesc::new(Vec3::new(10.0, 0.0, 0.0), Team::Blue)
            .with_hp(25.0)
            .with_weapon(rifle())
            .with_destruction_delay(10.0),
    );

    world.start_shooting(hunter, victim.to_bits());
    run(&mut world, 1.0);

    // One hit killed the victim; it lingers dead until its delay elapses
    let corpse = world.agents.get(victim).unwrap();
    assert!(corpse.is_dead());
    assert!(corpse.has_tag("dead"));

    // A dead agent cannot pull the trigger
    world.start_shooting(victim, hunter.to_bits());
    run(&mut world, 0.5);
    let victim_fired = world
        .projectiles
        .iter()
        .any(|(_, p)| p.owner == victim.to_bits());
    assert!(!victim_fired, "dead agents must not fire");
}
