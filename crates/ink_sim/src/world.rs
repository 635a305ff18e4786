//! The simulation world
//!
//! Single-threaded cooperative scheduling: one tick thread advances the
//! clock, steps projectiles, drains the timer queue, and dispatches
//! perception events synchronously. Deferred callbacks reach their owners
//! through generational handles, so a callback against a destroyed agent or
//! projectile quietly does nothing.

use crate::events::{NoiseEvent, SimEvent};
use ink_ai::{FocusController, Observer, PerceptionArbitrator, PerceptionConfig, Stimulus, TargetState};
use ink_combat::{
    resolve_impact, Agent, AimProfile, FireOutcome, FireScheduler, ImpactRecord, PaintManager,
    PaintRegistry, Projectile, ProjectilePhase, ProjectileSpawn, Weapon, WeaponConfig, WeaponTimer,
};
use ink_core::{Handle, HandleMap, Team, TimerId, TimerQueue};
use ink_math::Vec3;
use ink_physics::{ColliderDesc, CollisionScene, Mobility, RaycastOptions};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use std::collections::HashMap;

/// Kills-taken tally per team
#[derive(Debug, Default)]
pub struct Scoreboard {
    totals: HashMap<Team, u32>,
}

impl Scoreboard {
    /// Record that an agent of `team` fell
    pub fn record_fall(&mut self, team: Team) {
        *self.totals.entry(team).or_insert(0) += 1;
    }

    /// Falls recorded against a team
    pub fn falls(&self, team: Team) -> u32 {
        self.totals.get(&team).copied().unwrap_or(0)
    }
}

/// Per-agent AI controller state
#[derive(Default)]
struct AiController {
    focus: FocusController,
    arbitrator: Option<PerceptionArbitrator>,
}

/// Descriptor for spawning an agent
#[derive(Clone, Debug)]
pub struct AgentDesc {
    /// Root (feet) position
    pub position: Vec3,
    /// Facing direction
    pub forward: Vec3,
    /// Team affiliation
    pub team: Team,
    /// Hit points
    pub hp: f32,
    /// Gameplay tag carried for perception
    pub tag: String,
    /// Collider half-extents; the collider is centered above the root
    pub half_extents: Vec3,
    /// Eye height above the root
    pub eye_height: f32,
    /// Aim tuning
    pub aim: AimProfile,
    /// Weapon spawned into the agent's hands, if any
    pub weapon: Option<WeaponConfig>,
    /// Delay between death and destruction
    pub destruction_delay: f32,
}

impl Default for AgentDesc {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            forward: Vec3::X,
            team: Team::Unaffiliated,
            hp: 100.0,
            tag: "combatant".to_string(),
            half_extents: Vec3::new(0.4, 0.4, 0.9),
            eye_height: 1.6,
            aim: AimProfile::default(),
            weapon: None,
            destruction_delay: 5.0,
        }
    }
}

impl AgentDesc {
    /// Create a descriptor at a position
    pub fn new(position: Vec3, team: Team) -> Self {
        Self {
            position,
            team,
            ..Self::default()
        }
    }

    /// Set the facing direction
    pub fn with_forward(mut self, forward: Vec3) -> Self {
        self.forward = forward;
        self
    }

    /// Set hit points
    pub fn with_hp(mut self, hp: f32) -> Self {
        self.hp = hp;
        self
    }

    /// Set the weapon
    pub fn with_weapon(mut self, weapon: WeaponConfig) -> Self {
        self.weapon = Some(weapon);
        self
    }

    /// Set the aim profile
    pub fn with_aim(mut self, aim: AimProfile) -> Self {
        self.aim = aim;
        self
    }

    /// Set the destruction delay
    pub fn with_destruction_delay(mut self, delay: f32) -> Self {
        self.destruction_delay = delay;
        self
    }
}

enum WeaponAction {
    Start,
    Stop,
    Refire,
    Cooldown,
    Teardown,
}

struct WeaponSched<'a> {
    timers: &'a mut TimerQueue<SimEvent>,
    weapon: Handle<Weapon>,
    now: f64,
}

impl FireScheduler for WeaponSched<'_> {
    fn schedule(&mut self, delay: f32, timer: WeaponTimer) -> TimerId {
        let event = match timer {
            WeaponTimer::Refire => SimEvent::WeaponRefire(self.weapon),
            WeaponTimer::CooldownExpired => SimEvent::WeaponCooldown(self.weapon),
        };
        self.timers.schedule(self.now + delay as f64, event)
    }

    fn cancel(&mut self, id: TimerId) {
        self.timers.cancel(id);
    }
}

/// AI weapon holder: supplies the aim point, ignores cosmetic feedback
struct AgentHolderCtx<'a> {
    eye: Vec3,
    forward: Vec3,
    aim: AimProfile,
    exclude: Vec<ink_physics::ColliderId>,
    target_position: Option<Vec3>,
    scene: &'a CollisionScene,
    rng: ChaCha8Rng,
}

impl ink_combat::WeaponHolder for AgentHolderCtx<'_> {
    fn muzzle_point(&self) -> Vec3 {
        self.eye
    }

    fn resolve_aim_point(&mut self) -> Vec3 {
        ink_combat::resolve_aim_point(
            self.scene,
            self.eye,
            self.forward,
            self.target_position,
            &self.aim,
            &self.exclude,
            &mut self.rng,
        )
    }
}

/// The combat simulation world
pub struct SimWorld {
    time: f64,
    /// Collision backend
    pub scene: CollisionScene,
    /// Live agents
    pub agents: HandleMap<Agent>,
    /// Live weapons
    pub weapons: HandleMap<Weapon>,
    /// Live projectiles
    pub projectiles: HandleMap<Projectile>,
    /// Paint stamping service, injected into the impact path
    pub paint: PaintManager,
    /// Paintable surfaces by collider
    pub surfaces: PaintRegistry,
    /// Kills-taken tally
    pub scoreboard: Scoreboard,
    timers: TimerQueue<SimEvent>,
    controllers: HashMap<u64, AiController>,
    rng: ChaCha8Rng,
}

impl SimWorld {
    /// Create a world with a seeded RNG
    pub fn new(seed: u64) -> Self {
        Self {
            time: 0.0,
            scene: CollisionScene::new(),
            agents: HandleMap::new(),
            weapons: HandleMap::new(),
            projectiles: HandleMap::new(),
            paint: PaintManager::new(8.0),
            surfaces: PaintRegistry::new(),
            scoreboard: Scoreboard::default(),
            timers: TimerQueue::new(),
            controllers: HashMap::new(),
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    /// Current simulation time in seconds
    pub fn time(&self) -> f64 {
        self.time
    }

    /// Spawn an agent with its collider, controller, and weapon
    pub fn spawn_agent(&mut self, desc: AgentDesc) -> Handle<Agent> {
        let agent = Agent::new(desc.position, desc.team)
            .with_hp(desc.hp)
            .with_forward(desc.forward)
            .with_tag(desc.tag)
            .with_aim(desc.aim.clone());
        let handle = self.agents.insert(agent);
        let bits = handle.to_bits();

        let collider = self.scene.add(
            ColliderDesc::from_center_half_extents(
                desc.position + Vec3::new(0.0, 0.0, desc.half_extents.z),
                desc.half_extents,
            )
            .with_mobility(Mobility::Movable)
            .with_user_data(bits),
        );

        if let Some(agent) = self.agents.get_mut(handle) {
            agent.collider = Some(collider);
            agent.eye_height = desc.eye_height;
            agent.deferred_destruction_delay = desc.destruction_delay;
        }
        self.controllers.insert(bits, AiController::default());

        if let Some(config) = desc.weapon {
            self.give_weapon(handle, config);
        }

        handle
    }

    /// Move an agent, keeping its collider in sync
    pub fn move_agent(&mut self, handle: Handle<Agent>, position: Vec3) {
        let Some(agent) = self.agents.get_mut(handle) else {
            return;
        };
        agent.position = position;
        if let Some(id) = agent.collider {
            if let Some(collider) = self.scene.get_mut(id) {
                let half = collider.aabb.half_extents();
                collider.aabb = ink_math::Aabb::from_center_half_extents(
                    position + Vec3::new(0.0, 0.0, half.z),
                    half,
                );
            }
        }
    }

    /// Build the observer pose of an agent
    pub fn observer(&self, handle: Handle<Agent>) -> Option<Observer> {
        let agent = self.agents.get(handle)?;
        Some(Observer {
            position: agent.position,
            eye: agent.eye(),
            forward: agent.forward,
            collider: agent.collider,
        })
    }

    // ---- perception routing -------------------------------------------------

    /// Bind an arbitrator to an agent for the lifetime of its sensing state
    pub fn bind_sense(&mut self, handle: Handle<Agent>, config: PerceptionConfig) {
        if !self.agents.contains(handle) {
            return;
        }
        if let Some(controller) = self.controllers.get_mut(&handle.to_bits()) {
            controller.arbitrator = Some(PerceptionArbitrator::new(config));
        }
    }

    /// Unbind the arbitrator; must mirror every bind
    pub fn unbind_sense(&mut self, handle: Handle<Agent>) {
        if let Some(controller) = self.controllers.get_mut(&handle.to_bits()) {
            controller.arbitrator = None;
        }
    }

    /// Whether an agent currently has a bound arbitrator
    pub fn is_sensing(&self, handle: Handle<Agent>) -> bool {
        self.controllers
            .get(&handle.to_bits())
            .map_or(false, |c| c.arbitrator.is_some())
    }

    /// Target state of an agent's arbitrator
    pub fn sense_state(&self, handle: Handle<Agent>) -> Option<&TargetState> {
        self.controllers
            .get(&handle.to_bits())?
            .arbitrator
            .as_ref()
            .map(|a| a.state())
    }

    /// Focus of an agent
    pub fn focus(&self, handle: Handle<Agent>) -> Option<&FocusController> {
        self.controllers.get(&handle.to_bits()).map(|c| &c.focus)
    }

    /// Mutable focus of an agent
    pub fn focus_mut(&mut self, handle: Handle<Agent>) -> Option<&mut FocusController> {
        self.controllers
            .get_mut(&handle.to_bits())
            .map(|c| &mut c.focus)
    }

    /// Snapshot a stimulus from a live agent
    pub fn agent_stimulus(&self, source: Handle<Agent>, strength: f32) -> Option<Stimulus> {
        let agent = self.agents.get(source)?;
        Some(Stimulus {
            source: source.to_bits(),
            source_position: agent.position,
            source_collider: agent.collider,
            location: agent.position,
            strength,
            tag: agent.tags.first().cloned().unwrap_or_default(),
        })
    }

    /// Deliver a stimulus update to one sensing agent
    ///
    /// The generation check happens here: a stale sensing handle drops the
    /// binding instead of mutating a disowned state.
    pub fn notify_stimulus(&mut self, sensing: Handle<Agent>, stimulus: &Stimulus) {
        let bits = sensing.to_bits();
        let Some(observer) = self.observer(sensing) else {
            self.controllers.remove(&bits);
            return;
        };
        if let Some(controller) = self.controllers.get_mut(&bits) {
            if let Some(arbitrator) = controller.arbitrator.as_mut() {
                arbitrator.on_stimulus_updated(&self.scene, &observer, stimulus);
            }
        }
    }

    /// Deliver a stimulus-forgotten event to one sensing agent
    pub fn forget_stimulus(&mut self, sensing: Handle<Agent>, actor: u64) {
        let bits = sensing.to_bits();
        if !self.agents.contains(sensing) {
            self.controllers.remove(&bits);
            return;
        }
        if let Some(controller) = self.controllers.get_mut(&bits) {
            if let Some(arbitrator) = controller.arbitrator.as_mut() {
                arbitrator.on_stimulus_forgotten(actor, &mut controller.focus);
            }
        }
    }

    /// Fan a noise out to every sensing agent in range
    pub fn emit_noise(&mut self, noise: &NoiseEvent) {
        let source_handle: Handle<Agent> = Handle::from_bits(noise.source);
        let (source_position, source_collider) = self
            .agents
            .get(source_handle)
            .map(|a| (a.position, a.collider))
            .unwrap_or((noise.position, None));

        let mut deliveries = Vec::new();
        for (&bits, controller) in &self.controllers {
            if bits == noise.source || controller.arbitrator.is_none() {
                continue;
            }
            let handle: Handle<Agent> = Handle::from_bits(bits);
            let Some(listener) = self.agents.get(handle) else {
                continue;
            };
            if listener.is_dead() || listener.position.distance(noise.position) > noise.range {
                continue;
            }
            deliveries.push(handle);
        }

        for handle in deliveries {
            let stimulus = Stimulus {
                source: noise.source,
                source_position,
                source_collider,
                location: noise.position,
                strength: noise.loudness,
                tag: noise.tag.clone(),
            };
            self.notify_stimulus(handle, &stimulus);
        }
    }

    // ---- weapons ------------------------------------------------------------

    /// Hand an agent a new weapon; the first weapon becomes active
    pub fn give_weapon(&mut self, handle: Handle<Agent>, config: WeaponConfig) -> Option<Handle<Weapon>> {
        let agent = self.agents.get(handle)?;
        let weapon = Weapon::new(config, handle.to_bits(), agent.team);
        let weapon_handle = self.weapons.insert(weapon);

        let make_active = agent.active_weapon.is_none();
        if let Some(agent) = self.agents.get_mut(handle) {
            agent.weapons.push(weapon_handle);
        }
        if make_active {
            self.switch_weapon(handle, weapon_handle);
        }
        Some(weapon_handle)
    }

    /// Swap the agent's active weapon for another one it owns
    ///
    /// The outgoing weapon stops firing as part of deactivation.
    pub fn switch_weapon(&mut self, handle: Handle<Agent>, weapon: Handle<Weapon>) {
        let Some(agent) = self.agents.get(handle) else {
            return;
        };
        if !agent.weapons.contains(&weapon) || agent.active_weapon == Some(weapon) {
            return;
        }
        let previous = agent.active_weapon;
        let eye = agent.eye();
        let forward = agent.forward;
        let aim = agent.aim.clone();
        let mut exclude = Vec::new();
        if let Some(id) = agent.collider {
            exclude.push(id);
        }
        let seed = self.rng.gen::<u64>();
        let mut holder = AgentHolderCtx {
            eye,
            forward,
            aim,
            exclude,
            target_position: None,
            scene: &self.scene,
            rng: ChaCha8Rng::seed_from_u64(seed),
        };

        if let Some(previous) = previous {
            let mut sched = WeaponSched {
                timers: &mut self.timers,
                weapon: previous,
                now: self.time,
            };
            if let Some(w) = self.weapons.get_mut(previous) {
                w.deactivate(&mut sched, &mut holder);
            }
        }
        if let Some(w) = self.weapons.get_mut(weapon) {
            w.activate(&mut holder);
        }
        if let Some(agent) = self.agents.get_mut(handle) {
            agent.active_weapon = Some(weapon);
        }
    }

    // ---- shooting -----------------------------------------------------------

    /// Aim at an actor and hold the trigger
    pub fn start_shooting(&mut self, handle: Handle<Agent>, target: u64) {
        let Some(agent) = self.agents.get_mut(handle) else {
            return;
        };
        if agent.is_dead() {
            return;
        }
        agent.current_aim_target = Some(target);
        agent.is_shooting = true;
        let weapon = agent.active_weapon;
        if let Some(weapon) = weapon {
            self.weapon_action(weapon, WeaponAction::Start);
        }
    }

    /// Release the trigger and drop the aim target
    pub fn stop_shooting(&mut self, handle: Handle<Agent>) {
        let Some(agent) = self.agents.get_mut(handle) else {
            return;
        };
        agent.current_aim_target = None;
        agent.is_shooting = false;
        let weapon = agent.active_weapon;
        if let Some(weapon) = weapon {
            self.weapon_action(weapon, WeaponAction::Stop);
        }
    }

    fn weapon_action(&mut self, weapon_handle: Handle<Weapon>, action: WeaponAction) {
        let Some(weapon) = self.weapons.get(weapon_handle) else {
            return;
        };
        let owner_bits = weapon.owner;
        let noise = weapon.config.noise.clone();

        // Stop and teardown only need the scheduler.
        if matches!(action, WeaponAction::Stop | WeaponAction::Teardown) {
            let mut sched = WeaponSched {
                timers: &mut self.timers,
                weapon: weapon_handle,
                now: self.time,
            };
            if let Some(weapon) = self.weapons.get_mut(weapon_handle) {
                match action {
                    WeaponAction::Stop => weapon.stop_firing(&mut sched),
                    _ => weapon.teardown(&mut sched),
                }
            }
            return;
        }

        let owner_handle: Handle<Agent> = Handle::from_bits(owner_bits);
        let Some(owner) = self.agents.get(owner_handle) else {
            // Owner gone; cancel whatever cadence was left behind.
            let mut sched = WeaponSched {
                timers: &mut self.timers,
                weapon: weapon_handle,
                now: self.time,
            };
            if let Some(weapon) = self.weapons.get_mut(weapon_handle) {
                weapon.teardown(&mut sched);
            }
            return;
        };
        if owner.is_dead() {
            return;
        }

        let eye = owner.eye();
        let forward = owner.forward;
        let aim = owner.aim.clone();
        let is_shooting = owner.is_shooting;
        let position = owner.position;
        let mut exclude = Vec::new();
        if let Some(id) = owner.collider {
            exclude.push(id);
        }
        let target_position = owner.current_aim_target.and_then(|bits| {
            let target: Handle<Agent> = Handle::from_bits(bits);
            self.agents
                .get(target)
                .map(|t| t.position + Vec3::new(0.0, 0.0, t.eye_height * 0.5))
        });

        let holder_seed = self.rng.gen::<u64>();
        let fire_seed = self.rng.gen::<u64>();
        let mut holder = AgentHolderCtx {
            eye,
            forward,
            aim,
            exclude,
            target_position,
            scene: &self.scene,
            rng: ChaCha8Rng::seed_from_u64(holder_seed),
        };
        let mut sched = WeaponSched {
            timers: &mut self.timers,
            weapon: weapon_handle,
            now: self.time,
        };
        let mut fire_rng = ChaCha8Rng::seed_from_u64(fire_seed);

        let Some(weapon) = self.weapons.get_mut(weapon_handle) else {
            return;
        };
        let outcome = match action {
            WeaponAction::Start => {
                weapon.start_firing(self.time, &mut sched, &mut holder, &mut fire_rng)
            }
            WeaponAction::Refire => {
                weapon.on_refire(self.time, &mut sched, &mut holder, &mut fire_rng)
            }
            WeaponAction::Cooldown => {
                weapon.on_cooldown_expired(&mut holder);
                // A holder still holding the trigger pulls again as soon as
                // the cooldown permits it.
                if is_shooting {
                    self.weapon_action(weapon_handle, WeaponAction::Start);
                }
                return;
            }
            WeaponAction::Stop | WeaponAction::Teardown => unreachable!(),
        };

        if outcome.shot_attempted() {
            self.emit_noise(&NoiseEvent {
                source: owner_bits,
                position,
                loudness: noise.loudness,
                range: noise.range,
                tag: noise.tag,
            });
        }
        if let FireOutcome::Fired(spawn) = outcome {
            self.spawn_projectile(spawn);
        }
    }

    /// Spawn a projectile produced by a weapon
    pub fn spawn_projectile(&mut self, spawn: ProjectileSpawn) -> Handle<Projectile> {
        let owner_handle: Handle<Agent> = Handle::from_bits(spawn.owner);
        let owner_collider = self.agents.get(owner_handle).and_then(|a| a.collider);
        self.projectiles.insert(Projectile::new(
            spawn.origin,
            spawn.velocity,
            spawn.config,
            spawn.owner,
            owner_collider,
            spawn.team,
        ))
    }

    // ---- tick ---------------------------------------------------------------

    /// Advance the simulation by one step
    pub fn tick(&mut self, dt: f32) {
        self.time += dt as f64;
        self.update_focus();
        self.step_projectiles(dt);
        while let Some((_, event)) = self.timers.pop_due(self.time) {
            self.dispatch(event);
        }
    }

    fn dispatch(&mut self, event: SimEvent) {
        match event {
            SimEvent::WeaponRefire(weapon) => self.weapon_action(weapon, WeaponAction::Refire),
            SimEvent::WeaponCooldown(weapon) => self.weapon_action(weapon, WeaponAction::Cooldown),
            SimEvent::DestroyProjectile(projectile) => {
                if let Some(p) = self.projectiles.get_mut(projectile) {
                    p.destruction_timer = None;
                    p.mark_destroyed();
                }
                self.projectiles.remove(projectile);
            }
            SimEvent::DestroyAgent(agent) => self.destroy_agent(agent),
        }
    }

    /// Turn agents toward their focal points
    fn update_focus(&mut self) {
        let mut turns = Vec::new();
        for (&bits, controller) in &self.controllers {
            let handle: Handle<Agent> = Handle::from_bits(bits);
            let Some(agent) = self.agents.get(handle) else {
                continue;
            };
            let point = controller.focus.focal_point(|actor| {
                self.agents
                    .get(Handle::<Agent>::from_bits(actor))
                    .map(|a| a.position)
            });
            if let Some(point) = point {
                let dir = (point - agent.position).normalize_or_zero();
                if dir != Vec3::ZERO {
                    turns.push((handle, dir));
                }
            }
        }
        for (handle, dir) in turns {
            if let Some(agent) = self.agents.get_mut(handle) {
                agent.forward = dir;
            }
        }
    }

    fn step_projectiles(&mut self, dt: f32) {
        for handle in self.projectiles.handles() {
            let Some(projectile) = self.projectiles.get_mut(handle) else {
                continue;
            };
            match projectile.phase() {
                ProjectilePhase::InFlight => {
                    let from = projectile.position;
                    projectile.integrate(dt);
                    let to = projectile.position;
                    let travel = to - from;
                    if travel.length() <= 1e-6 {
                        continue;
                    }

                    let mut exclude = Vec::new();
                    if let Some(id) = projectile.owner_collider {
                        exclude.push(id);
                    }
                    let options = RaycastOptions::default()
                        .with_max_distance(travel.length())
                        .exclude_all(&exclude);
                    let Some(hit) = self.scene.raycast(from, travel, &options) else {
                        continue;
                    };

                    let Some((user_data, mobility, simulates)) = self
                        .scene
                        .get(hit.collider)
                        .map(|c| (c.user_data, c.mobility, c.simulates_physics))
                    else {
                        continue;
                    };
                    let record = ImpactRecord {
                        collider: hit.collider,
                        actor: (user_data != 0).then_some(user_data),
                        point: hit.point,
                        normal: hit.normal,
                        mobility,
                        simulates_physics: simulates,
                    };

                    projectile.position = hit.point;
                    let noise = NoiseEvent {
                        source: projectile.owner,
                        position: hit.point,
                        loudness: projectile.config.noise.loudness,
                        range: projectile.config.noise.range,
                        tag: projectile.config.noise.tag.clone(),
                    };
                    let outcome = resolve_impact(
                        projectile,
                        &record,
                        &mut self.scene,
                        &mut self.agents,
                        &self.paint,
                        &mut self.surfaces,
                    );
                    if !outcome.resolved {
                        continue;
                    }

                    if outcome.destruction_delay > 0.0 {
                        let id = self.timers.schedule(
                            self.time + outcome.destruction_delay as f64,
                            SimEvent::DestroyProjectile(handle),
                        );
                        projectile.destruction_timer = Some(id);
                    } else {
                        projectile.mark_destroyed();
                    }

                    for fallen in &outcome.killed {
                        self.on_agent_killed(Handle::from_bits(*fallen));
                    }
                    self.emit_noise(&noise);
                }
                ProjectilePhase::PendingDestruction if projectile.simulating => {
                    // Physics hand-off: keeps falling with collision disabled
                    projectile.integrate(dt);
                }
                ProjectilePhase::Destroyed => {
                    if let Some(p) = self.projectiles.remove(handle) {
                        if let Some(id) = p.destruction_timer {
                            self.timers.cancel(id);
                        }
                    }
                }
                _ => {}
            }
        }
    }

    fn on_agent_killed(&mut self, handle: Handle<Agent>) {
        let Some(agent) = self.agents.get_mut(handle) else {
            return;
        };
        let team = agent.team;
        let collider = agent.collider;
        let weapons = agent.weapons.clone();
        let delay = agent.deferred_destruction_delay;

        log::info!("agent {:#x} fell", handle.to_bits());
        self.scoreboard.record_fall(team);
        if let Some(id) = collider {
            self.scene.set_enabled(id, false);
        }
        for weapon in weapons {
            self.weapon_action(weapon, WeaponAction::Teardown);
        }

        if let Some(agent) = self.agents.get_mut(handle) {
            if let Some(id) = agent.destruction_timer.take() {
                self.timers.cancel(id);
            }
        }
        if delay > 0.0 {
            let id = self
                .timers
                .schedule(self.time + delay as f64, SimEvent::DestroyAgent(handle));
            if let Some(agent) = self.agents.get_mut(handle) {
                agent.destruction_timer = Some(id);
            }
        } else {
            self.destroy_agent(handle);
        }
    }

    /// Tear an agent down: weapons, collider, controller, timers
    pub fn destroy_agent(&mut self, handle: Handle<Agent>) {
        let Some(agent) = self.agents.remove(handle) else {
            return;
        };
        if let Some(id) = agent.destruction_timer {
            self.timers.cancel(id);
        }
        for weapon in &agent.weapons {
            let mut sched = WeaponSched {
                timers: &mut self.timers,
                weapon: *weapon,
                now: self.time,
            };
            if let Some(w) = self.weapons.get_mut(*weapon) {
                w.teardown(&mut sched);
            }
            self.weapons.remove(*weapon);
        }
        if let Some(id) = agent.collider {
            self.surfaces.remove(id);
            self.scene.remove(id);
        }
        self.controllers.remove(&handle.to_bits());
    }
}
