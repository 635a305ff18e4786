//! Projectiles and impact resolution
//!
//! A projectile resolves exactly one qualifying collision in its lifetime:
//! InFlight -> Resolved -> PendingDestruction -> Destroyed. Resolution
//! applies damage and impulse, classifies the struck surface's mobility to
//! pick attach-vs-physics behavior, and optionally stamps a team-colored
//! mark through a contact probe. Every marking failure degrades to "no
//! mark"; nothing in this path can fail the projectile itself.

use crate::agent::Agent;
use crate::damage::DamageInfo;
use crate::paint::{PaintManager, PaintRegistry};
use crate::weapon::NoiseConfig;
use ink_core::{Handle, HandleMap, Team, TimerId};
use ink_math::Vec3;
use ink_physics::{surface, ColliderId, CollisionScene, Mobility};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Gravity acceleration, world units per second squared
const GRAVITY: f32 = 9.81;

/// Bias of the surface-mark contact probe along the contact normal
pub const CONTACT_PROBE_BIAS: f32 = 0.25;

/// Projectile tuning
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ProjectileConfig {
    /// Launch speed
    pub speed: f32,
    /// Gravity multiplier
    pub gravity_scale: f32,
    /// Exponential horizontal deceleration rate per second
    pub horizontal_deceleration: f32,
    /// Damage on hit
    pub damage: f32,
    /// Whether the owner can be damaged by its own projectile
    pub damage_owner: bool,
    /// Impulse magnitude applied to physics-simulating bodies
    pub physics_impulse: f32,
    /// Explode on hit, damaging everything in the radius
    pub explode_on_hit: bool,
    /// Explosion radius
    pub explosion_radius: f32,
    /// Seconds between resolution and destruction; zero destroys immediately
    pub deferred_destruction: f32,
    /// Brush diameter of the paint stamp; non-positive uses the manager default
    pub brush_size: f32,
    /// Noise emitted on impact
    pub noise: NoiseConfig,
}

impl Default for ProjectileConfig {
    fn default() -> Self {
        Self {
            speed: 50.0,
            gravity_scale: 0.8,
            horizontal_deceleration: 3.0,
            damage: 25.0,
            damage_owner: false,
            physics_impulse: 100.0,
            explode_on_hit: false,
            explosion_radius: 5.0,
            deferred_destruction: 5.0,
            brush_size: 0.0,
            noise: NoiseConfig {
                loudness: 3.0,
                range: 30.0,
                tag: "impact".to_string(),
            },
        }
    }
}

/// Projectile lifecycle phase
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ProjectilePhase {
    /// Flying, collisions are live
    InFlight,
    /// First qualifying collision is being resolved
    Resolved,
    /// Waiting for the destruction timer
    PendingDestruction,
    /// Gone; kept only until the world sweeps it
    Destroyed,
}

/// A live projectile
#[derive(Debug)]
pub struct Projectile {
    /// Current position
    pub position: Vec3,
    /// Current velocity
    pub velocity: Vec3,
    /// Tuning
    pub config: ProjectileConfig,
    /// Owner/instigator actor id
    pub owner: u64,
    /// The owner's collider, excluded from flight collision
    pub owner_collider: Option<ColliderId>,
    /// Team tag
    pub team: Team,
    /// Surface this projectile attached to, if any
    pub attached_to: Option<ColliderId>,
    /// Whether the projectile was handed over to physics simulation
    pub simulating: bool,
    /// Pending destruction timer, canceled on scope teardown
    pub destruction_timer: Option<TimerId>,
    phase: ProjectilePhase,
}

impl Projectile {
    /// Create a projectile in flight
    pub fn new(
        position: Vec3,
        velocity: Vec3,
        config: ProjectileConfig,
        owner: u64,
        owner_collider: Option<ColliderId>,
        team: Team,
    ) -> Self {
        Self {
            position,
            velocity,
            config,
            owner,
            owner_collider,
            team,
            attached_to: None,
            simulating: false,
            destruction_timer: None,
            phase: ProjectilePhase::InFlight,
        }
    }

    /// Current lifecycle phase
    pub fn phase(&self) -> ProjectilePhase {
        self.phase
    }

    /// Whether the one qualifying collision already happened
    pub fn hit_resolved(&self) -> bool {
        self.phase != ProjectilePhase::InFlight
    }

    /// Mark destroyed; the world sweeps destroyed projectiles
    pub fn mark_destroyed(&mut self) {
        self.phase = ProjectilePhase::Destroyed;
    }

    /// Advance velocity and position by one step
    ///
    /// Gravity pulls down scaled by the gravity factor; the horizontal
    /// velocity decays exponentially.
    pub fn integrate(&mut self, dt: f32) {
        self.velocity.z -= GRAVITY * self.config.gravity_scale * dt;

        let horizontal = self.velocity.horizontal();
        let speed = horizontal.length();
        if speed > 1e-5 {
            let decayed = speed * (-self.config.horizontal_deceleration * dt).exp();
            let scaled = horizontal * (decayed / speed);
            self.velocity = Vec3::new(scaled.x, scaled.y, self.velocity.z);
        }

        self.position += self.velocity * dt;
    }
}

/// Why a surface mark was skipped
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum MarkError {
    /// The contact probe could not resolve a face or UV
    #[error("no face or UV resolvable at the contact probe")]
    GeometryQuery,
    /// The struck actor has no paintable surface
    #[error("struck surface is not paintable")]
    SurfaceMissing,
    /// The projectile's team has no paint channel
    #[error("projectile team has no paint channel")]
    ChannelMissing,
}

/// Snapshot of one collision, consumed within a single resolution pass
#[derive(Clone, Copy, Debug)]
pub struct ImpactRecord {
    /// The struck collider
    pub collider: ColliderId,
    /// Actor owning the struck collider, if any
    pub actor: Option<u64>,
    /// Contact point
    pub point: Vec3,
    /// Outward contact normal
    pub normal: Vec3,
    /// Mobility class of the struck surface
    pub mobility: Mobility,
    /// Whether the struck body simulates physics
    pub simulates_physics: bool,
}

/// Everything a resolution pass did
#[derive(Clone, Debug, Default)]
pub struct ImpactOutcome {
    /// Whether this collision was the qualifying one
    pub resolved: bool,
    /// Actors damaged, with the amount dealt
    pub damaged: Vec<(u64, f32)>,
    /// Actors killed by this impact
    pub killed: Vec<u64>,
    /// Projectile attached to a static surface
    pub attached: bool,
    /// Projectile handed over to physics
    pub physics_handoff: bool,
    /// A paint mark was applied
    pub marked: bool,
    /// Delay before the projectile is destroyed
    pub destruction_delay: f32,
}

/// Resolve a projectile's collision
///
/// A collision with the projectile's owner does not qualify unless
/// self-damage is enabled - the projectile keeps flying. The first
/// qualifying collision resolves exactly once; later calls are no-ops.
pub fn resolve_impact(
    projectile: &mut Projectile,
    hit: &ImpactRecord,
    scene: &mut CollisionScene,
    agents: &mut HandleMap<Agent>,
    paint: &PaintManager,
    surfaces: &mut PaintRegistry,
) -> ImpactOutcome {
    let mut outcome = ImpactOutcome::default();

    if projectile.hit_resolved() {
        return outcome;
    }
    if hit.actor == Some(projectile.owner) && !projectile.config.damage_owner {
        return outcome;
    }

    projectile.phase = ProjectilePhase::Resolved;
    outcome.resolved = true;
    let pre_impact_velocity = projectile.velocity;

    if projectile.config.explode_on_hit {
        explosion_sweep(projectile, hit.point, scene, agents, &mut outcome);
    } else {
        if let Some(actor) = hit.actor {
            if actor != projectile.owner || projectile.config.damage_owner {
                damage_actor(projectile, actor, hit.point, hit.normal, agents, &mut outcome);
            }
        }
        if hit.simulates_physics {
            scene.apply_impulse(
                hit.collider,
                pre_impact_velocity.normalize_or_zero() * projectile.config.physics_impulse,
            );
        }
    }

    match hit.mobility {
        Mobility::Static => {
            // Attach at the contact transform and halt; re-attaching an
            // already-attached projectile is a no-op.
            if projectile.attached_to.is_none() {
                projectile.attached_to = Some(hit.collider);
            }
            projectile.position = hit.point;
            projectile.velocity = Vec3::ZERO;
            outcome.attached = true;
        }
        Mobility::Stationary | Mobility::Movable => {
            projectile.simulating = true;
            projectile.velocity = pre_impact_velocity * 0.5;
            outcome.physics_handoff = true;
        }
    }

    match mark_surface(projectile, hit, scene, paint, surfaces) {
        Ok(()) => outcome.marked = true,
        Err(MarkError::GeometryQuery) => {
            log::debug!("surface mark skipped: no face/UV at contact probe")
        }
        Err(err) => log::warn!("surface mark skipped: {err}"),
    }

    projectile.phase = ProjectilePhase::PendingDestruction;
    outcome.destruction_delay = projectile.config.deferred_destruction;
    outcome
}

fn damage_actor(
    projectile: &Projectile,
    actor: u64,
    point: Vec3,
    normal: Vec3,
    agents: &mut HandleMap<Agent>,
    outcome: &mut ImpactOutcome,
) {
    let handle = Handle::<Agent>::from_bits(actor);
    let Some(agent) = agents.get_mut(handle) else {
        return;
    };
    let damage = DamageInfo::new(projectile.config.damage)
        .with_source(projectile.owner)
        .with_hit_point(point)
        .with_hit_normal(normal);
    let result = agent.take_damage(&damage);
    if result.dealt > 0.0 {
        outcome.damaged.push((actor, result.dealt));
    }
    if result.died {
        outcome.killed.push(actor);
    }
}

fn explosion_sweep(
    projectile: &Projectile,
    center: Vec3,
    scene: &mut CollisionScene,
    agents: &mut HandleMap<Agent>,
    outcome: &mut ImpactOutcome,
) {
    let overlaps = scene.overlap_sphere(center, projectile.config.explosion_radius, &[]);

    // The overlap can return several colliders of the same actor; damage
    // each actor at most once.
    let mut seen_actors = Vec::new();
    for id in overlaps {
        let Some((actor_bits, body_center, simulates)) = scene
            .get(id)
            .map(|c| (c.user_data, c.aabb.center(), c.simulates_physics))
        else {
            continue;
        };

        let away = (body_center - center).normalize_or_zero();
        if simulates {
            scene.apply_impulse(id, away * projectile.config.physics_impulse);
        }

        if actor_bits == 0 || seen_actors.contains(&actor_bits) {
            continue;
        }
        seen_actors.push(actor_bits);
        if actor_bits == projectile.owner && !projectile.config.damage_owner {
            continue;
        }
        damage_actor(projectile, actor_bits, center, away, agents, outcome);
    }
}

fn mark_surface(
    projectile: &Projectile,
    hit: &ImpactRecord,
    scene: &CollisionScene,
    paint: &PaintManager,
    surfaces: &mut PaintRegistry,
) -> Result<(), MarkError> {
    let (collider, uv) = surface::resolve_contact_uv(scene, hit.point, hit.normal, CONTACT_PROBE_BIAS)
        .ok_or(MarkError::GeometryQuery)?;
    let target = surfaces.get_mut(collider).ok_or(MarkError::SurfaceMissing)?;
    if !paint.paint_at(target, uv, projectile.team, projectile.config.brush_size) {
        return Err(MarkError::ChannelMissing);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::paint::PaintSurface;
    use ink_physics::ColliderDesc;

    fn wall_scene() -> (CollisionScene, ColliderId) {
        let mut scene = CollisionScene::new();
        let wall = scene.add(ColliderDesc::from_center_half_extents(
            Vec3::new(10.0, 0.0, 0.0),
            Vec3::new(0.5, 4.0, 4.0),
        ));
        (scene, wall)
    }

    fn projectile_toward_wall() -> Projectile {
        Projectile::new(
            Vec3::ZERO,
            Vec3::X * 50.0,
            ProjectileConfig::default(),
            0xBEEF,
            None,
            Team::Red,
        )
    }

    fn record(collider: ColliderId, mobility: Mobility, simulates: bool) -> ImpactRecord {
        ImpactRecord {
            collider,
            actor: None,
            point: Vec3::new(9.5, 0.0, 0.0),
            normal: Vec3::NEG_X,
            mobility,
            simulates_physics: simulates,
        }
    }

    #[test]
    fn test_static_hit_attaches_and_halts() {
        let (mut scene, wall) = wall_scene();
        let mut agents = HandleMap::new();
        let paint = PaintManager::new(8.0);
        let mut surfaces = PaintRegistry::new();
        let mut proj = projectile_toward_wall();

        let outcome = resolve_impact(
            &mut proj,
            &record(wall, Mobility::Static, false),
            &mut scene,
            &mut agents,
            &paint,
            &mut surfaces,
        );

        assert!(outcome.resolved);
        assert!(outcome.attached);
        assert!(!outcome.physics_handoff);
        assert_eq!(proj.attached_to, Some(wall));
        assert_eq!(proj.velocity, Vec3::ZERO);
        assert_eq!(proj.position, Vec3::new(9.5, 0.0, 0.0));
        assert_eq!(proj.phase(), ProjectilePhase::PendingDestruction);
    }

    #[test]
    fn test_movable_hit_hands_over_to_physics() {
        let mut scene = CollisionScene::new();
        let crate_id = scene.add(
            ColliderDesc::from_center_half_extents(Vec3::new(10.0, 0.0, 0.0), Vec3::ONE)
                .with_mobility(Mobility::Movable)
                .with_simulated_physics(),
        );
        let mut agents = HandleMap::new();
        let paint = PaintManager::new(8.0);
        let mut surfaces = PaintRegistry::new();
        let mut proj = projectile_toward_wall();

        let outcome = resolve_impact(
            &mut proj,
            &record(crate_id, Mobility::Movable, true),
            &mut scene,
            &mut agents,
            &paint,
            &mut surfaces,
        );

        assert!(outcome.resolved);
        assert!(outcome.physics_handoff);
        assert!(proj.simulating);
        // Half the pre-impact speed is carried over
        assert_eq!(proj.velocity, Vec3::X * 25.0);
        // The struck body took an impulse
        let body = scene.get(crate_id).unwrap();
        assert!(body.accumulated_impulse.x > 0.0);
    }

    #[test]
    fn test_resolves_exactly_once() {
        let (mut scene, wall) = wall_scene();
        let mut agents = HandleMap::new();
        let paint = PaintManager::new(8.0);
        let mut surfaces = PaintRegistry::new();
        let mut proj = projectile_toward_wall();

        let first = resolve_impact(
            &mut proj,
            &record(wall, Mobility::Static, false),
            &mut scene,
            &mut agents,
            &paint,
            &mut surfaces,
        );
        let second = resolve_impact(
            &mut proj,
            &record(wall, Mobility::Static, false),
            &mut scene,
            &mut agents,
            &paint,
            &mut surfaces,
        );

        assert!(first.resolved);
        assert!(!second.resolved);
        assert_eq!(proj.attached_to, Some(wall));
    }

    #[test]
    fn test_owner_hit_does_not_qualify() {
        let (mut scene, wall) = wall_scene();
        let mut agents = HandleMap::new();
        let paint = PaintManager::new(8.0);
        let mut surfaces = PaintRegistry::new();
        let mut proj = projectile_toward_wall();

        let mut hit = record(wall, Mobility::Static, false);
        hit.actor = Some(proj.owner);
        let outcome = resolve_impact(&mut proj, &hit, &mut scene, &mut agents, &paint, &mut surfaces);

        assert!(!outcome.resolved);
        assert_eq!(proj.phase(), ProjectilePhase::InFlight);
    }

    #[test]
    fn test_damages_struck_agent() {
        let (mut scene, wall) = wall_scene();
        let mut agents = HandleMap::new();
        let victim = agents.insert(Agent::new(Vec3::new(9.0, 0.0, 0.0), Team::Blue).with_hp(30.0));
        let paint = PaintManager::new(8.0);
        let mut surfaces = PaintRegistry::new();
        let mut proj = projectile_toward_wall();

        let mut hit = record(wall, Mobility::Static, false);
        hit.actor = Some(victim.to_bits());
        let outcome = resolve_impact(&mut proj, &hit, &mut scene, &mut agents, &paint, &mut surfaces);

        assert_eq!(outcome.damaged, vec![(victim.to_bits(), 25.0)]);
        assert!(outcome.killed.is_empty());
        assert_eq!(agents.get(victim).unwrap().hp, 5.0);

        // A second projectile finishes the job
        let mut proj2 = projectile_toward_wall();
        let outcome = resolve_impact(&mut proj2, &hit, &mut scene, &mut agents, &paint, &mut surfaces);
        assert_eq!(outcome.killed, vec![victim.to_bits()]);
        assert!(agents.get(victim).unwrap().is_dead());
    }

    #[test]
    fn test_paint_mark_applied_and_degrades() {
        let (mut scene, wall) = wall_scene();
        let mut agents = HandleMap::new();
        let paint = PaintManager::new(8.0);
        let mut surfaces = PaintRegistry::new();

        // No surface registered: still resolves, no mark
        let mut dry = projectile_toward_wall();
        let outcome = resolve_impact(
            &mut dry,
            &record(wall, Mobility::Static, false),
            &mut scene,
            &mut agents,
            &paint,
            &mut surfaces,
        );
        assert!(outcome.resolved);
        assert!(!outcome.marked);

        // Paintable surface gets a team-colored stamp
        surfaces.register(wall, PaintSurface::new(64));
        let mut wet = projectile_toward_wall();
        let outcome = resolve_impact(
            &mut wet,
            &record(wall, Mobility::Static, false),
            &mut scene,
            &mut agents,
            &paint,
            &mut surfaces,
        );
        assert!(outcome.marked);
        assert!(surfaces.get(wall).unwrap().painted_count() > 0);
    }

    #[test]
    fn test_explosion_damages_each_actor_once() {
        let mut scene = CollisionScene::new();
        let mut agents = HandleMap::new();
        let victim = agents.insert(Agent::new(Vec3::new(10.0, 1.0, 0.0), Team::Blue).with_hp(100.0));

        // Two colliders belonging to the same actor inside the blast
        scene.add(
            ColliderDesc::from_center_half_extents(Vec3::new(10.0, 1.0, 0.0), Vec3::ONE)
                .with_user_data(victim.to_bits()),
        );
        scene.add(
            ColliderDesc::from_center_half_extents(Vec3::new(10.0, 1.0, 2.0), Vec3::ONE)
                .with_user_data(victim.to_bits()),
        );
        let ground = scene.add(ColliderDesc::from_center_half_extents(
            Vec3::new(10.0, 0.0, -2.0),
            Vec3::new(20.0, 20.0, 0.5),
        ));

        let paint = PaintManager::new(8.0);
        let mut surfaces = PaintRegistry::new();
        let mut proj = projectile_toward_wall();
        proj.config.explode_on_hit = true;
        proj.config.explosion_radius = 5.0;

        let hit = ImpactRecord {
            collider: ground,
            actor: None,
            point: Vec3::new(10.0, 0.0, -1.5),
            normal: Vec3::Z,
            mobility: Mobility::Static,
            simulates_physics: false,
        };
        let outcome = resolve_impact(&mut proj, &hit, &mut scene, &mut agents, &paint, &mut surfaces);

        assert_eq!(outcome.damaged.len(), 1);
        assert_eq!(agents.get(victim).unwrap().hp, 75.0);
    }

    #[test]
    fn test_integration_decays_horizontal_velocity() {
        let mut proj = projectile_toward_wall();
        proj.config.gravity_scale = 0.0;
        proj.config.horizontal_deceleration = 3.0;

        let before = proj.velocity.x;
        proj.integrate(0.1);
        let expected = before * (-0.3f32).exp();
        assert!((proj.velocity.x - expected).abs() < 1e-3);
        assert!(proj.position.x > 0.0);
    }

    #[test]
    fn test_integration_applies_gravity() {
        let mut proj = projectile_toward_wall();
        proj.config.gravity_scale = 1.0;
        proj.config.horizontal_deceleration = 0.0;

        proj.integrate(0.5);
        assert!(proj.velocity.z < 0.0);
    }
}
