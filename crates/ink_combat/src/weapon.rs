//! Fire-control state machine
//!
//! Per-weapon trigger and cadence logic. The weapon owns exactly one
//! pending timer at a time - either the next automatic shot or the
//! semi-automatic cooldown notification - and always cancels it before
//! scheduling a new one. Scheduling itself goes through the
//! [`FireScheduler`] seam so the world keeps ownership of the timer queue.
//!
//! Timing rule: a shot is legal when the time since the last shot has
//! reached the refire interval. Holding the trigger through a long pause
//! simply means the next shot fires with zero additional delay.

use crate::aim::random_unit_vector;
use crate::holder::WeaponHolder;
use crate::projectile::ProjectileConfig;
use ink_core::{Team, TimerId};
use ink_math::Vec3;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Noise emitted by a shot, fed back into perception
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct NoiseConfig {
    /// Stimulus strength at the source
    pub loudness: f32,
    /// Maximum distance the noise carries
    pub range: f32,
    /// Tag carried by the stimulus
    pub tag: String,
}

impl Default for NoiseConfig {
    fn default() -> Self {
        Self {
            loudness: 3.0,
            range: 30.0,
            tag: "combatant".to_string(),
        }
    }
}

/// Static weapon tuning
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct WeaponConfig {
    /// Rounds per magazine
    pub magazine_size: u32,
    /// Minimum seconds between shots
    pub refire_interval: f32,
    /// Keep firing while the trigger is held
    pub full_auto: bool,
    /// Distance from the muzzle to the spawn point
    pub muzzle_offset: f32,
    /// Positional jitter added to the aim point, world units
    pub aim_variance: f32,
    /// Recoil feedback per shot
    pub recoil: f32,
    /// Firing animation clip, if any
    pub firing_clip: Option<String>,
    /// Shot noise
    pub noise: NoiseConfig,
    /// Projectile tuning; a weapon without one cannot fire
    pub projectile: Option<ProjectileConfig>,
}

impl Default for WeaponConfig {
    fn default() -> Self {
        Self {
            magazine_size: 30,
            refire_interval: 0.2,
            full_auto: false,
            muzzle_offset: 0.4,
            aim_variance: 0.1,
            recoil: 1.0,
            firing_clip: None,
            noise: NoiseConfig::default(),
            projectile: Some(ProjectileConfig::default()),
        }
    }
}

impl WeaponConfig {
    /// Set magazine size
    pub fn with_magazine(mut self, size: u32) -> Self {
        self.magazine_size = size;
        self
    }

    /// Set the refire interval
    pub fn with_refire_interval(mut self, seconds: f32) -> Self {
        self.refire_interval = seconds;
        self
    }

    /// Make the weapon fully automatic
    pub fn full_auto(mut self) -> Self {
        self.full_auto = true;
        self
    }

    /// Set the projectile tuning
    pub fn with_projectile(mut self, projectile: ProjectileConfig) -> Self {
        self.projectile = Some(projectile);
        self
    }
}

/// Timer payloads a weapon schedules
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum WeaponTimer {
    /// Fire the next automatic shot
    Refire,
    /// Notify the holder that a new trigger pull is permitted
    CooldownExpired,
}

/// Scheduling seam between a weapon and the world's timer queue
pub trait FireScheduler {
    /// Schedule a weapon timer after `delay` seconds
    fn schedule(&mut self, delay: f32, timer: WeaponTimer) -> TimerId;
    /// Cancel a previously scheduled timer
    fn cancel(&mut self, id: TimerId);
}

/// Everything the world needs to spawn a projectile
#[derive(Clone, Debug)]
pub struct ProjectileSpawn {
    /// Spawn position
    pub origin: Vec3,
    /// Initial velocity
    pub velocity: Vec3,
    /// Projectile tuning
    pub config: ProjectileConfig,
    /// Owner/instigator actor id
    pub owner: u64,
    /// Team tag carried by the projectile
    pub team: Team,
}

/// Result of a trigger or timer event
#[derive(Clone, Debug)]
pub enum FireOutcome {
    /// A projectile spawn was produced
    Fired(ProjectileSpawn),
    /// Magazine was empty; it silently refilled and nothing fired
    Reloaded,
    /// Nothing fired now; the cadence timer (if any) will follow up
    Deferred,
    /// Trigger was released before the scheduled shot
    Released,
    /// No projectile configured; the shot fizzled
    Misconfigured,
}

impl FireOutcome {
    /// The spawn, if one was produced
    pub fn spawn(self) -> Option<ProjectileSpawn> {
        match self {
            FireOutcome::Fired(spawn) => Some(spawn),
            _ => None,
        }
    }

    /// Whether a shot actually happened (noise is emitted for these)
    pub fn shot_attempted(&self) -> bool {
        matches!(self, FireOutcome::Fired(_) | FireOutcome::Misconfigured)
    }
}

/// A weapon instance
#[derive(Debug)]
pub struct Weapon {
    /// Static tuning
    pub config: WeaponConfig,
    /// Owning actor id
    pub owner: u64,
    /// Team tag stamped onto projectiles
    pub team: Team,
    current_ammo: u32,
    is_firing: bool,
    time_of_last_shot: f64,
    pending_timer: Option<TimerId>,
    active: bool,
}

impl Weapon {
    /// Create a weapon with a full magazine
    pub fn new(config: WeaponConfig, owner: u64, team: Team) -> Self {
        let current_ammo = config.magazine_size;
        Self {
            config,
            owner,
            team,
            current_ammo,
            is_firing: false,
            time_of_last_shot: f64::NEG_INFINITY,
            pending_timer: None,
            active: false,
        }
    }

    /// Rounds left in the magazine
    pub fn current_ammo(&self) -> u32 {
        self.current_ammo
    }

    /// Whether the trigger is held
    pub fn is_firing(&self) -> bool {
        self.is_firing
    }

    /// Whether this weapon is the holder's active one
    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Whether a cadence timer is outstanding
    pub fn has_pending_timer(&self) -> bool {
        self.pending_timer.is_some()
    }

    /// Make this the active weapon
    pub fn activate(&mut self, holder: &mut dyn WeaponHolder) {
        self.active = true;
        holder.weapon_activated();
        holder.ammo_changed(self.current_ammo, self.config.magazine_size);
    }

    /// Put the weapon away; stops any firing in progress
    pub fn deactivate(&mut self, sched: &mut dyn FireScheduler, holder: &mut dyn WeaponHolder) {
        self.stop_firing(sched);
        self.active = false;
        holder.weapon_deactivated();
    }

    /// Trigger pressed
    ///
    /// Fires synchronously when the refire interval has already elapsed.
    /// Otherwise a full-automatic weapon schedules a single deferred shot
    /// for the remaining cooldown; a semi-automatic weapon waits for its
    /// cooldown notification and a new trigger pull.
    pub fn start_firing<R: Rng>(
        &mut self,
        now: f64,
        sched: &mut dyn FireScheduler,
        holder: &mut dyn WeaponHolder,
        rng: &mut R,
    ) -> FireOutcome {
        self.is_firing = true;

        let elapsed = now - self.time_of_last_shot;
        if elapsed >= self.config.refire_interval as f64 {
            return self.fire(now, sched, holder, rng);
        }

        if self.config.full_auto {
            let remaining = self.config.refire_interval - elapsed as f32;
            self.set_timer(sched, remaining, WeaponTimer::Refire);
        }
        FireOutcome::Deferred
    }

    /// Trigger released; cancels the pending cadence timer
    pub fn stop_firing(&mut self, sched: &mut dyn FireScheduler) {
        self.is_firing = false;
        self.clear_timer(sched);
    }

    /// Fire one shot
    ///
    /// No-op when the trigger was released before a scheduled shot. At zero
    /// ammo the magazine silently refills, the ammo observer is notified,
    /// and nothing fires - there is no reload state beyond this.
    pub fn fire<R: Rng>(
        &mut self,
        now: f64,
        sched: &mut dyn FireScheduler,
        holder: &mut dyn WeaponHolder,
        rng: &mut R,
    ) -> FireOutcome {
        if !self.is_firing {
            return FireOutcome::Released;
        }

        if self.current_ammo == 0 {
            self.current_ammo = self.config.magazine_size;
            holder.ammo_changed(self.current_ammo, self.config.magazine_size);
            return FireOutcome::Reloaded;
        }

        let outcome = match self.config.projectile.clone() {
            Some(projectile) => {
                let spawn = self.build_spawn(projectile, holder, rng);
                self.current_ammo -= 1;
                holder.ammo_changed(self.current_ammo, self.config.magazine_size);
                holder.recoil(self.config.recoil);
                if let Some(clip) = &self.config.firing_clip {
                    holder.fire_animation(clip);
                }
                FireOutcome::Fired(spawn)
            }
            None => {
                log::warn!("weapon of {:#x} has no projectile configured", self.owner);
                FireOutcome::Misconfigured
            }
        };

        self.time_of_last_shot = now;

        if self.config.full_auto {
            self.set_timer(sched, self.config.refire_interval, WeaponTimer::Refire);
        } else {
            self.set_timer(sched, self.config.refire_interval, WeaponTimer::CooldownExpired);
        }

        outcome
    }

    /// The scheduled automatic shot came due
    pub fn on_refire<R: Rng>(
        &mut self,
        now: f64,
        sched: &mut dyn FireScheduler,
        holder: &mut dyn WeaponHolder,
        rng: &mut R,
    ) -> FireOutcome {
        self.pending_timer = None;
        self.fire(now, sched, holder, rng)
    }

    /// The semi-automatic cooldown came due
    pub fn on_cooldown_expired(&mut self, holder: &mut dyn WeaponHolder) {
        self.pending_timer = None;
        holder.semi_auto_ready();
    }

    /// Cancel any pending cadence timer (owner teardown path)
    pub fn teardown(&mut self, sched: &mut dyn FireScheduler) {
        self.is_firing = false;
        self.clear_timer(sched);
    }

    fn build_spawn<R: Rng>(
        &self,
        projectile: ProjectileConfig,
        holder: &mut dyn WeaponHolder,
        rng: &mut R,
    ) -> ProjectileSpawn {
        let muzzle = holder.muzzle_point();
        let target = holder.resolve_aim_point();
        let origin = muzzle + (target - muzzle).normalize_or_zero() * self.config.muzzle_offset;
        let jittered = target + random_unit_vector(rng) * self.config.aim_variance;
        let direction = (jittered - origin).normalize_or_zero();
        let velocity = direction * projectile.speed;
        ProjectileSpawn {
            origin,
            velocity,
            config: projectile,
            owner: self.owner,
            team: self.team,
        }
    }

    fn set_timer(&mut self, sched: &mut dyn FireScheduler, delay: f32, timer: WeaponTimer) {
        self.clear_timer(sched);
        self.pending_timer = Some(sched.schedule(delay, timer));
    }

    fn clear_timer(&mut self, sched: &mut dyn FireScheduler) {
        if let Some(id) = self.pending_timer.take() {
            sched.cancel(id);
        }
    }
}
