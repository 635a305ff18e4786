//! Timer payloads and noise events

use ink_combat::{Agent, Projectile, Weapon};
use ink_core::Handle;
use ink_math::Vec3;

/// Deferred work dispatched by the world's timer queue
#[derive(Clone, Copy, Debug)]
pub enum SimEvent {
    /// A weapon's next automatic shot is due
    WeaponRefire(Handle<Weapon>),
    /// A semi-automatic weapon's cooldown expired
    WeaponCooldown(Handle<Weapon>),
    /// A resolved projectile's destruction delay elapsed
    DestroyProjectile(Handle<Projectile>),
    /// A dead agent's destruction delay elapsed
    DestroyAgent(Handle<Agent>),
}

/// A noise that feeds back into perception
#[derive(Clone, Debug)]
pub struct NoiseEvent {
    /// Actor that caused the noise
    pub source: u64,
    /// Where the noise happened
    pub position: Vec3,
    /// Stimulus strength at the source
    pub loudness: f32,
    /// Maximum distance the noise carries
    pub range: f32,
    /// Tag carried by the stimulus
    pub tag: String,
}
