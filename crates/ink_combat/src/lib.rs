//! Ink Combat - weapons, projectiles, and surface marking
//!
//! This crate resolves weapon fire into damage, physical reaction, and
//! paint:
//!
//! - Fire-control state machine (trigger, refire cadence, ammo)
//! - Weapon-holder capability interface
//! - Projectile lifecycle and the impact resolver
//! - Health/damage on agents
//! - Paint surfaces and the team-colored stamp
//!
//! # Example
//!
//! ```ignore
//! use ink_combat::prelude::*;
//!
//! let mut weapon = Weapon::new(WeaponConfig::default(), shooter_id, Team::Red);
//! if let FireOutcome::Fired(spawn) = weapon.start_firing(now, &mut sched, &mut holder, &mut rng) {
//!     // world turns the spawn into a live projectile
//! }
//! ```

pub mod agent;
pub mod aim;
pub mod damage;
pub mod holder;
pub mod paint;
pub mod projectile;
pub mod weapon;

pub mod prelude {
    pub use crate::agent::{Agent, AimProfile, DamageOutcome};
    pub use crate::aim::{random_unit_vector, resolve_aim_point, scatter_direction};
    pub use crate::damage::DamageInfo;
    pub use crate::holder::WeaponHolder;
    pub use crate::paint::{PaintManager, PaintRegistry, PaintSurface};
    pub use crate::projectile::{
        resolve_impact, ImpactOutcome, ImpactRecord, MarkError, Projectile, ProjectileConfig,
        ProjectilePhase,
    };
    pub use crate::weapon::{
        FireOutcome, FireScheduler, NoiseConfig, ProjectileSpawn, Weapon, WeaponConfig, WeaponTimer,
    };
    pub use ink_core::Team;
}

pub use prelude::*;
