//! Combat agents
//!
//! An agent is any controllable combat entity - player or AI. It owns its
//! weapons (at most one active), takes damage, and dies exactly once;
//! everything after death (collision off, deferred destruction) is driven by
//! the world that owns it.

use crate::damage::DamageInfo;
use crate::weapon::Weapon;
use ink_core::{Handle, Team, TimerId};
use ink_math::Vec3;
use ink_physics::ColliderId;
use serde::{Deserialize, Serialize};

/// Aim tuning for an agent
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct AimProfile {
    /// Maximum distance of the aim ray
    pub range: f32,
    /// Half angle of the aim scatter cone, degrees
    pub variance_half_angle_deg: f32,
    /// Lowest vertical offset applied to the target point
    pub offset_z_low: f32,
    /// Highest vertical offset applied to the target point
    pub offset_z_high: f32,
}

impl Default for AimProfile {
    fn default() -> Self {
        Self {
            range: 100.0,
            variance_half_angle_deg: 10.0,
            offset_z_low: -0.6,
            offset_z_high: -0.35,
        }
    }
}

/// Result of applying damage
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DamageOutcome {
    /// Damage actually dealt
    pub dealt: f32,
    /// Whether this damage killed the agent
    pub died: bool,
}

/// A combat agent
#[derive(Debug)]
pub struct Agent {
    /// Root position
    pub position: Vec3,
    /// Facing direction
    pub forward: Vec3,
    /// Eye height above the root
    pub eye_height: f32,
    /// Current hit points
    pub hp: f32,
    /// Maximum hit points
    pub max_hp: f32,
    /// Team affiliation
    pub team: Team,
    /// Gameplay tags; the sense tag lives here
    pub tags: Vec<String>,
    /// The agent's collider in the scene
    pub collider: Option<ColliderId>,
    /// Weapons this agent owns
    pub weapons: Vec<Handle<Weapon>>,
    /// The weapon currently in hand
    pub active_weapon: Option<Handle<Weapon>>,
    /// Aim tuning
    pub aim: AimProfile,
    /// Actor currently aimed at
    pub current_aim_target: Option<u64>,
    /// Whether the trigger is being held
    pub is_shooting: bool,
    /// Delay between death and destruction
    pub deferred_destruction_delay: f32,
    /// Pending destruction timer, canceled on teardown
    pub destruction_timer: Option<TimerId>,
    dead: bool,
}

impl Agent {
    /// Tag granted on death
    pub const DEATH_TAG: &'static str = "dead";

    /// Create an agent at a position
    pub fn new(position: Vec3, team: Team) -> Self {
        Self {
            position,
            forward: Vec3::X,
            eye_height: 1.6,
            hp: 100.0,
            max_hp: 100.0,
            team,
            tags: Vec::new(),
            collider: None,
            weapons: Vec::new(),
            active_weapon: None,
            aim: AimProfile::default(),
            current_aim_target: None,
            is_shooting: false,
            deferred_destruction_delay: 5.0,
            destruction_timer: None,
            dead: false,
        }
    }

    /// Set hit points
    pub fn with_hp(mut self, hp: f32) -> Self {
        self.hp = hp;
        self.max_hp = hp;
        self
    }

    /// Set the facing direction
    pub fn with_forward(mut self, forward: Vec3) -> Self {
        self.forward = forward.normalize_or_zero();
        self
    }

    /// Add a gameplay tag
    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tags.push(tag.into());
        self
    }

    /// Set the aim profile
    pub fn with_aim(mut self, aim: AimProfile) -> Self {
        self.aim = aim;
        self
    }

    /// World-space eye point
    pub fn eye(&self) -> Vec3 {
        self.position + Vec3::new(0.0, 0.0, self.eye_height)
    }

    /// Whether the agent carries a tag
    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t == tag)
    }

    /// Whether the agent is dead
    pub fn is_dead(&self) -> bool {
        self.dead
    }

    /// Apply damage; dead agents ignore it
    pub fn take_damage(&mut self, damage: &DamageInfo) -> DamageOutcome {
        if self.dead {
            return DamageOutcome {
                dealt: 0.0,
                died: false,
            };
        }

        self.hp = (self.hp - damage.amount).max(0.0);
        if self.hp <= 0.0 {
            self.die();
            return DamageOutcome {
                dealt: damage.amount,
                died: true,
            };
        }

        DamageOutcome {
            dealt: damage.amount,
            died: false,
        }
    }

    /// Mark the agent dead; idempotent
    pub fn die(&mut self) {
        if self.dead {
            return;
        }
        self.dead = true;
        self.hp = 0.0;
        self.tags.push(Self::DEATH_TAG.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_damage_and_death() {
        let mut agent = Agent::new(Vec3::ZERO, Team::Red).with_hp(50.0);

        let hit = agent.take_damage(&DamageInfo::new(20.0));
        assert_eq!(hit, DamageOutcome { dealt: 20.0, died: false });
        assert_eq!(agent.hp, 30.0);
        assert!(!agent.is_dead());

        let fatal = agent.take_damage(&DamageInfo::new(40.0));
        assert!(fatal.died);
        assert!(agent.is_dead());
        assert!(agent.has_tag(Agent::DEATH_TAG));
        assert_eq!(agent.hp, 0.0);
    }

    #[test]
    fn test_dead_agents_ignore_damage() {
        let mut agent = Agent::new(Vec3::ZERO, Team::Red).with_hp(10.0);
        agent.take_damage(&DamageInfo::new(100.0));

        let again = agent.take_damage(&DamageInfo::new(100.0));
        assert_eq!(again.dealt, 0.0);
        assert!(!again.died);
        // The death tag is granted once
        assert_eq!(
            agent.tags.iter().filter(|t| *t == Agent::DEATH_TAG).count(),
            1
        );
    }

    #[test]
    fn test_eye_point() {
        let agent = Agent::new(Vec3::new(1.0, 2.0, 0.0), Team::Blue);
        assert_eq!(agent.eye(), Vec3::new(1.0, 2.0, 1.6));
    }
}
