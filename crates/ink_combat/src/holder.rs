//! Weapon-holder capability interface
//!
//! Whoever holds a weapon - player pawn or AI agent - supplies the aim point
//! and receives feedback. Most callbacks default to no-ops: an AI holder
//! typically ignores recoil, animation, and the ammo display the same way.

use ink_math::Vec3;

/// Capabilities a weapon requires of its holder
pub trait WeaponHolder {
    /// Muzzle location projectiles spawn from
    fn muzzle_point(&self) -> Vec3;

    /// Resolve the world point the holder is aiming at
    fn resolve_aim_point(&mut self) -> Vec3;

    /// Ammo display update
    fn ammo_changed(&mut self, _current: u32, _magazine: u32) {}

    /// Recoil feedback
    fn recoil(&mut self, _amount: f32) {}

    /// Firing animation feedback
    fn fire_animation(&mut self, _clip: &str) {}

    /// A semi-automatic weapon finished its cooldown; a new discrete
    /// trigger pull is now permitted
    fn semi_auto_ready(&mut self) {}

    /// The held weapon became the active one
    fn weapon_activated(&mut self) {}

    /// The held weapon was put away
    fn weapon_deactivated(&mut self) {}
}
