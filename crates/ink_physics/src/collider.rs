//! Colliders and mobility classes

use ink_core::Handle;
use ink_math::{Aabb, Vec3};
use serde::{Deserialize, Serialize};

/// Handle to a collider in a [`crate::CollisionScene`]
pub type ColliderId = Handle<Collider>;

/// Mobility class of a surface
///
/// Decides what happens to a projectile that sticks to it: static surfaces
/// take an attached projectile, everything else hands the projectile over to
/// physics.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Mobility {
    /// Immovable level geometry
    #[default]
    Static,
    /// Placed but not physics-driven (doors, platforms)
    Stationary,
    /// Free-moving prop
    Movable,
}

/// Descriptor for adding a collider to a scene
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ColliderDesc {
    /// World-space bounds
    pub aabb: Aabb,
    /// Mobility class
    pub mobility: Mobility,
    /// Whether the body reacts to impulses
    pub simulates_physics: bool,
    /// Opaque owner reference (actor id bits); 0 = unowned
    pub user_data: u64,
}

impl ColliderDesc {
    /// Create a descriptor for the given bounds
    pub fn new(aabb: Aabb) -> Self {
        Self {
            aabb,
            mobility: Mobility::Static,
            simulates_physics: false,
            user_data: 0,
        }
    }

    /// Create from center and half-extents
    pub fn from_center_half_extents(center: Vec3, half_extents: Vec3) -> Self {
        Self::new(Aabb::from_center_half_extents(center, half_extents))
    }

    /// Set the mobility class
    pub fn with_mobility(mut self, mobility: Mobility) -> Self {
        self.mobility = mobility;
        self
    }

    /// Enable physics simulation on the body
    pub fn with_simulated_physics(mut self) -> Self {
        self.simulates_physics = true;
        self
    }

    /// Set the owner reference
    pub fn with_user_data(mut self, user_data: u64) -> Self {
        self.user_data = user_data;
        self
    }
}

/// A collider registered in a scene
#[derive(Clone, Debug)]
pub struct Collider {
    /// World-space bounds
    pub aabb: Aabb,
    /// Mobility class
    pub mobility: Mobility,
    /// Whether the body reacts to impulses
    pub simulates_physics: bool,
    /// Whether queries can hit this collider
    pub enabled: bool,
    /// Opaque owner reference
    pub user_data: u64,
    /// Sum of impulses applied so far (consumed by whatever integrates bodies)
    pub accumulated_impulse: Vec3,
}

impl Collider {
    pub(crate) fn from_desc(desc: ColliderDesc) -> Self {
        Self {
            aabb: desc.aabb,
            mobility: desc.mobility,
            simulates_physics: desc.simulates_physics,
            enabled: true,
            user_data: desc.user_data,
            accumulated_impulse: Vec3::ZERO,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_desc_builder() {
        let desc = ColliderDesc::from_center_half_extents(Vec3::ZERO, Vec3::ONE)
            .with_mobility(Mobility::Movable)
            .with_simulated_physics()
            .with_user_data(99);

        assert_eq!(desc.mobility, Mobility::Movable);
        assert!(desc.simulates_physics);
        assert_eq!(desc.user_data, 99);
        assert_eq!(desc.aabb.center(), Vec3::ZERO);
    }
}
