//! Axis-aligned bounding boxes

use crate::vector::Vec3;
use serde::{Deserialize, Serialize};

/// Axis-aligned bounding box
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Aabb {
    pub min: Vec3,
    pub max: Vec3,
}

impl Aabb {
    /// Create from min and max corners
    #[inline]
    pub const fn new(min: Vec3, max: Vec3) -> Self {
        Self { min, max }
    }

    /// Create from center and half-extents
    #[inline]
    pub fn from_center_half_extents(center: Vec3, half_extents: Vec3) -> Self {
        Self {
            min: center - half_extents,
            max: center + half_extents,
        }
    }

    /// Center point
    #[inline]
    pub fn center(&self) -> Vec3 {
        (self.min + self.max) * 0.5
    }

    /// Half-extents
    #[inline]
    pub fn half_extents(&self) -> Vec3 {
        (self.max - self.min) * 0.5
    }

    /// Check point containment (inclusive)
    pub fn contains_point(&self, p: Vec3) -> bool {
        p.x >= self.min.x
            && p.x <= self.max.x
            && p.y >= self.min.y
            && p.y <= self.max.y
            && p.z >= self.min.z
            && p.z <= self.max.z
    }

    /// Closest point on or inside the box to `p`
    pub fn closest_point(&self, p: Vec3) -> Vec3 {
        p.max(self.min).min(self.max)
    }

    /// Translate the box
    pub fn translated(&self, offset: Vec3) -> Self {
        Self {
            min: self.min + offset,
            max: self.max + offset,
        }
    }

    /// Whether min <= max on every axis
    pub fn is_valid(&self) -> bool {
        self.min.x <= self.max.x && self.min.y <= self.max.y && self.min.z <= self.max.z
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_center_and_extents() {
        let b = Aabb::from_center_half_extents(Vec3::new(1.0, 2.0, 3.0), Vec3::splat(0.5));
        assert_eq!(b.center(), Vec3::new(1.0, 2.0, 3.0));
        assert_eq!(b.half_extents(), Vec3::splat(0.5));
        assert!(b.is_valid());
    }

    #[test]
    fn test_containment() {
        let b = Aabb::new(Vec3::ZERO, Vec3::ONE);
        assert!(b.contains_point(Vec3::splat(0.5)));
        assert!(!b.contains_point(Vec3::splat(1.5)));
    }

    #[test]
    fn test_closest_point() {
        let b = Aabb::new(Vec3::ZERO, Vec3::ONE);
        assert_eq!(b.closest_point(Vec3::new(2.0, 0.5, -1.0)), Vec3::new(1.0, 0.5, 0.0));
    }
}
