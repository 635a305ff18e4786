//! Rays for line-of-sight and impact queries

use crate::vector::Vec3;

/// A ray with normalized direction
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Ray {
    /// Ray origin point
    pub origin: Vec3,
    /// Ray direction (normalized at construction)
    pub direction: Vec3,
}

impl Ray {
    /// Create a ray, normalizing the direction
    #[inline]
    pub fn new(origin: Vec3, direction: Vec3) -> Self {
        Self {
            origin,
            direction: direction.normalize_or_zero(),
        }
    }

    /// Create a ray from start toward end
    #[inline]
    pub fn from_points(start: Vec3, end: Vec3) -> Self {
        Self::new(start, end - start)
    }

    /// Point at distance t along the ray
    #[inline]
    pub fn at(&self, t: f32) -> Vec3 {
        self.origin + self.direction * t
    }

    /// Whether the direction is usable
    #[inline]
    pub fn is_valid(&self) -> bool {
        self.direction.length_squared() > 1e-10
    }
}
