//! Intersection tests
//!
//! Ray/AABB via the slab method, with an optional face classification used
//! by surface-UV lookup, and a sphere/AABB overlap test for radial queries.

use crate::bounds::Aabb;
use crate::ray::Ray;
use crate::vector::Vec3;
use serde::{Deserialize, Serialize};

/// One of the six faces of an axis-aligned box
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BoxFace {
    XNeg,
    XPos,
    YNeg,
    YPos,
    ZNeg,
    ZPos,
}

impl BoxFace {
    /// Outward normal of this face
    pub fn normal(&self) -> Vec3 {
        match self {
            BoxFace::XNeg => Vec3::NEG_X,
            BoxFace::XPos => Vec3::X,
            BoxFace::YNeg => Vec3::NEG_Y,
            BoxFace::YPos => Vec3::Y,
            BoxFace::ZNeg => Vec3::NEG_Z,
            BoxFace::ZPos => Vec3::Z,
        }
    }
}

/// Ray-AABB intersection using the slab method
///
/// Returns the distance along the ray to the first intersection in front of
/// the origin, or None.
pub fn ray_aabb(ray: &Ray, aabb: &Aabb) -> Option<f32> {
    if !ray.is_valid() {
        return None;
    }

    let mut tmin = f32::NEG_INFINITY;
    let mut tmax = f32::INFINITY;

    for axis in 0..3 {
        let (origin, dir, min, max) = match axis {
            0 => (ray.origin.x, ray.direction.x, aabb.min.x, aabb.max.x),
            1 => (ray.origin.y, ray.direction.y, aabb.min.y, aabb.max.y),
            _ => (ray.origin.z, ray.direction.z, aabb.min.z, aabb.max.z),
        };
        if dir.abs() < 1e-8 {
            // Parallel to the slab; miss unless the origin lies inside it
            if origin < min || origin > max {
                return None;
            }
        } else {
            let inv = 1.0 / dir;
            let t1 = (min - origin) * inv;
            let t2 = (max - origin) * inv;
            tmin = tmin.max(t1.min(t2));
            tmax = tmax.min(t1.max(t2));
        }
    }

    if tmax < 0.0 || tmin > tmax {
        None
    } else {
        Some(if tmin < 0.0 { tmax } else { tmin })
    }
}

/// Ray-AABB intersection with the struck face
///
/// Classifies the entry point against the box planes; rays starting inside
/// the box report the exit face.
pub fn ray_aabb_with_face(ray: &Ray, aabb: &Aabb) -> Option<(f32, BoxFace)> {
    let t = ray_aabb(ray, aabb)?;
    let point = ray.at(t);

    let epsilon = 1e-4 * aabb.half_extents().length().max(1.0);
    let face = if (point.x - aabb.min.x).abs() < epsilon {
        BoxFace::XNeg
    } else if (point.x - aabb.max.x).abs() < epsilon {
        BoxFace::XPos
    } else if (point.y - aabb.min.y).abs() < epsilon {
        BoxFace::YNeg
    } else if (point.y - aabb.max.y).abs() < epsilon {
        BoxFace::YPos
    } else if (point.z - aabb.min.z).abs() < epsilon {
        BoxFace::ZNeg
    } else {
        BoxFace::ZPos
    };

    Some((t, face))
}

/// Sphere-AABB overlap test
pub fn sphere_aabb_overlap(center: Vec3, radius: f32, aabb: &Aabb) -> bool {
    let closest = aabb.closest_point(center);
    (closest - center).length_squared() <= radius * radius
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_ray_hits_box() {
        let aabb = Aabb::new(Vec3::new(4.0, -1.0, -1.0), Vec3::new(6.0, 1.0, 1.0));
        let ray = Ray::new(Vec3::ZERO, Vec3::X);
        let t = ray_aabb(&ray, &aabb).unwrap();
        assert_relative_eq!(t, 4.0, epsilon = 1e-5);
    }

    #[test]
    fn test_ray_misses_box() {
        let aabb = Aabb::new(Vec3::new(4.0, 2.0, -1.0), Vec3::new(6.0, 4.0, 1.0));
        let ray = Ray::new(Vec3::ZERO, Vec3::X);
        assert!(ray_aabb(&ray, &aabb).is_none());
    }

    #[test]
    fn test_box_behind_origin() {
        let aabb = Aabb::new(Vec3::new(-6.0, -1.0, -1.0), Vec3::new(-4.0, 1.0, 1.0));
        let ray = Ray::new(Vec3::ZERO, Vec3::X);
        assert!(ray_aabb(&ray, &aabb).is_none());
    }

    #[test]
    fn test_parallel_slab() {
        let aabb = Aabb::new(Vec3::new(4.0, -1.0, -1.0), Vec3::new(6.0, 1.0, 1.0));
        // Parallel to the Y slab, origin outside it
        let ray = Ray::new(Vec3::new(0.0, 5.0, 0.0), Vec3::X);
        assert!(ray_aabb(&ray, &aabb).is_none());
    }

    #[test]
    fn test_face_classification() {
        let aabb = Aabb::new(Vec3::new(4.0, -1.0, -1.0), Vec3::new(6.0, 1.0, 1.0));
        let ray = Ray::new(Vec3::ZERO, Vec3::X);
        let (_, face) = ray_aabb_with_face(&ray, &aabb).unwrap();
        assert_eq!(face, BoxFace::XNeg);

        let ray = Ray::new(Vec3::new(5.0, 0.0, 10.0), Vec3::NEG_Z);
        let (_, face) = ray_aabb_with_face(&ray, &aabb).unwrap();
        assert_eq!(face, BoxFace::ZPos);
    }

    #[test]
    fn test_sphere_overlap() {
        let aabb = Aabb::new(Vec3::ZERO, Vec3::ONE);
        assert!(sphere_aabb_overlap(Vec3::new(1.5, 0.5, 0.5), 0.6, &aabb));
        assert!(!sphere_aabb_overlap(Vec3::new(2.0, 0.5, 0.5), 0.6, &aabb));
        // Center inside always overlaps
        assert!(sphere_aabb_overlap(Vec3::splat(0.5), 0.01, &aabb));
    }
}
