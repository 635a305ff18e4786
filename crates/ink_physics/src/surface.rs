//! Surface UV resolution for marking
//!
//! A paint stamp needs a UV on the struck surface. The contact probe
//! re-casts a short ray through the contact point - biased outward along the
//! contact normal, then fired back inward - with face resolution enabled,
//! and projects the struck face onto a 0..1 UV square.

use crate::collider::ColliderId;
use crate::query::RaycastOptions;
use crate::scene::CollisionScene;
use ink_math::{Aabb, BoxFace, Vec2, Vec3};

/// Map a point on a box face to UV coordinates in 0..1
pub fn face_uv(aabb: &Aabb, face: BoxFace, point: Vec3) -> Vec2 {
    let size = aabb.max - aabb.min;
    let (u, v) = match face {
        BoxFace::XNeg | BoxFace::XPos => (
            (point.y - aabb.min.y) / size.y.max(1e-6),
            (point.z - aabb.min.z) / size.z.max(1e-6),
        ),
        BoxFace::YNeg | BoxFace::YPos => (
            (point.x - aabb.min.x) / size.x.max(1e-6),
            (point.z - aabb.min.z) / size.z.max(1e-6),
        ),
        BoxFace::ZNeg | BoxFace::ZPos => (
            (point.x - aabb.min.x) / size.x.max(1e-6),
            (point.y - aabb.min.y) / size.y.max(1e-6),
        ),
    };
    Vec2::new(u.clamp(0.0, 1.0), v.clamp(0.0, 1.0))
}

/// Probe through a contact point and resolve the struck surface UV
///
/// Returns the collider the probe lands on and the UV at the landing point,
/// or None when the geometry query cannot resolve a face (grazing contact,
/// collider gone, degenerate normal).
pub fn resolve_contact_uv(
    scene: &CollisionScene,
    contact: Vec3,
    normal: Vec3,
    bias: f32,
) -> Option<(ColliderId, Vec2)> {
    let normal = normal.normalize_or_zero();
    if normal == Vec3::ZERO {
        return None;
    }

    let origin = contact + normal * bias;
    let options = RaycastOptions::default()
        .with_max_distance(bias * 2.0)
        .with_face_resolution();
    let hit = scene.raycast(origin, -normal, &options)?;
    let face = hit.face?;
    let bounds = scene.bounds(hit.collider)?;
    Some((hit.collider, face_uv(&bounds, face, hit.point)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collider::ColliderDesc;
    use approx::assert_relative_eq;

    #[test]
    fn test_face_uv_center() {
        let aabb = Aabb::new(Vec3::ZERO, Vec3::new(2.0, 4.0, 6.0));
        let uv = face_uv(&aabb, BoxFace::XNeg, Vec3::new(0.0, 2.0, 3.0));
        assert_relative_eq!(uv.x, 0.5, epsilon = 1e-6);
        assert_relative_eq!(uv.y, 0.5, epsilon = 1e-6);
    }

    #[test]
    fn test_face_uv_clamped() {
        let aabb = Aabb::new(Vec3::ZERO, Vec3::ONE);
        let uv = face_uv(&aabb, BoxFace::ZPos, Vec3::new(5.0, -5.0, 1.0));
        assert_eq!((uv.x, uv.y), (1.0, 0.0));
    }

    #[test]
    fn test_contact_probe_resolves() {
        let mut scene = CollisionScene::new();
        let wall = scene.add(ColliderDesc::from_center_half_extents(
            Vec3::new(5.0, 0.0, 0.0),
            Vec3::new(0.5, 2.0, 2.0),
        ));

        // Contact on the -X face of the wall
        let contact = Vec3::new(4.5, 1.0, -1.0);
        let (id, uv) = resolve_contact_uv(&scene, contact, Vec3::NEG_X, 2.0).unwrap();
        assert_eq!(id, wall);
        assert_relative_eq!(uv.x, 0.75, epsilon = 1e-4); // y = 1.0 in -2..2
        assert_relative_eq!(uv.y, 0.25, epsilon = 1e-4); // z = -1.0 in -2..2
    }

    #[test]
    fn test_contact_probe_degrades() {
        let scene = CollisionScene::new();
        assert!(resolve_contact_uv(&scene, Vec3::ZERO, Vec3::X, 2.0).is_none());
        let mut scene = CollisionScene::new();
        scene.add(ColliderDesc::from_center_half_extents(Vec3::ZERO, Vec3::ONE));
        assert!(resolve_contact_uv(&scene, Vec3::ZERO, Vec3::ZERO, 2.0).is_none());
    }
}
