//! The collision scene

use crate::collider::{Collider, ColliderDesc, ColliderId};
use crate::query::{RaycastHit, RaycastOptions};
use ink_core::HandleMap;
use ink_math::{intersect, Aabb, Ray, Vec3};

/// A set of colliders answering ray and overlap queries
///
/// Every query skips disabled colliders and anything on the exclusion list.
/// Queries are read-only and deterministic; the only mutations are collider
/// management, the enable flag, and impulse accumulation.
pub struct CollisionScene {
    colliders: HandleMap<Collider>,
}

impl CollisionScene {
    /// Create an empty scene
    pub fn new() -> Self {
        Self {
            colliders: HandleMap::new(),
        }
    }

    /// Add a collider
    pub fn add(&mut self, desc: ColliderDesc) -> ColliderId {
        if !desc.aabb.is_valid() {
            log::warn!("collider added with inverted bounds: {:?}", desc.aabb);
        }
        self.colliders.insert(Collider::from_desc(desc))
    }

    /// Remove a collider; stale ids return None
    pub fn remove(&mut self, id: ColliderId) -> Option<Collider> {
        self.colliders.remove(id)
    }

    /// Get a collider
    pub fn get(&self, id: ColliderId) -> Option<&Collider> {
        self.colliders.get(id)
    }

    /// Get a collider mutably
    pub fn get_mut(&mut self, id: ColliderId) -> Option<&mut Collider> {
        self.colliders.get_mut(id)
    }

    /// Check whether an id is still live
    pub fn contains(&self, id: ColliderId) -> bool {
        self.colliders.contains(id)
    }

    /// World-space bounds of a collider
    pub fn bounds(&self, id: ColliderId) -> Option<Aabb> {
        self.colliders.get(id).map(|c| c.aabb)
    }

    /// Enable or disable a collider for queries
    ///
    /// Returns false for a stale id.
    pub fn set_enabled(&mut self, id: ColliderId, enabled: bool) -> bool {
        match self.colliders.get_mut(id) {
            Some(c) => {
                c.enabled = enabled;
                true
            }
            None => false,
        }
    }

    /// Apply an impulse to a physics-simulating body
    ///
    /// Returns false if the body is gone or does not simulate physics.
    pub fn apply_impulse(&mut self, id: ColliderId, impulse: Vec3) -> bool {
        match self.colliders.get_mut(id) {
            Some(c) if c.simulates_physics => {
                c.accumulated_impulse += impulse;
                true
            }
            _ => false,
        }
    }

    /// Cast a ray and return the nearest hit
    pub fn raycast(&self, origin: Vec3, direction: Vec3, options: &RaycastOptions) -> Option<RaycastHit> {
        let ray = Ray::new(origin, direction);
        if !ray.is_valid() {
            return None;
        }

        let mut nearest: Option<RaycastHit> = None;
        for (id, collider) in self.colliders.iter() {
            if !collider.enabled || options.exclude.contains(&id) {
                continue;
            }
            let Some(t) = intersect::ray_aabb(&ray, &collider.aabb) else {
                continue;
            };
            if t > options.max_distance {
                continue;
            }
            if nearest.map_or(true, |hit| t < hit.distance) {
                let face = intersect::ray_aabb_with_face(&ray, &collider.aabb).map(|(_, f)| f);
                let normal = face.map_or(-ray.direction, |f| f.normal());
                nearest = Some(RaycastHit {
                    collider: id,
                    point: ray.at(t),
                    normal,
                    distance: t,
                    face: if options.resolve_face { face } else { None },
                    user_data: collider.user_data,
                });
            }
        }
        nearest
    }

    /// Whether anything blocks the segment from `start` to `end`
    pub fn segment_blocked(&self, start: Vec3, end: Vec3, exclude: &[ColliderId]) -> bool {
        let length = start.distance(end);
        if length < 1e-6 {
            return false;
        }
        let options = RaycastOptions::default()
            .with_max_distance(length)
            .exclude_all(exclude);
        self.raycast(start, end - start, &options).is_some()
    }

    /// All enabled colliders overlapping a sphere
    pub fn overlap_sphere(&self, center: Vec3, radius: f32, exclude: &[ColliderId]) -> Vec<ColliderId> {
        self.colliders
            .iter()
            .filter(|(id, c)| {
                c.enabled
                    && !exclude.contains(id)
                    && intersect::sphere_aabb_overlap(center, radius, &c.aabb)
            })
            .map(|(id, _)| id)
            .collect()
    }

    /// Number of colliders
    pub fn len(&self) -> usize {
        self.colliders.len()
    }

    /// Check if the scene is empty
    pub fn is_empty(&self) -> bool {
        self.colliders.is_empty()
    }
}

impl Default for CollisionScene {
    fn default() -> Self {
        Self::new()
    }
}
