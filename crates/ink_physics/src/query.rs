//! Raycast options and results

use crate::collider::ColliderId;
use ink_math::{BoxFace, Vec3};

/// Options for raycast queries
#[derive(Clone, Debug)]
pub struct RaycastOptions {
    /// Maximum distance for the ray
    pub max_distance: f32,
    /// Colliders to exclude from the hit set
    pub exclude: Vec<ColliderId>,
    /// Resolve the struck face for surface-UV lookup
    pub resolve_face: bool,
}

impl Default for RaycastOptions {
    fn default() -> Self {
        Self {
            max_distance: f32::INFINITY,
            exclude: Vec::new(),
            resolve_face: false,
        }
    }
}

impl RaycastOptions {
    /// Set maximum distance
    pub fn with_max_distance(mut self, distance: f32) -> Self {
        self.max_distance = distance;
        self
    }

    /// Add a collider to exclude
    pub fn exclude(mut self, collider: ColliderId) -> Self {
        self.exclude.push(collider);
        self
    }

    /// Add several colliders to exclude
    pub fn exclude_all(mut self, colliders: &[ColliderId]) -> Self {
        self.exclude.extend_from_slice(colliders);
        self
    }

    /// Enable face resolution
    pub fn with_face_resolution(mut self) -> Self {
        self.resolve_face = true;
        self
    }
}

/// Result of a raycast query
#[derive(Clone, Copy, Debug)]
pub struct RaycastHit {
    /// The collider that was hit
    pub collider: ColliderId,
    /// Hit point in world space
    pub point: Vec3,
    /// Surface normal at the hit point
    pub normal: Vec3,
    /// Distance from the ray origin
    pub distance: f32,
    /// Struck face, when face resolution was requested
    pub face: Option<BoxFace>,
    /// Owner reference of the struck collider
    pub user_data: u64,
}
