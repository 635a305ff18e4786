//! Line-of-sight evaluation
//!
//! A pure geometric test with no state and no side effects. The caller
//! chooses what a positive sighting means through `require_sight`: a
//! condition asking "can I see them" passes `true`, a condition asking
//! "am I hidden" passes `false`, and every exit path inverts accordingly.

use ink_math::{dir_within_cone, Aabb, Vec3};
use ink_physics::{ColliderId, CollisionScene};

/// The observing agent's pose
#[derive(Clone, Copy, Debug)]
pub struct Observer {
    /// Feet/root position, origin of the facing cone
    pub position: Vec3,
    /// Eye point, origin of the sight rays
    pub eye: Vec3,
    /// Facing direction
    pub forward: Vec3,
    /// The observer's own collider, excluded from the ray hit set
    pub collider: Option<ColliderId>,
}

/// The actor being looked at
#[derive(Clone, Copy, Debug)]
pub struct SightTarget {
    /// World-space bounds of the target
    pub bounds: Aabb,
    /// The target's collider, excluded from the ray hit set
    pub collider: Option<ColliderId>,
}

/// Test whether the observer has line of sight to the target
///
/// An invalid (absent) target or a target outside the facing cone fails the
/// sight test. Otherwise `vertical_samples` rays are cast from the eye to
/// evenly spaced heights spanning the target's vertical extent, top down;
/// the first unobstructed ray passes the test. The result of the sight test
/// is then XORed with `require_sight`: a passed test returns
/// `require_sight`, a failed one returns `!require_sight`.
pub fn has_line_of_sight(
    scene: &CollisionScene,
    observer: &Observer,
    target: Option<&SightTarget>,
    cone_half_angle_deg: f32,
    vertical_samples: u32,
    require_sight: bool,
) -> bool {
    let Some(target) = target else {
        return !require_sight;
    };

    let center = target.bounds.center();
    let to_target = center - observer.position;
    if !dir_within_cone(observer.forward, to_target, cone_half_angle_deg) {
        return !require_sight;
    }

    let mut exclude = Vec::new();
    if let Some(id) = observer.collider {
        exclude.push(id);
    }
    if let Some(id) = target.collider {
        exclude.push(id);
    }

    let extent_z = target.bounds.half_extents().z;
    let samples = vertical_samples.max(1);
    let step = extent_z * 2.0 / samples as f32;

    for i in 0..samples {
        let end = center + Vec3::new(0.0, 0.0, extent_z - step * i as f32);
        if !scene.segment_blocked(observer.eye, end, &exclude) {
            return require_sight;
        }
    }

    !require_sight
}
