//! Aim-point resolution and scatter
//!
//! Directions are sampled uniformly over a spherical cap so a tight cone
//! stays tight; the AI aim point additionally wobbles vertically inside a
//! configured band and is clamped to the first blocking hit of the aim ray.

use crate::agent::AimProfile;
use ink_math::Vec3;
use ink_physics::{ColliderId, CollisionScene, RaycastOptions};
use rand::Rng;

/// Random unit vector, uniform over the sphere
pub fn random_unit_vector<R: Rng>(rng: &mut R) -> Vec3 {
    let z: f32 = rng.gen_range(-1.0..=1.0);
    let phi: f32 = rng.gen_range(0.0..core::f32::consts::TAU);
    let r = (1.0 - z * z).max(0.0).sqrt();
    Vec3::new(r * phi.cos(), r * phi.sin(), z)
}

/// Random direction inside a cone around `dir`, uniform over the cap
pub fn scatter_direction<R: Rng>(rng: &mut R, dir: Vec3, half_angle_deg: f32) -> Vec3 {
    let dir = dir.normalize_or_zero();
    if dir == Vec3::ZERO || half_angle_deg <= 0.0 {
        return dir;
    }

    let cos_max = half_angle_deg.to_radians().cos();
    let cos_t: f32 = rng.gen_range(cos_max..=1.0);
    let sin_t = (1.0 - cos_t * cos_t).max(0.0).sqrt();
    let phi: f32 = rng.gen_range(0.0..core::f32::consts::TAU);

    let ortho_a = dir.any_orthonormal();
    let ortho_b = dir.cross(ortho_a);
    (dir * cos_t + ortho_a * (sin_t * phi.cos()) + ortho_b * (sin_t * phi.sin()))
        .normalize_or_zero()
}

/// Resolve the point an AI holder is aiming at
///
/// With a target position, the target point is offset vertically by a random
/// amount inside the profile's band and the direction scattered inside the
/// variance cone; without one, the scattered facing direction is used. The
/// result is the first blocking hit along the aim ray, or the ray end when
/// nothing blocks.
pub fn resolve_aim_point<R: Rng>(
    scene: &CollisionScene,
    eye: Vec3,
    forward: Vec3,
    target_position: Option<Vec3>,
    profile: &AimProfile,
    exclude: &[ColliderId],
    rng: &mut R,
) -> Vec3 {
    let dir = match target_position {
        Some(mut target) => {
            let (low, high) = (
                profile.offset_z_low.min(profile.offset_z_high),
                profile.offset_z_low.max(profile.offset_z_high),
            );
            target.z += rng.gen_range(low..=high);
            scatter_direction(
                rng,
                (target - eye).normalize_or_zero(),
                profile.variance_half_angle_deg,
            )
        }
        None => scatter_direction(rng, forward, profile.variance_half_angle_deg),
    };

    let end = eye + dir * profile.range;
    let options = RaycastOptions::default()
        .with_max_distance(profile.range)
        .exclude_all(exclude);
    match scene.raycast(eye, dir, &options) {
        Some(hit) => hit.point,
        None => end,
    }
}
