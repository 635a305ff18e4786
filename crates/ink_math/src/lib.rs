//! Ink Math - vectors, rays, bounds, and intersection tests
//!
//! Just enough geometry for a combat simulation: line-of-sight rays,
//! bounding boxes, overlap tests, and cone checks. No matrices, no
//! quaternions - orientation in this simulation is a forward vector.

pub mod bounds;
pub mod intersect;
pub mod ray;
pub mod vector;

pub mod prelude {
    pub use crate::bounds::Aabb;
    pub use crate::intersect::{ray_aabb, ray_aabb_with_face, sphere_aabb_overlap, BoxFace};
    pub use crate::ray::Ray;
    pub use crate::vector::{dir_within_cone, Vec2, Vec3};
}

pub use prelude::*;
