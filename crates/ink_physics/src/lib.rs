//! Ink Physics - the collision backend interface
//!
//! The simulation core only ever asks a collision backend three questions:
//! is this segment blocked, what does this ray hit first, and what overlaps
//! this sphere. `CollisionScene` answers them over a set of axis-aligned
//! colliders carrying mobility class, an enable flag, a physics-simulation
//! flag, and opaque user data linking back to the owning actor.
//!
//! Surface marking additionally needs a face/UV lookup at a contact point;
//! see [`surface`].

pub mod collider;
pub mod query;
pub mod scene;
pub mod surface;

pub mod prelude {
    pub use crate::collider::{Collider, ColliderDesc, ColliderId, Mobility};
    pub use crate::query::{RaycastHit, RaycastOptions};
    pub use crate::scene::CollisionScene;
    pub use crate::surface::{face_uv, resolve_contact_uv};
}

pub use prelude::*;
