//! Ink Sim - the combat simulation world
//!
//! Ties the subsystems together on a single cooperative tick thread:
//! perception events route to bound arbitrators, weapons schedule their
//! cadence on the world's timer queue, projectiles sweep the collision
//! scene and resolve impacts into damage, impulses, and paint.

pub mod events;
pub mod tasks;
pub mod world;

pub mod prelude {
    pub use crate::events::{NoiseEvent, SimEvent};
    pub use crate::tasks::{
        FaceActorTask, FaceLocationTask, HasInvestigateCondition, HasTargetCondition,
        LineOfSightCondition, SenseEnemiesTask, ShootAtTargetTask,
    };
    pub use crate::world::{AgentDesc, Scoreboard, SimWorld};
}

pub use prelude::*;
