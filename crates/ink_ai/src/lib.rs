//! Ink AI - sensory arbitration and behavior hooks
//!
//! This crate decides what an agent is aware of and exposes the lifecycle
//! hooks an external behavior sequencer drives:
//!
//! - Line-of-sight evaluation (facing cone + vertically sampled rays)
//! - Perception arbitration (target lock vs. investigation lead)
//! - Advisory focus (face an actor or a point)
//! - Task/condition traits for sequencer states
//!
//! # Example
//!
//! ```ignore
//! use ink_ai::prelude::*;
//!
//! let mut arbitrator = PerceptionArbitrator::new(PerceptionConfig::default());
//! arbitrator.on_stimulus_updated(&scene, &observer, &stimulus);
//! if arbitrator.state().has_target() {
//!     // transition to combat
//! }
//! ```

pub mod arbitrator;
pub mod focus;
pub mod tasks;
pub mod visibility;

pub mod prelude {
    pub use crate::arbitrator::{
        PerceptionArbitrator, PerceptionConfig, PerceptionOutcome, Stimulus, TargetState,
    };
    pub use crate::focus::{FocusController, FocusTarget};
    pub use crate::tasks::{BehaviorCondition, BehaviorTask, TaskStatus};
    pub use crate::visibility::{has_line_of_sight, Observer, SightTarget};
}

pub use prelude::*;
