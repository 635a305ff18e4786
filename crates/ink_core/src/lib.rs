//! Ink Core - handles, timers, and identity
//!
//! Foundation types shared by every Inkfall crate:
//!
//! - Generational handles for safe cross-frame references
//! - The cooperative timer queue driven by the simulation tick
//! - Team identity
//!
//! # Example
//!
//! ```ignore
//! use ink_core::prelude::*;
//!
//! let mut map: HandleMap<u32> = HandleMap::new();
//! let h = map.insert(7);
//! assert_eq!(map.get(h), Some(&7));
//! map.remove(h);
//! assert_eq!(map.get(h), None); // stale generation
//! ```

pub mod handle;
pub mod schedule;
pub mod team;

pub mod prelude {
    pub use crate::handle::{Handle, HandleAllocator, HandleMap};
    pub use crate::schedule::{TimerId, TimerQueue};
    pub use crate::team::Team;
}

pub use prelude::*;
