//! Advisory focus
//!
//! A focus is a hint about where an agent should be looking; it carries no
//! decision logic. If a focused actor disappears the focus simply stops
//! resolving to a point.

use ink_math::Vec3;

/// What the agent is focused on
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum FocusTarget {
    /// Follow an actor
    Actor(u64),
    /// Look at a fixed point
    Location(Vec3),
}

/// Per-agent focus state
#[derive(Clone, Debug, Default)]
pub struct FocusController {
    focus: Option<FocusTarget>,
}

impl FocusController {
    /// Create with no focus
    pub fn new() -> Self {
        Self::default()
    }

    /// Focus on an actor
    pub fn face_actor(&mut self, actor: u64) {
        self.focus = Some(FocusTarget::Actor(actor));
    }

    /// Focus on a world point
    pub fn face_location(&mut self, point: Vec3) {
        self.focus = Some(FocusTarget::Location(point));
    }

    /// Drop the focus
    pub fn clear(&mut self) {
        self.focus = None;
    }

    /// Whether any focus is set
    pub fn has_focus(&self) -> bool {
        self.focus.is_some()
    }

    /// The raw focus target
    pub fn focus(&self) -> Option<&FocusTarget> {
        self.focus.as_ref()
    }

    /// Resolve the focus to a world point
    ///
    /// `resolve_actor` maps an actor id to its position; a stale actor
    /// resolves to None and the focus silently stops updating.
    pub fn focal_point(&self, resolve_actor: impl Fn(u64) -> Option<Vec3>) -> Option<Vec3> {
        match self.focus? {
            FocusTarget::Actor(actor) => resolve_actor(actor),
            FocusTarget::Location(point) => Some(point),
        }
    }
}
