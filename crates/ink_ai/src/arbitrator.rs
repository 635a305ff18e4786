//! Perception arbitration
//!
//! Consumes the stream of sensory stimuli delivered to one agent and decides
//! what to do with its attention: a directly sighted source becomes the
//! locked target; anything else is at best an investigation lead. The two
//! are mutually exclusive - locking a target drops any lead, and a lead is
//! only recorded while no target is locked.

use crate::focus::FocusController;
use crate::visibility::Observer;
use ink_math::Vec3;
use ink_physics::{ColliderId, CollisionScene};
use serde::{Deserialize, Serialize};

/// Tuning for one agent's senses
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct PerceptionConfig {
    /// Tag a stimulus source must carry to be considered at all
    pub sense_tag: String,
    /// Half angle of the direct-perception cone, wider than the aim cone
    pub direct_cone_half_angle_deg: f32,
}

impl Default for PerceptionConfig {
    fn default() -> Self {
        Self {
            sense_tag: "combatant".to_string(),
            direct_cone_half_angle_deg: 70.0,
        }
    }
}

/// Immutable snapshot of one sensory event
///
/// The stimulus location and the source's position differ for heard events:
/// the cone test runs against where the stimulus happened, the occlusion ray
/// against where the source actually is.
#[derive(Clone, Debug)]
pub struct Stimulus {
    /// Actor id of the source
    pub source: u64,
    /// Where the source actor is
    pub source_position: Vec3,
    /// The source's collider, excluded from the occlusion ray
    pub source_collider: Option<ColliderId>,
    /// Where the stimulus was registered
    pub location: Vec3,
    /// Stimulus strength, non-negative
    pub strength: f32,
    /// Tag carried by the source
    pub tag: String,
}

/// What one agent currently knows about the enemy
#[derive(Clone, Debug, Default)]
pub struct TargetState {
    target: Option<u64>,
    investigate: Option<Vec3>,
    last_stimulus_strength: f32,
}

impl TargetState {
    /// Whether a target is locked
    pub fn has_target(&self) -> bool {
        self.target.is_some()
    }

    /// The locked target, if any
    pub fn target_actor(&self) -> Option<u64> {
        self.target
    }

    /// Whether an investigation lead is recorded
    pub fn has_investigate_location(&self) -> bool {
        self.investigate.is_some()
    }

    /// The investigation lead, if any
    pub fn investigate_location(&self) -> Option<Vec3> {
        self.investigate
    }

    /// Strongest stimulus strength seen this sensing cycle
    pub fn last_stimulus_strength(&self) -> f32 {
        self.last_stimulus_strength
    }
}

/// What a stimulus update did to the state
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PerceptionOutcome {
    /// Wrong tag; nothing considered
    Ignored,
    /// Direct sighting locked the source as target
    TargetLocked,
    /// Stimulus became the new investigation lead
    LeadRecorded,
    /// Considered but changed nothing
    Unchanged,
}

/// Per-agent perception arbitrator
///
/// Bound to a sensing behavior state on entry and unbound on exit; its
/// callbacks run synchronously on the simulation tick thread, never
/// concurrently for the same agent.
pub struct PerceptionArbitrator {
    config: PerceptionConfig,
    state: TargetState,
}

impl PerceptionArbitrator {
    /// Create an arbitrator with the given tuning
    pub fn new(config: PerceptionConfig) -> Self {
        Self {
            config,
            state: TargetState::default(),
        }
    }

    /// Current target state, read by sequencer conditions
    pub fn state(&self) -> &TargetState {
        &self.state
    }

    /// A sensed actor was updated
    pub fn on_stimulus_updated(
        &mut self,
        scene: &CollisionScene,
        observer: &Observer,
        stimulus: &Stimulus,
    ) -> PerceptionOutcome {
        if stimulus.tag != self.config.sense_tag {
            return PerceptionOutcome::Ignored;
        }

        // Direct sighting requires the stimulus inside the perception cone
        // and an unobstructed ray to the source itself.
        let to_stimulus = stimulus.location - observer.position;
        let mut direct = false;
        if ink_math::dir_within_cone(
            observer.forward,
            to_stimulus,
            self.config.direct_cone_half_angle_deg,
        ) {
            let mut exclude = Vec::new();
            if let Some(id) = observer.collider {
                exclude.push(id);
            }
            if let Some(id) = stimulus.source_collider {
                exclude.push(id);
            }
            direct = !scene.segment_blocked(observer.position, stimulus.source_position, &exclude);
        }

        if direct {
            self.state.target = Some(stimulus.source);
            self.state.investigate = None;
            self.state.last_stimulus_strength = 0.0;
            log::debug!("target locked: {:#x}", stimulus.source);
            return PerceptionOutcome::TargetLocked;
        }

        // An occluded or out-of-cone stimulus never overrides a locked target.
        if self.state.target.is_none() && stimulus.strength > self.state.last_stimulus_strength {
            self.state.last_stimulus_strength = stimulus.strength;
            self.state.investigate = Some(stimulus.location);
            return PerceptionOutcome::LeadRecorded;
        }

        PerceptionOutcome::Unchanged
    }

    /// A sensed actor was forgotten
    ///
    /// Forgetting the locked target, or any actor while no target is locked
    /// (abandoning a lead), clears everything including the held focus.
    /// Anything else is a no-op.
    pub fn on_stimulus_forgotten(&mut self, actor: u64, focus: &mut FocusController) {
        let forgetting = self.state.target == Some(actor) || self.state.target.is_none();
        if !forgetting {
            return;
        }
        self.state = TargetState::default();
        focus.clear();
    }
}
