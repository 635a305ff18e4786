//! Sequencer tasks and conditions over the simulation world
//!
//! These are the states the external behavior sequencer composes: sense,
//! face, shoot. Whatever a task binds on enter it unbinds on exit - the
//! sense task in particular, whose callbacks would otherwise keep mutating
//! a disowned target state.

use crate::world::SimWorld;
use ink_ai::{
    has_line_of_sight, BehaviorCondition, BehaviorTask, PerceptionConfig, SightTarget, TaskStatus,
};
use ink_combat::Agent;
use ink_core::Handle;
use ink_math::Vec3;

/// Binds the agent's perception arbitrator while the state is active
pub struct SenseEnemiesTask {
    /// The sensing agent
    pub agent: Handle<Agent>,
    /// Sense tuning
    pub config: PerceptionConfig,
}

impl BehaviorTask<SimWorld> for SenseEnemiesTask {
    fn enter(&mut self, world: &mut SimWorld) -> TaskStatus {
        world.bind_sense(self.agent, self.config.clone());
        TaskStatus::Running
    }

    fn exit(&mut self, world: &mut SimWorld) {
        world.unbind_sense(self.agent);
    }
}

/// Keeps the agent's focus on an actor while the state is active
pub struct FaceActorTask {
    /// The turning agent
    pub agent: Handle<Agent>,
    /// Actor to face
    pub target: u64,
}

impl BehaviorTask<SimWorld> for FaceActorTask {
    fn enter(&mut self, world: &mut SimWorld) -> TaskStatus {
        if let Some(focus) = world.focus_mut(self.agent) {
            focus.face_actor(self.target);
        }
        TaskStatus::Running
    }

    fn exit(&mut self, world: &mut SimWorld) {
        if let Some(focus) = world.focus_mut(self.agent) {
            focus.clear();
        }
    }
}

/// Keeps the agent's focus on a world point while the state is active
pub struct FaceLocationTask {
    /// The turning agent
    pub agent: Handle<Agent>,
    /// Point to face
    pub location: Vec3,
}

impl BehaviorTask<SimWorld> for FaceLocationTask {
    fn enter(&mut self, world: &mut SimWorld) -> TaskStatus {
        if let Some(focus) = world.focus_mut(self.agent) {
            focus.face_location(self.location);
        }
        TaskStatus::Running
    }

    fn exit(&mut self, world: &mut SimWorld) {
        if let Some(focus) = world.focus_mut(self.agent) {
            focus.clear();
        }
    }
}

/// Holds the trigger on a target while the state is active
pub struct ShootAtTargetTask {
    /// The shooting agent
    pub agent: Handle<Agent>,
    /// Actor to shoot at
    pub target: u64,
}

impl BehaviorTask<SimWorld> for ShootAtTargetTask {
    fn enter(&mut self, world: &mut SimWorld) -> TaskStatus {
        world.start_shooting(self.agent, self.target);
        TaskStatus::Running
    }

    fn exit(&mut self, world: &mut SimWorld) {
        world.stop_shooting(self.agent);
    }
}

/// Line-of-sight gate for state transitions
pub struct LineOfSightCondition {
    /// The observing agent
    pub observer: Handle<Agent>,
    /// Actor to check against
    pub target: u64,
    /// Half angle of the sight cone
    pub cone_half_angle_deg: f32,
    /// Rays across the target's vertical extent
    pub vertical_samples: u32,
    /// true = "must see", false = "must not see"
    pub require_sight: bool,
}

impl BehaviorCondition<SimWorld> for LineOfSightCondition {
    fn test(&self, world: &SimWorld) -> bool {
        let Some(observer) = world.observer(self.observer) else {
            return !self.require_sight;
        };
        let target_handle: Handle<Agent> = Handle::from_bits(self.target);
        let target = world
            .agents
            .get(target_handle)
            .and_then(|a| a.collider)
            .and_then(|id| {
                world.scene.bounds(id).map(|bounds| SightTarget {
                    bounds,
                    collider: Some(id),
                })
            });
        has_line_of_sight(
            &world.scene,
            &observer,
            target.as_ref(),
            self.cone_half_angle_deg,
            self.vertical_samples,
            self.require_sight,
        )
    }
}

/// Passes while the agent's arbitrator holds a locked target
pub struct HasTargetCondition {
    /// The sensing agent
    pub agent: Handle<Agent>,
}

impl BehaviorCondition<SimWorld> for HasTargetCondition {
    fn test(&self, world: &SimWorld) -> bool {
        world
            .sense_state(self.agent)
            .map_or(false, |s| s.has_target())
    }
}

/// Passes while the agent's arbitrator holds an investigation lead
pub struct HasInvestigateCondition {
    /// The sensing agent
    pub agent: Handle<Agent>,
}

impl BehaviorCondition<SimWorld> for HasInvestigateCondition {
    fn test(&self, world: &SimWorld) -> bool {
        world
            .sense_state(self.agent)
            .map_or(false, |s| s.has_investigate_location())
    }
}
