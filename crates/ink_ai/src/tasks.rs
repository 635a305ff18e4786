//! Behavior lifecycle hooks
//!
//! The behavior sequencer itself is an external scheduler; these traits are
//! the surface it drives. A task gets `enter` when its state is selected,
//! `tick` while the state is active, and `exit` when the state is left -
//! exit is where anything bound on entry must be unbound.

/// Result of a task step
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TaskStatus {
    /// Keep running
    Running,
    /// Finished successfully
    Succeeded,
    /// Finished with failure
    Failed,
}

/// A task executed inside a sequencer state
pub trait BehaviorTask<Ctx> {
    /// State entered
    fn enter(&mut self, ctx: &mut Ctx) -> TaskStatus;

    /// State active; called once per simulation tick
    fn tick(&mut self, _ctx: &mut Ctx, _dt: f32) -> TaskStatus {
        TaskStatus::Running
    }

    /// State left; must undo whatever `enter` bound
    fn exit(&mut self, _ctx: &mut Ctx) {}
}

/// A condition evaluated before a state transition
pub trait BehaviorCondition<Ctx> {
    /// Evaluate against the current world state
    fn test(&self, ctx: &Ctx) -> bool;
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Countdown {
        remaining: u32,
    }

    impl BehaviorTask<()> for Countdown {
        fn enter(&mut self, _ctx: &mut ()) -> TaskStatus {
            TaskStatus::Running
        }

        fn tick(&mut self, _ctx: &mut (), _dt: f32) -> TaskStatus {
            self.remaining = self.remaining.saturating_sub(1);
            if self.remaining == 0 {
                TaskStatus::Succeeded
            } else {
                TaskStatus::Running
            }
        }
    }

    #[test]
    fn test_task_lifecycle() {
        let mut task = Countdown { remaining: 2 };
        assert_eq!(task.enter(&mut ()), TaskStatus::Running);
        assert_eq!(task.tick(&mut (), 0.1), TaskStatus::Running);
        assert_eq!(task.tick(&mut (), 0.1), TaskStatus::Succeeded);
    }
}
