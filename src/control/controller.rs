use super::planner::Planner;
use crate::engine::command::Command;
use crate::game::frame::Frame;
use std::time::Instant;

/// controllers share one capability set: announce a name, then produce a
/// command vector for each frame under a deadline. the planner is the only
/// production variant; experimental ones slot in beside it.
pub enum Controller {
    Planner(Planner),
}

impl Controller {
    pub fn name(&self) -> &str {
        match self {
            Self::Planner(planner) => planner.name(),
        }
    }

    pub fn run(&mut self, frame: &Frame, deadline: Instant) -> Vec<Command> {
        match self {
            Self::Planner(planner) => planner.run(frame, deadline),
        }
    }
}
