pub mod controller;
pub use controller::*;

pub mod planner;
pub use planner::*;

pub mod settings;
pub use settings::*;
