pub mod command;
pub use command::*;

pub mod constants;
pub use constants::*;

pub mod input;
pub use input::*;

pub mod state;
pub use state::*;
