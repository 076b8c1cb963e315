pub mod path;
pub use path::*;

pub mod penalty;
pub use penalty::*;
