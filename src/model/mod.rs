pub mod plan;
pub use plan::*;

pub mod world;
pub use world::*;
