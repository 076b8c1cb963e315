pub mod direction;
pub use direction::*;

pub mod position;
pub use position::*;

pub mod torus;
pub use torus::*;
