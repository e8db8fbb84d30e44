mod grid;
mod staff;
mod types;
mod week;

pub use grid::*;
pub use staff::*;
pub use types::*;
pub use week::*;
