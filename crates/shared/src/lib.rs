mod clock;
pub mod validate;

pub use clock::*;
