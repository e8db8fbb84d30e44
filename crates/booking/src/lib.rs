mod client;
mod directory;
mod error;
mod schema;

pub use client::*;
pub use directory::*;
pub use error::*;
pub use schema::*;
