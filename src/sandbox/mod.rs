//! A minimal host for driving a controller without an engine: one free
//! rigid body, static ground planes and a recording input binding.

mod body;
mod input;
mod world;

pub use body::*;
pub use input::*;
pub use world::*;
