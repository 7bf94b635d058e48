//! Core data types for the coinwatch alert bot.

pub mod mover;
pub mod news;
pub mod window;

pub use mover::*;
pub use news::*;
pub use window::*;
