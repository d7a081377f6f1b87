//! Input module - key events to game commands.

pub mod handler;

pub use handler::{should_quit, InputHandler};
