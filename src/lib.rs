//! Blockfall: a falling-block puzzle game for the terminal.
//!
//! The crate splits into a pure simulation core (`core`), a key-to-command
//! input layer (`input`), and a framebuffer-based terminal renderer (`term`).
//! The binary in `main.rs` wires the three together in a fixed-rate loop.

pub mod core;
pub mod input;
pub mod term;
pub mod types;
