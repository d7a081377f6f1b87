//! Terminal rendering module.
//!
//! A small game-oriented pipeline: `GameView` paints the simulation into a
//! `FrameBuffer` of styled character cells, and `TerminalRenderer` flushes
//! the buffer to the terminal with per-row diffing against the previous
//! frame. The view layer is pure and unit-testable; only the renderer
//! touches the terminal.

pub mod fb;
pub mod game_view;
pub mod renderer;

pub use fb::{Cell, CellStyle, FrameBuffer, Rgb};
pub use game_view::{GameView, Viewport};
pub use renderer::TerminalRenderer;
