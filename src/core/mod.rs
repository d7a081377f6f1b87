//! Core module - pure simulation logic.
//!
//! Game rules, state, and timing live here with no UI, terminal, or I/O
//! dependencies. Wall-clock time is always injected by the caller, so every
//! piece of this module runs deterministically under synthetic time.

pub mod board;
pub mod clock;
pub mod game_state;
pub mod pieces;
pub mod rng;
pub mod scoring;

pub use board::Board;
pub use clock::GameClock;
pub use game_state::{ActivePiece, GameState};
pub use rng::PieceRng;
