//! Game state module - the simulation controller.
//!
//! Owns the board, the cadence clock, the RNG, and all session state, and
//! exposes the command interface consumed by input handling plus the
//! read-only accessors consumed by rendering. Commands whose preconditions
//! fail are silent no-ops; the only terminal condition is a blocked spawn,
//! which transitions to game over.

use crate::core::{pieces, scoring, Board, GameClock, PieceRng};
use crate::types::{
    GameAction, PieceKind, Rotation, COL_COUNT, DEFAULT_GAME_SPEED, DROP_COOLDOWN_FRAMES,
    ROW_COUNT, SOFT_DROP_SPEED, SPEED_INCREMENT,
};

/// The falling piece.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActivePiece {
    pub kind: PieceKind,
    /// Column of the piece frame's left edge, possibly negative while the
    /// mask's own inset keeps every occupied cell on the board.
    pub col: i8,
    /// Row of the frame's top edge, in combined hidden+visible coordinates.
    pub row: i8,
    pub rotation: Rotation,
}

/// Complete session state. One logical thread owns this exclusively; nothing
/// here blocks or performs I/O.
#[derive(Debug, Clone)]
pub struct GameState {
    board: Board,
    clock: GameClock,
    rng: PieceRng,
    active: Option<ActivePiece>,
    next: PieceKind,
    score: u32,
    level: u32,
    game_speed: f32,
    drop_cooldown: u32,
    is_new_game: bool,
    is_game_over: bool,
    is_paused: bool,
}

impl GameState {
    /// Create a session in the new-game state. The clock starts paused so
    /// nothing falls until the first restart command.
    pub fn new(seed: u32, now_ms: u64) -> Self {
        let mut rng = PieceRng::new(seed);
        let next = rng.next_kind();
        let mut clock = GameClock::new(DEFAULT_GAME_SPEED, now_ms);
        clock.set_paused(true);

        Self {
            board: Board::new(),
            clock,
            rng,
            active: None,
            next,
            score: 0,
            level: 0,
            game_speed: DEFAULT_GAME_SPEED,
            drop_cooldown: 0,
            is_new_game: true,
            is_game_over: false,
            is_paused: false,
        }
    }

    fn playing(&self) -> bool {
        !self.is_new_game && !self.is_game_over
    }

    /// Apply one command. `now_ms` is the caller's monotonic wall time; it is
    /// only used when a command re-baselines the cadence clock.
    pub fn apply_action(&mut self, action: GameAction, now_ms: u64) {
        match action {
            GameAction::MoveLeft => self.try_shift(-1),
            GameAction::MoveRight => self.try_shift(1),
            GameAction::SoftDropStart => {
                if !self.is_paused && self.drop_cooldown == 0 {
                    self.clock.set_cycles_per_second(SOFT_DROP_SPEED);
                }
            }
            GameAction::SoftDropStop => {
                // Restore the base rate and drop any partially accumulated
                // cycle so releasing never causes an extra tick.
                self.clock.set_cycles_per_second(self.game_speed);
                self.clock.reset(now_ms);
            }
            GameAction::RotateCw => {
                if let Some(piece) = self.active {
                    self.try_rotate(piece.rotation.rotate_cw());
                }
            }
            GameAction::RotateCcw => {
                if let Some(piece) = self.active {
                    self.try_rotate(piece.rotation.rotate_ccw());
                }
            }
            GameAction::TogglePause => {
                if self.playing() {
                    self.is_paused = !self.is_paused;
                    self.clock.set_paused(self.is_paused);
                }
            }
            GameAction::Restart => {
                if self.is_new_game || self.is_game_over {
                    self.reset_game(now_ms);
                }
            }
        }
    }

    /// Advance the session by one outer-loop iteration: fold `now_ms` into
    /// the cadence clock, run at most one gravity tick, and count down the
    /// drop cooldown.
    pub fn update(&mut self, now_ms: u64) {
        self.clock.update(now_ms);
        if self.clock.has_elapsed_cycle() {
            self.tick_gravity(now_ms);
        }
        if self.drop_cooldown > 0 {
            self.drop_cooldown -= 1;
        }
    }

    fn try_shift(&mut self, dx: i8) {
        if self.is_paused || !self.playing() {
            return;
        }
        let Some(piece) = self.active else {
            return;
        };
        if self
            .board
            .can_place(piece.kind, piece.col + dx, piece.row, piece.rotation)
        {
            self.active = Some(ActivePiece {
                col: piece.col + dx,
                ..piece
            });
        }
    }

    /// Attempt to rotate into `new_rotation`, nudging the piece off the board
    /// edges first. The correction comes from the target rotation's insets,
    /// one axis adjustment per edge; there is no kick search. The rotation,
    /// column, and row commit together or not at all.
    fn try_rotate(&mut self, new_rotation: Rotation) {
        if self.is_paused || !self.playing() {
            return;
        }
        let Some(piece) = self.active else {
            return;
        };

        let dim = pieces::dimension(piece.kind);
        let ins = pieces::insets(piece.kind, new_rotation);
        let mut new_col = piece.col;
        let mut new_row = piece.row;

        if piece.col < -ins.left {
            new_col -= piece.col - ins.left;
        } else if piece.col + dim - ins.right >= COL_COUNT as i8 {
            new_col -= (piece.col + dim - ins.right) - COL_COUNT as i8 + 1;
        }

        if piece.row < -ins.top {
            new_row -= piece.row - ins.top;
        } else if piece.row + dim - ins.bottom >= ROW_COUNT as i8 {
            new_row -= (piece.row + dim - ins.bottom) - ROW_COUNT as i8 + 1;
        }

        if self
            .board
            .can_place(piece.kind, new_col, new_row, new_rotation)
        {
            self.active = Some(ActivePiece {
                col: new_col,
                row: new_row,
                rotation: new_rotation,
                ..piece
            });
        }
    }

    /// One gravity step: descend if possible, otherwise lock the piece,
    /// clear lines, bump speed, and spawn the next piece.
    fn tick_gravity(&mut self, now_ms: u64) {
        let Some(piece) = self.active else {
            return;
        };

        if self
            .board
            .can_place(piece.kind, piece.col, piece.row + 1, piece.rotation)
        {
            self.active = Some(ActivePiece {
                row: piece.row + 1,
                ..piece
            });
            return;
        }

        // Reached the bottom or landed on another piece.
        self.board
            .place(piece.kind, piece.col, piece.row, piece.rotation);

        let cleared = self.board.clear_full_lines();
        if cleared > 0 {
            self.score += scoring::line_clear_score(cleared);
        }

        // Each lock speeds the game up slightly; the clock restarts at the
        // new rate so the next piece falls on a fresh cadence.
        self.game_speed += SPEED_INCREMENT;
        self.clock.set_cycles_per_second(self.game_speed);
        self.clock.reset(now_ms);

        self.drop_cooldown = DROP_COOLDOWN_FRAMES;
        self.level = scoring::level_for_speed(self.game_speed);

        self.spawn_piece();
    }

    /// Promote the queued piece to active and draw a new next piece. A
    /// blocked spawn means the stack has reached the top: game over, clock
    /// paused, grid untouched.
    fn spawn_piece(&mut self) {
        let kind = self.next;
        let (col, row) = pieces::spawn_position(kind);
        self.active = Some(ActivePiece {
            kind,
            col,
            row,
            rotation: Rotation::North,
        });
        self.next = self.rng.next_kind();

        if !self.board.can_place(kind, col, row, Rotation::North) {
            self.is_game_over = true;
            self.clock.set_paused(true);
        }
    }

    fn reset_game(&mut self, now_ms: u64) {
        self.level = 1;
        self.score = 0;
        self.game_speed = DEFAULT_GAME_SPEED;
        self.next = self.rng.next_kind();
        self.is_new_game = false;
        self.is_game_over = false;
        self.board.clear();
        self.clock.reset(now_ms);
        self.clock.set_cycles_per_second(self.game_speed);
        self.spawn_piece();
    }

    pub fn is_paused(&self) -> bool {
        self.is_paused
    }

    pub fn is_new_game(&self) -> bool {
        self.is_new_game
    }

    pub fn is_game_over(&self) -> bool {
        self.is_game_over
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn game_speed(&self) -> f32 {
        self.game_speed
    }

    pub fn drop_cooldown(&self) -> u32 {
        self.drop_cooldown
    }

    pub fn active(&self) -> Option<ActivePiece> {
        self.active
    }

    pub fn next_piece(&self) -> PieceKind {
        self.next
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Row where the active piece would land if dropped straight down.
    pub fn ghost_row(&self) -> Option<i8> {
        let piece = self.active?;
        let mut row = piece.row;
        while self
            .board
            .can_place(piece.kind, piece.col, row + 1, piece.rotation)
        {
            row += 1;
        }
        Some(row)
    }
}
