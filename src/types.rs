//! Core types shared across the application.
//! This module contains pure data types with no external dependencies.

/// Board dimensions. The top two rows are a hidden spawn buffer that is never
/// shown to the player; pieces descend out of it into the visible area.
pub const COL_COUNT: u8 = 10;
pub const VISIBLE_ROW_COUNT: u8 = 20;
pub const HIDDEN_ROW_COUNT: u8 = 2;
pub const ROW_COUNT: u8 = VISIBLE_ROW_COUNT + HIDDEN_ROW_COUNT;

/// Outer loop frame budget (50 fps).
pub const FRAME_TIME_MS: u64 = 1000 / 50;

/// Gravity speed in cadence cycles per second at the start of a game.
pub const DEFAULT_GAME_SPEED: f32 = 1.0;
/// Speed gained every time a piece locks.
pub const SPEED_INCREMENT: f32 = 0.035;
/// Cadence rate while soft drop is held.
pub const SOFT_DROP_SPEED: f32 = 25.0;
/// Frames to ignore soft-drop starts after a lock (~0.5 s at 50 fps), so the
/// next piece does not come flying in before the player has reacted.
pub const DROP_COOLDOWN_FRAMES: u32 = 25;
/// Display level is derived from the current speed with this factor.
pub const LEVEL_SPEED_FACTOR: f32 = 1.70;

/// The seven piece variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PieceKind {
    I,
    J,
    L,
    O,
    S,
    Z,
    T,
}

impl PieceKind {
    pub const ALL: [PieceKind; 7] = [
        PieceKind::I,
        PieceKind::J,
        PieceKind::L,
        PieceKind::O,
        PieceKind::S,
        PieceKind::Z,
        PieceKind::T,
    ];

    /// Stable index into catalog tables.
    pub const fn index(self) -> usize {
        self as usize
    }

}

/// Rotation states (North = spawn orientation).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Rotation {
    North,
    East,
    South,
    West,
}

impl Rotation {
    pub const ALL: [Rotation; 4] = [
        Rotation::North,
        Rotation::East,
        Rotation::South,
        Rotation::West,
    ];

    /// Index into per-rotation catalog tables.
    pub const fn index(self) -> usize {
        self as usize
    }

    pub const fn rotate_cw(self) -> Self {
        match self {
            Rotation::North => Rotation::East,
            Rotation::East => Rotation::South,
            Rotation::South => Rotation::West,
            Rotation::West => Rotation::North,
        }
    }

    pub const fn rotate_ccw(self) -> Self {
        match self {
            Rotation::North => Rotation::West,
            Rotation::West => Rotation::South,
            Rotation::South => Rotation::East,
            Rotation::East => Rotation::North,
        }
    }
}

/// Commands accepted by the simulation controller. This is the only mutation
/// surface the core exposes; anything that fails its precondition is a silent
/// no-op.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameAction {
    MoveLeft,
    MoveRight,
    SoftDropStart,
    SoftDropStop,
    RotateCw,
    RotateCcw,
    TogglePause,
    Restart,
}

/// Cell on the board (None = empty, Some = filled with the locking piece's
/// kind, retained so the cell renders with that piece's color).
pub type Cell = Option<PieceKind>;
