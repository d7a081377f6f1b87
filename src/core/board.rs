//! Board module - the occupancy grid.
//!
//! A 10x22 grid stored as a flat array for cache locality; the top two rows
//! are the hidden spawn buffer. Coordinates: (x, y) with x in 0..9 left to
//! right and y in 0..21 top to bottom, hidden rows first.

use crate::core::pieces;
use crate::types::{Cell, PieceKind, Rotation, COL_COUNT, ROW_COUNT};

const BOARD_SIZE: usize = (COL_COUNT as usize) * (ROW_COUNT as usize);

/// The game grid, including the hidden spawn rows.
#[derive(Debug, Clone, PartialEq)]
pub struct Board {
    /// Flat array of cells, row-major (y * COL_COUNT + x).
    cells: [Cell; BOARD_SIZE],
}

impl Board {
    pub fn new() -> Self {
        Self {
            cells: [None; BOARD_SIZE],
        }
    }

    #[inline(always)]
    fn index(x: i8, y: i8) -> Option<usize> {
        if x < 0 || x >= COL_COUNT as i8 || y < 0 || y >= ROW_COUNT as i8 {
            return None;
        }
        Some((y as usize) * (COL_COUNT as usize) + (x as usize))
    }

    pub fn width(&self) -> u8 {
        COL_COUNT
    }

    pub fn height(&self) -> u8 {
        ROW_COUNT
    }

    /// Cell at (x, y), or None if out of bounds.
    pub fn get(&self, x: i8, y: i8) -> Option<Cell> {
        Self::index(x, y).map(|idx| self.cells[idx])
    }

    /// Set cell at (x, y). Returns false if out of bounds.
    pub fn set(&mut self, x: i8, y: i8, cell: Cell) -> bool {
        match Self::index(x, y) {
            Some(idx) => {
                self.cells[idx] = cell;
                true
            }
            None => false,
        }
    }

    /// Whether (x, y) is within bounds and filled.
    pub fn is_occupied(&self, x: i8, y: i8) -> bool {
        matches!(self.get(x, y), Some(Some(_)))
    }

    /// Reset every cell to empty.
    pub fn clear(&mut self) {
        for cell in &mut self.cells {
            *cell = None;
        }
    }

    /// The sole collision predicate: true iff the piece's occupied cells,
    /// translated by (col, row), all fall inside the grid and none of them
    /// lands on a filled cell. Used for movement validation and locking
    /// decisions alike.
    pub fn can_place(&self, kind: PieceKind, col: i8, row: i8, rotation: Rotation) -> bool {
        let dim = pieces::dimension(kind);
        let ins = pieces::insets(kind, rotation);

        // Cheap bounding-box test against the insets first.
        if col < -ins.left || col + dim - ins.right >= COL_COUNT as i8 {
            return false;
        }
        if row < -ins.top || row + dim - ins.bottom >= ROW_COUNT as i8 {
            return false;
        }

        // Then per-cell occupancy.
        for (dx, dy) in pieces::cells(kind, rotation) {
            if self.is_occupied(col + dx, row + dy) {
                return false;
            }
        }
        true
    }

    /// Write the piece's occupied cells into the grid, tagged with its kind.
    ///
    /// Performs no validation; callers must have checked `can_place` at this
    /// exact position first.
    pub fn place(&mut self, kind: PieceKind, col: i8, row: i8, rotation: Rotation) {
        for (dx, dy) in pieces::cells(kind, rotation) {
            self.set(col + dx, row + dy, Some(kind));
        }
    }

    /// Whether row `y` is completely filled.
    pub fn is_row_full(&self, y: usize) -> bool {
        if y >= ROW_COUNT as usize {
            return false;
        }
        let start = y * COL_COUNT as usize;
        let end = start + COL_COUNT as usize;
        self.cells[start..end].iter().all(|cell| cell.is_some())
    }

    /// Shift every row above `y` down by one and empty the topmost row,
    /// overwriting row `y`.
    fn shift_down_through(&mut self, y: usize) {
        let width = COL_COUNT as usize;
        for row in (1..=y).rev() {
            let src = (row - 1) * width;
            let dst = row * width;
            self.cells.copy_within(src..src + width, dst);
        }
        for cell in &mut self.cells[0..width] {
            *cell = None;
        }
    }

    /// Scan every row top to bottom and clear the full ones, returning how
    /// many were cleared.
    ///
    /// Each full row is shifted out as it is encountered, in a single
    /// monotonic pass. Shifting row `y` only moves rows above it, all of
    /// which have already been evaluated, so no row needs re-checking.
    pub fn clear_full_lines(&mut self) -> u32 {
        let mut cleared = 0;
        for y in 0..ROW_COUNT as usize {
            if self.is_row_full(y) {
                self.shift_down_through(y);
                cleared += 1;
            }
        }
        cleared
    }

    /// Count of filled cells, mostly useful for tests.
    pub fn occupied_count(&self) -> usize {
        self.cells.iter().filter(|cell| cell.is_some()).count()
    }

    /// Reference to the flat cell array.
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}
