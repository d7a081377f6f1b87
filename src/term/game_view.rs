//! GameView: paints the simulation into a framebuffer.
//!
//! Pure (no I/O), so the whole layer is unit-testable. Only the visible
//! window of the grid is drawn; the hidden spawn rows stay off screen, and
//! active-piece cells inside them are clipped.

use crate::core::{pieces, GameState};
use crate::term::fb::{Cell, CellStyle, FrameBuffer, Rgb};
use crate::types::{PieceKind, Rotation, COL_COUNT, HIDDEN_ROW_COUNT, VISIBLE_ROW_COUNT};

/// Terminal viewport dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u16,
    pub height: u16,
}

impl Viewport {
    pub fn new(width: u16, height: u16) -> Self {
        Self { width, height }
    }
}

const PLAY_BG: Rgb = Rgb::new(25, 25, 32);
const BORDER_FG: Rgb = Rgb::new(200, 200, 200);
const PREVIEW_CELLS: u16 = 4;

/// Board-to-terminal painter.
pub struct GameView {
    /// Board cell width in terminal columns.
    cell_w: u16,
    /// Board cell height in terminal rows.
    cell_h: u16,
}

impl Default for GameView {
    fn default() -> Self {
        // 2x1 compensates for the terminal glyph aspect ratio.
        Self {
            cell_w: 2,
            cell_h: 1,
        }
    }
}

impl GameView {
    pub fn new(cell_w: u16, cell_h: u16) -> Self {
        Self { cell_w, cell_h }
    }

    /// Render the current state into a fresh framebuffer sized to the
    /// viewport.
    pub fn render(&self, state: &GameState, viewport: Viewport) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        fb.clear(Cell::default());

        let board_px_w = COL_COUNT as u16 * self.cell_w;
        let board_px_h = VISIBLE_ROW_COUNT as u16 * self.cell_h;
        let frame_w = board_px_w + 2;
        let frame_h = board_px_h + 2;

        // Leave room for the side panel when centering.
        let panel_w = PREVIEW_CELLS * self.cell_w + 2 + 4;
        let start_x = viewport.width.saturating_sub(frame_w + panel_w) / 2;
        let start_y = viewport.height.saturating_sub(frame_h) / 2;

        let bg = CellStyle::new(Rgb::new(70, 70, 82), PLAY_BG);
        let border = CellStyle::new(BORDER_FG, Rgb::new(0, 0, 0));

        fb.fill_rect(start_x + 1, start_y + 1, board_px_w, board_px_h, ' ', bg);
        draw_border(&mut fb, start_x, start_y, frame_w, frame_h, border);

        self.draw_locked_cells(&mut fb, state, start_x, start_y, bg);
        self.draw_ghost(&mut fb, state, start_x, start_y);
        self.draw_active(&mut fb, state, start_x, start_y);

        self.draw_side_panel(&mut fb, state, start_x + frame_w + 2, start_y);

        if state.is_new_game() {
            self.draw_overlay(
                &mut fb,
                start_x,
                start_y,
                frame_w,
                frame_h,
                &["BLOCKFALL", "Press Enter to Play"],
            );
        } else if state.is_game_over() {
            self.draw_overlay(
                &mut fb,
                start_x,
                start_y,
                frame_w,
                frame_h,
                &["GAME OVER", "Press Enter to Play Again"],
            );
        } else if state.is_paused() {
            self.draw_overlay(&mut fb, start_x, start_y, frame_w, frame_h, &["PAUSED"]);
        }

        fb
    }

    fn draw_locked_cells(
        &self,
        fb: &mut FrameBuffer,
        state: &GameState,
        start_x: u16,
        start_y: u16,
        bg: CellStyle,
    ) {
        for vy in 0..VISIBLE_ROW_COUNT as i8 {
            let board_y = vy + HIDDEN_ROW_COUNT as i8;
            for x in 0..COL_COUNT as i8 {
                match state.board().get(x, board_y).flatten() {
                    Some(kind) => {
                        let style = CellStyle::new(piece_color(kind), PLAY_BG);
                        self.fill_board_cell(fb, start_x, start_y, x as u16, vy as u16, '█', style);
                    }
                    None => {
                        self.fill_board_cell(fb, start_x, start_y, x as u16, vy as u16, '·', bg);
                    }
                }
            }
        }
    }

    fn draw_ghost(&self, fb: &mut FrameBuffer, state: &GameState, start_x: u16, start_y: u16) {
        let (Some(piece), Some(ghost_row)) = (state.active(), state.ghost_row()) else {
            return;
        };
        if ghost_row == piece.row {
            return;
        }
        let style = CellStyle::new(piece_color(piece.kind).darkened(), PLAY_BG);
        for (dx, dy) in pieces::cells(piece.kind, piece.rotation) {
            self.draw_piece_cell(fb, start_x, start_y, piece.col + dx, ghost_row + dy, '░', style);
        }
    }

    fn draw_active(&self, fb: &mut FrameBuffer, state: &GameState, start_x: u16, start_y: u16) {
        let Some(piece) = state.active() else {
            return;
        };
        let style = CellStyle::new(piece_color(piece.kind), PLAY_BG).bold();
        for (dx, dy) in pieces::cells(piece.kind, piece.rotation) {
            self.draw_piece_cell(fb, start_x, start_y, piece.col + dx, piece.row + dy, '█', style);
        }
    }

    /// Draw one piece cell given in board coordinates, clipping the hidden
    /// rows.
    fn draw_piece_cell(
        &self,
        fb: &mut FrameBuffer,
        start_x: u16,
        start_y: u16,
        x: i8,
        y: i8,
        ch: char,
        style: CellStyle,
    ) {
        if y < HIDDEN_ROW_COUNT as i8 {
            return;
        }
        let vy = (y - HIDDEN_ROW_COUNT as i8) as u16;
        self.fill_board_cell(fb, start_x, start_y, x as u16, vy, ch, style);
    }

    fn fill_board_cell(
        &self,
        fb: &mut FrameBuffer,
        start_x: u16,
        start_y: u16,
        cell_x: u16,
        cell_y: u16,
        ch: char,
        style: CellStyle,
    ) {
        let px = start_x + 1 + cell_x * self.cell_w;
        let py = start_y + 1 + cell_y * self.cell_h;
        fb.fill_rect(px, py, self.cell_w, self.cell_h, ch, style);
    }

    fn draw_side_panel(&self, fb: &mut FrameBuffer, state: &GameState, panel_x: u16, start_y: u16) {
        if panel_x >= fb.width() {
            return;
        }

        let label = CellStyle::default().bold();
        let value = CellStyle::new(Rgb::new(200, 200, 200), Rgb::new(0, 0, 0));
        let dim = CellStyle::new(Rgb::new(130, 130, 130), Rgb::new(0, 0, 0));

        let preview_w = PREVIEW_CELLS * self.cell_w + 2;
        let preview_h = PREVIEW_CELLS * self.cell_h + 2;

        let mut y = start_y;
        fb.put_str(panel_x, y, "NEXT", label);
        y += 1;
        draw_border(fb, panel_x, y, preview_w, preview_h, value);
        self.draw_next_preview(fb, state.next_piece(), panel_x + 1, y + 1);
        y += preview_h + 1;

        fb.put_str(panel_x, y, "LEVEL", label);
        fb.put_str(panel_x + 7, y, &state.level().to_string(), value);
        y += 2;
        fb.put_str(panel_x, y, "SCORE", label);
        fb.put_str(panel_x + 7, y, &state.score().to_string(), value);
        y += 2;

        let controls = [
            "A / ←  move left",
            "D / →  move right",
            "S / ↓  soft drop",
            "Q      rotate ccw",
            "E / ↑  rotate cw",
            "P      pause",
            "Esc    quit",
        ];
        for line in controls {
            if y >= fb.height() {
                break;
            }
            fb.put_str(panel_x, y, line, dim);
            y += 1;
        }
    }

    /// The queued piece at rotation 0, centered in the preview box by its
    /// footprint and insets.
    fn draw_next_preview(&self, fb: &mut FrameBuffer, kind: PieceKind, box_x: u16, box_y: u16) {
        let (cols, rows) = pieces::footprint(kind);
        let ins = pieces::insets(kind, Rotation::North);
        let off_x = (PREVIEW_CELLS - cols as u16) / 2;
        let off_y = (PREVIEW_CELLS - rows as u16) / 2;

        let style = CellStyle::new(piece_color(kind), Rgb::new(0, 0, 0));
        for (dx, dy) in pieces::cells(kind, Rotation::North) {
            let cx = (dx - ins.left) as u16 + off_x;
            let cy = (dy - ins.top) as u16 + off_y;
            fb.fill_rect(
                box_x + cx * self.cell_w,
                box_y + cy * self.cell_h,
                self.cell_w,
                self.cell_h,
                '█',
                style,
            );
        }
    }

    fn draw_overlay(
        &self,
        fb: &mut FrameBuffer,
        start_x: u16,
        start_y: u16,
        frame_w: u16,
        frame_h: u16,
        lines: &[&str],
    ) {
        let style = CellStyle::new(Rgb::new(255, 255, 255), Rgb::new(0, 0, 0)).bold();
        let mid_y = start_y + frame_h / 2;
        for (i, line) in lines.iter().enumerate() {
            let w = line.chars().count() as u16;
            let x = start_x + frame_w.saturating_sub(w) / 2;
            fb.put_str(x, mid_y + i as u16 * 2, line, style);
        }
    }
}

fn draw_border(fb: &mut FrameBuffer, x: u16, y: u16, w: u16, h: u16, style: CellStyle) {
    if w < 2 || h < 2 {
        return;
    }

    fb.put_char(x, y, '┌', style);
    fb.put_char(x + w - 1, y, '┐', style);
    fb.put_char(x, y + h - 1, '└', style);
    fb.put_char(x + w - 1, y + h - 1, '┘', style);

    for dx in 1..w - 1 {
        fb.put_char(x + dx, y, '─', style);
        fb.put_char(x + dx, y + h - 1, '─', style);
    }
    for dy in 1..h - 1 {
        fb.put_char(x, y + dy, '│', style);
        fb.put_char(x + w - 1, y + dy, '│', style);
    }
}

fn piece_color(kind: PieceKind) -> Rgb {
    match kind {
        PieceKind::I => Rgb::new(35, 220, 220),
        PieceKind::J => Rgb::new(35, 35, 220),
        PieceKind::L => Rgb::new(220, 127, 35),
        PieceKind::O => Rgb::new(220, 220, 35),
        PieceKind::S => Rgb::new(35, 220, 35),
        PieceKind::Z => Rgb::new(220, 35, 35),
        PieceKind::T => Rgb::new(128, 35, 128),
    }
}
