//! Piece catalog - static geometry for the seven variants.
//!
//! Each variant is described by a square `d×d` occupancy mask per rotation
//! state, packed into a `u16` (bit `row * d + col`). Insets and spawn
//! placement are derived from the masks at compile time, so every query here
//! is a lookup over immutable data.

use arrayvec::ArrayVec;

use crate::types::{PieceKind, Rotation};

/// Empty margins of a mask at one rotation.
///
/// `left`/`top` are the first occupied column/row. `right`/`bottom` use the
/// complementary convention `d - last occupied column/row`, which is what the
/// board's bounds checks are written against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Insets {
    pub left: i8,
    pub right: i8,
    pub top: i8,
    pub bottom: i8,
}

/// One catalog entry: geometry for a single variant.
struct PieceDef {
    /// Square bounding dimension of the rotation masks.
    dim: i8,
    /// Visible footprint at rotation 0 (columns, rows), used only for
    /// centering the next-piece preview.
    cols: u8,
    rows: u8,
    /// Occupancy masks indexed by rotation.
    masks: [u16; 4],
    /// Insets indexed by rotation, derived from `masks`.
    insets: [Insets; 4],
    spawn_col: i8,
    spawn_row: i8,
}

/// Pack `.`/`X` art (row-major, length `dim * dim`) into a bit mask.
const fn mask(dim: usize, art: &[u8]) -> u16 {
    assert!(art.len() == dim * dim);
    let mut bits: u16 = 0;
    let mut i = 0;
    while i < art.len() {
        if art[i] == b'X' {
            bits |= 1 << i;
        }
        i += 1;
    }
    bits
}

const fn col_occupied(bits: u16, dim: usize, col: usize) -> bool {
    let mut row = 0;
    while row < dim {
        if bits & (1 << (row * dim + col)) != 0 {
            return true;
        }
        row += 1;
    }
    false
}

const fn row_occupied(bits: u16, dim: usize, row: usize) -> bool {
    let mut col = 0;
    while col < dim {
        if bits & (1 << (row * dim + col)) != 0 {
            return true;
        }
        col += 1;
    }
    false
}

const fn derive_insets(bits: u16, dim: i8) -> Insets {
    assert!(bits != 0);
    let d = dim as usize;

    let mut left = 0;
    while !col_occupied(bits, d, left) {
        left += 1;
    }
    let mut last_col = d - 1;
    while !col_occupied(bits, d, last_col) {
        last_col -= 1;
    }

    let mut top = 0;
    while !row_occupied(bits, d, top) {
        top += 1;
    }
    let mut last_row = d - 1;
    while !row_occupied(bits, d, last_row) {
        last_row -= 1;
    }

    Insets {
        left: left as i8,
        right: (d - last_col) as i8,
        top: top as i8,
        bottom: (d - last_row) as i8,
    }
}

const fn def(dim: i8, cols: u8, rows: u8, masks: [u16; 4]) -> PieceDef {
    let insets = [
        derive_insets(masks[0], dim),
        derive_insets(masks[1], dim),
        derive_insets(masks[2], dim),
        derive_insets(masks[3], dim),
    ];
    PieceDef {
        dim,
        cols,
        rows,
        masks,
        insets,
        // Column centered on the board, row flush with the hidden-buffer top
        // so the first occupied row sits exactly at the spawn boundary.
        spawn_col: 5 - (dim >> 1),
        spawn_row: insets[0].top,
    }
}

/// Catalog indexed by `PieceKind::index()` (I, J, L, O, S, Z, T).
static CATALOG: [PieceDef; 7] = [
    def(
        4,
        4,
        1,
        [
            mask(4, b"....XXXX........"),
            mask(4, b"..X...X...X...X."),
            mask(4, b"........XXXX...."),
            mask(4, b".X...X...X...X.."),
        ],
    ),
    def(
        3,
        3,
        2,
        [
            mask(3, b"X..XXX..."),
            mask(3, b".XX.X..X."),
            mask(3, b"...XXX..X"),
            mask(3, b".X..X.XX."),
        ],
    ),
    def(
        3,
        3,
        2,
        [
            mask(3, b"..XXXX..."),
            mask(3, b".X..X..XX"),
            mask(3, b"...XXXX.."),
            mask(3, b"XX..X..X."),
        ],
    ),
    def(
        2,
        2,
        2,
        [
            mask(2, b"XXXX"),
            mask(2, b"XXXX"),
            mask(2, b"XXXX"),
            mask(2, b"XXXX"),
        ],
    ),
    def(
        3,
        3,
        2,
        [
            mask(3, b".XXXX...."),
            mask(3, b".X..XX..X"),
            mask(3, b"....XXXX."),
            mask(3, b"X..XX..X."),
        ],
    ),
    def(
        3,
        3,
        2,
        [
            mask(3, b"XX..XX..."),
            mask(3, b"..X.XX.X."),
            mask(3, b"...XX..XX"),
            mask(3, b".X.XX.X.."),
        ],
    ),
    def(
        3,
        3,
        2,
        [
            mask(3, b".X.XXX..."),
            mask(3, b".X..XX.X."),
            mask(3, b"...XXX.X."),
            mask(3, b".X.XX..X."),
        ],
    ),
];

fn def_of(kind: PieceKind) -> &'static PieceDef {
    &CATALOG[kind.index()]
}

/// Square bounding dimension of a variant's masks.
pub fn dimension(kind: PieceKind) -> i8 {
    def_of(kind).dim
}

/// Visible footprint at rotation 0 (columns, rows). A preview-centering
/// query; gameplay never uses it.
pub fn footprint(kind: PieceKind) -> (u8, u8) {
    let d = def_of(kind);
    (d.cols, d.rows)
}

/// Whether the local cell `(col, row)` of the `d×d` frame is occupied.
///
/// `col` and `row` must be within `0..dimension(kind)`; out-of-range access
/// is a caller bug.
pub fn is_tile(kind: PieceKind, col: i8, row: i8, rotation: Rotation) -> bool {
    let d = def_of(kind);
    debug_assert!(
        col >= 0 && col < d.dim && row >= 0 && row < d.dim,
        "local coordinate ({col}, {row}) outside {}x{} frame",
        d.dim,
        d.dim
    );
    let bit = (row as usize) * (d.dim as usize) + col as usize;
    d.masks[rotation.index()] & (1 << bit) != 0
}

/// Insets of a variant at a rotation.
pub fn insets(kind: PieceKind, rotation: Rotation) -> Insets {
    def_of(kind).insets[rotation.index()]
}

/// Spawn position (column, row) in board coordinates.
pub fn spawn_position(kind: PieceKind) -> (i8, i8) {
    let d = def_of(kind);
    (d.spawn_col, d.spawn_row)
}

/// The four occupied local cells `(col, row)` of a variant at a rotation.
pub fn cells(kind: PieceKind, rotation: Rotation) -> ArrayVec<(i8, i8), 4> {
    let d = def_of(kind);
    let bits = d.masks[rotation.index()];
    let dim = d.dim as usize;
    let mut out = ArrayVec::new();
    for row in 0..dim {
        for col in 0..dim {
            if bits & (1 << (row * dim + col)) != 0 {
                out.push((col as i8, row as i8));
            }
        }
    }
    out
}
