//! Piece catalog tests - masks, insets, and spawn positions.

use blockfall::core::pieces;
use blockfall::types::{PieceKind, Rotation};

#[test]
fn test_every_mask_has_four_cells() {
    for kind in PieceKind::ALL {
        for rotation in Rotation::ALL {
            assert_eq!(
                pieces::cells(kind, rotation).len(),
                4,
                "{kind:?} {rotation:?}"
            );
        }
    }
}

#[test]
fn test_insets_match_the_occupied_bounding_box() {
    for kind in PieceKind::ALL {
        let dim = pieces::dimension(kind);
        for rotation in Rotation::ALL {
            let cells = pieces::cells(kind, rotation);
            let min_col = cells.iter().map(|&(c, _)| c).min().unwrap();
            let max_col = cells.iter().map(|&(c, _)| c).max().unwrap();
            let min_row = cells.iter().map(|&(_, r)| r).min().unwrap();
            let max_row = cells.iter().map(|&(_, r)| r).max().unwrap();

            // left/top are the first occupied column/row; right/bottom use
            // the complementary `dim - last occupied` convention.
            let ins = pieces::insets(kind, rotation);
            assert_eq!(ins.left, min_col, "{kind:?} {rotation:?} left");
            assert_eq!(ins.right, dim - max_col, "{kind:?} {rotation:?} right");
            assert_eq!(ins.top, min_row, "{kind:?} {rotation:?} top");
            assert_eq!(ins.bottom, dim - max_row, "{kind:?} {rotation:?} bottom");
        }
    }
}

#[test]
fn test_is_tile_agrees_with_cells() {
    for kind in PieceKind::ALL {
        let dim = pieces::dimension(kind);
        for rotation in Rotation::ALL {
            let cells = pieces::cells(kind, rotation);
            for row in 0..dim {
                for col in 0..dim {
                    assert_eq!(
                        pieces::is_tile(kind, col, row, rotation),
                        cells.contains(&(col, row)),
                        "{kind:?} {rotation:?} ({col}, {row})"
                    );
                }
            }
        }
    }
}

#[test]
fn test_spawn_positions_center_the_frame() {
    // spawn column = 5 - dim / 2, spawn row = top inset at rotation 0.
    assert_eq!(pieces::spawn_position(PieceKind::I), (3, 1));
    assert_eq!(pieces::spawn_position(PieceKind::O), (4, 0));
    for kind in [
        PieceKind::J,
        PieceKind::L,
        PieceKind::S,
        PieceKind::Z,
        PieceKind::T,
    ] {
        assert_eq!(pieces::spawn_position(kind), (4, 0), "{kind:?}");
    }
}

#[test]
fn test_spawned_cells_start_at_the_top_of_the_board() {
    for kind in PieceKind::ALL {
        let (col, row) = pieces::spawn_position(kind);
        let ins = pieces::insets(kind, Rotation::North);
        assert_eq!(row, ins.top, "{kind:?} spawn row");

        for (dx, dy) in pieces::cells(kind, Rotation::North) {
            let x = col + dx;
            let y = row + dy;
            assert!((0..10).contains(&x), "{kind:?} column {x}");
            // Spawn row equals the top inset, so cells start no deeper than
            // twice the inset (row 2 for I, rows 0-1 for everything else).
            assert!((0..=2).contains(&y), "{kind:?} row {y}");
        }
        let top = pieces::cells(kind, Rotation::North)
            .iter()
            .map(|&(_, dy)| row + dy)
            .min()
            .unwrap();
        assert_eq!(top, 2 * ins.top, "{kind:?}");
    }
}

#[test]
fn test_o_piece_is_rotation_invariant() {
    let reference = pieces::cells(PieceKind::O, Rotation::North);
    for rotation in Rotation::ALL {
        assert_eq!(pieces::cells(PieceKind::O, rotation), reference);
    }
}

#[test]
fn test_rotation_steps_cycle() {
    let mut rotation = Rotation::North;
    for _ in 0..4 {
        rotation = rotation.rotate_cw();
    }
    assert_eq!(rotation, Rotation::North);
    assert_eq!(Rotation::North.rotate_ccw(), Rotation::West);
    assert_eq!(Rotation::West.rotate_cw(), Rotation::North);
}
