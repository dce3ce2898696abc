//! Property tests over random seeds and random input streams

use proptest::prelude::*;

use srs_tetris::core::{Board, BoardConfig, Piece, PieceBag, Position, SimpleRng};
use srs_tetris::engine::{FrameDriver, FrameInput};
use srs_tetris::types::{GameAction, PieceKind, Turn, FRAMES_PER_SECOND, MATRIX_WIDTH};

const ACTIONS: [GameAction; 8] = [
    GameAction::MoveLeft,
    GameAction::MoveRight,
    GameAction::SoftDrop,
    GameAction::HardDrop,
    GameAction::RotateCw,
    GameAction::RotateCcw,
    GameAction::Rotate180,
    GameAction::Hold,
];

fn frame(code: u8) -> FrameInput {
    let input = FrameInput::new(1.0 / FRAMES_PER_SECOND);
    match code as usize {
        i if i < ACTIONS.len() => input.press(ACTIONS[i]),
        // Remaining codes hold a direction or do nothing.
        8 => input.hold_key(GameAction::MoveLeft),
        9 => input.hold_key(GameAction::MoveRight),
        10 => input.hold_key(GameAction::SoftDrop),
        _ => input,
    }
}

proptest! {
    #[test]
    fn collision_check_is_pure(seed in any::<u32>(), row in -4i32..40, column in -4i32..12) {
        let board = Board::new(BoardConfig::cheese(6).with_seed(seed));
        let before = board.matrix().clone();
        let position = Position::new(row, column);

        let first = board.piece_collision_check(board.active(), position);
        let second = board.piece_collision_check(board.active(), position);
        prop_assert_eq!(first, second);
        prop_assert_eq!(board.matrix(), &before);
    }

    #[test]
    fn turn_then_opposite_turn_restores_piece(kind_index in 0usize..7, turns in prop::collection::vec(0u8..3, 0..12)) {
        let kind = PieceKind::ALL[kind_index];
        let mut piece = Piece::new(kind);
        for &code in &turns {
            piece.rotate([Turn::Cw, Turn::Ccw, Turn::Half][code as usize]);
        }
        let reached = piece.clone();

        // Undo in reverse order.
        for &code in turns.iter().rev() {
            piece.rotate([Turn::Ccw, Turn::Cw, Turn::Half][code as usize]);
        }
        prop_assert_eq!(&piece, &Piece::new(kind));
        prop_assert_eq!(reached.cells().count(), 4);
    }

    #[test]
    fn every_bag_window_is_a_permutation(seed in any::<u32>()) {
        let mut rng = SimpleRng::new(seed);
        let mut bag = PieceBag::new();
        for _ in 0..5 {
            let mut window: Vec<_> = (0..7).map(|_| bag.draw(&mut rng)).collect();
            window.sort_by_key(|k| k.index());
            prop_assert_eq!(window, PieceKind::ALL.to_vec());
        }
    }

    #[test]
    fn placed_blocks_account_for_every_locked_piece(
        seed in any::<u32>(),
        codes in prop::collection::vec(0u8..14, 1..400),
    ) {
        let mut board = Board::new(BoardConfig::line_clear(0).with_seed(seed));
        let mut driver = FrameDriver::new();
        for &code in &codes {
            driver.step(&mut board, &frame(code)).unwrap();
        }

        let placed = board.matrix().placed_count();
        let cleared = board.objective().score() as usize;
        prop_assert_eq!(placed + MATRIX_WIDTH * cleared, 4 * board.pieces_locked() as usize);

        // The falling piece always sits where it fits.
        if !board.topped_out() {
            prop_assert!(board.piece_collision_check(board.active(), board.position()));
        }
    }

    #[test]
    fn cheese_rows_each_have_one_hole(seed in any::<u32>(), rows in 1u32..18) {
        let board = Board::new(BoardConfig::cheese(rows).with_seed(seed));
        for row in (40 - rows as usize)..40 {
            let placed = board.matrix().row(row).iter().filter(|c| c.is_placed()).count();
            prop_assert_eq!(placed, MATRIX_WIDTH - 1);
        }
        prop_assert_eq!(board.matrix().placed_count(), (MATRIX_WIDTH - 1) * rows as usize);
    }
}
