use keystroke_reversi::game::captured_cells;
use keystroke_reversi::{Board, CellState, Engine, Input, Position, Tick, Turn};
use proptest::prelude::*;

const SIDE: usize = 6;

fn input_strategy() -> impl Strategy<Value = Input> {
    prop_oneof![
        2 => Just(Input::Up),
        2 => Just(Input::Down),
        2 => Just(Input::Left),
        2 => Just(Input::Right),
        3 => Just(Input::Commit),
        1 => Just(Input::Other),
    ]
}

fn cell_strategy() -> impl Strategy<Value = CellState> {
    prop_oneof![
        Just(CellState::Black),
        Just(CellState::White),
        Just(CellState::Empty),
    ]
}

fn board_from(cells: &[CellState]) -> Board {
    let mut board = Board::new(SIDE, SIDE);
    for (idx, &cell) in cells.iter().enumerate() {
        board.set(idx % SIDE, idx / SIDE, cell).unwrap();
    }
    board
}

fn inverted(board: &Board) -> Board {
    let mut out = Board::new(board.width(), board.height());
    for (pos, cell) in board.cells() {
        out.set(pos.x, pos.y, cell.opposite()).unwrap();
    }
    out
}

proptest! {
    #[test]
    fn scores_always_equal_cell_counts(inputs in prop::collection::vec(input_strategy(), 0..600)) {
        let mut engine = Engine::default();

        for input in inputs {
            let mover = engine.turn();
            match engine.update(input) {
                Ok(Tick::Played(play)) => {
                    if play.game_over {
                        prop_assert!(!engine.any_legal_move(Turn::Black));
                        prop_assert!(!engine.any_legal_move(Turn::White));
                    } else if play.passed {
                        prop_assert_eq!(engine.turn(), mover);
                        prop_assert!(!engine.any_legal_move(mover.next()));
                    } else {
                        prop_assert_eq!(engine.turn(), mover.next());
                    }
                }
                Ok(_) => {
                    prop_assert_eq!(engine.turn(), mover);
                }
                Err(over) => {
                    prop_assert!(engine.is_game_over());
                    prop_assert_eq!(
                        over.differential,
                        engine.black_score() as i32 - engine.white_score() as i32
                    );
                    break;
                }
            }

            let board = engine.board();
            prop_assert_eq!(engine.black_score() as usize, board.count(CellState::Black));
            prop_assert_eq!(engine.white_score() as usize, board.count(CellState::White));
            for (pos, cell) in board.cells() {
                if cell != CellState::Empty {
                    prop_assert_eq!(engine.can_capture(engine.turn(), pos), Ok(false));
                }
            }
        }
    }

    #[test]
    fn flips_mirror_under_colour_inversion(
        cells in prop::collection::vec(cell_strategy(), SIDE * SIDE),
        x in 0..SIDE,
        y in 0..SIDE,
    ) {
        let board = board_from(&cells);
        let mirror = inverted(&board);
        let pos = Position::new(x, y);

        let black_flips = captured_cells(&board, CellState::Black, pos).unwrap();
        let white_flips = captured_cells(&mirror, CellState::White, pos).unwrap();
        prop_assert_eq!(&black_flips, &white_flips);

        // Re-running the scan for the other colour on the mirrored board
        // recolours exactly the same cells back.
        let mut played = board.clone();
        let mut mirrored_play = mirror.clone();
        if !black_flips.is_empty() {
            played.set(x, y, CellState::Black).unwrap();
            mirrored_play.set(x, y, CellState::White).unwrap();
        }
        for flip in &black_flips {
            played.set(flip.x, flip.y, CellState::Black).unwrap();
            mirrored_play.set(flip.x, flip.y, CellState::White).unwrap();
        }
        prop_assert_eq!(inverted(&mirrored_play), played);
    }

    #[test]
    fn occupied_squares_never_capture(cells in prop::collection::vec(cell_strategy(), SIDE * SIDE)) {
        let board = board_from(&cells);

        for (pos, cell) in board.cells() {
            if cell != CellState::Empty {
                prop_assert!(captured_cells(&board, CellState::Black, pos).unwrap().is_empty());
                prop_assert!(captured_cells(&board, CellState::White, pos).unwrap().is_empty());
            }
        }
    }
}
