use proptest::prelude::*;
use tic_tac_toe_client::game_service::model::{Board, Cell, GameState, Mark};
use tic_tac_toe_client::view::{render_board, CellStyle};

fn mark() -> impl Strategy<Value = Mark> {
    prop_oneof![Just(Mark::O), Just(Mark::X)]
}

fn cell() -> impl Strategy<Value = Cell> {
    prop_oneof![Just(Cell::Empty), mark().prop_map(Cell::Marked)]
}

fn board() -> impl Strategy<Value = Board> {
    prop::array::uniform3(prop::array::uniform3(cell()))
}

fn game_state() -> impl Strategy<Value = GameState> {
    (board(), mark(), any::<bool>(), prop::option::of(mark())).prop_map(
        |(board, current_player, done, winner)| GameState {
            board,
            current_player,
            done,
            winner,
            ai_move: None,
            mode: None,
        },
    )
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    #[test]
    fn render_is_repeatable(state in game_state()) {
        prop_assert_eq!(render_board(&state), render_board(&state));
    }

    #[test]
    fn cells_follow_board_values(state in game_state()) {
        let render = render_board(&state);
        prop_assert_eq!(render.done, state.done);

        for row in 0..3 {
            for col in 0..3 {
                let value = state.board[row][col];
                let view = render.cells[row][col];

                prop_assert_eq!(view.disabled, state.done || !value.is_empty());
                prop_assert!(!view.ai_move);
                match value {
                    Cell::Empty => {
                        prop_assert_eq!(view.symbol, "");
                        prop_assert_eq!(view.style, CellStyle::Plain);
                    }
                    Cell::Marked(Mark::O) => {
                        prop_assert_eq!(view.symbol, "O");
                        prop_assert_eq!(view.style, CellStyle::O);
                    }
                    Cell::Marked(Mark::X) => {
                        prop_assert_eq!(view.symbol, "X");
                        prop_assert_eq!(view.style, CellStyle::X);
                    }
                }
            }
        }
    }

    #[test]
    fn status_matches_outcome(state in game_state()) {
        let status = render_board(&state).status;
        let expected = match (state.done, state.winner) {
            (true, Some(Mark::O)) => "Player O wins!",
            (true, Some(Mark::X)) => "Player X wins!",
            (true, None) => "It's a tie!",
            (false, _) => match state.current_player {
                Mark::O => "Player O's turn",
                Mark::X => "Player X's turn",
            },
        };
        prop_assert_eq!(status, expected);
    }
}
