//! Plain-data projection of a [`GameState`] that the window paints.
//!
//! Nothing here touches the network or egui, so every rule about what a
//! cell shows, whether it can be clicked and what the status line says is
//! checked by ordinary unit tests.

use crate::game_service::model::{Cell, GameState, Mark, TrainStats, BOARD_SIZE};

pub const TRAINING_MESSAGE: &str = "Training AI model... please wait.";
pub const NO_MODEL_MESSAGE: &str = "No trained model found. Train first to play vs AI.";
pub const NEW_GAME_FAILED: &str = "Error starting game";
pub const WELCOME_MESSAGE: &str = "Choose a mode to start a game.";

/// Styling applied to a cell, mirroring the `cell-o` / `cell-x` classes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CellStyle {
    #[default]
    Plain,
    O,
    X,
}

impl CellStyle {
    pub fn class_name(self) -> &'static str {
        match self {
            CellStyle::Plain => "cell",
            CellStyle::O => "cell cell-o",
            CellStyle::X => "cell cell-x",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CellView {
    pub symbol: &'static str,
    pub style: CellStyle,
    pub disabled: bool,
    /// Set while the backend's last reply is being highlighted.
    pub ai_move: bool,
}

pub type CellGrid = [[CellView; BOARD_SIZE]; BOARD_SIZE];

/// Result of rendering one game state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoardRender {
    pub cells: CellGrid,
    pub status: String,
    pub done: bool,
}

/// Everything the window shows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoardView {
    pub cells: CellGrid,
    pub status: String,
    pub new_game_visible: bool,
    pub train_visible: bool,
    pub train_enabled: bool,
}

impl Default for BoardView {
    fn default() -> Self {
        BoardView {
            cells: CellGrid::default(),
            status: WELCOME_MESSAGE.to_string(),
            new_game_visible: false,
            train_visible: false,
            train_enabled: true,
        }
    }
}

impl BoardView {
    pub fn cell(&self, row: usize, col: usize) -> Option<&CellView> {
        self.cells.get(row).and_then(|r| r.get(col))
    }
}

pub fn render_cell(cell: Cell, done: bool) -> CellView {
    let (symbol, style) = match cell {
        Cell::Empty => ("", CellStyle::Plain),
        Cell::Marked(Mark::O) => ("O", CellStyle::O),
        Cell::Marked(Mark::X) => ("X", CellStyle::X),
    };

    CellView {
        symbol,
        style,
        disabled: done || !cell.is_empty(),
        ai_move: false,
    }
}

pub fn status_text(state: &GameState) -> String {
    if state.done {
        match state.winner {
            Some(winner) => format!("Player {winner} wins!"),
            None => "It's a tie!".to_string(),
        }
    } else {
        format!("Player {}'s turn", state.current_player)
    }
}

pub fn training_summary(stats: &TrainStats) -> String {
    format!(
        "Training done! P1: {}, P2: {}, Ties: {}",
        stats.p1_wins, stats.p2_wins, stats.ties
    )
}

pub fn render_board(state: &GameState) -> BoardRender {
    let mut cells = CellGrid::default();
    for (row, values) in state.board.iter().enumerate() {
        for (col, &value) in values.iter().enumerate() {
            cells[row][col] = render_cell(value, state.done);
        }
    }

    BoardRender {
        cells,
        status: status_text(state),
        done: state.done,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game_service::model::Board;

    const E: Cell = Cell::Empty;
    const O: Cell = Cell::Marked(Mark::O);
    const X: Cell = Cell::Marked(Mark::X);

    fn state(board: Board, current_player: Mark, done: bool, winner: Option<Mark>) -> GameState {
        GameState {
            board,
            current_player,
            done,
            winner,
            ai_move: None,
            mode: None,
        }
    }

    #[test]
    fn mid_game_board_renders_turn_and_disabled_cells() {
        let s = state([[O, X, E], [E, E, E], [E, E, E]], Mark::X, false, None);
        let render = render_board(&s);

        assert_eq!(render.status, "Player X's turn");
        assert_eq!(render.cells[0][0].symbol, "O");
        assert!(render.cells[0][0].disabled);
        assert_eq!(render.cells[0][1].symbol, "X");
        assert_eq!(render.cells[0][1].style.class_name(), "cell cell-x");
        assert!(!render.cells[0][2].disabled);
        assert_eq!(render.cells[0][2].symbol, "");
        assert_eq!(render.cells[0][2].style.class_name(), "cell");
    }

    #[test]
    fn win_disables_every_cell() {
        let s = state([[O, O, O], [X, X, E], [E, E, E]], Mark::X, true, Some(Mark::O));
        let render = render_board(&s);

        assert_eq!(render.status, "Player O wins!");
        assert!(render.cells.iter().flatten().all(|c| c.disabled));
    }

    #[test]
    fn x_win_message() {
        let s = state([[X, X, X], [O, O, E], [O, E, E]], Mark::O, true, Some(Mark::X));
        assert_eq!(status_text(&s), "Player X wins!");
    }

    #[test]
    fn finished_without_winner_is_a_tie() {
        let s = state([[O, X, O], [O, X, X], [X, O, O]], Mark::X, true, None);
        assert_eq!(status_text(&s), "It's a tie!");
    }

    #[test]
    fn o_turn_message() {
        let s = state([[E; 3]; 3], Mark::O, false, None);
        assert_eq!(status_text(&s), "Player O's turn");
    }

    #[test]
    fn rendering_is_repeatable() {
        let s = state([[O, X, E], [E, O, E], [X, E, E]], Mark::X, false, None);
        assert_eq!(render_board(&s), render_board(&s));
    }

    #[test]
    fn training_summary_format() {
        let stats = TrainStats {
            p1_wins: 3,
            p2_wins: 2,
            ties: 1,
        };
        assert_eq!(training_summary(&stats), "Training done! P1: 3, P2: 2, Ties: 1");
    }
}
