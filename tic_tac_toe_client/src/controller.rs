use crate::error::ServiceError;
use crate::game_service::model::{GameMode, GameState, MoveRequest, TrainStats, BOARD_SIZE};
use crate::view::{
    render_board, training_summary, BoardView, NEW_GAME_FAILED, NO_MODEL_MESSAGE,
    TRAINING_MESSAGE,
};

use std::time::Duration;
use tokio::time::Instant;
use tracing::debug;

/// How long the backend's reply stays highlighted.
pub const AI_HIGHLIGHT: Duration = Duration::from_millis(500);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Highlight {
    row: usize,
    col: usize,
    until: Instant,
}

/// Client-side board state.
///
/// Holds only what the last server reply said plus the selected mode. The
/// methods come in pairs: one decides what to send, the other folds the
/// reply into the view. Network I/O lives in [`crate::dispatch`].
#[derive(Debug, Clone, Default)]
pub struct BoardController {
    current_mode: Option<GameMode>,
    game_done: bool,
    view: BoardView,
    highlight: Option<Highlight>,
}

impl BoardController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current_mode(&self) -> Option<&GameMode> {
        self.current_mode.as_ref()
    }

    pub fn game_done(&self) -> bool {
        self.game_done
    }

    pub fn view(&self) -> &BoardView {
        &self.view
    }

    pub fn begin_new_game(&mut self, mode: GameMode) {
        self.current_mode = Some(mode);
    }

    pub fn apply_new_game(&mut self, result: Result<GameState, ServiceError>) {
        match result {
            Ok(state) => {
                self.render(&state);
                self.view.new_game_visible = true;
                self.view.train_visible = false;
            }
            Err(ServiceError::Server { .. }) => self.view.status = NEW_GAME_FAILED.to_string(),
            Err(e) => self.view.status = e.to_string(),
        }
    }

    /// Returns the request to send for a click, or `None` when the click is ignored.
    pub fn move_request(&self, row: usize, col: usize) -> Option<MoveRequest> {
        if self.game_done {
            debug!("Ignoring click at ({}, {}): game is over", row, col);
            return None;
        }
        if row >= BOARD_SIZE || col >= BOARD_SIZE {
            debug!("Ignoring click at ({}, {}): off the board", row, col);
            return None;
        }
        if self.view.cells[row][col].disabled {
            debug!("Ignoring click at ({}, {}): cell is disabled", row, col);
            return None;
        }
        Some(MoveRequest { row, col })
    }

    pub fn apply_move(&mut self, result: Result<GameState, ServiceError>, now: Instant) {
        let state = match result {
            Ok(state) => state,
            Err(e) => {
                self.view.status = e.to_string();
                return;
            }
        };

        self.render(&state);

        if let Some(ai_move) = state.ai_move {
            if let Some(cell) = self
                .view
                .cells
                .get_mut(ai_move.row)
                .and_then(|r| r.get_mut(ai_move.col))
            {
                cell.ai_move = true;
                self.highlight = Some(Highlight {
                    row: ai_move.row,
                    col: ai_move.col,
                    until: now + AI_HIGHLIGHT,
                });
            }
        }
    }

    /// Time left on the current highlight, if any.
    pub fn highlight_remaining(&self, now: Instant) -> Option<Duration> {
        self.highlight
            .map(|h| h.until.saturating_duration_since(now))
    }

    /// Clears an expired highlight. Returns true if the view changed.
    pub fn expire_highlight(&mut self, now: Instant) -> bool {
        match self.highlight {
            Some(h) if now >= h.until => {
                self.view.cells[h.row][h.col].ai_move = false;
                self.highlight = None;
                true
            }
            _ => false,
        }
    }

    pub fn begin_training(&mut self) {
        self.view.status = TRAINING_MESSAGE.to_string();
        self.view.train_enabled = false;
    }

    pub fn apply_training(&mut self, result: Result<TrainStats, ServiceError>) {
        self.view.status = match result {
            Ok(stats) => training_summary(&stats),
            Err(e) => e.to_string(),
        };
        self.view.train_visible = false;
    }

    pub fn apply_model_check(&mut self, result: Result<bool, ServiceError>) {
        match result {
            Ok(true) => {}
            Ok(false) => {
                self.view.status = NO_MODEL_MESSAGE.to_string();
                self.view.train_visible = true;
                self.view.train_enabled = true;
            }
            Err(e) => self.view.status = e.to_string(),
        }
    }

    fn render(&mut self, state: &GameState) {
        let render = render_board(state);
        self.game_done = render.done;
        self.view.cells = render.cells;
        self.view.status = render.status;
        self.highlight = None;
    }
}
