use crate::controller::{BoardController, AI_HIGHLIGHT};
use crate::game_service::model::GameMode;
use crate::game_service::service::GameBackend;

use std::sync::Arc;
use tokio::sync::Mutex;
use tokio::time::Instant;
use tracing::{error, info};

/// Called after every change to the board so the window can repaint.
pub type Notify = Arc<dyn Fn() + Send + Sync>;

/// Connects user actions to the backend.
///
/// The controller lock is held only to decide or apply, never across a request.
#[derive(Clone)]
pub struct Dispatcher {
    backend: Arc<dyn GameBackend>,
    controller: Arc<Mutex<BoardController>>,
    notify: Notify,
}

impl Dispatcher {
    pub fn new(backend: Arc<dyn GameBackend>, notify: Notify) -> Self {
        Self {
            backend,
            controller: Arc::new(Mutex::new(BoardController::new())),
            notify,
        }
    }

    pub fn controller(&self) -> Arc<Mutex<BoardController>> {
        Arc::clone(&self.controller)
    }

    pub async fn new_game(&self, mode: GameMode) {
        self.controller.lock().await.begin_new_game(mode.clone());

        let result = self.backend.new_game(&mode).await;
        if let Err(e) = &result {
            error!("❌ Failed to start {} game: {}", mode, e);
        }

        self.controller.lock().await.apply_new_game(result);
        (self.notify)();
    }

    /// Restarts with the mode of the current game, if one was ever chosen.
    pub async fn restart(&self) {
        let mode = self.controller.lock().await.current_mode().cloned();
        match mode {
            Some(mode) => self.new_game(mode).await,
            None => info!("No mode selected yet; nothing to restart"),
        }
    }

    /// Sends a move unless the click is ignored. Returns whether a request went out.
    pub async fn make_move(&self, row: usize, col: usize) -> bool {
        let request = match self.controller.lock().await.move_request(row, col) {
            Some(request) => request,
            None => return false,
        };

        let result = self.backend.make_move(request).await;
        let highlighted = result.as_ref().map(|s| s.ai_move.is_some()).unwrap_or(false);

        self.controller
            .lock()
            .await
            .apply_move(result, Instant::now());
        (self.notify)();

        if highlighted {
            self.schedule_highlight_expiry();
        }
        true
    }

    fn schedule_highlight_expiry(&self) {
        let controller = Arc::clone(&self.controller);
        let notify = Arc::clone(&self.notify);

        tokio::spawn(async move {
            tokio::time::sleep(AI_HIGHLIGHT).await;
            if controller.lock().await.expire_highlight(Instant::now()) {
                notify();
            }
        });
    }

    pub async fn train_model(&self) {
        self.controller.lock().await.begin_training();
        (self.notify)();

        let result = self.backend.train().await;
        if let Err(e) = &result {
            error!("❌ Training request failed: {}", e);
        }

        self.controller.lock().await.apply_training(result);
        (self.notify)();
    }

    pub async fn check_model(&self) {
        let result = self.backend.model_exists().await;
        match &result {
            Ok(true) => info!("✅ Trained model available"),
            Ok(false) => info!("No trained model on the server"),
            Err(e) => error!("❌ Model check failed: {}", e),
        }

        self.controller.lock().await.apply_model_check(result);
        (self.notify)();
    }
}
