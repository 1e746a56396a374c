use crate::error::ServiceError;
use crate::game_service::model::{
    ErrorBody, GameMode, GameState, ModelStatus, MoveRequest, NewGameRequest, TrainStats,
};

use async_trait::async_trait;
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use tracing::{debug, error, info};

/// The four backend calls the board needs.
#[async_trait]
pub trait GameBackend: Send + Sync {
    async fn new_game(&self, mode: &GameMode) -> Result<GameState, ServiceError>;

    async fn make_move(&self, request: MoveRequest) -> Result<GameState, ServiceError>;

    async fn train(&self) -> Result<TrainStats, ServiceError>;

    async fn model_exists(&self) -> Result<bool, ServiceError>;
}

#[derive(Clone)]
pub struct GameService {
    client: Client,
    server_url: String,
}

impl GameService {
    /// Expects a URL already passed through `config::normalize_server_url`.
    pub fn new(server_url: String) -> Self {
        Self {
            client: Client::new(),
            server_url,
        }
    }

    pub fn server_url(&self) -> &str {
        &self.server_url
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.server_url, path)
    }
}

async fn read_json<T: DeserializeOwned>(response: Response) -> Result<T, ServiceError> {
    let bytes = response.bytes().await?;
    Ok(serde_json::from_slice(&bytes)?)
}

// Moves report failure through an `error` field, even with a 2xx status.
fn move_reply(
    status: reqwest::StatusCode,
    body: serde_json::Value,
) -> Result<GameState, ServiceError> {
    if let Some(message) = body.get("error").and_then(|e| e.as_str()) {
        return Err(ServiceError::Rejected(message.to_string()));
    }
    if !status.is_success() {
        return Err(ServiceError::Server {
            status: status.as_u16(),
        });
    }
    Ok(serde_json::from_value(body)?)
}

#[async_trait]
impl GameBackend for GameService {
    async fn new_game(&self, mode: &GameMode) -> Result<GameState, ServiceError> {
        debug!("Requesting new game in mode {}", mode);

        let response = self
            .client
            .post(self.endpoint("/api/new-game"))
            .json(&NewGameRequest { mode: mode.clone() })
            .send()
            .await
            .map_err(|e| {
                error!("❌ Network error while starting game: {}", e);
                e
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.bytes().await?;
            let message = serde_json::from_slice::<ErrorBody>(&body)
                .ok()
                .and_then(|b| b.error);
            error!(
                "❌ Server refused new game ({}): {}",
                status,
                message.as_deref().unwrap_or("<no message>")
            );
            return Err(match message {
                Some(message) => ServiceError::Rejected(message),
                None => ServiceError::Server {
                    status: status.as_u16(),
                },
            });
        }

        let state: GameState = read_json(response).await?;
        info!("✅ New game started in mode {}", mode);
        Ok(state)
    }

    async fn make_move(&self, request: MoveRequest) -> Result<GameState, ServiceError> {
        info!("📤 Sending move ({}, {})", request.row, request.col);

        let response = self
            .client
            .post(self.endpoint("/api/move"))
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                error!("❌ Network error while sending move: {}", e);
                e
            })?;

        let status = response.status();
        let body: serde_json::Value = read_json(response).await?;
        match move_reply(status, body) {
            Ok(state) => {
                if let Some(ai_move) = state.ai_move {
                    info!("🤖 AI replied at ({}, {})", ai_move.row, ai_move.col);
                }
                Ok(state)
            }
            Err(e) => {
                error!("❌ Move ({}, {}) failed: {}", request.row, request.col, e);
                Err(e)
            }
        }
    }

    async fn train(&self) -> Result<TrainStats, ServiceError> {
        info!("🏋️ Requesting model training");

        let response = self
            .client
            .post(self.endpoint("/api/train"))
            .send()
            .await?;
        let stats: TrainStats = read_json(response).await?;

        info!(
            "✅ Training finished: P1 {} / P2 {} / ties {}",
            stats.p1_wins, stats.p2_wins, stats.ties
        );
        Ok(stats)
    }

    async fn model_exists(&self) -> Result<bool, ServiceError> {
        let response = self
            .client
            .get(self.endpoint("/api/model-exists"))
            .send()
            .await?;
        let status: ModelStatus = read_json(response).await?;

        debug!("Trained model present: {}", status.exists);
        Ok(status.exists)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::StatusCode;
    use serde_json::json;

    fn empty_state() -> serde_json::Value {
        json!({
            "board": [[0, 0, 0], [0, 0, 0], [0, 0, 0]],
            "current_player": 1,
            "done": false,
            "winner": null
        })
    }

    #[test]
    fn move_error_field_wins_over_success_status() {
        let mut body = empty_state();
        body["error"] = json!("Cell already occupied.");

        match move_reply(StatusCode::OK, body) {
            Err(ServiceError::Rejected(message)) => assert_eq!(message, "Cell already occupied."),
            other => panic!("expected rejection, got {other:?}"),
        }
    }

    #[test]
    fn move_failure_status_without_message() {
        let result = move_reply(StatusCode::INTERNAL_SERVER_ERROR, json!({}));
        assert!(matches!(result, Err(ServiceError::Server { status: 500 })));
    }

    #[test]
    fn move_success_decodes_state() {
        let state = move_reply(StatusCode::OK, empty_state()).unwrap();
        assert!(!state.done);
    }

    #[test]
    fn endpoints_join_configured_url() {
        let url = crate::config::normalize_server_url("http://localhost:5000/").unwrap();
        let service = GameService::new(url);
        assert_eq!(service.endpoint("/api/move"), "http://localhost:5000/api/move");
    }
}
