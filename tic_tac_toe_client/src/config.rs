use crate::error::ConfigError;

use clap::Parser;
use reqwest::Url;

pub const DEFAULT_SERVER_URL: &str = "http://127.0.0.1:5000";

/// Tic-Tac-Toe board client for the training backend
#[derive(Parser, Debug, Clone)]
#[command(name = "tic_tac_toe_client")]
#[command(version)]
pub struct Cli {
    /// Base URL of the game backend
    #[arg(long, env = "TTT_SERVER_URL", default_value = DEFAULT_SERVER_URL)]
    pub server_url: String,

    /// Log filter, e.g. "info" or "tic_tac_toe_client=debug"
    #[arg(long, env = "TTT_LOG", default_value = "info")]
    pub log_level: String,

    /// Skip asking the backend for a trained model on startup
    #[arg(long)]
    pub skip_model_check: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    pub server_url: String,
    pub log_filter: String,
    pub check_model: bool,
}

impl ClientConfig {
    pub fn from_cli(cli: Cli) -> Result<Self, ConfigError> {
        Ok(ClientConfig {
            server_url: normalize_server_url(&cli.server_url)?,
            log_filter: cli.log_level,
            check_model: !cli.skip_model_check,
        })
    }
}

pub fn normalize_server_url(raw: &str) -> Result<String, ConfigError> {
    let invalid = |reason: String| ConfigError::InvalidServerUrl {
        url: raw.to_string(),
        reason,
    };

    let url = Url::parse(raw.trim()).map_err(|e| invalid(e.to_string()))?;
    match url.scheme() {
        "http" | "https" => {}
        other => return Err(invalid(format!("unsupported scheme {other}"))),
    }

    Ok(url.as_str().trim_end_matches('/').to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let cli = Cli::try_parse_from(["tic_tac_toe_client"]).unwrap();
        let config = ClientConfig::from_cli(cli).unwrap();

        assert_eq!(config.server_url, DEFAULT_SERVER_URL);
        assert!(config.check_model);
    }

    #[test]
    fn flags_override_defaults() {
        let cli = Cli::try_parse_from([
            "tic_tac_toe_client",
            "--server-url",
            "https://ttt.example.com/",
            "--log-level",
            "debug",
            "--skip-model-check",
        ])
        .unwrap();
        let config = ClientConfig::from_cli(cli).unwrap();

        assert_eq!(config.server_url, "https://ttt.example.com");
        assert_eq!(config.log_filter, "debug");
        assert!(!config.check_model);
    }

    #[test]
    fn keeps_path_prefix() {
        assert_eq!(
            normalize_server_url("http://localhost:8080/game/").unwrap(),
            "http://localhost:8080/game"
        );
    }

    #[test]
    fn rejects_non_http_scheme() {
        let err = normalize_server_url("ws://localhost:5000").unwrap_err();
        assert!(err.to_string().contains("unsupported scheme ws"));
    }

    #[test]
    fn rejects_garbage() {
        assert!(normalize_server_url("not a url").is_err());
    }
}
