/// Errors from talking to the game backend.
#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    #[error("network error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("invalid response: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("server responded with status {status}")]
    Server { status: u16 },

    /// The server explained the failure in an `error` field.
    #[error("{0}")]
    Rejected(String),
}

/// Errors that can occur when building the client configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid server url {url:?}: {reason}")]
    InvalidServerUrl { url: String, reason: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejected_error_displays_server_message() {
        let err = ServiceError::Rejected("Cell already occupied.".to_string());
        assert_eq!(err.to_string(), "Cell already occupied.");
    }

    #[test]
    fn server_error_display() {
        let err = ServiceError::Server { status: 502 };
        assert_eq!(err.to_string(), "server responded with status 502");
    }

    #[test]
    fn config_error_display() {
        let err = ConfigError::InvalidServerUrl {
            url: "ftp://host".to_string(),
            reason: "unsupported scheme ftp".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "invalid server url \"ftp://host\": unsupported scheme ftp"
        );
    }
}
