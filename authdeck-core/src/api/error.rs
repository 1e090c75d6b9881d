use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),

    /// The request never completed.
    #[error("could not reach {endpoint}: {source}")]
    Transport {
        endpoint: String,
        #[source]
        source: reqwest::Error,
    },

    /// The API answered with a non-success HTTP status.
    #[error("{endpoint} returned {status}: {message}")]
    Status {
        endpoint: String,
        status: u16,
        message: String,
    },

    /// The API answered `success: false`.
    #[error("{message}")]
    Rejected { message: String },

    /// The body did not have the expected shape.
    #[error("unexpected response from {endpoint}: {reason}")]
    Malformed { endpoint: String, reason: String },
}

impl ApiError {
    /// Message worth showing to a user; prefers what the server said.
    pub fn user_message(&self) -> String {
        match self {
            Self::Status { message, .. } | Self::Rejected { message } => message.clone(),
            other => other.to_string(),
        }
    }

    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Transport { .. })
    }
}
