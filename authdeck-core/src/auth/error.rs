use crate::api::ApiError;
use crate::auth::flow::FlowError;
use crate::auth::validation::ValidationError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AuthError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Api(#[from] ApiError),

    #[error(transparent)]
    Flow(#[from] FlowError),

    #[error("invalid recovery link")]
    InvalidRecoveryLink,
}

impl AuthError {
    /// Message for the dismissible error notice.
    pub fn user_message(&self) -> String {
        match self {
            AuthError::Api(e) => e.user_message(),
            other => other.to_string(),
        }
    }

    /// Whether retrying the same action can help (validation failures cannot).
    pub fn is_retryable(&self) -> bool {
        matches!(self, AuthError::Api(_))
    }
}
