mod client;
mod error;
mod types;

pub use client::ApiClient;
pub use error::ApiError;
pub use types::*;

use async_trait::async_trait;
use serde_json::Value;

pub mod endpoints {
    pub const REGISTER: &str = "/api/register";
    pub const LOGIN: &str = "/login";
    pub const VERIFY_OTP: &str = "/verify-otp";
    pub const REQUEST_PASSWORD_RESET: &str = "/request-password-reset";
    pub const RESET_PASSWORD: &str = "/reset-password";
    pub const GET_SERVER: &str = "/getServer";
}

/// The authentication half of the external API.
#[async_trait]
pub trait AuthApi: Send + Sync {
    async fn register(&self, req: &RegisterRequest) -> Result<RegisterResponse, ApiError>;

    async fn login(&self, req: &LoginRequest) -> Result<LoginResponse, ApiError>;

    async fn verify_otp(&self, req: &VerifyOtpRequest) -> Result<StatusResponse, ApiError>;

    async fn request_password_reset(
        &self,
        req: &PasswordResetRequest,
    ) -> Result<PasswordResetResponse, ApiError>;

    async fn reset_password(&self, req: &ResetPasswordRequest) -> Result<StatusResponse, ApiError>;
}

/// Anything that can hand over the raw request log list.
#[async_trait]
pub trait LogSource: Send + Sync {
    async fn fetch_logs(&self) -> Result<Vec<Value>, ApiError>;
}
