use crate::api::{
    ApiError, AuthApi, LoginRequest, LoginResponse, PasswordResetRequest, PasswordResetResponse,
    RegisterRequest, RegisterResponse, ResetPasswordRequest, StatusResponse, VerifyOtpRequest,
};
use async_trait::async_trait;
use std::sync::Mutex;

/// Records every call and answers with canned responses.
pub struct FakeApi {
    pub calls: Mutex<Vec<String>>,
    pub reset_bodies: Mutex<Vec<ResetPasswordRequest>>,
    pub mfa_secret: String,
    pub requires_mfa: bool,
    pub valid_otp: String,
    pub reset_issued: bool,
    pub reset_success: Option<bool>,
    /// Answer register and login with `success: false` and this message.
    pub reject_with: Option<String>,
}

impl Default for FakeApi {
    fn default() -> Self {
        Self {
            calls: Mutex::new(Vec::new()),
            reset_bodies: Mutex::new(Vec::new()),
            mfa_secret: "JBSWY3DPEHPK3PXP".to_string(),
            requires_mfa: true,
            valid_otp: "123456".to_string(),
            reset_issued: true,
            reset_success: Some(true),
            reject_with: None,
        }
    }
}

impl FakeApi {
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: &str) {
        self.calls.lock().unwrap().push(call.to_string());
    }
}

#[async_trait]
impl AuthApi for FakeApi {
    async fn register(&self, _req: &RegisterRequest) -> Result<RegisterResponse, ApiError> {
        self.record("register");
        if self.reject_with.is_some() {
            return Ok(RegisterResponse {
                success: Some(false),
                mfa_secret: None,
                message: self.reject_with.clone(),
            });
        }
        Ok(RegisterResponse {
            success: None,
            mfa_secret: Some(self.mfa_secret.clone()),
            message: None,
        })
    }

    async fn login(&self, req: &LoginRequest) -> Result<LoginResponse, ApiError> {
        self.record("login");
        if req.password == "wrong-password" {
            return Err(ApiError::Status {
                endpoint: "/login".to_string(),
                status: 401,
                message: "Invalid credentials".to_string(),
            });
        }
        if self.reject_with.is_some() {
            return Ok(LoginResponse {
                success: Some(false),
                user_id: None,
                requires_mfa: false,
                message: self.reject_with.clone(),
            });
        }
        Ok(LoginResponse {
            success: None,
            user_id: Some("u-1".to_string()),
            requires_mfa: self.requires_mfa,
            message: None,
        })
    }

    async fn verify_otp(&self, req: &VerifyOtpRequest) -> Result<StatusResponse, ApiError> {
        self.record("verify_otp");
        Ok(StatusResponse {
            success: Some(req.token == self.valid_otp),
            message: None,
        })
    }

    async fn request_password_reset(
        &self,
        _req: &PasswordResetRequest,
    ) -> Result<PasswordResetResponse, ApiError> {
        self.record("request_password_reset");
        if self.reset_issued {
            Ok(PasswordResetResponse {
                success: true,
                reset_token: Some("reset-abc".to_string()),
                mfa_secret: Some(self.mfa_secret.clone()),
                message: None,
            })
        } else {
            Ok(PasswordResetResponse {
                success: false,
                reset_token: None,
                mfa_secret: None,
                message: Some("No account with that email".to_string()),
            })
        }
    }

    async fn reset_password(&self, req: &ResetPasswordRequest) -> Result<StatusResponse, ApiError> {
        self.record("reset_password");
        self.reset_bodies.lock().unwrap().push(req.clone());
        Ok(StatusResponse {
            success: self.reset_success,
            message: Some("Password policy violated".to_string()),
        })
    }
}
