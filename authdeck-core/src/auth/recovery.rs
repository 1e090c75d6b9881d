use crate::api::{ApiError, AuthApi, PasswordResetRequest, ResetPasswordRequest};
use crate::auth::error::AuthError;
use crate::auth::validation::{require, validate_confirmation, validate_email, validate_password};
use crate::config::ClientConfig;
use crate::routes::Route;

/// What `/request-password-reset` hands back on success.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResetTicket {
    pub reset_token: String,
    pub mfa_secret: Option<String>,
    pub message: Option<String>,
}

/// A recovery link of the form `/reset-password?userId=..`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResetLink {
    pub user_id: String,
}

impl ResetLink {
    pub fn parse(link: &str) -> Result<Self, AuthError> {
        match Route::parse(link) {
            Some(Route::ResetPassword {
                user_id: Some(user_id),
            }) => Ok(Self { user_id }),
            _ => Err(AuthError::InvalidRecoveryLink),
        }
    }
}

/// Forgot-password and reset-password flows.
pub struct PasswordRecovery<'a, A> {
    api: &'a A,
    min_password_length: usize,
    min_dialog_password_length: usize,
}

impl<'a, A: AuthApi> PasswordRecovery<'a, A> {
    /// `min_password_length` applies to the link-based reset form,
    /// `min_dialog_password_length` to the token-based dialog.
    pub fn new(api: &'a A, min_password_length: usize, min_dialog_password_length: usize) -> Self {
        Self {
            api,
            min_password_length,
            min_dialog_password_length,
        }
    }

    /// Link form uses `min_password_length`, the dialog the registration minimum.
    pub fn from_config(api: &'a A, cfg: &ClientConfig) -> Self {
        Self::new(api, cfg.min_password_length, cfg.min_register_password_length)
    }

    pub async fn request_reset(&self, email: &str) -> Result<ResetTicket, AuthError> {
        let email = validate_email(email)?.to_string();

        let res = self
            .api
            .request_password_reset(&PasswordResetRequest {
                email: email.clone(),
            })
            .await?;

        if !res.success {
            tracing::info!(%email, "password reset not issued");
            return Err(ApiError::Rejected {
                message: res
                    .message
                    .unwrap_or_else(|| "password reset was not issued".to_string()),
            }
            .into());
        }

        let reset_token = res.reset_token.ok_or_else(|| ApiError::Malformed {
            endpoint: crate::api::endpoints::REQUEST_PASSWORD_RESET.to_string(),
            reason: "`resetToken` is missing".to_string(),
        })?;

        tracing::info!(%email, "password reset token issued");

        Ok(ResetTicket {
            reset_token,
            mfa_secret: res.mfa_secret,
            message: res.message,
        })
    }

    /// Complete a reset with the token from [`request_reset`](Self::request_reset).
    pub async fn reset_with_token(
        &self,
        ticket: &ResetTicket,
        mfa_code: &str,
        new_password: &str,
    ) -> Result<(), AuthError> {
        let mfa_code = require("MFA code", mfa_code)?.to_string();
        validate_password(new_password, self.min_dialog_password_length)?;

        // The dialog flow only fails on an explicit `success: false`.
        self.submit(
            ResetPasswordRequest::WithResetToken {
                reset_token: ticket.reset_token.clone(),
                mfa_code,
                new_password: new_password.to_string(),
            },
            false,
        )
        .await
    }

    /// Complete a reset from a recovery link. Nothing is sent unless both
    /// password fields match and meet the minimum length.
    pub async fn reset_with_user_id(
        &self,
        link: &ResetLink,
        token: &str,
        new_password: &str,
        confirmation: &str,
    ) -> Result<(), AuthError> {
        let token = require("MFA code", token)?.to_string();
        validate_confirmation(new_password, confirmation)?;
        validate_password(new_password, self.min_password_length)?;

        self.submit(
            ResetPasswordRequest::WithUserId {
                user_id: link.user_id.clone(),
                token,
                new_password: new_password.to_string(),
            },
            true,
        )
        .await
    }

    async fn submit(
        &self,
        req: ResetPasswordRequest,
        require_success_flag: bool,
    ) -> Result<(), AuthError> {
        let res = self.api.reset_password(&req).await?;

        let accepted = match res.success {
            Some(flag) => flag,
            None => !require_success_flag,
        };

        if accepted {
            tracing::info!("password updated");
            Ok(())
        } else {
            Err(ApiError::Rejected {
                message: res
                    .message
                    .unwrap_or_else(|| "could not reset the password".to_string()),
            }
            .into())
        }
    }
}
