use crate::api::error::ApiError;
use crate::api::types::{
    LoginRequest, LoginResponse, PasswordResetRequest, PasswordResetResponse, RegisterRequest,
    RegisterResponse, ResetPasswordRequest, StatusResponse, VerifyOtpRequest,
};
use crate::api::{AuthApi, LogSource, endpoints};
use crate::logs::parse_logs_payload;
use async_trait::async_trait;
use reqwest::{Method, StatusCode};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::time::{Duration, Instant};
use url::Url;

/// HTTP client for the external authentication and log API.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base: String,
}

impl ApiClient {
    pub fn new(base_url: &Url, timeout: Duration) -> Result<Self, ApiError> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(ApiError::Client)?;

        Ok(Self {
            http,
            base: base_url.as_str().trim_end_matches('/').to_string(),
        })
    }

    pub fn endpoint_url(&self, path: &str) -> String {
        format!("{}/{}", self.base, path.trim_start_matches('/'))
    }

    async fn send<B: Serialize + ?Sized>(
        &self,
        method: Method,
        path: &str,
        body: Option<&B>,
    ) -> Result<Value, ApiError> {
        let url = self.endpoint_url(path);
        let started = Instant::now();

        let mut req = self.http.request(method.clone(), &url);
        if let Some(body) = body {
            req = req.json(body);
        }

        let res = req.send().await.map_err(|source| {
            tracing::warn!(%method, path, error = %source, "request failed");
            ApiError::Transport {
                endpoint: path.to_string(),
                source,
            }
        })?;

        let status = res.status();
        let text = res.text().await.map_err(|source| ApiError::Transport {
            endpoint: path.to_string(),
            source,
        })?;

        tracing::debug!(
            %method,
            path,
            status = status.as_u16(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "response received"
        );

        let json = serde_json::from_str::<Value>(&text).ok();

        if !status.is_success() {
            let message = json
                .as_ref()
                .and_then(|v| v.get("message"))
                .and_then(Value::as_str)
                .map(str::to_string)
                .unwrap_or_else(|| default_status_message(status));

            tracing::warn!(%method, path, status = status.as_u16(), %message, "API error");
            return Err(ApiError::Status {
                endpoint: path.to_string(),
                status: status.as_u16(),
                message,
            });
        }

        json.ok_or_else(|| ApiError::Malformed {
            endpoint: path.to_string(),
            reason: "body is not JSON".to_string(),
        })
    }

    async fn post<B, R>(&self, path: &str, body: &B) -> Result<R, ApiError>
    where
        B: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        let value = self.send(Method::POST, path, Some(body)).await?;
        serde_json::from_value(value).map_err(|e| ApiError::Malformed {
            endpoint: path.to_string(),
            reason: e.to_string(),
        })
    }
}

fn default_status_message(status: StatusCode) -> String {
    status
        .canonical_reason()
        .map(str::to_string)
        .unwrap_or_else(|| format!("HTTP {}", status.as_u16()))
}

#[async_trait]
impl AuthApi for ApiClient {
    async fn register(&self, req: &RegisterRequest) -> Result<RegisterResponse, ApiError> {
        self.post(endpoints::REGISTER, req).await
    }

    async fn login(&self, req: &LoginRequest) -> Result<LoginResponse, ApiError> {
        self.post(endpoints::LOGIN, req).await
    }

    async fn verify_otp(&self, req: &VerifyOtpRequest) -> Result<StatusResponse, ApiError> {
        self.post(endpoints::VERIFY_OTP, req).await
    }

    async fn request_password_reset(
        &self,
        req: &PasswordResetRequest,
    ) -> Result<PasswordResetResponse, ApiError> {
        self.post(endpoints::REQUEST_PASSWORD_RESET, req).await
    }

    async fn reset_password(&self, req: &ResetPasswordRequest) -> Result<StatusResponse, ApiError> {
        self.post(endpoints::RESET_PASSWORD, req).await
    }
}

#[async_trait]
impl LogSource for ApiClient {
    async fn fetch_logs(&self) -> Result<Vec<Value>, ApiError> {
        let body = self
            .send::<()>(Method::GET, endpoints::GET_SERVER, None)
            .await?;

        let logs = parse_logs_payload(&body).map_err(|e| ApiError::Malformed {
            endpoint: endpoints::GET_SERVER.to_string(),
            reason: e.0.to_string(),
        })?;

        Ok(logs.to_vec())
    }
}
