use serde::{Deserialize, Deserializer, Serialize};

/// Body of `POST /api/register`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RegisterRequest {
    pub email: String,
    pub username: String,
    #[serde(rename = "nombre")]
    pub first_name: String,
    /// Paternal surname.
    #[serde(rename = "app")]
    pub paternal_surname: String,
    /// Maternal surname.
    #[serde(rename = "apm")]
    pub maternal_surname: String,
    #[serde(rename = "grupo")]
    pub group: String,
    pub password: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterResponse {
    #[serde(default)]
    pub success: Option<bool>,
    #[serde(default)]
    pub mfa_secret: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    #[serde(default)]
    pub success: Option<bool>,
    #[serde(default, deserialize_with = "string_or_number")]
    pub user_id: Option<String>,
    #[serde(default, rename = "requiresMFA")]
    pub requires_mfa: bool,
    #[serde(default)]
    pub message: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VerifyOtpRequest {
    pub email: String,
    pub token: String,
}

/// `{ success, message? }`, shared by OTP verification and password reset.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct StatusResponse {
    #[serde(default)]
    pub success: Option<bool>,
    #[serde(default)]
    pub message: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PasswordResetRequest {
    pub email: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PasswordResetResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub reset_token: Option<String>,
    #[serde(default)]
    pub mfa_secret: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

/// Body of `POST /reset-password`; the API accepts either shape.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ResetPasswordRequest {
    #[serde(rename_all = "camelCase")]
    WithResetToken {
        reset_token: String,
        mfa_code: String,
        new_password: String,
    },
    #[serde(rename_all = "camelCase")]
    WithUserId {
        user_id: String,
        token: String,
        new_password: String,
    },
}

fn string_or_number<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Text(String),
        Int(i64),
        Float(f64),
    }

    Ok(Option::<Raw>::deserialize(deserializer)?.map(|raw| match raw {
        Raw::Text(s) => s,
        Raw::Int(n) => n.to_string(),
        Raw::Float(f) => f.to_string(),
    }))
}
