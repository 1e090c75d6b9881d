//! Client-side navigation surface.

use std::fmt;
use url::Url;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    Login,
    Register,
    VerifyOtp,
    QrProvisioning,
    ForgotPassword,
    /// `/reset-password?userId=..`
    ResetPassword { user_id: Option<String> },
    /// `/home?idUs=..`
    Home { user_id: Option<String> },
    Logs,
}

impl Route {
    /// Parse a path (optionally with query string) or an absolute URL.
    pub fn parse(input: &str) -> Option<Self> {
        let url = Url::parse(input)
            .or_else(|_| Url::parse("http://localhost/").and_then(|base| base.join(input)))
            .ok()?;

        let query = |key: &str| {
            url.query_pairs()
                .find(|(k, _)| k == key)
                .map(|(_, v)| v.into_owned())
                .filter(|v| !v.is_empty())
        };

        let route = match url.path().trim_end_matches('/') {
            "/login" => Route::Login,
            "/register" => Route::Register,
            "/verify-otp" => Route::VerifyOtp,
            "/qr" => Route::QrProvisioning,
            "/forgot-password" | "/forgot-password-1" => Route::ForgotPassword,
            "/reset-password" | "/reset-password-1" => Route::ResetPassword {
                user_id: query("userId"),
            },
            "" | "/home" => Route::Home {
                user_id: query("idUs"),
            },
            "/logs" => Route::Logs,
            _ => return None,
        };

        Some(route)
    }

    pub fn path(&self) -> String {
        match self {
            Route::Login => "/login".to_string(),
            Route::Register => "/register".to_string(),
            Route::VerifyOtp => "/verify-otp".to_string(),
            Route::QrProvisioning => "/qr".to_string(),
            Route::ForgotPassword => "/forgot-password".to_string(),
            Route::ResetPassword { user_id } => with_query("/reset-password", "userId", user_id),
            Route::Home { user_id } => with_query("/home", "idUs", user_id),
            Route::Logs => "/logs".to_string(),
        }
    }
}

fn with_query(path: &str, key: &str, value: &Option<String>) -> String {
    match value {
        Some(v) => {
            let encoded: String = url::form_urlencoded::Serializer::new(String::new())
                .append_pair(key, v)
                .finish();
            format!("{path}?{encoded}")
        }
        None => path.to_string(),
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path())
    }
}
