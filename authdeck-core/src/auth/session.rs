use crate::api::{
    ApiError, AuthApi, LoginRequest, RegisterRequest, VerifyOtpRequest, endpoints,
};
use crate::auth::error::AuthError;
use crate::auth::flow::{AuthEvent, AuthFlow, AuthStep, FlowError};
use crate::auth::otpauth::provisioning_url;
use crate::auth::validation::{validate_email, validate_login, validate_otp, validate_registration};
use crate::config::ClientConfig;
use crate::routes::Route;

#[derive(Debug, Clone)]
pub struct SessionSettings {
    pub otp_issuer: String,
    pub otp_label: String,
    pub min_register_password_length: usize,
}

impl From<&ClientConfig> for SessionSettings {
    fn from(cfg: &ClientConfig) -> Self {
        Self {
            otp_issuer: cfg.otp_issuer.clone(),
            otp_label: cfg.otp_label.clone(),
            min_register_password_length: cfg.min_register_password_length,
        }
    }
}

impl Default for SessionSettings {
    fn default() -> Self {
        Self::from(&ClientConfig::default())
    }
}

/// Drives [`AuthFlow`] with real API calls: validate, call, dispatch.
pub struct AuthSession<A> {
    api: A,
    flow: AuthFlow,
    settings: SessionSettings,
}

impl<A: AuthApi> AuthSession<A> {
    pub fn new(api: A, settings: SessionSettings) -> Self {
        Self {
            api,
            flow: AuthFlow::new(),
            settings,
        }
    }

    /// A session that only needs the second factor for `email`.
    pub fn awaiting_otp(
        api: A,
        settings: SessionSettings,
        email: &str,
    ) -> Result<Self, AuthError> {
        let email = validate_email(email)?.to_string();
        Ok(Self {
            api,
            flow: AuthFlow::awaiting_otp(email, None),
            settings,
        })
    }

    pub fn step(&self) -> &AuthStep {
        self.flow.step()
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    pub fn home_route(&self) -> Option<Route> {
        self.flow.home_route()
    }

    pub fn show_register(&mut self) -> Result<&AuthStep, AuthError> {
        Ok(self.flow.dispatch(AuthEvent::ShowRegister)?)
    }

    pub fn show_login(&mut self) -> Result<&AuthStep, AuthError> {
        Ok(self.flow.dispatch(AuthEvent::ShowLogin)?)
    }

    fn expect_step(&self, expected: &'static str, event: &'static str) -> Result<(), AuthError> {
        if self.flow.step().name() == expected {
            Ok(())
        } else {
            Err(FlowError {
                from: self.flow.step().name(),
                event,
            }
            .into())
        }
    }

    pub async fn register(&mut self, form: &RegisterRequest) -> Result<&AuthStep, AuthError> {
        self.expect_step("register", "registered")?;
        let form = validate_registration(form, self.settings.min_register_password_length)?;

        let res = self.api.register(&form).await?;
        if res.success == Some(false) {
            tracing::warn!(email = %form.email, "registration rejected");
            return Err(rejected(res.message, "the registration was rejected"));
        }
        let secret = res.mfa_secret.ok_or_else(|| ApiError::Malformed {
            endpoint: endpoints::REGISTER.to_string(),
            reason: "`mfaSecret` is missing".to_string(),
        })?;
        tracing::info!(email = %form.email, "user registered");

        let url = provisioning_url(&self.settings.otp_issuer, &self.settings.otp_label, &secret);
        Ok(self.flow.dispatch(AuthEvent::Registered {
            provisioning_url: url,
        })?)
    }

    pub async fn login(&mut self, email: &str, password: &str) -> Result<&AuthStep, AuthError> {
        self.expect_step("login", "logged_in")?;
        validate_login(email, password)?;
        let email = email.trim().to_string();

        let res = self
            .api
            .login(&LoginRequest {
                email: email.clone(),
                password: password.to_string(),
            })
            .await?;

        if res.success == Some(false) {
            tracing::warn!(%email, "login rejected");
            return Err(rejected(res.message, "the login was rejected"));
        }
        tracing::info!(%email, requires_mfa = res.requires_mfa, "login accepted");

        Ok(self.flow.dispatch(AuthEvent::LoggedIn {
            email,
            user_id: res.user_id,
            requires_mfa: res.requires_mfa,
        })?)
    }

    /// Submit an authenticator code. `email` overrides the one remembered from login.
    ///
    /// A rejected code keeps the session in the OTP step and surfaces as
    /// [`ApiError::Rejected`].
    pub async fn verify_otp(
        &mut self,
        email: Option<&str>,
        code: &str,
    ) -> Result<&AuthStep, AuthError> {
        let remembered = match self.flow.step() {
            AuthStep::Otp { email, .. } => email.clone(),
            other => {
                return Err(FlowError {
                    from: other.name(),
                    event: "otp_accepted",
                }
                .into());
            }
        };
        let email = match email {
            Some(e) => validate_email(e)?.to_string(),
            None => remembered,
        };
        let code = validate_otp(code)?.to_string();

        let res = self
            .api
            .verify_otp(&VerifyOtpRequest {
                email: email.clone(),
                token: code,
            })
            .await?;

        if res.success == Some(true) {
            tracing::info!(%email, "second factor verified");
            Ok(self.flow.dispatch(AuthEvent::OtpAccepted)?)
        } else {
            tracing::warn!(%email, "second factor rejected");
            self.flow.dispatch(AuthEvent::OtpRejected)?;
            Err(rejected(res.message, "the OTP code is not valid"))
        }
    }
}

fn rejected(message: Option<String>, fallback: &str) -> AuthError {
    ApiError::Rejected {
        message: message.unwrap_or_else(|| fallback.to_string()),
    }
    .into()
}
