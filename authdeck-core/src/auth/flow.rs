use crate::routes::Route;
use std::fmt;
use thiserror::Error;

/// Where the login wizard currently is.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthStep {
    Login,
    Register,
    /// Registration succeeded; the user scans the provisioning URL.
    QrProvisioning { provisioning_url: String },
    /// Password accepted; waiting for the authenticator code.
    Otp {
        email: String,
        user_id: Option<String>,
    },
    Authenticated { user_id: Option<String> },
}

impl AuthStep {
    pub fn name(&self) -> &'static str {
        match self {
            AuthStep::Login => "login",
            AuthStep::Register => "register",
            AuthStep::QrProvisioning { .. } => "qr",
            AuthStep::Otp { .. } => "otp",
            AuthStep::Authenticated { .. } => "authenticated",
        }
    }

    pub fn route(&self) -> Route {
        match self {
            AuthStep::Login => Route::Login,
            AuthStep::Register => Route::Register,
            AuthStep::QrProvisioning { .. } => Route::QrProvisioning,
            AuthStep::Otp { .. } => Route::VerifyOtp,
            AuthStep::Authenticated { user_id } => Route::Home {
                user_id: user_id.clone(),
            },
        }
    }
}

impl fmt::Display for AuthStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthEvent {
    ShowRegister,
    ShowLogin,
    Registered {
        provisioning_url: String,
    },
    LoggedIn {
        email: String,
        user_id: Option<String>,
        requires_mfa: bool,
    },
    OtpAccepted,
    OtpRejected,
}

impl AuthEvent {
    pub fn name(&self) -> &'static str {
        match self {
            AuthEvent::ShowRegister => "show_register",
            AuthEvent::ShowLogin => "show_login",
            AuthEvent::Registered { .. } => "registered",
            AuthEvent::LoggedIn { .. } => "logged_in",
            AuthEvent::OtpAccepted => "otp_accepted",
            AuthEvent::OtpRejected => "otp_rejected",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("cannot handle '{event}' while in step '{from}'")]
pub struct FlowError {
    pub from: &'static str,
    pub event: &'static str,
}

/// The login wizard: `login -> register -> qr -> login` and `login -> otp -> authenticated`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthFlow {
    step: AuthStep,
}

impl Default for AuthFlow {
    fn default() -> Self {
        Self::new()
    }
}

impl AuthFlow {
    pub fn new() -> Self {
        Self {
            step: AuthStep::Login,
        }
    }

    /// Enter directly at the OTP step, for a code submitted outside the
    /// login wizard.
    pub fn awaiting_otp(email: String, user_id: Option<String>) -> Self {
        Self {
            step: AuthStep::Otp { email, user_id },
        }
    }

    pub fn step(&self) -> &AuthStep {
        &self.step
    }

    /// Single transition point. Invalid pairs leave the step untouched.
    pub fn dispatch(&mut self, event: AuthEvent) -> Result<&AuthStep, FlowError> {
        let from = self.step.name();
        let event_name = event.name();

        let next = match (&self.step, event) {
            (AuthStep::Login, AuthEvent::ShowRegister) => AuthStep::Register,
            (AuthStep::Register, AuthEvent::ShowLogin) => AuthStep::Login,
            (AuthStep::Register, AuthEvent::Registered { provisioning_url }) => {
                AuthStep::QrProvisioning { provisioning_url }
            }
            (AuthStep::QrProvisioning { .. }, AuthEvent::ShowLogin) => AuthStep::Login,
            (
                AuthStep::Login,
                AuthEvent::LoggedIn {
                    email,
                    user_id,
                    requires_mfa: true,
                },
            ) => AuthStep::Otp { email, user_id },
            (
                AuthStep::Login,
                AuthEvent::LoggedIn {
                    user_id,
                    requires_mfa: false,
                    ..
                },
            ) => AuthStep::Authenticated { user_id },
            (AuthStep::Otp { user_id, .. }, AuthEvent::OtpAccepted) => AuthStep::Authenticated {
                user_id: user_id.clone(),
            },
            (AuthStep::Otp { .. }, AuthEvent::OtpRejected) => self.step.clone(),
            (AuthStep::Otp { .. }, AuthEvent::ShowLogin) => AuthStep::Login,
            (AuthStep::Authenticated { .. }, AuthEvent::ShowLogin) => AuthStep::Login,
            _ => {
                return Err(FlowError {
                    from,
                    event: event_name,
                });
            }
        };

        tracing::debug!(from, to = next.name(), event = event_name, "auth step changed");
        self.step = next;
        Ok(&self.step)
    }

    /// Where to go once authenticated.
    pub fn home_route(&self) -> Option<Route> {
        match &self.step {
            AuthStep::Authenticated { user_id } => Some(Route::Home {
                user_id: user_id.clone(),
            }),
            _ => None,
        }
    }
}
