//! Authentication flows against the external API.
//!
//! Every flow validates its input locally first; nothing reaches the network
//! until the fields are acceptable. The login wizard itself is the
//! [`AuthFlow`] state machine, driven by [`AuthSession`].

mod error;
mod flow;
mod otpauth;
mod recovery;
mod session;
mod validation;
mod wizard;

#[cfg(test)]
mod tests;

pub use error::AuthError;
pub use flow::{AuthEvent, AuthFlow, AuthStep, FlowError};
pub use otpauth::{normalize_secret, provisioning_url};
pub use recovery::{PasswordRecovery, ResetLink, ResetTicket};
pub use session::{AuthSession, SessionSettings};
pub use validation::{
    OTP_DIGITS, ValidationError, require, validate_confirmation, validate_email, validate_login,
    validate_otp, validate_password, validate_registration,
};
pub use wizard::{Notice, Prompt, WizardExit, run_wizard};
