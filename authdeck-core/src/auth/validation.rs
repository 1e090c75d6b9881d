use crate::api::RegisterRequest;
use thiserror::Error;

pub const OTP_DIGITS: usize = 6;

/// Client-side rejection; raised before any request is sent.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("{field} is required")]
    Empty { field: &'static str },

    #[error("'{value}' is not a valid email address")]
    InvalidEmail { value: String },

    #[error("password must be at least {min} characters")]
    TooShort { min: usize },

    #[error("passwords do not match")]
    Mismatch,

    #[error("the code must be 6 digits")]
    InvalidOtp,
}

pub fn require<'a>(field: &'static str, value: &'a str) -> Result<&'a str, ValidationError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        Err(ValidationError::Empty { field })
    } else {
        Ok(trimmed)
    }
}

pub fn validate_email(value: &str) -> Result<&str, ValidationError> {
    let email = require("email", value)?;

    let valid = match email.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty()
                && !domain.is_empty()
                && !domain.contains('@')
                && !email.contains(char::is_whitespace)
        }
        None => false,
    };

    if valid {
        Ok(email)
    } else {
        Err(ValidationError::InvalidEmail {
            value: email.to_string(),
        })
    }
}

/// Passwords are not trimmed; only emptiness and length are checked.
pub fn validate_password(value: &str, min: usize) -> Result<(), ValidationError> {
    if value.is_empty() {
        return Err(ValidationError::Empty { field: "password" });
    }
    if value.chars().count() < min {
        return Err(ValidationError::TooShort { min });
    }
    Ok(())
}

pub fn validate_confirmation(password: &str, confirmation: &str) -> Result<(), ValidationError> {
    if password == confirmation {
        Ok(())
    } else {
        Err(ValidationError::Mismatch)
    }
}

pub fn validate_otp(value: &str) -> Result<&str, ValidationError> {
    let code = require("code", value)?;
    if code.len() == OTP_DIGITS && code.chars().all(|c| c.is_ascii_digit()) {
        Ok(code)
    } else {
        Err(ValidationError::InvalidOtp)
    }
}

pub fn validate_login(email: &str, password: &str) -> Result<(), ValidationError> {
    validate_email(email)?;
    if password.is_empty() {
        return Err(ValidationError::Empty { field: "password" });
    }
    Ok(())
}

/// Checks every registration field and returns a trimmed copy.
pub fn validate_registration(
    form: &RegisterRequest,
    min_password: usize,
) -> Result<RegisterRequest, ValidationError> {
    let email = validate_email(&form.email)?.to_string();
    let username = require("username", &form.username)?.to_string();
    let first_name = require("first name", &form.first_name)?.to_string();
    let paternal_surname = require("paternal surname", &form.paternal_surname)?.to_string();
    let maternal_surname = require("maternal surname", &form.maternal_surname)?.to_string();
    let group = require("group", &form.group)?.to_string();
    validate_password(&form.password, min_password)?;

    Ok(RegisterRequest {
        email,
        username,
        first_name,
        paternal_surname,
        maternal_surname,
        group,
        password: form.password.clone(),
    })
}
