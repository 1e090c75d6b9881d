use crate::api::RegisterRequest;
use crate::auth::{
    ValidationError, validate_confirmation, validate_email, validate_login, validate_otp,
    validate_password, validate_registration,
};
use pretty_assertions::assert_eq;

#[test]
fn email_is_trimmed_and_checked() {
    assert_eq!(validate_email("  ana@example.test "), Ok("ana@example.test"));
    assert_eq!(
        validate_email(""),
        Err(ValidationError::Empty { field: "email" })
    );
    for bad in ["ana", "@example.test", "ana@", "a@b@c", "ana smith@example.test"] {
        assert!(
            matches!(validate_email(bad), Err(ValidationError::InvalidEmail { .. })),
            "{bad} should be rejected"
        );
    }
}

#[test]
fn password_length_counts_characters() {
    assert_eq!(validate_password("ñññññññ", 8), Err(ValidationError::TooShort { min: 8 }));
    assert_eq!(validate_password("ññññññññ", 8), Ok(()));
    assert_eq!(
        validate_password("", 8),
        Err(ValidationError::Empty { field: "password" })
    );
}

#[test]
fn confirmation_must_match_exactly() {
    assert_eq!(validate_confirmation("abc", "abc"), Ok(()));
    assert_eq!(validate_confirmation("abc", "abc "), Err(ValidationError::Mismatch));
}

#[test]
fn otp_needs_six_digits() {
    assert_eq!(validate_otp(" 012345 "), Ok("012345"));
    assert_eq!(validate_otp("12345"), Err(ValidationError::InvalidOtp));
    assert_eq!(validate_otp("1234567"), Err(ValidationError::InvalidOtp));
    assert_eq!(validate_otp("12a456"), Err(ValidationError::InvalidOtp));
    assert_eq!(
        validate_otp(""),
        Err(ValidationError::Empty { field: "code" })
    );
}

#[test]
fn login_requires_both_fields() {
    assert!(validate_login("ana@example.test", "x").is_ok());
    assert_eq!(
        validate_login("ana@example.test", ""),
        Err(ValidationError::Empty { field: "password" })
    );
}

#[test]
fn registration_reports_first_missing_field() {
    // Arrange
    let form = RegisterRequest {
        email: "ana@example.test".to_string(),
        username: "ana".to_string(),
        first_name: "Ana".to_string(),
        paternal_surname: "  ".to_string(),
        maternal_surname: String::new(),
        group: "7A".to_string(),
        password: "secret1".to_string(),
    };

    // Act
    let err = validate_registration(&form, 6).unwrap_err();

    // Assert
    assert_eq!(
        err,
        ValidationError::Empty {
            field: "paternal surname"
        }
    );
    assert_eq!(err.to_string(), "paternal surname is required");
}

#[test]
fn registration_trims_text_but_not_password() {
    let form = RegisterRequest {
        email: " ana@example.test".to_string(),
        username: " ana ".to_string(),
        first_name: "Ana".to_string(),
        paternal_surname: "Lopez".to_string(),
        maternal_surname: "Ruiz".to_string(),
        group: " 7A".to_string(),
        password: " secret ".to_string(),
    };

    let clean = validate_registration(&form, 6).unwrap();

    assert_eq!(clean.email, "ana@example.test");
    assert_eq!(clean.username, "ana");
    assert_eq!(clean.group, "7A");
    assert_eq!(clean.password, " secret ");
}
