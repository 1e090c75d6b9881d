use url::form_urlencoded;

/// `otpauth://totp/<label>?secret=<secret>&issuer=<issuer>` for authenticator apps.
pub fn provisioning_url(issuer: &str, label: &str, secret: &str) -> String {
    let label: String = form_urlencoded::byte_serialize(label.trim().as_bytes())
        .collect::<String>()
        .replace('+', "%20");

    let query = form_urlencoded::Serializer::new(String::new())
        .append_pair("secret", &normalize_secret(secret))
        .append_pair("issuer", issuer.trim())
        .finish();

    format!("otpauth://totp/{label}?{query}")
}

/// Authenticator apps expect unpadded, uppercase base32 without spaces.
pub fn normalize_secret(secret: &str) -> String {
    secret
        .chars()
        .filter(|c| !c.is_whitespace() && *c != '=')
        .map(|c| c.to_ascii_uppercase())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn matches_the_format_authenticators_expect() {
        assert_eq!(
            provisioning_url("MyApp", "MyApp", "JBSWY3DPEHPK3PXP"),
            "otpauth://totp/MyApp?secret=JBSWY3DPEHPK3PXP&issuer=MyApp"
        );
    }

    #[test]
    fn label_and_issuer_are_encoded() {
        assert_eq!(
            provisioning_url("Ops Team", "Ops Team:ana@example.test", "abcd efgh=="),
            "otpauth://totp/Ops%20Team%3Aana%40example.test?secret=ABCDEFGH&issuer=Ops+Team"
        );
    }
}
