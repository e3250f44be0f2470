//! Authentication Models
//! Mission: Define the credential pair and the per-request gate outcome

use anyhow::{bail, Result};
use std::fmt;

/// The single username/password pair every request is checked against.
///
/// Built once at startup and never mutated afterwards.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    username: String,
    password: String, // plaintext, only ever compared in constant time
}

impl Credentials {
    /// Create a credential pair, rejecting user-ids Basic auth cannot carry.
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Result<Self> {
        let username = username.into();
        let password = password.into();

        if username.is_empty() {
            bail!("auth username must not be empty");
        }
        // RFC 7617: the user-id ends at the first colon, so one inside it could never match
        if username.contains(':') {
            bail!("auth username must not contain ':'");
        }
        if username.chars().any(char::is_control) || password.chars().any(char::is_control) {
            bail!("auth credentials must not contain control characters");
        }

        Ok(Self { username, password })
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    pub fn password(&self) -> &str {
        &self.password
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Username/password as decoded from one `Authorization` header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BasicCredentials<'a> {
    pub username: &'a str,
    pub password: &'a str,
}

/// Outcome of evaluating one request. Recomputed for every request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Allow,
    Deny,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_credentials_accept_plain_pair() {
        let creds = Credentials::new("fixly", "secure123").unwrap();
        assert_eq!(creds.username(), "fixly");
        assert_eq!(creds.password(), "secure123");
    }

    #[test]
    fn test_credentials_reject_bad_usernames() {
        assert!(Credentials::new("", "secure123").is_err());
        assert!(Credentials::new("fix:ly", "secure123").is_err());
        assert!(Credentials::new("fixly\n", "secure123").is_err());
    }

    #[test]
    fn test_password_may_contain_colons_and_be_empty() {
        assert!(Credentials::new("fixly", "a:b:c").is_ok());
        assert!(Credentials::new("fixly", "").is_ok());
    }

    #[test]
    fn test_credentials_reject_control_characters() {
        assert!(Credentials::new("fixly", "a\tb").is_err());
        assert!(Credentials::new("fixly", "secure123\r\n").is_err());
        assert!(Credentials::new("fi\x00xly", "secure123").is_err());
    }

    #[test]
    fn test_debug_redacts_password() {
        let creds = Credentials::new("fixly", "secure123").unwrap();
        let rendered = format!("{:?}", creds);
        assert!(rendered.contains("fixly"));
        assert!(!rendered.contains("secure123"));
    }
}
