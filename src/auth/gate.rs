//! Basic Auth Request Gate
//! Mission: Decide ALLOW or DENY for a single request, with no memory of earlier ones
//!
//! RECEIVE -> DECODE -> COMPARE -> (ALLOW | DENY). The gate is immutable after
//! construction, so one `Arc<BasicAuthGate>` serves any number of concurrent
//! requests without locking.

use crate::auth::basic::decode_authorization;
use crate::auth::models::{BasicCredentials, Credentials, Decision};
use crate::config::AuthConfig;
use anyhow::Result;
use axum::http::{HeaderMap, HeaderValue};
use subtle::ConstantTimeEq;

pub struct BasicAuthGate {
    credentials: Credentials,
    challenge: HeaderValue,
}

impl BasicAuthGate {
    pub fn new(config: AuthConfig) -> Result<Self> {
        let challenge = config.challenge()?;
        Ok(Self {
            credentials: config.credentials,
            challenge,
        })
    }

    /// Evaluate the request headers. Any failure along the way is a plain DENY.
    pub fn evaluate(&self, headers: &HeaderMap) -> Decision {
        let Some(payload) = decode_authorization(headers) else {
            return Decision::Deny;
        };
        let Some(supplied) = payload.credentials() else {
            return Decision::Deny;
        };

        if self.matches(&supplied) {
            Decision::Allow
        } else {
            Decision::Deny
        }
    }

    /// Both fields are compared in full before combining, so timing does not
    /// reveal which one was wrong.
    fn matches(&self, supplied: &BasicCredentials<'_>) -> bool {
        let user_ok = supplied
            .username
            .as_bytes()
            .ct_eq(self.credentials.username().as_bytes());
        let pass_ok = supplied
            .password
            .as_bytes()
            .ct_eq(self.credentials.password().as_bytes());

        bool::from(user_ok & pass_ok)
    }

    /// `WWW-Authenticate` value for denials.
    pub fn challenge(&self) -> &HeaderValue {
        &self.challenge
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::basic::encode_header_value;
    use axum::http::header;

    fn create_test_gate() -> BasicAuthGate {
        let creds = Credentials::new("fixly", "secure123").unwrap();
        BasicAuthGate::new(AuthConfig::with_default_realm(creds).unwrap()).unwrap()
    }

    fn headers_with(value: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(header::AUTHORIZATION, HeaderValue::from_str(value).unwrap());
        headers
    }

    #[test]
    fn test_correct_pair_allowed() {
        let gate = create_test_gate();
        let decision = gate.evaluate(&headers_with("Basic Zml4bHk6c2VjdXJlMTIz"));
        assert_eq!(decision, Decision::Allow);
    }

    #[test]
    fn test_missing_header_denied() {
        let gate = create_test_gate();
        assert_eq!(gate.evaluate(&HeaderMap::new()), Decision::Deny);
    }

    #[test]
    fn test_wrong_pairs_denied() {
        let gate = create_test_gate();
        for (user, pass) in [
            ("wrong", "wrong"),
            ("fixly", "wrong"),
            ("wrong", "secure123"),
            ("Fixly", "secure123"),
            ("fixly", "secure1234"),
            ("fixly", "secure12"),
            ("", ""),
        ] {
            let headers = headers_with(&encode_header_value(user, pass));
            assert_eq!(gate.evaluate(&headers), Decision::Deny, "{user}:{pass}");
        }
    }

    #[test]
    fn test_trailing_colon_segment_is_part_of_password() {
        let gate = create_test_gate();
        let headers = headers_with(&encode_header_value("fixly", "secure123:extra"));
        assert_eq!(gate.evaluate(&headers), Decision::Deny);
    }

    #[test]
    fn test_malformed_headers_denied() {
        let gate = create_test_gate();
        for value in [
            "Basic",
            "Basic !!!!",
            "Basic Zml4bHlzZWN1cmUxMjM=",
            "Bearer Zml4bHk6c2VjdXJlMTIz",
            "Zml4bHk6c2VjdXJlMTIz",
        ] {
            assert_eq!(gate.evaluate(&headers_with(value)), Decision::Deny, "{value}");
        }
    }

    #[test]
    fn test_decision_is_repeatable() {
        let gate = create_test_gate();
        let good = headers_with("Basic Zml4bHk6c2VjdXJlMTIz");
        let bad = headers_with("Basic d3Jvbmc6d3Jvbmc=");

        for _ in 0..3 {
            assert_eq!(gate.evaluate(&good), Decision::Allow);
            assert_eq!(gate.evaluate(&bad), Decision::Deny);
        }
    }

    #[test]
    fn test_challenge_header() {
        let gate = create_test_gate();
        assert_eq!(gate.challenge(), "Basic realm=\"Protected Area\"");
    }
}
