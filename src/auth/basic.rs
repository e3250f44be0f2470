//! Basic Authorization Header Decoding
//! Mission: Turn `Authorization: Basic <base64>` into a username/password pair
//!
//! Every failure collapses to `None`; callers must not be able to tell a
//! missing header from a malformed one.

use crate::auth::models::BasicCredentials;
use axum::http::{header, HeaderMap, HeaderValue};
use base64::{engine::general_purpose::STANDARD as BASE64, Engine};

const BASIC_SCHEME: &str = "Basic";

/// Decoded `user:pass` payload. Owns the bytes so `BasicCredentials` can borrow them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedPayload(String);

impl DecodedPayload {
    /// Split on the first colon; everything after it is the password.
    pub fn credentials(&self) -> Option<BasicCredentials<'_>> {
        let (username, password) = self.0.split_once(':')?;
        Some(BasicCredentials { username, password })
    }
}

/// Pull the Basic payload out of the request headers, if there is a usable one.
pub fn decode_authorization(headers: &HeaderMap) -> Option<DecodedPayload> {
    decode_header_value(headers.get(header::AUTHORIZATION)?)
}

/// Decode a single `Authorization` header value.
pub fn decode_header_value(value: &HeaderValue) -> Option<DecodedPayload> {
    let raw = value.to_str().ok()?;
    let (scheme, encoded) = raw.trim().split_once(' ')?;

    // Scheme tokens are case-insensitive
    if !scheme.eq_ignore_ascii_case(BASIC_SCHEME) {
        return None;
    }

    let bytes = BASE64.decode(encoded.trim()).ok()?;
    String::from_utf8(bytes).ok().map(DecodedPayload)
}

/// Build a header value for the given pair.
#[cfg(test)]
pub(crate) fn encode_header_value(username: &str, password: &str) -> String {
    format!("{} {}", BASIC_SCHEME, BASE64.encode(format!("{username}:{password}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn decode(value: &str) -> Option<DecodedPayload> {
        decode_header_value(&HeaderValue::from_str(value).unwrap())
    }

    #[test]
    fn test_decode_known_good_header() {
        let payload = decode("Basic Zml4bHk6c2VjdXJlMTIz").unwrap();
        let creds = payload.credentials().unwrap();
        assert_eq!(creds.username, "fixly");
        assert_eq!(creds.password, "secure123");
    }

    #[test]
    fn test_scheme_is_case_insensitive() {
        assert!(decode("basic Zml4bHk6c2VjdXJlMTIz").is_some());
        assert!(decode("BASIC Zml4bHk6c2VjdXJlMTIz").is_some());
    }

    #[test]
    fn test_extra_whitespace_around_payload() {
        let payload = decode("Basic    Zml4bHk6c2VjdXJlMTIz  ").unwrap();
        assert_eq!(payload.credentials().unwrap().username, "fixly");
    }

    #[test]
    fn test_other_schemes_rejected() {
        assert!(decode("Bearer Zml4bHk6c2VjdXJlMTIz").is_none());
        assert!(decode("BasicZml4bHk6c2VjdXJlMTIz").is_none());
        assert!(decode("Basic").is_none());
    }

    #[test]
    fn test_invalid_base64_rejected() {
        assert!(decode("Basic not*base64!").is_none());
        assert!(decode("Basic Zml4bHk6c2VjdXJlMTIz=").is_none());
    }

    #[test]
    fn test_non_utf8_payload_rejected() {
        // 0xff 0xfe 0x3a 0x61
        assert!(decode("Basic //46YQ==").is_none());
    }

    #[test]
    fn test_missing_colon_has_no_credentials() {
        // "fixlysecure123"
        let payload = decode("Basic Zml4bHlzZWN1cmUxMjM=").unwrap();
        assert!(payload.credentials().is_none());
    }

    #[test]
    fn test_split_on_first_colon_only() {
        let header = encode_header_value("fixly", "secure123:extra");
        let payload = decode(&header).unwrap();
        let creds = payload.credentials().unwrap();
        assert_eq!(creds.username, "fixly");
        assert_eq!(creds.password, "secure123:extra");
    }

    #[test]
    fn test_encode_matches_reference_header() {
        assert_eq!(
            encode_header_value("fixly", "secure123"),
            "Basic Zml4bHk6c2VjdXJlMTIz"
        );
        assert_eq!(encode_header_value("wrong", "wrong"), "Basic d3Jvbmc6d3Jvbmc=");
    }

    #[test]
    fn test_absent_header() {
        assert!(decode_authorization(&HeaderMap::new()).is_none());
    }
}
