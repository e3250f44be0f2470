//! Gate and Server Configuration
//!
//! Everything here is built once at startup, validated, and then shared
//! read-only. Nothing is re-read per request.

use crate::auth::models::Credentials;
use crate::middleware::RateLimitConfig;
use anyhow::{bail, Context, Result};
use axum::http::HeaderValue;
use std::net::SocketAddr;
use std::path::PathBuf;

pub const DEFAULT_REALM: &str = "Protected Area";
pub const DEFAULT_BIND: &str = "0.0.0.0:3000";

/// Credential pair plus the realm announced in the challenge.
#[derive(Debug, Clone)]
pub struct AuthConfig {
    pub credentials: Credentials,
    pub realm: String,
}

impl AuthConfig {
    pub fn new(credentials: Credentials, realm: impl Into<String>) -> Result<Self> {
        let realm = realm.into();
        if realm.trim().is_empty() {
            bail!("auth realm must not be empty");
        }
        // Quoted-string in the challenge; a quote or backslash would break it
        if realm.contains('"') || realm.contains('\\') {
            bail!("auth realm must not contain '\"' or '\\'");
        }
        HeaderValue::from_str(&realm).context("auth realm is not a valid header value")?;

        Ok(Self { credentials, realm })
    }

    /// Config with the default realm.
    pub fn with_default_realm(credentials: Credentials) -> Result<Self> {
        Self::new(credentials, DEFAULT_REALM)
    }

    /// `WWW-Authenticate` value sent with every denial.
    pub fn challenge(&self) -> Result<HeaderValue> {
        HeaderValue::from_str(&format!("Basic realm=\"{}\"", self.realm))
            .context("Invalid WWW-Authenticate challenge")
    }
}

/// Listener and downstream options.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub bind: SocketAddr,
    /// Exported static site; a placeholder page is served when unset.
    pub site_dir: Option<PathBuf>,
    /// Per-IP throttling outside the gate. Off when `None`.
    pub rate_limit: Option<RateLimitConfig>,
}

impl ServerConfig {
    pub fn new(
        bind: &str,
        site_dir: Option<PathBuf>,
        rate_limit: Option<RateLimitConfig>,
    ) -> Result<Self> {
        let bind: SocketAddr = bind
            .parse()
            .with_context(|| format!("Invalid bind address: {bind}"))?;

        if let Some(dir) = &site_dir {
            if !dir.is_dir() {
                bail!("site directory does not exist: {}", dir.display());
            }
        }

        Ok(Self {
            bind,
            site_dir,
            rate_limit,
        })
    }
}
