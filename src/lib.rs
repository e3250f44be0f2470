//! Fixly Gate Library
//!
//! HTTP Basic Auth gate in front of the Fixly marketing site.
//! Exposes the gate, config and router for the binary and for tests.

pub mod auth;
pub mod config;
pub mod middleware;
pub mod server;

pub use auth::{BasicAuthGate, Credentials, Decision};
pub use config::{AuthConfig, ServerConfig};
pub use server::build_router;
