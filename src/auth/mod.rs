//! Authentication Module
//! Mission: Gate every request behind a single HTTP Basic credential pair

pub mod basic;
pub mod gate;
pub mod middleware;
pub mod models;

pub use gate::BasicAuthGate;
pub use middleware::{basic_auth_middleware, AuthError};
pub use models::{Credentials, Decision};
