//! Router assembly
//!
//! Layer order, outermost first:
//!   request_logging -> rate_limit (optional) -> basic auth gate -> site
//!
//! The gate is applied with `Router::layer` after the fallback is installed,
//! so unknown paths and static files are gated exactly like routes.

use crate::auth::{basic_auth_middleware, BasicAuthGate};
use crate::middleware::{rate_limit_middleware, request_logging, RateLimitLayer};
use axum::{middleware, response::Html, Router};
use std::path::Path;
use std::sync::Arc;
use tower_http::services::ServeDir;

const PLACEHOLDER_PAGE: &str = r#"<!doctype html>
<html lang="en">
<head><meta charset="utf-8"><title>Fixly</title></head>
<body>
<h1>Fixly</h1>
<p>Your AI repair assistant. The site has not been deployed to this server yet.</p>
</body>
</html>
"#;

/// Build the full application router.
pub fn build_router(
    gate: Arc<BasicAuthGate>,
    site_dir: Option<&Path>,
    limiter: Option<RateLimitLayer>,
) -> Router {
    let site = match site_dir {
        Some(dir) => Router::new().fallback_service(ServeDir::new(dir)),
        None => Router::new().fallback(placeholder_page),
    };

    let mut app = site.layer(middleware::from_fn_with_state(gate, basic_auth_middleware));

    if let Some(limiter) = limiter {
        app = app.layer(middleware::from_fn_with_state(limiter, rate_limit_middleware));
    }

    app.layer(middleware::from_fn(request_logging))
}

async fn placeholder_page() -> Html<&'static str> {
    Html(PLACEHOLDER_PAGE)
}
