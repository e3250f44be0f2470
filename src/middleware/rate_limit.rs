//! Rate limiting middleware.
//!
//! Simple in-memory rate limiting per IP address using a fixed window.
//! Counts every request from an IP, not just rejected logins, and runs
//! outside the auth gate so the gate itself stays stateless.

use axum::{
    body::Body,
    extract::{ConnectInfo, State},
    http::{header, Request, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
};
use parking_lot::Mutex;
use std::collections::HashMap;
use std::net::{IpAddr, SocketAddr};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{debug, warn};

/// Configuration for rate limiting.
#[derive(Debug, Clone)]
pub struct RateLimitConfig {
    /// Maximum requests per window.
    pub max_requests: u32,
    /// Window duration.
    pub window: Duration,
    /// Burst allowance (extra requests above limit before hard reject).
    pub burst: u32,
}

impl RateLimitConfig {
    pub fn per_minute(max_requests: u32, burst: u32) -> Self {
        Self {
            max_requests,
            window: Duration::from_secs(60),
            burst,
        }
    }
}

/// Rate limiter state tracking requests per IP.
#[derive(Clone)]
pub struct RateLimitLayer {
    config: RateLimitConfig,
    state: Arc<Mutex<HashMap<IpAddr, RateLimitEntry>>>,
}

struct RateLimitEntry {
    count: u32,
    window_start: Instant,
}

impl RateLimitLayer {
    pub fn new(config: RateLimitConfig) -> Self {
        Self {
            config,
            state: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    /// Check if request should be allowed.
    fn check(&self, ip: IpAddr) -> RateLimitResult {
        let mut state = self.state.lock();
        let now = Instant::now();

        let entry = state.entry(ip).or_insert(RateLimitEntry {
            count: 0,
            window_start: now,
        });

        // Reset window if expired
        if now.duration_since(entry.window_start) >= self.config.window {
            entry.count = 0;
            entry.window_start = now;
        }

        entry.count = entry.count.saturating_add(1);

        let limit = self.config.max_requests.saturating_add(self.config.burst);
        let remaining = limit.saturating_sub(entry.count);
        let reset_at = entry.window_start + self.config.window;

        if entry.count > limit {
            RateLimitResult::Exceeded {
                retry_after: reset_at.saturating_duration_since(now),
            }
        } else if entry.count > self.config.max_requests {
            RateLimitResult::BurstUsed { remaining }
        } else {
            RateLimitResult::Allowed
        }
    }

    /// Drop entries whose window is long gone.
    pub fn cleanup(&self) {
        let mut state = self.state.lock();
        let now = Instant::now();
        let window = self.config.window;

        let before = state.len();
        state.retain(|_, entry| now.duration_since(entry.window_start) < window * 2);
        let dropped = before - state.len();
        if dropped > 0 {
            debug!(dropped, remaining = state.len(), "Rate limit entries pruned");
        }
    }

    /// Run `cleanup` every window on the current runtime.
    pub fn spawn_cleanup(&self) -> tokio::task::JoinHandle<()> {
        let limiter = self.clone();
        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(limiter.config.window);
            loop {
                ticker.tick().await;
                limiter.cleanup();
            }
        })
    }

    #[cfg(test)]
    fn tracked_ips(&self) -> usize {
        self.state.lock().len()
    }
}

enum RateLimitResult {
    Allowed,
    BurstUsed { remaining: u32 },
    Exceeded { retry_after: Duration },
}

/// Rate limiting middleware function.
///
/// Without connect info there is no client IP to key on, so the request
/// passes through unthrottled.
pub async fn rate_limit_middleware(
    connect_info: Option<ConnectInfo<SocketAddr>>,
    State(limiter): State<RateLimitLayer>,
    request: Request<Body>,
    next: Next,
) -> Response {
    let Some(ConnectInfo(addr)) = connect_info else {
        return next.run(request).await;
    };
    let ip = addr.ip();

    match limiter.check(ip) {
        RateLimitResult::Allowed => next.run(request).await,
        RateLimitResult::BurstUsed { remaining } => {
            debug!(ip = %ip, remaining, "Rate limit burst in use");
            next.run(request).await
        }
        RateLimitResult::Exceeded { retry_after } => {
            // Round up so clients never retry inside the same window
            let retry_secs = retry_after.as_secs() + u64::from(retry_after.subsec_nanos() > 0);
            warn!(
                ip = %ip,
                retry_after_secs = retry_secs,
                "Rate limit exceeded"
            );

            let body = serde_json::json!({
                "error": "rate_limit_exceeded",
                "message": "Too many requests. Please slow down.",
                "retry_after_seconds": retry_secs,
            });

            (
                StatusCode::TOO_MANY_REQUESTS,
                [(header::RETRY_AFTER, retry_secs.to_string())],
                axum::Json(body),
            )
                .into_response()
        }
    }
}
