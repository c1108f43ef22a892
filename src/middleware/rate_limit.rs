use axum::{
    body::Body,
    extract::{ConnectInfo, MatchedPath, Request},
    http::StatusCode,
    middleware::Next,
    response::Response,
};
use std::net::SocketAddr;
use std::sync::Arc;
use tower_governor::{governor::GovernorConfigBuilder, GovernorLayer};

use crate::config::Config;
use crate::error::{AppError, AppResult};

/// Type alias for the global governor layer (IP-based rate limiting)
pub type GlobalGovernorLayer = GovernorLayer<
    tower_governor::key_extractor::PeerIpKeyExtractor,
    governor::middleware::NoOpMiddleware<governor::clock::QuantaInstant>,
    Body,
>;

/// Create a GovernorLayer for global rate limiting (per IP address)
/// - one token every `rate_limit_per_ms` milliseconds
/// - at most `rate_limit_burst` tokens banked
pub fn create_global_governor(config: &Config) -> AppResult<GlobalGovernorLayer> {
    let governor_config = GovernorConfigBuilder::default()
        .per_millisecond(config.rate_limit_per_ms)
        .burst_size(config.rate_limit_burst)
        .finish()
        .ok_or_else(|| {
            AppError::Internal(format!(
                "Invalid rate limit: per_ms={}, burst={} (both must be non-zero)",
                config.rate_limit_per_ms, config.rate_limit_burst
            ))
        })?;

    Ok(GovernorLayer::new(Arc::new(governor_config)))
}

/// Route template whose successful hits are too frequent to be worth logging
const HEALTH_ROUTE: &str = "/api/health";

/// Middleware to log each request by client and matched route.
///
/// Must sit outside the governor layer, otherwise rejected requests never
/// reach it.
pub async fn log_request(
    ConnectInfo(addr): ConnectInfo<SocketAddr>,
    request: Request,
    next: Next,
) -> Response {
    let method = request.method().clone();
    let uri = request.uri().clone();
    let route = request
        .extensions()
        .get::<MatchedPath>()
        .map(|path| path.as_str().to_owned())
        .unwrap_or_else(|| "<unmatched>".to_owned());

    let response = next.run(request).await;
    let status = response.status();

    match status {
        StatusCode::TOO_MANY_REQUESTS => tracing::warn!(
            client_ip = %addr.ip(),
            method = %method,
            route = %route,
            "RATE LIMITED - Request rejected due to too many requests"
        ),
        s if s.is_client_error() || s.is_server_error() => tracing::warn!(
            client_ip = %addr.ip(),
            method = %method,
            route = %route,
            uri = %uri,
            status = %status,
            "Request failed"
        ),
        _ if route == HEALTH_ROUTE => {}
        _ => tracing::debug!(
            client_ip = %addr.ip(),
            method = %method,
            route = %route,
            status = %status,
            "Request completed"
        ),
    }

    response
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_rate_limit_rejected() {
        let config = Config {
            rate_limit_per_ms: 0,
            ..Config::default()
        };
        assert!(matches!(
            create_global_governor(&config),
            Err(AppError::Internal(_))
        ));
    }

    #[test]
    fn test_default_rate_limit_builds() {
        assert!(create_global_governor(&Config::default()).is_ok());
    }
}
