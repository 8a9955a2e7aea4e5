//! Rate limiting middleware using token bucket algorithm.

use governor::clock::QuantaInstant;
use governor::middleware::NoOpMiddleware;
use std::sync::Arc;
use tower_governor::{
    GovernorLayer, governor::GovernorConfigBuilder, key_extractor::PeerIpKeyExtractor,
};

type PeerIpGovernorLayer =
    GovernorLayer<PeerIpKeyExtractor, NoOpMiddleware<QuantaInstant>, axum::body::Body>;

/// Creates a rate limiter for form submissions that probe secrets
/// (guest codes, admin credentials).
///
/// # Limits
///
/// - **Rate**: 1 request every 2 seconds
/// - **Burst**: 10 requests
///
/// Requests exceeding the limit receive `429 Too Many Requests`.
///
/// # Key Extraction
///
/// Rate limits are applied per client IP address extracted from the
/// socket peer address, so the server must be started with
/// `into_make_service_with_connect_info::<SocketAddr>`.
///
/// # Example
///
/// ```rust,ignore
/// let app = Router::new()
///     .route("/validar", post(validate_code_handler))
///     .layer(rate_limit::layer());
/// ```
pub fn layer() -> PeerIpGovernorLayer {
    build(2, 10)
}

fn build(period_seconds: u64, burst_size: u32) -> PeerIpGovernorLayer {
    let governor_conf = Arc::new(
        GovernorConfigBuilder::default()
            .per_second(period_seconds)
            .burst_size(burst_size)
            .finish()
            .expect("non-zero rate limit period and burst size"),
    );

    GovernorLayer::new(governor_conf)
}
