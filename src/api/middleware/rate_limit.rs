//! Rate limiting for the build status proxies, using a token bucket.
//!
//! The status endpoints spend the owner's GitHub and Vercel API quota on every
//! call, so they are limited per client IP. The contact gate is not limited.

use governor::clock::QuantaInstant;
use governor::middleware::NoOpMiddleware;
use std::sync::Arc;
use tower_governor::{
    GovernorLayer,
    governor::GovernorConfigBuilder,
    key_extractor::{KeyExtractor, PeerIpKeyExtractor, SmartIpKeyExtractor},
};

/// Seconds between replenished requests, per client.
const REPLENISH_SECS: u64 = 2;
/// Burst allowance, enough for a dashboard polling both endpoints.
const BURST_SIZE: u32 = 20;

/// Creates the rate limiter for status endpoints.
///
/// # Limits
///
/// - **Rate**: one request replenished every 2 seconds
/// - **Burst**: 20 requests
///
/// Requests exceeding the limit receive `429 Too Many Requests`.
///
/// # Key Extraction
///
/// With `behind_proxy`, the client IP is read from `X-Forwarded-For`,
/// `X-Real-IP` or `Forwarded`, falling back to the peer address. Otherwise
/// the socket peer address is used. Both require the server to be started
/// with connect info.
pub fn apply<S>(router: axum::Router<S>, behind_proxy: bool) -> axum::Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    if behind_proxy {
        router.layer(layer(SmartIpKeyExtractor))
    } else {
        router.layer(layer(PeerIpKeyExtractor))
    }
}

fn layer<K>(key_extractor: K) -> GovernorLayer<K, NoOpMiddleware<QuantaInstant>, axum::body::Body>
where
    K: KeyExtractor,
{
    let governor_conf = Arc::new(
        GovernorConfigBuilder::default()
            .key_extractor(key_extractor)
            .per_second(REPLENISH_SECS)
            .burst_size(BURST_SIZE)
            .finish()
            .expect("rate limit period and burst size are non-zero"),
    );

    GovernorLayer::new(governor_conf)
}
