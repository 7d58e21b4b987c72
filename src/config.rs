use std::sync::OnceLock;
use std::time::Duration;

use reqwest::Client;
use tokio::runtime::Runtime;

use crate::error::{CardKingdomError, Result};

/// Singles price list endpoint.
pub const PRICELIST_URL: &str = "https://api.cardkingdom.com/api/v2/pricelist";
/// Sealed product price list endpoint.
pub const SEALED_PRICELIST_URL: &str = "https://api.cardkingdom.com/api/sealed_pricelist";

/// Value sent in the `User-Agent` header of every request.
pub const USER_AGENT: &str = "go-cardkingdom";

/// Upper bound on the body excerpt kept from a non-OK response.
pub const ERROR_BODY_LIMIT: usize = 4 << 10;

/// Layout of `meta.created_at` in the feed.
pub const CREATED_AT_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Overall request timeout of the default client. The singles list is large.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(120);
pub const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(30);
pub const DEFAULT_POOL_IDLE_TIMEOUT: Duration = Duration::from_secs(90);

/// Build the default HTTP client.
///
/// Bounded timeouts, at most 10 redirects, and no proxy picked up from the
/// environment.
pub fn default_client() -> Result<Client> {
    build_client(DEFAULT_TIMEOUT, DEFAULT_CONNECT_TIMEOUT)
}

pub(crate) fn build_client(timeout: Duration, connect_timeout: Duration) -> Result<Client> {
    Client::builder()
        .timeout(timeout)
        .connect_timeout(connect_timeout)
        .pool_idle_timeout(DEFAULT_POOL_IDLE_TIMEOUT)
        .redirect(reqwest::redirect::Policy::limited(10))
        .no_proxy()
        .build()
        .map_err(CardKingdomError::Client)
}

/// Runtime that drives the blocking entry points.
///
/// Shared by every blocking call so a caller's [`Client`] keeps its pooled
/// connections on one runtime across calls.
pub(crate) fn blocking_runtime() -> Result<&'static Runtime> {
    static RUNTIME: OnceLock<Runtime> = OnceLock::new();

    if let Some(rt) = RUNTIME.get() {
        return Ok(rt);
    }
    let rt = tokio::runtime::Builder::new_multi_thread()
        .worker_threads(1)
        .thread_name("cardkingdom-io")
        .enable_all()
        .build()
        .map_err(CardKingdomError::Runtime)?;
    Ok(RUNTIME.get_or_init(|| rt))
}
