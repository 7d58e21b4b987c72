//! Card Kingdom price list client for Rust.
//!
//! Downloads the singles or sealed product price list from Card Kingdom's
//! public API (or reads a saved copy from disk) and decodes it into typed
//! [`Product`] records plus the feed [`Metadata`].
//!
//! # Quick start
//!
//! ```no_run
//! use cardkingdom::Context;
//!
//! let ctx = Context::background();
//! let (products, meta) = cardkingdom::fetch_singles(&ctx, None).unwrap().into_parts();
//! println!("{} singles, generated {}", products.len(), meta.created_at);
//!
//! // Offline, from a saved fixture
//! let sealed = cardkingdom::fetch(&ctx, None, "fixtures/sealed.json").unwrap();
//! ```
//!
//! Every call performs exactly one GET (or file read) and decodes from
//! scratch. Nothing is cached between calls and nothing is retried.
//!
//! The blocking entry points drive the request on a small internal Tokio
//! runtime and must not be called from inside an async task; use
//! [`AsyncCardKingdom`] there.

pub mod async_client;
pub mod config;
pub mod context;
pub mod error;
pub mod fetch;
pub mod models;

pub use async_client::AsyncCardKingdom;
pub use config::{PRICELIST_URL, SEALED_PRICELIST_URL, USER_AGENT};
pub use context::Context;
pub use error::{CardKingdomError, Result};
pub use fetch::Source;
pub use models::{ConditionGrade, ConditionValue, Metadata, Pricelist, Product};

use std::fmt;
use std::time::Duration;

use reqwest::Client;

use crate::fetch::Request;

// ---------------------------------------------------------------------------
// CardKingdomBuilder
// ---------------------------------------------------------------------------

/// Builder for configuring and constructing a [`CardKingdom`] fetcher.
///
/// Use [`CardKingdom::builder()`] to obtain a builder, chain configuration
/// methods, and call [`build()`](CardKingdomBuilder::build).
pub struct CardKingdomBuilder {
    client: Option<Client>,
    timeout: Duration,
    connect_timeout: Duration,
    user_agent: String,
}

impl Default for CardKingdomBuilder {
    fn default() -> Self {
        Self {
            client: None,
            timeout: config::DEFAULT_TIMEOUT,
            connect_timeout: config::DEFAULT_CONNECT_TIMEOUT,
            user_agent: config::USER_AGENT.to_string(),
        }
    }
}

impl CardKingdomBuilder {
    /// Use a pre-configured HTTP client.
    ///
    /// The client's own timeouts apply; [`timeout`](Self::timeout) and
    /// [`connect_timeout`](Self::connect_timeout) are ignored.
    pub fn client(mut self, client: Client) -> Self {
        self.client = Some(client);
        self
    }

    /// Overall request timeout of the built-in client. Defaults to 120 seconds.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Connect timeout of the built-in client. Defaults to 30 seconds.
    pub fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = timeout;
        self
    }

    /// Override the `User-Agent` header. Defaults to [`USER_AGENT`].
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    pub fn build(self) -> Result<CardKingdom> {
        let client = match self.client {
            Some(client) => client,
            None => config::build_client(self.timeout, self.connect_timeout)?,
        };
        Ok(CardKingdom {
            client,
            user_agent: self.user_agent,
        })
    }
}

// ---------------------------------------------------------------------------
// CardKingdom
// ---------------------------------------------------------------------------

/// Reusable price list fetcher.
///
/// Holds only read-only configuration, so one instance can serve concurrent
/// calls from several threads.
#[derive(Clone)]
pub struct CardKingdom {
    client: Client,
    user_agent: String,
}

impl CardKingdom {
    /// Create a new builder for configuring the fetcher.
    pub fn builder() -> CardKingdomBuilder {
        CardKingdomBuilder::default()
    }

    /// Fetcher with the default hardened client.
    pub fn new() -> Result<Self> {
        Self::builder().build()
    }

    /// Fetch the singles price list from [`PRICELIST_URL`].
    pub fn singles(&self, ctx: &Context) -> Result<Pricelist> {
        self.fetch(ctx, PRICELIST_URL)
    }

    /// Fetch the sealed product price list from [`SEALED_PRICELIST_URL`].
    pub fn sealed(&self, ctx: &Context) -> Result<Pricelist> {
        self.fetch(ctx, SEALED_PRICELIST_URL)
    }

    /// Fetch and decode a price list from a URL or a local file path.
    ///
    /// `source` is fetched over HTTP when it starts with `http`, otherwise it
    /// is opened as a file (`.gz` files are decompressed on the fly).
    ///
    /// Cancelling `ctx` from another thread aborts an in-flight request.
    pub fn fetch(&self, ctx: &Context, source: &str) -> Result<Pricelist> {
        let req = Request {
            client: Some(&self.client),
            user_agent: &self.user_agent,
        };
        config::blocking_runtime()?.block_on(fetch::fetch_pricelist(ctx, &req, source))
    }

    /// The underlying HTTP client.
    pub fn client(&self) -> &Client {
        &self.client
    }

    /// Async flavour of this fetcher, sharing its client.
    pub fn into_async(self) -> AsyncCardKingdom {
        AsyncCardKingdom::from_parts(self.client, self.user_agent)
    }
}

impl fmt::Debug for CardKingdom {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CardKingdom")
            .field("user_agent", &self.user_agent)
            .finish_non_exhaustive()
    }
}

// ---------------------------------------------------------------------------
// One-shot entry points
// ---------------------------------------------------------------------------

/// Fetch the singles price list.
///
/// `client` of `None` builds the default hardened client for this call.
pub fn fetch_singles(ctx: &Context, client: Option<&Client>) -> Result<Pricelist> {
    fetch(ctx, client, PRICELIST_URL)
}

/// Fetch the sealed product price list.
pub fn fetch_sealed(ctx: &Context, client: Option<&Client>) -> Result<Pricelist> {
    fetch(ctx, client, SEALED_PRICELIST_URL)
}

/// Fetch a price list from `source`, a URL or a local file path.
pub fn fetch(ctx: &Context, client: Option<&Client>, source: &str) -> Result<Pricelist> {
    let req = Request {
        client,
        user_agent: USER_AGENT,
    };
    config::blocking_runtime()?.block_on(fetch::fetch_pricelist(ctx, &req, source))
}
