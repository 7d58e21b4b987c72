//! Async price list fetcher for use inside a Tokio runtime.
//!
//! The request future is raced against [`Context::cancelled`] and the
//! context deadline; cancelling the context drops the request and its
//! connection. Local files are read on the blocking thread pool.
//!
//! # Example
//!
//! ```no_run
//! use cardkingdom::{AsyncCardKingdom, Context};
//!
//! #[tokio::main]
//! async fn main() {
//!     let ck = AsyncCardKingdom::builder().build().unwrap();
//!     let ctx = Context::background();
//!
//!     let sealed = ck.sealed(&ctx).await.unwrap();
//!     println!("{} sealed products", sealed.len());
//! }
//! ```

use std::fmt;
use std::time::Duration;

use reqwest::Client;

use crate::context::Context;
use crate::error::Result;
use crate::fetch::{self, Request};
use crate::models::Pricelist;
use crate::{config, CardKingdom, CardKingdomBuilder};

// ---------------------------------------------------------------------------
// AsyncCardKingdomBuilder
// ---------------------------------------------------------------------------

/// Builder for configuring and constructing an [`AsyncCardKingdom`] instance.
///
/// Accepts the same settings as [`CardKingdomBuilder`].
#[derive(Default)]
pub struct AsyncCardKingdomBuilder {
    inner: CardKingdomBuilder,
}

impl AsyncCardKingdomBuilder {
    /// Use a pre-configured HTTP client.
    pub fn client(mut self, client: Client) -> Self {
        self.inner = self.inner.client(client);
        self
    }

    /// Overall request timeout of the built-in client.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.inner = self.inner.timeout(timeout);
        self
    }

    /// Connect timeout of the built-in client.
    pub fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.inner = self.inner.connect_timeout(timeout);
        self
    }

    /// Override the `User-Agent` header.
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.inner = self.inner.user_agent(user_agent);
        self
    }

    pub fn build(self) -> Result<AsyncCardKingdom> {
        Ok(self.inner.build()?.into_async())
    }
}

// ---------------------------------------------------------------------------
// AsyncCardKingdom
// ---------------------------------------------------------------------------

/// Async counterpart of [`CardKingdom`].
///
/// Cheap to clone; clones share the underlying client.
#[derive(Clone)]
pub struct AsyncCardKingdom {
    client: Client,
    user_agent: String,
}

impl AsyncCardKingdom {
    /// Create a new builder for configuring the async fetcher.
    pub fn builder() -> AsyncCardKingdomBuilder {
        AsyncCardKingdomBuilder::default()
    }

    pub(crate) fn from_parts(client: Client, user_agent: String) -> Self {
        Self { client, user_agent }
    }

    /// Fetch the singles price list.
    pub async fn singles(&self, ctx: &Context) -> Result<Pricelist> {
        self.fetch(ctx, config::PRICELIST_URL).await
    }

    /// Fetch the sealed product price list.
    pub async fn sealed(&self, ctx: &Context) -> Result<Pricelist> {
        self.fetch(ctx, config::SEALED_PRICELIST_URL).await
    }

    /// Fetch a price list from a URL or local path.
    pub async fn fetch(&self, ctx: &Context, source: &str) -> Result<Pricelist> {
        let req = Request {
            client: Some(&self.client),
            user_agent: &self.user_agent,
        };
        fetch::fetch_pricelist(ctx, &req, source).await
    }
}

impl From<CardKingdom> for AsyncCardKingdom {
    fn from(ck: CardKingdom) -> Self {
        ck.into_async()
    }
}

impl fmt::Debug for AsyncCardKingdom {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AsyncCardKingdom")
            .field("user_agent", &self.user_agent)
            .finish_non_exhaustive()
    }
}
