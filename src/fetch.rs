//! Source resolution and price list decoding.
//!
//! A source is either a URL (anything starting with `http`) fetched with a
//! single GET, or a path to a local file. The GET is raced against the
//! context's cancellation and deadline; losing the race drops the request
//! future and with it the connection. The response body or file handle is
//! owned by the call and released before it returns, on every path.

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::{Path, PathBuf};

use flate2::read::GzDecoder;
use reqwest::header::USER_AGENT;
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use serde_json::de::{IoRead, SliceRead};
use url::Url;

use crate::config::{default_client, ERROR_BODY_LIMIT};
use crate::context::Context;
use crate::error::{CardKingdomError, Result};
use crate::models::Pricelist;

/// Where a price list is read from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Source {
    Remote(Url),
    Local(PathBuf),
}

impl Source {
    /// Classify `source` by its literal `http` prefix.
    ///
    /// An `http`-prefixed string that does not parse as a URL is an error;
    /// everything else is taken as a filesystem path.
    pub fn parse(source: &str) -> Result<Self> {
        if source.starts_with("http") {
            let url = Url::parse(source).map_err(|error| CardKingdomError::InvalidSource {
                source_id: source.to_string(),
                error,
            })?;
            Ok(Source::Remote(url))
        } else {
            Ok(Source::Local(PathBuf::from(source)))
        }
    }
}

/// Per-call request settings shared by the fetch entry points.
pub(crate) struct Request<'a> {
    /// `None` builds the default client for this call.
    pub client: Option<&'a Client>,
    pub user_agent: &'a str,
}

/// Resolve `source`, read it and decode the envelope.
pub(crate) async fn fetch_pricelist(
    ctx: &Context,
    req: &Request<'_>,
    source: &str,
) -> Result<Pricelist> {
    if let Some(err) = interrupted(ctx, source) {
        return Err(err);
    }

    match Source::parse(source)? {
        Source::Remote(url) => {
            let body = tokio::select! {
                biased;
                () = ctx.cancelled() => return Err(CardKingdomError::Cancelled {
                    target: source.to_string(),
                }),
                () = ctx.expired() => return Err(CardKingdomError::DeadlineExceeded {
                    target: source.to_string(),
                }),
                body = download(req, source, url) => body?,
            };
            decode(source, SliceRead::new(body.as_ref()))
        }
        Source::Local(path) => {
            let source = source.to_string();
            tokio::task::spawn_blocking(move || read_local(&source, &path))
                .await
                .map_err(|e| CardKingdomError::Task(format!("task join error: {e}")))?
        }
    }
}

async fn download(req: &Request<'_>, target: &str, url: Url) -> Result<impl AsRef<[u8]>> {
    log::debug!("GET {target}");

    let owned;
    let client = match req.client {
        Some(client) => client,
        None => {
            owned = default_client()?;
            &owned
        }
    };

    let transport = |error: reqwest::Error| CardKingdomError::Transport {
        target: target.to_string(),
        error,
    };

    let mut resp = client
        .get(url)
        .header(USER_AGENT, req.user_agent)
        .send()
        .await
        .map_err(transport)?;

    let status = resp.status();
    if status != StatusCode::OK {
        let mut excerpt = Vec::new();
        while excerpt.len() < ERROR_BODY_LIMIT {
            match resp.chunk().await {
                Ok(Some(chunk)) => excerpt.extend_from_slice(&chunk),
                _ => break,
            }
        }
        return Err(CardKingdomError::Status {
            target: target.to_string(),
            status,
            body: error_excerpt(&excerpt),
        });
    }

    let body = resp.bytes().await.map_err(transport)?;
    log::debug!("GET {target}: {status}, {} bytes", body.len());
    Ok(body)
}

/// The first [`ERROR_BODY_LIMIT`] bytes of an error body as text.
///
/// A character split by the limit is dropped rather than replaced. Invalid
/// bytes become U+FFFD, and the result never exceeds the limit.
fn error_excerpt(body: &[u8]) -> String {
    let mut body = &body[..body.len().min(ERROR_BODY_LIMIT)];
    if let Err(e) = std::str::from_utf8(body) {
        if e.error_len().is_none() {
            body = &body[..e.valid_up_to()];
        }
    }
    let mut text = String::from_utf8_lossy(body).into_owned();
    if text.len() > ERROR_BODY_LIMIT {
        let mut end = ERROR_BODY_LIMIT;
        while !text.is_char_boundary(end) {
            end -= 1;
        }
        text.truncate(end);
    }
    text
}

fn read_local(source: &str, path: &Path) -> Result<Pricelist> {
    log::debug!("reading price list from {}", path.display());
    let file = File::open(path).map_err(|error| CardKingdomError::Io {
        path: path.to_path_buf(),
        error,
    })?;
    let reader: Box<dyn Read> = if path.extension().and_then(|e| e.to_str()) == Some("gz") {
        Box::new(GzDecoder::new(BufReader::new(file)))
    } else {
        Box::new(file)
    };
    decode(source, IoRead::new(BufReader::new(reader)))
}

/// Decode the first JSON value of the stream; anything after it is ignored.
fn decode<'de, R: serde_json::de::Read<'de>>(source: &str, read: R) -> Result<Pricelist> {
    let mut de = serde_json::Deserializer::new(read);
    let pricelist = Pricelist::deserialize(&mut de).map_err(|error| CardKingdomError::Decode {
        source_id: source.to_string(),
        error,
    })?;
    log::debug!("decoded {} products from {source}", pricelist.len());
    Ok(pricelist)
}

/// The error to report if `ctx` has been cancelled or has expired.
fn interrupted(ctx: &Context, target: &str) -> Option<CardKingdomError> {
    if ctx.is_cancelled() {
        Some(CardKingdomError::Cancelled {
            target: target.to_string(),
        })
    } else if ctx.is_expired() {
        Some(CardKingdomError::DeadlineExceeded {
            target: target.to_string(),
        })
    } else {
        None
    }
}
