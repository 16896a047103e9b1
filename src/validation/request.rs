//! Checks that gate a network fetch.
//!
//! Before a page is fetched, the client is checked for every [`Capability`]
//! and the URL for plausibility. All problems are reported together.

use std::fmt;
use std::future::Future;

use thiserror::Error;
use tracing::{debug, info};

use super::validated::Validated;

/// An operation a [`NetworkClient`] may offer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Capability {
    /// Fetching a page.
    Get,
    /// Submitting a body.
    Post,
    /// Accepting initialization parameters.
    InitParams,
}

impl Capability {
    /// Every capability, in the order they are checked.
    pub const ALL: [Self; 3] = [Self::Get, Self::Post, Self::InitParams];

    const fn article(self) -> &'static str {
        match self {
            Self::Get | Self::Post => "a",
            Self::InitParams => "an",
        }
    }
}

impl fmt::Display for Capability {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(match self {
            Self::Get => "get",
            Self::Post => "post",
            Self::InitParams => "initParams",
        })
    }
}

/// A fetched page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page {
    /// HTTP status code.
    pub status: u16,
    /// Response body.
    pub body: String,
}

/// Errors raised by a [`NetworkClient`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
    /// The client does not offer the operation.
    #[error("client does not support {0}")]
    Unsupported(Capability),
    /// The request could not be completed.
    #[error("request to {url} failed: {message}")]
    Transport {
        /// The requested URL.
        url: String,
        /// What went wrong.
        message: String,
    },
}

/// A network client the fetch is delegated to.
pub trait NetworkClient {
    /// Whether the client offers `capability`.
    fn supports(&self, capability: Capability) -> bool;

    /// How the client is named in validation messages.
    fn describe(&self) -> String {
        std::any::type_name::<Self>().to_string()
    }

    /// Fetches `url`.
    fn get(&self, url: &str) -> impl Future<Output = Result<Page, FetchError>> + Send;

    /// Submits `body` to `url`.
    fn post(&self, url: &str, body: &str) -> impl Future<Output = Result<Page, FetchError>> + Send;
}

/// Errors returned by [`load_website`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LoadError {
    /// The client or URL failed validation.
    #[error("{}", .0.join(", "))]
    Invalid(Vec<String>),
    /// The fetch itself failed.
    #[error(transparent)]
    Fetch(#[from] FetchError),
}

/// Checks that `client` offers every capability.
///
/// One message per missing capability, in [`Capability::ALL`] order.
pub fn validate_client<C>(client: &C) -> Validated<String, &C>
where
    C: NetworkClient,
{
    Capability::ALL
        .into_iter()
        .map(|capability| {
            if client.supports(capability) {
                Validated::success(client)
            } else {
                Validated::failure(format!(
                    "Your request doesn't have {} {capability} function, you sent: {}",
                    capability.article(),
                    client.describe()
                ))
            }
        })
        .fold(Validated::success(client), Validated::concat)
}

/// Checks that `url` plausibly names a web resource.
///
/// A URL passes when it is non-empty and contains `http`, `https` or
/// `localhost` (in any case) or a `.`.
pub fn validate_url(url: &str) -> Validated<String, &str> {
    let lowered = url.to_lowercase();
    let plausible = !url.is_empty()
        && (["http", "https", "localhost"]
            .iter()
            .any(|marker| lowered.contains(marker))
            || url.contains('.'));
    if plausible {
        Validated::success(url)
    } else {
        Validated::failure(format!(
            "The URL doesn't appear to be a valid url containing http, https, localhost, or dots for an IP Address. You sent: {url}"
        ))
    }
}

/// Validates `client` and `url`, then fetches the page.
///
/// # Errors
///
/// Returns `LoadError::Invalid` with every validation message when either
/// check fails; the client is not called in that case. Returns
/// `LoadError::Fetch` when the fetch fails.
pub async fn load_website<C>(client: &C, url: &str) -> Result<Page, LoadError>
where
    C: NetworkClient,
{
    let (client, url) = validate_client(client)
        .map2(validate_url(url), |client, url| (client, url))
        .into_result()
        .map_err(|messages| {
            debug!(count = messages.len(), "request failed validation");
            LoadError::Invalid(messages)
        })?;

    let page = client.get(url).await?;
    info!(url, status = page.status, "fetched page");
    Ok(page)
}
