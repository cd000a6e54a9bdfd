//! Blocking text fetches with one fallback attempt.
//!
//! A [`Fetcher`] pairs a primary [`Transport`] with an optional fallback. The primary must
//! answer 2xx with a non-blank body; anything else is retried exactly once through the
//! fallback, which accepts `200` or a status-less local read. There is no retry loop.
use std::path::PathBuf;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use core_types::{RequestId, ResourceKind};
use thiserror::Error;
use url::Url;

mod file;
mod http;

pub use crate::file::FileTransport;
pub use crate::http::{ReqwestTransport, UreqTransport};

pub const USER_AGENT: &str = concat!("navshell/", env!("CARGO_PKG_VERSION"));
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);
/// Bodies are truncated past this size; menu fragments are a few KiB.
pub const MAX_BODY_BYTES: u64 = 2 * 1024 * 1024;

#[derive(Debug, Clone)]
pub struct FetchResult {
    pub url: String,           // final URL after redirects
    pub requested_url: String, // what we asked for
    /// `None` for local reads, which have no HTTP status.
    pub status: Option<u16>,
    pub status_text: String,
    pub content_type: Option<String>,
    pub body: String,
    pub duration_ms: u128,
}

impl FetchResult {
    pub fn is_success_status(&self) -> bool {
        self.status.is_none_or(|s| (200..300).contains(&s))
    }

    /// Primary-transport acceptance: success status and a non-blank body.
    pub fn require_success(self) -> Result<Self, FetchError> {
        if let Some(status) = self.status.filter(|_| !self.is_success_status()) {
            return Err(FetchError::Status {
                url: self.requested_url,
                status,
                reason: self.status_text,
            });
        }
        if self.body.trim().is_empty() {
            return Err(FetchError::EmptyBody {
                url: self.requested_url,
            });
        }
        Ok(self)
    }

    /// Fallback-transport acceptance: status 200 or no status at all.
    fn require_fallback_status(self) -> Result<Self, FetchError> {
        match self.status {
            None | Some(200) => Ok(self),
            Some(status) => Err(FetchError::Status {
                url: self.requested_url,
                status,
                reason: self.status_text,
            }),
        }
    }
}

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("client build error: {0}")]
    Client(String),
    #[error("network error fetching {url}: {message}")]
    Transport { url: String, message: String },
    #[error("HTTP {status}: {reason}")]
    Status {
        url: String,
        status: u16,
        reason: String,
    },
    #[error("{url} returned an empty body")]
    EmptyBody { url: String },
    #[error("{url} body exceeds {limit} bytes")]
    BodyTooLarge { url: String, limit: u64 },
    #[error("cannot read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("unsupported URL scheme `{scheme}` for {url}")]
    UnsupportedScheme { scheme: String, url: String },
}

/// One way of issuing a GET. Implementations report HTTP error statuses as `Ok` results
/// when the server answered; `Err` is for requests that produced no response.
pub trait Transport {
    fn name(&self) -> &'static str;
    fn get(&self, url: &Url) -> Result<FetchResult, FetchError>;
}

#[derive(Debug)]
pub struct FetchOutcome {
    pub result: FetchResult,
    pub transport: &'static str,
    /// Set when the primary attempt failed and the fallback answered.
    pub primary_error: Option<FetchError>,
}

pub struct Fetcher {
    primary: Box<dyn Transport>,
    fallback: Option<Box<dyn Transport>>,
    next_request: AtomicU64,
}

impl Fetcher {
    pub fn new(primary: Box<dyn Transport>, fallback: Option<Box<dyn Transport>>) -> Self {
        Self {
            primary,
            fallback,
            next_request: AtomicU64::new(1),
        }
    }

    /// Default transports for the scheme of `url`: `http(s)` pairs reqwest with ureq,
    /// `file` pairs reqwest (which refuses the scheme, like `fetch()` on `file://`) with a
    /// direct file read.
    pub fn for_url(url: &Url, timeout: Duration) -> Result<Self, FetchError> {
        let primary: Box<dyn Transport> = Box::new(ReqwestTransport::new(timeout)?);
        let fallback: Box<dyn Transport> = match url.scheme() {
            "http" | "https" => Box::new(UreqTransport::new(timeout)),
            "file" => Box::new(FileTransport),
            other => {
                return Err(FetchError::UnsupportedScheme {
                    scheme: other.to_string(),
                    url: url.to_string(),
                });
            }
        };
        Ok(Self::new(primary, Some(fallback)))
    }

    fn next_request_id(&self) -> RequestId {
        self.next_request.fetch_add(1, Ordering::Relaxed)
    }

    /// Fetches `url`, retrying once through the fallback when the primary attempt fails.
    pub fn fetch_text(&self, url: &Url, kind: ResourceKind) -> Result<FetchOutcome, FetchError> {
        let request_id = self.next_request_id();
        log::debug!(
            target: "net",
            "[{request_id}] GET {url} ({}) via {}",
            kind.label(),
            self.primary.name()
        );

        let primary_error = match self.primary.get(url).and_then(FetchResult::require_success) {
            Ok(result) => {
                log::debug!(
                    target: "net",
                    "[{request_id}] {} {} bytes in {} ms",
                    result.status.map_or_else(|| "local".to_string(), |s| s.to_string()),
                    result.body.len(),
                    result.duration_ms
                );
                return Ok(FetchOutcome {
                    result,
                    transport: self.primary.name(),
                    primary_error: None,
                });
            }
            Err(err) => err,
        };

        let Some(fallback) = &self.fallback else {
            log::warn!(target: "net", "[{request_id}] {} fetch failed: {primary_error}", kind.label());
            return Err(primary_error);
        };
        log::warn!(
            target: "net",
            "[{request_id}] {} via {} failed ({primary_error}), retrying via {}",
            kind.label(),
            self.primary.name(),
            fallback.name()
        );

        match fallback.get(url).and_then(FetchResult::require_fallback_status) {
            Ok(result) => Ok(FetchOutcome {
                result,
                transport: fallback.name(),
                primary_error: Some(primary_error),
            }),
            Err(err) => {
                log::error!(target: "net", "[{request_id}] {} fallback failed: {err}", kind.label());
                Err(err)
            }
        }
    }
}
