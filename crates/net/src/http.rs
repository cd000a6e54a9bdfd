use std::io::Read;
use std::time::{Duration, Instant};

use url::Url;

use crate::{FetchError, FetchResult, MAX_BODY_BYTES, Transport, USER_AGENT};

fn read_limited(reader: impl Read, url: &Url) -> Result<String, FetchError> {
    read_capped(reader, url, MAX_BODY_BYTES)
}

/// Reads at most `limit` bytes; a longer body fails with [`FetchError::BodyTooLarge`].
fn read_capped(reader: impl Read, url: &Url, limit: u64) -> Result<String, FetchError> {
    let mut buf = Vec::with_capacity(16 * 1024);
    reader
        .take(limit.saturating_add(1))
        .read_to_end(&mut buf)
        .map_err(|e| FetchError::Transport {
            url: url.to_string(),
            message: e.to_string(),
        })?;
    if buf.len() as u64 > limit {
        log::warn!(target: "net", "{url}: body larger than {limit} bytes, discarded");
        return Err(FetchError::BodyTooLarge {
            url: url.to_string(),
            limit,
        });
    }
    Ok(String::from_utf8_lossy(&buf).into_owned())
}

/// Primary transport: a blocking reqwest client.
pub struct ReqwestTransport {
    client: reqwest::blocking::Client,
}

impl ReqwestTransport {
    pub fn new(timeout: Duration) -> Result<Self, FetchError> {
        let client = reqwest::blocking::Client::builder()
            .timeout(timeout)
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| FetchError::Client(e.to_string()))?;
        Ok(Self { client })
    }
}

impl Transport for ReqwestTransport {
    fn name(&self) -> &'static str {
        "reqwest"
    }

    fn get(&self, url: &Url) -> Result<FetchResult, FetchError> {
        let start = Instant::now();
        let resp = self
            .client
            .get(url.clone())
            .send()
            .map_err(|e| FetchError::Transport {
                url: url.to_string(),
                message: e.to_string(),
            })?;

        let status = resp.status();
        let final_url = resp.url().to_string();
        let content_type = resp
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(|s| s.to_string());
        let body = read_limited(resp, url)?;

        Ok(FetchResult {
            url: final_url,
            requested_url: url.to_string(),
            status: Some(status.as_u16()),
            status_text: status.canonical_reason().unwrap_or("").to_string(),
            content_type,
            body,
            duration_ms: start.elapsed().as_millis(),
        })
    }
}

/// Fallback transport for http(s): a separate ureq agent, so a failure specific to the
/// primary client stack gets a second, independent attempt.
pub struct UreqTransport {
    agent: ureq::Agent,
}

impl UreqTransport {
    pub fn new(timeout: Duration) -> Self {
        let agent = ureq::AgentBuilder::new()
            .timeout(timeout)
            .user_agent(USER_AGENT)
            .build();
        Self { agent }
    }
}

impl Transport for UreqTransport {
    fn name(&self) -> &'static str {
        "ureq"
    }

    fn get(&self, url: &Url) -> Result<FetchResult, FetchError> {
        let start = Instant::now();
        let resp = match self.agent.get(url.as_str()).call() {
            Ok(resp) => resp,
            // The server answered; hand the status back to the caller.
            Err(ureq::Error::Status(_, resp)) => resp,
            Err(err) => {
                return Err(FetchError::Transport {
                    url: url.to_string(),
                    message: err.to_string(),
                });
            }
        };

        let status = resp.status();
        let status_text = resp.status_text().to_string();
        let final_url = resp.get_url().to_string();
        let content_type = resp.header("content-type").map(str::to_string);
        let body = read_limited(resp.into_reader(), url)?;

        Ok(FetchResult {
            url: final_url,
            requested_url: url.to_string(),
            status: Some(status),
            status_text,
            content_type,
            body,
            duration_ms: start.elapsed().as_millis(),
        })
    }
}
