use std::path::PathBuf;

use net::FetchError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum MenuError {
    #[error("no element with id=\"{0}\" in the page")]
    MissingContainer(String),
    #[error("cannot resolve {href} against the document: {reason}")]
    UnresolvableUrl { href: String, reason: String },
    #[error(transparent)]
    Fetch(#[from] FetchError),
    #[error("no .{class} element in {url}")]
    MissingHeader { url: String, class: &'static str },
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read config {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid config: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("invalid config: {0}")]
    Invalid(String),
}
