//! Relative path from the current page back to the site root.
use std::fmt;

use percent_encoding::percent_decode_str;
use thiserror::Error;

use crate::config::MenuConfig;
use crate::context::PageContext;

const PARENT: &str = "../";
const CURRENT: &str = "./";

/// `"./"` at the root, otherwise one `"../"` per directory level.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct BasePath(String);

impl BasePath {
    pub fn root() -> Self {
        Self(CURRENT.to_string())
    }

    pub fn from_depth(depth: usize) -> Self {
        if depth == 0 {
            Self::root()
        } else {
            Self(PARENT.repeat(depth))
        }
    }

    /// Number of leading `"../"` segments.
    pub fn depth(&self) -> usize {
        count_parent_segments(&self.0)
    }

    pub fn is_root(&self) -> bool {
        self.depth() == 0
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Same path with a trailing `/`.
    pub fn normalized(&self) -> Self {
        if self.0.ends_with('/') {
            self.clone()
        } else {
            Self(format!("{}/", self.0))
        }
    }

    /// `self` followed by `file`, e.g. `"../../" + "menu.html"`.
    pub fn join(&self, file: &str) -> String {
        format!("{}{}", self.normalized().0, file)
    }
}

impl fmt::Display for BasePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

pub(crate) fn count_parent_segments(s: &str) -> usize {
    let mut rest = s;
    let mut n = 0;
    while let Some(r) = rest.strip_prefix(PARENT) {
        rest = r;
        n += 1;
    }
    n
}

#[derive(Debug, Error)]
enum ResolveError {
    #[error("document location is unknown")]
    NoLocation,
    #[error("document path is not valid UTF-8 once decoded")]
    Undecodable,
}

/// Depth from the loader's `<script src>`, when it says anything conclusive.
fn from_script_src(src: &str, script_name: &str) -> Option<BasePath> {
    let depth = count_parent_segments(src);
    if depth > 0 {
        log::debug!(target: "menu.path", "base path from script src {src:?}: depth {depth}");
        return Some(BasePath::from_depth(depth));
    }
    if src.starts_with(CURRENT) || src == script_name {
        log::debug!(target: "menu.path", "script src {src:?} sits at the site root");
        return Some(BasePath::root());
    }
    None
}

fn from_document_path(ctx: &PageContext) -> Result<BasePath, ResolveError> {
    let url = ctx.document_url.as_ref().ok_or(ResolveError::NoLocation)?;
    let decoded = percent_decode_str(url.path())
        .decode_utf8()
        .map_err(|_| ResolveError::Undecodable)?;
    let depth = decoded
        .split('/')
        .filter(|p| !p.is_empty() && !p.ends_with(".html") && !p.contains('?'))
        .count();
    log::debug!(target: "menu.path", "base path from document path {decoded:?}: depth {depth}");
    Ok(BasePath::from_depth(depth))
}

/// Works out the base path for `ctx`. Never fails: anything unreadable means the root.
pub fn resolve_base_path(ctx: &PageContext, config: &MenuConfig) -> BasePath {
    if let Some(base) = ctx
        .script_src
        .as_deref()
        .and_then(|src| from_script_src(src, &config.script_name))
    {
        return base;
    }
    match from_document_path(ctx) {
        Ok(base) => base,
        Err(err) => {
            log::warn!(target: "menu.path", "{err}; assuming the site root");
            BasePath::root()
        }
    }
}
