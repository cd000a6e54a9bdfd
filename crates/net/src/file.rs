use std::path::Path;
use std::time::Instant;

use url::Url;

use crate::{FetchError, FetchResult, Transport};

/// Reads `file://` URLs straight from disk. Results carry no HTTP status.
#[derive(Debug, Default, Clone, Copy)]
pub struct FileTransport;

fn guess_content_type(path: &Path) -> Option<String> {
    let ext = path.extension()?.to_str()?.to_ascii_lowercase();
    let ct = match ext.as_str() {
        "html" | "htm" => "text/html; charset=utf-8",
        "css" => "text/css; charset=utf-8",
        "js" => "text/javascript; charset=utf-8",
        "png" => "image/png",
        _ => return None,
    };
    Some(ct.to_string())
}

impl Transport for FileTransport {
    fn name(&self) -> &'static str {
        "file"
    }

    fn get(&self, url: &Url) -> Result<FetchResult, FetchError> {
        let start = Instant::now();
        if url.scheme() != "file" {
            return Err(FetchError::UnsupportedScheme {
                scheme: url.scheme().to_string(),
                url: url.to_string(),
            });
        }
        let path = url.to_file_path().map_err(|()| FetchError::Transport {
            url: url.to_string(),
            message: "not a local file path".to_string(),
        })?;
        let bytes = std::fs::read(&path).map_err(|source| FetchError::Io {
            path: path.clone(),
            source,
        })?;

        Ok(FetchResult {
            url: url.to_string(),
            requested_url: url.to_string(),
            status: None,
            status_text: String::new(),
            content_type: guess_content_type(&path),
            body: String::from_utf8_lossy(&bytes).into_owned(),
            duration_ms: start.elapsed().as_millis(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_local_files_without_status() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("menu.html");
        std::fs::write(&path, "<header class=\"fixed-header\"></header>").unwrap();

        let url = Url::from_file_path(&path).unwrap();
        let result = FileTransport.get(&url).unwrap();
        assert_eq!(result.status, None);
        assert!(result.is_success_status());
        assert!(result.body.contains("fixed-header"));
        assert_eq!(result.content_type.as_deref(), Some("text/html; charset=utf-8"));
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let url = Url::from_file_path(dir.path().join("nope.html")).unwrap();
        assert!(matches!(FileTransport.get(&url), Err(FetchError::Io { .. })));
    }

    #[test]
    fn refuses_http_urls() {
        let url = Url::parse("http://localhost/menu.html").unwrap();
        assert!(matches!(
            FileTransport.get(&url),
            Err(FetchError::UnsupportedScheme { .. })
        ));
    }
}
