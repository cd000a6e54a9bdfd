use core_types::ViewportWidth;
use html::Node;
use html::dom_utils::collect_script_srcs;
use percent_encoding::percent_decode_str;
use url::Url;

const DEFAULT_PAGE: &str = "index.html";

/// Everything the loader would otherwise read from the browser: where the page lives, how
/// it referenced the loader script, and how wide the viewport is.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PageContext {
    pub document_url: Option<Url>,
    /// Raw `src` of the loader's `<script>` tag, as written in the page.
    pub script_src: Option<String>,
    pub viewport_width: ViewportWidth,
}

impl PageContext {
    pub fn new(document_url: Url) -> Self {
        Self {
            document_url: Some(document_url),
            ..Self::default()
        }
    }

    pub fn with_script_src(mut self, src: impl Into<String>) -> Self {
        self.script_src = Some(src.into());
        self
    }

    pub fn with_viewport_width(mut self, width: u32) -> Self {
        self.viewport_width = ViewportWidth(width);
        self
    }

    /// Fills `script_src` from the first `<script src>` mentioning `script_name`, unless it
    /// is already set.
    pub fn discover_script_src(mut self, page: &Node, script_name: &str) -> Self {
        if self.script_src.is_none() {
            let mut srcs = Vec::new();
            collect_script_srcs(page, &mut srcs);
            self.script_src = srcs.into_iter().find(|s| s.contains(script_name));
        }
        self
    }

    /// URL scheme with its colon (`"file:"`, `"https:"`), like `location.protocol`.
    pub fn protocol(&self) -> Option<String> {
        self.document_url.as_ref().map(|u| format!("{}:", u.scheme()))
    }

    pub fn is_file_protocol(&self) -> bool {
        self.document_url.as_ref().is_some_and(|u| u.scheme() == "file")
    }

    /// Percent-decoded document path. Invalid UTF-8 is replaced rather than rejected.
    pub fn decoded_path(&self) -> Option<String> {
        let url = self.document_url.as_ref()?;
        Some(percent_decode_str(url.path()).decode_utf8_lossy().into_owned())
    }

    /// Last path segment without query, `index.html` for directory URLs.
    pub fn current_file_name(&self) -> String {
        let Some(path) = self.decoded_path() else {
            return DEFAULT_PAGE.to_string();
        };
        let last = path.rsplit('/').next().unwrap_or("");
        let name = last.split('?').next().unwrap_or("");
        if name.is_empty() {
            DEFAULT_PAGE.to_string()
        } else {
            name.to_string()
        }
    }
}
