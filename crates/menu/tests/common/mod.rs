//! In-memory site for loader tests.
#![allow(dead_code)]

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use html::{Node, find_element_by_id, parse_document};
use menu::PageContext;
use net::{FetchError, FetchResult, Fetcher, Transport};
use url::Url;

pub const ORIGIN: &str = "https://site.test";

pub const MENU: &str = r##"<!-- shared navigation -->
<header class="fixed-header">
  <div class="header-content">
    <div class="logo-container"><img id="menu-logo" src="fedemoto-logo.png" alt="logo"><h1>Federación</h1></div>
    <nav>
      <ul class="nav-menu">
        <li><a id="home" href="index.html">Inicio</a></li>
        <li class="dropdown" id="dd-informes"><a id="t-informes" href="#">Informes</a>
          <ul class="dropdown-menu">
            <li class="dropdown" id="dd-2024"><a id="t-2024" href="#">2024</a>
              <ul class="dropdown-menu">
                <li><a id="enero" href="Informes/2024/enero.html">Enero</a></li>
              </ul>
            </li>
            <li><a id="anual" href="../Informes/anual.html">Anual</a></li>
          </ul>
        </li>
        <li class="dropdown" id="dd-datos"><a id="t-datos" href="#">Datos</a>
          <ul class="dropdown-menu"><li><a id="web" href="https://example.org/">Web</a></li></ul>
        </li>
      </ul>
    </nav>
  </div>
</header>"##;

pub const CSS: &str = ".nav-menu { display: flex; }";

/// What a path answers with. Unlisted paths get 404.
#[derive(Clone)]
pub enum Reply {
    Ok(String),
    Status(u16, &'static str),
    Refused,
}

#[derive(Clone, Default)]
pub struct Site {
    routes: Rc<RefCell<HashMap<String, Reply>>>,
    log: Rc<RefCell<Vec<(&'static str, String)>>>,
}

impl Site {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(self, path: &str, reply: Reply) -> Self {
        self.routes.borrow_mut().insert(path.to_string(), reply);
        self
    }

    pub fn standard() -> Self {
        Self::new()
            .with("/menu.html", Reply::Ok(MENU.to_string()))
            .with("/menu-styles.css", Reply::Ok(CSS.to_string()))
    }

    /// Requests seen so far as `(transport, path)`.
    pub fn requests(&self) -> Vec<(&'static str, String)> {
        self.log.borrow().clone()
    }

    pub fn hits(&self, path: &str) -> usize {
        self.log.borrow().iter().filter(|(_, p)| p == path).count()
    }

    pub fn transport(&self, name: &'static str) -> SiteTransport {
        SiteTransport {
            name,
            site: self.clone(),
            override_reply: None,
        }
    }

    /// Primary and fallback both served from this site.
    pub fn fetcher(&self) -> Fetcher {
        Fetcher::new(
            Box::new(self.transport("primary")),
            Some(Box::new(self.transport("fallback"))),
        )
    }
}

pub struct SiteTransport {
    name: &'static str,
    site: Site,
    override_reply: Option<Reply>,
}

impl SiteTransport {
    /// Answers every request with `reply`, whatever the routes say.
    pub fn always(mut self, reply: Reply) -> Self {
        self.override_reply = Some(reply);
        self
    }
}

impl Transport for SiteTransport {
    fn name(&self) -> &'static str {
        self.name
    }

    fn get(&self, url: &Url) -> Result<FetchResult, FetchError> {
        let path = url.path().to_string();
        self.site.log.borrow_mut().push((self.name, path.clone()));
        let reply = self
            .override_reply
            .clone()
            .or_else(|| self.site.routes.borrow().get(&path).cloned())
            .unwrap_or(Reply::Status(404, "Not Found"));
        let (status, status_text, body) = match reply {
            Reply::Ok(body) => (200, "OK", body),
            Reply::Status(code, text) => (code, text, String::new()),
            Reply::Refused => {
                return Err(FetchError::Transport {
                    url: url.to_string(),
                    message: "connection refused".into(),
                });
            }
        };
        Ok(FetchResult {
            url: url.to_string(),
            requested_url: url.to_string(),
            status: Some(status),
            status_text: status_text.to_string(),
            content_type: Some("text/html".into()),
            body,
            duration_ms: 0,
        })
    }
}

pub fn page_html(script_src: &str) -> String {
    format!(
        r#"<!DOCTYPE html><html><head><title>Página</title><script src="{script_src}"></script></head><body><div id="menu-container"></div><main><p id="content">Contenido</p></main></body></html>"#
    )
}

pub fn page(script_src: &str) -> Node {
    parse_document(&page_html(script_src))
}

pub fn context(path: &str) -> PageContext {
    PageContext::new(Url::parse(ORIGIN).unwrap().join(path).unwrap())
}

pub fn element<'a>(page: &'a Node, id: &str) -> &'a Node {
    find_element_by_id(page, id).unwrap_or_else(|| panic!("no #{id} in page"))
}

pub fn container(page: &Node) -> &Node {
    element(page, "menu-container")
}
