//! Runs one page load: base path, fetch, splice, styles, wiring.
use core_types::ResourceKind;
use html::{Id, Node, assign_node_ids, find_element_by_id};
use net::Fetcher;
use url::Url;

use crate::base_path::{BasePath, resolve_base_path};
use crate::config::MenuConfig;
use crate::context::PageContext;
use crate::controller::MenuController;
use crate::error::MenuError;
use crate::names::HEADER_CLASS;
use crate::rewrite::{RewriteReport, adjust_menu_paths};
use crate::splice::{error_panel, extract_header, missing_header_panel, replace_children};
use crate::styles::{ensure_stylesheet_link, has_stylesheet_link, inject_inline_styles};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StylesheetStatus {
    /// The page already linked the menu stylesheet.
    AlreadyLinked,
    Linked,
    /// Linked, but the file could not be fetched; fallback rules were inlined.
    InlineFallback,
}

#[derive(Debug)]
pub struct LoadedMenu {
    pub base_path: BasePath,
    pub menu_url: Url,
    /// Which transport delivered the fragment.
    pub transport: &'static str,
    pub rewrites: RewriteReport,
    pub stylesheet: StylesheetStatus,
    pub controller: MenuController,
}

#[derive(Debug)]
pub enum LoadOutcome {
    Injected(Box<LoadedMenu>),
    /// An error panel was rendered into the container.
    Failed { base_path: BasePath, error: MenuError },
    /// The page has no menu container; nothing was touched.
    NoContainer(MenuError),
}

impl LoadOutcome {
    pub fn is_injected(&self) -> bool {
        matches!(self, LoadOutcome::Injected(_))
    }

    pub fn controller_mut(&mut self) -> Option<&mut MenuController> {
        match self {
            LoadOutcome::Injected(menu) => Some(&mut menu.controller),
            _ => None,
        }
    }
}

pub struct MenuLoader<'a> {
    config: &'a MenuConfig,
    fetcher: &'a Fetcher,
}

impl<'a> MenuLoader<'a> {
    pub fn new(config: &'a MenuConfig, fetcher: &'a Fetcher) -> Self {
        Self { config, fetcher }
    }

    fn resolve(&self, ctx: &PageContext, href: &str) -> Result<Url, MenuError> {
        let unresolvable = |reason: String| MenuError::UnresolvableUrl {
            href: href.to_string(),
            reason,
        };
        let base = ctx
            .document_url
            .as_ref()
            .ok_or_else(|| unresolvable("document location is unknown".into()))?;
        base.join(href).map_err(|e| unresolvable(e.to_string()))
    }

    /// Loads the menu into `page`. Failures end up rendered inside the container, never
    /// propagated.
    pub fn load(&self, page: &mut Node, ctx: &PageContext) -> LoadOutcome {
        let config = self.config;
        assign_node_ids(page);

        let base_path = resolve_base_path(ctx, config).normalized();
        let Some(container) = container_id(page, config) else {
            let error = MenuError::MissingContainer(config.container_id.clone());
            log::error!(target: "menu.splice", "{error}");
            return LoadOutcome::NoContainer(error);
        };

        if ctx.is_file_protocol() {
            log::warn!(target: "menu.fetch", "page opened from file://, fetches may be refused");
            log::warn!(target: "menu.fetch", "serve the site over http (e.g. `python -m http.server`) instead");
        }

        let menu_href = base_path.join(&config.menu_file);
        log::info!(
            target: "menu.fetch",
            "base path {base_path}, menu {menu_href}, document {}",
            ctx.document_url.as_ref().map_or("<unknown>", Url::as_str)
        );

        let fetched = self
            .resolve(ctx, &menu_href)
            .and_then(|url| Ok((self.fetcher.fetch_text(&url, ResourceKind::Menu)?, url)));
        let (outcome, menu_url) = match fetched {
            Ok(pair) => pair,
            Err(error) => {
                log::error!(target: "menu.fetch", "menu load failed for {menu_href}: {error}");
                let protocol = ctx.protocol().unwrap_or_default();
                let panel = error_panel(&menu_href, &error.to_string(), &protocol);
                replace_children(page, container, vec![panel]);
                return LoadOutcome::Failed { base_path, error };
            }
        };
        log::debug!(
            target: "menu.fetch",
            "menu received via {} ({} bytes)",
            outcome.transport,
            outcome.result.body.len()
        );

        let stylesheet = self.load_styles(page, ctx, &base_path);

        let Some(mut header) = extract_header(&outcome.result.body) else {
            let error = MenuError::MissingHeader {
                url: menu_url.to_string(),
                class: HEADER_CLASS,
            };
            log::error!(target: "menu.splice", "{error}");
            replace_children(page, container, vec![missing_header_panel(&config.menu_file)]);
            return LoadOutcome::Failed { base_path, error };
        };

        let rewrites = adjust_menu_paths(&mut header, &base_path, config);
        replace_children(page, container, vec![header]);
        let controller = MenuController::attach(page, container, ctx, config);
        log::info!(target: "menu.splice", "menu loaded from {menu_url}");

        LoadOutcome::Injected(Box::new(LoadedMenu {
            base_path,
            menu_url,
            transport: outcome.transport,
            rewrites,
            stylesheet,
            controller,
        }))
    }

    /// Links the menu stylesheet and probes it; an unreachable stylesheet gets the inline
    /// fallback rules.
    fn load_styles(&self, page: &mut Node, ctx: &PageContext, base: &BasePath) -> StylesheetStatus {
        if has_stylesheet_link(page) {
            return StylesheetStatus::AlreadyLinked;
        }
        let href = base.join(&self.config.styles_file);
        ensure_stylesheet_link(page, &href);

        let probe = self
            .resolve(ctx, &href)
            .and_then(|url| Ok(self.fetcher.fetch_text(&url, ResourceKind::Stylesheet)?));
        match probe {
            Ok(_) => StylesheetStatus::Linked,
            Err(err) => {
                log::warn!(target: "menu.fetch", "cannot load {href} ({err}), using inline styles");
                inject_inline_styles(page);
                StylesheetStatus::InlineFallback
            }
        }
    }
}

/// Id of the menu container in `page`, if any.
pub fn container_id(page: &Node, config: &MenuConfig) -> Option<Id> {
    find_element_by_id(page, &config.container_id).map(Node::id)
}
