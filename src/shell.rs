//! One headless page load: fetch the page, run the menu loader, replay events, render.
use anyhow::{Context, Result, anyhow};
use core_types::ResourceKind;
use html::dom_utils::outline_from_dom;
use html::{Node, parse_document, to_html};
use menu::{LoadOutcome, MenuConfig, MenuLoader, PageContext};
use net::Fetcher;
use url::Url;

use crate::cli::Cli;

const OUTLINE_CAP: usize = 2_000;

/// `http(s)://` and `file://` URLs are used as given; anything else is a filesystem path.
pub fn page_url(arg: &str) -> Result<Url> {
    if let Ok(url) = Url::parse(arg) {
        if matches!(url.scheme(), "http" | "https" | "file") {
            return Ok(url);
        }
    }
    let path = std::path::absolute(arg).with_context(|| format!("invalid page path `{arg}`"))?;
    Url::from_file_path(&path).map_err(|()| anyhow!("cannot turn {} into a file URL", path.display()))
}

pub fn load_config(cli: &Cli) -> Result<MenuConfig> {
    match &cli.config {
        Some(path) => MenuConfig::load(path).with_context(|| format!("loading {}", path.display())),
        None => Ok(MenuConfig::default()),
    }
}

/// Runs the whole shell and returns what should go to stdout.
pub fn run(cli: &Cli) -> Result<String> {
    let config = load_config(cli)?;
    let url = page_url(&cli.page)?;
    let fetcher = Fetcher::for_url(&url, config.fetch_timeout())?;

    let fetched = fetcher
        .fetch_text(&url, ResourceKind::Page)
        .with_context(|| format!("loading page {url}"))?;
    if !html::is_html(&fetched.result.content_type) {
        tracing::warn!(
            content_type = fetched.result.content_type.as_deref().unwrap_or("unknown"),
            "page does not look like HTML"
        );
    }
    let mut page = parse_document(&fetched.result.body);

    let mut ctx = PageContext::new(url).with_viewport_width(cli.viewport);
    if let Some(src) = &cli.script_src {
        ctx = ctx.with_script_src(src.clone());
    }
    let ctx = ctx.discover_script_src(&page, &config.script_name);

    let mut outcome = MenuLoader::new(&config, &fetcher).load(&mut page, &ctx);
    match &outcome {
        LoadOutcome::Injected(menu) => tracing::info!(
            base_path = %menu.base_path,
            transport = menu.transport,
            links = menu.rewrites.links,
            "menu injected"
        ),
        LoadOutcome::Failed { error, .. } => tracing::warn!(%error, "menu failed; error panel rendered"),
        LoadOutcome::NoContainer(error) => tracing::warn!(%error, "page has no menu container"),
    }

    replay_events(cli, &mut page, &mut outcome);
    Ok(render(&page, cli.outline))
}

fn replay_events(cli: &Cli, page: &mut Node, outcome: &mut LoadOutcome) {
    if cli.events.is_empty() {
        return;
    }
    let Some(controller) = outcome.controller_mut() else {
        tracing::warn!(count = cli.events.len(), "no menu loaded, events ignored");
        return;
    };
    for wanted in &cli.events {
        let Some(event) = wanted.resolve(page) else {
            tracing::warn!(event = %wanted.describe(), "selector matched nothing, skipped");
            continue;
        };
        let result = controller.dispatch(page, &event);
        tracing::debug!(event = %wanted.describe(), changed = result.changed, "event replayed");
    }
}

fn render(page: &Node, outline: bool) -> String {
    if outline {
        let mut out = outline_from_dom(page, OUTLINE_CAP).join("\n");
        out.push('\n');
        out
    } else {
        to_html(page)
    }
}
