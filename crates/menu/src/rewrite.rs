//! Rebases root-relative hrefs in the fetched menu onto the current page's depth.
use html::Node;

use crate::base_path::{BasePath, count_parent_segments};
use crate::config::MenuConfig;

/// `scheme:` prefix per RFC 3986 (`http:`, `mailto:`, `tel:`).
fn has_scheme(href: &str) -> bool {
    let Some(colon) = href.find(':') else {
        return false;
    };
    let scheme = &href[..colon];
    scheme.starts_with(|c: char| c.is_ascii_alphabetic())
        && scheme
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'))
}

/// Hrefs that point inside the site relative to its root.
pub fn is_rewritable(href: &str) -> bool {
    !(href.is_empty()
        || href.starts_with('#')
        || href.starts_with('/')
        || href.starts_with("http")
        || has_scheme(href))
}

#[derive(Clone, Copy, Debug)]
pub struct LinkRewriteRule<'a> {
    base: &'a BasePath,
}

impl<'a> LinkRewriteRule<'a> {
    pub fn new(base: &'a BasePath) -> Self {
        Self { base }
    }

    /// New href for `href`, or `None` when it stays as written.
    pub fn apply(&self, href: &str) -> Option<String> {
        if !is_rewritable(href) || href.starts_with("./") {
            return None;
        }
        let depth = self.base.depth();
        let parents = count_parent_segments(href);
        if depth > 0 && parents == depth {
            // Already rebased for this page.
            return None;
        }
        let cleaned = &href[parents * "../".len()..];
        Some(self.base.join(cleaned))
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RewriteReport {
    pub links: usize,
    pub logo: bool,
}

/// Rewrites every `a[href]` under `header` and points the logo at the site-root image.
pub fn adjust_menu_paths(header: &mut Node, base: &BasePath, config: &MenuConfig) -> RewriteReport {
    fn walk(node: &mut Node, rule: &LinkRewriteRule<'_>, logo: (&str, &str), report: &mut RewriteReport) {
        if node.is_element_named("a") {
            if let Some(new_href) = node.attr("href").and_then(|h| rule.apply(h)) {
                node.set_attr("href", &new_href);
                report.links += 1;
            }
        }
        if node.element_id() == Some(logo.0) {
            node.set_attr("src", logo.1);
            report.logo = true;
        }
        if let Some(children) = node.children_mut() {
            for c in children {
                walk(c, rule, logo, report);
            }
        }
    }

    let rule = LinkRewriteRule::new(base);
    let logo_src = base.join(&config.logo_file);
    let mut report = RewriteReport::default();
    walk(header, &rule, (config.logo_id.as_str(), logo_src.as_str()), &mut report);
    log::debug!(
        target: "menu.splice",
        "rewrote {} link(s) for base {base}{}",
        report.links,
        if report.logo { ", logo updated" } else { "" }
    );
    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use html::{find_element_by_id, parse_document};

    fn rewrite(base: &BasePath, href: &str) -> String {
        LinkRewriteRule::new(base).apply(href).unwrap_or_else(|| href.to_string())
    }

    #[test]
    fn external_and_fragment_links_untouched() {
        let base = BasePath::from_depth(2);
        for href in ["#", "#top", "http://x.test/", "https://x.test/a", "//cdn.test/a.css", "mailto:a@b.c", "/abs.html", ""] {
            assert_eq!(rewrite(&base, href), href, "{href}");
        }
    }

    #[test]
    fn root_relative_links_get_prefixed() {
        let base = BasePath::from_depth(2);
        assert_eq!(rewrite(&base, "index.html"), "../../index.html");
        assert_eq!(rewrite(&base, "Informes/2024/a.html"), "../../Informes/2024/a.html");
        assert_eq!(rewrite(&BasePath::root(), "index.html"), "./index.html");
    }

    #[test]
    fn existing_parent_segments_are_replaced() {
        let base = BasePath::from_depth(1);
        assert_eq!(rewrite(&base, "../../index.html"), "../index.html");
        assert_eq!(rewrite(&BasePath::root(), "../index.html"), "./index.html");
    }

    #[test]
    fn dot_slash_links_are_left_alone() {
        assert_eq!(rewrite(&BasePath::from_depth(3), "./local.html"), "./local.html");
    }

    #[test]
    fn rewriting_is_idempotent() {
        for depth in 0..5 {
            let base = BasePath::from_depth(depth);
            for href in ["index.html", "Informes/a.html", "../x.html"] {
                let once = rewrite(&base, href);
                assert_eq!(rewrite(&base, &once), once, "depth {depth} href {href}");
            }
        }
    }

    #[test]
    fn has_scheme_needs_letters_first() {
        assert!(has_scheme("tel:+34"));
        assert!(!has_scheme("1x:foo"));
        assert!(!has_scheme("a b:c"));
        assert!(!has_scheme("page.html"));
    }

    #[test]
    fn adjusts_anchors_and_logo() {
        let mut dom = parse_document(
            r##"<header class="fixed-header"><div class="logo-container"><img id="menu-logo" src="fedemoto-logo.png"></div>
            <nav><ul class="nav-menu"><li><a href="index.html">Inicio</a></li><li><a href="#">Más</a></li>
            <li><a href="https://x.test/">Ext</a></li></ul></nav></header>"##,
        );
        let report = adjust_menu_paths(&mut dom, &BasePath::from_depth(1), &MenuConfig::default());
        assert_eq!(report, RewriteReport { links: 1, logo: true });
        let logo = find_element_by_id(&dom, "menu-logo").unwrap();
        assert_eq!(logo.attr("src"), Some("../fedemoto-logo.png"));
        let html = html::to_html(&dom);
        assert!(html.contains(r#"href="../index.html""#));
        assert!(html.contains(r##"href="#""##));
        assert!(html.contains(r#"href="https://x.test/""#));
    }
}
