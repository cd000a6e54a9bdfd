use html::traverse::{find_first, find_first_mut};
use html::{Node, find_element_by_id};

use crate::names::{INLINE_STYLES_ID, STYLES_LINK_ID};

/// Mobile layout rules used when the menu stylesheet cannot be fetched.
pub const FALLBACK_CSS: &str = include_str!("../assets/menu-fallback.css");

/// Appends to `<head>`, or to the page root when there is none.
fn append_to_head(page: &mut Node, node: Node) {
    let is_head = |n: &Node| n.is_element_named("head");
    let target = if find_first(page, &is_head).is_some() {
        find_first_mut(page, &is_head)
    } else {
        Some(page)
    };
    if let Some(children) = target.and_then(Node::children_mut) {
        children.push(node);
    }
}

pub fn has_stylesheet_link(page: &Node) -> bool {
    find_element_by_id(page, STYLES_LINK_ID).is_some()
}

/// Adds `<link id="menu-styles">` unless the page already has one. True if added.
pub fn ensure_stylesheet_link(page: &mut Node, href: &str) -> bool {
    if has_stylesheet_link(page) {
        return false;
    }
    let link = Node::element(
        "link",
        vec![
            ("id".into(), Some(STYLES_LINK_ID.into())),
            ("rel".into(), Some("stylesheet".into())),
            ("href".into(), Some(href.into())),
        ],
        Vec::new(),
    );
    append_to_head(page, link);
    true
}

/// Adds the `<style>` fallback once. True if added.
pub fn inject_inline_styles(page: &mut Node) -> bool {
    if find_element_by_id(page, INLINE_STYLES_ID).is_some() {
        return false;
    }
    let style = Node::element(
        "style",
        vec![("id".into(), Some(INLINE_STYLES_ID.into()))],
        vec![Node::text(FALLBACK_CSS)],
    );
    append_to_head(page, style);
    true
}
