//! Which menu links point at the page being shown.
use html::traverse::closest;
use html::{Id, Node};
use percent_encoding::percent_decode_str;

use crate::names::{DROPDOWN_CLASS, DROPDOWN_MENU_CLASS, NAV_MENU_CLASS};

/// File name of a link target, query stripped.
fn link_file_name(href: &str) -> &str {
    let last = href.rsplit(&['/', '\\'][..]).next().unwrap_or(href);
    last.split('?').next().unwrap_or("")
}

/// True when a link with `href` leads to the current page. The primary rule compares file
/// names; the looser rule also accepts hrefs mentioning the current file and paths
/// containing the link's file name. `current_file` and `current_path` are decoded, so the
/// href is decoded before comparing.
pub fn link_matches(href: &str, current_file: &str, current_path: &str) -> bool {
    if href.is_empty() || href == "#" {
        return false;
    }
    let href = percent_decode_str(href).decode_utf8_lossy();
    let link_file = link_file_name(&href);
    if link_file.is_empty() || current_file.is_empty() {
        return false;
    }
    link_file == current_file || href.contains(current_file) || current_path.contains(link_file)
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ActiveLinks {
    pub links: Vec<Id>,
    /// Closest `.dropdown` of each matched link, deduplicated.
    pub dropdowns: Vec<Id>,
}

/// Finds menu links (inside `.nav-menu` or `.dropdown-menu`) under `scope` that match the
/// current page.
pub fn find_active_links(scope: &Node, current_file: &str, current_path: &str) -> ActiveLinks {
    fn walk(node: &Node, in_menu: bool, out: &mut Vec<Id>, file: &str, path: &str) {
        let in_menu = in_menu || node.has_class(NAV_MENU_CLASS) || node.has_class(DROPDOWN_MENU_CLASS);
        if in_menu
            && node.is_element_named("a")
            && node.attr("href").is_some_and(|h| link_matches(h, file, path))
        {
            out.push(node.id());
        }
        for c in node.children() {
            walk(c, in_menu, out, file, path);
        }
    }

    let mut active = ActiveLinks::default();
    walk(scope, false, &mut active.links, current_file, current_path);
    for &link in &active.links {
        if let Some(dropdown) = closest(scope, link, |n| n.has_class(DROPDOWN_CLASS)) {
            if !active.dropdowns.contains(&dropdown) {
                active.dropdowns.push(dropdown);
            }
        }
    }
    active
}
