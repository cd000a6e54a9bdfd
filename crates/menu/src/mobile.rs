//! Hamburger button, dark overlay, and the open/closed state of the mobile menu.
use html::traverse::{find_first, find_first_mut, find_node_by_id_mut};
use html::{Id, Node, assign_node_ids, find_element_by_id, find_node_by_id};

use crate::names::{
    ACTIVE_CLASS, GLYPH_CLOSED, GLYPH_OPEN, HEADER_CONTENT_CLASS, LOGO_CONTAINER_CLASS, MENU_OPEN_CLASS,
    MENU_TOGGLE_CLASS, MENU_TOGGLE_LABEL, OVERLAY_CLASS, OVERLAY_ID,
};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum MobileNavState {
    #[default]
    Closed,
    Open,
}

/// Node ids of the pieces [`install_hamburger`] put in (or found in) the page.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct HamburgerParts {
    pub header_content: Id,
    pub toggle: Id,
    pub overlay: Id,
    pub nav: Option<Id>,
    pub body: Option<Id>,
}

fn toggle_button() -> Node {
    Node::element(
        "button",
        vec![
            ("class".into(), Some(MENU_TOGGLE_CLASS.into())),
            ("aria-label".into(), Some(MENU_TOGGLE_LABEL.into())),
        ],
        vec![Node::text(GLYPH_CLOSED)],
    )
}

fn overlay() -> Node {
    Node::element(
        "div",
        vec![
            ("id".into(), Some(OVERLAY_ID.into())),
            ("class".into(), Some(OVERLAY_CLASS.into())),
        ],
        Vec::new(),
    )
}

fn is_toggle(n: &Node) -> bool {
    n.is_element_named("button") && n.has_class(MENU_TOGGLE_CLASS)
}

/// Puts the toggle button into the first `.header-content` under `scope` (before the logo,
/// else before `<nav>`, else first) and the overlay at the end of `<body>`. Pieces already
/// present are reused. Assigns ids to the new nodes.
pub fn install_hamburger(page: &mut Node, scope: Id) -> Option<HamburgerParts> {
    let header_content = find_node_by_id(page, scope)
        .and_then(|s| find_first(s, &|n: &Node| n.has_class(HEADER_CONTENT_CLASS)))
        .map(Node::id)?;

    let hc = find_node_by_id_mut(page, header_content)?;
    if find_first(hc, &is_toggle).is_none() {
        let children = hc.children_mut()?;
        let pos = children
            .iter()
            .position(|c| c.has_class(LOGO_CONTAINER_CLASS))
            .or_else(|| children.iter().position(|c| c.is_element_named("nav")))
            .unwrap_or(0);
        children.insert(pos, toggle_button());
    }

    if find_element_by_id(page, OVERLAY_ID).is_none() {
        let is_body = |n: &Node| n.is_element_named("body");
        let target = if find_first(page, &is_body).is_some() {
            find_first_mut(page, &is_body)
        } else {
            Some(&mut *page)
        };
        if let Some(children) = target.and_then(Node::children_mut) {
            children.push(overlay());
        }
    }

    assign_node_ids(page);

    let hc = find_node_by_id(page, header_content)?;
    Some(HamburgerParts {
        header_content,
        toggle: find_first(hc, &is_toggle)?.id(),
        nav: find_first(hc, &|n: &Node| n.is_element_named("nav")).map(Node::id),
        overlay: find_element_by_id(page, OVERLAY_ID)?.id(),
        body: find_first(page, &|n: &Node| n.is_element_named("body")).map(Node::id),
    })
}

/// The slide-in menu. Only exists when the header has a `<nav>` to slide in.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MobileNav {
    pub toggle: Id,
    pub overlay: Id,
    pub nav: Id,
    pub body: Option<Id>,
    state: MobileNavState,
}

impl MobileNav {
    pub fn new(parts: &HamburgerParts) -> Option<Self> {
        Some(Self {
            toggle: parts.toggle,
            overlay: parts.overlay,
            nav: parts.nav?,
            body: parts.body,
            state: MobileNavState::Closed,
        })
    }

    pub fn state(&self) -> MobileNavState {
        self.state
    }

    pub fn is_open(&self) -> bool {
        self.state == MobileNavState::Open
    }

    /// True if the state changed.
    pub fn set_open(&mut self, open: bool) -> bool {
        let next = if open { MobileNavState::Open } else { MobileNavState::Closed };
        let changed = self.state != next;
        self.state = next;
        changed
    }

    pub fn toggle(&mut self) {
        self.set_open(!self.is_open());
    }

    /// Writes the state onto the nav, overlay, body and button glyph.
    pub fn project(&self, page: &mut Node) {
        let open = self.is_open();
        if let Some(nav) = find_node_by_id_mut(page, self.nav) {
            nav.set_class(MENU_OPEN_CLASS, open);
        }
        if let Some(overlay) = find_node_by_id_mut(page, self.overlay) {
            overlay.set_class(ACTIVE_CLASS, open);
        }
        if let Some(body) = self.body.and_then(|b| find_node_by_id_mut(page, b)) {
            body.set_class(MENU_OPEN_CLASS, open);
        }
        if let Some(button) = find_node_by_id_mut(page, self.toggle) {
            button.set_text_content(if open { GLYPH_OPEN } else { GLYPH_CLOSED });
        }
    }
}
