//! Reacts to clicks, key presses and resizes on the injected menu.
//!
//! Clicks bubble from the target up through its ancestors to the document, running the
//! handler registered on each node; a handler that stops propagation ends the walk.
use core_types::ViewportWidth;
use html::traverse::{closest, contains, find_node_by_id_mut, path_to};
use html::{Id, Node, assign_node_ids, find_node_by_id};

use crate::active::{ActiveLinks, find_active_links};
use crate::config::MenuConfig;
use crate::context::PageContext;
use crate::dropdown::{ClosePolicy, DropdownState, DropdownTree, Transition};
use crate::mobile::{HamburgerParts, MobileNav, install_hamburger};
use crate::names::{ACTIVE_CLASS, DROPDOWN_CLASS};
use crate::registry::{EventKind, Handler, HandlerRegistry, Target};

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum UiEvent {
    Click { target: Id },
    KeyDown { key: String },
    Resize { width: u32 },
}

impl UiEvent {
    fn kind(&self) -> EventKind {
        match self {
            UiEvent::Click { .. } => EventKind::Click,
            UiEvent::KeyDown { .. } => EventKind::KeyDown,
            UiEvent::Resize { .. } => EventKind::Resize,
        }
    }
}

/// What dispatching one event did.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Dispatch {
    /// Some menu state changed.
    pub changed: bool,
    /// The browser default (following the link) would have been suppressed.
    pub default_prevented: bool,
    pub propagation_stopped: bool,
}

enum Flow {
    Continue,
    Stop,
}

#[derive(Debug)]
pub struct MenuController {
    container: Id,
    breakpoint: u32,
    policy: ClosePolicy,
    viewport: ViewportWidth,
    dropdowns: DropdownTree,
    hamburger: Option<HamburgerParts>,
    mobile: Option<MobileNav>,
    registry: HandlerRegistry,
    active: ActiveLinks,
}

impl MenuController {
    /// Wires the menu already spliced into `container`: adds the hamburger, highlights the
    /// current page, and registers every handler. All dropdowns start closed.
    pub fn attach(page: &mut Node, container: Id, ctx: &PageContext, config: &MenuConfig) -> Self {
        assign_node_ids(page);
        let hamburger = if config.hamburger {
            install_hamburger(page, container)
        } else {
            None
        };
        if config.hamburger && hamburger.is_none() {
            log::debug!(target: "menu.controller", "no .header-content in the menu, skipping the hamburger");
        }
        let mobile = hamburger.as_ref().and_then(MobileNav::new);

        let scope = find_node_by_id(page, container);
        let dropdowns = scope.map(DropdownTree::from_dom).unwrap_or_default();
        let current_file = ctx.current_file_name();
        let current_path = ctx.decoded_path().unwrap_or_default();
        let active = scope
            .map(|s| find_active_links(s, &current_file, &current_path))
            .unwrap_or_default();

        let mut controller = Self {
            container,
            breakpoint: config.mobile_breakpoint_px,
            policy: config.close_policy,
            viewport: ctx.viewport_width,
            dropdowns,
            hamburger,
            mobile,
            registry: HandlerRegistry::new(),
            active,
        };
        controller.register();
        controller.project_initial(page);

        log::info!(
            target: "menu.controller",
            "menu wired: {} dropdown(s), {} active link(s) for {current_file}, hamburger {}",
            controller.dropdowns.len(),
            controller.active.links.len(),
            if controller.mobile.is_some() { "on" } else { "off" }
        );
        controller
    }

    fn register(&mut self) {
        self.registry.clear();
        for (index, node) in self.dropdowns.nodes().iter().enumerate() {
            for &trigger in &node.triggers {
                self.registry.attach(
                    Target::Element(trigger),
                    EventKind::Click,
                    Handler::DropdownTrigger { index },
                );
            }
        }
        if let Some(m) = &self.mobile {
            self.registry
                .attach(Target::Element(m.toggle), EventKind::Click, Handler::MenuToggle);
            self.registry
                .attach(Target::Element(m.overlay), EventKind::Click, Handler::Overlay);
            self.registry
                .attach(Target::Element(m.nav), EventKind::Click, Handler::Nav);
            self.registry
                .attach(Target::Document, EventKind::KeyDown, Handler::EscapeKey);
            self.registry
                .attach(Target::Window, EventKind::Resize, Handler::WideViewport);
        }
        self.registry
            .attach(Target::Document, EventKind::Click, Handler::OutsideClick);
    }

    fn project_initial(&mut self, page: &mut Node) {
        for node in self.dropdowns.nodes() {
            if let Some(el) = find_node_by_id_mut(page, node.element) {
                el.set_class(ACTIVE_CLASS, node.state == DropdownState::Open);
            }
        }
        for &link in &self.active.links {
            if let Some(el) = find_node_by_id_mut(page, link) {
                el.add_class(ACTIVE_CLASS);
            }
        }
        let current: Vec<usize> = self
            .active
            .dropdowns
            .iter()
            .filter_map(|&d| self.dropdowns.index_of(d))
            .collect();
        for idx in current {
            let transitions = self.dropdowns.open(idx);
            apply(page, &transitions);
        }
        if let Some(m) = &self.mobile {
            m.project(page);
        }
    }

    pub fn container(&self) -> Id {
        self.container
    }

    pub fn dropdowns(&self) -> &DropdownTree {
        &self.dropdowns
    }

    pub fn mobile(&self) -> Option<&MobileNav> {
        self.mobile.as_ref()
    }

    pub fn hamburger(&self) -> Option<&HamburgerParts> {
        self.hamburger.as_ref()
    }

    pub fn registry(&self) -> &HandlerRegistry {
        &self.registry
    }

    pub fn active_links(&self) -> &ActiveLinks {
        &self.active
    }

    pub fn viewport(&self) -> ViewportWidth {
        self.viewport
    }

    pub fn is_narrow(&self) -> bool {
        self.viewport.is_narrow(self.breakpoint)
    }

    pub fn dispatch(&mut self, page: &mut Node, event: &UiEvent) -> Dispatch {
        let mut out = Dispatch::default();
        match event {
            UiEvent::Click { target } => {
                let Some(path) = path_to(page, *target) else {
                    log::debug!(target: "menu.controller", "click on unknown node {target:?}");
                    return out;
                };
                for &id in path.iter().rev() {
                    if let Some(handler) = self.registry.get(Target::Element(id), EventKind::Click) {
                        if let Flow::Stop = self.run(handler, page, event, &mut out) {
                            out.propagation_stopped = true;
                            return out;
                        }
                    }
                }
                if let Some(handler) = self.registry.get(Target::Document, EventKind::Click) {
                    self.run(handler, page, event, &mut out);
                }
            }
            UiEvent::KeyDown { .. } => {
                if let Some(handler) = self.registry.get(Target::Document, event.kind()) {
                    self.run(handler, page, event, &mut out);
                }
            }
            UiEvent::Resize { width } => {
                self.viewport = ViewportWidth(*width);
                if let Some(handler) = self.registry.get(Target::Window, event.kind()) {
                    self.run(handler, page, event, &mut out);
                }
            }
        }
        out
    }

    fn run(&mut self, handler: Handler, page: &mut Node, event: &UiEvent, out: &mut Dispatch) -> Flow {
        log::trace!(target: "menu.controller", "{handler:?} <- {event:?}");
        let target = match event {
            UiEvent::Click { target } => Some(*target),
            _ => None,
        };
        match handler {
            Handler::DropdownTrigger { index } => {
                if !self.is_narrow() {
                    return Flow::Continue;
                }
                out.default_prevented = true;
                let transitions = self.dropdowns.toggle(index, self.policy);
                out.changed |= !transitions.is_empty();
                apply(page, &transitions);
                Flow::Stop
            }
            Handler::MenuToggle => {
                out.default_prevented = true;
                if let Some(m) = self.mobile.as_mut() {
                    m.toggle();
                    m.project(page);
                    out.changed = true;
                }
                Flow::Stop
            }
            Handler::Overlay => {
                if let (Some(m), Some(target)) = (self.mobile, target) {
                    if !contains(page, m.nav, target) && !contains(page, m.toggle, target) {
                        out.changed |= self.set_mobile_open(page, false);
                    }
                }
                Flow::Continue
            }
            Handler::Nav => {
                let follows_link = target
                    .and_then(|t| find_node_by_id(page, t))
                    .is_some_and(|n| n.is_element_named("a") && n.attr("href") != Some("#"));
                if self.is_narrow() && follows_link {
                    out.changed |= self.set_mobile_open(page, false);
                }
                Flow::Stop
            }
            Handler::OutsideClick => {
                let Some(target) = target else {
                    return Flow::Continue;
                };
                if !self.is_narrow() {
                    return Flow::Continue;
                }
                let inside = |id: Option<Id>| id.is_some_and(|id| contains(page, id, target));
                let on_toggle = inside(self.hamburger.map(|h| h.toggle));
                let on_overlay = inside(self.hamburger.map(|h| h.overlay));
                let in_dropdown = closest(page, target, |n| n.has_class(DROPDOWN_CLASS)).is_some();
                if !on_toggle && !on_overlay && !in_dropdown {
                    let transitions = self.dropdowns.close_all();
                    out.changed |= !transitions.is_empty();
                    apply(page, &transitions);
                }
                Flow::Continue
            }
            Handler::EscapeKey => {
                if matches!(event, UiEvent::KeyDown { key } if key == "Escape") {
                    out.changed |= self.set_mobile_open(page, false);
                }
                Flow::Continue
            }
            Handler::WideViewport => {
                if !self.is_narrow() {
                    out.changed |= self.set_mobile_open(page, false);
                }
                Flow::Continue
            }
        }
    }

    fn set_mobile_open(&mut self, page: &mut Node, open: bool) -> bool {
        let Some(m) = self.mobile.as_mut() else {
            return false;
        };
        let changed = m.set_open(open);
        if changed {
            m.project(page);
        }
        changed
    }
}

fn apply(page: &mut Node, transitions: &[Transition]) {
    for t in transitions {
        if let Some(el) = find_node_by_id_mut(page, t.element) {
            el.set_class(ACTIVE_CLASS, t.to == DropdownState::Open);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mobile::MobileNavState;
    use html::{find_element_by_id, parse_document};
    use url::Url;

    const PAGE: &str = r##"<html><head></head><body>
        <div id="menu-container"><header class="fixed-header"><div class="header-content">
            <div class="logo-container"><img id="menu-logo" src="../fedemoto-logo.png"></div>
            <nav><ul class="nav-menu">
                <li><a id="home" href="../index.html">Inicio</a></li>
                <li class="dropdown" id="dd-a"><a id="ta" href="#">Informes</a><ul class="dropdown-menu">
                    <li class="dropdown" id="dd-a1"><a id="ta1" href="#"><span id="ta1-label">2024</span></a><ul class="dropdown-menu">
                        <li><a id="jan" href="../Informes/2024/enero.html">Enero</a></li>
                    </ul></li>
                    <li class="dropdown" id="dd-a2"><a id="ta2" href="#">2023</a></li>
                </ul></li>
                <li class="dropdown active" id="dd-b"><a id="tb" href="#">Datos</a><ul class="dropdown-menu">
                    <li><a id="resumen" href="../Datos/resumen.html">Resumen</a></li>
                </ul></li>
            </ul></nav>
        </div></header></div>
        <main><p id="content">texto</p></main>
    </body></html>"##;

    fn setup(width: u32, config: &MenuConfig) -> (Node, MenuController) {
        let mut page = parse_document(PAGE);
        assign_node_ids(&mut page);
        let container = find_element_by_id(&page, "menu-container").unwrap().id();
        let ctx = PageContext::new(Url::parse("https://site.test/Otros/pagina.html").unwrap())
            .with_viewport_width(width);
        let controller = MenuController::attach(&mut page, container, &ctx, config);
        (page, controller)
    }

    fn id(page: &Node, name: &str) -> Id {
        find_element_by_id(page, name).unwrap().id()
    }

    fn has_class(page: &Node, name: &str, class: &str) -> bool {
        find_element_by_id(page, name).unwrap().has_class(class)
    }

    fn click(c: &mut MenuController, page: &mut Node, name: &str) -> Dispatch {
        let target = id(page, name);
        c.dispatch(page, &UiEvent::Click { target })
    }

    fn click_id(c: &mut MenuController, page: &mut Node, target: Id) -> Dispatch {
        c.dispatch(page, &UiEvent::Click { target })
    }

    #[test]
    fn fresh_injection_starts_closed() {
        let (page, c) = setup(375, &MenuConfig::default());
        assert!(c.dropdowns().open_indices().is_empty());
        assert!(!has_class(&page, "dd-b", "active"));
        assert_eq!(c.mobile().unwrap().state(), MobileNavState::Closed);
    }

    #[test]
    fn trigger_toggles_only_on_narrow_viewport() {
        let (mut page, mut c) = setup(375, &MenuConfig::default());
        let d = click(&mut c, &mut page, "ta");
        assert!(d.changed && d.default_prevented && d.propagation_stopped);
        assert!(has_class(&page, "dd-a", "active"));
        click(&mut c, &mut page, "ta");
        assert!(!has_class(&page, "dd-a", "active"));

        let (mut page, mut c) = setup(1024, &MenuConfig::default());
        let d = click(&mut c, &mut page, "ta");
        assert!(!d.changed && !d.default_prevented);
        assert!(!has_class(&page, "dd-a", "active"));
    }

    #[test]
    fn click_inside_trigger_bubbles_to_it() {
        let (mut page, mut c) = setup(375, &MenuConfig::default());
        click(&mut c, &mut page, "ta");
        click(&mut c, &mut page, "ta1-label");
        assert!(has_class(&page, "dd-a1", "active"));
    }

    #[test]
    fn opening_sibling_top_level_closes_it_and_its_children() {
        let (mut page, mut c) = setup(375, &MenuConfig::default());
        click(&mut c, &mut page, "ta");
        click(&mut c, &mut page, "ta1");
        click(&mut c, &mut page, "tb");
        assert!(has_class(&page, "dd-b", "active"));
        assert!(!has_class(&page, "dd-a", "active"));
        assert!(!has_class(&page, "dd-a1", "active"));
    }

    #[test]
    fn siblings_only_policy_keeps_nested_open() {
        let config = MenuConfig {
            close_policy: ClosePolicy::SiblingsOnly,
            ..MenuConfig::default()
        };
        let (mut page, mut c) = setup(375, &config);
        click(&mut c, &mut page, "ta");
        click(&mut c, &mut page, "ta1");
        click(&mut c, &mut page, "tb");
        assert!(!has_class(&page, "dd-a", "active"));
        assert!(has_class(&page, "dd-a1", "active"));
    }

    #[test]
    fn outside_click_closes_all_dropdowns() {
        let (mut page, mut c) = setup(375, &MenuConfig::default());
        click(&mut c, &mut page, "ta");
        click(&mut c, &mut page, "ta1");
        let d = click(&mut c, &mut page, "content");
        assert!(d.changed);
        assert!(c.dropdowns().open_indices().is_empty());
        assert!(!has_class(&page, "dd-a1", "active"));
    }

    #[test]
    fn outside_click_ignored_on_wide_viewport() {
        let (mut page, mut c) = setup(375, &MenuConfig::default());
        click(&mut c, &mut page, "ta");
        c.dispatch(&mut page, &UiEvent::Resize { width: 1200 });
        click(&mut c, &mut page, "content");
        assert!(has_class(&page, "dd-a", "active"));
    }

    #[test]
    fn hamburger_opens_and_overlay_closes() {
        let (mut page, mut c) = setup(375, &MenuConfig::default());
        let toggle = c.mobile().unwrap().toggle;
        let overlay = c.mobile().unwrap().overlay;
        let d = click_id(&mut c, &mut page, toggle);
        assert!(d.changed && d.default_prevented);
        assert!(c.mobile().unwrap().is_open());
        assert_eq!(find_node_by_id(&page, toggle).unwrap().text_content(), "✕");

        click_id(&mut c, &mut page, overlay);
        assert!(!c.mobile().unwrap().is_open());
        assert!(!find_node_by_id(&page, overlay).unwrap().has_class("active"));
    }

    #[test]
    fn toggle_click_does_not_close_dropdowns() {
        let (mut page, mut c) = setup(375, &MenuConfig::default());
        click(&mut c, &mut page, "ta");
        let toggle = c.mobile().unwrap().toggle;
        click_id(&mut c, &mut page, toggle);
        assert!(has_class(&page, "dd-a", "active"));
    }

    #[test]
    fn following_a_nav_link_closes_mobile_menu() {
        let (mut page, mut c) = setup(375, &MenuConfig::default());
        let toggle = c.mobile().unwrap().toggle;
        click_id(&mut c, &mut page, toggle);

        // "#" triggers keep it open.
        let d = click(&mut c, &mut page, "ta");
        assert!(d.propagation_stopped);
        assert!(c.mobile().unwrap().is_open());

        let d = click(&mut c, &mut page, "home");
        assert!(d.changed && d.propagation_stopped);
        assert!(!c.mobile().unwrap().is_open());
    }

    #[test]
    fn escape_closes_only_when_open() {
        let (mut page, mut c) = setup(375, &MenuConfig::default());
        let esc = UiEvent::KeyDown { key: "Escape".into() };
        assert!(!c.dispatch(&mut page, &esc).changed);
        let toggle = c.mobile().unwrap().toggle;
        click_id(&mut c, &mut page, toggle);
        assert!(!c.dispatch(&mut page, &UiEvent::KeyDown { key: "Enter".into() }).changed);
        assert!(c.dispatch(&mut page, &esc).changed);
        let body = c.hamburger().unwrap().body.unwrap();
        assert!(!find_node_by_id(&page, body).unwrap().has_class("menu-open"));
    }

    #[test]
    fn widening_the_viewport_closes_mobile_menu() {
        let (mut page, mut c) = setup(768, &MenuConfig::default());
        let parts = *c.hamburger().unwrap();
        click_id(&mut c, &mut page, parts.toggle);
        assert!(!c.dispatch(&mut page, &UiEvent::Resize { width: 700 }).changed);
        let d = c.dispatch(&mut page, &UiEvent::Resize { width: 769 });
        assert!(d.changed);
        assert!(!find_node_by_id(&page, parts.nav.unwrap()).unwrap().has_class("menu-open"));
        assert!(!find_node_by_id(&page, parts.overlay).unwrap().has_class("active"));
        assert!(!find_node_by_id(&page, parts.body.unwrap()).unwrap().has_class("menu-open"));
    }

    #[test]
    fn current_page_link_and_section_are_highlighted() {
        let mut page = parse_document(PAGE);
        assign_node_ids(&mut page);
        let container = id(&page, "menu-container");
        let ctx = PageContext::new(Url::parse("https://site.test/Informes/2024/enero.html").unwrap());
        let c = MenuController::attach(&mut page, container, &ctx, &MenuConfig::default());
        assert!(has_class(&page, "jan", "active"));
        assert!(has_class(&page, "dd-a1", "active"));
        assert!(!has_class(&page, "home", "active"));
        assert_eq!(c.active_links().links.len(), 1);
        assert_eq!(c.dropdowns().open_indices().len(), 1);
    }

    #[test]
    fn reattaching_keeps_one_handler_per_key() {
        let (mut page, c) = setup(375, &MenuConfig::default());
        let container = c.container();
        let before = c.registry().len();
        let ctx = PageContext::new(Url::parse("https://site.test/Otros/pagina.html").unwrap());
        let again = MenuController::attach(&mut page, container, &ctx, &MenuConfig::default());
        assert_eq!(again.registry().len(), before);
        assert_eq!(html::to_html(&page).matches("menu-toggle").count(), 1);
        // 4 triggers + toggle, overlay, nav, Escape, resize, outside click.
        assert_eq!(before, 10);
    }

    #[test]
    fn without_hamburger_only_dropdown_handlers_exist() {
        let config = MenuConfig {
            hamburger: false,
            ..MenuConfig::default()
        };
        let (page, c) = setup(375, &config);
        assert!(c.mobile().is_none());
        assert_eq!(c.registry().len(), 5);
        assert!(!html::to_html(&page).contains("menu-toggle"));
    }

    #[test]
    fn click_on_unknown_node_is_ignored() {
        let (mut page, mut c) = setup(375, &MenuConfig::default());
        assert_eq!(click_id(&mut c, &mut page, Id(99_999)), Dispatch::default());
    }
}
