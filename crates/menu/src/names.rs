//! Class names and element ids shared between `menu.html`, host pages and page styles.

pub const HEADER_CLASS: &str = "fixed-header";
pub const HEADER_CONTENT_CLASS: &str = "header-content";
pub const LOGO_CONTAINER_CLASS: &str = "logo-container";
pub const NAV_MENU_CLASS: &str = "nav-menu";
pub const DROPDOWN_CLASS: &str = "dropdown";
pub const DROPDOWN_MENU_CLASS: &str = "dropdown-menu";

/// Open dropdowns and current-page links.
pub const ACTIVE_CLASS: &str = "active";
/// On `<nav>` and `<body>` while the mobile menu is open.
pub const MENU_OPEN_CLASS: &str = "menu-open";

pub const MENU_TOGGLE_CLASS: &str = "menu-toggle";
pub const MENU_TOGGLE_LABEL: &str = "Toggle menu";
pub const OVERLAY_ID: &str = "menu-overlay";
pub const OVERLAY_CLASS: &str = "menu-overlay";

pub const STYLES_LINK_ID: &str = "menu-styles";
pub const INLINE_STYLES_ID: &str = "menu-styles-inline";

pub const GLYPH_CLOSED: &str = "☰";
pub const GLYPH_OPEN: &str = "✕";
