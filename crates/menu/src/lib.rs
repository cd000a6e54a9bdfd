//! Shared navigation menu for static sites.
//!
//! [`MenuLoader::load`] works out how deep the current page sits below the site root,
//! fetches `menu.html` through a [`net::Fetcher`], rebases the fragment's links, splices its
//! `.fixed-header` into `#menu-container` and hands back a [`MenuController`] that turns
//! [`UiEvent`]s into dropdown and mobile-menu state changes.
pub mod active;
pub mod base_path;
pub mod config;
pub mod context;
pub mod controller;
pub mod dropdown;
pub mod error;
pub mod loader;
pub mod mobile;
pub mod names;
pub mod registry;
pub mod rewrite;
pub mod splice;
pub mod styles;

pub use crate::base_path::{BasePath, resolve_base_path};
pub use crate::config::MenuConfig;
pub use crate::context::PageContext;
pub use crate::controller::{Dispatch, MenuController, UiEvent};
pub use crate::dropdown::{ClosePolicy, DropdownState, DropdownTree};
pub use crate::error::{ConfigError, MenuError};
pub use crate::loader::{LoadOutcome, LoadedMenu, MenuLoader, StylesheetStatus, container_id};
pub use crate::mobile::{MobileNav, MobileNavState};
pub use crate::registry::{EventKind, Handler, HandlerRegistry, Target};
pub use crate::rewrite::{LinkRewriteRule, adjust_menu_paths};
