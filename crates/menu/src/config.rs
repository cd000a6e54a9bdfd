use std::path::Path;
use std::time::Duration;

use core_types::MOBILE_BREAKPOINT_PX;
use serde::{Deserialize, Serialize};

use crate::dropdown::ClosePolicy;
use crate::error::ConfigError;

/// Names and thresholds the loader relies on. Every field has a default, so an empty TOML
/// document is a valid config.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MenuConfig {
    /// `id` of the placeholder element each page carries.
    pub container_id: String,
    /// Fragment path relative to the site root.
    pub menu_file: String,
    pub styles_file: String,
    pub logo_file: String,
    pub logo_id: String,
    /// Substring identifying the loader's `<script src>` on host pages.
    pub script_name: String,
    /// Widths at or below this are treated as mobile.
    pub mobile_breakpoint_px: u32,
    pub close_policy: ClosePolicy,
    /// Insert the hamburger button and overlay.
    pub hamburger: bool,
    pub fetch_timeout_secs: u64,
}

impl Default for MenuConfig {
    fn default() -> Self {
        Self {
            container_id: "menu-container".to_string(),
            menu_file: "menu.html".to_string(),
            styles_file: "menu-styles.css".to_string(),
            logo_file: "fedemoto-logo.png".to_string(),
            logo_id: "menu-logo".to_string(),
            script_name: "load-menu.js".to_string(),
            mobile_breakpoint_px: MOBILE_BREAKPOINT_PX,
            close_policy: ClosePolicy::default(),
            hamburger: true,
            fetch_timeout_secs: net::DEFAULT_TIMEOUT.as_secs(),
        }
    }
}

impl MenuConfig {
    pub fn from_toml_str(input: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(input)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&raw)
    }

    pub fn fetch_timeout(&self) -> Duration {
        Duration::from_secs(self.fetch_timeout_secs)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        let names = [
            ("container_id", &self.container_id),
            ("menu_file", &self.menu_file),
            ("styles_file", &self.styles_file),
            ("logo_id", &self.logo_id),
            ("script_name", &self.script_name),
        ];
        if let Some((field, _)) = names.iter().find(|(_, v)| v.trim().is_empty()) {
            return Err(ConfigError::Invalid(format!("{field} must not be empty")));
        }
        if self.mobile_breakpoint_px == 0 {
            return Err(ConfigError::Invalid("mobile_breakpoint_px must be positive".into()));
        }
        if self.fetch_timeout_secs == 0 {
            return Err(ConfigError::Invalid("fetch_timeout_secs must be positive".into()));
        }
        Ok(())
    }
}
