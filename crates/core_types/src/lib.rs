pub type RequestId = u64;

/// Viewports at or below this width use the mobile menu.
pub const MOBILE_BREAKPOINT_PX: u32 = 768;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ResourceKind {
    Page,
    Menu,
    Stylesheet,
}

impl ResourceKind {
    pub fn label(self) -> &'static str {
        match self {
            ResourceKind::Page => "page",
            ResourceKind::Menu => "menu",
            ResourceKind::Stylesheet => "stylesheet",
        }
    }
}

/// CSS pixel width of the layout viewport (`window.innerWidth`).
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ViewportWidth(pub u32);

impl ViewportWidth {
    pub const DESKTOP: ViewportWidth = ViewportWidth(1280);

    pub fn is_narrow(self, breakpoint: u32) -> bool {
        self.0 <= breakpoint
    }
}

impl Default for ViewportWidth {
    fn default() -> Self {
        Self::DESKTOP
    }
}
