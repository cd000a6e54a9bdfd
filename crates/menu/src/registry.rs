use std::collections::HashMap;

use html::Id;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EventKind {
    Click,
    KeyDown,
    Resize,
}

/// Where a handler listens.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Target {
    Element(Id),
    Document,
    Window,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Handler {
    /// Toggles dropdown `index` of the controller's tree on narrow viewports.
    DropdownTrigger { index: usize },
    MenuToggle,
    /// Closes the mobile menu unless the click landed on the nav or the button.
    Overlay,
    /// Stops propagation; closes the mobile menu after a real link is followed.
    Nav,
    /// Closes every dropdown on clicks outside them.
    OutsideClick,
    EscapeKey,
    /// Closes the mobile menu once the viewport is wide again.
    WideViewport,
}

/// One handler per `(target, event)`; attaching again replaces, so wiring the same menu
/// twice never doubles a reaction.
#[derive(Clone, Debug, Default)]
pub struct HandlerRegistry {
    handlers: HashMap<(Target, EventKind), Handler>,
}

impl HandlerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the handler that was replaced, if any.
    pub fn attach(&mut self, target: Target, kind: EventKind, handler: Handler) -> Option<Handler> {
        self.handlers.insert((target, kind), handler)
    }

    pub fn detach(&mut self, target: Target, kind: EventKind) -> Option<Handler> {
        self.handlers.remove(&(target, kind))
    }

    pub fn get(&self, target: Target, kind: EventKind) -> Option<Handler> {
        self.handlers.get(&(target, kind)).copied()
    }

    pub fn is_attached(&self, target: Target, kind: EventKind) -> bool {
        self.handlers.contains_key(&(target, kind))
    }

    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }

    pub fn clear(&mut self) {
        self.handlers.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn attaching_twice_keeps_one_handler() {
        let mut reg = HandlerRegistry::new();
        let trigger = Target::Element(Id(7));
        assert_eq!(reg.attach(trigger, EventKind::Click, Handler::DropdownTrigger { index: 0 }), None);
        assert_eq!(
            reg.attach(trigger, EventKind::Click, Handler::DropdownTrigger { index: 0 }),
            Some(Handler::DropdownTrigger { index: 0 })
        );
        assert_eq!(reg.len(), 1);
    }

    #[test]
    fn same_target_different_events_are_separate() {
        let mut reg = HandlerRegistry::new();
        reg.attach(Target::Document, EventKind::Click, Handler::OutsideClick);
        reg.attach(Target::Document, EventKind::KeyDown, Handler::EscapeKey);
        assert_eq!(reg.len(), 2);
        assert_eq!(reg.get(Target::Document, EventKind::KeyDown), Some(Handler::EscapeKey));
        assert_eq!(reg.get(Target::Window, EventKind::KeyDown), None);
    }

    #[test]
    fn detach_and_clear() {
        let mut reg = HandlerRegistry::new();
        reg.attach(Target::Window, EventKind::Resize, Handler::WideViewport);
        reg.attach(Target::Element(Id(3)), EventKind::Click, Handler::Nav);
        assert_eq!(reg.detach(Target::Window, EventKind::Resize), Some(Handler::WideViewport));
        assert_eq!(reg.detach(Target::Window, EventKind::Resize), None);
        assert!(reg.is_attached(Target::Element(Id(3)), EventKind::Click));
        reg.clear();
        assert!(reg.is_empty());
    }
}
