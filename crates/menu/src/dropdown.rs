//! Open/closed state of every `.dropdown` in the injected menu.
//!
//! The tree is the authority; the `active` class on each dropdown element is a projection
//! of [`DropdownState`] applied through the [`Transition`]s returned by each operation.
use html::{Id, Node};
use serde::{Deserialize, Serialize};

use crate::names::{DROPDOWN_CLASS, NAV_MENU_CLASS};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum DropdownState {
    #[default]
    Closed,
    Open,
}

/// What else closes when a dropdown opens or closes.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ClosePolicy {
    /// Top-level items close every other top-level item and all of their nested dropdowns;
    /// closing a top-level item closes its nested dropdowns too. Nested items only close
    /// their siblings.
    #[default]
    Cascade,
    /// Every item only closes same-level siblings; nothing cascades.
    SiblingsOnly,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DropdownNode {
    pub element: Id,
    /// Direct `<a>` children; clicks on these toggle the dropdown.
    pub triggers: Vec<Id>,
    /// Index of the nearest enclosing dropdown.
    pub parent: Option<usize>,
    /// Parent element; dropdowns sharing it are siblings.
    pub container: Id,
    /// Direct child of `.nav-menu`.
    pub top_level: bool,
    pub state: DropdownState,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Transition {
    pub element: Id,
    pub to: DropdownState,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DropdownTree {
    nodes: Vec<DropdownNode>,
}

impl DropdownTree {
    /// Collects dropdowns under `root` in document order, all closed.
    pub fn from_dom(root: &Node) -> Self {
        fn walk(node: &Node, parent_el: Option<&Node>, enclosing: Option<usize>, out: &mut Vec<DropdownNode>) {
            let mut enclosing = enclosing;
            if node.has_class(DROPDOWN_CLASS) {
                let triggers = node
                    .children()
                    .iter()
                    .filter(|c| c.is_element_named("a"))
                    .map(Node::id)
                    .collect();
                out.push(DropdownNode {
                    element: node.id(),
                    triggers,
                    parent: enclosing,
                    container: parent_el.map(Node::id).unwrap_or_default(),
                    top_level: parent_el.is_some_and(|p| p.has_class(NAV_MENU_CLASS)),
                    state: DropdownState::Closed,
                });
                enclosing = Some(out.len() - 1);
            }
            for c in node.children() {
                walk(c, Some(node), enclosing, out);
            }
        }

        let mut nodes = Vec::new();
        walk(root, None, None, &mut nodes);
        Self { nodes }
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn nodes(&self) -> &[DropdownNode] {
        &self.nodes
    }

    pub fn get(&self, idx: usize) -> Option<&DropdownNode> {
        self.nodes.get(idx)
    }

    pub fn state(&self, idx: usize) -> Option<DropdownState> {
        self.nodes.get(idx).map(|n| n.state)
    }

    pub fn index_of(&self, element: Id) -> Option<usize> {
        self.nodes.iter().position(|n| n.element == element)
    }

    pub fn open_indices(&self) -> Vec<usize> {
        (0..self.nodes.len())
            .filter(|&i| self.nodes[i].state == DropdownState::Open)
            .collect()
    }

    fn is_descendant(&self, idx: usize, ancestor: usize) -> bool {
        let mut cur = self.nodes[idx].parent;
        while let Some(p) = cur {
            if p == ancestor {
                return true;
            }
            cur = self.nodes[p].parent;
        }
        false
    }

    /// Nested dropdowns at any depth below `idx`.
    pub fn descendants(&self, idx: usize) -> Vec<usize> {
        (0..self.nodes.len())
            .filter(|&i| self.is_descendant(i, idx))
            .collect()
    }

    fn set(&mut self, idx: usize, to: DropdownState, out: &mut Vec<Transition>) {
        let node = &mut self.nodes[idx];
        if node.state != to {
            node.state = to;
            out.push(Transition {
                element: node.element,
                to,
            });
        }
    }

    fn close_with_descendants(&mut self, idx: usize, out: &mut Vec<Transition>) {
        self.set(idx, DropdownState::Closed, out);
        for d in self.descendants(idx) {
            self.set(d, DropdownState::Closed, out);
        }
    }

    /// Flips dropdown `idx`. Opening closes the items `policy` says compete with it.
    pub fn toggle(&mut self, idx: usize, policy: ClosePolicy) -> Vec<Transition> {
        let mut out = Vec::new();
        let Some(node) = self.nodes.get(idx) else {
            return out;
        };
        let cascade = node.top_level && policy == ClosePolicy::Cascade;

        if node.state == DropdownState::Open {
            if cascade {
                self.close_with_descendants(idx, &mut out);
            } else {
                self.set(idx, DropdownState::Closed, &mut out);
            }
            return out;
        }

        if cascade {
            let others: Vec<usize> = (0..self.nodes.len())
                .filter(|&i| i != idx && self.nodes[i].top_level)
                .collect();
            for other in others {
                self.close_with_descendants(other, &mut out);
            }
        } else {
            let container = node.container;
            let siblings: Vec<usize> = (0..self.nodes.len())
                .filter(|&i| i != idx && self.nodes[i].container == container)
                .collect();
            for sibling in siblings {
                self.set(sibling, DropdownState::Closed, &mut out);
            }
        }
        self.set(idx, DropdownState::Open, &mut out);
        out
    }

    /// Opens `idx` without closing anything else (used for the current page's section).
    pub fn open(&mut self, idx: usize) -> Vec<Transition> {
        let mut out = Vec::new();
        if idx < self.nodes.len() {
            self.set(idx, DropdownState::Open, &mut out);
        }
        out
    }

    pub fn close_all(&mut self) -> Vec<Transition> {
        let mut out = Vec::new();
        for i in 0..self.nodes.len() {
            self.set(i, DropdownState::Closed, &mut out);
        }
        out
    }
}
