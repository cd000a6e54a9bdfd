//! Minimal selector matching: compound selectors (`tag`, `#id`, `.class`, combinations)
//! joined by the descendant combinator (whitespace). Enough to address menu elements from
//! tests and the command line.
use crate::traverse::{collect_ids, find_node_by_id, path_to};
use crate::{Id, Node};
use std::fmt;
use std::str::FromStr;

#[derive(Clone, Debug, Default, PartialEq, Eq)]
struct Compound {
    tag: Option<String>,
    id: Option<String>,
    classes: Vec<String>,
}

impl Compound {
    fn matches(&self, node: &Node) -> bool {
        let Some(name) = node.tag_name() else {
            return false;
        };
        if self.tag.as_deref().is_some_and(|t| t != "*" && t != name) {
            return false;
        }
        if let Some(id) = &self.id {
            if node.element_id() != Some(id.as_str()) {
                return false;
            }
        }
        self.classes.iter().all(|c| node.has_class(c))
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Selector {
    parts: Vec<Compound>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SelectorError(pub String);

impl fmt::Display for SelectorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid selector: {}", self.0)
    }
}

impl std::error::Error for SelectorError {}

impl FromStr for Selector {
    type Err = SelectorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts = s
            .split_ascii_whitespace()
            .map(parse_compound)
            .collect::<Result<Vec<_>, _>>()?;
        if parts.is_empty() {
            return Err(SelectorError(s.to_string()));
        }
        Ok(Selector { parts })
    }
}

fn parse_compound(s: &str) -> Result<Compound, SelectorError> {
    let err = || SelectorError(s.to_string());
    let mut out = Compound::default();
    let mut rest = s;

    let tag_end = rest.find(&['#', '.'][..]).unwrap_or(rest.len());
    if tag_end > 0 {
        out.tag = Some(rest[..tag_end].to_ascii_lowercase());
    }
    rest = &rest[tag_end..];

    while let Some(marker) = rest.chars().next() {
        let body = &rest[1..];
        let end = body.find(&['#', '.'][..]).unwrap_or(body.len());
        let value = &body[..end];
        if value.is_empty() {
            return Err(err());
        }
        match marker {
            '#' if out.id.is_none() => out.id = Some(value.to_string()),
            '.' => out.classes.push(value.to_string()),
            _ => return Err(err()),
        }
        rest = &body[end..];
    }
    Ok(out)
}

impl Selector {
    /// Whether the node `id` inside `root` matches.
    pub fn matches(&self, root: &Node, id: Id) -> bool {
        let Some(path) = path_to(root, id) else {
            return false;
        };
        let Some((last, ancestors)) = self.parts.split_last() else {
            return false;
        };
        let Some(node) = find_node_by_id(root, id) else {
            return false;
        };
        if !last.matches(node) {
            return false;
        }

        // Greedy right-to-left match of the remaining compounds against ancestors.
        let mut wanted = ancestors.iter().rev().peekable();
        for ancestor in path.iter().rev().skip(1) {
            let Some(compound) = wanted.peek() else {
                break;
            };
            if find_node_by_id(root, *ancestor).is_some_and(|n| compound.matches(n)) {
                wanted.next();
            }
        }
        wanted.peek().is_none()
    }

    pub fn select_all(&self, root: &Node) -> Vec<Id> {
        collect_ids(root, &|n: &Node| n.tag_name().is_some())
            .into_iter()
            .filter(|id| self.matches(root, *id))
            .collect()
    }

    pub fn select_first(&self, root: &Node) -> Option<Id> {
        self.select_all(root).into_iter().next()
    }
}
