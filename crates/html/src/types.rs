pub type NodeId = u32;

/// Stable identity of a node inside one document. `Id(0)` means "not assigned yet".
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Id(pub NodeId);

impl Id {
    pub const UNASSIGNED: Id = Id(0);

    pub fn is_assigned(self) -> bool {
        self != Self::UNASSIGNED
    }
}

pub type Attribute = (String, Option<String>);

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    Doctype(String),
    StartTag {
        name: String,
        attributes: Vec<Attribute>,
        self_closing: bool,
    },
    EndTag(String),
    Comment(String),
    Text(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    Document {
        id: Id,
        doctype: Option<String>,
        children: Vec<Node>,
    },
    Element {
        id: Id,
        name: String,
        attributes: Vec<Attribute>,
        children: Vec<Node>,
    },
    Text {
        id: Id,
        text: String,
    },
    Comment {
        id: Id,
        text: String,
    },
}

impl Node {
    pub fn document(children: Vec<Node>) -> Node {
        Node::Document {
            id: Id::UNASSIGNED,
            doctype: None,
            children,
        }
    }

    pub fn element(name: &str, attributes: Vec<Attribute>, children: Vec<Node>) -> Node {
        Node::Element {
            id: Id::UNASSIGNED,
            name: name.to_ascii_lowercase(),
            attributes,
            children,
        }
    }

    pub fn text(text: impl Into<String>) -> Node {
        Node::Text {
            id: Id::UNASSIGNED,
            text: text.into(),
        }
    }

    pub fn id(&self) -> Id {
        match self {
            Node::Document { id, .. } => *id,
            Node::Element { id, .. } => *id,
            Node::Text { id, .. } => *id,
            Node::Comment { id, .. } => *id,
        }
    }

    pub fn set_id(&mut self, new_id: Id) {
        match self {
            Node::Document { id, .. } => *id = new_id,
            Node::Element { id, .. } => *id = new_id,
            Node::Text { id, .. } => *id = new_id,
            Node::Comment { id, .. } => *id = new_id,
        }
    }

    pub fn children(&self) -> &[Node] {
        match self {
            Node::Document { children, .. } | Node::Element { children, .. } => children,
            _ => &[],
        }
    }

    pub fn children_mut(&mut self) -> Option<&mut Vec<Node>> {
        match self {
            Node::Document { children, .. } => Some(children),
            Node::Element { children, .. } => Some(children),
            _ => None,
        }
    }

    /// Lowercase tag name for elements.
    pub fn tag_name(&self) -> Option<&str> {
        match self {
            Node::Element { name, .. } => Some(name),
            _ => None,
        }
    }

    pub fn is_element_named(&self, tag: &str) -> bool {
        self.tag_name().is_some_and(|n| n.eq_ignore_ascii_case(tag))
    }

    pub fn attr(&self, key: &str) -> Option<&str> {
        let Node::Element { attributes, .. } = self else {
            return None;
        };
        attributes
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(key))
            .map(|(_, v)| v.as_deref().unwrap_or(""))
    }

    /// Sets (or inserts) an attribute. No-op on non-element nodes.
    pub fn set_attr(&mut self, key: &str, value: &str) {
        let Node::Element { attributes, .. } = self else {
            return;
        };
        if let Some((_, v)) = attributes.iter_mut().find(|(k, _)| k.eq_ignore_ascii_case(key)) {
            *v = Some(value.to_string());
        } else {
            attributes.push((key.to_ascii_lowercase(), Some(value.to_string())));
        }
    }

    /// The `id` attribute, not the node identity.
    pub fn element_id(&self) -> Option<&str> {
        self.attr("id").filter(|s| !s.is_empty())
    }

    pub fn classes(&self) -> impl Iterator<Item = &str> {
        self.attr("class").unwrap_or("").split_ascii_whitespace()
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.classes().any(|c| c == class)
    }

    /// Returns true when the class list changed.
    pub fn add_class(&mut self, class: &str) -> bool {
        if !matches!(self, Node::Element { .. }) || self.has_class(class) {
            return false;
        }
        let mut list = self.attr("class").unwrap_or("").trim().to_string();
        if !list.is_empty() {
            list.push(' ');
        }
        list.push_str(class);
        self.set_attr("class", &list);
        true
    }

    /// Returns true when the class list changed.
    pub fn remove_class(&mut self, class: &str) -> bool {
        if !self.has_class(class) {
            return false;
        }
        let list = self
            .classes()
            .filter(|c| *c != class)
            .collect::<Vec<_>>()
            .join(" ");
        self.set_attr("class", &list);
        true
    }

    pub fn set_class(&mut self, class: &str, on: bool) -> bool {
        if on {
            self.add_class(class)
        } else {
            self.remove_class(class)
        }
    }

    /// Concatenated descendant text.
    pub fn text_content(&self) -> String {
        fn walk(node: &Node, out: &mut String) {
            match node {
                Node::Text { text, .. } => out.push_str(text),
                Node::Comment { .. } => {}
                _ => {
                    for c in node.children() {
                        walk(c, out);
                    }
                }
            }
        }
        let mut out = String::new();
        walk(self, &mut out);
        out
    }

    /// Replaces all children with a single text node (like `textContent = ...`).
    pub fn set_text_content(&mut self, text: &str) {
        if let Some(children) = self.children_mut() {
            children.clear();
            children.push(Node::text(text));
        }
    }
}
