use crate::tokenizer::tokenize;
use crate::types::{Id, Node, Token};

/// Builds a document tree from a token stream.
///
/// Unmatched end tags are ignored; an end tag closes every element opened after its match.
/// Elements still open at end of input are closed implicitly. Node ids are left unassigned.
pub fn build_dom(tokens: Vec<Token>) -> Node {
    // Stack of open nodes; index 0 is always the document.
    let mut open: Vec<Node> = vec![Node::document(Vec::new())];

    for token in tokens {
        match token {
            Token::Doctype(s) => {
                if let Some(Node::Document { doctype, .. }) = open.first_mut() {
                    *doctype = Some(s);
                }
            }
            Token::Comment(text) => append(
                &mut open,
                Node::Comment {
                    id: Id::UNASSIGNED,
                    text,
                },
            ),
            Token::Text(text) => {
                if !text.is_empty() {
                    append(&mut open, Node::text(text));
                }
            }
            Token::StartTag {
                name,
                attributes,
                self_closing,
            } => {
                let element = Node::Element {
                    id: Id::UNASSIGNED,
                    name,
                    attributes,
                    children: Vec::new(),
                };
                if self_closing {
                    append(&mut open, element);
                } else {
                    open.push(element);
                }
            }
            Token::EndTag(name) => {
                let Some(pos) = open.iter().rposition(|n| n.is_element_named(&name)) else {
                    continue;
                };
                while open.len() > pos {
                    close_top(&mut open);
                }
            }
        }
    }

    while open.len() > 1 {
        close_top(&mut open);
    }
    open.pop().unwrap_or_else(|| Node::document(Vec::new()))
}

fn append(open: &mut [Node], node: Node) {
    if let Some(children) = open.last_mut().and_then(Node::children_mut) {
        children.push(node);
    }
}

fn close_top(open: &mut Vec<Node>) {
    if open.len() <= 1 {
        return;
    }
    if let Some(node) = open.pop() {
        append(open, node);
    }
}

/// Parses a full page.
pub fn parse_document(input: &str) -> Node {
    build_dom(tokenize(input))
}

/// Parses markup meant for `innerHTML`: the top-level nodes without a document wrapper.
pub fn parse_fragment(input: &str) -> Vec<Node> {
    match parse_document(input) {
        Node::Document { children, .. } => children,
        other => vec![other],
    }
}
