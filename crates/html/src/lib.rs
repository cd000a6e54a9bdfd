pub mod dom_utils;
pub mod query;
pub mod traverse;

mod dom_builder;
mod entities;
mod serialize;
mod tokenizer;
mod types;

use memchr::{memchr, memchr2};

pub fn is_html(ct: &Option<String>) -> bool {
    let Some(value) = ct.as_deref() else {
        return false;
    };
    contains_ignore_ascii_case(value, b"text/html")
        || contains_ignore_ascii_case(value, b"application/xhtml")
}

fn contains_ignore_ascii_case(haystack: &str, needle: &[u8]) -> bool {
    let hay = haystack.as_bytes();
    let n = needle.len();
    if n == 0 {
        return true;
    }
    if hay.len() < n {
        return false;
    }
    let first = needle[0];
    let (a, b) = (first.to_ascii_lowercase(), first.to_ascii_uppercase());
    let mut i = 0;
    while i + n <= hay.len() {
        let rel = if a == b {
            memchr(a, &hay[i..])
        } else {
            memchr2(a, b, &hay[i..])
        };
        let Some(rel) = rel else {
            return false;
        };
        let pos = i + rel;
        if pos + n <= hay.len() && hay[pos..pos + n].eq_ignore_ascii_case(needle) {
            return true;
        }
        i = pos + 1;
    }
    false
}

pub use crate::dom_builder::{build_dom, parse_document, parse_fragment};
pub use crate::query::{Selector, SelectorError};
pub use crate::serialize::to_html;
pub use crate::tokenizer::tokenize;
pub use crate::traverse::{assign_node_ids, find_element_by_id, find_node_by_id, find_node_by_id_mut};
pub use crate::types::{Attribute, Id, Node, NodeId, Token};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn is_html_matches_common_content_types() {
        assert!(is_html(&Some("text/html; charset=utf-8".into())));
        assert!(is_html(&Some("TEXT/HTML".into())));
        assert!(is_html(&Some("application/xhtml+xml".into())));
        assert!(!is_html(&Some("text/css".into())));
        assert!(!is_html(&None));
    }
}
