use crate::Node;

/// Collect `<script src="…">` values in document order.
pub fn collect_script_srcs(node: &Node, out: &mut Vec<String>) {
    if node.is_element_named("script") {
        if let Some(src) = node.attr("src").map(str::trim).filter(|s| !s.is_empty()) {
            out.push(src.to_string());
        }
    }
    for c in node.children() {
        collect_script_srcs(c, out);
    }
}

/// One line per node, indented by depth, at most `cap` lines.
pub fn outline_from_dom(root: &Node, cap: usize) -> Vec<String> {
    fn shorten(t: &str) -> String {
        let t = t.replace('\n', " ");
        let t = t.trim();
        match t.char_indices().nth(40) {
            Some((cut, _)) => format!("{}…", &t[..cut]),
            None => t.to_string(),
        }
    }

    fn walk(node: &Node, depth: usize, out: &mut Vec<String>, left: &mut usize) {
        if *left == 0 {
            return;
        }
        let indent = "  ".repeat(depth);
        match node {
            Node::Document { doctype, .. } => {
                *left -= 1;
                match doctype {
                    Some(dt) => out.push(format!("{indent}<!{dt}>")),
                    None => out.push(format!("{indent}#document")),
                }
            }
            Node::Element { name, .. } => {
                *left -= 1;
                let mut line = format!("{indent}<{name}");
                if let Some(id) = node.element_id() {
                    line.push_str(&format!(r#" id="{id}""#));
                }
                if let Some(class) = node.attr("class").filter(|c| !c.is_empty()) {
                    line.push_str(&format!(r#" class="{class}""#));
                }
                if let Some(href) = node.attr("href") {
                    line.push_str(&format!(r#" href="{href}""#));
                }
                line.push('>');
                out.push(line);
            }
            Node::Text { text, .. } => {
                let show = shorten(text);
                if !show.is_empty() {
                    *left -= 1;
                    out.push(format!("{indent}\"{show}\""));
                }
                return;
            }
            Node::Comment { text, .. } => {
                *left -= 1;
                out.push(format!("{indent}<!-- {} -->", shorten(text)));
                return;
            }
        }
        for c in node.children() {
            walk(c, depth + 1, out, left);
        }
    }

    let mut out = Vec::new();
    let mut left = cap;
    walk(root, 0, &mut out, &mut left);
    out
}
