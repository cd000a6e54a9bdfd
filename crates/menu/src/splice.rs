//! Moving the fetched header into the page, and the panels shown when that fails.
use html::traverse::{find_node_by_id_mut, take_first};
use html::{Id, Node, parse_fragment};

use crate::names::HEADER_CLASS;

const ERROR_PANEL_STYLE: &str = "padding: 20px; background: #ffebee; color: #c62828; \
     border: 1px solid #ef5350; border-radius: 5px; font-family: Arial, sans-serif;";
const PLAIN_PANEL_STYLE: &str = "padding: 20px; background: #f0f0f0; color: #333;";

pub const ERROR_TITLE: &str = "Error al cargar el menú de navegación";

fn el(name: &str, attrs: &[(&str, &str)], children: Vec<Node>) -> Node {
    let attributes = attrs
        .iter()
        .map(|(k, v)| (k.to_string(), Some(v.to_string())))
        .collect();
    Node::element(name, attributes, children)
}

fn strong(text: &str) -> Node {
    el("strong", &[], vec![Node::text(text)])
}

fn br() -> Node {
    el("br", &[], Vec::new())
}

fn code(text: &str) -> Node {
    el("code", &[], vec![Node::text(text)])
}

/// Parses `markup` and detaches the first `.fixed-header` element from it.
pub fn extract_header(markup: &str) -> Option<Node> {
    let mut fragment = Node::document(parse_fragment(markup));
    take_first(&mut fragment, &|n: &Node| n.has_class(HEADER_CLASS))
}

/// Replaces every child of `container` with `nodes`. False if `container` is gone.
pub fn replace_children(page: &mut Node, container: Id, nodes: Vec<Node>) -> bool {
    let Some(children) = find_node_by_id_mut(page, container).and_then(Node::children_mut) else {
        return false;
    };
    *children = nodes;
    true
}

/// Panel shown when the menu could not be fetched.
pub fn error_panel(attempted_url: &str, message: &str, protocol: &str) -> Node {
    let line = |label: &str, value: &str| el("small", &[], vec![strong(label), Node::text(format!(" {value}"))]);

    let mut children = vec![
        strong(ERROR_TITLE),
        br(),
        line("URL intentada:", attempted_url),
        br(),
        line("Error:", message),
        br(),
        line("Protocolo:", protocol),
    ];
    if protocol == "file:" {
        children.extend(file_protocol_hint());
    }
    el("div", &[("style", ERROR_PANEL_STYLE)], children)
}

/// How to serve the site instead of opening it from disk.
fn file_protocol_hint() -> Vec<Node> {
    let small = |children: Vec<Node>| el("small", &[], children);
    vec![
        br(),
        strong("Solución:"),
        br(),
        small(vec![Node::text("1. Usa Live Server en VS Code (extensión \"Live Server\")")]),
        br(),
        small(vec![
            Node::text("2. O ejecuta: "),
            code("python -m http.server 8000"),
            Node::text(" en la carpeta del proyecto"),
        ]),
        br(),
        small(vec![Node::text("3. Luego abre: "), code("http://localhost:8000")]),
    ]
}

/// Panel shown when the fragment arrived but holds no header.
pub fn missing_header_panel(menu_file: &str) -> Node {
    el(
        "div",
        &[("style", PLAIN_PANEL_STYLE)],
        vec![Node::text(format!("Error: No se encontró el menú en {menu_file}"))],
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use html::traverse::find_first;
    use html::{assign_node_ids, find_element_by_id, parse_document, to_html};

    #[test]
    fn extracts_first_header_only() {
        let header = extract_header(
            r#"<!-- shared menu --><div><header class="fixed-header" id="one"></header></div><header class="fixed-header" id="two"></header>"#,
        )
        .unwrap();
        assert_eq!(header.element_id(), Some("one"));
        assert!(extract_header("<nav><a href=\"index.html\">x</a></nav>").is_none());
        assert!(extract_header("").is_none());
    }

    #[test]
    fn replaces_existing_children() {
        let mut page = parse_document(r#"<body><div id="menu-container"><p>cargando…</p></div></body>"#);
        assign_node_ids(&mut page);
        let container = find_element_by_id(&page, "menu-container").unwrap().id();
        assert!(replace_children(&mut page, container, vec![Node::text("hola")]));
        assert_eq!(find_element_by_id(&page, "menu-container").unwrap().text_content(), "hola");
        assert!(!replace_children(&mut page, Id(9_999), Vec::new()));
    }

    #[test]
    fn error_panel_names_url_error_and_protocol() {
        let panel = error_panel("../menu.html", "HTTP 404: Not Found", "https:");
        let text = panel.text_content();
        assert!(text.contains(ERROR_TITLE));
        assert!(text.contains("URL intentada: ../menu.html"));
        assert!(text.contains("Error: HTTP 404: Not Found"));
        assert!(text.contains("Protocolo: https:"));
        assert!(!text.contains("Solución"));
    }

    #[test]
    fn file_protocol_panel_suggests_a_server() {
        let panel = error_panel("./menu.html", "network error", "file:");
        assert!(panel.text_content().contains("python -m http.server 8000"));
        assert!(find_first(&panel, &|n: &Node| n.is_element_named("code")).is_some());
    }

    #[test]
    fn error_text_is_escaped() {
        let html = to_html(&error_panel("<x>", "a & b", "https:"));
        assert!(html.contains("&lt;x&gt;"));
        assert!(html.contains("a &amp; b"));
    }

    #[test]
    fn missing_header_panel_text() {
        let panel = missing_header_panel("menu.html");
        assert_eq!(panel.text_content(), "Error: No se encontró el menú en menu.html");
        assert!(find_first(&panel, &|n: &Node| n.is_element_named("a")).is_none());
    }
}
