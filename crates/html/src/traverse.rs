use crate::{Id, Node};

/// Gives every unassigned node a fresh id. Existing ids are kept, so nodes spliced into an
/// already numbered document get ids that do not collide with the rest of the page.
pub fn assign_node_ids(root: &mut Node) {
    fn max_id(node: &Node) -> u32 {
        node.children()
            .iter()
            .map(max_id)
            .fold(node.id().0, u32::max)
    }

    fn walk(node: &mut Node, next: &mut u32) {
        if !node.id().is_assigned() {
            node.set_id(Id(*next));
            *next = next.wrapping_add(1).max(1);
        }
        if let Some(children) = node.children_mut() {
            for c in children {
                walk(c, next);
            }
        }
    }

    let mut next = max_id(root).wrapping_add(1).max(1);
    walk(root, &mut next);
}

pub fn find_node_by_id(node: &Node, id: Id) -> Option<&Node> {
    if node.id() == id {
        return Some(node);
    }
    node.children()
        .iter()
        .find_map(|c| find_node_by_id(c, id))
}

pub fn find_node_by_id_mut(node: &mut Node, id: Id) -> Option<&mut Node> {
    if node.id() == id {
        return Some(node);
    }
    node.children_mut()?
        .iter_mut()
        .find_map(|c| find_node_by_id_mut(c, id))
}

/// Node ids from `root` down to `target`, both included. `None` if `target` is not in the tree.
pub fn path_to(root: &Node, target: Id) -> Option<Vec<Id>> {
    fn walk(node: &Node, target: Id, path: &mut Vec<Id>) -> bool {
        path.push(node.id());
        if node.id() == target {
            return true;
        }
        for c in node.children() {
            if walk(c, target, path) {
                return true;
            }
        }
        path.pop();
        false
    }

    let mut path = Vec::new();
    walk(root, target, &mut path).then_some(path)
}

/// Nearest inclusive ancestor of `target` matching `pred` (like `Element.closest`).
pub fn closest<F>(root: &Node, target: Id, pred: F) -> Option<Id>
where
    F: Fn(&Node) -> bool,
{
    let path = path_to(root, target)?;
    path.iter()
        .rev()
        .find(|id| find_node_by_id(root, **id).is_some_and(&pred))
        .copied()
}

/// True when `ancestor` is `descendant` or contains it.
pub fn contains(root: &Node, ancestor: Id, descendant: Id) -> bool {
    find_node_by_id(root, ancestor)
        .is_some_and(|a| find_node_by_id(a, descendant).is_some())
}

/// First node in document order matching `pred`.
pub fn find_first<'a, F>(node: &'a Node, pred: &F) -> Option<&'a Node>
where
    F: Fn(&Node) -> bool,
{
    if pred(node) {
        return Some(node);
    }
    node.children().iter().find_map(|c| find_first(c, pred))
}

pub fn find_first_mut<'a, F>(node: &'a mut Node, pred: &F) -> Option<&'a mut Node>
where
    F: Fn(&Node) -> bool,
{
    if pred(node) {
        return Some(node);
    }
    node.children_mut()?
        .iter_mut()
        .find_map(|c| find_first_mut(c, pred))
}

/// Ids of every node matching `pred`, in document order.
pub fn collect_ids<F>(node: &Node, pred: &F) -> Vec<Id>
where
    F: Fn(&Node) -> bool,
{
    fn walk<F: Fn(&Node) -> bool>(node: &Node, pred: &F, out: &mut Vec<Id>) {
        if pred(node) {
            out.push(node.id());
        }
        for c in node.children() {
            walk(c, pred, out);
        }
    }
    let mut out = Vec::new();
    walk(node, pred, &mut out);
    out
}

/// Element whose `id` attribute equals `element_id` (like `getElementById`).
pub fn find_element_by_id<'a>(root: &'a Node, element_id: &str) -> Option<&'a Node> {
    find_first(root, &|n: &Node| n.element_id() == Some(element_id))
}

/// Removes and returns the first node matching `pred` in document order.
pub fn take_first<F>(node: &mut Node, pred: &F) -> Option<Node>
where
    F: Fn(&Node) -> bool,
{
    let children = node.children_mut()?;
    for i in 0..children.len() {
        if pred(&children[i]) {
            return Some(children.remove(i));
        }
        if let Some(found) = take_first(&mut children[i], pred) {
            return Some(found);
        }
    }
    None
}
