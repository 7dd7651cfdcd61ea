//! Path resolution: walk string segments from the root to a node.
//!
//! At each step an object looks the segment up as a key and an array parses
//! it as a canonical index; scalars end the walk. [`resolve`] and
//! [`resolve_mut`] fail with a [`ResolveError`] on the first segment that does
//! not lead anywhere. Every mutation goes through them, so a stale path is
//! rejected instead of silently redirecting a write to the root.
//!
//! [`resolve_or_root`] keeps the fail-soft reading for callers that want it,
//! and [`nearest_valid_ancestor`] is what navigation uses to recover from a
//! path that drifted after structural edits.

use log::trace;
use thiserror::Error;

use json_tree_path::{format_pointer, parse_index, Path};

use crate::node::{Node, NodeKind};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ResolveError {
    #[error("NOT_FOUND: no key {key:?} at {at:?}")]
    MissingKey { at: String, key: String },
    #[error("INVALID_INDEX: {segment:?} is not an array index at {at:?}")]
    InvalidIndex { at: String, segment: String },
    #[error("NOT_FOUND: index {index} out of range for length {len} at {at:?}")]
    IndexOutOfRange { at: String, index: usize, len: usize },
    #[error("NOT_A_CONTAINER: {kind} at {at:?} has no children")]
    NotAContainer { at: String, kind: NodeKind },
}

fn step<'a>(node: &'a Node, path: &[String], depth: usize) -> Result<&'a Node, ResolveError> {
    let segment = &path[depth];
    let at = || format_pointer(&path[..depth]);
    match node {
        Node::Object(map) => map
            .get(segment)
            .ok_or_else(|| ResolveError::MissingKey { at: at(), key: segment.clone() }),
        Node::Array(items) => {
            let index = parse_index(segment)
                .ok_or_else(|| ResolveError::InvalidIndex { at: at(), segment: segment.clone() })?;
            items
                .get(index)
                .ok_or_else(|| ResolveError::IndexOutOfRange { at: at(), index, len: items.len() })
        }
        other => Err(ResolveError::NotAContainer { at: at(), kind: other.kind() }),
    }
}

/// Resolve `path` against `root`.
///
/// ```
/// use json_tree::{resolve, Node};
/// use serde_json::json;
///
/// let root = Node::from(json!({"a": [1, {"b": true}]}));
/// let path = vec!["a".to_string(), "1".to_string(), "b".to_string()];
/// assert_eq!(resolve(&root, &path).unwrap(), &Node::from(true));
/// assert!(resolve(&root, &["missing".to_string()]).is_err());
/// ```
pub fn resolve<'a>(root: &'a Node, path: &[String]) -> Result<&'a Node, ResolveError> {
    let mut current = root;
    for depth in 0..path.len() {
        current = step(current, path, depth)?;
    }
    Ok(current)
}

/// Mutable counterpart of [`resolve`].
pub fn resolve_mut<'a>(root: &'a mut Node, path: &[String]) -> Result<&'a mut Node, ResolveError> {
    // Validate with a shared walk first so the error carries the same detail.
    resolve(root, path)?;
    let mut current = root;
    for segment in path {
        current = match current {
            Node::Object(map) => map.get_mut(segment),
            Node::Array(items) => parse_index(segment).and_then(move |idx| items.get_mut(idx)),
            _ => None,
        }
        .ok_or_else(|| ResolveError::MissingKey { at: format_pointer(path), key: segment.clone() })?;
    }
    Ok(current)
}

/// Fail-soft resolution: any segment that cannot be followed makes the whole
/// lookup return `root`.
///
/// ```
/// use json_tree::{resolve_or_root, Node};
/// use serde_json::json;
///
/// let root = Node::from(json!({}));
/// let path = vec!["missing".to_string(), "x".to_string()];
/// assert!(std::ptr::eq(resolve_or_root(&root, &path), &root));
/// ```
pub fn resolve_or_root<'a>(root: &'a Node, path: &[String]) -> &'a Node {
    match resolve(root, path) {
        Ok(node) => node,
        Err(e) => {
            trace!("fail-soft resolution fell back to root: {e}");
            root
        }
    }
}

/// Longest prefix of `path` that resolves to a container.
///
/// The root always qualifies, even when it is a scalar.
pub fn nearest_valid_ancestor(root: &Node, path: &[String]) -> Path {
    let mut current = root;
    let mut depth = 0;
    while depth < path.len() {
        match step(current, path, depth) {
            Ok(next) if next.is_container() => {
                current = next;
                depth += 1;
            }
            _ => break,
        }
    }
    path[..depth].to_vec()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn p(steps: &[&str]) -> Path {
        steps.iter().map(|s| s.to_string()).collect()
    }

    fn doc() -> Node {
        Node::from(json!({"users": [{"name": "Ann"}, {"name": "Bo"}], "count": 2}))
    }

    #[test]
    fn empty_path_is_root() {
        let root = doc();
        assert!(std::ptr::eq(resolve(&root, &[]).unwrap(), &root));
    }

    #[test]
    fn walks_objects_and_arrays() {
        let root = doc();
        assert_eq!(resolve(&root, &p(&["users", "1", "name"])).unwrap(), &Node::from("Bo"));
    }

    #[test]
    fn segment_interpretation_depends_on_node() {
        let root = Node::from(json!({"0": "key", "list": ["index"]}));
        assert_eq!(resolve(&root, &p(&["0"])).unwrap(), &Node::from("key"));
        assert_eq!(resolve(&root, &p(&["list", "0"])).unwrap(), &Node::from("index"));
    }

    #[test]
    fn errors_name_the_failure() {
        let root = doc();
        assert!(matches!(
            resolve(&root, &p(&["nope"])),
            Err(ResolveError::MissingKey { key, .. }) if key == "nope"
        ));
        assert!(matches!(
            resolve(&root, &p(&["users", "x"])),
            Err(ResolveError::InvalidIndex { .. })
        ));
        assert!(matches!(
            resolve(&root, &p(&["users", "5"])),
            Err(ResolveError::IndexOutOfRange { index: 5, len: 2, .. })
        ));
        assert!(matches!(
            resolve(&root, &p(&["count", "x"])),
            Err(ResolveError::NotAContainer { kind: NodeKind::Number, .. })
        ));
    }

    #[test]
    fn resolve_mut_allows_in_place_change() {
        let mut root = doc();
        *resolve_mut(&mut root, &p(&["users", "0", "name"])).unwrap() = Node::from("Al");
        assert_eq!(resolve(&root, &p(&["users", "0", "name"])).unwrap(), &Node::from("Al"));
        assert!(resolve_mut(&mut root, &p(&["users", "9"])).is_err());
    }

    #[test]
    fn fail_soft_returns_root() {
        let root = Node::from(json!({}));
        assert!(std::ptr::eq(resolve_or_root(&root, &p(&["missing", "x"])), &root));
        let root = doc();
        assert_eq!(resolve_or_root(&root, &p(&["count"])), &Node::from(2));
    }

    #[test]
    fn nearest_ancestor_clamps_to_containers() {
        let root = doc();
        assert_eq!(nearest_valid_ancestor(&root, &p(&["users", "1"])), p(&["users", "1"]));
        assert_eq!(nearest_valid_ancestor(&root, &p(&["users", "7", "name"])), p(&["users"]));
        assert_eq!(nearest_valid_ancestor(&root, &p(&["count"])), Path::new());
        assert_eq!(nearest_valid_ancestor(&root, &p(&["gone", "deeper"])), Path::new());
    }
}
