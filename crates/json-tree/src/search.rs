//! Recursive substring search over keys and string values.
//!
//! Traversal is depth-first in document order. For every object member the
//! key is tested, then the value if it is a string, then the value is
//! descended into. Array elements are tested when they are strings and then
//! descended into. Matching is case-sensitive; numbers, booleans and nulls
//! never match. A key hit and a value hit on the same member are reported as
//! two hits at the same path, key first.

use log::trace;

use json_tree_path::{display_path, split_last, Path};

use crate::node::Node;
use crate::resolve::{resolve, ResolveError};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HitKind {
    Key,
    Value,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchHit {
    /// Full path of the matching member or element.
    pub path: Path,
    pub kind: HitKind,
    /// Display label, e.g. `Key: name (Path: users > 0 > name)`.
    pub label: String,
}

impl SearchHit {
    fn new(path: &[String], kind: HitKind, text: &str) -> Self {
        let prefix = match kind {
            HitKind::Key => "Key",
            HitKind::Value => "Val",
        };
        Self {
            path: path.to_vec(),
            kind,
            label: format!("{prefix}: {text} (Path: {})", display_path(path)),
        }
    }

    /// The container to navigate to and the child key to focus there.
    ///
    /// Hits always lie below the search root, so the path is never empty.
    pub fn split(&self) -> (Path, String) {
        split_last(&self.path).unwrap_or_default()
    }
}

/// Where a search starts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SearchScope {
    /// The whole document.
    #[default]
    Root,
    /// The subtree at the caller's current path.
    Current,
}

/// Search `node`, whose own path in the document is `start`.
///
/// Hit paths are absolute: they begin with `start`. An empty query yields no
/// hits.
///
/// ```
/// use json_tree::{search, HitKind, Node};
/// use serde_json::json;
///
/// let doc = Node::from(json!({"name": "Alice", "tags": ["red", "blue"]}));
/// let hits = search(&doc, "li", &[]);
/// assert_eq!(hits.len(), 1);
/// assert_eq!(hits[0].path, vec!["name".to_string()]);
/// assert_eq!(hits[0].kind, HitKind::Value);
/// ```
pub fn search(node: &Node, query: &str, start: &[String]) -> Vec<SearchHit> {
    let mut hits = Vec::new();
    if query.is_empty() {
        return hits;
    }
    let mut path = start.to_vec();
    walk(node, query, &mut path, &mut hits);
    trace!("search {query:?} from {start:?}: {} hits", hits.len());
    hits
}

fn walk(node: &Node, query: &str, path: &mut Path, hits: &mut Vec<SearchHit>) {
    match node {
        Node::Object(map) => {
            for (key, val) in map {
                path.push(key.clone());
                if key.contains(query) {
                    hits.push(SearchHit::new(path, HitKind::Key, key));
                }
                if let Node::String(s) = val {
                    if s.contains(query) {
                        hits.push(SearchHit::new(path, HitKind::Value, s));
                    }
                }
                walk(val, query, path, hits);
                path.pop();
            }
        }
        Node::Array(items) => {
            for (i, val) in items.iter().enumerate() {
                path.push(i.to_string());
                if let Node::String(s) = val {
                    if s.contains(query) {
                        hits.push(SearchHit::new(path, HitKind::Value, s));
                    }
                }
                walk(val, query, path, hits);
                path.pop();
            }
        }
        Node::Null | Node::Bool(_) | Node::Number(_) | Node::String(_) => {}
    }
}

/// Search the document from the root or from `current`, per `scope`.
///
/// # Errors
///
/// Fails only for [`SearchScope::Current`] when `current` does not resolve.
pub fn search_in(
    root: &Node,
    query: &str,
    scope: SearchScope,
    current: &[String],
) -> Result<Vec<SearchHit>, ResolveError> {
    match scope {
        SearchScope::Root => Ok(search(root, query, &[])),
        SearchScope::Current => Ok(search(resolve(root, current)?, query, current)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn p(steps: &[&str]) -> Path {
        steps.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn value_hit_only_on_matching_string() {
        let doc = Node::from(json!({"name": "Alice", "tags": ["red", "blue"]}));
        let hits = search(&doc, "li", &[]);
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].path, p(&["name"]));
        assert_eq!(hits[0].kind, HitKind::Value);
        assert_eq!(hits[0].label, "Val: Alice (Path: name)");
    }

    #[test]
    fn key_and_value_hits_in_document_order() {
        let doc = Node::from(json!({
            "color": "colorless",
            "nested": {"colors": ["color wheel", 1, null]}
        }));
        let hits = search(&doc, "color", &[]);
        let got: Vec<(Path, HitKind)> = hits.iter().map(|h| (h.path.clone(), h.kind)).collect();
        assert_eq!(
            got,
            vec![
                (p(&["color"]), HitKind::Key),
                (p(&["color"]), HitKind::Value),
                (p(&["nested", "colors"]), HitKind::Key),
                (p(&["nested", "colors", "0"]), HitKind::Value),
            ]
        );
        assert_eq!(hits[2].label, "Key: colors (Path: nested > colors)");
    }

    #[test]
    fn case_sensitive_and_strings_only() {
        let doc = Node::from(json!({"a": "ABC", "n": 123, "b": true, "z": null}));
        assert!(search(&doc, "abc", &[]).is_empty());
        assert!(search(&doc, "12", &[]).is_empty());
        assert!(search(&doc, "true", &[]).is_empty());
        assert!(search(&doc, "null", &[]).is_empty());
    }

    #[test]
    fn empty_query_yields_nothing() {
        let doc = Node::from(json!({"a": "a"}));
        assert!(search(&doc, "", &[]).is_empty());
    }

    #[test]
    fn subtree_search_keeps_absolute_paths() {
        let doc = Node::from(json!({"x": "needle", "sub": {"y": "needle"}}));
        let hits = search_in(&doc, "needle", SearchScope::Current, &p(&["sub"])).unwrap();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].path, p(&["sub", "y"]));
        assert_eq!(hits[0].split(), (p(&["sub"]), "y".to_string()));

        let all = search_in(&doc, "needle", SearchScope::Root, &p(&["sub"])).unwrap();
        assert_eq!(all.len(), 2);
    }

    #[test]
    fn subtree_search_on_stale_path_fails() {
        let doc = Node::from(json!({}));
        assert!(search_in(&doc, "q", SearchScope::Current, &p(&["gone"])).is_err());
    }
}
