//! Path segments for json-tree documents.
//!
//! A path is an ordered list of string segments from the document root. A
//! segment is an object key or a base-10 array index rendered as a string;
//! which one it is gets decided by the node the resolver meets, not by the
//! segment's own syntax. This crate only deals with the strings: pointer-style
//! parsing and formatting (RFC 6901 escaping), canonical index validation,
//! parent splitting and the human-readable renderings used for breadcrumbs
//! and search labels.
//!
//! # Example
//!
//! ```
//! use json_tree_path::{format_pointer, parse_pointer, display_path};
//!
//! let path = parse_pointer("/users/0/name");
//! assert_eq!(path, vec!["users", "0", "name"]);
//! assert_eq!(format_pointer(&path), "/users/0/name");
//! assert_eq!(display_path(&path), "users > 0 > name");
//! ```

use thiserror::Error;

pub mod validate;
pub use validate::{validate_pointer, ValidationError, MAX_POINTER_LENGTH};

/// A single path segment: an object key or a stringified array index.
pub type PathStep = String;

/// A path from the document root. `[]` is the root itself.
pub type Path = Vec<PathStep>;

/// Label of the first breadcrumb, standing for the root.
pub const ROOT_LABEL: &str = "root";

/// Separator used when a path is rendered for people.
pub const DISPLAY_SEPARATOR: &str = " > ";

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PathError {
    #[error("NO_PARENT")]
    NoParent,
    #[error("Breadcrumb index {index} out of range for depth {depth}")]
    BreadcrumbOutOfRange { index: usize, depth: usize },
}

// ── Escaping ──────────────────────────────────────────────────────────────

/// Unescapes a pointer component: `~1` becomes `/`, `~0` becomes `~`.
///
/// ```
/// use json_tree_path::unescape_component;
///
/// assert_eq!(unescape_component("a~0b"), "a~b");
/// assert_eq!(unescape_component("c~1d"), "c/d");
/// ```
pub fn unescape_component(component: &str) -> String {
    if !component.contains('~') {
        return component.to_string();
    }
    // ~1 before ~0, otherwise "~01" would decode to "/"
    component.replace("~1", "/").replace("~0", "~")
}

/// Escapes a pointer component: `~` becomes `~0`, `/` becomes `~1`.
pub fn escape_component(component: &str) -> String {
    if !component.contains('/') && !component.contains('~') {
        return component.to_string();
    }
    component.replace('~', "~0").replace('/', "~1")
}

// ── Pointer strings ───────────────────────────────────────────────────────

/// Parse a pointer string into path segments.
///
/// The empty string is the root; `/` is a single empty key. A missing
/// leading `/` is tolerated.
pub fn parse_pointer(pointer: &str) -> Path {
    if pointer.is_empty() {
        return Vec::new();
    }
    let body = pointer.strip_prefix('/').unwrap_or(pointer);
    body.split('/').map(unescape_component).collect()
}

/// Format path segments into a pointer string. The root formats as `""`.
pub fn format_pointer(path: &[String]) -> String {
    let mut out = String::new();
    for component in path {
        out.push('/');
        out.push_str(&escape_component(component));
    }
    out
}

// ── Indices ───────────────────────────────────────────────────────────────

/// Check if a segment is a canonical non-negative array index.
///
/// ```
/// use json_tree_path::is_valid_index;
///
/// assert!(is_valid_index("0"));
/// assert!(is_valid_index("42"));
/// assert!(!is_valid_index("01"));
/// assert!(!is_valid_index("-1"));
/// assert!(!is_valid_index("+1"));
/// ```
pub fn is_valid_index(index: &str) -> bool {
    if index.is_empty() {
        return false;
    }
    let bytes = index.as_bytes();
    if bytes.len() > 1 && bytes[0] == b'0' {
        return false;
    }
    bytes.iter().all(|&b| b.is_ascii_digit())
}

/// Parse a canonical array index, rejecting anything [`is_valid_index`] rejects.
pub fn parse_index(segment: &str) -> Option<usize> {
    if !is_valid_index(segment) {
        return None;
    }
    segment.parse().ok()
}

// ── Relations ─────────────────────────────────────────────────────────────

/// Split a path into its parent and last segment.
///
/// # Errors
///
/// Returns [`PathError::NoParent`] for the root.
pub fn split_last(path: &[String]) -> Result<(Path, PathStep), PathError> {
    match path.split_last() {
        Some((last, rest)) => Ok((rest.to_vec(), last.clone())),
        None => Err(PathError::NoParent),
    }
}

// ── Human-readable renderings ─────────────────────────────────────────────

/// Render a path as `a > b > c`; the root renders as an empty string.
pub fn display_path(path: &[String]) -> String {
    path.join(DISPLAY_SEPARATOR)
}

/// Breadcrumb labels for a path: `root` followed by every segment.
pub fn breadcrumbs(path: &[String]) -> Vec<String> {
    let mut crumbs = Vec::with_capacity(path.len() + 1);
    crumbs.push(ROOT_LABEL.to_string());
    crumbs.extend(path.iter().cloned());
    crumbs
}

/// The path selected by clicking breadcrumb `index` (0 is the root).
///
/// # Errors
///
/// Returns [`PathError::BreadcrumbOutOfRange`] when `index` is past the last
/// crumb.
pub fn breadcrumb_target(path: &[String], index: usize) -> Result<Path, PathError> {
    if index > path.len() {
        return Err(PathError::BreadcrumbOutOfRange { index, depth: path.len() });
    }
    Ok(path[..index].to_vec())
}
