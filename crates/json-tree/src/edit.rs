//! The document mutator: reversible edits on a resolved parent node.
//!
//! Every edit is addressed by the path of the parent container plus the key
//! or index acted on. [`apply`] validates the edit against the parent's
//! current kind, applies it atomically and returns the [`Edit`] that undoes
//! it. On failure nothing is mutated.
//!
//! Object edits keep key order stable: renames happen in place and a removed
//! key's inverse puts it back at its old position.

use log::debug;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use json_tree_path::{format_pointer, parse_index};

use crate::node::{Node, NodeKind};
use crate::resolve::{resolve_mut, ResolveError};

// ── Error ─────────────────────────────────────────────────────────────────

/// Why an edit was rejected. The display text is meant for the user.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum EditError {
    #[error("Path no longer exists ({0}).")]
    PathNotFound(#[from] ResolveError),
    #[error("Can only add to Objects or Arrays.")]
    NotAContainer { kind: NodeKind },
    #[error("Expected an Object, found {kind}.")]
    NotAnObject { kind: NodeKind },
    #[error("Expected an Array, found {kind}.")]
    NotAnArray { kind: NodeKind },
    #[error("Key {key:?} does not exist.")]
    KeyNotFound { key: String },
    #[error("This key is already in use.")]
    KeyInUse { key: String },
    #[error("Key cannot be empty.")]
    EmptyKey,
    #[error("{segment:?} is not an array index.")]
    InvalidIndex { segment: String },
    #[error("Index {index} is out of range for length {len}.")]
    IndexOutOfRange { index: usize, len: usize },
    #[error("Array is empty.")]
    EmptyArray,
    #[error("Cannot delete this item.")]
    CannotDelete,
    #[error("Cannot rename this item.")]
    CannotRename,
    #[error("Nothing is selected.")]
    NothingSelected,
}

// ── Edit ──────────────────────────────────────────────────────────────────

/// A single reversible change to a parent container.
///
/// Plain data: edits can be logged, persisted and replayed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum Edit {
    /// Overwrite an existing object member or array element.
    SetValue { key: String, value: Node },
    /// Insert a member at the end of an object; overwrites in place if present.
    AddKey { key: String, value: Node },
    /// Insert a new member at a given position. Produced as the inverse of
    /// [`Edit::RemoveKey`].
    InsertKey { index: usize, key: String, value: Node },
    RemoveKey { key: String },
    AddArrayElement { value: Node },
    RemoveLastArrayElement,
    InsertArrayElement { index: usize, value: Node },
    RemoveArrayElement { index: usize },
    /// Rebind a member under a new key, keeping its position.
    RenameKey { from: String, to: String },
}

impl Edit {
    pub fn op_name(&self) -> &'static str {
        match self {
            Edit::SetValue { .. } => "set_value",
            Edit::AddKey { .. } => "add_key",
            Edit::InsertKey { .. } => "insert_key",
            Edit::RemoveKey { .. } => "remove_key",
            Edit::AddArrayElement { .. } => "add_array_element",
            Edit::RemoveLastArrayElement => "remove_last_array_element",
            Edit::InsertArrayElement { .. } => "insert_array_element",
            Edit::RemoveArrayElement { .. } => "remove_array_element",
            Edit::RenameKey { .. } => "rename_key",
        }
    }
}

// ── Primitive applicators ─────────────────────────────────────────────────

fn object_mut(parent: &mut Node) -> Result<&mut crate::node::ObjectMap, EditError> {
    match parent {
        Node::Object(map) => Ok(map),
        other => Err(EditError::NotAnObject { kind: other.kind() }),
    }
}

fn array_mut(parent: &mut Node) -> Result<&mut Vec<Node>, EditError> {
    match parent {
        Node::Array(items) => Ok(items),
        other => Err(EditError::NotAnArray { kind: other.kind() }),
    }
}

fn apply_set_value(parent: &mut Node, key: &str, value: Node) -> Result<Edit, EditError> {
    let slot = match parent {
        Node::Object(map) => map
            .get_mut(key)
            .ok_or_else(|| EditError::KeyNotFound { key: key.to_string() })?,
        Node::Array(items) => {
            let index = parse_index(key)
                .ok_or_else(|| EditError::InvalidIndex { segment: key.to_string() })?;
            let len = items.len();
            items.get_mut(index).ok_or(EditError::IndexOutOfRange { index, len })?
        }
        other => return Err(EditError::NotAContainer { kind: other.kind() }),
    };
    let old = std::mem::replace(slot, value);
    Ok(Edit::SetValue { key: key.to_string(), value: old })
}

fn apply_add_key(parent: &mut Node, key: &str, value: Node) -> Result<Edit, EditError> {
    let map = object_mut(parent)?;
    Ok(match map.insert(key.to_string(), value) {
        Some(old) => Edit::SetValue { key: key.to_string(), value: old },
        None => Edit::RemoveKey { key: key.to_string() },
    })
}

fn apply_insert_key(parent: &mut Node, index: usize, key: &str, value: Node) -> Result<Edit, EditError> {
    let map = object_mut(parent)?;
    if map.contains_key(key) {
        return Err(EditError::KeyInUse { key: key.to_string() });
    }
    if index > map.len() {
        return Err(EditError::IndexOutOfRange { index, len: map.len() });
    }
    map.shift_insert(index, key.to_string(), value);
    Ok(Edit::RemoveKey { key: key.to_string() })
}

fn apply_remove_key(parent: &mut Node, key: &str) -> Result<Edit, EditError> {
    let map = object_mut(parent)?;
    let (index, key, value) = map
        .shift_remove_full(key)
        .ok_or_else(|| EditError::KeyNotFound { key: key.to_string() })?;
    Ok(Edit::InsertKey { index, key, value })
}

fn apply_add_array_element(parent: &mut Node, value: Node) -> Result<Edit, EditError> {
    array_mut(parent)?.push(value);
    Ok(Edit::RemoveLastArrayElement)
}

fn apply_remove_last_array_element(parent: &mut Node) -> Result<Edit, EditError> {
    let value = array_mut(parent)?.pop().ok_or(EditError::EmptyArray)?;
    Ok(Edit::AddArrayElement { value })
}

fn apply_insert_array_element(parent: &mut Node, index: usize, value: Node) -> Result<Edit, EditError> {
    let items = array_mut(parent)?;
    if index > items.len() {
        return Err(EditError::IndexOutOfRange { index, len: items.len() });
    }
    items.insert(index, value);
    Ok(Edit::RemoveArrayElement { index })
}

fn apply_remove_array_element(parent: &mut Node, index: usize) -> Result<Edit, EditError> {
    let items = array_mut(parent)?;
    if index >= items.len() {
        return Err(EditError::IndexOutOfRange { index, len: items.len() });
    }
    let value = items.remove(index);
    Ok(Edit::InsertArrayElement { index, value })
}

fn apply_rename_key(parent: &mut Node, from: &str, to: &str) -> Result<Edit, EditError> {
    let map = object_mut(parent)?;
    let Some(index) = map.get_index_of(from) else {
        return Err(EditError::KeyNotFound { key: from.to_string() });
    };
    if from != to {
        if map.contains_key(to) {
            return Err(EditError::KeyInUse { key: to.to_string() });
        }
        if let Some(value) = map.shift_remove(from) {
            map.shift_insert(index, to.to_string(), value);
        }
    }
    Ok(Edit::RenameKey { from: to.to_string(), to: from.to_string() })
}

// ── Main apply function ───────────────────────────────────────────────────

/// Apply `edit` to the container at `parent_path` and return its inverse.
///
/// # Errors
///
/// - [`EditError::PathNotFound`] if `parent_path` does not resolve
/// - a kind, key or index error if the edit does not fit the parent
///
/// The document is untouched whenever an error is returned.
pub fn apply(root: &mut Node, parent_path: &[String], edit: &Edit) -> Result<Edit, EditError> {
    let parent = resolve_mut(root, parent_path)?;
    let inverse = match edit {
        Edit::SetValue { key, value } => apply_set_value(parent, key, value.clone()),
        Edit::AddKey { key, value } => apply_add_key(parent, key, value.clone()),
        Edit::InsertKey { index, key, value } => apply_insert_key(parent, *index, key, value.clone()),
        Edit::RemoveKey { key } => apply_remove_key(parent, key),
        Edit::AddArrayElement { value } => apply_add_array_element(parent, value.clone()),
        Edit::RemoveLastArrayElement => apply_remove_last_array_element(parent),
        Edit::InsertArrayElement { index, value } => {
            apply_insert_array_element(parent, *index, value.clone())
        }
        Edit::RemoveArrayElement { index } => apply_remove_array_element(parent, *index),
        Edit::RenameKey { from, to } => apply_rename_key(parent, from, to),
    }?;
    debug!("applied {} at {:?}", edit.op_name(), format_pointer(parent_path));
    Ok(inverse)
}

// ── Named primitives ──────────────────────────────────────────────────────

/// Overwrite an existing child. Fails if the key or index is absent.
pub fn set_value(root: &mut Node, parent: &[String], key: &str, value: Node) -> Result<Edit, EditError> {
    apply(root, parent, &Edit::SetValue { key: key.to_string(), value })
}

/// Add `key` at the end of an object, or overwrite it in place if present.
pub fn add_key(root: &mut Node, parent: &[String], key: &str, value: Node) -> Result<Edit, EditError> {
    apply(root, parent, &Edit::AddKey { key: key.to_string(), value })
}

pub fn remove_key(root: &mut Node, parent: &[String], key: &str) -> Result<Edit, EditError> {
    apply(root, parent, &Edit::RemoveKey { key: key.to_string() })
}

pub fn add_array_element(root: &mut Node, parent: &[String], value: Node) -> Result<Edit, EditError> {
    apply(root, parent, &Edit::AddArrayElement { value })
}

/// Pop the tail element. An empty array is rejected with [`EditError::EmptyArray`].
pub fn remove_last_array_element(root: &mut Node, parent: &[String]) -> Result<Edit, EditError> {
    apply(root, parent, &Edit::RemoveLastArrayElement)
}

/// Insert at `index`, which must satisfy `index <= len`.
pub fn insert_array_element(
    root: &mut Node,
    parent: &[String],
    index: usize,
    value: Node,
) -> Result<Edit, EditError> {
    apply(root, parent, &Edit::InsertArrayElement { index, value })
}

/// Remove at `index`, which must satisfy `index < len`.
pub fn remove_array_element(root: &mut Node, parent: &[String], index: usize) -> Result<Edit, EditError> {
    apply(root, parent, &Edit::RemoveArrayElement { index })
}

/// Rename `from` to `to` in place. A different existing `to` is rejected.
pub fn rename_key(root: &mut Node, parent: &[String], from: &str, to: &str) -> Result<Edit, EditError> {
    apply(root, parent, &Edit::RenameKey { from: from.to_string(), to: to.to_string() })
}

// ── Tests ─────────────────────────────────────────────────────────────────
