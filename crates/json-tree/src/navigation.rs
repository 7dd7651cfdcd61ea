//! Navigation state: current path, the listing of its children, and the
//! selection inside that listing.
//!
//! The listing is a projection of the document. It is rebuilt from scratch
//! by [`Navigator::relist`] after every change and never patched.

use log::warn;

use json_tree_path::{breadcrumb_target, breadcrumbs, Path, PathError};

use crate::node::{Node, NodeKind};
use crate::resolve::{nearest_valid_ancestor, resolve};

/// Key of the synthetic entry that leads to the parent.
pub const UP_KEY: &str = "..";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    Up,
    Child(NodeKind),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    pub label: String,
    pub key: String,
    pub kind: EntryKind,
}

impl Entry {
    fn up() -> Self {
        Self { label: UP_KEY.to_string(), key: UP_KEY.to_string(), kind: EntryKind::Up }
    }

    fn child(key: String, node: &Node) -> Self {
        let kind = node.kind();
        let label = match kind {
            NodeKind::Object | NodeKind::Array => format!("{key} ({kind})"),
            _ => key.clone(),
        };
        Self { label, key, kind: EntryKind::Child(kind) }
    }

    pub fn is_up(&self) -> bool {
        self.kind == EntryKind::Up
    }
}

/// List the children of `node`, preceded by an up entry when `with_up`.
pub fn list_entries(node: &Node, with_up: bool) -> Vec<Entry> {
    let mut entries = Vec::with_capacity(node.len() + usize::from(with_up));
    if with_up {
        entries.push(Entry::up());
    }
    match node {
        Node::Object(map) => {
            entries.extend(map.iter().map(|(k, v)| Entry::child(k.clone(), v)));
        }
        Node::Array(items) => {
            entries.extend(items.iter().enumerate().map(|(i, v)| Entry::child(i.to_string(), v)));
        }
        Node::Null | Node::Bool(_) | Node::Number(_) | Node::String(_) => {}
    }
    entries
}

/// What [`Navigator::enter`] did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EnterOutcome {
    /// Moved into the selected container.
    Descended,
    /// Moved to the parent via the up entry.
    Ascended,
    /// The selection is a scalar; the caller should start editing this key.
    Leaf(String),
    /// Nothing selected.
    Nothing,
}

#[derive(Debug, Clone, Default)]
pub struct Navigator {
    current_path: Path,
    entries: Vec<Entry>,
    selected: usize,
}

impl Navigator {
    /// A navigator at the root of `root`, first entry selected.
    pub fn new(root: &Node) -> Self {
        let mut nav = Self::default();
        nav.relist(root);
        nav
    }

    pub fn current_path(&self) -> &Path {
        &self.current_path
    }

    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    /// Index of the selected entry. Always in range once entries exist.
    pub fn selected_index(&self) -> usize {
        self.selected
    }

    pub fn selected_entry(&self) -> Option<&Entry> {
        self.entries.get(self.selected)
    }

    /// Key of the selected child, or `None` for the up entry or no entries.
    pub fn selected_key(&self) -> Option<&str> {
        self.selected_entry().filter(|e| !e.is_up()).map(|e| e.key.as_str())
    }

    pub fn index_of_key(&self, key: &str) -> Option<usize> {
        self.entries.iter().position(|e| e.key == key)
    }

    pub fn breadcrumbs(&self) -> Vec<String> {
        breadcrumbs(&self.current_path)
    }

    /// Rebuild the listing from the document and clamp the selection.
    ///
    /// A current path that no longer leads to a container is pulled back to
    /// its nearest valid ancestor.
    pub fn relist(&mut self, root: &Node) {
        let node = match resolve(root, &self.current_path) {
            Ok(node) if node.is_container() || self.current_path.is_empty() => node,
            _ => {
                let clamped = nearest_valid_ancestor(root, &self.current_path);
                warn!("navigation path {:?} is stale, clamping to {:?}", self.current_path, clamped);
                self.current_path = clamped;
                resolve(root, &self.current_path).unwrap_or(root)
            }
        };
        self.entries = list_entries(node, !self.current_path.is_empty());
        self.clamp();
    }

    fn clamp(&mut self) {
        if self.entries.is_empty() {
            self.selected = 0;
        } else if self.selected >= self.entries.len() {
            self.selected = self.entries.len() - 1;
        }
    }

    /// Select by index, clamped into range.
    pub fn select(&mut self, index: usize) {
        self.selected = index;
        self.clamp();
    }

    /// Select the entry with `key`. Returns false and leaves the selection
    /// alone if there is none.
    pub fn select_key(&mut self, key: &str) -> bool {
        match self.index_of_key(key) {
            Some(index) => {
                self.selected = index;
                true
            }
            None => false,
        }
    }

    pub fn move_selection(&mut self, delta: isize) {
        let target = self.selected.saturating_add_signed(delta);
        self.select(target);
    }

    /// Act on the selected entry: descend, go up, or report a scalar leaf.
    pub fn enter(&mut self, root: &Node) -> EnterOutcome {
        let Some(entry) = self.selected_entry().cloned() else {
            return EnterOutcome::Nothing;
        };
        match entry.kind {
            EntryKind::Up => {
                self.current_path.pop();
                self.relist(root);
                self.selected = 0;
                EnterOutcome::Ascended
            }
            EntryKind::Child(kind) if kind.is_container() => {
                self.current_path.push(entry.key);
                self.relist(root);
                self.selected = 0;
                EnterOutcome::Descended
            }
            EntryKind::Child(_) => EnterOutcome::Leaf(entry.key),
        }
    }

    /// Move to `path` and focus `focus_key` there, or the first entry.
    pub fn go_to(&mut self, root: &Node, path: Path, focus_key: Option<&str>) {
        self.current_path = path;
        self.relist(root);
        self.selected = 0;
        if let Some(key) = focus_key {
            self.select_key(key);
        }
        self.clamp();
    }

    /// Jump to breadcrumb `index`, where 0 is the root.
    pub fn truncate_to(&mut self, root: &Node, index: usize) -> Result<(), PathError> {
        let target = breadcrumb_target(&self.current_path, index)?;
        self.go_to(root, target, None);
        Ok(())
    }
}
