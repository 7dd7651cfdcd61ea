//! An edit session: the narrow command/query API a presentation layer drives.
//!
//! A [`Session`] owns the document for the duration of the edit, plus the
//! history, the navigation state and the last user-visible hint. Every user
//! edit validates input, records a [`Command`], relists and moves the
//! selection onto the edited item. Failures come back as [`EditError`]
//! values and are also kept as hint text; nothing panics across this API.

use json_tree_path::{parse_index, Path, PathError};

use crate::command::Command;
use crate::document::{clean_input, parse_literal, Document};
use crate::edit::{Edit, EditError};
use crate::history::History;
use crate::navigation::{EnterOutcome, Entry, Navigator};
use crate::node::{Node, NodeKind};
use crate::resolve::resolve;
use crate::search::{search_in, SearchHit, SearchScope};

#[derive(Debug, Clone, Default)]
pub struct SessionOptions {
    /// Maximum undo depth; unlimited when `None`.
    pub history_limit: Option<usize>,
    /// Scope used by [`Session::search_default`].
    pub search_scope: SearchScope,
}

/// What the detail pane should show for the current selection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum View {
    Placeholder(String),
    /// A scalar, as an editable single-line literal.
    Editable(String),
    /// A container, pretty-printed read-only.
    Viewer(String),
}

pub struct Session {
    document: Document,
    history: History,
    nav: Navigator,
    hint: Option<String>,
    options: SessionOptions,
}

impl Session {
    pub fn new(document: Document) -> Self {
        Self::with_options(document, SessionOptions::default())
    }

    pub fn with_options(document: Document, options: SessionOptions) -> Self {
        let history = match options.history_limit {
            Some(limit) => History::with_limit(limit),
            None => History::new(),
        };
        let nav = Navigator::new(document.root());
        Self { document, history, nav, hint: None, options }
    }

    // ── Queries ───────────────────────────────────────────────────────────

    pub fn document(&self) -> &Document {
        &self.document
    }

    /// End the session and hand the document back for saving.
    pub fn into_document(self) -> Document {
        self.document
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn options(&self) -> &SessionOptions {
        &self.options
    }

    pub fn current_path(&self) -> &Path {
        self.nav.current_path()
    }

    pub fn entries(&self) -> &[Entry] {
        self.nav.entries()
    }

    pub fn selected_index(&self) -> usize {
        self.nav.selected_index()
    }

    pub fn selected_key(&self) -> Option<&str> {
        self.nav.selected_key()
    }

    pub fn breadcrumbs(&self) -> Vec<String> {
        self.nav.breadcrumbs()
    }

    pub fn hint(&self) -> Option<&str> {
        self.hint.as_deref()
    }

    fn selected_node(&self) -> Option<&Node> {
        let key = self.nav.selected_key()?;
        resolve(self.document.root(), self.nav.current_path()).ok()?.child(key)
    }

    /// Detail view of the selected entry.
    pub fn view(&self) -> View {
        match self.selected_node() {
            None if self.nav.entries().is_empty() => {
                View::Placeholder("Select an item from the left.".to_string())
            }
            None => View::Placeholder("Select an item to view/edit.".to_string()),
            Some(node) if node.is_container() => {
                match Document::from(node.clone()).to_pretty_string() {
                    Ok(text) => View::Viewer(text),
                    Err(e) => View::Viewer(format!("Error reading JSON value: {e}")),
                }
            }
            Some(node) => View::Editable(node.to_compact_string()),
        }
    }

    // ── Navigation ────────────────────────────────────────────────────────

    pub fn select(&mut self, index: usize) {
        self.hint = None;
        self.nav.select(index);
    }

    pub fn select_key(&mut self, key: &str) -> bool {
        self.hint = None;
        self.nav.select_key(key)
    }

    pub fn move_selection(&mut self, delta: isize) {
        self.hint = None;
        self.nav.move_selection(delta);
    }

    pub fn enter(&mut self) -> EnterOutcome {
        self.hint = None;
        self.nav.enter(self.document.root())
    }

    /// Move to `path`, focusing `focus_key` if given and present.
    pub fn go_to(&mut self, path: Path, focus_key: Option<&str>) {
        self.hint = None;
        self.nav.go_to(self.document.root(), path, focus_key);
    }

    pub fn jump_to_breadcrumb(&mut self, index: usize) -> Result<(), PathError> {
        self.hint = None;
        self.nav.truncate_to(self.document.root(), index)
    }

    // ── Edits ─────────────────────────────────────────────────────────────

    fn fail<T>(&mut self, err: EditError) -> Result<T, EditError> {
        self.hint = Some(format!("Error: {err}"));
        Err(err)
    }

    fn report<T>(&mut self, result: Result<T, EditError>) -> Result<T, EditError> {
        match result {
            Ok(v) => {
                self.hint = None;
                Ok(v)
            }
            Err(e) => self.fail(e),
        }
    }

    /// Record `edit` at the current path, relist and focus `focus_key`.
    fn commit(&mut self, edit: Edit, focus_key: String) -> Result<(), EditError> {
        let path = self.nav.current_path().clone();
        let command = Command::record(self.document.root_mut(), path, edit, focus_key)?;
        self.history.push(command);
        self.nav.relist(self.document.root());
        Ok(())
    }

    /// Parse `text` as a literal and store it in the selected child.
    ///
    /// Setting a value identical to the current one, key order included,
    /// records nothing.
    pub fn edit_selected(&mut self, text: &str) -> Result<(), EditError> {
        let result = self.edit_selected_inner(text);
        self.report(result)
    }

    fn edit_selected_inner(&mut self, text: &str) -> Result<(), EditError> {
        let key = self.nav.selected_key().ok_or(EditError::NothingSelected)?.to_string();
        let value = parse_literal(text);
        if self.selected_node().is_some_and(|current| current.same_as(&value)) {
            return Ok(());
        }
        self.commit(Edit::SetValue { key: key.clone(), value }, key.clone())?;
        self.nav.select_key(&key);
        Ok(())
    }

    /// Add to the current container.
    ///
    /// On an object `text` is the new key, bound to `null`; on an array it is
    /// a literal appended at the end.
    pub fn add_entry(&mut self, text: &str) -> Result<(), EditError> {
        let result = self.add_entry_inner(text);
        self.report(result)
    }

    fn add_entry_inner(&mut self, text: &str) -> Result<(), EditError> {
        let node = resolve(self.document.root(), self.nav.current_path())?;
        let (kind, len) = (node.kind(), node.len());
        match kind {
            NodeKind::Object => {
                let key = clean_input(text);
                if key.is_empty() {
                    return Err(EditError::EmptyKey);
                }
                self.commit(Edit::AddKey { key: key.clone(), value: Node::Null }, key.clone())?;
                self.nav.select_key(&key);
            }
            NodeKind::Array => {
                let value = parse_literal(text);
                self.commit(Edit::AddArrayElement { value }, len.to_string())?;
                self.nav.select_key(&len.to_string());
            }
            _ => return Err(EditError::NotAContainer { kind }),
        }
        Ok(())
    }

    /// Delete the selected child. Focus moves to the entry before it.
    pub fn delete_selected(&mut self) -> Result<(), EditError> {
        let result = self.delete_selected_inner();
        self.report(result)
    }

    fn delete_selected_inner(&mut self) -> Result<(), EditError> {
        let key = self.nav.selected_key().ok_or(EditError::CannotDelete)?.to_string();
        let previous = self.nav.selected_index().saturating_sub(1);
        let kind = resolve(self.document.root(), self.nav.current_path())?.kind();
        let (edit, focus_key) = match kind {
            NodeKind::Object => (Edit::RemoveKey { key: key.clone() }, key),
            NodeKind::Array => {
                let index = parse_index(&key).ok_or(EditError::InvalidIndex { segment: key })?;
                (Edit::RemoveArrayElement { index }, index.saturating_sub(1).to_string())
            }
            _ => return Err(EditError::CannotDelete),
        };
        self.commit(edit, focus_key)?;
        self.nav.select(previous);
        Ok(())
    }

    /// Rename the selected object member in place.
    pub fn rename_selected(&mut self, new_key: &str) -> Result<(), EditError> {
        let result = self.rename_selected_inner(new_key);
        self.report(result)
    }

    fn rename_selected_inner(&mut self, new_key: &str) -> Result<(), EditError> {
        if resolve(self.document.root(), self.nav.current_path())?.kind() != NodeKind::Object {
            return Err(EditError::CannotRename);
        }
        let current = self.nav.selected_key().ok_or(EditError::CannotRename)?.to_string();
        let new_key = clean_input(new_key);
        if new_key.is_empty() {
            return Err(EditError::EmptyKey);
        }
        if new_key == current {
            return Ok(());
        }
        self.commit(Edit::RenameKey { from: current, to: new_key.clone() }, new_key.clone())?;
        self.nav.select_key(&new_key);
        Ok(())
    }

    // ── History ───────────────────────────────────────────────────────────

    /// Undo the last edit and restore navigation to where it happened.
    ///
    /// Returns `Ok(false)` if there was nothing to undo.
    pub fn undo(&mut self) -> Result<bool, EditError> {
        let result = match self.history.undo(self.document.root_mut()) {
            Ok(Some(command)) => Ok(Some((command.path.clone(), command.focus_key.clone()))),
            Ok(None) => Ok(None),
            Err(e) => Err(e),
        };
        self.restore(result)
    }

    /// Redo the last undone edit and restore navigation to where it happened.
    pub fn redo(&mut self) -> Result<bool, EditError> {
        let result = match self.history.redo(self.document.root_mut()) {
            Ok(Some(command)) => Ok(Some((command.path.clone(), command.focus_key.clone()))),
            Ok(None) => Ok(None),
            Err(e) => Err(e),
        };
        self.restore(result)
    }

    fn restore(
        &mut self,
        result: Result<Option<(Path, String)>, EditError>,
    ) -> Result<bool, EditError> {
        match self.report(result)? {
            Some((path, focus_key)) => {
                self.nav.go_to(self.document.root(), path, Some(&focus_key));
                Ok(true)
            }
            None => Ok(false),
        }
    }

    // ── Search ────────────────────────────────────────────────────────────

    /// Search keys and string values from the root or the current path.
    pub fn search(&mut self, query: &str, scope: SearchScope) -> Result<Vec<SearchHit>, EditError> {
        let result = search_in(self.document.root(), query, scope, self.nav.current_path())
            .map_err(EditError::from);
        self.report(result)
    }

    /// Search with the session's configured default scope.
    pub fn search_default(&mut self, query: &str) -> Result<Vec<SearchHit>, EditError> {
        let scope = self.options.search_scope;
        self.search(query, scope)
    }

    /// Navigate to a search hit's container and focus the hit.
    pub fn open_hit(&mut self, hit: &SearchHit) {
        let (parent, key) = hit.split();
        self.go_to(parent, Some(&key));
    }
}
