//! Commands: an applied edit together with the edit that reverses it.

use serde::{Deserialize, Serialize};

use json_tree_path::Path;

use crate::edit::{apply, Edit, EditError};
use crate::node::Node;

/// A recorded, reversible user edit.
///
/// The inverse is derived once, when the command is recorded, from what the
/// forward edit actually replaced. Values inside are deep copies; nothing
/// here aliases the live document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Command {
    /// Path of the parent container both edits apply to.
    pub path: Path,
    pub forward: Edit,
    pub inverse: Edit,
    /// Child key navigation should focus after this command is undone or redone.
    pub focus_key: String,
}

impl Command {
    /// Apply `forward` at `path` and capture its inverse.
    ///
    /// # Errors
    ///
    /// Propagates the [`EditError`] of a rejected edit; the document is
    /// unchanged in that case.
    pub fn record(
        root: &mut Node,
        path: Path,
        forward: Edit,
        focus_key: impl Into<String>,
    ) -> Result<Self, EditError> {
        let inverse = apply(root, &path, &forward)?;
        Ok(Self { path, forward, inverse, focus_key: focus_key.into() })
    }

    pub fn undo_on(&self, root: &mut Node) -> Result<(), EditError> {
        apply(root, &self.path, &self.inverse).map(|_| ())
    }

    pub fn redo_on(&self, root: &mut Node) -> Result<(), EditError> {
        apply(root, &self.path, &self.forward).map(|_| ())
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    pub fn from_json(text: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn record_then_undo_then_redo() {
        let mut doc = Node::from(json!({"a": 1, "b": 2}));
        let original = doc.clone();
        let cmd = Command::record(&mut doc, vec![], Edit::RemoveKey { key: "a".into() }, "a").unwrap();
        let removed = doc.clone();
        assert_eq!(doc.to_string(), r#"{"b":2}"#);

        cmd.undo_on(&mut doc).unwrap();
        assert_eq!(doc.to_string(), original.to_string());

        cmd.redo_on(&mut doc).unwrap();
        assert_eq!(doc, removed);
    }

    #[test]
    fn rejected_edit_records_nothing() {
        let mut doc = Node::from(json!({"a": 1}));
        let err = Command::record(&mut doc, vec![], Edit::RemoveKey { key: "x".into() }, "x");
        assert!(err.is_err());
        assert_eq!(doc, Node::from(json!({"a": 1})));
    }

    #[test]
    fn json_roundtrip_for_replay() {
        let mut doc = Node::from(json!({"list": [1, 2]}));
        let cmd = Command::record(
            &mut doc,
            vec!["list".into()],
            Edit::InsertArrayElement { index: 1, value: Node::from("x") },
            "1",
        )
        .unwrap();
        let text = cmd.to_json().unwrap();
        let back = Command::from_json(&text).unwrap();
        assert_eq!(back, cmd);

        let mut replay = Node::from(json!({"list": [1, 2]}));
        back.redo_on(&mut replay).unwrap();
        assert_eq!(replay, doc);
    }
}
