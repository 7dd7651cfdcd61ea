//! Structured JSON document edit engine.
//!
//! A mutable, key-order preserving JSON tree addressed by string paths,
//! changed only through a fixed set of reversible edits, with a linear
//! undo/redo history and recursive substring search. [`Session`] ties these
//! together behind the command/query API a presentation layer drives.
//!
//! # Example
//!
//! ```
//! use json_tree::{Document, Session};
//!
//! let doc = Document::parse(r#"{"a": 1, "c": 2}"#).unwrap();
//! let mut session = Session::new(doc);
//!
//! session.rename_selected("b").unwrap();
//! assert_eq!(session.document().root().to_string(), r#"{"b":1,"c":2}"#);
//!
//! session.undo().unwrap();
//! assert_eq!(session.document().root().to_string(), r#"{"a":1,"c":2}"#);
//! ```

pub mod command;
pub mod document;
pub mod edit;
pub mod history;
pub mod navigation;
pub mod node;
pub mod resolve;
pub mod search;
pub mod session;

pub use command::Command;
pub use document::{
    clean_input, parse_literal, Document, LoadError, LoadErrorKind, SaveError, DEFAULT_INDENT,
};
pub use edit::{
    add_array_element, add_key, apply, insert_array_element, remove_array_element, remove_key,
    remove_last_array_element, rename_key, set_value, Edit, EditError,
};
pub use history::History;
pub use navigation::{list_entries, EnterOutcome, Entry, EntryKind, Navigator, UP_KEY};
pub use node::{Node, NodeKind, ObjectMap};
pub use resolve::{nearest_valid_ancestor, resolve, resolve_mut, resolve_or_root, ResolveError};
pub use search::{search, search_in, HitKind, SearchHit, SearchScope};
pub use session::{Session, SessionOptions, View};

pub use json_tree_path::{Path, PathStep};
