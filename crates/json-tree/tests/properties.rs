//! Property tests over generated documents.

use json_tree::{Command, Document, Edit, History, Node, ObjectMap};
use proptest::prelude::*;

fn node_strategy() -> impl Strategy<Value = Node> {
    let leaf = prop_oneof![
        Just(Node::Null),
        any::<bool>().prop_map(Node::Bool),
        any::<i64>().prop_map(Node::from),
        "[a-z ]{0,6}".prop_map(Node::from),
    ];
    leaf.prop_recursive(3, 32, 4, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..4).prop_map(Node::Array),
            prop::collection::vec(("[a-z]{1,3}", inner), 0..4)
                .prop_map(|entries| Node::Object(entries.into_iter().collect::<ObjectMap>())),
        ]
    })
}

fn object_strategy() -> impl Strategy<Value = Node> {
    prop::collection::vec(("[a-z]{1,3}", node_strategy()), 1..5)
        .prop_map(|entries| Node::Object(entries.into_iter().collect::<ObjectMap>()))
}

fn array_strategy() -> impl Strategy<Value = Node> {
    prop::collection::vec(node_strategy(), 1..5).prop_map(Node::Array)
}

/// Build a valid edit for `root` from the generated choices.
fn pick_edit(root: &Node, op: u8, pick: usize, value: Node) -> Edit {
    match root {
        Node::Object(map) => {
            let key = map.get_index(pick % map.len()).map(|(k, _)| k.clone()).unwrap_or_default();
            match op % 4 {
                0 => Edit::SetValue { key, value },
                1 => Edit::AddKey { key: "fresh".to_string(), value },
                2 => Edit::RemoveKey { key },
                _ => Edit::RenameKey { from: key, to: "renamed".to_string() },
            }
        }
        Node::Array(items) => {
            let index = pick % items.len();
            match op % 5 {
                0 => Edit::SetValue { key: index.to_string(), value },
                1 => Edit::AddArrayElement { value },
                2 => Edit::RemoveLastArrayElement,
                3 => Edit::InsertArrayElement { index, value },
                _ => Edit::RemoveArrayElement { index },
            }
        }
        _ => Edit::AddArrayElement { value },
    }
}

fn container_strategy() -> impl Strategy<Value = Node> {
    prop_oneof![object_strategy(), array_strategy()]
}

proptest! {
    #![proptest_config(ProptestConfig { cases: 128, .. ProptestConfig::default() })]

    #[test]
    fn serialize_then_parse_round_trips(node in node_strategy()) {
        let text = Document::from(node.clone()).to_pretty_string().unwrap();
        let parsed = Document::parse(&text).unwrap();
        prop_assert_eq!(parsed.root(), &node);
        prop_assert_eq!(parsed.root().to_string(), node.to_string());
    }

    #[test]
    fn undo_restores_exact_document(
        root in container_strategy(),
        op in any::<u8>(),
        pick in any::<usize>(),
        value in node_strategy(),
    ) {
        let mut doc = root.clone();
        let edit = pick_edit(&doc, op, pick, value);
        // Keys generated above are at most three letters, so "fresh" and
        // "renamed" never collide.
        let command = Command::record(&mut doc, vec![], edit, "").unwrap();
        let after = doc.to_string();

        let mut history = History::new();
        history.push(command);
        history.undo(&mut doc).unwrap();
        prop_assert_eq!(doc.to_string(), root.to_string());

        history.redo(&mut doc).unwrap();
        prop_assert_eq!(doc.to_string(), after);
    }

    #[test]
    fn new_edit_clears_redo(root in object_strategy(), a in node_strategy(), b in node_strategy()) {
        let mut doc = root;
        let mut history = History::new();

        let first = Command::record(&mut doc, vec![], Edit::AddKey { key: "first".into(), value: a }, "first").unwrap();
        history.push(first);
        history.undo(&mut doc).unwrap();

        let second = Command::record(&mut doc, vec![], Edit::AddKey { key: "second".into(), value: b }, "second").unwrap();
        history.push(second);
        let before_redo = doc.to_string();

        prop_assert!(history.redo(&mut doc).unwrap().is_none());
        prop_assert_eq!(doc.to_string(), before_redo);
        prop_assert!(doc.child("first").is_none());
    }
}
