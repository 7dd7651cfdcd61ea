use std::fs;
use std::io::Cursor;

use json_tree::{Document, Session};
use json_tree_shell::{load_document, save_document, Config, Exit, Shell};

fn run_script(json: &str, script: &str) -> (Exit, String, Shell) {
    let doc = Document::parse(json).unwrap();
    let mut shell = Shell::new(Session::new(doc));
    let mut out = Vec::new();
    let exit = shell.run(Cursor::new(script), &mut out).unwrap();
    (exit, String::from_utf8(out).unwrap(), shell)
}

fn root_text(shell: &Shell) -> String {
    shell.session().document().root().to_string()
}

#[test]
fn initial_listing_marks_selection() {
    let (exit, out, _) = run_script(r#"{"a": 1, "b": {}}"#, "");
    assert_eq!(exit, Exit::Save);
    assert_eq!(out, "root\n*   0 a\n    1 b (Object)\n");
}

#[test]
fn navigate_and_edit() {
    let script = "cd b\nadd name\nset Alice\ncd ..\nsel a\nset [1, 2]\nquit\nset 99\n";
    let (exit, _, shell) = run_script(r#"{"a": 1, "b": {}}"#, script);
    assert_eq!(exit, Exit::Save);
    assert_eq!(root_text(&shell), r#"{"a":[1,2],"b":{"name":"Alice"}}"#);
}

#[test]
fn errors_are_reported_not_fatal() {
    let script = "mv c\nbogus\ncd a\nadd\n";
    let (_, out, shell) = run_script(r#"{"a": 1, "c": 2}"#, script);
    assert!(out.contains("Error: This key is already in use."));
    assert!(out.contains("Unknown command \"bogus\""));
    assert!(out.contains("\"a\" is not an Object or Array."));
    assert!(out.contains("Error: Key cannot be empty."));
    assert_eq!(root_text(&shell), r#"{"a":1,"c":2}"#);
}

#[test]
fn undo_redo_through_shell() {
    let script = "rm\nundo\nundo\nredo\n";
    let (_, out, shell) = run_script(r#"{"a": 1, "b": 2}"#, script);
    assert!(out.contains("Nothing to undo."));
    assert_eq!(root_text(&shell), r#"{"b":2}"#);
}

#[test]
fn find_and_open() {
    let script = "find li\nopen 0\nview\nopen 7\n";
    let (_, out, shell) = run_script(r#"{"name": "Alice", "tags": ["red", "blue"]}"#, script);
    assert!(out.contains("[0] Val: Alice (Path: name)"));
    assert!(out.contains("\"Alice\"\n"));
    assert!(out.contains("No search result 7."));
    assert_eq!(shell.session().selected_key(), Some("name"));
}

#[test]
fn abort_discards() {
    let (exit, _, _) = run_script(r#"[1]"#, "add 2\nabort\n");
    assert_eq!(exit, Exit::Discard);
}

#[test]
fn pwd_shows_breadcrumbs_and_pointer() {
    let (_, out, _) = run_script(r#"{"a/b": {"c": []}}"#, "cd a/b\ncd c\npwd\n");
    assert!(out.contains("root > a/b > c (/a~1b/c)"));
}

#[test]
fn cd_pointer_jumps_anywhere() {
    let json = r#"{"a": {"x": 1}, "b": {"c": [10, {"d": true}], "e": "s"}}"#;
    let (_, out, shell) = run_script(json, "cd a\ncd /b/c/1\npwd\n");
    assert!(out.contains("root > b > c > 1 (/b/c/1)"));
    let expected: Vec<String> = vec!["b".into(), "c".into(), "1".into()];
    assert_eq!(shell.session().current_path(), &expected);

    let (_, _, shell) = run_script(json, "cd /b/e\n");
    assert_eq!(shell.session().current_path(), &vec!["b".to_string()]);
    assert_eq!(shell.session().selected_key(), Some("e"));

    let (_, out, shell) = run_script(json, "cd a\ncd /b/missing\ncd /b/c/9\n");
    assert!(out.contains("No such path: NOT_FOUND: no key \"missing\""));
    assert!(out.contains("No such path: NOT_FOUND: index 9"));
    assert_eq!(shell.session().current_path(), &vec!["a".to_string()]);
}

// ── Files ─────────────────────────────────────────────────────────────────

#[test]
fn load_edit_save_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("doc.json");
    fs::write(&path, r#"{"z": 1, "a": [true]}"#).unwrap();

    let doc = load_document(&path).unwrap();
    let mut shell = Shell::new(Session::new(doc));
    let exit = shell.run(Cursor::new("set 2\nquit\n"), &mut Vec::new()).unwrap();
    assert_eq!(exit, Exit::Save);

    let doc = shell.into_session().into_document();
    save_document(&path, &doc, 2).unwrap();
    let saved = fs::read_to_string(&path).unwrap();
    assert_eq!(saved, "{\n  \"z\": 2,\n  \"a\": [\n    true\n  ]\n}\n");
}

#[test]
fn configured_indent_is_used() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("doc.json");
    let config = Config::parse("indent = 4").unwrap();
    let doc = Document::parse(r#"{"k": null}"#).unwrap();
    save_document(&path, &doc, config.indent).unwrap();
    assert_eq!(fs::read_to_string(&path).unwrap(), "{\n    \"k\": null\n}\n");
}

#[test]
fn unreadable_or_invalid_file_fails() {
    let dir = tempfile::tempdir().unwrap();
    assert!(load_document(&dir.path().join("missing.json")).is_err());

    let bad = dir.path().join("bad.json");
    fs::write(&bad, "{ not json").unwrap();
    let err = load_document(&bad).unwrap_err();
    assert!(format!("{err:#}").contains("failed to parse"));
}
