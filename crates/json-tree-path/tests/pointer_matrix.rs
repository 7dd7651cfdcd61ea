use json_tree_path::{
    breadcrumb_target, breadcrumbs, display_path, format_pointer, parse_pointer, split_last,
    validate_pointer, PathError, ValidationError,
};

#[test]
fn pointer_parse_format_roundtrip_matrix() {
    let cases = ["", "/", "/config", "/config/servers/0", "/a~0b/c~1d", "/~0/~1"];

    for pointer in cases {
        assert!(validate_pointer(pointer).is_ok(), "{pointer:?} should validate");
        let path = parse_pointer(pointer);
        assert_eq!(format_pointer(&path), pointer, "roundtrip failed for {pointer:?}");
    }
}

#[test]
fn typed_pointers_are_validated_before_parsing() {
    assert_eq!(validate_pointer("servers/0"), Err(ValidationError::PointerInvalid));
    let long = format!("/{}", "k".repeat(2048));
    assert_eq!(validate_pointer(&long), Err(ValidationError::PointerTooLong));
}

#[test]
fn hit_paths_split_into_container_and_focus() {
    let hit = parse_pointer("/servers/0/host");
    let (container, key) = split_last(&hit).unwrap();
    assert_eq!(format_pointer(&container), "/servers/0");
    assert_eq!(key, "host");
    assert_eq!(display_path(&hit), "servers > 0 > host");
    assert_eq!(split_last(&parse_pointer("")), Err(PathError::NoParent));
}

#[test]
fn breadcrumbs_start_at_root() {
    let path = parse_pointer("/a/b");
    assert_eq!(breadcrumbs(&[]), vec!["root".to_string()]);
    assert_eq!(breadcrumbs(&path), vec!["root".to_string(), "a".to_string(), "b".to_string()]);
    assert_eq!(breadcrumb_target(&path, 1).unwrap(), parse_pointer("/a"));
    assert_eq!(
        breadcrumb_target(&path, 4),
        Err(PathError::BreadcrumbOutOfRange { index: 4, depth: 2 })
    );
}
