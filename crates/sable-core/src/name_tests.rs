use crate::{Name, Namespace, NodeIdGen};

#[test]
fn node_ids_are_monotonic() {
    let mut ids = NodeIdGen::new();

    let a = ids.fresh();
    let b = ids.fresh();

    assert!(a < b);
    assert_eq!(ids.allocated(), 2);
    assert_eq!(NodeIdGen::starting_at(10).fresh().as_u32(), 10);
}

#[test]
fn namespace_display_joins_segments() {
    let ns = Namespace::new(["Data", "List"]);

    insta::assert_snapshot!(ns.to_string(), @"Data::List");
    insta::assert_snapshot!(Namespace::empty().to_string(), @"");
}

#[test]
fn namespace_parse_matches_new() {
    assert_eq!(Namespace::parse("Data::List"), Namespace::new(["Data", "List"]));
    assert_eq!(Namespace::parse(""), Namespace::empty());
    assert!(Namespace::parse("").is_empty());
}

#[test]
fn namespace_order_matters() {
    assert_ne!(Namespace::new(["A", "B"]), Namespace::new(["B", "A"]));
}

#[test]
fn child_and_parent() {
    let root = Namespace::from("Main");
    let scope = root.child("#0").child("#1");

    assert_eq!(scope.len(), 3);
    assert!(scope.starts_with(&root));
    assert!(!root.starts_with(&scope));
    assert_eq!(scope.parent(), Some(root.child("#0")));
    assert_eq!(Namespace::empty().parent(), None);
}

#[test]
fn name_display() {
    let qualified = Namespace::from("Data::List").name("map");
    let bare = Name::unqualified("x");

    insta::assert_snapshot!(qualified.to_string(), @"Data::List::map");
    insta::assert_snapshot!(bare.to_string(), @"x");
    assert!(qualified.is_qualified());
    assert!(!bare.is_qualified());
}
