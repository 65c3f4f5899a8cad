use sable_core::{Name, Namespace};

use super::scope::Bindings;

fn ns(path: &str) -> Namespace {
    Namespace::parse(path)
}

#[test]
fn each_binder_gets_a_fresh_scope() {
    let mut bindings = Bindings::new();
    let module = ns("Main");

    let x = bindings.bind(&module, "x");
    let y = bindings.bind(&x.namespace, "y");

    insta::assert_snapshot!(x.to_string(), @"Main::#0::x");
    insta::assert_snapshot!(y.to_string(), @"Main::#0::#1::y");
    assert_eq!(bindings.scopes(), 2);
}

#[test]
fn innermost_binder_wins() {
    let mut bindings = Bindings::new();
    let module = ns("Main");
    let outer = bindings.bind(&module, "x");
    let inner = bindings.bind(&outer.namespace, "x");

    assert_eq!(bindings.lookup(&inner.namespace, &module, "x"), Some(inner.clone()));
    assert_eq!(bindings.lookup(&outer.namespace, &module, "x"), Some(outer));
    assert_eq!(bindings.lookup(&module, &module, "x"), None);
}

#[test]
fn sibling_scopes_do_not_see_each_other() {
    let mut bindings = Bindings::new();
    let module = ns("Main");
    let left = bindings.bind(&module, "a");
    let right = bindings.bind(&module, "b");

    assert_eq!(bindings.lookup(&right.namespace, &module, "a"), None);
    assert!(bindings.is_visible(&left, &left.namespace));
    assert!(!bindings.is_visible(&left, &right.namespace));
}

#[test]
fn unbound_names_are_not_visible() {
    let bindings = Bindings::new();
    let name = Name::new(ns("Main::#0"), "x");

    assert!(!bindings.is_visible(&name, &ns("Main::#0")));
}
