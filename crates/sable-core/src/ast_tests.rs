use crate::{Decl, Export, Expr, Literal, Module, Namespace, NodeId, Pattern};

const MAIN_JSON: &str = r#"{
    "id": 0,
    "namespace": ["Main"],
    "imports": [{ "id": 1, "namespace": ["Data", "List"] }],
    "exports": [
        { "kind": "decl", "id": 2, "ident": "main" },
        { "kind": "module", "id": 3, "namespace": ["Data", "List"] }
    ],
    "decls": [
        {
            "kind": "let",
            "id": 4,
            "ident": "main",
            "body": {
                "kind": "app",
                "id": 5,
                "func": { "kind": "var", "id": 6, "name": { "namespace": ["Data", "List"], "ident": "map" } },
                "arg": { "kind": "lit", "id": 7, "lit": { "int": 1 } }
            }
        }
    ]
}"#;

#[test]
fn module_from_parser_json() {
    let module: Module = serde_json::from_str(MAIN_JSON).unwrap();

    assert_eq!(module.namespace, Namespace::from("Main"));
    assert!(module.imports_namespace(&Namespace::from("Data::List")));
    assert!(module.exports[0].exports_decl("main"));
    assert!(matches!(&module.exports[1], Export::Module { namespace, .. } if namespace.len() == 2));
    assert_eq!(module.declared_idents().collect::<Vec<_>>(), ["main"]);

    let Decl::Let { annotation, body, .. } = &module.decls[0] else {
        panic!("expected a let declaration");
    };
    assert!(annotation.is_none());
    let Expr::App { func, arg, .. } = body else {
        panic!("expected an application");
    };
    assert!(matches!(
        func.as_ref(),
        Expr::Var { name, .. } if name.to_string() == "Data::List::map"
    ));
    assert!(matches!(arg.as_ref(), Expr::Lit { lit: Literal::Int(1), .. }));
}

#[test]
fn missing_lists_default_to_empty() {
    let module: Module = serde_json::from_str(r#"{ "id": 9, "namespace": ["Empty"] }"#).unwrap();

    assert!(module.imports.is_empty());
    assert!(module.exports.is_empty());
    assert!(module.decls.is_empty());
}

#[test]
fn json_survives_reserialization() {
    let module: Module = serde_json::from_str(MAIN_JSON).unwrap();
    let json = serde_json::to_string(&module).unwrap();
    let again: Module = serde_json::from_str(&json).unwrap();

    assert_eq!(module, again);
}

#[test]
fn node_accessors() {
    let pattern: Pattern = serde_json::from_str(r#"{ "kind": "wildcard", "id": 42 }"#).unwrap();
    let unit: Literal = serde_json::from_str(r#""unit""#).unwrap();

    assert_eq!(pattern.id(), NodeId::from_raw(42));
    assert_eq!(unit, Literal::Unit);
}
