use sable_core::Namespace;

use super::validate_entries;
use crate::errors::AnalysisError;
use crate::test_utils::Fx;

#[test]
fn valid_module_passes() {
    let fx = Fx::new();
    let module = fx
        .module("Main")
        .import("A")
        .export("main")
        .export_module("A")
        .let_("main", fx.int(0))
        .build();

    assert!(validate_entries(&module).is_ok());
}

#[test]
fn reexports_not_imported_are_batched() {
    let fx = Fx::new();
    let module = fx
        .module("Main")
        .import("A")
        .export_module("X")
        .export_module("A")
        .export_module("Y")
        .build();
    let x = module.exports[0].id();
    let y = module.exports[2].id();

    let err = validate_entries(&module).unwrap_err();

    assert_eq!(
        err,
        AnalysisError::ExportedModulesNotImported {
            module: Namespace::parse("Main"),
            exports: vec![(x, Namespace::parse("X")), (y, Namespace::parse("Y"))],
        }
    );
}

#[test]
fn undefined_decl_exports_are_batched() {
    let fx = Fx::new();
    let module = fx
        .module("Main")
        .export("f")
        .export("g")
        .export("h")
        .let_("g", fx.int(1))
        .build();

    let err = validate_entries(&module).unwrap_err();

    let AnalysisError::ExportedDeclsNotDefined { exports, .. } = err else {
        panic!("expected undefined exports, got {err:?}");
    };
    let idents: Vec<_> = exports.iter().map(|(_, i)| i.as_str()).collect();
    assert_eq!(idents, ["f", "h"]);
}

#[test]
fn reexport_check_runs_before_decl_export_check() {
    let fx = Fx::new();
    let module = fx.module("Main").export("missing").export_module("X").build();

    let err = validate_entries(&module).unwrap_err();

    assert!(matches!(err, AnalysisError::ExportedModulesNotImported { .. }));
}

#[test]
fn duplicate_declarations_list_every_occurrence() {
    let fx = Fx::new();
    let module = fx
        .module("Main")
        .let_("f", fx.int(1))
        .let_("g", fx.int(2))
        .data("f", &[], vec![])
        .let_("f", fx.int(3))
        .build();
    let ids: Vec<_> = [0, 2, 3].iter().map(|&i| module.decls[i].id()).collect();

    let err = validate_entries(&module).unwrap_err();

    insta::assert_snapshot!(err.to_string(), @"`f` is declared 3 times in module `Main`");
    let AnalysisError::MultipleDeclarations { ident, decls, .. } = err else {
        panic!("expected duplicate declarations");
    };
    assert_eq!(ident, "f");
    assert_eq!(decls, ids);
}

#[test]
fn first_duplicated_identifier_wins() {
    let fx = Fx::new();
    let module = fx
        .module("Main")
        .let_("g", fx.int(0))
        .let_("f", fx.int(1))
        .let_("f", fx.int(2))
        .let_("g", fx.int(3))
        .build();

    let err = validate_entries(&module).unwrap_err();

    assert!(matches!(err, AnalysisError::MultipleDeclarations { ident, .. } if ident == "g"));
}

#[test]
fn decl_export_check_runs_before_duplicate_check() {
    let fx = Fx::new();
    let module = fx
        .module("Main")
        .export("nope")
        .let_("f", fx.int(1))
        .let_("f", fx.int(2))
        .build();

    let err = validate_entries(&module).unwrap_err();

    assert!(matches!(err, AnalysisError::ExportedDeclsNotDefined { .. }));
}
