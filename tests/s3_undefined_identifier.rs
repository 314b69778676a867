//! Scenario S3 (spec §8): an assignment to an undeclared identifier is a
//! binding error, not a panic.

mod common;

use bumpalo::Bump;
use subcc::diag::ErrorKind;
use subcc::types::ast::{Builder, BinOp};
use subcc::Compiler;

#[test]
fn undefined_identifier_is_a_binding_error() {
    let bump = Bump::new();
    let b = Builder::new(&bump);

    let assign = b.bin(b.ident("x"), b.integer(5), BinOp::Assign);
    let stmt = b.stmt_expr(assign);
    let root = common::make_main(&bump, &[stmt]);

    let mut c = Compiler::new(&bump, String::new());
    c.compile_translation_unit(root);

    assert!(c.had_error());
    let errors = c.errors();
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].kind, ErrorKind::SemanticBinding);
    assert_eq!(errors[0].phrase, "undefined identifier");
}
