//! Scenario S4 (spec §8): `&5` is rejected — an integer literal is not an
//! lvalue, so taking its address is a type error rather than silently
//! producing a bogus pointer.

mod common;

use bumpalo::Bump;
use subcc::diag::ErrorKind;
use subcc::types::ast::{Builder, BinOp, UnaryOp};
use subcc::Compiler;

#[test]
fn address_of_a_literal_is_rejected() {
    let bump = Bump::new();
    let b = Builder::new(&bump);

    let decl_p = common::decl_one(&b, common::int_spec(&b), common::ptr_declarator(&b, "p"), None);
    let addr_lit = b.unary(b.integer(5), UnaryOp::Ref);
    let assign = b.bin(b.ident("p"), addr_lit, BinOp::Assign);
    let stmt = b.stmt_expr(assign);
    let root = common::make_main(&bump, &[decl_p, stmt]);

    let mut c = Compiler::new(&bump, String::new());
    c.compile_translation_unit(root);

    assert!(c.had_error());
    let errors = c.errors();
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].kind, ErrorKind::SemanticType);
    assert_eq!(errors[0].phrase, "can't take address of non-lvalue");
}
