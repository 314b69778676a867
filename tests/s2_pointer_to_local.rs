//! Scenario S2 (spec §8): taking the address of a local and storing
//! through the resulting pointer.

mod common;

use bumpalo::Bump;
use subcc::types::ast::{Builder, BinOp, UnaryOp};
use subcc::Compiler;

#[test]
fn address_of_local_then_store_through_pointer() {
    let bump = Bump::new();
    let b = Builder::new(&bump);

    let decl_x = common::decl_one(&b, common::int_spec(&b), common::plain_declarator(&b, "x"), None);
    let decl_p = common::decl_one(&b, common::int_spec(&b), common::ptr_declarator(&b, "p"), None);

    let addr_x = b.unary(b.ident("x"), UnaryOp::Ref);
    let assign_p = b.bin(b.ident("p"), addr_x, BinOp::Assign);
    let stmt1 = b.stmt_expr(assign_p);

    let deref_p = b.unary(b.ident("p"), UnaryOp::Deref);
    let assign_through = b.bin(deref_p, b.integer(5), BinOp::Assign);
    let stmt2 = b.stmt_expr(assign_through);

    let root = common::make_main(&bump, &[decl_x, decl_p, stmt1, stmt2]);

    let mut c = Compiler::new(&bump, String::new());
    c.compile_translation_unit(root);
    assert!(!c.had_error(), "unexpected diagnostics: {:?}", c.errors());

    let out = c.into_output();
    assert!(out.contains("mov rax, rbp"), "{out}");
    assert!(out.contains("sub rax,"), "{out}");
    assert!(out.contains("deref_depth=1"), "{out}");
}
