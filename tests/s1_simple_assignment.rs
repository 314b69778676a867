//! Scenario S1 (spec §8): a plain local assignment compiles clean and
//! lowers to a literal load followed by a store to the local's slot.

mod common;

use bumpalo::Bump;
use subcc::types::ast::{Builder, BinOp};
use subcc::Compiler;

#[test]
fn assigns_literal_into_local() {
    let bump = Bump::new();
    let b = Builder::new(&bump);

    let decl = common::decl_one(&b, common::int_spec(&b), common::plain_declarator(&b, "x"), None);
    let assign = b.bin(b.ident("x"), b.integer(5), BinOp::Assign);
    let stmt = b.stmt_expr(assign);
    let root = common::make_main(&bump, &[decl, stmt]);

    let mut c = Compiler::new(&bump, String::new());
    c.compile_translation_unit(root);
    assert!(!c.had_error(), "unexpected diagnostics: {:?}", c.errors());

    let out = c.into_output();
    assert!(out.contains("mov rax, 5"), "{out}");
    assert!(out.contains("; store"), "{out}");
}
