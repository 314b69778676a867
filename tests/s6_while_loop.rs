//! Scenario S6 (spec §8): a `while` loop's shape — a top label, the
//! condition test, a conditional jump to the bottom label, the body, and
//! an unconditional jump back to the top.

mod common;

use bumpalo::Bump;
use subcc::types::ast::{Builder, BinOp};
use subcc::Compiler;

#[test]
fn while_loop_emits_top_test_bottom_shape() {
    let bump = Bump::new();
    let b = Builder::new(&bump);

    let decl_x = common::decl_one(&b, common::int_spec(&b), common::plain_declarator(&b, "x"), Some(b.integer(0)));
    let cond = b.ident("x");
    let body_assign = b.bin(b.ident("x"), b.integer(0), BinOp::Assign);
    let body = b.stmt_expr(body_assign);
    let while_stmt = b.stmt_while(cond, body);
    let root = common::make_main(&bump, &[decl_x, while_stmt]);

    let mut c = Compiler::new(&bump, String::new());
    c.compile_translation_unit(root);
    assert!(!c.had_error(), "unexpected diagnostics: {:?}", c.errors());

    let out = c.into_output();
    let top = out.find("label_0:").expect("top label missing");
    let cmp = out.find("cmp rax, 0").expect("condition test missing");
    let je = out.find("je label_1").expect("exit jump missing");
    let jmp = out.find("jmp label_0").expect("back edge missing");
    let bottom = out.find("label_1:").expect("bottom label missing");
    assert!(top < cmp && cmp < je && je < jmp && jmp < bottom, "{out}");
}
