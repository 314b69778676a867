//! Scenario S5 (spec §8): a six-argument call loads every System-V
//! integer argument register in order and aligns the stack before
//! `call`; a seventh argument is rejected rather than silently dropped
//! or mis-packed.

mod common;

use bumpalo::Bump;
use subcc::diag::ErrorKind;
use subcc::types::ast::Builder;
use subcc::Compiler;

#[test]
fn six_arguments_fill_all_call_registers_in_order() {
    let bump = Bump::new();
    let b = Builder::new(&bump);

    let decl_f = common::decl_one(&b, common::extern_int_spec(&b), common::func_declarator(&b, "f"), None);
    let args: Vec<_> = (1i64..=6).map(|i| b.integer(i)).collect();
    let call = b.call(b.ident("f"), &args);
    let stmt = b.stmt_expr(call);
    let root = common::make_main(&bump, &[decl_f, stmt]);

    let mut c = Compiler::new(&bump, String::new());
    c.compile_translation_unit(root);
    assert!(!c.had_error(), "unexpected diagnostics: {:?}", c.errors());

    let out = c.into_output();
    assert!(out.contains("extern f"), "{out}");

    let rdi = out.find("mov rdi, rax").expect("rdi load missing");
    let rsi = out.find("mov rsi, rax").expect("rsi load missing");
    let rdx = out.find("mov rdx, rax").expect("rdx load missing");
    let rcx = out.find("mov rcx, rax").expect("rcx load missing");
    let r8 = out.find("mov r8, rax").expect("r8 load missing");
    let r9 = out.find("mov r9, rax").expect("r9 load missing");
    let call_site = out.find("call f").expect("call missing");
    assert!(rdi < rsi && rsi < rdx && rdx < rcx && rcx < r8 && r8 < r9 && r9 < call_site, "{out}");
    assert!(out.contains("sub rsp,"), "{out}");
}

#[test]
fn seventh_argument_is_rejected() {
    let bump = Bump::new();
    let b = Builder::new(&bump);

    let decl_f = common::decl_one(&b, common::extern_int_spec(&b), common::func_declarator(&b, "f"), None);
    let args: Vec<_> = (1i64..=7).map(|i| b.integer(i)).collect();
    let call = b.call(b.ident("f"), &args);
    let stmt = b.stmt_expr(call);
    let root = common::make_main(&bump, &[decl_f, stmt]);

    let mut c = Compiler::new(&bump, String::new());
    c.compile_translation_unit(root);

    assert!(c.had_error());
    assert!(c.errors().iter().any(|e| e.kind == ErrorKind::Unsupported));
}
