//! Property-style checks (spec §8 P1-P7): behaviors that should hold
//! across many inputs rather than one fixed scenario.

mod common;

use bumpalo::Bump;
use subcc::diag::ErrorKind;
use subcc::types::ast::{Builder, BinOp, UnaryOp};
use subcc::Compiler;

/// A compile with several independent errors reports every one of them
/// instead of stopping at the first (spec §5, §8 P7).
#[test]
fn every_diagnostic_in_a_compile_is_collected() {
    let bump = Bump::new();
    let b = Builder::new(&bump);

    let bad1 = b.stmt_expr(b.bin(b.ident("nope1"), b.integer(1), BinOp::Assign));
    let bad2 = b.stmt_expr(b.bin(b.ident("nope2"), b.integer(2), BinOp::Assign));
    let root = common::make_main(&bump, &[bad1, bad2]);

    let mut c = Compiler::new(&bump, String::new());
    c.compile_translation_unit(root);

    assert!(c.had_error());
    assert_eq!(c.errors().len(), 2);
    assert!(c.errors().iter().all(|e| e.kind == ErrorKind::SemanticBinding));
}

/// A statement that fails doesn't stop the rest of the compound statement
/// from being generated (spec §7 "continues with the next sibling").
#[test]
fn compound_statement_continues_past_a_failing_sibling() {
    let bump = Bump::new();
    let b = Builder::new(&bump);

    let bad = b.stmt_expr(b.bin(b.ident("nope"), b.integer(1), BinOp::Assign));
    let decl_x = common::decl_one(&b, common::int_spec(&b), common::plain_declarator(&b, "x"), None);
    let good = b.stmt_expr(b.bin(b.ident("x"), b.integer(9), BinOp::Assign));
    let root = common::make_main(&bump, &[bad, decl_x, good]);

    let mut c = Compiler::new(&bump, String::new());
    c.compile_translation_unit(root);

    assert!(c.had_error());
    let out = c.into_output();
    assert!(out.contains("mov rax, 9"), "{out}");
}

/// Pointer arithmetic is a raw byte offset with no element-size scaling
/// (spec §9 Open Question 1).
#[test]
fn pointer_arithmetic_does_not_scale_by_element_size() {
    let bump = Bump::new();
    let b = Builder::new(&bump);

    let decl_p = common::decl_one(&b, common::int_spec(&b), common::ptr_declarator(&b, "p"), None);
    let advance = b.stmt_expr(b.bin(b.ident("p"), b.integer(1), BinOp::Add));
    let root = common::make_main(&bump, &[decl_p, advance]);

    let mut c = Compiler::new(&bump, String::new());
    c.compile_translation_unit(root);
    assert!(!c.had_error(), "unexpected diagnostics: {:?}", c.errors());

    let out = c.into_output();
    assert!(out.contains("add rax, rbx"), "{out}");
    assert!(!out.contains("imul"), "pointer advance must not scale: {out}");
}

/// `read`/`store` size the instruction to the operand's type instead of
/// always moving a full quadword (spec §4.3).
#[test]
fn narrow_locals_use_a_narrow_store_width() {
    let bump = Bump::new();
    let b = Builder::new(&bump);

    let char_spec = b.declaration_specifiers(
        subcc::types::decl_spec::DeclSpec::empty().with_builtin(subcc::types::decl_spec::BuiltinType::Char),
    );
    let decl_c = common::decl_one(&b, char_spec, common::plain_declarator(&b, "c"), None);
    let assign = b.stmt_expr(b.bin(b.ident("c"), b.integer(65), BinOp::Assign));
    let root = common::make_main(&bump, &[decl_c, assign]);

    let mut c = Compiler::new(&bump, String::new());
    c.compile_translation_unit(root);
    assert!(!c.had_error(), "unexpected diagnostics: {:?}", c.errors());

    let out = c.into_output();
    assert!(out.contains("byte [rbp"), "{out}");
    assert!(out.contains(", al ; store"), "{out}");
}

/// Incompatible operand types for arithmetic are reported as a semantic
/// type error, not silently computed.
#[test]
fn incompatible_arithmetic_operands_are_rejected() {
    let bump = Bump::new();
    let b = Builder::new(&bump);

    let decl_p = common::decl_one(&b, common::int_spec(&b), common::ptr_declarator(&b, "p"), None);
    let decl_q = common::decl_one(&b, common::int_spec(&b), common::ptr_declarator(&b, "q"), None);
    let bogus_add = b.stmt_expr(b.bin(b.ident("p"), b.ident("q"), BinOp::Add));
    let root = common::make_main(&bump, &[decl_p, decl_q, bogus_add]);

    let mut c = Compiler::new(&bump, String::new());
    c.compile_translation_unit(root);

    assert!(c.had_error());
    assert!(c.errors().iter().any(|e| e.kind == ErrorKind::SemanticType));
}

/// `!x` is logical negation, not the bitwise complement `~x` compiles to
/// (the two must not share a code path: `!0` is `1`, not `-1`).
#[test]
fn logical_not_differs_from_bitwise_complement() {
    let bump = Bump::new();
    let b = Builder::new(&bump);

    let not_expr = b.unary(b.integer(0), UnaryOp::Not);
    let stmt = b.stmt_expr(not_expr);
    let root = common::make_main(&bump, &[stmt]);

    let mut c = Compiler::new(&bump, String::new());
    c.compile_translation_unit(root);
    assert!(!c.had_error(), "unexpected diagnostics: {:?}", c.errors());

    let out = c.into_output();
    assert!(out.contains("cmp rax, 0"), "{out}");
    assert!(out.contains("sete al"), "{out}");
    assert!(out.contains("movzx rax, al"), "{out}");
    assert!(!out.contains("not rax"), "!x must not emit the bitwise-complement instruction: {out}");
}

/// `~x` is the bitwise complement, compiled via `not rax`.
#[test]
fn bitwise_complement_emits_not_instruction() {
    let bump = Bump::new();
    let b = Builder::new(&bump);

    let notb_expr = b.unary(b.integer(5), UnaryOp::NotB);
    let stmt = b.stmt_expr(notb_expr);
    let root = common::make_main(&bump, &[stmt]);

    let mut c = Compiler::new(&bump, String::new());
    c.compile_translation_unit(root);
    assert!(!c.had_error(), "unexpected diagnostics: {:?}", c.errors());

    let out = c.into_output();
    assert!(out.contains("not rax"), "{out}");
    assert!(!out.contains("cmp rax, 0"), "~x must not emit the logical-negation comparison: {out}");
}
