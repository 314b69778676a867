//! Shared AST-building helpers for the scenario tests (spec §8). Each
//! test constructs its own arena and translation unit by hand, the same
//! way the original source's `ast_ident`/`ast_bin`/... builder functions
//! would be used by a front end.

#![allow(dead_code)]

use bumpalo::Bump;
use subcc::types::ast::Builder;
use subcc::types::decl_spec::{BuiltinType, DeclSpec, StorageClassSpecifiers, TypeQualifiers};
use subcc::types::{Node, NodeKind};

pub fn int_spec<'a>(b: &Builder<'a>) -> &'a Node<'a> {
    b.declaration_specifiers(DeclSpec::empty().with_builtin(BuiltinType::Int))
}

pub fn extern_int_spec<'a>(b: &Builder<'a>) -> &'a Node<'a> {
    b.declaration_specifiers(
        DeclSpec::empty().with_builtin(BuiltinType::Int).with_storage_class(StorageClassSpecifiers::EXTERN),
    )
}

pub fn plain_declarator<'a>(b: &Builder<'a>, name: &str) -> &'a Node<'a> {
    b.declarator(Some(name), &[])
}

pub fn ptr_declarator<'a>(b: &Builder<'a>, name: &str) -> &'a Node<'a> {
    let ptr = b.pointer_declarator(TypeQualifiers::empty());
    b.declarator(Some(name), &[ptr])
}

/// Parameter contents are never consulted by this subset's type algebra
/// (arity is not checked — see DESIGN.md); only the operator kind at the
/// declarator's outermost position matters.
pub fn func_declarator<'a>(b: &Builder<'a>, name: &str) -> &'a Node<'a> {
    let fd = b.function_declarator(&[]);
    b.declarator(Some(name), &[fd])
}

pub fn decl_one<'a>(b: &Builder<'a>, spec: &'a Node<'a>, declarator: &'a Node<'a>, init: Option<&'a Node<'a>>) -> &'a Node<'a> {
    let id = b.init_declarator(declarator, init);
    b.declaration(spec, &[id])
}

/// `int main() { <body_items> }` wrapped in a one-item translation unit.
pub fn make_main<'a>(bump: &'a Bump, body_items: &[&'a Node<'a>]) -> &'a Node<'a> {
    let b = Builder::new(bump);
    let specifiers = int_spec(&b);
    let declarator = func_declarator(&b, "main");
    let body = b.stmt_comp(body_items);
    let def = b.function_definition(specifiers, declarator, body);
    b.translation_unit(&[def])
}

pub fn assert_kind_is_translation_unit(n: &Node<'_>) {
    assert!(matches!(n.kind, NodeKind::TranslationUnit(_)));
}
