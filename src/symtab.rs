//! The symbol table (spec §4.2): a flat, single-scope mapping from
//! identifier to declaration record, replaced/extended once per function
//! body.

use im::HashMap;

use crate::ty::Ty;

/// Stack-location sentinel for externally-linked symbols: their name is
/// emitted directly at call/load sites instead of being materialized on
/// the stack (spec §3 "Declaration record").
pub const EXTERN_LOC: i64 = 1;

/// A declared identifier: its type, its size in bytes, and where it lives
/// (a negative frame-pointer offset, or [`EXTERN_LOC`]).
#[derive(Debug, Clone, Copy)]
pub struct Decl<'ast> {
    pub ty: Ty<'ast>,
    pub size: i64,
    pub loc: i64,
}

/// `im::HashMap` gives the table cheap structural sharing, which is what
/// lets [`crate::driver::Compiler`] snapshot-and-reset it once per function
/// body (spec §3 "Generator state" lifecycle) without introducing a scope
/// stack the core's single-scope model doesn't call for.
#[derive(Debug, Clone, Default)]
pub struct SymTab<'ast> {
    vars: HashMap<&'ast str, Decl<'ast>>,
}

impl<'ast> SymTab<'ast> {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Redeclaration silently overwrites (spec §4.2 and §9 Open Question
    /// 4: an acknowledged simplification, not a bug).
    pub fn declare(&mut self, ident: &'ast str, decl: Decl<'ast>) {
        self.vars.insert(ident, decl);
    }

    #[must_use]
    pub fn lookup(&self, ident: &str) -> Option<Decl<'ast>> {
        self.vars.get(ident).copied()
    }

    /// Discard every local (spec §3: "discarded when the function ends").
    pub fn clear(&mut self) {
        self.vars = HashMap::new();
    }
}
