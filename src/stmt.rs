//! The statement generator (spec §4.5): `if`/`while`/compound/expression
//! statements, declaration lowering, and the monotonic label allocator
//! shared with the top-level driver's function bodies.

use std::fmt::Write;

use smallvec::SmallVec;

use crate::diag::{Error, ErrorKind};
use crate::driver::Compiler;
use crate::symtab::{Decl, EXTERN_LOC};
use crate::types::ast::{Node, NodeKind};
use crate::value::{self, RAX};

impl<'ast, W: Write> Compiler<'ast, W> {
    pub(crate) fn gen_stmt(&mut self, n: &'ast Node<'ast>) -> Result<(), ()> {
        match &n.kind {
            NodeKind::StmtExpr(e) => {
                self.gen_expr(e)?;
                Ok(())
            }
            NodeKind::StmtComp(items) => self.gen_stmt_comp(items),
            NodeKind::StmtIf { cond, then, .. } => self.gen_if(cond, then),
            NodeKind::StmtWhile { cond, stmt } => self.gen_while(cond, stmt),
            NodeKind::Declaration { .. } => self.gen_declaration(n),
            _ => {
                self.push_error(Error::new(
                    ErrorKind::Unsupported,
                    "statement form not supported in this subset",
                    crate::pretty::render_node(n),
                ));
                Err(())
            }
        }
    }

    /// No new scope is opened (spec §4.5 "simplification"): declarations
    /// and statements share the one flat symbol table. Per spec §7, a
    /// failing child aborts only itself; the dispatch loop continues with
    /// the next sibling so a single compile reports every diagnostic it
    /// can.
    fn gen_stmt_comp(&mut self, items: &'ast SmallVec<[&'ast Node<'ast>; 8]>) -> Result<(), ()> {
        let mut had_error = false;
        for it in items.iter().copied() {
            let result = match &it.kind {
                NodeKind::Declaration { .. } => self.gen_declaration(it),
                _ => self.gen_stmt(it),
            };
            if result.is_err() {
                had_error = true;
            }
        }
        if had_error { Err(()) } else { Ok(()) }
    }

    /// No else branch is wired in this core (spec §9 Open Question 3).
    fn gen_if(&mut self, cond: &'ast Node<'ast>, then: &'ast Node<'ast>) -> Result<(), ()> {
        let end = self.new_label();
        let cv = self.gen_expr(cond)?;
        let r = value::read(&mut self.out, &cv, RAX);
        self.check(r)?;
        writeln!(self.out, "cmp rax, 0").expect("writing to an in-memory sink cannot fail");
        writeln!(self.out, "je label_{end}").expect("writing to an in-memory sink cannot fail");
        self.gen_stmt(then)?;
        writeln!(self.out, "label_{end}:").expect("writing to an in-memory sink cannot fail");
        Ok(())
    }

    fn gen_while(&mut self, cond: &'ast Node<'ast>, stmt: &'ast Node<'ast>) -> Result<(), ()> {
        let start = self.new_label();
        let end = self.new_label();
        writeln!(self.out, "label_{start}:").expect("writing to an in-memory sink cannot fail");
        let cv = self.gen_expr(cond)?;
        let r = value::read(&mut self.out, &cv, RAX);
        self.check(r)?;
        writeln!(self.out, "cmp rax, 0").expect("writing to an in-memory sink cannot fail");
        writeln!(self.out, "je label_{end}").expect("writing to an in-memory sink cannot fail");
        self.gen_stmt(stmt)?;
        writeln!(self.out, "jmp label_{start}").expect("writing to an in-memory sink cannot fail");
        writeln!(self.out, "label_{end}:").expect("writing to an in-memory sink cannot fail");
        Ok(())
    }

    /// Shared by a function body's statement dispatch and the driver's
    /// bare top-level declarations (spec §4.6: "lowered as uninitialized
    /// globals placed on the (main) stack"). Every local gets a flat
    /// 8-byte slot regardless of its actual size (spec §9 Open Question
    /// 2 — preserved, not a bug); `Decl::size` still records the real
    /// type size for anything downstream that wants it.
    pub(crate) fn gen_declaration(&mut self, n: &'ast Node<'ast>) -> Result<(), ()> {
        let NodeKind::Declaration { specifiers, init_declarators } = &n.kind else {
            unreachable!("shape contract: gen_declaration only called on Declaration nodes");
        };

        let mut had_error = false;
        for id in init_declarators.iter().copied() {
            // Structural shape violations are a front-end bug, not a
            // recoverable diagnostic (spec §7) — every `Declaration`'s
            // `init_declarators` list is guaranteed by spec §6 to hold
            // only `InitDeclarator` nodes.
            let NodeKind::InitDeclarator { declarator, initializer } = &id.kind else {
                unreachable!("shape contract: init-declarator list must hold only InitDeclarator nodes");
            };

            let ty = crate::ty::ty_of(specifiers, declarator);
            let Some(ident) = ty.decl.ident else {
                self.push_error(Error::new(
                    ErrorKind::Unsupported,
                    "anonymous declarators are not supported",
                    crate::pretty::render_node(declarator),
                ));
                had_error = true;
                continue;
            };

            let loc = if ty.spec.is_extern() {
                writeln!(self.out, "extern {ident}").expect("writing to an in-memory sink cannot fail");
                EXTERN_LOC
            } else {
                self.sp -= 8;
                self.sp
            };

            let size = match ty.size() {
                Ok(s) => i64::from(s),
                Err(e) => {
                    self.push_error(e);
                    had_error = true;
                    continue;
                }
            };
            self.vars.declare(ident, Decl { ty, size, loc });

            let Some(init) = initializer else { continue };
            let Ok(iv) = self.gen_expr(init) else {
                had_error = true;
                continue;
            };
            let read_result = value::read(&mut self.out, &iv, RAX);
            if self.check(read_result).is_err() {
                had_error = true;
                continue;
            }
            let Ok(var_val) = self.lookup_var(ident, declarator) else {
                had_error = true;
                continue;
            };
            let store_result = value::store(&mut self.out, &var_val, RAX);
            if self.check(store_result).is_err() {
                had_error = true;
                continue;
            }
        }

        if had_error { Err(()) } else { Ok(()) }
    }
}
