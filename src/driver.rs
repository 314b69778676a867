//! The top-level driver (spec §4.6) and the generator state (spec §3
//! "Generator state") every other module is an `impl` block against:
//! [`Compiler`] owns the stack pointer, the symbol table, the string
//! pool, the label counter and the diagnostic sink, threaded through one
//! depth-first traversal (spec §5 "a single owned record").

use std::fmt::Write;

use bumpalo::Bump;

use crate::diag::{Error, ErrorKind};
use crate::symtab::SymTab;
use crate::ty::Ty;
use crate::types::ast::{Builder, Node, NodeKind};
use crate::types::decl_spec::{BuiltinType, DeclSpec, TypeQualifiers};
use crate::value::{self, Val};

const EXTERNS: [&str; 5] = ["printf", "scanf", "malloc", "free", "getchar"];

/// Pre-constructed singleton types (spec §3 "Built-in type cache"):
/// `int`, `char`, `char*`, `size_t`.
pub(crate) struct BuiltinTypes<'ast> {
    pub int_: Ty<'ast>,
    pub char_: Ty<'ast>,
    pub char_ptr: Ty<'ast>,
    pub size_t: Ty<'ast>,
}

fn build_builtins<'ast>(bump: &'ast Bump) -> BuiltinTypes<'ast> {
    let b = Builder::new(bump);
    let spec_int = &*bump.alloc(DeclSpec::empty().with_builtin(BuiltinType::Int));
    let spec_char = &*bump.alloc(DeclSpec::empty().with_builtin(BuiltinType::Char));
    let decl_plain = b.declarator(None, &[]);
    let NodeKind::Declarator(decl_plain) = &decl_plain.kind else { unreachable!() };
    let ptr_op = b.pointer_declarator(TypeQualifiers::empty());
    let decl_ptr = b.declarator(None, &[ptr_op]);
    let NodeKind::Declarator(decl_ptr) = &decl_ptr.kind else { unreachable!() };

    BuiltinTypes {
        int_: Ty::new(spec_int, decl_plain),
        char_: Ty::new(spec_char, decl_plain),
        char_ptr: Ty::new(spec_char, decl_ptr),
        // The original source aliases `size_t` to `int` outright rather
        // than modeling an unsigned 8-byte type; this core never needs
        // `size_t` for anything but `sizeof`'s pushed result, so the
        // alias is harmless and kept verbatim.
        size_t: Ty::new(spec_int, decl_plain),
    }
}

/// All state threaded through one compilation (spec §3 "Generator
/// state"). `W` is the output stream; tests pass a `String`, a real
/// build would pass an `io::Write` adapter.
pub struct Compiler<'ast, W: Write> {
    pub(crate) out: W,
    pub(crate) sp: i64,
    pub(crate) vars: SymTab<'ast>,
    pub(crate) strings: Vec<String>,
    label: u32,
    pub(crate) builtin: BuiltinTypes<'ast>,
    errors: crate::diag::ErrorSink,
}

impl<'ast, W: Write> Compiler<'ast, W> {
    /// `bump` only needs to outlive the built-in type cache constructed
    /// here; the compiler itself holds no arena reference afterward.
    pub fn new(bump: &'ast Bump, out: W) -> Self {
        Self {
            out,
            sp: 0,
            vars: SymTab::new(),
            strings: Vec::new(),
            label: 0,
            builtin: build_builtins(bump),
            errors: crate::diag::ErrorSink::new(),
        }
    }

    #[must_use]
    pub fn had_error(&self) -> bool {
        self.errors.had_error()
    }

    #[must_use]
    pub fn errors(&self) -> &[Error] {
        self.errors.errors()
    }

    /// Spec §4.7: every diagnostic as one line, in emission order.
    pub fn dump_diagnostics(&self, w: impl Write) -> std::fmt::Result {
        self.errors.write_all(w)
    }

    #[must_use]
    pub fn into_output(self) -> W {
        self.out
    }

    pub(crate) fn new_label(&mut self) -> u32 {
        let n = self.label;
        self.label += 1;
        n
    }

    /// Map a `Result<T, Error>` from a pure helper (the type algebra,
    /// `read`/`store`, ...) onto the two-state contract the traversal
    /// itself uses, recording the diagnostic at the point of failure
    /// (spec §7 "a two-state result suffices").
    pub(crate) fn check<T>(&mut self, r: Result<T, Error>) -> Result<T, ()> {
        r.map_err(|e| self.errors.push(e))
    }

    pub(crate) fn push_error(&mut self, e: Error) {
        self.errors.push(e);
    }

    /// Symbol-table lookup shared by the expression generator's
    /// `Identifier` case and the statement generator's initializer store
    /// (spec §4.5 "via `find_ident`").
    pub(crate) fn lookup_var(&mut self, name: &str, at: &Node<'_>) -> Result<Val<'ast>, ()> {
        match self.vars.lookup(name) {
            Some(decl) => Ok(Val { base_offset: decl.loc, deref_depth: 0, is_lvalue: true, ty: decl.ty }),
            None => {
                self.errors.push(Error::new(ErrorKind::SemanticBinding, "undefined identifier", crate::pretty::render_node(at)));
                Err(())
            }
        }
    }

    fn emit_header(&mut self) {
        writeln!(self.out, "global main").expect("writing to an in-memory sink cannot fail");
        writeln!(self.out, "section .text").expect("writing to an in-memory sink cannot fail");
        for sym in EXTERNS {
            writeln!(self.out, "extern {sym}").expect("writing to an in-memory sink cannot fail");
        }
    }

    fn emit_string_pool(&mut self) {
        if self.strings.is_empty() {
            return;
        }
        writeln!(self.out, "section .rodata").expect("writing to an in-memory sink cannot fail");
        for (i, s) in self.strings.iter().enumerate() {
            writeln!(self.out, "s{i}: db {s}, 0").expect("writing to an in-memory sink cannot fail");
        }
    }

    /// The single public entry point (spec §1: "the core reads an AST
    /// and writes assembly text to an output stream").
    pub fn compile_translation_unit(&mut self, n: &'ast Node<'ast>) {
        self.emit_header();

        // Structural shape violations are a front-end bug, not a
        // recoverable diagnostic (spec §7: "Fatal assertions exist for
        // structural violations only — they represent invariants the
        // parser must maintain"). Every other shape-contract check in
        // this crate panics the same way (`driver.rs::gen_function_definition`,
        // `stmt.rs::gen_declaration`, `ty.rs`'s `unreachable!`s); this is
        // the top of the traversal, so it's the first place that
        // contract can be violated.
        let NodeKind::TranslationUnit(items) = &n.kind else {
            unreachable!("shape contract: compile_translation_unit root node must be a translation unit");
        };

        for item in items.iter().copied() {
            match &item.kind {
                NodeKind::FunctionDefinition { .. } => {
                    let _ = self.gen_function_definition(item);
                }
                NodeKind::Declaration { .. } => {
                    let _ = self.gen_declaration(item);
                }
                _ => unreachable!(
                    "shape contract: translation-unit item must be a declaration or function definition"
                ),
            }
        }

        self.emit_string_pool();
    }

    fn gen_function_definition(&mut self, n: &'ast Node<'ast>) -> Result<(), ()> {
        let NodeKind::FunctionDefinition { specifiers, declarator, body } = &n.kind else {
            unreachable!("shape contract: gen_function_definition only called on FunctionDefinition nodes");
        };
        let ty = crate::ty::ty_of(specifiers, declarator);
        let Some(ident) = ty.decl.ident else {
            self.push_error(Error::new(
                ErrorKind::Structural,
                "function definition must have a named declarator",
                crate::pretty::render_node(declarator),
            ));
            return Err(());
        };

        // Spec §3 "Lifecycle": the symbol table is replaced per function
        // body; there is no enclosing scope to restore it into.
        self.vars.clear();
        self.sp = 0;

        writeln!(self.out, "{ident}:").expect("writing to an in-memory sink cannot fail");
        writeln!(self.out, "push rbp").expect("writing to an in-memory sink cannot fail");
        writeln!(self.out, "mov rbp, rsp").expect("writing to an in-memory sink cannot fail");

        let body_result = self.gen_stmt(body);

        // `mov rsp, rbp` releases every local and temporary in one
        // instruction (spec §4.6): no per-variable cleanup is emitted.
        writeln!(self.out, "mov rsp, rbp").expect("writing to an in-memory sink cannot fail");
        writeln!(self.out, "pop rbp").expect("writing to an in-memory sink cannot fail");
        writeln!(self.out, "mov rax, 0").expect("writing to an in-memory sink cannot fail");
        writeln!(self.out, "ret").expect("writing to an in-memory sink cannot fail");

        body_result
    }
}

// `gen_declaration` is shared between a function body's statement
// dispatch (spec §4.5) and this driver's bare top-level declarations
// (spec §4.6: "lowered as uninitialized globals placed on the (main)
// stack"); its implementation lives in `stmt.rs` alongside the rest of
// the statement generator.
