//! The val abstraction and stack discipline (spec §4.3): every computed
//! intermediate is described by a stack offset, an indirection depth and
//! an lvalue flag, and is read/stored through two small emitters that
//! don't care whether the slot holds a local, a dereferenced pointer, or
//! a compound-operator result.
//!
//! All storage is monotonic: `push_new` only ever moves the stack pointer
//! further from zero, and nothing in a function body ever reclaims a
//! slot (spec §4.3 "there are no 'live range' considerations").

use std::fmt::Write;

use crate::diag::{Error, ErrorKind};
use crate::ty::Ty;

/// `deref_depth == 0`: the value lives at `[rbp + base_offset]`.
/// `deref_depth > 0`: read `[rbp + base_offset]`, chase `deref_depth - 1`
/// further indirections, and the final memory cell is the value itself.
#[derive(Debug, Clone, Copy)]
pub struct Val<'ast> {
    pub base_offset: i64,
    pub deref_depth: i32,
    pub is_lvalue: bool,
    pub ty: Ty<'ast>,
}

impl<'ast> Val<'ast> {
    /// "Modifiable lvalue" (spec glossary): an lvalue whose type isn't
    /// const.
    #[must_use]
    pub fn is_modifiable_lvalue(&self) -> bool {
        self.is_lvalue && !self.ty.is_const()
    }
}

/// The 8/4/1-byte names of one physical register, so `read`/`store` can
/// size the instruction to the value's type without the caller juggling
/// three string literals at every call site.
#[derive(Debug, Clone, Copy)]
pub struct RegFamily {
    pub r64: &'static str,
    pub r32: &'static str,
    pub r8: &'static str,
}

impl RegFamily {
    #[must_use]
    pub const fn new(r64: &'static str, r32: &'static str, r8: &'static str) -> Self {
        Self { r64, r32, r8 }
    }

    fn sized(self, size: u32) -> &'static str {
        match size {
            1 => self.r8,
            4 => self.r32,
            8 => self.r64,
            _ => unreachable!("Ty::size() only ever returns 0, 1, 4 or 8 in this subset"),
        }
    }
}

/// The only two temporaries the expression generator spills binary
/// operands into (spec §4.3 "Register convention"). `rcx` is reserved as
/// scratch for pointer chasing in `read`/`store` themselves and is never
/// named here.
pub const RAX: RegFamily = RegFamily::new("rax", "eax", "al");
pub const RBX: RegFamily = RegFamily::new("rbx", "ebx", "bl");

fn sized_error(kind: ErrorKind, phrase: &str, t: &Ty<'_>) -> Error {
    Error::new(kind, phrase, crate::pretty::render_ty(t))
}

/// Read the effective value of `v` into `reg` (spec §4.3 `read`).
pub fn read(out: &mut impl Write, v: &Val<'_>, reg: RegFamily) -> Result<(), Error> {
    let size = v.ty.size()?;
    if size == 0 {
        return Err(sized_error(ErrorKind::SemanticType, "can't read void type", &v.ty));
    }
    let regs = reg.sized(size);

    if size != 8 {
        writeln!(out, "xor {}, {}", reg.r64, reg.r64).expect("writing to an in-memory sink cannot fail");
    }

    if v.deref_depth == 0 {
        writeln!(out, "mov {regs}, {} [rbp{}] ; read", mov_size_word(size), v.base_offset)
            .expect("writing to an in-memory sink cannot fail");
        return Ok(());
    }

    writeln!(out, "; read (deref_depth={}) {{", v.deref_depth).expect("writing to an in-memory sink cannot fail");
    writeln!(out, "mov rcx, qword [rbp{}]", v.base_offset).expect("writing to an in-memory sink cannot fail");
    for _ in 0..v.deref_depth - 1 {
        writeln!(out, "mov rcx, [rcx]").expect("writing to an in-memory sink cannot fail");
    }
    writeln!(out, "mov {regs}, {} [rcx]", mov_size_word(size)).expect("writing to an in-memory sink cannot fail");
    writeln!(out, "; }}").expect("writing to an in-memory sink cannot fail");
    Ok(())
}

/// Store `reg` into the location `v` describes (spec §4.3 `store`).
pub fn store(out: &mut impl Write, v: &Val<'_>, reg: RegFamily) -> Result<(), Error> {
    let size = v.ty.size()?;
    if size == 0 {
        return Err(sized_error(ErrorKind::SemanticType, "can't store void type", &v.ty));
    }
    let regs = reg.sized(size);

    if v.deref_depth == 0 {
        writeln!(out, "mov {} [rbp{}], {regs} ; store", mov_size_word(size), v.base_offset)
            .expect("writing to an in-memory sink cannot fail");
        return Ok(());
    }

    writeln!(out, "; store (deref_depth={}) {{", v.deref_depth).expect("writing to an in-memory sink cannot fail");
    writeln!(out, "mov rcx, qword [rbp{}]", v.base_offset).expect("writing to an in-memory sink cannot fail");
    for _ in 0..v.deref_depth - 1 {
        writeln!(out, "mov rcx, [rcx]").expect("writing to an in-memory sink cannot fail");
    }
    writeln!(out, "mov {} [rcx], {regs}", mov_size_word(size)).expect("writing to an in-memory sink cannot fail");
    writeln!(out, "; }}").expect("writing to an in-memory sink cannot fail");
    Ok(())
}

fn mov_size_word(size: u32) -> &'static str {
    match size {
        1 => "byte",
        4 => "dword",
        8 => "qword",
        _ => unreachable!("Ty::size() only ever returns 0, 1, 4 or 8 in this subset"),
    }
}

/// Allocate a fresh 8-byte slot (spec §4.3 `push_new`), store `reg` into
/// it sized to `ty`, and return the resulting non-lvalue `Val`.
pub fn push_new<'ast>(
    out: &mut impl Write,
    sp: &mut i64,
    ty: Ty<'ast>,
    reg: RegFamily,
) -> Result<Val<'ast>, Error> {
    *sp -= 8;
    let v = Val { base_offset: *sp, deref_depth: 0, is_lvalue: false, ty };
    store(out, &v, reg)?;
    Ok(v)
}
