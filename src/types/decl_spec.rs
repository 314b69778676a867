//! Declaration specifiers (spec §3 "Declaration specifiers").
//!
//! Storage-class specifiers, type qualifiers and function specifiers are
//! only ever tested for presence by the type algebra (§4.1 `is_const`) —
//! never counted past one — so they are modeled as `bitflags!` sets rather
//! than the raw `char[N]` count arrays of the original source. The one bag
//! where repetition is semantically load-bearing is `builtin_type_specifiers`
//! (`long long`, `unsigned int`, ...), which stays a genuine count array.

use smallvec::SmallVec;

use super::ast::Node;

bitflags::bitflags! {
    /// One bit per storage-class-specifier keyword.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct StorageClassSpecifiers: u8 {
        const TYPEDEF      = 1 << 0;
        const EXTERN       = 1 << 1;
        const STATIC       = 1 << 2;
        const THREAD_LOCAL = 1 << 3;
        const AUTO         = 1 << 4;
        const REGISTER     = 1 << 5;
    }
}

bitflags::bitflags! {
    /// One bit per type qualifier keyword.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct TypeQualifiers: u8 {
        const CONST    = 1 << 0;
        const RESTRICT = 1 << 1;
        const VOLATILE = 1 << 2;
        const ATOMIC   = 1 << 3;
    }
}

bitflags::bitflags! {
    /// One bit per function specifier keyword.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct FunctionSpecifiers: u8 {
        const INLINE   = 1 << 0;
        const NORETURN = 1 << 1;
    }
}

/// The built-in type tokens that can combine inside one specifier list
/// (`int`, `long`, `long long`, `unsigned long`, ...). Index order matches
/// the original source's `ast_builtin_type` enum.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(usize)]
pub enum BuiltinType {
    Void = 0,
    Char,
    Short,
    Int,
    Long,
    Float,
    Double,
    Signed,
    Unsigned,
    Bool,
    Complex,
}

pub const N_BUILTIN_TYPES: usize = 11;

/// A declaration-specifier bag: the storage class, the combined built-in
/// type tokens, qualifiers, function specifiers, and any user-defined type
/// specifiers (struct/union/enum/typedef references) or alignment
/// specifiers that appeared in the same specifier list.
#[derive(Debug)]
pub struct DeclSpec<'ast> {
    pub storage_class: StorageClassSpecifiers,
    pub builtin_types: [u8; N_BUILTIN_TYPES],
    pub qualifiers: TypeQualifiers,
    pub function_specifiers: FunctionSpecifiers,
    pub type_specifiers: SmallVec<[&'ast Node<'ast>; 1]>,
    pub alignment_specifiers: SmallVec<[&'ast Node<'ast>; 1]>,
}

impl<'ast> DeclSpec<'ast> {
    #[must_use]
    pub fn empty() -> Self {
        Self {
            storage_class: StorageClassSpecifiers::empty(),
            builtin_types: [0; N_BUILTIN_TYPES],
            qualifiers: TypeQualifiers::empty(),
            function_specifiers: FunctionSpecifiers::empty(),
            type_specifiers: SmallVec::new(),
            alignment_specifiers: SmallVec::new(),
        }
    }

    #[must_use]
    pub fn with_builtin(mut self, bt: BuiltinType) -> Self {
        self.builtin_types[bt as usize] += 1;
        self
    }

    #[must_use]
    pub fn with_qualifiers(mut self, q: TypeQualifiers) -> Self {
        self.qualifiers |= q;
        self
    }

    #[must_use]
    pub fn with_storage_class(mut self, s: StorageClassSpecifiers) -> Self {
        self.storage_class |= s;
        self
    }

    #[must_use]
    pub fn has(&self, bt: BuiltinType) -> bool {
        self.builtin_types[bt as usize] > 0
    }

    #[must_use]
    pub fn is_extern(&self) -> bool {
        self.storage_class.contains(StorageClassSpecifiers::EXTERN)
    }
}
