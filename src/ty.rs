//! The type algebra (spec §4.1): a type is a declaration-specifier bag
//! plus a declarator-operator chain plus an "application cursor" that
//! tracks how many operators a chain of unary operators (`&`, `*`, `()`,
//! `[]`) has already peeled off. This is the same `(address_of, cursor,
//! spec, decl)` four-tuple as the original source's `struct type`, just
//! with the cursor bounds-checked by construction instead of by
//! convention.

use if_chain::if_chain;

use crate::diag::{Error, ErrorKind};
use crate::types::ast::{DeclaratorData, Node, NodeKind};
use crate::types::decl_spec::{BuiltinType, DeclSpec, TypeQualifiers};

/// A type: `address_of` records an implicit extra pointer level produced
/// by `&` (spec glossary "Address-of flag"); `cursor` indexes into
/// `decl.ops`, the declarator's operator chain, read outward from the
/// identifier.
#[derive(Debug, Clone, Copy)]
pub struct Ty<'ast> {
    pub address_of: bool,
    pub cursor: usize,
    pub spec: &'ast DeclSpec<'ast>,
    pub decl: &'ast DeclaratorData<'ast>,
}

impl<'ast> Ty<'ast> {
    #[must_use]
    pub fn new(spec: &'ast DeclSpec<'ast>, decl: &'ast DeclaratorData<'ast>) -> Self {
        Self { address_of: false, cursor: 0, spec, decl }
    }

    fn op_at_cursor(&self) -> Option<&'ast Node<'ast>> {
        self.decl.ops.get(self.cursor).copied()
    }

    /// A fully-applied type (spec glossary): every declarator operator has
    /// been consumed and there's no outstanding address-of.
    #[must_use]
    pub fn is_fully_applied(&self) -> bool {
        !self.address_of && self.cursor == self.decl.ops.len()
    }

    #[must_use]
    pub fn is_pointer(&self) -> bool {
        if self.address_of {
            return true;
        }
        if self.is_fully_applied() {
            return false;
        }
        matches!(self.op_at_cursor().map(|n| &n.kind), Some(NodeKind::PointerDeclarator { .. }))
    }

    #[must_use]
    pub fn is_arithmetic(&self) -> bool {
        if !self.is_fully_applied() {
            return false;
        }
        [
            BuiltinType::Char,
            BuiltinType::Short,
            BuiltinType::Int,
            BuiltinType::Long,
            BuiltinType::Float,
            BuiltinType::Double,
            BuiltinType::Signed,
            BuiltinType::Unsigned,
        ]
        .iter()
        .any(|&bt| self.spec.has(bt))
    }

    /// "Modifiable lvalue" needs this; see spec glossary.
    #[must_use]
    pub fn is_const(&self) -> bool {
        if_chain! {
            if self.is_fully_applied();
            then {
                return self.spec.qualifiers.contains(TypeQualifiers::CONST);
            }
        }
        if self.address_of {
            // The result of the address-of operator can't be reassigned.
            return true;
        }
        match self.op_at_cursor().map(|n| &n.kind) {
            Some(NodeKind::FunctionDeclarator { .. } | NodeKind::ArrayDeclarator { .. }) => true,
            Some(NodeKind::PointerDeclarator { qualifiers }) => qualifiers.contains(TypeQualifiers::CONST),
            _ => unreachable!("declarator operator chain violates shape contract"),
        }
    }

    /// `&`: legal iff not already address-of'd. The result is never an
    /// lvalue (checked by the caller, which is why this only toggles the
    /// type side of the rule).
    pub fn apply_address_of(&mut self) -> Result<(), Error> {
        if self.address_of {
            return Err(Error::new(ErrorKind::SemanticType, "can't take address of", self.render()));
        }
        self.address_of = true;
        Ok(())
    }

    /// `*`: cancels an outstanding address-of, or advances past a
    /// pointer-declarator operator.
    pub fn apply_deref(&mut self) -> Result<(), Error> {
        if self.address_of {
            self.address_of = false;
            return Ok(());
        }
        if_chain! {
            if !self.is_fully_applied();
            if let Some(n) = self.op_at_cursor();
            if matches!(n.kind, NodeKind::PointerDeclarator { .. });
            then {
                self.cursor += 1;
                return Ok(());
            }
        }
        Err(Error::new(ErrorKind::SemanticType, "can't apply dereference operator", self.render()))
    }

    /// `()`: legal only when the operator at the cursor is a
    /// function-declarator.
    pub fn apply_call(&mut self) -> Result<(), Error> {
        if_chain! {
            if !self.address_of;
            if !self.is_fully_applied();
            if let Some(n) = self.op_at_cursor();
            if matches!(n.kind, NodeKind::FunctionDeclarator { .. });
            then {
                self.cursor += 1;
                return Ok(());
            }
        }
        Err(Error::new(ErrorKind::SemanticType, "can't call", self.render()))
    }

    /// `[]`: legal only when the operator at the cursor is an
    /// array-declarator.
    pub fn apply_subscript(&mut self) -> Result<(), Error> {
        if_chain! {
            if !self.address_of;
            if !self.is_fully_applied();
            if let Some(n) = self.op_at_cursor();
            if matches!(n.kind, NodeKind::ArrayDeclarator { .. });
            then {
                self.cursor += 1;
                return Ok(());
            }
        }
        Err(Error::new(ErrorKind::SemanticType, "can't apply array subscripting", self.render()))
    }

    /// The size in bytes of this type, or a size-unknown diagnostic if the
    /// subset can't compute it (spec §4.1 `size`).
    pub fn size(&self) -> Result<u32, Error> {
        if self.address_of {
            return Ok(8);
        }
        if self.is_fully_applied() {
            if self.spec.has(BuiltinType::Char) {
                return Ok(1);
            }
            if self.spec.has(BuiltinType::Int) {
                return Ok(4);
            }
            if self.spec.has(BuiltinType::Void) {
                return Ok(0);
            }
            return Err(Error::new(ErrorKind::SizeUnknown, "cannot determine size of", self.render()));
        }
        match self.op_at_cursor().map(|n| &n.kind) {
            Some(NodeKind::PointerDeclarator { .. }) => Ok(8),
            Some(NodeKind::FunctionDeclarator { .. }) => Ok(8),
            Some(NodeKind::ArrayDeclarator { size }) => {
                let Some(size_expr) = size else {
                    return Err(Error::new(ErrorKind::SizeUnknown, "cannot determine size of", self.render()));
                };
                let n = const_eval(size_expr)?;
                let mut elem = *self;
                elem.apply_subscript()?;
                let elem_size = elem.size()?;
                let total = u32::try_from(n)
                    .ok()
                    .and_then(|n| n.checked_mul(elem_size))
                    .ok_or_else(|| Error::new(ErrorKind::SizeUnknown, "cannot determine size of", self.render()))?;
                Ok(total)
            }
            _ => unreachable!("declarator operator chain violates shape contract"),
        }
    }

    fn render(&self) -> String {
        crate::pretty::render_ty(self)
    }
}

/// Build the `Ty` a `(specifiers, declarator)` node pair denotes — the
/// shape every declaration, parameter and type-name shares (spec §3 "AST").
pub(crate) fn ty_of<'ast>(spec_node: &'ast Node<'ast>, decl_node: &'ast Node<'ast>) -> Ty<'ast> {
    let spec = match &spec_node.kind {
        NodeKind::DeclarationSpecifiers(s) => s,
        _ => unreachable!("shape contract: specifier position must hold DeclarationSpecifiers"),
    };
    let decl = match &decl_node.kind {
        NodeKind::Declarator(d) => d,
        _ => unreachable!("shape contract: declarator position must hold Declarator"),
    };
    Ty::new(spec, decl)
}

/// Build the `Ty` a `sizeof(type)` operand denotes.
pub(crate) fn ty_of_type_name<'ast>(n: &'ast Node<'ast>) -> Ty<'ast> {
    match &n.kind {
        NodeKind::TypeName { specifier_qualifiers, declarator } => ty_of(specifier_qualifiers, declarator),
        _ => unreachable!("shape contract: sizeof operand must hold TypeName"),
    }
}

/// Evaluate an AST node as a compile-time integer constant (spec §7
/// "Constant-eval"). The subset supported is intentionally tiny: only a
/// literal integer is accepted, exactly as the original source's
/// `const_eval` does.
pub fn const_eval(n: &Node<'_>) -> Result<i64, Error> {
    match n.kind {
        NodeKind::Integer(v) => Ok(v),
        _ => Err(Error::new(
            ErrorKind::ConstantEval,
            "can't eval const expression",
            crate::pretty::render_node(n),
        )),
    }
}
