//! The AST input contract (spec §6): a tagged-variant tree the core
//! borrows from an external front end and never mutates.
//!
//! Every node lives in a [`bumpalo::Bump`] arena supplied by the caller;
//! the core only ever sees `&'ast Node<'ast>`. This mirrors the
//! lifetime-parameterized `ty::Ty<'a>`/`TyKind<'a>` shape the rest of this
//! corpus uses for borrowed, arena-owned trees.

use bumpalo::Bump;
use smallvec::SmallVec;

/// Operators applied by a unary expression (`AST_UNARY_KIND` in the
/// original source).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnaryOp {
    PreIncr,
    PreDecr,
    PostIncr,
    PostDecr,
    Ref,
    Deref,
    Plus,
    Minus,
    Not,
    NotB,
    Sizeof,
}

/// Operators applied by a binary expression (`AST_BIN_KIND`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinOp {
    Mul,
    Div,
    Mod,
    Add,
    Sub,
    LShift,
    RShift,
    Lt,
    Gt,
    Leq,
    Geq,
    Eq,
    Neq,
    And,
    Xor,
    Or,
    AndB,
    OrB,
    Assign,
    Comma,
}

/// `struct` vs `union`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Su {
    Struct,
    Union,
}

/// The data carried by a `Declarator` node: an optional name plus the
/// ordered, innermost-first chain of declarator operators (spec §3's
/// "Invariant on declarators"). Each entry in `ops` is itself a node of
/// kind [`NodeKind::PointerDeclarator`], [`NodeKind::ArrayDeclarator`] or
/// [`NodeKind::FunctionDeclarator`].
#[derive(Debug)]
pub struct DeclaratorData<'ast> {
    pub ident: Option<&'ast str>,
    pub ops: SmallVec<[&'ast Node<'ast>; 4]>,
}

/// A single node of the AST, tagged by [`NodeKind`]. Dispatch is always
/// exhaustive on `kind` — no virtual calls, no open-ended hierarchy (see
/// spec §9 "Dynamic dispatch").
#[derive(Debug)]
pub struct Node<'ast> {
    pub kind: NodeKind<'ast>,
}

#[derive(Debug)]
pub enum NodeKind<'ast> {
    Ident(&'ast str),
    Integer(i64),
    CharacterConstant(i32),
    Str(&'ast str),
    Index {
        a: &'ast Node<'ast>,
        b: &'ast Node<'ast>,
    },
    Member {
        a: &'ast Node<'ast>,
        ident: &'ast str,
    },
    MemberDeref {
        a: &'ast Node<'ast>,
        ident: &'ast str,
    },
    Unary {
        a: &'ast Node<'ast>,
        op: UnaryOp,
    },
    CompoundLiteral {
        type_name: &'ast Node<'ast>,
        list: SmallVec<[&'ast Node<'ast>; 4]>,
    },
    SizeofExpr {
        type_name: &'ast Node<'ast>,
    },
    AlignofExpr {
        type_name: &'ast Node<'ast>,
    },
    Cast {
        type_name: &'ast Node<'ast>,
        expr: &'ast Node<'ast>,
    },
    Bin {
        a: &'ast Node<'ast>,
        b: &'ast Node<'ast>,
        op: BinOp,
    },
    Conditional {
        cond: &'ast Node<'ast>,
        then: &'ast Node<'ast>,
        els: &'ast Node<'ast>,
    },
    StmtLabeled {
        ident: &'ast str,
        stmt: &'ast Node<'ast>,
    },
    StmtLabeledCase {
        expr: &'ast Node<'ast>,
        stmt: &'ast Node<'ast>,
    },
    StmtLabeledDefault {
        stmt: &'ast Node<'ast>,
    },
    StmtExpr(&'ast Node<'ast>),
    StmtComp(SmallVec<[&'ast Node<'ast>; 8]>),
    StmtWhile {
        cond: &'ast Node<'ast>,
        stmt: &'ast Node<'ast>,
    },
    StmtDoWhile {
        cond: &'ast Node<'ast>,
        stmt: &'ast Node<'ast>,
    },
    StmtFor {
        init: Option<&'ast Node<'ast>>,
        cond: Option<&'ast Node<'ast>>,
        step: Option<&'ast Node<'ast>>,
        stmt: &'ast Node<'ast>,
    },
    StmtIf {
        cond: &'ast Node<'ast>,
        then: &'ast Node<'ast>,
        els: Option<&'ast Node<'ast>>,
    },
    StmtSwitch {
        cond: &'ast Node<'ast>,
        stmt: &'ast Node<'ast>,
    },
    StmtGoto(&'ast str),
    StmtContinue,
    StmtBreak,
    StmtReturn(Option<&'ast Node<'ast>>),
    Call {
        callee: &'ast Node<'ast>,
        args: SmallVec<[&'ast Node<'ast>; 6]>,
    },
    Declaration {
        specifiers: &'ast Node<'ast>,
        init_declarators: SmallVec<[&'ast Node<'ast>; 2]>,
    },
    InitDeclarator {
        declarator: &'ast Node<'ast>,
        initializer: Option<&'ast Node<'ast>>,
    },
    Declarator(DeclaratorData<'ast>),
    DeclarationSpecifiers(super::decl_spec::DeclSpec<'ast>),
    AlignmentSpecifier {
        expr: &'ast Node<'ast>,
    },
    PointerDeclarator {
        qualifiers: super::decl_spec::TypeQualifiers,
    },
    ArrayDeclarator {
        size: Option<&'ast Node<'ast>>,
    },
    FunctionDeclarator {
        params: SmallVec<[&'ast Node<'ast>; 4]>,
    },
    ParameterDeclaration {
        specifiers: &'ast Node<'ast>,
        declarator: Option<&'ast Node<'ast>>,
    },
    TranslationUnit(SmallVec<[&'ast Node<'ast>; 8]>),
    FunctionDefinition {
        specifiers: &'ast Node<'ast>,
        declarator: &'ast Node<'ast>,
        body: &'ast Node<'ast>,
    },
    SuSpecifier {
        su: Su,
        ident: Option<&'ast str>,
        declarations: SmallVec<[&'ast Node<'ast>; 4]>,
    },
    SuSpecifierIncomplete {
        su: Su,
        ident: &'ast str,
    },
    StructDeclaration {
        specifier_qualifiers: &'ast Node<'ast>,
        declarators: SmallVec<[&'ast Node<'ast>; 2]>,
    },
    StructDeclarator {
        declarator: Option<&'ast Node<'ast>>,
        bitfield: Option<&'ast Node<'ast>>,
    },
    EnumSpecifier {
        ident: Option<&'ast str>,
        enumerators: SmallVec<[&'ast Node<'ast>; 4]>,
    },
    EnumSpecifierIncomplete {
        ident: &'ast str,
    },
    Enumerator {
        ident: &'ast str,
        expr: Option<&'ast Node<'ast>>,
    },
    DesignatorIndex(&'ast Node<'ast>),
    DesignatorIdent(&'ast str),
    Designation(SmallVec<[&'ast Node<'ast>; 2]>),
    Initializer(SmallVec<[&'ast Node<'ast>; 4]>),
    InitializerListItem {
        designation: Option<&'ast Node<'ast>>,
        initializer: &'ast Node<'ast>,
    },
    TypeName {
        specifier_qualifiers: &'ast Node<'ast>,
        declarator: &'ast Node<'ast>,
    },
    StaticAssert {
        cond: &'ast Node<'ast>,
        message: &'ast Node<'ast>,
    },
}

/// A thin wrapper over the arena a front end would hand the core. The core
/// itself never constructs nodes (spec §1: AST construction is an external
/// collaborator) — these helpers exist only so tests can hand-build trees
/// the same way the original source's `ast_ident`/`ast_bin`/... builder
/// functions did.
pub struct Builder<'ast> {
    pub bump: &'ast Bump,
}

impl<'ast> Builder<'ast> {
    #[must_use]
    pub fn new(bump: &'ast Bump) -> Self {
        Self { bump }
    }

    fn alloc(&self, kind: NodeKind<'ast>) -> &'ast Node<'ast> {
        self.bump.alloc(Node { kind })
    }

    #[must_use]
    pub fn ident(&self, s: &str) -> &'ast Node<'ast> {
        self.alloc(NodeKind::Ident(self.bump.alloc_str(s)))
    }

    #[must_use]
    pub fn integer(&self, n: i64) -> &'ast Node<'ast> {
        self.alloc(NodeKind::Integer(n))
    }

    #[must_use]
    pub fn character_constant(&self, c: i32) -> &'ast Node<'ast> {
        self.alloc(NodeKind::CharacterConstant(c))
    }

    /// `s` is the literal exactly as source text would spell it, quotes
    /// included (spec §6 "original literal including quotes") — the core
    /// never re-quotes or escapes it, only copies it into `.rodata`.
    #[must_use]
    pub fn string(&self, s: &str) -> &'ast Node<'ast> {
        self.alloc(NodeKind::Str(self.bump.alloc_str(s)))
    }

    #[must_use]
    pub fn unary(&self, a: &'ast Node<'ast>, op: UnaryOp) -> &'ast Node<'ast> {
        self.alloc(NodeKind::Unary { a, op })
    }

    #[must_use]
    pub fn bin(&self, a: &'ast Node<'ast>, b: &'ast Node<'ast>, op: BinOp) -> &'ast Node<'ast> {
        self.alloc(NodeKind::Bin { a, b, op })
    }

    #[must_use]
    pub fn call(&self, callee: &'ast Node<'ast>, args: &[&'ast Node<'ast>]) -> &'ast Node<'ast> {
        self.alloc(NodeKind::Call {
            callee,
            args: args.iter().copied().collect(),
        })
    }

    #[must_use]
    pub fn sizeof_expr(&self, type_name: &'ast Node<'ast>) -> &'ast Node<'ast> {
        self.alloc(NodeKind::SizeofExpr { type_name })
    }

    #[must_use]
    pub fn stmt_expr(&self, a: &'ast Node<'ast>) -> &'ast Node<'ast> {
        self.alloc(NodeKind::StmtExpr(a))
    }

    #[must_use]
    pub fn stmt_comp(&self, items: &[&'ast Node<'ast>]) -> &'ast Node<'ast> {
        self.alloc(NodeKind::StmtComp(items.iter().copied().collect()))
    }

    #[must_use]
    pub fn stmt_while(&self, cond: &'ast Node<'ast>, stmt: &'ast Node<'ast>) -> &'ast Node<'ast> {
        self.alloc(NodeKind::StmtWhile { cond, stmt })
    }

    #[must_use]
    pub fn stmt_if(
        &self,
        cond: &'ast Node<'ast>,
        then: &'ast Node<'ast>,
        els: Option<&'ast Node<'ast>>,
    ) -> &'ast Node<'ast> {
        self.alloc(NodeKind::StmtIf { cond, then, els })
    }

    #[must_use]
    pub fn declarator(
        &self,
        ident: Option<&str>,
        ops: &[&'ast Node<'ast>],
    ) -> &'ast Node<'ast> {
        self.alloc(NodeKind::Declarator(DeclaratorData {
            ident: ident.map(|s| &*self.bump.alloc_str(s)),
            ops: ops.iter().copied().collect(),
        }))
    }

    #[must_use]
    pub fn pointer_declarator(&self, qualifiers: super::decl_spec::TypeQualifiers) -> &'ast Node<'ast> {
        self.alloc(NodeKind::PointerDeclarator { qualifiers })
    }

    #[must_use]
    pub fn array_declarator(&self, size: Option<&'ast Node<'ast>>) -> &'ast Node<'ast> {
        self.alloc(NodeKind::ArrayDeclarator { size })
    }

    #[must_use]
    pub fn function_declarator(&self, params: &[&'ast Node<'ast>]) -> &'ast Node<'ast> {
        self.alloc(NodeKind::FunctionDeclarator {
            params: params.iter().copied().collect(),
        })
    }

    #[must_use]
    pub fn declaration_specifiers(
        &self,
        spec: super::decl_spec::DeclSpec<'ast>,
    ) -> &'ast Node<'ast> {
        self.alloc(NodeKind::DeclarationSpecifiers(spec))
    }

    #[must_use]
    pub fn init_declarator(
        &self,
        declarator: &'ast Node<'ast>,
        initializer: Option<&'ast Node<'ast>>,
    ) -> &'ast Node<'ast> {
        self.alloc(NodeKind::InitDeclarator {
            declarator,
            initializer,
        })
    }

    #[must_use]
    pub fn declaration(
        &self,
        specifiers: &'ast Node<'ast>,
        init_declarators: &[&'ast Node<'ast>],
    ) -> &'ast Node<'ast> {
        self.alloc(NodeKind::Declaration {
            specifiers,
            init_declarators: init_declarators.iter().copied().collect(),
        })
    }

    #[must_use]
    pub fn function_definition(
        &self,
        specifiers: &'ast Node<'ast>,
        declarator: &'ast Node<'ast>,
        body: &'ast Node<'ast>,
    ) -> &'ast Node<'ast> {
        self.alloc(NodeKind::FunctionDefinition {
            specifiers,
            declarator,
            body,
        })
    }

    #[must_use]
    pub fn translation_unit(&self, items: &[&'ast Node<'ast>]) -> &'ast Node<'ast> {
        self.alloc(NodeKind::TranslationUnit(items.iter().copied().collect()))
    }

    #[must_use]
    pub fn type_name(
        &self,
        specifier_qualifiers: &'ast Node<'ast>,
        declarator: &'ast Node<'ast>,
    ) -> &'ast Node<'ast> {
        self.alloc(NodeKind::TypeName {
            specifier_qualifiers,
            declarator,
        })
    }
}
