//! The core's data model (spec §3): the AST input contract, declaration
//! specifiers, and the built-in-type cache shared by the type algebra.

pub mod ast;
pub mod decl_spec;

pub use ast::{BinOp, DeclaratorData, Node, NodeKind, Su, UnaryOp};
pub use decl_spec::{BuiltinType, DeclSpec, FunctionSpecifiers, StorageClassSpecifiers, TypeQualifiers};
