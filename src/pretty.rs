//! The AST/type pretty-printer, consumed only by diagnostics (spec §1:
//! "a pretty-printer only for diagnostics"). This is a read-only
//! projection of a sub-tree or [`Ty`] into a short one-line string; it has
//! no bearing on code generation.

use std::fmt::Write as _;

use itertools::Itertools;

use crate::ty::Ty;
use crate::types::ast::{BinOp, Node, NodeKind, Su, UnaryOp};
use crate::types::decl_spec::{BuiltinType, DeclSpec};

fn unary_op_str(op: UnaryOp) -> &'static str {
    match op {
        UnaryOp::PreIncr | UnaryOp::PostIncr => "++",
        UnaryOp::PreDecr | UnaryOp::PostDecr => "--",
        UnaryOp::Ref => "&",
        UnaryOp::Deref => "*",
        UnaryOp::Plus => "+",
        UnaryOp::Minus => "-",
        UnaryOp::Not => "!",
        UnaryOp::NotB => "~",
        UnaryOp::Sizeof => "sizeof",
    }
}

fn bin_op_str(op: BinOp) -> &'static str {
    match op {
        BinOp::Mul => "*",
        BinOp::Div => "/",
        BinOp::Mod => "%",
        BinOp::Add => "+",
        BinOp::Sub => "-",
        BinOp::LShift => "<<",
        BinOp::RShift => ">>",
        BinOp::Lt => "<",
        BinOp::Gt => ">",
        BinOp::Leq => "<=",
        BinOp::Geq => ">=",
        BinOp::Eq => "==",
        BinOp::Neq => "!=",
        BinOp::And => "&",
        BinOp::Xor => "^",
        BinOp::Or => "|",
        BinOp::AndB => "&&",
        BinOp::OrB => "||",
        BinOp::Assign => "=",
        BinOp::Comma => ",",
    }
}

/// Render a single AST sub-tree the way the original source's
/// `ast_fprint` would, minus indentation: compact enough for a one-line
/// diagnostic.
#[must_use]
pub fn render_node(n: &Node<'_>) -> String {
    let mut s = String::new();
    write_node(&mut s, n).expect("formatting to a String cannot fail");
    s
}

fn write_node(out: &mut String, n: &Node<'_>) -> std::fmt::Result {
    match &n.kind {
        NodeKind::Ident(s) => write!(out, "{s}"),
        NodeKind::Integer(v) => write!(out, "{v}"),
        NodeKind::CharacterConstant(c) => write!(out, "'{}'", char::from_u32(*c as u32).unwrap_or('?')),
        NodeKind::Str(s) => write!(out, "{s}"),
        NodeKind::Index { a, b } => {
            write_node(out, a)?;
            out.push('[');
            write_node(out, b)?;
            out.push(']');
            Ok(())
        }
        NodeKind::Member { a, ident } => {
            write_node(out, a)?;
            write!(out, ".{ident}")
        }
        NodeKind::MemberDeref { a, ident } => {
            write_node(out, a)?;
            write!(out, "->{ident}")
        }
        NodeKind::Unary { a, op } => {
            if matches!(op, UnaryOp::PostIncr | UnaryOp::PostDecr) {
                write_node(out, a)?;
                write!(out, "{}", unary_op_str(*op))
            } else {
                write!(out, "{}", unary_op_str(*op))?;
                write_node(out, a)
            }
        }
        NodeKind::CompoundLiteral { type_name, list } => {
            write!(out, "({})", DisplayType(type_name))?;
            out.push_str("{ ");
            write_list(out, list)?;
            out.push_str(" }");
            Ok(())
        }
        NodeKind::SizeofExpr { type_name } => write!(out, "sizeof({})", DisplayType(type_name)),
        NodeKind::AlignofExpr { type_name } => write!(out, "_Alignof({})", DisplayType(type_name)),
        NodeKind::Cast { type_name, expr } => {
            write!(out, "({})", DisplayType(type_name))?;
            write_node(out, expr)
        }
        NodeKind::Bin { a, b, op } => {
            out.push('(');
            write_node(out, a)?;
            write!(out, " {} ", bin_op_str(*op))?;
            write_node(out, b)?;
            out.push(')');
            Ok(())
        }
        NodeKind::Conditional { cond, then, els } => {
            write_node(out, cond)?;
            out.push_str(" ? ");
            write_node(out, then)?;
            out.push_str(" : ");
            write_node(out, els)
        }
        NodeKind::StmtLabeled { ident, stmt } => {
            write!(out, "{ident}: ")?;
            write_node(out, stmt)
        }
        NodeKind::StmtLabeledCase { expr, stmt } => {
            out.push_str("case ");
            write_node(out, expr)?;
            out.push_str(": ");
            write_node(out, stmt)
        }
        NodeKind::StmtLabeledDefault { stmt } => {
            out.push_str("default: ");
            write_node(out, stmt)
        }
        NodeKind::StmtExpr(a) => {
            write_node(out, a)?;
            out.push(';');
            Ok(())
        }
        NodeKind::StmtComp(items) => {
            out.push('{');
            for it in items {
                write_node(out, it)?;
            }
            out.push('}');
            Ok(())
        }
        NodeKind::StmtWhile { cond, .. } => {
            out.push_str("while (");
            write_node(out, cond)?;
            out.push_str(") ...")
        }
        NodeKind::StmtDoWhile { cond, .. } => {
            out.push_str("do ... while (");
            write_node(out, cond)?;
            out.push(')')
        }
        NodeKind::StmtFor { .. } => out.push_str("for (...) ..."),
        NodeKind::StmtIf { cond, .. } => {
            out.push_str("if (");
            write_node(out, cond)?;
            out.push_str(") ...")
        }
        NodeKind::StmtSwitch { cond, .. } => {
            out.push_str("switch (");
            write_node(out, cond)?;
            out.push_str(") ...")
        }
        NodeKind::StmtGoto(ident) => write!(out, "goto {ident};"),
        NodeKind::StmtContinue => out.push_str("continue;"),
        NodeKind::StmtBreak => out.push_str("break;"),
        NodeKind::StmtReturn(e) => {
            out.push_str("return");
            if let Some(e) = e {
                out.push(' ');
                write_node(out, e)?;
            }
            out.push(';');
            Ok(())
        }
        NodeKind::Call { callee, args } => {
            write_node(out, callee)?;
            out.push('(');
            write_list(out, args)?;
            out.push(')');
            Ok(())
        }
        NodeKind::Declaration { specifiers, init_declarators } => {
            write!(out, "{}", DisplayType(specifiers))?;
            out.push(' ');
            write_list(out, init_declarators)
        }
        NodeKind::InitDeclarator { declarator, initializer } => {
            write_node(out, declarator)?;
            if let Some(init) = initializer {
                out.push_str(" = ");
                write_node(out, init)?;
            }
            Ok(())
        }
        NodeKind::Declarator(d) => {
            out.push_str(d.ident.unwrap_or("<abstract>"));
            Ok(())
        }
        NodeKind::DeclarationSpecifiers(spec) => write!(out, "{}", DisplayDeclSpec(spec)),
        NodeKind::AlignmentSpecifier { expr } => {
            out.push_str("_Alignas(");
            write_node(out, expr)?;
            out.push(')');
            Ok(())
        }
        NodeKind::PointerDeclarator { .. } => out.push('*'),
        NodeKind::ArrayDeclarator { size } => {
            out.push('[');
            if let Some(size) = size {
                write_node(out, size)?;
            }
            out.push(']');
            Ok(())
        }
        NodeKind::FunctionDeclarator { .. } => out.push_str("(...)"),
        NodeKind::ParameterDeclaration { specifiers, declarator } => {
            write!(out, "{}", DisplayType(specifiers))?;
            if let Some(d) = declarator {
                out.push(' ');
                write_node(out, d)?;
            }
            Ok(())
        }
        NodeKind::TranslationUnit(items) => write_list(out, items),
        NodeKind::FunctionDefinition { specifiers, declarator, .. } => {
            write!(out, "{}", DisplayType(specifiers))?;
            out.push(' ');
            write_node(out, declarator)?;
            out.push_str(" { ... }")
        }
        NodeKind::SuSpecifier { su, ident, .. } => {
            write!(out, "{} {}", su_str(*su), ident.unwrap_or(""))
        }
        NodeKind::SuSpecifierIncomplete { su, ident } => write!(out, "{} {ident}", su_str(*su)),
        NodeKind::StructDeclaration { declarators, .. } => write_list(out, declarators),
        NodeKind::StructDeclarator { declarator, .. } => {
            if let Some(d) = declarator {
                write_node(out, d)
            } else {
                Ok(())
            }
        }
        NodeKind::EnumSpecifier { ident, .. } => write!(out, "enum {}", ident.unwrap_or("")),
        NodeKind::EnumSpecifierIncomplete { ident } => write!(out, "enum {ident}"),
        NodeKind::Enumerator { ident, .. } => write!(out, "{ident}"),
        NodeKind::DesignatorIndex(e) => {
            out.push('[');
            write_node(out, e)?;
            out.push(']');
            Ok(())
        }
        NodeKind::DesignatorIdent(ident) => write!(out, ".{ident}"),
        NodeKind::Designation(ds) => write_list(out, ds),
        NodeKind::Initializer(items) => {
            out.push_str("{ ");
            write_list(out, items)?;
            out.push_str(" }");
            Ok(())
        }
        NodeKind::InitializerListItem { initializer, .. } => write_node(out, initializer),
        NodeKind::TypeName { specifier_qualifiers, declarator } => {
            write!(out, "{}", DisplayType(specifier_qualifiers))?;
            write_node(out, declarator)
        }
        NodeKind::StaticAssert { cond, .. } => {
            out.push_str("_Static_assert(");
            write_node(out, cond)?;
            out.push(')');
            Ok(())
        }
    }
}

fn write_list(out: &mut String, items: &[&Node<'_>]) -> std::fmt::Result {
    out.push_str(&items.iter().map(|n| render_node(n)).join(", "));
    Ok(())
}

fn su_str(su: Su) -> &'static str {
    match su {
        Su::Struct => "struct",
        Su::Union => "union",
    }
}

struct DisplayType<'a, 'ast>(&'a Node<'ast>);
impl std::fmt::Display for DisplayType<'_, '_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.0.kind {
            NodeKind::DeclarationSpecifiers(spec) => write!(f, "{}", DisplayDeclSpec(spec)),
            _ => write!(f, "{}", render_node(self.0)),
        }
    }
}

struct DisplayDeclSpec<'a, 'ast>(&'a DeclSpec<'ast>);
impl std::fmt::Display for DisplayDeclSpec<'_, '_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let spec = self.0;
        let names = [
            (BuiltinType::Void, "void"),
            (BuiltinType::Char, "char"),
            (BuiltinType::Short, "short"),
            (BuiltinType::Int, "int"),
            (BuiltinType::Long, "long"),
            (BuiltinType::Float, "float"),
            (BuiltinType::Double, "double"),
            (BuiltinType::Signed, "signed"),
            (BuiltinType::Unsigned, "unsigned"),
            (BuiltinType::Bool, "_Bool"),
            (BuiltinType::Complex, "_Complex"),
        ];
        let words = names
            .iter()
            .flat_map(|&(bt, name)| std::iter::repeat(name).take(spec.builtin_types[bt as usize] as usize))
            .join(" ");
        f.write_str(&words)
    }
}

/// Render a [`Ty`] the way the original source's `warn_type` does: the
/// application state plus the underlying specifier/declarator pretty
/// print.
#[must_use]
pub fn render_ty(t: &Ty<'_>) -> String {
    let mut s = String::new();
    if t.address_of {
        s.push_str("&, ");
    }
    let _ = write!(s, "app: {}, ", t.cursor);
    let _ = write!(s, "{}", DisplayDeclSpec(t.spec));
    for op in &t.decl.ops[t.cursor.min(t.decl.ops.len())..] {
        s.push(' ');
        let _ = write_node(&mut s, op);
    }
    if let Some(ident) = t.decl.ident {
        let _ = write!(s, " {ident}");
    }
    s
}
