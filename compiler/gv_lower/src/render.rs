//! Expression → operand text.

use std::fmt::Write;

use gv_ir::Expr;
use gv_stack::ensure_sufficient_stack;

use crate::ConstantTable;

/// Render `expr` as MLIR operand text.
///
/// - integer literal: decimal (`42`)
/// - boolean literal: `1` / `0`
/// - string literal: its raw text
/// - identifier: its name, or the value of a same-named constant
/// - binary: `(<left> <op> <right>)`
/// - call: `name(a, b)`
pub fn render_expr(expr: &Expr, constants: &ConstantTable<'_>) -> String {
    let mut out = String::new();
    render_into(&mut out, expr, constants);
    out
}

fn render_into(out: &mut String, expr: &Expr, constants: &ConstantTable<'_>) {
    ensure_sufficient_stack(|| match expr {
        Expr::Literal(lit) => {
            let _ = write!(out, "{lit}");
        }
        Expr::Ident(name) => match constants.get(name.as_str()) {
            Some(value) => {
                let _ = write!(out, "{value}");
            }
            None => out.push_str(name),
        },
        Expr::Binary { op, left, right } => {
            out.push('(');
            render_into(out, left, constants);
            let _ = write!(out, " {op} ");
            render_into(out, right, constants);
            out.push(')');
        }
        Expr::Call { callee, args } => {
            out.push_str(callee);
            out.push('(');
            for (i, arg) in args.iter().enumerate() {
                if i > 0 {
                    out.push_str(", ");
                }
                render_into(out, arg, constants);
            }
            out.push(')');
        }
    });
}
