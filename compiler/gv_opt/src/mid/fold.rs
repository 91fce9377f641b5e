//! Constant folding over rendered operand text.
//!
//! Operands reach the mid level as text (`((1 + 2) * x)`), so folding works
//! on the text directly: each parenthesized group is closed innermost-first,
//! and a group of the exact shape `(<int> <op> <int>)` with an arithmetic
//! operator is replaced by its value. Call argument lists (`f(...)`) are
//! never folded as groups, but groups inside them are.

use gv_ir::BinaryOp;

/// Fold every integer-literal arithmetic group in `source`, bottom-up.
///
/// Overflow and division by zero leave the group unfolded.
pub fn fold_constants(source: &str) -> String {
    if !source.contains('(') {
        return source.to_string();
    }

    let mut out = String::with_capacity(source.len());
    let mut open: Vec<usize> = Vec::new();
    for ch in source.chars() {
        match ch {
            '(' => {
                open.push(out.len());
                out.push(ch);
            }
            ')' => {
                out.push(ch);
                let Some(start) = open.pop() else {
                    continue;
                };
                if is_call_arguments(&out[..start]) {
                    continue;
                }
                if let Some(value) = fold_group(&out[start..]) {
                    out.truncate(start);
                    out.push_str(&value.to_string());
                }
            }
            _ => out.push(ch),
        }
    }
    out
}

/// A `(` directly after an identifier opens a call's argument list.
fn is_call_arguments(before: &str) -> bool {
    before
        .chars()
        .next_back()
        .is_some_and(|c| c.is_alphanumeric() || c == '_')
}

/// Evaluate `(<int> <op> <int>)`, or `None` if the group has another shape.
fn fold_group(group: &str) -> Option<i64> {
    let inner = group.strip_prefix('(')?.strip_suffix(')')?;
    let mut parts = inner.split(' ');
    let (left, op, right) = (parts.next()?, parts.next()?, parts.next()?);
    if parts.next().is_some() {
        return None;
    }

    let op = BinaryOp::from_symbol(op).filter(|op| op.is_arithmetic())?;
    let left: i64 = left.parse().ok()?;
    let right: i64 = right.parse().ok()?;
    fold_binary(op, left, right)
}

fn fold_binary(op: BinaryOp, left: i64, right: i64) -> Option<i64> {
    match op {
        BinaryOp::Add => left.checked_add(right),
        BinaryOp::Sub => left.checked_sub(right),
        BinaryOp::Mul => left.checked_mul(right),
        // Division by zero stays unfolded; checked_div/rem return None.
        BinaryOp::Div | BinaryOp::IntDiv => left.checked_div(right),
        BinaryOp::Mod => left.checked_rem(right),
        _ => None,
    }
}
