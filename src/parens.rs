//! Deciding when a binary operand must be wrapped in parentheses.
//!
//! Parsed trees keep explicit [`ParenExpr`](crate::ast::ParenExpr) nodes,
//! but trees built or rewritten in code often do not. Printing such an
//! operand bare would regroup the expression when read back.

use crate::ast::{BinaryOp, Expr, UNARY_PRECEDENCE};

/// Which operand of a binary expression a child is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Lhs,
    Rhs,
}

/// True if `child`, printed bare as the `side` operand of `op`, would parse
/// back with a different grouping.
///
/// ```
/// use promql_fmt::ast::{BinaryOp, Expr};
/// use promql_fmt::parens::{needs_parens, Side};
///
/// let sum = Expr::binary(BinaryOp::Add, Expr::number(1.0), Expr::number(2.0));
/// assert!(needs_parens(BinaryOp::Mul, &sum, Side::Lhs));
/// assert!(!needs_parens(BinaryOp::Or, &sum, Side::Lhs));
/// ```
pub fn needs_parens(op: BinaryOp, child: &Expr, side: Side) -> bool {
    match child {
        Expr::BinaryExpr(inner) => {
            let (outer, inner) = (op.precedence(), inner.op.precedence());
            if inner != outer {
                return inner < outer;
            }
            // Same level: only the side associativity groups first is safe.
            match side {
                Side::Lhs => op.is_right_associative(),
                Side::Rhs => !op.is_right_associative(),
            }
        }
        // `-a ^ b` reads as `-(a ^ b)`; everywhere else a unary operand
        // binds at least as tightly as its neighbour.
        Expr::UnaryExpr(_) => side == Side::Lhs && op.precedence() > UNARY_PRECEDENCE,
        _ => false,
    }
}
