//! Structural hashing.
//!
//! The hash of a node combines its kind discriminant, any extra state and
//! the cached hashes of its children in stored order. Children are never
//! re-walked, so hashing a node is O(number of direct children).

use std::hash::{Hash, Hasher};

use rustc_hash::FxHasher;

use super::ExprKind;

/// Compute the structural hash for a node of the given kind.
#[must_use]
pub fn compute_expr_hash(kind: &ExprKind) -> u64 {
    let mut hasher = FxHasher::default();
    std::mem::discriminant(kind).hash(&mut hasher);

    match kind {
        ExprKind::Symbol(s) => s.hash(&mut hasher),
        ExprKind::Integer(n) => n.hash(&mut hasher),
        ExprKind::Rational(r) => r.hash(&mut hasher),
        ExprKind::RealDouble(d) => d.hash(&mut hasher),
        ExprKind::BooleanAtom(b) => b.hash(&mut hasher),
        ExprKind::EmptySet => {}
        ExprKind::Interval(iv) => {
            iv.start.hash.hash(&mut hasher);
            iv.end.hash.hash(&mut hasher);
            iv.left_open.hash(&mut hasher);
            iv.right_open.hash(&mut hasher);
        }
        ExprKind::Contains { expr, set } => {
            expr.hash.hash(&mut hasher);
            set.hash.hash(&mut hasher);
        }
        ExprKind::Not(arg) => arg.hash.hash(&mut hasher),
        // Operands are already in canonical order, an ordered combine is
        // enough to make the hash insertion-order independent.
        ExprKind::And(ops) | ExprKind::Or(ops) | ExprKind::Add(ops) | ExprKind::Mul(ops) => {
            ops.len().hash(&mut hasher);
            for op in ops {
                op.hash.hash(&mut hasher);
            }
        }
        ExprKind::Piecewise(branches) => {
            branches.len().hash(&mut hasher);
            for branch in branches {
                branch.value.hash.hash(&mut hasher);
                branch.condition.hash.hash(&mut hasher);
            }
        }
        ExprKind::Pow(base, exp) => {
            base.hash.hash(&mut hasher);
            exp.hash.hash(&mut hasher);
        }
        ExprKind::Subs { arg, bindings } => {
            arg.hash.hash(&mut hasher);
            bindings.len().hash(&mut hasher);
            for (var, point) in bindings {
                var.hash.hash(&mut hasher);
                point.hash.hash(&mut hasher);
            }
        }
    }

    hasher.finish()
}
