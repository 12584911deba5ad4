//! `And` / `Or` canonicalization.
//!
//! Both connectives share one engine. Operands are collected into a set
//! ordered by the canonical expression order:
//!
//! 1. operands of the same connective are flattened one level
//! 2. the identity atom is dropped, the absorbing atom short-circuits
//! 3. duplicates collapse (set semantics)
//! 4. an operand next to its own negation short-circuits to the absorbing atom;
//!    a negation of the same connective counts when all its operands are present
//! 5. zero operands give the identity, one gives that operand
//!
//! No other boolean-algebra law is applied; `Or(a, And(a, b))` stays as is.

use std::collections::BTreeSet;
use std::sync::Arc;

use log::trace;

use super::{Boolean, boolean, logical_not};
use crate::core::expr::{Expr, ExprKind};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Connective {
    And,
    Or,
}

impl Connective {
    /// The atom that leaves the result unchanged.
    const fn identity(self) -> bool {
        matches!(self, Connective::And)
    }

    /// The atom that decides the result on its own.
    const fn absorbing(self) -> bool {
        !self.identity()
    }

    const fn name(self) -> &'static str {
        match self {
            Connective::And => "And",
            Connective::Or => "Or",
        }
    }

    fn operands(self, expr: &Expr) -> Option<&[Arc<Expr>]> {
        match (self, &expr.kind) {
            (Connective::And, ExprKind::And(ops)) | (Connective::Or, ExprKind::Or(ops)) => {
                Some(ops)
            }
            _ => None,
        }
    }

    fn build(self, ops: Vec<Arc<Expr>>) -> Expr {
        match self {
            Connective::And => Expr::new(ExprKind::And(ops)),
            Connective::Or => Expr::new(ExprKind::Or(ops)),
        }
    }
}

/// Conjunction of `operands` in canonical form.
///
/// # Example
/// ```
/// use symb_logic::{Expr, bool_true, contains, logical_and, symb};
///
/// let iv = Expr::interval(Expr::integer(1), Expr::integer(2), false, false).unwrap();
/// let a = contains(&symb("a"), &iv).unwrap();
/// let b = contains(&symb("b"), &iv).unwrap();
///
/// assert_eq!(logical_and([a.clone(), b.clone()]), logical_and([b.clone(), a.clone()]));
/// assert_eq!(logical_and([a.clone(), bool_true()]), a);
/// assert_eq!(logical_and(Vec::new()), bool_true());
/// ```
pub fn logical_and(operands: impl IntoIterator<Item = Boolean>) -> Boolean {
    canonicalize(Connective::And, operands)
}

/// Disjunction of `operands` in canonical form. See [`logical_and`].
pub fn logical_or(operands: impl IntoIterator<Item = Boolean>) -> Boolean {
    canonicalize(Connective::Or, operands)
}

fn canonicalize(conn: Connective, operands: impl IntoIterator<Item = Boolean>) -> Boolean {
    let mut set: BTreeSet<Expr> = BTreeSet::new();

    for op in operands {
        if let ExprKind::BooleanAtom(value) = op.kind() {
            if *value == conn.absorbing() {
                trace!("{}: absorbing atom {op} short-circuits", conn.name());
                return boolean(*value);
            }
            continue;
        }
        match conn.operands(&op) {
            Some(inner) => set.extend(inner.iter().map(|arg| (**arg).clone())),
            None => {
                set.insert(op.as_expr().clone());
            }
        }
    }

    // The negation of an item can be a node of this same connective, which
    // would have been flattened on entry. It is then present when all of
    // its operands are.
    let has_complement = |item: &Expr| {
        let negated = logical_not(&Boolean::from_canonical(item.clone()));
        match conn.operands(&negated) {
            Some(inner) => inner.iter().all(|arg| set.contains(&**arg)),
            None => set.contains(negated.as_expr()),
        }
    };
    if let Some(item) = set.iter().find(|item| has_complement(*item)) {
        trace!("{}: {item} appears with its negation", conn.name());
        return boolean(conn.absorbing());
    }

    match set.len() {
        0 => {
            trace!("{}: no operands left, identity", conn.name());
            boolean(conn.identity())
        }
        1 => {
            let mut it = set.into_iter();
            match it.next() {
                Some(only) => {
                    trace!("{}: single operand {only}", conn.name());
                    Boolean::from_canonical(only)
                }
                None => boolean(conn.identity()),
            }
        }
        _ => Boolean::from_canonical(conn.build(set.into_iter().map(Arc::new).collect())),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, reason = "Standard test relaxations")]
mod tests {
    use super::*;
    use crate::{bool_false, bool_true, contains, symb};

    fn atom(name: &str) -> Boolean {
        let iv = Expr::interval(Expr::integer(1), Expr::integer(2), false, false).unwrap();
        contains(&symb(name), &iv).unwrap()
    }

    #[test]
    fn test_arity_collapse() {
        let a = atom("a");
        assert_eq!(logical_and([a.clone()]), a);
        assert_eq!(logical_or([a.clone()]), a);
        assert_eq!(logical_and(Vec::new()), bool_true());
        assert_eq!(logical_or(Vec::new()), bool_false());
    }

    #[test]
    fn test_atoms_absorb() {
        let a = atom("a");
        assert_eq!(logical_and([a.clone(), bool_false()]), bool_false());
        assert_eq!(logical_or([a.clone(), bool_true()]), bool_true());
        assert_eq!(logical_and([a.clone(), bool_true()]), a);
        assert_eq!(logical_or([bool_false(), a.clone()]), a);
    }

    #[test]
    fn test_complement() {
        let a = atom("a");
        let b = atom("b");
        let not_a = logical_not(&a);
        assert_eq!(logical_and([a.clone(), b.clone(), not_a.clone()]), bool_false());
        assert_eq!(logical_or([not_a, b, a]), bool_true());
    }

    #[test]
    fn test_compound_complement() {
        let a = atom("a");
        let b = atom("b");
        let both = logical_and([a.clone(), b.clone()]);
        assert_eq!(logical_and([both.clone(), logical_not(&both)]), bool_false());
        let either = logical_or([a, b]);
        assert_eq!(logical_or([either.clone(), logical_not(&either)]), bool_true());
    }

    #[test]
    fn test_complement_independent_of_grouping() {
        let a = atom("a");
        let b = atom("b");
        let c = atom("c");
        let not_both = logical_or([logical_not(&a), logical_not(&b)]);

        let grouped = logical_and([logical_and([a.clone(), b.clone()]), not_both.clone()]);
        let flat = logical_and([a.clone(), b.clone(), not_both.clone()]);
        let regrouped = logical_and([a.clone(), logical_and([b.clone(), not_both])]);
        assert_eq!(grouped, bool_false());
        assert_eq!(flat, grouped);
        assert_eq!(regrouped, grouped);

        // Only part of the negation is present: nothing collapses.
        let partial = logical_and([logical_and([a.clone(), c.clone()]), logical_not(&b)]);
        assert_eq!(partial.args().len(), 3);
        let both_fail = logical_and([logical_not(&a), logical_not(&b)]);
        let or_grouped = logical_or([logical_or([a.clone(), b.clone()]), both_fail.clone()]);
        assert_eq!(or_grouped, bool_true());
        assert_eq!(logical_or([a, b, both_fail]), bool_true());
    }

    #[test]
    fn test_operands_sorted() {
        let a = atom("a");
        let b = atom("b");
        let and = logical_and([b.clone(), a.clone()]);
        assert_eq!(
            and.to_string(),
            "And(Contains(a, [1, 2]), Contains(b, [1, 2]))"
        );
        match and.kind() {
            ExprKind::And(ops) => assert_eq!(ops.len(), 2),
            other => panic!("expected And, got {other:?}"),
        }
    }

    #[test]
    fn test_mixed_connectives_not_flattened() {
        let a = atom("a");
        let b = atom("b");
        let c = atom("c");
        let inner = logical_or([b, c]);
        let outer = logical_and([a, inner.clone()]);
        assert_eq!(outer.args().len(), 2);
        assert!(outer.args().iter().any(|arg| **arg == *inner.as_expr()));
    }
}
