//! Canonical ordering for expressions.
//!
//! `expr_cmp` is a total order consistent with structural equality: it
//! returns `Equal` exactly when the two nodes are equal. The primary key
//! groups terms by base, exponent and coefficient (so `x`, `2*x`, `x**2`
//! sort next to each other); ties fall through to a strict kind/content
//! comparison.

use std::cmp::Ordering as CmpOrdering;

use super::{Expr, ExprKind};

static EXPR_ONE: std::sync::LazyLock<Expr> = std::sync::LazyLock::new(|| Expr::integer(1));

/// Compare expressions for canonical ordering.
/// Order: numbers < everything else; other nodes by (base, exponent,
/// coefficient), then strictly by kind and content.
pub fn expr_cmp(a: &Expr, b: &Expr) -> CmpOrdering {
    // (base, exponent, coefficient, is_atomic); `None` stands for 1.
    fn extract_key(e: &Expr) -> (&Expr, Option<&Expr>, Option<&Expr>, bool) {
        match &e.kind {
            ExprKind::Pow(base, exp) => (base.as_ref(), Some(exp.as_ref()), None, false),
            ExprKind::Mul(factors) if factors.len() == 2 && factors[0].is_number() => {
                let coeff = Some(factors[0].as_ref());
                match &factors[1].kind {
                    ExprKind::Pow(base, exp) => (base.as_ref(), Some(exp.as_ref()), coeff, false),
                    _ => (factors[1].as_ref(), None, coeff, false),
                }
            }
            _ => (e, None, None, true),
        }
    }

    fn cmp_implicit_one(x: Option<&Expr>, y: Option<&Expr>) -> CmpOrdering {
        match (x, y) {
            (Some(x), Some(y)) => expr_cmp(x, y),
            (Some(x), None) => expr_cmp(x, &EXPR_ONE),
            (None, Some(y)) => expr_cmp(&EXPR_ONE, y),
            (None, None) => CmpOrdering::Equal,
        }
    }

    if std::ptr::eq(a, b) {
        return CmpOrdering::Equal;
    }

    // 1. Numbers always come first
    match (a.is_number(), b.is_number()) {
        (true, true) => return expr_cmp_type_strict(a, b),
        (true, false) => return CmpOrdering::Less,
        (false, true) => return CmpOrdering::Greater,
        (false, false) => {}
    }

    let (base_a, exp_a, coeff_a, atomic_a) = extract_key(a);
    let (base_b, exp_b, coeff_b, atomic_b) = extract_key(b);

    // 2. Both atomic: the key is the node itself
    if atomic_a && atomic_b {
        return expr_cmp_type_strict(a, b);
    }

    // 3. Bases, exponents, coefficients. Recursion terminates because at
    // least one side is composite and its base is a strict subtree.
    expr_cmp(base_a, base_b)
        .then_with(|| cmp_implicit_one(exp_a, exp_b))
        .then_with(|| cmp_implicit_one(coeff_a, coeff_b))
        .then_with(|| expr_cmp_type_strict(a, b))
}

fn kind_rank(kind: &ExprKind) -> u8 {
    match kind {
        ExprKind::Integer(_) => 0,
        ExprKind::Rational(_) => 1,
        ExprKind::RealDouble(_) => 2,
        ExprKind::Symbol(_) => 3,
        ExprKind::Mul(_) => 4,
        ExprKind::Pow(_, _) => 5,
        ExprKind::Add(_) => 6,
        ExprKind::Piecewise(_) => 7,
        ExprKind::Subs { .. } => 8,
        ExprKind::BooleanAtom(_) => 9,
        ExprKind::EmptySet => 10,
        ExprKind::Interval(_) => 11,
        ExprKind::Contains { .. } => 12,
        ExprKind::Not(_) => 13,
        ExprKind::And(_) => 14,
        ExprKind::Or(_) => 15,
    }
}

fn cmp_slices(a: &[std::sync::Arc<Expr>], b: &[std::sync::Arc<Expr>]) -> CmpOrdering {
    a.len().cmp(&b.len()).then_with(|| {
        for (x, y) in a.iter().zip(b.iter()) {
            match expr_cmp(x, y) {
                CmpOrdering::Equal => {}
                other => return other,
            }
        }
        CmpOrdering::Equal
    })
}

/// Strict comparison: kind rank first, then content.
pub fn expr_cmp_type_strict(a: &Expr, b: &Expr) -> CmpOrdering {
    use ExprKind::{
        Add, And, BooleanAtom, Contains, Integer, Interval, Mul, Not, Or, Piecewise, Pow,
        Rational, RealDouble, Subs, Symbol,
    };

    let rank = kind_rank(&a.kind).cmp(&kind_rank(&b.kind));
    if rank != CmpOrdering::Equal {
        return rank;
    }

    match (&a.kind, &b.kind) {
        (Integer(x), Integer(y)) => x.cmp(y),
        (Rational(x), Rational(y)) => x.cmp(y),
        (RealDouble(x), RealDouble(y)) => x.cmp(y),
        (Symbol(x), Symbol(y)) => x.cmp(y),
        (BooleanAtom(x), BooleanAtom(y)) => x.cmp(y),
        (Interval(x), Interval(y)) => expr_cmp(&x.start, &y.start)
            .then_with(|| expr_cmp(&x.end, &y.end))
            .then_with(|| x.left_open.cmp(&y.left_open))
            .then_with(|| x.right_open.cmp(&y.right_open)),
        (Contains { expr: e1, set: s1 }, Contains { expr: e2, set: s2 }) => {
            expr_cmp(e1, e2).then_with(|| expr_cmp(s1, s2))
        }
        (Not(x), Not(y)) => expr_cmp(x, y),
        (And(x), And(y)) | (Or(x), Or(y)) | (Add(x), Add(y)) | (Mul(x), Mul(y)) => {
            cmp_slices(x, y)
        }
        (Piecewise(x), Piecewise(y)) => x.len().cmp(&y.len()).then_with(|| {
            for (p, q) in x.iter().zip(y.iter()) {
                let ord = expr_cmp(&p.value, &q.value)
                    .then_with(|| expr_cmp(&p.condition, &q.condition));
                if ord != CmpOrdering::Equal {
                    return ord;
                }
            }
            CmpOrdering::Equal
        }),
        (Pow(b1, e1), Pow(b2, e2)) => expr_cmp(b1, b2).then_with(|| expr_cmp(e1, e2)),
        (
            Subs {
                arg: a1,
                bindings: b1,
            },
            Subs {
                arg: a2,
                bindings: b2,
            },
        ) => expr_cmp(a1, a2).then_with(|| {
            b1.len().cmp(&b2.len()).then_with(|| {
                for ((v1, p1), (v2, p2)) in b1.iter().zip(b2.iter()) {
                    let ord = expr_cmp(v1, v2).then_with(|| expr_cmp(p1, p2));
                    if ord != CmpOrdering::Equal {
                        return ord;
                    }
                }
                CmpOrdering::Equal
            })
        }),
        // EmptySet vs EmptySet; every other pairing has distinct ranks
        _ => CmpOrdering::Equal,
    }
}
