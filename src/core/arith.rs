//! Canonicalizing arithmetic.
//!
//! Only the arithmetic needed to carry piecewise values, derivatives and
//! coefficients is implemented: flat sums and products with like terms
//! collected, and powers with exact numeric evaluation where possible.
//! No expansion or factoring is attempted.

use std::collections::BTreeMap;
use std::ops::{Add, Mul, Neg, Sub};
use std::sync::Arc;

use super::error::{SymError, SymResult};
use super::expr::{Expr, ExprKind};
use super::number::Numeric;

/// Split a term into its numeric coefficient and the remaining part.
/// `3*x*y` -> `(3, x*y)`, `x` -> `(1, x)`.
fn split_coeff(term: &Expr) -> (Numeric, Expr) {
    if let ExprKind::Mul(factors) = &term.kind
        && let Some(coeff) = Numeric::from_expr(&factors[0])
    {
        let rest = if factors.len() == 2 {
            (*factors[1]).clone()
        } else {
            Expr::new(ExprKind::Mul(factors[1..].to_vec()))
        };
        return (coeff, rest);
    }
    (Numeric::one(), term.clone())
}

/// Split a factor into base and exponent. `x**2` -> `(x, 2)`, `x` -> `(x, 1)`.
fn split_pow(factor: &Expr) -> (Expr, Expr) {
    match &factor.kind {
        ExprKind::Pow(base, exp) => ((**base).clone(), (**exp).clone()),
        _ => (factor.clone(), Expr::integer(1)),
    }
}

impl Expr {
    /// Canonical sum of `terms`.
    ///
    /// Nested sums are flattened, numeric constants folded, like terms
    /// (same non-numeric part) combined and zero terms dropped. The result
    /// collapses to a single term or number when possible.
    pub fn sum(terms: impl IntoIterator<Item = Expr>) -> Self {
        let mut constant = Numeric::zero();
        let mut like_terms: BTreeMap<Expr, Numeric> = BTreeMap::new();

        let mut absorb = |term: &Expr| {
            if let Some(n) = Numeric::from_expr(term) {
                constant = constant.add(&n);
                return;
            }
            let (coeff, rest) = split_coeff(term);
            like_terms
                .entry(rest)
                .and_modify(|c| *c = c.add(&coeff))
                .or_insert(coeff);
        };

        for term in terms {
            match &term.kind {
                ExprKind::Add(inner) => inner.iter().for_each(|t| absorb(&**t)),
                _ => absorb(&term),
            }
        }

        let mut flat: Vec<Expr> = like_terms
            .into_iter()
            .filter(|(_, coeff)| !coeff.is_zero())
            .map(|(rest, coeff)| {
                if coeff.is_one() {
                    rest
                } else {
                    Expr::product([coeff.to_expr(), rest])
                }
            })
            .collect();

        if flat.is_empty() {
            return constant.to_expr();
        }
        if !constant.is_zero() {
            flat.push(constant.to_expr());
        }
        if flat.len() == 1 {
            return flat.pop().unwrap_or_else(|| constant.to_expr());
        }

        flat.sort();
        Expr::new(ExprKind::Add(flat.into_iter().map(Arc::new).collect()))
    }

    /// Canonical product of `factors`.
    ///
    /// Nested products are flattened, the numeric coefficient folded and
    /// placed first, and factors with the same base merged by summing their
    /// exponents. A zero coefficient annihilates the product.
    pub fn product(factors: impl IntoIterator<Item = Expr>) -> Self {
        let mut coeff = Numeric::one();
        let mut bases: BTreeMap<Expr, Vec<Expr>> = BTreeMap::new();

        let mut absorb = |factor: &Expr| {
            if let Some(n) = Numeric::from_expr(factor) {
                coeff = coeff.mul(&n);
                return;
            }
            let (base, exp) = split_pow(factor);
            bases.entry(base).or_default().push(exp);
        };

        for factor in factors {
            match &factor.kind {
                ExprKind::Mul(inner) => inner.iter().for_each(|f| absorb(&**f)),
                _ => absorb(&factor),
            }
        }

        if coeff.is_zero() {
            return coeff.to_expr();
        }

        let mut flat: Vec<Expr> = Vec::with_capacity(bases.len());
        let mut needs_reflatten = false;
        for (base, exps) in bases {
            let merged = if exps.len() == 1 && exps[0].is_one_num() {
                base
            } else {
                let exp = Expr::sum(exps);
                // 0**(a + b) with a negative total has no value; keep it symbolic
                base.pow(&exp)
                    .unwrap_or_else(|_| Expr::new(ExprKind::Pow(Arc::new(base), Arc::new(exp))))
            };
            if let Some(n) = Numeric::from_expr(&merged) {
                coeff = coeff.mul(&n);
            } else {
                needs_reflatten |= matches!(merged.kind, ExprKind::Mul(_));
                flat.push(merged);
            }
        }

        if needs_reflatten {
            flat.push(coeff.to_expr());
            return Expr::product(flat);
        }
        if coeff.is_zero() {
            return coeff.to_expr();
        }
        if flat.is_empty() {
            return coeff.to_expr();
        }
        if flat.len() == 1 && coeff.is_one() {
            return flat.pop().unwrap_or_else(|| coeff.to_expr());
        }

        flat.sort();
        let mut ops: Vec<Arc<Expr>> = Vec::with_capacity(flat.len() + 1);
        if !coeff.is_one() {
            ops.push(Arc::new(coeff.to_expr()));
        }
        ops.extend(flat.into_iter().map(Arc::new));
        Expr::new(ExprKind::Mul(ops))
    }

    /// `self ** exp`.
    ///
    /// Exact numeric powers are evaluated exactly, powers involving a double
    /// are evaluated in `f64`, and `(b**e)**n` with integer `n` becomes
    /// `b**(e*n)`. Anything else stays a `Pow` node.
    pub fn pow(&self, exp: &Expr) -> SymResult<Expr> {
        if exp.is_zero_num() {
            return Ok(Expr::integer(1));
        }
        if exp.is_one_num() {
            return Ok(self.clone());
        }
        if self.is_one_num() {
            return Ok(Expr::integer(1));
        }

        if let (Some(b), Some(e)) = (Numeric::from_expr(self), Numeric::from_expr(exp)) {
            if let Some(value) = b.pow(&e)? {
                return Ok(value.to_expr());
            }
        }

        if let ExprKind::Pow(base, inner_exp) = &self.kind
            && exp.is_integer()
        {
            let combined = Expr::product([(**inner_exp).clone(), exp.clone()]);
            return base.pow(&combined);
        }

        Ok(Expr::new(ExprKind::Pow(
            Arc::new(self.clone()),
            Arc::new(exp.clone()),
        )))
    }

    /// `self / other`, as `self * other**(-1)`.
    pub fn div(&self, other: &Expr) -> SymResult<Expr> {
        if let Some(n) = Numeric::from_expr(other)
            && matches!(n, Numeric::Exact(_))
            && n.is_zero()
        {
            return Err(SymError::DivisionByZero);
        }
        let inverse = other.pow(&Expr::integer(-1))?;
        Ok(Expr::product([self.clone(), inverse]))
    }
}

// ============================================================================
// Operator Overloading
// ============================================================================

macro_rules! impl_binary_ops {
    ($lhs:ty, $rhs:ty, $to_lhs:expr, $to_rhs:expr) => {
        impl Add<$rhs> for $lhs {
            type Output = Expr;
            fn add(self, rhs: $rhs) -> Expr {
                Expr::sum([$to_lhs(self), $to_rhs(rhs)])
            }
        }
        impl Sub<$rhs> for $lhs {
            type Output = Expr;
            fn sub(self, rhs: $rhs) -> Expr {
                let neg_rhs = Expr::product([Expr::integer(-1), $to_rhs(rhs)]);
                Expr::sum([$to_lhs(self), neg_rhs])
            }
        }
        impl Mul<$rhs> for $lhs {
            type Output = Expr;
            fn mul(self, rhs: $rhs) -> Expr {
                Expr::product([$to_lhs(self), $to_rhs(rhs)])
            }
        }
    };
}

impl_binary_ops!(Expr, Expr, |e: Expr| e, |r: Expr| r);
impl_binary_ops!(Expr, &Expr, |e: Expr| e, |r: &Expr| r.clone());
impl_binary_ops!(&Expr, Expr, |e: &Expr| e.clone(), |r: Expr| r);
impl_binary_ops!(&Expr, &Expr, |e: &Expr| e.clone(), |r: &Expr| r.clone());

impl Neg for Expr {
    type Output = Expr;
    fn neg(self) -> Expr {
        Expr::product([Expr::integer(-1), self])
    }
}

impl Neg for &Expr {
    type Output = Expr;
    fn neg(self) -> Expr {
        Expr::product([Expr::integer(-1), self.clone()])
    }
}
