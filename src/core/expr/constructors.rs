//! Expression constructors.
//!
//! Leaf atoms, sets and the unevaluated substitution node. Boolean and
//! piecewise constructors live in [`crate::logic`], arithmetic in
//! [`crate::core::arith`].

use std::cmp::Ordering;
use std::sync::Arc;

use num_bigint::BigInt;
use num_rational::BigRational;
use num_traits::{One, Zero};

use super::{Expr, ExprKind, Interval, compute_expr_hash, next_id};
use crate::core::error::{SymError, SymResult};
use crate::core::number::{Numeric, RealDouble};
use crate::core::symbol::{InternedSymbol, symb_interned};

impl Expr {
    /// Wrap a kind into a node. Callers are responsible for the kind's
    /// canonical-form invariants.
    #[must_use]
    pub(crate) fn new(kind: ExprKind) -> Self {
        let hash = compute_expr_hash(&kind);
        Self {
            id: next_id(),
            hash,
            kind,
        }
    }

    /// Get the construction id of the expression
    #[inline]
    #[must_use]
    pub const fn id(&self) -> u64 {
        self.id
    }

    /// Get the structural hash of the expression
    #[inline]
    #[must_use]
    pub const fn structural_hash(&self) -> u64 {
        self.hash
    }

    #[inline]
    #[must_use]
    pub const fn kind(&self) -> &ExprKind {
        &self.kind
    }

    // -------------------------------------------------------------------------
    // Type predicates
    // -------------------------------------------------------------------------

    #[inline]
    #[must_use]
    pub const fn is_symbol(&self) -> bool {
        matches!(self.kind, ExprKind::Symbol(_))
    }

    #[inline]
    #[must_use]
    pub const fn is_integer(&self) -> bool {
        matches!(self.kind, ExprKind::Integer(_))
    }

    #[inline]
    #[must_use]
    pub const fn is_rational(&self) -> bool {
        matches!(self.kind, ExprKind::Rational(_))
    }

    #[inline]
    #[must_use]
    pub const fn is_real_double(&self) -> bool {
        matches!(self.kind, ExprKind::RealDouble(_))
    }

    /// Integer, rational or double literal.
    #[inline]
    #[must_use]
    pub const fn is_number(&self) -> bool {
        matches!(
            self.kind,
            ExprKind::Integer(_) | ExprKind::Rational(_) | ExprKind::RealDouble(_)
        )
    }

    /// True for boolean-valued kinds (atoms, `Contains`, `Not`, `And`, `Or`).
    #[inline]
    #[must_use]
    pub const fn is_boolean(&self) -> bool {
        matches!(
            self.kind,
            ExprKind::BooleanAtom(_)
                | ExprKind::Contains { .. }
                | ExprKind::Not(_)
                | ExprKind::And(_)
                | ExprKind::Or(_)
        )
    }

    /// `Interval` or `EmptySet`.
    #[inline]
    #[must_use]
    pub const fn is_set(&self) -> bool {
        matches!(self.kind, ExprKind::Interval(_) | ExprKind::EmptySet)
    }

    #[must_use]
    pub const fn as_symbol(&self) -> Option<&InternedSymbol> {
        match &self.kind {
            ExprKind::Symbol(s) => Some(s),
            _ => None,
        }
    }

    #[must_use]
    pub const fn as_integer(&self) -> Option<&BigInt> {
        match &self.kind {
            ExprKind::Integer(n) => Some(n),
            _ => None,
        }
    }

    pub(crate) fn is_zero_num(&self) -> bool {
        Numeric::from_expr(self).is_some_and(|n| n.is_zero())
    }

    pub(crate) fn is_one_num(&self) -> bool {
        Numeric::from_expr(self).is_some_and(|n| n.is_one())
    }

    // -------------------------------------------------------------------------
    // Leaf constructors
    // -------------------------------------------------------------------------

    /// Create a symbol expression (auto-interned)
    pub fn symbol(name: impl AsRef<str>) -> Self {
        Self::new(ExprKind::Symbol(symb_interned(name.as_ref())))
    }

    pub(crate) fn from_interned(interned: InternedSymbol) -> Self {
        Self::new(ExprKind::Symbol(interned))
    }

    #[must_use]
    pub fn integer(value: impl Into<BigInt>) -> Self {
        Self::new(ExprKind::Integer(value.into()))
    }

    /// Parse a base-10 integer, e.g. `"-12345678901234567890"`.
    pub fn integer_from_str(digits: &str) -> SymResult<Self> {
        digits
            .trim()
            .parse::<BigInt>()
            .map(Self::integer)
            .map_err(|_| SymError::InvalidNumber(digits.to_owned()))
    }

    /// The rational `num/den`, reduced. Integral values come back as
    /// `Integer`.
    pub fn rational(num: impl Into<BigInt>, den: impl Into<BigInt>) -> SymResult<Self> {
        let den = den.into();
        if den.is_zero() {
            return Err(SymError::DivisionByZero);
        }
        Ok(Self::from_big_rational(BigRational::new(num.into(), den)))
    }

    /// The rational `num/den` built from two `Integer` nodes.
    pub fn rational_from_exprs(num: &Expr, den: &Expr) -> SymResult<Self> {
        match (&num.kind, &den.kind) {
            (ExprKind::Integer(n), ExprKind::Integer(d)) => Self::rational(n.clone(), d.clone()),
            _ => Err(SymError::invalid_operand(format!(
                "rational parts must be Integer, got {} and {}",
                num.kind.name(),
                den.kind.name()
            ))),
        }
    }

    /// Canonical node for an already-normalized `BigRational`.
    pub(crate) fn from_big_rational(value: BigRational) -> Self {
        if value.denom().is_one() {
            Self::integer(value.to_integer())
        } else {
            Self::new(ExprKind::Rational(value))
        }
    }

    #[must_use]
    pub fn real_double(value: f64) -> Self {
        Self::new(ExprKind::RealDouble(RealDouble::new(value)))
    }

    // -------------------------------------------------------------------------
    // Sets
    // -------------------------------------------------------------------------

    #[must_use]
    pub fn empty_set() -> Self {
        Self::new(ExprKind::EmptySet)
    }

    /// The interval between `start` and `end`; `left_open` / `right_open`
    /// exclude the respective bound.
    ///
    /// Both bounds must be numeric literals. An empty range (`start > end`,
    /// or `start == end` with an open bound) yields `EmptySet`.
    pub fn interval(start: Expr, end: Expr, left_open: bool, right_open: bool) -> SymResult<Self> {
        let (Some(lo), Some(hi)) = (Numeric::from_expr(&start), Numeric::from_expr(&end)) else {
            return Err(SymError::invalid_operand(format!(
                "interval bounds must be numbers, got {} and {}",
                start.kind.name(),
                end.kind.name()
            )));
        };

        match lo.partial_cmp(&hi) {
            Some(Ordering::Less) => {}
            Some(Ordering::Equal) if !left_open && !right_open => {}
            Some(_) => return Ok(Self::empty_set()),
            None => return Err(SymError::invalid_operand("interval bound is NaN")),
        }

        Ok(Self::new(ExprKind::Interval(Interval {
            start: Arc::new(start),
            end: Arc::new(end),
            left_open,
            right_open,
        })))
    }

    // -------------------------------------------------------------------------
    // Unevaluated substitution
    // -------------------------------------------------------------------------

    /// `arg` with each `variable` replaced by `point`, left unevaluated.
    ///
    /// Bindings are stored sorted by variable; when a variable is bound more
    /// than once the last binding wins.
    pub fn subs(arg: Expr, bindings: impl IntoIterator<Item = (Expr, Expr)>) -> SymResult<Self> {
        let mut sorted: std::collections::BTreeMap<Expr, Expr> = std::collections::BTreeMap::new();
        for (var, point) in bindings {
            if !var.is_symbol() {
                return Err(SymError::invalid_operand(format!(
                    "substitution variable must be a Symbol, got {}",
                    var.kind.name()
                )));
            }
            sorted.insert(var, point);
        }

        if sorted.is_empty() {
            return Ok(arg);
        }

        Ok(Self::new(ExprKind::Subs {
            arg: Arc::new(arg),
            bindings: sorted
                .into_iter()
                .map(|(var, point)| (Arc::new(var), Arc::new(point)))
                .collect(),
        }))
    }
}

impl From<i64> for Expr {
    fn from(value: i64) -> Self {
        Expr::integer(value)
    }
}

impl From<i32> for Expr {
    fn from(value: i32) -> Self {
        Expr::integer(value)
    }
}

impl From<f64> for Expr {
    fn from(value: f64) -> Self {
        Expr::real_double(value)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, reason = "Standard test relaxations")]
mod tests {
    use super::*;
    use crate::symb;

    #[test]
    fn test_rational_reduces() {
        let r = Expr::rational(6, 4).unwrap();
        assert!(r.is_rational());
        assert_eq!(r, Expr::rational(3, 2).unwrap());
        assert_eq!(r.to_string(), "3/2");
    }

    #[test]
    fn test_rational_integral_becomes_integer() {
        let r = Expr::rational(8, 4).unwrap();
        assert!(r.is_integer());
        assert_eq!(r, Expr::integer(2));
    }

    #[test]
    fn test_rational_negative_denominator() {
        let r = Expr::rational(1, -2).unwrap();
        assert_eq!(r.to_string(), "-1/2");
    }

    #[test]
    fn test_rational_zero_denominator() {
        assert_eq!(Expr::rational(1, 0), Err(SymError::DivisionByZero));
    }

    #[test]
    fn test_rational_from_exprs_requires_integers() {
        let ok = Expr::rational_from_exprs(&Expr::integer(1), &Expr::integer(3)).unwrap();
        assert!(ok.is_rational());

        let err = Expr::rational_from_exprs(&symb("x"), &Expr::integer(3));
        assert!(matches!(err, Err(SymError::InvalidOperand(_))));
    }

    #[test]
    fn test_integer_from_str() {
        let big = Expr::integer_from_str("123456789012345678901234567890").unwrap();
        assert_eq!(big.to_string(), "123456789012345678901234567890");
        assert!(matches!(
            Expr::integer_from_str("12a"),
            Err(SymError::InvalidNumber(_))
        ));
    }

    #[test]
    fn test_interval_empty_cases() {
        let one = Expr::integer(1);
        let two = Expr::integer(2);
        let reversed = Expr::interval(two.clone(), one.clone(), false, false).unwrap();
        assert_eq!(reversed, Expr::empty_set());

        let point_open = Expr::interval(one.clone(), one.clone(), true, false).unwrap();
        assert_eq!(point_open, Expr::empty_set());

        let point_closed = Expr::interval(one.clone(), one, false, false).unwrap();
        assert!(matches!(point_closed.kind(), ExprKind::Interval(_)));
    }

    #[test]
    fn test_interval_rejects_symbolic_bounds() {
        let res = Expr::interval(symb("a"), Expr::integer(2), false, false);
        assert!(matches!(res, Err(SymError::InvalidOperand(_))));
    }

    #[test]
    fn test_subs_requires_symbol_variables() {
        let x = symb("x");
        let res = Expr::subs(x.clone(), [(Expr::integer(1), Expr::integer(2))]);
        assert!(matches!(res, Err(SymError::InvalidOperand(_))));
    }

    #[test]
    fn test_subs_bindings_sorted() {
        let x = symb("x");
        let y = symb("y");
        let f = &x + &y;
        let a = Expr::subs(f.clone(), [(y.clone(), Expr::integer(2)), (x.clone(), Expr::integer(1))])
            .unwrap();
        let b = Expr::subs(f, [(x, Expr::integer(1)), (y, Expr::integer(2))]).unwrap();
        assert_eq!(a, b);
        assert_eq!(a.structural_hash(), b.structural_hash());
    }
}
