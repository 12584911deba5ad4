//! Numeric atoms and constant folding.
//!
//! Exact values (`Integer`, `Rational`) are backed by `num-bigint` /
//! `num-rational`; inexact values are `f64`. Mixing an inexact value into a
//! fold makes the result inexact.

use std::cmp::Ordering;
use std::hash::{Hash, Hasher};

use num_bigint::BigInt;
use num_integer::Roots;
use num_rational::BigRational;
use num_traits::{One, Signed, ToPrimitive, Zero};

use super::error::{SymError, SymResult};
use super::expr::{Expr, ExprKind};

/// A double-precision literal with total equality and ordering.
///
/// Negative zero is normalized to zero on construction so that `0.0` and
/// `-0.0` are the same node. Comparison uses `f64::total_cmp`, which keeps
/// `Eq`, `Ord` and `Hash` consistent (including for NaN).
#[derive(Debug, Clone, Copy)]
pub struct RealDouble(f64);

impl RealDouble {
    #[must_use]
    pub fn new(value: f64) -> Self {
        if value == 0.0 {
            Self(0.0)
        } else {
            Self(value)
        }
    }

    #[inline]
    #[must_use]
    pub const fn value(self) -> f64 {
        self.0
    }
}

impl PartialEq for RealDouble {
    fn eq(&self, other: &Self) -> bool {
        self.0.to_bits() == other.0.to_bits()
    }
}

impl Eq for RealDouble {}

impl Hash for RealDouble {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.0.to_bits().hash(state);
    }
}

impl PartialOrd for RealDouble {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for RealDouble {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.total_cmp(&other.0)
    }
}

/// Value of a numeric literal while folding constants.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Numeric {
    Exact(BigRational),
    Float(f64),
}

impl Numeric {
    pub(crate) fn zero() -> Self {
        Numeric::Exact(BigRational::zero())
    }

    pub(crate) fn one() -> Self {
        Numeric::Exact(BigRational::one())
    }

    pub(crate) fn from_expr(expr: &Expr) -> Option<Self> {
        match &expr.kind {
            ExprKind::Integer(n) => Some(Numeric::Exact(BigRational::from_integer(n.clone()))),
            ExprKind::Rational(r) => Some(Numeric::Exact(r.clone())),
            ExprKind::RealDouble(d) => Some(Numeric::Float(d.value())),
            _ => None,
        }
    }

    pub(crate) fn to_expr(&self) -> Expr {
        match self {
            Numeric::Exact(r) => Expr::from_big_rational(r.clone()),
            Numeric::Float(f) => Expr::real_double(*f),
        }
    }

    pub(crate) fn to_f64(&self) -> f64 {
        match self {
            Numeric::Exact(r) => ratio_to_f64(r),
            Numeric::Float(f) => *f,
        }
    }

    pub(crate) fn is_zero(&self) -> bool {
        match self {
            Numeric::Exact(r) => r.is_zero(),
            Numeric::Float(f) => *f == 0.0,
        }
    }

    pub(crate) fn is_one(&self) -> bool {
        match self {
            Numeric::Exact(r) => r.is_one(),
            Numeric::Float(f) => *f == 1.0,
        }
    }

    pub(crate) fn add(&self, other: &Self) -> Self {
        match (self, other) {
            (Numeric::Exact(a), Numeric::Exact(b)) => Numeric::Exact(a + b),
            _ => Numeric::Float(self.to_f64() + other.to_f64()),
        }
    }

    pub(crate) fn mul(&self, other: &Self) -> Self {
        match (self, other) {
            (Numeric::Exact(a), Numeric::Exact(b)) => Numeric::Exact(a * b),
            _ => Numeric::Float(self.to_f64() * other.to_f64()),
        }
    }

    /// Numeric comparison across exact and inexact values.
    ///
    /// Returns `None` only when a NaN is involved.
    pub(crate) fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        match (self, other) {
            (Numeric::Exact(a), Numeric::Exact(b)) => Some(a.cmp(b)),
            _ => self.to_f64().partial_cmp(&other.to_f64()),
        }
    }

    /// `self ** exp` when the result is itself a number.
    ///
    /// `Ok(None)` means the power has no numeric closed form here
    /// (e.g. `2 ** (1/2)`) and must stay symbolic.
    pub(crate) fn pow(&self, exp: &Self) -> SymResult<Option<Self>> {
        match (self, exp) {
            (Numeric::Exact(base), Numeric::Exact(e)) => {
                if e.is_integer() {
                    let Some(k) = e.to_integer().to_i64() else {
                        return Ok(None);
                    };
                    return exact_int_pow(base, k).map(|r| r.map(Numeric::Exact));
                }
                if base.is_positive()
                    && let Some(root) = exact_root(base, e.denom())
                {
                    let Some(k) = e.numer().to_i64() else {
                        return Ok(None);
                    };
                    return exact_int_pow(&root, k).map(|r| r.map(Numeric::Exact));
                }
                if base.is_zero() {
                    if e.is_positive() {
                        return Ok(Some(Numeric::zero()));
                    }
                    return Err(SymError::DivisionByZero);
                }
                if base.is_one() {
                    return Ok(Some(Numeric::one()));
                }
                Ok(None)
            }
            _ => {
                let value = self.to_f64().powf(exp.to_f64());
                if value.is_nan() {
                    Ok(None)
                } else {
                    Ok(Some(Numeric::Float(value)))
                }
            }
        }
    }
}

fn ratio_to_f64(r: &BigRational) -> f64 {
    match (r.numer().to_f64(), r.denom().to_f64()) {
        (Some(n), Some(d)) => n / d,
        _ => f64::NAN,
    }
}

/// `base ** (1/n)` when numerator and denominator are perfect `n`-th powers.
fn exact_root(base: &BigRational, n: &BigInt) -> Option<BigRational> {
    let n = n.to_u32()?;
    let root_of = |v: &BigInt| {
        let r = Roots::nth_root(v, n);
        (r.pow(n) == *v).then_some(r)
    };
    Some(BigRational::new(root_of(base.numer())?, root_of(base.denom())?))
}

fn exact_int_pow(base: &BigRational, k: i64) -> SymResult<Option<BigRational>> {
    if k == 0 {
        return Ok(Some(BigRational::one()));
    }
    if base.is_zero() {
        if k < 0 {
            return Err(SymError::DivisionByZero);
        }
        return Ok(Some(BigRational::zero()));
    }
    let Ok(magnitude) = u32::try_from(k.unsigned_abs()) else {
        return Ok(None);
    };
    let numer = base.numer().pow(magnitude);
    let denom = base.denom().pow(magnitude);
    if k > 0 {
        Ok(Some(BigRational::new(numer, denom)))
    } else {
        Ok(Some(BigRational::new(denom, numer)))
    }
}
