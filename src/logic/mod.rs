//! Boolean-valued expressions.
//!
//! - [`Boolean`]: typed handle over a boolean-valued `Expr`
//! - [`boolean`], [`bool_true`], [`bool_false`]: the two atom singletons
//! - [`logical_not`], [`logical_and`], [`logical_or`]: canonicalizing
//!   connectives
//! - [`contains`]: set-membership predicate
//! - [`piecewise`]: conditional value selection
//!
//! Every constructor returns a node in canonical form, so structurally equal
//! formulas compare and hash equal however they were built.

mod connectives;
mod contains;
mod piecewise;

use std::fmt;
use std::ops::Deref;
use std::sync::{Arc, LazyLock};

use crate::core::error::SymError;
use crate::core::expr::{Expr, ExprKind};

pub use connectives::{logical_and, logical_or};
pub use contains::contains;
pub use piecewise::piecewise;

static TRUE: LazyLock<Expr> = LazyLock::new(|| Expr::new(ExprKind::BooleanAtom(true)));
static FALSE: LazyLock<Expr> = LazyLock::new(|| Expr::new(ExprKind::BooleanAtom(false)));

/// An expression known to be boolean-valued.
///
/// Wraps `BooleanAtom`, `Contains`, `Not`, `And` or `Or` nodes. The
/// connectives take and return `Boolean`, so a non-boolean operand cannot
/// reach them.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Boolean(Expr);

impl Boolean {
    /// Wrap a node the caller has already checked to be boolean-valued.
    pub(crate) fn from_canonical(expr: Expr) -> Self {
        debug_assert!(expr.is_boolean(), "not boolean-valued: {expr}");
        Boolean(expr)
    }

    #[inline]
    #[must_use]
    pub const fn as_expr(&self) -> &Expr {
        &self.0
    }

    #[must_use]
    pub fn into_expr(self) -> Expr {
        self.0
    }

    #[must_use]
    pub const fn is_true(&self) -> bool {
        matches!(self.0.kind, ExprKind::BooleanAtom(true))
    }

    #[must_use]
    pub const fn is_false(&self) -> bool {
        matches!(self.0.kind, ExprKind::BooleanAtom(false))
    }
}

impl Deref for Boolean {
    type Target = Expr;
    fn deref(&self) -> &Expr {
        &self.0
    }
}

impl AsRef<Expr> for Boolean {
    fn as_ref(&self) -> &Expr {
        &self.0
    }
}

impl TryFrom<Expr> for Boolean {
    type Error = SymError;

    fn try_from(expr: Expr) -> Result<Self, Self::Error> {
        if expr.is_boolean() {
            Ok(Boolean(expr))
        } else {
            Err(SymError::invalid_operand(format!(
                "expected a boolean-valued expression, got {}",
                expr.kind.name()
            )))
        }
    }
}

impl From<Boolean> for Expr {
    fn from(b: Boolean) -> Self {
        b.0
    }
}

impl From<bool> for Boolean {
    fn from(value: bool) -> Self {
        boolean(value)
    }
}

impl fmt::Display for Boolean {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The process-wide `True` or `False` atom.
///
/// Both atoms are created once; every call returns a handle to the same node.
#[must_use]
pub fn boolean(value: bool) -> Boolean {
    if value {
        Boolean(TRUE.clone())
    } else {
        Boolean(FALSE.clone())
    }
}

#[must_use]
pub fn bool_true() -> Boolean {
    boolean(true)
}

#[must_use]
pub fn bool_false() -> Boolean {
    boolean(false)
}

/// Logical negation.
///
/// Atoms are swapped and a negated conjunction or disjunction is rebuilt
/// with the negation pushed onto its operands (De Morgan), which keeps the
/// result canonical. Double negation is kept: the negation of `Not(x)` is
/// `Not(Not(x))`. Anything else is wrapped in `Not`.
#[must_use]
pub fn logical_not(x: &Boolean) -> Boolean {
    match &x.0.kind {
        ExprKind::BooleanAtom(value) => boolean(!value),
        ExprKind::And(ops) => logical_or(negate_all(ops)),
        ExprKind::Or(ops) => logical_and(negate_all(ops)),
        _ => Boolean(Expr::new(ExprKind::Not(Arc::new(x.0.clone())))),
    }
}

fn negate_all(ops: &[Arc<Expr>]) -> Vec<Boolean> {
    ops.iter()
        .map(|op| logical_not(&Boolean::from_canonical((**op).clone())))
        .collect()
}
