//! Expression nodes.
//!
//! This module defines:
//! - `Expr` - an immutable node with a cached structural hash
//! - `ExprKind` - the closed set of node kinds
//!
//! # Architecture
//!
//! ## Shared children
//! Children are held as `Arc<Expr>`. A node never refers to its parent, so a
//! tree is acyclic by construction and can be shared between threads.
//!
//! ## Structural hashing
//! Each `Expr` carries a hash computed once at construction from its kind and
//! the cached hashes of its children. Equality rejects on hash mismatch before
//! falling back to a structural comparison. Commutative nodes (`And`, `Or`,
//! `Add`, `Mul`) sort their operands before construction, so the hash is
//! computed over the canonical order and never depends on insertion order.
//!
//! ## Canonical order
//! `Ord for Expr` is a total order consistent with equality (see
//! [`expr_cmp`]); it keys operand sets and fixes the printing order.
//!
//! # Usage
//!
//! ```
//! use symb_logic::{Expr, symb};
//!
//! let x = symb("x");
//! let y = symb("y");
//! let sum = &x + &y;
//! assert_eq!(sum.to_string(), "x + y");
//! assert_eq!(sum, &y + &x);
//! ```

mod constructors;
mod hash;
mod ordering;

use std::cmp::Ordering as CmpOrdering;
use std::ops::Deref;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use num_bigint::BigInt;
use num_rational::BigRational;

use crate::core::number::RealDouble;
use crate::core::symbol::InternedSymbol;

pub use hash::compute_expr_hash;
pub use ordering::expr_cmp;

static EXPR_ID_COUNTER: AtomicU64 = AtomicU64::new(1);

pub(crate) fn next_id() -> u64 {
    EXPR_ID_COUNTER.fetch_add(1, Ordering::Relaxed)
}

/// Childless placeholder swapped in for `Arc` fields while dropping.
static DUMMY_ARC: std::sync::LazyLock<Arc<Expr>> = std::sync::LazyLock::new(|| {
    Arc::new(Expr {
        id: 0,
        hash: compute_expr_hash(&ExprKind::EmptySet),
        kind: ExprKind::EmptySet,
    })
});

/// An immutable symbolic expression node.
///
/// Build nodes through the constructor functions (`symb`, `Expr::integer`,
/// `contains`, `logical_and`, `piecewise`, the arithmetic operators, ...);
/// they enforce every canonical-form invariant. A node is never mutated:
/// rewriting always yields a new node.
#[derive(Debug, Clone)]
pub struct Expr {
    /// Construction id. Not part of equality; clones of a node share it.
    pub(crate) id: u64,
    /// Structural hash, consistent with `PartialEq`.
    pub(crate) hash: u64,
    pub(crate) kind: ExprKind,
}

impl Deref for Expr {
    type Target = ExprKind;
    fn deref(&self) -> &Self::Target {
        &self.kind
    }
}

impl PartialEq for Expr {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        if self.hash != other.hash {
            return false;
        }
        self.kind == other.kind
    }
}

impl Eq for Expr {}

impl std::hash::Hash for Expr {
    #[inline]
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.hash.hash(state);
    }
}

impl PartialOrd for Expr {
    fn partial_cmp(&self, other: &Self) -> Option<CmpOrdering> {
        Some(self.cmp(other))
    }
}

impl Ord for Expr {
    fn cmp(&self, other: &Self) -> CmpOrdering {
        expr_cmp(self, other)
    }
}

/// Numeric interval `start..end` with independent open/closed bounds.
///
/// Bounds are numeric literals and always describe a non-empty range; empty
/// ranges are represented by [`ExprKind::EmptySet`].
#[derive(Debug, Clone, PartialEq)]
pub struct Interval {
    pub(crate) start: Arc<Expr>,
    pub(crate) end: Arc<Expr>,
    pub(crate) left_open: bool,
    pub(crate) right_open: bool,
}

impl Interval {
    #[must_use]
    pub fn start(&self) -> &Expr {
        &self.start
    }

    #[must_use]
    pub fn end(&self) -> &Expr {
        &self.end
    }

    #[must_use]
    pub const fn left_open(&self) -> bool {
        self.left_open
    }

    #[must_use]
    pub const fn right_open(&self) -> bool {
        self.right_open
    }
}

/// One `(value, condition)` pair of a piecewise expression.
#[derive(Debug, Clone, PartialEq)]
pub struct PiecewiseBranch {
    pub(crate) value: Arc<Expr>,
    pub(crate) condition: Arc<Expr>,
}

impl PiecewiseBranch {
    #[must_use]
    pub fn value(&self) -> &Expr {
        &self.value
    }

    #[must_use]
    pub fn condition(&self) -> &Expr {
        &self.condition
    }
}

/// The kind (structure) of an expression node.
///
/// The set of kinds is closed; new analyses are added as visitors
/// (see [`crate::visitor`]) rather than as methods on the nodes.
#[derive(Debug, Clone, PartialEq)]
pub enum ExprKind {
    /// Named variable, interned.
    Symbol(InternedSymbol),

    /// Exact integer.
    Integer(BigInt),

    /// Exact rational, always reduced with denominator > 1.
    Rational(BigRational),

    /// Double-precision literal.
    RealDouble(RealDouble),

    /// `True` / `False`. Only two instances exist, see [`crate::boolean`].
    BooleanAtom(bool),

    /// Non-empty numeric interval.
    Interval(Interval),

    /// The empty set.
    EmptySet,

    /// Set membership predicate `expr ∈ set`.
    Contains { expr: Arc<Expr>, set: Arc<Expr> },

    /// Logical negation of a boolean-valued node.
    Not(Arc<Expr>),

    /// Conjunction over a sorted, duplicate-free set of at least two
    /// boolean-valued operands, none of which is itself an `And`.
    And(Vec<Arc<Expr>>),

    /// Disjunction, same invariants as `And`.
    Or(Vec<Arc<Expr>>),

    /// Ordered `(value, condition)` branches; order is load-bearing.
    Piecewise(Vec<PiecewiseBranch>),

    /// Sum. Flat, like terms combined, numeric constant first.
    Add(Vec<Arc<Expr>>),

    /// Product. Flat, like bases combined, numeric coefficient first.
    Mul(Vec<Arc<Expr>>),

    /// `base ** exp`
    Pow(Arc<Expr>, Arc<Expr>),

    /// Unevaluated substitution `arg` at `variable = point` for each binding.
    /// Bindings are sorted by variable.
    Subs {
        arg: Arc<Expr>,
        bindings: Vec<(Arc<Expr>, Arc<Expr>)>,
    },
}

impl ExprKind {
    /// Stable kind name, used in error messages.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            ExprKind::Symbol(_) => "Symbol",
            ExprKind::Integer(_) => "Integer",
            ExprKind::Rational(_) => "Rational",
            ExprKind::RealDouble(_) => "RealDouble",
            ExprKind::BooleanAtom(_) => "BooleanAtom",
            ExprKind::Interval(_) => "Interval",
            ExprKind::EmptySet => "EmptySet",
            ExprKind::Contains { .. } => "Contains",
            ExprKind::Not(_) => "Not",
            ExprKind::And(_) => "And",
            ExprKind::Or(_) => "Or",
            ExprKind::Piecewise(_) => "Piecewise",
            ExprKind::Add(_) => "Add",
            ExprKind::Mul(_) => "Mul",
            ExprKind::Pow(_, _) => "Pow",
            ExprKind::Subs { .. } => "Subs",
        }
    }
}

impl Expr {
    /// Ordered children of this node; empty for leaves.
    ///
    /// `Interval` yields its two bounds, `Piecewise` alternates value and
    /// condition, `Subs` yields the argument, then every variable, then
    /// every point.
    #[must_use]
    pub fn args(&self) -> Vec<Arc<Expr>> {
        match &self.kind {
            ExprKind::Symbol(_)
            | ExprKind::Integer(_)
            | ExprKind::Rational(_)
            | ExprKind::RealDouble(_)
            | ExprKind::BooleanAtom(_)
            | ExprKind::EmptySet => Vec::new(),
            ExprKind::Interval(iv) => vec![Arc::clone(&iv.start), Arc::clone(&iv.end)],
            ExprKind::Contains { expr, set } => vec![Arc::clone(expr), Arc::clone(set)],
            ExprKind::Not(arg) => vec![Arc::clone(arg)],
            ExprKind::And(ops) | ExprKind::Or(ops) | ExprKind::Add(ops) | ExprKind::Mul(ops) => {
                ops.clone()
            }
            ExprKind::Piecewise(branches) => branches
                .iter()
                .flat_map(|b| [Arc::clone(&b.value), Arc::clone(&b.condition)])
                .collect(),
            ExprKind::Pow(base, exp) => vec![Arc::clone(base), Arc::clone(exp)],
            ExprKind::Subs { arg, bindings } => std::iter::once(Arc::clone(arg))
                .chain(bindings.iter().map(|(var, _)| Arc::clone(var)))
                .chain(bindings.iter().map(|(_, point)| Arc::clone(point)))
                .collect(),
        }
    }
}

// Iterative drop: deep trees must not overflow the stack when released.
impl Drop for Expr {
    fn drop(&mut self) {
        fn take_arc(slot: &mut Arc<Expr>, queue: &mut Vec<Arc<Expr>>) {
            queue.push(std::mem::replace(slot, Arc::clone(&DUMMY_ARC)));
        }

        fn drain_children(kind: &mut ExprKind, queue: &mut Vec<Arc<Expr>>) {
            match kind {
                ExprKind::And(ops) | ExprKind::Or(ops) | ExprKind::Add(ops) | ExprKind::Mul(ops) => {
                    queue.extend(std::mem::take(ops));
                }
                ExprKind::Piecewise(branches) => {
                    for branch in std::mem::take(branches) {
                        queue.push(branch.value);
                        queue.push(branch.condition);
                    }
                }
                ExprKind::Interval(iv) => {
                    take_arc(&mut iv.start, queue);
                    take_arc(&mut iv.end, queue);
                }
                ExprKind::Contains { expr, set } => {
                    take_arc(expr, queue);
                    take_arc(set, queue);
                }
                ExprKind::Not(arg) => take_arc(arg, queue),
                ExprKind::Pow(base, exp) => {
                    take_arc(base, queue);
                    take_arc(exp, queue);
                }
                ExprKind::Subs { arg, bindings } => {
                    take_arc(arg, queue);
                    for (var, point) in std::mem::take(bindings) {
                        queue.push(var);
                        queue.push(point);
                    }
                }
                ExprKind::Symbol(_)
                | ExprKind::Integer(_)
                | ExprKind::Rational(_)
                | ExprKind::RealDouble(_)
                | ExprKind::BooleanAtom(_)
                | ExprKind::EmptySet => {}
            }
        }

        let mut work_queue = Vec::new();
        drain_children(&mut self.kind, &mut work_queue);

        while let Some(child_arc) = work_queue.pop() {
            if let Ok(mut child_expr) = Arc::try_unwrap(child_arc) {
                drain_children(&mut child_expr.kind, &mut work_queue);
            }
        }
    }
}
