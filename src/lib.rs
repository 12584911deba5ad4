//! Canonical Symbolic Expression Trees
//!
//! Immutable expression nodes whose constructors return canonical form, so
//! equal formulas compare and hash equal however they were built.
//!
//! # Features
//! - Interned symbols, exact integers and rationals, IEEE doubles
//! - Intervals, the empty set, and the `Contains` membership predicate
//! - **Boolean logic canonicalization**: flattening, deduplication,
//!   complementation and short-circuiting in `And` / `Or`
//! - `Piecewise` values with ordered conditions
//! - Generic visitor dispatch with early-stopping traversals
//! - Symbolic differentiation through a **builder pattern API**
//!
//! # Usage Examples
//!
//! ## Boolean canonicalization
//! ```
//! use symb_logic::{Expr, bool_false, contains, logical_and, logical_not, symb};
//!
//! let x = symb("x");
//! let unit = Expr::interval(Expr::integer(0), Expr::integer(1), false, false).unwrap();
//! let c = contains(&x, &unit).unwrap();
//! assert_eq!(c.to_string(), "Contains(x, [0, 1])");
//! assert_eq!(logical_and([c.clone(), logical_not(&c)]), bool_false());
//! ```
//!
//! ## Visitors
//! ```
//! use symb_logic::visitor::{Visitor, preorder_traversal};
//! use symb_logic::{Expr, symb};
//!
//! struct Leaves(usize);
//! impl Visitor for Leaves {
//!     type Output = ();
//!     fn visit_default(&mut self, node: &Expr) {
//!         if node.args().is_empty() {
//!             self.0 += 1;
//!         }
//!     }
//! }
//!
//! let x = symb("x");
//! let y = symb("y");
//! let mut leaves = Leaves(0);
//! preorder_traversal(&(&x * &y + Expr::integer(1)), &mut leaves);
//! assert_eq!(leaves.0, 3);
//! ```

mod analysis;
mod builder;
pub(crate) mod core;
mod diff;
mod logic;

#[cfg(feature = "parallel")]
pub mod parallel;

#[cfg(test)]
mod tests;

pub use crate::core::visitor;

// Re-export key types for easier usage
pub use analysis::{coeff, free_symbols, has_symbol};
pub use builder::Diff;
pub use crate::core::{
    Expr, ExprKind, InternedSymbol, Interval, PiecewiseBranch, RealDouble, SymError, SymResult,
    expr_cmp, symb, symb_interned, symbol_count, symbol_exists,
};
pub use logic::{
    Boolean, bool_false, bool_true, boolean, contains, logical_and, logical_not, logical_or,
    piecewise,
};

/// Default maximum tree depth
pub const DEFAULT_MAX_DEPTH: usize = 100;
/// Default maximum tree node count
pub const DEFAULT_MAX_NODES: usize = 10_000;

/// Main API function for symbolic differentiation
///
/// Differentiates `expr` with respect to the symbol `var`, rejecting trees
/// larger than [`DEFAULT_MAX_DEPTH`] / [`DEFAULT_MAX_NODES`]. Use [`Diff`]
/// for other limits.
///
/// # Errors
/// Limit violations, plus every error of [`Expr::diff`].
///
/// # Example
/// ```
/// use symb_logic::{Expr, diff, symb};
///
/// let x = symb("x");
/// let y = symb("y");
/// let f = &x * &y + x.pow(&Expr::integer(2)).unwrap();
/// assert_eq!(diff(&f, &x).unwrap().to_string(), "2*x + y");
/// ```
pub fn diff(expr: &Expr, var: &Expr) -> SymResult<Expr> {
    Diff::new()
        .max_depth(DEFAULT_MAX_DEPTH)
        .max_nodes(DEFAULT_MAX_NODES)
        .differentiate(expr, var)
}
