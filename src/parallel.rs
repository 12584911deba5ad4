//! Parallel batch analyses using Rayon
//!
//! Expressions are immutable and `Send + Sync`, so independent trees can be
//! analyzed on rayon's pool without any locking.
//!
//! Enable with the `parallel` feature:
//! ```toml
//! symb_logic = { version = "0.1", features = ["parallel"] }
//! ```

use std::collections::BTreeSet;

use rayon::prelude::*;

use crate::analysis::free_symbols;
use crate::core::error::SymResult;
use crate::core::expr::Expr;

/// Free symbols of each expression, in input order.
#[must_use]
pub fn free_symbols_parallel(exprs: &[Expr]) -> Vec<BTreeSet<Expr>> {
    exprs.par_iter().map(free_symbols).collect()
}

/// Derivative of each expression with respect to `var`, in input order.
///
/// Each entry carries its own result; one failing expression does not
/// affect the others.
pub fn diff_parallel(exprs: &[Expr], var: &Expr) -> Vec<SymResult<Expr>> {
    exprs.par_iter().map(|expr| expr.diff(var)).collect()
}
